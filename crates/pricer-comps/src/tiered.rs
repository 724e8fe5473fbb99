//! Chain of comparable-data tiers ending in the synthetic fallback.

use futures::future::BoxFuture;
use futures::FutureExt;
use pricer_core::{AppConfig, EngineConfig, TransactionRecord};

use crate::client::SoldItemsClient;
use crate::error::ProviderError;
use crate::source::{ComparableDataProvider, ComparableSource};
use crate::synthetic::SyntheticSource;

#[derive(Debug, Clone, Copy)]
enum Request {
    Sold,
    Current,
}

impl Request {
    fn as_str(self) -> &'static str {
        match self {
            Request::Sold => "sold",
            Request::Current => "current",
        }
    }
}

/// Tries each tier in order and uses the first non-empty result whole.
///
/// A tier that errors or returns nothing is logged and skipped; when every
/// tier has been skipped the [`SyntheticSource`] answers. Results are
/// truncated to the requested limit.
pub struct TieredProvider {
    tiers: Vec<Box<dyn ComparableSource>>,
    fallback: SyntheticSource,
}

impl TieredProvider {
    /// A provider with no real tiers: every request is simulated.
    #[must_use]
    pub fn new(fallback: SyntheticSource) -> Self {
        Self {
            tiers: Vec::new(),
            fallback,
        }
    }

    /// Appends a tier tried after those already added.
    #[must_use]
    pub fn with_tier(mut self, tier: impl ComparableSource + 'static) -> Self {
        self.tiers.push(Box::new(tier));
        self
    }

    /// Builds the standard chain: the sold-items API (when a base URL is
    /// configured) followed by synthetic data using the engine's lookback window.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the API client cannot be constructed.
    pub fn from_config(app: &AppConfig, engine: &EngineConfig) -> Result<Self, ProviderError> {
        let fallback = SyntheticSource::new().with_sold_lookback_days(engine.days_back);
        let mut provider = Self::new(fallback);

        if let Some(base_url) = app.comps_api_url.as_deref() {
            let client = SoldItemsClient::new(base_url, app.comps_timeout_secs, &app.user_agent)?;
            provider = provider.with_tier(client);
        } else {
            tracing::info!("no comparable API configured; using synthetic comparables only");
        }

        Ok(provider)
    }

    /// Names of the real tiers, in the order they are tried.
    #[must_use]
    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    async fn fetch(&self, request: Request, query: &str, limit: usize) -> Vec<TransactionRecord> {
        if limit == 0 {
            return Vec::new();
        }

        for tier in &self.tiers {
            let result = match request {
                Request::Sold => tier.fetch_sold(query, limit).await,
                Request::Current => tier.fetch_current(query, limit).await,
            };

            match result {
                Ok(mut records) if !records.is_empty() => {
                    records.truncate(limit);
                    tracing::info!(
                        tier = tier.name(),
                        request = request.as_str(),
                        query,
                        count = records.len(),
                        "comparables fetched"
                    );
                    return records;
                }
                Ok(_) => {
                    tracing::debug!(
                        tier = tier.name(),
                        request = request.as_str(),
                        query,
                        "tier returned no comparables; trying next"
                    );
                }
                Err(ProviderError::Unsupported { .. }) => {
                    tracing::debug!(
                        tier = tier.name(),
                        request = request.as_str(),
                        "tier does not serve this request; trying next"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        tier = tier.name(),
                        request = request.as_str(),
                        query,
                        error = %e,
                        "comparable tier failed; trying next"
                    );
                }
            }
        }

        let records = match request {
            Request::Sold => self.fallback.generate_sold(query, limit),
            Request::Current => self.fallback.generate_current(query, limit),
        };
        tracing::info!(
            tier = SyntheticSource::NAME,
            request = request.as_str(),
            query,
            count = records.len(),
            "falling back to synthetic comparables"
        );
        records
    }
}

impl ComparableDataProvider for TieredProvider {
    fn fetch_sold<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Vec<TransactionRecord>> {
        self.fetch(Request::Sold, query, limit).boxed()
    }

    fn fetch_current<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Vec<TransactionRecord>> {
        self.fetch(Request::Current, query, limit).boxed()
    }
}
