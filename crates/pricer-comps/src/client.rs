//! HTTP client for the sold-items search API.

use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use futures::FutureExt;
use pricer_core::TransactionRecord;
use reqwest::{Client, Url};

use crate::error::ProviderError;
use crate::normalize::normalize_completed_items;
use crate::source::ComparableSource;
use crate::types::{CompletedItemsRequest, CompletedItemsResponse};

const COMPLETED_ITEMS_PATH: &str = "findCompletedItems";

/// Largest result page the API will return.
const MAX_API_RESULTS: usize = 100;

/// Sent with every request so the API can pre-filter damaged or parts-only listings.
const EXCLUDED_KEYWORDS: &str = "broken damaged parts repair for parts only read description";

/// US marketplace.
const SITE_ID: &str = "0";

/// Client for the remote sold-items API.
///
/// One request per call with no retries: a failure is handed back to the
/// caller, which falls through to the next comparable-data tier.
pub struct SoldItemsClient {
    client: Client,
    endpoint: Url,
}

impl SoldItemsClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// `timeout_secs` bounds the whole request including the body read.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] if the `reqwest::Client` cannot be built.
    /// - [`ProviderError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash makes `join` append to the base path instead of
        // replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(COMPLETED_ITEMS_PATH))
            .map_err(|e| ProviderError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self { client, endpoint })
    }

    /// The fully-resolved `findCompletedItems` URL.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches up to `limit` sold items for `query`.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Http`] on network failure or timeout.
    /// - [`ProviderError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ProviderError::Deserialize`] if the body is not the expected JSON.
    /// - [`ProviderError::InvalidAmount`] if any item's price or shipping is
    ///   present but not a usable number.
    pub async fn fetch_completed_items(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ProviderError> {
        let body = CompletedItemsRequest {
            keywords: query,
            excluded_keywords: EXCLUDED_KEYWORDS,
            max_search_results: limit.min(MAX_API_RESULTS).to_string(),
            category_id: "",
            remove_outliers: true,
            site_id: SITE_ID,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let text = response.text().await?;
        let parsed = serde_json::from_str::<CompletedItemsResponse>(&text).map_err(|e| {
            ProviderError::Deserialize {
                context: format!("findCompletedItems for \"{query}\""),
                source: e,
            }
        })?;

        normalize_completed_items(parsed.items, limit, Utc::now().date_naive())
    }
}

impl ComparableSource for SoldItemsClient {
    fn name(&self) -> &'static str {
        "sold_items_api"
    }

    fn fetch_sold<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<TransactionRecord>, ProviderError>> {
        async move {
            let records = self.fetch_completed_items(query, limit).await?;
            if records.is_empty() {
                return Err(ProviderError::Empty {
                    source_name: self.name(),
                    query: query.to_owned(),
                });
            }
            Ok(records)
        }
        .boxed()
    }

    fn fetch_current<'a>(
        &'a self,
        _query: &'a str,
        _limit: usize,
    ) -> BoxFuture<'a, Result<Vec<TransactionRecord>, ProviderError>> {
        let err = ProviderError::Unsupported {
            source_name: self.name(),
            what: "active listings",
        };
        async move { Err(err) }.boxed()
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
