use std::path::{Path, PathBuf};

use chrono::Utc;
use pricer_comps::ComparableDataProvider;
use pricer_core::{EngineConfig, ItemDescriptor, TransactionRecord};

use crate::error::EngineError;
use crate::export::{default_export_path, write_research_record};
use crate::recommendation::{InsufficientData, PricedAnalysis, Recommendation};
use crate::research::{ResearchPackage, ResearchRecord};
use crate::stats::{outlier_indices, suggested_price, PriceStatistics};
use crate::terms::build_search_query;

/// Upper bound on the sample size requested from the provider.
pub const MAX_SAMPLE_LIMIT: usize = 200;

/// Comparables whose total falls below this are treated as listing noise.
pub const MIN_COMPARABLE_TOTAL: f64 = 0.99;

/// What to price. A non-blank `query` takes precedence over `item`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisRequest {
    pub query: Option<String>,
    pub item: Option<ItemDescriptor>,
    /// Overrides the configured default markup.
    pub markup_percent: Option<f64>,
    /// Overrides the configured sample limit; kept between the configured
    /// minimum and [`MAX_SAMPLE_LIMIT`].
    pub sample_limit: Option<usize>,
}

impl AnalysisRequest {
    #[must_use]
    pub fn for_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn for_item(item: ItemDescriptor) -> Self {
        Self {
            item: Some(item),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_markup(mut self, markup_percent: f64) -> Self {
        self.markup_percent = Some(markup_percent);
        self
    }

    #[must_use]
    pub fn with_sample_limit(mut self, limit: usize) -> Self {
        self.sample_limit = Some(limit);
        self
    }
}

/// Prices items from comparable sales fetched through `P`.
///
/// Calls run one at a time. The only state carried between calls is the
/// research template of the most recent analysis, kept for
/// [`PriceEngine::export_research_template`].
pub struct PriceEngine<P> {
    config: EngineConfig,
    provider: P,
    last_template: Option<ResearchRecord>,
}

impl<P: ComparableDataProvider> PriceEngine<P> {
    #[must_use]
    pub fn new(config: EngineConfig, provider: P) -> Self {
        Self {
            config,
            provider,
            last_template: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Template produced by the most recent analysis, priced or not. Requests
    /// rejected as invalid input leave it unchanged.
    #[must_use]
    pub fn last_research_template(&self) -> Option<&ResearchRecord> {
        self.last_template.as_ref()
    }

    /// Analyzes one item or query.
    ///
    /// Returns [`Recommendation::InsufficientData`] with a manual-research
    /// package when fewer than `min_results` usable sold comparables exist.
    /// Provider trouble never surfaces as an error.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when no search query can be
    /// resolved from the request, or when the markup is not a finite number.
    pub async fn analyze(
        &mut self,
        request: AnalysisRequest,
    ) -> Result<Recommendation, EngineError> {
        let query = resolve_query(&request)?;
        let product = request
            .item
            .as_ref()
            .and_then(ItemDescriptor::display_title)
            .unwrap_or(query.as_str())
            .trim()
            .to_string();
        let markup_percent = request
            .markup_percent
            .unwrap_or(self.config.default_markup);
        if !markup_percent.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "markup must be a finite number, got {markup_percent}"
            )));
        }
        let limit = self.effective_limit(request.sample_limit);
        let analyzed_at = Utc::now();

        tracing::info!(query = %query, limit, markup_percent, "analyzing comparables");

        let mut fetched = self.provider.fetch_sold(&query, limit).await;
        fetched.truncate(limit);
        let (sold, excluded) = filter_comparables(fetched, &self.config.exclude_words);
        if excluded > 0 {
            tracing::debug!(
                query = %query,
                excluded,
                "dropped comparables matching exclusion phrases or below the price floor"
            );
        }

        let research = ResearchPackage::new(&product, &query, self.config.days_back, analyzed_at);
        self.last_template = Some(research.template.clone());

        let min_results = self.config.min_results.max(1);
        let statistics = match PriceStatistics::from_records(&sold) {
            Some(statistics) if sold.len() >= min_results => statistics,
            _ => {
                let mut current = self.provider.fetch_current(&query, limit).await;
                current.truncate(limit);
                let reason = format!(
                    "not enough sold comparables: needed {min_results}, found {}",
                    sold.len()
                );
                tracing::info!(
                    query = %query,
                    found = sold.len(),
                    needed = min_results,
                    current = current.len(),
                    "insufficient sold data; manual research required"
                );
                return Ok(Recommendation::InsufficientData(InsufficientData {
                    query,
                    sold,
                    excluded,
                    current,
                    reason,
                    research,
                    analyzed_at,
                }));
            }
        };

        let price = suggested_price(statistics.median, markup_percent);
        let confidence_score = statistics.confidence_score(self.config.confidence_min_items);
        let outliers = outlier_indices(&sold, statistics.median, self.config.outlier_threshold);

        tracing::info!(
            query = %query,
            count = statistics.count,
            median = statistics.median,
            suggested_price = price,
            confidence_score,
            outliers = outliers.len(),
            "price recommendation ready"
        );

        Ok(Recommendation::Priced(PricedAnalysis {
            query,
            sold,
            excluded,
            statistics,
            markup_percent,
            suggested_price: price,
            confidence_score,
            outliers,
            research,
            analyzed_at,
        }))
    }

    /// Writes the last research template to `path`, or to a timestamped file
    /// in the configured export directory. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoResearchTemplate`] before the first analysis,
    /// and an export error when the file cannot be written.
    pub fn export_research_template(&self, path: Option<&Path>) -> Result<PathBuf, EngineError> {
        let template = self
            .last_template
            .as_ref()
            .ok_or(EngineError::NoResearchTemplate)?;
        let path = path.map_or_else(
            || default_export_path(&self.config.export_dir, Utc::now()),
            Path::to_path_buf,
        );

        write_research_record(template, &path)?;
        tracing::info!(path = %path.display(), "research template exported");
        Ok(path)
    }

    fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.config.max_results)
            .max(self.config.min_results)
            .min(MAX_SAMPLE_LIMIT)
    }
}

fn resolve_query(request: &AnalysisRequest) -> Result<String, EngineError> {
    if let Some(query) = request.query.as_deref().map(str::trim) {
        if !query.is_empty() {
            return Ok(query.to_string());
        }
    }

    let built = request
        .item
        .as_ref()
        .map(build_search_query)
        .unwrap_or_default();
    if built.is_empty() {
        return Err(EngineError::InvalidInput(
            "a search query or an item with a title or identifying specifics is required"
                .to_string(),
        ));
    }
    Ok(built)
}

/// Drops records whose title contains any exclusion phrase
/// (case-insensitively) or whose total is below [`MIN_COMPARABLE_TOTAL`].
/// Returns the kept records and the number dropped.
fn filter_comparables(
    records: Vec<TransactionRecord>,
    phrases: &[String],
) -> (Vec<TransactionRecord>, usize) {
    let phrases: Vec<String> = phrases
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .collect();
    let before = records.len();
    let kept: Vec<TransactionRecord> = records
        .into_iter()
        .filter(|record| {
            let title = record.title.to_lowercase();
            record.total() >= MIN_COMPARABLE_TOTAL
                && !phrases.iter().any(|phrase| title.contains(phrase.as_str()))
        })
        .collect();
    let excluded = before - kept.len();
    (kept, excluded)
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
