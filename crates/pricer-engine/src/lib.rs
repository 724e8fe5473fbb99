//! Price recommendation from comparable sales.
//!
//! [`PriceEngine::analyze`] turns an item description or search text into
//! either a statistically derived price ([`Recommendation::Priced`]) or, when
//! too few comparables exist, a manual-research package
//! ([`Recommendation::InsufficientData`]). Both outcomes carry the research
//! template that [`PriceEngine::export_research_template`] writes to disk.

pub mod engine;
pub mod error;
pub mod export;
pub mod recommendation;
pub mod research;
pub mod stats;
pub mod terms;

pub use engine::{AnalysisRequest, PriceEngine, MAX_SAMPLE_LIMIT, MIN_COMPARABLE_TOTAL};
pub use error::EngineError;
pub use recommendation::{InsufficientData, PricedAnalysis, Recommendation};
pub use research::{
    ResearchChecklist, ResearchConfidence, ResearchFindings, ResearchPackage, ResearchRecord,
    VerificationUrls,
};
pub use stats::{suggested_price, PriceStatistics};
pub use terms::build_search_query;
