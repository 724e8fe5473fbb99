use chrono::{DateTime, Utc};
use pricer_core::TransactionRecord;
use serde::{Deserialize, Serialize};

use crate::research::ResearchPackage;
use crate::stats::PriceStatistics;

/// Outcome of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Recommendation {
    Priced(PricedAnalysis),
    InsufficientData(InsufficientData),
}

/// Enough sold comparables existed to derive a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedAnalysis {
    pub query: String,
    pub sold: Vec<TransactionRecord>,
    /// Sold records dropped because their title matched an exclusion phrase.
    pub excluded: usize,
    pub statistics: PriceStatistics,
    pub markup_percent: f64,
    pub suggested_price: f64,
    /// 0 to 100.
    pub confidence_score: f64,
    /// Indices into `sold`.
    pub outliers: Vec<usize>,
    pub research: ResearchPackage,
    pub analyzed_at: DateTime<Utc>,
}

/// Too few sold comparables; the research package is the way forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsufficientData {
    pub query: String,
    pub sold: Vec<TransactionRecord>,
    pub excluded: usize,
    pub current: Vec<TransactionRecord>,
    pub reason: String,
    pub research: ResearchPackage,
    pub analyzed_at: DateTime<Utc>,
}

impl Recommendation {
    #[must_use]
    pub fn query(&self) -> &str {
        match self {
            Self::Priced(priced) => &priced.query,
            Self::InsufficientData(insufficient) => &insufficient.query,
        }
    }

    #[must_use]
    pub fn research(&self) -> &ResearchPackage {
        match self {
            Self::Priced(priced) => &priced.research,
            Self::InsufficientData(insufficient) => &insufficient.research,
        }
    }

    #[must_use]
    pub fn sold(&self) -> &[TransactionRecord] {
        match self {
            Self::Priced(priced) => &priced.sold,
            Self::InsufficientData(insufficient) => &insufficient.sold,
        }
    }

    #[must_use]
    pub fn suggested_price(&self) -> Option<f64> {
        match self {
            Self::Priced(priced) => Some(priced.suggested_price),
            Self::InsufficientData(_) => None,
        }
    }

    #[must_use]
    pub fn is_priced(&self) -> bool {
        matches!(self, Self::Priced(_))
    }
}
