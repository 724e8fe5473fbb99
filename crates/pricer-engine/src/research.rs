//! Manual-research package handed out alongside every analysis.
//!
//! When the automated sample is thin (or synthetic) a person verifies the
//! price by hand: the package carries the marketplace searches to open, a
//! checklist of what to look for, and a blank record to fill in and export.

use chrono::{DateTime, Duration, Utc};
use pricer_comps::ListingSearch;
use serde::{Deserialize, Serialize};

/// Days until a researched price should be checked again.
pub const RESEARCH_AGAIN_AFTER_DAYS: i64 = 30;

const RESEARCH_STEPS: &[&str] = &[
    "Open the sold listings search and review completed sales from the lookback window",
    "Match condition, model and included accessories against the item being priced",
    "Record the prices of at least five close matches including shipping",
    "Open the current listings search to see what competing sellers are asking",
    "Note how quickly similar items sold and whether prices are rising or falling",
    "Fill in the findings and set a confidence level before exporting the record",
];

const RED_FLAGS: &[&str] = &[
    "Listings sold as lots or bundles",
    "Listings marked for parts, broken or not working",
    "Prices far above or below the rest of the sample",
    "Best offer accepted sales where the final price is hidden",
    "Sellers with very low feedback or unusual shipping charges",
    "Replica, reproduction or unbranded lookalike items",
];

/// Marketplace searches for checking comparables by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationUrls {
    pub sold_listings: String,
    pub current_listings: String,
}

impl VerificationUrls {
    /// Sold search (largest page, limited to the lookback window) and active
    /// search for `query`.
    #[must_use]
    pub fn for_query(query: &str, days_back: u32) -> Self {
        Self {
            sold_listings: ListingSearch::sold(query)
                .sold_within_days(days_back)
                .to_url(),
            current_listings: ListingSearch::active(query).to_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchChecklist {
    pub steps: Vec<String>,
    pub red_flags: Vec<String>,
}

impl Default for ResearchChecklist {
    fn default() -> Self {
        Self {
            steps: RESEARCH_STEPS.iter().map(|s| (*s).to_string()).collect(),
            red_flags: RED_FLAGS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchConfidence {
    Low,
    #[default]
    Medium,
    High,
}

/// Results a researcher fills in. Blank until then.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchFindings {
    pub average_sold_price: Option<f64>,
    pub sales_volume: Option<u32>,
    pub price_trend: Option<String>,
    pub notes: Option<String>,
}

/// The exportable research record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRecord {
    pub researched_at: DateTime<Utc>,
    pub product: String,
    pub search_terms: String,
    pub sold_listings_url: String,
    pub current_listings_url: String,
    #[serde(default)]
    pub findings: ResearchFindings,
    pub research_again_on: DateTime<Utc>,
    #[serde(default)]
    pub confidence: ResearchConfidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchPackage {
    pub urls: VerificationUrls,
    pub checklist: ResearchChecklist,
    pub template: ResearchRecord,
}

impl ResearchPackage {
    /// Builds the package for `product`, searched as `query`.
    #[must_use]
    pub fn new(product: &str, query: &str, days_back: u32, now: DateTime<Utc>) -> Self {
        let urls = VerificationUrls::for_query(query, days_back);
        let template = ResearchRecord {
            researched_at: now,
            product: product.to_string(),
            search_terms: query.to_string(),
            sold_listings_url: urls.sold_listings.clone(),
            current_listings_url: urls.current_listings.clone(),
            findings: ResearchFindings::default(),
            research_again_on: now + Duration::days(RESEARCH_AGAIN_AFTER_DAYS),
            confidence: ResearchConfidence::default(),
        };

        Self {
            urls,
            checklist: ResearchChecklist::default(),
            template,
        }
    }
}
