use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a record describes a completed sale or a live listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingKind {
    Sold,
    Active,
}

/// Where a record came from. Synthetic records are placeholders that must be
/// cross-checked through their search URL before being trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    Remote,
    Synthetic,
}

/// One comparable marketplace transaction used as a pricing reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub title: String,
    /// Item price in the marketplace currency. Expected to be non-negative.
    pub price: f64,
    /// Shipping charged on top of `price`.
    #[serde(default)]
    pub shipping: f64,
    /// Sold date for sold records, listing date for active ones.
    pub date: NaiveDate,
    pub url: String,
    pub condition: String,
    /// Opaque marketplace identifier. May be empty for remote records that omit it.
    pub item_id: String,
    pub kind: ListingKind,
    pub origin: RecordOrigin,
    /// Active listings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watchers: Option<u32>,
    /// Active listings only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u32>,
}

impl TransactionRecord {
    /// Price plus shipping; the amount all statistics are computed over.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.price + self.shipping
    }
}
