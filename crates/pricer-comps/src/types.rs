//! Request and response types for the sold-items search API.
//!
//! ### Amounts
//! `price.value` and `shippingCost.value` arrive as JSON numbers from some
//! deployments and as decimal strings (`"12.50"`) from others. [`Amount`]
//! accepts both; anything unparseable is treated as absent.
//!
//! ### Optional fields
//! Every item field may be missing. Defaults are applied during
//! normalization, not here, so this module mirrors the wire shape only.

use serde::{Deserialize, Serialize};

/// Body of `POST /findCompletedItems`.
#[derive(Debug, Serialize)]
pub struct CompletedItemsRequest<'a> {
    pub keywords: &'a str,
    pub excluded_keywords: &'a str,
    /// The API expects a numeric string.
    pub max_search_results: String,
    pub category_id: &'a str,
    pub remove_outliers: bool,
    pub site_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletedItemsResponse {
    #[serde(default)]
    pub items: Vec<CompletedItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<MoneyValue>,
    #[serde(default)]
    pub shipping_cost: Option<MoneyValue>,
    /// ISO-8601 timestamp, e.g. `"2025-02-11T18:22:04.000Z"`.
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default, rename = "viewItemURL")]
    pub view_item_url: Option<String>,
    #[serde(default)]
    pub condition: Option<ItemCondition>,
    #[serde(default)]
    pub item_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoneyValue {
    #[serde(default)]
    pub value: Option<Amount>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// The amount as a finite number. `None` for text that does not parse or
    /// parses to infinity or NaN.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let parsed = match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(s) => s.trim().parse::<f64>().ok(),
        };
        parsed.filter(|n| n.is_finite())
    }

    /// Blank text counts as no amount at all.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Amount::Text(s) if s.trim().is_empty())
    }

    #[must_use]
    pub fn raw(&self) -> String {
        match self {
            Amount::Number(n) => n.to_string(),
            Amount::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCondition {
    #[serde(default)]
    pub condition_display_name: Option<String>,
}
