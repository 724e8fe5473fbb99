//! Marketplace search URLs for human verification.
//!
//! Pure string building: the same [`ListingSearch`] always renders the same
//! URL. Parameters are emitted in a fixed order so URLs can be compared in
//! tests and diffed in exported research records.

use std::fmt::Write as _;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

pub const SEARCH_BASE_URL: &str = "https://www.ebay.com/sch/i.html";

/// Largest page size the search page honours.
pub const MAX_PER_PAGE: u32 = 200;

/// Sort order code for "newly listed / most recent first".
const SORT_NEWEST: u8 = 10;

/// Marketplace condition groups accepted by the `LH_ItemCondition` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionCode {
    New,
    OpenBox,
    CertifiedRefurbished,
    ExcellentRefurbished,
    Used,
    Good,
    Acceptable,
    ForParts,
}

impl ConditionCode {
    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            ConditionCode::New => 1000,
            ConditionCode::OpenBox => 1500,
            ConditionCode::CertifiedRefurbished => 2000,
            ConditionCode::ExcellentRefurbished => 2500,
            ConditionCode::Used => 3000,
            ConditionCode::Good => 4000,
            ConditionCode::Acceptable => 5000,
            ConditionCode::ForParts => 7000,
        }
    }
}

impl FromStr for ConditionCode {
    type Err = String;

    /// Accepts marketplace labels case-insensitively, with spaces, dashes or
    /// underscores between words (`"Open box"`, `"open-box"`, `"for_parts"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect();
        match key.as_str() {
            "new" => Ok(ConditionCode::New),
            "open box" => Ok(ConditionCode::OpenBox),
            "certified refurbished" => Ok(ConditionCode::CertifiedRefurbished),
            "refurbished" | "excellent refurbished" => Ok(ConditionCode::ExcellentRefurbished),
            "used" | "very good" => Ok(ConditionCode::Used),
            "good" => Ok(ConditionCode::Good),
            "acceptable" => Ok(ConditionCode::Acceptable),
            "for parts" | "for parts or not working" => Ok(ConditionCode::ForParts),
            other => Err(format!("unknown condition '{other}'")),
        }
    }
}

/// A sold- or active-listings search to render as a URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSearch {
    pub keywords: String,
    pub sold: bool,
    pub per_page: u32,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category_id: Option<String>,
    pub conditions: Vec<ConditionCode>,
    /// Only honoured for sold searches.
    pub sold_within_days: Option<u32>,
}

impl ListingSearch {
    /// Completed-and-sold listings for `keywords`.
    #[must_use]
    pub fn sold(keywords: impl Into<String>) -> Self {
        Self::new(keywords.into(), true)
    }

    /// Currently active listings for `keywords`.
    #[must_use]
    pub fn active(keywords: impl Into<String>) -> Self {
        Self::new(keywords.into(), false)
    }

    fn new(keywords: String, sold: bool) -> Self {
        Self {
            keywords,
            sold,
            per_page: MAX_PER_PAGE,
            min_price: None,
            max_price: None,
            category_id: None,
            conditions: Vec::new(),
            sold_within_days: None,
        }
    }

    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    #[must_use]
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    #[must_use]
    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: ConditionCode) -> Self {
        if !self.conditions.contains(&condition) {
            self.conditions.push(condition);
        }
        self
    }

    #[must_use]
    pub fn sold_within_days(mut self, days: u32) -> Self {
        self.sold_within_days = Some(days);
        self
    }

    /// Renders the search as a URL.
    ///
    /// Parameter order: keywords, sold/completed flags, page size (capped at
    /// [`MAX_PER_PAGE`]), sort, price bounds, category, condition group,
    /// sold-within window.
    #[must_use]
    pub fn to_url(&self) -> String {
        let mut url = format!("{SEARCH_BASE_URL}?_nkw={}", encode(self.keywords.trim()));

        if self.sold {
            url.push_str("&LH_Sold=1&LH_Complete=1");
        }

        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        let _ = write!(url, "&_ipg={per_page}&_sop={SORT_NEWEST}");

        if let Some(min) = self.min_price {
            let _ = write!(url, "&_udlo={min:.2}");
        }
        if let Some(max) = self.max_price {
            let _ = write!(url, "&_udhi={max:.2}");
        }
        if let Some(category) = self.category_id.as_deref().filter(|c| !c.is_empty()) {
            let _ = write!(url, "&_sacat={}", encode(category));
        }
        if !self.conditions.is_empty() {
            let group = self
                .conditions
                .iter()
                .map(|c| c.code().to_string())
                .collect::<Vec<_>>()
                .join("|");
            let _ = write!(url, "&LH_ItemCondition={}", encode(&group));
        }
        if self.sold {
            if let Some(days) = self.sold_within_days {
                let _ = write!(url, "&LH_SoldWithin={days}");
            }
        }

        url
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
#[path = "search_url_test.rs"]
mod tests;
