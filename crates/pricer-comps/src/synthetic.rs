//! Simulated comparables used when no real source produced data.
//!
//! The shape is fixed and the values are random. Every record links to the
//! marketplace search for the query so the numbers can be checked by hand.
//! Seed the RNG with [`SyntheticSource::seeded`] for reproducible output.

use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};

use chrono::{Duration, Utc};
use pricer_core::{ListingKind, RecordOrigin, TransactionRecord};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::search_url::{ListingSearch, MAX_PER_PAGE};

const CONDITIONS: &[&str] = &["New", "Used", "Open box", "Refurbished"];

/// Prices never drop below this floor.
const MIN_PRICE: f64 = 0.99;

/// Most records generated for a single request, whatever the limit asked for.
pub const MAX_GENERATED: usize = MAX_PER_PAGE as usize;

const DEFAULT_SOLD_LOOKBACK_DAYS: u32 = 90;
const DEFAULT_ACTIVE_LOOKBACK_DAYS: u32 = 30;

/// Parameters that distinguish simulated sold items from simulated listings.
struct Profile {
    kind: ListingKind,
    base_price: RangeInclusive<f64>,
    /// Fraction of the base price a single record may deviate by.
    variation: f64,
    shipping: RangeInclusive<f64>,
    lookback_days: u32,
    label: &'static str,
}

pub struct SyntheticSource {
    rng: Mutex<StdRng>,
    sold_lookback_days: u32,
    active_lookback_days: u32,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }
}

impl SyntheticSource {
    /// Name reported in logs.
    pub const NAME: &'static str = "synthetic";

    /// A source seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose output depends only on `seed` and the current date.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            sold_lookback_days: DEFAULT_SOLD_LOOKBACK_DAYS,
            active_lookback_days: DEFAULT_ACTIVE_LOOKBACK_DAYS,
        }
    }

    /// Sets how far back simulated sold dates may fall.
    #[must_use]
    pub fn with_sold_lookback_days(mut self, days: u32) -> Self {
        self.sold_lookback_days = days;
        self
    }

    /// `limit` (at most [`MAX_GENERATED`]) simulated sold records (±30 % around a base in 20..=200).
    #[must_use]
    pub fn generate_sold(&self, query: &str, limit: usize) -> Vec<TransactionRecord> {
        let url = ListingSearch::sold(query)
            .sold_within_days(self.sold_lookback_days)
            .to_url();
        self.generate(
            query,
            limit,
            &url,
            &Profile {
                kind: ListingKind::Sold,
                base_price: 20.0..=200.0,
                variation: 0.3,
                shipping: 0.0..=15.0,
                lookback_days: self.sold_lookback_days,
                label: "Sample Item",
            },
        )
    }

    /// `limit` (at most [`MAX_GENERATED`]) simulated active listings (±40 % around a base in 25..=250).
    #[must_use]
    pub fn generate_current(&self, query: &str, limit: usize) -> Vec<TransactionRecord> {
        let url = ListingSearch::active(query).to_url();
        self.generate(
            query,
            limit,
            &url,
            &Profile {
                kind: ListingKind::Active,
                base_price: 25.0..=250.0,
                variation: 0.4,
                shipping: 0.0..=20.0,
                lookback_days: self.active_lookback_days,
                label: "Current Listing",
            },
        )
    }

    fn generate(
        &self,
        query: &str,
        limit: usize,
        url: &str,
        profile: &Profile,
    ) -> Vec<TransactionRecord> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let today = Utc::now().date_naive();
        let lookback = i64::from(profile.lookback_days.max(1));

        let base = rng.random_range(profile.base_price.clone());
        let spread = base * profile.variation;

        (1..=limit.min(MAX_GENERATED))
            .map(|i| {
                let price = round_cents(base + rng.random_range(-spread..=spread)).max(MIN_PRICE);
                let shipping = round_cents(rng.random_range(profile.shipping.clone()));
                let days_ago = rng.random_range(1..=lookback);
                let condition = CONDITIONS.choose(&mut *rng).copied().unwrap_or("Used");
                let item_id = rng.random_range(100_000_000u32..=999_999_999).to_string();
                let (watchers, views) = match profile.kind {
                    ListingKind::Active => (
                        Some(rng.random_range(0..=15)),
                        Some(rng.random_range(10..=200)),
                    ),
                    ListingKind::Sold => (None, None),
                };

                TransactionRecord {
                    title: format!("{query} - {} {i}", profile.label),
                    price,
                    shipping,
                    date: today - Duration::days(days_ago),
                    url: url.to_owned(),
                    condition: condition.to_owned(),
                    item_id,
                    kind: profile.kind,
                    origin: RecordOrigin::Synthetic,
                    watchers,
                    views,
                }
            })
            .collect()
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sold_sample_has_requested_size_and_shape() {
        let source = SyntheticSource::seeded(7);
        let records = source.generate_sold("Widget Pro", 12);
        assert_eq!(records.len(), 12);

        let today = Utc::now().date_naive();
        let expected_url = ListingSearch::sold("Widget Pro").sold_within_days(90).to_url();
        for (i, r) in records.iter().enumerate() {
            assert_eq!(r.title, format!("Widget Pro - Sample Item {}", i + 1));
            assert!(r.price >= MIN_PRICE);
            assert!((0.0..=15.0).contains(&r.shipping));
            let age = (today - r.date).num_days();
            assert!((1..=90).contains(&age), "age {age} out of range");
            assert!(CONDITIONS.contains(&r.condition.as_str()));
            assert_eq!(r.url, expected_url);
            assert_eq!(r.kind, ListingKind::Sold);
            assert_eq!(r.origin, RecordOrigin::Synthetic);
            assert!(r.watchers.is_none() && r.views.is_none());
            assert_eq!(r.item_id.len(), 9);
        }
    }

    #[test]
    fn sold_prices_stay_within_variation_band() {
        let records = SyntheticSource::seeded(11).generate_sold("lamp", 50);
        let max = records.iter().map(|r| r.price).fold(f64::MIN, f64::max);
        let min = records.iter().map(|r| r.price).fold(f64::MAX, f64::min);
        // ±30 % around a single base: the extremes are at most 0.6 × base apart,
        // and base ≥ 20, so max ≤ 1.3 / 0.7 × min plus rounding slack.
        assert!(max <= min * (1.3 / 0.7) + 0.02, "min {min}, max {max}");
    }

    #[test]
    fn current_listings_carry_counters() {
        let records = SyntheticSource::seeded(3).generate_current("lamp", 8);
        assert_eq!(records.len(), 8);
        let today = Utc::now().date_naive();
        for r in &records {
            assert_eq!(r.kind, ListingKind::Active);
            assert!(r.watchers.is_some_and(|w| w <= 15));
            assert!(r.views.is_some_and(|v| (10..=200).contains(&v)));
            assert!((0.0..=20.0).contains(&r.shipping));
            assert!((1..=30).contains(&(today - r.date).num_days()));
            assert!(r.url.starts_with("https://www.ebay.com/sch/i.html?_nkw=lamp"));
            assert!(!r.url.contains("LH_Sold"));
        }
    }

    #[test]
    fn same_seed_same_output() {
        let a = SyntheticSource::seeded(42).generate_sold("lamp", 5);
        let b = SyntheticSource::seeded(42).generate_sold("lamp", 5);
        assert_eq!(a, b);
    }

    #[test]
    fn huge_limit_is_capped() {
        let source = SyntheticSource::seeded(5);
        assert_eq!(source.generate_current("lamp", usize::MAX).len(), MAX_GENERATED);
        assert_eq!(source.generate_sold("lamp", MAX_GENERATED + 1).len(), MAX_GENERATED);
    }

    #[test]
    fn zero_limit_yields_nothing() {
        assert!(SyntheticSource::seeded(1).generate_sold("lamp", 0).is_empty());
    }

    #[test]
    fn custom_lookback_bounds_sold_dates() {
        let source = SyntheticSource::seeded(9).with_sold_lookback_days(5);
        let today = Utc::now().date_naive();
        for r in source.generate_sold("lamp", 30) {
            assert!((1..=5).contains(&(today - r.date).num_days()));
            assert!(r.url.ends_with("&LH_SoldWithin=5"));
        }
    }
}
