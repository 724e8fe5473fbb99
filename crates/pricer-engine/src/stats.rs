//! Descriptive statistics over comparable totals and the pricing rules built
//! on them.

use pricer_core::TransactionRecord;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Summary of comparable totals (price plus shipping).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceStatistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; zero when fewer than two totals exist.
    pub std_dev: f64,
}

impl PriceStatistics {
    /// Statistics over each record's total. `None` for an empty sample.
    #[must_use]
    pub fn from_records(records: &[TransactionRecord]) -> Option<Self> {
        let totals: Vec<f64> = records.iter().map(TransactionRecord::total).collect();
        Self::from_totals(&totals)
    }

    #[must_use]
    pub fn from_totals(totals: &[f64]) -> Option<Self> {
        if totals.is_empty() {
            return None;
        }

        let std_dev = if totals.len() < 2 {
            0.0
        } else {
            Statistics::std_dev(totals)
        };

        Some(Self {
            count: totals.len(),
            min: Statistics::min(totals),
            max: Statistics::max(totals),
            mean: Statistics::mean(totals),
            median: median(totals),
            std_dev,
        })
    }

    /// Standard deviation relative to the median; zero when the median is not
    /// positive.
    #[must_use]
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.median > 0.0 {
            self.std_dev / self.median
        } else {
            0.0
        }
    }

    /// Confidence in the sample on a 0 to 100 scale.
    ///
    /// Half the score rewards sample size, saturating at `saturation_count`
    /// records. The other half rewards agreement between comparables and
    /// falls to zero once the coefficient of variation reaches 0.5.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn confidence_score(&self, saturation_count: usize) -> f64 {
        let saturation = saturation_count.max(1) as f64;
        let size_score = (self.count as f64 / saturation * 50.0).min(100.0);
        let spread_score = (50.0 - self.coefficient_of_variation() * 100.0).max(0.0);
        round_cents((size_score + spread_score).min(100.0))
    }
}

/// Positions of records whose total lies further than `threshold` times the
/// median from the median.
#[must_use]
pub fn outlier_indices(records: &[TransactionRecord], median: f64, threshold: f64) -> Vec<usize> {
    let limit = threshold * median;
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| (record.total() - median).abs() > limit)
        .map(|(index, _)| index)
        .collect()
}

/// Price ending in .99 closest to the marked-up median.
///
/// Computed as `round(median * (1 + markup / 100) - 0.01) + 0.99`, with
/// halves rounding to the even neighbour, and expressed to the cent.
#[must_use]
pub fn suggested_price(median: f64, markup_percent: f64) -> f64 {
    let marked_up = median * (1.0 + markup_percent / 100.0);
    round_cents((marked_up - 0.01).round_ties_even() + 0.99)
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn median(totals: &[f64]) -> f64 {
    let mut sorted = totals.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
