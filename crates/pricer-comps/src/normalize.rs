//! Conversion from sold-items API shapes to [`TransactionRecord`]s.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate};
use pricer_core::{ListingKind, RecordOrigin, TransactionRecord};

use crate::error::ProviderError;
use crate::types::{CompletedItem, MoneyValue};

/// Normalizes API items into sold records.
///
/// Items sharing a non-empty `itemId` are kept once (first wins) and the
/// result is truncated to `limit`. Missing fields get conservative defaults:
/// `"Unknown Item"` titles, `"Unknown"` conditions, zero amounts, and `today`
/// for an absent or unparseable end time.
///
/// # Errors
///
/// Returns [`ProviderError::InvalidAmount`] when any item carries a price or
/// shipping amount that is not a finite, non-negative number. The payload is
/// rejected whole.
pub fn normalize_completed_items(
    items: Vec<CompletedItem>,
    limit: usize,
    today: NaiveDate,
) -> Result<Vec<TransactionRecord>, ProviderError> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut records = Vec::new();

    for item in items {
        let record = normalize_completed_item(item, today)?;
        if records.len() < limit
            && (record.item_id.is_empty() || seen_ids.insert(record.item_id.clone()))
        {
            records.push(record);
        }
    }

    Ok(records)
}

fn normalize_completed_item(
    item: CompletedItem,
    today: NaiveDate,
) -> Result<TransactionRecord, ProviderError> {
    let date = item
        .end_time
        .as_deref()
        .and_then(parse_end_date)
        .unwrap_or(today);
    let item_id = item.item_id.unwrap_or_default();
    let price = amount("price", item.price.as_ref(), &item_id)?;
    let shipping = amount("shipping", item.shipping_cost.as_ref(), &item_id)?;

    Ok(TransactionRecord {
        title: item
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Unknown Item".to_string()),
        price,
        shipping,
        date,
        url: item.view_item_url.unwrap_or_default(),
        condition: item
            .condition
            .and_then(|c| c.condition_display_name)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        item_id,
        kind: ListingKind::Sold,
        origin: RecordOrigin::Remote,
        watchers: None,
        views: None,
    })
}

/// Absent or blank amounts are zero; anything else must be a finite,
/// non-negative number.
fn amount(
    field: &'static str,
    money: Option<&MoneyValue>,
    item_id: &str,
) -> Result<f64, ProviderError> {
    let Some(value) = money.and_then(|m| m.value.as_ref()) else {
        return Ok(0.0);
    };
    if value.is_blank() {
        return Ok(0.0);
    }
    value
        .as_f64()
        .filter(|n| *n >= 0.0)
        .ok_or_else(|| ProviderError::InvalidAmount {
            field,
            item_id: item_id.to_owned(),
            value: value.raw(),
        })
}

/// Accepts full RFC 3339 timestamps or a bare `YYYY-MM-DD` prefix.
fn parse_end_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            raw.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        })
}
