//! The seams between the engine and its comparable-data tiers.

use futures::future::BoxFuture;
use pricer_core::TransactionRecord;

use crate::error::ProviderError;

/// One tier of comparable data. A tier may fail; the failure is the signal to
/// try the next tier.
pub trait ComparableSource: Send + Sync {
    /// Short stable name used in logs, e.g. `"sold_items_api"`.
    fn name(&self) -> &'static str;

    /// Up to `limit` recently sold items matching `query`.
    fn fetch_sold<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<TransactionRecord>, ProviderError>>;

    /// Up to `limit` active listings matching `query`.
    fn fetch_current<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<TransactionRecord>, ProviderError>>;
}

/// Infallible comparable data as the engine consumes it.
///
/// Implementations absorb tier failures and may return fewer than `limit`
/// records, or none.
pub trait ComparableDataProvider: Send + Sync {
    fn fetch_sold<'a>(&'a self, query: &'a str, limit: usize)
        -> BoxFuture<'a, Vec<TransactionRecord>>;

    fn fetch_current<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Vec<TransactionRecord>>;
}
