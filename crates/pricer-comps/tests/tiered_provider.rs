//! Fallback behaviour of `TieredProvider`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricer_comps::{
    ComparableDataProvider, ComparableSource, ProviderError, SoldItemsClient, SyntheticSource,
    TieredProvider,
};
use pricer_core::{ListingKind, RecordOrigin, TransactionRecord};

/// A tier that always fails and counts how often it was asked.
struct BrokenTier {
    calls: Arc<AtomicU32>,
}

impl ComparableSource for BrokenTier {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn fetch_sold<'a>(
        &'a self,
        _query: &'a str,
        _limit: usize,
    ) -> BoxFuture<'a, Result<Vec<TransactionRecord>, ProviderError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        async move {
            Err(ProviderError::UnexpectedStatus {
                status: 500,
                url: "http://broken.invalid".to_string(),
            })
        }
        .boxed()
    }

    fn fetch_current<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<TransactionRecord>, ProviderError>> {
        self.fetch_sold(query, limit)
    }
}

/// A tier returning a fixed set of records.
struct FixedTier(Vec<TransactionRecord>);

impl ComparableSource for FixedTier {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn fetch_sold<'a>(
        &'a self,
        _query: &'a str,
        _limit: usize,
    ) -> BoxFuture<'a, Result<Vec<TransactionRecord>, ProviderError>> {
        let records = self.0.clone();
        async move { Ok(records) }.boxed()
    }

    fn fetch_current<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<TransactionRecord>, ProviderError>> {
        self.fetch_sold(query, limit)
    }
}

fn record(id: &str, price: f64) -> TransactionRecord {
    TransactionRecord {
        title: format!("item {id}"),
        price,
        shipping: 0.0,
        date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        url: String::new(),
        condition: "Used".to_string(),
        item_id: id.to_string(),
        kind: ListingKind::Sold,
        origin: RecordOrigin::Remote,
        watchers: None,
        views: None,
    }
}

#[tokio::test]
async fn no_tiers_means_synthetic() {
    let provider = TieredProvider::new(SyntheticSource::seeded(1));
    let sold = provider.fetch_sold("lamp", 4).await;
    assert_eq!(sold.len(), 4);
    assert!(sold.iter().all(|r| r.origin == RecordOrigin::Synthetic));
}

#[tokio::test]
async fn failing_tier_falls_through_to_synthetic() {
    let calls = Arc::new(AtomicU32::new(0));
    let provider = TieredProvider::new(SyntheticSource::seeded(2)).with_tier(BrokenTier {
        calls: Arc::clone(&calls),
    });

    let sold = provider.fetch_sold("lamp", 5).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1, "broken tier tried exactly once");
    assert_eq!(sold.len(), 5);
    assert!(sold.iter().all(|r| r.origin == RecordOrigin::Synthetic));
}

#[tokio::test]
async fn first_successful_tier_wins_whole() {
    let provider = TieredProvider::new(SyntheticSource::seeded(3))
        .with_tier(FixedTier(vec![record("a", 10.0), record("b", 12.0)]))
        .with_tier(FixedTier(vec![record("z", 99.0)]));

    let sold = provider.fetch_sold("lamp", 10).await;
    let ids: Vec<_> = sold.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn empty_tier_is_skipped() {
    let provider = TieredProvider::new(SyntheticSource::seeded(4))
        .with_tier(FixedTier(Vec::new()))
        .with_tier(FixedTier(vec![record("b", 12.0)]));

    let sold = provider.fetch_sold("lamp", 10).await;
    assert_eq!(sold.len(), 1);
    assert_eq!(sold[0].item_id, "b");
}

#[tokio::test]
async fn oversized_tier_result_is_truncated() {
    let provider = TieredProvider::new(SyntheticSource::seeded(5)).with_tier(FixedTier(vec![
        record("a", 1.0),
        record("b", 2.0),
        record("c", 3.0),
    ]));

    assert_eq!(provider.fetch_sold("lamp", 2).await.len(), 2);
}

#[tokio::test]
async fn zero_limit_returns_nothing() {
    let provider = TieredProvider::new(SyntheticSource::seeded(6));
    assert!(provider.fetch_sold("lamp", 0).await.is_empty());
    assert!(provider.fetch_current("lamp", 0).await.is_empty());
}

#[tokio::test]
async fn remote_outage_degrades_to_synthetic_sold_items() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/findCompletedItems"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = SoldItemsClient::new(&server.uri(), 5, "pricer-test/0.1").unwrap();
    let provider = TieredProvider::new(SyntheticSource::seeded(7)).with_tier(client);
    assert_eq!(provider.tier_names(), vec!["sold_items_api"]);

    let sold = provider.fetch_sold("Widget Pro", 6).await;
    assert_eq!(sold.len(), 6);
    assert!(sold.iter().all(|r| r.origin == RecordOrigin::Synthetic));
}

#[tokio::test]
async fn remote_sold_items_are_used_when_available() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/findCompletedItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"title": "Widget Pro", "price": {"value": 22.0}, "itemId": "1"},
                {"title": "Widget Pro", "price": {"value": 24.0}, "itemId": "2"}
            ]
        })))
        .mount(&server)
        .await;

    let client = SoldItemsClient::new(&server.uri(), 5, "pricer-test/0.1").unwrap();
    let provider = TieredProvider::new(SyntheticSource::seeded(8)).with_tier(client);

    let sold = provider.fetch_sold("Widget Pro", 10).await;
    assert_eq!(sold.len(), 2);
    assert!(sold.iter().all(|r| r.origin == RecordOrigin::Remote));
}

#[tokio::test]
async fn current_listings_skip_remote_tier() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(0)
        .mount(&server)
        .await;

    let client = SoldItemsClient::new(&server.uri(), 5, "pricer-test/0.1").unwrap();
    let provider = TieredProvider::new(SyntheticSource::seeded(9)).with_tier(client);

    let current = provider.fetch_current("Widget Pro", 3).await;
    assert_eq!(current.len(), 3);
    assert!(current.iter().all(|r| r.kind == ListingKind::Active));
}

#[tokio::test]
async fn unusable_remote_prices_degrade_to_synthetic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/findCompletedItems"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"title": "Widget Pro", "price": {"value": "n/a"}, "itemId": "1"},
                {"title": "Widget Pro", "price": {"value": "call for price"}, "itemId": "2"},
                {"title": "Widget Pro", "price": {"value": "NaN"}, "itemId": "3"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SoldItemsClient::new(&server.uri(), 5, "pricer-test/0.1").unwrap();
    let provider = TieredProvider::new(SyntheticSource::seeded(10)).with_tier(client);

    let sold = provider.fetch_sold("Widget Pro", 3).await;
    assert_eq!(sold.len(), 3);
    assert!(sold
        .iter()
        .all(|r| r.origin == RecordOrigin::Synthetic && r.price.is_finite() && r.price >= 0.99));
}

#[tokio::test]
async fn oversized_limit_is_capped_by_synthetic_tier() {
    let provider = TieredProvider::new(SyntheticSource::seeded(11));

    let current = provider.fetch_current("Widget", usize::MAX).await;
    let sold = provider.fetch_sold("Widget", 1_000_000).await;

    assert_eq!(current.len(), pricer_comps::synthetic::MAX_GENERATED);
    assert_eq!(sold.len(), pricer_comps::synthetic::MAX_GENERATED);
}
