//! Comparable marketplace transactions for price research.
//!
//! A [`TieredProvider`] tries each configured [`ComparableSource`] in order
//! (normally the remote [`SoldItemsClient`]) and falls back to the
//! [`SyntheticSource`] when none of them produce data. Every search result
//! links back to a marketplace query built by [`search_url`] so a person can
//! verify it by hand.

pub mod client;
pub mod error;
pub mod normalize;
pub mod search_url;
pub mod source;
pub mod synthetic;
pub mod tiered;
pub mod types;

pub use client::SoldItemsClient;
pub use error::ProviderError;
pub use search_url::{ConditionCode, ListingSearch};
pub use source::{ComparableDataProvider, ComparableSource};
pub use synthetic::SyntheticSource;
pub use tiered::TieredProvider;
