use thiserror::Error;

/// Failure of a single comparable-data tier.
///
/// These never reach engine callers: [`crate::TieredProvider`] logs them and
/// moves on to the next tier.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A present amount that is not a finite, non-negative number.
    #[error("invalid {field} amount {value:?} for item \"{item_id}\"")]
    InvalidAmount {
        field: &'static str,
        item_id: String,
        value: String,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("{source_name} does not provide {what}")]
    Unsupported {
        source_name: &'static str,
        what: &'static str,
    },

    #[error("{source_name} returned no items for \"{query}\"")]
    Empty {
        source_name: &'static str,
        query: String,
    },
}
