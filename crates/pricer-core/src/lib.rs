//! Shared domain types and configuration for the price recommendation
//! workspace.

pub mod app_config;
pub mod config;
pub mod engine_config;
pub mod item;
pub mod listing;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use engine_config::{load_engine_config, EngineConfig};
pub use item::ItemDescriptor;
pub use listing::{ListingKind, RecordOrigin, TransactionRecord};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read engine config file {path}: {source}")]
    EngineConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse engine config file {path}: {reason}")]
    EngineConfigParse { path: String, reason: String },

    #[error("engine config validation failed: {0}")]
    Validation(String),
}
