use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level settings read from the environment.
///
/// Engine tuning (markup, sample sizes, exclusion words) lives in
/// [`crate::EngineConfig`], which is loaded from the file named by
/// `engine_config_path`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub engine_config_path: Option<PathBuf>,
    /// Base URL of the remote sold-items source. `None` disables the remote tier.
    pub comps_api_url: Option<String>,
    pub comps_timeout_secs: u64,
    pub user_agent: String,
}
