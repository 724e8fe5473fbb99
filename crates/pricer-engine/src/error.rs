use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Neither a usable query nor an item descriptor yielding one was supplied.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no research template to export; run an analysis first")]
    NoResearchTemplate,

    #[error("failed to write research export {path}: {source}")]
    ExportIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize research export: {0}")]
    ExportJson(#[from] serde_json::Error),

    #[error("failed to write research CSV {path}: {source}")]
    ExportCsv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
