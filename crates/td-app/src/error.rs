//! Error types for the td-app service layer.

use std::path::PathBuf;

use td_extract::ExtractError;

/// Application error type shared by the pipeline and the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read design file: {path}")]
    DesignFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Design file is not a valid design: {0}")]
    DesignFile(String),

    #[error("Extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for td-app operations.
pub type AppResult<T> = Result<T, AppError>;
