//! Error types for chatlore-core

use thiserror::Error;

/// Main error type for the chatlore-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Export file is structurally unusable
    #[error("export error in {path}: {message}")]
    Export { path: String, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for chatlore-core
pub type Result<T> = std::result::Result<T, Error>;
