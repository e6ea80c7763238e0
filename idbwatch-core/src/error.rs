//! Error types for idbwatch-core
//!
//! Provides a unified error type for all operations in the library.

/// Result type alias for idbwatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for idbwatch operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CIDR parsing error
    #[error("Invalid CIDR notation: {0}")]
    CidrParse(String),

    /// Target parsing error
    #[error("Invalid target specification: {0}")]
    InvalidTarget(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// External scanner error
    #[error("Scanner error: {0}")]
    Scanner(String),

    /// Generic error
    #[error("{0}")]
    Generic(String),
}
