//! Error types for sitedeploy-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for sitedeploy-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sitedeploy-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid or missing local path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication or permission failure
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// The bucket already exists and belongs to the caller
    #[error("Bucket already owned by you: {0}")]
    BucketAlreadyOwned(String),

    /// Conflict error
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No static website endpoint is known for the region
    #[error("No website endpoint known for region: {0}")]
    UnknownRegion(String),

    /// Any other failure reported by the cloud provider
    #[error("{0}")]
    Provider(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidPath(_) => 2,                                   // UsageError
            Error::Config(_) | Error::UnknownRegion(_) => 2,              // UsageError
            Error::Network(_) => 3,                                       // NetworkError
            Error::Auth(_) => 4,                                          // AuthError
            Error::NotFound(_) => 5,                                      // NotFound
            Error::Conflict(_) | Error::BucketAlreadyOwned(_) => 6,       // Conflict
            _ => 1,                                                       // GeneralError
        }
    }
}
