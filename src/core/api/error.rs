//! API Error Types
//!
//! Failures at the notes-service boundary, one variant per category the
//! controller reports differently.

use thiserror::Error;

/// Notes service errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The connectivity check failed.
    #[error("Could not connect to the server ({reason})")]
    Connection { reason: String },

    /// A read returned a non-2xx status.
    #[error("Request failed with HTTP {status}")]
    Fetch { status: u16 },

    /// A write was refused by the backend.
    #[error("{message}")]
    ServerRejection { message: String },

    /// Transport-level failure (DNS, refused connection, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx response whose body did not match the contract.
    #[error("Unexpected response from the server: {0}")]
    Decode(String),

    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl ApiError {
    /// Message shown to the user for a failed write.
    ///
    /// Backend-supplied messages pass through; everything else falls back
    /// to `generic`.
    pub fn write_message(&self, generic: &str) -> String {
        match self {
            ApiError::ServerRejection { message } => message.clone(),
            _ => generic.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Result type alias for notes service operations
pub type Result<T> = std::result::Result<T, ApiError>;
