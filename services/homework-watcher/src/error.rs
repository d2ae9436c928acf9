//! Error types for the homework watcher

use crate::formatter::FormatError;
use crate::validator::ValidationError;

/// Errors that can occur in the watcher service
#[derive(Debug, thiserror::Error)]
pub enum WatcherError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Notifier error: {0}")]
    Notifier(String),
}

/// Result type alias for watcher operations
pub type Result<T> = std::result::Result<T, WatcherError>;

/// Failure of the review API request itself
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request to {endpoint} failed: {cause}")]
    Transport { endpoint: String, cause: String },

    #[error("endpoint {endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("response from {endpoint} is not valid JSON: {cause}")]
    Decode { endpoint: String, cause: String },
}

/// A failed watch loop tick, tagged by the stage that failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    #[error("API request failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Invalid API response: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cannot parse homework status: {0}")]
    Format(#[from] FormatError),
}

impl TickError {
    /// Text reported to the chat when this error ends a tick
    pub fn diagnostic(&self) -> String {
        format!("Program failure: {}", self)
    }
}
