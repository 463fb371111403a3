//! Fetch error definitions.

use thiserror::Error;

/// Errors that can occur while retrieving the doctor list.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured endpoint is not a usable URL.
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Connection, TLS or body transfer failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// The body is not the expected JSON.
    #[error("malformed doctor payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Short label for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidEndpoint { .. } => "invalid_endpoint",
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}
