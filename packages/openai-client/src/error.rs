//! Error types for OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider rejected the request (non-2xx response, rate limit)
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Unexpected response shape
    #[error("parse error: {0}")]
    Parse(String),
}
