//! Error types for model operations.

use thiserror::Error;

/// Errors that can occur when talking to a model provider.
#[derive(Error, Debug)]
pub enum ModelError {
    /// HTTP error with status code.
    #[error("HTTP error {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// API returned an error payload.
    #[error("API error: {message}")]
    Api {
        /// Error message from the API.
        message: String,
        /// Provider error code, if any.
        code: Option<String>,
    },

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Rate limited by the provider.
    #[error("Rate limited{}", retry_after.map(|s| format!(", retry after {s}s")).unwrap_or_default())]
    RateLimited {
        /// Retry-After header value in seconds, if the provider sent one.
        retry_after: Option<u64>,
    },

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The provider returned a response we couldn't make sense of.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Connection-level failure.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Client-side configuration problem.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ModelError {
    /// Check if this error is worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::RateLimited { .. } | Self::Connection(_) => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(ModelError::Timeout.is_retryable());
        assert!(ModelError::RateLimited { retry_after: None }.is_retryable());
        assert!(ModelError::Http {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(!ModelError::Authentication("bad key".into()).is_retryable());
        assert!(!ModelError::Http {
            status: 400,
            body: String::new()
        }
        .is_retryable());
    }

    #[test]
    fn test_rate_limited_display() {
        let err = ModelError::RateLimited {
            retry_after: Some(30),
        };
        assert!(err.to_string().contains("30"));
    }
}
