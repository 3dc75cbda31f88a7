//! Error types for tool execution.

use thiserror::Error;

/// Errors that can occur during tool execution.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Tool execution failed.
    #[error("Tool execution failed: {message}")]
    ExecutionFailed {
        /// Error message.
        message: String,
        /// Whether the call may succeed if retried.
        retryable: bool,
    },

    /// The model supplied invalid arguments.
    #[error("Invalid tool arguments: {message}")]
    InvalidArguments {
        /// Error message.
        message: String,
    },

    /// No tool registered under the requested name.
    #[error("Tool not found: {name}")]
    NotFound {
        /// The requested tool name.
        name: String,
    },

    /// Tool execution timed out.
    #[error("Tool timed out: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// The tool is missing configuration (credentials, endpoints).
    #[error("Tool configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolError {
    /// Create a non-retryable execution failure.
    #[must_use]
    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
            retryable: false,
        }
    }

    /// Create a retryable execution failure.
    #[must_use]
    pub fn retryable(message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
            retryable: true,
        }
    }

    /// Create an invalid-arguments error.
    #[must_use]
    pub fn invalid_args(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a not-found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Check if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ExecutionFailed { retryable, .. } => *retryable,
            Self::Timeout { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_failed_not_retryable() {
        let err = ToolError::execution_failed("boom");
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_retryable() {
        assert!(ToolError::retryable("flaky").is_retryable());
        assert!(ToolError::timeout("slow").is_retryable());
    }

    #[test]
    fn test_not_found_display() {
        let err = ToolError::not_found("mystery_tool");
        assert_eq!(err.to_string(), "Tool not found: mystery_tool");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad").unwrap_err();
        let err: ToolError = json_err.into();
        assert!(matches!(err, ToolError::Json(_)));
    }
}
