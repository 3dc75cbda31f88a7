//! Error types for agent runs.

use thiserror::Error;

use powerup_core::UsageLimitExceeded;
use powerup_models::ModelError;

/// Errors that can abort an agent run.
///
/// Tool failures are not in this list on purpose: they are fed back to
/// the model as retry prompts and only surface here indirectly, through
/// the usage limits, if the model never recovers.
#[derive(Error, Debug)]
pub enum AgentRunError {
    /// The model provider failed.
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// A usage limit was exceeded.
    #[error(transparent)]
    UsageLimit(#[from] UsageLimitExceeded),
}

#[cfg(test)]
mod tests {
    use super::*;
    use powerup_core::errors::UsageLimitType;

    #[test]
    fn test_display() {
        let err = AgentRunError::from(UsageLimitExceeded::new(UsageLimitType::Requests, 11, 10));
        assert!(err.to_string().contains("Usage limit exceeded"));

        let err = AgentRunError::from(ModelError::Timeout);
        assert!(err.to_string().contains("Model error"));
    }
}
