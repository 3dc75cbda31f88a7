//! Shared error types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of usage limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLimitType {
    /// Total tokens limit.
    TotalTokens,
    /// Number of model requests limit.
    Requests,
    /// Number of tool calls limit.
    ToolCalls,
}

impl fmt::Display for UsageLimitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TotalTokens => write!(f, "total_tokens"),
            Self::Requests => write!(f, "requests"),
            Self::ToolCalls => write!(f, "tool_calls"),
        }
    }
}

/// Usage limits exceeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageLimitExceeded {
    /// Type of limit exceeded.
    pub limit_type: UsageLimitType,
    /// Current value.
    pub current: u64,
    /// Maximum allowed value.
    pub max: u64,
}

impl fmt::Display for UsageLimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Usage limit exceeded: {} is {} but max is {}",
            self.limit_type, self.current, self.max
        )
    }
}

impl std::error::Error for UsageLimitExceeded {}

impl UsageLimitExceeded {
    /// Create a new usage limit error.
    #[must_use]
    pub fn new(limit_type: UsageLimitType, current: u64, max: u64) -> Self {
        Self {
            limit_type,
            current,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_limit_exceeded_display() {
        let err = UsageLimitExceeded::new(UsageLimitType::Requests, 11, 10);
        assert!(err.to_string().contains("requests"));
        assert!(err.to_string().contains("11"));
    }
}
