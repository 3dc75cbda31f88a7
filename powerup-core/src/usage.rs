//! Token usage tracking for model requests.
//!
//! This module provides types for tracking token usage across requests and
//! runs, as well as the limit checks that bound the orchestration loop.

use serde::{Deserialize, Serialize};

use crate::errors::{UsageLimitExceeded, UsageLimitType};

/// Token usage for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestUsage {
    /// Number of tokens in the request/prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_tokens: Option<u64>,
    /// Number of tokens in the response/completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_tokens: Option<u64>,
    /// Total tokens (request + response).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

impl RequestUsage {
    /// Create a new empty usage record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create usage with request and response tokens.
    #[must_use]
    pub fn with_tokens(request_tokens: u64, response_tokens: u64) -> Self {
        Self {
            request_tokens: Some(request_tokens),
            response_tokens: Some(response_tokens),
            total_tokens: Some(request_tokens + response_tokens),
        }
    }

    /// Get total tokens, calculating if not set.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total_tokens
            .unwrap_or_else(|| self.request_tokens.unwrap_or(0) + self.response_tokens.unwrap_or(0))
    }

    /// Check if this usage record has any data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.request_tokens.is_none()
            && self.response_tokens.is_none()
            && self.total_tokens.is_none()
    }
}

/// Accumulated usage for an entire run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunUsage {
    /// Individual request usages.
    pub requests: Vec<RequestUsage>,
    /// Total request tokens across all requests.
    pub total_request_tokens: u64,
    /// Total response tokens across all requests.
    pub total_response_tokens: u64,
    /// Total tokens across all requests.
    pub total_tokens: u64,
    /// Number of tool calls executed during the run.
    pub tool_calls: u64,
}

impl RunUsage {
    /// Create a new empty run usage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request's usage.
    pub fn add_request(&mut self, usage: RequestUsage) {
        self.total_request_tokens += usage.request_tokens.unwrap_or(0);
        self.total_response_tokens += usage.response_tokens.unwrap_or(0);
        self.total_tokens += usage.total();
        self.requests.push(usage);
    }

    /// Record an executed tool call.
    pub fn add_tool_call(&mut self) {
        self.tool_calls += 1;
    }

    /// Get the number of model requests.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Check if there's no usage data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.tool_calls == 0
    }
}

/// Usage limits for a run.
///
/// The request and tool-call limits are what keep the orchestration loop
/// finite when a model keeps asking for more tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageLimits {
    /// Maximum total tokens for the run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_total_tokens: Option<u64>,
    /// Maximum number of model requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_requests: Option<u64>,
    /// Maximum number of tool calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tool_calls: Option<u64>,
}

impl Default for UsageLimits {
    fn default() -> Self {
        Self {
            max_total_tokens: None,
            max_requests: Some(10),
            max_tool_calls: Some(20),
        }
    }
}

impl UsageLimits {
    /// Create limits with the default request and tool-call bounds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create limits with nothing set.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_total_tokens: None,
            max_requests: None,
            max_tool_calls: None,
        }
    }

    /// Set max total tokens.
    #[must_use]
    pub fn max_total_tokens(mut self, tokens: u64) -> Self {
        self.max_total_tokens = Some(tokens);
        self
    }

    /// Set max requests.
    #[must_use]
    pub fn max_requests(mut self, requests: u64) -> Self {
        self.max_requests = Some(requests);
        self
    }

    /// Set max tool calls.
    #[must_use]
    pub fn max_tool_calls(mut self, calls: u64) -> Self {
        self.max_tool_calls = Some(calls);
        self
    }

    /// Check if usage exceeds limits.
    ///
    /// Returns `Ok(())` if within limits, or an error describing which
    /// limit was exceeded.
    pub fn check(&self, usage: &RunUsage) -> Result<(), UsageLimitExceeded> {
        if let Some(max) = self.max_total_tokens {
            if usage.total_tokens > max {
                return Err(UsageLimitExceeded::new(
                    UsageLimitType::TotalTokens,
                    usage.total_tokens,
                    max,
                ));
            }
        }

        if let Some(max) = self.max_requests {
            let count = usage.request_count() as u64;
            if count > max {
                return Err(UsageLimitExceeded::new(
                    UsageLimitType::Requests,
                    count,
                    max,
                ));
            }
        }

        if let Some(max) = self.max_tool_calls {
            if usage.tool_calls > max {
                return Err(UsageLimitExceeded::new(
                    UsageLimitType::ToolCalls,
                    usage.tool_calls,
                    max,
                ));
            }
        }

        Ok(())
    }

    /// Check if any limits are set.
    #[must_use]
    pub fn has_limits(&self) -> bool {
        self.max_total_tokens.is_some()
            || self.max_requests.is_some()
            || self.max_tool_calls.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_usage_with_tokens() {
        let usage = RequestUsage::with_tokens(100, 50);
        assert_eq!(usage.request_tokens, Some(100));
        assert_eq!(usage.response_tokens, Some(50));
        assert_eq!(usage.total_tokens, Some(150));
    }

    #[test]
    fn test_run_usage() {
        let mut run = RunUsage::new();
        run.add_request(RequestUsage::with_tokens(100, 50));
        run.add_request(RequestUsage::with_tokens(200, 100));
        run.add_tool_call();

        assert_eq!(run.request_count(), 2);
        assert_eq!(run.total_request_tokens, 300);
        assert_eq!(run.total_response_tokens, 150);
        assert_eq!(run.total_tokens, 450);
        assert_eq!(run.tool_calls, 1);
    }

    #[test]
    fn test_usage_limits_check_pass() {
        let limits = UsageLimits::new().max_total_tokens(1000);

        let mut run = RunUsage::new();
        run.add_request(RequestUsage::with_tokens(100, 50));

        assert!(limits.check(&run).is_ok());
    }

    #[test]
    fn test_usage_limits_check_fail_tokens() {
        let limits = UsageLimits::unlimited().max_total_tokens(100);

        let mut run = RunUsage::new();
        run.add_request(RequestUsage::with_tokens(100, 50));

        let err = limits.check(&run).unwrap_err();
        assert_eq!(err.limit_type, UsageLimitType::TotalTokens);
    }

    #[test]
    fn test_usage_limits_check_fail_requests() {
        let limits = UsageLimits::unlimited().max_requests(1);

        let mut run = RunUsage::new();
        run.add_request(RequestUsage::with_tokens(10, 5));
        run.add_request(RequestUsage::with_tokens(10, 5));

        let err = limits.check(&run).unwrap_err();
        assert_eq!(err.limit_type, UsageLimitType::Requests);
    }

    #[test]
    fn test_usage_limits_check_fail_tool_calls() {
        let limits = UsageLimits::unlimited().max_tool_calls(2);

        let mut run = RunUsage::new();
        for _ in 0..3 {
            run.add_tool_call();
        }

        let err = limits.check(&run).unwrap_err();
        assert_eq!(err.limit_type, UsageLimitType::ToolCalls);
    }

    #[test]
    fn test_serde_roundtrip() {
        let usage = RequestUsage::with_tokens(100, 50);
        let json = serde_json::to_string(&usage).unwrap();
        let parsed: RequestUsage = serde_json::from_str(&json).unwrap();
        assert_eq!(usage, parsed);
    }
}
