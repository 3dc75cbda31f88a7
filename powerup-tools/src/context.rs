//! Execution context passed to tools.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use powerup_core::identifier::{generate_run_id, now_utc};

/// Context available to a tool during execution.
///
/// Carries shared dependencies plus per-run and per-call metadata. Tools
/// that need an HTTP client, credentials, or other shared state get them
/// through `deps`.
#[derive(Debug, Clone)]
pub struct RunContext<Deps> {
    /// Shared dependencies for the run.
    pub deps: Arc<Deps>,
    /// ID of the run this call belongs to.
    pub run_id: String,
    /// When the run started.
    pub start_time: DateTime<Utc>,
    /// Name of the model driving the run, if known.
    pub model_name: Option<String>,
    /// Name of the tool currently executing.
    pub tool_name: Option<String>,
    /// ID of the tool call currently executing.
    pub tool_call_id: Option<String>,
}

impl<Deps> RunContext<Deps> {
    /// Create a new context for a run.
    #[must_use]
    pub fn new(deps: Arc<Deps>, run_id: impl Into<String>) -> Self {
        Self {
            deps,
            run_id: run_id.into(),
            start_time: now_utc(),
            model_name: None,
            tool_name: None,
            tool_call_id: None,
        }
    }

    /// Create a context with a freshly generated run ID.
    #[must_use]
    pub fn minimal(deps: Deps) -> Self {
        Self::new(Arc::new(deps), generate_run_id())
    }

    /// Set the model name.
    #[must_use]
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    /// Derive a context scoped to one tool call.
    #[must_use]
    pub fn for_tool(&self, tool_name: impl Into<String>, tool_call_id: Option<String>) -> Self {
        Self {
            deps: Arc::clone(&self.deps),
            run_id: self.run_id.clone(),
            start_time: self.start_time,
            model_name: self.model_name.clone(),
            tool_name: Some(tool_name.into()),
            tool_call_id,
        }
    }

    /// Elapsed time since the run started.
    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        now_utc() - self.start_time
    }
}
