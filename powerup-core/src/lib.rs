//! Core types for powerup.
//!
//! This crate holds the model-facing message types (requests, responses,
//! and their parts), token usage accounting, generation settings, and ID
//! generation shared by the rest of the workspace.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod errors;
pub mod identifier;
pub mod messages;
pub mod settings;
pub mod usage;

pub use errors::{UsageLimitExceeded, UsageLimitType};
pub use identifier::{generate_run_id, generate_tool_call_id, now_utc};
pub use messages::{
    FinishReason, ModelRequest, ModelRequestPart, ModelResponse, ModelResponsePart,
    RetryPromptPart, SystemPromptPart, TextPart, ToolCallArgs, ToolCallPart, ToolReturn,
    ToolReturnContent, ToolReturnPart, UserPromptPart,
};
pub use settings::ModelSettings;
pub use usage::{RequestUsage, RunUsage, UsageLimits};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::errors::{UsageLimitExceeded, UsageLimitType};
    pub use crate::identifier::{generate_run_id, generate_tool_call_id, now_utc};
    pub use crate::messages::{
        FinishReason, ModelRequest, ModelRequestPart, ModelResponse, ModelResponsePart,
        TextPart, ToolCallArgs, ToolCallPart, ToolReturn, ToolReturnContent,
    };
    pub use crate::settings::ModelSettings;
    pub use crate::usage::{RequestUsage, RunUsage, UsageLimits};
}
