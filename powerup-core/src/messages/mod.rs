//! Message types exchanged with the model.
//!
//! A conversation is a sequence of [`ModelRequest`]s. Each request carries
//! parts sent to the model (prompts, tool returns, retry prompts, and prior
//! assistant responses); each [`ModelResponse`] carries parts coming back
//! (text and tool calls).

pub mod parts;
pub mod request;
pub mod response;
pub mod tool_return;

pub use parts::{TextPart, ToolCallArgs, ToolCallPart};
pub use request::{
    ModelRequest, ModelRequestPart, RetryPromptPart, SystemPromptPart, ToolReturnPart,
    UserPromptPart,
};
pub use response::{FinishReason, ModelResponse, ModelResponsePart};
pub use tool_return::{ToolReturn, ToolReturnContent};
