//! Tool-calling orchestration for powerup.
//!
//! An [`Agent`] owns a model and a set of tools. [`Agent::run`] drives
//! the loop: ask the model, execute any tool calls it requests, feed the
//! results back, and repeat until the model answers in plain text.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod agent;
pub mod errors;
pub mod run;

pub use agent::Agent;
pub use errors::AgentRunError;
pub use run::{ExecutedToolCall, RunResult};
