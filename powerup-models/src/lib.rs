//! Model abstraction and provider clients for powerup.
//!
//! The [`Model`] trait is the single seam between the orchestration loop
//! and a provider API; [`OpenAIChatModel`] is the chat-completions
//! implementation.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod model;
pub mod openai;

pub use error::ModelError;
pub use model::{Model, ModelRequestParameters, ToolChoice};
pub use openai::OpenAIChatModel;
