//! OpenAI chat-completions support.

pub mod chat;
pub mod types;

pub use chat::OpenAIChatModel;
