//! HTTP service exposing the powerup demo endpoint.
//!
//! `POST /powerup-demo` takes a list of tool names and a user message,
//! runs the agent loop against the configured model, and returns the
//! final answer along with the executed tool-call transcript.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod server;

pub use config::{Config, ConfigError};
pub use server::{AppState, ErrorResponse, PowerUpRequest, PowerUpResponse, ServerError};
