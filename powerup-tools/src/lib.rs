//! Tool system for powerup agents.
//!
//! This crate provides the [`Tool`] trait and the plumbing around it:
//! [`ToolDefinition`] and [`SchemaBuilder`] for describing tools to the
//! model, [`ToolRegistry`] for dispatch by name, [`RunContext`] for
//! execution context, and the concrete web tools under [`common`].

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;
pub mod context;
pub mod definition;
pub mod errors;
pub mod registry;
pub mod schema;
pub mod tool;

pub use context::RunContext;
pub use definition::{ObjectJsonSchema, ToolDefinition};
pub use errors::ToolError;
pub use registry::ToolRegistry;
pub use schema::SchemaBuilder;
pub use tool::{Tool, ToolResult};

pub use powerup_core::messages::{ToolReturn, ToolReturnContent};
