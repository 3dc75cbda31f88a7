//! Core model trait and types.
//!
//! This module defines the `Model` trait which is the primary interface
//! for interacting with language models.

use async_trait::async_trait;
use std::sync::Arc;

use powerup_core::{ModelRequest, ModelResponse, ModelSettings};
use powerup_tools::ToolDefinition;

use crate::error::ModelError;

/// Parameters for a model request.
#[derive(Debug, Clone, Default)]
pub struct ModelRequestParameters {
    /// Tool definitions to include (Arc avoids cloning on every step).
    pub tools: Arc<Vec<ToolDefinition>>,
    /// Tool choice strategy.
    pub tool_choice: Option<ToolChoice>,
    /// Whether a plain text response is acceptable.
    pub allow_text_output: bool,
}

impl ModelRequestParameters {
    /// Create new empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allow_text_output: true,
            ..Self::default()
        }
    }

    /// Set the tools.
    #[must_use]
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Arc::new(tools);
        self
    }

    /// Set the tool choice.
    #[must_use]
    pub fn with_tool_choice(mut self, choice: ToolChoice) -> Self {
        self.tool_choice = Some(choice);
        self
    }

    /// Check if any tools are declared.
    #[must_use]
    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }
}

/// Strategy for how the model should pick tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolChoice {
    /// Let the model decide.
    Auto,
    /// The model must call some tool.
    Required,
    /// The model must not call tools.
    None,
    /// The model must call the named tool.
    Specific(String),
}

/// A language model that can answer requests.
#[async_trait]
pub trait Model: Send + Sync {
    /// The model name, e.g. "gpt-4o".
    fn name(&self) -> &str;

    /// The provider system, e.g. "openai".
    fn system(&self) -> &str;

    /// A stable "system:name" identifier.
    fn identifier(&self) -> String {
        format!("{}:{}", self.system(), self.name())
    }

    /// Send the conversation to the model and return its response.
    async fn request(
        &self,
        messages: &[ModelRequest],
        settings: &ModelSettings,
        params: &ModelRequestParameters,
    ) -> Result<ModelResponse, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters_default() {
        let params = ModelRequestParameters::new();
        assert!(params.allow_text_output);
        assert!(!params.has_tools());
    }

    #[test]
    fn test_parameters_with_tools() {
        let params = ModelRequestParameters::new()
            .with_tools(vec![ToolDefinition::new("t", "d")])
            .with_tool_choice(ToolChoice::Auto);
        assert!(params.has_tools());
        assert_eq!(params.tool_choice, Some(ToolChoice::Auto));
    }
}
