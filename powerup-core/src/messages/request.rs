//! Request message types sent to the model.
//!
//! This module defines the message parts that are sent TO the model:
//! system prompts, user prompts, tool returns, retry prompts, and prior
//! assistant responses carried along for role alternation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::response::ModelResponse;
use super::tool_return::ToolReturnContent;

/// A complete model request containing multiple parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRequest {
    /// The request parts.
    pub parts: Vec<ModelRequestPart>,
    /// Kind identifier.
    #[serde(default = "default_request_kind")]
    pub kind: String,
}

fn default_request_kind() -> String {
    "request".to_string()
}

impl ModelRequest {
    /// Create a new empty request.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parts: Vec::new(),
            kind: "request".to_string(),
        }
    }

    /// Create a request with the given parts.
    #[must_use]
    pub fn with_parts(parts: Vec<ModelRequestPart>) -> Self {
        Self {
            parts,
            kind: "request".to_string(),
        }
    }

    /// Add a part.
    pub fn add_part(&mut self, part: ModelRequestPart) {
        self.parts.push(part);
    }

    /// Add a system prompt.
    pub fn add_system_prompt(&mut self, content: impl Into<String>) {
        self.parts
            .push(ModelRequestPart::SystemPrompt(SystemPromptPart::new(
                content,
            )));
    }

    /// Add a user prompt.
    pub fn add_user_prompt(&mut self, content: impl Into<String>) {
        self.parts
            .push(ModelRequestPart::UserPrompt(UserPromptPart::new(content)));
    }

    /// Get all system prompts.
    pub fn system_prompts(&self) -> impl Iterator<Item = &SystemPromptPart> {
        self.parts.iter().filter_map(|p| match p {
            ModelRequestPart::SystemPrompt(s) => Some(s),
            _ => None,
        })
    }

    /// Get all user prompts.
    pub fn user_prompts(&self) -> impl Iterator<Item = &UserPromptPart> {
        self.parts.iter().filter_map(|p| match p {
            ModelRequestPart::UserPrompt(u) => Some(u),
            _ => None,
        })
    }

    /// Get all tool returns.
    pub fn tool_returns(&self) -> impl Iterator<Item = &ToolReturnPart> {
        self.parts.iter().filter_map(|p| match p {
            ModelRequestPart::ToolReturn(t) => Some(t),
            _ => None,
        })
    }

    /// Check if the request is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Get the number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }
}

impl Default for ModelRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<ModelRequestPart> for ModelRequest {
    fn from_iter<T: IntoIterator<Item = ModelRequestPart>>(iter: T) -> Self {
        Self::with_parts(iter.into_iter().collect())
    }
}

/// Individual parts of a model request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "part_kind", rename_all = "kebab-case")]
pub enum ModelRequestPart {
    /// System prompt.
    SystemPrompt(SystemPromptPart),
    /// User prompt.
    UserPrompt(UserPromptPart),
    /// Tool return.
    ToolReturn(ToolReturnPart),
    /// Retry prompt.
    RetryPrompt(RetryPromptPart),
    /// A prior assistant response replayed into the history.
    ///
    /// Keeps user/assistant alternation intact when tool returns follow a
    /// tool-calling response.
    ModelResponse(Box<ModelResponse>),
}

impl ModelRequestPart {
    /// Get the part kind string.
    #[must_use]
    pub fn part_kind(&self) -> &'static str {
        match self {
            Self::SystemPrompt(_) => SystemPromptPart::PART_KIND,
            Self::UserPrompt(_) => UserPromptPart::PART_KIND,
            Self::ToolReturn(_) => ToolReturnPart::PART_KIND,
            Self::RetryPrompt(_) => RetryPromptPart::PART_KIND,
            Self::ModelResponse(_) => "model-response",
        }
    }
}

/// System prompt part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemPromptPart {
    /// The system prompt content.
    pub content: String,
    /// When this part was created.
    pub timestamp: DateTime<Utc>,
}

impl SystemPromptPart {
    /// Part kind identifier.
    pub const PART_KIND: &'static str = "system-prompt";

    /// Create a new system prompt part.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

impl From<&str> for SystemPromptPart {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// User prompt part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPromptPart {
    /// The user prompt content.
    pub content: String,
    /// When this part was created.
    pub timestamp: DateTime<Utc>,
}

impl UserPromptPart {
    /// Part kind identifier.
    pub const PART_KIND: &'static str = "user-prompt";

    /// Create a new user prompt part.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

impl From<&str> for UserPromptPart {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Tool return part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolReturnPart {
    /// Name of the tool.
    pub tool_name: String,
    /// The return content.
    pub content: ToolReturnContent,
    /// Tool call ID this is responding to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// When this part was created.
    pub timestamp: DateTime<Utc>,
}

impl ToolReturnPart {
    /// Part kind identifier.
    pub const PART_KIND: &'static str = "tool-return";

    /// Create a new tool return part.
    #[must_use]
    pub fn new(tool_name: impl Into<String>, content: impl Into<ToolReturnContent>) -> Self {
        Self {
            tool_name: tool_name.into(),
            content: content.into(),
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Set the tool call ID.
    #[must_use]
    pub fn with_tool_call_id(mut self, id: impl Into<String>) -> Self {
        self.tool_call_id = Some(id.into());
        self
    }

    /// Create a success return.
    #[must_use]
    pub fn success(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(tool_name, ToolReturnContent::text(content))
    }

    /// Create an error return.
    #[must_use]
    pub fn error(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(tool_name, ToolReturnContent::error(message))
    }
}

/// Retry prompt part.
///
/// Sent when a tool call failed and the model should decide how to
/// proceed, e.g. by fixing its arguments or answering without the tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPromptPart {
    /// The retry message.
    pub content: String,
    /// Tool name if this is a tool retry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// Tool call ID if this is a tool retry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// When this part was created.
    pub timestamp: DateTime<Utc>,
}

impl RetryPromptPart {
    /// Part kind identifier.
    pub const PART_KIND: &'static str = "retry-prompt";

    /// Create a new retry prompt part.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_name: None,
            tool_call_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Set the tool name.
    #[must_use]
    pub fn with_tool_name(mut self, name: impl Into<String>) -> Self {
        self.tool_name = Some(name.into());
        self
    }

    /// Set the tool call ID.
    #[must_use]
    pub fn with_tool_call_id(mut self, id: impl Into<String>) -> Self {
        self.tool_call_id = Some(id.into());
        self
    }

    /// Create a tool retry.
    #[must_use]
    pub fn tool_retry(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(message).with_tool_name(tool_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_request_new() {
        let mut req = ModelRequest::new();
        assert!(req.is_empty());

        req.add_system_prompt("You are a helpful assistant.");
        req.add_user_prompt("Hello!");

        assert_eq!(req.len(), 2);
        assert_eq!(req.system_prompts().count(), 1);
        assert_eq!(req.user_prompts().count(), 1);
    }

    #[test]
    fn test_tool_return_part() {
        let part = ToolReturnPart::success("google_search", "results")
            .with_tool_call_id("call_123");
        assert_eq!(part.tool_name, "google_search");
        assert_eq!(part.tool_call_id, Some("call_123".to_string()));
    }

    #[test]
    fn test_retry_prompt_part() {
        let part = RetryPromptPart::tool_retry("get_website_url_content", "fetch failed")
            .with_tool_call_id("id1");
        assert_eq!(
            part.tool_name,
            Some("get_website_url_content".to_string())
        );
        assert_eq!(part.content, "fetch failed");
    }

    #[test]
    fn test_serde_roundtrip() {
        let req = ModelRequest::with_parts(vec![
            ModelRequestPart::SystemPrompt(SystemPromptPart::new("System")),
            ModelRequestPart::UserPrompt(UserPromptPart::new("User")),
        ]);
        let json = serde_json::to_string(&req).unwrap();
        let parsed: ModelRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.len(), parsed.len());
    }

    #[test]
    fn test_part_kind_strings() {
        let part = ModelRequestPart::UserPrompt(UserPromptPart::new("hi"));
        assert_eq!(part.part_kind(), "user-prompt");
    }
}
