//! Tool return types for tool execution results.

use serde::{Deserialize, Serialize};

/// Content of a tool return.
///
/// Uses a tagged representation to avoid ambiguous deserialization when
/// multiple variants share compatible shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolReturnContent {
    /// Plain text result.
    Text {
        /// The text content.
        content: String,
    },
    /// JSON result.
    Json {
        /// The JSON content.
        content: serde_json::Value,
    },
    /// Error message.
    Error {
        /// The error message.
        message: String,
    },
}

impl ToolReturnContent {
    /// Create text content.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text { content: s.into() }
    }

    /// Create JSON content.
    #[must_use]
    pub fn json(value: serde_json::Value) -> Self {
        Self::Json { content: value }
    }

    /// Create error content.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Check if this is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Get as text if this is text content.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content } => Some(content),
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Get as JSON if this is JSON content.
    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json { content } => Some(content),
            _ => None,
        }
    }

    /// Convert to the string form that is sent back to the model.
    #[must_use]
    pub fn to_string_content(&self) -> String {
        match self {
            Self::Text { content } => content.clone(),
            Self::Json { content } => serde_json::to_string(content).unwrap_or_default(),
            Self::Error { message } => format!("Error: {}", message),
        }
    }

    /// Convert to a JSON value for the executed-call transcript.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Self::Text { content } => serde_json::Value::String(content.clone()),
            Self::Json { content } => content.clone(),
            Self::Error { message } => serde_json::json!({ "error": message }),
        }
    }
}

impl Default for ToolReturnContent {
    fn default() -> Self {
        Self::Text {
            content: String::new(),
        }
    }
}

impl From<String> for ToolReturnContent {
    fn from(s: String) -> Self {
        Self::Text { content: s }
    }
}

impl From<&str> for ToolReturnContent {
    fn from(s: &str) -> Self {
        Self::Text {
            content: s.to_string(),
        }
    }
}

impl From<serde_json::Value> for ToolReturnContent {
    fn from(v: serde_json::Value) -> Self {
        Self::Json { content: v }
    }
}

/// Complete tool return with content and optional call ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolReturn {
    /// The return content.
    pub content: ToolReturnContent,
    /// Tool call ID this is responding to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ToolReturn {
    /// Create a new tool return.
    #[must_use]
    pub fn new(content: impl Into<ToolReturnContent>) -> Self {
        Self {
            content: content.into(),
            tool_call_id: None,
        }
    }

    /// Set the tool call ID.
    #[must_use]
    pub fn with_tool_call_id(mut self, id: impl Into<String>) -> Self {
        self.tool_call_id = Some(id.into());
        self
    }

    /// Create a successful text return.
    #[must_use]
    pub fn success(content: impl Into<String>) -> Self {
        Self::new(ToolReturnContent::text(content))
    }

    /// Create an error return.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToolReturnContent::error(message))
    }

    /// Create a JSON return.
    #[must_use]
    pub fn json(value: serde_json::Value) -> Self {
        Self::new(ToolReturnContent::json(value))
    }
}

impl Default for ToolReturn {
    fn default() -> Self {
        Self::new(ToolReturnContent::default())
    }
}
