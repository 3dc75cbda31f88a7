//! Response part primitives: text and tool calls.

use serde::{Deserialize, Serialize};

/// Text content in a model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    /// The text content.
    pub content: String,
    /// Optional part ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TextPart {
    /// Create a new text part.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            id: None,
        }
    }

    /// Set the part ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Check if the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl From<String> for TextPart {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for TextPart {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Tool call arguments as returned by the model.
///
/// Providers return arguments either as an already-parsed JSON object or
/// as a raw JSON string; both forms are kept so the original can be echoed
/// back verbatim.
///
/// The representation is untagged and `Json` matches any document, so
/// deserialization always yields `Json` — a serialized `String` comes
/// back as `Json(Value::String(..))`. The `String` variant is an
/// in-memory form for raw provider arguments, not a wire distinction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolCallArgs {
    /// Parsed JSON arguments.
    Json(serde_json::Value),
    /// Raw JSON string arguments.
    String(String),
}

impl ToolCallArgs {
    /// Create from a JSON value.
    #[must_use]
    pub fn json(value: serde_json::Value) -> Self {
        Self::Json(value)
    }

    /// Create from a raw JSON string.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Get the arguments as a JSON value, parsing the string form if needed.
    ///
    /// An unparseable string yields `Value::Null`.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Json(v) => v.clone(),
            Self::String(s) => serde_json::from_str(s).unwrap_or(serde_json::Value::Null),
        }
    }

    /// Serialize the arguments to a JSON string.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Json(v) => serde_json::to_string(v),
            Self::String(s) => Ok(s.clone()),
        }
    }
}

impl Default for ToolCallArgs {
    fn default() -> Self {
        Self::Json(serde_json::Value::Object(serde_json::Map::new()))
    }
}

impl From<serde_json::Value> for ToolCallArgs {
    fn from(v: serde_json::Value) -> Self {
        Self::Json(v)
    }
}

impl From<String> for ToolCallArgs {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for ToolCallArgs {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPart {
    /// Name of the tool to call.
    pub tool_name: String,
    /// Arguments for the call.
    pub args: ToolCallArgs,
    /// Provider-assigned tool call ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ToolCallPart {
    /// Create a new tool call part.
    #[must_use]
    pub fn new(tool_name: impl Into<String>, args: impl Into<ToolCallArgs>) -> Self {
        Self {
            tool_name: tool_name.into(),
            args: args.into(),
            tool_call_id: None,
        }
    }

    /// Set the tool call ID.
    #[must_use]
    pub fn with_tool_call_id(mut self, id: impl Into<String>) -> Self {
        self.tool_call_id = Some(id.into());
        self
    }

    /// Parse the arguments into a typed value.
    pub fn parse_args<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        match &self.args {
            ToolCallArgs::Json(v) => serde_json::from_value(v.clone()),
            ToolCallArgs::String(s) => serde_json::from_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_part() {
        let part = TextPart::new("hello");
        assert_eq!(part.content, "hello");
        assert!(!part.is_empty());
    }

    #[test]
    fn test_tool_call_args_string_parses() {
        let args = ToolCallArgs::string(r#"{"query":"rust"}"#);
        assert_eq!(args.to_json(), json!({"query": "rust"}));
    }

    #[test]
    fn test_tool_call_args_invalid_string() {
        let args = ToolCallArgs::string("not json");
        assert_eq!(args.to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_tool_call_args_deserialize_always_json() {
        let serialized = serde_json::to_string(&ToolCallArgs::string(r#"{"q":"x"}"#)).unwrap();
        let parsed: ToolCallArgs = serde_json::from_str(&serialized).unwrap();

        // Untagged: any document matches Json first, including a string.
        assert_eq!(parsed, ToolCallArgs::Json(json!(r#"{"q":"x"}"#)));
    }

    #[test]
    fn test_tool_call_part_parse_args() {
        #[derive(serde::Deserialize)]
        struct Args {
            query: String,
        }

        let part = ToolCallPart::new("google_search", json!({"query": "rust"}))
            .with_tool_call_id("call_1");
        let args: Args = part.parse_args().unwrap();
        assert_eq!(args.query, "rust");
        assert_eq!(part.tool_call_id, Some("call_1".to_string()));
    }
}
