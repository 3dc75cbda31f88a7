//! Tool definition types for describing tools to LLMs.
//!
//! This module provides types for defining tools with JSON Schema
//! parameters that can be serialized and sent to language models.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// JSON Schema for an object type (tool parameters).
///
/// This represents the parameters that a tool accepts, using the JSON
/// Schema format understood by language models for function calling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectJsonSchema {
    /// The schema type (always "object" for tool parameters).
    #[serde(rename = "type")]
    pub schema_type: String,

    /// Property definitions.
    pub properties: IndexMap<String, JsonValue>,

    /// List of required property names.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub required: Vec<String>,

    /// Description of the schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether additional properties are allowed.
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,
}

impl ObjectJsonSchema {
    /// Create a new empty object schema.
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: IndexMap::new(),
            required: Vec::new(),
            description: None,
            additional_properties: None,
        }
    }

    /// Add a property to the schema.
    #[must_use]
    pub fn with_property(mut self, name: &str, schema: JsonValue, required: bool) -> Self {
        self.properties.insert(name.to_string(), schema);
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Set whether additional properties are allowed.
    #[must_use]
    pub fn with_additional_properties(mut self, allowed: bool) -> Self {
        self.additional_properties = Some(allowed);
        self
    }

    /// Check if a property is required.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Get a property schema.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&JsonValue> {
        self.properties.get(name)
    }

    /// Check if the schema has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Convert to a JSON value.
    pub fn to_json(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Default for ObjectJsonSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<JsonValue> for ObjectJsonSchema {
    type Error = serde_json::Error;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

impl From<ObjectJsonSchema> for JsonValue {
    fn from(schema: ObjectJsonSchema) -> Self {
        serde_json::to_value(schema).unwrap_or(JsonValue::Null)
    }
}

/// Complete tool definition sent to the model.
///
/// This contains all the information a language model needs to understand
/// and call a tool: its name, description, and parameter schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    /// Tool name (must be a valid identifier).
    pub name: String,

    /// Human-readable description of what the tool does.
    pub description: String,

    /// JSON Schema for the tool's parameters.
    pub parameters_json_schema: JsonValue,

    /// Whether to use strict mode for schema validation (OpenAI feature).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

impl ToolDefinition {
    /// Create a new tool definition with an empty parameter schema.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters_json_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            strict: None,
        }
    }

    /// Set the parameters schema.
    #[must_use]
    pub fn with_parameters(mut self, schema: impl Into<JsonValue>) -> Self {
        self.parameters_json_schema = schema.into();
        self
    }

    /// Set strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }

    /// Get the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the tool description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Convert to the OpenAI function-calling wire format.
    #[must_use]
    pub fn to_openai_function(&self) -> JsonValue {
        let mut function = serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters_json_schema,
        });
        if let Some(strict) = self.strict {
            function["strict"] = JsonValue::Bool(strict);
        }
        serde_json::json!({
            "type": "function",
            "function": function,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_schema_building() {
        let schema = ObjectJsonSchema::new()
            .with_property("query", json!({"type": "string"}), true)
            .with_additional_properties(false);

        assert!(schema.is_required("query"));
        assert!(!schema.is_required("missing"));
        assert_eq!(schema.additional_properties, Some(false));
    }

    #[test]
    fn test_object_schema_serialization() {
        let schema = ObjectJsonSchema::new()
            .with_property("url", json!({"type": "string"}), true)
            .with_additional_properties(false);

        let value = schema.to_json().unwrap();
        assert_eq!(value["type"], "object");
        assert_eq!(value["additionalProperties"], false);
        assert_eq!(value["required"], json!(["url"]));
    }

    #[test]
    fn test_tool_definition_to_openai_function() {
        let def = ToolDefinition::new("google_search", "Search the web")
            .with_parameters(json!({
                "type": "object",
                "properties": {"query": {"type": "string"}},
                "required": ["query"]
            }));

        let wire = def.to_openai_function();
        assert_eq!(wire["type"], "function");
        assert_eq!(wire["function"]["name"], "google_search");
        assert_eq!(
            wire["function"]["parameters"]["required"],
            json!(["query"])
        );
    }

    #[test]
    fn test_tool_definition_strict() {
        let def = ToolDefinition::new("t", "d").with_strict(true);
        let wire = def.to_openai_function();
        assert_eq!(wire["function"]["strict"], true);
    }
}
