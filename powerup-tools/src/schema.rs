//! JSON schema generation utilities.
//!
//! This module provides the `SchemaBuilder` API for manual JSON schema
//! construction.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::definition::ObjectJsonSchema;

/// Schema builder for manual schema construction.
///
/// Provides a fluent API for building JSON schemas for tool parameters.
///
/// # Example
///
/// ```rust
/// use powerup_tools::SchemaBuilder;
///
/// # fn main() -> Result<(), serde_json::Error> {
/// let schema = SchemaBuilder::new()
///     .string("url", "The URL to fetch", true)
///     .boolean("ignore_links", "Whether to drop hyperlinks", false)
///     .integer("max_length", "Maximum characters to return", false)
///     .no_additional_properties()
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    properties: IndexMap<String, JsonValue>,
    required: Vec<String>,
    description: Option<String>,
    additional_properties: Option<bool>,
}

impl SchemaBuilder {
    /// Create a new empty schema builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string property.
    #[must_use]
    pub fn string(mut self, name: &str, desc: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "string",
                "description": desc
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add an integer property.
    #[must_use]
    pub fn integer(mut self, name: &str, desc: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "integer",
                "description": desc
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add an integer property with constraints.
    #[must_use]
    pub fn integer_constrained(
        mut self,
        name: &str,
        desc: &str,
        required: bool,
        minimum: Option<i64>,
        maximum: Option<i64>,
    ) -> Self {
        let mut prop = serde_json::json!({
            "type": "integer",
            "description": desc
        });
        if let Some(min) = minimum {
            prop["minimum"] = JsonValue::from(min);
        }
        if let Some(max) = maximum {
            prop["maximum"] = JsonValue::from(max);
        }
        self.properties.insert(name.to_string(), prop);
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Add a boolean property.
    #[must_use]
    pub fn boolean(mut self, name: &str, desc: &str, required: bool) -> Self {
        self.properties.insert(
            name.to_string(),
            serde_json::json!({
                "type": "boolean",
                "description": desc
            }),
        );
        if required {
            self.required.push(name.to_string());
        }
        self
    }

    /// Set the schema description.
    #[must_use]
    pub fn description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Forbid properties not declared in the schema.
    #[must_use]
    pub fn no_additional_properties(mut self) -> Self {
        self.additional_properties = Some(false);
        self
    }

    /// Build the schema as a JSON value.
    pub fn build(self) -> Result<JsonValue, serde_json::Error> {
        self.build_object().to_json()
    }

    /// Build the schema as an [`ObjectJsonSchema`].
    #[must_use]
    pub fn build_object(self) -> ObjectJsonSchema {
        let mut schema = ObjectJsonSchema::new();
        schema.properties = self.properties;
        schema.required = self.required;
        schema.description = self.description;
        schema.additional_properties = self.additional_properties;
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("string")]
    #[case("integer")]
    #[case("boolean")]
    fn test_property_type_emitted(#[case] prop_type: &str) {
        let builder = SchemaBuilder::new();
        let builder = match prop_type {
            "string" => builder.string("p", "desc", true),
            "integer" => builder.integer("p", "desc", true),
            "boolean" => builder.boolean("p", "desc", true),
            _ => unreachable!(),
        };

        let schema = builder.build().unwrap();
        assert_eq!(schema["properties"]["p"]["type"], prop_type);
        assert_eq!(schema["required"], json!(["p"]));
    }

    #[test]
    fn test_schema_builder_basic() {
        let schema = SchemaBuilder::new()
            .string("query", "The search query", true)
            .build()
            .unwrap();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["query"]["type"], "string");
        assert_eq!(schema["required"], json!(["query"]));
    }

    #[test]
    fn test_schema_builder_mixed_types() {
        let schema = SchemaBuilder::new()
            .string("url", "The URL to fetch", true)
            .boolean("ignore_links", "Drop hyperlinks", false)
            .integer("max_length", "Maximum characters", false)
            .no_additional_properties()
            .build()
            .unwrap();

        assert_eq!(schema["properties"]["ignore_links"]["type"], "boolean");
        assert_eq!(schema["properties"]["max_length"]["type"], "integer");
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["required"], json!(["url"]));
    }

    #[test]
    fn test_schema_builder_preserves_order() {
        let obj = SchemaBuilder::new()
            .string("a", "", false)
            .string("b", "", false)
            .string("c", "", false)
            .build_object();

        let keys: Vec<_> = obj.properties.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_integer_constrained() {
        let schema = SchemaBuilder::new()
            .integer_constrained("num", "Result count", false, Some(1), Some(10))
            .build()
            .unwrap();

        assert_eq!(schema["properties"]["num"]["minimum"], 1);
        assert_eq!(schema["properties"]["num"]["maximum"], 10);
    }
}
