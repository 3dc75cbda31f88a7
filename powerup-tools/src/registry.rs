//! Registry for looking up tools by name.

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;

use crate::context::RunContext;
use crate::definition::ToolDefinition;
use crate::errors::ToolError;
use crate::tool::{Tool, ToolResult};

/// A collection of tools indexed by name.
///
/// The registry is what the agent dispatches model-issued tool calls
/// through; a name the model invents yields [`ToolError::NotFound`].
pub struct ToolRegistry<Deps> {
    tools: HashMap<String, Arc<dyn Tool<Deps>>>,
}

impl<Deps> ToolRegistry<Deps> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool under its definition name.
    ///
    /// # Panics
    ///
    /// Panics if a tool with the same name is already registered.
    /// Duplicate names are a programming error, not a runtime condition.
    pub fn register(&mut self, tool: Arc<dyn Tool<Deps>>) {
        let name = tool.name();
        assert!(
            !self.tools.contains_key(&name),
            "tool '{name}' is already registered"
        );
        self.tools.insert(name, tool);
    }

    /// Register a tool, builder style.
    #[must_use]
    pub fn with_tool(mut self, tool: Arc<dyn Tool<Deps>>) -> Self {
        self.register(tool);
        self
    }

    /// Get a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool<Deps>>> {
        self.tools.get(name)
    }

    /// Check whether a tool is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registered tool names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// Definitions of all registered tools.
    #[must_use]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Build a registry containing only the named subset of this one.
    ///
    /// Returns the first unknown name as an error.
    pub fn subset(&self, names: &[String]) -> Result<ToolRegistry<Deps>, ToolError> {
        let mut out = ToolRegistry::new();
        for name in names {
            let tool = self
                .tools
                .get(name)
                .ok_or_else(|| ToolError::not_found(name.clone()))?;
            out.register(Arc::clone(tool));
        }
        Ok(out)
    }

    /// Call a tool by name.
    pub async fn call(
        &self,
        name: &str,
        ctx: &RunContext<Deps>,
        args: JsonValue,
    ) -> ToolResult {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::not_found(name))?;
        tool.call(ctx, args).await
    }
}

impl<Deps> Default for ToolRegistry<Deps> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Deps> std::fmt::Debug for ToolRegistry<Deps> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaBuilder;
    use crate::tool::FunctionTool;
    use powerup_core::messages::ToolReturn;
    use serde_json::json;

    fn make_tool(name: &str) -> Arc<dyn Tool<()>> {
        let definition = ToolDefinition::new(name, "test tool").with_parameters(
            SchemaBuilder::new().string("q", "", true).build().unwrap(),
        );
        Arc::new(FunctionTool::new(definition, |_args| async move {
            Ok(ToolReturn::success("ok"))
        }))
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = ToolRegistry::new()
            .with_tool(make_tool("a"))
            .with_tool(make_tool("b"));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
        assert_eq!(registry.definitions().len(), 2);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_registration_panics() {
        let mut registry = ToolRegistry::new();
        registry.register(make_tool("a"));
        registry.register(make_tool("a"));
    }

    #[test]
    fn test_subset() {
        let registry = ToolRegistry::new()
            .with_tool(make_tool("a"))
            .with_tool(make_tool("b"));

        let subset = registry.subset(&["a".to_string()]).unwrap();
        assert_eq!(subset.len(), 1);
        assert!(subset.contains("a"));

        let err = registry.subset(&["missing".to_string()]).unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_call_unknown_tool() {
        let registry: ToolRegistry<()> = ToolRegistry::new();
        let ctx = RunContext::minimal(());

        let err = registry.call("nope", &ctx, json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_call_registered_tool() {
        let registry = ToolRegistry::new().with_tool(make_tool("a"));
        let ctx = RunContext::minimal(());

        let ret = registry.call("a", &ctx, json!({"q": "x"})).await.unwrap();
        assert_eq!(ret.content.as_text(), Some("ok"));
    }
}
