//! The `Tool` trait and function-backed tool adapters.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::future::Future;
use std::pin::Pin;

use powerup_core::messages::ToolReturn;

use crate::context::RunContext;
use crate::definition::ToolDefinition;
use crate::errors::ToolError;

/// Result of a tool call.
pub type ToolResult = Result<ToolReturn, ToolError>;

/// A tool callable by the model.
///
/// `Deps` is the shared dependency type carried by [`RunContext`];
/// implementations that need no dependencies can be generic over it.
#[async_trait]
pub trait Tool<Deps>: Send + Sync {
    /// The definition sent to the model.
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with the given JSON arguments.
    async fn call(&self, ctx: &RunContext<Deps>, args: JsonValue) -> ToolResult;

    /// The tool's name, from its definition.
    fn name(&self) -> String {
        self.definition().name
    }
}

type BoxedToolFn<Deps> = Box<
    dyn for<'a> Fn(
            &'a RunContext<Deps>,
            JsonValue,
        ) -> Pin<Box<dyn Future<Output = ToolResult> + Send + 'a>>
        + Send
        + Sync,
>;

/// A tool backed by an async closure.
///
/// Handy for tests and one-off tools that don't warrant a struct.
pub struct FunctionTool<Deps> {
    definition: ToolDefinition,
    func: BoxedToolFn<Deps>,
}

impl<Deps> FunctionTool<Deps> {
    /// Create a tool from a definition and an async closure.
    pub fn new<F, Fut>(definition: ToolDefinition, func: F) -> Self
    where
        F: Fn(JsonValue) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        Self {
            definition,
            func: Box::new(move |_ctx, args| Box::pin(func(args))),
        }
    }
}

#[async_trait]
impl<Deps: Send + Sync> Tool<Deps> for FunctionTool<Deps> {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn call(&self, ctx: &RunContext<Deps>, args: JsonValue) -> ToolResult {
        (self.func)(ctx, args).await
    }
}

impl<Deps> std::fmt::Debug for FunctionTool<Deps> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaBuilder;
    use serde_json::json;

    fn echo_tool() -> FunctionTool<()> {
        let definition = ToolDefinition::new("echo", "Echo the input back").with_parameters(
            SchemaBuilder::new()
                .string("text", "Text to echo", true)
                .build()
                .unwrap(),
        );
        FunctionTool::new(definition, |args| async move {
            let text = args["text"].as_str().unwrap_or_default().to_string();
            Ok(ToolReturn::success(text))
        })
    }

    #[tokio::test]
    async fn test_function_tool_call() {
        let tool = echo_tool();
        let ctx = RunContext::minimal(());

        let result = tool.call(&ctx, json!({"text": "hello"})).await.unwrap();
        assert_eq!(result.content.as_text(), Some("hello"));
    }

    #[test]
    fn test_function_tool_name() {
        let tool = echo_tool();
        assert_eq!(Tool::<()>::name(&tool), "echo");
    }
}
