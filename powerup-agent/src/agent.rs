//! The `Agent` type: a model plus tools plus run configuration.

use std::sync::Arc;

use powerup_core::{ModelSettings, UsageLimits};
use powerup_models::Model;
use powerup_tools::{Tool, ToolRegistry};

use crate::errors::AgentRunError;
use crate::run::{AgentRun, RunResult};

/// An agent that answers user messages, calling tools as needed.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use powerup_agent::Agent;
/// use powerup_models::OpenAIChatModel;
/// use powerup_tools::common::WebPageTool;
///
/// # async fn demo() -> anyhow::Result<()> {
/// let model = OpenAIChatModel::new("gpt-4o", "sk-...");
/// let agent = Agent::new(Arc::new(model))
///     .with_system_prompt("You are a helpful assistant.")
///     .with_tool(Arc::new(WebPageTool::with_defaults()?));
///
/// let result = agent.run("What does example.com say?").await?;
/// println!("{}", result.response);
/// # Ok(())
/// # }
/// ```
pub struct Agent<Deps = ()> {
    pub(crate) model: Arc<dyn Model>,
    pub(crate) registry: ToolRegistry<Deps>,
    pub(crate) system_prompt: Option<String>,
    pub(crate) settings: ModelSettings,
    pub(crate) limits: UsageLimits,
    pub(crate) deps: Arc<Deps>,
}

impl Agent<()> {
    /// Create an agent with no shared dependencies.
    #[must_use]
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self::with_deps(model, ())
    }
}

impl<Deps: Send + Sync + 'static> Agent<Deps> {
    /// Create an agent with shared tool dependencies.
    #[must_use]
    pub fn with_deps(model: Arc<dyn Model>, deps: Deps) -> Self {
        Self {
            model,
            registry: ToolRegistry::new(),
            system_prompt: None,
            settings: ModelSettings::new(),
            limits: UsageLimits::new(),
            deps: Arc::new(deps),
        }
    }

    /// Register a tool.
    #[must_use]
    pub fn with_tool(mut self, tool: Arc<dyn Tool<Deps>>) -> Self {
        self.registry.register(tool);
        self
    }

    /// Replace the whole tool registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ToolRegistry<Deps>) -> Self {
        self.registry = registry;
        self
    }

    /// Set the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the model settings.
    #[must_use]
    pub fn with_settings(mut self, settings: ModelSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the usage limits.
    #[must_use]
    pub fn with_limits(mut self, limits: UsageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The registered tool registry.
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry<Deps> {
        &self.registry
    }

    /// Run the agent on a user message until it produces a final answer.
    pub async fn run(&self, message: impl Into<String>) -> Result<RunResult, AgentRunError> {
        AgentRun::new(self, message.into()).run().await
    }
}

impl<Deps> std::fmt::Debug for Agent<Deps> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("model", &self.model.identifier())
            .field("registry", &self.registry)
            .field("system_prompt", &self.system_prompt)
            .finish_non_exhaustive()
    }
}
