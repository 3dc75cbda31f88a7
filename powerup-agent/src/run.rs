//! The orchestration loop.
//!
//! One [`AgentRun`] drives a single user message to completion: request
//! the model, execute requested tool calls through the registry, append
//! the results to the history, and stop when the model answers without
//! asking for tools.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use powerup_core::messages::{
    ModelRequest, ModelRequestPart, ModelResponse, RetryPromptPart, ToolCallPart, ToolReturnPart,
};
use powerup_core::{generate_run_id, RunUsage};
use powerup_models::ModelRequestParameters;
use powerup_tools::RunContext;

use crate::agent::Agent;
use crate::errors::AgentRunError;

/// One executed tool call, for the run transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutedToolCall {
    /// Tool name.
    pub name: String,
    /// Arguments the model supplied.
    pub arguments: JsonValue,
    /// What the tool returned (an `{"error": ...}` object on failure).
    pub result: JsonValue,
}

/// Result of a completed agent run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// The model's final text answer.
    pub response: String,
    /// Every tool call executed during the run, in order.
    pub tool_calls_executed: Vec<ExecutedToolCall>,
    /// The full message history.
    pub messages: Vec<ModelRequest>,
    /// Accumulated token usage.
    pub usage: RunUsage,
    /// The run ID.
    pub run_id: String,
}

pub(crate) struct AgentRun<'a, Deps> {
    agent: &'a Agent<Deps>,
    run_id: String,
    messages: Vec<ModelRequest>,
    usage: RunUsage,
    executed: Vec<ExecutedToolCall>,
}

impl<'a, Deps: Send + Sync + 'static> AgentRun<'a, Deps> {
    pub(crate) fn new(agent: &'a Agent<Deps>, message: String) -> Self {
        let mut first = ModelRequest::new();
        if let Some(prompt) = &agent.system_prompt {
            first.add_system_prompt(prompt.clone());
        }
        first.add_user_prompt(message);

        Self {
            agent,
            run_id: generate_run_id(),
            messages: vec![first],
            usage: RunUsage::new(),
            executed: Vec::new(),
        }
    }

    pub(crate) async fn run(mut self) -> Result<RunResult, AgentRunError> {
        let params = ModelRequestParameters::new()
            .with_tools(self.agent.registry.definitions());

        let ctx = RunContext::new(self.agent.deps.clone(), self.run_id.clone())
            .with_model_name(self.agent.model.name());

        tracing::info!(
            run_id = %self.run_id,
            model = %self.agent.model.identifier(),
            tools = params.tools.len(),
            "starting agent run"
        );

        loop {
            let response = self
                .agent
                .model
                .request(&self.messages, &self.agent.settings, &params)
                .await?;

            self.usage
                .add_request(response.usage.clone().unwrap_or_default());
            self.agent.limits.check(&self.usage)?;

            let tool_calls: Vec<ToolCallPart> =
                response.tool_call_parts().cloned().collect();

            if tool_calls.is_empty() {
                let output = response.text_content();
                tracing::info!(
                    run_id = %self.run_id,
                    requests = self.usage.request_count(),
                    tool_calls = self.executed.len(),
                    "agent run finished"
                );
                return Ok(RunResult {
                    response: output,
                    tool_calls_executed: self.executed,
                    messages: self.messages,
                    usage: self.usage,
                    run_id: self.run_id,
                });
            }

            let followup = self.execute_tool_calls(&ctx, &response, tool_calls).await?;

            // Replay the assistant response first so the tool returns that
            // follow it keep the provider's role alternation valid.
            let mut replay = ModelRequest::new();
            replay.add_part(ModelRequestPart::ModelResponse(Box::new(response)));
            self.messages.push(replay);
            self.messages.push(followup);
        }
    }

    async fn execute_tool_calls(
        &mut self,
        ctx: &RunContext<Deps>,
        response: &ModelResponse,
        tool_calls: Vec<ToolCallPart>,
    ) -> Result<ModelRequest, AgentRunError> {
        debug_assert!(response.has_tool_calls());

        let mut followup = ModelRequest::new();

        for call in tool_calls {
            let args = call.args.to_json();
            let tool_ctx = ctx.for_tool(call.tool_name.clone(), call.tool_call_id.clone());

            tracing::debug!(
                run_id = %self.run_id,
                tool = %call.tool_name,
                "executing tool call"
            );

            let result = self
                .agent
                .registry
                .call(&call.tool_name, &tool_ctx, args.clone())
                .await;

            self.usage.add_tool_call();
            self.agent.limits.check(&self.usage)?;

            match result {
                Ok(ret) => {
                    self.executed.push(ExecutedToolCall {
                        name: call.tool_name.clone(),
                        arguments: args,
                        result: ret.content.to_json_value(),
                    });

                    let mut part = ToolReturnPart::new(&call.tool_name, ret.content);
                    if let Some(id) = &call.tool_call_id {
                        part = part.with_tool_call_id(id.clone());
                    }
                    followup.add_part(ModelRequestPart::ToolReturn(part));
                }
                Err(e) => {
                    tracing::warn!(
                        run_id = %self.run_id,
                        tool = %call.tool_name,
                        error = %e,
                        "tool call failed, feeding error back to model"
                    );

                    self.executed.push(ExecutedToolCall {
                        name: call.tool_name.clone(),
                        arguments: args,
                        result: serde_json::json!({ "error": e.to_string() }),
                    });

                    let mut part =
                        RetryPromptPart::tool_retry(&call.tool_name, e.to_string());
                    if let Some(id) = &call.tool_call_id {
                        part = part.with_tool_call_id(id.clone());
                    }
                    followup.add_part(ModelRequestPart::RetryPrompt(part));
                }
            }
        }

        Ok(followup)
    }
}
