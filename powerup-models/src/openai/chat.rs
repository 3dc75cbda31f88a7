//! OpenAI chat-completions model implementation.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::time::Duration;

use powerup_core::messages::{
    FinishReason, ModelRequest, ModelRequestPart, ModelResponse, ModelResponsePart,
    RetryPromptPart, SystemPromptPart, TextPart, ToolCallArgs, ToolCallPart, ToolReturnPart,
    UserPromptPart,
};
use powerup_core::usage::RequestUsage;
use powerup_core::ModelSettings;
use powerup_tools::ToolDefinition;

use crate::error::ModelError;
use crate::model::{Model, ModelRequestParameters, ToolChoice};
use crate::openai::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, FunctionCall, OpenAIError,
    ToolCall, ToolChoiceValue,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// OpenAI chat-completions model client.
///
/// # Example
///
/// ```rust,no_run
/// use powerup_models::OpenAIChatModel;
///
/// let model = OpenAIChatModel::new("gpt-4o", "sk-...");
/// ```
#[derive(Debug, Clone)]
pub struct OpenAIChatModel {
    model_name: String,
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    default_timeout: Duration,
}

impl OpenAIChatModel {
    /// Create a new model client.
    pub fn new(model_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom base URL (proxies, compatible providers, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the default request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Convert our messages to OpenAI format.
    fn convert_messages(&self, requests: &[ModelRequest]) -> Vec<ChatMessage> {
        requests
            .iter()
            .flat_map(|req| self.convert_request(req))
            .collect()
    }

    /// Convert a single request to OpenAI messages.
    fn convert_request(&self, req: &ModelRequest) -> Vec<ChatMessage> {
        let mut messages = Vec::new();

        for part in &req.parts {
            match part {
                ModelRequestPart::SystemPrompt(sys) => {
                    messages.push(self.convert_system_prompt(sys));
                }
                ModelRequestPart::UserPrompt(user) => {
                    messages.push(self.convert_user_prompt(user));
                }
                ModelRequestPart::ToolReturn(tool_ret) => {
                    messages.push(self.convert_tool_return(tool_ret));
                }
                ModelRequestPart::RetryPrompt(retry) => {
                    messages.push(self.convert_retry_prompt(retry));
                }
                ModelRequestPart::ModelResponse(response) => {
                    messages.push(self.convert_response_to_message(response));
                }
            }
        }

        messages
    }

    fn convert_system_prompt(&self, sys: &SystemPromptPart) -> ChatMessage {
        ChatMessage::system(sys.content.clone())
    }

    fn convert_user_prompt(&self, user: &UserPromptPart) -> ChatMessage {
        ChatMessage::user(user.content.clone())
    }

    fn convert_tool_return(&self, tool_ret: &ToolReturnPart) -> ChatMessage {
        ChatMessage::tool(
            tool_ret.tool_call_id.clone().unwrap_or_default(),
            tool_ret.content.to_string_content(),
        )
    }

    fn convert_retry_prompt(&self, retry: &RetryPromptPart) -> ChatMessage {
        // A failed tool call still needs a tool-role reply for its call ID,
        // otherwise the API rejects the history as incomplete.
        match &retry.tool_call_id {
            Some(id) => ChatMessage::tool(id.clone(), format!("Error: {}", retry.content)),
            None => ChatMessage::user(retry.content.clone()),
        }
    }

    /// Convert a ModelResponse to an assistant ChatMessage.
    fn convert_response_to_message(&self, resp: &ModelResponse) -> ChatMessage {
        let mut content_parts = Vec::new();
        let mut tool_calls = Vec::new();

        for part in &resp.parts {
            match part {
                ModelResponsePart::Text(text) => {
                    content_parts.push(text.content.clone());
                }
                ModelResponsePart::ToolCall(tc) => {
                    tool_calls.push(ToolCall {
                        id: tc.tool_call_id.clone().unwrap_or_default(),
                        tool_type: "function".to_string(),
                        function: FunctionCall {
                            name: tc.tool_name.clone(),
                            arguments: tc.args.to_json_string().unwrap_or_default(),
                        },
                    });
                }
            }
        }

        // Always provide content as a string (empty if no text parts);
        // some compatible providers break on null content with tool_calls.
        ChatMessage {
            role: "assistant".to_string(),
            content: Some(content_parts.join("")),
            tool_calls: if tool_calls.is_empty() {
                None
            } else {
                Some(tool_calls)
            },
            tool_call_id: None,
        }
    }

    /// Convert tool definitions to OpenAI format.
    fn convert_tools(&self, tools: &[ToolDefinition]) -> Vec<serde_json::Value> {
        tools.iter().map(ToolDefinition::to_openai_function).collect()
    }

    fn convert_tool_choice(&self, choice: &ToolChoice) -> ToolChoiceValue {
        match choice {
            ToolChoice::Auto => ToolChoiceValue::auto(),
            ToolChoice::Required => ToolChoiceValue::required(),
            ToolChoice::None => ToolChoiceValue::none(),
            ToolChoice::Specific(name) => ToolChoiceValue::function(name),
        }
    }

    /// Build the request body.
    fn build_request(
        &self,
        messages: &[ModelRequest],
        settings: &ModelSettings,
        params: &ModelRequestParameters,
    ) -> ChatCompletionRequest {
        let messages = self.convert_messages(messages);

        let tools = if params.tools.is_empty() {
            None
        } else {
            Some(self.convert_tools(&params.tools))
        };

        let tool_choice = params
            .tool_choice
            .as_ref()
            .map(|c| self.convert_tool_choice(c));

        ChatCompletionRequest {
            model: self.model_name.clone(),
            messages,
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_tokens: settings.max_tokens,
            stop: settings.stop.clone(),
            presence_penalty: settings.presence_penalty,
            frequency_penalty: settings.frequency_penalty,
            seed: settings.seed,
            tools,
            tool_choice,
            parallel_tool_calls: settings.parallel_tool_calls,
        }
    }

    /// Parse OpenAI response to our format.
    fn parse_response(&self, resp: ChatCompletionResponse) -> Result<ModelResponse, ModelError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::InvalidResponse("No choices in response".to_string()))?;

        let mut parts = Vec::new();

        if let Some(content) = choice.message.content {
            if !content.is_empty() {
                parts.push(ModelResponsePart::Text(TextPart::new(content)));
            }
        }

        if let Some(tool_calls) = choice.message.tool_calls {
            for tc in tool_calls {
                let args: serde_json::Value =
                    serde_json::from_str(&tc.function.arguments).unwrap_or(serde_json::json!({}));

                parts.push(ModelResponsePart::ToolCall(
                    ToolCallPart::new(tc.function.name, ToolCallArgs::Json(args))
                        .with_tool_call_id(tc.id),
                ));
            }
        }

        let finish_reason = choice
            .finish_reason
            .as_deref()
            .map(FinishReason::from_provider);

        let usage = resp.usage.map(|u| RequestUsage {
            request_tokens: Some(u.prompt_tokens),
            response_tokens: Some(u.completion_tokens),
            total_tokens: Some(u.total_tokens),
        });

        let mut response = ModelResponse::with_parts(parts)
            .with_model_name(resp.model)
            .with_vendor_id(resp.id);
        response.finish_reason = finish_reason;
        response.usage = usage;
        Ok(response)
    }

    fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
        headers
            .get("retry-after")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
    }

    /// Handle API error response.
    fn handle_error_response(&self, status: u16, body: &str, headers: &HeaderMap) -> ModelError {
        if let Ok(err) = serde_json::from_str::<OpenAIError>(body) {
            if status == 401 {
                return ModelError::Authentication(err.error.message);
            }
            if status == 429 {
                return ModelError::RateLimited {
                    retry_after: Self::parse_retry_after(headers),
                };
            }
            return ModelError::Api {
                message: err.error.message,
                code: err.error.code,
            };
        }

        if status == 429 {
            return ModelError::RateLimited {
                retry_after: Self::parse_retry_after(headers),
            };
        }

        ModelError::Http {
            status,
            body: body.to_string(),
        }
    }
}

#[async_trait]
impl Model for OpenAIChatModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn system(&self) -> &str {
        "openai"
    }

    async fn request(
        &self,
        messages: &[ModelRequest],
        settings: &ModelSettings,
        params: &ModelRequestParameters,
    ) -> Result<ModelResponse, ModelError> {
        let body = self.build_request(messages, settings, params);
        let timeout = settings.timeout.unwrap_or(self.default_timeout);

        tracing::debug!(
            model = %self.model_name,
            messages = body.messages.len(),
            tools = params.tools.len(),
            "sending chat completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            return Err(self.handle_error_response(status, &body, &headers));
        }

        let resp: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        self.parse_response(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn model_for(server: &MockServer) -> OpenAIChatModel {
        OpenAIChatModel::new("gpt-4o", "test-key").with_base_url(server.uri())
    }

    fn user_message(text: &str) -> Vec<ModelRequest> {
        let mut req = ModelRequest::new();
        req.add_user_prompt(text);
        vec![req]
    }

    fn params_with_tool() -> ModelRequestParameters {
        ModelRequestParameters {
            tools: Arc::new(vec![
                ToolDefinition::new("google_search", "Search the web")
            ]),
            tool_choice: None,
            allow_text_output: true,
        }
    }

    #[tokio::test]
    async fn test_text_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "model": "gpt-4o",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Hello!"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            })))
            .mount(&server)
            .await;

        let model = model_for(&server);
        let resp = model
            .request(
                &user_message("hi"),
                &ModelSettings::new(),
                &ModelRequestParameters::new(),
            )
            .await
            .unwrap();

        assert_eq!(resp.text_content(), "Hello!");
        assert_eq!(resp.finish_reason, Some(FinishReason::Stop));
        assert_eq!(resp.usage.as_ref().unwrap().total(), 15);
    }

    #[tokio::test]
    async fn test_tool_call_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "tools": [{"type": "function", "function": {
                    "name": "google_search",
                    "description": "Search the web",
                    "parameters": {"type": "object"}
                }}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-2",
                "model": "gpt-4o",
                "choices": [{
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_abc",
                            "type": "function",
                            "function": {"name": "google_search", "arguments": "{\"query\":\"rust\"}"}
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            })))
            .mount(&server)
            .await;

        let model = model_for(&server);
        let resp = model
            .request(
                &user_message("search rust"),
                &ModelSettings::new(),
                &params_with_tool(),
            )
            .await
            .unwrap();

        assert!(resp.has_tool_calls());
        let tc = resp.tool_call_parts().next().unwrap();
        assert_eq!(tc.tool_name, "google_search");
        assert_eq!(tc.args.to_json(), json!({"query": "rust"}));
        assert_eq!(tc.tool_call_id.as_deref(), Some("call_abc"));
        assert_eq!(resp.finish_reason, Some(FinishReason::ToolCalls));
    }

    #[tokio::test]
    async fn test_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API key", "type": "invalid_request_error", "code": "invalid_api_key"}
            })))
            .mount(&server)
            .await;

        let model = model_for(&server);
        let err = model
            .request(
                &user_message("hi"),
                &ModelSettings::new(),
                &ModelRequestParameters::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ModelError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_rate_limit_with_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "7")
                    .set_body_json(json!({
                        "error": {"message": "Rate limit", "type": "rate_limit_error", "code": null}
                    })),
            )
            .mount(&server)
            .await;

        let model = model_for(&server);
        let err = model
            .request(
                &user_message("hi"),
                &ModelSettings::new(),
                &ModelRequestParameters::new(),
            )
            .await
            .unwrap_err();

        match err {
            ModelError::RateLimited { retry_after } => assert_eq!(retry_after, Some(7)),
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_history_alternation() {
        let model = OpenAIChatModel::new("gpt-4o", "k");

        let mut first = ModelRequest::new();
        first.add_system_prompt("be brief");
        first.add_user_prompt("look this up");

        let assistant = ModelResponse::with_parts(vec![ModelResponsePart::ToolCall(
            ToolCallPart::new("google_search", json!({"query": "x"}))
                .with_tool_call_id("call_1"),
        )]);

        let mut followup = ModelRequest::new();
        followup.add_part(ModelRequestPart::ModelResponse(Box::new(assistant)));
        followup.add_part(ModelRequestPart::ToolReturn(
            ToolReturnPart::success("google_search", "results").with_tool_call_id("call_1"),
        ));

        let messages = model.convert_messages(&[first, followup]);
        let roles: Vec<_> = messages.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "tool"]);
        assert_eq!(messages[3].tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn test_retry_prompt_becomes_tool_message() {
        let model = OpenAIChatModel::new("gpt-4o", "k");

        let mut req = ModelRequest::new();
        req.add_part(ModelRequestPart::RetryPrompt(
            RetryPromptPart::tool_retry("google_search", "search failed")
                .with_tool_call_id("call_9"),
        ));

        let messages = model.convert_messages(&[req]);
        assert_eq!(messages[0].role, "tool");
        assert_eq!(messages[0].tool_call_id.as_deref(), Some("call_9"));
        assert!(messages[0].content.as_deref().unwrap().contains("search failed"));
    }
}
