//! Web search via the Google Custom Search JSON API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

use powerup_core::messages::ToolReturn;

use crate::context::RunContext;
use crate::definition::ToolDefinition;
use crate::errors::ToolError;
use crate::schema::SchemaBuilder;
use crate::tool::{Tool, ToolResult};

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
const DEFAULT_RESULT_COUNT: u8 = 5;

/// Configuration for [`GoogleSearchTool`].
#[derive(Debug, Clone)]
pub struct GoogleSearchConfig {
    /// Google API key.
    pub api_key: String,
    /// Custom Search Engine ID.
    pub cx_id: String,
    /// Number of results to request per search.
    pub result_count: u8,
    /// Request timeout.
    pub timeout: Duration,
    /// Override the API endpoint, for tests.
    pub endpoint: Option<String>,
}

impl GoogleSearchConfig {
    /// Create a config with the given credentials.
    #[must_use]
    pub fn new(api_key: impl Into<String>, cx_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cx_id: cx_id.into(),
            result_count: DEFAULT_RESULT_COUNT,
            timeout: Duration::from_secs(10),
            endpoint: None,
        }
    }

    /// Set the result count.
    #[must_use]
    pub fn with_result_count(mut self, count: u8) -> Self {
        self.result_count = count;
        self
    }

    /// Set the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

/// Searches the web with Google Programmable Search.
///
/// Exposed to the model as `google_search` with a single required
/// `query` parameter.
#[derive(Debug)]
pub struct GoogleSearchTool {
    config: GoogleSearchConfig,
    client: reqwest::Client,
}

impl GoogleSearchTool {
    /// Create a new search tool.
    ///
    /// Returns a configuration error if either credential is empty, so a
    /// misconfigured deployment fails at startup rather than mid-run.
    pub fn new(config: GoogleSearchConfig) -> Result<Self, ToolError> {
        if config.api_key.is_empty() || config.cx_id.is_empty() {
            return Err(ToolError::configuration(
                "Google API key and Search Engine ID must be provided",
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ToolError::configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    async fn search(&self, query: &str) -> Result<JsonValue, ToolError> {
        let endpoint = self.config.endpoint.as_deref().unwrap_or(SEARCH_ENDPOINT);
        let num = self.config.result_count.to_string();

        tracing::debug!(query, num = %num, "executing web search");

        let response = self
            .client
            .get(endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.cx_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ToolError::timeout(format!("search request timed out: {e}"))
                } else {
                    ToolError::retryable(format!("search request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::execution_failed(format!(
                "search API returned {status}: {body}"
            )));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ToolError::execution_failed(format!("invalid search response: {e}")))?;

        if parsed.items.is_empty() {
            // Matches the API behavior the model already knows how to read.
            return Ok(serde_json::json!({ "error": "No results found" }));
        }

        let items: Vec<JsonValue> = parsed
            .items
            .into_iter()
            .map(|item| {
                serde_json::json!({
                    "title": item.title,
                    "link": item.link,
                    "snippet": item.snippet,
                })
            })
            .collect();
        Ok(JsonValue::Array(items))
    }
}

#[async_trait]
impl<Deps: Send + Sync> Tool<Deps> for GoogleSearchTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "google_search",
            "Search Google for information on a given query",
        )
        .with_parameters(
            SchemaBuilder::new()
                .string("query", "The search query to look up information", true)
                .no_additional_properties()
                .build()
                .unwrap_or(JsonValue::Null),
        )
    }

    async fn call(&self, _ctx: &RunContext<Deps>, args: JsonValue) -> ToolResult {
        let args: SearchArgs = serde_json::from_value(args)
            .map_err(|e| ToolError::invalid_args(format!("query is required: {e}")))?;

        let results = self.search(&args.query).await?;
        Ok(ToolReturn::json(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool_for(server: &MockServer) -> GoogleSearchTool {
        let config = GoogleSearchConfig::new("test-key", "test-cx")
            .with_endpoint(format!("{}/customsearch/v1", server.uri()));
        GoogleSearchTool::new(config).unwrap()
    }

    #[test]
    fn test_missing_credentials() {
        let err = GoogleSearchTool::new(GoogleSearchConfig::new("", "cx")).unwrap_err();
        assert!(matches!(err, ToolError::Configuration { .. }));
    }

    #[test]
    fn test_definition() {
        let config = GoogleSearchConfig::new("k", "c");
        let tool = GoogleSearchTool::new(config).unwrap();
        let def = Tool::<()>::definition(&tool);

        assert_eq!(def.name, "google_search");
        assert_eq!(
            def.parameters_json_schema["required"],
            json!(["query"])
        );
        assert_eq!(
            def.parameters_json_schema["additionalProperties"],
            json!(false)
        );
    }

    #[tokio::test]
    async fn test_search_returns_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("q", "rust language"))
            .and(query_param("num", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"title": "Rust", "link": "https://rust-lang.org", "snippet": "A language"}
                ]
            })))
            .mount(&server)
            .await;

        let tool = tool_for(&server);
        let ctx = RunContext::minimal(());
        let ret = tool
            .call(&ctx, json!({"query": "rust language"}))
            .await
            .unwrap();

        let results = ret.content.as_json().unwrap();
        assert_eq!(results[0]["title"], "Rust");
        assert_eq!(results[0]["link"], "https://rust-lang.org");
    }

    #[tokio::test]
    async fn test_search_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let tool = tool_for(&server);
        let ctx = RunContext::minimal(());
        let ret = tool.call(&ctx, json!({"query": "nothing"})).await.unwrap();

        assert_eq!(
            ret.content.as_json().unwrap()["error"],
            "No results found"
        );
    }

    #[tokio::test]
    async fn test_search_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(403).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let tool = tool_for(&server);
        let ctx = RunContext::minimal(());
        let err = tool.call(&ctx, json!({"query": "x"})).await.unwrap_err();

        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_invalid_args() {
        let server = MockServer::start().await;
        let tool = tool_for(&server);
        let ctx = RunContext::minimal(());

        let err = tool.call(&ctx, json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }
}
