//! Webpage fetching with HTML-to-text conversion.

use async_trait::async_trait;
use html2text::render::text_renderer::TrivialDecorator;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

use powerup_core::messages::ToolReturn;

use crate::context::RunContext;
use crate::definition::ToolDefinition;
use crate::errors::ToolError;
use crate::schema::SchemaBuilder;
use crate::tool::{Tool, ToolResult};

/// Desktop browser identity; some sites refuse requests without one.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);
const TEXT_WIDTH: usize = 80;

/// Configuration for [`WebPageTool`].
#[derive(Debug, Clone)]
pub struct WebPageConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// User-Agent header sent with requests.
    pub user_agent: String,
}

impl Default for WebPageConfig {
    fn default() -> Self {
        Self {
            timeout: FETCH_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WebPageArgs {
    url: String,
    #[serde(default)]
    ignore_links: bool,
    #[serde(default)]
    max_length: Option<usize>,
}

/// Fetches a webpage and converts it to readable text.
///
/// Exposed to the model as `get_website_url_content`. Keeping
/// `ignore_links` off leaves URL references in the output so the model
/// can decide to fetch nested pages.
#[derive(Debug)]
pub struct WebPageTool {
    client: reqwest::Client,
}

impl WebPageTool {
    /// Create a new webpage tool.
    pub fn new(config: WebPageConfig) -> Result<Self, ToolError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ToolError::configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Create a webpage tool with the default configuration.
    pub fn with_defaults() -> Result<Self, ToolError> {
        Self::new(WebPageConfig::default())
    }

    async fn fetch(&self, url: &str) -> Result<String, ToolError> {
        tracing::debug!(url, "fetching webpage");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ToolError::timeout(format!("Error fetching the url {url}: {e}"))
            } else {
                ToolError::execution_failed(format!("Error fetching the url {url}: {e}"))
            }
        })?;

        response
            .text()
            .await
            .map_err(|e| ToolError::execution_failed(format!("Error fetching the url {url}: {e}")))
    }
}

/// Convert an HTML body to plain text, wrapped at `width` columns.
///
/// Returns `None` if conversion fails; the caller falls back to the raw
/// body, which is what the model gets for non-HTML responses anyway.
fn html_to_text(html: &str, ignore_links: bool, width: usize) -> Option<String> {
    if ignore_links {
        html2text::config::with_decorator(TrivialDecorator::new())
            .string_from_read(html.as_bytes(), width)
            .ok()
    } else {
        html2text::config::plain()
            .string_from_read(html.as_bytes(), width)
            .ok()
    }
}

/// Truncate to at most `max` characters, on a char boundary.
fn truncate_chars(s: String, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s,
    }
}

#[async_trait]
impl<Deps: Send + Sync> Tool<Deps> for WebPageTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_website_url_content",
            "Fetch and extract text content from a webpage URL",
        )
        .with_parameters(
            SchemaBuilder::new()
                .string("url", "The URL of the webpage to scrape", true)
                .boolean(
                    "ignore_links",
                    "Whether to ignore links in the text. Use 'false' to receive URLs of nested pages.",
                    false,
                )
                .integer(
                    "max_length",
                    "Maximum length of text to return. If not provided, returns all text.",
                    false,
                )
                .no_additional_properties()
                .build()
                .unwrap_or(JsonValue::Null),
        )
    }

    async fn call(&self, _ctx: &RunContext<Deps>, args: JsonValue) -> ToolResult {
        let args: WebPageArgs = serde_json::from_value(args)
            .map_err(|e| ToolError::invalid_args(format!("url is required: {e}")))?;

        let body = self.fetch(&args.url).await?;

        let text = html_to_text(&body, args.ignore_links, TEXT_WIDTH).unwrap_or(body);
        let text = match args.max_length {
            Some(max) => truncate_chars(text, max),
            None => text,
        };

        Ok(ToolReturn::success(text))
    }
}
