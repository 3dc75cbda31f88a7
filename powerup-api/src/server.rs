//! Axum router and handlers for the demo endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use powerup_agent::{Agent, ExecutedToolCall};
use powerup_models::{Model, OpenAIChatModel};
use powerup_tools::common::{GoogleSearchConfig, GoogleSearchTool, WebPageTool};
use powerup_tools::{ToolError, ToolRegistry};

use crate::config::Config;

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl ErrorResponse {
    /// Create an error response.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Request body for `POST /powerup-demo`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PowerUpRequest {
    /// Names of the tools the agent may use for this request.
    pub tools: Vec<String>,
    /// The user message.
    pub message: String,
}

/// Response body for `POST /powerup-demo`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PowerUpResponse {
    /// The model's final answer.
    pub response: String,
    /// Every tool call executed during the run, in order.
    pub tool_calls_executed: Vec<ExecutedToolCall>,
}

/// Server error types.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Binding the listener failed.
    #[error("Failed to bind to address: {0}")]
    Bind(String),
    /// Serving failed.
    #[error("Server error: {0}")]
    Serve(String),
}

/// Shared state for the HTTP handlers.
pub struct AppState {
    model: Arc<dyn Model>,
    registry: ToolRegistry<()>,
}

impl AppState {
    /// Create state from a model and a registry of available tools.
    #[must_use]
    pub fn new(model: Arc<dyn Model>, registry: ToolRegistry<()>) -> Self {
        Self { model, registry }
    }

    /// Build state from the service configuration.
    ///
    /// Registers the two web tools and the OpenAI chat model.
    pub fn from_config(config: &Config) -> Result<Self, ToolError> {
        let model = OpenAIChatModel::new(&config.model_name, &config.openai_api_key);

        let search = GoogleSearchTool::new(GoogleSearchConfig::new(
            &config.google_api_key,
            &config.google_cx_id,
        ))?;
        let registry = ToolRegistry::new()
            .with_tool(Arc::new(search))
            .with_tool(Arc::new(WebPageTool::with_defaults()?));

        Ok(Self::new(Arc::new(model), registry))
    }

    /// Create the Axum router for the demo endpoints.
    #[must_use]
    pub fn router(self) -> Router {
        Router::new()
            .route("/powerup-demo", post(powerup_demo))
            .route("/health", get(health_check))
            // Demo posture: any origin may call this service.
            .layer(CorsLayer::permissive())
            .with_state(Arc::new(self))
    }

    /// Start serving on the given address.
    ///
    /// Blocks until the server shuts down.
    pub async fn serve(self, addr: SocketAddr) -> Result<(), ServerError> {
        let router = self.router();

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(e.to_string()))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        Ok(())
    }
}

/// POST /powerup-demo - Run the agent with the requested tools.
async fn powerup_demo(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PowerUpRequest>,
) -> Result<Json<PowerUpResponse>, (StatusCode, Json<ErrorResponse>)> {
    let registry = state.registry.subset(&request.tools).map_err(|e| {
        let message = match e {
            ToolError::NotFound { name } => format!("Unknown tool: {name}"),
            other => other.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
    })?;

    tracing::info!(tools = ?request.tools, "demo request received");

    let agent = Agent::new(Arc::clone(&state.model)).with_registry(registry);

    match agent.run(request.message).await {
        Ok(result) => {
            tracing::info!(
                run_id = %result.run_id,
                tool_calls = result.tool_calls_executed.len(),
                "demo run completed"
            );
            Ok(Json(PowerUpResponse {
                response: result.response,
                tool_calls_executed: result.tool_calls_executed,
            }))
        }
        Err(e) => {
            tracing::error!(error = %e, "demo run failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
    }
}

/// GET /health - Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "powerup"
    }))
}
