//! The powerup-api binary.

use tracing_subscriber::EnvFilter;

use powerup_api::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;

    tracing::info!(addr = %config.bind_addr, model = %config.model_name, "starting powerup-api");
    state.serve(config.bind_addr).await?;

    Ok(())
}
