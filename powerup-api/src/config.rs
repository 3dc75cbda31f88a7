//! Environment-driven configuration for the demo service.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

/// Default bind address when `POWERUP_BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default model when `POWERUP_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// The bind address could not be parsed.
    #[error("Invalid bind address '{addr}': {source}")]
    InvalidBindAddr {
        /// The offending value.
        addr: String,
        /// The parse failure.
        source: std::net::AddrParseError,
    },
}

/// Service configuration, assembled from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API key (`OPENAI_API_KEY`).
    pub openai_api_key: String,
    /// Google Custom Search API key (`GOOGLE_SEARCH_API_KEY`).
    pub google_api_key: String,
    /// Google Custom Search engine ID (`GOOGLE_SEARCH_CX_ID`).
    pub google_cx_id: String,
    /// Address to bind the HTTP server to (`POWERUP_BIND_ADDR`).
    pub bind_addr: SocketAddr,
    /// Model to drive the agent with (`POWERUP_MODEL`).
    pub model_name: String,
}

impl Config {
    /// Load the configuration from environment variables.
    ///
    /// The API keys are required; bind address and model fall back to
    /// [`DEFAULT_BIND_ADDR`] and [`DEFAULT_MODEL`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_key = require("OPENAI_API_KEY")?;
        let google_api_key = require("GOOGLE_SEARCH_API_KEY")?;
        let google_cx_id = require("GOOGLE_SEARCH_CX_ID")?;

        let addr = env::var("POWERUP_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr { addr, source })?;

        let model_name = env::var("POWERUP_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            openai_api_key,
            google_api_key,
            google_cx_id,
            bind_addr,
            model_name,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_var_display() {
        let err = ConfigError::MissingVar("OPENAI_API_KEY");
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: OPENAI_API_KEY"
        );
    }

    #[test]
    fn test_invalid_bind_addr_display() {
        let source = "not-an-addr".parse::<SocketAddr>().unwrap_err();
        let err = ConfigError::InvalidBindAddr {
            addr: "not-an-addr".to_string(),
            source,
        };
        assert!(err.to_string().contains("not-an-addr"));
    }

    #[test]
    fn test_default_bind_addr_parses() {
        let addr: SocketAddr = DEFAULT_BIND_ADDR.parse().unwrap();
        assert_eq!(addr.port(), 8000);
    }
}
