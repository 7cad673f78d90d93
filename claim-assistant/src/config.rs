use claim_flow::{ClaimError, Result};
use tracing::info;

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Completion-endpoint settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl Config {
    /// Read configuration from the process environment, honoring a local
    /// `.env` file when present.
    ///
    /// The API key is required here so that a missing credential surfaces
    /// as a configuration error before any model call is attempted, not as
    /// a per-call failure.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| ClaimError::Configuration("OPENROUTER_API_KEY not set".to_string()))?;
        let model =
            std::env::var("OPENROUTER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("OPENROUTER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        info!(model = %model, "completion client configured");
        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }
}
