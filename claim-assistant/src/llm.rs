use async_trait::async_trait;
use claim_flow::{ClaimError, CompletionClient, CompletionParams, Result};
use serde_json::{Value, json};
use tracing::debug;

use crate::config::Config;

/// `CompletionClient` backed by the OpenRouter chat-completions API.
///
/// One request per call, no retries; every transport or response-shape
/// problem becomes a `Generation` error for the caller to render.
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: Config,
}

impl OpenRouterClient {
    pub fn new(config: Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(&self, prompt: &str, params: CompletionParams) -> Result<String> {
        let mut payload = json!({
            "model": self.config.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "max_tokens": params.max_tokens,
        });
        if let Some(temperature) = params.temperature {
            payload["temperature"] = json!(temperature);
        }

        debug!(
            model = %self.config.model,
            max_tokens = params.max_tokens,
            prompt_chars = prompt.len(),
            "sending completion request"
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClaimError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClaimError::Generation(format!(
                "LLM API request failed: {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClaimError::Generation(e.to_string()))?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ClaimError::Generation("invalid response format from LLM".to_string()))
    }
}
