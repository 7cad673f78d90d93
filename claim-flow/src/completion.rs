use async_trait::async_trait;

use crate::error::Result;

/// Generation budget for one completion call.
///
/// Budgets are fixed per operation: classification answers are intentionally
/// short, while letters, estimates and chat replies are not. The chat
/// operation is the only one that sets a temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionParams {
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl CompletionParams {
    pub fn classification() -> Self {
        Self {
            max_tokens: 150,
            temperature: None,
        }
    }

    pub fn letter() -> Self {
        Self {
            max_tokens: 800,
            temperature: None,
        }
    }

    pub fn estimation() -> Self {
        Self {
            max_tokens: 600,
            temperature: None,
        }
    }

    pub fn fraud_check() -> Self {
        Self {
            max_tokens: 500,
            temperature: None,
        }
    }

    pub fn chat() -> Self {
        Self {
            max_tokens: 800,
            temperature: Some(0.5),
        }
    }
}

/// Boundary to the text-completion service.
///
/// Implementations must surface failures as `ClaimError::Generation` rather
/// than returning empty text. Callers make a single attempt per user action;
/// no retry policy is layered on top.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str, params: CompletionParams) -> Result<String>;
}
