//! Language model abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ExplainResult;

/// Sampling options for a completion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_output_tokens: 500,
            temperature: 0.7,
        }
    }
}

/// A hosted text-generation model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Name reported as the source of generated explanations.
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`.
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> ExplainResult<String>;
}
