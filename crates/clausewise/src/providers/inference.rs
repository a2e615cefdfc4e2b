//! Inference provider trait for remote text generation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Kind of work a prompt asks the model to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceTask {
    Summarization,
    QuestionAnswering,
    DetailedAnalysis,
}

impl InferenceTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summarization => "summarization",
            Self::QuestionAnswering => "question_answering",
            Self::DetailedAnalysis => "detailed_analysis",
        }
    }
}

impl std::fmt::Display for InferenceTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text returned by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    pub text: String,
    /// Model that actually produced the text
    pub model: String,
}

/// Trait for remote text generation
///
/// Implementations:
/// - `HuggingFaceClient`: hosted inference API
/// - `DisabledProvider`: no credentials configured
///
/// `Ok(None)` means "no usable answer" (failed call or low-confidence text);
/// callers fall back to local heuristics.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Run `prompt` against `model` for the given task
    async fn generate(
        &self,
        model: &str,
        task: InferenceTask,
        prompt: &str,
    ) -> Result<Option<GeneratedText>>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Provider used when no API key is configured
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledProvider;

#[async_trait]
impl InferenceProvider for DisabledProvider {
    async fn generate(
        &self,
        _model: &str,
        task: InferenceTask,
        _prompt: &str,
    ) -> Result<Option<GeneratedText>> {
        tracing::debug!(%task, "inference disabled, using local processing");
        Ok(None)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
