//! Remote inference providers
//!
//! The hosted API is optional: without an API key every call goes to the
//! `DisabledProvider` and analysis runs on local heuristics only.

pub mod huggingface;
pub mod inference;
pub mod models;

use std::sync::Arc;

use crate::config::InferenceConfig;
use crate::error::Result;

pub use huggingface::HuggingFaceClient;
pub use inference::{DisabledProvider, GeneratedText, InferenceProvider, InferenceTask};
pub use models::ModelRegistry;

/// Build the provider selected by the configuration
pub fn from_config(config: &InferenceConfig) -> Result<Arc<dyn InferenceProvider>> {
    if config.is_enabled() {
        tracing::info!(base_url = %config.base_url, "remote inference enabled");
        Ok(Arc::new(HuggingFaceClient::new(config)?))
    } else {
        tracing::warn!("no API key configured, using local processing only");
        Ok(Arc::new(DisabledProvider))
    }
}
