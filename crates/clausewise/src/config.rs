//! Configuration for ClauseWise

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming an explicit TOML config file
pub const CONFIG_PATH_ENV: &str = "CLAUSEWISE_CONFIG";

/// Main ClauseWise configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClauseWiseConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Hosted inference configuration
    pub inference: InferenceConfig,
    /// Local analysis configuration
    pub analysis: AnalysisConfig,
    /// Offline speech configuration
    pub speech: SpeechConfig,
}

impl ClauseWiseConfig {
    /// Load configuration: defaults, then the TOML file (if any), then environment overrides.
    ///
    /// The file is taken from `CLAUSEWISE_CONFIG` when set, otherwise from
    /// `<config_dir>/clausewise/config.toml` when that file exists.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from a TOML string; missing keys keep their defaults
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        dirs::config_dir()
            .map(|dir| dir.join("clausewise").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Apply `CLAUSEWISE_*` and `HF_API_KEY` environment overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("CLAUSEWISE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("CLAUSEWISE_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.server.port = port;
        }
        if let Ok(key) = std::env::var("HF_API_KEY") {
            if !key.trim().is_empty() {
                self.inference.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("CLAUSEWISE_INFERENCE_URL") {
            self.inference.base_url = url;
        }
        if let Ok(command) = std::env::var("CLAUSEWISE_SPEECH_COMMAND") {
            self.speech.command = command;
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 25MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 25 * 1024 * 1024,
        }
    }
}

/// Hosted inference configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Inference API base URL; models are addressed as `{base_url}/models/{model}`
    pub base_url: String,
    /// Bearer token. Inference is disabled when unset.
    pub api_key: Option<String>,
    /// Timeout for generic queries in seconds
    pub query_timeout_secs: u64,
    /// Timeout for task generation calls in seconds
    pub generate_timeout_secs: u64,
    /// Attempts made by the retrying query
    pub max_retries: u32,
    /// Wait after a 503 (model loading) in milliseconds
    pub loading_delay_ms: u64,
    /// Wait after any other retryable failure in milliseconds
    pub retry_delay_ms: u64,
    /// Model used for each task
    pub models: ModelsConfig,
    /// Explicit redirects from a requested model name to the invoked model.
    /// Empty unless an operator configures one.
    pub backend_aliases: HashMap<String, String>,
}

impl InferenceConfig {
    /// Returns true if an API key is configured
    pub fn is_enabled(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co".to_string(),
            api_key: None,
            query_timeout_secs: 30,
            generate_timeout_secs: 45,
            max_retries: 3,
            loading_delay_ms: 15_000,
            retry_delay_ms: 5_000,
            models: ModelsConfig::default(),
            backend_aliases: HashMap::new(),
        }
    }
}

/// Task to model assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub summarization: String,
    pub question_answering: String,
    pub detailed_analysis: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            summarization: "facebook/bart-large-cnn".to_string(),
            question_answering: "facebook/bart-large-cnn".to_string(),
            detailed_analysis: "facebook/bart-large-cnn".to_string(),
        }
    }
}

/// Local analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Word limit requested in the summary prompt
    pub summary_max_words: usize,
    /// Characters of document text sent with a question
    pub question_context_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            summary_max_words: 150,
            question_context_chars: 1500,
        }
    }
}

/// Offline speech configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speech engine executable (espeak-ng compatible command line)
    pub command: String,
    /// Preferred voice; the engine default is used when unset
    pub voice: Option<String>,
    /// Output volume (0.0 - 1.0)
    pub volume: f32,
    /// Short texts are padded up to this many words (~1 minute of speech)
    pub target_words: usize,
    /// Long texts are cut to this many words
    pub max_words: usize,
    /// Slowest speech rate in words per minute
    pub min_rate: u32,
    /// Fastest speech rate in words per minute
    pub max_rate: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: "espeak-ng".to_string(),
            voice: None,
            volume: 0.9,
            target_words: 180,
            max_words: 200,
            min_rate: 120,
            max_rate: 180,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ClauseWiseConfig::from_toml(
            r#"
            [server]
            port = 9090

            [inference]
            max_retries = 5

            [inference.backend_aliases]
            "org/nominal-model" = "org/served-model"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.inference.max_retries, 5);
        assert_eq!(config.inference.retry_delay_ms, 5_000);
        assert_eq!(
            config.inference.backend_aliases.get("org/nominal-model").map(String::as_str),
            Some("org/served-model")
        );
        assert_eq!(config.speech.command, "espeak-ng");
    }

    #[test]
    fn test_defaults_have_no_aliases_and_no_key() {
        let config = ClauseWiseConfig::default();
        assert!(config.inference.backend_aliases.is_empty());
        assert!(!config.inference.is_enabled());
    }

    #[test]
    fn test_blank_key_is_disabled() {
        let mut config = InferenceConfig::default();
        config.api_key = Some("   ".to_string());
        assert!(!config.is_enabled());
        config.api_key = Some("hf_token".to_string());
        assert!(config.is_enabled());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ClauseWiseConfig::from_toml("[server\nport = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
