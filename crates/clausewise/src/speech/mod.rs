//! Offline text-to-speech
//!
//! Result text is cleaned, sized to about a minute of speech and rendered to
//! WAV by a local engine. The audio is returned base64-encoded.

mod engine;
mod prepare;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::SpeechConfig;
use crate::error::{Error, Result};

pub use engine::{CommandSpeechEngine, SpeechEngine, VoiceSettings};
pub use prepare::{clean_text, prepare_speech_text, speech_rate, PreparedSpeech};

/// Hint returned to clients when no offline engine is available
pub const BROWSER_FALLBACK_HINT: &str =
    "Offline speech is unavailable; use the browser's speech synthesis instead.";

const PROBE_TEXT: &str = "Testing text to speech connection.";

/// Synthesized audio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechOutput {
    pub audio_base64: String,
    pub mime_type: String,
    pub rate: u32,
    pub word_count: usize,
}

/// Engine self-test result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechProbe {
    pub success: bool,
    pub engine: String,
    pub voices: Vec<String>,
    pub voices_available: usize,
    pub current_rate: u32,
    pub current_volume: f32,
    pub test_file_size: u64,
    /// `working`, `failed`, `not_available` or `error`
    pub engine_status: String,
    pub error: Option<String>,
}

/// Speech synthesizer
pub struct SpeechSynthesizer {
    engine: Arc<dyn SpeechEngine>,
    config: SpeechConfig,
}

impl SpeechSynthesizer {
    pub fn new(engine: Arc<dyn SpeechEngine>, config: SpeechConfig) -> Self {
        Self { engine, config }
    }

    /// Synthesizer using the configured engine executable
    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(
            Arc::new(CommandSpeechEngine::new(config.command.clone())),
            config.clone(),
        )
    }

    fn settings(&self, rate: u32) -> VoiceSettings {
        VoiceSettings {
            rate,
            volume: self.config.volume,
            voice: self.config.voice.clone(),
        }
    }

    /// Run the engine into a temporary WAV file and return its bytes.
    /// The file is removed when this returns.
    async fn render(&self, text: &str, settings: &VoiceSettings) -> Result<Vec<u8>> {
        let file = tempfile::Builder::new()
            .prefix("clausewise-")
            .suffix(".wav")
            .tempfile()?;

        self.engine.synthesize(text, settings, file.path()).await?;
        Ok(tokio::fs::read(file.path()).await?)
    }

    /// Convert text to speech.
    ///
    /// Returns `Ok(None)` for missing or unspeakable input.
    pub async fn synthesize(&self, text: Option<&str>) -> Result<Option<SpeechOutput>> {
        let Some(prepared) = text.and_then(|t| prepare_speech_text(t, &self.config)) else {
            tracing::debug!("no text available for audio conversion");
            return Ok(None);
        };

        tracing::info!(
            engine = self.engine.name(),
            words = prepared.word_count,
            rate = prepared.rate,
            "synthesizing speech"
        );

        let audio = self.render(&prepared.text, &self.settings(prepared.rate)).await?;
        if audio.is_empty() {
            return Err(Error::speech("engine produced an empty audio file"));
        }

        Ok(Some(SpeechOutput {
            audio_base64: STANDARD.encode(&audio),
            mime_type: "audio/wav".to_string(),
            rate: prepared.rate,
            word_count: prepared.word_count,
        }))
    }

    /// Check that the engine can list voices and render a short phrase
    pub async fn probe(&self) -> SpeechProbe {
        let mut probe = SpeechProbe {
            success: false,
            engine: self.engine.name().to_string(),
            voices: Vec::new(),
            voices_available: 0,
            current_rate: self.config.max_rate,
            current_volume: self.config.volume,
            test_file_size: 0,
            engine_status: "error".to_string(),
            error: None,
        };

        match self.engine.voices().await {
            Ok(voices) => {
                probe.voices_available = voices.len();
                probe.voices = voices;
            }
            Err(Error::SpeechUnavailable(msg)) => {
                probe.engine_status = "not_available".to_string();
                probe.error = Some(msg);
                return probe;
            }
            Err(e) => tracing::warn!(engine = %probe.engine, "could not list voices: {}", e),
        }

        match self.render(PROBE_TEXT, &self.settings(self.config.max_rate)).await {
            Ok(audio) => {
                probe.test_file_size = audio.len() as u64;
                probe.success = !audio.is_empty();
                probe.engine_status = if probe.success { "working" } else { "failed" }.to_string();
            }
            Err(Error::SpeechUnavailable(msg)) => {
                probe.engine_status = "not_available".to_string();
                probe.error = Some(msg);
            }
            Err(e) => {
                probe.error = Some(e.to_string());
            }
        }

        probe
    }
}
