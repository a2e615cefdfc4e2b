//! Offline speech engines

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Voice parameters for one synthesis run
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    /// Words per minute
    pub rate: u32,
    /// 0.0 - 1.0
    pub volume: f32,
    /// Engine voice name; engine default when unset
    pub voice: Option<String>,
}

/// Trait for offline text-to-speech engines
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Speak `text` into a WAV file at `output`
    async fn synthesize(&self, text: &str, settings: &VoiceSettings, output: &Path) -> Result<()>;

    /// Voices the engine offers
    async fn voices(&self) -> Result<Vec<String>>;

    /// Engine name for logging
    fn name(&self) -> &str;
}

/// Speech engine driven through an espeak-ng compatible executable
pub struct CommandSpeechEngine {
    command: String,
}

impl CommandSpeechEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn not_installed(&self) -> Error {
        Error::SpeechUnavailable(format!(
            "speech engine '{}' not found (install espeak-ng or set speech.command)",
            self.command
        ))
    }
}

#[async_trait]
impl SpeechEngine for CommandSpeechEngine {
    async fn synthesize(&self, text: &str, settings: &VoiceSettings, output: &Path) -> Result<()> {
        // espeak amplitude runs 0-200 with 100 as normal volume
        let amplitude = (settings.volume.clamp(0.0, 2.0) * 100.0).round() as u32;

        let mut command = Command::new(&self.command);
        command
            .arg("-w")
            .arg(output)
            .args(["-s", &settings.rate.to_string()])
            .args(["-a", &amplitude.to_string()]);
        if let Some(voice) = settings.voice.as_deref() {
            command.args(["-v", voice]);
        }
        command
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(self.not_installed()),
            Err(e) => return Err(Error::Io(e)),
        };

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;
        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(Error::speech(format!("{} failed: {}", self.command, stderr.trim())))
        }
    }

    async fn voices(&self) -> Result<Vec<String>> {
        let output = match Command::new(&self.command).arg("--voices").output().await {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(self.not_installed()),
            Err(e) => return Err(Error::Io(e)),
        };

        if !output.status.success() {
            return Err(Error::speech(format!("{} --voices failed", self.command)));
        }

        // Pty Language Age/Gender VoiceName File Other Languages
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .skip(1)
            .filter_map(|line| line.split_whitespace().nth(3))
            .map(str::to_string)
            .collect())
    }

    fn name(&self) -> &str {
        &self.command
    }
}
