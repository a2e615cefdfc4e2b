//! Request types

use serde::{Deserialize, Serialize};

/// Body of `POST /api/documents/:id/summary`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Word limit requested from the model (default from config)
    #[serde(default)]
    pub max_words: Option<usize>,
}

/// Body of `POST /api/documents/:id/ask`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// The user's question
    pub question: String,
}

/// Body of `POST /api/speech`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechRequest {
    /// Text to synthesize; null or empty yields no audio
    #[serde(default)]
    pub text: Option<String>,
}
