//! Response types for the HTTP API

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::document::{Document, DocumentLabel, FileType};
use super::entities::EntityBag;

/// Where an analysis result came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisSource {
    /// Hosted model; `model` is the model actually invoked
    Remote { model: String },
    /// Local keyword/regex heuristics
    Local,
}

impl AnalysisSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

/// Text produced by the analyzer together with its source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub text: String,
    pub source: AnalysisSource,
}

impl AnalysisOutcome {
    pub fn remote(text: String, model: impl Into<String>) -> Self {
        Self {
            text,
            source: AnalysisSource::Remote {
                model: model.into(),
            },
        }
    }

    pub fn local(text: String) -> Self {
        Self {
            text,
            source: AnalysisSource::Local,
        }
    }
}

/// One question/answer exchange about a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
    pub source: AnalysisSource,
    pub asked_at: chrono::DateTime<chrono::Utc>,
}

impl ConversationTurn {
    pub fn new(question: String, outcome: AnalysisOutcome) -> Self {
        Self {
            question,
            answer: outcome.text,
            source: outcome.source,
            asked_at: chrono::Utc::now(),
        }
    }
}

/// Summary of an uploaded document (no text)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub filename: String,
    pub file_type: FileType,
    pub mime_type: String,
    pub file_size: u64,
    pub total_pages: Option<u32>,
    pub word_count: usize,
    pub label: DocumentLabel,
    pub keywords_matched: usize,
    /// e.g. "Lease Agreement (Confidence: 5 keywords matched)"
    pub document_type: String,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            filename: doc.filename.clone(),
            file_type: doc.file_type,
            mime_type: doc.mime_type.clone(),
            file_size: doc.file_size,
            total_pages: doc.total_pages,
            word_count: doc.word_count,
            label: doc.classification.label,
            keywords_matched: doc.classification.keywords_matched,
            document_type: doc.classification.to_string(),
            uploaded_at: doc.uploaded_at,
        }
    }
}

/// Entry in the upload history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Position in upload order, starting at 0
    pub index: usize,
    #[serde(flatten)]
    pub document: DocumentSummary,
}

/// Response of `POST /api/documents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub document: HistoryEntry,
    pub processing_time_ms: u64,
}

/// Response of `GET /api/documents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentListResponse {
    pub documents: Vec<HistoryEntry>,
    pub total_count: usize,
}

/// Response of `GET /api/documents/:id/text`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTextResponse {
    pub document_id: Uuid,
    pub filename: String,
    pub text: String,
}

/// Response of the summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub document_id: Uuid,
    pub summary: String,
    pub source: AnalysisSource,
    pub processing_time_ms: u64,
}

/// Plain text produced by a local heuristic (detailed summary, simplification, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeuristicTextResponse {
    pub document_id: Uuid,
    pub text: String,
    pub source: AnalysisSource,
}

/// Response of the classification endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResponse {
    pub document_id: Uuid,
    pub label: DocumentLabel,
    pub keywords_matched: usize,
    pub description: String,
}

/// Response of the entities endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitiesResponse {
    pub document_id: Uuid,
    pub entities: EntityBag,
    pub total: usize,
}

/// Response of the ask endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub document_id: Uuid,
    pub turn: ConversationTurn,
    /// Number of turns recorded for this document, including this one
    pub history_length: usize,
}

/// Response of the conversation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub document_id: Uuid,
    pub turns: Vec<ConversationTurn>,
}

/// Response of the speech endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechResponse {
    /// Base64-encoded WAV, null when nothing was synthesized
    pub audio_base64: Option<String>,
    pub mime_type: Option<String>,
    /// Words per minute used by the engine
    pub rate: Option<u32>,
    /// Words spoken
    pub word_count: Option<usize>,
    /// User-visible reason when no audio was produced
    pub error: Option<String>,
    /// Suggested fallback when the engine is unavailable
    pub fallback: Option<String>,
}
