//! API routes for the ClauseWise server

pub mod analysis;
pub mod ask;
pub mod documents;
pub mod speech;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Documents - with larger body limit for file uploads
        .route(
            "/documents",
            post(documents::upload_document)
                .layer(DefaultBodyLimit::max(max_upload_size))
                .get(documents::list_documents),
        )
        .route("/documents/:id", get(documents::get_document))
        .route("/documents/:id/text", get(documents::get_document_text))
        // Analysis
        .route("/documents/:id/summary", post(analysis::summarize))
        .route("/documents/:id/detailed-summary", get(analysis::detailed_summary))
        .route("/documents/:id/classification", get(analysis::classification))
        .route("/documents/:id/entities", get(analysis::entities))
        .route("/documents/:id/simplified", get(analysis::simplified))
        .route("/documents/:id/key-clauses", get(analysis::key_clauses))
        .route("/documents/:id/highlighted", get(analysis::highlighted))
        // Questions
        .route("/documents/:id/ask", post(ask::ask))
        .route("/documents/:id/conversation", get(ask::conversation))
        // Speech
        .route("/speech", post(speech::synthesize))
        .route("/speech/status", get(speech::status))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let inference = &state.config().inference;
    let healthy = state.analyzer().provider_healthy().await;

    Json(serde_json::json!({
        "name": "clausewise",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Legal document analysis with remote summarization and local fallbacks",
        "documents": state.document_count(),
        "inference": {
            "provider": state.analyzer().provider_name(),
            "enabled": inference.is_enabled(),
            "healthy": healthy,
            "models": {
                "summarization": inference.models.summarization,
                "question_answering": inference.models.question_answering,
                "detailed_analysis": inference.models.detailed_analysis,
            },
            "backend_aliases": inference.backend_aliases,
        },
        "speech_engine": state.config().speech.command,
        "endpoints": {
            "POST /api/documents": "Upload a PDF, DOCX or TXT document (multipart field 'file')",
            "GET /api/documents": "Upload history",
            "GET /api/documents/:id": "Document details",
            "GET /api/documents/:id/text": "Extracted text",
            "POST /api/documents/:id/summary": "Summary (remote model, local fallback)",
            "GET /api/documents/:id/detailed-summary": "Structured overview",
            "GET /api/documents/:id/classification": "Document type",
            "GET /api/documents/:id/entities": "Named entities",
            "GET /api/documents/:id/simplified": "Plain-language clauses",
            "GET /api/documents/:id/key-clauses": "Key clauses",
            "GET /api/documents/:id/highlighted": "HTML with highlighted entities",
            "POST /api/documents/:id/ask": "Ask a question about the document",
            "GET /api/documents/:id/conversation": "Question history",
            "POST /api/speech": "Text to base64 WAV",
            "GET /api/speech/status": "Speech engine status"
        }
    }))
}
