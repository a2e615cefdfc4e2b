//! Document upload and history endpoints

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::ingestion::FileParser;
use crate::server::state::AppState;
use crate::types::{
    response::{DocumentListResponse, DocumentTextResponse, HistoryEntry, UploadResponse},
    Document,
};

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

struct Upload {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

/// Read the `file` field (or the first field with a filename)
async fn read_upload(multipart: &mut Multipart) -> Result<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name != FILE_FIELD && field.file_name().is_none() {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("upload_{}.txt", Uuid::new_v4()));
        let content_type = field.content_type().map(|s| s.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::BadRequest(format!("Failed to read file: {}", e)))?;

        return Ok(Upload {
            filename,
            content_type,
            data,
        });
    }

    Err(Error::BadRequest(
        "No file uploaded. Send the document in a multipart field named 'file'.".to_string(),
    ))
}

/// POST /api/documents - Upload a document, extract and classify it
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let start = Instant::now();
    let upload = read_upload(&mut multipart).await?;

    tracing::info!(
        "Processing upload: {} ({} bytes)",
        upload.filename,
        upload.data.len()
    );

    let filename = upload.filename.clone();
    let content_type = upload.content_type.clone();
    let data = upload.data.clone();
    let parsed = tokio::task::spawn_blocking(move || {
        FileParser::parse(&filename, content_type.as_deref(), &data)
    })
    .await
    .map_err(|e| Error::internal(format!("Parser task failed: {}", e)))??;

    let classification = state.analyzer().classify(&parsed.content);

    let mut doc = Document::new(
        upload.filename,
        parsed.file_type,
        parsed.mime_type,
        parsed.content,
        parsed.content_hash,
        upload.data.len() as u64,
        classification,
    );
    doc.total_pages = parsed.total_pages;

    tracing::info!(
        "Stored '{}' as {} ({} words)",
        doc.filename,
        classification,
        doc.word_count
    );

    let entry = state.add_document(doc);

    Ok(Json(UploadResponse {
        document: entry,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}

/// GET /api/documents - Upload history
pub async fn list_documents(State(state): State<AppState>) -> Result<Json<DocumentListResponse>> {
    let documents = state.history();
    let total_count = documents.len();

    Ok(Json(DocumentListResponse {
        documents,
        total_count,
    }))
}

/// GET /api/documents/:id - Get a specific document
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryEntry>> {
    let entry = state
        .history_entry(&id)
        .ok_or_else(|| Error::DocumentNotFound(id.to_string()))?;

    Ok(Json(entry))
}

/// GET /api/documents/:id/text - Extracted text
pub async fn get_document_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentTextResponse>> {
    let doc = state.require_document(&id)?;

    Ok(Json(DocumentTextResponse {
        document_id: doc.id,
        filename: doc.filename,
        text: doc.content,
    }))
}
