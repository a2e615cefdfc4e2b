//! Document analysis endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use std::time::Instant;
use uuid::Uuid;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{
    query::SummaryRequest,
    response::{
        ClassificationResponse, EntitiesResponse, HeuristicTextResponse, SummaryResponse,
    },
    AnalysisOutcome,
};

fn text_response(id: Uuid, outcome: AnalysisOutcome) -> Json<HeuristicTextResponse> {
    Json(HeuristicTextResponse {
        document_id: id,
        text: outcome.text,
        source: outcome.source,
    })
}

/// POST /api/documents/:id/summary - Summary, remote model first
pub async fn summarize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<SummaryRequest>>,
) -> Result<Json<SummaryResponse>> {
    let start = Instant::now();
    let doc = state.require_document(&id)?;
    let max_words = request.and_then(|Json(r)| r.max_words);

    let outcome = state.analyzer().summarize(&doc.content, max_words).await;

    Ok(Json(SummaryResponse {
        document_id: id,
        summary: outcome.text,
        source: outcome.source,
        processing_time_ms: start.elapsed().as_millis() as u64,
    }))
}

/// GET /api/documents/:id/detailed-summary
pub async fn detailed_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HeuristicTextResponse>> {
    let doc = state.require_document(&id)?;
    Ok(text_response(id, state.analyzer().detailed_summary(&doc.content)))
}

/// GET /api/documents/:id/classification
pub async fn classification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClassificationResponse>> {
    let doc = state.require_document(&id)?;
    let classification = doc.classification;

    Ok(Json(ClassificationResponse {
        document_id: id,
        label: classification.label,
        keywords_matched: classification.keywords_matched,
        description: classification.to_string(),
    }))
}

/// GET /api/documents/:id/entities
pub async fn entities(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EntitiesResponse>> {
    let doc = state.require_document(&id)?;
    let entities = state.analyzer().extract_entities(&doc.content);

    Ok(Json(EntitiesResponse {
        document_id: id,
        total: entities.total(),
        entities,
    }))
}

/// GET /api/documents/:id/simplified
pub async fn simplified(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HeuristicTextResponse>> {
    let doc = state.require_document(&id)?;
    Ok(text_response(id, state.analyzer().simplify(&doc.content)))
}

/// GET /api/documents/:id/key-clauses
pub async fn key_clauses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HeuristicTextResponse>> {
    let doc = state.require_document(&id)?;
    Ok(text_response(id, state.analyzer().key_clauses(&doc.content)))
}

/// GET /api/documents/:id/highlighted - HTML with highlighted entities
pub async fn highlighted(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HeuristicTextResponse>> {
    let doc = state.require_document(&id)?;
    Ok(text_response(id, state.analyzer().highlight(&doc.content)))
}
