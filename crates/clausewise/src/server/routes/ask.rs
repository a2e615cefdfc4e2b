//! Question answering over a stored document

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{
    query::AskRequest,
    response::{AnswerResponse, ConversationResponse},
    ConversationTurn,
};

/// POST /api/documents/:id/ask - Answer a question and record the turn
pub async fn ask(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AnswerResponse>> {
    let question = request.question.trim();
    if question.is_empty() {
        return Err(Error::BadRequest("Question must not be empty".to_string()));
    }

    let doc = state.require_document(&id)?;
    tracing::info!("Question about '{}': {}", doc.filename, question);

    let outcome = state.analyzer().answer(question, &doc.content).await;
    let turn = ConversationTurn::new(question.to_string(), outcome);
    let history_length = state.record_turn(id, turn.clone());

    Ok(Json(AnswerResponse {
        document_id: id,
        turn,
        history_length,
    }))
}

/// GET /api/documents/:id/conversation - All turns, oldest first
pub async fn conversation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationResponse>> {
    state.require_document(&id)?;

    Ok(Json(ConversationResponse {
        document_id: id,
        turns: state.conversation(&id),
    }))
}
