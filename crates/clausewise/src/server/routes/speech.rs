//! Text-to-speech endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::speech::{SpeechProbe, BROWSER_FALLBACK_HINT};
use crate::types::{query::SpeechRequest, response::SpeechResponse};

/// POST /api/speech - Synthesize text to base64 WAV
///
/// Missing text yields `audio_base64: null` with a reason; a missing engine
/// yields 503 with a browser fallback hint.
pub async fn synthesize(
    State(state): State<AppState>,
    Json(request): Json<SpeechRequest>,
) -> Result<(StatusCode, Json<SpeechResponse>)> {
    match state.speech().synthesize(request.text.as_deref()).await {
        Ok(Some(output)) => Ok((
            StatusCode::OK,
            Json(SpeechResponse {
                audio_base64: Some(output.audio_base64),
                mime_type: Some(output.mime_type),
                rate: Some(output.rate),
                word_count: Some(output.word_count),
                ..Default::default()
            }),
        )),
        Ok(None) => Ok((
            StatusCode::OK,
            Json(SpeechResponse {
                error: Some("No text available for audio conversion.".to_string()),
                ..Default::default()
            }),
        )),
        Err(Error::SpeechUnavailable(msg)) => {
            tracing::warn!("speech unavailable: {}", msg);
            Ok((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(SpeechResponse {
                    error: Some(msg),
                    fallback: Some(BROWSER_FALLBACK_HINT.to_string()),
                    ..Default::default()
                }),
            ))
        }
        Err(e) => Err(e),
    }
}

/// GET /api/speech/status - Engine self-test
pub async fn status(State(state): State<AppState>) -> Json<SpeechProbe> {
    Json(state.speech().probe().await)
}
