//! HTTP handlers for field diagnostics and the voice assistant

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{AssistantCommand, DiagnosticRequest};

use crate::error::AppResult;
use crate::services::diagnostic::DiagnosisOutcome;
use crate::AppState;

/// Diagnose a symptom report
pub async fn diagnose(
    State(state): State<AppState>,
    Json(request): Json<DiagnosticRequest>,
) -> AppResult<Json<DiagnosisOutcome>> {
    let outcome = state.diagnostics.diagnose(request).await?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
pub struct TranscribeInput {
    pub audio_base64: String,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: Option<String>,
}

/// Transcribe a recorded voice note
pub async fn transcribe(
    State(state): State<AppState>,
    Json(input): Json<TranscribeInput>,
) -> AppResult<Json<TranscribeResponse>> {
    let text = state.diagnostics.transcribe(&input.audio_base64).await?;
    Ok(Json(TranscribeResponse { text }))
}

#[derive(Debug, Deserialize)]
pub struct IntentInput {
    pub text: String,
}

/// Interpret a voice command
pub async fn parse_intent(
    State(state): State<AppState>,
    Json(input): Json<IntentInput>,
) -> AppResult<Json<AssistantCommand>> {
    let command = state.diagnostics.parse_intent(&input.text).await?;
    Ok(Json(command))
}

#[derive(Debug, Deserialize)]
pub struct SpeechInput {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SpeechResponse {
    /// Base64 audio, absent when synthesis is unavailable
    pub audio_base64: Option<String>,
}

/// Read a text aloud
pub async fn synthesize_speech(
    State(state): State<AppState>,
    Json(input): Json<SpeechInput>,
) -> AppResult<Json<SpeechResponse>> {
    let audio_base64 = state.diagnostics.synthesize_speech(&input.text).await?;
    Ok(Json(SpeechResponse { audio_base64 }))
}
