//! Axum route handlers for diagnosis and expert chat.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assistant::chat::ChatTranscript;
use crate::assistant::diagnosis::{diagnose, prepare_image};
use crate::errors::AppError;
use crate::models::chat::ChatMessage;
use crate::models::diagnosis::DiagnosisResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub reply: ChatMessage,
    pub transcript: Vec<ChatMessage>,
}

/// POST /api/v1/diagnose
///
/// Multipart upload with the photo in the `image` field.
pub async fn handle_diagnose(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DiagnosisResult>, AppError> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid upload: {e}")))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("invalid upload: {e}")))?;
            image = Some(bytes);
            break;
        }
    }

    let bytes = image.ok_or_else(|| AppError::Validation("missing 'image' field".to_string()))?;
    let image = prepare_image(bytes)?;

    let result = diagnose(state.agronomist.as_ref(), &image).await?;
    Ok(Json(result))
}

/// POST /api/v1/chat/sessions
pub async fn handle_open_chat(
    State(state): State<AppState>,
) -> (StatusCode, Json<ChatTranscript>) {
    (StatusCode::CREATED, Json(state.chats.open()))
}

/// GET /api/v1/chat/sessions/:id
pub async fn handle_get_chat(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ChatTranscript>, AppError> {
    state
        .chats
        .transcript(session_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Chat session {session_id} not found")))
}

/// DELETE /api/v1/chat/sessions/:id
pub async fn handle_close_chat(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.chats.close(session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Chat session {session_id} not found")))
    }
}

/// POST /api/v1/chat/sessions/:id/messages
///
/// Always answers with a model turn; an unreachable assistant yields the fallback text.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let reply = state
        .chats
        .send(state.agronomist.as_ref(), session_id, &req.content)
        .await?;

    let transcript = state
        .chats
        .transcript(session_id)
        .map(|t| t.messages)
        .unwrap_or_default();

    Ok(Json(SendMessageResponse { reply, transcript }))
}
