//! Chat and leaf identification.
//!
//! Model failures come back as a 200 with a fallback answer, the same as a
//! real reply. Only missing input is rejected.

use axum::{
    Json, Router,
    extract::State,
    response::Json as ResponseJson,
    routing::post,
};
use db::models::chat::ChatMessage;
use serde::{Deserialize, Serialize};
use services::services::identify::{self, NO_IMAGE, ScanOutcome};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize, TS)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize, TS)]
pub struct IdentifyRequest {
    /// Data URL or bare base64 of the leaf photo.
    pub image: Option<String>,
}

#[derive(Debug, Serialize, TS)]
pub struct Diagnosis {
    pub text: String,
}

pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<ResponseJson<ApiResponse<ChatMessage>>, ApiError> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("message is required".to_string()));
    }
    let reply = state.assistant().chat(message).await;
    Ok(ResponseJson(ApiResponse::success(ChatMessage::bot(reply))))
}

pub async fn identify(
    State(state): State<AppState>,
    Json(payload): Json<IdentifyRequest>,
) -> Result<ResponseJson<ApiResponse<Diagnosis>>, ApiError> {
    match identify::scan(state.assistant(), payload.image.as_deref()).await {
        ScanOutcome::NoImage => Err(ApiError::BadRequest(NO_IMAGE.to_string())),
        ScanOutcome::InvalidImage(e) => Err(e.into()),
        ScanOutcome::Diagnosis(text) => Ok(ResponseJson(ApiResponse::success(Diagnosis { text }))),
    }
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().nest(
        "/assistant",
        Router::new()
            .route("/chat", post(chat))
            .route("/identify", post(identify)),
    )
}
