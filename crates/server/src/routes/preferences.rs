use axum::{Json, Router, extract::State, response::Json as ResponseJson, routing::get};
use db::models::preferences::{Preferences, UpdatePreferences};
use utils::response::ApiResponse;

use crate::AppState;

pub async fn get_preferences(
    State(state): State<AppState>,
) -> ResponseJson<ApiResponse<Preferences>> {
    ResponseJson(state.flora().get_preferences().await)
}

/// Partial update; absent fields keep their value.
pub async fn update_preferences(
    State(state): State<AppState>,
    Json(patch): Json<UpdatePreferences>,
) -> ResponseJson<ApiResponse<Preferences>> {
    ResponseJson(state.flora().update_preferences(patch).await)
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/preferences",
        get(get_preferences).put(update_preferences),
    )
}
