use axum::{Router, extract::State, response::Json as ResponseJson, routing::get};
use services::services::flora::Dashboard;
use utils::response::ApiResponse;

use crate::AppState;

/// Plants, tasks and weather in one round trip. Each part keeps its own envelope.
pub async fn get_dashboard(State(state): State<AppState>) -> ResponseJson<ApiResponse<Dashboard>> {
    ResponseJson(ApiResponse::success(state.flora().load_dashboard().await))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}
