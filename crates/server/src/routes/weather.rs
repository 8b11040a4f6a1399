use axum::{Json, Router, extract::State, response::Json as ResponseJson, routing::get};
use db::models::weather::Weather;
use utils::response::ApiResponse;

use crate::AppState;

pub async fn get_weather(State(state): State<AppState>) -> ResponseJson<ApiResponse<Weather>> {
    ResponseJson(state.flora().get_weather().await)
}

pub async fn replace_weather(
    State(state): State<AppState>,
    Json(payload): Json<Weather>,
) -> ResponseJson<ApiResponse<Weather>> {
    ResponseJson(state.flora().replace_weather(payload).await)
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route("/weather", get(get_weather).put(replace_weather))
}
