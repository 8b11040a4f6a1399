use axum::{Router, response::Json as ResponseJson};
use utils::response::{ApiResponse, FailureKind};

use crate::{AppState, error::ApiError};

pub mod assistant;
pub mod dashboard;
pub mod health;
pub mod plants;
pub mod preferences;
pub mod tasks;
pub mod weather;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router(state))
        .merge(dashboard::router(state))
        .merge(plants::router(state))
        .merge(tasks::router(state))
        .merge(weather::router(state))
        .merge(preferences::router(state))
        .merge(assistant::router(state))
}

/// Map a failed service response to its status: 400 for invalid input, 404 otherwise.
/// `missing` supplies the message when the service gave none.
pub(crate) fn respond<T>(
    response: ApiResponse<T>,
    missing: impl FnOnce() -> String,
) -> Result<ResponseJson<ApiResponse<T>>, ApiError> {
    if response.is_success() {
        return Ok(ResponseJson(response));
    }
    let message = response.message.unwrap_or_else(missing);
    match response.kind {
        Some(FailureKind::Invalid) => Err(ApiError::BadRequest(message)),
        Some(FailureKind::NotFound) | None => Err(ApiError::NotFound(message)),
    }
}
