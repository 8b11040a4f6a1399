use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use serde::Serialize;
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::AppState;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: String,
    /// "live" with a model credential, "canned" otherwise.
    pub assistant: String,
}

pub async fn health(State(state): State<AppState>) -> ResponseJson<ApiResponse<Health>> {
    let assistant = if state.assistant().is_live() {
        "live"
    } else {
        "canned"
    };
    ResponseJson(ApiResponse::success(Health {
        status: "ok".to_string(),
        assistant: assistant.to_string(),
    }))
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use ts_rs::TS;

    use super::Health;
    use crate::routes::test_support::{send, test_state};

    #[test]
    fn health_declares_string_fields() {
        let decl = Health::decl();
        assert!(decl.contains("status: string"), "{decl}");
        assert!(decl.contains("assistant: string"), "{decl}");
    }

    #[tokio::test]
    async fn reports_canned_assistant_without_key() {
        let (status, body) = send(&test_state(), "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["data"]["assistant"], "canned");
    }
}
