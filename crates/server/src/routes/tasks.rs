use axum::{
    Router,
    extract::{Path, State},
    response::Json as ResponseJson,
    routing::{get, post},
};
use db::models::task::{Task, TaskWithPlant};
use utils::response::ApiResponse;

use crate::AppState;

pub async fn get_tasks(State(state): State<AppState>) -> ResponseJson<ApiResponse<Vec<Task>>> {
    ResponseJson(state.flora().get_tasks().await)
}

pub async fn get_calendar(
    State(state): State<AppState>,
) -> ResponseJson<ApiResponse<Vec<TaskWithPlant>>> {
    ResponseJson(state.flora().get_calendar().await)
}

/// Idempotent: completing a task that is already gone still returns 200.
pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ResponseJson<ApiResponse<()>> {
    ResponseJson(state.flora().complete_task(id).await)
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().nest(
        "/tasks",
        Router::new()
            .route("/", get(get_tasks))
            .route("/calendar", get(get_calendar))
            .route("/{id}/complete", post(complete_task)),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{send, test_state};

    #[tokio::test]
    async fn complete_twice_then_list() {
        let state = test_state();
        for _ in 0..2 {
            let (status, body) = send(&state, "POST", "/api/tasks/2/complete", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["success"], true);
        }
        let (_, body) = send(&state, "GET", "/api/tasks", None).await;
        let ids: Vec<i64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn calendar_flattens_task_and_skips_deleted_plants() {
        let state = test_state();
        let (_, body) = send(&state, "GET", "/api/tasks/calendar", None).await;
        let first = &body["data"][0];
        assert_eq!(first["type"], "water");
        assert_eq!(first["plant"]["nickname"], "Monty");

        send(&state, "DELETE", "/api/plants/1", None).await;
        let (_, body) = send(&state, "GET", "/api/tasks/calendar", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }
}
