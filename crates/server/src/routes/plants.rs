use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use db::models::{
    journal::{CreateJournalEntry, JournalEntry},
    plant::{CreatePlant, Plant},
};
use serde::Deserialize;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, routes::respond};

#[derive(Debug, Deserialize)]
pub struct PlantsQuery {
    pub tag: Option<String>,
}

pub async fn get_plants(
    State(state): State<AppState>,
    Query(query): Query<PlantsQuery>,
) -> ResponseJson<ApiResponse<Vec<Plant>>> {
    let response = match query.tag.as_deref() {
        Some(tag) => state.flora().plants_with_tag(tag).await,
        None => state.flora().get_plants().await,
    };
    ResponseJson(response)
}

pub async fn create_plant(
    State(state): State<AppState>,
    Json(payload): Json<CreatePlant>,
) -> Result<ResponseJson<ApiResponse<Plant>>, ApiError> {
    respond(state.flora().add_plant(payload).await, String::new)
}

pub async fn get_tags(State(state): State<AppState>) -> ResponseJson<ApiResponse<Vec<String>>> {
    ResponseJson(state.flora().get_tags().await)
}

pub async fn update_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CreatePlant>,
) -> Result<ResponseJson<ApiResponse<Plant>>, ApiError> {
    respond(state.flora().update_plant(id, payload).await, || {
        format!("plant {id} not found")
    })
}

pub async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ResponseJson<ApiResponse<()>>, ApiError> {
    respond(state.flora().delete_plant(id).await, || {
        format!("plant {id} not found")
    })
}

pub async fn water_plant(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<ResponseJson<ApiResponse<Plant>>, ApiError> {
    respond(state.flora().water_plant(id).await, || {
        format!("plant {id} not found")
    })
}

pub async fn get_journal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ResponseJson<ApiResponse<Vec<JournalEntry>>> {
    ResponseJson(state.flora().get_journal(id).await)
}

pub async fn add_journal_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CreateJournalEntry>,
) -> Result<ResponseJson<ApiResponse<JournalEntry>>, ApiError> {
    respond(state.flora().add_journal_entry(id, payload).await, || {
        format!("plant {id} not found")
    })
}

pub fn router(_state: &AppState) -> Router<AppState> {
    Router::new().nest(
        "/plants",
        Router::new()
            .route("/", get(get_plants).post(create_plant))
            .route("/tags", get(get_tags))
            .route("/{id}", put(update_plant).delete(delete_plant))
            .route("/{id}/water", post(water_plant))
            .route("/{id}/journal", get(get_journal).post(add_journal_entry)),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::test_support::{send, test_state};

    #[tokio::test]
    async fn list_and_filter_by_tag() {
        let state = test_state();
        let (status, body) = send(&state, "GET", "/api/plants", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 4);
        assert_eq!(body["data"][0]["waterDays"], 2);

        let (_, body) = send(&state, "GET", "/api/plants?tag=Indoor", None).await;
        let nicknames: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["nickname"].as_str().unwrap())
            .collect();
        assert_eq!(nicknames, vec!["Monty", "Patty"]);

        let (_, body) = send(&state, "GET", "/api/plants?tag=All", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn add_update_delete_round_trip() {
        let state = test_state();
        let (status, body) = send(
            &state,
            "POST",
            "/api/plants",
            Some(json!({ "name": "Boston Fern", "nickname": "Fernie", "light": "medium" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], 5);
        assert_eq!(body["data"]["light"], "ok");
        assert_eq!(body["data"]["location"], "Unknown");

        let (status, body) = send(
            &state,
            "PUT",
            "/api/plants/5",
            Some(json!({ "name": "Boston Fern", "nickname": "Fern", "location": "Porch" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["nickname"], "Fern");
        assert_eq!(body["data"]["location"], "Porch");

        let (status, _) = send(&state, "DELETE", "/api/plants/5", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&state, "DELETE", "/api/plants/5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "plant 5 not found");
    }

    #[tokio::test]
    async fn missing_names_are_rejected() {
        let state = test_state();
        let (status, body) = send(
            &state,
            "POST",
            "/api/plants",
            Some(json!({ "name": "Fern", "nickname": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "nickname and name are required");

        // blank names win over an unknown id
        let (status, _) = send(
            &state,
            "PUT",
            "/api/plants/99",
            Some(json!({ "name": "", "nickname": "Fern" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&state, "GET", "/api/plants", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn water_known_and_unknown() {
        let state = test_state();
        let (status, body) = send(&state, "POST", "/api/plants/3/water", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["waterDays"], 7);

        let (status, body) = send(&state, "POST", "/api/plants/42/water", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "plant 42 not found");
    }

    #[tokio::test]
    async fn journal_routes() {
        let state = test_state();
        let (_, body) = send(&state, "GET", "/api/plants/1/journal", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = send(
            &state,
            "POST",
            "/api/plants/1/journal",
            Some(json!({ "note": "Repotted", "growth": "+2cm", "date": "2025-10-12" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], 3);
        assert_eq!(body["data"]["plantId"], 1);

        let (status, _) = send(
            &state,
            "POST",
            "/api/plants/1/journal",
            Some(json!({ "note": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &state,
            "POST",
            "/api/plants/99/journal",
            Some(json!({ "note": "Lost" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_with_names_only_keeps_care_fields() {
        let state = test_state();
        let (status, body) = send(
            &state,
            "PUT",
            "/api/plants/4",
            Some(json!({ "name": "Fiddle Leaf Fig", "nickname": "Figgy" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["light"], "high");
        assert_eq!(body["data"]["waterDays"], 4);
        assert_eq!(body["data"]["tags"], json!(["Fussy", "Indoor Tree"]));
    }

    #[tokio::test]
    async fn tags_are_distinct() {
        let (_, body) = send(&test_state(), "GET", "/api/plants/tags", None).await;
        let tags = body["data"].as_array().unwrap();
        assert_eq!(tags.iter().filter(|t| *t == "Indoor").count(), 1);
    }
}
