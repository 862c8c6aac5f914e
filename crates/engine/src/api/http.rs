//! HTTP routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use pathsheet_domain::catalog::{
    specializations_for_class, Material, Ritual, Rune, Specialization, MATERIALS, RITUALS, RUNES,
};
use pathsheet_domain::ruleset::FeatData;
use pathsheet_domain::{Character, CharacterId, ChoiceUpdate, DomainError, FeatCategory};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::app::App;
use crate::use_cases::character_sheet::{
    CharacterSheetError, CharacterSummary, DailyUseResult, SheetResult,
};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/characters",
            get(list_characters).post(create_character),
        )
        .route(
            "/api/characters/{id}",
            get(get_character).delete(delete_character),
        )
        .route("/api/characters/{id}/choices", patch(apply_choices))
        .route("/api/characters/{id}/recalculate", post(recalculate))
        .route("/api/characters/{id}/feats/eligible", get(eligible_feats))
        .route("/api/characters/{id}/daily/{feat_id}", post(use_daily_ability))
        .route("/api/characters/{id}/rest", post(daily_preparations))
        .route("/api/catalog/runes", get(list_runes))
        .route("/api/catalog/materials", get(list_materials))
        .route(
            "/api/catalog/specializations/{class_id}",
            get(list_specializations),
        )
        .route("/api/catalog/rituals", get(list_rituals))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Characters
// =============================================================================

#[derive(Debug, Deserialize)]
struct CreateCharacterRequest {
    name: String,
    #[serde(default)]
    level: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct ApplyChoicesRequest {
    updates: Vec<ChoiceUpdate>,
}

#[derive(Debug, Deserialize)]
struct EligibleFeatsQuery {
    #[serde(default)]
    category: Option<FeatCategory>,
}

async fn list_characters(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<CharacterSummary>>, ApiError> {
    let list = app.use_cases.character_sheet.list_characters().await?;
    Ok(Json(list))
}

async fn create_character(
    State(app): State<Arc<App>>,
    Json(body): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<SheetResult>), ApiError> {
    let sheet = app
        .use_cases
        .character_sheet
        .create_character(body.name, body.level)
        .await?;
    Ok((StatusCode::CREATED, Json(sheet)))
}

async fn get_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SheetResult>, ApiError> {
    let sheet = app
        .use_cases
        .character_sheet
        .get_sheet(CharacterId::from_uuid(id))
        .await?;
    Ok(Json(sheet))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .character_sheet
        .delete_character(CharacterId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_choices(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(body): Json<ApplyChoicesRequest>,
) -> Result<Json<SheetResult>, ApiError> {
    let sheet = app
        .use_cases
        .character_sheet
        .apply_choices(CharacterId::from_uuid(id), body.updates)
        .await?;
    Ok(Json(sheet))
}

async fn recalculate(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SheetResult>, ApiError> {
    let sheet = app
        .use_cases
        .character_sheet
        .recalculate(CharacterId::from_uuid(id))
        .await?;
    Ok(Json(sheet))
}

async fn eligible_feats(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Query(query): Query<EligibleFeatsQuery>,
) -> Result<Json<Vec<FeatData>>, ApiError> {
    let feats = app
        .use_cases
        .character_sheet
        .eligible_feats(CharacterId::from_uuid(id), query.category)
        .await?;
    Ok(Json(feats))
}

async fn use_daily_ability(
    State(app): State<Arc<App>>,
    Path((id, feat_id)): Path<(Uuid, String)>,
) -> Result<Json<DailyUseResult>, ApiError> {
    let result = app
        .use_cases
        .character_sheet
        .use_daily_ability(CharacterId::from_uuid(id), &feat_id)
        .await?;
    Ok(Json(result))
}

async fn daily_preparations(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Character>, ApiError> {
    let character = app
        .use_cases
        .character_sheet
        .daily_preparations(CharacterId::from_uuid(id))
        .await?;
    Ok(Json(character))
}

// =============================================================================
// Catalog
// =============================================================================

async fn list_runes() -> Json<&'static [Rune]> {
    Json(RUNES)
}

async fn list_materials() -> Json<&'static [Material]> {
    Json(MATERIALS)
}

async fn list_specializations(
    State(app): State<Arc<App>>,
    Path(class_id): Path<String>,
) -> Result<Json<Vec<&'static Specialization>>, ApiError> {
    if app.ruleset.class(&class_id).is_none() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(specializations_for_class(&class_id)))
}

async fn list_rituals() -> Json<&'static [Ritual]> {
    Json(RITUALS)
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<CharacterSheetError> for ApiError {
    fn from(e: CharacterSheetError) -> Self {
        match e {
            CharacterSheetError::CharacterNotFound(_) => ApiError::NotFound,
            CharacterSheetError::FeatNotTaken(_) | CharacterSheetError::NotDailyLimited(_) => {
                ApiError::BadRequest(e.to_string())
            }
            CharacterSheetError::Domain(DomainError::Exhausted { .. }) => {
                ApiError::Conflict(e.to_string())
            }
            CharacterSheetError::Domain(domain) => ApiError::BadRequest(domain.to_string()),
            CharacterSheetError::Repo(repo) => ApiError::Internal(repo.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use chrono::{TimeZone, Utc};
    use pathsheet_domain::Ruleset;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::persistence::JsonCharacterRepository;

    async fn router(dir: &std::path::Path) -> Router {
        let repo = JsonCharacterRepository::new(dir).await.unwrap();
        let clock = FixedClock(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        let app = App::new(Arc::new(repo), Arc::new(clock), Arc::new(Ruleset::core()));
        routes().with_state(Arc::new(app))
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create(router: &Router, name: &str) -> String {
        let (status, body) = send(
            router,
            Method::POST,
            "/api/characters",
            Some(json!({ "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["character"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let router = router(dir.path()).await;
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn build_a_fighter_over_http() {
        let dir = tempfile::tempdir().unwrap();
        let router = router(dir.path()).await;
        let id = create(&router, "Valeros").await;

        let (status, body) = send(
            &router,
            Method::PATCH,
            &format!("/api/characters/{id}/choices"),
            Some(json!({
                "updates": [
                    { "type": "set_ancestry", "ancestry_id": "human" },
                    { "type": "set_class", "class_id": "fighter" }
                ]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["character"]["derived"]["hitPoints"], 18);

        let (status, list) = send(&router, Method::GET, "/api/characters", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list[0]["classId"], "fighter");
    }

    #[tokio::test]
    async fn rejected_choice_is_a_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let router = router(dir.path()).await;
        let id = create(&router, "Valeros").await;

        let (status, _) = send(
            &router,
            Method::PATCH,
            &format!("/api/characters/{id}/choices"),
            Some(json!({ "updates": [{ "type": "set_class", "class_id": "gunslinger" }] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn daily_use_runs_out_until_rest() {
        let dir = tempfile::tempdir().unwrap();
        let router = router(dir.path()).await;
        let id = create(&router, "Lem").await;
        let (status, _) = send(
            &router,
            Method::PATCH,
            &format!("/api/characters/{id}/choices"),
            Some(json!({
                "updates": [
                    { "type": "set_ancestry", "ancestry_id": "halfling" },
                    { "type": "add_feat", "feat": { "featId": "halfling-luck", "level": 1 } }
                ]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let uri = format!("/api/characters/{id}/daily/halfling-luck");
        let (status, body) = send(&router, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining"], 0);

        let (status, _) = send(&router, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &router,
            Method::POST,
            &format!("/api/characters/{id}/rest"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&router, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn deleted_character_is_gone() {
        let dir = tempfile::tempdir().unwrap();
        let router = router(dir.path()).await;
        let id = create(&router, "Kyra").await;
        let uri = format!("/api/characters/{id}");

        let (status, _) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn eligible_feats_filter_by_category() {
        let dir = tempfile::tempdir().unwrap();
        let router = router(dir.path()).await;
        let id = create(&router, "Seoni").await;

        let (status, body) = send(
            &router,
            Method::GET,
            &format!("/api/characters/{id}/feats/eligible?category=general"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let feats = body.as_array().unwrap();
        assert!(!feats.is_empty());
        assert!(feats.iter().all(|f| f["category"] == "general"));
    }

    #[tokio::test]
    async fn catalog_endpoints_serve_static_tables() {
        let dir = tempfile::tempdir().unwrap();
        let router = router(dir.path()).await;

        let (status, runes) = send(&router, Method::GET, "/api/catalog/runes", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(runes.as_array().unwrap().len(), RUNES.len());

        let (status, specs) = send(
            &router,
            Method::GET,
            "/api/catalog/specializations/sorcerer",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(specs
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s["id"] == "imperial"));

        let (status, _) = send(
            &router,
            Method::GET,
            "/api/catalog/specializations/gunslinger",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
