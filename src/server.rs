//! HTTP JSON server.
//!
//! Exposes the recommendation engine over a small JSON API. The catalog
//! and matrix are loaded once at startup into an immutable snapshot that
//! every handler shares through an `Arc`; no handler mutates it, so there
//! is no locking.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/courses` | All catalog course names, in row order |
//! | `POST` | `/recommend` | Recommendations for a course name |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "course_name must not be empty" } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404), `internal` (500).
//! A query with no confident match is not an error: it returns `200` with
//! an empty `recommendations` array and `"matched": null`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use course_recs_core::{InMemoryCatalog, RecommendError, Recommender};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::config::Config;
use crate::courses::course_names;
use crate::loader;
use crate::recommend::{recommend_courses, Overrides, RecommendResponse};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<Recommender<InMemoryCatalog>>,
}

impl AppState {
    pub fn new(engine: Recommender<InMemoryCatalog>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Starts the HTTP server.
///
/// Loads the data snapshot (fatal on failure), binds to `[server].bind`,
/// and serves until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let (catalog, _) = loader::load_catalog(&config.data)?;
    let engine = Recommender::new(catalog, config.recommend.params());
    let app = router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("listening on http://{}", config.server.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router with permissive CORS.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/courses", get(handle_courses))
        .route("/recommend", post(handle_recommend))
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

/// Map engine errors to HTTP statuses by their typed variant.
fn classify_error(err: anyhow::Error) -> AppError {
    match err.downcast_ref::<RecommendError>() {
        Some(RecommendError::UnknownExactName(_)) => not_found(err.to_string()),
        Some(RecommendError::InvalidParams(_)) => bad_request(err.to_string()),
        _ => internal(err.to_string()),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /courses ============

#[derive(Serialize)]
struct CoursesResponse {
    courses: Vec<String>,
}

async fn handle_courses(State(state): State<AppState>) -> Json<CoursesResponse> {
    Json(CoursesResponse {
        courses: course_names(state.engine.store(), None),
    })
}

// ============ POST /recommend ============

/// Request body for `POST /recommend`. Unset fields use the configured defaults.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub course_name: String,
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default)]
    pub min_match_confidence: Option<u32>,
    #[serde(default)]
    pub rating_weight: Option<f64>,
    /// Require an exact catalog name (no fuzzy matching).
    #[serde(default)]
    pub exact: bool,
}

async fn handle_recommend(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, AppError> {
    if req.course_name.trim().is_empty() {
        return Err(bad_request("course_name must not be empty"));
    }

    let overrides = Overrides {
        top_n: req.top_n,
        min_match_confidence: req.min_match_confidence,
        rating_weight: req.rating_weight,
        exact: req.exact,
        ..Default::default()
    };

    let response = recommend_courses(state.engine.as_ref(), &req.course_name, &overrides)
        .map_err(classify_error)?;

    debug!(
        results = response.recommendations.len(),
        "recommend {:?}",
        req.course_name
    );

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_unknown_exact_name() {
        let err = anyhow::Error::new(RecommendError::UnknownExactName("X".to_string()));
        let app = classify_error(err);
        assert_eq!(app.status, StatusCode::NOT_FOUND);
        assert_eq!(app.code, "not_found");
    }

    #[test]
    fn test_classify_invalid_params() {
        let err = anyhow::Error::new(RecommendError::InvalidParams("top_n".to_string()));
        assert_eq!(classify_error(err).status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_classify_other() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(classify_error(err).status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
