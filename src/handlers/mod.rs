//! JSON API over the content catalog.

pub mod catalog;
pub mod progress;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
  Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::content::ContentError;
use crate::state::AppState;

pub use catalog::*;
pub use progress::*;

#[derive(Debug, Serialize)]
struct ErrorBody {
  error: String,
}

/// Handler failure rendered as a JSON error body
#[derive(Debug)]
pub enum ApiError {
  /// What was looked up, e.g. "Path"
  NotFound(&'static str),
  Internal(String),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error) = match self {
      ApiError::NotFound(what) => (
        StatusCode::NOT_FOUND,
        ContentError::NotFound(what.to_string()).to_string(),
      ),
      ApiError::Internal(message) => {
        tracing::error!("Request failed: {}", message);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
      }
    };
    (status, Json(ErrorBody { error })).into_response()
  }
}

impl From<crate::progress::ProgressError> for ApiError {
  fn from(e: crate::progress::ProgressError) -> Self {
    ApiError::Internal(e.to_string())
  }
}

pub async fn health() -> &'static str {
  "ok"
}

/// All routes, with request tracing.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/api/paths", get(catalog::list_paths))
    .route("/api/paths/{path}", get(catalog::get_path))
    .route("/api/paths/{path}/lessons", get(catalog::list_lessons))
    .route("/api/paths/{path}/lessons/{lesson}", get(catalog::get_lesson))
    .route("/api/lesson-keys", get(catalog::lesson_keys))
    .route("/api/users/{user}/paths/{path}/progress", get(progress::path_progress))
    .route(
      "/api/users/{user}/paths/{path}/lessons/{lesson}/completion",
      get(progress::lesson_completion).put(progress::set_lesson_completion),
    )
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
