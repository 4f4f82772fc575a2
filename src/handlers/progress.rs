//! Lesson completion endpoints.
//!
//! The `{user}` segment is an opaque id supplied by whatever sits in front of
//! this service; no authentication happens here.

use axum::{
  extract::{Path, State},
  Json,
};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::progress::{self, PathProgress};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompletionUpdate {
  pub completed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCompletion {
  pub lesson_id: String,
  pub completed: bool,
}

pub async fn path_progress(
  State(state): State<AppState>,
  Path((user, path)): Path<(String, String)>,
) -> Result<Json<PathProgress>, ApiError> {
  let lessons = state
    .loader
    .list_lessons(&path)
    .ok_or(ApiError::NotFound("Path"))?;
  Ok(Json(progress::path_progress(
    state.progress.as_ref(),
    &user,
    &path,
    lessons.len(),
  )))
}

pub async fn lesson_completion(
  State(state): State<AppState>,
  Path((user, path, lesson)): Path<(String, String, String)>,
) -> Result<Json<LessonCompletion>, ApiError> {
  let lesson_id = existing_lesson(&state, &path, &lesson)?;
  let completed = state.progress.is_lesson_completed(&user, &lesson_id)?;
  Ok(Json(LessonCompletion { lesson_id, completed }))
}

pub async fn set_lesson_completion(
  State(state): State<AppState>,
  Path((user, path, lesson)): Path<(String, String, String)>,
  Json(update): Json<CompletionUpdate>,
) -> Result<Json<LessonCompletion>, ApiError> {
  let lesson_id = existing_lesson(&state, &path, &lesson)?;
  state
    .progress
    .set_lesson_completed(&user, &lesson_id, update.completed)?;
  Ok(Json(LessonCompletion {
    lesson_id,
    completed: update.completed,
  }))
}

/// Id of a lesson the catalog knows about
fn existing_lesson(state: &AppState, path: &str, lesson: &str) -> Result<String, ApiError> {
  state
    .loader
    .get_lesson_content(path, lesson)
    .map(|content| content.lesson.id)
    .ok_or(ApiError::NotFound("Lesson"))
}
