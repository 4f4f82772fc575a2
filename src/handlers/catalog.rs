use axum::{
  extract::{Path, State},
  Json,
};

use super::ApiError;
use crate::content::{LearningPath, Lesson, LessonContent, LessonKey};
use crate::state::AppState;

pub async fn list_paths(State(state): State<AppState>) -> Json<Vec<LearningPath>> {
  Json(state.loader.list_paths())
}

pub async fn get_path(
  State(state): State<AppState>,
  Path(path): Path<String>,
) -> Result<Json<LearningPath>, ApiError> {
  state
    .loader
    .get_path_metadata(&path)
    .map(Json)
    .ok_or(ApiError::NotFound("Path"))
}

pub async fn list_lessons(
  State(state): State<AppState>,
  Path(path): Path<String>,
) -> Result<Json<Vec<Lesson>>, ApiError> {
  state
    .loader
    .list_lessons(&path)
    .map(Json)
    .ok_or(ApiError::NotFound("Path"))
}

pub async fn get_lesson(
  State(state): State<AppState>,
  Path((path, lesson)): Path<(String, String)>,
) -> Result<Json<LessonContent>, ApiError> {
  state
    .loader
    .get_lesson_content(&path, &lesson)
    .map(Json)
    .ok_or(ApiError::NotFound("Lesson"))
}

pub async fn lesson_keys(State(state): State<AppState>) -> Json<Vec<LessonKey>> {
  Json(state.loader.list_all_lesson_keys())
}
