//! Lesson completion tracking and per-path progress.

use serde::Serialize;

use crate::db::{self, DbLockError, DbPool};

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("{0}")]
    Lock(#[from] DbLockError),
}

pub type Result<T> = std::result::Result<T, ProgressError>;

/// Storage for per-user lesson completion.
pub trait ProgressStore {
    fn is_lesson_completed(&self, user_id: &str, lesson_id: &str) -> Result<bool>;

    fn set_lesson_completed(&self, user_id: &str, lesson_id: &str, completed: bool) -> Result<()>;

    /// Ids of completed lessons whose id starts with `path_slug/`.
    fn completed_lessons_for_path(&self, user_id: &str, path_slug: &str) -> Result<Vec<String>>;
}

/// [`ProgressStore`] backed by the `lesson_progress` table.
#[derive(Clone)]
pub struct SqliteProgressStore {
    pool: DbPool,
}

impl SqliteProgressStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ProgressStore for SqliteProgressStore {
    fn is_lesson_completed(&self, user_id: &str, lesson_id: &str) -> Result<bool> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::is_lesson_completed(&conn, user_id, lesson_id)?)
    }

    fn set_lesson_completed(&self, user_id: &str, lesson_id: &str, completed: bool) -> Result<()> {
        let conn = db::try_lock(&self.pool)?;
        db::set_lesson_completed(&conn, user_id, lesson_id, completed)?;
        tracing::debug!(
            "Lesson {} marked {} for {}",
            lesson_id,
            if completed { "completed" } else { "not completed" },
            user_id
        );
        Ok(())
    }

    fn completed_lessons_for_path(&self, user_id: &str, path_slug: &str) -> Result<Vec<String>> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::completed_lessons_for_path(&conn, user_id, path_slug)?)
    }
}

/// Completion summary for one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathProgress {
    pub path_slug: String,
    pub total_lessons: usize,
    pub completed_lessons: usize,
    /// 0-100, rounded half up
    pub completion_percentage: u32,
}

/// Summarize a user's progress through a path of `total_lessons` lessons.
///
/// A store failure is logged and counts as nothing completed.
pub fn path_progress<P: ProgressStore + ?Sized>(
    store: &P,
    user_id: &str,
    path_slug: &str,
    total_lessons: usize,
) -> PathProgress {
    let completed_lessons = match store.completed_lessons_for_path(user_id, path_slug) {
        Ok(ids) => ids.len(),
        Err(e) => {
            tracing::error!("Error getting progress for path {}: {}", path_slug, e);
            0
        }
    };

    PathProgress {
        path_slug: path_slug.to_string(),
        total_lessons,
        completed_lessons,
        completion_percentage: percentage(completed_lessons, total_lessons),
    }
}

fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((completed * 100 + total / 2) / total) as u32
}
