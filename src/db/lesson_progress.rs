//! Per-user lesson completion records.
//!
//! Lesson ids have the form `path-slug/lesson-slug`.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result};

/// Whether the user has marked the lesson completed
pub fn is_lesson_completed(conn: &Connection, user_id: &str, lesson_id: &str) -> Result<bool> {
    let completed: Option<bool> = conn
        .query_row(
            "SELECT completed FROM lesson_progress WHERE user_id = ?1 AND lesson_id = ?2",
            params![user_id, lesson_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(completed.unwrap_or(false))
}

/// Insert or update a completion record.
///
/// `completed_at` is stamped when completing and cleared otherwise;
/// `updated_at` is always refreshed.
pub fn set_lesson_completed(
    conn: &Connection,
    user_id: &str,
    lesson_id: &str,
    completed: bool,
) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    let completed_at = completed.then(|| now.clone());
    conn.execute(
        "INSERT INTO lesson_progress (user_id, lesson_id, completed, completed_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(user_id, lesson_id) DO UPDATE SET
           completed = excluded.completed,
           completed_at = excluded.completed_at,
           updated_at = excluded.updated_at",
        params![user_id, lesson_id, completed, completed_at, now],
    )?;
    Ok(())
}

/// Completed lesson ids inside one path, sorted
pub fn completed_lessons_for_path(
    conn: &Connection,
    user_id: &str,
    path_slug: &str,
) -> Result<Vec<String>> {
    let prefix = format!("{}/", path_slug);
    let mut stmt = conn.prepare(
        "SELECT lesson_id FROM lesson_progress
         WHERE user_id = ?1 AND completed = 1 AND substr(lesson_id, 1, length(?2)) = ?2
         ORDER BY lesson_id",
    )?;
    let ids = stmt
        .query_map(params![user_id, prefix], |row| row.get(0))?
        .collect::<Result<Vec<String>>>()?;
    Ok(ids)
}
