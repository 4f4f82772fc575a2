//! Slug rules for path directories and lesson files.

use super::LESSON_EXTENSION;

/// Check `^[a-z0-9]+(-[a-z0-9]+)*$` without pulling in a regex engine.
pub fn is_kebab_case(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    if value.starts_with('-') || value.ends_with('-') {
        return false;
    }
    let mut prev_dash = false;
    for ch in value.chars() {
        let is_valid = ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-';
        if !is_valid {
            return false;
        }
        if ch == '-' {
            if prev_dash {
                return false;
            }
            prev_dash = true;
        } else {
            prev_dash = false;
        }
    }
    true
}

/// Lesson slug for a file name, or `None` if the name is not a lesson file.
///
/// `intro.md` → `intro`. Any `*.md` file is a lesson, so `.md` yields an
/// empty slug; the slug itself is not checked for kebab-case here.
pub fn lesson_slug_from_file(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(LESSON_EXTENSION)?.strip_suffix('.')
}

/// File name of the lesson with the given slug.
pub fn lesson_file_name(lesson_slug: &str) -> String {
    format!("{}.{}", lesson_slug, LESSON_EXTENSION)
}

/// Composite lesson identifier used as the progress-tracking key.
pub fn lesson_id(path_slug: &str, lesson_slug: &str) -> String {
    format!("{}/{}", path_slug, lesson_slug)
}
