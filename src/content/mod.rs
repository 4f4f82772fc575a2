//! Learning-path content catalog.
//!
//! This module provides:
//! - **Loader**: on-demand lookups over the content tree (paths, lessons, bodies)
//! - **Validator**: an exhaustive schema check of the same tree for CI
//!
//! # Content Layout
//!
//! ```text
//! <content-root>/
//!   learning-paths/
//!     <path-slug>/
//!       path-metadata.json    {"title", "description", "order"}
//!       <lesson-slug>.md      YAML front-matter + markdown body
//! ```
//!
//! # Failure Policies
//!
//! Both components walk the tree through [`walk::ContentTree`] and report
//! problems into an [`walk::IssueSink`]:
//! - the loader logs each problem and drops the offending path or lesson
//! - the validator collects every problem into a [`ValidationReport`]

pub mod front_matter;
pub mod loader;
pub mod model;
pub mod slug;
pub mod storage;
pub mod validator;
pub mod walk;

pub use loader::ContentLoader;
pub use model::{LearningPath, Lesson, LessonContent, LessonKey, PathMetadata};
pub use storage::{ContentStorage, DirEntry, FsStorage};
pub use validator::{ContentValidator, ValidationIssue, ValidationReport};

use serde::Serialize;

/// The only folder allowed at the content root.
pub const LEARNING_PATHS_DIR: &str = "learning-paths";

/// Per-path metadata record.
pub const PATH_METADATA_FILE: &str = "path-metadata.json";

/// Extension of lesson files (without the dot).
pub const LESSON_EXTENSION: &str = "md";

/// Coarse classification of a [`ContentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Unexpected file or directory in the content tree
    Structural,
    /// Path or lesson slug is not kebab-case
    SlugFormat,
    /// Metadata file or required field absent
    MissingMetadata,
    /// Metadata is not valid JSON / front-matter is malformed
    ParseFailure,
    /// Duplicate order among siblings
    OrderConflict,
    /// Order sequence is not contiguous from 1
    OrderGap,
    /// Lesson slug reused across paths
    DuplicateSlug,
    /// Requested path or lesson does not exist
    NotFound,
    /// Caught I/O fault
    Unexpected,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Structural => "structural",
            ErrorKind::SlugFormat => "slug_format",
            ErrorKind::MissingMetadata => "missing_metadata",
            ErrorKind::ParseFailure => "parse_failure",
            ErrorKind::OrderConflict => "order_conflict",
            ErrorKind::OrderGap => "order_gap",
            ErrorKind::DuplicateSlug => "duplicate_slug",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unexpected => "unexpected",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single content problem. The `Display` output is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("{0}")]
    Structural(String),

    #[error("{0} slug must be in kebab-case (lowercase letters, numbers, hyphens only)")]
    SlugFormat(SlugOwner),

    #[error("{0}")]
    MissingMetadata(String),

    #[error("{0}")]
    ParseFailure(String),

    #[error("Duplicate {} order {}{} (also used by {})", .scope.as_str(), .order, .scope.within_path(), .other)]
    OrderConflict {
        scope: SlugOwner,
        order: u32,
        other: String,
    },

    #[error("{} orders are not sequential{}. Expected order {}, but found {}. Orders should be 1, 2, 3, etc.", .scope, .scope.within_path(), .expected, .found)]
    OrderGap {
        scope: SlugOwner,
        expected: u32,
        found: u32,
    },

    #[error("Duplicate lesson slug '{}' found in paths: {}", .slug, .paths.join(", "))]
    DuplicateSlug { slug: String, paths: Vec<String> },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Unexpected error during validation: {0}")]
    Unexpected(String),
}

impl ContentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContentError::Structural(_) => ErrorKind::Structural,
            ContentError::SlugFormat(_) => ErrorKind::SlugFormat,
            ContentError::MissingMetadata(_) => ErrorKind::MissingMetadata,
            ContentError::ParseFailure(_) => ErrorKind::ParseFailure,
            ContentError::OrderConflict { .. } => ErrorKind::OrderConflict,
            ContentError::OrderGap { .. } => ErrorKind::OrderGap,
            ContentError::DuplicateSlug { .. } => ErrorKind::DuplicateSlug,
            ContentError::NotFound(_) => ErrorKind::NotFound,
            ContentError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

/// Whether a slug or order belongs to a learning path or a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugOwner {
    Path,
    Lesson,
}

impl SlugOwner {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlugOwner::Path => "path",
            SlugOwner::Lesson => "lesson",
        }
    }

    fn within_path(&self) -> &'static str {
        match self {
            SlugOwner::Path => "",
            SlugOwner::Lesson => " within path",
        }
    }
}

impl std::fmt::Display for SlugOwner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlugOwner::Path => write!(f, "Path"),
            SlugOwner::Lesson => write!(f, "Lesson"),
        }
    }
}
