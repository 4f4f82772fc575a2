//! Content catalog loader.
//!
//! Every call re-reads storage; nothing is cached between calls. Malformed
//! paths and lessons are logged and left out so one bad file never takes a
//! whole listing down. Direct lookups answer `None` for anything missing.

use std::path::{Path, PathBuf};

use super::model::{
    LearningPath, Lesson, LessonContent, LessonKey, MetadataField, MetadataRecord, MetadataSource,
};
use super::slug::{is_kebab_case, lesson_file_name};
use super::storage::{ContentStorage, FsStorage};
use super::walk::{ContentTree, IssueSink, LogSink};
use super::{ContentError, SlugOwner, PATH_METADATA_FILE};
use crate::logging::LogOnError;

const PATH_REQUIRED: [MetadataField; 3] = [
    MetadataField::Title,
    MetadataField::Description,
    MetadataField::Order,
];

const LESSON_REQUIRED: [MetadataField; 2] = [MetadataField::Title, MetadataField::Order];

/// Read-side access to a content tree.
#[derive(Debug, Clone)]
pub struct ContentLoader<S = FsStorage> {
    storage: S,
    root: PathBuf,
}

impl ContentLoader<FsStorage> {
    /// Loader over a content root on the local filesystem.
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(FsStorage, root)
    }
}

impl<S: ContentStorage> ContentLoader<S> {
    pub fn new(storage: S, root: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            root: root.into(),
        }
    }

    pub fn content_root(&self) -> &Path {
        &self.root
    }

    fn tree(&self) -> ContentTree<'_, S> {
        ContentTree::new(&self.storage, &self.root)
    }

    /// All loadable paths, ascending by order.
    pub fn list_paths(&self) -> Vec<LearningPath> {
        let tree = self.tree();
        let slugs = match tree.path_slugs() {
            Ok(slugs) => slugs,
            Err(e) => {
                tracing::error!(
                    "Error loading learning paths from {}: {}",
                    tree.learning_paths_dir().display(),
                    e
                );
                return Vec::new();
            }
        };

        let mut sink = LogSink;
        let mut paths = Vec::with_capacity(slugs.len());
        for slug in &slugs {
            if !is_kebab_case(slug) {
                sink.report(slug, ContentError::SlugFormat(SlugOwner::Path));
                continue;
            }
            if let Some(path) = load_path(&tree, slug, &mut sink) {
                paths.push(path);
            }
        }

        paths.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.slug.cmp(&b.slug)));
        paths
    }

    /// Metadata for one path, or `None` if it is absent or malformed.
    pub fn get_path_metadata(&self, path_slug: &str) -> Option<LearningPath> {
        if !is_kebab_case(path_slug) {
            return None;
        }
        let tree = self.tree();
        if !tree.has_path_dir(path_slug) {
            return None;
        }
        load_path(&tree, path_slug, &mut LogSink)
    }

    /// Lessons of a path, ascending by order. `None` if the path directory
    /// does not exist; lessons without a title or order are skipped.
    pub fn list_lessons(&self, path_slug: &str) -> Option<Vec<Lesson>> {
        if !is_kebab_case(path_slug) {
            return None;
        }
        let tree = self.tree();
        if !tree.has_path_dir(path_slug) {
            return None;
        }

        let listing = tree
            .scan_path(path_slug)
            .log_warn(&format!("Failed to list lessons for {}", path_slug))?;

        let mut sink = LogSink;
        let mut lessons = Vec::with_capacity(listing.lesson_files.len());
        for file in &listing.lesson_files {
            let location = format!("{}/{}", path_slug, file.file_name);
            if !is_kebab_case(&file.slug) {
                sink.report(&location, ContentError::SlugFormat(SlugOwner::Lesson));
                continue;
            }
            let Some(doc) = tree.read_lesson(path_slug, &file.file_name, &mut sink) else {
                continue;
            };
            if let Some(lesson) = require_lesson(doc.record, path_slug, &file.slug, &location, &mut sink)
            {
                lessons.push(lesson);
            }
        }

        lessons.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| a.lesson_slug.cmp(&b.lesson_slug))
        });
        Some(lessons)
    }

    /// One lesson with its body, or `None` if it is absent or lacks a title or order.
    pub fn get_lesson_content(&self, path_slug: &str, lesson_slug: &str) -> Option<LessonContent> {
        if !is_kebab_case(path_slug) || !is_kebab_case(lesson_slug) {
            return None;
        }
        let tree = self.tree();
        let file_name = lesson_file_name(lesson_slug);
        if !self.storage.exists(&tree.path_dir(path_slug).join(&file_name)) {
            tracing::debug!("Lesson not found: {}/{}", path_slug, lesson_slug);
            return None;
        }

        let mut sink = LogSink;
        let doc = tree.read_lesson(path_slug, &file_name, &mut sink)?;
        let location = format!("{}/{}", path_slug, file_name);
        let lesson = require_lesson(doc.record, path_slug, lesson_slug, &location, &mut sink)?;
        Some(LessonContent {
            lesson,
            body: doc.body,
        })
    }

    /// Every lesson file under every path, sorted. Metadata is not read.
    pub fn list_all_lesson_keys(&self) -> Vec<LessonKey> {
        let tree = self.tree();
        let slugs = tree
            .path_slugs()
            .log_warn_default("Failed to list learning paths");

        let mut keys = Vec::new();
        for path_slug in slugs.iter().filter(|s| is_kebab_case(s)) {
            let Some(listing) = tree
                .scan_path(path_slug)
                .log_warn(&format!("Failed to list lessons for {}", path_slug))
            else {
                continue;
            };
            keys.extend(
                listing
                    .lesson_files
                    .into_iter()
                    .filter(|file| is_kebab_case(&file.slug))
                    .map(|file| LessonKey {
                        path_slug: path_slug.clone(),
                        lesson_slug: file.slug,
                    }),
            );
        }
        keys.sort();
        keys
    }
}

fn load_path<S: ContentStorage + ?Sized>(
    tree: &ContentTree<'_, S>,
    path_slug: &str,
    sink: &mut dyn IssueSink,
) -> Option<LearningPath> {
    let record = tree.read_path_metadata(path_slug, sink)?;
    let missing = record.missing(&PATH_REQUIRED, MetadataSource::PathMetadata);
    if !missing.is_empty() {
        let location = format!("{}/{}", path_slug, PATH_METADATA_FILE);
        for error in missing {
            sink.report(&location, error);
        }
        return None;
    }
    let metadata = record.into_path_metadata()?;

    let lesson_count = tree
        .scan_path(path_slug)
        .log_warn(&format!("Failed to count lessons for {}", path_slug))?
        .lesson_files
        .len();

    Some(LearningPath::new(path_slug, metadata, lesson_count))
}

fn require_lesson(
    record: MetadataRecord,
    path_slug: &str,
    lesson_slug: &str,
    location: &str,
    sink: &mut dyn IssueSink,
) -> Option<Lesson> {
    let missing = record.missing(&LESSON_REQUIRED, MetadataSource::FrontMatter);
    if !missing.is_empty() {
        for error in missing {
            sink.report(location, error);
        }
        return None;
    }
    record.into_lesson(path_slug, lesson_slug)
}
