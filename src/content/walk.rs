//! Tree traversal shared by the loader and the validator.
//!
//! Everything here reports problems into an [`IssueSink`] and keeps going.
//! What happens to a reported problem is the caller's policy.

use std::io;
use std::path::{Path, PathBuf};

use super::front_matter;
use super::model::MetadataRecord;
use super::slug::lesson_slug_from_file;
use super::storage::ContentStorage;
use super::{ContentError, LEARNING_PATHS_DIR, PATH_METADATA_FILE};

/// Receives content problems found while walking the tree.
pub trait IssueSink {
    fn report(&mut self, location: &str, error: ContentError);
}

/// Logs each problem at warn level and forgets it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl IssueSink for LogSink {
    fn report(&mut self, location: &str, error: ContentError) {
        tracing::warn!("Skipping content at {}: {}", location, error);
    }
}

/// A lesson file found in a path directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonFile {
    pub file_name: String,
    pub slug: String,
}

/// Classified contents of one path directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathListing {
    pub has_metadata: bool,
    /// Sorted by file name
    pub lesson_files: Vec<LessonFile>,
    /// Entries that are neither lessons nor the metadata file
    pub unexpected: Vec<String>,
}

/// Front-matter and body of a lesson file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDocument {
    pub record: MetadataRecord,
    pub body: String,
}

/// A content root seen through a storage backend.
pub struct ContentTree<'a, S: ContentStorage + ?Sized> {
    storage: &'a S,
    root: &'a Path,
}

impl<'a, S: ContentStorage + ?Sized> ContentTree<'a, S> {
    pub fn new(storage: &'a S, root: &'a Path) -> Self {
        Self { storage, root }
    }

    pub fn storage(&self) -> &S {
        self.storage
    }

    pub fn root(&self) -> &Path {
        self.root
    }

    pub fn learning_paths_dir(&self) -> PathBuf {
        self.root.join(LEARNING_PATHS_DIR)
    }

    pub fn path_dir(&self, path_slug: &str) -> PathBuf {
        self.learning_paths_dir().join(path_slug)
    }

    pub fn has_path_dir(&self, path_slug: &str) -> bool {
        self.storage.is_dir(&self.path_dir(path_slug))
    }

    /// Names of all directories under `learning-paths/`, sorted.
    pub fn path_slugs(&self) -> io::Result<Vec<String>> {
        let mut slugs: Vec<String> = self
            .storage
            .list_dir(&self.learning_paths_dir())?
            .into_iter()
            .filter(|entry| entry.is_dir && !entry.invalid_name)
            .map(|entry| entry.name)
            .collect();
        slugs.sort();
        Ok(slugs)
    }

    /// List and classify the entries of a path directory.
    pub fn scan_path(&self, path_slug: &str) -> io::Result<PathListing> {
        let mut entries = self.storage.list_dir(&self.path_dir(path_slug))?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut listing = PathListing::default();
        for entry in entries {
            if entry.is_dir || entry.invalid_name {
                listing.unexpected.push(entry.name);
                continue;
            }
            if entry.name == PATH_METADATA_FILE {
                listing.has_metadata = true;
                continue;
            }
            match lesson_slug_from_file(&entry.name) {
                Some(slug) => {
                    let slug = slug.to_string();
                    listing.lesson_files.push(LessonFile {
                        file_name: entry.name,
                        slug,
                    });
                }
                None => listing.unexpected.push(entry.name),
            }
        }
        Ok(listing)
    }

    /// Read and decode `path-metadata.json`.
    ///
    /// Reports a missing file against the path slug and a bad file against
    /// the metadata file. Field-level checks are left to the caller.
    pub fn read_path_metadata(
        &self,
        path_slug: &str,
        sink: &mut dyn IssueSink,
    ) -> Option<MetadataRecord> {
        let metadata_path = self.path_dir(path_slug).join(PATH_METADATA_FILE);
        if !self.storage.exists(&metadata_path) {
            sink.report(
                path_slug,
                ContentError::MissingMetadata(format!("Missing {} file", PATH_METADATA_FILE)),
            );
            return None;
        }

        let location = format!("{}/{}", path_slug, PATH_METADATA_FILE);
        let content = match self.storage.read_to_string(&metadata_path) {
            Ok(content) => content,
            Err(e) => {
                sink.report(
                    &location,
                    ContentError::ParseFailure(format!("Failed to read file: {}", e)),
                );
                return None;
            }
        };

        let decoded = serde_json::from_str::<serde_json::Value>(&content)
            .map_err(|e| ContentError::ParseFailure(format!("Invalid JSON format: {}", e)))
            .and_then(|value| MetadataRecord::from_value(&value));
        match decoded {
            Ok(record) => Some(record),
            Err(e) => {
                sink.report(&location, e);
                None
            }
        }
    }

    /// Read a lesson file and split its front-matter from the body.
    pub fn read_lesson(
        &self,
        path_slug: &str,
        file_name: &str,
        sink: &mut dyn IssueSink,
    ) -> Option<LessonDocument> {
        let location = format!("{}/{}", path_slug, file_name);
        let parsed = self
            .storage
            .read_to_string(&self.path_dir(path_slug).join(file_name))
            .map_err(|e| e.to_string())
            .and_then(|text| front_matter::parse(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(doc) => Some(LessonDocument {
                record: MetadataRecord::from_map(&doc.metadata),
                body: doc.body,
            }),
            Err(e) => {
                sink.report(
                    &location,
                    ContentError::ParseFailure(format!("Invalid frontmatter: {}", e)),
                );
                None
            }
        }
    }
}
