//! Storage access for the content tree.

use std::fs;
use std::io;
use std::path::Path;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
    /// The on-disk name is not UTF-8; `name` is a lossy rendering of it
    pub invalid_name: bool,
}

impl DirEntry {
    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
            invalid_name: false,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
            invalid_name: false,
        }
    }
}

/// Read-only view of wherever the content tree lives.
///
/// Listing order is unspecified; callers sort.
pub trait ContentStorage {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;

    fn read_to_string(&self, file: &Path) -> io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}

/// Local filesystem storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl ContentStorage for FsStorage {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let (name, invalid_name) = match file_name.to_str() {
                Some(name) => (name.to_string(), false),
                None => {
                    tracing::warn!("Non UTF-8 entry in {}", dir.display());
                    (file_name.to_string_lossy().into_owned(), true)
                }
            };
            // Follow symlinks so a linked path directory counts as a directory
            let is_dir = entry.path().is_dir();
            entries.push(DirEntry {
                name,
                is_dir,
                invalid_name,
            });
        }
        Ok(entries)
    }

    fn read_to_string(&self, file: &Path) -> io::Result<String> {
        fs::read_to_string(file)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
