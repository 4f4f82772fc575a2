//! Test utilities for building content trees on disk.
//!
//! Every fixture lives in its own temporary directory and is removed when
//! dropped.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::content::{LEARNING_PATHS_DIR, PATH_METADATA_FILE};

/// A content root with an (initially empty) `learning-paths/` folder.
pub struct ContentFixture {
    /// Temporary directory (kept alive for the lifetime of the fixture)
    pub temp: TempDir,
}

impl ContentFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(LEARNING_PATHS_DIR)).unwrap();
        Self { temp }
    }

    /// Content root (parent of `learning-paths/`).
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn path_dir(&self, path_slug: &str) -> PathBuf {
        self.root().join(LEARNING_PATHS_DIR).join(path_slug)
    }

    /// Path directory with no files in it.
    pub fn empty_path(&self, path_slug: &str) {
        fs::create_dir_all(self.path_dir(path_slug)).unwrap();
    }

    /// Path directory with a complete `path-metadata.json`.
    pub fn path(&self, path_slug: &str, title: &str, order: u32) {
        let metadata = serde_json::json!({
            "title": title,
            "description": format!("About {}", title),
            "order": order,
        });
        self.path_metadata(path_slug, &metadata.to_string());
    }

    /// Path directory with arbitrary metadata text.
    pub fn path_metadata(&self, path_slug: &str, json: &str) {
        self.raw(path_slug, PATH_METADATA_FILE, json);
    }

    /// Lesson with title, description and order.
    pub fn lesson(&self, path_slug: &str, lesson_slug: &str, title: &str, order: u32) {
        let front_matter = format!(
            "title: {}\ndescription: Learn {}\norder: {}",
            title, title, order
        );
        self.lesson_with(path_slug, lesson_slug, &front_matter, &format!("# {}\n", title));
    }

    /// Lesson with arbitrary front-matter (without the delimiters) and body.
    pub fn lesson_with(&self, path_slug: &str, lesson_slug: &str, front_matter: &str, body: &str) {
        let text = format!("---\n{}\n---\n{}", front_matter, body);
        self.raw(path_slug, &format!("{}.md", lesson_slug), &text);
    }

    /// Any file inside a path directory (creates the directory).
    pub fn raw(&self, path_slug: &str, file_name: &str, content: &str) {
        let dir = self.path_dir(path_slug);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file_name), content).unwrap();
    }

    /// Directory nested inside a path directory.
    pub fn subdir(&self, path_slug: &str, name: &str) {
        fs::create_dir_all(self.path_dir(path_slug).join(name)).unwrap();
    }

    /// File directly under `learning-paths/`.
    pub fn learning_paths_file(&self, name: &str, content: &str) {
        fs::write(self.root().join(LEARNING_PATHS_DIR).join(name), content).unwrap();
    }

    /// File directly under the content root.
    pub fn root_file(&self, name: &str, content: &str) {
        fs::write(self.root().join(name), content).unwrap();
    }

    /// Directory directly under the content root.
    pub fn root_dir(&self, name: &str) {
        fs::create_dir_all(self.root().join(name)).unwrap();
    }
}
