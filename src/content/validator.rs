//! Content validator.
//!
//! Walks the whole tree and collects every schema violation into one report.
//! Nothing short-circuits except an I/O failure while listing directories,
//! which is recorded under the `validation` location.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::PathBuf;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::model::{MetadataField, MetadataSource};
use super::slug::is_kebab_case;
use super::storage::{ContentStorage, FsStorage};
use super::walk::{ContentTree, IssueSink};
use super::{ContentError, ErrorKind, SlugOwner, LEARNING_PATHS_DIR, PATH_METADATA_FILE};

const ALL_FIELDS: [MetadataField; 3] = [
    MetadataField::Title,
    MetadataField::Description,
    MetadataField::Order,
];

/// Location used for faults that abort the walk.
pub const UNEXPECTED_LOCATION: &str = "validation";

/// Prefix for entries directly under the content root.
pub const ROOT_LOCATION: &str = "content";

/// Location used for cross-path order checks.
pub const PATHS_LOCATION: &str = "paths";

/// Location used for cross-path lesson slug checks.
pub const LESSONS_LOCATION: &str = "lessons";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Slug, `path/file`, or one of the summary locations
    pub location: String,
    pub error: ContentError,
}

impl ValidationIssue {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl Serialize for ValidationIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationIssue", 3)?;
        state.serialize_field("location", &self.location)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub success: bool,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of issues of one kind.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|issue| issue.kind() == kind).count()
    }

    /// Human-readable report: every issue, then a pass/fail line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if !self.errors.is_empty() {
            out.push_str("Errors:\n");
            for issue in &self.errors {
                out.push_str(&format!("   {}: {}\n", issue.location, issue.message()));
            }
            out.push('\n');
        }
        if self.success {
            out.push_str("All content validation checks passed!\n");
        } else {
            out.push_str(&format!(
                "Content validation failed with {} error(s)\n",
                self.errors.len()
            ));
        }
        out
    }
}

/// Collects every reported issue.
#[derive(Debug, Default)]
struct Diagnostics {
    errors: Vec<ValidationIssue>,
}

impl IssueSink for Diagnostics {
    fn report(&mut self, location: &str, error: ContentError) {
        self.errors.push(ValidationIssue {
            location: location.to_string(),
            error,
        });
    }
}

impl Diagnostics {
    fn into_report(self) -> ValidationReport {
        let success = self.errors.is_empty();
        ValidationReport {
            errors: self.errors,
            success,
        }
    }
}

struct ScannedLesson {
    location: String,
    file_name: String,
    slug: String,
    order: Option<u32>,
}

struct ScannedPath {
    slug: String,
    order: Option<u32>,
    lessons: Vec<ScannedLesson>,
}

/// Schema checker for a content root.
#[derive(Debug, Clone)]
pub struct ContentValidator<S = FsStorage> {
    storage: S,
    root: PathBuf,
}

impl ContentValidator<FsStorage> {
    pub fn from_dir(root: impl Into<PathBuf>) -> Self {
        Self::new(FsStorage, root)
    }
}

impl<S: ContentStorage> ContentValidator<S> {
    pub fn new(storage: S, root: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            root: root.into(),
        }
    }

    pub fn validate(&self) -> ValidationReport {
        tracing::info!("Starting content validation of {}", self.root.display());

        let mut diagnostics = Diagnostics::default();
        if let Err(e) = self.run(&mut diagnostics) {
            tracing::error!("Content validation aborted: {}", e);
            diagnostics.report(UNEXPECTED_LOCATION, ContentError::Unexpected(e.to_string()));
        }

        let report = diagnostics.into_report();
        tracing::info!("Content validation finished with {} error(s)", report.error_count());
        report
    }

    fn run(&self, diagnostics: &mut Diagnostics) -> io::Result<()> {
        let tree = ContentTree::new(&self.storage, &self.root);

        let Some(path_slugs) = check_structure(&tree, diagnostics)? else {
            return Ok(());
        };
        if path_slugs.is_empty() {
            diagnostics.report(
                LEARNING_PATHS_DIR,
                ContentError::Structural("No learning paths found in content directory".to_string()),
            );
            return Ok(());
        }

        let mut scanned = Vec::with_capacity(path_slugs.len());
        for slug in &path_slugs {
            scanned.push(check_path(&tree, slug, diagnostics)?);
        }

        check_path_orders(&scanned, diagnostics);
        for path in &scanned {
            check_lesson_orders(path, diagnostics);
        }
        check_duplicate_lesson_slugs(&scanned, diagnostics);
        Ok(())
    }
}

/// Content root and `learning-paths/` root checks.
///
/// Returns the sorted path directory names, or `None` when there is no
/// `learning-paths/` directory to descend into.
fn check_structure<S: ContentStorage + ?Sized>(
    tree: &ContentTree<'_, S>,
    diagnostics: &mut Diagnostics,
) -> io::Result<Option<Vec<String>>> {
    let mut root_entries = tree.storage().list_dir(tree.root())?;
    root_entries.sort_by(|a, b| a.name.cmp(&b.name));
    for entry in &root_entries {
        if entry.name != LEARNING_PATHS_DIR {
            diagnostics.report(
                &format!("{}/{}", ROOT_LOCATION, entry.name),
                ContentError::Structural(format!(
                    "Unexpected item in content directory. Only '{}' directory should exist.",
                    LEARNING_PATHS_DIR
                )),
            );
        }
    }

    if !tree.storage().is_dir(&tree.learning_paths_dir()) {
        diagnostics.report(
            LEARNING_PATHS_DIR,
            ContentError::Structural(format!("Missing '{}' directory", LEARNING_PATHS_DIR)),
        );
        return Ok(None);
    }

    let mut entries = tree.storage().list_dir(&tree.learning_paths_dir())?;
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut slugs = Vec::new();
    for entry in entries {
        if entry.invalid_name {
            diagnostics.report(
                &format!("{}/{}", LEARNING_PATHS_DIR, entry.name),
                ContentError::Structural("Entry name is not valid UTF-8".to_string()),
            );
        } else if entry.is_dir {
            slugs.push(entry.name);
        } else {
            diagnostics.report(
                &format!("{}/{}", LEARNING_PATHS_DIR, entry.name),
                ContentError::Structural(format!(
                    "Files should not exist in the root of {} directory. Only path directories are allowed.",
                    LEARNING_PATHS_DIR
                )),
            );
        }
    }
    Ok(Some(slugs))
}

/// Per-directory checks: slug, metadata, lessons, stray files.
fn check_path<S: ContentStorage + ?Sized>(
    tree: &ContentTree<'_, S>,
    slug: &str,
    diagnostics: &mut Diagnostics,
) -> io::Result<ScannedPath> {
    if !is_kebab_case(slug) {
        diagnostics.report(slug, ContentError::SlugFormat(SlugOwner::Path));
    }

    let listing = tree.scan_path(slug)?;

    let order = tree.read_path_metadata(slug, diagnostics).and_then(|record| {
        let location = format!("{}/{}", slug, PATH_METADATA_FILE);
        for error in record.missing(&ALL_FIELDS, MetadataSource::PathMetadata) {
            diagnostics.report(&location, error);
        }
        record.order
    });

    let mut lessons = Vec::with_capacity(listing.lesson_files.len());
    for file in listing.lesson_files {
        let location = format!("{}/{}", slug, file.file_name);
        if !is_kebab_case(&file.slug) {
            diagnostics.report(&location, ContentError::SlugFormat(SlugOwner::Lesson));
        }

        let order = tree
            .read_lesson(slug, &file.file_name, diagnostics)
            .and_then(|doc| {
                for error in doc.record.missing(&ALL_FIELDS, MetadataSource::FrontMatter) {
                    diagnostics.report(&location, error);
                }
                doc.record.order
            });

        lessons.push(ScannedLesson {
            location,
            file_name: file.file_name,
            slug: file.slug,
            order,
        });
    }

    for name in &listing.unexpected {
        diagnostics.report(
            &format!("{}/{}", slug, name),
            ContentError::Structural(format!(
                "Unexpected file in path directory (only .md lesson files and {} are expected)",
                PATH_METADATA_FILE
            )),
        );
    }

    Ok(ScannedPath {
        slug: slug.to_string(),
        order,
        lessons,
    })
}

fn check_path_orders(paths: &[ScannedPath], diagnostics: &mut Diagnostics) {
    let entries: Vec<OrderEntry<'_>> = paths
        .iter()
        .filter_map(|path| {
            path.order.map(|order| OrderEntry {
                location: &path.slug,
                name: &path.slug,
                order,
            })
        })
        .collect();
    check_order_sequence(SlugOwner::Path, &entries, PATHS_LOCATION, diagnostics);
}

fn check_lesson_orders(path: &ScannedPath, diagnostics: &mut Diagnostics) {
    let entries: Vec<OrderEntry<'_>> = path
        .lessons
        .iter()
        .filter_map(|lesson| {
            lesson.order.map(|order| OrderEntry {
                location: &lesson.location,
                name: &lesson.file_name,
                order,
            })
        })
        .collect();
    check_order_sequence(SlugOwner::Lesson, &entries, &path.slug, diagnostics);
}

struct OrderEntry<'a> {
    /// Where a conflict is reported
    location: &'a str,
    /// How the entry is named by a later conflicting sibling
    name: &'a str,
    order: u32,
}

/// Uniqueness, then contiguity from 1. Only the first gap is reported.
fn check_order_sequence(
    scope: SlugOwner,
    entries: &[OrderEntry<'_>],
    gap_location: &str,
    diagnostics: &mut Diagnostics,
) {
    let mut seen: HashMap<u32, &str> = HashMap::new();
    let mut unique = Vec::with_capacity(entries.len());
    for entry in entries {
        match seen.get(&entry.order) {
            Some(other) => diagnostics.report(
                entry.location,
                ContentError::OrderConflict {
                    scope,
                    order: entry.order,
                    other: other.to_string(),
                },
            ),
            None => {
                seen.insert(entry.order, entry.name);
                unique.push(entry.order);
            }
        }
    }

    unique.sort_unstable();
    for (index, &found) in unique.iter().enumerate() {
        let expected = index as u32 + 1;
        if found != expected {
            diagnostics.report(
                gap_location,
                ContentError::OrderGap {
                    scope,
                    expected,
                    found,
                },
            );
            break;
        }
    }
}

fn check_duplicate_lesson_slugs(paths: &[ScannedPath], diagnostics: &mut Diagnostics) {
    let mut owners: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for path in paths {
        for lesson in &path.lessons {
            owners.entry(&lesson.slug).or_default().push(&path.slug);
        }
    }

    for (slug, paths) in owners {
        if paths.len() > 1 {
            diagnostics.report(
                LESSONS_LOCATION,
                ContentError::DuplicateSlug {
                    slug: slug.to_string(),
                    paths: paths.into_iter().map(String::from).collect(),
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DirEntry;
    use crate::testing::ContentFixture;
    use std::path::Path;

    fn validate(fixture: &ContentFixture) -> ValidationReport {
        ContentValidator::from_dir(fixture.root()).validate()
    }

    /// Two valid paths with two valid lessons each.
    fn valid_fixture() -> ContentFixture {
        let fixture = ContentFixture::new();
        fixture.path("basics", "Basics", 1);
        fixture.lesson("basics", "intro", "Intro", 1);
        fixture.lesson("basics", "variables", "Variables", 2);
        fixture.path("advanced", "Advanced", 2);
        fixture.lesson("advanced", "traits", "Traits", 1);
        fixture.lesson("advanced", "generics", "Generics", 2);
        fixture
    }

    #[test]
    fn test_valid_tree_passes() {
        let report = validate(&valid_fixture());
        assert!(report.success, "{:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_duplicate_path_order_reports_one_conflict() {
        let fixture = ContentFixture::new();
        fixture.path("alpha", "Alpha", 1);
        fixture.path("beta", "Beta", 1);

        let report = validate(&fixture);
        assert!(!report.success);
        assert_eq!(report.count(ErrorKind::OrderConflict), 1);

        let issue = report
            .errors
            .iter()
            .find(|i| i.kind() == ErrorKind::OrderConflict)
            .unwrap();
        assert_eq!(issue.location, "beta");
        assert!(issue.message().contains("alpha"));
        assert_eq!(report.count(ErrorKind::OrderGap), 0);
    }

    #[test]
    fn test_path_order_gap_reports_first_gap_only() {
        let fixture = ContentFixture::new();
        fixture.path("one", "One", 1);
        fixture.path("two", "Two", 2);
        fixture.path("four", "Four", 4);
        fixture.path("seven", "Seven", 7);

        let report = validate(&fixture);
        assert_eq!(report.error_count(), 1);
        let issue = &report.errors[0];
        assert_eq!(issue.kind(), ErrorKind::OrderGap);
        assert_eq!(issue.location, PATHS_LOCATION);
        assert!(issue.message().contains("Expected order 3, but found 4"));
    }

    #[test]
    fn test_gap_from_start() {
        let fixture = ContentFixture::new();
        fixture.path("two", "Two", 2);

        let report = validate(&fixture);
        assert_eq!(report.count(ErrorKind::OrderGap), 1);
        assert!(report.errors[0].message().contains("Expected order 1, but found 2"));
    }

    #[test]
    fn test_isolation_missing_title() {
        let fixture = ContentFixture::new();
        fixture.path("basics", "Basics", 1);
        fixture.lesson("basics", "one", "One", 1);
        fixture.lesson("basics", "two", "Two", 2);
        fixture.lesson_with("basics", "three", "description: Third\norder: 3", "body");

        let report = validate(&fixture);
        assert_eq!(report.error_count(), 1);
        let issue = &report.errors[0];
        assert_eq!(issue.kind(), ErrorKind::MissingMetadata);
        assert_eq!(issue.location, "basics/three.md");
        assert_eq!(issue.message(), "Missing or empty 'title' field in frontmatter");

        let lessons = crate::content::ContentLoader::from_dir(fixture.root())
            .list_lessons("basics")
            .unwrap();
        assert_eq!(lessons.len(), 2);
    }

    #[test]
    fn test_cross_path_duplicate_lesson_slug() {
        let fixture = ContentFixture::new();
        fixture.path("alpha", "Alpha", 1);
        fixture.path("beta", "Beta", 2);
        fixture.lesson("alpha", "intro", "Intro", 1);
        fixture.lesson("beta", "intro", "Intro", 1);

        let report = validate(&fixture);
        assert_eq!(report.error_count(), 1);
        let issue = &report.errors[0];
        assert_eq!(issue.kind(), ErrorKind::DuplicateSlug);
        assert_eq!(issue.location, LESSONS_LOCATION);
        assert_eq!(issue.message(), "Duplicate lesson slug 'intro' found in paths: alpha, beta");
    }

    #[test]
    fn test_stray_file_in_path_dir() {
        let fixture = valid_fixture();
        fixture.raw("basics", "notes.txt", "todo");

        let report = validate(&fixture);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors[0].kind(), ErrorKind::Structural);
        assert_eq!(report.errors[0].location, "basics/notes.txt");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_structural() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let fixture = valid_fixture();
        let stray = OsStr::from_bytes(b"notes\xff.txt");
        std::fs::write(fixture.path_dir("basics").join(stray), "x").unwrap();
        std::fs::write(fixture.root().join(LEARNING_PATHS_DIR).join(stray), "x").unwrap();
        std::fs::create_dir(fixture.root().join(LEARNING_PATHS_DIR).join(OsStr::from_bytes(b"dir\xff"))).unwrap();
        std::fs::write(fixture.root().join(stray), "x").unwrap();

        let report = validate(&fixture);
        assert!(!report.success);
        assert_eq!(report.error_count(), 4, "{:?}", report.errors);
        assert_eq!(report.count(ErrorKind::Structural), 4);
        let locations: Vec<&str> = report.errors.iter().map(|i| i.location.as_str()).collect();
        assert_eq!(
            locations,
            vec![
                "content/notes\u{FFFD}.txt",
                "learning-paths/dir\u{FFFD}",
                "learning-paths/notes\u{FFFD}.txt",
                "basics/notes\u{FFFD}.txt",
            ]
        );

        // The loader still serves the valid content around them
        let loader = crate::content::ContentLoader::from_dir(fixture.root());
        assert_eq!(loader.list_paths().len(), 2);
        assert_eq!(loader.list_lessons("basics").unwrap().len(), 2);
    }

    #[test]
    fn test_nested_directory_in_path_dir() {
        let fixture = valid_fixture();
        fixture.subdir("basics", "images");

        let report = validate(&fixture);
        assert_eq!(report.count(ErrorKind::Structural), 1);
        assert_eq!(report.errors[0].location, "basics/images");
    }

    #[test]
    fn test_top_level_structure() {
        let fixture = valid_fixture();
        fixture.root_file("README.md", "hi");
        fixture.root_dir("drafts");
        fixture.learning_paths_file("index.json", "{}");

        let report = validate(&fixture);
        assert_eq!(report.count(ErrorKind::Structural), 3);
        let locations: Vec<&str> = report.errors.iter().map(|i| i.location.as_str()).collect();
        assert_eq!(
            locations,
            vec!["content/README.md", "content/drafts", "learning-paths/index.json"]
        );
    }

    #[test]
    fn test_missing_learning_paths_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let report = ContentValidator::from_dir(temp.path()).validate();
        assert!(!report.success);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors[0].kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_empty_learning_paths() {
        let report = validate(&ContentFixture::new());
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.errors[0].location, LEARNING_PATHS_DIR);
        assert_eq!(report.errors[0].message(), "No learning paths found in content directory");
    }

    #[test]
    fn test_slug_format_errors() {
        let fixture = ContentFixture::new();
        fixture.path("Bad_Path", "Bad", 1);
        fixture.lesson("Bad_Path", "Intro_Lesson", "Intro", 1);

        let report = validate(&fixture);
        assert_eq!(report.count(ErrorKind::SlugFormat), 2);
        assert_eq!(report.errors[0].location, "Bad_Path");
        assert_eq!(report.errors[1].location, "Bad_Path/Intro_Lesson.md");
    }

    #[test]
    fn test_bare_extension_is_a_badly_named_lesson() {
        let fixture = valid_fixture();
        fixture.lesson_with("basics", "", "title: Nameless\ndescription: None\norder: 3", "");

        let report = validate(&fixture);
        assert_eq!(report.error_count(), 1, "{:?}", report.errors);
        assert_eq!(report.errors[0].kind(), ErrorKind::SlugFormat);
        assert_eq!(report.errors[0].location, "basics/.md");

        let loader = crate::content::ContentLoader::from_dir(fixture.root());
        assert_eq!(loader.list_lessons("basics").unwrap().len(), 2);
    }

    #[test]
    fn test_path_metadata_problems() {
        let fixture = ContentFixture::new();
        fixture.empty_path("no-meta");
        fixture.path_metadata("bad-json", "{");
        fixture.path_metadata("bad-fields", r#"{"title": "", "order": 0}"#);

        let report = validate(&fixture);
        let at = |loc: &str| -> Vec<ErrorKind> {
            report
                .errors
                .iter()
                .filter(|i| i.location == loc)
                .map(|i| i.kind())
                .collect()
        };
        assert_eq!(at("no-meta"), vec![ErrorKind::MissingMetadata]);
        assert_eq!(at("bad-json/path-metadata.json"), vec![ErrorKind::ParseFailure]);
        assert_eq!(
            at("bad-fields/path-metadata.json"),
            vec![ErrorKind::MissingMetadata; 3]
        );
        // No orders were usable, so no order checks fire
        assert_eq!(report.count(ErrorKind::OrderGap), 0);
    }

    #[test]
    fn test_lesson_problems_do_not_block_siblings() {
        let fixture = ContentFixture::new();
        fixture.path("basics", "Basics", 1);
        fixture.raw("basics", "broken.md", "---\ntitle: [oops\n---\n");
        fixture.lesson_with("basics", "empty", "", "body");
        fixture.lesson("basics", "fine", "Fine", 1);

        let report = validate(&fixture);
        assert_eq!(report.count(ErrorKind::ParseFailure), 1);
        assert_eq!(report.errors[0].location, "basics/broken.md");
        assert!(report.errors[0].message().starts_with("Invalid frontmatter"));
        // title, description and order all missing on the empty lesson
        assert_eq!(report.count(ErrorKind::MissingMetadata), 3);
    }

    #[test]
    fn test_lesson_order_conflict_and_gap_per_path() {
        let fixture = ContentFixture::new();
        fixture.path("basics", "Basics", 1);
        fixture.lesson("basics", "a", "A", 1);
        fixture.lesson("basics", "b", "B", 1);
        fixture.lesson("basics", "c", "C", 3);
        fixture.path("advanced", "Advanced", 2);
        fixture.lesson("advanced", "x", "X", 2);
        fixture.lesson("advanced", "y", "Y", 3);

        let report = validate(&fixture);
        assert_eq!(report.count(ErrorKind::OrderConflict), 1);
        let conflict = report
            .errors
            .iter()
            .find(|i| i.kind() == ErrorKind::OrderConflict)
            .unwrap();
        assert_eq!(conflict.location, "basics/b.md");
        assert_eq!(
            conflict.message(),
            "Duplicate lesson order 1 within path (also used by a.md)"
        );

        let gaps: Vec<(&str, String)> = report
            .errors
            .iter()
            .filter(|i| i.kind() == ErrorKind::OrderGap)
            .map(|i| (i.location.as_str(), i.message()))
            .collect();
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].0, "advanced");
        assert!(gaps[0].1.contains("Expected order 1, but found 2"));
        assert_eq!(gaps[1].0, "basics");
        assert!(gaps[1].1.contains("Expected order 2, but found 3"));
    }

    #[test]
    fn test_lesson_orders_are_scoped_per_path() {
        let fixture = ContentFixture::new();
        fixture.path("alpha", "Alpha", 1);
        fixture.path("beta", "Beta", 2);
        fixture.lesson("alpha", "one", "One", 1);
        fixture.lesson("beta", "uno", "Uno", 1);

        assert!(validate(&fixture).success);
    }

    #[test]
    fn test_render_text() {
        let fixture = valid_fixture();
        fixture.raw("basics", "notes.txt", "todo");

        let text = validate(&fixture).render_text();
        assert!(text.starts_with("Errors:\n   basics/notes.txt: Unexpected file in path directory"));
        assert!(text.ends_with("Content validation failed with 1 error(s)\n"));

        let text = validate(&valid_fixture()).render_text();
        assert_eq!(text, "All content validation checks passed!\n");
    }

    #[test]
    fn test_report_serializes_kind_and_message() {
        let fixture = ContentFixture::new();
        fixture.path("two", "Two", 2);

        let json = serde_json::to_value(validate(&fixture)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0]["location"], "paths");
        assert_eq!(json["errors"][0]["kind"], "order_gap");
    }

    /// Storage whose path directories cannot be listed.
    struct FailingStorage;

    impl ContentStorage for FailingStorage {
        fn list_dir(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
            if dir.ends_with(LEARNING_PATHS_DIR) {
                Ok(vec![DirEntry::dir("alpha")])
            } else if dir.ends_with("alpha") {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            } else {
                Ok(vec![DirEntry::dir(LEARNING_PATHS_DIR), DirEntry::file("stray.txt")])
            }
        }

        fn read_to_string(&self, _file: &Path) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
        }

        fn exists(&self, _path: &Path) -> bool {
            false
        }

        fn is_dir(&self, path: &Path) -> bool {
            path.ends_with(LEARNING_PATHS_DIR) || path.ends_with("alpha")
        }
    }

    #[test]
    fn test_io_failure_keeps_partial_report() {
        let report = ContentValidator::new(FailingStorage, "/content").validate();
        assert!(!report.success);
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.errors[0].location, "content/stray.txt");
        assert_eq!(report.errors[1].location, UNEXPECTED_LOCATION);
        assert_eq!(report.errors[1].kind(), ErrorKind::Unexpected);
        assert!(report.errors[1].message().contains("denied"));
    }
}
