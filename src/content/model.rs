//! Catalog types and the decode step from raw metadata.
//!
//! Metadata arrives as an untyped JSON/YAML mapping. [`MetadataRecord`] pulls
//! out the fields we know about without trusting their shape; callers then
//! decide which fields they require.

use serde::Serialize;
use serde_json::{Map, Value};

use super::slug::lesson_id;
use super::ContentError;

/// Path metadata as stored in `path-metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathMetadata {
    pub title: String,
    pub description: String,
    pub order: u32,
}

/// A learning path with derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub order: u32,
    /// Number of lesson files in the path directory
    pub lesson_count: usize,
}

impl LearningPath {
    pub fn new(slug: impl Into<String>, metadata: PathMetadata, lesson_count: usize) -> Self {
        Self {
            slug: slug.into(),
            title: metadata.title,
            description: metadata.description,
            order: metadata.order,
            lesson_count,
        }
    }
}

/// A lesson entry (metadata only, no body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// `path_slug/lesson_slug`, the key progress tracking uses
    pub id: String,
    pub lesson_slug: String,
    pub path_slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub order: u32,
}

/// A lesson together with its unrendered body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonContent {
    pub lesson: Lesson,
    pub body: String,
}

/// Location of a lesson file, without any metadata.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonKey {
    pub path_slug: String,
    pub lesson_slug: String,
}

/// Which kind of record a field was read from (affects messages).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSource {
    PathMetadata,
    FrontMatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Title,
    Description,
    Order,
}

impl MetadataField {
    pub fn error(self, source: MetadataSource) -> ContentError {
        let suffix = match source {
            MetadataSource::PathMetadata => "",
            MetadataSource::FrontMatter => " in frontmatter",
        };
        let message = match self {
            MetadataField::Title => format!("Missing or empty 'title' field{}", suffix),
            MetadataField::Description => {
                format!("Missing or empty 'description' field{}", suffix)
            }
            MetadataField::Order => format!(
                "Missing or invalid 'order' field{} (must be positive integer)",
                suffix
            ),
        };
        ContentError::MissingMetadata(message)
    }
}

/// Fields recognised in a metadata mapping; each is `None` when absent or invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub order: Option<u32>,
}

impl MetadataRecord {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            title: map.get("title").and_then(non_empty_string),
            description: map.get("description").and_then(non_empty_string),
            order: map.get("order").and_then(positive_order),
        }
    }

    /// Decode a parsed JSON document; anything but an object is a parse failure.
    pub fn from_value(value: &Value) -> Result<Self, ContentError> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(ContentError::ParseFailure(
                "Invalid JSON format: expected an object".to_string(),
            )),
        }
    }

    /// Errors for every field in `required` that is absent or invalid.
    pub fn missing(&self, required: &[MetadataField], source: MetadataSource) -> Vec<ContentError> {
        required
            .iter()
            .filter(|field| !self.has(**field))
            .map(|field| field.error(source))
            .collect()
    }

    fn has(&self, field: MetadataField) -> bool {
        match field {
            MetadataField::Title => self.title.is_some(),
            MetadataField::Description => self.description.is_some(),
            MetadataField::Order => self.order.is_some(),
        }
    }

    pub fn into_path_metadata(self) -> Option<PathMetadata> {
        Some(PathMetadata {
            title: self.title?,
            description: self.description?,
            order: self.order?,
        })
    }

    /// Build a lesson; only `title` and `order` are required.
    pub fn into_lesson(self, path_slug: &str, lesson_slug: &str) -> Option<Lesson> {
        Some(Lesson {
            id: lesson_id(path_slug, lesson_slug),
            lesson_slug: lesson_slug.to_string(),
            path_slug: path_slug.to_string(),
            title: self.title?,
            description: self.description,
            order: self.order?,
        })
    }
}

fn non_empty_string(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(String::from)
}

/// A positive integer that fits in `u32`. Integral floats (`3.0`) are accepted.
fn positive_order(value: &Value) -> Option<u32> {
    let Value::Number(number) = value else {
        return None;
    };
    let order = match number.as_u64() {
        Some(n) => n,
        None => {
            let f = number.as_f64()?;
            if f.fract() != 0.0 || f < 1.0 || f > u32::MAX as f64 {
                return None;
            }
            f as u64
        }
    };
    if order == 0 {
        return None;
    }
    u32::try_from(order).ok()
}
