//! YAML front-matter extraction for lesson files.

use serde_json::{Map, Value};

const DELIMITER: &str = "---";

/// A lesson file split into its metadata block and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub metadata: Map<String, Value>,
    /// Text after the closing delimiter, untouched
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    #[error("missing closing '---' delimiter")]
    Unterminated,

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front-matter must be a key/value mapping")]
    NotAMapping,
}

/// Split `text` into front-matter and body.
///
/// A document that does not open with a `---` line has no metadata and is
/// all body.
pub fn parse(text: &str) -> Result<Document, FrontMatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(Document::default());
    };
    if first.trim_end() != DELIMITER {
        return Ok(Document {
            metadata: Map::new(),
            body: text.to_string(),
        });
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let metadata = parse_mapping(&text[yaml_start..offset])?;
            let body = text[offset + line.len()..].to_string();
            return Ok(Document { metadata, body });
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

fn parse_mapping(raw: &str) -> Result<Map<String, Value>, FrontMatterError> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_yaml::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(FrontMatterError::NotAMapping),
    }
}
