//! YAML front matter parsing.
//!
//! The block is located with a plain string split on the delimiter, so the
//! closing `---` does not have to sit on its own line.

use std::path::Path;

use kb_storage::{Storage, StorageError};
use serde_yaml::{Mapping, Value};

/// Marker that opens and closes a front matter block.
pub const FRONT_MATTER_DELIMITER: &str = "---";

/// Error type for front matter operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The post could not be read.
    #[error("{0}")]
    Storage(#[from] StorageError),
    /// YAML parsing error.
    #[error("Invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// The block parsed, but not to a key-value mapping.
    #[error("Front matter is not a mapping")]
    NotAMapping,
}

/// Parsed front matter and the remaining body lines.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrontMatter {
    /// Metadata from the front matter block (empty when there is none).
    pub meta: Mapping,
    /// Lines after the front matter block.
    pub body_lines: Vec<String>,
}

impl FrontMatter {
    /// Parse front matter from document text.
    ///
    /// Text that does not start with the delimiter, or that has no closing
    /// delimiter, is returned whole as body with empty metadata. An empty
    /// block yields empty metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is malformed YAML or not a mapping.
    pub fn parse(text: &str) -> Result<Self, MetadataError> {
        if !text.starts_with(FRONT_MATTER_DELIMITER) {
            return Ok(Self::body_only(text));
        }

        let mut parts = text.splitn(3, FRONT_MATTER_DELIMITER);
        let (Some(_), Some(meta_raw), Some(body)) = (parts.next(), parts.next(), parts.next())
        else {
            return Ok(Self::body_only(text));
        };

        Ok(Self {
            meta: parse_mapping(meta_raw)?,
            body_lines: split_lines(body),
        })
    }

    /// Read a post from storage and parse its front matter.
    ///
    /// # Errors
    ///
    /// Returns an error if the post can't be read or its front matter is invalid.
    pub fn read(storage: &dyn Storage, path: &Path) -> Result<Self, MetadataError> {
        let text = storage.read(path)?;
        Self::parse(&text)
    }

    /// Look up a top-level metadata field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    fn body_only(text: &str) -> Self {
        Self {
            meta: Mapping::new(),
            body_lines: split_lines(text),
        }
    }
}

/// Parse the raw block into a mapping. Null documents become empty mappings.
fn parse_mapping(raw: &str) -> Result<Mapping, MetadataError> {
    if raw.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(raw)? {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(MetadataError::NotAMapping),
    }
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_owned).collect()
}
