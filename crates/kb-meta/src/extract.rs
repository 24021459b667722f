//! Post title and date extraction.

use std::path::{Path, PathBuf};

use kb_storage::Storage;
use serde_yaml::Value;

use crate::frontmatter::{FrontMatter, MetadataError};
use crate::resolved::Resolved;

/// Level-1 heading marker.
const H1_PREFIX: &str = "# ";

/// Filename without its final extension (`setup.md` -> `setup`).
#[must_use]
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Extract the display title of a post.
///
/// Order: front matter `title` (non-blank string, trimmed), then the first
/// `# ` heading in the body, then the filename stem. A post whose front
/// matter can't be read gets the filename stem.
pub fn extract_title(storage: &dyn Storage, path: &Path) -> Resolved<String> {
    title_from(&read_logged(storage, path), path)
}

/// Extract the date of a post as a string.
///
/// Returns the front matter `date` stringified, or an empty string when
/// the field is absent, empty, or the front matter can't be read.
pub fn extract_date(storage: &dyn Storage, path: &Path) -> Resolved<String> {
    date_from(&read_logged(storage, path))
}

/// A post with its title and date extracted from a single read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Path relative to the storage root.
    pub path: PathBuf,
    /// Display title.
    pub title: Resolved<String>,
    /// Date string (empty when undated).
    pub date: Resolved<String>,
}

impl Post {
    /// Read a post once and extract its title and date.
    pub fn load(storage: &dyn Storage, path: &Path) -> Self {
        let parsed = read_logged(storage, path);
        Self {
            path: path.to_path_buf(),
            title: title_from(&parsed, path),
            date: date_from(&parsed),
        }
    }

    /// Filename including extension, used as the sort tiebreak.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

fn read_logged(storage: &dyn Storage, path: &Path) -> Result<FrontMatter, MetadataError> {
    let parsed = FrontMatter::read(storage, path);
    if let Err(e) = &parsed {
        tracing::debug!(path = %path.display(), error = %e, "Front matter unavailable, using fallbacks");
    }
    parsed
}

fn title_from(parsed: &Result<FrontMatter, MetadataError>, path: &Path) -> Resolved<String> {
    let Ok(fm) = parsed else {
        return Resolved::Fallback(file_stem(path));
    };

    // Front matter is read as YAML 1.2: `title: yes` or `title: on` is a
    // string title here, not a boolean.
    if let Some(Value::String(title)) = fm.get("title") {
        let title = title.trim();
        if !title.is_empty() {
            return Resolved::Resolved(title.to_owned());
        }
    }

    // Only the first heading counts, even when its text is blank
    if let Some(heading) = fm.body_lines.iter().find_map(|l| l.strip_prefix(H1_PREFIX)) {
        let heading = heading.trim();
        return if heading.is_empty() {
            Resolved::Fallback(file_stem(path))
        } else {
            Resolved::Resolved(heading.to_owned())
        };
    }

    Resolved::Fallback(file_stem(path))
}

fn date_from(parsed: &Result<FrontMatter, MetadataError>) -> Resolved<String> {
    let date = parsed
        .as_ref()
        .ok()
        .and_then(|fm| fm.get("date"))
        .map(stringify_date)
        .unwrap_or_default();

    if date.is_empty() {
        Resolved::Fallback(date)
    } else {
        Resolved::Resolved(date)
    }
}

/// Render a front matter `date` value as text.
///
/// Empty values (null, `""`, `false`, zero, empty collections) render as
/// an empty string. A mapping with a `created` key renders that key.
fn stringify_date(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_owned(),
        Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => String::new(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Mapping(m) if m.contains_key("created") => {
            m.get("created").map(stringify_date).unwrap_or_default()
        }
        Value::Mapping(m) if m.is_empty() => String::new(),
        Value::Sequence(s) if s.is_empty() => String::new(),
        Value::Tagged(tagged) => stringify_date(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}
