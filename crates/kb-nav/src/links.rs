//! Links collected per knowledge base section.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// A single post link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Post title.
    pub title: String,
    /// Predicted post URL.
    pub url: String,
}

impl NavLink {
    /// Create a link.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Post links keyed by section display title, in insertion order.
///
/// Produced by [`on_config`](crate::on_config) and consumed by
/// [`on_nav`](crate::on_nav). Inserting an existing title replaces its links
/// but keeps its original position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkTable {
    entries: Vec<(String, Vec<NavLink>)>,
}

impl LinkTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the links of a section.
    pub fn insert(&mut self, title: impl Into<String>, links: Vec<NavLink>) {
        let title = title.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(t, _)| *t == title) {
            *existing = links;
        } else {
            self.entries.push((title, links));
        }
    }

    /// Links of the section with the given title.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&[NavLink]> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, links)| links.as_slice())
    }

    /// True when no section was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Section titles in insertion order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }
}

impl Serialize for LinkTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (title, links) in &self.entries {
            map.serialize_entry(title, links)?;
        }
        map.end()
    }
}
