//! Rendered navigation tree.
//!
//! Models the navigation object the host builds from the configured `nav`
//! list: sections with ordered, mutable children, pages backed by a source
//! file, and links to arbitrary URLs.
//!
//! # Example
//!
//! ```
//! use kb_nav::{NavNode, Navigation};
//!
//! let nav: serde_yaml::Value = serde_yaml::from_str(
//!     "- Home: index.md\n- Knowledge Base:\n    - Overview: blog/index.md\n",
//! )
//! .unwrap();
//!
//! let nav = Navigation::from_config(Some(&nav));
//! assert_eq!(nav.items.len(), 2);
//! assert!(matches!(nav.items[1], NavNode::Section { .. }));
//! ```

use serde::Serialize;
use serde_yaml::Value;

/// Navigation node for the rendered tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    /// Named group of child nodes.
    Section {
        /// Display title.
        title: String,
        /// Child nodes, in display order.
        children: Vec<NavNode>,
    },
    /// Page rendered from a source file.
    Page {
        /// Display title; `None` lets the host derive it from the page.
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Source file path relative to `docs_dir`.
        file: String,
    },
    /// Link to a URL that is not a source file.
    Link {
        /// Display title.
        title: String,
        /// Target URL.
        url: String,
    },
}

impl NavNode {
    /// Display title, if the node has one.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Section { title, .. } | Self::Link { title, .. } => Some(title),
            Self::Page { title, .. } => title.as_deref(),
        }
    }

    /// Create a link node.
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Link {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Create a section node.
    pub fn section(title: impl Into<String>, children: Vec<NavNode>) -> Self {
        Self::Section {
            title: title.into(),
            children,
        }
    }
}

/// Rendered navigation: the top-level nodes in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Top-level navigation nodes.
    pub items: Vec<NavNode>,
}

impl Navigation {
    /// Build the rendered tree from the configured `nav` value.
    ///
    /// - `"path.md"` becomes an untitled page
    /// - `{title: "path.md"}` becomes a titled page
    /// - `{title: "https://..."}` or an absolute path becomes a link
    /// - `{title: [...]}` becomes a section
    ///
    /// Entries of any other shape are skipped.
    #[must_use]
    pub fn from_config(nav: Option<&Value>) -> Self {
        let items = match nav {
            Some(Value::Sequence(entries)) => convert_entries(entries),
            _ => Vec::new(),
        };
        Self { items }
    }

    /// First top-level section with the given title.
    pub fn section_mut(&mut self, wanted: &str) -> Option<&mut Vec<NavNode>> {
        self.items.iter_mut().find_map(|item| match item {
            NavNode::Section { title, children } if title == wanted => Some(children),
            _ => None,
        })
    }
}

fn convert_entries(entries: &[Value]) -> Vec<NavNode> {
    entries.iter().flat_map(convert_entry).collect()
}

fn convert_entry(entry: &Value) -> Vec<NavNode> {
    match entry {
        Value::String(target) => vec![target_node(None, target)],
        Value::Mapping(mapping) => mapping
            .iter()
            .filter_map(|(key, value)| {
                let title = key.as_str()?;
                match value {
                    Value::Sequence(children) => {
                        Some(NavNode::section(title, convert_entries(children)))
                    }
                    Value::String(target) => Some(target_node(Some(title), target)),
                    _ => {
                        tracing::debug!(title, "Skipping navigation entry with unsupported value");
                        None
                    }
                }
            })
            .collect(),
        _ => {
            tracing::debug!("Skipping navigation entry with unsupported shape");
            Vec::new()
        }
    }
}

fn target_node(title: Option<&str>, target: &str) -> NavNode {
    if is_url(target) {
        NavNode::link(title.unwrap_or(target), target)
    } else {
        NavNode::Page {
            title: title.map(str::to_owned),
            file: target.to_owned(),
        }
    }
}

/// True for targets with a scheme or an absolute path.
fn is_url(target: &str) -> bool {
    target.contains("://") || target.starts_with('/') || target.starts_with("mailto:")
}
