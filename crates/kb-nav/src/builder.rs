//! Knowledge base navigation builder.
//!
//! Scans the topic folders under the blog's posts directory and produces
//! the configuration-level navigation for the `Knowledge Base` entry:
//!
//! ```yaml
//! - Overview: blog/index.md
//! - How to: []
//! - Data platform: []
//! ```
//!
//! Sections start empty; their links are kept in the returned
//! [`LinkTable`] and filled in later by [`on_nav`](crate::on_nav).

use std::path::Path;

use kb_config::{BlogConfig, Config};
use kb_meta::Post;
use kb_storage::Storage;
use serde_yaml::{Mapping, Value};

use crate::links::{LinkTable, NavLink};
use crate::url::post_url;

/// Options controlling the generated navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnowledgeBaseOptions {
    /// Title of the navigation entry to replace / fill.
    pub section_title: String,
    /// Title of the leading link to the blog index.
    pub overview_title: String,
    /// Blog plugin settings.
    pub blog: BlogConfig,
}

impl Default for KnowledgeBaseOptions {
    fn default() -> Self {
        Self {
            section_title: "Knowledge Base".to_owned(),
            overview_title: "Overview".to_owned(),
            blog: BlogConfig::default(),
        }
    }
}

impl KnowledgeBaseOptions {
    /// Default options with blog settings taken from the host configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            blog: config.blog.clone(),
            ..Self::default()
        }
    }
}

/// Output of one navigation build pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KnowledgeBase {
    /// Configuration-level navigation entries.
    pub nav: Vec<Value>,
    /// Post links per section, keyed by the section titles in `nav`.
    pub links: LinkTable,
}

/// Turn a folder name into a section title.
///
/// Dashes and underscores become spaces and only the first word is
/// capitalized: `how-to` -> `How to`, `data_platform` -> `Data platform`.
///
/// # Examples
///
/// ```
/// use kb_nav::titleize_folder;
///
/// assert_eq!(titleize_folder("how-to"), "How to");
/// assert_eq!(titleize_folder("data_platform"), "Data platform");
/// ```
#[must_use]
pub fn titleize_folder(name: &str) -> String {
    let spaced = name.replace(['_', '-'], " ");
    let trimmed = spaced.trim().trim_matches('/');
    let mut words = trimmed.split_whitespace();
    let Some(first) = words.next() else {
        return trimmed.to_owned();
    };

    let mut title = capitalize(first);
    for word in words {
        title.push(' ');
        title.push_str(word);
    }
    title
}

/// Uppercase the first character and lowercase the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Build the knowledge base navigation and link table.
///
/// Folders are listed in name order. Posts within a folder are ordered
/// newest first by `(date, filename)` descending, which puts undated posts
/// after all dated ones. A missing posts directory yields only the
/// overview entry and an empty table.
pub fn build_knowledge_base(storage: &dyn Storage, options: &KnowledgeBaseOptions) -> KnowledgeBase {
    let mut kb = KnowledgeBase {
        nav: vec![entry(&options.overview_title, Value::from(options.blog.index_page()))],
        links: LinkTable::new(),
    };

    let posts_root = options.blog.posts_dir();
    if !storage.exists(&posts_root) {
        tracing::debug!(posts_root = %posts_root.display(), "Posts directory missing, skipping groups");
        return kb;
    }

    let mut folders = match storage.list_dirs(&posts_root) {
        Ok(folders) => folders,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to list topic folders");
            return kb;
        }
    };
    folders.sort();

    for folder in folders {
        let title = titleize_folder(&folder);
        let links = folder_links(storage, &posts_root.join(&folder), &options.blog);
        tracing::debug!(folder = %folder, title = %title, posts = links.len(), "Built knowledge base group");

        kb.nav.push(entry(&title, Value::Sequence(Vec::new())));
        kb.links.insert(title, links);
    }

    tracing::info!(
        groups = kb.links.len(),
        sections = ?kb.links.titles().collect::<Vec<_>>(),
        "Built knowledge base navigation"
    );
    kb
}

/// Links of all posts in one folder, newest first.
fn folder_links(storage: &dyn Storage, folder: &Path, blog: &BlogConfig) -> Vec<NavLink> {
    let paths = storage.list_markdown(folder).unwrap_or_else(|e| {
        tracing::warn!(folder = %folder.display(), error = %e, "Failed to list posts");
        Vec::new()
    });

    let mut posts: Vec<(Post, String)> = paths
        .iter()
        .map(|path| {
            let post = Post::load(storage, path);
            let name = post.file_name();
            (post, name)
        })
        .collect();
    let untitled = posts.iter().filter(|(p, _)| p.title.is_fallback()).count();
    let undated = posts.iter().filter(|(p, _)| p.date.is_fallback()).count();
    if untitled + undated > 0 {
        tracing::debug!(folder = %folder.display(), untitled, undated, "Posts using fallback title or date");
    }

    posts.sort_by(|(a, a_name), (b, b_name)| {
        (b.date.value(), b_name).cmp(&(a.date.value(), a_name))
    });

    posts
        .into_iter()
        .map(|(post, _)| {
            let url = post_url(post.title.value(), post.date.value(), &post.path, blog);
            NavLink::new(post.title.into_inner(), url)
        })
        .collect()
}

/// Single-key navigation entry `{title: value}`.
fn entry(title: &str, value: Value) -> Value {
    let mut mapping = Mapping::new();
    mapping.insert(Value::from(title), value);
    Value::Mapping(mapping)
}
