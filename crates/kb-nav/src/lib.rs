//! Knowledge base navigation for blog-backed documentation sites.
//!
//! Groups the posts under `<docs_dir>/<blog_dir>/posts/<folder>/` into one
//! navigation section per folder and predicts the URL the host's blog
//! plugin will give each post, so the links can be placed before the blog
//! plugin itself runs.
//!
//! The host calls into this crate at two points of a build:
//!
//! 1. [`on_config`]: after the configuration is loaded. Replaces the
//!    `Knowledge Base` entry of the configured navigation with the generated
//!    sections and returns a [`LinkTable`] of the posts per section.
//! 2. [`on_nav`]: after the host has turned the configuration into a
//!    [`Navigation`]. Fills each generated section with links from the table.
//!
//! The table is an ordinary value: the caller keeps it between the two calls.
//!
//! # Example
//!
//! ```ignore
//! use kb_config::Config;
//! use kb_nav::{KnowledgeBaseOptions, Navigation, on_config, on_nav};
//!
//! let mut config = Config::load(None, None)?;
//! let options = KnowledgeBaseOptions::from_config(&config);
//! let links = on_config(&mut config, &options);
//!
//! let mut nav = Navigation::from_config(config.host.get("nav"));
//! on_nav(&mut nav, &links, &options);
//! ```

mod builder;
mod hooks;
mod links;
mod navigation;
mod slug;
mod url;

pub use builder::{KnowledgeBase, KnowledgeBaseOptions, build_knowledge_base, titleize_folder};
pub use hooks::{apply_knowledge_base, on_config, on_nav};
pub use links::{LinkTable, NavLink};
pub use navigation::{NavNode, Navigation};
pub use slug::slugify;
pub use url::{DRAFTS_SEGMENT, date_path, post_url, predict_post_url};
