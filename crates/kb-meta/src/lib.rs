//! Front matter parsing and post metadata extraction.
//!
//! A post is a markdown file that may begin with a `---`-delimited YAML
//! block. This crate reads that block and derives the two values the
//! knowledge base navigation needs from every post:
//!
//! - **Title**: front matter `title`, else the first `# ` heading, else the
//!   filename stem
//! - **Date**: front matter `date` stringified, else an empty string
//!
//! Extraction never fails. When a value had to be derived from a fallback
//! (unreadable file, malformed YAML, missing field) it is wrapped in
//! [`Resolved::Fallback`] so callers can tell it apart from a value taken
//! from the post itself.

mod extract;
mod frontmatter;
mod resolved;

pub use extract::{Post, extract_date, extract_title, file_stem};
pub use frontmatter::{FRONT_MATTER_DELIMITER, FrontMatter, MetadataError};
pub use resolved::Resolved;
