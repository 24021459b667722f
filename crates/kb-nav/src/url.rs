//! Post URL prediction.
//!
//! Reproduces the URL the host's blog plugin assigns to a post. With the
//! plugin's default settings this is `blog/<YYYY>/<MM>/<DD>/<slug>/` for a
//! dated post and `blog/drafts/<slug>/` otherwise. A mismatch doesn't fail
//! the build; the link simply 404s.

use std::path::Path;

use kb_config::BlogConfig;
use kb_meta::{Post, file_stem};
use kb_storage::Storage;

use crate::slug::slugify;

/// Date segment used for posts without a usable date.
pub const DRAFTS_SEGMENT: &str = "drafts";

/// Separator used when slugifying post titles.
const SLUG_SEPARATOR: &str = "-";

/// Turn a `YYYY-MM-DD...` date string into a `YYYY/MM/DD` path segment.
///
/// Only the shape is checked: at least 10 characters with `-` at positions
/// 4 and 7. Anything after position 10 (e.g. a time) is ignored.
///
/// # Examples
///
/// ```
/// use kb_nav::date_path;
///
/// assert_eq!(date_path("2024-03-05"), Some("2024/03/05".to_owned()));
/// assert_eq!(date_path("2024-03-05 10:00:00"), Some("2024/03/05".to_owned()));
/// assert_eq!(date_path(""), None);
/// ```
#[must_use]
pub fn date_path(date: &str) -> Option<String> {
    let chars: Vec<char> = date.chars().collect();
    if chars.len() < 10 || chars[4] != '-' || chars[7] != '-' {
        return None;
    }
    let part = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();
    Some(format!("{}/{}/{}", part(0..4), part(5..7), part(8..10)))
}

/// Build the URL of a post from its title, date and source path.
#[must_use]
pub fn post_url(title: &str, date: &str, path: &Path, blog: &BlogConfig) -> String {
    let date_segment = date_path(date).unwrap_or_else(|| DRAFTS_SEGMENT.to_owned());
    let slug = slugify(title, SLUG_SEPARATOR);
    let relative = blog
        .post_url_format
        .replace("{date}", &date_segment)
        .replace("{slug}", &slug)
        .replace("{file}", &file_stem(path));
    format!("{}/{}/", blog.blog_dir, relative)
}

/// Predict the URL of the post at `path` (relative to `docs_dir`).
pub fn predict_post_url(storage: &dyn Storage, path: &Path, blog: &BlogConfig) -> String {
    let post = Post::load(storage, path);
    post_url(post.title.value(), post.date.value(), path, blog)
}

#[cfg(test)]
mod tests {
    use kb_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    const PATH: &str = "blog/posts/topic/post.md";

    fn predict(content: &str) -> String {
        let storage = MockStorage::new().with_file(PATH, content);
        predict_post_url(&storage, Path::new(PATH), &BlogConfig::default())
    }

    #[test]
    fn test_dated_post_url() {
        assert_eq!(
            predict("---\ntitle: X\ndate: 2024-03-05\n---\n"),
            "blog/2024/03/05/x/"
        );
    }

    #[test]
    fn test_undated_post_is_draft() {
        assert_eq!(
            predict("---\ntitle: Getting Started\n---\n"),
            "blog/drafts/getting-started/"
        );
    }

    #[test]
    fn test_malformed_date_is_draft() {
        assert_eq!(
            predict("---\ntitle: X\ndate: March 5 2024\n---\n"),
            "blog/drafts/x/"
        );
        assert_eq!(predict("---\ntitle: X\ndate: 2024-3-5\n---\n"), "blog/drafts/x/");
    }

    #[test]
    fn test_datetime_uses_date_part() {
        assert_eq!(
            predict("---\ntitle: X\ndate: 2024-03-05 09:15:00\n---\n"),
            "blog/2024/03/05/x/"
        );
    }

    #[test]
    fn test_title_from_heading_and_stem() {
        assert_eq!(predict("# Hello World\n"), "blog/drafts/hello-world/");
        assert_eq!(predict("no heading\n"), "blog/drafts/post/");
    }

    #[test]
    fn test_custom_blog_settings() {
        let blog = BlogConfig {
            blog_dir: "kb".to_owned(),
            post_url_format: "{date}/{file}".to_owned(),
        };

        assert_eq!(
            post_url("Ignored Title", "2023-01-09", Path::new(PATH), &blog),
            "kb/2023/01/09/post/"
        );
    }

    #[test]
    fn test_date_path_shape_only() {
        assert_eq!(date_path("abcd-ef-ghij"), Some("abcd/ef/gh".to_owned()));
        assert_eq!(date_path("2024-03-0"), None);
        assert_eq!(date_path("2024/03/05"), None);
    }
}
