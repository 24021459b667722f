//! Title slugification matching the host's Unicode slugifier.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// HTML tags, removed before slugifying.
static TAGS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[^>]*>").unwrap());

/// Anything that isn't a letter, number, underscore, dash, or plain space.
///
/// Combining marks are dropped, unlike the regex crate's `\w`.
static INVALID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_\- ]").unwrap());

/// Convert a title to a lowercase URL slug.
///
/// Steps: NFC-normalize, strip HTML tags, trim, lowercase, drop characters
/// other than letters, numbers, `_`, `-` and space, then replace each space with
/// `sep`. Runs of spaces are not collapsed, and punctuation at the edges
/// can leave a trailing separator (`"What?"` trims before `?` is dropped).
///
/// # Examples
///
/// ```
/// use kb_nav::slugify;
///
/// assert_eq!(slugify("Hello World", "-"), "hello-world");
/// assert_eq!(slugify("C++ <em>tips</em>", "-"), "c-tips");
/// ```
#[must_use]
pub fn slugify(text: &str, sep: &str) -> String {
    let composed: String = text.nfc().collect();
    let stripped = TAGS_RE.replace_all(&composed, "");
    let lowered = stripped.trim().to_lowercase();
    INVALID_RE.replace_all(&lowered, "").replace(' ', sep)
}
