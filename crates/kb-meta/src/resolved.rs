//! Values that may have been derived from a fallback.

/// A value that was either taken from the post or derived as a fallback.
///
/// Both variants carry a usable value; the variant only records where it
/// came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved<T> {
    /// Value read from the post's front matter or content.
    Resolved(T),
    /// Value derived from a default (filename, empty string).
    Fallback(T),
}

impl<T> Resolved<T> {
    /// Borrow the value regardless of origin.
    pub fn value(&self) -> &T {
        match self {
            Self::Resolved(v) | Self::Fallback(v) => v,
        }
    }

    /// Take the value regardless of origin.
    pub fn into_inner(self) -> T {
        match self {
            Self::Resolved(v) | Self::Fallback(v) => v,
        }
    }

    /// True when the value came from a fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}
