//! Result alias and extension methods for branching on tagged failures.

use crate::error::TaggedError;
use crate::tag::Tag;

/// Result type alias using [`TaggedError`].
pub type Result<T> = std::result::Result<T, TaggedError>;

/// Extension methods for `Result<T, TaggedError>`.
///
/// Failures are ordinary values; callers branch on them explicitly. The one
/// escape hatch back into panic propagation is [`raise`](TaggedResult::raise).
pub trait TaggedResult<T> {
    /// Extract the success value, or `None` if this is a failure.
    ///
    /// `None` is the absent sentinel; compose with `unwrap_or` or
    /// `unwrap_or_else` to supply a default. Never panics.
    fn success(self) -> Option<T>;

    /// Check whether this is a failure carrying the given tag, at any depth
    /// of its cause chain.
    ///
    /// Always false on the success branch. To test for *some* failure with
    /// no particular tag, use `is_err`.
    fn is_tagged(&self, tag: impl Into<Tag>) -> bool;

    /// Prepend explanatory text to the failure's message, if this is a
    /// failure. The success branch passes through untouched.
    fn context(self, prefix: impl AsRef<str>) -> Self;

    /// Extract the success value, or re-raise the failure as a panic whose
    /// payload is the [`TaggedError`] itself (same tag, message, cause).
    ///
    /// For call sites that decline to handle the error locally.
    fn raise(self) -> T;
}

impl<T> TaggedResult<T> for Result<T> {
    fn success(self) -> Option<T> {
        self.ok()
    }

    fn is_tagged(&self, tag: impl Into<Tag>) -> bool {
        match self {
            Ok(_) => false,
            Err(err) => err.has_tag(tag),
        }
    }

    fn context(self, prefix: impl AsRef<str>) -> Self {
        self.map_err(|err| err.context(prefix))
    }

    fn raise(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => std::panic::panic_any(err),
        }
    }
}
