//! Tag discriminators for error values

use std::borrow::Cow;
use std::fmt;

use strum_macros::{Display, IntoStaticStr};

/// A string discriminator identifying an error kind.
///
/// Tags are open-ended: callers mint their own per failure site, so there is
/// no fixed enumeration to match against. [`Kind`] offers a vocabulary of
/// well-known tags for the common cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tag(Cow<'static, str>);

impl Tag {
    /// The tag attached when none is specified.
    pub const GENERIC: &'static str = "Error";

    /// Create a tag from a name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Tag(name.into())
    }

    /// Get the tag name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Tag {
    fn default() -> Self {
        Tag(Cow::Borrowed(Self::GENERIC))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Tag {
    fn from(name: &'static str) -> Self {
        Tag(Cow::Borrowed(name))
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Tag(Cow::Owned(name))
    }
}

impl From<Kind> for Tag {
    fn from(kind: Kind) -> Self {
        Tag(Cow::Borrowed(kind.as_str()))
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Well-known tags for common failure cases.
///
/// Matching on a tag stays string-based; this enum only saves callers from
/// retyping the same names at every failure site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum Kind {
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// The requested feature or operation is not supported
    Unsupported,

    /// Failed to parse input
    Parse,

    /// IO operation failed
    Io,

    /// Requested item not found
    NotFound,

    /// Permission denied
    PermissionDenied,

    /// Timeout occurred
    Timeout,

    /// Invalid argument passed to function
    InvalidArgument,
}

impl Kind {
    /// Returns the kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
