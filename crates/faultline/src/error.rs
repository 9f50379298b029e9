//! The tagged failure value and its cause chain.

use crate::tag::{Kind, Tag};
use std::fmt;

/// Maximum cause-chain depth any traversal will follow.
///
/// Chains are finite and acyclic by construction (a cause must exist before
/// it is attached), but traversal fails closed past this bound instead of
/// trusting that invariant.
pub const MAX_CHAIN_DEPTH: usize = 64;

type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure value carrying a tag, a message, and an optional cause.
///
/// Returned in place of raising; immutable after construction except for
/// [`context`](TaggedError::context), which rewrites the message only.
pub struct TaggedError {
    tag: Tag,
    message: String,
    cause: Option<BoxedCause>,
}

impl TaggedError {
    /// Create a new error with the given tag and message.
    pub fn new(tag: impl Into<Tag>, message: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Get the tag.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the cause (if any).
    pub fn cause_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_ref().map(|e| e.as_ref())
    }

    /// Attach a pre-existing error as the cause.
    ///
    /// The cause is stored as-is, never mutated.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if a cause was already set.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.cause.is_none(), "cause already set");
        self.cause = Some(Box::new(cause));
        self
    }

    /// Prepend explanatory text to the message.
    ///
    /// Layers narrative on the way up a call chain without touching the tag
    /// or the cause.
    pub fn context(mut self, prefix: impl AsRef<str>) -> Self {
        let prefix = prefix.as_ref();
        if self.message.is_empty() {
            self.message = prefix.to_string();
        } else {
            self.message = format!("{}: {}", prefix, self.message);
        }
        self
    }

    /// Check whether this error or any error in its cause chain carries the
    /// given tag.
    ///
    /// Traversal is an explicit loop capped at [`MAX_CHAIN_DEPTH`]; anything
    /// deeper counts as no match.
    pub fn has_tag(&self, tag: impl Into<Tag>) -> bool {
        let tag = tag.into();
        let mut current: &(dyn std::error::Error + 'static) = self;
        for _ in 0..MAX_CHAIN_DEPTH {
            if let Some(err) = current.downcast_ref::<TaggedError>() {
                if err.tag == tag {
                    return true;
                }
            }
            match current.source() {
                Some(next) => current = next,
                None => return false,
            }
        }
        false
    }

    /// Iterate over the cause chain, outermost cause first.
    ///
    /// The iterator stops at [`MAX_CHAIN_DEPTH`] entries.
    pub fn causes(&self) -> Causes<'_> {
        Causes {
            next: std::error::Error::source(self),
            remaining: MAX_CHAIN_DEPTH,
        }
    }
}

/// Iterator over a [`TaggedError`]'s cause chain.
pub struct Causes<'a> {
    next: Option<&'a (dyn std::error::Error + 'static)>,
    remaining: usize,
}

impl<'a> Iterator for Causes<'a> {
    type Item = &'a (dyn std::error::Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl fmt::Display for TaggedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for TaggedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.tag)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if let Some(cause) = &self.cause {
            writeln!(f)?;
            writeln!(f, "    Cause: {}", cause)?;
        }

        Ok(())
    }
}

impl std::error::Error for TaggedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for TaggedError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => Kind::NotFound,
            std::io::ErrorKind::PermissionDenied => Kind::PermissionDenied,
            std::io::ErrorKind::TimedOut => Kind::Timeout,
            _ => Kind::Io,
        };
        TaggedError::new(kind, err.to_string()).with_cause(err)
    }
}

impl From<String> for TaggedError {
    fn from(msg: String) -> Self {
        TaggedError::new(Kind::Unexpected, msg)
    }
}

impl From<&str> for TaggedError {
    fn from(msg: &str) -> Self {
        TaggedError::new(Kind::Unexpected, msg)
    }
}

impl TaggedError {
    /// Create an Unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(Kind::Unexpected, message)
    }

    /// Create an Unsupported error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(Kind::Unsupported, message)
    }

    /// Create a Parse error
    pub fn parse_failed(message: impl Into<String>) -> Self {
        Self::new(Kind::Parse, message)
    }

    /// Create a NotFound error
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(Kind::NotFound, format!("'{}' not found", what.into()))
    }

    /// Create a Timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(Kind::Timeout, message)
    }

    /// Create an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Kind::InvalidArgument, message)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TaggedError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("TaggedError", 3)?;
        state.serialize_field("tag", self.tag.as_str())?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("cause", &self.cause.as_ref().map(|c| c.to_string()))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_creation() {
        let err = TaggedError::new("ReadError", "file missing");
        assert_eq!(*err.tag(), "ReadError");
        assert_eq!(err.message(), "file missing");
        assert!(err.cause_ref().is_none());
    }

    #[test]
    fn test_default_tag() {
        let err = TaggedError::new(Tag::default(), "something broke");
        assert_eq!(*err.tag(), "Error");
    }

    #[test]
    fn test_has_tag_self() {
        let err = TaggedError::new("ReadError", "file missing");
        assert!(err.has_tag("ReadError"));
        assert!(!err.has_tag("ParseError"));
    }

    #[test]
    fn test_has_tag_chain() {
        let cause = TaggedError::new("IoError", "connection reset");
        let outer = TaggedError::new("FetchError", "request failed").with_cause(cause);

        assert!(outer.has_tag("FetchError"));
        assert!(outer.has_tag("IoError"));
        assert!(!outer.has_tag("ParseError"));
    }

    #[test]
    fn test_has_tag_skips_untagged_links() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let inner = TaggedError::new("ReadError", "read failed").with_cause(io);
        let outer = TaggedError::new("ConfigError", "load failed").with_cause(inner);

        assert!(outer.has_tag("ReadError"));
        assert!(outer.has_tag("ConfigError"));
    }

    #[test]
    fn test_has_tag_depth_bound() {
        let mut err = TaggedError::new("Innermost", "the origin");
        for i in 0..MAX_CHAIN_DEPTH + 8 {
            err = TaggedError::new(format!("Layer{}", i), "wrapped").with_cause(err);
        }

        // The innermost tag sits past the traversal cap: fail closed.
        assert!(!err.has_tag("Innermost"));
        // Tags within the cap still match.
        assert!(err.has_tag(format!("Layer{}", MAX_CHAIN_DEPTH + 7)));
        assert!(err.has_tag(format!("Layer{}", MAX_CHAIN_DEPTH)));
    }

    #[test]
    fn test_context_prepends() {
        let err = TaggedError::new("ReadError", "file missing").context("loading config");
        assert_eq!(err.message(), "loading config: file missing");
        assert_eq!(*err.tag(), "ReadError");
    }

    #[test]
    fn test_context_preserves_cause() {
        let cause = TaggedError::new("IoError", "disk gone");
        let err = TaggedError::new("ReadError", "read failed")
            .with_cause(cause)
            .context("loading config");

        assert!(err.has_tag("IoError"));
        assert_eq!(err.message(), "loading config: read failed");
    }

    #[test]
    fn test_context_on_empty_message() {
        let err = TaggedError::new("ReadError", "").context("loading config");
        assert_eq!(err.message(), "loading config");
    }

    #[test]
    fn test_causes_iterator() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let inner = TaggedError::new("ReadError", "read failed").with_cause(io);
        let outer = TaggedError::new("ConfigError", "load failed").with_cause(inner);

        let messages: Vec<String> = outer.causes().map(|c| c.to_string()).collect();
        assert_eq!(
            messages,
            vec!["ReadError => read failed".to_string(), "no such file".to_string()]
        );
    }

    #[test]
    fn test_display() {
        let err = TaggedError::new("ParseError", "unexpected EOF");
        assert_eq!(format!("{}", err), "ParseError => unexpected EOF");

        let err = TaggedError::new("ParseError", "");
        assert_eq!(format!("{}", err), "ParseError");
    }

    #[test]
    fn test_debug_includes_cause() {
        let cause = TaggedError::new("IoError", "disk gone");
        let err = TaggedError::new("ReadError", "read failed").with_cause(cause);

        let debug = format!("{:?}", err);
        assert!(debug.contains("ReadError"));
        assert!(debug.contains("Message: read failed"));
        assert!(debug.contains("Cause: IoError => disk gone"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = TaggedError::from(io);
        assert!(err.has_tag(Kind::NotFound));
        assert!(err.cause_ref().is_some());

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err = TaggedError::from(io);
        assert!(err.has_tag(Kind::Io));
    }

    #[test]
    fn test_convenience_constructors() {
        let err = TaggedError::not_found("config.toml");
        assert!(err.has_tag(Kind::NotFound));
        assert_eq!(err.message(), "'config.toml' not found");

        let err = TaggedError::parse_failed("unexpected token");
        assert!(err.has_tag(Kind::Parse));

        let err = TaggedError::unexpected("what");
        assert!(err.has_tag(Kind::Unexpected));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize() {
        let cause = TaggedError::new("IoError", "disk gone");
        let err = TaggedError::new("ReadError", "read failed").with_cause(cause);

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["tag"], "ReadError");
        assert_eq!(json["message"], "read failed");
        assert_eq!(json["cause"], "IoError => disk gone");
    }
}
