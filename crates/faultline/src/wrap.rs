//! Wrappers that convert foreign fallible calls into tagged results.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::error::TaggedError;
use crate::result::Result;
use crate::tag::Tag;

/// Run a fallible call and tag its failure.
///
/// On success the value passes through unchanged. On failure a fresh
/// [`TaggedError`] carries the tag, with the original error preserved as
/// cause rather than discarded.
pub fn wrap<T, E, F>(tag: impl Into<Tag>, f: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let tag = tag.into();
    match f() {
        Ok(value) => Ok(value),
        Err(cause) => {
            debug!(tag = %tag, %cause, "wrapped call failed");
            let message = cause.to_string();
            Err(TaggedError::new(tag, message).with_cause(cause))
        }
    }
}

/// Like [`wrap`], with an override message instead of the cause's own.
pub fn wrap_with<T, E, F>(tag: impl Into<Tag>, message: impl Into<String>, f: F) -> Result<T>
where
    F: FnOnce() -> std::result::Result<T, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let tag = tag.into();
    match f() {
        Ok(value) => Ok(value),
        Err(cause) => {
            debug!(tag = %tag, %cause, "wrapped call failed");
            Err(TaggedError::new(tag, message).with_cause(cause))
        }
    }
}

/// Await a fallible future and tag its failure.
///
/// The transformation runs as a continuation at the caller's `.await`; the
/// wrapper never blocks and always resolves, either to the original success
/// value or to the tagged error. Cancellation of the underlying future
/// passes through unchanged.
pub async fn wrap_async<T, E, Fut>(tag: impl Into<Tag>, fut: Fut) -> Result<T>
where
    Fut: Future<Output = std::result::Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let tag = tag.into();
    match fut.await {
        Ok(value) => Ok(value),
        Err(cause) => {
            debug!(tag = %tag, %cause, "wrapped future failed");
            let message = cause.to_string();
            Err(TaggedError::new(tag, message).with_cause(cause))
        }
    }
}

/// Run a call that may panic and tag the unwound failure.
///
/// A payload raised by [`TaggedResult::raise`](crate::TaggedResult::raise)
/// is re-attached as the cause, so its chain stays matchable. Other payloads
/// keep their string form as the message.
pub fn catch<T, F>(tag: impl Into<Tag>, f: F) -> Result<T>
where
    F: FnOnce() -> T,
{
    let tag = tag.into();
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) => {
            debug!(tag = %tag, "wrapped call panicked");
            let err = match payload.downcast::<TaggedError>() {
                Ok(cause) => {
                    TaggedError::new(tag, cause.message().to_string()).with_cause(*cause)
                }
                Err(payload) => TaggedError::new(tag, panic_message(payload.as_ref())),
            };
            Err(err)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
