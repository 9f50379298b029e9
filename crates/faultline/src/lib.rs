//! # faultline
//!
//! Tagged result values with chained causes for explicit error handling.
//!
//! ## Design Philosophy
//!
//! - **Tag**: know what kind of error occurred; tags are open strings minted
//!   per failure site, with [`Kind`] covering the common cases
//! - **Cause chain**: wrap underlying errors instead of discarding them;
//!   [`TaggedError::has_tag`] matches at any depth of the chain
//! - **Values, not raises**: failures travel by return value; callers branch
//!   with [`TaggedResult::is_tagged`] or fall back with
//!   [`TaggedResult::success`], and [`TaggedResult::raise`] is the single
//!   escape hatch back into panic propagation
//!
//! ## Usage
//!
//! ```rust
//! use faultline::{TaggedError, TaggedResult};
//!
//! fn read_config() -> faultline::Result<String> {
//!     Err(TaggedError::new("ReadError", "config file missing"))
//! }
//!
//! let config = read_config().success().unwrap_or_else(|| "{}".to_string());
//! assert_eq!(config, "{}");
//! assert!(read_config().is_tagged("ReadError"));
//! ```
//!
//! ## Principles
//!
//! - Fallible functions return `Result<T, faultline::TaggedError>`
//! - Foreign errors are wrapped with [`wrap`] / [`wrap_async`], never lost
//! - Same error handled once; subsequent frames only prepend
//!   [`context`](TaggedError::context)

mod error;
mod result;
mod tag;
mod wrap;

pub use error::{Causes, MAX_CHAIN_DEPTH, TaggedError};
pub use result::{Result, TaggedResult};
pub use tag::{Kind, Tag};
pub use wrap::{catch, wrap, wrap_async, wrap_with};
