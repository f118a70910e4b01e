#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    clippy::checked_conversions,
    clippy::if_not_else,
    clippy::ignored_unit_patterns,
    clippy::map_unwrap_or,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::single_match_else
)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![no_std]

//! A URI reference engine compliant with [RFC 3986].
//!
//! The crate parses strings into [`Uri`] references without copying them,
//! exposes their components, and implements the algorithms that operate on
//! them:
//!
//! - [serialization](recompose::serialize) back into text;
//! - [reference resolution](Uri::resolve_against) (RFC 3986, Section 5);
//! - [relative reference creation](reference::create_reference), the
//!   inverse of resolution;
//! - [syntax-based normalization](normalize::Normalizer) (RFC 3986, Section 6.2.2);
//! - a [query codec](query) for `key=value&key=value` strings.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! # Examples
//!
//! ```
//! use uriref::Uri;
//!
//! let base = Uri::parse("http://example.com/a/b/c")?;
//! let target = Uri::parse("../x?lang=en")?.resolve_against(&base).unwrap();
//! assert_eq!(target, "http://example.com/a/x?lang=en");
//!
//! let reference = target.make_relative_to(&base, false).unwrap();
//! assert_eq!(reference, "../x?lang=en");
//! # Ok::<_, uriref::ParseError>(())
//! ```
//!
//! # Feature flags
//!
//! - `std` (default): Enables `std` support (implies `impl-error`).
//! - `impl-error`: Implements the `Error` trait for error types
//!   (from `core` when `std` is disabled).
//! - `serde`: Enables `serde` support for [`Uri`].
//! - `log`: Emits diagnostic records through the [`log`] facade.
//!
//! [`log`]: https://docs.rs/log

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod macros;

pub mod component;
pub mod normalize;
pub mod pct_enc;
pub mod query;
pub mod recompose;
pub mod reference;
pub mod resolve;

mod fmt;
mod imp;
mod parse;
mod span;

pub use imp::Uri;
pub use parse::{Component, ParseError, ParseErrorKind};
pub use span::Span;

#[cfg(all(feature = "impl-error", not(feature = "std")))]
use core::error::Error;
#[cfg(feature = "std")]
use std::error::Error;
