//! # regex-compose-builder
//!
//! Fluent construction of regular expressions on top of `regex-compose`.
//!
//! Nested scopes (groups, lookarounds, alternatives) are written as
//! closures that receive a fresh builder. Errors are deferred: the first
//! invalid step is remembered and reported by [`PatternBuilder::build`].
//!
//! ## Usage
//!
//! ```rust
//! use regex_compose_builder::PatternBuilder;
//!
//! let pattern = PatternBuilder::new()
//!     .start()
//!     .named_capture("year", |p| p.digit().exactly(4))
//!     .literal("-")
//!     .named_capture("month", |p| p.digit().exactly(2))
//!     .end()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(pattern.as_str(), "^(?<year>\\d{4})\\-(?<month>\\d{2})$");
//! assert_eq!(pattern.metadata()["captureGroupCount"], 2);
//! ```
//!
//! ```rust
//! use regex_compose_builder::{ErrorCategory, PatternBuilder};
//!
//! // Nothing precedes the quantifier; the error surfaces at build time
//! let err = PatternBuilder::new().one_or_more().digit().build().unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::InapplicableOperation);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod builder;
mod config;
mod error;
mod pattern;

pub use builder::PatternBuilder;
pub use config::{BuilderConfig, BuilderConfigBuilder, DEFAULT_MAX_DEPTH};
pub use error::{BuildError, BuildResult};
pub use pattern::Pattern;

pub use regex_compose::{
    Decoration, ErrorCategory, GroupKind, LookaroundKind, QuantifierKind, RegexError,
    RenderConfig,
};
