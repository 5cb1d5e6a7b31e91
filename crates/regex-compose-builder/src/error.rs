//! Error types for the pattern builder.

use regex_compose::{ErrorCategory, RegexError};
use thiserror::Error;

/// Errors surfaced by [`crate::PatternBuilder::build`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// An element could not be constructed or applied.
    #[error("pattern error: {0}")]
    Regex(#[from] RegexError),

    /// Closures were nested deeper than the configured limit.
    #[error("nesting depth {depth} exceeds limit {limit}")]
    TooDeep {
        /// Depth that was attempted.
        depth: usize,
        /// Configured limit.
        limit: usize,
    },
}

impl BuildError {
    /// Category of the underlying failure.
    pub fn category(&self) -> ErrorCategory {
        match self {
            BuildError::Regex(err) => err.category(),
            BuildError::TooDeep { .. } => ErrorCategory::InapplicableOperation,
        }
    }
}

/// Result type for builder operations.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_too_deep() {
        let err = BuildError::TooDeep { depth: 5, limit: 4 };
        assert_eq!(err.to_string(), "nesting depth 5 exceeds limit 4");
        assert_eq!(err.category(), ErrorCategory::InapplicableOperation);
    }

    #[test]
    fn test_error_from_regex_error() {
        let err: BuildError = RegexError::EmptyLiteral.into();
        assert!(matches!(err, BuildError::Regex(_)));
        assert_eq!(err.to_string(), "pattern error: literal text must not be empty");
        assert_eq!(err.category(), ErrorCategory::EmptyInput);
    }
}
