//! Error types for pattern construction.

use thiserror::Error;

/// Broad classification of a [`RegexError`].
///
/// Every concrete error belongs to exactly one category. None of them are
/// retryable: they all describe a programming mistake in how elements were
/// put together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorCategory {
    /// A literal, character class, alternation or operand was empty.
    EmptyInput,
    /// A character range or repetition bound was malformed or out of order.
    InvalidRange,
    /// A group name is not a valid identifier.
    InvalidIdentifier,
    /// An operation was applied where it has no meaning.
    InapplicableOperation,
    /// Mutually exclusive modifiers were requested together.
    ConflictingModifiers,
}

/// Errors that can occur while constructing or decorating regex elements.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    /// Literal text was empty.
    #[error("literal text must not be empty")]
    EmptyLiteral,

    /// Character class was built from an empty set of characters.
    #[error("character class must contain at least one character")]
    EmptyCharacterClass,

    /// Alternation was built without alternatives.
    #[error("alternation requires at least one alternative")]
    EmptyAlternation,

    /// A value that must be exactly one Unicode scalar was not.
    #[error("expected exactly one character, got {length} in {text:?}")]
    NotSingleCharacter {
        /// The offending text.
        text: String,
        /// Number of Unicode scalar values in `text`.
        length: usize,
    },

    /// Range start has a higher codepoint than its end.
    #[error("range start {start:?} is greater than end {end:?}")]
    RangeStartGreaterThanEnd {
        /// Lower bound as given.
        start: char,
        /// Upper bound as given.
        end: char,
    },

    /// Group name does not match `[A-Za-z_][A-Za-z0-9_]*`.
    #[error("invalid group name {0:?}: must start with a letter or underscore and contain only letters, digits and underscores")]
    InvalidIdentifier(String),

    /// Named group without a name.
    #[error("named group requires a name")]
    MissingName,

    /// A name was supplied for a group kind that takes none.
    #[error("{kind} group cannot carry a name")]
    UnexpectedName {
        /// Type tag of the group kind.
        kind: &'static str,
    },

    /// Conditional group without a condition.
    #[error("conditional group requires a condition")]
    MissingCondition,

    /// Condition or else-branch on a non-conditional group.
    #[error("{kind} group cannot carry a condition or else branch")]
    UnexpectedCondition {
        /// Type tag of the group kind.
        kind: &'static str,
    },

    /// Group body compiled to the empty string.
    #[error("group body must not be empty")]
    EmptyGroupBody,

    /// Quantifier operand or alternative compiled to the empty string.
    #[error("{0} cannot apply to an empty pattern")]
    EmptyOperand(&'static str),

    /// Quantifier count below zero.
    #[error("quantifier count must not be negative, got {0}")]
    NegativeCount(i64),

    /// `between` quantifier with `min > max`.
    #[error("quantifier minimum {min} is greater than maximum {max}")]
    MinGreaterThanMax {
        /// Lower repetition bound.
        min: u64,
        /// Upper repetition bound.
        max: u64,
    },

    /// Decoration requested on an empty scope.
    #[error("no preceding element to apply {0} to")]
    NoPrecedingElement(&'static str),

    /// Quantifier applied to an element that cannot repeat.
    #[error("{0} cannot be quantified")]
    UnquantifiableElement(&'static str),

    /// Lazy/possessive modifier applied to something that is not a quantifier.
    #[error("{modifier} modifier requires a preceding quantifier, found {found}")]
    ModifierWithoutQuantifier {
        /// `lazy` or `possessive`.
        modifier: &'static str,
        /// Type tag of the element actually found.
        found: &'static str,
    },

    /// Lazy and possessive requested at the same time.
    #[error("quantifier cannot be both lazy and possessive")]
    ConflictingModifiers,
}

impl RegexError {
    /// Returns the category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            RegexError::EmptyLiteral
            | RegexError::EmptyCharacterClass
            | RegexError::EmptyAlternation
            | RegexError::EmptyOperand(_) => ErrorCategory::EmptyInput,
            RegexError::NotSingleCharacter { .. }
            | RegexError::RangeStartGreaterThanEnd { .. }
            | RegexError::NegativeCount(_)
            | RegexError::MinGreaterThanMax { .. } => ErrorCategory::InvalidRange,
            RegexError::InvalidIdentifier(_) => ErrorCategory::InvalidIdentifier,
            RegexError::MissingName
            | RegexError::UnexpectedName { .. }
            | RegexError::MissingCondition
            | RegexError::UnexpectedCondition { .. }
            | RegexError::EmptyGroupBody
            | RegexError::NoPrecedingElement(_)
            | RegexError::UnquantifiableElement(_)
            | RegexError::ModifierWithoutQuantifier { .. } => ErrorCategory::InapplicableOperation,
            RegexError::ConflictingModifiers => ErrorCategory::ConflictingModifiers,
        }
    }
}

/// Result type for pattern construction.
pub type RegexResult<T> = std::result::Result<T, RegexError>;
