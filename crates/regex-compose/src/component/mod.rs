//! Leaf content generators.
//!
//! Components map a value straight to regex syntax. They never wrap another
//! element, with the exception of [`Alternation`] which holds a list of
//! alternatives side by side.
//!
//! | Component | Example | Compiled |
//! |-----------|---------|----------|
//! | [`Literal`] | `Literal::new("a.b")` | `a\.b` |
//! | [`CharacterClass`] | `CharacterClass::range("a", "z")` | `[a-z]` |
//! | [`AnchorKind`] | `AnchorKind::Start` | `^` |
//! | [`ShorthandKind`] | `ShorthandKind::Digit` | `\d` |
//! | [`Alternation`] | `Alternation::of_literals(["a", "b"])` | `a\|b` |
//! | [`RawPattern`] | `RawPattern::new("\\d{3}")` | `\d{3}` |

mod alternation;
mod class;
mod literal;
mod raw;

use std::fmt;

use serde_json::Value;

use crate::element::{base_metadata, RegexElement};

pub use alternation::Alternation;
pub use class::{CharacterClass, CharacterClassKind};
pub use literal::Literal;
pub use raw::RawPattern;

/// A leaf regex element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Escaped literal text.
    Literal(Literal),
    /// Bracketed character class.
    CharacterClass(CharacterClass),
    /// Zero-width position anchor.
    Anchor(AnchorKind),
    /// Predefined class such as `\d`.
    Shorthand(ShorthandKind),
    /// Alternatives joined by `|`.
    Alternation(Alternation),
    /// Pre-compiled syntax spliced verbatim.
    RawPattern(RawPattern),
}

impl RegexElement for Component {
    fn compile(&self) -> String {
        match self {
            Component::Literal(l) => l.compile(),
            Component::CharacterClass(c) => c.compile(),
            Component::Anchor(a) => a.compile(),
            Component::Shorthand(s) => s.compile(),
            Component::Alternation(a) => a.compile(),
            Component::RawPattern(r) => r.compile(),
        }
    }

    fn type_tag(&self) -> &'static str {
        match self {
            Component::Literal(l) => l.type_tag(),
            Component::CharacterClass(c) => c.type_tag(),
            Component::Anchor(a) => a.type_tag(),
            Component::Shorthand(s) => s.type_tag(),
            Component::Alternation(a) => a.type_tag(),
            Component::RawPattern(r) => r.type_tag(),
        }
    }

    fn can_be_quantified(&self) -> bool {
        match self {
            Component::Literal(l) => l.can_be_quantified(),
            Component::CharacterClass(c) => c.can_be_quantified(),
            Component::Anchor(a) => a.can_be_quantified(),
            Component::Shorthand(s) => s.can_be_quantified(),
            Component::Alternation(a) => a.can_be_quantified(),
            Component::RawPattern(r) => r.can_be_quantified(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Component::Literal(l) => l.describe(),
            Component::CharacterClass(c) => c.describe(),
            Component::Anchor(a) => a.describe(),
            Component::Shorthand(s) => s.describe(),
            Component::Alternation(a) => a.describe(),
            Component::RawPattern(r) => r.describe(),
        }
    }

    fn metadata(&self) -> Value {
        match self {
            Component::Literal(l) => l.metadata(),
            Component::CharacterClass(c) => c.metadata(),
            Component::Anchor(a) => a.metadata(),
            Component::Shorthand(s) => s.metadata(),
            Component::Alternation(a) => a.metadata(),
            Component::RawPattern(r) => r.metadata(),
        }
    }

    fn requires_unicode(&self) -> bool {
        match self {
            Component::Literal(l) => l.requires_unicode(),
            Component::CharacterClass(c) => c.requires_unicode(),
            Component::Anchor(a) => a.requires_unicode(),
            Component::Shorthand(s) => s.requires_unicode(),
            Component::Alternation(a) => a.requires_unicode(),
            Component::RawPattern(r) => r.requires_unicode(),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compile())
    }
}

// =============================================================================
// Anchors
// =============================================================================

/// Zero-width position anchors. Never quantifiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AnchorKind {
    /// `^`: start of input, or of a line in multiline mode.
    Start,
    /// `$`: end of input, or of a line in multiline mode.
    End,
    /// `\A`: start of input regardless of mode.
    StringStart,
    /// `\z`: end of input regardless of mode.
    StringEnd,
    /// `\b`
    WordBoundary,
    /// `\B`
    NonWordBoundary,
}

impl AnchorKind {
    /// The regex syntax for this anchor.
    pub fn syntax(self) -> &'static str {
        match self {
            AnchorKind::Start => "^",
            AnchorKind::End => "$",
            AnchorKind::StringStart => "\\A",
            AnchorKind::StringEnd => "\\z",
            AnchorKind::WordBoundary => "\\b",
            AnchorKind::NonWordBoundary => "\\B",
        }
    }

    /// Metadata name of this anchor.
    pub fn name(self) -> &'static str {
        match self {
            AnchorKind::Start => "start",
            AnchorKind::End => "end",
            AnchorKind::StringStart => "string_start",
            AnchorKind::StringEnd => "string_end",
            AnchorKind::WordBoundary => "word_boundary",
            AnchorKind::NonWordBoundary => "non_word_boundary",
        }
    }
}

impl RegexElement for AnchorKind {
    fn compile(&self) -> String {
        self.syntax().to_string()
    }

    fn type_tag(&self) -> &'static str {
        "anchor"
    }

    fn can_be_quantified(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        match self {
            AnchorKind::Start => "start of line",
            AnchorKind::End => "end of line",
            AnchorKind::StringStart => "start of string",
            AnchorKind::StringEnd => "end of string",
            AnchorKind::WordBoundary => "a word boundary",
            AnchorKind::NonWordBoundary => "a non-word boundary",
        }
        .to_string()
    }

    fn metadata(&self) -> Value {
        let mut map = base_metadata(self);
        map.insert("kind".into(), Value::from(self.name()));
        Value::Object(map)
    }

    fn requires_unicode(&self) -> bool {
        false
    }
}

// =============================================================================
// Shorthand classes
// =============================================================================

/// Predefined character classes. Always quantifiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShorthandKind {
    /// `.`
    AnyChar,
    /// `\d`
    Digit,
    /// `\D`
    NonDigit,
    /// `\w`
    WordChar,
    /// `\W`
    NonWordChar,
    /// `\s`
    Whitespace,
    /// `\S`
    NonWhitespace,
    /// `\p{L}`: any Unicode letter.
    Letter,
}

impl ShorthandKind {
    /// The regex syntax for this class.
    pub fn syntax(self) -> &'static str {
        match self {
            ShorthandKind::AnyChar => ".",
            ShorthandKind::Digit => "\\d",
            ShorthandKind::NonDigit => "\\D",
            ShorthandKind::WordChar => "\\w",
            ShorthandKind::NonWordChar => "\\W",
            ShorthandKind::Whitespace => "\\s",
            ShorthandKind::NonWhitespace => "\\S",
            ShorthandKind::Letter => "\\p{L}",
        }
    }

    /// Metadata name of this class.
    pub fn name(self) -> &'static str {
        match self {
            ShorthandKind::AnyChar => "any_char",
            ShorthandKind::Digit => "digit",
            ShorthandKind::NonDigit => "non_digit",
            ShorthandKind::WordChar => "word_char",
            ShorthandKind::NonWordChar => "non_word_char",
            ShorthandKind::Whitespace => "whitespace",
            ShorthandKind::NonWhitespace => "non_whitespace",
            ShorthandKind::Letter => "letter",
        }
    }
}

impl RegexElement for ShorthandKind {
    fn compile(&self) -> String {
        self.syntax().to_string()
    }

    fn type_tag(&self) -> &'static str {
        "shorthand"
    }

    fn can_be_quantified(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        match self {
            ShorthandKind::AnyChar => "any character",
            ShorthandKind::Digit => "a digit",
            ShorthandKind::NonDigit => "a non-digit",
            ShorthandKind::WordChar => "a word character",
            ShorthandKind::NonWordChar => "a non-word character",
            ShorthandKind::Whitespace => "a whitespace character",
            ShorthandKind::NonWhitespace => "a non-whitespace character",
            ShorthandKind::Letter => "a letter",
        }
        .to_string()
    }

    fn metadata(&self) -> Value {
        let mut map = base_metadata(self);
        map.insert("kind".into(), Value::from(self.name()));
        Value::Object(map)
    }

    fn requires_unicode(&self) -> bool {
        matches!(self, ShorthandKind::Letter)
    }
}
