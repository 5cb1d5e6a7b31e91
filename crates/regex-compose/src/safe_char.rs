//! Codepoint-level classification and escaping.
//!
//! Regex text is escaped in one of two contexts:
//!
//! | Context | Escaped characters |
//! |---------|--------------------|
//! | General | `. * + ? ^ $ \ \| ( ) [ ] { } - : ! = < > /` |
//! | Character class (`[...]`) | `\ ] ^ - [` |
//!
//! Using the general escaper inside a class is harmless for most characters,
//! but using the class escaper outside one silently turns metacharacters live.
//! The two functions are therefore kept apart and every caller picks one.

use std::fmt;

use crate::error::{RegexError, RegexResult};

/// A regex metacharacter recognised by the escaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaCharacter {
    /// `.`
    Dot,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`
    Question,
    /// `^`
    Caret,
    /// `$`
    Dollar,
    /// `\`
    Backslash,
    /// `|`
    Pipe,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `-`
    Hyphen,
    /// `:`
    Colon,
    /// `!`
    Exclamation,
    /// `=`
    Equals,
    /// `<`
    LessThan,
    /// `>`
    GreaterThan,
    /// `/`
    Slash,
}

impl MetaCharacter {
    /// All recognised metacharacters.
    pub const ALL: [MetaCharacter; 21] = [
        MetaCharacter::Dot,
        MetaCharacter::Star,
        MetaCharacter::Plus,
        MetaCharacter::Question,
        MetaCharacter::Caret,
        MetaCharacter::Dollar,
        MetaCharacter::Backslash,
        MetaCharacter::Pipe,
        MetaCharacter::OpenParen,
        MetaCharacter::CloseParen,
        MetaCharacter::OpenBracket,
        MetaCharacter::CloseBracket,
        MetaCharacter::OpenBrace,
        MetaCharacter::CloseBrace,
        MetaCharacter::Hyphen,
        MetaCharacter::Colon,
        MetaCharacter::Exclamation,
        MetaCharacter::Equals,
        MetaCharacter::LessThan,
        MetaCharacter::GreaterThan,
        MetaCharacter::Slash,
    ];

    /// Classifies a character, returning `None` for ordinary characters.
    pub fn from_char(c: char) -> Option<Self> {
        let meta = match c {
            '.' => MetaCharacter::Dot,
            '*' => MetaCharacter::Star,
            '+' => MetaCharacter::Plus,
            '?' => MetaCharacter::Question,
            '^' => MetaCharacter::Caret,
            '$' => MetaCharacter::Dollar,
            '\\' => MetaCharacter::Backslash,
            '|' => MetaCharacter::Pipe,
            '(' => MetaCharacter::OpenParen,
            ')' => MetaCharacter::CloseParen,
            '[' => MetaCharacter::OpenBracket,
            ']' => MetaCharacter::CloseBracket,
            '{' => MetaCharacter::OpenBrace,
            '}' => MetaCharacter::CloseBrace,
            '-' => MetaCharacter::Hyphen,
            ':' => MetaCharacter::Colon,
            '!' => MetaCharacter::Exclamation,
            '=' => MetaCharacter::Equals,
            '<' => MetaCharacter::LessThan,
            '>' => MetaCharacter::GreaterThan,
            '/' => MetaCharacter::Slash,
            _ => return None,
        };
        Some(meta)
    }

    /// The character this metacharacter stands for.
    pub fn as_char(self) -> char {
        match self {
            MetaCharacter::Dot => '.',
            MetaCharacter::Star => '*',
            MetaCharacter::Plus => '+',
            MetaCharacter::Question => '?',
            MetaCharacter::Caret => '^',
            MetaCharacter::Dollar => '$',
            MetaCharacter::Backslash => '\\',
            MetaCharacter::Pipe => '|',
            MetaCharacter::OpenParen => '(',
            MetaCharacter::CloseParen => ')',
            MetaCharacter::OpenBracket => '[',
            MetaCharacter::CloseBracket => ']',
            MetaCharacter::OpenBrace => '{',
            MetaCharacter::CloseBrace => '}',
            MetaCharacter::Hyphen => '-',
            MetaCharacter::Colon => ':',
            MetaCharacter::Exclamation => '!',
            MetaCharacter::Equals => '=',
            MetaCharacter::LessThan => '<',
            MetaCharacter::GreaterThan => '>',
            MetaCharacter::Slash => '/',
        }
    }

    /// Whether this character must be escaped inside `[...]`.
    pub fn is_special_in_character_class(self) -> bool {
        matches!(
            self,
            MetaCharacter::Backslash
                | MetaCharacter::CloseBracket
                | MetaCharacter::Caret
                | MetaCharacter::Hyphen
                | MetaCharacter::OpenBracket
        )
    }
}

/// Exactly one Unicode scalar value, classified for escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SafeCharacter {
    value: char,
    meta: Option<MetaCharacter>,
}

impl SafeCharacter {
    /// Classifies a single character.
    pub fn new(value: char) -> Self {
        Self {
            value,
            meta: MetaCharacter::from_char(value),
        }
    }

    /// Builds a character from text holding exactly one Unicode scalar value.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::NotSingleCharacter`] when `text` is empty or
    /// holds more than one scalar value.
    pub fn from_text(text: &str) -> RegexResult<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Self::new(c)),
            _ => Err(RegexError::NotSingleCharacter {
                text: text.to_string(),
                length: text.chars().count(),
            }),
        }
    }

    /// The underlying character.
    pub fn value(&self) -> char {
        self.value
    }

    /// The codepoint of the underlying character.
    pub fn codepoint(&self) -> u32 {
        u32::from(self.value)
    }

    /// Whether this is a regex metacharacter in the general context.
    pub fn is_special(&self) -> bool {
        self.meta.is_some()
    }

    /// Whether this must be escaped inside a character class.
    pub fn is_special_in_character_class(&self) -> bool {
        self.meta
            .is_some_and(MetaCharacter::is_special_in_character_class)
    }

    /// The specific metacharacter, if any.
    pub fn metacharacter(&self) -> Option<MetaCharacter> {
        self.meta
    }

    /// Whether the UTF-8 encoding takes more than one byte.
    pub fn requires_unicode(&self) -> bool {
        self.value.len_utf8() > 1
    }

    /// The character escaped for use outside a character class.
    pub fn escaped(&self) -> String {
        let mut out = String::with_capacity(2);
        self.push_escaped(&mut out);
        out
    }

    /// The character escaped for use inside `[...]`.
    pub fn escaped_for_character_class(&self) -> String {
        let mut out = String::with_capacity(2);
        self.push_escaped_for_character_class(&mut out);
        out
    }

    pub(crate) fn push_escaped(&self, out: &mut String) {
        if self.is_special() {
            out.push('\\');
        }
        out.push(self.value);
    }

    pub(crate) fn push_escaped_for_character_class(&self, out: &mut String) {
        if self.is_special_in_character_class() {
            out.push('\\');
        }
        out.push(self.value);
    }
}

impl From<char> for SafeCharacter {
    fn from(value: char) -> Self {
        Self::new(value)
    }
}

impl TryFrom<&str> for SafeCharacter {
    type Error = RegexError;

    fn try_from(text: &str) -> RegexResult<Self> {
        Self::from_text(text)
    }
}

impl fmt::Display for SafeCharacter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// An ordered sequence of [`SafeCharacter`]s built from raw text.
///
/// `SafeString::from(text).to_string() == text` for every input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SafeString {
    chars: Vec<SafeCharacter>,
}

impl SafeString {
    /// Classifies every codepoint of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().map(SafeCharacter::new).collect(),
        }
    }

    /// The classified characters in order.
    pub fn chars(&self) -> &[SafeCharacter] {
        &self.chars
    }

    /// Number of Unicode scalar values.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the string holds no characters.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Whether any character is a general-context metacharacter.
    pub fn has_special(&self) -> bool {
        self.chars.iter().any(SafeCharacter::is_special)
    }

    /// Whether any character is multi-byte in UTF-8.
    pub fn requires_unicode(&self) -> bool {
        self.chars.iter().any(SafeCharacter::requires_unicode)
    }

    /// The text escaped for use outside a character class.
    pub fn escaped(&self) -> String {
        let mut out = String::with_capacity(self.chars.len() * 2);
        for c in &self.chars {
            c.push_escaped(&mut out);
        }
        out
    }

    /// The text escaped for use inside `[...]`.
    pub fn escaped_for_character_class(&self) -> String {
        let mut out = String::with_capacity(self.chars.len() * 2);
        for c in &self.chars {
            c.push_escaped_for_character_class(&mut out);
        }
        out
    }
}

impl From<&str> for SafeString {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl FromIterator<SafeCharacter> for SafeString {
    fn from_iter<I: IntoIterator<Item = SafeCharacter>>(iter: I) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for SafeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c.value)?;
        }
        Ok(())
    }
}
