use log::trace;
use serde_json::Value;

use crate::element::{base_metadata, RegexElement};
use crate::error::{RegexError, RegexResult};
use crate::safe_char::{SafeCharacter, SafeString};

/// How a character class was specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CharacterClassKind {
    /// An explicit set of member characters.
    Set,
    /// An inclusive codepoint range.
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Members {
    Set(SafeString),
    // Endpoints are kept apart: re-splitting a joined "from-to" breaks when
    // either endpoint is '-'.
    Range {
        from: SafeCharacter,
        to: SafeCharacter,
    },
}

/// A bracketed character class, `[...]` or `[^...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterClass {
    members: Members,
    negated: bool,
}

impl CharacterClass {
    /// Matches any one of the characters in `chars`.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::EmptyCharacterClass`] when `chars` is empty.
    pub fn any_of(chars: &str) -> RegexResult<Self> {
        Self::set(chars, false)
    }

    /// Matches any character not in `chars`.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::EmptyCharacterClass`] when `chars` is empty.
    pub fn none_of(chars: &str) -> RegexResult<Self> {
        Self::set(chars, true)
    }

    /// Matches any character whose codepoint lies in `from..=to`.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::NotSingleCharacter`] when a bound is not exactly
    /// one Unicode scalar value, and [`RegexError::RangeStartGreaterThanEnd`]
    /// when the bounds are out of order.
    pub fn range(from: &str, to: &str) -> RegexResult<Self> {
        Self::bounded(from, to, false)
    }

    /// Matches any character whose codepoint lies outside `from..=to`.
    ///
    /// # Errors
    ///
    /// Same as [`CharacterClass::range`].
    pub fn negated_range(from: &str, to: &str) -> RegexResult<Self> {
        Self::bounded(from, to, true)
    }

    /// Range constructor for callers that already hold `char`s.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::RangeStartGreaterThanEnd`] when `from > to`.
    pub fn char_range(from: char, to: char, negated: bool) -> RegexResult<Self> {
        if from > to {
            return Err(RegexError::RangeStartGreaterThanEnd {
                start: from,
                end: to,
            });
        }
        trace!("character range {:?}-{:?} negated={}", from, to, negated);
        Ok(Self {
            members: Members::Range {
                from: SafeCharacter::new(from),
                to: SafeCharacter::new(to),
            },
            negated,
        })
    }

    fn set(chars: &str, negated: bool) -> RegexResult<Self> {
        if chars.is_empty() {
            return Err(RegexError::EmptyCharacterClass);
        }
        trace!("character set {:?} negated={}", chars, negated);
        Ok(Self {
            members: Members::Set(SafeString::new(chars)),
            negated,
        })
    }

    fn bounded(from: &str, to: &str, negated: bool) -> RegexResult<Self> {
        let from = SafeCharacter::from_text(from)?;
        let to = SafeCharacter::from_text(to)?;
        Self::char_range(from.value(), to.value(), negated)
    }

    /// Whether the class is specified as a set or a range.
    pub fn kind(&self) -> CharacterClassKind {
        match self.members {
            Members::Set(_) => CharacterClassKind::Set,
            Members::Range { .. } => CharacterClassKind::Range,
        }
    }

    /// Whether the class matches the complement of its members.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Member characters, for set classes.
    pub fn chars(&self) -> Option<&SafeString> {
        match &self.members {
            Members::Set(chars) => Some(chars),
            Members::Range { .. } => None,
        }
    }

    /// Inclusive bounds, for range classes.
    pub fn bounds(&self) -> Option<(char, char)> {
        match self.members {
            Members::Set(_) => None,
            Members::Range { from, to } => Some((from.value(), to.value())),
        }
    }

    fn body(&self) -> String {
        match &self.members {
            Members::Set(chars) => chars.escaped_for_character_class(),
            Members::Range { from, to } => format!(
                "{}-{}",
                from.escaped_for_character_class(),
                to.escaped_for_character_class()
            ),
        }
    }
}

impl RegexElement for CharacterClass {
    fn compile(&self) -> String {
        let caret = if self.negated { "^" } else { "" };
        format!("[{}{}]", caret, self.body())
    }

    fn type_tag(&self) -> &'static str {
        "character_class"
    }

    fn can_be_quantified(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        let prefix = if self.negated { "none of" } else { "any of" };
        match &self.members {
            Members::Set(chars) => format!("{} {:?}", prefix, chars.to_string()),
            Members::Range { from, to } => {
                let relation = if self.negated { "outside" } else { "in" };
                format!(
                    "a character {} the range {:?} to {:?}",
                    relation,
                    from.value(),
                    to.value()
                )
            }
        }
    }

    fn metadata(&self) -> Value {
        let mut map = base_metadata(self);
        let kind = match self.kind() {
            CharacterClassKind::Set => "set",
            CharacterClassKind::Range => "range",
        };
        map.insert("kind".into(), Value::from(kind));
        map.insert("negated".into(), Value::from(self.negated));
        match &self.members {
            Members::Set(chars) => {
                map.insert("members".into(), Value::from(chars.to_string()));
            }
            Members::Range { from, to } => {
                map.insert("from".into(), Value::from(from.to_string()));
                map.insert("to".into(), Value::from(to.to_string()));
            }
        }
        Value::Object(map)
    }

    fn requires_unicode(&self) -> bool {
        match &self.members {
            Members::Set(chars) => chars.requires_unicode(),
            Members::Range { from, to } => from.requires_unicode() || to.requires_unicode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_of() {
        assert_eq!(CharacterClass::any_of("abc").unwrap().compile(), "[abc]");
        assert_eq!(CharacterClass::none_of("abc").unwrap().compile(), "[^abc]");
    }

    #[test]
    fn test_set_uses_class_escaping() {
        // '.' and '*' are literal inside brackets; ']' and '-' are not.
        assert_eq!(CharacterClass::any_of(".*]-").unwrap().compile(), "[.*\\]\\-]");
        assert_eq!(CharacterClass::any_of("^").unwrap().compile(), "[\\^]");
    }

    #[test]
    fn test_empty_set_fails() {
        assert_eq!(CharacterClass::any_of(""), Err(RegexError::EmptyCharacterClass));
        assert_eq!(CharacterClass::none_of(""), Err(RegexError::EmptyCharacterClass));
    }

    #[test]
    fn test_range() {
        assert_eq!(CharacterClass::range("a", "z").unwrap().compile(), "[a-z]");
        assert_eq!(
            CharacterClass::negated_range("0", "9").unwrap().compile(),
            "[^0-9]"
        );
    }

    #[test]
    fn test_range_with_hyphen_endpoint() {
        assert_eq!(CharacterClass::range("-", "9").unwrap().compile(), "[\\--9]");
        assert_eq!(CharacterClass::range("!", "-").unwrap().compile(), "[!-\\-]");
        assert_eq!(
            CharacterClass::range("-", "-").unwrap().bounds(),
            Some(('-', '-'))
        );
    }

    #[test]
    fn test_range_rejects_multi_character_bound() {
        assert!(matches!(
            CharacterClass::range("ab", "z"),
            Err(RegexError::NotSingleCharacter { length: 2, .. })
        ));
        assert!(matches!(
            CharacterClass::range("a", ""),
            Err(RegexError::NotSingleCharacter { length: 0, .. })
        ));
    }

    #[test]
    fn test_range_rejects_reversed_bounds() {
        assert_eq!(
            CharacterClass::range("z", "a"),
            Err(RegexError::RangeStartGreaterThanEnd { start: 'z', end: 'a' })
        );
    }

    #[test]
    fn test_unicode_range_metadata() {
        let class = CharacterClass::range("α", "ω").unwrap();
        assert_eq!(class.compile(), "[α-ω]");
        let meta = class.metadata();
        assert_eq!(meta["requiresUnicode"], true);
        assert_eq!(meta["kind"], "range");
        assert_eq!(meta["from"], "α");
        assert_eq!(meta["to"], "ω");
    }

    #[test]
    fn test_ascii_set_does_not_require_unicode() {
        let class = CharacterClass::any_of("xyz").unwrap();
        assert!(!class.requires_unicode());
        assert_eq!(class.kind(), CharacterClassKind::Set);
        assert_eq!(class.chars().map(|c| c.to_string()), Some("xyz".to_string()));
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            CharacterClass::range("a", "f").unwrap().describe(),
            "a character in the range 'a' to 'f'"
        );
        assert_eq!(
            CharacterClass::none_of("xy").unwrap().describe(),
            "none of \"xy\""
        );
    }
}
