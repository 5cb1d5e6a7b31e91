//! # regex-compose
//!
//! Builds regular-expression syntax from composable elements and renders the
//! result to PCRE-style text, human-readable descriptions, and structured
//! metadata.
//!
//! This crate provides:
//! - **Escaping**: [`SafeCharacter`] / [`SafeString`] escape text for the
//!   general context or for the inside of a character class
//! - **Components**: leaf elements such as [`Literal`] and [`CharacterClass`]
//! - **Decorators**: [`Quantifier`], [`Group`] and [`Lookaround`], each wrapping
//!   exactly one element
//! - **Collections**: [`ElementCollection`], the ordered elements of one scope
//!
//! ## Usage
//!
//! ```rust
//! use regex_compose::{
//!     Alternation, AnchorKind, ElementCollection, QuantifierKind, ShorthandKind,
//! };
//!
//! let mut scope = ElementCollection::new();
//! scope.append(AnchorKind::Start);
//! scope.append(ShorthandKind::WordChar);
//! scope.quantify_last(QuantifierKind::OneOrMore).unwrap();
//! scope.append(AnchorKind::End);
//! assert_eq!(scope.compile(), "^\\w+$");
//!
//! // Quantifying an alternation groups it first
//! let mut scope = ElementCollection::new();
//! scope.append(Alternation::of_literals(["a", "b"]).unwrap());
//! scope.quantify_last(QuantifierKind::OneOrMore).unwrap();
//! assert_eq!(scope.compile(), "(?:a|b)+");
//! ```
//!
//! ## Output Syntax Quick Reference
//!
//! | Element | Syntax |
//! |---------|--------|
//! | Capturing group | `(...)` |
//! | Non-capturing group | `(?:...)` |
//! | Named group | `(?<name>...)` |
//! | Atomic group | `(?>...)` |
//! | Conditional | `(?(cond)then\|else)` |
//! | Lookahead | `(?=...)` / `(?!...)` |
//! | Lookbehind | `(?<=...)` / `(?<!...)` |
//! | Counted repetition | `{n}` / `{n,}` / `{m,n}` |
//! | Lazy / possessive | `*?` / `*+` |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod collection;
pub mod component;
mod config;
pub mod decorator;
mod element;
mod error;
mod safe_char;

pub use collection::ElementCollection;
pub use component::{
    Alternation, AnchorKind, CharacterClass, CharacterClassKind, Component, Literal, RawPattern,
    ShorthandKind,
};
pub use config::{RenderConfig, RenderConfigBuilder, DEFAULT_DESCRIBE_SEPARATOR};
pub use decorator::{
    compose, is_valid_group_name, normalize, Decoration, Decorator, Group, GroupKind, Lookaround,
    LookaroundKind, Precedence, Quantifier, QuantifierKind, QuantifierMode,
};
pub use element::{Element, RegexElement};
pub use error::{ErrorCategory, RegexError, RegexResult};
pub use safe_char::{MetaCharacter, SafeCharacter, SafeString};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let _: Option<ElementCollection> = None;
        let _: Option<RenderConfig> = None;
        let _: Option<Element> = None;
        let _: Option<RegexResult<()>> = None;
    }

    #[test]
    fn test_end_to_end_examples() {
        assert_eq!(Literal::new("a.b*").unwrap().compile(), "a\\.b\\*");
        assert_eq!(CharacterClass::range("a", "z").unwrap().compile(), "[a-z]");
        assert_eq!(CharacterClass::range("-", "9").unwrap().compile(), "[\\--9]");

        let ab = Literal::new("ab").unwrap().into();
        let q = Quantifier::new(ab, QuantifierKind::exactly(2).unwrap()).unwrap();
        assert_eq!(q.compile(), "ab{2}");

        let yes = Literal::new("yes").unwrap().into();
        let no = Literal::new("no").unwrap().into();
        let cond = Group::conditional("1", yes, Some(no)).unwrap();
        assert_eq!(cond.compile(), "(?(1)yes|no)");

        let digits =
            Quantifier::new(ShorthandKind::Digit.into(), QuantifierKind::OneOrMore).unwrap();
        let look = Lookaround::new(LookaroundKind::PositiveLookahead, digits.into());
        assert_eq!(look.compile(), "(?=\\d+)");
    }

    #[test]
    fn test_named_group_examples() {
        let x: Element = Literal::new("x").unwrap().into();
        assert_eq!(
            Group::named("1bad", x.clone()).unwrap_err().category(),
            ErrorCategory::InvalidIdentifier
        );
        assert_eq!(Group::named("ok_1", x).unwrap().compile(), "(?<ok_1>x)");
    }

    #[test]
    fn test_elements_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Element>();
        assert_send_sync::<ElementCollection>();
    }
}
