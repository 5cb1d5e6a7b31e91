use log::trace;
use serde_json::Value;

use crate::element::{base_metadata, Element, RegexElement};

/// Lookaround assertion kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LookaroundKind {
    /// `(?=...)`
    PositiveLookahead,
    /// `(?!...)`
    NegativeLookahead,
    /// `(?<=...)`
    PositiveLookbehind,
    /// `(?<!...)`
    NegativeLookbehind,
}

impl LookaroundKind {
    fn opener(self) -> &'static str {
        match self {
            LookaroundKind::PositiveLookahead => "(?=",
            LookaroundKind::NegativeLookahead => "(?!",
            LookaroundKind::PositiveLookbehind => "(?<=",
            LookaroundKind::NegativeLookbehind => "(?<!",
        }
    }

    /// Metadata name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            LookaroundKind::PositiveLookahead => "positive_lookahead",
            LookaroundKind::NegativeLookahead => "negative_lookahead",
            LookaroundKind::PositiveLookbehind => "positive_lookbehind",
            LookaroundKind::NegativeLookbehind => "negative_lookbehind",
        }
    }

    /// Whether the assertion looks behind the current position.
    pub fn is_lookbehind(self) -> bool {
        matches!(
            self,
            LookaroundKind::PositiveLookbehind | LookaroundKind::NegativeLookbehind
        )
    }

    /// Whether the assertion succeeds when its content does not match.
    pub fn is_negative(self) -> bool {
        matches!(
            self,
            LookaroundKind::NegativeLookahead | LookaroundKind::NegativeLookbehind
        )
    }
}

/// A zero-width assertion.
///
/// The wrapped element is the assertion content. Host text is never part of
/// the compiled form: a lookaround placed after some element is a separate
/// entry in the surrounding sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookaround {
    kind: LookaroundKind,
    assertion: Box<Element>,
}

impl Lookaround {
    /// Creates an assertion over `assertion`.
    pub fn new(kind: LookaroundKind, assertion: Element) -> Self {
        trace!("{} over {}", kind.name(), assertion.type_tag());
        Self {
            kind,
            assertion: Box::new(assertion),
        }
    }

    /// The assertion kind.
    pub fn kind(&self) -> LookaroundKind {
        self.kind
    }

    /// The asserted content.
    pub fn assertion(&self) -> &Element {
        &self.assertion
    }

    pub(crate) fn into_assertion(self) -> Element {
        *self.assertion
    }
}

impl RegexElement for Lookaround {
    fn compile(&self) -> String {
        format!("{}{})", self.kind.opener(), self.assertion.compile())
    }

    fn type_tag(&self) -> &'static str {
        "lookaround"
    }

    fn can_be_quantified(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        let inner = self.assertion.describe();
        match self.kind {
            LookaroundKind::PositiveLookahead => format!("followed by ({})", inner),
            LookaroundKind::NegativeLookahead => format!("not followed by ({})", inner),
            LookaroundKind::PositiveLookbehind => format!("preceded by ({})", inner),
            LookaroundKind::NegativeLookbehind => format!("not preceded by ({})", inner),
        }
    }

    fn metadata(&self) -> Value {
        let mut map = base_metadata(self);
        map.insert("kind".into(), Value::from(self.kind.name()));
        map.insert("zeroWidth".into(), Value::from(true));
        map.insert("assertion".into(), self.assertion.metadata());
        Value::Object(map)
    }

    fn requires_unicode(&self) -> bool {
        self.assertion.requires_unicode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Literal, ShorthandKind};
    use crate::decorator::{Quantifier, QuantifierKind};

    #[test]
    fn test_lookaround_syntax() {
        let a: Element = Literal::new("x").unwrap().into();
        let cases = [
            (LookaroundKind::PositiveLookahead, "(?=x)"),
            (LookaroundKind::NegativeLookahead, "(?!x)"),
            (LookaroundKind::PositiveLookbehind, "(?<=x)"),
            (LookaroundKind::NegativeLookbehind, "(?<!x)"),
        ];
        for (kind, expected) in cases {
            assert_eq!(Lookaround::new(kind, a.clone()).compile(), expected);
        }
    }

    #[test]
    fn test_lookahead_over_quantified_digit() {
        let digits = Quantifier::new(ShorthandKind::Digit.into(), QuantifierKind::OneOrMore).unwrap();
        let look = Lookaround::new(LookaroundKind::PositiveLookahead, digits.into());
        assert_eq!(look.compile(), "(?=\\d+)");
    }

    #[test]
    fn test_lookaround_not_quantifiable() {
        let look = Lookaround::new(
            LookaroundKind::NegativeLookbehind,
            Literal::new("a").unwrap().into(),
        );
        assert!(!look.can_be_quantified());
        assert!(look.kind().is_lookbehind());
        assert!(look.kind().is_negative());
    }

    #[test]
    fn test_metadata_and_describe() {
        let look = Lookaround::new(
            LookaroundKind::PositiveLookbehind,
            Literal::new("$").unwrap().into(),
        );
        let meta = look.metadata();
        assert_eq!(meta["kind"], "positive_lookbehind");
        assert_eq!(meta["zeroWidth"], true);
        assert_eq!(meta["assertion"]["value"], "$");
        assert_eq!(look.describe(), "preceded by (the text \"$\")");
    }
}
