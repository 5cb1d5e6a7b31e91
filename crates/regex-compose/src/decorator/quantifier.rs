use log::trace;
use serde_json::Value;

use crate::element::{base_metadata, Element, RegexElement};
use crate::error::{RegexError, RegexResult};

/// Repetition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuantifierKind {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    Optional,
    /// `{n}`
    Exactly(u64),
    /// `{n,}`
    AtLeast(u64),
    /// `{min,max}`
    Between {
        /// Lower bound, inclusive.
        min: u64,
        /// Upper bound, inclusive.
        max: u64,
    },
}

impl QuantifierKind {
    /// `{n}` from a signed count.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::NegativeCount`] when `n < 0`.
    pub fn exactly(n: i64) -> RegexResult<Self> {
        Ok(QuantifierKind::Exactly(non_negative(n)?))
    }

    /// `{n,}` from a signed count.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::NegativeCount`] when `n < 0`.
    pub fn at_least(n: i64) -> RegexResult<Self> {
        Ok(QuantifierKind::AtLeast(non_negative(n)?))
    }

    /// `{min,max}` from signed counts.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::NegativeCount`] when either bound is negative and
    /// [`RegexError::MinGreaterThanMax`] when `min > max`.
    pub fn between(min: i64, max: i64) -> RegexResult<Self> {
        let kind = QuantifierKind::Between {
            min: non_negative(min)?,
            max: non_negative(max)?,
        };
        kind.validate()?;
        Ok(kind)
    }

    /// Checks the bound ordering of a directly-constructed kind.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::MinGreaterThanMax`] for an inverted `Between`.
    pub fn validate(self) -> RegexResult<()> {
        match self {
            QuantifierKind::Between { min, max } if min > max => {
                Err(RegexError::MinGreaterThanMax { min, max })
            }
            _ => Ok(()),
        }
    }

    /// The repetition syntax, without any mode suffix.
    pub fn syntax(self) -> String {
        match self {
            QuantifierKind::ZeroOrMore => "*".to_string(),
            QuantifierKind::OneOrMore => "+".to_string(),
            QuantifierKind::Optional => "?".to_string(),
            QuantifierKind::Exactly(n) => format!("{{{}}}", n),
            QuantifierKind::AtLeast(n) => format!("{{{},}}", n),
            QuantifierKind::Between { min, max } => format!("{{{},{}}}", min, max),
        }
    }

    /// Metadata name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            QuantifierKind::ZeroOrMore => "zero_or_more",
            QuantifierKind::OneOrMore => "one_or_more",
            QuantifierKind::Optional => "optional",
            QuantifierKind::Exactly(_) => "exactly",
            QuantifierKind::AtLeast(_) => "at_least",
            QuantifierKind::Between { .. } => "between",
        }
    }

    /// Minimum number of repetitions.
    pub fn min(self) -> u64 {
        match self {
            QuantifierKind::ZeroOrMore | QuantifierKind::Optional => 0,
            QuantifierKind::OneOrMore => 1,
            QuantifierKind::Exactly(n) | QuantifierKind::AtLeast(n) => n,
            QuantifierKind::Between { min, .. } => min,
        }
    }

    /// Maximum number of repetitions (`None` = unbounded).
    pub fn max(self) -> Option<u64> {
        match self {
            QuantifierKind::ZeroOrMore | QuantifierKind::OneOrMore | QuantifierKind::AtLeast(_) => {
                None
            }
            QuantifierKind::Optional => Some(1),
            QuantifierKind::Exactly(n) => Some(n),
            QuantifierKind::Between { max, .. } => Some(max),
        }
    }
}

fn non_negative(n: i64) -> RegexResult<u64> {
    u64::try_from(n).map_err(|_| RegexError::NegativeCount(n))
}

/// Greedy, lazy or possessive matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuantifierMode {
    /// No suffix.
    #[default]
    Greedy,
    /// `?` suffix.
    Lazy,
    /// `+` suffix.
    Possessive,
}

impl QuantifierMode {
    /// Picks a mode from two flags.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::ConflictingModifiers`] when both flags are set.
    pub fn from_flags(lazy: bool, possessive: bool) -> RegexResult<Self> {
        match (lazy, possessive) {
            (true, true) => Err(RegexError::ConflictingModifiers),
            (true, false) => Ok(QuantifierMode::Lazy),
            (false, true) => Ok(QuantifierMode::Possessive),
            (false, false) => Ok(QuantifierMode::Greedy),
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            QuantifierMode::Greedy => "",
            QuantifierMode::Lazy => "?",
            QuantifierMode::Possessive => "+",
        }
    }

    /// Metadata name of this mode.
    pub fn name(self) -> &'static str {
        match self {
            QuantifierMode::Greedy => "greedy",
            QuantifierMode::Lazy => "lazy",
            QuantifierMode::Possessive => "possessive",
        }
    }
}

/// Repeats its wrapped element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantifier {
    wrapped: Box<Element>,
    kind: QuantifierKind,
    mode: QuantifierMode,
}

impl Quantifier {
    /// Quantifies `wrapped` greedily.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::UnquantifiableElement`] when `wrapped` cannot be
    /// repeated, [`RegexError::EmptyOperand`] when it compiles to nothing,
    /// and [`RegexError::MinGreaterThanMax`] for an inverted range.
    pub fn new(wrapped: Element, kind: QuantifierKind) -> RegexResult<Self> {
        Self::with_mode(wrapped, kind, QuantifierMode::Greedy)
    }

    /// Quantifies `wrapped` with an explicit mode.
    ///
    /// # Errors
    ///
    /// Same as [`Quantifier::new`].
    pub fn with_mode(wrapped: Element, kind: QuantifierKind, mode: QuantifierMode) -> RegexResult<Self> {
        kind.validate()?;
        if !wrapped.can_be_quantified() {
            return Err(RegexError::UnquantifiableElement(wrapped.type_tag()));
        }
        if wrapped.compile().is_empty() {
            return Err(RegexError::EmptyOperand("quantifier"));
        }
        trace!("quantifier {} ({}) over {}", kind.syntax(), mode.name(), wrapped.type_tag());
        Ok(Self {
            wrapped: Box::new(wrapped),
            kind,
            mode,
        })
    }

    /// Returns a copy with mode flags applied.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::ConflictingModifiers`] when both flags are set.
    pub fn with_modifiers(&self, lazy: bool, possessive: bool) -> RegexResult<Self> {
        Ok(self.in_mode(QuantifierMode::from_flags(lazy, possessive)?))
    }

    /// Returns a lazy copy. Replaces any previous mode.
    pub fn lazy(&self) -> Self {
        self.in_mode(QuantifierMode::Lazy)
    }

    /// Returns a possessive copy. Replaces any previous mode.
    pub fn possessive(&self) -> Self {
        self.in_mode(QuantifierMode::Possessive)
    }

    /// Returns a copy matching in `mode`. Replaces any previous mode.
    pub fn in_mode(&self, mode: QuantifierMode) -> Self {
        Self {
            wrapped: self.wrapped.clone(),
            kind: self.kind,
            mode,
        }
    }

    /// The repetition kind.
    pub fn kind(&self) -> QuantifierKind {
        self.kind
    }

    /// The matching mode.
    pub fn mode(&self) -> QuantifierMode {
        self.mode
    }

    /// Minimum repetitions.
    pub fn min(&self) -> u64 {
        self.kind.min()
    }

    /// Maximum repetitions (`None` = unbounded).
    pub fn max(&self) -> Option<u64> {
        self.kind.max()
    }

    /// The repeated element.
    pub fn wrapped(&self) -> &Element {
        &self.wrapped
    }

    pub(crate) fn into_wrapped(self) -> Element {
        *self.wrapped
    }

    /// Whether the wrapped element must be put in `(?:...)` first.
    pub fn wrapped_element_needs_grouping(&self) -> bool {
        self.wrapped.needs_grouping_when_quantified()
    }
}

impl RegexElement for Quantifier {
    fn compile(&self) -> String {
        let inner = self.wrapped.compile();
        let body = if self.wrapped_element_needs_grouping() {
            format!("(?:{})", inner)
        } else {
            inner
        };
        format!("{}{}{}", body, self.kind.syntax(), self.mode.suffix())
    }

    fn type_tag(&self) -> &'static str {
        "quantifier"
    }

    fn can_be_quantified(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        let inner = self.wrapped.describe();
        let base = match self.kind {
            QuantifierKind::ZeroOrMore => format!("zero or more of {}", inner),
            QuantifierKind::OneOrMore => format!("one or more of {}", inner),
            QuantifierKind::Optional => format!("optionally {}", inner),
            QuantifierKind::Exactly(n) => format!("exactly {} of {}", n, inner),
            QuantifierKind::AtLeast(n) => format!("at least {} of {}", n, inner),
            QuantifierKind::Between { min, max } => {
                format!("between {} and {} of {}", min, max, inner)
            }
        };
        match self.mode {
            QuantifierMode::Greedy => base,
            mode => format!("{} ({})", base, mode.name()),
        }
    }

    fn metadata(&self) -> Value {
        let mut map = base_metadata(self);
        map.insert("kind".into(), Value::from(self.kind.name()));
        map.insert("mode".into(), Value::from(self.mode.name()));
        map.insert("min".into(), Value::from(self.kind.min()));
        map.insert(
            "max".into(),
            self.kind.max().map_or(Value::Null, Value::from),
        );
        map.insert(
            "groupsWrapped".into(),
            Value::from(self.wrapped_element_needs_grouping()),
        );
        map.insert("wrapped".into(), self.wrapped.metadata());
        Value::Object(map)
    }

    fn requires_unicode(&self) -> bool {
        self.wrapped.requires_unicode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Alternation, AnchorKind, Literal, RawPattern, ShorthandKind};

    fn lit(text: &str) -> Element {
        Literal::new(text).unwrap().into()
    }

    #[test]
    fn test_basic_kinds() {
        let d: Element = ShorthandKind::Digit.into();
        let cases = [
            (QuantifierKind::ZeroOrMore, "\\d*"),
            (QuantifierKind::OneOrMore, "\\d+"),
            (QuantifierKind::Optional, "\\d?"),
            (QuantifierKind::Exactly(3), "\\d{3}"),
            (QuantifierKind::AtLeast(2), "\\d{2,}"),
            (QuantifierKind::Between { min: 1, max: 4 }, "\\d{1,4}"),
        ];
        for (kind, expected) in cases {
            assert_eq!(Quantifier::new(d.clone(), kind).unwrap().compile(), expected);
        }
    }

    #[test]
    fn test_exactly_binds_to_preceding_atom() {
        let q = Quantifier::new(lit("ab"), QuantifierKind::exactly(2).unwrap()).unwrap();
        assert_eq!(q.compile(), "ab{2}");
    }

    #[test]
    fn test_alternation_is_grouped() {
        let alt = Alternation::of_literals(["a", "b"]).unwrap();
        let q = Quantifier::new(alt.into(), QuantifierKind::OneOrMore).unwrap();
        assert_eq!(q.compile(), "(?:a|b)+");
        assert!(q.wrapped_element_needs_grouping());
    }

    #[test]
    fn test_negative_counts_rejected() {
        assert_eq!(QuantifierKind::exactly(-1), Err(RegexError::NegativeCount(-1)));
        assert_eq!(QuantifierKind::at_least(-5), Err(RegexError::NegativeCount(-5)));
        assert_eq!(
            QuantifierKind::between(-1, 3),
            Err(RegexError::NegativeCount(-1))
        );
    }

    #[test]
    fn test_between_order() {
        assert_eq!(
            QuantifierKind::between(5, 2),
            Err(RegexError::MinGreaterThanMax { min: 5, max: 2 })
        );
        assert_eq!(
            Quantifier::new(lit("a"), QuantifierKind::Between { min: 3, max: 1 }),
            Err(RegexError::MinGreaterThanMax { min: 3, max: 1 })
        );
        assert!(QuantifierKind::between(2, 2).is_ok());
    }

    #[test]
    fn test_unquantifiable_targets() {
        assert_eq!(
            Quantifier::new(AnchorKind::Start.into(), QuantifierKind::OneOrMore),
            Err(RegexError::UnquantifiableElement("anchor"))
        );
        let q: Element = Quantifier::new(lit("a"), QuantifierKind::OneOrMore)
            .unwrap()
            .into();
        assert_eq!(
            Quantifier::new(q, QuantifierKind::Optional),
            Err(RegexError::UnquantifiableElement("quantifier"))
        );
    }

    #[test]
    fn test_empty_operand_rejected() {
        let empty = RawPattern::new("").into();
        assert_eq!(
            Quantifier::new(empty, QuantifierKind::OneOrMore),
            Err(RegexError::EmptyOperand("quantifier"))
        );
    }

    #[test]
    fn test_modes_replace_rather_than_stack() {
        let q = Quantifier::new(lit("a"), QuantifierKind::ZeroOrMore).unwrap();
        assert_eq!(q.lazy().compile(), "a*?");
        assert_eq!(q.possessive().compile(), "a*+");
        assert_eq!(q.lazy().possessive().compile(), "a*+");
        assert_eq!(q.lazy().lazy().compile(), "a*?");
    }

    #[test]
    fn test_conflicting_modifiers() {
        let q = Quantifier::new(lit("a"), QuantifierKind::OneOrMore).unwrap();
        assert_eq!(q.with_modifiers(true, true), Err(RegexError::ConflictingModifiers));
        assert_eq!(q.with_modifiers(true, false).unwrap().mode(), QuantifierMode::Lazy);
        assert_eq!(
            q.with_modifiers(false, false).unwrap().mode(),
            QuantifierMode::Greedy
        );
    }

    #[test]
    fn test_accessors_and_metadata() {
        let q = Quantifier::new(lit("x"), QuantifierKind::between(2, 5).unwrap()).unwrap();
        assert_eq!(q.min(), 2);
        assert_eq!(q.max(), Some(5));
        let meta = q.metadata();
        assert_eq!(meta["type"], "quantifier");
        assert_eq!(meta["kind"], "between");
        assert_eq!(meta["wrapped"]["type"], "literal");
        assert_eq!(meta["quantifiable"], false);

        let open = Quantifier::new(lit("x"), QuantifierKind::OneOrMore).unwrap();
        assert_eq!(open.metadata()["max"], Value::Null);
    }

    #[test]
    fn test_describe() {
        let q = Quantifier::new(ShorthandKind::Digit.into(), QuantifierKind::OneOrMore)
            .unwrap()
            .lazy();
        assert_eq!(q.describe(), "one or more of a digit (lazy)");
    }
}
