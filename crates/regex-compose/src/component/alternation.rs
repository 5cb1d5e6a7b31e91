use log::trace;
use serde_json::Value;

use super::Literal;
use crate::element::{base_metadata, Element, RegexElement};
use crate::error::{RegexError, RegexResult};

/// Alternatives joined by `|`.
///
/// `|` binds loosest of all regex operators, so an alternation never
/// parenthesizes itself. Quantifiers, sibling elements and conditional
/// branches add a non-capturing group around it (see
/// [`Element::needs_grouping_when_quantified`] and
/// [`Element::has_top_level_alternation`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternation {
    alternatives: Vec<Element>,
}

impl Alternation {
    /// Creates an alternation from one or more alternatives.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::EmptyAlternation`] when `alternatives` is empty
    /// and [`RegexError::EmptyOperand`] when one compiles to nothing.
    pub fn new(alternatives: Vec<Element>) -> RegexResult<Self> {
        if alternatives.is_empty() {
            return Err(RegexError::EmptyAlternation);
        }
        if alternatives.iter().any(|a| a.compile().is_empty()) {
            return Err(RegexError::EmptyOperand("alternation"));
        }
        trace!("alternation of {} alternatives", alternatives.len());
        Ok(Self { alternatives })
    }

    /// Creates an alternation of escaped literals.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::EmptyAlternation`] for an empty list and
    /// [`RegexError::EmptyLiteral`] for an empty alternative.
    pub fn of_literals<'a, I>(texts: I) -> RegexResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let alternatives = texts
            .into_iter()
            .map(|t| Literal::new(t).map(Element::from))
            .collect::<RegexResult<Vec<_>>>()?;
        Self::new(alternatives)
    }

    /// Returns a new alternation with `alternative` appended.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::EmptyOperand`] when `alternative` compiles to
    /// nothing.
    pub fn with_alternative(&self, alternative: Element) -> RegexResult<Self> {
        if alternative.compile().is_empty() {
            return Err(RegexError::EmptyOperand("alternation"));
        }
        let mut alternatives = self.alternatives.clone();
        alternatives.push(alternative);
        Ok(Self { alternatives })
    }

    /// The alternatives in order.
    pub fn alternatives(&self) -> &[Element] {
        &self.alternatives
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Always false: an alternation holds at least one alternative.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl RegexElement for Alternation {
    fn compile(&self) -> String {
        self.alternatives
            .iter()
            .map(Element::compile)
            .collect::<Vec<_>>()
            .join("|")
    }

    fn type_tag(&self) -> &'static str {
        "alternation"
    }

    fn can_be_quantified(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        let parts: Vec<String> = self.alternatives.iter().map(Element::describe).collect();
        match parts.as_slice() {
            [only] => only.clone(),
            _ => format!("either {}", parts.join(" or ")),
        }
    }

    fn metadata(&self) -> Value {
        let mut map = base_metadata(self);
        map.insert("count".into(), Value::from(self.alternatives.len()));
        map.insert(
            "alternatives".into(),
            Value::Array(self.alternatives.iter().map(Element::metadata).collect()),
        );
        Value::Object(map)
    }

    fn requires_unicode(&self) -> bool {
        self.alternatives.iter().any(Element::requires_unicode)
    }
}
