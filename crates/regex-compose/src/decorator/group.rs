use log::trace;
use serde_json::Value;

use crate::element::{base_metadata, Element, RegexElement};
use crate::error::{RegexError, RegexResult};

/// Group kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GroupKind {
    /// `(...)`
    Capturing,
    /// `(?:...)`
    NonCapturing,
    /// `(?<name>...)`
    Named,
    /// `(?>...)`
    Atomic,
    /// `(?(condition)then|else)`
    Conditional,
}

impl GroupKind {
    /// Metadata name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            GroupKind::Capturing => "capturing",
            GroupKind::NonCapturing => "non_capturing",
            GroupKind::Named => "named",
            GroupKind::Atomic => "atomic",
            GroupKind::Conditional => "conditional",
        }
    }

    /// Whether the group records a capture.
    pub fn is_capturing(self) -> bool {
        matches!(self, GroupKind::Capturing | GroupKind::Named)
    }
}

/// Checks `name` against `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_valid_group_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Parenthesizes its wrapped element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    wrapped: Box<Element>,
    kind: GroupKind,
    name: Option<String>,
    condition: Option<String>,
    else_branch: Option<Box<Element>>,
}

impl Group {
    /// Creates a group, validating the fields for `kind`.
    ///
    /// Checks run in this order: name presence and shape, stray name,
    /// condition presence, stray condition or else branch, empty body.
    ///
    /// # Errors
    ///
    /// [`RegexError::MissingName`], [`RegexError::InvalidIdentifier`],
    /// [`RegexError::UnexpectedName`], [`RegexError::MissingCondition`],
    /// [`RegexError::UnexpectedCondition`] or [`RegexError::EmptyGroupBody`].
    pub fn new(
        wrapped: Element,
        kind: GroupKind,
        name: Option<String>,
        condition: Option<String>,
        else_branch: Option<Element>,
    ) -> RegexResult<Self> {
        match (kind, name.as_deref()) {
            (GroupKind::Named, None) => return Err(RegexError::MissingName),
            (GroupKind::Named, Some(n)) if !is_valid_group_name(n) => {
                return Err(RegexError::InvalidIdentifier(n.to_string()));
            }
            (GroupKind::Named, Some(_)) | (_, None) => {}
            (other, Some(_)) => return Err(RegexError::UnexpectedName { kind: other.name() }),
        }

        if kind == GroupKind::Conditional {
            if condition.as_deref().map_or(true, str::is_empty) {
                return Err(RegexError::MissingCondition);
            }
        } else if condition.is_some() || else_branch.is_some() {
            return Err(RegexError::UnexpectedCondition { kind: kind.name() });
        }

        if wrapped.compile().is_empty() {
            return Err(RegexError::EmptyGroupBody);
        }

        trace!("{} group over {}", kind.name(), wrapped.type_tag());
        Ok(Self {
            wrapped: Box::new(wrapped),
            kind,
            name,
            condition,
            else_branch: else_branch.map(Box::new),
        })
    }

    /// `(...)`
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::EmptyGroupBody`] when `wrapped` compiles to "".
    pub fn capturing(wrapped: Element) -> RegexResult<Self> {
        Self::new(wrapped, GroupKind::Capturing, None, None, None)
    }

    /// `(?:...)`
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::EmptyGroupBody`] when `wrapped` compiles to "".
    pub fn non_capturing(wrapped: Element) -> RegexResult<Self> {
        Self::new(wrapped, GroupKind::NonCapturing, None, None, None)
    }

    /// `(?<name>...)`
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::InvalidIdentifier`] for a malformed name and
    /// [`RegexError::EmptyGroupBody`] when `wrapped` compiles to "".
    pub fn named(name: impl Into<String>, wrapped: Element) -> RegexResult<Self> {
        Self::new(wrapped, GroupKind::Named, Some(name.into()), None, None)
    }

    /// `(?>...)`
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::EmptyGroupBody`] when `wrapped` compiles to "".
    pub fn atomic(wrapped: Element) -> RegexResult<Self> {
        Self::new(wrapped, GroupKind::Atomic, None, None, None)
    }

    /// `(?(condition)then|else)`
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::MissingCondition`] for an empty condition and
    /// [`RegexError::EmptyGroupBody`] when `then` compiles to "".
    pub fn conditional(
        condition: impl Into<String>,
        then: Element,
        else_branch: Option<Element>,
    ) -> RegexResult<Self> {
        Self::new(
            then,
            GroupKind::Conditional,
            None,
            Some(condition.into()),
            else_branch,
        )
    }

    /// The group kind.
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Group name, for named groups.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Condition, for conditional groups.
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// Else branch, for conditional groups.
    pub fn else_branch(&self) -> Option<&Element> {
        self.else_branch.as_deref()
    }

    /// The grouped element (the then-branch for conditionals).
    pub fn wrapped(&self) -> &Element {
        &self.wrapped
    }

    pub(crate) fn into_wrapped(self) -> Element {
        *self.wrapped
    }

    pub(crate) fn parts(&self) -> (GroupKind, Option<String>, Option<String>, Option<Element>) {
        (
            self.kind,
            self.name.clone(),
            self.condition.clone(),
            self.else_branch.as_deref().cloned(),
        )
    }
}

// A top-level `|` in a conditional branch would add branches to the
// conditional itself.
fn conditional_branch(element: &Element) -> String {
    element.compile_delimited()
}

impl RegexElement for Group {
    fn compile(&self) -> String {
        match self.kind {
            GroupKind::Capturing => format!("({})", self.wrapped.compile()),
            GroupKind::NonCapturing => format!("(?:{})", self.wrapped.compile()),
            GroupKind::Named => format!(
                "(?<{}>{})",
                self.name.as_deref().unwrap_or_default(),
                self.wrapped.compile()
            ),
            GroupKind::Atomic => format!("(?>{})", self.wrapped.compile()),
            GroupKind::Conditional => {
                let mut out = format!(
                    "(?({}){}",
                    self.condition.as_deref().unwrap_or_default(),
                    conditional_branch(&self.wrapped)
                );
                if let Some(else_branch) = &self.else_branch {
                    out.push('|');
                    out.push_str(&conditional_branch(else_branch));
                }
                out.push(')');
                out
            }
        }
    }

    fn type_tag(&self) -> &'static str {
        "group"
    }

    fn can_be_quantified(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        let inner = self.wrapped.describe();
        match self.kind {
            GroupKind::Capturing => format!("a capturing group of ({})", inner),
            GroupKind::NonCapturing => format!("a group of ({})", inner),
            GroupKind::Named => format!(
                "a group named {:?} of ({})",
                self.name.as_deref().unwrap_or_default(),
                inner
            ),
            GroupKind::Atomic => format!("an atomic group of ({})", inner),
            GroupKind::Conditional => {
                let condition = self.condition.as_deref().unwrap_or_default();
                match &self.else_branch {
                    Some(e) => format!("if ({}) then ({}) else ({})", condition, inner, e.describe()),
                    None => format!("if ({}) then ({})", condition, inner),
                }
            }
        }
    }

    fn metadata(&self) -> Value {
        let mut map = base_metadata(self);
        map.insert("kind".into(), Value::from(self.kind.name()));
        map.insert("capturing".into(), Value::from(self.kind.is_capturing()));
        if let Some(name) = &self.name {
            map.insert("name".into(), Value::from(name.clone()));
        }
        if let Some(condition) = &self.condition {
            map.insert("condition".into(), Value::from(condition.clone()));
        }
        map.insert("wrapped".into(), self.wrapped.metadata());
        if let Some(else_branch) = &self.else_branch {
            map.insert("else".into(), else_branch.metadata());
        }
        Value::Object(map)
    }

    fn requires_unicode(&self) -> bool {
        self.wrapped.requires_unicode()
            || self
                .else_branch
                .as_ref()
                .is_some_and(|e| e.requires_unicode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Alternation, Literal, RawPattern};

    fn lit(text: &str) -> Element {
        Literal::new(text).unwrap().into()
    }

    #[test]
    fn test_group_syntax() {
        assert_eq!(Group::capturing(lit("a")).unwrap().compile(), "(a)");
        assert_eq!(Group::non_capturing(lit("a")).unwrap().compile(), "(?:a)");
        assert_eq!(Group::named("ok_1", lit("x")).unwrap().compile(), "(?<ok_1>x)");
        assert_eq!(Group::atomic(lit("a")).unwrap().compile(), "(?>a)");
    }

    #[test]
    fn test_conditional() {
        let g = Group::conditional("1", lit("yes"), Some(lit("no"))).unwrap();
        assert_eq!(g.compile(), "(?(1)yes|no)");
        let g = Group::conditional("<word>", lit("yes"), None).unwrap();
        assert_eq!(g.compile(), "(?(<word>)yes)");
    }

    #[test]
    fn test_conditional_groups_spliced_alternation_branches() {
        let mut scope = crate::ElementCollection::new();
        scope.append(Alternation::of_literals(["b", "c"]).unwrap());
        let then = RawPattern::from_collection(&scope).into();
        let g = Group::conditional("1", then, Some(lit("no"))).unwrap();
        assert_eq!(g.compile(), "(?(1)(?:b|c)|no)");

        scope.append(lit("d"));
        let then = RawPattern::from_collection(&scope).into();
        let g = Group::conditional("1", then, Some(lit("no"))).unwrap();
        assert_eq!(g.compile(), "(?(1)(?:b|c)d|no)");
    }

    #[test]
    fn test_conditional_groups_alternation_branches() {
        let then = Alternation::of_literals(["a", "b"]).unwrap().into();
        let g = Group::conditional("1", then, Some(lit("c"))).unwrap();
        assert_eq!(g.compile(), "(?(1)(?:a|b)|c)");
    }

    #[test]
    fn test_group_name_validation() {
        assert_eq!(
            Group::named("1bad", lit("x")),
            Err(RegexError::InvalidIdentifier("1bad".into()))
        );
        assert_eq!(
            Group::named("has-dash", lit("x")),
            Err(RegexError::InvalidIdentifier("has-dash".into()))
        );
        assert_eq!(
            Group::named("", lit("x")),
            Err(RegexError::InvalidIdentifier(String::new()))
        );
        assert!(Group::named("_private", lit("x")).is_ok());
        assert_eq!(
            Group::new(lit("x"), GroupKind::Named, None, None, None),
            Err(RegexError::MissingName)
        );
    }

    #[test]
    fn test_unexpected_name() {
        assert_eq!(
            Group::new(lit("x"), GroupKind::Capturing, Some("n".into()), None, None),
            Err(RegexError::UnexpectedName { kind: "capturing" })
        );
    }

    #[test]
    fn test_condition_rules() {
        assert_eq!(
            Group::new(lit("x"), GroupKind::Conditional, None, None, None),
            Err(RegexError::MissingCondition)
        );
        assert_eq!(
            Group::conditional("", lit("x"), None),
            Err(RegexError::MissingCondition)
        );
        assert_eq!(
            Group::new(lit("x"), GroupKind::Atomic, None, Some("1".into()), None),
            Err(RegexError::UnexpectedCondition { kind: "atomic" })
        );
        assert_eq!(
            Group::new(lit("x"), GroupKind::NonCapturing, None, None, Some(lit("y"))),
            Err(RegexError::UnexpectedCondition { kind: "non_capturing" })
        );
    }

    #[test]
    fn test_validation_order_name_before_body() {
        // Both the name and the body are wrong; the name is reported.
        assert_eq!(
            Group::named("9", RawPattern::new("").into()),
            Err(RegexError::InvalidIdentifier("9".into()))
        );
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(
            Group::capturing(RawPattern::new("").into()),
            Err(RegexError::EmptyGroupBody)
        );
    }

    #[test]
    fn test_double_wrapping_adds_exactly_two_layers() {
        let inner = Group::capturing(lit("a")).unwrap();
        let outer = Group::capturing(inner.into()).unwrap();
        assert_eq!(outer.compile(), "((a))");
    }

    #[test]
    fn test_group_does_not_regroup_alternation() {
        let alt = Alternation::of_literals(["a", "b"]).unwrap().into();
        assert_eq!(Group::capturing(alt).unwrap().compile(), "(a|b)");
    }

    #[test]
    fn test_metadata() {
        let g = Group::named("year", lit("2024")).unwrap();
        let meta = g.metadata();
        assert_eq!(meta["kind"], "named");
        assert_eq!(meta["name"], "year");
        assert_eq!(meta["capturing"], true);
        assert_eq!(meta["wrapped"]["value"], "2024");

        let c = Group::conditional("1", lit("a"), Some(lit("é"))).unwrap();
        assert_eq!(c.metadata()["else"]["value"], "é");
        assert_eq!(c.metadata()["requiresUnicode"], true);
    }

    #[test]
    fn test_is_valid_group_name() {
        assert!(is_valid_group_name("a"));
        assert!(is_valid_group_name("A_b9"));
        assert!(!is_valid_group_name("9a"));
        assert!(!is_valid_group_name("ä"));
        assert!(!is_valid_group_name(""));
    }
}
