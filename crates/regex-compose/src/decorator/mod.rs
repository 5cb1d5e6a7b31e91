//! Decorators: elements that wrap exactly one other element.
//!
//! ## Precedence
//!
//! | Decorator | Precedence | Binds |
//! |-----------|------------|-------|
//! | [`Quantifier`] | 1 | closest to content |
//! | [`Group`] | 2 | |
//! | [`Lookaround`] | 3 | outermost |
//!
//! When several decorators target one element, [`compose`] applies them in
//! ascending precedence by building a new decorator around the previous
//! result each time. Decorators are never mutated in place.
//!
//! ## Example
//!
//! ```rust
//! use regex_compose::{compose, Decoration, GroupKind, Literal, QuantifierKind, RegexElement};
//!
//! let target = Literal::new("ab").unwrap().into();
//! let composed = compose(
//!     target,
//!     vec![
//!         Decoration::group(GroupKind::Capturing),
//!         Decoration::quantify(QuantifierKind::OneOrMore),
//!     ],
//! )
//! .unwrap();
//! assert_eq!(composed.compile(), "(ab+)");
//! ```

mod group;
mod lookaround;
mod quantifier;

use std::fmt;

use log::debug;
use serde_json::Value;

use crate::element::{Element, RegexElement};
use crate::error::RegexResult;

pub use group::{is_valid_group_name, Group, GroupKind};
pub use lookaround::{Lookaround, LookaroundKind};
pub use quantifier::{Quantifier, QuantifierKind, QuantifierMode};

/// Binding order of decorator kinds; lower binds closer to content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precedence {
    /// Quantifiers.
    Quantifier = 1,
    /// Groups.
    Group = 2,
    /// Lookarounds.
    Lookaround = 3,
}

impl Precedence {
    /// Numeric rank.
    pub fn value(self) -> u8 {
        self as u8
    }
}

/// A regex element that wraps another element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decorator {
    /// Repetition.
    Quantifier(Quantifier),
    /// Parenthesized group.
    Group(Group),
    /// Zero-width assertion.
    Lookaround(Lookaround),
}

impl Decorator {
    /// Fixed precedence of this decorator's kind.
    pub fn precedence(&self) -> Precedence {
        self.decoration().precedence()
    }

    /// Whether this decorator's output must be parenthesized before a
    /// quantifier applies to it.
    ///
    /// Groups and lookarounds are self-delimited and quantifiers cannot be
    /// quantified, so no current kind needs it.
    pub fn needs_grouping(&self) -> bool {
        match self {
            Decorator::Quantifier(_) | Decorator::Group(_) | Decorator::Lookaround(_) => false,
        }
    }

    /// The wrapped element (assertion content for lookarounds).
    pub fn inner(&self) -> &Element {
        match self {
            Decorator::Quantifier(q) => q.wrapped(),
            Decorator::Group(g) => g.wrapped(),
            Decorator::Lookaround(l) => l.assertion(),
        }
    }

    /// This decorator's parameters, detached from its inner element.
    pub fn decoration(&self) -> Decoration {
        match self {
            Decorator::Quantifier(q) => Decoration::Quantify {
                kind: q.kind(),
                mode: q.mode(),
            },
            Decorator::Group(g) => {
                let (kind, name, condition, else_branch) = g.parts();
                Decoration::Group {
                    kind,
                    name,
                    condition,
                    else_branch,
                }
            }
            Decorator::Lookaround(l) => Decoration::Look { kind: l.kind() },
        }
    }

    /// Builds a decorator of the same kind and parameters around `new_inner`.
    ///
    /// # Errors
    ///
    /// Propagates validation errors of the rebuilt decorator, e.g.
    /// [`crate::RegexError::UnquantifiableElement`].
    pub fn rebuild_wrapping(&self, new_inner: Element) -> RegexResult<Decorator> {
        self.decoration().wrap(new_inner)
    }

    /// Splits into parameters and inner element.
    pub fn into_parts(self) -> (Decoration, Element) {
        let decoration = self.decoration();
        let inner = match self {
            Decorator::Quantifier(q) => q.into_wrapped(),
            Decorator::Group(g) => g.into_wrapped(),
            Decorator::Lookaround(l) => l.into_assertion(),
        };
        (decoration, inner)
    }
}

impl RegexElement for Decorator {
    fn compile(&self) -> String {
        match self {
            Decorator::Quantifier(q) => q.compile(),
            Decorator::Group(g) => g.compile(),
            Decorator::Lookaround(l) => l.compile(),
        }
    }

    fn type_tag(&self) -> &'static str {
        match self {
            Decorator::Quantifier(q) => q.type_tag(),
            Decorator::Group(g) => g.type_tag(),
            Decorator::Lookaround(l) => l.type_tag(),
        }
    }

    fn can_be_quantified(&self) -> bool {
        match self {
            Decorator::Quantifier(q) => q.can_be_quantified(),
            Decorator::Group(g) => g.can_be_quantified(),
            Decorator::Lookaround(l) => l.can_be_quantified(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Decorator::Quantifier(q) => q.describe(),
            Decorator::Group(g) => g.describe(),
            Decorator::Lookaround(l) => l.describe(),
        }
    }

    fn metadata(&self) -> Value {
        let mut meta = match self {
            Decorator::Quantifier(q) => q.metadata(),
            Decorator::Group(g) => g.metadata(),
            Decorator::Lookaround(l) => l.metadata(),
        };
        if let Value::Object(map) = &mut meta {
            map.insert("precedence".into(), Value::from(self.precedence().value()));
        }
        meta
    }

    fn requires_unicode(&self) -> bool {
        match self {
            Decorator::Quantifier(q) => q.requires_unicode(),
            Decorator::Group(g) => g.requires_unicode(),
            Decorator::Lookaround(l) => l.requires_unicode(),
        }
    }
}

impl fmt::Display for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compile())
    }
}

/// A decorator's parameters without the element it wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoration {
    /// Parameters of a [`Quantifier`].
    Quantify {
        /// Repetition kind.
        kind: QuantifierKind,
        /// Matching mode.
        mode: QuantifierMode,
    },
    /// Parameters of a [`Group`].
    Group {
        /// Group kind.
        kind: GroupKind,
        /// Name, for named groups.
        name: Option<String>,
        /// Condition, for conditional groups.
        condition: Option<String>,
        /// Else branch, for conditional groups.
        else_branch: Option<Element>,
    },
    /// Parameters of a [`Lookaround`].
    Look {
        /// Assertion kind.
        kind: LookaroundKind,
    },
}

impl Decoration {
    /// A greedy quantifier.
    pub fn quantify(kind: QuantifierKind) -> Self {
        Decoration::Quantify {
            kind,
            mode: QuantifierMode::Greedy,
        }
    }

    /// A group without name or condition.
    pub fn group(kind: GroupKind) -> Self {
        Decoration::Group {
            kind,
            name: None,
            condition: None,
            else_branch: None,
        }
    }

    /// A named capturing group.
    pub fn named_group(name: impl Into<String>) -> Self {
        Decoration::Group {
            kind: GroupKind::Named,
            name: Some(name.into()),
            condition: None,
            else_branch: None,
        }
    }

    /// A lookaround.
    pub fn look(kind: LookaroundKind) -> Self {
        Decoration::Look { kind }
    }

    /// Fixed precedence of the decorator this builds.
    pub fn precedence(&self) -> Precedence {
        match self {
            Decoration::Quantify { .. } => Precedence::Quantifier,
            Decoration::Group { .. } => Precedence::Group,
            Decoration::Look { .. } => Precedence::Lookaround,
        }
    }

    /// Builds the decorator around `inner`.
    ///
    /// # Errors
    ///
    /// Propagates the decorator's own validation errors.
    pub fn wrap(self, inner: Element) -> RegexResult<Decorator> {
        match self {
            Decoration::Quantify { kind, mode } => {
                Quantifier::with_mode(inner, kind, mode).map(Decorator::Quantifier)
            }
            Decoration::Group {
                kind,
                name,
                condition,
                else_branch,
            } => Group::new(inner, kind, name, condition, else_branch).map(Decorator::Group),
            Decoration::Look { kind } => Ok(Decorator::Lookaround(Lookaround::new(kind, inner))),
        }
    }
}

/// Applies `decorations` to `target` in ascending precedence.
///
/// The sort is stable, so decorations of equal precedence keep their given
/// order (first given ends up innermost).
///
/// # Errors
///
/// Fails with the first decorator validation error encountered.
pub fn compose(target: Element, mut decorations: Vec<Decoration>) -> RegexResult<Element> {
    decorations.sort_by_key(Decoration::precedence);
    debug!(
        "composing {} decorations around {}",
        decorations.len(),
        target.type_tag()
    );
    decorations
        .into_iter()
        .try_fold(target, |inner, decoration| {
            decoration.wrap(inner).map(Element::Decorator)
        })
}

/// Re-applies an element's decorator chain in ascending precedence.
///
/// The chain is peeled from the outside in until a component is reached,
/// then rebuilt with [`compose`].
///
/// # Errors
///
/// Fails if a decorator is invalid in its new position.
pub fn normalize(element: Element) -> RegexResult<Element> {
    let mut decorations = Vec::new();
    let mut current = element;
    while let Element::Decorator(decorator) = current {
        let (decoration, inner) = decorator.into_parts();
        decorations.push(decoration);
        current = inner;
    }
    // peeled outermost-first; compose wants innermost-first
    decorations.reverse();
    compose(current, decorations)
}
