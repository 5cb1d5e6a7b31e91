//! The element abstraction shared by components and decorators.
//!
//! Every piece of a pattern is an [`Element`]: either a leaf
//! [`Component`] that generates content directly, or a [`Decorator`] that
//! wraps exactly one other element and alters its compiled form.

use std::fmt;

use serde_json::{Map, Value};

use crate::component::{
    AnchorKind, Alternation, CharacterClass, Component, Literal, RawPattern, ShorthandKind,
};
use crate::decorator::{Decorator, Group, Lookaround, Quantifier};

/// Capabilities shared by every regex element.
///
/// Implementations are pure: the result of each method depends only on the
/// element's own fields.
pub trait RegexElement {
    /// Renders the element to regex syntax.
    fn compile(&self) -> String;

    /// Short type tag, e.g. `"literal"` or `"quantifier"`.
    fn type_tag(&self) -> &'static str;

    /// Whether a quantifier may be applied to this element.
    fn can_be_quantified(&self) -> bool;

    /// Human-readable description.
    fn describe(&self) -> String;

    /// Structured metadata. Always carries a `"type"` key.
    fn metadata(&self) -> Value;

    /// Whether any character involved is outside the single-byte range.
    fn requires_unicode(&self) -> bool;
}

/// A regex element: a leaf component or a decorator around another element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Leaf content generator.
    Component(Component),
    /// Wrapper altering another element.
    Decorator(Decorator),
}

impl Element {
    /// Returns the component, if this is one.
    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Element::Component(c) => Some(c),
            Element::Decorator(_) => None,
        }
    }

    /// Returns the decorator, if this is one.
    pub fn as_decorator(&self) -> Option<&Decorator> {
        match self {
            Element::Component(_) => None,
            Element::Decorator(d) => Some(d),
        }
    }

    /// Whether a quantifier must wrap this element in `(?:...)` first.
    ///
    /// True for alternations, for raw patterns spliced from a multi-part
    /// scope, and for decorators that declare it.
    pub fn needs_grouping_when_quantified(&self) -> bool {
        match self {
            Element::Component(Component::Alternation(_)) => true,
            Element::Component(Component::RawPattern(raw)) => raw.requires_grouping(),
            Element::Component(_) => false,
            Element::Decorator(d) => d.needs_grouping(),
        }
    }

    /// Whether the compiled form carries a `|` outside any parentheses.
    ///
    /// Such an element is wrapped in `(?:...)` whenever it sits next to a
    /// sibling or inside a conditional branch.
    pub fn has_top_level_alternation(&self) -> bool {
        match self {
            Element::Component(Component::Alternation(_)) => true,
            Element::Component(Component::RawPattern(raw)) => raw.has_top_level_alternation(),
            _ => false,
        }
    }

    /// Compiled form, parenthesized if a top-level `|` would leak into
    /// the surrounding sequence.
    pub(crate) fn compile_delimited(&self) -> String {
        if self.has_top_level_alternation() {
            format!("(?:{})", self.compile())
        } else {
            self.compile()
        }
    }

    /// Direct children of this element, in source order.
    pub fn children(&self) -> Vec<&Element> {
        match self {
            Element::Component(Component::Alternation(alt)) => alt.alternatives().iter().collect(),
            Element::Component(_) => Vec::new(),
            Element::Decorator(d) => {
                let mut children = vec![d.inner()];
                if let Decorator::Group(group) = d {
                    if let Some(else_branch) = group.else_branch() {
                        children.push(else_branch);
                    }
                }
                children
            }
        }
    }

    /// Collects every component in this subtree, depth-first.
    pub fn components(&self) -> Vec<&Component> {
        let mut out = Vec::new();
        self.collect_components(&mut out);
        out
    }

    /// Collects every decorator in this subtree, depth-first, outermost first.
    pub fn decorators(&self) -> Vec<&Decorator> {
        let mut out = Vec::new();
        self.collect_decorators(&mut out);
        out
    }

    pub(crate) fn collect_components<'a>(&'a self, out: &mut Vec<&'a Component>) {
        if let Element::Component(c) = self {
            out.push(c);
        }
        for child in self.children() {
            child.collect_components(out);
        }
    }

    pub(crate) fn collect_decorators<'a>(&'a self, out: &mut Vec<&'a Decorator>) {
        if let Element::Decorator(d) = self {
            out.push(d);
        }
        for child in self.children() {
            child.collect_decorators(out);
        }
    }
}

impl RegexElement for Element {
    fn compile(&self) -> String {
        match self {
            Element::Component(c) => c.compile(),
            Element::Decorator(d) => d.compile(),
        }
    }

    fn type_tag(&self) -> &'static str {
        match self {
            Element::Component(c) => c.type_tag(),
            Element::Decorator(d) => d.type_tag(),
        }
    }

    fn can_be_quantified(&self) -> bool {
        match self {
            Element::Component(c) => c.can_be_quantified(),
            Element::Decorator(d) => d.can_be_quantified(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Element::Component(c) => c.describe(),
            Element::Decorator(d) => d.describe(),
        }
    }

    fn metadata(&self) -> Value {
        match self {
            Element::Component(c) => c.metadata(),
            Element::Decorator(d) => d.metadata(),
        }
    }

    fn requires_unicode(&self) -> bool {
        match self {
            Element::Component(c) => c.requires_unicode(),
            Element::Decorator(d) => d.requires_unicode(),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compile())
    }
}

impl From<Component> for Element {
    fn from(component: Component) -> Self {
        Element::Component(component)
    }
}

impl From<Decorator> for Element {
    fn from(decorator: Decorator) -> Self {
        Element::Decorator(decorator)
    }
}

macro_rules! impl_from_variant {
    ($($ty:ty => $outer:ident :: $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Element {
                fn from(value: $ty) -> Self {
                    Element::$outer($outer::$variant(value))
                }
            }
        )*
    };
}

impl_from_variant! {
    Literal => Component::Literal,
    CharacterClass => Component::CharacterClass,
    AnchorKind => Component::Anchor,
    ShorthandKind => Component::Shorthand,
    Alternation => Component::Alternation,
    RawPattern => Component::RawPattern,
    Quantifier => Decorator::Quantifier,
    Group => Decorator::Group,
    Lookaround => Decorator::Lookaround,
}

/// Starts a metadata object with the keys every element reports.
pub(crate) fn base_metadata(element: &impl RegexElement) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::from(element.type_tag()));
    map.insert("quantifiable".into(), Value::from(element.can_be_quantified()));
    map.insert(
        "requiresUnicode".into(),
        Value::from(element.requires_unicode()),
    );
    map
}
