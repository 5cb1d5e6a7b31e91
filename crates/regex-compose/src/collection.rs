//! Ordered container for the elements of one pattern scope.
//!
//! Sequence order is match order: `compile()` concatenates elements exactly
//! as they were appended. The only in-place change is replacing the last
//! element, which is how every "apply to the preceding element" operation
//! works.

use log::debug;
use serde_json::{Map, Value};

use crate::component::{Alternation, Component};
use crate::config::RenderConfig;
use crate::decorator::{compose, Decoration, Decorator, Quantifier, QuantifierKind};
use crate::element::{Element, RegexElement};
use crate::error::{RegexError, RegexResult};

/// The elements of one pattern scope, in match order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementCollection {
    elements: Vec<Element>,
    config: RenderConfig,
}

impl ElementCollection {
    /// Creates an empty collection with default rendering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection with the given rendering configuration.
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            elements: Vec::new(),
            config,
        }
    }

    /// The rendering configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Appends an element at the end of the scope.
    pub fn append(&mut self, element: impl Into<Element>) {
        let element = element.into();
        debug!("append {} at position {}", element.type_tag(), self.elements.len());
        self.elements.push(element);
    }

    /// Replaces the last element, returning the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::NoPrecedingElement`] when the scope is empty.
    pub fn replace_last(&mut self, element: impl Into<Element>) -> RegexResult<Element> {
        let slot = self
            .elements
            .last_mut()
            .ok_or(RegexError::NoPrecedingElement("replacement"))?;
        let element = element.into();
        debug!("replace last {} with {}", slot.type_tag(), element.type_tag());
        Ok(std::mem::replace(slot, element))
    }

    /// Removes and returns the last element.
    pub fn remove_last(&mut self) -> Option<Element> {
        let removed = self.elements.pop();
        if let Some(e) = &removed {
            debug!("remove last {}", e.type_tag());
        }
        removed
    }

    /// Replaces the last element with `f(last)`.
    ///
    /// On error the collection is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::NoPrecedingElement`] naming `operation` when the
    /// scope is empty, or whatever `f` returns.
    pub fn map_last<F>(&mut self, operation: &'static str, f: F) -> RegexResult<()>
    where
        F: FnOnce(&Element) -> RegexResult<Element>,
    {
        let last = self
            .elements
            .last()
            .ok_or(RegexError::NoPrecedingElement(operation))?;
        let replacement = f(last)?;
        self.replace_last(replacement)?;
        Ok(())
    }

    /// Quantifies the last element.
    ///
    /// # Errors
    ///
    /// [`RegexError::NoPrecedingElement`] on an empty scope,
    /// [`RegexError::UnquantifiableElement`] when the last element cannot
    /// repeat.
    pub fn quantify_last(&mut self, kind: QuantifierKind) -> RegexResult<()> {
        self.map_last("quantifier", |last| {
            Quantifier::new(last.clone(), kind).map(Element::from)
        })
    }

    /// Applies several decorations to the last element in precedence order.
    ///
    /// # Errors
    ///
    /// [`RegexError::NoPrecedingElement`] on an empty scope, or the first
    /// decorator validation error.
    pub fn decorate_last(&mut self, decorations: Vec<Decoration>) -> RegexResult<()> {
        self.map_last("decoration", |last| compose(last.clone(), decorations))
    }

    /// Adds `alternative` to the last element as an alternation.
    ///
    /// An existing alternation is replaced by a new one with the extra
    /// alternative; any other element becomes the first of two alternatives.
    ///
    /// # Errors
    ///
    /// Returns [`RegexError::NoPrecedingElement`] when the scope is empty and
    /// [`RegexError::EmptyOperand`] when `alternative` compiles to nothing.
    pub fn alternate_last(&mut self, alternative: Element) -> RegexResult<()> {
        self.map_last("alternation", |last| match last {
            Element::Component(Component::Alternation(alt)) => {
                alt.with_alternative(alternative).map(Element::from)
            }
            other => Alternation::new(vec![other.clone(), alternative]).map(Element::from),
        })
    }

    /// The last element, if any.
    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// Whether the scope has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of top-level elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Top-level elements in order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Iterates top-level elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Consumes the collection, returning its elements.
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Whether splicing this scope into a larger one needs `(?:...)`.
    ///
    /// True whenever the scope holds more than one element.
    pub fn needs_context_grouping(&self) -> bool {
        self.elements.len() > 1
    }

    /// Every component in the scope, depth-first.
    pub fn extract_components(&self) -> Vec<&Component> {
        let mut out = Vec::new();
        for e in &self.elements {
            e.collect_components(&mut out);
        }
        out
    }

    /// Every decorator in the scope, depth-first, outermost first.
    pub fn extract_decorators(&self) -> Vec<&Decorator> {
        let mut out = Vec::new();
        for e in &self.elements {
            e.collect_decorators(&mut out);
        }
        out
    }

    /// Number of capturing groups, including those inside spliced patterns.
    pub fn capture_group_count(&self) -> usize {
        let own = self
            .extract_decorators()
            .into_iter()
            .filter(|d| matches!(d, Decorator::Group(g) if g.kind().is_capturing()))
            .count();
        let spliced: usize = self
            .extract_components()
            .into_iter()
            .map(|c| match c {
                Component::RawPattern(raw) => raw.capture_group_count(),
                _ => 0,
            })
            .sum();
        own + spliced
    }

    /// Names of named groups in source order, including spliced ones.
    pub fn group_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for e in &self.elements {
            collect_group_names(e, &mut names);
        }
        names
    }

    /// Whether any element needs Unicode-aware matching.
    pub fn requires_unicode(&self) -> bool {
        self.elements.iter().any(Element::requires_unicode)
    }

    /// Concatenates every element's compiled form.
    ///
    /// With more than one element, an alternation is wrapped in `(?:...)`
    /// so its `|` stays between its own alternatives.
    pub fn compile(&self) -> String {
        if self.needs_context_grouping() {
            self.elements.iter().map(Element::compile_delimited).collect()
        } else {
            self.elements.iter().map(Element::compile).collect()
        }
    }

    /// Element descriptions joined by the configured separator.
    pub fn describe(&self) -> String {
        self.elements
            .iter()
            .map(Element::describe)
            .collect::<Vec<_>>()
            .join(&self.config.describe_separator)
    }

    /// Structured metadata for the whole scope.
    pub fn metadata(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::from("pattern"));
        if self.config.include_pattern_in_metadata {
            map.insert("pattern".into(), Value::from(self.compile()));
        }
        map.insert("elementCount".into(), Value::from(self.elements.len()));
        map.insert("requiresUnicode".into(), Value::from(self.requires_unicode()));
        map.insert(
            "captureGroupCount".into(),
            Value::from(self.capture_group_count()),
        );
        map.insert("namedGroups".into(), Value::from(self.group_names()));
        map.insert(
            "componentTypes".into(),
            Value::from(
                self.extract_components()
                    .iter()
                    .map(|c| c.type_tag())
                    .collect::<Vec<_>>(),
            ),
        );
        map.insert(
            "decoratorTypes".into(),
            Value::from(
                self.extract_decorators()
                    .iter()
                    .map(|d| d.type_tag())
                    .collect::<Vec<_>>(),
            ),
        );
        map.insert(
            "elements".into(),
            Value::Array(self.elements.iter().map(Element::metadata).collect()),
        );
        Value::Object(map)
    }
}

fn collect_group_names(element: &Element, names: &mut Vec<String>) {
    match element {
        Element::Decorator(Decorator::Group(g)) => {
            if let Some(name) = g.name() {
                names.push(name.to_string());
            }
        }
        Element::Component(Component::RawPattern(raw)) => {
            names.extend(raw.group_names().iter().cloned());
        }
        _ => {}
    }
    for child in element.children() {
        collect_group_names(child, names);
    }
}

impl<'a> IntoIterator for &'a ElementCollection {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl FromIterator<Element> for ElementCollection {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
            config: RenderConfig::default(),
        }
    }
}
