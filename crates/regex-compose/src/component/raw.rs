use log::trace;
use serde_json::Value;

use crate::collection::ElementCollection;
use crate::element::{base_metadata, Element, RegexElement};

/// Pre-compiled regex syntax spliced in without escaping.
///
/// A raw pattern taken from a whole [`ElementCollection`] is a snapshot: the
/// collection's compiled text is copied at construction, so later changes to
/// the collection do not show up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPattern {
    text: String,
    requires_grouping: bool,
    capture_groups: usize,
    group_names: Vec<String>,
    requires_unicode: bool,
    top_level_alternation: bool,
}

impl RawPattern {
    /// Wraps caller-supplied regex syntax verbatim.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        trace!("raw pattern {:?}", text);
        let requires_unicode = !text.is_ascii();
        Self {
            text,
            requires_grouping: false,
            capture_groups: 0,
            group_names: Vec::new(),
            requires_unicode,
            top_level_alternation: false,
        }
    }

    /// Compiles `collection` and captures the result.
    ///
    /// A multi-element scope, or one whose only element is an alternation,
    /// is marked as needing a non-capturing group before quantification.
    pub fn from_collection(collection: &ElementCollection) -> Self {
        // A multi-element scope already delimits its own alternations, so only
        // a lone element can expose a bare `|`.
        let top_level_alternation = collection.len() == 1
            && collection.last().is_some_and(Element::has_top_level_alternation);
        let requires_grouping = collection.needs_context_grouping()
            || collection
                .last()
                .is_some_and(|e| collection.len() == 1 && e.needs_grouping_when_quantified());
        trace!(
            "splicing {} elements as raw pattern (grouping: {})",
            collection.len(),
            requires_grouping
        );
        Self {
            text: collection.compile(),
            requires_grouping,
            capture_groups: collection.capture_group_count(),
            group_names: collection.group_names(),
            requires_unicode: collection.requires_unicode(),
            top_level_alternation,
        }
    }

    /// The spliced syntax.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a quantifier must group this pattern first.
    pub fn requires_grouping(&self) -> bool {
        self.requires_grouping
    }

    /// Whether the spliced text has a `|` outside any parentheses.
    ///
    /// Always false for caller-supplied syntax from [`RawPattern::new`].
    pub fn has_top_level_alternation(&self) -> bool {
        self.top_level_alternation
    }

    /// Capturing groups contained in a spliced collection.
    pub fn capture_group_count(&self) -> usize {
        self.capture_groups
    }

    /// Group names contained in a spliced collection.
    pub fn group_names(&self) -> &[String] {
        &self.group_names
    }
}

impl RegexElement for RawPattern {
    fn compile(&self) -> String {
        self.text.clone()
    }

    fn type_tag(&self) -> &'static str {
        "raw_pattern"
    }

    fn can_be_quantified(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("the pattern /{}/", self.text)
    }

    fn metadata(&self) -> Value {
        let mut map = base_metadata(self);
        map.insert("pattern".into(), Value::from(self.text.clone()));
        map.insert("requiresGrouping".into(), Value::from(self.requires_grouping));
        if self.capture_groups > 0 {
            map.insert("captureGroupCount".into(), Value::from(self.capture_groups));
        }
        if !self.group_names.is_empty() {
            map.insert("namedGroups".into(), Value::from(self.group_names.clone()));
        }
        Value::Object(map)
    }

    fn requires_unicode(&self) -> bool {
        self.requires_unicode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Alternation, Literal, ShorthandKind};

    #[test]
    fn test_raw_is_not_escaped() {
        let raw = RawPattern::new("\\d{3}.");
        assert_eq!(raw.compile(), "\\d{3}.");
        assert!(!raw.requires_grouping());
    }

    #[test]
    fn test_from_single_element_collection() {
        let mut scope = ElementCollection::new();
        scope.append(ShorthandKind::Digit);
        let raw = RawPattern::from_collection(&scope);
        assert_eq!(raw.compile(), "\\d");
        assert!(!raw.requires_grouping());
    }

    #[test]
    fn test_from_multi_element_collection() {
        let mut scope = ElementCollection::new();
        scope.append(Literal::new("a").unwrap());
        scope.append(ShorthandKind::Digit);
        let raw = RawPattern::from_collection(&scope);
        assert_eq!(raw.compile(), "a\\d");
        assert!(raw.requires_grouping());
    }

    #[test]
    fn test_from_alternation_collection() {
        let mut scope = ElementCollection::new();
        scope.append(Alternation::of_literals(["a", "b"]).unwrap());
        assert!(RawPattern::from_collection(&scope).requires_grouping());
    }

    #[test]
    fn test_top_level_alternation_only_for_lone_alternation() {
        let mut alt = ElementCollection::new();
        alt.append(Alternation::of_literals(["a", "b"]).unwrap());
        assert!(RawPattern::from_collection(&alt).has_top_level_alternation());

        let mut seq = ElementCollection::new();
        seq.append(ShorthandKind::Digit);
        seq.append(Alternation::of_literals(["a", "b"]).unwrap());
        let raw = RawPattern::from_collection(&seq);
        assert_eq!(raw.compile(), "\\d(?:a|b)");
        assert!(!raw.has_top_level_alternation());
        assert!(raw.requires_grouping());

        assert!(!RawPattern::new("a|b").has_top_level_alternation());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut scope = ElementCollection::new();
        scope.append(Literal::new("a").unwrap());
        let raw = RawPattern::from_collection(&scope);
        scope.append(Literal::new("b").unwrap());
        assert_eq!(raw.compile(), "a");
        assert_eq!(scope.compile(), "ab");
    }
}
