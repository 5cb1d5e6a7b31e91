//! Fluent builder for composing patterns step by step.
//!
//! Each call appends a component or decorates the preceding element. The
//! first failure is recorded and every later call becomes a no-op; the
//! error is returned by [`PatternBuilder::build`].

use log::{debug, warn};
use serde_json::Value;

use regex_compose::{
    Alternation, AnchorKind, CharacterClass, Decoration, Decorator, Element, ElementCollection,
    Group, Literal, Lookaround, LookaroundKind, QuantifierKind, QuantifierMode, RawPattern,
    RegexElement, RegexError, RegexResult, ShorthandKind,
};

use crate::config::BuilderConfig;
use crate::error::{BuildError, BuildResult};
use crate::pattern::Pattern;

/// Fluent builder owning one pattern scope.
#[derive(Debug, Clone, Default)]
pub struct PatternBuilder {
    elements: ElementCollection,
    config: BuilderConfig,
    depth: usize,
    error: Option<BuildError>,
}

impl PatternBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder with the given configuration.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            elements: ElementCollection::with_config(config.render.clone()),
            config,
            depth: 0,
            error: None,
        }
    }

    // =========================================================================
    // Literals and classes
    // =========================================================================

    /// Append escaped literal text.
    pub fn literal(self, text: &str) -> Self {
        self.push_with(|| Literal::new(text).map(Element::from))
    }

    /// Append regex syntax verbatim.
    pub fn raw(self, syntax: &str) -> Self {
        self.push_with(|| Ok(RawPattern::new(syntax).into()))
    }

    /// Append `[chars]`.
    pub fn any_of(self, chars: &str) -> Self {
        self.push_with(|| CharacterClass::any_of(chars).map(Element::from))
    }

    /// Append `[^chars]`.
    pub fn none_of(self, chars: &str) -> Self {
        self.push_with(|| CharacterClass::none_of(chars).map(Element::from))
    }

    /// Append `[from-to]`.
    pub fn range(self, from: &str, to: &str) -> Self {
        self.push_with(|| CharacterClass::range(from, to).map(Element::from))
    }

    /// Append `[^from-to]`.
    pub fn negated_range(self, from: &str, to: &str) -> Self {
        self.push_with(|| CharacterClass::negated_range(from, to).map(Element::from))
    }

    /// Append `.`.
    pub fn any_char(self) -> Self {
        self.shorthand(ShorthandKind::AnyChar)
    }

    /// Append `\d`.
    pub fn digit(self) -> Self {
        self.shorthand(ShorthandKind::Digit)
    }

    /// Append `\D`.
    pub fn non_digit(self) -> Self {
        self.shorthand(ShorthandKind::NonDigit)
    }

    /// Append `\w`.
    pub fn word_char(self) -> Self {
        self.shorthand(ShorthandKind::WordChar)
    }

    /// Append `\W`.
    pub fn non_word_char(self) -> Self {
        self.shorthand(ShorthandKind::NonWordChar)
    }

    /// Append `\s`.
    pub fn whitespace(self) -> Self {
        self.shorthand(ShorthandKind::Whitespace)
    }

    /// Append `\S`.
    pub fn non_whitespace(self) -> Self {
        self.shorthand(ShorthandKind::NonWhitespace)
    }

    /// Append `\p{L}`.
    pub fn letter(self) -> Self {
        self.shorthand(ShorthandKind::Letter)
    }

    fn shorthand(self, kind: ShorthandKind) -> Self {
        self.push_with(|| Ok(kind.into()))
    }

    // =========================================================================
    // Anchors
    // =========================================================================

    /// Append `^`.
    pub fn start(self) -> Self {
        self.anchor(AnchorKind::Start)
    }

    /// Append `$`.
    pub fn end(self) -> Self {
        self.anchor(AnchorKind::End)
    }

    /// Append `\A`.
    pub fn string_start(self) -> Self {
        self.anchor(AnchorKind::StringStart)
    }

    /// Append `\z`.
    pub fn string_end(self) -> Self {
        self.anchor(AnchorKind::StringEnd)
    }

    /// Append `\b`.
    pub fn word_boundary(self) -> Self {
        self.anchor(AnchorKind::WordBoundary)
    }

    /// Append `\B`.
    pub fn non_word_boundary(self) -> Self {
        self.anchor(AnchorKind::NonWordBoundary)
    }

    fn anchor(self, kind: AnchorKind) -> Self {
        self.push_with(|| Ok(kind.into()))
    }

    // =========================================================================
    // Quantifiers
    // =========================================================================

    /// Repeat the preceding element zero or more times.
    pub fn zero_or_more(self) -> Self {
        self.quantify(Ok(QuantifierKind::ZeroOrMore))
    }

    /// Repeat the preceding element one or more times.
    pub fn one_or_more(self) -> Self {
        self.quantify(Ok(QuantifierKind::OneOrMore))
    }

    /// Make the preceding element optional.
    pub fn optional(self) -> Self {
        self.quantify(Ok(QuantifierKind::Optional))
    }

    /// Repeat the preceding element exactly `n` times.
    pub fn exactly(self, n: i64) -> Self {
        self.quantify(QuantifierKind::exactly(n))
    }

    /// Repeat the preceding element at least `n` times.
    pub fn at_least(self, n: i64) -> Self {
        self.quantify(QuantifierKind::at_least(n))
    }

    /// Repeat the preceding element between `min` and `max` times.
    pub fn between(self, min: i64, max: i64) -> Self {
        self.quantify(QuantifierKind::between(min, max))
    }

    /// Make the preceding quantifier lazy. Replaces a possessive mark.
    pub fn lazy(self) -> Self {
        self.remark(QuantifierMode::Lazy)
    }

    /// Make the preceding quantifier possessive. Replaces a lazy mark.
    pub fn possessive(self) -> Self {
        self.remark(QuantifierMode::Possessive)
    }

    /// Apply several decorations to the preceding element in precedence
    /// order (quantifier innermost, lookaround outermost).
    pub fn decorate(self, decorations: Vec<Decoration>) -> Self {
        self.apply(|c| c.decorate_last(decorations).map_err(BuildError::from))
    }

    fn quantify(self, kind: RegexResult<QuantifierKind>) -> Self {
        self.apply(|c| Ok(c.quantify_last(kind?)?))
    }

    fn remark(self, mode: QuantifierMode) -> Self {
        self.apply(|c| {
            c.map_last(mode.name(), |last| match last {
                Element::Decorator(Decorator::Quantifier(q)) => Ok(q.in_mode(mode).into()),
                other => Err(RegexError::ModifierWithoutQuantifier {
                    modifier: mode.name(),
                    found: other.type_tag(),
                }),
            })?;
            Ok(())
        })
    }

    // =========================================================================
    // Groups
    // =========================================================================

    /// Append a capturing group `(...)`.
    pub fn capture<F>(self, f: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.scoped(f, |c, body| {
            c.append(Group::capturing(body)?);
            Ok(())
        })
    }

    /// Append a non-capturing group `(?:...)`.
    pub fn group<F>(self, f: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.scoped(f, |c, body| {
            c.append(Group::non_capturing(body)?);
            Ok(())
        })
    }

    /// Append a named group `(?<name>...)`.
    pub fn named_capture<F>(self, name: &str, f: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.scoped(f, |c, body| {
            c.append(Group::named(name, body)?);
            Ok(())
        })
    }

    /// Append an atomic group `(?>...)`.
    pub fn atomic<F>(self, f: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.scoped(f, |c, body| {
            c.append(Group::atomic(body)?);
            Ok(())
        })
    }

    /// Append `(?(condition)then)`.
    pub fn conditional<F>(self, condition: &str, then: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.scoped(then, |c, body| {
            c.append(Group::conditional(condition, body, None)?);
            Ok(())
        })
    }

    /// Append `(?(condition)then|else)`.
    pub fn conditional_else<F, G>(self, condition: &str, then: F, otherwise: G) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
        G: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        if self.error.is_some() {
            return self;
        }
        let otherwise = match self.child().and_then(|child| otherwise(child).finish_scope()) {
            Ok(element) => element,
            Err(err) => {
                let mut this = self;
                this.record(err);
                return this;
            }
        };
        self.scoped(then, |c, body| {
            c.append(Group::conditional(condition, body, Some(otherwise))?);
            Ok(())
        })
    }

    // =========================================================================
    // Lookarounds
    // =========================================================================

    /// Assert that what follows matches.
    pub fn followed_by<F>(self, f: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.look(LookaroundKind::PositiveLookahead, f)
    }

    /// Assert that what follows does not match.
    pub fn not_followed_by<F>(self, f: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.look(LookaroundKind::NegativeLookahead, f)
    }

    /// Assert that what precedes matches.
    pub fn preceded_by<F>(self, f: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.look(LookaroundKind::PositiveLookbehind, f)
    }

    /// Assert that what precedes does not match.
    pub fn not_preceded_by<F>(self, f: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.look(LookaroundKind::NegativeLookbehind, f)
    }

    fn look<F>(self, kind: LookaroundKind, f: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.scoped(f, |c, body| {
            c.append(Lookaround::new(kind, body));
            Ok(())
        })
    }

    // =========================================================================
    // Alternation and splicing
    // =========================================================================

    /// Turn the preceding element into an alternation with `text`, or extend
    /// the preceding alternation.
    ///
    /// Only the preceding element takes part: earlier elements stay in
    /// sequence, so `literal("x").literal("a").or_literal("b")` compiles to
    /// `x(?:a|b)`.
    pub fn or_literal(self, text: &str) -> Self {
        self.apply(|c| Ok(c.alternate_last(Literal::new(text)?.into())?))
    }

    /// Like [`PatternBuilder::or_literal`] with a sub-pattern alternative.
    pub fn or<F>(self, f: F) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
    {
        self.scoped(f, |c, body| c.alternate_last(body))
    }

    /// Append an alternation of independently built branches.
    pub fn either<I>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = PatternBuilder>,
    {
        if self.error.is_some() {
            return self;
        }
        let alternatives = branches
            .into_iter()
            .map(PatternBuilder::finish_scope)
            .collect::<BuildResult<Vec<_>>>();
        match alternatives.and_then(|alts| Ok(Alternation::new(alts)?)) {
            Ok(alt) => self.elements.append(alt),
            Err(err) => self.record(err),
        }
        self
    }

    /// Splice a snapshot of another builder's pattern.
    ///
    /// Later changes to `other` do not affect this builder.
    pub fn pattern(mut self, other: &PatternBuilder) -> Self {
        if self.error.is_some() {
            return self;
        }
        match &other.error {
            Some(err) => self.record(err.clone()),
            None => self
                .elements
                .append(RawPattern::from_collection(&other.elements)),
        }
        self
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Number of top-level elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The underlying element collection.
    pub fn elements(&self) -> &ElementCollection {
        &self.elements
    }

    /// The first recorded error, if any.
    pub fn error(&self) -> Option<&BuildError> {
        self.error.as_ref()
    }

    /// Compile without consuming the builder.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while building.
    pub fn compile(&self) -> BuildResult<String> {
        self.check()?;
        Ok(self.elements.compile())
    }

    /// Describe without consuming the builder.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while building.
    pub fn describe(&self) -> BuildResult<String> {
        self.check()?;
        Ok(self.elements.describe())
    }

    /// Metadata without consuming the builder.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while building.
    pub fn metadata(&self) -> BuildResult<Value> {
        self.check()?;
        Ok(self.elements.metadata())
    }

    /// Build the pattern.
    ///
    /// # Errors
    ///
    /// Returns the first error recorded while building.
    pub fn build(self) -> BuildResult<Pattern> {
        self.check()?;
        let source = self.elements.compile();
        debug!("built pattern {:?} from {} elements", source, self.elements.len());
        Ok(Pattern::new(
            source,
            self.elements.describe(),
            self.elements.metadata(),
        ))
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn check(&self) -> BuildResult<()> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn record(&mut self, err: BuildError) {
        warn!("pattern builder error recorded: {}", err);
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    fn apply<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ElementCollection) -> BuildResult<()>,
    {
        if self.error.is_none() {
            if let Err(err) = f(&mut self.elements) {
                self.record(err);
            }
        }
        self
    }

    fn push_with<F>(self, make: F) -> Self
    where
        F: FnOnce() -> RegexResult<Element>,
    {
        self.apply(|c| {
            c.append(make()?);
            Ok(())
        })
    }

    fn child(&self) -> BuildResult<PatternBuilder> {
        let depth = self.depth + 1;
        if depth > self.config.max_depth {
            return Err(BuildError::TooDeep {
                depth,
                limit: self.config.max_depth,
            });
        }
        Ok(PatternBuilder {
            elements: ElementCollection::with_config(self.config.render.clone()),
            config: self.config.clone(),
            depth,
            error: None,
        })
    }

    /// Runs `f` on a nested scope and hands its single element, or a raw
    /// splice of the whole scope, to `attach`.
    fn scoped<F, A>(mut self, f: F, attach: A) -> Self
    where
        F: FnOnce(PatternBuilder) -> PatternBuilder,
        A: FnOnce(&mut ElementCollection, Element) -> RegexResult<()>,
    {
        if self.error.is_some() {
            return self;
        }
        let body = match self.child() {
            Ok(child) => f(child).finish_scope(),
            Err(err) => Err(err),
        };
        let result = body.and_then(|element| Ok(attach(&mut self.elements, element)?));
        if let Err(err) = result {
            self.record(err);
        }
        self
    }

    fn finish_scope(self) -> BuildResult<Element> {
        self.check()?;
        if self.elements.len() == 1 {
            let mut elements = self.elements.into_elements();
            return Ok(elements.remove(0));
        }
        Ok(RawPattern::from_collection(&self.elements).into())
    }
}

// =============================================================================
// Tests
// =============================================================================
