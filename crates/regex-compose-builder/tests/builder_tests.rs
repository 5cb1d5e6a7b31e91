//! Integration tests for the fluent pattern builder.
//!
//! These tests drive the public API end to end and check compiled syntax,
//! descriptions, metadata and error reporting.

use pretty_assertions::assert_eq;
use regex_compose_builder::{
    BuildError, BuilderConfig, Decoration, ErrorCategory, GroupKind, LookaroundKind,
    PatternBuilder, QuantifierKind, RegexError, RenderConfig,
};

#[test]
fn test_word_between_anchors() {
    let pattern = PatternBuilder::new()
        .start()
        .word_char()
        .one_or_more()
        .end()
        .build()
        .unwrap();
    assert_eq!(pattern.as_str(), "^\\w+$");
    assert_eq!(
        pattern.description(),
        "start of line, then one or more of a word character, then end of line"
    );
}

#[test]
fn test_escaping_of_literals_and_ranges() {
    let source = PatternBuilder::new()
        .literal("a.b*")
        .range("-", "9")
        .range("a", "z")
        .compile()
        .unwrap();
    assert_eq!(source, "a\\.b\\*[\\--9][a-z]");
}

#[test]
fn test_escaping_of_punctuation_metacharacters() {
    let source = PatternBuilder::new().literal(":!=<>/").compile().unwrap();
    assert_eq!(source, "\\:\\!\\=\\<\\>\\/");

    // none of these are special inside a class
    let source = PatternBuilder::new().any_of(":!=<>/").compile().unwrap();
    assert_eq!(source, "[:!=<>/]");
}

#[test]
fn test_alternation_next_to_siblings() {
    let source = PatternBuilder::new()
        .digit()
        .literal("a")
        .or_literal("b")
        .literal("c")
        .compile()
        .unwrap();
    assert_eq!(source, "\\d(?:a|b)c");

    let pair = PatternBuilder::new().literal("a").or_literal("b");
    let source = PatternBuilder::new()
        .literal("<")
        .pattern(&pair)
        .literal(">")
        .compile()
        .unwrap();
    assert_eq!(source, "\\<(?:a|b)\\>");
}

#[test]
fn test_empty_operands() {
    let err = PatternBuilder::new()
        .pattern(&PatternBuilder::new())
        .one_or_more()
        .build()
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::EmptyInput);

    let err = PatternBuilder::new().digit().or(|p| p).build().unwrap_err();
    assert_eq!(err, BuildError::Regex(RegexError::EmptyOperand("alternation")));
}

#[test]
fn test_character_class_keeps_general_metacharacters_literal() {
    let source = PatternBuilder::new()
        .any_of(".*]^")
        .none_of("a-")
        .compile()
        .unwrap();
    assert_eq!(source, "[.*\\]\\^][^a\\-]");
}

#[test]
fn test_counted_repetition_on_literal() {
    let source = PatternBuilder::new().literal("ab").exactly(2).compile().unwrap();
    assert_eq!(source, "ab{2}");
}

#[test]
fn test_quantified_alternation_is_grouped() {
    let source = PatternBuilder::new()
        .literal("a")
        .or_literal("b")
        .one_or_more()
        .compile()
        .unwrap();
    assert_eq!(source, "(?:a|b)+");
}

#[test]
fn test_lookahead_over_quantified_digit() {
    let source = PatternBuilder::new()
        .followed_by(|p| p.digit().one_or_more())
        .compile()
        .unwrap();
    assert_eq!(source, "(?=\\d+)");
}

#[test]
fn test_conditional_with_else() {
    let source = PatternBuilder::new()
        .conditional_else("1", |p| p.literal("yes"), |p| p.literal("no"))
        .compile()
        .unwrap();
    assert_eq!(source, "(?(1)yes|no)");
}

#[test]
fn test_conditional_wraps_alternation_branch() {
    let source = PatternBuilder::new()
        .conditional("name", |p| p.literal("a").or_literal("b"))
        .compile()
        .unwrap();
    assert_eq!(source, "(?(name)(?:a|b))");
}

#[test]
fn test_missing_condition() {
    let err = PatternBuilder::new()
        .conditional("", |p| p.literal("a"))
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::Regex(RegexError::MissingCondition));
}

#[test]
fn test_named_groups() {
    let pattern = PatternBuilder::new()
        .named_capture("ok_1", |p| p.literal("x"))
        .build()
        .unwrap();
    assert_eq!(pattern.as_str(), "(?<ok_1>x)");

    let err = PatternBuilder::new()
        .named_capture("1bad", |p| p.literal("x"))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::Regex(RegexError::InvalidIdentifier("1bad".to_string()))
    );
}

#[test]
fn test_date_metadata() {
    let pattern = PatternBuilder::new()
        .start()
        .named_capture("year", |p| p.digit().exactly(4))
        .literal("-")
        .named_capture("month", |p| p.digit().exactly(2))
        .end()
        .build()
        .unwrap();

    let meta = pattern.metadata();
    assert_eq!(meta["type"], "pattern");
    assert_eq!(meta["pattern"], "^(?<year>\\d{4})\\-(?<month>\\d{2})$");
    assert_eq!(meta["elementCount"], 5);
    assert_eq!(meta["captureGroupCount"], 2);
    assert_eq!(meta["namedGroups"], serde_json::json!(["year", "month"]));
    assert_eq!(meta["requiresUnicode"], false);
    assert_eq!(
        meta["decoratorTypes"],
        serde_json::json!(["group", "quantifier", "group", "quantifier"])
    );
}

#[test]
fn test_spliced_pattern_counts_groups() {
    let word = PatternBuilder::new()
        .named_capture("word", |p| p.letter().one_or_more())
        .whitespace();
    let pattern = PatternBuilder::new()
        .pattern(&word)
        .at_least(2)
        .build()
        .unwrap();
    assert_eq!(pattern.as_str(), "(?:(?<word>\\p{L}+)\\s){2,}");
    assert_eq!(pattern.metadata()["namedGroups"][0], "word");
    assert_eq!(pattern.metadata()["requiresUnicode"], true);
}

#[test]
fn test_splice_propagates_error() {
    let broken = PatternBuilder::new().literal("");
    let err = PatternBuilder::new()
        .literal("a")
        .pattern(&broken)
        .build()
        .unwrap_err();
    assert_eq!(err.category(), ErrorCategory::EmptyInput);
}

#[test]
fn test_error_categories() {
    let cases = [
        (PatternBuilder::new().any_of(""), ErrorCategory::EmptyInput),
        (PatternBuilder::new().range("ab", "c"), ErrorCategory::InvalidRange),
        (PatternBuilder::new().range("z", "a"), ErrorCategory::InvalidRange),
        (PatternBuilder::new().digit().between(5, 2), ErrorCategory::InvalidRange),
        (PatternBuilder::new().digit().at_least(-1), ErrorCategory::InvalidRange),
        (PatternBuilder::new().end().one_or_more(), ErrorCategory::InapplicableOperation),
        (PatternBuilder::new().digit().lazy(), ErrorCategory::InapplicableOperation),
        (PatternBuilder::new().capture(|p| p), ErrorCategory::InapplicableOperation),
    ];
    for (builder, category) in cases {
        let err = builder.build().unwrap_err();
        assert_eq!(err.category(), category, "unexpected category for {err}");
    }
}

#[test]
fn test_quantifier_on_quantifier_rejected() {
    let err = PatternBuilder::new()
        .digit()
        .one_or_more()
        .optional()
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::Regex(RegexError::UnquantifiableElement("quantifier"))
    );
}

#[test]
fn test_lookaround_not_quantifiable() {
    let err = PatternBuilder::new()
        .followed_by(|p| p.digit())
        .one_or_more()
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::Regex(RegexError::UnquantifiableElement("lookaround"))
    );
}

#[test]
fn test_decorate_composes_in_precedence_order() {
    let source = PatternBuilder::new()
        .digit()
        .decorate(vec![
            Decoration::look(LookaroundKind::PositiveLookahead),
            Decoration::quantify(QuantifierKind::OneOrMore),
            Decoration::named_group("n"),
        ])
        .compile()
        .unwrap();
    assert_eq!(source, "(?=(?<n>\\d+))");

    let source = PatternBuilder::new()
        .digit()
        .decorate(vec![Decoration::group(GroupKind::Atomic)])
        .compile()
        .unwrap();
    assert_eq!(source, "(?>\\d)");
}

#[test]
fn test_custom_render_config() {
    let config = BuilderConfig::builder()
        .with_render(
            RenderConfig::builder()
                .with_describe_separator(" and ")
                .with_pattern_in_metadata(false)
                .build(),
        )
        .build();
    let pattern = PatternBuilder::with_config(config)
        .digit()
        .whitespace()
        .build()
        .unwrap();
    assert_eq!(pattern.description(), "a digit and a whitespace character");
    assert!(pattern.metadata().get("pattern").is_none());
}

#[test]
fn test_depth_limit() {
    let config = BuilderConfig::builder().with_max_depth(2).build();
    let ok = PatternBuilder::with_config(config.clone())
        .group(|p| p.capture(|p| p.digit()))
        .compile()
        .unwrap();
    assert_eq!(ok, "(?:(\\d))");

    let err = PatternBuilder::with_config(config)
        .group(|p| p.capture(|p| p.followed_by(|p| p.digit())))
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::TooDeep { depth: 3, limit: 2 });
}

#[test]
fn test_builder_is_reusable_before_build() {
    let base = PatternBuilder::new().string_start().word_char().one_or_more();
    let strict = base.clone().string_end();
    assert_eq!(base.compile().unwrap(), "\\A\\w+");
    assert_eq!(strict.compile().unwrap(), "\\A\\w+\\z");
    assert_eq!(base.len(), 2);
    assert!(!strict.is_empty());
}
