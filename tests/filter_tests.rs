//! Suppression filtering against in-source annotations
//!
//! Scenarios follow the classic filter fixture: qualified and legacy rule
//! keys, the "all" wildcard with its non-suppressible exemption, range
//! containment over nested declarations, and unresolvable values.

mod common;

use common::*;
use tola::ast::{CompilationUnit, TypeDecl};
use tola::bridge::{Issue, RuleKey};
use tola::filter::filter_issues;

fn issue(rule: &str, line: usize) -> Issue {
    Issue {
        rule_key: RuleKey::repo(rule),
        file: "Test.java".into(),
        span: sp(line),
        message: format!("{} violated", rule),
    }
}

fn kept_lines(issues: Vec<Issue>, tree: &CompilationUnit) -> Vec<usize> {
    filter_issues(issues, tree).into_iter().map(|i| i.span.start.line).collect()
}

/// @SuppressWarnings("all") class A { lines 10..20 }
fn class_with(values: &[&str], first: usize, last: usize) -> TypeDecl {
    ClassBuilder::new("A", first, last)
        .annotation(suppress(values, first))
        .member(field(tr("String"), "s", first + 2))
        .build()
}

#[test]
fn wildcard_suppresses_everything_inside_the_declaration() {
    let tree = unit(vec![class_with(&["all"], 10, 20)]);
    let issues = vec![issue("S1068", 12), issue("S115", 15), issue("S1135", 25)];
    // Only the issue outside the class survives
    assert_eq!(kept_lines(issues, &tree), [25]);
}

#[test]
fn wildcard_never_silences_the_suppression_check_itself() {
    let tree = unit(vec![class_with(&["all"], 10, 20)]);
    let issues = vec![issue("S1309", 10), issue("S1068", 12)];
    assert_eq!(kept_lines(issues, &tree), [10]);
}

#[test]
fn bare_rule_key_is_unsupported_syntax() {
    let tree = unit(vec![class_with(&["S1068"], 10, 20)]);
    let issues = vec![issue("S1068", 12)];
    assert_eq!(kept_lines(issues, &tree), [12]);
}

#[test]
fn qualified_keys_suppress_their_rules_only() {
    let tree = unit(vec![class_with(&["repo:S1068", "repo:S115"], 10, 20)]);
    let issues = vec![issue("S1068", 12), issue("S115", 13), issue("S1135", 14)];
    assert_eq!(kept_lines(issues, &tree), [14]);
}

#[test]
fn historical_qualifier_matches_like_the_current_one() {
    let tree = unit(vec![class_with(&["squid:S1068"], 10, 20)]);
    let issues = vec![issue("S1068", 12)];
    assert!(kept_lines(issues, &tree).is_empty());
}

#[test]
fn legacy_zero_padded_alias_suppresses_the_canonical_rule() {
    let tree = unit(vec![class_with(&["squid:S00115"], 10, 20)]);
    let issues = vec![issue("S115", 12)];
    assert!(kept_lines(issues, &tree).is_empty());
}

#[test]
fn legacy_class_style_alias_suppresses_the_canonical_rule() {
    let tree = unit(vec![class_with(&["squid:ObjectFinalizeCheck"], 10, 20)]);
    let issues = vec![issue("S1111", 12)];
    assert!(kept_lines(issues, &tree).is_empty());
}

#[test]
fn alias_and_canonical_forms_suppress_identically() {
    let forms = ["repo:S115", "squid:S115", "squid:S00115", "repo:S00115"];
    let issues = || vec![issue("S115", 12), issue("S1068", 13)];
    let mut outcomes = Vec::new();
    for form in forms {
        let tree = unit(vec![class_with(&[form], 10, 20)]);
        outcomes.push(kept_lines(issues(), &tree));
    }
    for outcome in &outcomes {
        assert_eq!(outcome, &outcomes[0]);
    }
    assert_eq!(outcomes[0], [13]);
}

#[test]
fn suppression_is_bounded_by_the_declaration_range() {
    // Field-level suppression covers the field line only
    let tree = unit(vec![ClassBuilder::new("F", 1, 30)
        .member(field_with(
            vec![suppress(&["repo:S115"], 5)],
            tr("int"),
            "bad_constant_name",
            Some(lit_int(42, 5)),
            5,
        ))
        .member(field(tr("int"), "other_constant", 8))
        .build()]);
    let issues = vec![issue("S115", 5), issue("S115", 8)];
    assert_eq!(kept_lines(issues, &tree), [8]);
}

#[test]
fn method_level_suppression_covers_nested_statements() {
    let tree = unit(vec![ClassBuilder::new("W", 1, 30)
        .member(
            MethodBuilder::new("a", 5)
                .spanning(5, 9)
                .annotation(suppress(&["squid:S1111"], 5))
                .build(),
        )
        .member(MethodBuilder::new("d", 11).spanning(11, 15).build())
        .build()]);
    let issues = vec![issue("S1111", 7), issue("S1111", 13)];
    // Only the occurrence inside the annotated method is dropped
    assert_eq!(kept_lines(issues, &tree), [13]);
}

#[test]
fn nested_class_suppression_shadows_nothing_outside_it() {
    let inner = ClassBuilder::new("Inner", 12, 16)
        .annotation(suppress(&["repo:S1068"], 12))
        .member(field(tr("String"), "s", 13))
        .build();
    let tree = unit(vec![ClassBuilder::new("Outer", 10, 25)
        .nested(inner)
        .member(field(tr("String"), "t", 20))
        .build()]);
    let issues = vec![issue("S1068", 13), issue("S1068", 20)];
    assert_eq!(kept_lines(issues, &tree), [20]);
}

#[test]
fn enclosing_suppression_reaches_into_nested_declarations() {
    let inner = ClassBuilder::new("Inner", 12, 16)
        .member(field(tr("String"), "s", 13))
        .build();
    let tree = unit(vec![ClassBuilder::new("Outer", 10, 25)
        .annotation(suppress(&["repo:S1068"], 10))
        .nested(inner)
        .build()]);
    let issues = vec![issue("S1068", 13)];
    assert!(kept_lines(issues, &tree).is_empty());
}

#[test]
fn unresolvable_value_expression_suppresses_nothing() {
    let tree = unit(vec![ClassBuilder::new("F", 1, 30)
        .member(field_with(
            vec![suppress_unresolved("someUnresolvedConstant", 5)],
            tr("int"),
            "bad_constant_name3",
            Some(lit_int(42, 5)),
            5,
        ))
        .build()]);
    let issues = vec![issue("S115", 5)];
    // Not an error, simply no match
    assert_eq!(kept_lines(issues, &tree), [5]);
}

#[test]
fn other_annotations_are_not_suppressions() {
    let tree = unit(vec![ClassBuilder::new("E", 1, 10)
        .annotation(tola::ast::Annotation {
            name: "Deprecated".into(),
            arguments: vec![],
            span: sp(1),
        })
        .member(field(tr("String"), "s", 3))
        .build()]);
    let issues = vec![issue("S1068", 3)];
    assert_eq!(kept_lines(issues, &tree), [3]);
}

#[test]
fn unknown_qualified_rule_suppresses_nothing() {
    let tree = unit(vec![class_with(&["repo:unused"], 10, 20)]);
    let issues = vec![issue("S1068", 12)];
    assert_eq!(kept_lines(issues, &tree), [12]);
}

#[test]
fn annotation_without_values_suppresses_nothing() {
    let tree = unit(vec![ClassBuilder::new("E", 1, 10)
        .annotation(tola::ast::Annotation {
            name: "SuppressWarnings".into(),
            arguments: vec![],
            span: sp(1),
        })
        .member(field(tr("String"), "s", 3))
        .build()]);
    let issues = vec![issue("S1068", 3)];
    assert_eq!(kept_lines(issues, &tree), [3]);
}
