//! Suppression filter
//!
//! Post-processes the issues a file's checks produced against the
//! suppression annotations found in its tree. Annotations are recognized
//! on declarations only (types, fields, methods); a suppression covers the
//! annotated declaration and everything nested inside it. Values that are
//! not string literals cannot be reduced statically and match nothing,
//! which is not an error.

mod rule_key;

pub use rule_key::{
    is_suppressible, normalize, suppresses, SuppressedKey, DEPRECATED_REPOSITORY_KEY,
};

use crate::ast::{
    Annotation, AnnotationArg, ClassMember, CompilationUnit, Expr, InterfaceMember, Literal, Span,
    TypeDecl,
};
use crate::bridge::Issue;

/// Simple and qualified names recognized as the suppression annotation
const SUPPRESS_WARNINGS: &[&str] = &["SuppressWarnings", "java.lang.SuppressWarnings"];

/// One recognized suppression: its normalized values and the source range
/// of the annotated declaration
#[derive(Debug, Clone)]
struct SuppressionScope {
    keys: Vec<SuppressedKey>,
    span: Span,
}

/// Drop every issue covered by a matching suppression annotation; the
/// remainder keeps its input order
pub fn filter_issues(issues: Vec<Issue>, unit: &CompilationUnit) -> Vec<Issue> {
    let scopes = collect_scopes(unit);
    if scopes.is_empty() {
        return issues;
    }
    let before = issues.len();
    let kept: Vec<Issue> =
        issues.into_iter().filter(|issue| !is_suppressed(issue, &scopes)).collect();
    if kept.len() != before {
        log::debug!("suppression filter dropped {} of {} issues", before - kept.len(), before);
    }
    kept
}

fn is_suppressed(issue: &Issue, scopes: &[SuppressionScope]) -> bool {
    scopes.iter().any(|scope| {
        scope.span.contains(issue.span.start)
            && scope.keys.iter().any(|key| suppresses(key, &issue.rule_key.rule))
    })
}

fn collect_scopes(unit: &CompilationUnit) -> Vec<SuppressionScope> {
    let mut scopes = Vec::new();
    for decl in &unit.type_decls {
        collect_from_type(decl, &mut scopes);
    }
    scopes
}

fn collect_from_type(decl: &TypeDecl, scopes: &mut Vec<SuppressionScope>) {
    push_scope(decl.annotations(), decl.span(), scopes);
    match decl {
        TypeDecl::Class(class) => {
            for member in &class.body {
                match member {
                    ClassMember::Field(f) => push_scope(&f.annotations, f.span, scopes),
                    ClassMember::Method(m) => push_scope(&m.annotations, m.span, scopes),
                    ClassMember::Nested(nested) => collect_from_type(nested, scopes),
                }
            }
        }
        TypeDecl::Interface(iface) => {
            for member in &iface.body {
                match member {
                    InterfaceMember::Field(f) => push_scope(&f.annotations, f.span, scopes),
                    InterfaceMember::Method(m) => push_scope(&m.annotations, m.span, scopes),
                    InterfaceMember::Nested(nested) => collect_from_type(nested, scopes),
                }
            }
        }
    }
}

fn push_scope(annotations: &[Annotation], decl_span: Span, scopes: &mut Vec<SuppressionScope>) {
    for ann in annotations {
        if !SUPPRESS_WARNINGS.contains(&ann.name.as_str()) {
            continue;
        }
        let keys: Vec<SuppressedKey> = ann
            .arguments
            .iter()
            .flat_map(|arg| match arg {
                AnnotationArg::Value(expr) => string_values(expr),
                AnnotationArg::Named(name, expr) if name == "value" => string_values(expr),
                AnnotationArg::Named(..) => Vec::new(),
            })
            .filter_map(|raw| normalize(&raw))
            .collect();
        if !keys.is_empty() {
            scopes.push(SuppressionScope { keys, span: decl_span });
        }
    }
}

/// Statically reducible string values of an annotation argument. Anything
/// that is not a string literal (an unresolved constant reference, say)
/// reduces to nothing and therefore suppresses nothing.
fn string_values(expr: &Expr) -> Vec<String> {
    match expr {
        Expr::Literal(lit) => match &lit.value {
            Literal::Str(s) => vec![s.clone()],
            _ => Vec::new(),
        },
        Expr::ArrayInitializer(init) => init.values.iter().flat_map(string_values).collect(),
        _ => Vec::new(),
    }
}
