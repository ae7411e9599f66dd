use std::fmt;

use crate::ast::{CompilationUnit, NodeKind, NodeRef, Span};
use crate::sema::SemanticModel;

/// Repository qualifier of the current rule keys
pub const REPOSITORY_KEY: &str = "repo";

/// Identity of a checkable rule, scoped to a repository namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub repository: String,
    pub rule: String,
}

impl RuleKey {
    pub fn new(repository: impl Into<String>, rule: impl Into<String>) -> Self {
        Self { repository: repository.into(), rule: rule.into() }
    }

    /// A rule key in the current repository
    pub fn repo(rule: impl Into<String>) -> Self {
        Self::new(REPOSITORY_KEY, rule)
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.rule)
    }
}

/// One reported finding, before and after suppression filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub rule_key: RuleKey,
    pub file: String,
    pub span: Span,
    pub message: String,
}

/// Typed fault raised by a check body; isolated by the pipeline per the
/// run's fail-fast policy
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct CheckFailure {
    pub message: String,
}

impl CheckFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

pub type CheckResult = Result<(), CheckFailure>;

/// Record of a check that failed on one file while the run continued
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisError {
    pub rule_key: RuleKey,
    pub file: String,
    pub message: String,
}

/// Everything a check sees while scanning one file
pub struct CheckContext<'a> {
    file: &'a str,
    unit: &'a CompilationUnit,
    model: Option<&'a SemanticModel>,
    issues: Vec<Issue>,
}

impl<'a> CheckContext<'a> {
    pub(crate) fn new(
        file: &'a str,
        unit: &'a CompilationUnit,
        model: Option<&'a SemanticModel>,
    ) -> Self {
        Self { file, unit, model, issues: Vec::new() }
    }

    pub fn file(&self) -> &str {
        self.file
    }

    pub fn unit(&self) -> &CompilationUnit {
        self.unit
    }

    /// The semantic model, absent for unparsed or excluded files. Checks
    /// that declared `wants_semantic_model` are never invoked without one.
    pub fn semantic_model(&self) -> Option<&SemanticModel> {
        self.model
    }

    pub fn report_issue(&mut self, rule_key: RuleKey, span: Span, message: impl Into<String>) {
        self.issues.push(Issue {
            rule_key,
            file: self.file.to_string(),
            span,
            message: message.into(),
        });
    }

    pub(crate) fn take_issues(&mut self) -> Vec<Issue> {
        std::mem::take(&mut self.issues)
    }
}

/// One analyzer rule, registered with the pipeline for a whole run.
///
/// A check either subscribes to node kinds (`nodes_to_visit` non-empty,
/// `visit_node` called once per matching node during the shared pre-order
/// traversal) or takes whole-tree entry (`visit_tree`, self-directed
/// traversal). Checks are re-entered per file and must not rely on the
/// pipeline to reset any internal state.
pub trait Check {
    fn rule_key(&self) -> RuleKey;

    /// When true, the check is silently skipped on files without an
    /// attached semantic model
    fn wants_semantic_model(&self) -> bool {
        false
    }

    /// Node kinds of interest; an empty set selects whole-tree mode
    fn nodes_to_visit(&self) -> Vec<NodeKind> {
        Vec::new()
    }

    fn visit_tree(&mut self, _ctx: &mut CheckContext<'_>) -> CheckResult {
        Ok(())
    }

    fn visit_node(&mut self, _node: NodeRef<'_>, _ctx: &mut CheckContext<'_>) -> CheckResult {
        Ok(())
    }
}
