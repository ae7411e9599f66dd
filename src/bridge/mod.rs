//! Check execution pipeline ("visitor bridge")
//!
//! Owns the registered checks for one analysis run, decides per file
//! whether a semantic model is attached, dispatches tree nodes to
//! subscribed checks in registration order, isolates check failures per
//! the run's fail-fast policy, and aggregates unresolved-class names for
//! the end-of-analysis summary.

mod check;

pub use check::{
    AnalysisError, Check, CheckContext, CheckFailure, CheckResult, Issue, RuleKey, REPOSITORY_KEY,
};

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use crate::ast::{walk_unit, CompilationUnit, NodeKind};
use crate::error::{Error, Result};
use crate::filter;
use crate::sema::SemanticModel;

/// Run-scoped policy switches
#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeOptions {
    /// When set, the first check failure aborts the file instead of being
    /// recorded and skipped
    pub fail_fast: bool,
}

/// Mutable state shared by every file of one analysis run. Workers that
/// analyze files in parallel hand a clone of the same `Arc` to each of
/// their bridges; all other state is per-file.
#[derive(Debug, Default)]
pub struct RunState {
    analysis_errors: Mutex<Vec<AnalysisError>>,
    classes_not_found: Mutex<BTreeSet<String>>,
    summary_emitted: Mutex<bool>,
}

impl RunState {
    fn record_error(&self, error: AnalysisError) {
        self.analysis_errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error);
    }

    fn record_classes_not_found(&self, names: &BTreeSet<String>) {
        if names.is_empty() {
            return;
        }
        self.classes_not_found
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(names.iter().cloned());
    }
}

/// Maximum number of class names listed by the end-of-analysis summary
const NOT_FOUND_NAMES_LOGGED: usize = 50;

pub struct VisitorBridge {
    checks: Vec<Box<dyn Check>>,
    options: BridgeOptions,
    run: Arc<RunState>,
}

impl VisitorBridge {
    /// Register checks for a run; registration order is dispatch order
    pub fn new(checks: Vec<Box<dyn Check>>, options: BridgeOptions) -> Self {
        Self::with_run_state(checks, options, Arc::new(RunState::default()))
    }

    /// Share an existing run's accumulators, for parallel per-file workers
    pub fn with_run_state(
        checks: Vec<Box<dyn Check>>,
        options: BridgeOptions,
        run: Arc<RunState>,
    ) -> Self {
        Self { checks, options, run }
    }

    pub fn run_state(&self) -> Arc<RunState> {
        Arc::clone(&self.run)
    }

    /// Errors recorded so far, in occurrence order
    pub fn analysis_errors(&self) -> Vec<AnalysisError> {
        self.run
            .analysis_errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Analyze one file: attach the semantic model where possible, run
    /// every eligible check, then filter the collected issues against
    /// in-source suppressions.
    ///
    /// Returns `Err` only when a check fails and `fail_fast` is set; the
    /// remaining checks for that file are abandoned. With `fail_fast`
    /// unset a failing check is recorded as one [`AnalysisError`] and
    /// excluded from the rest of the file, and later files are unaffected.
    pub fn visit_file(&mut self, file: &str, tree: Option<&CompilationUnit>) -> Result<Vec<Issue>> {
        let Some(unit) = tree else {
            log::debug!("{}: no tree, nothing to scan", file);
            return Ok(Vec::new());
        };

        let model = if excluded_from_semantics(file) {
            log::debug!("{}: semantic analysis excluded for platform sources", file);
            None
        } else {
            let model = SemanticModel::attach(unit);
            self.run.record_classes_not_found(model.classes_not_found());
            Some(model)
        };

        let mut ctx = CheckContext::new(file, unit, model.as_ref());
        // Eligibility is fixed per file: a check that needs the model is
        // silently skipped when none is attached
        let mut alive: Vec<bool> = self
            .checks
            .iter()
            .map(|c| model.is_some() || !c.wants_semantic_model())
            .collect();

        let mut subscriptions: Vec<HashSet<NodeKind>> = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            subscriptions.push(check.nodes_to_visit().into_iter().collect());
        }

        // Whole-tree checks first, in registration order
        for index in 0..self.checks.len() {
            if !alive[index] || !subscriptions[index].is_empty() {
                continue;
            }
            if let Err(failure) = self.checks[index].visit_tree(&mut ctx) {
                self.handle_failure(index, file, failure, &mut alive)?;
            }
        }

        // One shared pre-order traversal serves all subscribed checks
        if subscriptions.iter().enumerate().any(|(i, s)| alive[i] && !s.is_empty()) {
            let checks = &mut self.checks;
            let run = &self.run;
            let fail_fast = self.options.fail_fast;
            let mut fatal: Option<Error> = None;
            walk_unit(unit, &mut |node| {
                if fatal.is_some() {
                    return;
                }
                for index in 0..checks.len() {
                    if !alive[index] || !subscriptions[index].contains(&node.kind()) {
                        continue;
                    }
                    if let Err(failure) = checks[index].visit_node(node, &mut ctx) {
                        let rule_key = checks[index].rule_key();
                        if fail_fast {
                            fatal = Some(Error::CheckFailure {
                                rule_key: rule_key.to_string(),
                                file: file.to_string(),
                                message: failure.message,
                            });
                            return;
                        }
                        log::debug!("{}: check {} failed, disabled for this file", file, rule_key);
                        run.record_error(AnalysisError {
                            rule_key,
                            file: file.to_string(),
                            message: failure.message,
                        });
                        alive[index] = false;
                    }
                }
            });
            if let Some(error) = fatal {
                return Err(error);
            }
        }

        Ok(filter::filter_issues(ctx.take_issues(), unit))
    }

    /// Flush the unresolved-class aggregator: one warning listing at most
    /// the first 50 distinct names in lexicographic order, with a
    /// truncation marker when more exist. One-shot; later calls and empty
    /// aggregators yield `None`.
    pub fn end_of_analysis(&mut self) -> Option<String> {
        let mut emitted = self
            .run
            .summary_emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *emitted {
            return None;
        }
        *emitted = true;
        let names = self
            .run
            .classes_not_found
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if names.is_empty() {
            return None;
        }
        let listed: Vec<&str> =
            names.iter().take(NOT_FOUND_NAMES_LOGGED).map(String::as_str).collect();
        let mut body = listed.join(", ");
        if names.len() > NOT_FOUND_NAMES_LOGGED {
            body.push_str(", ...");
        }
        let message = format!("Classes not found during the analysis : [{}]", body);
        log::warn!("{}", message);
        Some(message)
    }

    fn handle_failure(
        &self,
        index: usize,
        file: &str,
        failure: CheckFailure,
        alive: &mut [bool],
    ) -> Result<()> {
        let rule_key = self.checks[index].rule_key();
        if self.options.fail_fast {
            return Err(Error::CheckFailure {
                rule_key: rule_key.to_string(),
                file: file.to_string(),
                message: failure.message,
            });
        }
        log::debug!("{}: check {} failed, disabled for this file", file, rule_key);
        self.run.record_error(AnalysisError {
            rule_key,
            file: file.to_string(),
            message: failure.message,
        });
        alive[index] = false;
        Ok(())
    }
}

/// Platform bootstrap sources cannot be semantically resolved; checks that
/// assume a model must not run against them
fn excluded_from_semantics(file: &str) -> bool {
    let parts: Vec<&str> = file.split(['/', '\\']).filter(|s| !s.is_empty()).collect();
    if parts.windows(2).any(|w| w == ["java", "lang"]) {
        return true;
    }
    parts.len() >= 3 && parts[parts.len() - 3..] == ["java", "io", "Serializable.java"]
}
