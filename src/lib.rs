//! Terminos Language Analyzer (tola)
//!
//! The semantic-analysis and rule-execution core of a static analyzer for
//! Java-like sources. Given parsed syntax trees it builds a per-file
//! symbol/type model, resolves overloaded and generic method calls, runs
//! registered checks over each tree, and filters reported issues against
//! in-source suppression annotations.
//!
//! ## Architecture
//!
//! - **ast**: syntax-tree values handed over by an external parser
//! - **sema**: symbol table, type model, overload/generic resolution, and
//!   the per-file semantic model
//! - **bridge**: check registration and dispatch with per-check failure
//!   isolation
//! - **filter**: suppression-annotation matching over reported issues
//!
//! ## Analysis Flow
//!
//! ```text
//! Parsed Tree → Symbol Table + Type Model → Call Resolution (in place)
//!                       ↓
//!        Visitor Bridge (checks, isolation) → Suppression Filter → Issues
//! ```
//!
//! Parsing, file discovery, configuration, and issue reporting belong to
//! the surrounding driver; this crate consumes trees and returns values.

pub mod ast;
pub mod bridge;
pub mod error;
pub mod filter;
pub mod sema;

pub use bridge::{
    AnalysisError, BridgeOptions, Check, CheckContext, CheckFailure, CheckResult, Issue, RuleKey,
    VisitorBridge,
};
pub use error::{Error, Result};

use ast::CompilationUnit;

/// Analyze a batch of files with one bridge: every tree is scanned in
/// order and the end-of-analysis summary is flushed once at the end.
///
/// Files whose tree is `None` (parse failures without recovery) are
/// skipped; a worker pool that analyzes files in parallel drives
/// [`VisitorBridge::visit_file`] directly instead, sharing one
/// [`bridge::RunState`] across its bridges.
pub fn analyze_files<'a>(
    bridge: &mut VisitorBridge,
    files: impl IntoIterator<Item = (&'a str, Option<&'a CompilationUnit>)>,
) -> Result<Vec<Issue>> {
    let mut issues = Vec::new();
    for (file, tree) in files {
        log::debug!("analyzing {}", file);
        issues.extend(bridge.visit_file(file, tree)?);
    }
    bridge.end_of_analysis();
    Ok(issues)
}
