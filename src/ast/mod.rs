//! Abstract Syntax Tree (AST) surface consumed by the analyzer
//!
//! Trees are produced by an external parser and handed to the analysis core
//! as plain values. This module defines the node types, source spans, and
//! the traversal machinery shared by the check pipeline.

mod nodes;
mod span;
mod visitor;

pub use nodes::*;
pub use span::{Location, Span};
pub use visitor::{walk_unit, AstVisitor, NodeKind, NodeRef};
