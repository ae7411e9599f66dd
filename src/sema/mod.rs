//! Semantic analysis: type model, symbol table, overload resolution, and
//! the per-file semantic model
//!
//! Everything here is built fresh per compilation unit and discarded with
//! it; only the classes-not-found names outlive a file, collected by the
//! check pipeline's run-scoped aggregator.

pub mod model;
pub mod resolve;
pub mod symbols;
pub mod types;

pub use model::SemanticModel;
pub use resolve::{ResolutionResult, UnresolvedReason};
pub use symbols::{
    MethodSignature, ScopeId, Symbol, SymbolId, SymbolTable, TypeParamEnv, TypeParameter,
    TypeSymbol, VariableKind, VariableSymbol,
};
pub use types::{PrimitiveKind, ResolvedType, TypeHierarchy, WildcardKind};
