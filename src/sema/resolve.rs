//! Overload and generic method resolution
//!
//! Resolution is a total function: every call site yields a
//! [`ResolutionResult`], never an error. Candidates are gathered by simple
//! name and arity, generic candidates go through type-argument inference,
//! and applicability is tested in three widening phases (strict, loose,
//! variable arity) before most-specific selection.

use std::collections::{HashMap, HashSet};

use super::symbols::{MethodSignature, ScopeId, SymbolId, SymbolTable, TypeParameter};
use super::types::{
    is_assignable_loose, is_assignable_strict, most_specific_of, supertype_instance, ResolvedType,
    WildcardKind,
};

/// Why a call site failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// No visible declaration carries the name at all
    UnknownIdentifier,
    /// Candidates exist but none survives the applicability phases
    NoApplicableMethod,
    /// The call target's own type could not be resolved
    UnknownTarget,
}

/// Per-call-site outcome, attached to the call node by the semantic model
#[derive(Debug, Clone)]
pub enum ResolutionResult {
    Resolved {
        symbol: SymbolId,
        /// Declared return type after type-argument substitution; `None`
        /// for void methods
        return_type: Option<ResolvedType>,
    },
    Ambiguous {
        candidates: Vec<SymbolId>,
    },
    Unresolved {
        reason: UnresolvedReason,
    },
}

impl ResolutionResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionResult::Resolved { .. })
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            ResolutionResult::Resolved { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Strict,
    Loose,
    Varargs,
}

/// A candidate that survived inference and applicability in some phase
struct Applicable {
    symbol: SymbolId,
    /// Substituted formals, normalized to the call arity
    params: Vec<ResolvedType>,
    return_type: Option<ResolvedType>,
    generic: bool,
}

/// Resolve an unqualified call visible from `scope`
pub fn resolve(
    table: &SymbolTable,
    scope: ScopeId,
    name: &str,
    explicit_type_args: Option<&[ResolvedType]>,
    arg_types: &[ResolvedType],
) -> ResolutionResult {
    let candidates = table.methods_named(scope, name);
    resolve_among(table, &candidates, explicit_type_args, arg_types)
}

/// Resolve a qualified call against the members of `type_name`
pub fn resolve_in_type(
    table: &SymbolTable,
    type_name: &str,
    name: &str,
    explicit_type_args: Option<&[ResolvedType]>,
    arg_types: &[ResolvedType],
) -> ResolutionResult {
    let candidates = table.methods_of_type(type_name, name);
    resolve_among(table, &candidates, explicit_type_args, arg_types)
}

fn resolve_among(
    table: &SymbolTable,
    candidates: &[SymbolId],
    explicit_type_args: Option<&[ResolvedType]>,
    arg_types: &[ResolvedType],
) -> ResolutionResult {
    if candidates.is_empty() {
        return ResolutionResult::Unresolved { reason: UnresolvedReason::UnknownIdentifier };
    }
    let arity_compatible: Vec<SymbolId> = candidates
        .iter()
        .copied()
        .filter(|id| {
            table.method(*id).is_some_and(|sig| {
                arg_types.len() == sig.parameter_types.len()
                    || (sig.varargs && arg_types.len() >= sig.fixed_arity())
            })
        })
        .collect();
    if arity_compatible.is_empty() {
        return ResolutionResult::Unresolved { reason: UnresolvedReason::NoApplicableMethod };
    }

    for phase in [Phase::Strict, Phase::Loose, Phase::Varargs] {
        let applicable: Vec<Applicable> = arity_compatible
            .iter()
            .filter_map(|id| try_candidate(table, *id, explicit_type_args, arg_types, phase))
            .collect();
        if !applicable.is_empty() {
            return select_most_specific(table, applicable);
        }
    }
    ResolutionResult::Unresolved { reason: UnresolvedReason::NoApplicableMethod }
}

fn try_candidate(
    table: &SymbolTable,
    id: SymbolId,
    explicit_type_args: Option<&[ResolvedType]>,
    arg_types: &[ResolvedType],
    phase: Phase,
) -> Option<Applicable> {
    let sig = table.method(id)?;
    let formals = phase_formals(sig, arg_types.len(), phase)?;

    let subst = if sig.is_generic() {
        match explicit_type_args {
            Some(explicit) => {
                if explicit.len() != sig.type_params.len() {
                    return None;
                }
                sig.type_params
                    .iter()
                    .map(|tp| tp.name.clone())
                    .zip(explicit.iter().cloned())
                    .collect()
            }
            None => infer_type_args(sig, &formals, arg_types, table)?,
        }
    } else {
        HashMap::new()
    };

    if sig.is_generic() && !bounds_satisfied(&sig.type_params, &subst, table) {
        return None;
    }

    let inst: Vec<ResolvedType> = formals.iter().map(|f| f.substitute(&subst)).collect();
    let compatible = arg_types.iter().zip(&inst).all(|(arg, formal)| match phase {
        Phase::Strict => is_assignable_strict(arg, formal, table),
        Phase::Loose | Phase::Varargs => is_assignable_loose(arg, formal, table),
    });
    if !compatible {
        return None;
    }

    Some(Applicable {
        symbol: id,
        params: inst,
        return_type: sig.return_type.as_ref().map(|t| t.substitute(&subst)),
        generic: sig.is_generic(),
    })
}

/// Formal parameter types normalized to the call arity for the given phase.
/// Fixed-arity phases require an exact match; the variable-arity phase
/// repeats the varargs component for every trailing argument.
fn phase_formals(sig: &MethodSignature, argc: usize, phase: Phase) -> Option<Vec<ResolvedType>> {
    match phase {
        Phase::Strict | Phase::Loose => {
            if argc == sig.parameter_types.len() {
                Some(sig.parameter_types.clone())
            } else {
                None
            }
        }
        Phase::Varargs => {
            if !sig.varargs || argc < sig.fixed_arity() {
                return None;
            }
            let fixed = sig.fixed_arity();
            let component = match sig.parameter_types.last() {
                Some(ResolvedType::Array { of }) => (**of).clone(),
                _ => return None,
            };
            let mut formals: Vec<ResolvedType> = sig.parameter_types[..fixed].to_vec();
            formals.extend(std::iter::repeat(component).take(argc - fixed));
            Some(formals)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConstraintKind {
    Eq,
    Upper,
    Lower,
}

#[derive(Debug, Default)]
struct Constraints {
    eq: HashMap<String, Vec<ResolvedType>>,
    upper: HashMap<String, Vec<ResolvedType>>,
    lower: HashMap<String, Vec<ResolvedType>>,
}

impl Constraints {
    fn push(&mut self, kind: ConstraintKind, var: &str, ty: ResolvedType) {
        let bucket = match kind {
            ConstraintKind::Eq => &mut self.eq,
            ConstraintKind::Upper => &mut self.upper,
            ConstraintKind::Lower => &mut self.lower,
        };
        bucket.entry(var.to_string()).or_default().push(ty);
    }
}

/// Infer every type parameter of `sig` from the formal/argument pairs, left
/// to right. `None` means the constraints are unsatisfiable and the
/// candidate drops out; unconstrained parameters default to their declared
/// bound (Object when unbounded).
fn infer_type_args(
    sig: &MethodSignature,
    formals: &[ResolvedType],
    arg_types: &[ResolvedType],
    table: &SymbolTable,
) -> Option<HashMap<String, ResolvedType>> {
    let vars: HashSet<&str> = sig.type_params.iter().map(|tp| tp.name.as_str()).collect();
    let mut constraints = Constraints::default();
    for (formal, arg) in formals.iter().zip(arg_types) {
        collect_constraints(formal, arg, &vars, ConstraintKind::Eq, &mut constraints, table);
    }
    solve(&sig.type_params, &constraints, table)
}

fn collect_constraints(
    formal: &ResolvedType,
    actual: &ResolvedType,
    vars: &HashSet<&str>,
    kind: ConstraintKind,
    out: &mut Constraints,
    table: &SymbolTable,
) {
    match formal {
        ResolvedType::TypeVar { name, .. } if vars.contains(name.as_str()) => {
            if let Some(ty) = constraining_type(actual) {
                out.push(kind, name, ty);
            }
        }
        ResolvedType::Class { name: formal_name, args: formal_args } if !formal_args.is_empty() => {
            let actual_class = match actual {
                ResolvedType::Wildcard { bound: Some(b), .. } => &**b,
                other => other,
            };
            let inst = match supertype_instance(actual_class, formal_name, table) {
                Some(t) => t,
                None => return,
            };
            let actual_args = match &inst {
                ResolvedType::Class { args, .. } => args.clone(),
                _ => return,
            };
            if actual_args.len() != formal_args.len() {
                // Raw argument type constrains nothing
                return;
            }
            for (fa, aa) in formal_args.iter().zip(&actual_args) {
                match fa {
                    ResolvedType::Wildcard { kind: WildcardKind::Extends, bound: Some(fb) } => {
                        if let Some(effective) = wildcard_payload(aa) {
                            collect_constraints(fb, &effective, vars, ConstraintKind::Upper, out, table);
                        }
                    }
                    ResolvedType::Wildcard { kind: WildcardKind::Super, bound: Some(fb) } => {
                        if let Some(effective) = wildcard_payload(aa) {
                            collect_constraints(fb, &effective, vars, ConstraintKind::Lower, out, table);
                        }
                    }
                    ResolvedType::Wildcard { .. } => {}
                    // Invariant position
                    _ => collect_constraints(fa, aa, vars, ConstraintKind::Eq, out, table),
                }
            }
        }
        ResolvedType::Array { of: formal_of } => {
            if let ResolvedType::Array { of: actual_of } = actual {
                collect_constraints(formal_of, actual_of, vars, kind, out, table);
            }
        }
        _ => {}
    }
}

/// The type an argument contributes as a constraint: wildcard payloads are
/// unwrapped, primitives box, and null/unknown constrain nothing
fn constraining_type(actual: &ResolvedType) -> Option<ResolvedType> {
    match actual {
        ResolvedType::Null | ResolvedType::Unknown => None,
        ResolvedType::Wildcard { kind: WildcardKind::Unbounded, .. } => None,
        ResolvedType::Wildcard { bound: Some(b), .. } => Some((**b).clone()),
        ResolvedType::Wildcard { bound: None, .. } => None,
        ResolvedType::Primitive(p) => Some(ResolvedType::class(p.boxed_class())),
        other => Some(other.clone()),
    }
}

/// A type argument's payload when it sits under a formal wildcard position
fn wildcard_payload(actual: &ResolvedType) -> Option<ResolvedType> {
    match actual {
        ResolvedType::Wildcard { kind: WildcardKind::Unbounded, .. } => None,
        ResolvedType::Wildcard { bound: Some(b), .. } => Some((**b).clone()),
        ResolvedType::Wildcard { bound: None, .. } => None,
        other => Some(other.clone()),
    }
}

fn solve(
    params: &[TypeParameter],
    constraints: &Constraints,
    table: &SymbolTable,
) -> Option<HashMap<String, ResolvedType>> {
    let mut subst: HashMap<String, ResolvedType> = HashMap::new();
    for tp in params {
        let eqs = constraints.eq.get(&tp.name);
        let uppers = constraints.upper.get(&tp.name);
        let lowers = constraints.lower.get(&tp.name);

        let chosen = if let Some(eqs) = eqs.filter(|v| !v.is_empty()) {
            // Every equality use must agree; conflicting uses drop the
            // candidate rather than failing resolution
            if eqs.iter().any(|t| t != &eqs[0]) {
                return None;
            }
            eqs[0].clone()
        } else if let Some(uppers) = uppers.filter(|v| !v.is_empty()) {
            most_specific_of(uppers, table)?.clone()
        } else if let Some(lowers) = lowers.filter(|v| !v.is_empty()) {
            // The most general lower bound: every other flows into it
            lowers
                .iter()
                .find(|l| lowers.iter().all(|o| is_assignable_loose(o, l, table)))?
                .clone()
        } else {
            // No constraining use: fall back to the declared bound
            tp.bounds.first().cloned().unwrap_or_else(ResolvedType::object)
        };

        if let Some(uppers) = uppers {
            if !uppers.iter().all(|u| is_assignable_loose(&chosen, u, table)) {
                return None;
            }
        }
        if let Some(lowers) = lowers {
            if !lowers.iter().all(|l| is_assignable_loose(l, &chosen, table)) {
                return None;
            }
        }
        subst.insert(tp.name.clone(), chosen);
    }
    Some(subst)
}

/// Declared bounds must accept the chosen type arguments; bounds may
/// reference sibling type parameters, so they are substituted first
fn bounds_satisfied(
    params: &[TypeParameter],
    subst: &HashMap<String, ResolvedType>,
    table: &SymbolTable,
) -> bool {
    params.iter().all(|tp| {
        let Some(chosen) = subst.get(&tp.name) else {
            return false;
        };
        tp.bounds
            .iter()
            .all(|b| is_assignable_loose(chosen, &b.substitute(subst), table))
    })
}

fn select_most_specific(table: &SymbolTable, mut applicable: Vec<Applicable>) -> ResolutionResult {
    if applicable.len() == 1 {
        let a = applicable.swap_remove(0);
        return ResolutionResult::Resolved { symbol: a.symbol, return_type: a.return_type };
    }

    let more_specific = |a: &Applicable, b: &Applicable| {
        a.params.len() == b.params.len()
            && a.params
                .iter()
                .zip(&b.params)
                .all(|(x, y)| is_assignable_strict(x, y, table))
    };

    let best: Vec<&Applicable> = applicable
        .iter()
        .filter(|a| {
            applicable
                .iter()
                .all(|b| std::ptr::eq(*a, b) || more_specific(*a, b))
        })
        .collect();

    match best.len() {
        1 => {
            let a = best[0];
            ResolutionResult::Resolved { symbol: a.symbol, return_type: a.return_type.clone() }
        }
        0 => ResolutionResult::Ambiguous {
            candidates: applicable.iter().map(|a| a.symbol).collect(),
        },
        _ => {
            // Parameter-identical survivors: a plain declaration beats a
            // generic one
            let plain: Vec<&&Applicable> = best.iter().filter(|a| !a.generic).collect();
            if plain.len() == 1 {
                let a = plain[0];
                ResolutionResult::Resolved { symbol: a.symbol, return_type: a.return_type.clone() }
            } else {
                ResolutionResult::Ambiguous { candidates: best.iter().map(|a| a.symbol).collect() }
            }
        }
    }
}
