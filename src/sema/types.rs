//! Immutable type model used by resolution
//!
//! Types are plain values; substitution and erasure produce new values. All
//! nominal-subtyping questions are delegated to a [`TypeHierarchy`], which
//! the symbol table implements for the current compilation unit plus the
//! well-known platform classes.

use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "boolean" => PrimitiveKind::Boolean,
            "char" => PrimitiveKind::Char,
            "byte" => PrimitiveKind::Byte,
            "short" => PrimitiveKind::Short,
            "int" => PrimitiveKind::Int,
            "long" => PrimitiveKind::Long,
            "float" => PrimitiveKind::Float,
            "double" => PrimitiveKind::Double,
            _ => return None,
        })
    }

    /// Name of the wrapper class this primitive boxes to
    pub fn boxed_class(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Char => "Character",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Integer",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }

    /// Primitive a wrapper class unboxes to
    pub fn from_boxed_class(name: &str) -> Option<Self> {
        Some(match name {
            "Boolean" => PrimitiveKind::Boolean,
            "Character" => PrimitiveKind::Char,
            "Byte" => PrimitiveKind::Byte,
            "Short" => PrimitiveKind::Short,
            "Integer" => PrimitiveKind::Int,
            "Long" => PrimitiveKind::Long,
            "Float" => PrimitiveKind::Float,
            "Double" => PrimitiveKind::Double,
            _ => return None,
        })
    }

    /// Widening primitive conversion, identity included
    pub fn widens_to(self, other: PrimitiveKind) -> bool {
        use PrimitiveKind::*;
        if self == other {
            return true;
        }
        match self {
            Byte => matches!(other, Short | Int | Long | Float | Double),
            Short => matches!(other, Int | Long | Float | Double),
            Char => matches!(other, Int | Long | Float | Double),
            Int => matches!(other, Long | Float | Double),
            Long => matches!(other, Float | Double),
            Float => matches!(other, Double),
            Boolean | Double => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardKind {
    Unbounded,
    Extends,
    Super,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Primitive(PrimitiveKind),
    /// Raw when `args` is empty
    Class { name: String, args: Vec<ResolvedType> },
    Array { of: Box<ResolvedType> },
    /// Bounds are resolved before the variable participates in inference
    TypeVar { name: String, upper: Vec<ResolvedType> },
    Wildcard { kind: WildcardKind, bound: Option<Box<ResolvedType>> },
    /// Type of the null literal
    Null,
    /// Degraded type for unresolvable references; compatible with everything
    Unknown,
}

impl ResolvedType {
    pub fn class(name: impl Into<String>) -> Self {
        ResolvedType::Class { name: name.into(), args: Vec::new() }
    }

    pub fn parameterized(name: impl Into<String>, args: Vec<ResolvedType>) -> Self {
        ResolvedType::Class { name: name.into(), args }
    }

    pub fn array(of: ResolvedType) -> Self {
        ResolvedType::Array { of: Box::new(of) }
    }

    pub fn object() -> Self {
        ResolvedType::class("Object")
    }

    pub fn string() -> Self {
        ResolvedType::class("String")
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ResolvedType::Unknown)
    }

    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            ResolvedType::Class { .. }
                | ResolvedType::Array { .. }
                | ResolvedType::TypeVar { .. }
                | ResolvedType::Null
        )
    }

    /// Replace type variables by name, producing a new type
    pub fn substitute(&self, subst: &HashMap<String, ResolvedType>) -> ResolvedType {
        match self {
            ResolvedType::TypeVar { name, .. } => {
                subst.get(name).cloned().unwrap_or_else(|| self.clone())
            }
            ResolvedType::Class { name, args } => ResolvedType::Class {
                name: name.clone(),
                args: args.iter().map(|a| a.substitute(subst)).collect(),
            },
            ResolvedType::Array { of } => ResolvedType::Array { of: Box::new(of.substitute(subst)) },
            ResolvedType::Wildcard { kind, bound } => ResolvedType::Wildcard {
                kind: *kind,
                bound: bound.as_ref().map(|b| Box::new(b.substitute(subst))),
            },
            _ => self.clone(),
        }
    }

    /// Erasure: type variables collapse to their leftmost bound, wildcards
    /// to their extends-bound, parameterized classes to their raw form
    pub fn erasure(&self) -> ResolvedType {
        match self {
            ResolvedType::TypeVar { upper, .. } => {
                upper.first().map(|u| u.erasure()).unwrap_or_else(ResolvedType::object)
            }
            ResolvedType::Wildcard { kind: WildcardKind::Extends, bound: Some(b) } => b.erasure(),
            ResolvedType::Wildcard { .. } => ResolvedType::object(),
            ResolvedType::Class { name, .. } => ResolvedType::class(name.clone()),
            ResolvedType::Array { of } => ResolvedType::array(of.erasure()),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Primitive(p) => write!(f, "{}", p.name()),
            ResolvedType::Class { name, args } => {
                write!(f, "{}", name)?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, a) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", a)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            ResolvedType::Array { of } => write!(f, "{}[]", of),
            ResolvedType::TypeVar { name, .. } => write!(f, "{}", name),
            ResolvedType::Wildcard { kind, bound } => match (kind, bound) {
                (WildcardKind::Extends, Some(b)) => write!(f, "? extends {}", b),
                (WildcardKind::Super, Some(b)) => write!(f, "? super {}", b),
                _ => write!(f, "?"),
            },
            ResolvedType::Null => write!(f, "null"),
            ResolvedType::Unknown => write!(f, "!unknown!"),
        }
    }
}

/// Nominal-subtyping queries answered by the symbol table
pub trait TypeHierarchy {
    /// Whether `sub` names a type that is `sup` or inherits from it
    fn is_nominal_subtype(&self, sub: &str, sup: &str) -> bool;

    /// Direct supertypes of `name` as declared (superclass first, then
    /// interfaces), with their declared type arguments
    fn direct_supertypes(&self, name: &str) -> Vec<ResolvedType>;

    /// Declared type parameter names of `name`, empty for non-generic types
    fn type_params_of(&self, name: &str) -> Vec<String>;
}

/// Find the instantiation of `target` in the supertype closure of `src`,
/// substituting type arguments along the inheritance path. `D extends
/// B<String>` yields `B<String>` for (`D`, `B`). A raw `src` yields the raw
/// target.
pub fn supertype_instance(
    src: &ResolvedType,
    target: &str,
    hierarchy: &dyn TypeHierarchy,
) -> Option<ResolvedType> {
    let (name, args) = match src {
        ResolvedType::Class { name, args } => (name, args),
        _ => return None,
    };
    if name == target {
        return Some(src.clone());
    }
    let params = hierarchy.type_params_of(name);
    let subst: HashMap<String, ResolvedType> = if args.is_empty() {
        HashMap::new()
    } else {
        params.iter().cloned().zip(args.iter().cloned()).collect()
    };
    for sup in hierarchy.direct_supertypes(name) {
        let sup = if subst.is_empty() { sup.erasure() } else { sup.substitute(&subst) };
        if let Some(found) = supertype_instance(&sup, target, hierarchy) {
            return Some(found);
        }
    }
    None
}

/// Strict-invocation assignability: identity, reference widening, primitive
/// widening. No boxing, no unboxing.
pub fn is_assignable_strict(
    src: &ResolvedType,
    dst: &ResolvedType,
    hierarchy: &dyn TypeHierarchy,
) -> bool {
    use ResolvedType::*;
    if src == dst || src.is_unknown() || dst.is_unknown() {
        return true;
    }
    match (src, dst) {
        (Null, d) => d.is_reference(),
        (Primitive(a), Primitive(b)) => a.widens_to(*b),
        (Array { of: a }, Array { of: b }) => match (&**a, &**b) {
            // Primitive arrays are invariant; reference arrays are covariant
            (Primitive(x), Primitive(y)) => x == y,
            (Primitive(_), _) | (_, Primitive(_)) => false,
            (x, y) => is_assignable_strict(x, y, hierarchy),
        },
        (Array { .. }, Class { name, .. }) => name == "Object",
        (Class { name: sn, args: sa }, Class { name: dn, args: da }) => {
            if !hierarchy.is_nominal_subtype(sn, dn) {
                return false;
            }
            if da.is_empty() {
                // Raw destination accepts any instantiation
                return true;
            }
            // Compare against the instantiation of dn in src's closure
            let inst = match supertype_instance(&Class { name: sn.clone(), args: sa.clone() }, dn, hierarchy)
            {
                Some(t) => t,
                None => return false,
            };
            let ia = match &inst {
                Class { args, .. } => args.clone(),
                _ => return false,
            };
            if ia.is_empty() {
                // Unchecked conversion: a raw source is accepted into a
                // parameterized destination
                return true;
            }
            if ia.len() != da.len() {
                return false;
            }
            ia.iter().zip(da).all(|(s, d)| type_arg_compatible(s, d, hierarchy))
        }
        (s, TypeVar { upper, .. }) => {
            upper.is_empty() || upper.iter().any(|u| is_assignable_strict(s, u, hierarchy))
        }
        (TypeVar { upper, .. }, d) => {
            if matches!(d, Class { name, .. } if name == "Object") {
                return true;
            }
            upper.iter().any(|u| is_assignable_strict(u, d, hierarchy))
        }
        (Wildcard { kind: WildcardKind::Extends, bound: Some(b) }, d) => {
            is_assignable_strict(b, d, hierarchy)
        }
        (Wildcard { .. }, d) => matches!(d, Class { name, .. } if name == "Object"),
        _ => false,
    }
}

/// Loose-invocation assignability: strict plus boxing and unboxing
/// conversions (with a widening step after unboxing)
pub fn is_assignable_loose(
    src: &ResolvedType,
    dst: &ResolvedType,
    hierarchy: &dyn TypeHierarchy,
) -> bool {
    use ResolvedType::*;
    if is_assignable_strict(src, dst, hierarchy) {
        return true;
    }
    match (src, dst) {
        (Primitive(p), d @ Class { .. }) => {
            is_assignable_strict(&ResolvedType::class(p.boxed_class()), d, hierarchy)
        }
        (Class { name, args }, Primitive(b)) if args.is_empty() => {
            PrimitiveKind::from_boxed_class(name).is_some_and(|p| p.widens_to(*b))
        }
        _ => false,
    }
}

/// Containment of a type argument within a (possibly wildcarded) formal
/// type-argument position
pub fn type_arg_compatible(
    src: &ResolvedType,
    dst: &ResolvedType,
    hierarchy: &dyn TypeHierarchy,
) -> bool {
    use ResolvedType::*;
    if src == dst || src.is_unknown() || dst.is_unknown() {
        return true;
    }
    match dst {
        Wildcard { kind: WildcardKind::Extends, bound: Some(ub) } => {
            // A source wildcard without an extends-bound still has the
            // implicit upper bound Object
            let object = ResolvedType::object();
            let effective = match src {
                Wildcard { kind: WildcardKind::Extends, bound: Some(sb) } => &**sb,
                Wildcard { .. } => &object,
                other => other,
            };
            is_assignable_strict(effective, ub, hierarchy)
        }
        Wildcard { kind: WildcardKind::Super, bound: Some(lb) } => {
            let effective = match src {
                Wildcard { kind: WildcardKind::Super, bound: Some(sb) } => &**sb,
                Wildcard { .. } => return false,
                other => other,
            };
            is_assignable_strict(lb, effective, hierarchy)
        }
        Wildcard { kind: WildcardKind::Unbounded, .. } => true,
        TypeVar { upper, .. } => {
            upper.is_empty() || upper.iter().any(|u| is_assignable_strict(src, u, hierarchy))
        }
        // Invariant position
        _ => false,
    }
}

/// The narrowest member of a non-empty candidate set: the one loosely
/// assignable to every other. `None` when the set has no single narrowest
/// element.
pub fn most_specific_of<'a>(
    candidates: &'a [ResolvedType],
    hierarchy: &dyn TypeHierarchy,
) -> Option<&'a ResolvedType> {
    candidates.iter().find(|c| {
        candidates
            .iter()
            .all(|other| std::ptr::eq(*c, other) || is_assignable_loose(c, other, hierarchy))
    })
}
