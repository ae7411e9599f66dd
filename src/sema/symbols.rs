//! Per-file symbol table
//!
//! Built once per compilation unit and discarded with it. Symbols live in an
//! arena owned by the table; scopes and resolution results refer to them by
//! id. Scope lookup walks innermost to outermost, and class scopes extend
//! the walk through their superclass chain.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::ast::{
    ClassDecl, ClassMember, CompilationUnit, InterfaceDecl, InterfaceMember, MethodDecl, Span,
    TypeArg, TypeDecl, TypeParam, TypeRef, WildcardType,
};

use super::types::{PrimitiveKind, ResolvedType, TypeHierarchy, WildcardKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub u32);

/// Platform classes every unit can reference without declaring them.
/// Name -> (superclass, interfaces).
static WELL_KNOWN: Lazy<HashMap<&'static str, (Option<&'static str>, &'static [&'static str])>> =
    Lazy::new(|| {
        HashMap::from([
            ("Object", (None, &[][..])),
            ("String", (Some("Object"), &["CharSequence"][..])),
            ("CharSequence", (Some("Object"), &[][..])),
            ("Number", (Some("Object"), &[][..])),
            ("Byte", (Some("Number"), &[][..])),
            ("Short", (Some("Number"), &[][..])),
            ("Integer", (Some("Number"), &[][..])),
            ("Long", (Some("Number"), &[][..])),
            ("Float", (Some("Number"), &[][..])),
            ("Double", (Some("Number"), &[][..])),
            ("Boolean", (Some("Object"), &[][..])),
            ("Character", (Some("Object"), &[][..])),
        ])
    });

#[derive(Debug, Clone)]
pub struct TypeParameter {
    pub name: String,
    pub bounds: Vec<ResolvedType>,
}

impl TypeParameter {
    pub fn as_type_var(&self) -> ResolvedType {
        ResolvedType::TypeVar { name: self.name.clone(), upper: self.bounds.clone() }
    }
}

#[derive(Debug, Clone)]
pub struct MethodSignature {
    pub name: String,
    pub type_params: Vec<TypeParameter>,
    /// Last entry is an array type when `varargs` is set
    pub parameter_types: Vec<ResolvedType>,
    pub varargs: bool,
    pub declaring_type: String,
    /// `None` for void methods
    pub return_type: Option<ResolvedType>,
}

impl MethodSignature {
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// Fixed-arity parameter count (varargs parameter excluded)
    pub fn fixed_arity(&self) -> usize {
        if self.varargs {
            self.parameter_types.len() - 1
        } else {
            self.parameter_types.len()
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeSymbol {
    pub name: String,
    pub is_interface: bool,
    pub type_params: Vec<TypeParameter>,
    pub superclass: Option<ResolvedType>,
    pub interfaces: Vec<ResolvedType>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Field,
    Parameter,
    Local,
}

#[derive(Debug, Clone)]
pub struct VariableSymbol {
    pub name: String,
    pub ty: ResolvedType,
    pub kind: VariableKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Symbol {
    Type(TypeSymbol),
    Method(MethodSignature),
    Variable(VariableSymbol),
}

#[derive(Debug)]
struct Scope {
    parent: Option<ScopeId>,
    /// Type name for class scopes; lookup continues into the superclass
    /// chain when set
    owner: Option<String>,
    names: HashMap<String, Vec<SymbolId>>,
}

/// Type-parameter environment in effect while converting type references
/// (class parameters, optionally extended with method parameters)
#[derive(Debug, Clone, Default)]
pub struct TypeParamEnv {
    params: HashMap<String, Vec<ResolvedType>>,
}

impl TypeParamEnv {
    pub fn of(params: &[TypeParameter]) -> Self {
        let mut env = TypeParamEnv::default();
        for p in params {
            env.params.insert(p.name.clone(), p.bounds.clone());
        }
        env
    }

    pub fn extended(&self, params: &[TypeParameter]) -> Self {
        let mut env = self.clone();
        for p in params {
            env.params.insert(p.name.clone(), p.bounds.clone());
        }
        env
    }

    fn lookup(&self, name: &str) -> Option<&Vec<ResolvedType>> {
        self.params.get(name)
    }
}

#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    unit_scope: ScopeId,
    types_by_name: HashMap<String, SymbolId>,
    class_scopes: HashMap<String, ScopeId>,
    /// Class names referenced but not resolvable, in reference order
    not_found: Vec<String>,
}

impl SymbolTable {
    /// Build the table for one compilation unit in a single pass over its
    /// declarations
    pub fn build(unit: &CompilationUnit) -> SymbolTable {
        let mut table = SymbolTable {
            symbols: Vec::new(),
            scopes: Vec::new(),
            unit_scope: ScopeId(0),
            types_by_name: HashMap::new(),
            class_scopes: HashMap::new(),
            not_found: Vec::new(),
        };
        table.scopes.push(Scope { parent: None, owner: None, names: HashMap::new() });

        // Declared names first, so members may reference any sibling type
        let mut declared = HashSet::new();
        collect_declared_names(&unit.type_decls, &mut declared);

        let unit_scope = table.unit_scope;
        for decl in &unit.type_decls {
            table.enter_type_decl(decl, unit_scope, &declared);
        }
        log::debug!(
            "symbol table built: {} symbols, {} scopes, {} unresolved names",
            table.symbols.len(),
            table.scopes.len(),
            table.not_found.len()
        );
        table
    }

    pub fn unit_scope(&self) -> ScopeId {
        self.unit_scope
    }

    pub fn class_scope(&self, type_name: &str) -> Option<ScopeId> {
        self.class_scopes.get(type_name).copied()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0 as usize]
    }

    pub fn method(&self, id: SymbolId) -> Option<&MethodSignature> {
        match self.symbol(id) {
            Symbol::Method(sig) => Some(sig),
            _ => None,
        }
    }

    pub fn type_symbol(&self, name: &str) -> Option<&TypeSymbol> {
        match self.types_by_name.get(name).map(|id| self.symbol(*id)) {
            Some(Symbol::Type(ts)) => Some(ts),
            _ => None,
        }
    }

    pub fn classes_not_found(&self) -> &[String] {
        &self.not_found
    }

    /// Open a nested scope (method body, block); the caller keeps the id
    pub fn push_scope(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope { parent: Some(parent), owner: None, names: HashMap::new() });
        id
    }

    pub fn define_variable(&mut self, scope: ScopeId, var: VariableSymbol) -> SymbolId {
        let name = var.name.clone();
        self.define(scope, name, Symbol::Variable(var))
    }

    /// Innermost visible variable with this name, the innermost match wins
    pub fn lookup_variable(&self, scope: ScopeId, name: &str) -> Option<&VariableSymbol> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = &self.scopes[id.0 as usize];
            if let Some(ids) = s.names.get(name) {
                for sid in ids {
                    if let Symbol::Variable(v) = self.symbol(*sid) {
                        return Some(v);
                    }
                }
            }
            if let Some(owner) = &s.owner {
                if let Some(v) = self.lookup_inherited_variable(owner, name) {
                    return Some(v);
                }
            }
            current = s.parent;
        }
        None
    }

    /// Every visible method with this simple name, scope chain plus
    /// inherited members, in declaration order
    pub fn methods_named(&self, scope: ScopeId, name: &str) -> Vec<SymbolId> {
        let mut out = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = &self.scopes[id.0 as usize];
            if let Some(ids) = s.names.get(name) {
                out.extend(ids.iter().filter(|sid| self.method(**sid).is_some()));
            }
            if let Some(owner) = &s.owner {
                self.collect_inherited_methods(owner, name, &mut out);
            }
            current = s.parent;
        }
        out
    }

    /// Methods declared by `type_name` or inherited from its supertypes
    pub fn methods_of_type(&self, type_name: &str, name: &str) -> Vec<SymbolId> {
        let mut out = Vec::new();
        if let Some(scope) = self.class_scope(type_name) {
            let s = &self.scopes[scope.0 as usize];
            if let Some(ids) = s.names.get(name) {
                out.extend(ids.iter().filter(|sid| self.method(**sid).is_some()));
            }
        }
        self.collect_inherited_methods(type_name, name, &mut out);
        out
    }

    /// Convert a syntactic type reference, recording names that resolve
    /// nowhere into `not_found` and degrading them to `Unknown`
    pub fn resolve_type_ref(
        &self,
        tref: &TypeRef,
        env: &TypeParamEnv,
        not_found: &mut Vec<String>,
    ) -> ResolvedType {
        resolve_type_ref_with(tref, env, &|name| self.is_known_type(name), not_found)
    }

    fn is_known_type(&self, name: &str) -> bool {
        self.types_by_name.contains_key(name) || WELL_KNOWN.contains_key(name)
    }

    fn define(&mut self, scope: ScopeId, name: String, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        self.scopes[scope.0 as usize].names.entry(name).or_default().push(id);
        id
    }

    fn lookup_inherited_variable(&self, type_name: &str, name: &str) -> Option<&VariableSymbol> {
        let mut current = self.type_symbol(type_name).and_then(|ts| ts.superclass.clone());
        while let Some(ResolvedType::Class { name: sup, .. }) = current {
            if let Some(scope) = self.class_scope(&sup) {
                let s = &self.scopes[scope.0 as usize];
                if let Some(ids) = s.names.get(name) {
                    for sid in ids {
                        if let Symbol::Variable(v) = self.symbol(*sid) {
                            return Some(v);
                        }
                    }
                }
            }
            current = self.type_symbol(&sup).and_then(|ts| ts.superclass.clone());
        }
        None
    }

    fn collect_inherited_methods(&self, type_name: &str, name: &str, out: &mut Vec<SymbolId>) {
        let mut current = self.type_symbol(type_name).and_then(|ts| ts.superclass.clone());
        while let Some(ResolvedType::Class { name: sup, .. }) = current {
            if let Some(scope) = self.class_scope(&sup) {
                let s = &self.scopes[scope.0 as usize];
                if let Some(ids) = s.names.get(name) {
                    for sid in ids {
                        let Some(sig) = self.method(*sid) else {
                            continue;
                        };
                        // An override with the same parameter list hides the
                        // inherited declaration
                        let hidden = out.iter().any(|existing| {
                            self.method(*existing)
                                .is_some_and(|e| e.parameter_types == sig.parameter_types)
                        });
                        if !hidden {
                            out.push(*sid);
                        }
                    }
                }
            }
            current = self.type_symbol(&sup).and_then(|ts| ts.superclass.clone());
        }
    }

    fn enter_type_decl(&mut self, decl: &TypeDecl, parent: ScopeId, declared: &HashSet<String>) {
        match decl {
            TypeDecl::Class(c) => self.enter_class(c, parent, declared),
            TypeDecl::Interface(i) => self.enter_interface(i, parent, declared),
        }
    }

    fn enter_class(&mut self, class: &ClassDecl, parent: ScopeId, declared: &HashSet<String>) {
        let type_params = self.convert_type_params(&class.type_params, declared);
        let env = TypeParamEnv::of(&type_params);
        let known = |name: &str| declared.contains(name) || WELL_KNOWN.contains_key(name);

        let superclass = class
            .extends
            .as_ref()
            .map(|t| resolve_type_ref_with(t, &env, &known, &mut self.not_found));
        let interfaces = class
            .implements
            .iter()
            .map(|t| resolve_type_ref_with(t, &env, &known, &mut self.not_found))
            .collect();

        let symbol = TypeSymbol {
            name: class.name.clone(),
            is_interface: false,
            type_params: type_params.clone(),
            superclass,
            interfaces,
            span: class.span,
        };
        let id = self.define(parent, class.name.clone(), Symbol::Type(symbol));
        self.types_by_name.insert(class.name.clone(), id);

        let scope = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(parent),
            owner: Some(class.name.clone()),
            names: HashMap::new(),
        });
        self.class_scopes.insert(class.name.clone(), scope);

        for member in &class.body {
            match member {
                ClassMember::Field(f) => {
                    let ty = resolve_type_ref_with(&f.type_ref, &env, &known, &mut self.not_found);
                    self.define_variable(
                        scope,
                        VariableSymbol {
                            name: f.name.clone(),
                            ty,
                            kind: VariableKind::Field,
                            span: f.span,
                        },
                    );
                }
                ClassMember::Method(m) => {
                    self.enter_method(m, scope, &class.name, &env, declared);
                }
                ClassMember::Nested(nested) => self.enter_type_decl(nested, scope, declared),
            }
        }
    }

    fn enter_interface(&mut self, iface: &InterfaceDecl, parent: ScopeId, declared: &HashSet<String>) {
        let type_params = self.convert_type_params(&iface.type_params, declared);
        let env = TypeParamEnv::of(&type_params);
        let known = |name: &str| declared.contains(name) || WELL_KNOWN.contains_key(name);

        let interfaces = iface
            .extends
            .iter()
            .map(|t| resolve_type_ref_with(t, &env, &known, &mut self.not_found))
            .collect();

        let symbol = TypeSymbol {
            name: iface.name.clone(),
            is_interface: true,
            type_params: type_params.clone(),
            superclass: None,
            interfaces,
            span: iface.span,
        };
        let id = self.define(parent, iface.name.clone(), Symbol::Type(symbol));
        self.types_by_name.insert(iface.name.clone(), id);

        let scope = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(parent),
            owner: Some(iface.name.clone()),
            names: HashMap::new(),
        });
        self.class_scopes.insert(iface.name.clone(), scope);

        for member in &iface.body {
            match member {
                InterfaceMember::Field(f) => {
                    let ty = resolve_type_ref_with(&f.type_ref, &env, &known, &mut self.not_found);
                    self.define_variable(
                        scope,
                        VariableSymbol {
                            name: f.name.clone(),
                            ty,
                            kind: VariableKind::Field,
                            span: f.span,
                        },
                    );
                }
                InterfaceMember::Method(m) => {
                    self.enter_method(m, scope, &iface.name, &env, declared);
                }
                InterfaceMember::Nested(nested) => self.enter_type_decl(nested, scope, declared),
            }
        }
    }

    fn enter_method(
        &mut self,
        m: &MethodDecl,
        scope: ScopeId,
        declaring_type: &str,
        class_env: &TypeParamEnv,
        declared: &HashSet<String>,
    ) {
        let method_params = self.convert_type_params(&m.type_params, declared);
        let env = class_env.extended(&method_params);
        let known = |name: &str| declared.contains(name) || WELL_KNOWN.contains_key(name);

        let mut parameter_types: Vec<ResolvedType> = Vec::with_capacity(m.parameters.len());
        let mut varargs = false;
        for (i, p) in m.parameters.iter().enumerate() {
            let ty = resolve_type_ref_with(&p.type_ref, &env, &known, &mut self.not_found);
            if p.varargs && i + 1 == m.parameters.len() {
                varargs = true;
                parameter_types.push(ResolvedType::array(ty));
            } else {
                parameter_types.push(ty);
            }
        }
        let return_type = m
            .return_type
            .as_ref()
            .map(|t| resolve_type_ref_with(t, &env, &known, &mut self.not_found));

        let signature = MethodSignature {
            name: m.name.clone(),
            type_params: method_params,
            parameter_types,
            varargs,
            declaring_type: declaring_type.to_string(),
            return_type,
        };
        self.define(scope, m.name.clone(), Symbol::Method(signature));
    }

    fn convert_type_params(
        &mut self,
        params: &[TypeParam],
        declared: &HashSet<String>,
    ) -> Vec<TypeParameter> {
        // Parameters may reference each other; seed the environment with
        // unbounded variables before resolving the declared bounds
        let mut seed = TypeParamEnv::default();
        for p in params {
            seed.params.insert(p.name.clone(), Vec::new());
        }
        let known = |name: &str| declared.contains(name) || WELL_KNOWN.contains_key(name);
        params
            .iter()
            .map(|p| TypeParameter {
                name: p.name.clone(),
                bounds: p
                    .bounds
                    .iter()
                    .map(|b| resolve_type_ref_with(b, &seed, &known, &mut self.not_found))
                    .collect(),
            })
            .collect()
    }
}

fn collect_declared_names(decls: &[TypeDecl], out: &mut HashSet<String>) {
    for decl in decls {
        collect_declared_name(decl, out);
    }
}

fn collect_declared_name(decl: &TypeDecl, out: &mut HashSet<String>) {
    out.insert(decl.name().to_string());
    match decl {
        TypeDecl::Class(c) => {
            for member in &c.body {
                if let ClassMember::Nested(t) = member {
                    collect_declared_name(t, out);
                }
            }
        }
        TypeDecl::Interface(i) => {
            for member in &i.body {
                if let InterfaceMember::Nested(t) = member {
                    collect_declared_name(t, out);
                }
            }
        }
    }
}

fn resolve_type_ref_with(
    tref: &TypeRef,
    env: &TypeParamEnv,
    known: &dyn Fn(&str) -> bool,
    not_found: &mut Vec<String>,
) -> ResolvedType {
    let mut base = resolve_base_type(tref, env, known, not_found);
    for _ in 0..tref.array_dims {
        base = ResolvedType::array(base);
    }
    base
}

fn resolve_base_type(
    tref: &TypeRef,
    env: &TypeParamEnv,
    known: &dyn Fn(&str) -> bool,
    not_found: &mut Vec<String>,
) -> ResolvedType {
    if let Some(p) = PrimitiveKind::from_name(&tref.name) {
        return ResolvedType::Primitive(p);
    }
    if let Some(bounds) = env.lookup(&tref.name) {
        return ResolvedType::TypeVar { name: tref.name.clone(), upper: bounds.clone() };
    }
    if !known(&tref.name) {
        not_found.push(tref.name.clone());
        return ResolvedType::Unknown;
    }
    let args = tref
        .type_args
        .iter()
        .map(|a| match a {
            TypeArg::Type(inner) => resolve_type_ref_with(inner, env, known, not_found),
            TypeArg::Wildcard(w) => resolve_wildcard(w, env, known, not_found),
        })
        .collect();
    ResolvedType::Class { name: tref.name.clone(), args }
}

fn resolve_wildcard(
    w: &WildcardType,
    env: &TypeParamEnv,
    known: &dyn Fn(&str) -> bool,
    not_found: &mut Vec<String>,
) -> ResolvedType {
    match &w.bound {
        None => ResolvedType::Wildcard { kind: WildcardKind::Unbounded, bound: None },
        Some((crate::ast::BoundKind::Extends, b)) => ResolvedType::Wildcard {
            kind: WildcardKind::Extends,
            bound: Some(Box::new(resolve_type_ref_with(b, env, known, not_found))),
        },
        Some((crate::ast::BoundKind::Super, b)) => ResolvedType::Wildcard {
            kind: WildcardKind::Super,
            bound: Some(Box::new(resolve_type_ref_with(b, env, known, not_found))),
        },
    }
}

impl TypeHierarchy for SymbolTable {
    fn is_nominal_subtype(&self, sub: &str, sup: &str) -> bool {
        if sub == sup || sup == "Object" {
            return true;
        }
        for direct in self.direct_supertypes(sub) {
            if let ResolvedType::Class { name, .. } = &direct {
                if name == sup || self.is_nominal_subtype(name, sup) {
                    return true;
                }
            }
        }
        false
    }

    fn direct_supertypes(&self, name: &str) -> Vec<ResolvedType> {
        if let Some(ts) = self.type_symbol(name) {
            let mut out = Vec::new();
            if let Some(sup) = &ts.superclass {
                out.push(sup.clone());
            } else if !ts.is_interface {
                out.push(ResolvedType::object());
            }
            out.extend(ts.interfaces.iter().cloned());
            return out;
        }
        if let Some((sup, ifaces)) = WELL_KNOWN.get(name) {
            let mut out = Vec::new();
            if let Some(sup) = sup {
                out.push(ResolvedType::class(*sup));
            }
            out.extend(ifaces.iter().map(|i| ResolvedType::class(*i)));
            return out;
        }
        Vec::new()
    }

    fn type_params_of(&self, name: &str) -> Vec<String> {
        self.type_symbol(name)
            .map(|ts| ts.type_params.iter().map(|p| p.name.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(line: usize) -> Span {
        Span::lines(line, line)
    }

    fn simple_class(name: &str, extends: Option<TypeRef>, body: Vec<ClassMember>) -> TypeDecl {
        TypeDecl::Class(ClassDecl {
            annotations: vec![],
            name: name.to_string(),
            type_params: vec![],
            extends,
            implements: vec![],
            body,
            span: sp(1),
        })
    }

    fn unit(decls: Vec<TypeDecl>) -> CompilationUnit {
        CompilationUnit { package: None, type_decls: decls, span: Span::lines(1, 100) }
    }

    fn method(name: &str, params: Vec<(&str, &str)>) -> ClassMember {
        ClassMember::Method(MethodDecl {
            annotations: vec![],
            type_params: vec![],
            return_type: None,
            name: name.to_string(),
            parameters: params
                .into_iter()
                .map(|(ty, n)| crate::ast::Parameter {
                    type_ref: TypeRef::named(ty, sp(1)),
                    name: n.to_string(),
                    varargs: false,
                    span: sp(1),
                })
                .collect(),
            body: None,
            span: sp(1),
        })
    }

    #[test]
    fn methods_visible_through_scope_chain_and_inheritance() {
        let tree = unit(vec![
            simple_class("Base", None, vec![method("m", vec![("int", "x")])]),
            simple_class(
                "Derived",
                Some(TypeRef::named("Base", sp(1))),
                vec![method("m", vec![("String", "s")])],
            ),
        ]);
        let table = SymbolTable::build(&tree);
        let scope = table.class_scope("Derived").unwrap();
        let found = table.methods_named(scope, "m");
        assert_eq!(found.len(), 2);
        let declaring: Vec<&str> =
            found.iter().map(|id| table.method(*id).unwrap().declaring_type.as_str()).collect();
        assert!(declaring.contains(&"Derived"));
        assert!(declaring.contains(&"Base"));
    }

    #[test]
    fn innermost_variable_wins() {
        let tree = unit(vec![simple_class("A", None, vec![])]);
        let mut table = SymbolTable::build(&tree);
        let class_scope = table.class_scope("A").unwrap();
        table.define_variable(
            class_scope,
            VariableSymbol {
                name: "x".into(),
                ty: ResolvedType::string(),
                kind: VariableKind::Field,
                span: sp(2),
            },
        );
        let inner = table.push_scope(class_scope);
        table.define_variable(
            inner,
            VariableSymbol {
                name: "x".into(),
                ty: ResolvedType::Primitive(PrimitiveKind::Int),
                kind: VariableKind::Local,
                span: sp(3),
            },
        );
        let v = table.lookup_variable(inner, "x").unwrap();
        assert_eq!(v.ty, ResolvedType::Primitive(PrimitiveKind::Int));
        let outer_v = table.lookup_variable(class_scope, "x").unwrap();
        assert_eq!(outer_v.ty, ResolvedType::string());
    }

    #[test]
    fn unknown_reference_degrades_and_is_recorded() {
        let tree = unit(vec![simple_class(
            "A",
            Some(TypeRef::named("Vanished", sp(1))),
            vec![],
        )]);
        let table = SymbolTable::build(&tree);
        assert_eq!(table.classes_not_found(), ["Vanished".to_string()]);
        assert_eq!(table.type_symbol("A").unwrap().superclass, Some(ResolvedType::Unknown));
    }

    #[test]
    fn nominal_subtyping_spans_unit_and_platform_types() {
        let tree = unit(vec![simple_class(
            "MyNumber",
            Some(TypeRef::named("Integer", sp(1))),
            vec![],
        )]);
        let table = SymbolTable::build(&tree);
        assert!(table.is_nominal_subtype("MyNumber", "Number"));
        assert!(table.is_nominal_subtype("Integer", "Object"));
        assert!(!table.is_nominal_subtype("Integer", "String"));
    }
}
