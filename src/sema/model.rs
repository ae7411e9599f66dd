//! Per-file semantic model
//!
//! The semantic pass walks every method body and field initializer, types
//! expressions bottom-up, and resolves each call site in place. Outcomes
//! land in a side table keyed by the call's `NodeId`; consumers can always
//! ask whether a node resolved. Failures degrade to `Unknown` types and
//! `Unresolved` outcomes, they never abort the pass.

use std::collections::{BTreeSet, HashMap};

use crate::ast::{
    Block, ClassDecl, ClassMember, CompilationUnit, Expr, InterfaceDecl, InterfaceMember, Literal,
    MethodCallExpr, MethodDecl, NodeId, Stmt, TypeDecl,
};

use super::resolve::{self, ResolutionResult, UnresolvedReason};
use super::symbols::{
    ScopeId, SymbolTable, TypeParamEnv, VariableKind, VariableSymbol,
};
use super::types::{PrimitiveKind, ResolvedType};

#[derive(Debug)]
pub struct SemanticModel {
    table: SymbolTable,
    resolutions: HashMap<NodeId, ResolutionResult>,
    classes_not_found: BTreeSet<String>,
}

impl SemanticModel {
    /// Run the semantic pass over one compilation unit
    pub fn attach(unit: &CompilationUnit) -> SemanticModel {
        let table = SymbolTable::build(unit);
        let mut attacher = Attacher {
            table,
            resolutions: HashMap::new(),
            not_found: Vec::new(),
        };
        for decl in &unit.type_decls {
            attacher.visit_type_decl(decl);
        }

        let mut classes_not_found: BTreeSet<String> =
            attacher.table.classes_not_found().iter().cloned().collect();
        classes_not_found.extend(attacher.not_found);
        log::debug!(
            "semantic pass done: {} call sites, {} classes not found",
            attacher.resolutions.len(),
            classes_not_found.len()
        );
        SemanticModel {
            table: attacher.table,
            resolutions: attacher.resolutions,
            classes_not_found,
        }
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.table
    }

    /// Resolution outcome attached to a call node; present for every call
    /// site visited by the pass
    pub fn resolution_of(&self, id: NodeId) -> Option<&ResolutionResult> {
        self.resolutions.get(&id)
    }

    pub fn resolutions(&self) -> &HashMap<NodeId, ResolutionResult> {
        &self.resolutions
    }

    /// Distinct class names the pass could not resolve
    pub fn classes_not_found(&self) -> &BTreeSet<String> {
        &self.classes_not_found
    }
}

struct Attacher {
    table: SymbolTable,
    resolutions: HashMap<NodeId, ResolutionResult>,
    not_found: Vec<String>,
}

impl Attacher {
    fn visit_type_decl(&mut self, decl: &TypeDecl) {
        match decl {
            TypeDecl::Class(c) => self.visit_class(c),
            TypeDecl::Interface(i) => self.visit_interface(i),
        }
    }

    fn visit_class(&mut self, class: &ClassDecl) {
        let Some(scope) = self.table.class_scope(&class.name) else {
            return;
        };
        let env = self.class_env(&class.name);
        for member in &class.body {
            match member {
                ClassMember::Field(f) => {
                    if let Some(init) = &f.initializer {
                        self.type_expr(init, scope, &env);
                    }
                }
                ClassMember::Method(m) => self.visit_method(m, scope, &env),
                ClassMember::Nested(nested) => self.visit_type_decl(nested),
            }
        }
    }

    fn visit_interface(&mut self, iface: &InterfaceDecl) {
        let Some(scope) = self.table.class_scope(&iface.name) else {
            return;
        };
        let env = self.class_env(&iface.name);
        for member in &iface.body {
            match member {
                InterfaceMember::Field(f) => {
                    if let Some(init) = &f.initializer {
                        self.type_expr(init, scope, &env);
                    }
                }
                InterfaceMember::Method(m) => self.visit_method(m, scope, &env),
                InterfaceMember::Nested(nested) => self.visit_type_decl(nested),
            }
        }
    }

    fn class_env(&self, type_name: &str) -> TypeParamEnv {
        self.table
            .type_symbol(type_name)
            .map(|ts| TypeParamEnv::of(&ts.type_params))
            .unwrap_or_default()
    }

    fn visit_method(&mut self, method: &MethodDecl, class_scope: ScopeId, class_env: &TypeParamEnv) {
        let Some(body) = &method.body else {
            return;
        };
        // Method type parameters shadow class ones while typing the body
        let method_params: Vec<_> = method
            .type_params
            .iter()
            .map(|tp| super::symbols::TypeParameter {
                name: tp.name.clone(),
                bounds: tp
                    .bounds
                    .iter()
                    .map(|b| self.table.resolve_type_ref(b, class_env, &mut self.not_found))
                    .collect(),
            })
            .collect();
        let env = class_env.extended(&method_params);

        let scope = self.table.push_scope(class_scope);
        for param in &method.parameters {
            let mut ty = self.table.resolve_type_ref(&param.type_ref, &env, &mut self.not_found);
            if param.varargs {
                ty = ResolvedType::array(ty);
            }
            self.table.define_variable(
                scope,
                VariableSymbol {
                    name: param.name.clone(),
                    ty,
                    kind: VariableKind::Parameter,
                    span: param.span,
                },
            );
        }
        self.visit_block(body, scope, &env);
    }

    fn visit_block(&mut self, block: &Block, parent: ScopeId, env: &TypeParamEnv) {
        let scope = self.table.push_scope(parent);
        for stmt in &block.statements {
            self.visit_stmt(stmt, scope, env);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt, scope: ScopeId, env: &TypeParamEnv) {
        match stmt {
            Stmt::Expression(es) => {
                self.type_expr(&es.expr, scope, env);
            }
            Stmt::Declaration(decl) => {
                let ty = self.table.resolve_type_ref(&decl.type_ref, env, &mut self.not_found);
                if let Some(init) = &decl.initializer {
                    self.type_expr(init, scope, env);
                }
                self.table.define_variable(
                    scope,
                    VariableSymbol {
                        name: decl.name.clone(),
                        ty,
                        kind: VariableKind::Local,
                        span: decl.span,
                    },
                );
            }
            Stmt::Return(ret) => {
                if let Some(value) = &ret.value {
                    self.type_expr(value, scope, env);
                }
            }
            Stmt::Block(block) => self.visit_block(block, scope, env),
        }
    }

    fn type_expr(&mut self, expr: &Expr, scope: ScopeId, env: &TypeParamEnv) -> ResolvedType {
        match expr {
            Expr::Literal(lit) => literal_type(&lit.value),
            Expr::Identifier(id) => self
                .table
                .lookup_variable(scope, &id.name)
                .map(|v| v.ty.clone())
                .unwrap_or(ResolvedType::Unknown),
            Expr::MethodCall(call) => self.type_call(call, scope, env),
            Expr::FieldAccess(fa) => {
                let Some(target) = &fa.target else {
                    return self
                        .table
                        .lookup_variable(scope, &fa.name)
                        .map(|v| v.ty.clone())
                        .unwrap_or(ResolvedType::Unknown);
                };
                let target_ty = self.type_expr(target, scope, env);
                match target_ty {
                    ResolvedType::Class { name, .. } => self
                        .table
                        .class_scope(&name)
                        .and_then(|s| self.table.lookup_variable(s, &fa.name))
                        .map(|v| v.ty.clone())
                        .unwrap_or(ResolvedType::Unknown),
                    _ => ResolvedType::Unknown,
                }
            }
            Expr::New(new) => {
                for arg in &new.arguments {
                    self.type_expr(arg, scope, env);
                }
                self.table.resolve_type_ref(&new.target_type, env, &mut self.not_found)
            }
            Expr::NewArray(new) => {
                let mut ty = self.table.resolve_type_ref(&new.element_type, env, &mut self.not_found);
                for _ in 0..new.dims.max(1) {
                    ty = ResolvedType::array(ty);
                }
                ty
            }
            Expr::ArrayInitializer(init) => {
                for value in &init.values {
                    self.type_expr(value, scope, env);
                }
                ResolvedType::Unknown
            }
        }
    }

    fn type_call(&mut self, call: &MethodCallExpr, scope: ScopeId, env: &TypeParamEnv) -> ResolvedType {
        let arg_types: Vec<ResolvedType> =
            call.arguments.iter().map(|a| self.type_expr(a, scope, env)).collect();
        let explicit: Option<Vec<ResolvedType>> = if call.type_args.is_empty() {
            None
        } else {
            Some(
                call.type_args
                    .iter()
                    .map(|t| self.table.resolve_type_ref(t, env, &mut self.not_found))
                    .collect(),
            )
        };

        let result = match &call.target {
            None => resolve::resolve(&self.table, scope, &call.name, explicit.as_deref(), &arg_types),
            Some(target) => {
                // A bare identifier naming a type is a static-style call
                if let Expr::Identifier(id) = &**target {
                    if self.table.type_symbol(&id.name).is_some() {
                        resolve::resolve_in_type(
                            &self.table,
                            &id.name,
                            &call.name,
                            explicit.as_deref(),
                            &arg_types,
                        )
                    } else {
                        let target_ty = self.type_expr(target, scope, env);
                        self.resolve_on_target(&target_ty, call, explicit.as_deref(), &arg_types)
                    }
                } else {
                    let target_ty = self.type_expr(target, scope, env);
                    self.resolve_on_target(&target_ty, call, explicit.as_deref(), &arg_types)
                }
            }
        };

        let value_type = match &result {
            ResolutionResult::Resolved { return_type, .. } => {
                return_type.clone().unwrap_or(ResolvedType::Unknown)
            }
            _ => ResolvedType::Unknown,
        };
        self.resolutions.insert(call.id, result);
        value_type
    }

    fn resolve_on_target(
        &mut self,
        target_ty: &ResolvedType,
        call: &MethodCallExpr,
        explicit: Option<&[ResolvedType]>,
        arg_types: &[ResolvedType],
    ) -> ResolutionResult {
        match target_ty.erasure() {
            ResolvedType::Class { name, .. } => {
                resolve::resolve_in_type(&self.table, &name, &call.name, explicit, arg_types)
            }
            _ => ResolutionResult::Unresolved { reason: UnresolvedReason::UnknownTarget },
        }
    }
}

fn literal_type(lit: &Literal) -> ResolvedType {
    match lit {
        Literal::Int(_) => ResolvedType::Primitive(PrimitiveKind::Int),
        Literal::Long(_) => ResolvedType::Primitive(PrimitiveKind::Long),
        Literal::Float(_) => ResolvedType::Primitive(PrimitiveKind::Float),
        Literal::Double(_) => ResolvedType::Primitive(PrimitiveKind::Double),
        Literal::Boolean(_) => ResolvedType::Primitive(PrimitiveKind::Boolean),
        Literal::Char(_) => ResolvedType::Primitive(PrimitiveKind::Char),
        Literal::Str(_) => ResolvedType::string(),
        Literal::Null => ResolvedType::Null,
    }
}
