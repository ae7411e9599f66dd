//! Shared fixture builders for the integration suites
//!
//! Trees normally come from the external parser; tests assemble them
//! directly. Spans are line-based: each declaration covers its line range
//! so suppression containment behaves like real source.

#![allow(dead_code)]

use tola::ast::*;
use tola::sema::ResolvedType;

pub fn sp(line: usize) -> Span {
    Span::lines(line, line)
}

pub fn lines(first: usize, last: usize) -> Span {
    Span::lines(first, last)
}

pub fn unit(type_decls: Vec<TypeDecl>) -> CompilationUnit {
    CompilationUnit { package: Some("p".into()), type_decls, span: Span::lines(1, 500) }
}

// Type references -----------------------------------------------------------

pub fn tr(name: &str) -> TypeRef {
    TypeRef::named(name, sp(1))
}

pub fn tr_args(name: &str, args: Vec<TypeArg>) -> TypeRef {
    TypeRef::with_args(name, args, sp(1))
}

pub fn tr_array(name: &str, dims: usize) -> TypeRef {
    TypeRef { name: name.into(), type_args: Vec::new(), array_dims: dims, span: sp(1) }
}

pub fn ta(t: TypeRef) -> TypeArg {
    TypeArg::Type(t)
}

pub fn wc() -> TypeArg {
    TypeArg::Wildcard(WildcardType { bound: None, span: sp(1) })
}

pub fn wc_extends(t: TypeRef) -> TypeArg {
    TypeArg::Wildcard(WildcardType { bound: Some((BoundKind::Extends, t)), span: sp(1) })
}

pub fn wc_super(t: TypeRef) -> TypeArg {
    TypeArg::Wildcard(WildcardType { bound: Some((BoundKind::Super, t)), span: sp(1) })
}

// Declarations --------------------------------------------------------------

pub struct ClassBuilder {
    decl: ClassDecl,
}

impl ClassBuilder {
    pub fn new(name: &str, first_line: usize, last_line: usize) -> Self {
        Self {
            decl: ClassDecl {
                annotations: Vec::new(),
                name: name.into(),
                type_params: Vec::new(),
                extends: None,
                implements: Vec::new(),
                body: Vec::new(),
                span: lines(first_line, last_line),
            },
        }
    }

    pub fn annotation(mut self, ann: Annotation) -> Self {
        self.decl.annotations.push(ann);
        self
    }

    pub fn type_param(mut self, name: &str, bounds: Vec<TypeRef>) -> Self {
        self.decl.type_params.push(TypeParam { name: name.into(), bounds, span: sp(1) });
        self
    }

    pub fn extends(mut self, t: TypeRef) -> Self {
        self.decl.extends = Some(t);
        self
    }

    pub fn implements(mut self, t: TypeRef) -> Self {
        self.decl.implements.push(t);
        self
    }

    pub fn member(mut self, member: ClassMember) -> Self {
        self.decl.body.push(member);
        self
    }

    pub fn nested(mut self, decl: TypeDecl) -> Self {
        self.decl.body.push(ClassMember::Nested(decl));
        self
    }

    pub fn build(self) -> TypeDecl {
        TypeDecl::Class(self.decl)
    }
}

pub fn iface(name: &str, first_line: usize, last_line: usize) -> TypeDecl {
    TypeDecl::Interface(InterfaceDecl {
        annotations: Vec::new(),
        name: name.into(),
        type_params: Vec::new(),
        extends: Vec::new(),
        body: Vec::new(),
        span: lines(first_line, last_line),
    })
}

pub struct MethodBuilder {
    decl: MethodDecl,
}

impl MethodBuilder {
    pub fn new(name: &str, line: usize) -> Self {
        Self {
            decl: MethodDecl {
                annotations: Vec::new(),
                type_params: Vec::new(),
                return_type: None,
                name: name.into(),
                parameters: Vec::new(),
                body: None,
                span: sp(line),
            },
        }
    }

    pub fn spanning(mut self, first_line: usize, last_line: usize) -> Self {
        self.decl.span = lines(first_line, last_line);
        self
    }

    pub fn annotation(mut self, ann: Annotation) -> Self {
        self.decl.annotations.push(ann);
        self
    }

    pub fn type_param(mut self, name: &str, bounds: Vec<TypeRef>) -> Self {
        self.decl.type_params.push(TypeParam { name: name.into(), bounds, span: sp(1) });
        self
    }

    pub fn returns(mut self, t: TypeRef) -> Self {
        self.decl.return_type = Some(t);
        self
    }

    pub fn param(mut self, t: TypeRef, name: &str) -> Self {
        self.decl.parameters.push(Parameter {
            type_ref: t,
            name: name.into(),
            varargs: false,
            span: sp(1),
        });
        self
    }

    pub fn varargs_param(mut self, t: TypeRef, name: &str) -> Self {
        self.decl.parameters.push(Parameter {
            type_ref: t,
            name: name.into(),
            varargs: true,
            span: sp(1),
        });
        self
    }

    pub fn body(mut self, statements: Vec<Stmt>) -> Self {
        let span = self.decl.span;
        self.decl.body = Some(Block { statements, span });
        self
    }

    pub fn build(self) -> ClassMember {
        ClassMember::Method(self.decl)
    }
}

pub fn field(ty: TypeRef, name: &str, line: usize) -> ClassMember {
    ClassMember::Field(FieldDecl {
        annotations: Vec::new(),
        type_ref: ty,
        name: name.into(),
        initializer: None,
        span: sp(line),
    })
}

pub fn field_with(
    annotations: Vec<Annotation>,
    ty: TypeRef,
    name: &str,
    initializer: Option<Expr>,
    line: usize,
) -> ClassMember {
    ClassMember::Field(FieldDecl {
        annotations,
        type_ref: ty,
        name: name.into(),
        initializer,
        span: sp(line),
    })
}

// Annotations ---------------------------------------------------------------

pub fn suppress(values: &[&str], line: usize) -> Annotation {
    let arg = if values.len() == 1 {
        AnnotationArg::Value(lit_str(values[0], line))
    } else {
        AnnotationArg::Value(Expr::ArrayInitializer(ArrayInitializerExpr {
            values: values.iter().map(|v| lit_str(v, line)).collect(),
            span: sp(line),
        }))
    };
    Annotation { name: "SuppressWarnings".into(), arguments: vec![arg], span: sp(line) }
}

/// A suppression whose value is an unresolved constant reference
pub fn suppress_unresolved(name: &str, line: usize) -> Annotation {
    Annotation {
        name: "SuppressWarnings".into(),
        arguments: vec![AnnotationArg::Value(Expr::Identifier(IdentifierExpr {
            name: name.into(),
            span: sp(line),
        }))],
        span: sp(line),
    }
}

// Expressions ---------------------------------------------------------------

pub fn lit_int(value: i64, line: usize) -> Expr {
    Expr::Literal(LiteralExpr { value: Literal::Int(value), span: sp(line) })
}

pub fn lit_str(value: &str, line: usize) -> Expr {
    Expr::Literal(LiteralExpr { value: Literal::Str(value.into()), span: sp(line) })
}

pub fn lit_null(line: usize) -> Expr {
    Expr::Literal(LiteralExpr { value: Literal::Null, span: sp(line) })
}

pub fn ident(name: &str, line: usize) -> Expr {
    Expr::Identifier(IdentifierExpr { name: name.into(), span: sp(line) })
}

pub fn call(id: u32, name: &str, arguments: Vec<Expr>, line: usize) -> Expr {
    Expr::MethodCall(MethodCallExpr {
        id: NodeId(id),
        target: None,
        name: name.into(),
        type_args: Vec::new(),
        arguments,
        span: sp(line),
    })
}

pub fn call_on(id: u32, target: Expr, name: &str, arguments: Vec<Expr>, line: usize) -> Expr {
    Expr::MethodCall(MethodCallExpr {
        id: NodeId(id),
        target: Some(Box::new(target)),
        name: name.into(),
        type_args: Vec::new(),
        arguments,
        span: sp(line),
    })
}

pub fn new_of(t: TypeRef, line: usize) -> Expr {
    Expr::New(NewExpr { target_type: t, arguments: Vec::new(), span: sp(line) })
}

pub fn new_array(element: TypeRef, dims: usize, line: usize) -> Expr {
    Expr::NewArray(NewArrayExpr { element_type: element, dims, span: sp(line) })
}

pub fn expr_stmt(expr: Expr) -> Stmt {
    let span = expr.span();
    Stmt::Expression(ExprStmt { expr, span })
}

// Resolved types ------------------------------------------------------------

pub fn rt_class(name: &str) -> ResolvedType {
    ResolvedType::class(name)
}

pub fn rt_param(name: &str, args: Vec<ResolvedType>) -> ResolvedType {
    ResolvedType::parameterized(name, args)
}

pub fn rt_int() -> ResolvedType {
    ResolvedType::Primitive(tola::sema::PrimitiveKind::Int)
}

pub fn rt_string() -> ResolvedType {
    ResolvedType::string()
}

pub fn rt_object() -> ResolvedType {
    ResolvedType::object()
}

pub fn rt_array(of: ResolvedType) -> ResolvedType {
    ResolvedType::array(of)
}
