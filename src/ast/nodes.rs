use super::span::Span;
use std::fmt;

/// Identity of a syntax node that can carry semantic annotations.
///
/// The semantic model attaches resolution outcomes in a side table keyed by
/// `NodeId` instead of mutating the tree; producers of a tree assign ids that
/// are unique within one compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Root node of one parsed source file
#[derive(Debug, Clone)]
pub struct CompilationUnit {
    pub package: Option<String>,
    pub type_decls: Vec<TypeDecl>,
    pub span: Span,
}

// Type declarations
#[derive(Debug, Clone)]
pub enum TypeDecl {
    Class(ClassDecl),
    Interface(InterfaceDecl),
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Class(c) => &c.name,
            TypeDecl::Interface(i) => &i.name,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            TypeDecl::Class(c) => c.span,
            TypeDecl::Interface(i) => i.span,
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        match self {
            TypeDecl::Class(c) => &c.annotations,
            TypeDecl::Interface(i) => &i.annotations,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub extends: Option<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub body: Vec<ClassMember>,
    pub span: Span,
}

impl fmt::Display for ClassDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.name)
    }
}

#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub extends: Vec<TypeRef>,
    pub body: Vec<InterfaceMember>,
    pub span: Span,
}

impl fmt::Display for InterfaceDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interface {}", self.name)
    }
}

#[derive(Debug, Clone)]
pub enum ClassMember {
    Field(FieldDecl),
    Method(MethodDecl),
    Nested(TypeDecl),
}

#[derive(Debug, Clone)]
pub enum InterfaceMember {
    Method(MethodDecl),
    Field(FieldDecl),
    Nested(TypeDecl),
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub annotations: Vec<Annotation>,
    pub type_ref: TypeRef,
    pub name: String,
    pub initializer: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParam>,
    /// `None` for void methods
    pub return_type: Option<TypeRef>,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub type_ref: TypeRef,
    pub name: String,
    /// Set on the last parameter of a variable-arity method
    pub varargs: bool,
    pub span: Span,
}

// Annotations
#[derive(Debug, Clone)]
pub struct Annotation {
    pub name: String,
    pub arguments: Vec<AnnotationArg>,
    pub span: Span,
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}

#[derive(Debug, Clone)]
pub enum AnnotationArg {
    Value(Expr),
    Named(String, Expr),
}

// Type references
#[derive(Debug, Clone)]
pub struct TypeRef {
    pub name: String,
    pub type_args: Vec<TypeArg>,
    pub array_dims: usize,
    pub span: Span,
}

impl TypeRef {
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self { name: name.into(), type_args: Vec::new(), array_dims: 0, span }
    }

    pub fn with_args(name: impl Into<String>, type_args: Vec<TypeArg>, span: Span) -> Self {
        Self { name: name.into(), type_args, array_dims: 0, span }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.type_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                match arg {
                    TypeArg::Type(t) => write!(f, "{}", t)?,
                    TypeArg::Wildcard(w) => write!(f, "{}", w)?,
                }
            }
            write!(f, ">")?;
        }
        for _ in 0..self.array_dims {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum TypeArg {
    Type(TypeRef),
    Wildcard(WildcardType),
}

#[derive(Debug, Clone)]
pub struct WildcardType {
    pub bound: Option<(BoundKind, TypeRef)>,
    pub span: Span,
}

impl fmt::Display for WildcardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bound {
            None => write!(f, "?"),
            Some((BoundKind::Extends, t)) => write!(f, "? extends {}", t),
            Some((BoundKind::Super, t)) => write!(f, "? super {}", t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Extends,
    Super,
}

#[derive(Debug, Clone)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<TypeRef>,
    pub span: Span,
}

// Statements
#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(ExprStmt),
    Declaration(LocalVarDecl),
    Return(ReturnStmt),
    Block(Block),
}

#[derive(Debug, Clone)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct LocalVarDecl {
    pub type_ref: TypeRef,
    pub name: String,
    pub initializer: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

// Expressions
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    MethodCall(MethodCallExpr),
    FieldAccess(FieldAccessExpr),
    New(NewExpr),
    NewArray(NewArrayExpr),
    ArrayInitializer(ArrayInitializerExpr),
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal(e) => e.span,
            Expr::Identifier(e) => e.span,
            Expr::MethodCall(e) => e.span,
            Expr::FieldAccess(e) => e.span,
            Expr::New(e) => e.span,
            Expr::NewArray(e) => e.span,
            Expr::ArrayInitializer(e) => e.span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LiteralExpr {
    pub value: Literal,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Char(char),
    Str(String),
    Null,
}

/// A method invocation; `target` is absent for unqualified calls.
///
/// Carries a `NodeId` so the resolver can attach its outcome for this call
/// site in the semantic model.
#[derive(Debug, Clone)]
pub struct MethodCallExpr {
    pub id: NodeId,
    pub target: Option<Box<Expr>>,
    pub name: String,
    /// Explicit type arguments; empty when left to inference
    pub type_args: Vec<TypeRef>,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FieldAccessExpr {
    pub target: Option<Box<Expr>>,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct NewExpr {
    pub target_type: TypeRef,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct NewArrayExpr {
    pub element_type: TypeRef,
    pub dims: usize,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ArrayInitializerExpr {
    pub values: Vec<Expr>,
    pub span: Span,
}
