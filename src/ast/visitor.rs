use super::nodes::*;

/// Kinds of syntax nodes a check can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    Class,
    Interface,
    Field,
    Method,
    Parameter,
    Annotation,
    Block,
    ExpressionStatement,
    LocalVariable,
    ReturnStatement,
    MethodCall,
    FieldAccess,
    Identifier,
    Literal,
    New,
    NewArray,
    ArrayInitializer,
}

/// Borrowed view of a tree node, handed to subscription checks during the
/// shared traversal
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    CompilationUnit(&'a CompilationUnit),
    Class(&'a ClassDecl),
    Interface(&'a InterfaceDecl),
    Field(&'a FieldDecl),
    Method(&'a MethodDecl),
    Parameter(&'a Parameter),
    Annotation(&'a Annotation),
    Block(&'a Block),
    ExpressionStatement(&'a ExprStmt),
    LocalVariable(&'a LocalVarDecl),
    ReturnStatement(&'a ReturnStmt),
    MethodCall(&'a MethodCallExpr),
    FieldAccess(&'a FieldAccessExpr),
    Identifier(&'a IdentifierExpr),
    Literal(&'a LiteralExpr),
    New(&'a NewExpr),
    NewArray(&'a NewArrayExpr),
    ArrayInitializer(&'a ArrayInitializerExpr),
}

impl NodeRef<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::CompilationUnit(_) => NodeKind::CompilationUnit,
            NodeRef::Class(_) => NodeKind::Class,
            NodeRef::Interface(_) => NodeKind::Interface,
            NodeRef::Field(_) => NodeKind::Field,
            NodeRef::Method(_) => NodeKind::Method,
            NodeRef::Parameter(_) => NodeKind::Parameter,
            NodeRef::Annotation(_) => NodeKind::Annotation,
            NodeRef::Block(_) => NodeKind::Block,
            NodeRef::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            NodeRef::LocalVariable(_) => NodeKind::LocalVariable,
            NodeRef::ReturnStatement(_) => NodeKind::ReturnStatement,
            NodeRef::MethodCall(_) => NodeKind::MethodCall,
            NodeRef::FieldAccess(_) => NodeKind::FieldAccess,
            NodeRef::Identifier(_) => NodeKind::Identifier,
            NodeRef::Literal(_) => NodeKind::Literal,
            NodeRef::New(_) => NodeKind::New,
            NodeRef::NewArray(_) => NodeKind::NewArray,
            NodeRef::ArrayInitializer(_) => NodeKind::ArrayInitializer,
        }
    }

    pub fn span(&self) -> super::span::Span {
        match self {
            NodeRef::CompilationUnit(n) => n.span,
            NodeRef::Class(n) => n.span,
            NodeRef::Interface(n) => n.span,
            NodeRef::Field(n) => n.span,
            NodeRef::Method(n) => n.span,
            NodeRef::Parameter(n) => n.span,
            NodeRef::Annotation(n) => n.span,
            NodeRef::Block(n) => n.span,
            NodeRef::ExpressionStatement(n) => n.span,
            NodeRef::LocalVariable(n) => n.span,
            NodeRef::ReturnStatement(n) => n.span,
            NodeRef::MethodCall(n) => n.span,
            NodeRef::FieldAccess(n) => n.span,
            NodeRef::Identifier(n) => n.span,
            NodeRef::Literal(n) => n.span,
            NodeRef::New(n) => n.span,
            NodeRef::NewArray(n) => n.span,
            NodeRef::ArrayInitializer(n) => n.span,
        }
    }
}

/// Walk a compilation unit in pre-order, left to right, invoking `visit` on
/// every node. One walk serves every subscribed check for a file.
pub fn walk_unit<'a>(unit: &'a CompilationUnit, visit: &mut dyn FnMut(NodeRef<'a>)) {
    visit(NodeRef::CompilationUnit(unit));
    for decl in &unit.type_decls {
        walk_type_decl(decl, visit);
    }
}

fn walk_type_decl<'a>(decl: &'a TypeDecl, visit: &mut dyn FnMut(NodeRef<'a>)) {
    match decl {
        TypeDecl::Class(class) => {
            visit(NodeRef::Class(class));
            for ann in &class.annotations {
                walk_annotation(ann, visit);
            }
            for member in &class.body {
                match member {
                    ClassMember::Field(field) => walk_field(field, visit),
                    ClassMember::Method(method) => walk_method(method, visit),
                    ClassMember::Nested(nested) => walk_type_decl(nested, visit),
                }
            }
        }
        TypeDecl::Interface(iface) => {
            visit(NodeRef::Interface(iface));
            for ann in &iface.annotations {
                walk_annotation(ann, visit);
            }
            for member in &iface.body {
                match member {
                    InterfaceMember::Field(field) => walk_field(field, visit),
                    InterfaceMember::Method(method) => walk_method(method, visit),
                    InterfaceMember::Nested(nested) => walk_type_decl(nested, visit),
                }
            }
        }
    }
}

fn walk_annotation<'a>(ann: &'a Annotation, visit: &mut dyn FnMut(NodeRef<'a>)) {
    visit(NodeRef::Annotation(ann));
    for arg in &ann.arguments {
        match arg {
            AnnotationArg::Value(expr) | AnnotationArg::Named(_, expr) => walk_expr(expr, visit),
        }
    }
}

fn walk_field<'a>(field: &'a FieldDecl, visit: &mut dyn FnMut(NodeRef<'a>)) {
    visit(NodeRef::Field(field));
    for ann in &field.annotations {
        walk_annotation(ann, visit);
    }
    if let Some(init) = &field.initializer {
        walk_expr(init, visit);
    }
}

fn walk_method<'a>(method: &'a MethodDecl, visit: &mut dyn FnMut(NodeRef<'a>)) {
    visit(NodeRef::Method(method));
    for ann in &method.annotations {
        walk_annotation(ann, visit);
    }
    for param in &method.parameters {
        visit(NodeRef::Parameter(param));
    }
    if let Some(body) = &method.body {
        walk_block(body, visit);
    }
}

fn walk_block<'a>(block: &'a Block, visit: &mut dyn FnMut(NodeRef<'a>)) {
    visit(NodeRef::Block(block));
    for stmt in &block.statements {
        walk_stmt(stmt, visit);
    }
}

fn walk_stmt<'a>(stmt: &'a Stmt, visit: &mut dyn FnMut(NodeRef<'a>)) {
    match stmt {
        Stmt::Expression(es) => {
            visit(NodeRef::ExpressionStatement(es));
            walk_expr(&es.expr, visit);
        }
        Stmt::Declaration(decl) => {
            visit(NodeRef::LocalVariable(decl));
            if let Some(init) = &decl.initializer {
                walk_expr(init, visit);
            }
        }
        Stmt::Return(ret) => {
            visit(NodeRef::ReturnStatement(ret));
            if let Some(value) = &ret.value {
                walk_expr(value, visit);
            }
        }
        Stmt::Block(block) => walk_block(block, visit),
    }
}

fn walk_expr<'a>(expr: &'a Expr, visit: &mut dyn FnMut(NodeRef<'a>)) {
    match expr {
        Expr::Literal(lit) => visit(NodeRef::Literal(lit)),
        Expr::Identifier(id) => visit(NodeRef::Identifier(id)),
        Expr::MethodCall(call) => {
            visit(NodeRef::MethodCall(call));
            if let Some(target) = &call.target {
                walk_expr(target, visit);
            }
            for arg in &call.arguments {
                walk_expr(arg, visit);
            }
        }
        Expr::FieldAccess(fa) => {
            visit(NodeRef::FieldAccess(fa));
            if let Some(target) = &fa.target {
                walk_expr(target, visit);
            }
        }
        Expr::New(new) => {
            visit(NodeRef::New(new));
            for arg in &new.arguments {
                walk_expr(arg, visit);
            }
        }
        Expr::NewArray(new) => visit(NodeRef::NewArray(new)),
        Expr::ArrayInitializer(init) => {
            visit(NodeRef::ArrayInitializer(init));
            for value in &init.values {
                walk_expr(value, visit);
            }
        }
    }
}

/// AST visitor trait for self-directed whole-tree traversal.
///
/// Every method has a default that continues the walk; override the ones of
/// interest and call the matching `visit_*` default (or recurse manually) to
/// keep descending.
pub trait AstVisitor {
    fn visit_unit(&mut self, unit: &CompilationUnit) {
        for decl in &unit.type_decls {
            self.visit_type_decl(decl);
        }
    }

    fn visit_type_decl(&mut self, decl: &TypeDecl) {
        match decl {
            TypeDecl::Class(c) => self.visit_class(c),
            TypeDecl::Interface(i) => self.visit_interface(i),
        }
    }

    fn visit_class(&mut self, class: &ClassDecl) {
        for ann in &class.annotations {
            self.visit_annotation(ann);
        }
        for member in &class.body {
            match member {
                ClassMember::Field(f) => self.visit_field(f),
                ClassMember::Method(m) => self.visit_method(m),
                ClassMember::Nested(t) => self.visit_type_decl(t),
            }
        }
    }

    fn visit_interface(&mut self, iface: &InterfaceDecl) {
        for ann in &iface.annotations {
            self.visit_annotation(ann);
        }
        for member in &iface.body {
            match member {
                InterfaceMember::Field(f) => self.visit_field(f),
                InterfaceMember::Method(m) => self.visit_method(m),
                InterfaceMember::Nested(t) => self.visit_type_decl(t),
            }
        }
    }

    fn visit_field(&mut self, field: &FieldDecl) {
        for ann in &field.annotations {
            self.visit_annotation(ann);
        }
        if let Some(init) = &field.initializer {
            self.visit_expr(init);
        }
    }

    fn visit_method(&mut self, method: &MethodDecl) {
        for ann in &method.annotations {
            self.visit_annotation(ann);
        }
        for param in &method.parameters {
            self.visit_parameter(param);
        }
        if let Some(body) = &method.body {
            self.visit_block(body);
        }
    }

    fn visit_parameter(&mut self, _param: &Parameter) {}

    fn visit_annotation(&mut self, _ann: &Annotation) {}

    fn visit_block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(es) => self.visit_expr(&es.expr),
            Stmt::Declaration(decl) => {
                if let Some(init) = &decl.initializer {
                    self.visit_expr(init);
                }
            }
            Stmt::Return(ret) => {
                if let Some(value) = &ret.value {
                    self.visit_expr(value);
                }
            }
            Stmt::Block(block) => self.visit_block(block),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) | Expr::Identifier(_) => {}
            Expr::MethodCall(call) => {
                if let Some(target) = &call.target {
                    self.visit_expr(target);
                }
                for arg in &call.arguments {
                    self.visit_expr(arg);
                }
            }
            Expr::FieldAccess(fa) => {
                if let Some(target) = &fa.target {
                    self.visit_expr(target);
                }
            }
            Expr::New(new) => {
                for arg in &new.arguments {
                    self.visit_expr(arg);
                }
            }
            Expr::NewArray(_) => {}
            Expr::ArrayInitializer(init) => {
                for value in &init.values {
                    self.visit_expr(value);
                }
            }
        }
    }
}
