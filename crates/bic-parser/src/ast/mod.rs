//! Typed AST for the Bic language.
//!
//! The parser produces an immutable tree of these nodes; the emitter walks
//! the tree and asks each node to render itself as C++ text at a given
//! indent depth. Expression-like nodes expose a single `render`; nodes that
//! split across the header and source units ([`item::FuncDecl`],
//! [`item::ClassDecl`]) expose separate declaration/definition renderings
//! driven by the emitter.

pub mod expr;
pub mod item;
pub mod ty;

use bic_common::span::Span;

pub use expr::Expr;
pub use item::{
    ClassDecl, EnumDecl, EnumKey, FuncDecl, ImportDecl, MethodKind, OperatorDecl, Param,
    TypeAlias, VarDecl,
};
pub use ty::{
    Bracket, TemplateArg, TemplateArgs, TemplateDecl, TemplateParam, TemplateParamKind, TypeBase,
    TypeSpec,
};

/// One indentation step in the generated C++.
pub const INDENT: &str = "    ";

/// The indentation prefix for the given depth.
pub fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// Member visibility in the target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

impl Visibility {
    /// The inline access-specifier prefix used on member declarations.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Public => "public: ",
            Self::Private => "private: ",
            Self::Protected => "protected: ",
        }
    }

    /// The bare keyword used in base-class lists.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
        }
    }
}

/// Render an optional visibility as a declaration prefix; `None` renders
/// nothing (free functions and top-level declarations).
pub fn visibility_prefix(vis: Option<Visibility>) -> &'static str {
    vis.map(Visibility::prefix).unwrap_or("")
}

/// A complete translation unit: the ordered top-level statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A statement wrapper: one inner node plus the span of its first token.
///
/// The span lets the emitter point at the offending member when a class body
/// contains something structurally invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub node: Stmt,
    pub span: Span,
}

impl Statement {
    /// Render the statement, appending a trailing semicolon when required.
    ///
    /// Returns `None` when the statement renders to nothing. The semicolon
    /// is appended iff the rendering is non-empty, does not already end with
    /// `}`, and the inner node is neither a raw C++ literal nor an import.
    pub fn render(&self, depth: usize) -> Option<String> {
        let mut text = self.node.render(depth).trim().to_string();
        if !matches!(self.node, Stmt::CppLit(_) | Stmt::Import(_))
            && !text.is_empty()
            && !text.ends_with('}')
        {
            text.push(';');
        }
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Every statement-position node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    /// Raw C++ line introduced by `//:`, pasted verbatim.
    CppLit(String),
    Import(ImportDecl),
    TypeAlias(TypeAlias),
    Return(Option<Expr>),
    Del(Expr),
    Block(Block),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Break,
    Continue,
    Var(VarDecl),
    Func(FuncDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
    Operator(OperatorDecl),
}

impl Stmt {
    /// Render the inner node in statement position.
    ///
    /// Declarations render their statement-position form here: a function is
    /// its unqualified definition, a class is its bare heading (the emitter
    /// owns header/source splitting for top-level declarations).
    pub fn render(&self, depth: usize) -> String {
        match self {
            Self::Expr(e) => e.render(),
            Self::CppLit(text) => text.clone(),
            Self::Import(import) => import.render(),
            Self::TypeAlias(alias) => alias.render(),
            Self::Return(Some(e)) => format!("return {}", e.render()),
            Self::Return(None) => "return".to_string(),
            Self::Del(e) => format!("delete {}", e.render()),
            Self::Block(b) => b.render(depth),
            Self::If(stmt) => stmt.render(depth),
            Self::While(stmt) => stmt.render(depth),
            Self::For(stmt) => stmt.render(depth),
            Self::Break => "break".to_string(),
            Self::Continue => "continue".to_string(),
            Self::Var(var) => var.render(),
            Self::Func(func) => {
                let kind = func.method_kind(None);
                func.render_definition(depth, None, kind).unwrap_or_default()
            }
            Self::Class(class) => class.render_heading(),
            Self::Enum(decl) => decl.render_with(decl.visibility, depth),
            Self::Operator(op) => op.render_with(op.visibility, depth),
        }
    }
}

/// A brace-delimited sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    /// Render the block: one statement per line at `depth + 1`, braces at
    /// `depth`. Statements that render to nothing are skipped.
    pub fn render(&self, depth: usize) -> String {
        let inner = indent(depth + 1);
        let base = indent(depth);
        let mut out = String::from("{");
        for stmt in &self.statements {
            if let Some(text) = stmt.render(depth + 1) {
                out.push('\n');
                out.push_str(&inner);
                out.push_str(&text);
            }
        }
        out.push('\n');
        out.push_str(&base);
        out.push('}');
        out
    }
}

/// An `if` statement with its `elif` chain and optional `else`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub body: Block,
    pub elifs: Vec<ElifBranch>,
    pub else_body: Option<Block>,
}

impl IfStmt {
    pub fn render(&self, depth: usize) -> String {
        let mut out = format!("if ({}) {}", self.cond.render(), self.body.render(depth));
        for branch in &self.elifs {
            out.push(' ');
            out.push_str(&format!(
                "else if ({}) {}",
                branch.cond.render(),
                branch.body.render(depth)
            ));
        }
        if let Some(else_body) = &self.else_body {
            out.push(' ');
            out.push_str(&format!("else {}", else_body.render(depth)));
        }
        out
    }
}

/// One `elif` branch.
#[derive(Debug, Clone, PartialEq)]
pub struct ElifBranch {
    pub cond: Expr,
    pub body: Block,
}

/// A `while` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Block,
}

impl WhileStmt {
    pub fn render(&self, depth: usize) -> String {
        format!("while ({}) {}", self.cond.render(), self.body.render(depth))
    }
}

/// A range-based `for (binding in iterable)` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub binding: VarDecl,
    pub iterable: Expr,
    pub body: Block,
}

impl ForStmt {
    pub fn render(&self, depth: usize) -> String {
        format!(
            "for ({} : {}) {}",
            self.binding.render(),
            self.iterable.render(),
            self.body.render(depth)
        )
    }
}
