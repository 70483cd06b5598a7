//! Type syntax nodes: type references, template parameter declarations,
//! and template argument lists.

use super::expr::Expr;

/// A full type as written in the source: optional `const`, the base type
/// with pointer/reference modifiers, an optional template argument list,
/// and an optional variadic `...` suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub is_const: bool,
    pub base: TypeBase,
    pub template: Option<TemplateArgs>,
    pub variadic: bool,
}

impl TypeSpec {
    pub fn render(&self) -> String {
        let const_ = if self.is_const { "const " } else { "" };
        let template = self
            .template
            .as_ref()
            .map(TemplateArgs::render)
            .unwrap_or_default();
        let variadic = if self.variadic { "..." } else { "" };
        format!("{const_}{}{template}{variadic}", self.base.render())
    }
}

/// The base of a type: a `::`-joined path with any number of pointer and
/// reference wrappers applied outside-in.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeBase {
    /// `A`, `A::B::C`, or a primitive type name.
    Path(Vec<String>),
    /// `T*`
    Ptr(Box<TypeBase>),
    /// `T&`
    Ref(Box<TypeBase>),
}

impl TypeBase {
    pub fn render(&self) -> String {
        match self {
            Self::Path(segments) => segments.join("::"),
            Self::Ptr(inner) => format!("{}*", inner.render()),
            Self::Ref(inner) => format!("{}&", inner.render()),
        }
    }
}

/// An actual template argument list, e.g. `<int, vector<T>>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateArgs {
    pub args: Vec<TemplateArg>,
}

impl TemplateArgs {
    /// Renders `<a, b>`, or nothing at all for an empty list.
    pub fn render(&self) -> String {
        if self.args.is_empty() {
            return String::new();
        }
        let args: Vec<_> = self.args.iter().map(TemplateArg::render).collect();
        format!("<{}>", args.join(", "))
    }
}

/// One template argument: a type where one parses, otherwise an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateArg {
    Type(TypeSpec),
    Expr(Expr),
}

impl TemplateArg {
    pub fn render(&self) -> String {
        match self {
            Self::Type(ty) => ty.render(),
            Self::Expr(expr) => expr.render(),
        }
    }
}

/// A formal template parameter list, e.g. `<T : type, N : int>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateDecl {
    pub params: Vec<TemplateParam>,
}

impl TemplateDecl {
    /// Renders the comma-joined parameter list without the angle brackets;
    /// callers wrap it in `template <...>`.
    pub fn render(&self) -> String {
        let params: Vec<_> = self.params.iter().map(TemplateParam::render).collect();
        params.join(", ")
    }
}

/// One formal template parameter: a name bound to a kind, optionally
/// variadic.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateParam {
    pub name: String,
    pub kind: TemplateParamKind,
    pub variadic: bool,
}

impl TemplateParam {
    pub fn render(&self) -> String {
        let kind = match &self.kind {
            TemplateParamKind::Typename => "typename".to_string(),
            TemplateParamKind::Class => "class".to_string(),
            TemplateParamKind::Concrete(ty) => ty.render(),
        };
        let variadic = if self.variadic { "..." } else { "" };
        format!("{kind}{variadic} {}", self.name)
    }
}

/// The kind a template parameter is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateParamKind {
    /// `T : type` renders as `typename T`.
    Typename,
    /// `T : class`
    Class,
    /// A concrete type, e.g. `N : int`.
    Concrete(TypeSpec),
}

/// An array-dimension suffix, `[expr]` or `[]`, preserved in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Bracket {
    pub size: Option<Expr>,
}

impl Bracket {
    pub fn render(&self) -> String {
        match &self.size {
            Some(expr) => format!("[{}]", expr.render()),
            None => "[]".to_string(),
        }
    }
}
