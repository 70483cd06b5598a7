//! Declaration nodes: variables, functions, operators, classes, enums,
//! type aliases, and imports.
//!
//! Function and class declarations split across the two output units, so
//! they expose separate renderings: a header-mode declaration, a source-mode
//! definition qualified with the enclosing scope, and (for anything carrying
//! template parameters) an all-in-header inline form. Which one the emitter
//! picks, and with what member context, is decided in `bic-codegen`.

use super::expr::Expr;
use super::ty::{Bracket, TemplateDecl, TypeSpec};
use super::{visibility_prefix, Block, Visibility};

/// A `let`/`mut` variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    /// Absent only for `for`-loop bindings; renders as `auto`.
    pub ty: Option<TypeSpec>,
    pub value: Option<Expr>,
    /// `mut` bindings are mutable; `let` bindings render with `const`.
    pub is_mut: bool,
    /// Array-dimension suffixes in source order.
    pub brackets: Vec<Bracket>,
    pub visibility: Option<Visibility>,
    pub is_static: bool,
}

impl VarDecl {
    /// Render with the declaration's own visibility tag.
    pub fn render(&self) -> String {
        self.render_with(self.visibility)
    }

    /// Render as `[visibility] [static] type [const] name[brackets] [= expr]`.
    ///
    /// The emitter passes the resolved member visibility here; statement
    /// position passes the parsed tag through unchanged.
    pub fn render_with(&self, vis: Option<Visibility>) -> String {
        let ty = self
            .ty
            .as_ref()
            .map(TypeSpec::render)
            .unwrap_or_else(|| "auto".to_string());
        let const_ = if self.is_mut { "" } else { "const " };
        let static_ = if self.is_static { "static " } else { "" };
        let brackets: String = self.brackets.iter().map(Bracket::render).collect();

        let decl = format!(
            "{}{static_}{ty} {const_}{}{brackets}",
            visibility_prefix(vis),
            self.name
        );
        match &self.value {
            Some(value) => format!("{decl} = {}", value.render()),
            None => decl,
        }
    }
}

/// A function parameter: `name[brackets] : type`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeSpec,
    pub brackets: Vec<Bracket>,
}

impl Param {
    pub fn render(&self) -> String {
        let brackets: String = self.brackets.iter().map(Bracket::render).collect();
        format!("{} {}{brackets}", self.ty.render(), self.name)
    }
}

/// How a function relates to its enclosing class, decided at emission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// A free function or ordinary method.
    Plain,
    /// Name equals the enclosing class name: no return type, no nodiscard.
    Constructor,
    /// Parsed with a leading `~`: name renders `~Name`, no return type.
    Destructor,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: String,
    pub template: Option<TemplateDecl>,
    pub params: Vec<Param>,
    /// Return type after `->`; absent renders as `auto`.
    pub ret: Option<TypeSpec>,
    /// `None` marks a pure-virtual method; only produced under `virtual`.
    pub body: Option<Block>,
    pub is_const: bool,
    pub visibility: Option<Visibility>,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_destructor: bool,
}

impl FuncDecl {
    /// Decide how this function renders relative to the given class name.
    pub fn method_kind(&self, class_name: Option<&str>) -> MethodKind {
        if self.is_destructor {
            MethodKind::Destructor
        } else if class_name.is_some_and(|name| name == self.name) {
            MethodKind::Constructor
        } else {
            MethodKind::Plain
        }
    }

    /// Header-mode rendering: the full signature with every modifier,
    /// ending `;` (or ` = 0;` for pure-virtual methods).
    pub fn render_declaration(&self, vis: Option<Visibility>, kind: MethodKind) -> String {
        let terminator = if self.body.is_none() { " = 0;" } else { ";" };
        format!(
            "{}{}{}{}{}{}{}({}){}{terminator}",
            visibility_prefix(vis),
            self.template_prefix(),
            self.nodiscard(kind),
            self.static_prefix(),
            self.virtual_prefix(),
            self.return_text(kind),
            self.display_name(kind),
            self.params_text(),
            self.const_suffix(),
        )
    }

    /// Source-mode rendering: the definition with the name qualified by the
    /// enclosing scope and no modifiers except trailing `const`.
    ///
    /// Returns `None` for bodyless (pure-virtual) methods, which contribute
    /// nothing to the source unit.
    pub fn render_definition(
        &self,
        depth: usize,
        qualifier: Option<&str>,
        kind: MethodKind,
    ) -> Option<String> {
        let body = self.body.as_ref()?;
        let qualifier = qualifier.map(|q| format!("{q}::")).unwrap_or_default();
        Some(format!(
            "{}{qualifier}{}({}){} {}",
            self.return_text(kind),
            self.display_name(kind),
            self.params_text(),
            self.const_suffix(),
            body.render(depth),
        ))
    }

    /// All-in-header rendering used for functions with template parameters:
    /// every modifier plus the body.
    pub fn render_inline(&self, vis: Option<Visibility>, kind: MethodKind, depth: usize) -> String {
        let body = match &self.body {
            Some(body) => format!(" {}", body.render(depth)),
            None => " = 0;".to_string(),
        };
        format!(
            "{}{}{}{}{}{}{}({}){}{body}",
            visibility_prefix(vis),
            self.template_prefix(),
            self.nodiscard(kind),
            self.static_prefix(),
            self.virtual_prefix(),
            self.return_text(kind),
            self.display_name(kind),
            self.params_text(),
            self.const_suffix(),
        )
    }

    fn display_name(&self, kind: MethodKind) -> String {
        match kind {
            MethodKind::Destructor => format!("~{}", self.name),
            _ => self.name.clone(),
        }
    }

    /// The rendered return type with a trailing space, or nothing for
    /// constructors and destructors.
    fn return_text(&self, kind: MethodKind) -> String {
        if matches!(kind, MethodKind::Constructor | MethodKind::Destructor) {
            return String::new();
        }
        match &self.ret {
            Some(ty) => format!("{} ", ty.render()),
            None => "auto ".to_string(),
        }
    }

    /// `[[nodiscard]]` applies only when an explicit non-void return type is
    /// present, and never to constructors or destructors.
    fn nodiscard(&self, kind: MethodKind) -> &'static str {
        if matches!(kind, MethodKind::Constructor | MethodKind::Destructor) {
            return "";
        }
        match &self.ret {
            Some(ty) if ty.render() != "void" => "[[nodiscard]] ",
            _ => "",
        }
    }

    fn template_prefix(&self) -> String {
        match &self.template {
            Some(decl) => format!("template <{}> ", decl.render()),
            None => String::new(),
        }
    }

    fn static_prefix(&self) -> &'static str {
        if self.is_static {
            "static "
        } else {
            ""
        }
    }

    fn virtual_prefix(&self) -> &'static str {
        if self.is_virtual {
            "virtual "
        } else {
            ""
        }
    }

    fn const_suffix(&self) -> &'static str {
        if self.is_const {
            " const"
        } else {
            ""
        }
    }

    fn params_text(&self) -> String {
        let params: Vec<_> = self.params.iter().map(Param::render).collect();
        params.join(", ")
    }
}

/// An `operator` declaration; always renders inline with its body.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorDecl {
    pub op: String,
    pub params: Vec<Param>,
    pub ret: Option<TypeSpec>,
    pub body: Block,
    pub is_const: bool,
    pub visibility: Option<Visibility>,
    pub is_static: bool,
    pub is_virtual: bool,
}

impl OperatorDecl {
    pub fn render_with(&self, vis: Option<Visibility>, depth: usize) -> String {
        let ty = self
            .ret
            .as_ref()
            .map(TypeSpec::render)
            .unwrap_or_else(|| "auto".to_string());
        let nodiscard = if ty != "auto" && ty != "void" {
            "[[nodiscard]] "
        } else {
            ""
        };
        let static_ = if self.is_static { "static " } else { "" };
        let virtual_ = if self.is_virtual { "virtual " } else { "" };
        let const_ = if self.is_const { "const " } else { "" };
        let params: Vec<_> = self.params.iter().map(Param::render).collect();
        format!(
            "{}{nodiscard}{static_}{virtual_}{ty} operator{}({}) {const_}{}",
            visibility_prefix(vis),
            self.op,
            params.join(", "),
            self.body.render(depth),
        )
    }
}

/// A class declaration.
///
/// The heading renders here; member partitioning between the header and
/// source units is the emitter's job, so the body is never rendered inline.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub template: Option<TemplateDecl>,
    /// Base classes as `(visibility, type)` pairs; an absent visibility in
    /// the source already defaulted to protected at parse time.
    pub inherits: Vec<(Visibility, TypeSpec)>,
    pub body: Block,
    pub visibility: Option<Visibility>,
    pub is_static: bool,
}

impl ClassDecl {
    /// Render `template <...> class Name : public Base, ...` with no body.
    pub fn render_heading(&self) -> String {
        let template = match &self.template {
            Some(decl) => format!("template <{}> ", decl.render()),
            None => String::new(),
        };
        let inherits = if self.inherits.is_empty() {
            String::new()
        } else {
            let bases: Vec<_> = self
                .inherits
                .iter()
                .map(|(vis, ty)| format!("{} {}", vis.keyword(), ty.render()))
                .collect();
            format!(" : {}", bases.join(", "))
        };
        format!("{template}class {}{inherits}", self.name)
    }
}

/// One enum key with an optional explicit value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumKey {
    pub name: String,
    pub value: Option<Expr>,
}

impl EnumKey {
    pub fn render(&self) -> String {
        match &self.value {
            Some(value) => format!("{} = {}", self.name, value.render()),
            None => self.name.clone(),
        }
    }
}

/// An enum declaration; renders as a scoped `enum class` with an explicit
/// underlying type when one was supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub underlying: Option<TypeSpec>,
    pub keys: Vec<EnumKey>,
    pub visibility: Option<Visibility>,
    pub is_static: bool,
}

impl EnumDecl {
    pub fn render_with(&self, vis: Option<Visibility>, depth: usize) -> String {
        let underlying = self
            .underlying
            .as_ref()
            .map(|ty| format!(" : {}", ty.render()))
            .unwrap_or_default();
        let inner = super::indent(depth + 1);
        let base = super::indent(depth);
        let mut body = String::from("{");
        for key in &self.keys {
            body.push_str(&format!("\n{inner}{},", key.render()));
        }
        body.push_str(&format!("\n{base}}}"));
        format!(
            "{}enum class {}{underlying} {body};",
            visibility_prefix(vis),
            self.name
        )
    }
}

/// A `type Name = T` alias; renders as a typedef.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: String,
    pub ty: TypeSpec,
}

impl TypeAlias {
    pub fn render(&self) -> String {
        format!("typedef {} {}", self.ty.render(), self.name)
    }
}

/// An import directive; renders as a quoted include with the source suffix
/// rewritten to the header suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub path: String,
}

impl ImportDecl {
    pub fn render(&self) -> String {
        format!("#include \"{}\"", self.path.replace(".bic", ".hpp"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ty::{TemplateParam, TemplateParamKind, TypeBase};
    use crate::ast::Statement;
    use crate::ast::Stmt;
    use bic_common::span::Span;

    fn simple(name: &str) -> TypeSpec {
        TypeSpec {
            is_const: false,
            base: TypeBase::Path(vec![name.to_string()]),
            template: None,
            variadic: false,
        }
    }

    fn func(name: &str) -> FuncDecl {
        FuncDecl {
            name: name.into(),
            template: None,
            params: Vec::new(),
            ret: None,
            body: Some(Block::default()),
            is_const: false,
            visibility: None,
            is_static: false,
            is_virtual: false,
            is_destructor: false,
        }
    }

    #[test]
    fn var_decl_east_const() {
        let var = VarDecl {
            name: "x".into(),
            ty: Some(simple("int")),
            value: Some(Expr::Int("3".into())),
            is_mut: false,
            brackets: Vec::new(),
            visibility: None,
            is_static: false,
        };
        assert_eq!(var.render(), "int const x = 3");
    }

    #[test]
    fn var_decl_member_with_brackets() {
        let var = VarDecl {
            name: "data".into(),
            ty: Some(simple("float")),
            value: None,
            is_mut: true,
            brackets: vec![Bracket {
                size: Some(Expr::Int("16".into())),
            }],
            visibility: None,
            is_static: true,
        };
        assert_eq!(
            var.render_with(Some(Visibility::Private)),
            "private: static float data[16]"
        );
    }

    #[test]
    fn func_declaration_with_modifiers() {
        let mut f = func("area");
        f.ret = Some(simple("float"));
        f.is_const = true;
        f.is_virtual = true;
        assert_eq!(
            f.render_declaration(Some(Visibility::Public), MethodKind::Plain),
            "public: [[nodiscard]] virtual float area() const;"
        );
    }

    #[test]
    fn func_void_gets_no_nodiscard() {
        let mut f = func("reset");
        f.ret = Some(simple("void"));
        assert_eq!(
            f.render_declaration(None, MethodKind::Plain),
            "void reset();"
        );
    }

    #[test]
    fn pure_virtual_declaration_and_no_definition() {
        let mut f = func("draw");
        f.ret = Some(simple("void"));
        f.is_virtual = true;
        f.body = None;
        assert_eq!(
            f.render_declaration(None, MethodKind::Plain),
            "virtual void draw() = 0;"
        );
        assert_eq!(f.render_definition(0, Some("Shape"), MethodKind::Plain), None);
    }

    #[test]
    fn constructor_elides_return_type() {
        let mut f = func("Point");
        f.params = vec![Param {
            name: "x".into(),
            ty: simple("int"),
            brackets: Vec::new(),
        }];
        let kind = f.method_kind(Some("Point"));
        assert_eq!(kind, MethodKind::Constructor);
        assert_eq!(
            f.render_declaration(Some(Visibility::Protected), kind),
            "protected: Point(int x);"
        );
        assert_eq!(
            f.render_definition(0, Some("Point"), kind),
            Some("Point::Point(int x) {\n}".to_string())
        );
    }

    #[test]
    fn destructor_renders_tilde_name() {
        let mut f = func("Point");
        f.is_destructor = true;
        let kind = f.method_kind(Some("Point"));
        assert_eq!(kind, MethodKind::Destructor);
        assert_eq!(
            f.render_definition(0, Some("Point"), kind),
            Some("Point::~Point() {\n}".to_string())
        );
    }

    #[test]
    fn template_function_renders_inline() {
        let mut f = func("add");
        f.ret = Some(simple("T"));
        f.template = Some(TemplateDecl {
            params: vec![TemplateParam {
                name: "T".into(),
                kind: TemplateParamKind::Typename,
                variadic: false,
            }],
        });
        f.params = vec![
            Param {
                name: "a".into(),
                ty: simple("T"),
                brackets: Vec::new(),
            },
            Param {
                name: "b".into(),
                ty: simple("T"),
                brackets: Vec::new(),
            },
        ];
        f.body = Some(Block {
            statements: vec![Statement {
                node: Stmt::Return(Some(Expr::Binary {
                    left: Box::new(Expr::Ident("a".into())),
                    op: "+".into(),
                    right: Box::new(Expr::Ident("b".into())),
                })),
                span: Span::new(0, 0),
            }],
        });
        assert_eq!(
            f.render_inline(None, MethodKind::Plain, 0),
            "template <typename T> [[nodiscard]] T add(T a, T b) {\n    return a + b;\n}"
        );
    }

    #[test]
    fn operator_renders_inline_with_body() {
        let op = OperatorDecl {
            op: "+".into(),
            params: vec![Param {
                name: "other".into(),
                ty: TypeSpec {
                    is_const: true,
                    base: TypeBase::Ref(Box::new(TypeBase::Path(vec!["Vec2".into()]))),
                    template: None,
                    variadic: false,
                },
                brackets: Vec::new(),
            }],
            ret: Some(simple("Vec2")),
            body: Block::default(),
            is_const: true,
            visibility: None,
            is_static: false,
            is_virtual: false,
        };
        assert_eq!(
            op.render_with(Some(Visibility::Public), 0),
            "public: [[nodiscard]] Vec2 operator+(const Vec2& other) const {\n}"
        );
    }

    #[test]
    fn class_heading_with_inheritance() {
        let class = ClassDecl {
            name: "Circle".into(),
            template: None,
            inherits: vec![
                (Visibility::Public, simple("Shape")),
                (Visibility::Protected, simple("Serializable")),
            ],
            body: Block::default(),
            visibility: None,
            is_static: false,
        };
        assert_eq!(
            class.render_heading(),
            "class Circle : public Shape, protected Serializable"
        );
    }

    #[test]
    fn enum_renders_scoped_with_underlying_type() {
        let decl = EnumDecl {
            name: "Color".into(),
            underlying: Some(simple("int")),
            keys: vec![
                EnumKey {
                    name: "Red".into(),
                    value: None,
                },
                EnumKey {
                    name: "Green".into(),
                    value: Some(Expr::Int("2".into())),
                },
                EnumKey {
                    name: "Blue".into(),
                    value: None,
                },
            ],
            visibility: None,
            is_static: false,
        };
        assert_eq!(
            decl.render_with(None, 0),
            "enum class Color : int {\n    Red,\n    Green = 2,\n    Blue,\n};"
        );
    }

    #[test]
    fn type_alias_renders_typedef() {
        let alias = TypeAlias {
            name: "Id".into(),
            ty: simple("int"),
        };
        assert_eq!(alias.render(), "typedef int Id");
    }

    #[test]
    fn import_rewrites_extension() {
        let import = ImportDecl {
            path: "util.bic".into(),
        };
        assert_eq!(import.render(), "#include \"util.hpp\"");
    }
}
