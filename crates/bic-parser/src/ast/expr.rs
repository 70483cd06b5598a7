//! Expression nodes and their C++ renderings.

use super::ty::TemplateArgs;

/// Every expression-position node.
///
/// Expressions render to a single line of target text; none of them care
/// about indent depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier or primitive type name used in expression position.
    Ident(String),
    Int(String),
    Float(String),
    /// String contents without quotes; rendering re-adds them.
    Str(String),
    /// Char contents without quotes; rendering re-adds them.
    Char(String),
    Bool(String),
    /// `null` renders as the literal `0`.
    Null,
    /// Braced initializer list `{a, b, c}`.
    Array(Vec<Expr>),
    /// `A::B`
    Namespace { left: Box<Expr>, right: String },
    /// `a.b` or `a->b`
    Member {
        object: Box<Expr>,
        field: String,
        arrow: bool,
    },
    /// `.b` on the implicit receiver; renders `this->b`.
    ImplicitMember { field: String },
    /// `a[b]`
    Index { base: Box<Expr>, index: Box<Expr> },
    /// `a.b` reached through the multiplicative layer.
    Dot { left: Box<Expr>, right: Box<Expr> },
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Unary { op: String, expr: Box<Expr> },
    /// Prefix `++`/`--`.
    PreOp { op: String, expr: Box<Expr> },
    /// Postfix `++`/`--`/`...`.
    PostOp { expr: Box<Expr>, op: String },
    Paren(Box<Expr>),
    Call {
        callee: Box<Expr>,
        template: Option<TemplateArgs>,
        args: Vec<Expr>,
    },
    /// `new expr`
    New(Box<Expr>),
}

impl Expr {
    /// Render the expression as target-language text.
    pub fn render(&self) -> String {
        match self {
            Self::Ident(name) => name.clone(),
            Self::Int(text) | Self::Float(text) | Self::Bool(text) => text.clone(),
            Self::Str(text) => format!("\"{text}\""),
            Self::Char(text) => format!("'{text}'"),
            Self::Null => "0".to_string(),
            Self::Array(items) => {
                let items: Vec<_> = items.iter().map(Expr::render).collect();
                format!("{{{}}}", items.join(", "))
            }
            Self::Namespace { left, right } => format!("{}::{}", left.render(), right),
            Self::Member {
                object,
                field,
                arrow,
            } => {
                let op = if *arrow { "->" } else { "." };
                format!("{}{}{}", object.render(), op, field)
            }
            Self::ImplicitMember { field } => format!("this->{field}"),
            Self::Index { base, index } => format!("{}[{}]", base.render(), index.render()),
            Self::Dot { left, right } => format!("{}.{}", left.render(), right.render()),
            Self::Binary { left, op, right } => {
                format!("{} {} {}", left.render(), op, right.render())
            }
            Self::Unary { op, expr } | Self::PreOp { op, expr } => {
                format!("{}{}", op, expr.render())
            }
            Self::PostOp { expr, op } => format!("{}{}", expr.render(), op),
            Self::Paren(inner) => format!("({})", inner.render()),
            Self::Call {
                callee,
                template,
                args,
            } => {
                let template = template.as_ref().map(TemplateArgs::render).unwrap_or_default();
                let args: Vec<_> = args.iter().map(Expr::render).collect();
                format!("{}{}({})", callee.render(), template, args.join(", "))
            }
            Self::New(expr) => format!("new {}", expr.render()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ty::{TemplateArg, TypeBase, TypeSpec};

    fn ident(name: &str) -> Box<Expr> {
        Box::new(Expr::Ident(name.into()))
    }

    #[test]
    fn literals_render_their_lexemes() {
        assert_eq!(Expr::Int("42".into()).render(), "42");
        assert_eq!(Expr::Float("3.10".into()).render(), "3.10");
        assert_eq!(Expr::Bool("false".into()).render(), "false");
        assert_eq!(Expr::Str("hi \\\"there\\\"".into()).render(), "\"hi \\\"there\\\"\"");
        assert_eq!(Expr::Char("\\n".into()).render(), "'\\n'");
        assert_eq!(Expr::Null.render(), "0");
    }

    #[test]
    fn array_renders_braced_list() {
        let e = Expr::Array(vec![Expr::Int("1".into()), Expr::Int("2".into())]);
        assert_eq!(e.render(), "{1, 2}");
    }

    #[test]
    fn access_chains() {
        let e = Expr::Member {
            object: Box::new(Expr::Namespace {
                left: ident("std"),
                right: "cout".into(),
            }),
            field: "flush".into(),
            arrow: false,
        };
        assert_eq!(e.render(), "std::cout.flush");

        let arrow = Expr::Member {
            object: ident("p"),
            field: "x".into(),
            arrow: true,
        };
        assert_eq!(arrow.render(), "p->x");

        assert_eq!(
            Expr::ImplicitMember { field: "x".into() }.render(),
            "this->x"
        );
    }

    #[test]
    fn operators_render_spaced_and_tight() {
        let bin = Expr::Binary {
            left: ident("a"),
            op: "+".into(),
            right: ident("b"),
        };
        assert_eq!(bin.render(), "a + b");

        let un = Expr::Unary {
            op: "!".into(),
            expr: ident("ok"),
        };
        assert_eq!(un.render(), "!ok");

        let post = Expr::PostOp {
            expr: ident("i"),
            op: "++".into(),
        };
        assert_eq!(post.render(), "i++");
    }

    #[test]
    fn call_with_template_arguments() {
        let e = Expr::Call {
            callee: ident("max"),
            template: Some(TemplateArgs {
                args: vec![TemplateArg::Type(TypeSpec {
                    is_const: false,
                    base: TypeBase::Path(vec!["int".into()]),
                    template: None,
                    variadic: false,
                })],
            }),
            args: vec![Expr::Ident("a".into()), Expr::Ident("b".into())],
        };
        assert_eq!(e.render(), "max<int>(a, b)");
    }

    #[test]
    fn new_and_index() {
        let e = Expr::New(Box::new(Expr::Call {
            callee: ident("Point"),
            template: None,
            args: vec![],
        }));
        assert_eq!(e.render(), "new Point()");

        let ix = Expr::Index {
            base: ident("xs"),
            index: Box::new(Expr::Int("0".into())),
        };
        assert_eq!(ix.render(), "xs[0]");
    }
}
