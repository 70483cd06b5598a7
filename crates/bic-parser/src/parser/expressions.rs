//! Expression parsers for Bic.
//!
//! Classic recursive-descent precedence ladder, tightest first: primary,
//! dot/arrow access, unary (including `new`), multiplicative (with the
//! dot-in-term form), additive, bitwise/shift, comparison/logical, and
//! assignment at the top. Comparison and logical operators share a layer,
//! as do the bitwise and shift operators.
//!
//! The one ambiguity lives at the bottom: an identifier followed by `<` may
//! open a template argument list or compare. The template reading is tried
//! speculatively (it must parse through `<args>(...)`); on failure the `<`
//! is left for the comparison layer.

use bic_common::token::TokenKind;

use crate::ast::Expr;
use crate::error::ParseError;

use super::types::parse_template_args;
use super::Parser;

/// Parse a full expression, including assignment.
pub(crate) fn parse_expr(p: &mut Parser) -> Result<Expr, ParseError> {
    let mut node = parse_comparison(p)?;

    if p.at(TokenKind::LParen) {
        node = parse_call(p, node)?;
    }

    if is_assign_op(p.current_kind()) {
        let op = p.advance()?.text;
        let right = parse_expr(p)?;
        node = Expr::Binary {
            left: Box::new(node),
            op,
            right: Box::new(right),
        };
    }

    Ok(node)
}

/// Whether the token kind is an assignment operator.
fn is_assign_op(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq
            | TokenKind::PlusEq
            | TokenKind::MinusEq
            | TokenKind::StarEq
            | TokenKind::SlashEq
            | TokenKind::PercentEq
            | TokenKind::AmpEq
            | TokenKind::PipeEq
            | TokenKind::CaretEq
    )
}

/// comparison: bitop ((== | != | < | > | <= | >= | && | ||) bitop)*
///
/// Inside a template list a lone `>` is the list terminator, not an
/// operator.
fn parse_comparison(p: &mut Parser) -> Result<Expr, ParseError> {
    let mut node = parse_bitop(p)?;
    loop {
        match p.current_kind() {
            TokenKind::Gt if p.in_template() => break,
            TokenKind::EqEq
            | TokenKind::NotEq
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::LtEq
            | TokenKind::GtEq
            | TokenKind::AmpAmp
            | TokenKind::PipePipe => {
                let op = p.advance()?.text;
                let right = parse_bitop(p)?;
                node = Expr::Binary {
                    left: Box::new(node),
                    op,
                    right: Box::new(right),
                };
            }
            _ => break,
        }
    }
    Ok(node)
}

/// bitop: add ((& | \| | ^ | << | >>) add)*
///
/// `>>` never appears here in template mode; the token plumbing has already
/// split it into two `>` closers.
fn parse_bitop(p: &mut Parser) -> Result<Expr, ParseError> {
    let mut node = parse_add(p)?;
    while matches!(
        p.current_kind(),
        TokenKind::Amp | TokenKind::Pipe | TokenKind::Caret | TokenKind::Shl | TokenKind::Shr
    ) {
        let op = p.advance()?.text;
        let right = parse_add(p)?;
        node = Expr::Binary {
            left: Box::new(node),
            op,
            right: Box::new(right),
        };
    }
    Ok(node)
}

/// add: term ((+ | -) term)*
fn parse_add(p: &mut Parser) -> Result<Expr, ParseError> {
    let mut node = parse_term(p)?;
    while matches!(p.current_kind(), TokenKind::Plus | TokenKind::Minus) {
        let op = p.advance()?.text;
        let right = parse_term(p)?;
        node = Expr::Binary {
            left: Box::new(node),
            op,
            right: Box::new(right),
        };
    }
    Ok(node)
}

/// term: unary ((. | * | / | %) unary)* index*
fn parse_term(p: &mut Parser) -> Result<Expr, ParseError> {
    let mut node = parse_unary(p)?;
    loop {
        match p.current_kind() {
            TokenKind::Dot => {
                p.advance()?;
                let right = parse_unary(p)?;
                node = Expr::Dot {
                    left: Box::new(node),
                    right: Box::new(right),
                };
            }
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
                let op = p.advance()?.text;
                let right = parse_unary(p)?;
                node = Expr::Binary {
                    left: Box::new(node),
                    op,
                    right: Box::new(right),
                };
            }
            _ => break,
        }
    }
    if p.at(TokenKind::LBracket) {
        return parse_index(p, node);
    }
    Ok(node)
}

/// unary: (new expr) | ((+ | - | ! | & | *) dot_expr) | dot_expr
fn parse_unary(p: &mut Parser) -> Result<Expr, ParseError> {
    match p.current_kind() {
        TokenKind::New => {
            p.advance()?;
            Ok(Expr::New(Box::new(parse_expr(p)?)))
        }
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Bang
        | TokenKind::Amp
        | TokenKind::Star => {
            let op = p.advance()?.text;
            Ok(Expr::Unary {
                op,
                expr: Box::new(parse_dot_expr(p)?),
            })
        }
        _ => parse_dot_expr(p),
    }
}

/// dot_expr: primary ((. | ->) name)*
fn parse_dot_expr(p: &mut Parser) -> Result<Expr, ParseError> {
    let node = parse_primary(p)?;
    parse_object_access(p, node)
}

/// Chain `.name` and `->name` accesses onto a parsed object.
fn parse_object_access(p: &mut Parser, mut node: Expr) -> Result<Expr, ParseError> {
    while matches!(p.current_kind(), TokenKind::Dot | TokenKind::Arrow) {
        let arrow = p.current_kind() == TokenKind::Arrow;
        p.advance()?;
        let field = p.name()?;
        node = Expr::Member {
            object: Box::new(node),
            field,
            arrow,
        };
    }
    Ok(node)
}

/// Chain `[expr]` index suffixes onto a parsed base.
fn parse_index(p: &mut Parser, mut node: Expr) -> Result<Expr, ParseError> {
    while p.eat(TokenKind::LBracket)? {
        let index = parse_expr(p)?;
        p.expect(TokenKind::RBracket)?;
        node = Expr::Index {
            base: Box::new(node),
            index: Box::new(index),
        };
    }
    Ok(node)
}

/// Parse a call suffix: optional template arguments, then `(args)`.
pub(crate) fn parse_call(p: &mut Parser, callee: Expr) -> Result<Expr, ParseError> {
    let template = if p.at(TokenKind::Lt) {
        Some(parse_template_args(p)?)
    } else {
        None
    };
    p.expect(TokenKind::LParen)?;
    let mut args = Vec::new();
    if !p.at(TokenKind::RParen) {
        args.push(parse_expr(p)?);
        while p.eat(TokenKind::Comma)? {
            args.push(parse_expr(p)?);
        }
    }
    p.expect(TokenKind::RParen)?;
    Ok(Expr::Call {
        callee: Box::new(callee),
        template,
        args,
    })
}

/// primary: literal | type-name | implicit member | parenthesis | prefix
/// inc/dec | array | identifier suffixes
fn parse_primary(p: &mut Parser) -> Result<Expr, ParseError> {
    match p.current_kind() {
        TokenKind::IntLiteral => Ok(Expr::Int(p.advance()?.text)),
        TokenKind::FloatLiteral => Ok(Expr::Float(p.advance()?.text)),
        TokenKind::BoolLiteral => Ok(Expr::Bool(p.advance()?.text)),
        TokenKind::StringLiteral => Ok(Expr::Str(p.advance()?.text)),
        TokenKind::CharLiteral => Ok(Expr::Char(p.advance()?.text)),
        TokenKind::Null => {
            p.advance()?;
            Ok(Expr::Null)
        }

        // Primitive type name in expression position, e.g. the cast `int(x)`.
        TokenKind::Type => Ok(Expr::Ident(p.advance()?.text)),

        // `.name` is member access on the implicit receiver.
        TokenKind::Dot => {
            p.advance()?;
            let field = p.name()?;
            Ok(Expr::ImplicitMember { field })
        }

        TokenKind::LParen => {
            p.advance()?;
            let inner = parse_expr(p)?;
            p.expect(TokenKind::RParen)?;
            let node = Expr::Paren(Box::new(inner));
            if p.at(TokenKind::LBracket) {
                parse_index(p, node)
            } else {
                Ok(node)
            }
        }

        TokenKind::PlusPlus | TokenKind::MinusMinus => {
            let op = p.advance()?.text;
            Ok(Expr::PreOp {
                op,
                expr: Box::new(parse_primary(p)?),
            })
        }

        // Array literal `[a, b, c]` renders as a braced initializer list.
        TokenKind::LBracket => {
            p.advance()?;
            let mut items = Vec::new();
            if !p.at(TokenKind::RBracket) {
                items.push(parse_expr(p)?);
                while p.eat(TokenKind::Comma)? {
                    items.push(parse_expr(p)?);
                }
            }
            p.expect(TokenKind::RBracket)?;
            Ok(Expr::Array(items))
        }

        TokenKind::Ident => {
            let mut node = Expr::Ident(p.name()?);
            while p.at(TokenKind::ColonColon) {
                p.advance()?;
                let right = p.name()?;
                node = Expr::Namespace {
                    left: Box::new(node),
                    right,
                };
            }

            match p.current_kind() {
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = p.advance()?.text;
                    Ok(Expr::PostOp {
                        expr: Box::new(node),
                        op,
                    })
                }
                TokenKind::LBracket => parse_index(p, node),
                TokenKind::LParen => parse_call(p, node),
                TokenKind::Lt => {
                    // Template call or comparison: try the template reading,
                    // fall back to leaving `<` for the comparison layer.
                    match p.speculative(|p| parse_call(p, node.clone()))? {
                        Some(call) => Ok(call),
                        None => Ok(node),
                    }
                }
                TokenKind::DotDotDot => {
                    p.advance()?;
                    Ok(Expr::PostOp {
                        expr: Box::new(node),
                        op: "...".to_string(),
                    })
                }
                _ => Ok(node),
            }
        }

        _ => Err(p.error("expected expression")),
    }
}
