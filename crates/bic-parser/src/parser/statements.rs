//! Statement dispatch and control-flow parsers.
//!
//! Statement position is where the grammar's big ambiguity lives: a leading
//! identifier may open a function declaration or an expression statement.
//! The function reading is attempted speculatively; on structural failure
//! the parser restores and reparses the tokens as an expression terminated
//! by `;`.
//!
//! The prefix modifiers (`pub`, `priv`, `static`, `virtual`) parse the
//! following statement and decorate the declaration it produced; applying a
//! modifier to anything else is a fatal error.

use bic_common::span::Span;
use bic_common::token::TokenKind;

use crate::ast::{
    Block, ElifBranch, ForStmt, IfStmt, ImportDecl, Statement, Stmt, Visibility, WhileStmt,
};
use crate::error::ParseError;

use super::expressions::parse_expr;
use super::items;
use super::Parser;

/// Parse one statement, or `None` for a bare `;`.
///
/// `allow_pure` is set while parsing under a `virtual` modifier; it is what
/// permits a function declaration to end in `;` instead of a body.
pub(crate) fn parse_statement(
    p: &mut Parser,
    allow_pure: bool,
) -> Result<Option<Statement>, ParseError> {
    let span = p.current_span();

    let node = match p.current_kind() {
        TokenKind::Semicolon => {
            p.advance()?;
            return Ok(None);
        }

        TokenKind::CppLit => Stmt::CppLit(p.advance()?.text),

        TokenKind::Import => {
            p.advance()?;
            if !p.at(TokenKind::StringLiteral) {
                return Err(p.error("expected a string literal after `import`"));
            }
            let path = p.advance()?.text;
            p.expect(TokenKind::Semicolon)?;
            Stmt::Import(ImportDecl { path })
        }

        TokenKind::TypeKw => {
            let alias = items::parse_type_alias(p)?;
            p.expect(TokenKind::Semicolon)?;
            Stmt::TypeAlias(alias)
        }

        TokenKind::Ret => {
            p.advance()?;
            let value = if p.at(TokenKind::Semicolon) {
                None
            } else {
                Some(parse_expr(p)?)
            };
            p.expect(TokenKind::Semicolon)?;
            Stmt::Return(value)
        }

        TokenKind::Del => {
            p.advance()?;
            let expr = parse_expr(p)?;
            p.expect(TokenKind::Semicolon)?;
            Stmt::Del(expr)
        }

        TokenKind::LBrace => Stmt::Block(parse_block(p)?),
        TokenKind::If => Stmt::If(parse_if(p)?),
        TokenKind::While => Stmt::While(parse_while(p)?),
        TokenKind::For => Stmt::For(parse_for(p)?),

        TokenKind::Break => {
            p.advance()?;
            p.expect(TokenKind::Semicolon)?;
            Stmt::Break
        }

        TokenKind::Continue => {
            p.advance()?;
            p.expect(TokenKind::Semicolon)?;
            Stmt::Continue
        }

        TokenKind::Pub | TokenKind::Priv => {
            let vis = if p.at(TokenKind::Pub) {
                Visibility::Public
            } else {
                Visibility::Private
            };
            p.advance()?;
            let mut stmt = require_statement(p, false, span)?;
            match &mut stmt.node {
                Stmt::Var(decl) => decl.visibility = Some(vis),
                Stmt::Func(decl) => decl.visibility = Some(vis),
                Stmt::Class(decl) => decl.visibility = Some(vis),
                Stmt::Enum(decl) => decl.visibility = Some(vis),
                Stmt::Operator(decl) => decl.visibility = Some(vis),
                _ => {
                    return Err(p.fatal_at(
                        "expected a declaration after a visibility modifier",
                        span,
                    ))
                }
            }
            return Ok(Some(Statement {
                node: stmt.node,
                span,
            }));
        }

        TokenKind::Static => {
            p.advance()?;
            let mut stmt = require_statement(p, false, span)?;
            match &mut stmt.node {
                Stmt::Var(decl) => decl.is_static = true,
                Stmt::Func(decl) => decl.is_static = true,
                Stmt::Class(decl) => decl.is_static = true,
                Stmt::Enum(decl) => decl.is_static = true,
                Stmt::Operator(decl) => decl.is_static = true,
                _ => return Err(p.fatal_at("expected a declaration after `static`", span)),
            }
            return Ok(Some(Statement {
                node: stmt.node,
                span,
            }));
        }

        TokenKind::Virtual => {
            p.advance()?;
            let mut stmt = require_statement(p, true, span)?;
            match &mut stmt.node {
                Stmt::Func(decl) => decl.is_virtual = true,
                _ => {
                    return Err(p.fatal_at(
                        "`virtual` is only allowed before a function declaration",
                        span,
                    ))
                }
            }
            return Ok(Some(Statement {
                node: stmt.node,
                span,
            }));
        }

        TokenKind::Let | TokenKind::Mut => {
            let decl = items::parse_var_decl(p)?;
            p.expect(TokenKind::Semicolon)?;
            Stmt::Var(decl)
        }

        TokenKind::Class => Stmt::Class(items::parse_class_decl(p)?),
        TokenKind::Enum => Stmt::Enum(items::parse_enum_decl(p)?),
        TokenKind::Operator => Stmt::Operator(items::parse_operator_decl(p)?),

        // A leading `~` marks a destructor.
        TokenKind::Tilde => {
            p.advance()?;
            let mut func = items::parse_func_decl(p, false)?;
            func.is_destructor = true;
            Stmt::Func(func)
        }

        // Function declaration vs. expression statement.
        TokenKind::Ident => {
            match p.speculative(|p| items::parse_func_decl(p, allow_pure))? {
                Some(func) => Stmt::Func(func),
                None => {
                    let expr = parse_expr(p)?;
                    p.expect(TokenKind::Semicolon)?;
                    Stmt::Expr(expr)
                }
            }
        }

        _ => {
            let expr = parse_expr(p)?;
            p.expect(TokenKind::Semicolon)?;
            Stmt::Expr(expr)
        }
    };

    Ok(Some(Statement { node, span }))
}

/// Parse the statement following a prefix modifier; a bare `;` (or nothing)
/// is an error there.
fn require_statement(
    p: &mut Parser,
    allow_pure: bool,
    modifier_span: Span,
) -> Result<Statement, ParseError> {
    parse_statement(p, allow_pure)?
        .ok_or_else(|| p.fatal_at("expected a declaration after modifier", modifier_span))
}

/// block: `{` statement* `}`
///
/// The opening brace commits any surrounding speculative attempt: from here
/// on the tokens can only be a block.
pub(crate) fn parse_block(p: &mut Parser) -> Result<Block, ParseError> {
    p.expect(TokenKind::LBrace)?;
    p.commit();
    let mut statements = Vec::new();
    loop {
        if p.eat(TokenKind::RBrace)? {
            break;
        }
        if p.at(TokenKind::Eof) {
            return Err(p.error("expected `}` before end of input"));
        }
        if let Some(stmt) = parse_statement(p, false)? {
            statements.push(stmt);
        }
    }
    Ok(Block { statements })
}

/// if_stmt: `if` `(` expr `)` block elif* (`else` block)?
fn parse_if(p: &mut Parser) -> Result<IfStmt, ParseError> {
    p.expect(TokenKind::If)?;
    p.expect(TokenKind::LParen)?;
    let cond = parse_expr(p)?;
    p.expect(TokenKind::RParen)?;
    let body = parse_block(p)?;

    let mut elifs = Vec::new();
    while p.at(TokenKind::Elif) {
        p.advance()?;
        p.expect(TokenKind::LParen)?;
        let cond = parse_expr(p)?;
        p.expect(TokenKind::RParen)?;
        let body = parse_block(p)?;
        elifs.push(ElifBranch { cond, body });
    }

    let else_body = if p.eat(TokenKind::Else)? {
        Some(parse_block(p)?)
    } else {
        None
    };

    Ok(IfStmt {
        cond,
        body,
        elifs,
        else_body,
    })
}

/// while_stmt: `while` `(` expr `)` block
fn parse_while(p: &mut Parser) -> Result<WhileStmt, ParseError> {
    p.expect(TokenKind::While)?;
    p.expect(TokenKind::LParen)?;
    let cond = parse_expr(p)?;
    p.expect(TokenKind::RParen)?;
    let body = parse_block(p)?;
    Ok(WhileStmt { cond, body })
}

/// for_stmt: `for` `(` loop_binding `in` expr `)` block
fn parse_for(p: &mut Parser) -> Result<ForStmt, ParseError> {
    p.expect(TokenKind::For)?;
    p.expect(TokenKind::LParen)?;
    let binding = items::parse_loop_binding(p)?;
    p.expect(TokenKind::In)?;
    let iterable = parse_expr(p)?;
    p.expect(TokenKind::RParen)?;
    let body = parse_block(p)?;
    Ok(ForStmt {
        binding,
        iterable,
        body,
    })
}
