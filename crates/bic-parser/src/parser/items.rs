//! Declaration parsers: variables, functions, classes, enums, operators,
//! and type aliases.

use bic_common::token::TokenKind;

use crate::ast::{
    Bracket, ClassDecl, EnumDecl, EnumKey, FuncDecl, OperatorDecl, Param, TypeAlias, TypeSpec,
    VarDecl, Visibility,
};
use crate::error::ParseError;

use super::expressions::parse_expr;
use super::statements::parse_block;
use super::types::{parse_template_decl, parse_type_spec};
use super::Parser;

/// var_decl: (`let` | `mut`) name bracket* `:` type_spec (`=` expr)?
pub(crate) fn parse_var_decl(p: &mut Parser) -> Result<VarDecl, ParseError> {
    let is_mut = match p.current_kind() {
        TokenKind::Let => false,
        TokenKind::Mut => true,
        _ => return Err(p.error("expected `let` or `mut`")),
    };
    p.advance()?;

    let name = p.name()?;
    let mut brackets = Vec::new();
    while p.at(TokenKind::LBracket) {
        brackets.push(parse_bracket(p)?);
    }
    p.expect(TokenKind::Colon)?;
    let ty = parse_type_spec(p)?;
    let value = if p.eat(TokenKind::Eq)? {
        Some(parse_expr(p)?)
    } else {
        None
    };

    Ok(VarDecl {
        name,
        ty: Some(ty),
        value,
        is_mut,
        brackets,
        visibility: None,
        is_static: false,
    })
}

/// loop_binding: name (`:` type_spec)?
///
/// The binding of a `for` loop; the type is optional and defaults to the
/// target language's inference keyword.
pub(crate) fn parse_loop_binding(p: &mut Parser) -> Result<VarDecl, ParseError> {
    let name = p.name()?;
    let ty = if p.eat(TokenKind::Colon)? {
        Some(parse_type_spec(p)?)
    } else {
        None
    };
    Ok(VarDecl {
        name,
        ty,
        value: None,
        is_mut: true,
        brackets: Vec::new(),
        visibility: None,
        is_static: false,
    })
}

/// bracket: `[` expr? `]`
fn parse_bracket(p: &mut Parser) -> Result<Bracket, ParseError> {
    p.expect(TokenKind::LBracket)?;
    let size = if p.at(TokenKind::RBracket) {
        None
    } else {
        Some(parse_expr(p)?)
    };
    p.expect(TokenKind::RBracket)?;
    Ok(Bracket { size })
}

/// param: name bracket* `:` type_spec
fn parse_param(p: &mut Parser) -> Result<Param, ParseError> {
    let name = p.name()?;
    let mut brackets = Vec::new();
    while p.at(TokenKind::LBracket) {
        brackets.push(parse_bracket(p)?);
    }
    p.expect(TokenKind::Colon)?;
    let ty = parse_type_spec(p)?;
    Ok(Param { name, ty, brackets })
}

/// params: param (`,` param)*
fn parse_params(p: &mut Parser) -> Result<Vec<Param>, ParseError> {
    let mut params = vec![parse_param(p)?];
    while p.eat(TokenKind::Comma)? {
        params.push(parse_param(p)?);
    }
    Ok(params)
}

/// func_decl: name template_decl? `(` params? `)` `const`? (`->` type_spec)?
/// (block | `;`)
///
/// The trailing `;` form is accepted only under a surrounding `virtual`
/// modifier and produces a pure-virtual declaration (no body).
///
/// Usually entered speculatively from statement position; a parsed template
/// declaration, a consumed `->`, or the opening `{` commits the attempt.
pub(crate) fn parse_func_decl(p: &mut Parser, is_virtual: bool) -> Result<FuncDecl, ParseError> {
    let name = p.name()?;

    let template = if p.at(TokenKind::Lt) {
        let decl = parse_template_decl(p)?;
        p.commit();
        Some(decl)
    } else {
        None
    };

    p.expect(TokenKind::LParen)?;
    let params = if p.at(TokenKind::RParen) {
        Vec::new()
    } else {
        parse_params(p)?
    };
    p.expect(TokenKind::RParen)?;

    let is_const = p.eat(TokenKind::Const)?;

    let ret = if p.eat(TokenKind::Arrow)? {
        p.commit();
        Some(parse_type_spec(p)?)
    } else {
        None
    };

    let body = if p.at(TokenKind::Semicolon) && is_virtual {
        p.advance()?;
        None
    } else {
        Some(parse_block(p)?)
    };

    Ok(FuncDecl {
        name,
        template,
        params,
        ret,
        body,
        is_const,
        visibility: None,
        is_static: false,
        is_virtual: false,
        is_destructor: false,
    })
}

/// class_decl: `class` name template_decl? inherit_list? block
pub(crate) fn parse_class_decl(p: &mut Parser) -> Result<ClassDecl, ParseError> {
    p.expect(TokenKind::Class)?;
    let name = p.name()?;
    let template = if p.at(TokenKind::Lt) {
        Some(parse_template_decl(p)?)
    } else {
        None
    };
    let inherits = if p.at(TokenKind::LParen) {
        parse_inherit_list(p)?
    } else {
        Vec::new()
    };
    let body = parse_block(p)?;
    Ok(ClassDecl {
        name,
        template,
        inherits,
        body,
        visibility: None,
        is_static: false,
    })
}

/// inherit_list: `(` ((`pub` | `priv`)? type_spec) (`,` ...)* `)`
///
/// A base class without an explicit visibility inherits as protected.
fn parse_inherit_list(p: &mut Parser) -> Result<Vec<(Visibility, TypeSpec)>, ParseError> {
    p.expect(TokenKind::LParen)?;
    let mut inherits = Vec::new();
    while !p.at(TokenKind::RParen) {
        let vis = if p.eat(TokenKind::Pub)? {
            Visibility::Public
        } else if p.eat(TokenKind::Priv)? {
            Visibility::Private
        } else {
            Visibility::Protected
        };
        inherits.push((vis, parse_type_spec(p)?));
        if !p.eat(TokenKind::Comma)? {
            break;
        }
    }
    p.expect(TokenKind::RParen)?;
    Ok(inherits)
}

/// enum_decl: `enum` name (`:` type_spec)? `{` enum_key (`,` enum_key)* `,`?
/// `}`
pub(crate) fn parse_enum_decl(p: &mut Parser) -> Result<EnumDecl, ParseError> {
    p.expect(TokenKind::Enum)?;
    let name = p.name()?;
    let underlying = if p.eat(TokenKind::Colon)? {
        Some(parse_type_spec(p)?)
    } else {
        None
    };

    p.expect(TokenKind::LBrace)?;
    let mut keys = Vec::new();
    while !p.at(TokenKind::RBrace) {
        let key_name = p.name()?;
        let value = if p.eat(TokenKind::Eq)? {
            Some(parse_expr(p)?)
        } else {
            None
        };
        keys.push(EnumKey {
            name: key_name,
            value,
        });
        if !p.eat(TokenKind::Comma)? {
            break;
        }
    }
    p.expect(TokenKind::RBrace)?;

    Ok(EnumDecl {
        name,
        underlying,
        keys,
        visibility: None,
        is_static: false,
    })
}

/// operator_decl: `operator` (+ | - | * | / | %) `(` params? `)` `const`?
/// (`->` type_spec)? block
pub(crate) fn parse_operator_decl(p: &mut Parser) -> Result<OperatorDecl, ParseError> {
    p.expect(TokenKind::Operator)?;
    let op = match p.current_kind() {
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent => p.advance()?.text,
        _ => return Err(p.error("expected an operator symbol after `operator`")),
    };

    p.expect(TokenKind::LParen)?;
    let params = if p.at(TokenKind::RParen) {
        Vec::new()
    } else {
        parse_params(p)?
    };
    p.expect(TokenKind::RParen)?;

    let is_const = p.eat(TokenKind::Const)?;
    let ret = if p.eat(TokenKind::Arrow)? {
        Some(parse_type_spec(p)?)
    } else {
        None
    };
    let body = parse_block(p)?;

    Ok(OperatorDecl {
        op,
        params,
        ret,
        body,
        is_const,
        visibility: None,
        is_static: false,
        is_virtual: false,
    })
}

/// type_alias: `type` name `=` type_spec
pub(crate) fn parse_type_alias(p: &mut Parser) -> Result<TypeAlias, ParseError> {
    p.expect(TokenKind::TypeKw)?;
    let name = p.name()?;
    p.expect(TokenKind::Eq)?;
    let ty = parse_type_spec(p)?;
    Ok(TypeAlias { name, ty })
}
