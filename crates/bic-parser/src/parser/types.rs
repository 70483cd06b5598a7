//! Type parsers: type references, template parameter declarations, and
//! template argument lists.
//!
//! Template lists run under a template frame ([`Parser::push_template`]),
//! which makes the token plumbing split `>>` into two closers and stops the
//! comparison layer from eating the terminating `>`.

use bic_common::token::TokenKind;

use crate::ast::{
    TemplateArg, TemplateArgs, TemplateDecl, TemplateParam, TemplateParamKind, TypeBase, TypeSpec,
};
use crate::error::ParseError;

use super::expressions::parse_expr;
use super::Parser;

/// type_spec: `const`? type_ref template_args? `...`?
pub(crate) fn parse_type_spec(p: &mut Parser) -> Result<TypeSpec, ParseError> {
    let is_const = p.eat(TokenKind::Const)?;
    let base = parse_type_ref(p)?;
    let template = if p.at(TokenKind::Lt) {
        Some(parse_template_args(p)?)
    } else {
        None
    };
    let variadic = p.eat(TokenKind::DotDotDot)?;
    Ok(TypeSpec {
        is_const,
        base,
        template,
        variadic,
    })
}

/// type_ref: type_path `*`* `&`*
fn parse_type_ref(p: &mut Parser) -> Result<TypeBase, ParseError> {
    let mut base = parse_type_path(p)?;
    while p.eat(TokenKind::Star)? {
        base = TypeBase::Ptr(Box::new(base));
    }
    while p.eat(TokenKind::Amp)? {
        base = TypeBase::Ref(Box::new(base));
    }
    Ok(base)
}

/// type_path: identifier (`::` identifier)* | primitive type name
///
/// A `::` segment or a primitive type name commits the innermost
/// speculative attempt: nothing but a type can continue from there.
fn parse_type_path(p: &mut Parser) -> Result<TypeBase, ParseError> {
    match p.current_kind() {
        TokenKind::Ident => {
            let mut segments = vec![p.name()?];
            while p.at(TokenKind::ColonColon) {
                p.commit();
                p.advance()?;
                segments.push(p.name()?);
            }
            Ok(TypeBase::Path(segments))
        }
        TokenKind::Type => {
            p.commit();
            Ok(TypeBase::Path(vec![p.advance()?.text]))
        }
        _ => Err(p.error("expected a type")),
    }
}

/// template_args: `<` (template_arg (`,` template_arg)*)? `>`
pub(crate) fn parse_template_args(p: &mut Parser) -> Result<TemplateArgs, ParseError> {
    p.push_template();
    p.expect(TokenKind::Lt)?;
    let mut args = Vec::new();
    if !p.at(TokenKind::Gt) {
        args.push(parse_template_arg(p)?);
        while p.eat(TokenKind::Comma)? {
            args.push(parse_template_arg(p)?);
        }
    }
    p.expect(TokenKind::Gt)?;
    p.pop_template();
    Ok(TemplateArgs { args })
}

/// template_arg: type_spec | expr
///
/// The type reading is tried first, speculatively; it only wins when the
/// next token actually continues the argument list.
fn parse_template_arg(p: &mut Parser) -> Result<TemplateArg, ParseError> {
    let attempt = p.speculative(|p| {
        let ty = parse_type_spec(p)?;
        if !p.at(TokenKind::Comma) && !p.at(TokenKind::Gt) {
            return Err(p.error("expected `,` or `>` after template argument"));
        }
        Ok(ty)
    })?;
    match attempt {
        Some(ty) => Ok(TemplateArg::Type(ty)),
        None => Ok(TemplateArg::Expr(parse_expr(p)?)),
    }
}

/// template_decl: `<` template_param (`,` template_param)* `>`
pub(crate) fn parse_template_decl(p: &mut Parser) -> Result<TemplateDecl, ParseError> {
    p.push_template();
    p.expect(TokenKind::Lt)?;
    let mut params = vec![parse_template_param(p)?];
    while p.eat(TokenKind::Comma)? {
        params.push(parse_template_param(p)?);
    }
    p.expect(TokenKind::Gt)?;
    p.pop_template();
    Ok(TemplateDecl { params })
}

/// template_param: name `:` (`type` | `class` | type_spec) `...`?
fn parse_template_param(p: &mut Parser) -> Result<TemplateParam, ParseError> {
    let name = p.name()?;
    p.expect(TokenKind::Colon)?;
    let kind = match p.current_kind() {
        TokenKind::TypeKw => {
            p.advance()?;
            TemplateParamKind::Typename
        }
        TokenKind::Class => {
            p.advance()?;
            TemplateParamKind::Class
        }
        _ => TemplateParamKind::Concrete(parse_type_spec(p)?),
    };
    let variadic = p.eat(TokenKind::DotDotDot)?;
    Ok(TemplateParam {
        name,
        kind,
        variadic,
    })
}
