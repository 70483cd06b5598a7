//! Recursive-descent parser and typed AST for the Bic language.
//!
//! The entry point is [`parse`], which tokenizes the source and produces a
//! [`ast::Program`] or the first fatal [`error::ParseError`]. The AST nodes
//! carry the C++ rendering contract; the `bic-codegen` crate drives those
//! renderings to partition a program across the header and source units.

pub mod ast;
pub mod error;
mod parser;

pub use parser::Parser;

use bic_lexer::Lexer;

/// Parse a full Bic source text into a [`ast::Program`].
pub fn parse(source: &str) -> Result<ast::Program, error::ParseError> {
    let mut parser = Parser::new(Lexer::new(source))?;
    parser.parse_program()
}
