use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// A lexer error with location information.
///
/// Lexer errors are always fatal to the translation: there is no recovery
/// past an unrecognizable character or an unterminated literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    /// Create a new lexer error.
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The specific kind of lexer error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LexErrorKind {
    /// A character outside every recognition table.
    UnexpectedCharacter(char),
    /// A string literal was not closed before end of input.
    UnterminatedString,
    /// A character literal was not closed before end of input.
    UnterminatedChar,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(c) => write!(f, "unexpected character: {c:?}"),
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::UnterminatedChar => write!(f, "unterminated character literal"),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for LexError {}
