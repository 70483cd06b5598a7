//! Parse error types for the Bic parser.

use std::fmt;

use bic_common::error::LexError;
use bic_common::span::Span;

/// A parse error with location information.
///
/// Errors raised while a speculative production is being attempted are
/// marked `recoverable`; the nearest speculative boundary restores the
/// parser state and tries the alternative production instead of surfacing
/// them. Everything else is fatal: the caller reports the diagnostic and
/// the translation stops.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Source location where the error was detected.
    pub span: Span,
    /// Whether the error was raised under speculation and may be unwound.
    pub recoverable: bool,
}

impl ParseError {
    /// Create a new fatal parse error.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            recoverable: false,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    /// Scanner errors are fatal regardless of speculation.
    fn from(err: LexError) -> Self {
        ParseError::new(err.to_string(), err.span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_new_is_fatal() {
        let err = ParseError::new("expected expression", Span::new(5, 10));
        assert_eq!(err.message, "expected expression");
        assert_eq!(err.span, Span::new(5, 10));
        assert!(!err.recoverable);
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::new("unexpected token", Span::new(0, 1));
        assert_eq!(err.to_string(), "unexpected token");
    }

    #[test]
    fn lex_errors_convert_to_fatal_parse_errors() {
        use bic_common::error::{LexError, LexErrorKind};
        let err: ParseError =
            LexError::new(LexErrorKind::UnterminatedString, Span::new(2, 6)).into();
        assert_eq!(err.message, "unterminated string literal");
        assert_eq!(err.span, Span::new(2, 6));
        assert!(!err.recoverable);
    }
}
