//! Recursive-descent parser for Bic.
//!
//! The parser pulls tokens from the lexer one at a time and builds the typed
//! AST directly. Three mechanisms carry all the interesting weight:
//!
//! 1. **Speculation.** Locally ambiguous productions (a function declaration
//!    vs. an expression statement, a template argument list vs. a chain of
//!    comparisons, a template argument that may be a type or an expression)
//!    are attempted under [`Parser::speculative`], which snapshots the full
//!    parser and lexer state. Errors raised inside the attempt are
//!    *recoverable*: the snapshot is restored and the caller dispatches the
//!    alternative production. [`Parser::commit`] flips the attempt back to
//!    fatal once enough structure has been seen that no alternative can
//!    apply (an opening brace, a parsed template declaration, a `->`).
//!
//! 2. **Template mode.** While the parser is between the `<` and `>` of a
//!    template list, `template_depth` is non-zero. In that mode a fetched
//!    `>>` token is split into two `>` tokens through a one-token pushback
//!    buffer, and the comparison layer treats a lone `>` as the list
//!    terminator instead of an operator. No `>>` ever reaches an operator
//!    layer inside a template list.
//!
//! 3. **First-error-fatal.** Outside speculation the first error aborts the
//!    parse; there is no recovery or resynchronization.

pub(crate) mod expressions;
pub(crate) mod items;
pub(crate) mod statements;
pub(crate) mod types;

use bic_common::span::Span;
use bic_common::token::{Token, TokenKind};
use bic_lexer::{Lexer, LexerState};

use crate::ast::Program;
use crate::error::ParseError;

/// The Bic parser. Owns the lexer and the current one-token lookahead.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    /// Deferred second `>` produced by splitting a `>>` in template mode.
    pushback: Option<Token>,
    /// Nesting depth of template argument/parameter lists.
    template_depth: u32,
    /// Whether errors should be raised as recoverable.
    speculating: bool,
}

/// A full snapshot of the parser state, restored when a speculative
/// production fails.
struct Checkpoint {
    lexer: LexerState,
    current: Token,
    pushback: Option<Token>,
    template_depth: u32,
}

impl<'src> Parser<'src> {
    /// Create a parser over the given lexer, priming the first token.
    pub fn new(mut lexer: Lexer<'src>) -> Result<Self, ParseError> {
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            pushback: None,
            template_depth: 0,
            speculating: false,
        })
    }

    /// Parse a complete program: top-level statements until end of input.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut statements = Vec::new();
        while !self.at(TokenKind::Eof) {
            if let Some(stmt) = statements::parse_statement(self, false)? {
                statements.push(stmt);
            }
        }
        Ok(Program { statements })
    }

    // ── Lookahead ──────────────────────────────────────────────────────

    /// The current token.
    pub(crate) fn current(&self) -> &Token {
        &self.current
    }

    /// The kind of the current token.
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// The span of the current token.
    pub(crate) fn current_span(&self) -> Span {
        self.current.span
    }

    /// Whether the current token has the given kind.
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    // ── Token consumption ──────────────────────────────────────────────

    /// Replace the current token with the next one from the pushback buffer
    /// or the lexer, splitting `>>` in template mode.
    ///
    /// Returns the token that was current before the advance.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let mut next = match self.pushback.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        if self.template_depth > 0 && next.kind == TokenKind::Shr {
            next = self.split_shift(next);
        }
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Split a `>>` into two `>` tokens: the first becomes current, the
    /// second waits in the pushback buffer.
    fn split_shift(&mut self, token: Token) -> Token {
        let mid = token.span.start + 1;
        self.pushback = Some(Token::new(TokenKind::Gt, ">", mid, token.span.end));
        Token::new(TokenKind::Gt, ">", token.span.start, mid)
    }

    /// Consume the current token if it has the given kind; error otherwise.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            self.advance()
        } else {
            Err(self.error(format!(
                "expected {:?}, found {:?} {:?}",
                kind, self.current.kind, self.current.text
            )))
        }
    }

    /// Consume the current token if it has the given kind; return whether it
    /// was consumed.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Result<bool, ParseError> {
        if self.at(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // ── Error construction ─────────────────────────────────────────────

    /// Build a parse error at the current token. Recoverable while a
    /// speculative production is being attempted, fatal otherwise.
    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            span: self.current.span,
            recoverable: self.speculating,
        }
    }

    /// Build a fatal parse error at an explicit span, ignoring speculation.
    pub(crate) fn fatal_at(&self, message: impl Into<String>, span: Span) -> ParseError {
        ParseError::new(message, span)
    }

    // ── Speculation ────────────────────────────────────────────────────

    /// Attempt a production under a state snapshot.
    ///
    /// On success the result is returned and the snapshot is dropped. On a
    /// recoverable error the snapshot is restored and `None` is returned so
    /// the caller can dispatch the alternative production. Fatal errors
    /// propagate untouched.
    pub(crate) fn speculative<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        let checkpoint = self.checkpoint();
        let was_speculating = std::mem::replace(&mut self.speculating, true);
        let result = f(self);
        self.speculating = was_speculating;
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.recoverable => {
                self.restore(checkpoint);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Make subsequent errors fatal for the remainder of the innermost
    /// speculative attempt: enough structure has been seen that no
    /// alternative production can apply.
    pub(crate) fn commit(&mut self) {
        self.speculating = false;
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            lexer: self.lexer.snapshot(),
            current: self.current.clone(),
            pushback: self.pushback.clone(),
            template_depth: self.template_depth,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.lexer.restore(checkpoint.lexer);
        self.current = checkpoint.current;
        self.pushback = checkpoint.pushback;
        self.template_depth = checkpoint.template_depth;
    }

    // ── Template mode ──────────────────────────────────────────────────

    /// Enter a template argument/parameter list.
    pub(crate) fn push_template(&mut self) {
        self.template_depth += 1;
    }

    /// Leave a template argument/parameter list.
    pub(crate) fn pop_template(&mut self) {
        debug_assert!(self.template_depth > 0, "unbalanced template frame");
        self.template_depth = self.template_depth.saturating_sub(1);
    }

    /// Whether the parser is currently inside a template list, where a lone
    /// `>` terminates the list rather than comparing.
    pub(crate) fn in_template(&self) -> bool {
        self.template_depth > 0
    }

    // ── Shared small productions ───────────────────────────────────────

    /// Parse an identifier and return its text.
    pub(crate) fn name(&mut self) -> Result<String, ParseError> {
        Ok(self.expect(TokenKind::Ident)?.text)
    }
}
