// Bic lexer -- tokenizer for the Bic surface language.

mod cursor;

use bic_common::error::{LexError, LexErrorKind};
use bic_common::span::Span;
use bic_common::token::{is_primitive_type, keyword_from_str, Token, TokenKind};
use cursor::Cursor;

/// The Bic lexer. Converts source text into a stream of tokens on demand.
///
/// The parser pulls tokens one at a time with [`Lexer::next_token`]. The
/// lexer also supports a single-token [`Lexer::peek_token`] and a full
/// snapshot/restore of its state, which the parser's speculative
/// backtracking relies on.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
}

/// An opaque snapshot of the lexer state.
///
/// Captures everything needed to resume tokenization from an earlier point;
/// obtained from [`Lexer::snapshot`] and consumed by [`Lexer::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerState {
    pos: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
        }
    }

    /// Convenience: tokenize the entire source into a `Vec<Token>`.
    ///
    /// The returned vector includes the final `Eof` token. Stops at the
    /// first lexer error.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Capture the current lexer state.
    pub fn snapshot(&self) -> LexerState {
        LexerState {
            pos: self.cursor.pos(),
        }
    }

    /// Restore a previously captured lexer state.
    pub fn restore(&mut self, state: LexerState) {
        self.cursor.rewind(state.pos);
    }

    /// Return the next token without consuming it.
    pub fn peek_token(&mut self) -> Result<Token, LexError> {
        let state = self.snapshot();
        let token = self.next_token();
        self.restore(state);
        token
    }

    /// Advance past whitespace and comments and return the next token, or
    /// the `Eof` sentinel at end of input.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            self.cursor.eat_while(char::is_whitespace);

            let start = self.cursor.pos();

            let Some(c) = self.cursor.peek() else {
                return Ok(Token::new(TokenKind::Eof, "", start, start));
            };

            return match c {
                // ── Number literals ─────────────────────────────────────
                '0'..='9' => Ok(self.lex_number(start)),

                // ── Identifiers, keywords, primitive types ──────────────
                c if is_ident_start(c) => Ok(self.lex_ident(start)),

                // ── String and char literals ────────────────────────────
                '"' => self.lex_string(start),
                '\'' => self.lex_char(start),

                // ── Multi-character operators ───────────────────────────
                '=' => Ok(self.lex_eq(start)),
                '!' => Ok(self.lex_bang(start)),
                '<' => Ok(self.lex_lt(start)),
                '>' => Ok(self.lex_gt(start)),
                '&' => Ok(self.lex_amp(start)),
                '|' => Ok(self.lex_pipe(start)),
                '+' => Ok(self.lex_plus(start)),
                '-' => Ok(self.lex_minus(start)),
                '*' => Ok(self.lex_star(start)),
                '/' => match self.lex_slash(start) {
                    Some(token) => Ok(token),
                    // Line comment was discarded; keep scanning.
                    None => continue,
                },
                '%' => Ok(self.lex_percent(start)),
                '^' => Ok(self.lex_caret(start)),
                ':' => Ok(self.lex_colon(start)),
                '.' => Ok(self.lex_dot(start)),

                // ── Single-character punctuators ────────────────────────
                '(' => Ok(self.single_char_token(TokenKind::LParen, start)),
                ')' => Ok(self.single_char_token(TokenKind::RParen, start)),
                '{' => Ok(self.single_char_token(TokenKind::LBrace, start)),
                '}' => Ok(self.single_char_token(TokenKind::RBrace, start)),
                '[' => Ok(self.single_char_token(TokenKind::LBracket, start)),
                ']' => Ok(self.single_char_token(TokenKind::RBracket, start)),
                ',' => Ok(self.single_char_token(TokenKind::Comma, start)),
                ';' => Ok(self.single_char_token(TokenKind::Semicolon, start)),
                '?' => Ok(self.single_char_token(TokenKind::Question, start)),
                '~' => Ok(self.single_char_token(TokenKind::Tilde, start)),
                '#' => Ok(self.single_char_token(TokenKind::Hash, start)),
                '@' => Ok(self.single_char_token(TokenKind::At, start)),
                '$' => Ok(self.single_char_token(TokenKind::Dollar, start)),
                '`' => Ok(self.single_char_token(TokenKind::Backtick, start)),
                '\\' => Ok(self.single_char_token(TokenKind::Backslash, start)),

                // ── Unknown character ───────────────────────────────────
                _ => {
                    self.cursor.advance();
                    Err(LexError::new(
                        LexErrorKind::UnexpectedCharacter(c),
                        Span::new(start, self.cursor.pos()),
                    ))
                }
            };
        }
    }

    // ── Helpers ────────────────────────────────────────────────────────

    /// Consume one character and return a token of the given kind.
    fn single_char_token(&mut self, kind: TokenKind, start: u32) -> Token {
        self.cursor.advance();
        self.token(kind, start)
    }

    /// Build a token whose text is the source slice from `start` to the
    /// current position.
    fn token(&self, kind: TokenKind, start: u32) -> Token {
        let end = self.cursor.pos();
        Token::new(kind, self.cursor.slice(start, end), start, end)
    }

    // ── Operator lexing ────────────────────────────────────────────────

    /// `==` -> `EqEq`, `=` -> `Eq`
    fn lex_eq(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '='
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            self.token(TokenKind::EqEq, start)
        } else {
            self.token(TokenKind::Eq, start)
        }
    }

    /// `!=` -> `NotEq`, `!` -> `Bang`
    fn lex_bang(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '!'
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            self.token(TokenKind::NotEq, start)
        } else {
            self.token(TokenKind::Bang, start)
        }
    }

    /// `<=` -> `LtEq`, `<<` -> `Shl`, `<` -> `Lt`
    fn lex_lt(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '<'
        match self.cursor.peek() {
            Some('=') => {
                self.cursor.advance();
                self.token(TokenKind::LtEq, start)
            }
            Some('<') => {
                self.cursor.advance();
                self.token(TokenKind::Shl, start)
            }
            _ => self.token(TokenKind::Lt, start),
        }
    }

    /// `>=` -> `GtEq`, `>>` -> `Shr`, `>` -> `Gt`
    fn lex_gt(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '>'
        match self.cursor.peek() {
            Some('=') => {
                self.cursor.advance();
                self.token(TokenKind::GtEq, start)
            }
            Some('>') => {
                self.cursor.advance();
                self.token(TokenKind::Shr, start)
            }
            _ => self.token(TokenKind::Gt, start),
        }
    }

    /// `&&` -> `AmpAmp`, `&=` -> `AmpEq`, `&` -> `Amp`
    fn lex_amp(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '&'
        match self.cursor.peek() {
            Some('&') => {
                self.cursor.advance();
                self.token(TokenKind::AmpAmp, start)
            }
            Some('=') => {
                self.cursor.advance();
                self.token(TokenKind::AmpEq, start)
            }
            _ => self.token(TokenKind::Amp, start),
        }
    }

    /// `||` -> `PipePipe`, `|=` -> `PipeEq`, `|` -> `Pipe`
    fn lex_pipe(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '|'
        match self.cursor.peek() {
            Some('|') => {
                self.cursor.advance();
                self.token(TokenKind::PipePipe, start)
            }
            Some('=') => {
                self.cursor.advance();
                self.token(TokenKind::PipeEq, start)
            }
            _ => self.token(TokenKind::Pipe, start),
        }
    }

    /// `++` -> `PlusPlus`, `+=` -> `PlusEq`, `+` -> `Plus`
    fn lex_plus(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '+'
        match self.cursor.peek() {
            Some('+') => {
                self.cursor.advance();
                self.token(TokenKind::PlusPlus, start)
            }
            Some('=') => {
                self.cursor.advance();
                self.token(TokenKind::PlusEq, start)
            }
            _ => self.token(TokenKind::Plus, start),
        }
    }

    /// `--` -> `MinusMinus`, `-=` -> `MinusEq`, `->` -> `Arrow`, `-` -> `Minus`
    fn lex_minus(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '-'
        match self.cursor.peek() {
            Some('-') => {
                self.cursor.advance();
                self.token(TokenKind::MinusMinus, start)
            }
            Some('=') => {
                self.cursor.advance();
                self.token(TokenKind::MinusEq, start)
            }
            Some('>') => {
                self.cursor.advance();
                self.token(TokenKind::Arrow, start)
            }
            _ => self.token(TokenKind::Minus, start),
        }
    }

    /// `*=` -> `StarEq`, `*/` -> `BlockCommentEnd`, `*` -> `Star`
    fn lex_star(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '*'
        match self.cursor.peek() {
            Some('=') => {
                self.cursor.advance();
                self.token(TokenKind::StarEq, start)
            }
            Some('/') => {
                self.cursor.advance();
                self.token(TokenKind::BlockCommentEnd, start)
            }
            _ => self.token(TokenKind::Star, start),
        }
    }

    /// `//` opens a line comment (`//:` a raw C++ literal), `/=` -> `SlashEq`,
    /// `/*` -> `BlockCommentStart`, `/` -> `Slash`.
    ///
    /// Returns `None` when a plain comment was discarded, so the caller
    /// resumes scanning. Division vs. comment disambiguation is the greedy
    /// two-character match.
    fn lex_slash(&mut self, start: u32) -> Option<Token> {
        self.cursor.advance(); // consume '/'
        match self.cursor.peek() {
            Some('/') => {
                self.cursor.advance(); // consume second '/'
                if self.cursor.peek() == Some(':') {
                    // Raw C++ literal: everything after `//:` to end of line,
                    // verbatim.
                    self.cursor.advance(); // consume ':'
                    let content_start = self.cursor.pos();
                    self.cursor.eat_while(|c| c != '\n');
                    let end = self.cursor.pos();
                    Some(Token::new(
                        TokenKind::CppLit,
                        self.cursor.slice(content_start, end),
                        start,
                        end,
                    ))
                } else {
                    // Ordinary comment: discard to end of line.
                    self.cursor.eat_while(|c| c != '\n');
                    None
                }
            }
            Some('=') => {
                self.cursor.advance();
                Some(self.token(TokenKind::SlashEq, start))
            }
            Some('*') => {
                self.cursor.advance();
                Some(self.token(TokenKind::BlockCommentStart, start))
            }
            _ => Some(self.token(TokenKind::Slash, start)),
        }
    }

    /// `%=` -> `PercentEq`, `%` -> `Percent`
    fn lex_percent(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '%'
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            self.token(TokenKind::PercentEq, start)
        } else {
            self.token(TokenKind::Percent, start)
        }
    }

    /// `^=` -> `CaretEq`, `^` -> `Caret`
    fn lex_caret(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '^'
        if self.cursor.peek() == Some('=') {
            self.cursor.advance();
            self.token(TokenKind::CaretEq, start)
        } else {
            self.token(TokenKind::Caret, start)
        }
    }

    /// `::` -> `ColonColon`, `:` -> `Colon`
    fn lex_colon(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume ':'
        if self.cursor.peek() == Some(':') {
            self.cursor.advance();
            self.token(TokenKind::ColonColon, start)
        } else {
            self.token(TokenKind::Colon, start)
        }
    }

    /// `...` -> `DotDotDot`, `.` -> `Dot`
    fn lex_dot(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume '.'
        if self.cursor.peek() == Some('.') && self.cursor.peek_next() == Some('.') {
            self.cursor.advance();
            self.cursor.advance();
            self.token(TokenKind::DotDotDot, start)
        } else {
            self.token(TokenKind::Dot, start)
        }
    }

    // ── Number literals ───────────────────────────────────────────────

    /// Lex a number literal starting with a digit.
    ///
    /// A `.` followed by another digit promotes the literal to a float, so
    /// `a[3].b` still lexes `3` as an integer.
    fn lex_number(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume first digit
        self.cursor.eat_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance(); // consume '.'
            self.cursor.eat_while(|c| c.is_ascii_digit());
            return self.token(TokenKind::FloatLiteral, start);
        }

        self.token(TokenKind::IntLiteral, start)
    }

    // ── String and char literals ──────────────────────────────────────

    /// Lex a double-quoted string literal.
    ///
    /// The token text is the contents without the quotes. A backslash
    /// introduces a two-character escape copied verbatim into the value.
    fn lex_string(&mut self, start: u32) -> Result<Token, LexError> {
        self.cursor.advance(); // consume opening '"'
        let content_start = self.cursor.pos();

        loop {
            match self.cursor.peek() {
                None => {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedString,
                        Span::new(start, self.cursor.pos()),
                    ))
                }
                Some('"') => {
                    let content_end = self.cursor.pos();
                    self.cursor.advance(); // consume closing '"'
                    return Ok(Token::new(
                        TokenKind::StringLiteral,
                        self.cursor.slice(content_start, content_end),
                        start,
                        self.cursor.pos(),
                    ));
                }
                Some('\\') => {
                    self.cursor.advance(); // consume '\'
                    if self.cursor.advance().is_none() {
                        return Err(LexError::new(
                            LexErrorKind::UnterminatedString,
                            Span::new(start, self.cursor.pos()),
                        ));
                    }
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    /// Lex a single-quoted character literal, with the same escape rule as
    /// strings.
    fn lex_char(&mut self, start: u32) -> Result<Token, LexError> {
        self.cursor.advance(); // consume opening '\''
        let content_start = self.cursor.pos();

        loop {
            match self.cursor.peek() {
                None => {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedChar,
                        Span::new(start, self.cursor.pos()),
                    ))
                }
                Some('\'') => {
                    let content_end = self.cursor.pos();
                    self.cursor.advance(); // consume closing '\''
                    return Ok(Token::new(
                        TokenKind::CharLiteral,
                        self.cursor.slice(content_start, content_end),
                        start,
                        self.cursor.pos(),
                    ));
                }
                Some('\\') => {
                    self.cursor.advance(); // consume '\'
                    if self.cursor.advance().is_none() {
                        return Err(LexError::new(
                            LexErrorKind::UnterminatedChar,
                            Span::new(start, self.cursor.pos()),
                        ));
                    }
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    // ── Identifiers and keywords ──────────────────────────────────────

    /// Lex an identifier, keyword, boolean literal, or primitive type name.
    fn lex_ident(&mut self, start: u32) -> Token {
        self.cursor.advance(); // consume first char
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());

        let kind = if text == "true" || text == "false" {
            TokenKind::BoolLiteral
        } else if is_primitive_type(text) {
            TokenKind::Type
        } else {
            keyword_from_str(text).unwrap_or(TokenKind::Ident)
        };
        self.token(kind, start)
    }
}

/// Whether a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Whether a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source)
            .expect("tokenize should succeed")
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lex_var_decl() {
        assert_eq!(
            kinds("let x : int = 42;"),
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Type,
                TokenKind::Eq,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_float_promotion_requires_digit() {
        assert_eq!(
            kinds("3.14"),
            vec![TokenKind::FloatLiteral, TokenKind::Eof]
        );
        // `3.` followed by a non-digit stays an integer plus a dot.
        assert_eq!(
            kinds("a[3].b"),
            vec![
                TokenKind::Ident,
                TokenKind::LBracket,
                TokenKind::IntLiteral,
                TokenKind::RBracket,
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_string_contents_without_quotes() {
        let tokens = Lexer::tokenize(r#""hello \"world\"""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, r#"hello \"world\""#);
    }

    #[test]
    fn lex_char_literal() {
        let tokens = Lexer::tokenize(r"'\n'").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
        assert_eq!(tokens[0].text, r"\n");
    }

    #[test]
    fn lex_greedy_two_char_operators() {
        assert_eq!(
            kinds("a /= b / c"),
            vec![
                TokenKind::Ident,
                TokenKind::SlashEq,
                TokenKind::Ident,
                TokenKind::Slash,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("-> :: >> << ++"),
            vec![
                TokenKind::Arrow,
                TokenKind::ColonColon,
                TokenKind::Shr,
                TokenKind::Shl,
                TokenKind::PlusPlus,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_ellipsis() {
        assert_eq!(
            kinds("args..."),
            vec![TokenKind::Ident, TokenKind::DotDotDot, TokenKind::Eof]
        );
    }

    #[test]
    fn lex_comment_discarded() {
        assert_eq!(
            kinds("a // the rest is gone\nb"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn lex_cpp_literal() {
        let tokens = Lexer::tokenize("//: #define FOO 1\nx").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::CppLit);
        assert_eq!(tokens[0].text, " #define FOO 1");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
    }

    #[test]
    fn lex_primitives_and_booleans() {
        let tokens = Lexer::tokenize("void double true false").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Type);
        assert_eq!(tokens[0].text, "void");
        assert_eq!(tokens[1].kind, TokenKind::Type);
        assert_eq!(tokens[2].kind, TokenKind::BoolLiteral);
        assert_eq!(tokens[2].text, "true");
        assert_eq!(tokens[3].kind, TokenKind::BoolLiteral);
    }

    #[test]
    fn lex_unknown_character_errors() {
        let err = Lexer::tokenize("let £ = 1;").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('£'));
        assert_eq!(err.span.start, 4);
    }

    #[test]
    fn lex_unterminated_string_errors() {
        let err = Lexer::tokenize("\"abc").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new("let x");
        let peeked = lexer.peek_token().unwrap();
        let next = lexer.next_token().unwrap();
        assert_eq!(peeked, next);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Ident);
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut lexer = Lexer::new("a b c");
        lexer.next_token().unwrap();
        let state = lexer.snapshot();
        let b = lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        lexer.restore(state);
        assert_eq!(lexer.next_token().unwrap(), b);
    }
}
