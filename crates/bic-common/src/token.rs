use serde::Serialize;

use crate::span::Span;

/// A token produced by the Bic lexer.
///
/// Tokens own their lexeme text: the translator pastes lexemes straight into
/// the generated C++ output, so the text survives past the source buffer.
/// String and char literals carry their contents without the surrounding
/// quotes; escape pairs are copied verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Create a new token from a kind, lexeme text, and byte offsets.
    pub fn new(kind: TokenKind, text: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            span: Span::new(start, end),
        }
    }
}

/// Every kind of token in the Bic language.
///
/// Covers all keywords, the collapsed primitive-type kind, literal forms,
/// single-character punctuators, two-character composite operators, the
/// ellipsis, raw C++ pass-through literals, and the end-of-input sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // ── Keywords (24) ──────────────────────────────────────────────────
    Let,
    Mut,
    Ret,
    If,
    Elif,
    Else,
    While,
    For,
    In,
    Break,
    Continue,
    Class,
    Pub,
    Priv,
    Static,
    Virtual,
    New,
    Del,
    Null,
    Operator,
    Enum,
    Import,
    Const,
    /// The `type` keyword (type aliases and `T : type` template parameters).
    TypeKw,

    /// Primitive type name (`int`, `float`, `bool`, `char`, `void`,
    /// `double`); the spelling lives in the token text.
    Type,

    // ── Literals (5) ───────────────────────────────────────────────────
    IntLiteral,
    FloatLiteral,
    /// String contents without the surrounding double quotes.
    StringLiteral,
    /// Char contents without the surrounding single quotes.
    CharLiteral,
    /// `true` or `false`.
    BoolLiteral,

    /// Regular identifier.
    Ident,
    /// Raw C++ line introduced by `//:`; the text is everything after the
    /// colon, verbatim.
    CppLit,

    // ── Two-character operators (22) ───────────────────────────────────
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    StarEq,
    /// `/=`
    SlashEq,
    /// `%=`
    PercentEq,
    /// `&=`
    AmpEq,
    /// `|=`
    PipeEq,
    /// `^=`
    CaretEq,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `->`
    Arrow,
    /// `::`
    ColonColon,
    /// `/*`
    BlockCommentStart,
    /// `*/`
    BlockCommentEnd,

    /// `...`
    DotDotDot,

    // ── Single-character punctuators ───────────────────────────────────
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `!`
    Bang,
    /// `?`
    Question,
    /// `~`
    Tilde,
    /// `^`
    Caret,
    /// `#`
    Hash,
    /// `@`
    At,
    /// `$`
    Dollar,
    /// `` ` ``
    Backtick,
    /// `\`
    Backslash,

    /// End of file.
    Eof,
}

/// Look up a keyword from its string representation.
///
/// Returns `Some(TokenKind)` if the string is a Bic keyword, `None`
/// otherwise. The lexer calls this after scanning an identifier-shaped
/// lexeme, after the boolean and primitive-type tables have been consulted.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    match s {
        "let" => Some(TokenKind::Let),
        "mut" => Some(TokenKind::Mut),
        "ret" => Some(TokenKind::Ret),
        "if" => Some(TokenKind::If),
        "elif" => Some(TokenKind::Elif),
        "else" => Some(TokenKind::Else),
        "while" => Some(TokenKind::While),
        "for" => Some(TokenKind::For),
        "in" => Some(TokenKind::In),
        "break" => Some(TokenKind::Break),
        "continue" => Some(TokenKind::Continue),
        "class" => Some(TokenKind::Class),
        "pub" => Some(TokenKind::Pub),
        "priv" => Some(TokenKind::Priv),
        "static" => Some(TokenKind::Static),
        "virtual" => Some(TokenKind::Virtual),
        "new" => Some(TokenKind::New),
        "del" => Some(TokenKind::Del),
        "null" => Some(TokenKind::Null),
        "operator" => Some(TokenKind::Operator),
        "enum" => Some(TokenKind::Enum),
        "import" => Some(TokenKind::Import),
        "const" => Some(TokenKind::Const),
        "type" => Some(TokenKind::TypeKw),
        _ => None,
    }
}

/// Whether the string names a primitive target-language type.
///
/// Primitive type names lex as a single [`TokenKind::Type`] kind; the
/// concrete spelling travels in the token text.
pub fn is_primitive_type(s: &str) -> bool {
    matches!(s, "int" | "float" | "bool" | "char" | "void" | "double")
}
