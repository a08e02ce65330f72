//! Lexer tokens.
//!
//! [`Span`] uses UTF-8 byte offsets into the original source and is half-open `[start, end)`.
//! The lexer also emits a [`TokenKind::Eof`] token with an empty span at end of input.

use crate::Span;

pub type TokenIdx = u32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub text: String,
}

impl Symbol {
    pub fn new(text: impl Into<String>) -> Symbol {
        Symbol { text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Half-open range of token indices: `[lo, hi)`.
pub struct TokenRange {
    pub lo: TokenIdx,
    pub hi: TokenIdx,
}

impl TokenRange {
    /// Construct a token range `[lo, hi)`.
    pub fn new(lo: TokenIdx, hi: TokenIdx) -> Self {
        Self { lo, hi }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Long,
    Float,
    Double,
    Char,
    String,
    Bool,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lit {
    pub kind: LitKind,
    pub symbol: Symbol,
}

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        /// Reserved words of the host language (literal words `true`, `false`, `null` are
        /// lexed as [`TokenKind::Literal`]).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }

            pub fn from_ident(text: &str) -> Option<Keyword> {
                match text {
                    $($text => Some(Keyword::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

keywords! {
    Abstract => "abstract",
    Assert => "assert",
    Boolean => "boolean",
    Break => "break",
    Byte => "byte",
    Case => "case",
    Catch => "catch",
    Char => "char",
    Class => "class",
    Const => "const",
    Continue => "continue",
    Default => "default",
    Do => "do",
    Double => "double",
    Else => "else",
    Enum => "enum",
    Extends => "extends",
    Final => "final",
    Finally => "finally",
    Float => "float",
    For => "for",
    Goto => "goto",
    If => "if",
    Implements => "implements",
    Import => "import",
    Instanceof => "instanceof",
    Int => "int",
    Interface => "interface",
    Long => "long",
    Native => "native",
    New => "new",
    Package => "package",
    Private => "private",
    Protected => "protected",
    Public => "public",
    Return => "return",
    Short => "short",
    Static => "static",
    Strictfp => "strictfp",
    Super => "super",
    Switch => "switch",
    Synchronized => "synchronized",
    This => "this",
    Throw => "throw",
    Throws => "throws",
    Transient => "transient",
    Try => "try",
    Void => "void",
    Volatile => "volatile",
    While => "while",
}

impl Keyword {
    /// Keywords naming a primitive type (including `void`).
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            Keyword::Boolean
                | Keyword::Byte
                | Keyword::Char
                | Keyword::Short
                | Keyword::Int
                | Keyword::Long
                | Keyword::Float
                | Keyword::Double
                | Keyword::Void
        )
    }

    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Keyword::Public
                | Keyword::Protected
                | Keyword::Private
                | Keyword::Static
                | Keyword::Final
                | Keyword::Abstract
                | Keyword::Native
                | Keyword::Synchronized
                | Keyword::Transient
                | Keyword::Volatile
                | Keyword::Strictfp
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /* Operators */
    /// `=`
    Eq,
    /// `==`
    EqEq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>` (shift operators are formed by the parser from adjacent `>` tokens)
    Gt,
    /// `>=`
    Ge,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Bang,
    /// `~`
    Tilde,
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
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `<<`
    Shl,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
    /// `+=`, `-=`, `*=`, `/=`, `%=`, `&=`, `|=`, `^=` (the operator text is kept)
    CompoundAssign(Symbol),
    /// `->`
    Arrow,

    /* Structural symbols */
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `;`
    Semi,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `:`
    Colon,
    /// `::`
    ColonColon,
    /// `?`
    Question,
    /// `@`
    At,

    /* Words and literals */
    Keyword(Keyword),
    Ident(Symbol),
    Literal(Lit),

    /* Trivia */
    LineComment(Symbol),
    BlockComment(Symbol),

    /// A character the lexer does not understand.
    Unknown,
    /// End Of File
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A token with its source span.
///
/// `span` is a byte offset range into the original source (`[start, end)`).
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn can_begin_expr(&self) -> bool {
        match &self.kind {
            TokenKind::Ident(..)
            | TokenKind::Literal(..)
            | TokenKind::OpenParen
            | TokenKind::Bang
            | TokenKind::Tilde
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus => true,
            TokenKind::Keyword(kw) => {
                matches!(kw, Keyword::This | Keyword::Super | Keyword::New)
                    || kw.is_primitive_type()
            }
            _ => false,
        }
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind == TokenKind::Keyword(kw)
    }

    pub fn ident_text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(symbol) => Some(symbol.text.as_str()),
            _ => None,
        }
    }
}

impl TokenKind {
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::LineComment(_) | TokenKind::BlockComment(_))
    }

    /// Delimiters that bound a structural region (used by caret-position scanning).
    pub fn is_structural_delimiter(&self) -> bool {
        matches!(
            self,
            TokenKind::OpenParen
                | TokenKind::CloseParen
                | TokenKind::OpenBrace
                | TokenKind::CloseBrace
                | TokenKind::Semi
                | TokenKind::Colon
        )
    }
}

/// Returns the token-index range `[lo, hi)` covered by `span`.
///
/// For non-empty spans, this returns the tokens whose spans intersect `span`.
/// For empty spans (`start >= end`), this returns a stable insertion point `i..i`
/// (the first token with `token.span.start >= start`), which may be the EOF token.
pub fn tokens_in_span(tokens: &[Token], span: Span) -> TokenRange {
    if tokens.is_empty() {
        return TokenRange::new(0, 0);
    }

    let start = span.start;
    let end = span.end;
    if start >= end {
        let idx = lower_bound_by_start(tokens, start);
        return TokenRange::new(idx, idx);
    }

    let lo = lower_bound_by_end(tokens, start);
    let hi = lower_bound_by_start(tokens, end);
    TokenRange::new(lo, hi)
}

fn lower_bound_by_end(tokens: &[Token], start: u32) -> u32 {
    // First token with `token.span.end > start`.
    tokens.partition_point(|t| t.span.end <= start) as u32
}

fn lower_bound_by_start(tokens: &[Token], end: u32) -> u32 {
    // First token with `token.span.start >= end`.
    tokens.partition_point(|t| t.span.start < end) as u32
}
