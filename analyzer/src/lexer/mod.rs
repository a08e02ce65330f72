use crate::Span;
use crate::diagnostics::{DiagnosticCode, Diagnostics};

mod token;

pub use token::{
    Keyword, Lit, LitKind, Symbol, Token, TokenIdx, TokenKind, TokenRange, tokens_in_span,
};

pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Diagnostics,
}

/// Lex the input into tokens.
///
/// - Numbers: decimal and `0x` integers, with optional `L`/`f`/`d` suffix and a fraction.
/// - Strings and chars: quoted, with backslash escapes kept verbatim.
/// - Identifiers: ASCII letters, digits, `_`, `$` and any non-ASCII codepoint.
///
/// Lexing never stops early: an unexpected character becomes [`TokenKind::Unknown`].
pub fn lex(input: &str) -> LexOutput {
    let mut lexer = Lexer {
        input,
        bytes: input.as_bytes(),
        pos: 0,
        tokens: Vec::new(),
        diagnostics: Diagnostics::default(),
    };
    lexer.run();

    let len = input.len() as u32;
    lexer.tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::empty(len),
    });

    LexOutput {
        tokens: lexer.tokens,
        diagnostics: lexer.diagnostics,
    }
}

/// Longest-match table for operator and punctuation spellings.
const PUNCT: &[(&str, TokenKind)] = &[
    ("...", TokenKind::Ellipsis),
    ("<<", TokenKind::Shl),
    ("==", TokenKind::EqEq),
    ("!=", TokenKind::Ne),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
    ("&&", TokenKind::AndAnd),
    ("||", TokenKind::OrOr),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    ("->", TokenKind::Arrow),
    ("::", TokenKind::ColonColon),
    ("=", TokenKind::Eq),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("!", TokenKind::Bang),
    ("~", TokenKind::Tilde),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("&", TokenKind::Amp),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::Caret),
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    ("{", TokenKind::OpenBrace),
    ("}", TokenKind::CloseBrace),
    ("[", TokenKind::OpenBracket),
    ("]", TokenKind::CloseBracket),
    (";", TokenKind::Semi),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    (":", TokenKind::Colon),
    ("?", TokenKind::Question),
    ("@", TokenKind::At),
];

const COMPOUND_ASSIGN: &[&str] = &["+=", "-=", "*=", "/=", "%=", "&=", "|=", "^="];

struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
    diagnostics: Diagnostics,
}

impl<'a> Lexer<'a> {
    fn run(&mut self) {
        while let Some(ch) = self.peek_char() {
            let start = self.pos;

            if ch.is_whitespace() {
                self.pos += ch.len_utf8();
                continue;
            }

            if self.rest().starts_with("//") {
                let end = self.rest().find('\n').map_or(self.input.len(), |i| start + i);
                self.push(start, end, |text| {
                    TokenKind::LineComment(Symbol::new(&text[2..]))
                });
                continue;
            }

            if self.rest().starts_with("/*") {
                let end = match self.rest()[2..].find("*/") {
                    Some(i) => start + 2 + i + 2,
                    None => {
                        self.diagnostics.emit(
                            DiagnosticCode::Lex,
                            Span::new(start as u32, self.input.len() as u32),
                            "unterminated block comment",
                        );
                        self.input.len()
                    }
                };
                self.push(start, end, |text| {
                    let inner = text.strip_prefix("/*").unwrap_or(text);
                    TokenKind::BlockComment(Symbol::new(inner.strip_suffix("*/").unwrap_or(inner)))
                });
                continue;
            }

            if ch == '"' || ch == '\'' {
                self.quoted(ch);
                continue;
            }

            if ch.is_ascii_digit() || (ch == '.' && self.nth_byte(1).is_some_and(|b| b.is_ascii_digit()))
            {
                self.number();
                continue;
            }

            if is_ident_start(ch) {
                let mut end = start;
                for c in self.rest().chars() {
                    if !is_ident_continue(c) {
                        break;
                    }
                    end += c.len_utf8();
                }
                self.push(start, end, |text| match text {
                    "true" | "false" => TokenKind::Literal(Lit {
                        kind: LitKind::Bool,
                        symbol: Symbol::new(text),
                    }),
                    "null" => TokenKind::Literal(Lit {
                        kind: LitKind::Null,
                        symbol: Symbol::new(text),
                    }),
                    _ => match Keyword::from_ident(text) {
                        Some(kw) => TokenKind::Keyword(kw),
                        None => TokenKind::Ident(Symbol::new(text)),
                    },
                });
                continue;
            }

            if let Some(op) = COMPOUND_ASSIGN.iter().find(|op| self.rest().starts_with(**op)) {
                let end = start + op.len();
                self.push(start, end, |text| TokenKind::CompoundAssign(Symbol::new(text)));
                continue;
            }

            if let Some((spelling, kind)) =
                PUNCT.iter().find(|(spelling, _)| self.rest().starts_with(*spelling))
            {
                let end = start + spelling.len();
                self.push(start, end, |_| kind.clone());
                continue;
            }

            let end = start + ch.len_utf8();
            self.diagnostics.emit(
                DiagnosticCode::Lex,
                Span::new(start as u32, end as u32),
                format!("unexpected char '{ch}'"),
            );
            self.push(start, end, |_| TokenKind::Unknown);
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn nth_byte(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.pos + n).copied()
    }

    fn push(&mut self, start: usize, end: usize, make: impl FnOnce(&'a str) -> TokenKind) {
        let text = &self.input[start..end];
        self.tokens.push(Token {
            kind: make(text),
            span: Span::new(start as u32, end as u32),
        });
        self.pos = end;
    }

    fn quoted(&mut self, quote: char) {
        let start = self.pos;
        let mut end = None;
        let mut escaped = false;
        for (i, c) in self.rest().char_indices().skip(1) {
            if c == '\n' {
                break;
            }
            if escaped {
                escaped = false;
                continue;
            }
            if c == '\\' {
                escaped = true;
                continue;
            }
            if c == quote {
                end = Some(start + i + 1);
                break;
            }
        }

        let end = match end {
            Some(end) => end,
            None => {
                let line_end = self.rest().find('\n').map_or(self.input.len(), |i| start + i);
                self.diagnostics.emit(
                    DiagnosticCode::Lex,
                    Span::new(start as u32, line_end as u32),
                    if quote == '"' {
                        "unterminated string literal"
                    } else {
                        "unterminated character literal"
                    },
                );
                line_end
            }
        };

        let kind = if quote == '"' {
            LitKind::String
        } else {
            LitKind::Char
        };
        self.push(start, end, |text| {
            TokenKind::Literal(Lit {
                kind,
                symbol: Symbol::new(text),
            })
        });
    }

    fn number(&mut self) {
        let start = self.pos;
        let rest = self.rest();
        let mut end = 0usize;
        let mut kind = LitKind::Int;

        let bytes = rest.as_bytes();
        if rest.starts_with("0x") || rest.starts_with("0X") {
            end = 2;
            while end < bytes.len() && (bytes[end].is_ascii_hexdigit() || bytes[end] == b'_') {
                end += 1;
            }
        } else {
            while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'_') {
                end += 1;
            }
            if end < bytes.len()
                && bytes[end] == b'.'
                && bytes.get(end + 1).is_none_or(|b| b.is_ascii_digit())
            {
                kind = LitKind::Double;
                end += 1;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
            }
        }

        match bytes.get(end) {
            Some(b'L' | b'l') => {
                kind = LitKind::Long;
                end += 1;
            }
            Some(b'f' | b'F') => {
                kind = LitKind::Float;
                end += 1;
            }
            Some(b'd' | b'D') => {
                kind = LitKind::Double;
                end += 1;
            }
            _ => {}
        }

        self.push(start, start + end, |text| {
            TokenKind::Literal(Lit {
                kind,
                symbol: Symbol::new(text),
            })
        });
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_ascii_alphabetic() || c.len_utf8() > 1
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c == '$' || c.is_ascii_alphanumeric() || c.len_utf8() > 1
}
