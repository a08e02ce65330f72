//! Error-recovering parser for the host language.
//!
//! Inputs: a [`TokenCursor`] over the non-trivia lexer tokens plus an explicit EOF token.
//! Spans are UTF-8 byte offsets into the original source, with half-open semantics `[start, end)`.
//!
//! The parser never fails. Wherever an expression, statement, type or name is required but
//! absent, it emits a diagnostic and produces a [`SyntaxKind::Missing`] node with an empty
//! span at the current token start.

use crate::Span;
use crate::diagnostics::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::lexer::{Keyword, LitKind, Token, TokenKind, lex};
use crate::syntax::{Role, SyntaxKind, SyntaxNode};

mod expr;
mod items;
mod stmt;
mod tokenstream;
mod types;

pub use tokenstream::{TokenCursor, TokenQuery};

#[derive(Debug)]
pub struct ParseOutput {
    pub unit: SyntaxNode,
    pub diagnostics: Vec<Diagnostic>,
    /// All lexer tokens, trivia included.
    pub tokens: Vec<Token>,
}

#[derive(Debug)]
pub struct ExprOutput {
    pub expr: SyntaxNode,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn parse(source: &str) -> ParseOutput {
    let lexed = lex(source);
    let mut parser = Parser::new(TokenCursor::new(source, &lexed.tokens));
    parser.diagnostics = lexed.diagnostics;
    let unit = parser.parse_compilation_unit();

    tracing::trace!(
        diagnostics = parser.diagnostics.len(),
        members = unit.children.len(),
        "parsed compilation unit"
    );

    ParseOutput {
        unit,
        diagnostics: parser.diagnostics.diags,
        tokens: lexed.tokens,
    }
}

/// Parses a standalone expression (used to type snippets).
pub fn parse_expression(source: &str) -> ExprOutput {
    let lexed = lex(source);
    let mut parser = Parser::new(TokenCursor::new(source, &lexed.tokens));
    parser.diagnostics = lexed.diagnostics;
    let expr = parser.parse_expr_or_missing(Role::None, "expression");
    if !parser.at(&TokenKind::Eof) {
        let tok = parser.cur().clone();
        parser.emit_unexpected("end of input", &tok);
    }
    ExprOutput {
        expr,
        diagnostics: parser.diagnostics.diags,
    }
}

pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    diagnostics: Diagnostics,
}

/// Parser position plus diagnostic count, for speculative parsing.
#[derive(Clone, Copy)]
struct Checkpoint {
    pos: usize,
    diags: usize,
}

impl<'a> Parser<'a> {
    pub fn new(cursor: TokenCursor<'a>) -> Self {
        Parser {
            cursor,
            diagnostics: Diagnostics::default(),
        }
    }

    fn cur(&self) -> &Token {
        self.nth(0)
    }

    /// The `n`-th token after the cursor, clamped to EOF.
    fn nth(&self, n: usize) -> &Token {
        let last = self.cursor.tokens.len() - 1;
        &self.cursor.tokens[(self.cursor.pos + n).min(last)]
    }

    fn bump(&mut self) -> Token {
        let tok = self.cur().clone();
        if tok.kind != TokenKind::Eof {
            self.cursor.pos += 1;
        }
        tok
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.cur().kind == *kind
    }

    fn at_kw(&self, kw: Keyword) -> bool {
        self.cur().is_keyword(kw)
    }

    fn nth_is(&self, n: usize, kind: &TokenKind) -> bool {
        self.nth(n).kind == *kind
    }

    fn at_ident(&self) -> bool {
        matches!(self.cur().kind, TokenKind::Ident(_))
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_kw(&mut self, kw: Keyword) -> bool {
        if self.at_kw(kw) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consumes `kind` or reports it as expected. The cursor does not move on failure.
    fn expect(&mut self, kind: &TokenKind, expected: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        let tok = self.cur().clone();
        self.emit_unexpected(expected, &tok);
        false
    }

    fn start(&self) -> u32 {
        self.cur().span.start
    }

    fn last_end(&self) -> u32 {
        match self.cursor.pos.checked_sub(1) {
            Some(i) => self.cursor.tokens[i].span.end,
            None => self.start(),
        }
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(start, self.last_end().max(start))
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.cursor.pos,
            diags: self.diagnostics.len(),
        }
    }

    fn rewind(&mut self, cp: Checkpoint) {
        self.cursor.pos = cp.pos;
        self.diagnostics.truncate(cp.diags);
    }

    fn missing(&mut self, role: Role, what: &str) -> SyntaxNode {
        let tok = self.cur().clone();
        self.emit_unexpected(what, &tok);
        SyntaxNode::missing(role, tok.span.start)
    }

    fn emit_unexpected(&mut self, expected: &str, found: &Token) {
        let found_text = describe_token(&found.kind);
        self.diagnostics.emit(
            DiagnosticCode::Parse,
            found.span,
            format!("expected {expected}, found {found_text}"),
        );
    }

    fn ident(&mut self, role: Role) -> SyntaxNode {
        match &self.cur().kind {
            TokenKind::Ident(sym) => {
                let text = sym.text.clone();
                let tok = self.bump();
                SyntaxNode::new(SyntaxKind::SimpleName, tok.span)
                    .with_text(text)
                    .in_role(role)
            }
            _ => self.missing(role, "identifier"),
        }
    }

    /// `a.b.c` as nested `QualifiedName`s.
    fn qualified_name(&mut self, role: Role) -> SyntaxNode {
        let start = self.start();
        let mut name = self.ident(Role::Name);
        while self.at(&TokenKind::Dot) && matches!(self.nth(1).kind, TokenKind::Ident(_)) {
            self.bump();
            let last = self.ident(Role::Name);
            name = SyntaxNode::new(SyntaxKind::QualifiedName, self.span_from(start))
                .with_children(vec![name.in_role(Role::Qualifier), last]);
        }
        name.in_role(role)
    }

    fn leaf(&mut self, kind: SyntaxKind, role: Role) -> SyntaxNode {
        let tok = self.bump();
        let text = &self.cursor.source[tok.span.start as usize..tok.span.end as usize];
        SyntaxNode::new(kind, tok.span)
            .with_text(text)
            .in_role(role)
    }

    /// Skips tokens until one satisfying `stop` (or EOF), reporting the first skipped token.
    fn recover_until(&mut self, what: &str, stop: impl Fn(&TokenKind) -> bool) {
        let tok = self.cur().clone();
        if stop(&tok.kind) || tok.kind == TokenKind::Eof {
            return;
        }
        self.emit_unexpected(what, &tok);
        while !stop(&self.cur().kind) && !self.at(&TokenKind::Eof) {
            self.bump();
        }
    }
}

fn describe_token(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(sym) => format!("identifier `{}`", sym.text),
        TokenKind::Keyword(kw) => format!("`{}`", kw.as_str()),
        TokenKind::Literal(lit) => match lit.kind {
            LitKind::String => "string literal".into(),
            LitKind::Char => "character literal".into(),
            _ => format!("`{}`", lit.symbol.text),
        },
        TokenKind::Eof => "end of input".into(),
        other => match token_spelling(other) {
            Some(spelling) => format!("`{spelling}`"),
            None => format!("{other:?}"),
        },
    }
}

fn token_spelling(kind: &TokenKind) -> Option<&'static str> {
    use TokenKind::*;
    Some(match kind {
        Eq => "=",
        EqEq => "==",
        Ne => "!=",
        Lt => "<",
        Le => "<=",
        Gt => ">",
        Ge => ">=",
        AndAnd => "&&",
        OrOr => "||",
        Bang => "!",
        Tilde => "~",
        Plus => "+",
        Minus => "-",
        Star => "*",
        Slash => "/",
        Percent => "%",
        Amp => "&",
        Pipe => "|",
        Caret => "^",
        Shl => "<<",
        PlusPlus => "++",
        MinusMinus => "--",
        Arrow => "->",
        OpenParen => "(",
        CloseParen => ")",
        OpenBrace => "{",
        CloseBrace => "}",
        OpenBracket => "[",
        CloseBracket => "]",
        Semi => ";",
        Comma => ",",
        Dot => ".",
        Ellipsis => "...",
        Colon => ":",
        ColonColon => "::",
        Question => "?",
        At => "@",
        _ => return None,
    })
}
