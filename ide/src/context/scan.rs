//! Token-level position scanning inside one syntax node.
//!
//! A node such as a method declaration covers several distinct caret positions (parameter
//! list, after the parameters, body). The scanner looks at the raw tokens between the node
//! start and the caret and reports the nearest delimiter; when none is found before the
//! node boundary the caller falls back to "no applicable pipeline".

use analyzer::syntax::SyntaxNode;
use analyzer::{Keyword, Token, TokenKind, TokenQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    Semi,
    Colon,
    Comma,
    Question,
    Eq,
    Arrow,
}

impl Delimiter {
    fn of(kind: &TokenKind) -> Option<Delimiter> {
        Some(match kind {
            TokenKind::OpenParen => Delimiter::OpenParen,
            TokenKind::CloseParen => Delimiter::CloseParen,
            TokenKind::OpenBrace => Delimiter::OpenBrace,
            TokenKind::CloseBrace => Delimiter::CloseBrace,
            TokenKind::OpenBracket => Delimiter::OpenBracket,
            TokenKind::Semi => Delimiter::Semi,
            TokenKind::Colon => Delimiter::Colon,
            TokenKind::Comma => Delimiter::Comma,
            TokenKind::Question => Delimiter::Question,
            TokenKind::Eq => Delimiter::Eq,
            TokenKind::Arrow => Delimiter::Arrow,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Scan<'a> {
    tokens: TokenQuery<'a>,
    caret: u32,
}

impl<'a> Scan<'a> {
    pub(crate) fn new(tokens: TokenQuery<'a>, caret: u32) -> Scan<'a> {
        Scan { tokens, caret }
    }

    pub(crate) fn caret(&self) -> u32 {
        self.caret
    }

    /// Nearest delimiter from `set` between the start of `node` and the caret.
    pub(crate) fn delimiter_before(
        &self,
        node: &SyntaxNode,
        set: &[Delimiter],
    ) -> Option<Delimiter> {
        self.tokens
            .nearest_before(self.caret, node.span.start, |kind| {
                Delimiter::of(kind).is_some_and(|d| set.contains(&d))
            })
            .and_then(|tok| Delimiter::of(&tok.kind))
    }

    /// Nearest of `keywords` between the start of `node` and the caret.
    pub(crate) fn keyword_before(&self, node: &SyntaxNode, keywords: &[Keyword]) -> Option<Keyword> {
        self.tokens
            .nearest_before(self.caret, node.span.start, |kind| {
                matches!(kind, TokenKind::Keyword(kw) if keywords.contains(kw))
            })
            .and_then(|tok| match tok.kind {
                TokenKind::Keyword(kw) => Some(kw),
                _ => None,
            })
    }

    /// Whether `keyword` occurs between `from` and the caret.
    pub(crate) fn keyword_between(&self, from: u32, keyword: Keyword) -> bool {
        self.tokens
            .nearest_before(self.caret, from, |kind| *kind == TokenKind::Keyword(keyword))
            .is_some()
    }

    /// Number of `;` between `from` and the caret.
    pub(crate) fn semicolons_since(&self, from: u32) -> usize {
        let mut count = 0;
        let mut offset = self.caret;
        while let Some(tok) = self
            .tokens
            .nearest_before(offset, from, |kind| *kind == TokenKind::Semi)
        {
            count += 1;
            offset = tok.span.start;
        }
        count
    }

    /// The first `(` at or after `from`, before the caret.
    pub(crate) fn open_paren_after(&self, from: u32) -> Option<&'a Token> {
        self.tokens
            .nearest_after(from, self.caret, |kind| *kind == TokenKind::OpenParen)
    }

    /// Index of the argument the caret is in: the commas at nesting depth one between the
    /// `(` at `open` and the caret.
    pub(crate) fn argument_index(&self, open: u32) -> usize {
        let mut depth = 0usize;
        let mut commas = 0;
        let mut idx = self.tokens.boundary_at(open);
        while let Some(tok) = self.tokens.token(idx) {
            if tok.span.start >= self.caret || tok.kind == TokenKind::Eof {
                break;
            }
            match tok.kind {
                TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseBrace => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::Comma if depth == 1 => commas += 1,
                _ => {}
            }
            idx += 1;
        }
        commas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analyzer::parse;
    use analyzer::syntax::Role;

    #[test]
    fn nearest_delimiter_wins() {
        let src = "class A { void m(int a, ) throws E {} }";
        let out = parse(src);
        let method = out.unit.child(Role::Member).and_then(|t| t.child(Role::Member)).unwrap();
        let set = [Delimiter::OpenParen, Delimiter::Comma, Delimiter::CloseParen];

        let after_comma = src.find(", )").unwrap() as u32 + 2;
        let scan = Scan::new(TokenQuery::new(&out.tokens), after_comma);
        assert_eq!(scan.delimiter_before(method, &set), Some(Delimiter::Comma));

        let after_throws = src.find("E {").unwrap() as u32;
        let scan = Scan::new(TokenQuery::new(&out.tokens), after_throws);
        assert_eq!(scan.delimiter_before(method, &set), Some(Delimiter::CloseParen));
        assert!(scan.keyword_between(method.span.start, Keyword::Throws));

        let before_name = src.find("m(").unwrap() as u32;
        let scan = Scan::new(TokenQuery::new(&out.tokens), before_name);
        assert_eq!(scan.delimiter_before(method, &set), None);
    }

    #[test]
    fn argument_index_skips_nested_commas() {
        let src = "f(a, g(b, c), )";
        let tokens = analyzer::lex(src).tokens;
        let caret = src.len() as u32 - 1;
        let scan = Scan::new(TokenQuery::new(&tokens), caret);
        assert_eq!(scan.argument_index(1), 2);
        let scan = Scan::new(TokenQuery::new(&tokens), 2);
        assert_eq!(scan.argument_index(1), 0);
    }

    #[test]
    fn counts_for_header_semicolons() {
        let src = "for (int i = 0; i < n; ) {}";
        let tokens = analyzer::lex(src).tokens;
        let scan = Scan::new(TokenQuery::new(&tokens), src.find(") {").unwrap() as u32);
        assert_eq!(scan.semicolons_since(0), 2);
        let scan = Scan::new(TokenQuery::new(&tokens), src.find("i <").unwrap() as u32);
        assert_eq!(scan.semicolons_since(0), 1);
    }
}
