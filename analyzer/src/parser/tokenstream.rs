use crate::Span;
use crate::lexer::{Token, TokenKind, TokenRange, tokens_in_span};

/// Parser-side cursor over the non-trivia tokens of a source string.
///
/// The token vector always ends with an EOF token; `pos` never moves past it.
pub struct TokenCursor<'a> {
    pub source: &'a str,
    pub tokens: Vec<Token>,
    pub pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(source: &'a str, tokens: &[Token]) -> Self {
        TokenCursor {
            source,
            tokens: tokens.iter().filter(|t| !t.is_trivia()).cloned().collect(),
            pos: 0,
        }
    }
}

/// Read-only query helpers over a token slice.
///
/// This type centralizes "offset → token index → neighbor token scanning" in one place so
/// callers (notably the completion context classifier) don't duplicate index arithmetic or
/// trivia-skipping loops.
///
/// # Index & range semantics
/// - All indices returned by this API are **token indices** into the underlying slice.
/// - All ranges follow Rust's standard **half-open** convention: `[lo, hi)`.
/// - Methods that take an `idx: usize` treat it as a **boundary index** in `[0, tokens.len()]`.
///   Passing an out-of-bounds value is treated as if it were `tokens.len()`.
///
/// # Trivia policy
/// - `Token::is_trivia()` is the sole definition of trivia here (comments today).
/// - EOF (`TokenKind::Eof`) is **not** trivia.
#[derive(Debug, Clone, Copy)]
pub struct TokenQuery<'a> {
    tokens: &'a [Token],
}

impl<'a> TokenQuery<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens }
    }

    pub fn token(&self, idx: usize) -> Option<&'a Token> {
        self.tokens.get(idx)
    }

    /// Returns the index range of all tokens whose span intersects `span`.
    pub fn range_for_span(&self, span: Span) -> TokenRange {
        tokens_in_span(self.tokens, span)
    }

    /// Boundary index of `offset`: the first token starting at or after it.
    pub fn boundary_at(&self, offset: u32) -> usize {
        self.tokens.partition_point(|t| t.span.start < offset)
    }

    /// Returns the nearest non-trivia token index strictly **before** `idx`.
    pub fn prev_nontrivia(&self, idx: usize) -> Option<usize> {
        let idx = idx.min(self.tokens.len());
        (0..idx).rev().find(|&i| !self.tokens[i].is_trivia())
    }

    /// Returns the nearest non-trivia token index at or **after** `idx`.
    pub fn next_nontrivia(&self, idx: usize) -> Option<usize> {
        let idx = idx.min(self.tokens.len());
        (idx..self.tokens.len()).find(|&i| !self.tokens[i].is_trivia())
    }

    /// The last non-trivia token that ends at or before `offset`.
    pub fn prev_nontrivia_before(&self, offset: u32) -> Option<&'a Token> {
        let idx = self.tokens.partition_point(|t| t.span.end <= offset);
        self.prev_nontrivia(idx).map(|i| &self.tokens[i])
    }

    /// The first non-trivia token that starts at or after `offset`.
    pub fn next_nontrivia_after(&self, offset: u32) -> Option<&'a Token> {
        self.next_nontrivia(self.boundary_at(offset))
            .map(|i| &self.tokens[i])
    }

    /// Scans backward from `offset` for the nearest non-trivia token matching `pred`.
    ///
    /// The scan stops at `floor`: tokens starting before it are not considered.
    pub fn nearest_before(
        &self,
        offset: u32,
        floor: u32,
        pred: impl Fn(&TokenKind) -> bool,
    ) -> Option<&'a Token> {
        let idx = self.tokens.partition_point(|t| t.span.end <= offset);
        self.tokens[..idx]
            .iter()
            .rev()
            .take_while(|t| t.span.start >= floor)
            .filter(|t| !t.is_trivia())
            .find(|t| pred(&t.kind))
    }

    /// Scans forward from `offset` for the nearest non-trivia token matching `pred`.
    ///
    /// The scan stops at `ceiling`: tokens ending after it are not considered.
    pub fn nearest_after(
        &self,
        offset: u32,
        ceiling: u32,
        pred: impl Fn(&TokenKind) -> bool,
    ) -> Option<&'a Token> {
        let idx = self.boundary_at(offset);
        self.tokens[idx..]
            .iter()
            .take_while(|t| t.span.end <= ceiling && t.kind != TokenKind::Eof)
            .filter(|t| !t.is_trivia())
            .find(|t| pred(&t.kind))
    }

    /// The token whose span strictly contains `offset`, if any.
    pub fn token_containing(&self, offset: u32) -> Option<&'a Token> {
        let idx = self.tokens.partition_point(|t| t.span.end <= offset);
        self.tokens
            .get(idx)
            .filter(|t| t.span.strictly_contains(offset))
    }
}
