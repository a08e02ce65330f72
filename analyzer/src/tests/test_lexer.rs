use crate::Span;
use crate::lexer::{Keyword, Lit, LitKind, Symbol, Token, TokenKind, lex};

fn tokens(input: &str) -> Vec<Token> {
    lex(input).tokens
}

fn kinds(input: &str) -> Vec<TokenKind> {
    tokens(input).into_iter().map(|t| t.kind).collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(Symbol::new(name))
}

fn lit(kind: LitKind, text: &str) -> TokenKind {
    TokenKind::Literal(Lit {
        kind,
        symbol: Symbol::new(text),
    })
}

#[test]
fn test_operators_longest_match() {
    let expected = vec![
        ident("a"),
        TokenKind::CompoundAssign(Symbol::new("+=")),
        ident("b"),
        TokenKind::Ge,
        ident("c"),
        TokenKind::AndAnd,
        TokenKind::Bang,
        ident("d"),
        TokenKind::Arrow,
        TokenKind::ColonColon,
        TokenKind::Ellipsis,
        TokenKind::Eof,
    ];
    assert_eq!(kinds("a += b >= c && !d -> :: ..."), expected);
}

#[test]
fn test_shift_right_is_split_into_gt_tokens() {
    assert_eq!(
        kinds("a >> b"),
        vec![ident("a"), TokenKind::Gt, TokenKind::Gt, ident("b"), TokenKind::Eof]
    );
}

#[test]
fn test_keywords_and_literal_words() {
    assert_eq!(
        kinds("class Foo extends true null"),
        vec![
            TokenKind::Keyword(Keyword::Class),
            ident("Foo"),
            TokenKind::Keyword(Keyword::Extends),
            lit(LitKind::Bool, "true"),
            lit(LitKind::Null, "null"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_number_suffixes() {
    assert_eq!(
        kinds("1 2L 3.5 4f 5d 0xFF"),
        vec![
            lit(LitKind::Int, "1"),
            lit(LitKind::Long, "2L"),
            lit(LitKind::Double, "3.5"),
            lit(LitKind::Float, "4f"),
            lit(LitKind::Double, "5d"),
            lit(LitKind::Int, "0xFF"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_string_and_char_literals_keep_quotes() {
    assert_eq!(
        kinds(r#""a\"b" 'c'"#),
        vec![
            lit(LitKind::String, r#""a\"b""#),
            lit(LitKind::Char, "'c'"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comments_are_trivia_tokens() {
    let toks = tokens("a // note\n/* block */ b");
    assert!(matches!(toks[1].kind, TokenKind::LineComment(ref s) if s.text == " note"));
    assert!(matches!(toks[2].kind, TokenKind::BlockComment(ref s) if s.text == " block "));
    assert!(toks[1].is_trivia() && toks[2].is_trivia());
    assert_eq!(toks[3].kind, ident("b"));
}

#[test]
fn test_spans_are_byte_offsets() {
    let toks = tokens("é.x");
    assert_eq!(toks[0].span, Span::new(0, 2));
    assert_eq!(toks[1].span, Span::new(2, 3));
    assert_eq!(toks[2].span, Span::new(3, 4));
    assert_eq!(toks[3].span, Span::empty(4));
}

#[test]
fn test_unterminated_string_is_reported() {
    let out = lex("\"abc\nx");
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.tokens[0].kind, lit(LitKind::String, "\"abc"));
    assert_eq!(out.tokens[1].kind, ident("x"));
}

#[test]
fn test_unknown_char_does_not_stop_lexing() {
    let out = lex("a # b");
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(
        out.tokens.into_iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![ident("a"), TokenKind::Unknown, ident("b"), TokenKind::Eof]
    );
}
