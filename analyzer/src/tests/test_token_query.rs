use crate::lexer::{TokenKind, lex};
use crate::parser::TokenQuery;

#[test]
fn test_token_query_prev_next_nontrivia_around_trivia_and_eof() {
    let src = "a //c\nb";
    let tokens = lex(src).tokens;
    let q = TokenQuery::new(&tokens);

    // token sequence: Ident(a), LineComment, Ident(b), Eof
    assert!(matches!(tokens[0].kind, TokenKind::Ident(_)));
    assert!(matches!(tokens[1].kind, TokenKind::LineComment(_)));
    assert!(matches!(tokens[2].kind, TokenKind::Ident(_)));
    assert!(matches!(tokens[3].kind, TokenKind::Eof));

    assert_eq!(q.prev_nontrivia(0), None);
    assert_eq!(q.prev_nontrivia(1), Some(0));
    assert_eq!(q.prev_nontrivia(2), Some(0));
    assert_eq!(q.prev_nontrivia(3), Some(2));

    // EOF is non-trivia.
    assert_eq!(q.next_nontrivia(1), Some(2));
    assert_eq!(q.next_nontrivia(3), Some(3));
    assert_eq!(q.next_nontrivia(4), None);
}

#[test]
fn test_tokens_around_an_offset() {
    let src = "foo(a, b)";
    let tokens = lex(src).tokens;
    let q = TokenQuery::new(&tokens);

    // Caret right after `,`.
    let before = q.prev_nontrivia_before(6).unwrap();
    assert_eq!(before.kind, TokenKind::Comma);
    let after = q.next_nontrivia_after(6).unwrap();
    assert!(matches!(&after.kind, TokenKind::Ident(s) if s.text == "b"));

    assert!(q.token_containing(1).is_some());
    assert!(q.token_containing(3).is_none());
}

#[test]
fn test_nearest_before_respects_floor() {
    let src = "if (x) { y = 1; }";
    let tokens = lex(src).tokens;
    let q = TokenQuery::new(&tokens);
    let semi = src.find(';').unwrap() as u32;

    let paren = q.nearest_before(semi, 0, |k| *k == TokenKind::CloseParen);
    assert_eq!(paren.map(|t| t.span.start), Some(5));

    let floor = src.find('{').unwrap() as u32 + 1;
    assert!(q.nearest_before(semi, floor, |k| *k == TokenKind::CloseParen).is_none());
}

#[test]
fn test_nearest_after_stops_at_ceiling() {
    let src = "a = b; c";
    let tokens = lex(src).tokens;
    let q = TokenQuery::new(&tokens);

    let semi = q.nearest_after(0, src.len() as u32, |k| *k == TokenKind::Semi);
    assert_eq!(semi.map(|t| t.span.start), Some(5));
    assert!(q.nearest_after(0, 4, |k| *k == TokenKind::Semi).is_none());
}
