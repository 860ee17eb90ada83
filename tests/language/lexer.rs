//! Integration tests for the lexer
//!
//! Tests tokenization of style source.

use bibstyle_language::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

#[test]
fn tokenize_function_definition() {
    let tokens = kinds(r#"FUNCTION {emphasize} { duplicate$ empty$ { pop$ "" } { "{\em " swap$ * "}" * } if$ }"#);
    assert_eq!(tokens[0], TokenKind::Word("FUNCTION".into()));
    assert_eq!(tokens[2], TokenKind::Word("emphasize".into()));
    assert!(tokens.contains(&TokenKind::Text("{\\em ".into())));
    assert!(tokens.contains(&TokenKind::Text(String::new())));
    assert_eq!(tokens.last(), Some(&TokenKind::Eof));

    let opens = tokens.iter().filter(|k| **k == TokenKind::LBrace).count();
    let closes = tokens.iter().filter(|k| **k == TokenKind::RBrace).count();
    assert_eq!(opens, closes);
}

#[test]
fn tokenize_literals_and_quotes() {
    assert_eq!(
        kinds("#1 'nameptr := #-3"),
        vec![
            TokenKind::Integer(1),
            TokenKind::Quote("nameptr".into()),
            TokenKind::Word(":=".into()),
            TokenKind::Integer(-3),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_trivia() {
    let all = Lexer::tokenize_all("% header\nREAD % trailing\n");
    assert_eq!(all.iter().filter(|t| t.kind.is_trivia()).count(), 2);
    assert_eq!(kinds("% header\nREAD % trailing\n").len(), 2);
}

#[test]
fn token_positions_are_one_based() {
    let tokens = Lexer::tokenize_all("READ\n  SORT");
    assert_eq!((tokens[0].span.line, tokens[0].span.column), (1, 1));
    assert_eq!((tokens[1].span.line, tokens[1].span.column), (2, 3));
    assert_eq!(tokens[1].text("READ\n  SORT"), "SORT");
}

#[test]
fn lexer_errors_become_tokens() {
    let tokens = kinds("\"unterminated");
    assert!(matches!(tokens[0], TokenKind::Error(_)));
}
