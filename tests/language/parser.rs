//! Integration tests for the parser
//!
//! Tests parsing whole styles into command sequences.

use bibstyle_foundation::ErrorKind;
use bibstyle_language::{CommandKind, Item, parse, parse_items};

const SKELETON: &str = r#"
% A cut-down plain style
ENTRY
  { address author booktitle title year }
  { }
  { label }

INTEGERS { output.state before.all }
STRINGS { s t }

MACRO {jan} {"January"}

FUNCTION {init.state.consts}
{ #0 'before.all :=
}

FUNCTION {presort}
{ cite$ 'sort.key$ :=
}

READ
EXECUTE {init.state.consts}
ITERATE {presort}
SORT
REVERSE {presort}
"#;

#[test]
fn parse_style_skeleton() {
    let style = parse(SKELETON).unwrap();
    let keywords: Vec<_> = style.kinds().map(CommandKind::keyword).collect();
    assert_eq!(
        keywords,
        vec![
            "ENTRY", "INTEGERS", "STRINGS", "MACRO", "FUNCTION", "FUNCTION", "READ", "EXECUTE",
            "ITERATE", "SORT", "REVERSE"
        ]
    );
}

#[test]
fn entry_lists_are_kept_in_order() {
    let style = parse(SKELETON).unwrap();
    match &style.commands[0].kind {
        CommandKind::Entry {
            fields,
            integers,
            strings,
        } => {
            assert_eq!(fields, &["address", "author", "booktitle", "title", "year"]);
            assert!(integers.is_empty());
            assert_eq!(strings, &["label"]);
        }
        other => panic!("expected ENTRY, got {other:?}"),
    }
}

#[test]
fn function_bodies_keep_items() {
    let style = parse(SKELETON).unwrap();
    let CommandKind::Function { name, body } = &style.commands[5].kind else {
        panic!("expected FUNCTION");
    };
    assert_eq!(name, "presort");
    assert_eq!(body.len(), 3);
    assert!(matches!(&body.items()[0], Item::Identifier(n, _) if n == "cite$"));
    assert!(matches!(&body.items()[1], Item::Quote(n, _) if n == "sort.key$"));
}

#[test]
fn command_display_names_the_function() {
    let style = parse(SKELETON).unwrap();
    assert_eq!(style.commands[7].kind.to_string(), "EXECUTE {init.state.consts}");
    assert_eq!(style.commands[6].kind.to_string(), "READ");
}

#[test]
fn parse_error_reports_line() {
    let err = parse("READ\nSORT\nFUNCTION {f} { #1").unwrap_err();
    match err.kind {
        ErrorKind::ParseError { line, .. } => assert_eq!(line, 3),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn stray_closing_brace_is_an_error() {
    assert!(parse("READ }").is_err());
    assert!(parse_items("#1 #2 + }").is_err());
}

#[test]
fn nested_blocks_parse() {
    let items = parse_items("{ { { #1 } } } pop$").unwrap();
    assert_eq!(items.len(), 2);
    let Item::Block(outer) = &items[0] else {
        panic!("expected block");
    };
    assert!(matches!(&outer.items()[0], Item::Block(inner) if inner.len() == 1));
}
