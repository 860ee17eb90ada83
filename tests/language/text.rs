//! Integration tests for the brace-aware text algorithms

use bibstyle_language::text::{
    self, CaseMode, add_period, change_case, count_names, format_name, parse_name, purify,
    substring, text_length,
};

// =============================================================================
// Slicing
// =============================================================================

#[test]
fn substring_full_and_negative() {
    assert_eq!(substring("123456789", 1, i32::MAX), "123456789");
    assert_eq!(substring("123456789", -1, 1), "9");
    assert_eq!(substring("123456789", -2, 2), "78");
    assert_eq!(substring("123456789", -7, 3), "123");
}

#[test]
fn substring_invalid_start_is_empty() {
    assert_eq!(substring("abcd", 0, 2), "");
    assert_eq!(substring("abcd", -5, 2), "");
    assert_eq!(substring("abcd", 9, 2), "");
}

#[test]
fn text_length_counts_groups() {
    assert_eq!(text_length("hello world"), 11);
    assert_eq!(text_length("Hello {W}orld"), 11);
    assert_eq!(text_length("{A}{D}/{Cycle}"), 8);
    assert_eq!(text_length("{\\This is one character}"), 1);
    assert_eq!(text_length("{\\And this too"), 1);
}

// =============================================================================
// Case, Purify, Periods
// =============================================================================

#[test]
fn title_case_restores_protected_title() {
    let title =
        "{A}{D}/{C}ycle: {I}{B}{M}'s {F}ramework for {A}pplication {D}evelopment and {C}ase";
    let upper = change_case(title, CaseMode::Upper);
    assert_eq!(change_case(&upper, CaseMode::Title), title);
    assert_eq!(change_case(title, CaseMode::Title), title);
}

#[test]
fn case_mode_specifiers() {
    assert_eq!(CaseMode::parse("t"), Some(CaseMode::Title));
    assert_eq!(CaseMode::parse("U"), Some(CaseMode::Upper));
    assert_eq!(CaseMode::parse("x"), None);
}

#[test]
fn purify_keeps_letters() {
    assert_eq!(purify("Knuth, Donald E."), "Knuth Donald E");
    assert_eq!(purify("Vall{\\'e}e-Poussin"), "Vallee Poussin");
    assert_eq!(purify("{\\ss}"), "ss");
}

#[test]
fn add_period_rules() {
    assert_eq!(add_period("Knuth"), "Knuth.");
    assert_eq!(add_period("Really?"), "Really?");
    assert_eq!(add_period("Wow!"), "Wow!");
    assert_eq!(add_period("Done."), "Done.");
    assert_eq!(add_period("{Done.}"), "{Done.}");
    assert_eq!(add_period(""), "");
}

// =============================================================================
// Names
// =============================================================================

#[test]
fn count_names_ignores_braced_and() {
    assert_eq!(count_names("Johnny Foo { and } Mary Bar"), 1);
    assert_eq!(count_names("Johnny Foo and Mary Bar"), 2);
    assert_eq!(count_names("A and B AND C"), 3);
}

#[test]
fn format_name_conformance() {
    let name = parse_name("Charles Louis Xavier Joseph de la Vallée Poussin");
    assert_eq!(
        format_name(&name, "{vv~}{ll}{, jj}{, f}?"),
        "de~la Vallée~Poussin, C.~L. X.~J?"
    );
}

#[test]
fn parse_name_comma_forms() {
    let name = parse_name("Ford, Jr., Henry");
    let last: Vec<_> = name.last.iter().map(|t| t.text.as_str()).collect();
    let jr: Vec<_> = name.jr.iter().map(|t| t.text.as_str()).collect();
    let first: Vec<_> = name.first.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(last, vec!["Ford"]);
    assert_eq!(jr, vec!["Jr."]);
    assert_eq!(first, vec!["Henry"]);
}

#[test]
fn split_names_yields_each_name() {
    let names = text::split_names("Donald E. Knuth and Leslie Lamport");
    assert_eq!(names, vec!["Donald E. Knuth", "Leslie Lamport"]);
}
