//! Integration tests for the bibliography input model

use bibstyle_foundation::{Bibliography, Entry};

#[test]
fn field_names_are_case_insensitive() {
    let entry = Entry::new("Article", "a1").with_field("Title", "On Stacks");
    assert_eq!(entry.field("title"), Some("On Stacks"));
    assert_eq!(entry.field("TITLE"), Some("On Stacks"));
    assert_eq!(entry.field("author"), None);
}

#[test]
fn type_name_is_lowercase() {
    let entry = Entry::new("InProceedings", "canh05");
    assert_eq!(entry.type_name(), "inproceedings");
    assert_eq!(entry.entry_type, "InProceedings");
}

#[test]
fn set_field_replaces() {
    let mut entry = Entry::new("book", "b1").with_field("year", "1984");
    entry.set_field("YEAR", "1986");
    assert_eq!(entry.field("year"), Some("1986"));
    assert_eq!(entry.fields.len(), 1);
}

#[test]
fn bibliography_keeps_entry_order() {
    let bib = Bibliography::new()
        .with_preamble("\\def\\x{}")
        .with_entry(Entry::new("misc", "z"))
        .with_entry(Entry::new("misc", "a"));
    assert_eq!(bib.len(), 2);
    assert!(!bib.is_empty());
    let keys: Vec<_> = bib.entries.iter().map(|e| e.citation_key.as_str()).collect();
    assert_eq!(keys, vec!["z", "a"]);
    assert_eq!(bib.preamble.as_deref(), Some("\\def\\x{}"));
}

#[test]
fn empty_bibliography() {
    let bib = Bibliography::new();
    assert!(bib.is_empty());
    assert!(bib.preamble.is_none());
}
