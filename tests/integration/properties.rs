//! Behavioral properties every render must satisfy.

use bibstyle_foundation::{Bibliography, Entry};
use bibstyle_language::{StackValue, Vm, render};
use proptest::prelude::*;

fn keyed(keys: &[&str]) -> Bibliography {
    keys.iter().fold(Bibliography::new(), |bib, key| {
        bib.with_entry(Entry::new("misc", *key))
    })
}

fn final_stack(style: &str, bib: &Bibliography) -> Vec<StackValue> {
    Vm::from_source(style)
        .unwrap()
        .execute(bib)
        .unwrap()
        .take_stack()
}

fn text(s: &str) -> StackValue {
    StackValue::Text(s.to_string())
}

// =============================================================================
// Iteration
// =============================================================================

const VISIT_STYLE: &str = r#"
    INTEGERS { calls }
    FUNCTION { key } { cite$ write$ " " write$ }
    FUNCTION { bar } { "|" write$ }
    FUNCTION { count } { calls #1 + 'calls := }
    FUNCTION { show } { bar calls int.to.str$ write$ }
    READ
    ITERATE { key }
    EXECUTE { bar }
    REVERSE { key }
    EXECUTE { count }
    EXECUTE { show }
"#;

const SORT_STYLE: &str = r#"
    ENTRY { key } { } { }
    FUNCTION { presort } { key 'sort.key$ := }
    FUNCTION { show } { cite$ write$ " " write$ }
    READ
    ITERATE { presort }
    SORT
    ITERATE { show }
"#;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// ITERATE and REVERSE visit every entry once, in opposite orders, and
    /// EXECUTE runs exactly once.
    #[test]
    fn iterate_reverse_and_execute_visit_counts(n in 0usize..40) {
        let keys: Vec<String> = (0..n).map(|i| format!("k{i}")).collect();
        let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        let forward: String = keys.iter().map(|k| format!("{k} ")).collect();
        let backward: String = keys.iter().rev().map(|k| format!("{k} ")).collect();

        let output = render(VISIT_STYLE, &keyed(&refs)).unwrap();
        prop_assert_eq!(output, format!("{forward}|{backward}|1"));
    }

    /// SORT orders entries by byte-wise key and keeps ties in input order.
    #[test]
    fn sort_is_stable_and_ordinal(sort_keys in prop::collection::vec("[a-cA-C]{1,3}", 0..30)) {
        let bib = sort_keys.iter().enumerate().fold(Bibliography::new(), |bib, (i, key)| {
            bib.with_entry(Entry::new("misc", format!("e{i}")).with_field("key", key.as_str()))
        });

        let mut order: Vec<usize> = (0..sort_keys.len()).collect();
        order.sort_by(|&a, &b| sort_keys[a].as_bytes().cmp(sort_keys[b].as_bytes()));
        let expected: String = order.iter().map(|i| format!("e{i} ")).collect();

        prop_assert_eq!(render(SORT_STYLE, &bib).unwrap(), expected);
    }
}

#[test]
fn sort_then_iterate_types() {
    let bib = Bibliography::new()
        .with_entry(Entry::new("Misc", "c"))
        .with_entry(Entry::new("Article", "a"))
        .with_entry(Entry::new("InProceedings", "d"))
        .with_entry(Entry::new("Book", "b"));
    let style = r"
        FUNCTION { presort } { cite$ 'sort.key$ := }
        READ
        ITERATE { presort }
        SORT
        ITERATE { type$ }
    ";
    assert_eq!(
        final_stack(style, &bib),
        vec![
            text("article"),
            text("book"),
            text("misc"),
            text("inproceedings")
        ]
    );
}

// =============================================================================
// Builtin properties
// =============================================================================

#[test]
fn substring_through_the_vm() {
    let style = r#"
        FUNCTION { f } {
            "123456789" #1 global.max$ substring$
            "123456789" #-1 #1 substring$
            "123456789" #-2 #2 substring$
            "123456789" #-7 #3 substring$
            "abcd" #-5 #2 substring$
            "abcd" #0 #2 substring$
        }
        EXECUTE { f }
    "#;
    assert_eq!(
        final_stack(style, &Bibliography::new()),
        vec![
            text("123456789"),
            text("9"),
            text("78"),
            text("123"),
            text(""),
            text("")
        ]
    );
}

#[test]
fn missing_and_empty_diverge() {
    let bib = Bibliography::new().with_entry(Entry::new("misc", "m").with_field("note", "   "));
    let style = r"
        ENTRY { note year } { } { }
        FUNCTION { probe } {
            year missing$
            note empty$
            note missing$
            year empty$
        }
        READ
        ITERATE { probe }
    ";
    assert_eq!(
        final_stack(style, &bib),
        vec![
            StackValue::Integer(1),
            StackValue::Integer(1),
            StackValue::Integer(0),
            StackValue::Integer(1)
        ]
    );
}

#[test]
fn add_period_through_the_vm() {
    let style = r#"
        FUNCTION { f } {
            "Done." add.period$
            "{Really?}" add.period$
            "Once" add.period$ add.period$
        }
        EXECUTE { f }
    "#;
    assert_eq!(
        final_stack(style, &Bibliography::new()),
        vec![text("Done."), text("{Really?}"), text("Once.")]
    );
}

#[test]
fn num_names_respects_braces() {
    let style = r#"
        FUNCTION { f } {
            "Johnny Foo { and } Mary Bar" num.names$
            "Johnny Foo and Mary Bar" num.names$
        }
        EXECUTE { f }
    "#;
    assert_eq!(
        final_stack(style, &Bibliography::new()),
        vec![StackValue::Integer(1), StackValue::Integer(2)]
    );
}

// =============================================================================
// Isolation
// =============================================================================

#[test]
fn concurrent_renders_are_independent() {
    let style = r"
        INTEGERS { n }
        FUNCTION { bump } { n #1 + 'n := }
        FUNCTION { show } { n int.to.str$ write$ }
        READ
        ITERATE { bump }
        EXECUTE { show }
    ";
    let vm = Vm::from_source(style).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=4)
            .map(|n| {
                let vm = &vm;
                scope.spawn(move || {
                    let keys: Vec<String> = (0..n).map(|i| format!("e{i}")).collect();
                    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
                    (n, vm.render(&keyed(&refs)).unwrap())
                })
            })
            .collect();
        for handle in handles {
            let (n, out) = handle.join().unwrap();
            assert_eq!(out, n.to_string());
        }
    });
}
