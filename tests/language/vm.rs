//! Integration tests for the VM
//!
//! Tests name resolution, configuration, and error reporting through the
//! public render API.

use bibstyle_foundation::{Bibliography, Entry, ErrorKind};
use bibstyle_language::{Context, StackValue, Vm, VmConfig, render};

fn one_book() -> Bibliography {
    Bibliography::new().with_entry(
        Entry::new("book", "knuth84")
            .with_field("title", "The TeXbook")
            .with_field("year", "1984"),
    )
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn user_functions_shadow_entry_fields() {
    let style = r#"
        ENTRY { title } { } { }
        FUNCTION { title } { "shadowed" }
        FUNCTION { show } { title write$ }
        READ
        ITERATE { show }
    "#;
    assert_eq!(render(style, &one_book()).unwrap(), "shadowed");
}

#[test]
fn fields_resolve_per_entry() {
    let style = r#"
        ENTRY { title year } { } { }
        FUNCTION { show } { year ": " * title * write$ newline$ }
        READ
        ITERATE { show }
    "#;
    assert_eq!(render(style, &one_book()).unwrap(), "1984: The TeXbook\n");
}

#[test]
fn undeclared_fields_are_unbound() {
    let style = r#"
        ENTRY { title } { } { }
        FUNCTION { show } { year write$ }
        READ
        ITERATE { show }
    "#;
    let err = render(style, &one_book()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnboundName(ref n) if n == "year"));
}

#[test]
fn quoted_names_are_not_invoked() {
    let ctx = Vm::from_source("FUNCTION {f} { 'undefined.thing } EXECUTE {f}")
        .unwrap()
        .execute(&Bibliography::new())
        .unwrap();
    assert_eq!(ctx.stack().len(), 1);
    assert!(matches!(ctx.stack()[0], StackValue::Function(_)));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn warnings_are_recorded_when_asked() {
    let style = r#"FUNCTION {f} { "no year" warning$ } EXECUTE {f}"#;
    let quiet = Vm::from_source(style).unwrap();
    assert!(quiet.execute(&Bibliography::new()).unwrap().warnings().is_empty());

    let recording = quiet.with_config(VmConfig::default().with_record_warnings(true));
    let ctx = recording.execute(&Bibliography::new()).unwrap();
    assert_eq!(ctx.warnings(), &["no year".to_string()]);
    assert_eq!(ctx.output(), "");
}

#[test]
fn entry_max_comes_from_config() {
    let style = "FUNCTION {f} { entry.max$ global.max$ } EXECUTE {f}";
    let vm = Vm::from_source(style).unwrap();
    let ctx = vm.execute(&Bibliography::new()).unwrap();
    assert_eq!(
        ctx.stack(),
        &[StackValue::Integer(250), StackValue::Integer(i32::MAX)]
    );

    let ctx = vm
        .with_config(VmConfig::default().with_entry_max(1000))
        .execute(&Bibliography::new())
        .unwrap();
    assert_eq!(ctx.stack()[0], StackValue::Integer(1000));
}

#[test]
fn source_name_appears_in_errors() {
    let vm = Vm::from_source("FUNCTION {f} { pop$ }\nEXECUTE {f}")
        .unwrap()
        .with_config(VmConfig::default().with_source_name("broken.bst"));
    let err = vm.render(&Bibliography::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::StackUnderflow(_)));
    let ctx = err.context.unwrap();
    assert_eq!(ctx.source.as_deref(), Some("broken.bst"));
    assert_eq!(ctx.line, Some(1));
    assert_eq!(ctx.stack, vec!["f", "EXECUTE {f}"]);
}

// =============================================================================
// Errors
// =============================================================================

fn kind_name(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::ParseError { .. } => "parse",
        ErrorKind::TypeMismatch { .. } => "type",
        ErrorKind::UnboundName(_) => "unbound",
        ErrorKind::StackUnderflow(_) => "underflow",
        ErrorKind::Dispatch(_) => "dispatch",
        ErrorKind::NoCurrentEntry(_) => "no-entry",
        ErrorKind::InvalidArgument { .. } => "argument",
        ErrorKind::Internal(_) => "internal",
    }
}

#[test]
fn every_error_kind_is_reachable() {
    let cases = [
        ("FUNCTION {f} { #1 \"a\" + } EXECUTE {f}", "type"),
        ("FUNCTION {f} { nothing.here } EXECUTE {f}", "unbound"),
        ("FUNCTION {f} { swap$ } EXECUTE {f}", "underflow"),
        ("FUNCTION {f} { cite$ } EXECUTE {f}", "no-entry"),
        ("FUNCTION {f} { #-1 int.to.chr$ } EXECUTE {f}", "argument"),
        ("READ ITERATE {call.type$}", "dispatch"),
        ("FUNCTION {f} { #1 ", "parse"),
    ];

    for (style, expected) in cases {
        let err = render(style, &one_book()).unwrap_err();
        assert_eq!(kind_name(&err.kind), expected, "{style}: {err}");
    }
}

#[test]
fn failed_renders_produce_no_output() {
    let style = r#"FUNCTION {f} { "partial" write$ pop$ } EXECUTE {f}"#;
    assert!(render(style, &Bibliography::new()).is_err());
}

// =============================================================================
// Limits
// =============================================================================

const COUNTDOWN: &str = r#"
INTEGERS {n}
FUNCTION {down} { n #0 > { n #1 - 'n := down } 'skip$ if$ }
FUNCTION {go} { #50 'n := down n }
EXECUTE {go}
"#;

#[test]
fn unbounded_recursion_is_an_error() {
    let err = render("FUNCTION {f} { f } EXECUTE {f}", &Bibliography::new()).unwrap_err();
    let ErrorKind::InvalidArgument { operation, message } = &err.kind else {
        panic!("expected invalid argument, got {err}");
    };
    assert_eq!(operation, "f");
    assert!(message.contains("call depth"), "{message}");

    let frames = err.context.unwrap().stack;
    assert_eq!(frames.first().map(String::as_str), Some("f"));
    assert_eq!(frames.last().map(String::as_str), Some("EXECUTE {f}"));
}

#[test]
fn recursion_through_blocks_is_bounded() {
    let style = "FUNCTION {g} { #1 { g } 'skip$ if$ } EXECUTE {g}";
    let err = render(style, &Bibliography::new()).unwrap_err();
    assert_eq!(kind_name(&err.kind), "argument", "{err}");
}

#[test]
fn recursion_within_the_limit_runs() {
    let vm = Vm::from_source(COUNTDOWN).unwrap();
    let ctx = vm.execute(&Bibliography::new()).unwrap();
    assert_eq!(ctx.stack(), &[StackValue::Integer(0)]);

    let err = vm
        .with_config(VmConfig::default().with_max_depth(20))
        .render(&Bibliography::new())
        .unwrap_err();
    assert_eq!(kind_name(&err.kind), "argument", "{err}");
}

#[test]
fn while_loops_do_not_count_toward_depth() {
    let style = r#"
        INTEGERS {n}
        FUNCTION {f} { #0 'n := { n #1000 < } { n #1 + 'n := } while$ n }
        EXECUTE {f}
    "#;
    let ctx = Vm::from_source(style)
        .unwrap()
        .with_config(VmConfig::default().with_max_depth(4))
        .execute(&Bibliography::new())
        .unwrap();
    assert_eq!(ctx.stack(), &[StackValue::Integer(1000)]);
}

#[test]
fn depth_unwinds_after_a_failed_call() {
    let vm = Vm::from_source(
        "FUNCTION {f} { f }
         FUNCTION {g} { #1 { #1 { #7 } 'skip$ if$ } 'skip$ if$ }",
    )
    .unwrap();
    let mut ctx = Context::new(&Bibliography::new(), VmConfig::default().with_max_depth(8));
    for command in &vm.style().commands {
        ctx.run_command(command).unwrap();
    }

    assert!(ctx.eval("f").is_err());
    assert!(ctx.eval("f").is_err());
    ctx.eval("g").unwrap();
    assert_eq!(ctx.stack().last(), Some(&StackValue::Integer(7)));
}
