//! Session and REPL behavior across crates.

use std::fs;

use bibstyle_foundation::{Entry, ErrorKind, Result};
use bibstyle_language::{StackValue, VmConfig};
use bibstyle_runtime::{LineEditor, Outcome, ReadResult, Repl, Session};

/// Feeds a fixed script of lines to the REPL.
struct ScriptEditor {
    lines: std::vec::IntoIter<String>,
}

impl ScriptEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|s| (*s).to_string())
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl LineEditor for ScriptEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.next().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn read_continuation(&mut self, prompt: &str) -> Result<ReadResult> {
        self.read_line(prompt)
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_keywords(&mut self, _keywords: Vec<String>) {}
}

const STYLE: &str = r#"
ENTRY { title } { } { }
FUNCTION { show } { cite$ " " * title * write$ newline$ }
READ
ITERATE { show }
"#;

#[test]
fn session_renders_loaded_file() {
    let path = std::env::temp_dir().join(format!("bibstyle-session-{}.bst", std::process::id()));
    fs::write(&path, STYLE).unwrap();

    let mut session = Session::new();
    session.add_entry(Entry::new("book", "b1").with_field("title", "One"));
    session.add_entry(Entry::new("book", "b2").with_field("title", "Two"));
    session.load_file(&path).unwrap();
    let out = session.render();
    fs::remove_file(&path).unwrap();

    assert_eq!(out.unwrap(), "b1 One\nb2 Two\n");
    assert_eq!(session.style_path(), Some(path.as_path()));
}

#[test]
fn session_errors_name_the_file() {
    let path = std::env::temp_dir().join(format!("bibstyle-broken-{}.bst", std::process::id()));
    fs::write(&path, "FUNCTION { f } { pop$ }\nEXECUTE { f }\n").unwrap();

    let mut session = Session::new().with_config(VmConfig::default());
    session.load_file(&path).unwrap();
    let err = session.render().unwrap_err();
    fs::remove_file(&path).unwrap();

    assert!(matches!(err.kind, ErrorKind::StackUnderflow(_)));
    let source = err.context.and_then(|c| c.source).unwrap();
    assert!(source.ends_with(".bst"));
    assert!(session.last_context().is_none());
}

#[test]
fn repl_runs_a_style_interactively() {
    let mut session = Session::new();
    session.add_entry(Entry::new("article", "a1").with_field("title", "Stacks"));
    let mut repl = Repl::with_editor(ScriptEditor::new(&[]))
        .without_banner()
        .with_session(session);

    repl.eval("ENTRY { title } { } { }").unwrap();
    repl.eval("READ").unwrap();
    repl.eval("FUNCTION { show } { title write$ }").unwrap();
    assert_eq!(
        repl.eval("ITERATE { show }").unwrap(),
        Outcome::Output("Stacks".into())
    );
    assert!(repl.eval("show").is_err());
}

#[test]
fn repl_script_ends_at_eof() {
    let editor = ScriptEditor::new(&["#40 #2 +", "#2 -", ":stack"]);
    let mut repl = Repl::with_editor(editor).without_banner();
    repl.run().unwrap();
    assert_eq!(repl.context().stack(), &[StackValue::Integer(40)]);
}
