//! The main REPL implementation.
//!
//! Each input runs against one persistent [`Context`]: the operand stack,
//! variables, and functions survive from line to line. Inputs that start
//! with a command keyword are parsed as style commands; anything else is
//! run as a function body with no current entry, the way `EXECUTE` does.

use crate::editor::{
    COMMAND_KEYWORDS, LineEditor, ReadResult, RustylineEditor, brace_depth, default_keywords,
};
use crate::session::Session;
use bibstyle_foundation::{Error, ErrorKind, Result};
use bibstyle_language::{Context, StackValue, parse};
use std::fs;
use std::path::Path;
use tracing::debug;

/// What one REPL input produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text the input appended to the output buffer.
    Output(String),
    /// A message from a meta command.
    Message(String),
    /// The user asked to leave.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Bibliography and configuration new contexts are built from.
    session: Session,

    /// The context every input runs against.
    context: Context,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,

    /// Continuation prompt (for multi-line input).
    continuation_prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E) -> Self {
        let session = Session::new();
        let context = session.fresh_context();
        Self {
            editor,
            session,
            context,
            show_banner: true,
            prompt: "bst> ".to_string(),
            continuation_prompt: ".... ".to_string(),
        }
    }

    /// Sets the session for this REPL and starts a fresh context from it.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.context = session.fresh_context();
        self.session = session;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the context inputs run against.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            print_banner();
        }

        loop {
            match self.read_eval_print() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let Some(input) = self.read_input()? else {
            return Ok(false); // EOF
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);

        match self.eval(&input) {
            Ok(Outcome::Quit) => return Ok(false),
            Ok(Outcome::Output(text)) => {
                if !text.is_empty() {
                    print!("{text}");
                    if !text.ends_with('\n') {
                        println!();
                    }
                }
                if !self.context.stack().is_empty() {
                    println!("\x1b[2m{}\x1b[0m", format_stack(self.context.stack()));
                }
            }
            Ok(Outcome::Message(message)) => println!("{message}"),
            Err(e) => print_error(&e),
        }

        Ok(true)
    }

    /// Reads a potentially multi-line input.
    fn read_input(&mut self) -> Result<Option<String>> {
        let mut input = String::new();
        let mut first_line = true;

        loop {
            let result = if first_line {
                self.editor.read_line(&self.prompt)?
            } else {
                self.editor.read_continuation(&self.continuation_prompt)?
            };

            match result {
                ReadResult::Line(line) => {
                    if !first_line {
                        input.push('\n');
                    }
                    input.push_str(&line);

                    if is_complete(&input) {
                        return Ok(Some(input));
                    }

                    first_line = false;
                }
                ReadResult::Interrupted => {
                    if !first_line {
                        println!("\nInput cancelled.");
                    }
                    return Ok(Some(String::new()));
                }
                ReadResult::Eof => {
                    if first_line {
                        return Ok(None);
                    }
                    return Err(Error::new(ErrorKind::Internal(
                        "unexpected EOF in multi-line input".to_string(),
                    )));
                }
            }
        }
    }

    /// Evaluates one input against the persistent context.
    ///
    /// # Errors
    ///
    /// Returns a parse or runtime error. The stack and variables keep
    /// whatever the input did before failing.
    pub fn eval(&mut self, input: &str) -> Result<Outcome> {
        let trimmed = input.trim();
        if let Some(meta) = trimmed.strip_prefix(':').filter(|m| m.starts_with(char::is_alphabetic)) {
            return self.meta(meta);
        }

        let before = self.context.output().len();
        if starts_with_command(trimmed) {
            self.run_commands(input)?;
        } else {
            self.context.eval(input)?;
        }
        Ok(Outcome::Output(self.context.output()[before..].to_string()))
    }

    /// Runs the commands of a style file against the persistent context.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or run.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Internal(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        })?;
        debug!(path = %path.display(), "loading style into REPL");
        let before = self.context.output().len();
        self.run_commands(&source)?;
        Ok(self.context.output()[before..].to_string())
    }

    fn run_commands(&mut self, source: &str) -> Result<()> {
        let style = parse(source)?;
        let result = style
            .commands
            .iter()
            .try_for_each(|command| self.context.run_command(command));
        self.refresh_keywords();
        result
    }

    /// Adds user-defined function names to the editor's completions.
    fn refresh_keywords(&mut self) {
        let mut keywords = default_keywords();
        keywords.extend(self.context.function_names().map(str::to_string));
        self.editor.set_keywords(keywords);
    }

    fn meta(&mut self, command: &str) -> Result<Outcome> {
        let mut parts = command.splitn(2, char::is_whitespace);
        let name = parts.next().unwrap_or_default();
        let argument = parts.next().map(str::trim).unwrap_or_default();

        match name {
            "q" | "quit" => Ok(Outcome::Quit),
            "stack" => Ok(Outcome::Message(format_stack(self.context.stack()))),
            "reset" => {
                self.context = self.session.fresh_context();
                self.refresh_keywords();
                Ok(Outcome::Message("context reset".to_string()))
            }
            "load" if !argument.is_empty() => self.load_file(argument).map(Outcome::Output),
            "help" => Ok(Outcome::Message(HELP.to_string())),
            _ => Err(Error::new(ErrorKind::Internal(format!(
                "unknown REPL command :{command} (try :help)"
            )))),
        }
    }
}

/// Returns true when braces balance and no string is left open.
fn is_complete(input: &str) -> bool {
    let quotes = input
        .lines()
        .map(|line| line.split('%').next().unwrap_or_default())
        .flat_map(str::chars)
        .filter(|&c| c == '"')
        .count();
    brace_depth(input) <= 0 && quotes % 2 == 0
}

fn starts_with_command(input: &str) -> bool {
    let word = input
        .split(|c: char| c.is_whitespace() || c == '{')
        .next()
        .unwrap_or_default();
    COMMAND_KEYWORDS
        .iter()
        .any(|k| k.eq_ignore_ascii_case(word))
}

/// Formats the stack bottom first.
fn format_stack(stack: &[StackValue]) -> String {
    if stack.is_empty() {
        return "(empty stack)".to_string();
    }
    stack
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_banner() {
    println!(
        "\x1b[1mbibstyle\x1b[0m {} - BibTeX style interpreter",
        env!("CARGO_PKG_VERSION")
    );
    println!("Type :help for commands, Ctrl+D to exit.\n");
}

fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
}

const HELP: &str = "\
Inputs are function bodies run with no current entry, e.g.
    #1 #2 + \"three\" int.to.str$ *
Inputs starting with a command keyword define things, e.g.
    FUNCTION {twice} { duplicate$ * }
    STRINGS {s}

REPL commands:
    :stack         Show the operand stack, bottom first
    :reset         Discard the stack, variables, and functions
    :load PATH     Run a style file against the current context
    :help          Show this help
    :quit          Leave the REPL";
