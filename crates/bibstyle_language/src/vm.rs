//! Stack machine that runs a style against a bibliography.
//!
//! [`Vm`] owns a parsed [`Style`] and runs its commands in order against a
//! fresh [`Context`] per render. The execution engine lives on `Context`:
//! literals push themselves, block and quote literals push function
//! references, and identifiers are resolved and invoked when reached.

mod context;
mod native;
mod resolve;

pub use context::{CROSSREF, Context, EntryState, Function, SORT_KEY};
pub use native::{BUILTIN_NAMES, NativeFn};
pub use resolve::{Resolution, Scope};

use bibstyle_foundation::{Bibliography, Error, Result};
use tracing::{debug, info, trace};

use crate::ast::{Command, CommandKind, Item, Style};
use crate::span::Span;
use crate::config::VmConfig;
use crate::parser;
use crate::value::{FunctionRef, StackValue};

/// A compiled style ready to render bibliographies.
#[derive(Clone, Debug, Default)]
pub struct Vm {
    style: Style,
    config: VmConfig,
}

impl Vm {
    /// Creates a VM for a parsed style.
    #[must_use]
    pub fn new(style: Style) -> Self {
        Self {
            style,
            config: VmConfig::default(),
        }
    }

    /// Parses style source and creates a VM for it.
    ///
    /// # Errors
    /// Returns a parse error if the source is malformed.
    pub fn from_source(source: &str) -> Result<Self> {
        Ok(Self::new(parser::parse(source)?))
    }

    /// Builder method to set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: VmConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the style this VM runs.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    /// Runs every command against a fresh context and returns it.
    ///
    /// # Errors
    /// Returns the first runtime error; the partial context is discarded.
    pub fn execute(&self, bibliography: &Bibliography) -> Result<Context> {
        let mut ctx = Context::new(bibliography, self.config.clone());
        for command in &self.style.commands {
            ctx.run_command(command)?;
        }
        Ok(ctx)
    }

    /// Runs the style and returns the output text.
    ///
    /// # Errors
    /// Returns the first runtime error.
    pub fn render(&self, bibliography: &Bibliography) -> Result<String> {
        self.execute(bibliography).map(Context::into_output)
    }
}

// =============================================================================
// Command driver
// =============================================================================

impl Context {
    /// Runs one top-level command.
    ///
    /// Errors leaving the command record it as a frame and, if nothing
    /// deeper did, its source position.
    ///
    /// # Errors
    /// Returns any error raised while the command runs.
    pub fn run_command(&mut self, command: &Command) -> Result<()> {
        if self.config.trace_commands {
            info!(command = %command.kind, line = command.span.line, "executing command");
        } else {
            debug!(command = %command.kind, line = command.span.line, "executing command");
        }
        self.dispatch_command(&command.kind)
            .map_err(|err| self.annotate(err, command))
    }

    fn dispatch_command(&mut self, kind: &CommandKind) -> Result<()> {
        match kind {
            CommandKind::Entry {
                fields,
                integers,
                strings,
            } => self.declare_entry(fields, integers, strings),
            CommandKind::Strings(names) => self.declare_strings(names),
            CommandKind::Integers(names) => self.declare_integers(names),
            CommandKind::Function { name, body } => {
                self.define_function(name, Function::User(body.clone()));
            }
            CommandKind::Macro { name, text } => self.define_macro(name, text),
            CommandKind::Read => self.read_entries(),
            CommandKind::Sort => self.sort_entries(),
            CommandKind::Iterate(name) => {
                for index in 0..self.entries.len() {
                    self.invoke_for_entry(name, index)?;
                }
                self.current = None;
            }
            CommandKind::Reverse(name) => {
                for index in (0..self.entries.len()).rev() {
                    self.invoke_for_entry(name, index)?;
                }
                self.current = None;
            }
            CommandKind::Execute(name) => {
                self.current = None;
                self.invoke(name)?;
            }
        }
        Ok(())
    }

    fn invoke_for_entry(&mut self, name: &str, index: usize) -> Result<()> {
        self.current = Some(index);
        self.invoke(name).map_err(|err| {
            let key = self.entries[index].citation_key().to_string();
            self.current = None;
            err.in_frame(format!("entry {key}"))
        })
    }

    fn annotate(&self, err: Error, command: &Command) -> Error {
        let mut err = locate(err.in_frame(command.kind.to_string()), command.span);
        let mut context = err.context.take().unwrap_or_default();
        if context.source.is_none() {
            if let Some(source) = &self.config.source_name {
                context = context.with_source(source.clone());
            }
        }
        err.with_context(context)
    }
}

// =============================================================================
// Execution engine
// =============================================================================

impl Context {
    /// Executes a sequence of block items.
    ///
    /// # Errors
    /// Returns the first error raised by an item.
    pub fn run(&mut self, items: &[Item]) -> Result<()> {
        for item in items {
            self.step(item)?;
        }
        Ok(())
    }

    fn step(&mut self, item: &Item) -> Result<()> {
        match item {
            Item::Integer(n, _) => self.push(*n),
            Item::Text(s, _) => self.push(s.as_str()),
            Item::Quote(name, _) => {
                self.push(StackValue::Function(FunctionRef::Named(name.clone())));
            }
            Item::Block(block) => {
                self.push(StackValue::Function(FunctionRef::Block(block.clone())));
            }
            Item::Identifier(name, span) => {
                self.invoke(name).map_err(|err| locate(err, *span))?;
            }
        }
        Ok(())
    }

    /// Resolves `name` and runs whatever it denotes.
    ///
    /// Variables and fields push their value; functions run.
    ///
    /// # Errors
    /// Returns `UnboundName` if nothing is called `name`, and any error the
    /// invoked function raises.
    pub fn invoke(&mut self, name: &str) -> Result<()> {
        let resolution = self
            .resolve(name)
            .ok_or_else(|| Error::unbound_name(name))?;
        match resolution {
            Resolution::Builtin(f) => f(self),
            Resolution::UserFunction(Function::User(body)) => {
                trace!(function = name, depth = self.depth, "invoking");
                self.run_nested(name, body.items())
                    .map_err(|err| err.in_frame(name))
            }
            Resolution::UserFunction(Function::Macro(text)) => {
                self.push(text);
                Ok(())
            }
            Resolution::StringVar(Scope::Global) => {
                let value = self.global_string(name).unwrap_or(StackValue::Missing);
                self.push(value);
                Ok(())
            }
            Resolution::StringVar(Scope::Entry) => {
                let value = self.entry_string(name)?;
                self.push(value);
                Ok(())
            }
            Resolution::IntVar(Scope::Global) => {
                let value = self.global_integer(name).unwrap_or_default();
                self.push(value);
                Ok(())
            }
            Resolution::IntVar(Scope::Entry) => {
                let value = self.entry_integer(name)?;
                self.push(value);
                Ok(())
            }
            Resolution::EntryField => {
                let value = self.entry_field(name)?;
                self.push(value);
                Ok(())
            }
        }
    }

    /// Runs a function reference popped by a control construct.
    ///
    /// # Errors
    /// Returns any error the function raises.
    pub fn call(&mut self, function: &FunctionRef) -> Result<()> {
        match function {
            FunctionRef::Named(name) => self.invoke(name),
            FunctionRef::Block(block) => self.run_nested("block", block.items()),
        }
    }

    /// Runs a function body one level deeper, failing past `max_depth`.
    fn run_nested(&mut self, operation: &str, items: &[Item]) -> Result<()> {
        let max_depth = self.config.max_depth;
        if self.depth >= max_depth {
            return Err(Error::invalid_argument(
                operation,
                format!("call depth exceeded {max_depth}"),
            ));
        }
        self.depth += 1;
        let result = self.run(items);
        self.depth -= 1;
        result
    }

    /// Runs a branch of `if$` or `while$`.
    ///
    /// A plain value in branch position is pushed back unchanged.
    pub(crate) fn run_branch(&mut self, branch: StackValue) -> Result<()> {
        match branch {
            StackValue::Function(f) => self.call(&f),
            other => {
                self.push(other);
                Ok(())
            }
        }
    }

    /// Parses `source` as a bare block body and runs it with no current entry.
    ///
    /// # Errors
    /// Returns a parse error or the first runtime error.
    pub fn eval(&mut self, source: &str) -> Result<()> {
        let items = parser::parse_items(source)?;
        self.current = None;
        self.run(&items)
    }
}

/// Records `span` as the error position unless a deeper one is known.
fn locate(mut err: Error, span: Span) -> Error {
    let context = err.context.take().unwrap_or_default();
    if context.line.is_some() {
        return err.with_context(context);
    }
    err.with_context(context.with_position(span.line as usize, span.column as usize))
}

/// Parses a style and renders it against a bibliography.
///
/// # Errors
/// Returns the first parse or runtime error.
pub fn render(source: &str, bibliography: &Bibliography) -> Result<String> {
    Vm::from_source(source)?.render(bibliography)
}
