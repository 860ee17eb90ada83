//! Render session state.
//!
//! A [`Session`] pairs a loaded style with the bibliography it renders and
//! keeps the context of the most recent render around for inspection.

use std::fs;
use std::path::{Path, PathBuf};

use bibstyle_foundation::{Bibliography, Entry, Error, ErrorKind, Result};
use bibstyle_language::{Context, Vm, VmConfig};
use tracing::debug;

/// A loaded style and the bibliography it is rendered against.
#[derive(Default)]
pub struct Session {
    /// The loaded style, if any.
    vm: Option<Vm>,

    /// Entries and preamble handed to every render.
    bibliography: Bibliography,

    /// Configuration used for renders and new REPL contexts.
    config: VmConfig,

    /// Path of the last style loaded from disk.
    style_path: Option<PathBuf>,

    /// Context left behind by the last render.
    last: Option<Context>,
}

impl Session {
    /// Creates an empty session with no style loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session rendering against the given bibliography.
    #[must_use]
    pub fn with_bibliography(bibliography: Bibliography) -> Self {
        Self {
            bibliography,
            ..Self::default()
        }
    }

    /// Sets the VM configuration.
    #[must_use]
    pub fn with_config(mut self, config: VmConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the VM configuration.
    #[must_use]
    pub const fn config(&self) -> &VmConfig {
        &self.config
    }

    /// Returns the bibliography.
    #[must_use]
    pub const fn bibliography(&self) -> &Bibliography {
        &self.bibliography
    }

    /// Appends an entry to the bibliography.
    pub fn add_entry(&mut self, entry: Entry) {
        self.bibliography.entries.push(entry);
    }

    /// Replaces the preamble.
    pub fn set_preamble(&mut self, preamble: impl Into<String>) {
        self.bibliography.preamble = Some(preamble.into());
    }

    /// Parses `source` and makes it the session's style.
    ///
    /// # Errors
    ///
    /// Returns a parse error; the previous style stays loaded.
    pub fn load_style(&mut self, source: &str) -> Result<()> {
        let vm = Vm::from_source(source)?.with_config(self.config.clone());
        debug!(commands = vm.style().len(), "loaded style");
        self.vm = Some(vm);
        self.style_path = None;
        Ok(())
    }

    /// Reads and parses a style file.
    ///
    /// Errors raised later while rendering carry the file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::Internal(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        })?;
        let name = path.display().to_string();
        let parsed = Vm::from_source(&source).map_err(|e| with_source(e, &name))?;
        self.config = self.config.clone().with_source_name(name);
        self.vm = Some(parsed.with_config(self.config.clone()));
        self.style_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Returns the path of the style loaded from disk, if any.
    #[must_use]
    pub fn style_path(&self) -> Option<&Path> {
        self.style_path.as_deref()
    }

    /// Returns true if a style is loaded.
    #[must_use]
    pub const fn has_style(&self) -> bool {
        self.vm.is_some()
    }

    /// Runs the loaded style and returns its output.
    ///
    /// The context of a successful render is kept and available from
    /// [`Session::last_context`].
    ///
    /// # Errors
    ///
    /// Returns an error if no style is loaded or the render fails.
    pub fn render(&mut self) -> Result<String> {
        let vm = self
            .vm
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::Internal("no style loaded".to_string())))?;
        let ctx = vm.execute(&self.bibliography)?;
        let output = ctx.output().to_string();
        self.last = Some(ctx);
        Ok(output)
    }

    /// Returns the context left by the last successful render.
    #[must_use]
    pub const fn last_context(&self) -> Option<&Context> {
        self.last.as_ref()
    }

    /// Creates an empty context over this session's bibliography.
    #[must_use]
    pub fn fresh_context(&self) -> Context {
        Context::new(&self.bibliography, self.config.clone())
    }
}

/// Attaches a source name to a parse error that has none.
fn with_source(mut err: Error, name: &str) -> Error {
    let context = err.context.take().unwrap_or_default();
    if context.source.is_some() {
        return err.with_context(context);
    }
    err.with_context(context.with_source(name))
}
