//! Mutable state for one render.
//!
//! A [`Context`] is created from a bibliography, mutated by the commands of
//! one style, and discarded afterwards. Nothing in it is shared between
//! renders.

use std::collections::HashMap;

use bibstyle_foundation::{Bibliography, Entry, Error, Result, ValueKind};

use crate::ast::Block;
use crate::config::VmConfig;
use crate::value::{FunctionRef, StackValue};

/// Entry-local string every entry owns; SORT orders by it.
pub const SORT_KEY: &str = "sort.key$";

/// Field every ENTRY command declares implicitly.
pub const CROSSREF: &str = "crossref";

// =============================================================================
// Functions
// =============================================================================

/// A function defined by the style.
#[derive(Clone, Debug, PartialEq)]
pub enum Function {
    /// Installed by FUNCTION; runs its block.
    User(Block),
    /// Installed by MACRO; pushes its replacement text.
    Macro(String),
}

// =============================================================================
// Entries
// =============================================================================

/// One entry together with the slots the style declared for it.
#[derive(Clone, Debug)]
pub struct EntryState {
    source: Entry,
    fields: HashMap<String, Option<String>>,
    strings: HashMap<String, Option<String>>,
    integers: HashMap<String, i32>,
}

impl EntryState {
    fn new(source: Entry) -> Self {
        let mut strings = HashMap::new();
        strings.insert(SORT_KEY.to_string(), None);
        Self {
            source,
            fields: HashMap::new(),
            strings,
            integers: HashMap::new(),
        }
    }

    /// Returns the record this state wraps.
    #[must_use]
    pub fn source(&self) -> &Entry {
        &self.source
    }

    /// Returns the citation key.
    #[must_use]
    pub fn citation_key(&self) -> &str {
        &self.source.citation_key
    }

    /// Returns the field as read by READ, or missing.
    #[must_use]
    pub fn field(&self, name: &str) -> StackValue {
        StackValue::from_slot(self.fields.get(name).and_then(Option::as_ref))
    }

    /// Returns an entry-local string, or `None` if it was never declared.
    #[must_use]
    pub fn string(&self, name: &str) -> Option<StackValue> {
        self.strings
            .get(name)
            .map(|slot| StackValue::from_slot(slot.as_ref()))
    }

    /// Returns an entry-local integer, or `None` if it was never declared.
    #[must_use]
    pub fn integer(&self, name: &str) -> Option<i32> {
        self.integers.get(name).copied()
    }

    /// Returns the sort key, empty while it is unset.
    #[must_use]
    pub fn sort_key(&self) -> &str {
        self.strings
            .get(SORT_KEY)
            .and_then(Option::as_deref)
            .unwrap_or_default()
    }
}

// =============================================================================
// Context
// =============================================================================

/// The state of one render.
pub struct Context {
    pub(crate) stack: Vec<StackValue>,
    pub(crate) functions: HashMap<String, Function>,
    pub(crate) strings: HashMap<String, Option<String>>,
    pub(crate) integers: HashMap<String, i32>,
    pub(crate) entries: Vec<EntryState>,
    pub(crate) current: Option<usize>,
    pub(crate) entry_fields: Vec<String>,
    pub(crate) entry_strings: Vec<String>,
    pub(crate) entry_integers: Vec<String>,
    pub(crate) macros: HashMap<String, String>,
    pub(crate) preamble: Option<String>,
    pub(crate) output: String,
    pub(crate) warnings: Vec<String>,
    pub(crate) config: VmConfig,
    pub(crate) depth: usize,
}

impl Context {
    /// Creates a fresh context over the given bibliography.
    #[must_use]
    pub fn new(bibliography: &Bibliography, config: VmConfig) -> Self {
        Self {
            stack: Vec::with_capacity(64),
            functions: HashMap::new(),
            strings: HashMap::new(),
            integers: HashMap::new(),
            entries: bibliography
                .entries
                .iter()
                .cloned()
                .map(EntryState::new)
                .collect(),
            current: None,
            entry_fields: Vec::new(),
            entry_strings: Vec::new(),
            entry_integers: Vec::new(),
            macros: HashMap::new(),
            preamble: bibliography.preamble.clone(),
            output: String::new(),
            warnings: Vec::new(),
            config,
            depth: 0,
        }
    }

    /// Returns the configuration this context runs with.
    #[must_use]
    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    // -------------------------------------------------------------------------
    // Operand stack
    // -------------------------------------------------------------------------

    /// Returns the operand stack, bottom first.
    #[must_use]
    pub fn stack(&self) -> &[StackValue] {
        &self.stack
    }

    /// Removes and returns every value on the stack, bottom first.
    pub fn take_stack(&mut self) -> Vec<StackValue> {
        std::mem::take(&mut self.stack)
    }

    /// Pushes a value.
    pub fn push(&mut self, value: impl Into<StackValue>) {
        self.stack.push(value.into());
    }

    /// Pops any value.
    ///
    /// # Errors
    /// Returns `StackUnderflow` naming `operation` if the stack is empty.
    pub fn pop(&mut self, operation: &str) -> Result<StackValue> {
        self.stack
            .pop()
            .ok_or_else(|| Error::stack_underflow(operation))
    }

    /// Returns the top value without removing it.
    ///
    /// # Errors
    /// Returns `StackUnderflow` naming `operation` if the stack is empty.
    pub fn peek(&self, operation: &str) -> Result<&StackValue> {
        self.stack
            .last()
            .ok_or_else(|| Error::stack_underflow(operation))
    }

    /// Pops an integer.
    ///
    /// # Errors
    /// Returns `StackUnderflow` or `TypeMismatch`.
    pub fn pop_integer(&mut self, operation: &str) -> Result<i32> {
        match self.pop(operation)? {
            StackValue::Integer(n) => Ok(n),
            other => Err(Error::type_mismatch(operation, ValueKind::Integer, other.kind())),
        }
    }

    /// Pops text. Missing is rejected.
    ///
    /// # Errors
    /// Returns `StackUnderflow` or `TypeMismatch`.
    pub fn pop_text(&mut self, operation: &str) -> Result<String> {
        match self.pop(operation)? {
            StackValue::Text(s) => Ok(s),
            other => Err(Error::type_mismatch(operation, ValueKind::Text, other.kind())),
        }
    }

    /// Pops a function reference.
    ///
    /// # Errors
    /// Returns `StackUnderflow` or `TypeMismatch`.
    pub fn pop_function(&mut self, operation: &str) -> Result<FunctionRef> {
        match self.pop(operation)? {
            StackValue::Function(f) => Ok(f),
            other => Err(Error::type_mismatch(operation, ValueKind::Function, other.kind())),
        }
    }

    // -------------------------------------------------------------------------
    // Entries
    // -------------------------------------------------------------------------

    /// Returns the entries in their current order.
    #[must_use]
    pub fn entries(&self) -> &[EntryState] {
        &self.entries
    }

    /// Returns the entry bound by ITERATE or REVERSE, if any.
    #[must_use]
    pub fn current_entry(&self) -> Option<&EntryState> {
        self.current.and_then(|i| self.entries.get(i))
    }

    /// Returns the current entry or fails on behalf of `operation`.
    ///
    /// # Errors
    /// Returns `NoCurrentEntry` outside ITERATE and REVERSE.
    pub fn require_entry(&self, operation: &str) -> Result<&EntryState> {
        self.current_entry()
            .ok_or_else(|| Error::no_current_entry(operation))
    }

    fn require_entry_mut(&mut self, operation: &str) -> Result<&mut EntryState> {
        match self.current {
            Some(i) => self
                .entries
                .get_mut(i)
                .ok_or_else(|| Error::no_current_entry(operation)),
            None => Err(Error::no_current_entry(operation)),
        }
    }

    /// Returns the preamble, empty if the bibliography had none.
    #[must_use]
    pub fn preamble(&self) -> &str {
        self.preamble.as_deref().unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Variables and functions
    // -------------------------------------------------------------------------

    /// Returns a global string variable, or `None` if it was never declared.
    #[must_use]
    pub fn global_string(&self, name: &str) -> Option<StackValue> {
        self.strings
            .get(name)
            .map(|slot| StackValue::from_slot(slot.as_ref()))
    }

    /// Returns a global integer variable, or `None` if it was never declared.
    #[must_use]
    pub fn global_integer(&self, name: &str) -> Option<i32> {
        self.integers.get(name).copied()
    }

    /// Returns the style-defined function with this name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Iterates over the names of all style-defined functions and macros.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Returns true if `name` is an ENTRY-declared string or `sort.key$`.
    pub(crate) fn is_entry_string(&self, name: &str) -> bool {
        name == SORT_KEY || self.entry_strings.iter().any(|s| s == name)
    }

    pub(crate) fn is_entry_integer(&self, name: &str) -> bool {
        self.entry_integers.iter().any(|s| s == name)
    }

    pub(crate) fn is_entry_field(&self, name: &str) -> bool {
        self.entry_fields.iter().any(|s| s == name)
    }

    /// Reads an entry-local string of the current entry.
    pub(crate) fn entry_string(&self, name: &str) -> Result<StackValue> {
        let entry = self.require_entry(name)?;
        Ok(entry.string(name).unwrap_or(StackValue::Missing))
    }

    /// Reads an entry-local integer of the current entry.
    pub(crate) fn entry_integer(&self, name: &str) -> Result<i32> {
        let entry = self.require_entry(name)?;
        Ok(entry.integer(name).unwrap_or_default())
    }

    /// Reads a declared field of the current entry.
    pub(crate) fn entry_field(&self, name: &str) -> Result<StackValue> {
        Ok(self.require_entry(name)?.field(name))
    }

    /// Stores `value` into the variable `name`, checking its declared kind.
    ///
    /// Globals shadow entry locals of the same name.
    ///
    /// # Errors
    /// Returns `TypeMismatch` for a value of the wrong kind, `NoCurrentEntry`
    /// for an entry local outside ITERATE/REVERSE, `InvalidArgument` when the
    /// name is a function or field, and `UnboundName` otherwise.
    pub fn assign(&mut self, name: &str, value: StackValue) -> Result<()> {
        const OP: &str = ":=";
        if self.strings.contains_key(name) || self.is_entry_string(name) {
            let slot = match value {
                StackValue::Text(s) => Some(s),
                StackValue::Missing => None,
                other => return Err(Error::type_mismatch(OP, ValueKind::Text, other.kind())),
            };
            if let Some(global) = self.strings.get_mut(name) {
                *global = slot;
            } else {
                let entry = self.require_entry_mut(name)?;
                entry.strings.insert(name.to_string(), slot);
            }
            return Ok(());
        }

        if self.integers.contains_key(name) || self.is_entry_integer(name) {
            let StackValue::Integer(n) = value else {
                return Err(Error::type_mismatch(OP, ValueKind::Integer, value.kind()));
            };
            if let Some(global) = self.integers.get_mut(name) {
                *global = n;
            } else {
                let entry = self.require_entry_mut(name)?;
                entry.integers.insert(name.to_string(), n);
            }
            return Ok(());
        }

        if self.resolve(name).is_some() {
            Err(Error::invalid_argument(
                OP,
                format!("{name} is not a variable"),
            ))
        } else {
            Err(Error::unbound_name(name))
        }
    }

    // -------------------------------------------------------------------------
    // Declarations (driven by commands)
    // -------------------------------------------------------------------------

    pub(crate) fn declare_strings(&mut self, names: &[String]) {
        for name in names {
            self.strings.insert(name.clone(), None);
        }
    }

    pub(crate) fn declare_integers(&mut self, names: &[String]) {
        for name in names {
            self.integers.insert(name.clone(), 0);
        }
    }

    /// Declares fields and entry locals, resetting every entry's slots.
    pub(crate) fn declare_entry(&mut self, fields: &[String], integers: &[String], strings: &[String]) {
        self.entry_fields = fields.to_vec();
        if !self.is_entry_field(CROSSREF) {
            self.entry_fields.push(CROSSREF.to_string());
        }
        self.entry_integers = integers.to_vec();
        self.entry_strings = strings.to_vec();

        for entry in &mut self.entries {
            entry.fields.clear();
            entry.integers = integers.iter().map(|n| (n.clone(), 0)).collect();
            let sort_key = entry.strings.remove(SORT_KEY).flatten();
            entry.strings = strings.iter().map(|n| (n.clone(), None)).collect();
            entry.strings.insert(SORT_KEY.to_string(), sort_key);
        }
    }

    pub(crate) fn define_function(&mut self, name: &str, function: Function) {
        self.functions.insert(name.to_string(), function);
    }

    pub(crate) fn define_macro(&mut self, name: &str, text: &str) {
        self.macros.insert(name.to_lowercase(), text.to_string());
        self.define_function(name, Function::Macro(text.to_string()));
    }

    /// Copies declared fields from each source record, expanding macros.
    ///
    /// A field value that is exactly a macro name (ignoring case and
    /// surrounding whitespace) is replaced by the macro text.
    pub(crate) fn read_entries(&mut self) {
        let macros = &self.macros;
        for entry in &mut self.entries {
            let fields = self
                .entry_fields
                .iter()
                .map(|name| {
                    let value = entry.source.field(name).map(|raw| {
                        macros
                            .get(&raw.trim().to_lowercase())
                            .map_or_else(|| raw.to_string(), Clone::clone)
                    });
                    (name.clone(), value)
                })
                .collect();
            entry.fields = fields;
        }
    }

    /// Stable sort by sort key, byte-wise ascending.
    pub(crate) fn sort_entries(&mut self) {
        self.entries
            .sort_by(|a, b| a.sort_key().as_bytes().cmp(b.sort_key().as_bytes()));
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Returns the output produced so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consumes the context and returns its output.
    #[must_use]
    pub fn into_output(self) -> String {
        self.output
    }

    /// Returns the messages issued by `warning$`.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub(crate) fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub(crate) fn record_warning(&mut self, message: String) {
        if self.config.record_warnings {
            self.warnings.push(message);
        }
    }
}
