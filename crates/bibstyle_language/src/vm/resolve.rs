//! Identifier resolution.
//!
//! Bare identifiers are resolved every time they execute, against whatever
//! the context holds at that moment. Candidates are tried in a fixed order:
//! builtins, style functions and macros, string variables, integer
//! variables, then entry fields. Within each variable kind globals come
//! before entry locals.

use super::context::{Context, Function};
use super::native::{self, NativeFn};

/// Where a variable lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Declared by STRINGS or INTEGERS.
    Global,
    /// Declared by ENTRY, one slot per entry.
    Entry,
}

/// What an identifier denotes.
#[derive(Clone)]
pub enum Resolution {
    /// A native function.
    Builtin(NativeFn),
    /// A FUNCTION or MACRO definition.
    UserFunction(Function),
    /// A string variable.
    StringVar(Scope),
    /// An integer variable.
    IntVar(Scope),
    /// A field declared by ENTRY.
    EntryField,
}

impl Context {
    /// Resolves `name` against the current state.
    ///
    /// Resolution only consults declarations, so entry-scoped names resolve
    /// even when no entry is current; reading them then fails.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Resolution> {
        if let Some(f) = native::lookup(name) {
            return Some(Resolution::Builtin(f));
        }
        if let Some(f) = self.functions.get(name) {
            return Some(Resolution::UserFunction(f.clone()));
        }
        if self.strings.contains_key(name) {
            return Some(Resolution::StringVar(Scope::Global));
        }
        if self.is_entry_string(name) {
            return Some(Resolution::StringVar(Scope::Entry));
        }
        if self.integers.contains_key(name) {
            return Some(Resolution::IntVar(Scope::Global));
        }
        if self.is_entry_integer(name) {
            return Some(Resolution::IntVar(Scope::Entry));
        }
        if self.is_entry_field(name) {
            return Some(Resolution::EntryField);
        }
        None
    }
}
