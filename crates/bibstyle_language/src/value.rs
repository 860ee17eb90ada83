//! Values on the operand stack.

use std::fmt;

use bibstyle_foundation::ValueKind;

use crate::ast::Block;

/// The symbolic `TRUE` integer pushed by predicates.
pub const TRUE: i32 = 1;
/// The symbolic `FALSE` integer pushed by predicates.
pub const FALSE: i32 = 0;

/// A value on the operand stack.
///
/// Values are cheap to clone: blocks share their token sequence.
#[derive(Clone, PartialEq)]
pub enum StackValue {
    /// Signed 32-bit integer.
    Integer(i32),
    /// Owned text, possibly containing brace groups.
    Text(String),
    /// A function reference awaiting a control construct or assignment.
    Function(FunctionRef),
    /// Absence marker: an undefined field or an uninitialized string.
    Missing,
}

/// A deferred function: either a quoted name or a block literal.
///
/// Control constructs pop these and interpret them explicitly; nothing is
/// captured from the environment.
#[derive(Clone, PartialEq)]
pub enum FunctionRef {
    /// A name pushed by a quote literal such as `'skip$`.
    Named(String),
    /// A token sequence pushed by a block literal such as `{ pop$ "" }`.
    Block(Block),
}

impl StackValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Creates a boolean integer (`1` or `0`).
    #[must_use]
    pub const fn boolean(b: bool) -> Self {
        Self::Integer(if b { TRUE } else { FALSE })
    }

    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Integer(_) => ValueKind::Integer,
            Self::Text(_) => ValueKind::Text,
            Self::Function(_) => ValueKind::Function,
            Self::Missing => ValueKind::Missing,
        }
    }

    /// Returns true if this is the missing marker.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Attempts to extract an integer.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to extract a text reference.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Converts an optional string slot into a value, `None` being missing.
    #[must_use]
    pub fn from_slot(slot: Option<&String>) -> Self {
        slot.map_or(Self::Missing, |s| Self::Text(s.clone()))
    }
}

impl From<i32> for StackValue {
    fn from(n: i32) -> Self {
        Self::Integer(n)
    }
}

impl From<&str> for StackValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for StackValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Debug for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Function(func) => write!(f, "{func:?}"),
            Self::Missing => write!(f, "<missing>"),
        }
    }
}

/// Displays values the way `top$` and `stack$` print them.
impl fmt::Display for StackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::Function(func) => write!(f, "{func:?}"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

impl fmt::Debug for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "'{name}"),
            Self::Block(block) => write!(f, "{{ {} items }}", block.len()),
        }
    }
}
