//! Kind descriptors for stack values.

use std::fmt;

/// The kind of a value on the operand stack.
///
/// Used by type checks in built-in functions and for error reporting. The
/// values themselves live in the language crate; this is the part the error
/// taxonomy needs to name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Signed 32-bit integer.
    Integer,
    /// Text (any string, including literal braces).
    Text,
    /// A function reference: a quoted name or a deferred block.
    Function,
    /// The absence marker for undefined fields and uninitialized strings.
    Missing,
}

impl ValueKind {
    /// Returns a human-readable name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Text => "string",
            Self::Function => "function",
            Self::Missing => "missing",
        }
    }

    /// Returns true if a value of `actual` kind may be stored where this kind is declared.
    ///
    /// String variables accept `Missing` as well as text.
    #[must_use]
    pub const fn accepts(self, actual: ValueKind) -> bool {
        matches!(
            (self, actual),
            (Self::Integer, Self::Integer)
                | (Self::Text, Self::Text | Self::Missing)
                | (Self::Function, Self::Function)
                | (Self::Missing, Self::Missing)
        )
    }
}

impl fmt::Debug for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
