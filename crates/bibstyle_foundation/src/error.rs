//! Error types for the bibstyle system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every error is fatal to the render that raised it.

use std::fmt;

use thiserror::Error;

use crate::types::ValueKind;

/// The main error type for bibstyle operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records that the error propagated out of `frame`.
    ///
    /// Frames accumulate innermost first, so the resulting stack reads like a
    /// backtrace.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(frame));
        self
    }

    /// Creates a parse error at the given position.
    #[must_use]
    pub fn parse(message: impl Into<String>, line: u32, column: u32, context: String) -> Self {
        Self::new(ErrorKind::ParseError {
            message: message.into(),
            line,
            column,
            context,
        })
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(operation: impl Into<String>, expected: ValueKind, actual: ValueKind) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            operation: operation.into(),
            expected,
            actual,
        })
    }

    /// Creates an unbound name error.
    #[must_use]
    pub fn unbound_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnboundName(name.into()))
    }

    /// Creates a stack underflow error.
    #[must_use]
    pub fn stack_underflow(operation: impl Into<String>) -> Self {
        Self::new(ErrorKind::StackUnderflow(operation.into()))
    }

    /// Creates a dispatch error for an entry type with no handler.
    #[must_use]
    pub fn dispatch(entry_type: impl Into<String>) -> Self {
        Self::new(ErrorKind::Dispatch(entry_type.into()))
    }

    /// Creates an error for an entry-scoped operation run without a current entry.
    #[must_use]
    pub fn no_current_entry(operation: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoCurrentEntry(operation.into()))
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument {
            operation: operation.into(),
            message: message.into(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Malformed style source.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// An operand had the wrong kind.
    #[error("type mismatch in {operation}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The operation that checked the operand.
        operation: String,
        /// The expected kind.
        expected: ValueKind,
        /// The kind encountered.
        actual: ValueKind,
    },

    /// An identifier resolved to nothing.
    #[error("unbound name: {0}")]
    UnboundName(String),

    /// Pop on an empty operand stack.
    #[error("stack underflow in {0}")]
    StackUnderflow(String),

    /// `call.type$` found neither a type function nor `default.type`.
    #[error("no function for entry type {0} and no default.type")]
    Dispatch(String),

    /// An entry-scoped operation ran outside ITERATE/REVERSE.
    #[error("{0} requires a current entry")]
    NoCurrentEntry(String),

    /// An operand had the right kind but an unusable value.
    #[error("invalid argument to {operation}: {message}")]
    InvalidArgument {
        /// The operation that rejected the operand.
        operation: String,
        /// What was wrong with it.
        message: String,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Style file name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Commands and functions the error propagated through, innermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            line: None,
            column: None,
            stack: Vec::new(),
        }
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
