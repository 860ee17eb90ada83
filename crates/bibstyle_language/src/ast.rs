//! Abstract syntax tree for style files.
//!
//! A style is a flat sequence of top-level [`Command`]s. Function bodies are
//! [`Block`]s: token sequences that stay unevaluated until they are invoked.

use std::fmt;
use std::sync::Arc;

use crate::span::Span;

/// One element of a block body.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    /// Integer literal like `#42`
    Integer(i32, Span),
    /// String literal like `"hello"`
    Text(String, Span),
    /// Quoted name like `'skip$`; pushes a function reference
    Quote(String, Span),
    /// Bare identifier; resolved and invoked when executed
    Identifier(String, Span),
    /// Nested block literal; pushes a function reference
    Block(Block),
}

impl Item {
    /// Returns the source span of this item.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Integer(_, s) | Self::Text(_, s) | Self::Quote(_, s) | Self::Identifier(_, s) => {
                *s
            }
            Self::Block(block) => block.span,
        }
    }
}

/// A braced token sequence.
///
/// The items are shared, so pushing a block onto the operand stack or
/// binding it as a function never copies the body.
#[derive(Clone, PartialEq)]
pub struct Block {
    items: Arc<[Item]>,
    span: Span,
}

impl Block {
    /// Creates a block from its items.
    #[must_use]
    pub fn new(items: Vec<Item>, span: Span) -> Self {
        Self {
            items: items.into(),
            span,
        }
    }

    /// Returns the items of this block.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the block has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the source span of the block including its braces.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

/// A top-level command with its source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    /// What the command does.
    pub kind: CommandKind,
    /// Where the command starts and ends.
    pub span: Span,
}

/// The ten top-level commands.
///
/// All names are stored lowercased.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandKind {
    /// `ENTRY {fields} {integers} {strings}`
    Entry {
        /// Field names to read from each entry.
        fields: Vec<String>,
        /// Per-entry integer variables.
        integers: Vec<String>,
        /// Per-entry string variables.
        strings: Vec<String>,
    },
    /// `STRINGS {names}`
    Strings(Vec<String>),
    /// `INTEGERS {names}`
    Integers(Vec<String>),
    /// `FUNCTION {name} {body}`
    Function {
        /// The function name.
        name: String,
        /// The body, run on each invocation.
        body: Block,
    },
    /// `MACRO {name} {"text"}`
    Macro {
        /// The macro name.
        name: String,
        /// Replacement text.
        text: String,
    },
    /// `READ`
    Read,
    /// `SORT`
    Sort,
    /// `ITERATE {function}`
    Iterate(String),
    /// `REVERSE {function}`
    Reverse(String),
    /// `EXECUTE {function}`
    Execute(String),
}

impl CommandKind {
    /// Returns the keyword that introduces this command.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Entry { .. } => "ENTRY",
            Self::Strings(_) => "STRINGS",
            Self::Integers(_) => "INTEGERS",
            Self::Function { .. } => "FUNCTION",
            Self::Macro { .. } => "MACRO",
            Self::Read => "READ",
            Self::Sort => "SORT",
            Self::Iterate(_) => "ITERATE",
            Self::Reverse(_) => "REVERSE",
            Self::Execute(_) => "EXECUTE",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function { name, .. } | Self::Macro { name, .. } => {
                write!(f, "{} {{{name}}}", self.keyword())
            }
            Self::Iterate(name) | Self::Reverse(name) | Self::Execute(name) => {
                write!(f, "{} {{{name}}}", self.keyword())
            }
            _ => f.write_str(self.keyword()),
        }
    }
}

/// A parsed style file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// Commands in source order.
    pub commands: Vec<Command>,
}

impl Style {
    /// Returns the number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if the style has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates over the command kinds in order.
    pub fn kinds(&self) -> impl Iterator<Item = &CommandKind> {
        self.commands.iter().map(|c| &c.kind)
    }
}
