//! Lexer, parser, and stack VM for BibTeX bibliography styles.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of `.bst` source
//! - [`Parser`] - Parsing tokens into a [`Style`] of top-level commands
//! - [`Vm`] - The stack machine that runs a style against a bibliography
//! - [`text`] - The brace-aware text algorithms behind the string builtins
//!
//! # Example
//!
//! ```
//! use bibstyle_foundation::{Bibliography, Entry};
//! use bibstyle_language::render;
//!
//! let style = r#"
//!     ENTRY { title } { } { }
//!     READ
//!     FUNCTION { show } { cite$ ": " * title * write$ newline$ }
//!     ITERATE { show }
//! "#;
//! let bib = Bibliography::new()
//!     .with_entry(Entry::new("book", "knuth84").with_field("title", "The TeXbook"));
//!
//! assert_eq!(render(style, &bib).unwrap(), "knuth84: The TeXbook\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod config;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod text;
pub mod token;
pub mod value;
pub mod vm;

pub use ast::{Block, Command, CommandKind, Item, Style};
pub use config::VmConfig;
pub use lexer::Lexer;
pub use parser::{MAX_NESTING_DEPTH, Parser, parse, parse_items};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use value::{FALSE, FunctionRef, StackValue, TRUE};
pub use vm::{BUILTIN_NAMES, Context, EntryState, Function, Resolution, Scope, Vm, render};
