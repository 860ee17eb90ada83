//! Render session, REPL, and CLI support for bibstyle.
//!
//! This crate provides:
//! - [`Session`] - A loaded style plus the bibliography it renders
//! - [`Repl`] - Interactive read-eval-print loop over one persistent context
//! - [`LineEditor`] - The line editing seam the REPL reads through

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod editor;
mod highlight;
mod repl;
mod session;

pub use editor::{COMMAND_KEYWORDS, LineEditor, META_COMMANDS, ReadResult, RustylineEditor};
pub use highlight::StyleHighlighter;
pub use repl::{Outcome, Repl};
pub use session::Session;
