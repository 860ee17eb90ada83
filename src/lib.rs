//! bibstyle - A stack-based virtual machine for BibTeX bibliography styles
//!
//! This crate re-exports all layers of the bibstyle system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: bibstyle_runtime    - Render session, REPL, CLI
//! Layer 1: bibstyle_language   - Lexer, parser, stack VM, builtins
//! Layer 0: bibstyle_foundation - Core types (ValueKind, Error, Entry)
//! ```

pub use bibstyle_foundation as foundation;
pub use bibstyle_language as language;
pub use bibstyle_runtime as runtime;
