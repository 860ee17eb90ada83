//! Core types for bibstyle.
//!
//! This crate provides:
//! - [`ValueKind`] - Kind descriptors for operand stack values
//! - [`Error`] - Rich error types with context
//! - [`Entry`] and [`Bibliography`] - The read-only input a style renders

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entry;
pub mod error;
pub mod types;

pub use entry::{Bibliography, Entry};
pub use error::{Error, ErrorContext, ErrorKind};
pub use types::ValueKind;

/// Result type alias using bibstyle's error type.
pub type Result<T> = std::result::Result<T, Error>;
