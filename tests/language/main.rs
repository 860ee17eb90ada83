//! Integration tests for Layer 1: Language
//!
//! Tests for lexer, parser, VM, and the builtin text algorithms.

mod lexer;
mod parser;
mod text;
mod vm;
