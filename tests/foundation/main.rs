//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: ValueKind, Error, Entry, and Bibliography.

mod entries;
