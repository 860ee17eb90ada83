//! Cross-layer integration tests for bibstyle
//!
//! Tests that run whole styles through the VM and the runtime session.

mod properties;
mod runtime;
mod styles;
