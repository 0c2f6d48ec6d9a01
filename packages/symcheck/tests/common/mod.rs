//! Common test utilities for symcheck
//!
//! Shared fixtures, assertions, and program builders for integration tests.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
