//! Source location types
//!
//! Every declaration, assumption and check carries the position it came from,
//! so verdicts and diagnostics can point back at the fixture.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a program item (1-based line and column)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Location for items built programmatically: line = item index + 1
    pub fn synthetic(file: impl Into<String>, index: usize) -> Self {
        Self::new(file, index as u32 + 1, 1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
