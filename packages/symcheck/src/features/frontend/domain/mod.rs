//! Fixture Front-end - Domain
//!
//! Port for turning fixture source text into a [`Program`], and the errors a
//! front-end can report.

use crate::features::execution::Program;
use crate::shared::models::SourceLocation;
use thiserror::Error;

/// Fixture parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    /// Valid C outside the supported fixture subset
    #[error("unsupported construct `{construct}` at {location}")]
    Unsupported {
        construct: String,
        location: SourceLocation,
    },

    /// Source does not parse
    #[error("syntax error at {location}: {message}")]
    Syntax {
        message: String,
        location: SourceLocation,
    },

    /// No `main` function to execute
    #[error("no `main` function in {0}")]
    MissingMain(String),

    /// Grammar could not be loaded into the parser
    #[error("failed to load C grammar: {0}")]
    Grammar(String),
}

impl FrontendError {
    pub fn unsupported(construct: impl Into<String>, location: SourceLocation) -> Self {
        Self::Unsupported {
            construct: construct.into(),
            location,
        }
    }
}

/// Fixture front-end (port)
pub trait FixtureFrontend {
    /// Parse one fixture file into a program model
    fn parse(&mut self, file_name: &str, source: &str) -> Result<Program, FrontendError>;

    /// Source language name, e.g. "c"
    fn language(&self) -> &str;
}
