//! Error types for symcheck
//!
//! Construction-time errors are fatal to the run that raised them. Solver
//! failures never show up here: the solver adapter recovers them as
//! `Verdict::Unknown`.

use crate::config::ConfigError;
use crate::features::frontend::FrontendError;
use crate::shared::models::SourceLocation;
use thiserror::Error;

/// Main error type for symcheck operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Operands of a binary operator have different bit widths
    #[error("width mismatch in `{lhs} {op} {rhs}`: {lhs_type} vs {rhs_type}{}", at(.location))]
    WidthMismatch {
        op: String,
        lhs: String,
        rhs: String,
        lhs_type: String,
        rhs_type: String,
        location: Option<SourceLocation>,
    },

    /// Boolean term used where a bitvector is required, or the reverse
    #[error("sort mismatch in `{operation}`: expected {expected}, found {found}{}", at(.location))]
    SortMismatch {
        operation: String,
        expected: String,
        found: String,
        location: Option<SourceLocation>,
    },

    /// Reference to a symbol that was never declared in this run
    #[error("undeclared symbol `{name}`{}", at(.location))]
    UndeclaredSymbol {
        name: String,
        location: Option<SourceLocation>,
    },

    /// A symbol name was declared twice in one run
    #[error("symbol `{name}` is already declared{}", at(.location))]
    DuplicateSymbol {
        name: String,
        location: Option<SourceLocation>,
    },

    /// Literal does not fit in its target width
    #[error("literal {value} does not fit in {ty}{}", at(.location))]
    LiteralOutOfRange {
        value: i128,
        ty: String,
        location: Option<SourceLocation>,
    },

    /// Fixture front-end failure
    #[error(transparent)]
    Frontend(#[from] FrontendError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn at(location: &Option<SourceLocation>) -> String {
    match location {
        Some(loc) => format!(" at {}", loc),
        None => String::new(),
    }
}

impl EngineError {
    /// Create a width mismatch error for `lhs op rhs`
    pub fn width_mismatch(
        op: impl Into<String>,
        lhs: impl ToString,
        rhs: impl ToString,
        lhs_type: impl ToString,
        rhs_type: impl ToString,
    ) -> Self {
        Self::WidthMismatch {
            op: op.into(),
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
            lhs_type: lhs_type.to_string(),
            rhs_type: rhs_type.to_string(),
            location: None,
        }
    }

    /// Create a sort mismatch error
    pub fn sort_mismatch(
        operation: impl Into<String>,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        Self::SortMismatch {
            operation: operation.into(),
            expected: expected.to_string(),
            found: found.to_string(),
            location: None,
        }
    }

    /// Create an undeclared symbol error
    pub fn undeclared(name: impl Into<String>) -> Self {
        Self::UndeclaredSymbol {
            name: name.into(),
            location: None,
        }
    }

    /// Create a duplicate declaration error
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateSymbol {
            name: name.into(),
            location: None,
        }
    }

    /// Attach a source location if the error does not carry one yet
    pub fn with_location(mut self, loc: &SourceLocation) -> Self {
        match &mut self {
            Self::WidthMismatch { location, .. }
            | Self::SortMismatch { location, .. }
            | Self::UndeclaredSymbol { location, .. }
            | Self::DuplicateSymbol { location, .. }
            | Self::LiteralOutOfRange { location, .. } => {
                if location.is_none() {
                    *location = Some(loc.clone());
                }
            }
            Self::Frontend(_) | Self::Config(_) | Self::Serialization(_) => {}
        }
        self
    }

    /// Location attached to a construction-time error
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::WidthMismatch { location, .. }
            | Self::SortMismatch { location, .. }
            | Self::UndeclaredSymbol { location, .. }
            | Self::DuplicateSymbol { location, .. }
            | Self::LiteralOutOfRange { location, .. } => location.as_ref(),
            Self::Frontend(_) | Self::Config(_) | Self::Serialization(_) => None,
        }
    }
}

/// Result type alias for symcheck operations
pub type Result<T> = std::result::Result<T, EngineError>;
