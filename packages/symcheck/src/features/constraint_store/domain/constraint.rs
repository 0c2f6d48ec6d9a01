//! Constraint Model
//!
//! A constraint is a boolean term tagged with its role:
//! - Assumption: `assuming(y > 0)` restricts every later obligation
//! - Obligation: the negation of a `check(...)`, searched for a counterexample

use crate::errors::{EngineError, Result};
use crate::features::symbolic::{Sort, SymbolicInt, Term};
use crate::shared::models::SourceLocation;
use std::fmt;

/// Role of a constraint in a satisfiability query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Path assumption
    Assumption,

    /// Negated user check
    Obligation,
}

/// Boolean term tagged as assumption or obligation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    term: Term,
    kind: ConstraintKind,
    location: Option<SourceLocation>,
}

impl Constraint {
    /// Create an assumption; the term must be boolean
    pub fn assumption(term: Term) -> Result<Self> {
        Self::new(term, ConstraintKind::Assumption)
    }

    /// Create an obligation from a check condition: stores `¬condition`
    pub fn obligation(condition: Term) -> Result<Self> {
        Self::ensure_bool(&condition, "check")?;
        Ok(Self {
            term: condition.negate()?,
            kind: ConstraintKind::Obligation,
            location: None,
        })
    }

    fn new(term: Term, kind: ConstraintKind) -> Result<Self> {
        Self::ensure_bool(&term, "assume")?;
        Ok(Self {
            term,
            kind,
            location: None,
        })
    }

    fn ensure_bool(term: &Term, operation: &str) -> Result<()> {
        match term.sort() {
            Sort::Bool => Ok(()),
            found => Err(EngineError::sort_mismatch(
                format!("{}({})", operation, term),
                Sort::Bool,
                found,
            )),
        }
    }

    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn term(&self) -> &Term {
        &self.term
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    pub fn is_obligation(&self) -> bool {
        self.kind == ConstraintKind::Obligation
    }

    /// Symbols referenced by this constraint
    pub fn variables(&self) -> Vec<&SymbolicInt> {
        self.term.symbols()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConstraintKind::Assumption => write!(f, "assume {}", self.term),
            ConstraintKind::Obligation => write!(f, "goal {}", self.term),
        }
    }
}
