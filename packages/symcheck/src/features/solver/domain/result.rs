//! Solver results and failure modes

use crate::features::symbolic::Witness;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Outcome of one satisfiability query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatResult {
    /// Satisfiable, with a value for every symbol occurring in the query
    Sat(Witness),

    /// Unsatisfiable
    Unsat,

    /// The backend could not decide (timeout, budget, backend failure)
    Error(String),
}

impl SatResult {
    pub fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    pub fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsat)
    }

    pub fn witness(&self) -> Option<&Witness> {
        match self {
            Self::Sat(w) => Some(w),
            _ => None,
        }
    }

    pub fn error_reason(&self) -> Option<&str> {
        match self {
            Self::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

impl From<SolverError> for SatResult {
    fn from(err: SolverError) -> Self {
        Self::Error(err.to_string())
    }
}

/// Reasons a query ends without a Sat/Unsat answer.
///
/// Never leaves the solver adapter; it is folded into `SatResult::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("timeout")]
    Timeout,

    #[error("conflict budget exhausted")]
    ConflictBudget,

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("backend '{0}' is not available in this build")]
    BackendUnavailable(&'static str),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("witness validation failed: {0}")]
    WitnessValidation(String),
}

/// Decision procedure used behind the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-crate bit-blaster and CDCL SAT core
    #[default]
    Builtin,

    /// Z3 bitvector theory (requires the `z3` cargo feature)
    Z3,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Z3 => "z3",
        }
    }

    /// Whether this backend was compiled into the current build
    pub fn is_available(&self) -> bool {
        match self {
            Self::Builtin => true,
            Self::Z3 => cfg!(feature = "z3"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "builtin" => Ok(Self::Builtin),
            "z3" => Ok(Self::Z3),
            other => Err(format!("unknown solver backend '{}'", other)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource limits of one backend call
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveBudget {
    pub deadline: Option<Instant>,
    pub max_conflicts: Option<u64>,
}

impl SolveBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Budget starting now
    pub fn new(timeout: Option<Duration>, max_conflicts: Option<u64>) -> Self {
        Self {
            deadline: timeout.map(|t| Instant::now() + t),
            max_conflicts,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    pub fn conflicts_exhausted(&self, conflicts: u64) -> bool {
        self.max_conflicts.is_some_and(|max| conflicts >= max)
    }

    /// Milliseconds left before the deadline (at least 1)
    pub fn remaining_ms(&self) -> Option<u64> {
        self.deadline.map(|d| {
            let left = d.saturating_duration_since(Instant::now()).as_millis();
            u64::try_from(left).unwrap_or(u64::MAX).max(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_error_becomes_sat_error() {
        assert_eq!(
            SatResult::from(SolverError::Timeout),
            SatResult::Error("timeout".to_string())
        );
        assert_eq!(
            SatResult::from(SolverError::ConflictBudget).error_reason(),
            Some("conflict budget exhausted")
        );
    }

    #[test]
    fn test_backend_kind_parsing() {
        assert_eq!("builtin".parse::<BackendKind>(), Ok(BackendKind::Builtin));
        assert_eq!("Z3".parse::<BackendKind>(), Ok(BackendKind::Z3));
        assert!("cvc5".parse::<BackendKind>().is_err());
        assert!(BackendKind::Builtin.is_available());
        assert_eq!(BackendKind::Z3.is_available(), cfg!(feature = "z3"));
    }

    #[test]
    fn test_budget() {
        let unlimited = SolveBudget::unlimited();
        assert!(!unlimited.expired());
        assert!(!unlimited.conflicts_exhausted(u64::MAX));
        assert_eq!(unlimited.remaining_ms(), None);

        let past = SolveBudget::unlimited().with_deadline(Instant::now());
        assert!(past.expired());
        assert_eq!(past.remaining_ms(), Some(1));

        let capped = SolveBudget::new(None, Some(10));
        assert!(!capped.conflicts_exhausted(9));
        assert!(capped.conflicts_exhausted(10));
    }
}
