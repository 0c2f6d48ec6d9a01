//! Solver Adapter - Domain

pub mod result;
pub mod stats;

pub use result::{BackendKind, SatResult, SolveBudget, SolverError};
pub use stats::{OutcomeRates, SolverStats};
