//! Decision procedures behind the solver adapter
//!
//! 1. **Builtin**: bit-blasting + CDCL, always available
//! 2. **Z3Backend**: Z3 bitvector theory (optional, feature-gated)

use crate::features::constraint_store::Constraint;
use crate::features::solver::domain::{BackendKind, SatResult, SolveBudget, SolverError};

pub mod builtin;

#[cfg(feature = "z3")]
pub mod z3_backend;

pub use builtin::BuiltinBackend;

#[cfg(feature = "z3")]
pub use z3_backend::Z3Backend;

/// A decision procedure for conjunctions of boolean terms
pub trait SolverBackend {
    /// Name of this backend
    fn name(&self) -> &'static str;

    /// Decide `constraints[0] ∧ … ∧ constraints[n-1]` within `budget`.
    ///
    /// On Sat the witness assigns every symbol occurring in the constraints.
    fn check(&mut self, constraints: &[Constraint], budget: &SolveBudget) -> SatResult;
}

/// Fresh backend instance of the requested kind
pub fn create_backend(kind: BackendKind) -> Result<Box<dyn SolverBackend>, SolverError> {
    match kind {
        BackendKind::Builtin => Ok(Box::new(BuiltinBackend::new())),
        #[cfg(feature = "z3")]
        BackendKind::Z3 => Ok(Box::new(Z3Backend::new())),
        #[cfg(not(feature = "z3"))]
        BackendKind::Z3 => Err(SolverError::BackendUnavailable("z3")),
    }
}
