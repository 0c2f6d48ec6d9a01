//! Solver Adapter - Infrastructure

pub mod adapter;
pub mod backends;
pub mod bitblast;
pub mod sat;

pub use adapter::{validate_witness, SolverAdapter};
pub use backends::{create_backend, BuiltinBackend, SolverBackend};
pub use bitblast::BitBlaster;
pub use sat::{CdclSolver, Lit, SatOutcome, SatStats, Var};

#[cfg(feature = "z3")]
pub use backends::Z3Backend;
