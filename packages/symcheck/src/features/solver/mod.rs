//! Solver Adapter
//!
//! Decides satisfiability of constraint conjunctions over fixed-width
//! bitvectors and turns models into witnesses.
//!
//! ## Backends
//!
//! - **builtin** (default): Tseitin bit-blasting into an in-crate CDCL SAT core
//! - **z3** (`--features z3`): Z3 bitvector theory
//!
//! ## Architecture
//!
//! ```text
//! solver
//! ├── domain/               # SatResult, SolverError, BackendKind, budget, stats
//! └── infrastructure/
//!     ├── adapter           # SolverAdapter (fresh backend per query)
//!     ├── backends/         # SolverBackend trait + builtin / z3
//!     ├── bitblast          # Term → CNF
//!     └── sat               # CDCL core
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{BackendKind, OutcomeRates, SatResult, SolveBudget, SolverError, SolverStats};
pub use infrastructure::{validate_witness, SolverAdapter, SolverBackend};
