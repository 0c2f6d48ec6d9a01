//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/         - Pure business logic
//! - infrastructure/ - Implementations (solver backends, tree-sitter, ...)
//!
//! Leaf first: symbolic → constraint_store → solver → execution → reporting.

// Symbolic Value Model: fixed-width terms with wraparound semantics
pub mod symbolic;

// Constraint Store: assumptions and obligations of one run
pub mod constraint_store;

// Solver Adapter: bit-blasting CDCL backend, optional Z3
pub mod solver;

// Execution Driver: straight-line program walker
pub mod execution;

// Verdict Reporter: per-check verdicts, text and JSON output
pub mod reporting;

// Fixture Front-end: tree-sitter C → Program
pub mod frontend;
