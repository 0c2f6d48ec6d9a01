//! Pipeline orchestration
//!
//! ```text
//! source ──► frontend ──► Program ──► ExecutionDriver ──► VerdictSummary
//! ```

pub mod verify;

pub use verify::{verify_batch, verify_program, verify_source, BatchOutcome};
