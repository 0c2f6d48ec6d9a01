//! Verdict Reporter
//!
//! Aggregates per-check verdicts into pass/fail/counterexample output.
//!
//! ## Architecture
//!
//! ```text
//! reporting
//! ├── domain/            # Verdict, CheckStatus, VerdictSummary
//! └── infrastructure/    # VerdictReporter, text/JSON rendering
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{CheckRecord, CheckStatus, Outcome, Verdict, VerdictSummary};
pub use infrastructure::{CheckReport, VerdictReporter};
