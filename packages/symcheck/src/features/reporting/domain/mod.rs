//! Verdict Reporter - Domain

pub mod summary;
pub mod verdict;

pub use summary::{CheckRecord, Outcome, VerdictSummary};
pub use verdict::{CheckStatus, Verdict};
