//! Verdict Reporter
//!
//! Collects one verdict per discharged check, in the order the checks were
//! reached.

use crate::features::reporting::domain::{CheckRecord, Verdict, VerdictSummary};
use crate::shared::models::SourceLocation;

#[derive(Debug, Default)]
pub struct VerdictReporter {
    program: String,
    records: Vec<CheckRecord>,
}

impl VerdictReporter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            records: Vec::new(),
        }
    }

    /// Record the verdict of the check at `location`
    pub fn record(&mut self, location: SourceLocation, verdict: Verdict) {
        self.push(location, None, verdict);
    }

    /// Record a verdict together with the rendered check condition
    pub fn record_check(
        &mut self,
        location: SourceLocation,
        condition: impl Into<String>,
        verdict: Verdict,
    ) {
        self.push(location, Some(condition.into()), verdict);
    }

    fn push(&mut self, location: SourceLocation, condition: Option<String>, verdict: Verdict) {
        match &verdict {
            Verdict::Unknown(reason) => {
                tracing::warn!(location = %location, reason = %reason, "check undecided")
            }
            other => tracing::debug!(location = %location, verdict = %other, "check recorded"),
        }
        self.records.push(CheckRecord {
            location,
            condition,
            verdict,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> VerdictSummary {
        VerdictSummary::new(self.program.clone(), self.records.clone())
    }

    /// Consume the reporter without cloning the records
    pub fn into_summary(self) -> VerdictSummary {
        VerdictSummary::new(self.program, self.records)
    }
}
