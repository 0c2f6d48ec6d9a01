//! Aggregated verdicts of one verification run

use super::verdict::{CheckStatus, Verdict};
use crate::shared::models::SourceLocation;
use std::fmt;

/// One discharged check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRecord {
    pub location: SourceLocation,

    /// Rendered check condition, when the caller supplied it
    pub condition: Option<String>,

    pub verdict: Verdict,
}

/// Overall classification of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every check proved (including a run without checks)
    Verified,
    /// At least one check disproved
    Falsified,
    /// No check disproved, at least one undecided
    Unknown,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Verified => "VERIFIED",
            Self::Falsified => "FALSIFIED",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// Summary produced by the verdict reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictSummary {
    /// Program (fixture) the checks belong to
    pub program: String,

    pub all_proved: bool,

    /// Checks in source order
    pub details: Vec<CheckRecord>,
}

impl VerdictSummary {
    pub fn new(program: impl Into<String>, details: Vec<CheckRecord>) -> Self {
        let all_proved = details.iter().all(|r| r.verdict.is_proved());
        Self {
            program: program.into(),
            all_proved,
            details,
        }
    }

    /// Process exit code for a CLI collaborator: 0 iff every check proved
    pub fn exit_code(&self) -> i32 {
        if self.all_proved {
            0
        } else {
            1
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.all_proved {
            Outcome::Verified
        } else if self.count(CheckStatus::Disproved) > 0 {
            Outcome::Falsified
        } else {
            Outcome::Unknown
        }
    }

    pub fn count(&self, status: CheckStatus) -> usize {
        self.details
            .iter()
            .filter(|r| r.verdict.status() == status)
            .count()
    }

    pub fn verdicts(&self) -> impl Iterator<Item = &Verdict> {
        self.details.iter().map(|r| &r.verdict)
    }

    /// Statuses in source order
    pub fn statuses(&self) -> Vec<CheckStatus> {
        self.verdicts().map(Verdict::status).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: u32, verdict: Verdict) -> CheckRecord {
        CheckRecord {
            location: SourceLocation::new("t.c", line, 3),
            condition: None,
            verdict,
        }
    }

    #[test]
    fn test_all_proved() {
        let summary = VerdictSummary::new("t.c", vec![record(1, Verdict::Proved)]);
        assert!(summary.all_proved);
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(summary.outcome(), Outcome::Verified);
    }

    #[test]
    fn test_empty_run_is_verified() {
        let summary = VerdictSummary::new("t.c", Vec::new());
        assert!(summary.all_proved);
        assert_eq!(summary.outcome().to_string(), "VERIFIED");
    }

    #[test]
    fn test_falsified_wins_over_unknown() {
        let summary = VerdictSummary::new(
            "t.c",
            vec![
                record(1, Verdict::Unknown("timeout".into())),
                record(2, Verdict::Disproved(Default::default())),
                record(3, Verdict::Proved),
            ],
        );
        assert!(!summary.all_proved);
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(summary.outcome(), Outcome::Falsified);
        assert_eq!(summary.count(CheckStatus::Proved), 1);
        assert_eq!(
            summary.statuses(),
            vec![
                CheckStatus::Unknown,
                CheckStatus::Disproved,
                CheckStatus::Proved
            ]
        );
    }

    #[test]
    fn test_unknown_only() {
        let summary =
            VerdictSummary::new("t.c", vec![record(1, Verdict::Unknown("budget".into()))]);
        assert_eq!(summary.outcome(), Outcome::Unknown);
        assert_eq!(summary.exit_code(), 1);
    }
}
