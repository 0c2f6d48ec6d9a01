//! Report rendering
//!
//! Text: one line per check, the counterexample under each disproved check,
//! and a closing `Verification result:` line.
//! JSON: ordered array of `{location, status, witness?, reason?}`.

use crate::errors::Result;
use crate::features::reporting::domain::{CheckRecord, CheckStatus, VerdictSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// Machine-readable form of one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub location: String,
    pub status: CheckStatus,

    /// Symbol name → integer, present only for disproved checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub witness: Option<BTreeMap<String, i128>>,

    /// Present only for unknown checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<&CheckRecord> for CheckReport {
    fn from(record: &CheckRecord) -> Self {
        Self {
            location: record.location.to_string(),
            status: record.verdict.status(),
            witness: record.verdict.witness().map(|w| w.to_map()),
            reason: record.verdict.reason().map(str::to_string),
        }
    }
}

impl VerdictSummary {
    pub fn reports(&self) -> Vec<CheckReport> {
        self.details.iter().map(CheckReport::from).collect()
    }

    /// Pretty-printed JSON array, one entry per check
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.reports())?)
    }

    /// Minimal human-readable report
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for record in &self.details {
            let _ = write!(out, "{}: {}", record.location, record.verdict.status());
            if let Some(condition) = &record.condition {
                let _ = write!(out, ": check {}", condition);
            }
            if let Some(reason) = record.verdict.reason() {
                let _ = write!(out, " ({})", reason);
            }
            out.push('\n');
            if let Some(witness) = record.verdict.witness() {
                let _ = writeln!(out, "  counterexample: {}", witness);
            }
        }
        let _ = writeln!(
            out,
            "{} checks: {} proved, {} disproved, {} unknown",
            self.details.len(),
            self.count(CheckStatus::Proved),
            self.count(CheckStatus::Disproved),
            self.count(CheckStatus::Unknown)
        );
        let _ = writeln!(out, "Verification result: {}", self.outcome());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reporting::domain::Verdict;
    use crate::features::symbolic::{BitWidth, Signedness, SymbolicInt, Witness};
    use crate::shared::models::SourceLocation;

    fn witness() -> Witness {
        let mut w = Witness::new();
        for (name, value) in [("x", -128), ("y", 1), ("z", -128)] {
            w.insert(SymbolicInt::new(name, BitWidth::W8, Signedness::Signed), value);
        }
        w
    }

    fn summary() -> VerdictSummary {
        VerdictSummary::new(
            "t.c",
            vec![
                CheckRecord {
                    location: SourceLocation::new("t.c", 9, 3),
                    condition: Some("(((x + y) + z) > 0)".into()),
                    verdict: Verdict::Disproved(witness()),
                },
                CheckRecord {
                    location: SourceLocation::new("t.c", 10, 3),
                    condition: None,
                    verdict: Verdict::Unknown("timeout".into()),
                },
                CheckRecord {
                    location: SourceLocation::new("t.c", 11, 3),
                    condition: None,
                    verdict: Verdict::Proved,
                },
            ],
        )
    }

    #[test]
    fn test_render_text() {
        let text = summary().render_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "t.c:9:3: disproved: check (((x + y) + z) > 0)");
        assert_eq!(lines[1], "  counterexample: x = -128, y = 1, z = -128");
        assert_eq!(lines[2], "t.c:10:3: unknown (timeout)");
        assert_eq!(lines[3], "t.c:11:3: proved");
        assert_eq!(lines[4], "3 checks: 1 proved, 1 disproved, 1 unknown");
        assert_eq!(lines[5], "Verification result: FALSIFIED");
    }

    #[test]
    fn test_json_shape() {
        let json = summary().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0]["location"], "t.c:9:3");
        assert_eq!(entries[0]["status"], "disproved");
        assert_eq!(entries[0]["witness"]["x"], -128);
        assert!(entries[0].get("reason").is_none());

        assert_eq!(entries[1]["status"], "unknown");
        assert_eq!(entries[1]["reason"], "timeout");
        assert!(entries[1].get("witness").is_none());

        assert_eq!(entries[2]["status"], "proved");
        assert!(entries[2].get("witness").is_none());
    }

    #[test]
    fn test_reports_roundtrip_through_serde() {
        let reports = summary().reports();
        let json = serde_json::to_string(&reports).unwrap();
        let back: Vec<CheckReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reports);
    }
}
