//! Per-check verdicts

use crate::features::solver::SatResult;
use crate::features::symbolic::Witness;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of discharging one obligation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No assignment violates the check
    Proved,

    /// Counterexample found
    Disproved(Witness),

    /// The solver could not decide
    Unknown(String),
}

impl Verdict {
    pub fn status(&self) -> CheckStatus {
        match self {
            Self::Proved => CheckStatus::Proved,
            Self::Disproved(_) => CheckStatus::Disproved,
            Self::Unknown(_) => CheckStatus::Unknown,
        }
    }

    pub fn is_proved(&self) -> bool {
        matches!(self, Self::Proved)
    }

    pub fn is_disproved(&self) -> bool {
        matches!(self, Self::Disproved(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    pub fn witness(&self) -> Option<&Witness> {
        match self {
            Self::Disproved(w) => Some(w),
            _ => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Unknown(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Obligation query result → verdict: Sat disproves the check, Unsat proves it
impl From<SatResult> for Verdict {
    fn from(result: SatResult) -> Self {
        match result {
            SatResult::Sat(witness) => Self::Disproved(witness),
            SatResult::Unsat => Self::Proved,
            SatResult::Error(reason) => Self::Unknown(reason),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proved => f.write_str("proved"),
            Self::Disproved(witness) => write!(f, "disproved [{}]", witness),
            Self::Unknown(reason) => write!(f, "unknown ({})", reason),
        }
    }
}

/// Machine-readable verdict tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Proved,
    Disproved,
    Unknown,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proved => "proved",
            Self::Disproved => "disproved",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
