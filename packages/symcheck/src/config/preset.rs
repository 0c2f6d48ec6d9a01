//! Presets
//!
//! A preset fixes how much effort the solver may spend on one check before
//! the verdict becomes Unknown. Stage configs start from these limits.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// CI: every query is bounded by time and conflicts, so a hard check
    /// ends as Unknown quickly
    Fast,

    /// Development: 10s per query, no conflict cap
    #[default]
    Balanced,

    /// Audit: 60s per query, no conflict cap
    Thorough,

    /// YAML-only; starts from the Balanced limits
    Custom,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Self::Fast, Self::Balanced, Self::Thorough, Self::Custom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
            Self::Custom => "custom",
        }
    }

    /// Per-query solver deadline
    pub fn timeout_ms(&self) -> u64 {
        match self {
            Self::Fast => 1_000,
            Self::Balanced | Self::Custom => 10_000,
            Self::Thorough => 60_000,
        }
    }

    /// Per-query conflict budget (`None` = unlimited)
    pub fn max_conflicts(&self) -> Option<u64> {
        match self {
            Self::Fast => Some(100_000),
            Self::Balanced | Self::Thorough | Self::Custom => None,
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!("fast".parse::<Preset>().unwrap(), Preset::Fast);
        assert_eq!("FAST".parse::<Preset>().unwrap(), Preset::Fast);
        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
        }
        assert!(matches!(
            "exhaustive".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(ref name)) if name == "exhaustive"
        ));
    }

    #[test]
    fn test_limits_grow_with_effort() {
        assert!(Preset::Fast.timeout_ms() < Preset::Balanced.timeout_ms());
        assert!(Preset::Balanced.timeout_ms() < Preset::Thorough.timeout_ms());
        assert!(Preset::Fast.max_conflicts().is_some());
        assert_eq!(Preset::Thorough.max_conflicts(), None);
    }

    #[test]
    fn test_custom_starts_from_balanced() {
        assert_eq!(Preset::default(), Preset::Balanced);
        assert_eq!(Preset::Custom.timeout_ms(), Preset::Balanced.timeout_ms());
        assert_eq!(Preset::Custom.max_conflicts(), Preset::Balanced.max_conflicts());
    }
}
