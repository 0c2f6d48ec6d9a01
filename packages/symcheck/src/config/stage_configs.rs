//! Stage-specific configuration types
//!
//! The solver and the execution driver each have their own configuration
//! struct with preset defaults, builder setters and validation.

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use crate::features::solver::BackendKind;
use serde::{Deserialize, Serialize};

// ============================================================================
// Solver Configuration
// ============================================================================

/// Maximum per-query timeout (one hour)
pub const MAX_TIMEOUT_MS: u64 = 3_600_000;

/// Solver Adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Decision procedure
    pub backend: BackendKind,

    /// Per-query deadline in milliseconds (1..=3600000)
    pub timeout_ms: u64,

    /// Conflict budget per query (`None` = unlimited)
    pub max_conflicts: Option<u64>,

    /// Re-evaluate every Sat witness against the query
    pub validate_witnesses: bool,
}

impl SolverConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            backend: BackendKind::Builtin,
            timeout_ms: preset.timeout_ms(),
            max_conflicts: preset.max_conflicts(),
            validate_witnesses: true,
        }
    }

    /// Builder: Set backend
    pub fn backend(mut self, v: BackendKind) -> Self {
        self.backend = v;
        self
    }

    /// Builder: Set timeout_ms
    pub fn timeout_ms(mut self, v: u64) -> Self {
        self.timeout_ms = v;
        self
    }

    /// Builder: Set max_conflicts
    pub fn max_conflicts(mut self, v: Option<u64>) -> Self {
        self.max_conflicts = v;
        self
    }

    /// Builder: Set validate_witnesses
    pub fn validate_witnesses(mut self, v: bool) -> Self {
        self.validate_witnesses = v;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.timeout_ms == 0 || self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::range_with_hint(
                "timeout_ms",
                self.timeout_ms,
                1,
                MAX_TIMEOUT_MS,
                "Per-query timeout must be between 1ms and 1 hour",
            ));
        }

        if self.max_conflicts == Some(0) {
            return Err(ConfigError::Validation(
                "max_conflicts must be positive; omit it (or use null) for no limit".to_string(),
            ));
        }

        if !self.backend.is_available() {
            return Err(ConfigError::Conflict {
                issue: format!("solver backend '{}' is not compiled in", self.backend),
                fix: format!(
                    "rebuild with --features {} or use backend: builtin",
                    self.backend
                ),
            });
        }

        Ok(())
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

impl Validatable for SolverConfig {
    fn validate(&self) -> ConfigResult<()> {
        SolverConfig::validate(self)
    }
}

// ============================================================================
// Driver Configuration
// ============================================================================

/// Execution Driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// After a check, treat its condition as an assumption for later
    /// statements (Crucible's behaviour after an assertion)
    pub assume_checked: bool,
}

impl DriverConfig {
    pub fn from_preset(_preset: Preset) -> Self {
        Self {
            assume_checked: false,
        }
    }

    /// Builder: Set assume_checked
    pub fn assume_checked(mut self, v: bool) -> Self {
        self.assume_checked = v;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}

impl Validatable for DriverConfig {
    fn validate(&self) -> ConfigResult<()> {
        DriverConfig::validate(self)
    }
}
