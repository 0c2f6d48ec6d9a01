//! Verifier configuration builder
//!
//! ```rust,ignore
//! // Level 1: preset
//! let config = VerifierConfig::preset(Preset::Fast).build()?;
//!
//! // Level 2: override one stage
//! let config = VerifierConfig::preset(Preset::Balanced)
//!     .solver(|c| c.timeout_ms(500))
//!     .build()?;
//!
//! // Level 3: YAML
//! let config = VerifierConfig::from_yaml("ci.yaml")?;
//! ```

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, ConfigOverrides, SUPPORTED_VERSIONS};
use super::preset::Preset;
use super::stage_configs::{DriverConfig, SolverConfig};
use super::validation::ConfigValidator;

/// Unvalidated configuration: a preset plus optional stage overrides
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Base preset
    pub(crate) preset: Preset,

    /// Stage-specific overrides
    pub(crate) solver: Option<SolverConfig>,
    pub(crate) driver: Option<DriverConfig>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl VerifierConfig {
    /// Level 1: Create from preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            solver: None,
            driver: None,
        }
    }

    /// Level 2: Override the solver stage
    pub fn solver<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SolverConfig) -> SolverConfig,
    {
        let base = self
            .solver
            .take()
            .unwrap_or_else(|| SolverConfig::from_preset(self.preset));
        self.solver = Some(f(base));
        self
    }

    /// Level 2: Override the driver stage
    pub fn driver<F>(mut self, f: F) -> Self
    where
        F: FnOnce(DriverConfig) -> DriverConfig,
    {
        let base = self
            .driver
            .take()
            .unwrap_or_else(|| DriverConfig::from_preset(self.preset));
        self.driver = Some(f(base));
        self
    }

    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    pub(crate) fn solver_override(&self) -> &Option<SolverConfig> {
        &self.solver
    }

    pub(crate) fn driver_override(&self) -> &Option<DriverConfig> {
        &self.driver
    }

    /// Validate and freeze
    pub fn build(self) -> ConfigResult<ValidatedConfig> {
        ConfigValidator::validate(&self)?;
        tracing::debug!(config = %self.describe(), "verifier configuration built");
        Ok(ValidatedConfig(self))
    }

    /// Level 3: Load from a YAML file
    pub fn from_yaml(path: &str) -> ConfigResult<ValidatedConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Level 3: Load from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<ValidatedConfig> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset: Preset = export.preset.parse()?;

        let mut config = Self::preset(preset);
        if let Some(overrides) = export.overrides {
            config.solver = overrides.solver;
            config.driver = overrides.driver;
        }
        config.build()
    }

    /// Export as YAML v1 with every stage spelled out
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(ConfigOverrides {
                solver: Some(self.effective_solver()),
                driver: Some(self.effective_driver()),
            }),
        };
        Ok(serde_yaml::to_string(&export)?)
    }

    fn effective_solver(&self) -> SolverConfig {
        self.solver
            .clone()
            .unwrap_or_else(|| SolverConfig::from_preset(self.preset))
    }

    fn effective_driver(&self) -> DriverConfig {
        self.driver
            .clone()
            .unwrap_or_else(|| DriverConfig::from_preset(self.preset))
    }

    /// Get a human-readable description of the configuration
    pub fn describe(&self) -> String {
        let solver = self.effective_solver();
        let conflicts = solver
            .max_conflicts
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unlimited".to_string());
        format!(
            "{} [solver: {}, {}ms, conflicts {}{}; driver: assume_checked={}]",
            self.preset,
            solver.backend,
            solver.timeout_ms,
            conflicts,
            if solver.validate_witnesses {
                ", validated witnesses"
            } else {
                ""
            },
            self.effective_driver().assume_checked
        )
    }
}

/// Validated configuration (immutable, safe to use)
#[derive(Debug, Clone, Default)]
pub struct ValidatedConfig(VerifierConfig);

impl ValidatedConfig {
    /// Unwrap the validated config to get the inner VerifierConfig
    pub fn into_inner(self) -> VerifierConfig {
        self.0
    }

    /// Get a reference to the inner VerifierConfig
    pub fn as_inner(&self) -> &VerifierConfig {
        &self.0
    }

    pub fn preset(&self) -> Preset {
        self.0.preset
    }

    /// Effective solver config
    pub fn solver(&self) -> SolverConfig {
        self.0.effective_solver()
    }

    /// Effective driver config
    pub fn driver(&self) -> DriverConfig {
        self.0.effective_driver()
    }

    pub fn describe(&self) -> String {
        self.0.describe()
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        self.0.to_yaml()
    }
}
