//! Configuration validation
//!
//! Provides validation traits and validators for configuration.

use super::error::ConfigResult;
use super::verifier_config::VerifierConfig;

// ═══════════════════════════════════════════════════════════════════════════
// Validatable Trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use symcheck::config::Validatable;
///
/// fn use_config<C: Validatable>(config: C) -> Result<(), ConfigError> {
///     config.validate()?;
///     // ...
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;
}

/// Validation of an optional section: absent sections are valid
pub trait ValidatableCollection {
    fn validate_all(&self) -> ConfigResult<()>;
}

impl<T: Validatable> ValidatableCollection for Option<T> {
    fn validate_all(&self) -> ConfigResult<()> {
        if let Some(config) = self {
            config.validate()?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Validator
// ═══════════════════════════════════════════════════════════════════════════

/// Validates a complete verifier configuration
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate every section override of `config`
    pub fn validate(config: &VerifierConfig) -> ConfigResult<()> {
        config.solver_override().validate_all()?;
        config.driver_override().validate_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::preset::Preset;
    use super::super::stage_configs::SolverConfig;
    use super::*;

    #[test]
    fn test_config_validator_presets() {
        for preset in [Preset::Fast, Preset::Balanced, Preset::Thorough] {
            let config = VerifierConfig::preset(preset);
            assert!(ConfigValidator::validate(&config).is_ok());
        }
    }

    #[test]
    fn test_config_validator_with_overrides() {
        let config = VerifierConfig::preset(Preset::Balanced)
            .solver(|c| c.timeout_ms(250))
            .driver(|c| c.assume_checked(true));
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_config_validator_rejects_bad_override() {
        let config = VerifierConfig::preset(Preset::Fast).solver(|c| c.timeout_ms(0));
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_optional_section_validation() {
        let none: Option<SolverConfig> = None;
        assert!(none.validate_all().is_ok());
        assert!(Some(SolverConfig::default()).validate_all().is_ok());
        assert!(Some(SolverConfig::default().timeout_ms(0))
            .validate_all()
            .is_err());
    }
}
