//! Configuration System
//!
//! Three levels of control with progressive disclosure:
//! - Level 1: Preset - Simple one-liner
//! - Level 2: Stage Override - Partial adjustment
//! - Level 3: YAML - Complete control
//!
//! # Examples
//!
//! ```rust,ignore
//! use symcheck::config::{Preset, VerifierConfig};
//!
//! // Level 1: Simple preset
//! let config = VerifierConfig::preset(Preset::Fast).build()?;
//!
//! // Level 2: Override a stage
//! let config = VerifierConfig::preset(Preset::Balanced)
//!     .solver(|c| c.timeout_ms(500).max_conflicts(Some(10_000)))
//!     .driver(|c| c.assume_checked(true))
//!     .build()?;
//!
//! // Level 3: YAML
//! let config = VerifierConfig::from_yaml("ci.yaml")?;
//! ```
//!
//! # Features
//!
//! - **Type Safety**: Compile-time validation
//! - **Runtime Validation**: Range checks and backend availability
//! - **Versioned Schema**: YAML v1

pub mod error;
pub mod io;
pub mod preset;
pub mod stage_configs;
pub mod validation;
pub mod verifier_config;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
pub use stage_configs::{DriverConfig, SolverConfig};
pub use validation::{ConfigValidator, Validatable, ValidatableCollection};
pub use verifier_config::{ValidatedConfig, VerifierConfig};
