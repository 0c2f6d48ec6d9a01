//! Solver Adapter
//!
//! Submits `assumptions ∧ ¬check` to a fresh backend instance per query and
//! interprets the answer:
//!
//! ```text
//! constraints ──► create_backend(kind) ──► check(budget) ──► validate witness ──► SatResult
//! ```
//!
//! The deadline covers the backend call only. Backend failures never escape:
//! they come back as `SatResult::Error(reason)`.

use super::backends::create_backend;
use crate::config::SolverConfig;
use crate::features::constraint_store::Constraint;
use crate::features::solver::domain::{SatResult, SolveBudget, SolverError, SolverStats};
use crate::features::symbolic::{Value, Witness};
use std::time::{Duration, Instant};

/// Per-run adapter over the configured backend
#[derive(Debug)]
pub struct SolverAdapter {
    config: SolverConfig,
    stats: SolverStats,
}

impl Default for SolverAdapter {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl SolverAdapter {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            stats: SolverStats::default(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Start counting from zero, e.g. at the beginning of a new run
    pub fn reset_stats(&mut self) {
        self.stats = SolverStats::default();
    }

    /// Is the conjunction of `constraints` satisfiable?
    pub fn is_satisfiable(&mut self, constraints: &[Constraint]) -> SatResult {
        let budget = SolveBudget::new(
            Some(Duration::from_millis(self.config.timeout_ms)),
            self.config.max_conflicts,
        );
        self.is_satisfiable_within(constraints, &budget)
    }

    /// Same as `is_satisfiable` with an explicit budget
    pub fn is_satisfiable_within(
        &mut self,
        constraints: &[Constraint],
        budget: &SolveBudget,
    ) -> SatResult {
        let started = Instant::now();
        let result = match create_backend(self.config.backend) {
            Ok(mut backend) => backend.check(constraints, budget),
            Err(e) => e.into(),
        };
        let elapsed = started.elapsed();

        let result = match result {
            SatResult::Sat(witness) if self.config.validate_witnesses => {
                match validate_witness(constraints, &witness) {
                    Ok(()) => SatResult::Sat(witness),
                    Err(e) => {
                        self.stats.validation_failures += 1;
                        tracing::warn!(witness = %witness, "{}", e);
                        e.into()
                    }
                }
            }
            other => other,
        };

        self.stats.record(&result, elapsed);
        match &result {
            SatResult::Error(reason) => tracing::warn!(
                backend = %self.config.backend,
                elapsed_ms = elapsed.as_millis() as u64,
                "solver gave no answer: {}",
                reason
            ),
            outcome => tracing::debug!(
                backend = %self.config.backend,
                elapsed_ms = elapsed.as_millis() as u64,
                sat = outcome.is_sat(),
                "query decided"
            ),
        }
        result
    }
}

/// Check that `witness` makes every constraint true under concrete semantics
pub fn validate_witness(constraints: &[Constraint], witness: &Witness) -> Result<(), SolverError> {
    for constraint in constraints {
        match constraint.term().evaluate(witness) {
            Some(Value::Bool(true)) => {}
            Some(Value::Bool(false)) => {
                return Err(SolverError::WitnessValidation(format!(
                    "{} is false under [{}]",
                    constraint.term(),
                    witness
                )))
            }
            _ => {
                return Err(SolverError::WitnessValidation(format!(
                    "{} cannot be evaluated under [{}]",
                    constraint.term(),
                    witness
                )))
            }
        }
    }
    Ok(())
}
