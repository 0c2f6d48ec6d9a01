//! Verification entry points
//!
//! Each call builds its own driver, so a run shares no mutable state with
//! any other run. Batches fan out over rayon's pool, one independent
//! pipeline per program.

use crate::config::ValidatedConfig;
use crate::errors::Result;
use crate::features::execution::{ExecutionDriver, Program};
use crate::features::frontend::parse_fixture;
use crate::features::reporting::VerdictSummary;
use rayon::prelude::*;

/// Result of one program in a batch
#[derive(Debug)]
pub struct BatchOutcome {
    pub program: String,
    pub result: Result<VerdictSummary>,
}

impl BatchOutcome {
    pub fn summary(&self) -> Option<&VerdictSummary> {
        self.result.as_ref().ok()
    }

    /// Exit code for this program; construction errors count as failures
    pub fn exit_code(&self) -> i32 {
        self.summary().map_or(1, VerdictSummary::exit_code)
    }
}

/// Verify one parsed program
pub fn verify_program(program: &Program, config: &ValidatedConfig) -> Result<VerdictSummary> {
    ExecutionDriver::new(config).run(program)
}

/// Parse a C fixture and verify it
pub fn verify_source(
    file_name: &str,
    source: &str,
    config: &ValidatedConfig,
) -> Result<VerdictSummary> {
    let program = parse_fixture(file_name, source)?;
    verify_program(&program, config)
}

/// Verify independent programs in parallel; outcomes keep input order
pub fn verify_batch(programs: &[Program], config: &ValidatedConfig) -> Vec<BatchOutcome> {
    tracing::info!(programs = programs.len(), "batch verification started");
    let outcomes: Vec<BatchOutcome> = programs
        .par_iter()
        .map(|program| BatchOutcome {
            program: program.name.clone(),
            result: verify_program(program, config),
        })
        .collect();

    let failed = outcomes.iter().filter(|o| o.exit_code() != 0).count();
    tracing::info!(
        programs = outcomes.len(),
        failed,
        "batch verification finished"
    );
    outcomes
}
