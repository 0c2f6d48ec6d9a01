//! Execution Driver
//!
//! Walks one straight-line program:
//!
//! ```text
//! Init ──declare──► Declaring ──assume/check──► Executing ──end──► Done
//!                       ▲                           │
//!                       └─────────declare───────────┘
//! ```
//!
//! Declarations introduce fresh symbols, assumptions go into the constraint
//! store, and each check is discharged as `assumptions ∧ ¬check`. A disproved
//! or undecided check does not stop the run. Construction errors (width or
//! sort mismatch, undeclared or duplicate symbols) abort it.

use super::lowering::Lowerer;
use crate::config::{DriverConfig, ValidatedConfig};
use crate::errors::Result;
use crate::features::constraint_store::ConstraintStore;
use crate::features::execution::domain::{DriverState, Item, Program};
use crate::features::reporting::{Verdict, VerdictReporter, VerdictSummary};
use crate::features::solver::{SolverAdapter, SolverStats};
use crate::features::symbolic::{Signedness, TermBuilder};
use crate::shared::models::SourceLocation;

/// Per-run driver. Store, symbol table, solver statistics and reporter are
/// reset at the start of every run.
#[derive(Debug)]
pub struct ExecutionDriver {
    config: DriverConfig,
    adapter: SolverAdapter,
    builder: TermBuilder,
    store: ConstraintStore,
    state: DriverState,
}

impl ExecutionDriver {
    pub fn new(config: &ValidatedConfig) -> Self {
        Self::with_adapter(config.driver(), SolverAdapter::new(config.solver()))
    }

    /// Driver over a caller-supplied adapter
    pub fn with_adapter(config: DriverConfig, adapter: SolverAdapter) -> Self {
        Self {
            config,
            adapter,
            builder: TermBuilder::new(),
            store: ConstraintStore::new(),
            state: DriverState::Init,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn solver_stats(&self) -> &SolverStats {
        self.adapter.stats()
    }

    pub fn store(&self) -> &ConstraintStore {
        &self.store
    }

    fn reset(&mut self) {
        self.builder.reset();
        self.store.reset();
        self.adapter.reset_stats();
        self.state = DriverState::Init;
    }

    /// Execute `program` and collect one verdict per check
    pub fn run(&mut self, program: &Program) -> Result<VerdictSummary> {
        self.reset();
        tracing::info!(
            program = %program.name,
            items = program.items.len(),
            checks = program.check_count(),
            "verification run started"
        );

        let mut reporter = VerdictReporter::new(program.name.clone());
        for (index, item) in program.items.iter().enumerate() {
            let location = program.location_of(index);
            self.step(item, &location, &mut reporter)
                .map_err(|e| e.with_location(&location))?;
        }
        self.state = DriverState::Done;

        let summary = reporter.into_summary();
        let stats = self.adapter.stats();
        tracing::info!(
            program = %program.name,
            checks = summary.details.len(),
            all_proved = summary.all_proved,
            queries = stats.queries,
            solve_ms = stats.solve_time.as_millis() as u64,
            "verification run finished"
        );
        Ok(summary)
    }

    fn step(
        &mut self,
        item: &Item,
        location: &SourceLocation,
        reporter: &mut VerdictReporter,
    ) -> Result<()> {
        match item {
            Item::Declare {
                name,
                width,
                signed,
                ..
            } => {
                self.state = DriverState::Declaring;
                let symbol =
                    self.builder
                        .make_symbol(name.clone(), *width, Signedness::from_signed(*signed))?;
                tracing::debug!(symbol = %symbol, "declared symbolic input");
            }
            Item::Assume { expr, .. } => {
                self.state = DriverState::Executing;
                let term = Lowerer::new(&self.builder).lower_condition(expr)?;
                tracing::debug!(assumption = %term, "assuming");
                self.store.assume_at(term, location.clone())?;
            }
            Item::Check { expr, .. } => {
                self.state = DriverState::Executing;
                let term = Lowerer::new(&self.builder).lower_condition(expr)?;
                let query = self.store.obligation_for(term.clone())?;
                tracing::debug!(
                    check = %term,
                    constraints = query.len(),
                    "discharging obligation"
                );

                let verdict = Verdict::from(self.adapter.is_satisfiable(&query));
                let condition = term.to_string();
                if self.config.assume_checked {
                    self.store.assume_at(term, location.clone())?;
                }
                reporter.record_check(location.clone(), condition, verdict);
            }
        }
        Ok(())
    }
}
