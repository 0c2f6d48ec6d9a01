//! Constraint Store
//!
//! Accumulates the path assumptions of one run in source order and turns each
//! check into a satisfiability query `assumptions ∧ ¬check`. One store per run;
//! nothing survives `reset()`.

use crate::errors::Result;
use crate::features::constraint_store::domain::Constraint;
use crate::features::symbolic::Term;
use crate::shared::models::SourceLocation;

/// Per-run store of assumptions
#[derive(Debug, Default)]
pub struct ConstraintStore {
    assumptions: Vec<Constraint>,
}

impl ConstraintStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an assumption; applies to every obligation built afterwards
    pub fn assume(&mut self, term: Term) -> Result<()> {
        self.assumptions.push(Constraint::assumption(term)?);
        Ok(())
    }

    /// Append an assumption that remembers where it came from
    pub fn assume_at(&mut self, term: Term, location: SourceLocation) -> Result<()> {
        self.assumptions
            .push(Constraint::assumption(term)?.at(location));
        Ok(())
    }

    /// Current assumptions followed by `¬term`
    pub fn obligation_for(&self, term: Term) -> Result<Vec<Constraint>> {
        let goal = Constraint::obligation(term)?;
        let mut query = Vec::with_capacity(self.assumptions.len() + 1);
        query.extend(self.assumptions.iter().cloned());
        query.push(goal);
        Ok(query)
    }

    pub fn assumptions(&self) -> &[Constraint] {
        &self.assumptions
    }

    pub fn len(&self) -> usize {
        self.assumptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assumptions.is_empty()
    }

    /// Drop all state between independent runs
    pub fn reset(&mut self) {
        self.assumptions.clear();
    }
}
