//! Built-in backend: bit-blast to CNF and run the CDCL core

use super::SolverBackend;
use crate::features::constraint_store::Constraint;
use crate::features::solver::domain::{SatResult, SolveBudget};
use crate::features::solver::infrastructure::bitblast::BitBlaster;
use crate::features::solver::infrastructure::sat::SatStats;

/// Bit-blasting backend. Holds no state between queries except statistics.
#[derive(Debug, Default)]
pub struct BuiltinBackend {
    last_stats: Option<SatStats>,
}

impl BuiltinBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// SAT statistics of the most recent query
    pub fn last_stats(&self) -> Option<SatStats> {
        self.last_stats
    }
}

impl SolverBackend for BuiltinBackend {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn check(&mut self, constraints: &[Constraint], budget: &SolveBudget) -> SatResult {
        let mut blaster = BitBlaster::new();
        for constraint in constraints {
            if let Err(e) = blaster.assert_term(constraint.term()) {
                return e.into();
            }
        }
        tracing::debug!(
            vars = blaster.num_vars(),
            clauses = blaster.num_clauses(),
            "bit-blasted {} constraints",
            constraints.len()
        );

        let result = blaster.solve(budget);
        let stats = blaster.sat_stats();
        tracing::debug!(
            decisions = stats.decisions,
            conflicts = stats.conflicts,
            restarts = stats.restarts,
            "builtin backend finished"
        );
        self.last_stats = Some(stats);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic::{BinOp, BitWidth, IntType, Signedness, SymbolicInt, Term};
    use std::time::Instant;

    fn gt(name: &str, value: i128) -> Term {
        let x = Term::symbol(SymbolicInt::new(name, BitWidth::W8, Signedness::Signed));
        let v = Term::literal(value, IntType::signed(BitWidth::W8)).unwrap();
        Term::binary(BinOp::Gt, x, v).unwrap()
    }

    #[test]
    fn test_builtin_sat() {
        let mut backend = BuiltinBackend::new();
        let constraints = vec![
            Constraint::assumption(gt("x", 5)).unwrap(),
            Constraint::obligation(gt("x", 9)).unwrap(),
        ];
        match backend.check(&constraints, &SolveBudget::unlimited()) {
            SatResult::Sat(w) => {
                let x = w.value_of("x").unwrap();
                assert!(x > 5 && x <= 9);
            }
            other => panic!("expected sat, got {:?}", other),
        }
        assert!(backend.last_stats().is_some());
    }

    #[test]
    fn test_builtin_unsat() {
        let mut backend = BuiltinBackend::new();
        let constraints = vec![
            Constraint::assumption(gt("x", 10)).unwrap(),
            Constraint::obligation(gt("x", 5)).unwrap(),
        ];
        assert_eq!(
            backend.check(&constraints, &SolveBudget::unlimited()),
            SatResult::Unsat
        );
    }

    #[test]
    fn test_builtin_timeout() {
        let mut backend = BuiltinBackend::new();
        let constraints = vec![Constraint::obligation(gt("x", 5)).unwrap()];
        let budget = SolveBudget::unlimited().with_deadline(Instant::now());
        assert_eq!(
            backend.check(&constraints, &budget),
            SatResult::Error("timeout".to_string())
        );
    }

    #[test]
    fn test_empty_query_is_sat_with_empty_witness() {
        let mut backend = BuiltinBackend::new();
        match backend.check(&[], &SolveBudget::unlimited()) {
            SatResult::Sat(w) => assert!(w.is_empty()),
            other => panic!("expected sat, got {:?}", other),
        }
    }
}
