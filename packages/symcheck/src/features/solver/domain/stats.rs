//! Adapter statistics

use super::result::SatResult;
use std::time::Duration;

/// Per-adapter query counters
#[derive(Debug, Clone, Default)]
pub struct SolverStats {
    /// Total queries
    pub queries: usize,

    /// Queries by outcome
    pub sat: usize,
    pub unsat: usize,
    pub errors: usize,

    /// Subset of `errors` caused by the deadline
    pub timeouts: usize,

    /// Subset of `errors` where the backend's witness did not hold
    pub validation_failures: usize,

    /// Wall time spent inside backends
    pub solve_time: Duration,
}

impl SolverStats {
    pub(crate) fn record(&mut self, result: &SatResult, elapsed: Duration) {
        self.queries += 1;
        self.solve_time += elapsed;
        match result {
            SatResult::Sat(_) => self.sat += 1,
            SatResult::Unsat => self.unsat += 1,
            SatResult::Error(reason) => {
                self.errors += 1;
                if reason == "timeout" {
                    self.timeouts += 1;
                }
            }
        }
    }

    /// Outcome percentages
    pub fn rates(&self) -> OutcomeRates {
        if self.queries == 0 {
            return OutcomeRates::default();
        }
        let total = self.queries as f64;
        OutcomeRates {
            sat: (self.sat as f64 / total) * 100.0,
            unsat: (self.unsat as f64 / total) * 100.0,
            error: (self.errors as f64 / total) * 100.0,
        }
    }
}

/// Outcome percentages
#[derive(Debug, Default, PartialEq)]
pub struct OutcomeRates {
    pub sat: f64,
    pub unsat: f64,
    pub error: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic::Witness;

    #[test]
    fn test_record_counts_outcomes() {
        let mut stats = SolverStats::default();
        stats.record(&SatResult::Sat(Witness::new()), Duration::from_millis(2));
        stats.record(&SatResult::Unsat, Duration::from_millis(3));
        stats.record(&SatResult::Error("timeout".into()), Duration::from_millis(5));
        stats.record(&SatResult::Unsat, Duration::ZERO);

        assert_eq!(stats.queries, 4);
        assert_eq!(stats.unsat, 2);
        assert_eq!(stats.timeouts, 1);
        assert_eq!(stats.solve_time, Duration::from_millis(10));

        let rates = stats.rates();
        assert_eq!(rates.unsat, 50.0);
        assert_eq!(rates.sat, 25.0);
    }

    #[test]
    fn test_rates_empty() {
        assert_eq!(SolverStats::default().rates(), OutcomeRates::default());
    }
}
