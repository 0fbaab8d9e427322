//! Roster solvers and KPI evaluation.
//!
//! Two interchangeable strategies over the same [`Domain`] and checker:
//!
//! - [`BacktrackingSolver`]: exact depth-first search over the Cartesian
//!   product of per-day choices. Complete, worst case exponential in
//!   categories × days × pool size.
//! - [`StochasticSolver`]: randomized generate-and-repair. Bounded
//!   effort, may miss rosters that exist, non-deterministic unless seeded.
//!
//! A failed run returns [`SolveError`], telling a proven-infeasible
//! domain apart from an exhausted budget.
//!
//! # KPI
//!
//! [`RosterKpi`] summarizes coverage and worker load of a roster.

mod backtracking;
mod config;
mod kpi;
mod stochastic;
#[cfg(test)]
pub(crate) mod testing;

pub use backtracking::BacktrackingSolver;
pub use config::{BacktrackingConfig, Pruning, SearchBudget, StochasticConfig};
pub use kpi::RosterKpi;
pub use stochastic::StochasticSolver;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SolveError;
use crate::models::{Assignment, Domain, Roster};

/// A rostering strategy.
pub trait Solver {
    /// Strategy name, used in errors and logs.
    fn name(&self) -> &'static str;

    /// Searches for a valid complete assignment.
    fn solve(&self, domain: &Domain) -> Result<Solution, SolveError>;
}

/// Effort counters of a solve call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Candidate values tried (exact search).
    pub nodes: u64,
    /// Restarts begun (stochastic search).
    pub restarts: u32,
    /// Initial candidates generated (stochastic search).
    pub generations: u64,
    /// Repair mutations tried (stochastic search).
    pub mutations: u64,
    /// Wall-clock time.
    pub elapsed: Duration,
}

/// A valid, complete assignment and how it was found.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Strategy that produced it.
    pub strategy: &'static str,
    /// Complete assignment, valid under the domain's constraints.
    pub assignment: Assignment,
    /// Effort counters.
    pub stats: SearchStats,
}

impl Solution {
    /// Names every slot.
    pub fn roster(&self, domain: &Domain) -> Roster {
        Roster::from_assignment(domain, &self.assignment)
    }

    /// Coverage and load indicators.
    pub fn kpi(&self, domain: &Domain) -> RosterKpi {
        RosterKpi::calculate(domain, &self.assignment)
    }
}

/// Runtime-selectable strategy.
///
/// # Example
/// ```
/// use duty_roster::models::{Category, Domain, Worker};
/// use duty_roster::solver::{Solver, Strategy};
///
/// let domain = Domain::builder()
///     .worker(Worker::new("Ana"))
///     .worker(Worker::new("Bea"))
///     .category(Category::new("Fire").with_pool(["Ana", "Bea"]))
///     .category(Category::new("Phone").with_pool(["Ana", "Bea"]))
///     .build()
///     .unwrap();
///
/// let solution = Strategy::default().solve(&domain).unwrap();
/// assert!(solution.assignment.is_complete());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Backtracking(BacktrackingConfig),
    Stochastic(StochasticConfig),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Backtracking(BacktrackingConfig::default())
    }
}

impl Solver for Strategy {
    fn name(&self) -> &'static str {
        match self {
            Strategy::Backtracking(_) => backtracking::NAME,
            Strategy::Stochastic(_) => stochastic::NAME,
        }
    }

    fn solve(&self, domain: &Domain) -> Result<Solution, SolveError> {
        match self {
            Strategy::Backtracking(config) => BacktrackingSolver::new(*config).solve(domain),
            Strategy::Stochastic(config) => StochasticSolver::new(*config).solve(domain),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::is_valid;
    use crate::models::{Category, Worker};
    use crate::solver::testing::{lone_worker_headcount_two, lone_worker_short_quota};

    fn domain() -> Domain {
        Domain::builder()
            .worker(Worker::new("Ana"))
            .worker(Worker::new("Bea"))
            .worker(Worker::new("Caio"))
            .category(Category::new("Fire").with_pool(["Ana", "Bea", "Caio"]))
            .category(Category::new("Rescue").with_pool(["Ana", "Bea", "Caio"]))
            .build()
            .unwrap()
    }

    #[test]
    fn test_strategies_are_interchangeable() {
        let d = domain();
        let strategies = [
            Strategy::default(),
            Strategy::Stochastic(StochasticConfig::default().with_seed(3)),
        ];
        for strategy in strategies {
            let solution = strategy.solve(&d).unwrap();
            assert_eq!(solution.strategy, strategy.name());
            assert!(solution.assignment.is_complete());
            assert!(is_valid(&solution.assignment, &d));
        }
    }

    #[test]
    fn test_strategies_agree_on_uncoverable_days() {
        let stochastic = StochasticConfig::default()
            .with_restarts(3)
            .with_generation_attempts(50)
            .with_seed(7);
        for d in [lone_worker_headcount_two(), lone_worker_short_quota()] {
            let exact = Strategy::default().solve(&d).unwrap_err();
            assert!(exact.is_definitive());

            let err = Strategy::Stochastic(stochastic).solve(&d).unwrap_err();
            assert!(matches!(err, SolveError::BudgetExhausted { .. }));
        }
    }

    #[test]
    fn test_strategy_from_json() {
        let json = r#"{"Stochastic":{"generation_attempts":10,"mutation_attempts":10,"restarts":2,"seed":1}}"#;
        let s: Strategy = serde_json::from_str(json).unwrap();
        assert_eq!(s.name(), "stochastic");
    }
}
