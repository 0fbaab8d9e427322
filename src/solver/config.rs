//! Solver configuration.
//!
//! Every loop bound of the solvers is a config value. Defaults match the
//! classic budgets of the rostering heuristics (1000 attempts per loop).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Effort limit for exact search.
///
/// Unlimited by default, which keeps the search complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Maximum number of candidate values tried.
    pub max_nodes: Option<u64>,
    /// Maximum wall-clock time.
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    /// No limit.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Sets the node limit.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Sets the time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Whether neither limit is set.
    pub fn is_unlimited(&self) -> bool {
        self.max_nodes.is_none() && self.time_limit.is_none()
    }
}

/// How the exact solver checks candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pruning {
    /// Place day by day against an incremental ledger, undoing on backtrack.
    #[default]
    Incremental,
    /// Bind whole 7-day candidates and re-check the entire assignment.
    FullRecheck,
}

/// Configuration of [`BacktrackingSolver`](super::BacktrackingSolver).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktrackingConfig {
    /// Candidate checking mode.
    pub pruning: Pruning,
    /// Effort limit.
    pub budget: SearchBudget,
}

impl BacktrackingConfig {
    /// Sets the pruning mode.
    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Sets the effort limit.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }
}

/// Configuration of [`StochasticSolver`](super::StochasticSolver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StochasticConfig {
    /// Initial candidates generated per restart (default: 1000).
    pub generation_attempts: u32,
    /// Repair mutations tried on a valid candidate (default: 1000).
    pub mutation_attempts: u32,
    /// Outer restarts before giving up (default: 1000).
    pub restarts: u32,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for StochasticConfig {
    fn default() -> Self {
        Self {
            generation_attempts: 1000,
            mutation_attempts: 1000,
            restarts: 1000,
            seed: None,
        }
    }
}

impl StochasticConfig {
    pub fn with_generation_attempts(mut self, attempts: u32) -> Self {
        self.generation_attempts = attempts;
        self
    }

    pub fn with_mutation_attempts(mut self, attempts: u32) -> Self {
        self.mutation_attempts = attempts;
        self
    }

    pub fn with_restarts(mut self, restarts: u32) -> Self {
        self.restarts = restarts;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
