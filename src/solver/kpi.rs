//! Roster quality metrics (KPIs).
//!
//! Feasibility is all the solvers promise; these indicators tell a
//! caller how good a feasible roster is.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Filled slots | Slots staffed by a worker |
//! | Vacant slots | Slots left as the vacant sentinel |
//! | Coverage | filled / (filled + vacant) |
//! | Load spread | Busiest worker's duties minus idlest worker's |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Assignment, Domain};

/// Roster performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterKpi {
    /// Slots staffed by a worker.
    pub filled_slots: usize,
    /// Slots left vacant.
    pub vacant_slots: usize,
    /// Fraction of slots staffed (0.0..1.0). 1.0 for an empty roster.
    pub coverage: f64,
    /// Duties per declared worker, across all categories.
    pub duties_by_worker: BTreeMap<String, usize>,
    /// Duties of the busiest worker.
    pub max_load: usize,
    /// Duties of the least busy worker.
    pub min_load: usize,
}

impl RosterKpi {
    /// Computes KPIs over the bound categories of an assignment.
    pub fn calculate(domain: &Domain, assignment: &Assignment) -> Self {
        let mut loads = vec![0usize; domain.worker_count()];
        let mut filled_slots = 0;
        let mut vacant_slots = 0;

        for (_, _, slot) in assignment.triples() {
            match slot.worker() {
                Some(w) => {
                    filled_slots += 1;
                    loads[w] += 1;
                }
                None => vacant_slots += 1,
            }
        }

        let total = filled_slots + vacant_slots;
        let coverage = if total == 0 {
            1.0
        } else {
            filled_slots as f64 / total as f64
        };

        let duties_by_worker = domain
            .workers()
            .iter()
            .zip(&loads)
            .map(|(w, &load)| (w.name.clone(), load))
            .collect();

        Self {
            filled_slots,
            vacant_slots,
            coverage,
            duties_by_worker,
            max_load: loads.iter().copied().max().unwrap_or(0),
            min_load: loads.iter().copied().min().unwrap_or(0),
        }
    }

    /// Busiest minus least busy worker.
    pub fn load_spread(&self) -> usize {
        self.max_load - self.min_load
    }

    /// Whether the roster meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, max_spread: usize) -> bool {
        self.coverage >= min_coverage && self.load_spread() <= max_spread
    }
}
