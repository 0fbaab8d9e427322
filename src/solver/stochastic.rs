//! Randomized generate-and-repair solver.
//!
//! # Algorithm
//!
//! 1. **Generate**: for every category, shuffle its flat token pool (one
//!    token per unit of quota) and deal the tokens round-robin over the
//!    week, slot 0 of each day first. A token is skipped for a day where
//!    the worker is not eligible or already in that day's slots. Slots
//!    left over become vacant, which only passes validation in categories
//!    that allow vacancies. Validate; retry up to `generation_attempts`
//!    times.
//! 2. **Repair**: on a valid candidate, try up to `mutation_attempts`
//!    mutations. Each picks a random category and day and resamples that
//!    day's slots from the eligible pool. The first mutation that keeps
//!    the candidate valid is accepted; invalid ones are reverted. With no
//!    accepted mutation the valid candidate itself is returned.
//! 3. **Restart** the whole process up to `restarts` times.
//!
//! The search is bounded and incomplete: exhausting the budgets does not
//! prove that no roster exists. Results depend on the random source;
//! pass a seeded RNG (or set [`StochasticConfig::seed`]) to reproduce them.

use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, instrument, trace, warn};

use super::config::StochasticConfig;
use super::{SearchStats, Solution, Solver};
use crate::checker::is_valid;
use crate::error::SolveError;
use crate::models::{Assignment, CategoryId, Day, DaySlots, Domain, Rota, Slot, DAYS_PER_WEEK};

pub(super) const NAME: &str = "stochastic";

/// Generate-and-repair local search.
#[derive(Debug, Clone, Default)]
pub struct StochasticSolver {
    config: StochasticConfig,
}

impl StochasticSolver {
    pub fn new(config: StochasticConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StochasticConfig {
        &self.config
    }

    /// Runs the search with a caller-supplied random source.
    #[instrument(skip_all, fields(categories = domain.category_count()))]
    pub fn solve_with_rng<R: Rng>(
        &self,
        domain: &Domain,
        rng: &mut R,
    ) -> Result<Solution, SolveError> {
        let started = Instant::now();
        let mut stats = SearchStats::default();

        for restart in 0..self.config.restarts {
            stats.restarts = restart + 1;
            trace!(restart, "generating initial candidate");

            let Some(candidate) = self.generate(domain, rng, &mut stats) else {
                continue;
            };
            let assignment = self.repair(domain, candidate, rng, &mut stats);
            stats.elapsed = started.elapsed();
            debug!(
                restarts = stats.restarts,
                generations = stats.generations,
                mutations = stats.mutations,
                "roster found"
            );
            return Ok(Solution {
                strategy: NAME,
                assignment,
                stats,
            });
        }

        warn!(
            restarts = self.config.restarts,
            generations = stats.generations,
            "no valid candidate within budget"
        );
        Err(SolveError::BudgetExhausted {
            strategy: NAME,
            reason: format!(
                "{} restarts of {} generation attempts",
                self.config.restarts, self.config.generation_attempts
            ),
        })
    }

    /// Phase 1: draw candidates until one is valid.
    fn generate<R: Rng>(
        &self,
        domain: &Domain,
        rng: &mut R,
        stats: &mut SearchStats,
    ) -> Option<Assignment> {
        for _ in 0..self.config.generation_attempts {
            stats.generations += 1;
            let mut candidate = Assignment::new(domain.category_count());
            for category in 0..domain.category_count() {
                candidate.bind(category, deal(domain, category, rng));
            }
            if is_valid(&candidate, domain) {
                return Some(candidate);
            }
        }
        None
    }

    /// Phase 2: mutate a valid candidate until a mutation stays valid.
    fn repair<R: Rng>(
        &self,
        domain: &Domain,
        mut candidate: Assignment,
        rng: &mut R,
        stats: &mut SearchStats,
    ) -> Assignment {
        let categories = domain.category_count();
        if categories == 0 {
            return candidate;
        }

        for _ in 0..self.config.mutation_attempts {
            stats.mutations += 1;
            let category = rng.random_range(0..categories);
            let day = Day::ALL[rng.random_range(0..DAYS_PER_WEEK)];
            let fresh = sample_day(domain, category, day, rng);

            let Some(rota) = candidate.rota_mut(category) else {
                continue;
            };
            let previous = rota.replace_day(day, fresh);

            if is_valid(&candidate, domain) {
                trace!(category, %day, "mutation accepted");
                return candidate;
            }
            if let Some(rota) = candidate.rota_mut(category) {
                rota.replace_day(day, previous);
            }
        }
        candidate
    }
}

impl Solver for StochasticSolver {
    fn name(&self) -> &'static str {
        NAME
    }

    fn solve(&self, domain: &Domain) -> Result<Solution, SolveError> {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.solve_with_rng(domain, &mut rng)
    }
}

/// Deals a shuffled flat pool over the week.
fn deal<R: Rng>(domain: &Domain, category: CategoryId, rng: &mut R) -> Rota {
    let headcount = domain.headcount(category);
    let mut tokens = domain.flat_pool(category);
    tokens.shuffle(rng);

    let mut days: [DaySlots; DAYS_PER_WEEK] =
        std::array::from_fn(|_| Vec::with_capacity(headcount));
    for _ in 0..headcount {
        for day in Day::ALL {
            let slots = &mut days[day.index()];
            let pick = tokens.iter().position(|&w| {
                domain.is_eligible(w, category, day) && !slots.contains(&Slot::Filled(w))
            });
            slots.push(match pick {
                Some(i) => Slot::Filled(tokens.remove(i)),
                None => Slot::Vacant,
            });
        }
    }

    Rota::from_week(days)
}

/// Draws distinct eligible workers for one day, padded with vacancies.
fn sample_day<R: Rng>(domain: &Domain, category: CategoryId, day: Day, rng: &mut R) -> DaySlots {
    let headcount = domain.headcount(category);
    let mut slots: DaySlots = domain
        .pool(category, day)
        .choose_multiple(rng, headcount)
        .map(|&w| Slot::Filled(w))
        .collect();
    slots.resize(headcount, Slot::Vacant);
    slots
}
