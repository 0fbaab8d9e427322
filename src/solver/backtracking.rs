//! Exact backtracking solver.
//!
//! # Algorithm
//!
//! 1. Select the first unbound category (insertion order, no heuristic).
//! 2. Its candidate values are the Cartesian product over the 7 days of
//!    the per-day choices. A per-day choice is a `headcount`-combination
//!    of the day's pool in pool order, followed by partially or fully
//!    vacant choices when the category allows vacancies.
//! 3. Bind a candidate, check it, recurse on success, unbind on return.
//! 4. Succeed when every category is bound; fail when the first
//!    category's candidates are exhausted.
//!
//! [`Pruning::Incremental`] walks the same product one day at a time
//! against a [`UsageLedger`], cutting invalid prefixes early.
//! [`Pruning::FullRecheck`] binds whole 7-day candidates and re-validates
//! the entire assignment each time. Both visit candidates in the same
//! lexicographic order and return the same first roster.
//!
//! # Complexity
//! Exponential in categories × 7 × pool size in the worst case. Use a
//! [`SearchBudget`](super::SearchBudget) to bound long searches.

use itertools::Itertools;
use std::time::Instant;
use tracing::{debug, instrument, warn};

use super::config::{BacktrackingConfig, Pruning};
use super::{SearchStats, Solution, Solver};
use crate::checker::{is_valid, UsageLedger};
use crate::error::SolveError;
use crate::models::{
    Assignment, CategoryId, Day, DaySlots, Domain, Rota, Slot, DAYS_PER_WEEK,
};

pub(super) const NAME: &str = "backtracking";

/// Ordered candidate choices of one category, per day.
type WeekChoices = [Vec<DaySlots>; DAYS_PER_WEEK];

/// Per-category, per-day candidate choices.
type Choices = Vec<WeekChoices>;

/// Complete depth-first search.
///
/// # Example
/// ```
/// use duty_roster::models::{Category, Domain, Worker};
/// use duty_roster::solver::{BacktrackingSolver, Solver};
///
/// let domain = Domain::builder()
///     .worker(Worker::new("Ana"))
///     .category(Category::new("Fire").with_pool(["Ana"]).with_headcount(2))
///     .build()
///     .unwrap();
///
/// let err = BacktrackingSolver::default().solve(&domain).unwrap_err();
/// assert!(err.is_definitive());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    config: BacktrackingConfig,
}

impl BacktrackingSolver {
    pub fn new(config: BacktrackingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BacktrackingConfig {
        &self.config
    }
}

impl Solver for BacktrackingSolver {
    fn name(&self) -> &'static str {
        NAME
    }

    #[instrument(skip_all, fields(categories = domain.category_count(), pruning = ?self.config.pruning))]
    fn solve(&self, domain: &Domain) -> Result<Solution, SolveError> {
        let choices = day_choices(domain);
        let mut search = Search {
            domain,
            config: &self.config,
            choices: &choices,
            assignment: Assignment::new(domain.category_count()),
            ledger: UsageLedger::new(domain),
            nodes: 0,
            started: Instant::now(),
        };

        let found = match self.config.pruning {
            Pruning::Incremental => search.next_category(),
            Pruning::FullRecheck => search.next_category_full(),
        };
        let stats = SearchStats {
            nodes: search.nodes,
            elapsed: search.started.elapsed(),
            ..SearchStats::default()
        };

        match found {
            Ok(true) => {
                debug!(nodes = stats.nodes, "roster found");
                Ok(Solution {
                    strategy: NAME,
                    assignment: search.assignment,
                    stats,
                })
            }
            Ok(false) => {
                debug!(nodes = stats.nodes, "search space exhausted");
                Err(SolveError::Infeasible {
                    strategy: NAME,
                    nodes: stats.nodes,
                })
            }
            Err(e) => {
                warn!(nodes = stats.nodes, error = %e, "search stopped");
                Err(e)
            }
        }
    }
}

/// Builds the ordered per-day choices of every category.
fn day_choices(domain: &Domain) -> Choices {
    (0..domain.category_count())
        .map(|c| {
            let category = domain.category(c);
            let headcount = category.headcount;
            let min_filled = if category.allow_vacancy { 0 } else { headcount };

            Day::ALL.map(|day| {
                let pool = domain.pool(c, day);
                (min_filled..=headcount)
                    .rev()
                    .flat_map(|filled| {
                        pool.iter().copied().combinations(filled).map(move |ws| {
                            let mut slots: DaySlots = ws.into_iter().map(Slot::Filled).collect();
                            slots.resize(headcount, Slot::Vacant);
                            slots
                        })
                    })
                    .collect()
            })
        })
        .collect()
}

/// Lazy Cartesian product of a category's per-day choices.
///
/// Yields whole weeks in lexicographic order, Saturday varying fastest.
struct WeekCandidates<'a> {
    choices: &'a WeekChoices,
    next: Option<[usize; DAYS_PER_WEEK]>,
}

impl<'a> WeekCandidates<'a> {
    fn new(choices: &'a WeekChoices) -> Self {
        let next = choices
            .iter()
            .all(|day| !day.is_empty())
            .then_some([0; DAYS_PER_WEEK]);
        Self { choices, next }
    }
}

impl Iterator for WeekCandidates<'_> {
    type Item = [DaySlots; DAYS_PER_WEEK];

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let week = std::array::from_fn(|d| self.choices[d][current[d]].clone());

        let mut advanced = current;
        self.next = None;
        for d in (0..DAYS_PER_WEEK).rev() {
            if advanced[d] + 1 < self.choices[d].len() {
                advanced[d] += 1;
                self.next = Some(advanced);
                break;
            }
            advanced[d] = 0;
        }
        Some(week)
    }
}

/// Mutable state of one search.
struct Search<'a> {
    domain: &'a Domain,
    config: &'a BacktrackingConfig,
    choices: &'a Choices,
    assignment: Assignment,
    ledger: UsageLedger<'a>,
    nodes: u64,
    started: Instant,
}

impl Search<'_> {
    /// Counts a candidate and enforces the budget.
    fn tick(&mut self) -> Result<(), SolveError> {
        self.nodes += 1;
        let budget = &self.config.budget;
        if let Some(max) = budget.max_nodes {
            if self.nodes > max {
                return Err(SolveError::BudgetExhausted {
                    strategy: NAME,
                    reason: format!("node limit {max} reached"),
                });
            }
        }
        if let Some(limit) = budget.time_limit {
            if self.started.elapsed() > limit {
                return Err(SolveError::BudgetExhausted {
                    strategy: NAME,
                    reason: format!("time limit {limit:?} reached"),
                });
            }
        }
        Ok(())
    }

    fn next_category(&mut self) -> Result<bool, SolveError> {
        let Some(category) = self.assignment.first_unbound() else {
            return Ok(true);
        };
        let mut week: [DaySlots; DAYS_PER_WEEK] = Default::default();
        self.extend_day(category, 0, &mut week)
    }

    /// Chooses the slots of day `depth` of `category`.
    fn extend_day(
        &mut self,
        category: CategoryId,
        depth: usize,
        week: &mut [DaySlots; DAYS_PER_WEEK],
    ) -> Result<bool, SolveError> {
        let Some(day) = Day::from_index(depth) else {
            self.assignment.bind(category, Rota::from_week(week.clone()));
            if self.next_category()? {
                return Ok(true);
            }
            self.assignment.unbind(category);
            return Ok(false);
        };

        let choices = self.choices;
        for slots in &choices[category][day.index()] {
            self.tick()?;
            if !self.ledger.try_place_day(category, day, slots) {
                continue;
            }
            week[depth].clone_from(slots);
            if self.extend_day(category, depth + 1, week)? {
                return Ok(true);
            }
            self.ledger.remove_day(category, day, slots);
        }
        Ok(false)
    }

    fn next_category_full(&mut self) -> Result<bool, SolveError> {
        let Some(category) = self.assignment.first_unbound() else {
            return Ok(true);
        };

        let choices = self.choices;
        for week in WeekCandidates::new(&choices[category]) {
            self.tick()?;
            self.assignment.bind(category, Rota::from_week(week));
            if is_valid(&self.assignment, self.domain) && self.next_category_full()? {
                return Ok(true);
            }
            self.assignment.unbind(category);
        }
        Ok(false)
    }
}
