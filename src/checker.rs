//! Constraint checking for assignments.
//!
//! Three constraint families make an assignment valid:
//! - **Day-uniqueness**: on any day a worker fills at most one slot,
//!   across all categories.
//! - **Quota bound**: a worker fills at most `quota` slots of a category
//!   over the week.
//! - **Coverage**: a vacant slot is only allowed in a category declared
//!   with `allow_vacancy`.
//!
//! Vacant slots are exempt from the first two. Checks run over whatever
//! categories are bound, so partial assignments are judged only by the
//! triples they already contain.
//!
//! Ids are dense indices into one [`Domain`]. An assignment that mentions
//! a category or worker the domain never issued is invalid rather than a
//! panic.
//!
//! [`is_valid`] re-checks a whole assignment from scratch. [`UsageLedger`]
//! keeps the same state incrementally and accepts exactly the placements
//! after which [`is_valid`] would still hold.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::{Assignment, CategoryId, Day, Domain, Slot, WorkerId, DAYS_PER_WEEK};

/// Whether an assignment satisfies day-uniqueness, quotas and coverage.
///
/// # Algorithm
/// One set of busy workers per day. Every bound `(category, day, slot)`
/// triple is visited once: a vacant slot fails unless its category allows
/// vacancies, a worker already in the day's set fails immediately,
/// otherwise the worker is recorded and its `(worker, category)` counter
/// incremented. Counters are compared with quotas at the end.
pub fn is_valid(assignment: &Assignment, domain: &Domain) -> bool {
    let mut days: Vec<HashSet<WorkerId>> = vec![HashSet::new(); DAYS_PER_WEEK];
    let mut usage: HashMap<(WorkerId, CategoryId), u32> = HashMap::new();

    for (category, day, slot) in assignment.triples() {
        if category >= domain.category_count() {
            return false;
        }
        let Some(worker) = slot.worker() else {
            if domain.allows_vacancy(category) {
                continue;
            }
            return false;
        };
        if worker >= domain.worker_count() || !days[day.index()].insert(worker) {
            return false;
        }
        *usage.entry((worker, category)).or_insert(0) += 1;
    }

    usage.into_iter().all(|((worker, category), used)| {
        domain
            .quota(worker, category)
            .map_or(true, |quota| used <= quota)
    })
}

/// A constraint violation found in an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Offending worker name, if a worker is at fault.
    pub worker: Option<String>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of constraint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A worker fills more than one slot on the same day.
    DoubleBooking,
    /// A worker exceeds the weekly quota of a category.
    QuotaExceeded,
    /// A slot is vacant in a category that does not allow vacancies.
    UncoveredSlot,
    /// A category or worker id not issued by the domain.
    UnknownId,
}

/// Lists every violation in an assignment.
///
/// Unlike [`is_valid`] this does not stop at the first problem. An
/// assignment is valid exactly when the list is empty.
pub fn find_violations(assignment: &Assignment, domain: &Domain) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut days: Vec<HashMap<WorkerId, CategoryId>> = vec![HashMap::new(); DAYS_PER_WEEK];
    let mut usage: HashMap<(WorkerId, CategoryId), u32> = HashMap::new();

    for (category, day, slot) in assignment.triples() {
        if category >= domain.category_count() {
            violations.push(Violation {
                violation_type: ViolationType::UnknownId,
                worker: None,
                message: format!("category #{category} on {day} is not in the domain"),
            });
            continue;
        }
        let Some(worker) = slot.worker() else {
            if !domain.allows_vacancy(category) {
                violations.push(Violation {
                    violation_type: ViolationType::UncoveredSlot,
                    worker: None,
                    message: format!(
                        "'{}' has a vacant slot on {day}",
                        domain.category(category).name
                    ),
                });
            }
            continue;
        };
        if worker >= domain.worker_count() {
            violations.push(Violation {
                violation_type: ViolationType::UnknownId,
                worker: None,
                message: format!(
                    "worker #{worker} on '{}' {day} is not in the domain",
                    domain.category(category).name
                ),
            });
            continue;
        }
        if let Some(&first) = days[day.index()].get(&worker) {
            let name = &domain.worker(worker).name;
            violations.push(Violation {
                violation_type: ViolationType::DoubleBooking,
                worker: Some(name.clone()),
                message: format!(
                    "{name} is on '{}' and '{}' on {day}",
                    domain.category(first).name,
                    domain.category(category).name
                ),
            });
        } else {
            days[day.index()].insert(worker, category);
        }
        *usage.entry((worker, category)).or_insert(0) += 1;
    }

    let mut over: Vec<_> = usage
        .into_iter()
        .filter_map(|((worker, category), used)| {
            let quota = domain.quota(worker, category)?;
            (used > quota).then_some((worker, category, used, quota))
        })
        .collect();
    over.sort_unstable();

    for (worker, category, used, quota) in over {
        let name = &domain.worker(worker).name;
        violations.push(Violation {
            violation_type: ViolationType::QuotaExceeded,
            worker: Some(name.clone()),
            message: format!(
                "{name} has {used} '{}' duties, quota is {quota}",
                domain.category(category).name
            ),
        });
    }

    violations
}

/// Incremental constraint state.
///
/// Tracks which workers are busy on each day and how often each worker
/// fills each category. Placements are rejected when they would break
/// day-uniqueness, a quota or coverage, leaving the ledger untouched.
/// Ids the domain never issued are rejected the same way.
#[derive(Debug, Clone)]
pub struct UsageLedger<'d> {
    domain: &'d Domain,
    /// `[day][worker]`
    busy: Vec<Vec<bool>>,
    /// `[worker][category]`
    usage: Vec<Vec<u32>>,
}

impl<'d> UsageLedger<'d> {
    /// An empty ledger.
    pub fn new(domain: &'d Domain) -> Self {
        Self {
            domain,
            busy: vec![vec![false; domain.worker_count()]; DAYS_PER_WEEK],
            usage: vec![vec![0; domain.category_count()]; domain.worker_count()],
        }
    }

    /// Whether a slot could be placed without violating a constraint.
    pub fn can_place(&self, category: CategoryId, day: Day, slot: Slot) -> bool {
        if category >= self.domain.category_count() {
            return false;
        }
        let Some(worker) = slot.worker() else {
            return self.domain.allows_vacancy(category);
        };
        if worker >= self.domain.worker_count() || self.busy[day.index()][worker] {
            return false;
        }
        let used = self.usage[worker][category];
        self.domain
            .quota(worker, category)
            .map_or(true, |quota| used < quota)
    }

    /// Records a slot if allowed.
    pub fn try_place(&mut self, category: CategoryId, day: Day, slot: Slot) -> bool {
        if !self.can_place(category, day, slot) {
            return false;
        }
        if let Some(worker) = slot.worker() {
            self.busy[day.index()][worker] = true;
            self.usage[worker][category] += 1;
        }
        true
    }

    /// Undoes a previous successful placement.
    ///
    /// Only slots accepted by [`try_place`](Self::try_place) may be
    /// removed.
    pub fn remove(&mut self, category: CategoryId, day: Day, slot: Slot) {
        if let Some(worker) = slot.worker() {
            debug_assert!(self.busy[day.index()][worker]);
            self.busy[day.index()][worker] = false;
            self.usage[worker][category] -= 1;
        }
    }

    /// Records all slots of a day, or none of them.
    pub fn try_place_day(&mut self, category: CategoryId, day: Day, slots: &[Slot]) -> bool {
        for (placed, &slot) in slots.iter().enumerate() {
            if !self.try_place(category, day, slot) {
                for &undo in &slots[..placed] {
                    self.remove(category, day, undo);
                }
                return false;
            }
        }
        true
    }

    /// Undoes [`try_place_day`](Self::try_place_day).
    pub fn remove_day(&mut self, category: CategoryId, day: Day, slots: &[Slot]) {
        for &slot in slots {
            self.remove(category, day, slot);
        }
    }

    /// Slots of a worker in a category so far, zero for unknown ids.
    pub fn usage(&self, worker: WorkerId, category: CategoryId) -> u32 {
        self.usage
            .get(worker)
            .and_then(|row| row.get(category))
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Rota, Worker};
    use proptest::prelude::*;

    fn three_worker_domain() -> Domain {
        Domain::builder()
            .worker(Worker::new("Ana").with_quota("Fire", 3))
            .worker(Worker::new("Bea").excluded_from("Phone"))
            .worker(Worker::new("Caio"))
            .category(
                Category::new("Fire")
                    .with_pool(["Ana", "Bea", "Caio"])
                    .with_vacancy(),
            )
            .category(Category::new("Phone").with_pool(["Ana", "Bea", "Caio"]))
            .build()
            .unwrap()
    }

    fn rota(workers: [Option<WorkerId>; DAYS_PER_WEEK]) -> Rota {
        Rota::new(
            workers
                .iter()
                .map(|w| vec![w.map_or(Slot::Vacant, Slot::Filled)])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_assignment_is_valid() {
        let d = three_worker_domain();
        assert!(is_valid(&Assignment::new(2), &d));
    }

    #[test]
    fn test_partial_assignment() {
        let d = three_worker_domain();
        let mut a = Assignment::new(2);
        a.bind(0, rota([Some(0), Some(1), Some(2), Some(0), Some(1), Some(2), Some(0)]));
        assert!(is_valid(&a, &d));
        assert!(find_violations(&a, &d).is_empty());
    }

    #[test]
    fn test_day_uniqueness_across_categories() {
        let d = three_worker_domain();
        let mut a = Assignment::new(2);
        a.bind(0, rota([Some(0), Some(1), Some(2), Some(1), Some(1), Some(2), Some(1)]));
        a.bind(1, rota([Some(0), Some(2), Some(0), Some(2), Some(0), Some(0), Some(2)]));
        assert!(!is_valid(&a, &d));

        let v = find_violations(&a, &d);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::DoubleBooking);
        assert_eq!(v[0].worker.as_deref(), Some("Ana"));
        assert!(v[0].message.contains("SUN"));
    }

    #[test]
    fn test_day_uniqueness_within_category() {
        let d = Domain::builder()
            .worker(Worker::new("Ana"))
            .worker(Worker::new("Bea"))
            .category(Category::new("Fire").with_pool(["Ana", "Bea"]).with_headcount(2))
            .build()
            .unwrap();
        let mut days = vec![vec![Slot::Filled(0), Slot::Filled(1)]; DAYS_PER_WEEK];
        let mut a = Assignment::new(1);
        a.bind(0, Rota::new(days.clone()).unwrap());
        assert!(is_valid(&a, &d));

        days[3] = vec![Slot::Filled(0), Slot::Filled(0)];
        a.bind(0, Rota::new(days).unwrap());
        assert!(!is_valid(&a, &d));
    }

    #[test]
    fn test_quota_exceeded() {
        let d = three_worker_domain();
        let mut a = Assignment::new(2);
        // Ana four times on Fire, quota 3
        a.bind(0, rota([Some(0), Some(0), Some(0), Some(0), Some(1), Some(1), Some(1)]));
        assert!(!is_valid(&a, &d));

        let v = find_violations(&a, &d);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::QuotaExceeded);
        assert!(v[0].message.contains("quota is 3"));
    }

    #[test]
    fn test_zero_quota() {
        let d = three_worker_domain();
        let mut a = Assignment::new(2);
        a.bind(1, rota([Some(1), Some(0), Some(2), Some(0), Some(2), Some(0), Some(2)]));
        assert!(!is_valid(&a, &d));

        let v = find_violations(&a, &d);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::QuotaExceeded);
        assert_eq!(v[0].worker.as_deref(), Some("Bea"));
    }

    #[test]
    fn test_vacancy_follows_category() {
        let d = three_worker_domain();
        let mut a = Assignment::new(2);
        a.bind(0, Rota::vacant(1));
        assert!(is_valid(&a, &d));
        assert!(find_violations(&a, &d).is_empty());

        a.bind(1, rota([Some(0), Some(2), None, Some(0), Some(2), Some(0), Some(2)]));
        assert!(!is_valid(&a, &d));

        let v = find_violations(&a, &d);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::UncoveredSlot);
        assert_eq!(v[0].worker, None);
        assert!(v[0].message.contains("TUE"));
    }

    #[test]
    fn test_foreign_ids_are_invalid() {
        let d = three_worker_domain();

        let mut a = Assignment::new(2);
        a.bind(0, rota([Some(0), Some(1), Some(9), Some(0), Some(1), Some(2), Some(0)]));
        assert!(!is_valid(&a, &d));
        let v = find_violations(&a, &d);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].violation_type, ViolationType::UnknownId);
        assert!(v[0].message.contains("#9"));

        // A third category the domain does not have
        let mut a = Assignment::new(3);
        a.bind(2, rota([Some(0); DAYS_PER_WEEK]));
        assert!(!is_valid(&a, &d));
        assert_eq!(find_violations(&a, &d).len(), DAYS_PER_WEEK);

        let ledger = UsageLedger::new(&d);
        assert!(!ledger.can_place(0, Day::Monday, Slot::Filled(9)));
        assert!(!ledger.can_place(2, Day::Monday, Slot::Filled(0)));
        assert!(!ledger.can_place(2, Day::Monday, Slot::Vacant));
        assert_eq!(ledger.usage(9, 0), 0);
        assert_eq!(ledger.usage(0, 2), 0);
    }

    #[test]
    fn test_ledger_place_and_remove() {
        let d = three_worker_domain();
        let mut ledger = UsageLedger::new(&d);

        assert!(ledger.try_place(0, Day::Sunday, Slot::Filled(0)));
        assert!(!ledger.try_place(1, Day::Sunday, Slot::Filled(0)));
        assert!(ledger.try_place(0, Day::Sunday, Slot::Vacant));
        assert!(ledger.try_place(0, Day::Sunday, Slot::Vacant));
        assert!(!ledger.try_place(1, Day::Sunday, Slot::Vacant));
        assert_eq!(ledger.usage(0, 0), 1);

        ledger.remove(0, Day::Sunday, Slot::Filled(0));
        assert!(ledger.try_place(1, Day::Sunday, Slot::Filled(0)));
        assert!(!ledger.can_place(1, Day::Monday, Slot::Filled(1)));
    }

    #[test]
    fn test_ledger_day_is_atomic() {
        let d = three_worker_domain();
        let mut ledger = UsageLedger::new(&d);
        assert!(ledger.try_place(1, Day::Friday, Slot::Filled(2)));

        let slots = [Slot::Filled(0), Slot::Filled(2)];
        assert!(!ledger.try_place_day(0, Day::Friday, &slots));
        // Ana's placement was rolled back
        assert_eq!(ledger.usage(0, 0), 0);
        assert!(ledger.can_place(0, Day::Friday, Slot::Filled(0)));
    }

    fn arb_rota() -> impl Strategy<Value = Rota> {
        prop::collection::vec(prop::option::of(0usize..3), DAYS_PER_WEEK).prop_map(|ws| {
            Rota::new(
                ws.into_iter()
                    .map(|w| vec![w.map_or(Slot::Vacant, Slot::Filled)])
                    .collect(),
            )
            .unwrap()
        })
    }

    proptest! {
        #[test]
        fn test_ledger_agrees_with_full_check(fire in arb_rota(), phone in arb_rota()) {
            let d = three_worker_domain();
            let mut a = Assignment::new(2);
            a.bind(0, fire.clone());
            a.bind(1, phone.clone());

            let mut ledger = UsageLedger::new(&d);
            let incremental = [(0, &fire), (1, &phone)].iter().all(|(c, rota)| {
                rota.iter().all(|(day, slot)| ledger.try_place(*c, day, slot))
            });

            prop_assert_eq!(incremental, is_valid(&a, &d));
            prop_assert_eq!(find_violations(&a, &d).is_empty(), is_valid(&a, &d));
        }

        #[test]
        fn test_sentinel_day_never_invalidates(fire in arb_rota(), day in 0usize..DAYS_PER_WEEK) {
            let d = three_worker_domain();
            let mut vacated = fire.clone();
            let mut a = Assignment::new(2);
            a.bind(0, fire);
            let was_valid = is_valid(&a, &d);

            vacated.replace_day(Day::ALL[day], vec![Slot::Vacant]);
            a.bind(0, vacated);
            // Clearing slots can only help
            prop_assert!(!was_valid || is_valid(&a, &d));
        }
    }
}
