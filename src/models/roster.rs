//! Roster: the named form of a complete assignment.
//!
//! Solvers work on dense ids; formatters and callers want names. A
//! roster lists, per category in domain order, the worker names of
//! every slot with the vacant sentinel spelled as [`VACANT`].

use serde::{Deserialize, Serialize};

use super::assignment::{Assignment, Slot, VACANT};
use super::day::Day;
use super::domain::Domain;

/// A weekly roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// One entry per category, in domain order.
    pub entries: Vec<RosterEntry>,
}

/// The week of a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Category name.
    pub category: String,
    /// Names per day (Sunday first), `headcount` names each.
    pub days: Vec<Vec<String>>,
}

impl Roster {
    /// Names every slot of an assignment.
    ///
    /// Unbound categories are skipped, so a partial assignment yields a
    /// partial roster.
    ///
    /// # Panics
    /// If the assignment holds ids not issued by `domain`. Solutions
    /// returned by a solver for `domain` never do; check foreign
    /// assignments with [`is_valid`](crate::checker::is_valid) first.
    pub fn from_assignment(domain: &Domain, assignment: &Assignment) -> Self {
        let entries = assignment
            .bound()
            .map(|(c, rota)| RosterEntry {
                category: domain.category(c).name.clone(),
                days: Day::ALL
                    .iter()
                    .map(|&day| {
                        rota.day(day)
                            .iter()
                            .map(|slot| match slot {
                                Slot::Vacant => VACANT.to_string(),
                                Slot::Filled(w) => domain.worker(*w).name.clone(),
                            })
                            .collect()
                    })
                    .collect(),
            })
            .collect();
        Self { entries }
    }

    /// Entry for a category.
    pub fn entry(&self, category: &str) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    /// Names on duty for a category on a day.
    pub fn on_duty(&self, category: &str, day: Day) -> Option<&[String]> {
        self.entry(category)
            .and_then(|e| e.days.get(day.index()))
            .map(Vec::as_slice)
    }

    /// Number of vacant slots across the roster.
    pub fn vacancy_count(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|e| e.days.iter().flatten())
            .filter(|n| n.as_str() == VACANT)
            .count()
    }
}
