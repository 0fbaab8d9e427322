//! Working assignment used during search.
//!
//! An assignment binds categories to rotas (7 days × headcount slots).
//! It may be partial: the exact solver binds one category at a time and
//! unbinds it again on backtrack. All references are dense ids into a
//! [`Domain`](super::Domain).

use serde::{Deserialize, Serialize};

use super::day::{Day, DAYS_PER_WEEK};

/// Dense worker index into a domain.
pub type WorkerId = usize;

/// Dense category index into a domain.
pub type CategoryId = usize;

/// Reserved name of the vacant sentinel.
pub const VACANT: &str = "vacant";

/// Content of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// Intentionally unfilled. Exempt from day-uniqueness and quotas.
    Vacant,
    /// Staffed by a worker.
    Filled(WorkerId),
}

impl Slot {
    /// The worker in this slot, if any.
    #[inline]
    pub fn worker(self) -> Option<WorkerId> {
        match self {
            Slot::Vacant => None,
            Slot::Filled(w) => Some(w),
        }
    }

    #[inline]
    pub fn is_vacant(self) -> bool {
        matches!(self, Slot::Vacant)
    }
}

/// Slots of one category on one day (`headcount` entries).
pub type DaySlots = Vec<Slot>;

/// The weekly slot table of one category, Sunday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rota {
    days: [DaySlots; DAYS_PER_WEEK],
}

impl Rota {
    /// Builds a rota from exactly seven day entries.
    ///
    /// Returns `None` if `days` does not cover the week.
    pub fn new(days: Vec<DaySlots>) -> Option<Self> {
        let days: [DaySlots; DAYS_PER_WEEK] = days.try_into().ok()?;
        Some(Self::from_week(days))
    }

    /// Builds a rota from one entry per day, Sunday first.
    pub fn from_week(days: [DaySlots; DAYS_PER_WEEK]) -> Self {
        Self { days }
    }

    /// A rota with every slot vacant.
    pub fn vacant(headcount: usize) -> Self {
        Self::from_week(std::array::from_fn(|_| vec![Slot::Vacant; headcount]))
    }

    /// Slots of a day.
    pub fn day(&self, day: Day) -> &[Slot] {
        &self.days[day.index()]
    }

    /// Replaces the slots of a day, returning the previous ones.
    pub fn replace_day(&mut self, day: Day, slots: DaySlots) -> DaySlots {
        std::mem::replace(&mut self.days[day.index()], slots)
    }

    /// Iterates `(day, slot)` pairs in week order.
    pub fn iter(&self) -> impl Iterator<Item = (Day, Slot)> + '_ {
        Day::ALL
            .iter()
            .zip(&self.days)
            .flat_map(|(&day, slots)| slots.iter().map(move |&s| (day, s)))
    }

    /// Number of vacant slots.
    pub fn vacancies(&self) -> usize {
        self.iter().filter(|(_, s)| s.is_vacant()).count()
    }
}

/// A partial or complete binding of categories to rotas.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Assignment {
    bindings: Vec<Option<Rota>>,
}

impl Assignment {
    /// Creates an empty assignment for `category_count` categories.
    pub fn new(category_count: usize) -> Self {
        Self {
            bindings: vec![None; category_count],
        }
    }

    /// Binds a category, returning the previous rota.
    pub fn bind(&mut self, category: CategoryId, rota: Rota) -> Option<Rota> {
        self.bindings[category].replace(rota)
    }

    /// Removes a category's binding.
    pub fn unbind(&mut self, category: CategoryId) -> Option<Rota> {
        self.bindings[category].take()
    }

    /// The rota bound to a category.
    pub fn rota(&self, category: CategoryId) -> Option<&Rota> {
        self.bindings.get(category).and_then(Option::as_ref)
    }

    /// Mutable access to a bound rota.
    pub fn rota_mut(&mut self, category: CategoryId) -> Option<&mut Rota> {
        self.bindings.get_mut(category).and_then(Option::as_mut)
    }

    /// First category without a binding, in insertion order.
    pub fn first_unbound(&self) -> Option<CategoryId> {
        self.bindings.iter().position(Option::is_none)
    }

    /// Number of bound categories.
    pub fn bound_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.is_some()).count()
    }

    /// Number of categories this assignment covers (bound or not).
    pub fn category_count(&self) -> usize {
        self.bindings.len()
    }

    /// Whether every category is bound.
    pub fn is_complete(&self) -> bool {
        self.bindings.iter().all(Option::is_some)
    }

    /// Iterates bound categories with their rotas.
    pub fn bound(&self) -> impl Iterator<Item = (CategoryId, &Rota)> + '_ {
        self.bindings
            .iter()
            .enumerate()
            .filter_map(|(c, r)| r.as_ref().map(|r| (c, r)))
    }

    /// Iterates every `(category, day, slot)` triple of bound categories.
    pub fn triples(&self) -> impl Iterator<Item = (CategoryId, Day, Slot)> + '_ {
        self.bound()
            .flat_map(|(c, rota)| rota.iter().map(move |(d, s)| (c, d, s)))
    }
}
