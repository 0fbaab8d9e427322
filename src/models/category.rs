//! Duty category model.
//!
//! A category is a duty that must be staffed every day of the week
//! (e.g. "Fire", "Rescue", "Phone"). It lists, per day, the workers
//! eligible to cover it and how many of them are needed at once.

use serde::{Deserialize, Serialize};

use super::day::{Day, DAYS_PER_WEEK};

/// A duty category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category name.
    pub name: String,
    /// Workers required per day (default: 1).
    #[serde(default = "default_headcount")]
    pub headcount: usize,
    /// Whether a slot may be left vacant when nobody fits.
    #[serde(default)]
    pub allow_vacancy: bool,
    /// Eligible worker names per day, Sunday first.
    ///
    /// Order is significant: the exact solver tries candidates in pool order.
    pub pools: [Vec<String>; DAYS_PER_WEEK],
}

fn default_headcount() -> usize {
    1
}

impl Category {
    /// Creates a category with empty pools and a headcount of 1.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headcount: 1,
            allow_vacancy: false,
            pools: Default::default(),
        }
    }

    /// Sets the number of workers required per day.
    pub fn with_headcount(mut self, headcount: usize) -> Self {
        self.headcount = headcount;
        self
    }

    /// Allows vacant slots.
    pub fn with_vacancy(mut self) -> Self {
        self.allow_vacancy = true;
        self
    }

    /// Uses the same pool on every day.
    pub fn with_pool<I, S>(mut self, workers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pool: Vec<String> = workers.into_iter().map(Into::into).collect();
        for day_pool in &mut self.pools {
            day_pool.clone_from(&pool);
        }
        self
    }

    /// Sets the pool of a single day.
    pub fn with_day_pool<I, S>(mut self, day: Day, workers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pools[day.index()] = workers.into_iter().map(Into::into).collect();
        self
    }

    /// Eligible workers on a day.
    pub fn pool(&self, day: Day) -> &[String] {
        &self.pools[day.index()]
    }

    /// Distinct eligible workers across the week, in first-seen order.
    pub fn eligible_workers(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for name in self.pools.iter().flatten() {
            if !seen.contains(&name.as_str()) {
                seen.push(name.as_str());
            }
        }
        seen
    }

    /// Total number of slots to fill over the week.
    pub fn weekly_slots(&self) -> usize {
        self.headcount * DAYS_PER_WEEK
    }
}
