//! Worker model.
//!
//! Workers are the people placed on duty. Each worker carries a quota
//! per category: the maximum number of days in the week the worker may
//! be assigned to that category. Quotas bound usage, they never mandate it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A person eligible for duty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker name.
    pub name: String,
    /// Category name → maximum weekly assignments.
    ///
    /// A category without an entry is unbounded. Values are kept signed
    /// so that malformed input can be reported instead of wrapping.
    #[serde(default)]
    pub quotas: BTreeMap<String, i32>,
}

impl Worker {
    /// Creates a worker without quota limits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quotas: BTreeMap::new(),
        }
    }

    /// Sets the weekly quota for a category.
    pub fn with_quota(mut self, category: impl Into<String>, max_days: i32) -> Self {
        self.quotas.insert(category.into(), max_days);
        self
    }

    /// Forbids a category (quota 0).
    pub fn excluded_from(self, category: impl Into<String>) -> Self {
        self.with_quota(category, 0)
    }

    /// Raw quota for a category, `None` if unbounded.
    pub fn quota_for(&self, category: &str) -> Option<i32> {
        self.quotas.get(category).copied()
    }
}
