//! Domain model: the read-only problem description handed to solvers.
//!
//! A [`DomainSpec`] is the serializable, name-based description
//! (categories with per-day pools, workers with quotas). Building it
//! validates the structure and resolves every name to a dense id, giving
//! a [`Domain`] that never changes afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::assignment::{CategoryId, WorkerId};
use super::category::Category;
use super::day::{Day, DAYS_PER_WEEK};
use super::worker::Worker;
use crate::error::DomainError;
use crate::validation::validate_domain;

/// Name-based problem description.
///
/// # Example
/// ```
/// use duty_roster::models::{Category, Domain, Worker};
///
/// let domain = Domain::builder()
///     .worker(Worker::new("Ana").with_quota("Fire", 4))
///     .worker(Worker::new("Bea"))
///     .category(Category::new("Fire").with_pool(["Ana", "Bea"]))
///     .build()
///     .unwrap();
/// assert_eq!(domain.category_count(), 1);
/// assert_eq!(domain.worker_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSpec {
    /// Categories in solving order.
    pub categories: Vec<Category>,
    /// Declared workers.
    pub workers: Vec<Worker>,
}

impl DomainSpec {
    /// Creates an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a category.
    pub fn category(mut self, category: Category) -> Self {
        self.categories.push(category);
        self
    }

    /// Adds a worker.
    pub fn worker(mut self, worker: Worker) -> Self {
        self.workers.push(worker);
        self
    }

    /// Validates and resolves the description.
    pub fn build(self) -> Result<Domain, DomainError> {
        Domain::from_spec(self)
    }
}

/// Validated, id-resolved problem description.
#[derive(Debug, Clone)]
pub struct Domain {
    categories: Vec<Category>,
    workers: Vec<Worker>,
    category_index: HashMap<String, CategoryId>,
    worker_index: HashMap<String, WorkerId>,
    /// `[category][day]` → eligible worker ids, deduplicated, pool order kept.
    pools: Vec<Vec<Vec<WorkerId>>>,
    /// `[worker][category]` → quota, `None` = unbounded.
    quotas: Vec<Vec<Option<u32>>>,
}

impl Domain {
    /// Starts an empty [`DomainSpec`].
    pub fn builder() -> DomainSpec {
        DomainSpec::new()
    }

    /// Validates a description and resolves names to ids.
    ///
    /// Fails with every structural problem found, not just the first.
    pub fn from_spec(spec: DomainSpec) -> Result<Self, DomainError> {
        validate_domain(&spec.categories, &spec.workers).map_err(DomainError::Invalid)?;

        let DomainSpec {
            categories,
            workers,
        } = spec;

        let category_index: HashMap<String, CategoryId> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        let worker_index: HashMap<String, WorkerId> = workers
            .iter()
            .enumerate()
            .map(|(i, w)| (w.name.clone(), i))
            .collect();

        let pools = categories
            .iter()
            .map(|c| {
                c.pools
                    .iter()
                    .map(|day_pool| {
                        let mut ids: Vec<WorkerId> = Vec::with_capacity(day_pool.len());
                        // Validation guarantees every name resolves.
                        for id in day_pool.iter().filter_map(|n| worker_index.get(n)) {
                            if !ids.contains(id) {
                                ids.push(*id);
                            }
                        }
                        ids
                    })
                    .collect()
            })
            .collect();

        let quotas = workers
            .iter()
            .map(|w| {
                categories
                    .iter()
                    .map(|c| w.quota_for(&c.name).map(|q| q.max(0) as u32))
                    .collect()
            })
            .collect();

        Ok(Self {
            categories,
            workers,
            category_index,
            worker_index,
            pools,
            quotas,
        })
    }

    /// Categories in solving order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Declared workers.
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Category by id.
    ///
    /// # Panics
    /// If `id` was not issued by this domain.
    pub fn category(&self, id: CategoryId) -> &Category {
        &self.categories[id]
    }

    /// Worker by id.
    ///
    /// # Panics
    /// If `id` was not issued by this domain.
    pub fn worker(&self, id: WorkerId) -> &Worker {
        &self.workers[id]
    }

    pub fn category_id(&self, name: &str) -> Option<CategoryId> {
        self.category_index.get(name).copied()
    }

    pub fn worker_id(&self, name: &str) -> Option<WorkerId> {
        self.worker_index.get(name).copied()
    }

    /// Whether a category may leave slots vacant.
    pub fn allows_vacancy(&self, category: CategoryId) -> bool {
        self.categories[category].allow_vacancy
    }

    /// Workers required per day for a category.
    pub fn headcount(&self, category: CategoryId) -> usize {
        self.categories[category].headcount
    }

    /// Eligible worker ids for a category on a day.
    pub fn pool(&self, category: CategoryId, day: Day) -> &[WorkerId] {
        &self.pools[category][day.index()]
    }

    /// Whether a worker may cover a category on a day.
    pub fn is_eligible(&self, worker: WorkerId, category: CategoryId, day: Day) -> bool {
        self.pool(category, day).contains(&worker)
    }

    /// Weekly quota of a worker for a category, `None` if unbounded.
    pub fn quota(&self, worker: WorkerId, category: CategoryId) -> Option<u32> {
        self.quotas[worker][category]
    }

    /// Flat token pool of a category.
    ///
    /// Every eligible worker appears once per unit of quota. Unbounded
    /// workers appear once per day, which is the most day-uniqueness allows.
    pub fn flat_pool(&self, category: CategoryId) -> Vec<WorkerId> {
        let mut distinct: Vec<WorkerId> = Vec::new();
        for day_pool in &self.pools[category] {
            for &w in day_pool {
                if !distinct.contains(&w) {
                    distinct.push(w);
                }
            }
        }

        let mut tokens = Vec::new();
        for w in distinct {
            let count = self
                .quota(w, category)
                .map_or(DAYS_PER_WEEK, |q| (q as usize).min(DAYS_PER_WEEK));
            tokens.extend(std::iter::repeat(w).take(count));
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn sample_domain() -> Domain {
        Domain::builder()
            .worker(Worker::new("Ana").with_quota("Fire", 2))
            .worker(Worker::new("Bea").excluded_from("Phone"))
            .worker(Worker::new("Caio"))
            .category(Category::new("Fire").with_pool(["Ana", "Bea", "Ana"]))
            .category(
                Category::new("Phone")
                    .with_pool(["Bea", "Caio"])
                    .with_day_pool(Day::Sunday, ["Caio"]),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_ids_resolve() {
        let d = sample_domain();
        assert_eq!(d.category_id("Fire"), Some(0));
        assert_eq!(d.category_id("Phone"), Some(1));
        assert_eq!(d.worker_id("Caio"), Some(2));
        assert_eq!(d.worker_id("Nobody"), None);
    }

    #[test]
    fn test_pool_deduplicated() {
        let d = sample_domain();
        assert_eq!(d.pool(0, Day::Monday), [0, 1]);
        assert_eq!(d.pool(1, Day::Sunday), [2]);
        assert!(d.is_eligible(1, 1, Day::Monday));
        assert!(!d.is_eligible(1, 1, Day::Sunday));
    }

    #[test]
    fn test_quotas() {
        let d = sample_domain();
        assert_eq!(d.quota(0, 0), Some(2));
        assert_eq!(d.quota(0, 1), None);
        assert_eq!(d.quota(1, 1), Some(0));
    }

    #[test]
    fn test_flat_pool_repeats_by_quota() {
        let d = sample_domain();
        // Ana: quota 2, Bea: unbounded (7)
        let fire = d.flat_pool(0);
        assert_eq!(fire.iter().filter(|&&w| w == 0).count(), 2);
        assert_eq!(fire.iter().filter(|&&w| w == 1).count(), 7);

        // Bea has quota 0 for Phone
        let phone = d.flat_pool(1);
        assert!(!phone.contains(&1));
        assert_eq!(phone.len(), 7);
    }

    #[test]
    fn test_build_reports_structural_errors() {
        let err = Domain::builder()
            .worker(Worker::new("Ana").with_quota("Fire", -1))
            .category(Category::new("Fire").with_pool(["Ana"]))
            .build()
            .unwrap_err();

        let DomainError::Invalid(errors) = err;
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeQuota));
    }

    #[test]
    fn test_spec_from_json() {
        let json = r#"{
            "categories": [
                {"name": "Fire", "headcount": 1,
                 "pools": [["A","B"],["A","B"],["A","B"],["A","B"],["A","B"],["A","B"],["A","B"]]}
            ],
            "workers": [
                {"name": "A", "quotas": {"Fire": 4}},
                {"name": "B"}
            ]
        }"#;
        let spec: DomainSpec = serde_json::from_str(json).unwrap();
        let d = spec.build().unwrap();
        assert_eq!(d.quota(0, 0), Some(4));
        assert_eq!(d.quota(1, 0), None);
    }
}
