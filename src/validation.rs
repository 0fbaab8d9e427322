//! Structural validation of rostering problems.
//!
//! Checks the integrity of categories and workers before any solving.
//! Detects:
//! - Duplicate names
//! - Quotas naming a missing category, negative quotas
//! - Pools naming undeclared workers
//! - Days with no eligible worker on a category that must be covered
//! - Zero headcount
//! - Workers using the reserved vacant name

use crate::models::{Category, Day, Worker, VACANT};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two categories or two workers share a name.
    DuplicateName,
    /// A quota references a category that doesn't exist.
    UnknownCategory,
    /// A pool references a worker that wasn't declared.
    UnknownWorker,
    /// A quota is below zero.
    NegativeQuota,
    /// A category that must be covered has nobody eligible on some day.
    EmptyPool,
    /// A category requires zero workers per day.
    InvalidHeadcount,
    /// A worker is named like the vacant sentinel.
    ReservedName,
    /// There is nothing to schedule.
    NoCategories,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the input data for a rostering problem.
///
/// Checks:
/// 1. At least one category
/// 2. No duplicate category or worker names
/// 3. No worker named `vacant`
/// 4. Headcount of every category is at least 1
/// 5. Every pool entry names a declared worker
/// 6. Every day of a category without vacancies has an eligible worker
/// 7. Every quota names an existing category and is not negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_domain(categories: &[Category], workers: &[Worker]) -> ValidationResult {
    let mut errors = Vec::new();

    if categories.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoCategories,
            "No categories to schedule",
        ));
    }

    // Collect worker names
    let mut worker_names = HashSet::new();
    for w in workers {
        if !worker_names.insert(w.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate worker name: {}", w.name),
            ));
        }
        if w.name == VACANT {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservedName,
                format!("Worker name '{VACANT}' is reserved for vacant slots"),
            ));
        }
    }

    // Collect category names and check pools
    let mut category_names = HashSet::new();
    for c in categories {
        if !category_names.insert(c.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate category name: {}", c.name),
            ));
        }

        if c.headcount == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHeadcount,
                format!("Category '{}' requires zero workers per day", c.name),
            ));
        }

        let mut reported = HashSet::new();
        for day in Day::ALL {
            let pool = c.pool(day);
            if pool.is_empty() && !c.allow_vacancy && c.headcount > 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyPool,
                    format!("Category '{}' has no eligible worker on {day}", c.name),
                ));
            }
            for name in pool {
                if !worker_names.contains(name.as_str()) && reported.insert(name.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::UnknownWorker,
                        format!(
                            "Category '{}' references unknown worker '{}'",
                            c.name, name
                        ),
                    ));
                }
            }
        }
    }

    // Check quotas
    for w in workers {
        for (category, &quota) in &w.quotas {
            if !category_names.contains(category.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCategory,
                    format!(
                        "Worker '{}' has a quota for unknown category '{}'",
                        w.name, category
                    ),
                ));
            }
            if quota < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NegativeQuota,
                    format!(
                        "Worker '{}' has negative quota {} for '{}'",
                        w.name, quota, category
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
