//! Weekly duty rostering.
//!
//! Assigns workers to duty categories over a 7-day week so that nobody
//! works two categories on the same day and nobody exceeds a category's
//! weekly quota.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Category`, `Worker`, `Domain`,
//!   `Assignment`, `Rota`, `Slot`, `Roster`
//! - **`validation`**: Structural checks (duplicate names, negative quotas,
//!   empty pools, unknown references)
//! - **`checker`**: Day-uniqueness, quota and coverage constraints, full
//!   and incremental
//! - **`solver`**: Exact backtracking and stochastic generate-and-repair,
//!   roster KPIs
//! - **`text`**: Plain-text input files and weekly table output
//!
//! # Example
//!
//! ```
//! use duty_roster::models::{Category, Day, Domain, Worker};
//! use duty_roster::solver::{BacktrackingSolver, Solver};
//!
//! let domain = Domain::builder()
//!     .worker(Worker::new("Ana").with_quota("Fire", 4))
//!     .worker(Worker::new("Bea").with_quota("Fire", 4))
//!     .worker(Worker::new("Caio"))
//!     .category(Category::new("Fire").with_pool(["Ana", "Bea"]))
//!     .category(Category::new("Phone").with_pool(["Ana", "Bea", "Caio"]))
//!     .build()
//!     .unwrap();
//!
//! let solution = BacktrackingSolver::default().solve(&domain).unwrap();
//! let roster = solution.roster(&domain);
//! assert_eq!(roster.on_duty("Fire", Day::Sunday).unwrap().len(), 1);
//! ```
//!
//! # Limitations
//!
//! Exact search is exponential in the worst case; bound it with a
//! `SearchBudget`. Stochastic search is incomplete and non-deterministic
//! unless seeded. Neither solver balances load; they return a feasible
//! roster, not an optimal one.

pub mod checker;
pub mod error;
pub mod models;
pub mod solver;
pub mod text;
pub mod validation;

pub use error::{DomainError, LoadError, ParseError, SolveError};
