//! Rostering domain models.
//!
//! Provides the data types describing a weekly rostering problem and
//! its solutions.
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`Category`] | A duty staffed every day (Fire, Rescue, Phone) |
//! | [`Worker`] | A person with per-category weekly quotas |
//! | [`Domain`] | Validated, id-resolved problem |
//! | [`Assignment`] | Partial or complete category → rota binding |
//! | [`Roster`] | Named form of an assignment |

mod assignment;
mod category;
mod day;
mod domain;
mod roster;
mod worker;

pub use assignment::{Assignment, CategoryId, DaySlots, Rota, Slot, WorkerId, VACANT};
pub use category::Category;
pub use day::{Day, DAYS_PER_WEEK};
pub use domain::{Domain, DomainSpec};
pub use roster::{Roster, RosterEntry};
pub use worker::Worker;
