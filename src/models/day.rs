//! Days of the planning week.
//!
//! The roster always covers one fixed week, Sunday first. Day indices
//! 0..6 are used throughout the crate as positions in a rota.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of days in a planning week.
pub const DAYS_PER_WEEK: usize = 7;

/// A day of the planning week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Day {
    /// All days in week order.
    pub const ALL: [Day; DAYS_PER_WEEK] = [
        Day::Sunday,
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    /// Position of the day in the week (Sunday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at a week position, `None` outside 0..6.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Three-letter English abbreviation.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Day::Sunday => "SUN",
            Day::Monday => "MON",
            Day::Tuesday => "TUE",
            Day::Wednesday => "WED",
            Day::Thursday => "THU",
            Day::Friday => "FRI",
            Day::Saturday => "SAT",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
