//! School-week calendar: days, shifts, and period slots.
//!
//! # Time Model
//! A school week is five days. Each class belongs to one shift, and a shift
//! defines how many periods a day has. Periods are 1-based: a shift with
//! `N` periods per day has the valid range `1..=N`.
//!
//! Teacher availability is expressed on `(day, period)` slots without a
//! shift component, so a blocked slot applies to every shift.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of periods per day a shift may declare.
///
/// Occupancy is tracked as one 32-bit mask per day.
pub const MAX_PERIODS_PER_DAY: u8 = 32;

/// Number of school days in a week.
pub const DAYS_PER_WEEK: usize = 5;

/// A school day. The set is closed: any other day code is rejected on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    /// Monday.
    #[serde(rename = "PZT")]
    Pzt,
    /// Tuesday.
    #[serde(rename = "SAL")]
    Sal,
    /// Wednesday.
    #[serde(rename = "ÇAR")]
    Car,
    /// Thursday.
    #[serde(rename = "PER")]
    Per,
    /// Friday.
    #[serde(rename = "CUM")]
    Cum,
}

impl Day {
    /// All days in scan order.
    pub const ALL: [Day; DAYS_PER_WEEK] = [Day::Pzt, Day::Sal, Day::Car, Day::Per, Day::Cum];

    /// Zero-based position in the week.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Day::Pzt => 0,
            Day::Sal => 1,
            Day::Car => 2,
            Day::Per => 3,
            Day::Cum => 4,
        }
    }

    /// Wire code of the day.
    pub fn code(self) -> &'static str {
        match self {
            Day::Pzt => "PZT",
            Day::Sal => "SAL",
            Day::Car => "ÇAR",
            Day::Per => "PER",
            Day::Cum => "CUM",
        }
    }

    /// Parses a wire code. Returns `None` for anything outside the week.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.code() == code)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Half of the school day a class attends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Shift {
    /// Morning shift.
    Morning,
    /// Afternoon shift.
    Afternoon,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Morning => f.write_str("MORNING"),
            Shift::Afternoon => f.write_str("AFTERNOON"),
        }
    }
}

/// A single `(day, period)` cell of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// School day.
    pub day: Day,
    /// Period number (1-based).
    pub period: u8,
}

impl Slot {
    /// Creates a new slot.
    pub fn new(day: Day, period: u8) -> Self {
        Self { day, period }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.day, self.period)
    }
}

/// Number of periods per day for each shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodsPerShift {
    /// Periods per day in the morning shift.
    #[serde(rename = "MORNING")]
    pub morning: u8,
    /// Periods per day in the afternoon shift.
    #[serde(rename = "AFTERNOON")]
    pub afternoon: u8,
}

impl PeriodsPerShift {
    /// Creates a new shift configuration.
    pub fn new(morning: u8, afternoon: u8) -> Self {
        Self { morning, afternoon }
    }

    /// Periods per day for a shift.
    #[inline]
    pub fn periods(&self, shift: Shift) -> u8 {
        match shift {
            Shift::Morning => self.morning,
            Shift::Afternoon => self.afternoon,
        }
    }

    /// Theoretical weekly capacity of a shift (periods per day x 5 days).
    #[inline]
    pub fn weekly_capacity(&self, shift: Shift) -> u32 {
        u32::from(self.periods(shift)) * DAYS_PER_WEEK as u32
    }

    /// Largest period count across both shifts.
    pub fn max_periods(&self) -> u8 {
        self.morning.max(self.afternoon)
    }
}

impl Default for PeriodsPerShift {
    fn default() -> Self {
        Self::new(8, 8)
    }
}
