//! Timetabling domain models.
//!
//! Plain data types for the roster handed to the scheduler and the
//! timetable it returns. Every type is serde-enabled with the camelCase
//! wire names used by the persistence and UI layers.
//!
//! # Domain Mappings
//!
//! | u-timetable | Scheduling theory |
//! |-------------|-------------------|
//! | ClassSection | Task (owns its own exclusive grid) |
//! | TeachingAssignment | Activity with a weekly quota |
//! | Teacher | Shared renewable resource with a blocked calendar |
//! | Timetable | Schedule |

mod calendar;
mod class_section;
mod request;
mod teacher;
mod timetable;

pub use calendar::{Day, PeriodsPerShift, Shift, Slot, DAYS_PER_WEEK, MAX_PERIODS_PER_DAY};
pub use class_section::{ClassSection, TeachingAssignment};
pub use request::SchedulingRequest;
pub use teacher::Teacher;
pub use timetable::{ScheduleEntry, Timetable, Violation, ViolationType};
