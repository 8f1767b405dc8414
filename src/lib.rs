//! Deterministic class-timetable scheduler.
//!
//! Assigns every (class, day, period) cell of a school week to a
//! (lesson, teacher) pair under hard constraints: no teacher double-booked,
//! class cells exclusive, weekly-hour quotas met exactly, and multi-hour
//! lessons placed as contiguous two-period blocks.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ClassSection`, `TeachingAssignment`,
//!   `Teacher`, `SchedulingRequest`, `ScheduleEntry`, `Timetable`, `Day`,
//!   `Shift`, `Slot`
//! - **`validation`**: Input integrity checks (duplicate IDs, blocked slots,
//!   period ranges)
//! - **`scheduler`**: Normalizer, block decomposer, placement engine,
//!   assembler/verifier, KPIs
//! - **`error`**: `SchedulingError` taxonomy
//!
//! # Example
//!
//! ```
//! use u_timetable::build_schedule;
//! use u_timetable::models::{ClassSection, SchedulingRequest, Shift, TeachingAssignment};
//!
//! let request = SchedulingRequest::new(
//!     vec![ClassSection::new("9A", Shift::Morning)
//!         .with_assignment(TeachingAssignment::new("MAT", 3))],
//!     vec![],
//! );
//! let entries = build_schedule(&request).unwrap();
//! assert_eq!(entries.len(), 3);
//! ```
//!
//! # Logging
//!
//! Events are emitted through `tracing`; the library installs no subscriber.

pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, SchedulingError};
pub use scheduler::{build_schedule, SchedulerConfig, TimetableScheduler};
