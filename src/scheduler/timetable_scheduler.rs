//! Deterministic timetable scheduler.
//!
//! # Algorithm
//!
//! 1. Normalize: validate, drop zero-hour lessons, check weekly capacity.
//! 2. Decompose every lesson into 1- and 2-period chunks.
//! 3. Place chunks greedily, most constrained first, with one retry pass.
//! 4. Assemble entries and re-verify every hard constraint from the
//!    entries alone.
//!
//! # Complexity
//! O(c * d * p) where c=chunks, d=5 days, p=periods per day; verification is
//! O(e log e) in the number of entries.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{assemble, decompose, normalize, place_chunks, verify_entries};
use crate::error::{Result, SchedulingError};
use crate::models::{ScheduleEntry, SchedulingRequest, Timetable};

/// Tunable solver behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Run one retry pass with deferred chunks promoted to the front.
    pub retry_pass: bool,
    /// Prefer days the same lesson has not used yet, falling back to the
    /// first fit when every fresh day is full.
    pub spread_lesson_days: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            retry_pass: true,
            spread_lesson_days: false,
        }
    }
}

impl SchedulerConfig {
    /// Enables or disables the retry pass.
    pub fn with_retry_pass(mut self, enabled: bool) -> Self {
        self.retry_pass = enabled;
        self
    }

    /// Enables or disables day spreading.
    pub fn with_spread_lesson_days(mut self, enabled: bool) -> Self {
        self.spread_lesson_days = enabled;
        self
    }
}

/// Constraint-based timetable scheduler.
///
/// Holds no state between runs; one instance can serve concurrent callers.
///
/// # Example
///
/// ```
/// use u_timetable::models::{ClassSection, SchedulingRequest, Shift, Teacher, TeachingAssignment};
/// use u_timetable::scheduler::TimetableScheduler;
///
/// let request = SchedulingRequest::new(
///     vec![ClassSection::new("9A", Shift::Morning)
///         .with_assignment(TeachingAssignment::new("MAT", 4).with_teacher("T1", "Ayşe"))],
///     vec![Teacher::new("T1")],
/// );
///
/// let timetable = TimetableScheduler::new().schedule(&request).unwrap();
/// assert_eq!(timetable.entry_count(), 4);
/// assert_eq!(timetable.entries_for_teacher("T1").len(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableScheduler {
    config: SchedulerConfig,
}

impl TimetableScheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Enables or disables the retry pass.
    pub fn with_retry_pass(mut self, enabled: bool) -> Self {
        self.config.retry_pass = enabled;
        self
    }

    /// Enables or disables day spreading.
    pub fn with_spread_lesson_days(mut self, enabled: bool) -> Self {
        self.config.spread_lesson_days = enabled;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Builds a complete timetable for the request.
    ///
    /// # Errors
    /// - [`SchedulingError::InvalidInput`], [`SchedulingError::InvalidHours`]
    ///   or [`SchedulingError::EmptyRoster`] from normalization.
    /// - [`SchedulingError::UnplaceableChunk`] when placement dead-ends.
    /// - [`SchedulingError::IntegrityViolation`] if the assembled timetable
    ///   fails re-verification.
    pub fn schedule(&self, request: &SchedulingRequest) -> Result<Timetable> {
        let normalized = normalize(request)?;
        let chunks = decompose(&normalized);

        info!(
            classes = normalized.classes.len(),
            assignments = normalized.assignment_count(),
            chunks = chunks.len(),
            hours = normalized.total_hours(),
            "building timetable"
        );

        let placements = place_chunks(&normalized, chunks, &self.config)?;
        let timetable = assemble(&normalized, &placements);

        if let Err(violations) = verify_entries(&normalized, &timetable.entries) {
            for violation in &violations {
                error!(
                    kind = ?violation.violation_type,
                    entity = %violation.entity_id,
                    "{}",
                    violation.message
                );
            }
            return Err(SchedulingError::IntegrityViolation(violations));
        }

        info!(
            entries = timetable.entry_count(),
            placements = placements.len(),
            "timetable complete"
        );
        Ok(timetable)
    }
}

/// Builds a schedule with the default configuration.
///
/// Returns one entry per occupied (class, day, period) cell, ordered by
/// class (input order), day, period.
pub fn build_schedule(request: &SchedulingRequest) -> Result<Vec<ScheduleEntry>> {
    TimetableScheduler::new()
        .schedule(request)
        .map(Timetable::into_entries)
}
