//! Input normalization.
//!
//! Turns a raw [`SchedulingRequest`] into the solver-ready
//! [`NormalizedRequest`]: classes resolved to their period range, zero-hour
//! lessons dropped, and teachers laid out in an index-addressed arena that
//! the occupancy grids share.
//!
//! Two roster quirks are tolerated with a warning instead of failing:
//! - blocked slots past every shift's last period are skipped;
//! - a teacher referenced by an assignment but missing from the teacher
//!   list gets an arena row with no blocked slots, taking its display name
//!   from the assignment.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::error::{Result, SchedulingError};
use crate::models::{PeriodsPerShift, SchedulingRequest, Shift, Slot, TeachingAssignment};
use crate::validation::validate_request;

/// A class ready for placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedClass {
    /// Class identifier.
    pub id: String,
    /// Class display name.
    pub display_name: String,
    /// Shift the class attends.
    pub shift: Shift,
    /// Periods per day; valid periods are `1..=periods`.
    pub periods: u8,
    /// Lessons with weekly hours > 0, in input order.
    pub assignments: Vec<TeachingAssignment>,
}

/// A teacher's entry in the availability index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherAvailability {
    /// Teacher identifier.
    pub id: String,
    /// Teacher display name.
    pub display_name: String,
    /// Slots the teacher is unavailable.
    pub blocked: BTreeSet<Slot>,
}

/// Canonical, validated form of a scheduling request.
#[derive(Debug, Clone)]
pub struct NormalizedRequest {
    /// Classes in input order.
    pub classes: Vec<NormalizedClass>,
    /// Teacher availability index: listed teachers in input order, then
    /// unlisted teachers in order of first reference.
    pub teachers: Vec<TeacherAvailability>,
    /// Periods per shift from the request.
    pub periods_per_shift: PeriodsPerShift,
    teacher_lookup: HashMap<String, usize>,
    class_lookup: HashMap<String, usize>,
}

impl NormalizedRequest {
    /// Arena index of a teacher.
    pub fn teacher_index(&self, teacher_id: &str) -> Option<usize> {
        self.teacher_lookup.get(teacher_id).copied()
    }

    /// Position of a class.
    pub fn class_index(&self, class_id: &str) -> Option<usize> {
        self.class_lookup.get(class_id).copied()
    }

    /// Finds a class by ID.
    pub fn class(&self, class_id: &str) -> Option<&NormalizedClass> {
        self.class_index(class_id).map(|i| &self.classes[i])
    }

    /// Finds a teacher by ID.
    pub fn teacher(&self, teacher_id: &str) -> Option<&TeacherAvailability> {
        self.teacher_index(teacher_id).map(|i| &self.teachers[i])
    }

    /// Total weekly hours to place across all classes.
    pub fn total_hours(&self) -> u32 {
        self.classes
            .iter()
            .flat_map(|c| &c.assignments)
            .map(|a| a.weekly_hours)
            .sum()
    }

    /// Number of lessons with positive weekly hours.
    pub fn assignment_count(&self) -> usize {
        self.classes.iter().map(|c| c.assignments.len()).sum()
    }
}

/// Validates and normalizes a request.
///
/// # Errors
/// - [`SchedulingError::InvalidInput`] if structural validation fails.
/// - [`SchedulingError::InvalidHours`] if a lesson needs more hours than its
///   class's shift holds in a week.
/// - [`SchedulingError::EmptyRoster`] if no lesson has weekly hours > 0.
pub fn normalize(request: &SchedulingRequest) -> Result<NormalizedRequest> {
    validate_request(request).map_err(SchedulingError::InvalidInput)?;

    let periods_per_shift = request.periods_per_shift;
    let last_period = periods_per_shift.max_periods();

    // Availability index from the teacher list
    let mut teachers: Vec<TeacherAvailability> = Vec::with_capacity(request.teachers.len());
    for teacher in &request.teachers {
        let mut blocked = BTreeSet::new();
        for slot in &teacher.blocked_slots {
            if slot.period > last_period {
                warn!(
                    teacher = %teacher.id,
                    slot = %slot,
                    last_period,
                    "skipping blocked slot past every shift"
                );
                continue;
            }
            blocked.insert(*slot);
        }
        teachers.push(TeacherAvailability {
            id: teacher.id.clone(),
            display_name: teacher.display_name.clone(),
            blocked,
        });
    }
    let mut teacher_lookup: HashMap<String, usize> = teachers
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.clone(), i))
        .collect();

    let mut classes = Vec::with_capacity(request.classes.len());
    for class in &request.classes {
        let capacity = periods_per_shift.weekly_capacity(class.shift);
        let mut assignments = Vec::with_capacity(class.assignments.len());

        for assignment in &class.assignments {
            if assignment.weekly_hours == 0 {
                debug!(
                    class = %class.id,
                    lesson = %assignment.lesson_id,
                    "dropping zero-hour lesson"
                );
                continue;
            }
            if assignment.weekly_hours > capacity {
                return Err(SchedulingError::InvalidHours {
                    class_id: class.id.clone(),
                    lesson_id: assignment.lesson_id.clone(),
                    weekly_hours: assignment.weekly_hours,
                    capacity,
                });
            }

            // Unlisted teachers still take part in conflict tracking
            if let Some(teacher_id) = assignment.teacher_id.as_deref() {
                if !teacher_lookup.contains_key(teacher_id) {
                    warn!(
                        class = %class.id,
                        lesson = %assignment.lesson_id,
                        teacher = %teacher_id,
                        "teacher missing from teacher list, assuming full availability"
                    );
                    teacher_lookup.insert(teacher_id.to_string(), teachers.len());
                    teachers.push(TeacherAvailability {
                        id: teacher_id.to_string(),
                        display_name: assignment.teacher_name.clone(),
                        blocked: BTreeSet::new(),
                    });
                }
            }

            if let Some(preferred) = assignment
                .teacher_id
                .as_deref()
                .and_then(|id| request.teacher(id))
                .and_then(|t| t.preferred_shift)
            {
                if preferred != class.shift {
                    warn!(
                        class = %class.id,
                        lesson = %assignment.lesson_id,
                        teacher = ?assignment.teacher_id,
                        %preferred,
                        actual = %class.shift,
                        "teacher assigned outside preferred shift"
                    );
                }
            }

            assignments.push(assignment.clone());
        }

        let demanded: u32 = assignments.iter().map(|a| a.weekly_hours).sum();
        if demanded > capacity {
            warn!(
                class = %class.id,
                demanded,
                capacity,
                "class demands more weekly hours than its shift holds"
            );
        }

        classes.push(NormalizedClass {
            id: class.id.clone(),
            display_name: class.display_name.clone(),
            shift: class.shift,
            periods: periods_per_shift.periods(class.shift),
            assignments,
        });
    }

    if classes.iter().all(|c| c.assignments.is_empty()) {
        return Err(SchedulingError::EmptyRoster);
    }

    let class_lookup = classes
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id.clone(), i))
        .collect();

    Ok(NormalizedRequest {
        classes,
        teachers,
        periods_per_shift,
        teacher_lookup,
        class_lookup,
    })
}
