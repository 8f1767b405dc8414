//! Scheduling request: the full roster handed to the scheduler in one call.

use serde::{Deserialize, Serialize};

use super::{ClassSection, PeriodsPerShift, Teacher};

/// Input container for a timetable run.
///
/// Consumed as a read-only snapshot; nothing in it is mutated by the
/// scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingRequest {
    /// Classes with their lesson requirements.
    #[serde(default)]
    pub classes: Vec<ClassSection>,
    /// Teachers with their availability.
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    /// Periods per day for each shift.
    #[serde(default)]
    pub periods_per_shift: PeriodsPerShift,
}

impl SchedulingRequest {
    /// Creates a request.
    pub fn new(classes: Vec<ClassSection>, teachers: Vec<Teacher>) -> Self {
        Self {
            classes,
            teachers,
            periods_per_shift: PeriodsPerShift::default(),
        }
    }

    /// Sets the periods per shift.
    pub fn with_periods(mut self, periods_per_shift: PeriodsPerShift) -> Self {
        self.periods_per_shift = periods_per_shift;
        self
    }

    /// Adds a class.
    pub fn with_class(mut self, class: ClassSection) -> Self {
        self.classes.push(class);
        self
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Finds a teacher by ID.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Finds a class by ID.
    pub fn class(&self, id: &str) -> Option<&ClassSection> {
        self.classes.iter().find(|c| c.id == id)
    }
}
