//! Timetable (solution) model.
//!
//! A timetable is the flat list of occupied `(class, day, period)` cells.
//! Verification problems found in a timetable are reported as
//! [`Violation`]s.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use super::{Day, Shift};

/// One occupied cell of a class timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Class display name.
    pub class_name: String,
    /// School day.
    pub day: Day,
    /// Period number (1-based).
    pub period: u8,
    /// Lesson display name.
    pub lesson_name: String,
    /// Teacher display name (empty for unstaffed lessons).
    pub teacher_name: String,
    /// Shift of the class.
    pub shift: Shift,
    /// Class identifier.
    pub class_id: String,
    /// Lesson identifier.
    pub lesson_id: String,
    /// Teacher identifier, if staffed.
    #[serde(default)]
    pub teacher_id: Option<String>,
}

/// A complete class timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    /// Occupied cells, ordered by class, day, period.
    pub entries: Vec<ScheduleEntry>,
}

/// A verification failure found in a timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (teacher, class, or `class/lesson`).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A teacher appears twice at the same `(day, period)`.
    TeacherDoubleBooked,
    /// A class has two lessons at the same `(day, period)`.
    ClassSlotConflict,
    /// A lesson's entry count differs from its weekly hours.
    QuotaMismatch,
    /// A lesson lacks the same-day consecutive pairs its blocks require.
    BlockNotContiguous,
    /// An entry lies outside its class's shift range.
    OutOfShiftRange,
    /// An entry sits on one of the teacher's blocked slots.
    TeacherUnavailable,
    /// An entry references a class or lesson not in the request.
    UnknownLesson,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-assembled entries.
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    /// Number of occupied cells.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the timetable, returning its entries.
    pub fn into_entries(self) -> Vec<ScheduleEntry> {
        self.entries
    }

    /// All entries of a class.
    pub fn entries_for_class(&self, class_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.class_id == class_id)
            .collect()
    }

    /// All entries taught by a teacher.
    pub fn entries_for_teacher(&self, teacher_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.teacher_id.as_deref() == Some(teacher_id))
            .collect()
    }

    /// All entries of one lesson in one class.
    pub fn entries_for_lesson(&self, class_id: &str, lesson_id: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.class_id == class_id && e.lesson_id == lesson_id)
            .collect()
    }

    /// The entry occupying a class cell, if any.
    pub fn cell(&self, class_id: &str, day: Day, period: u8) -> Option<&ScheduleEntry> {
        self.entries
            .iter()
            .find(|e| e.class_id == class_id && e.day == day && e.period == period)
    }

    /// Renders a class's week as a plain-text grid (periods as rows).
    ///
    /// Empty cells show as `-`. Lesson IDs are used as cell labels.
    pub fn format_class_grid(&self, class_id: &str, periods: u8) -> String {
        let width = self
            .entries_for_class(class_id)
            .iter()
            .map(|e| e.lesson_id.chars().count())
            .max()
            .unwrap_or(1)
            .max(3);

        let mut output = String::from("   ");
        for day in Day::ALL {
            let _ = write!(output, " {:<width$}", day.code(), width = width);
        }
        output.push('\n');

        for period in 1..=periods {
            let _ = write!(output, "{period:>2} ");
            for day in Day::ALL {
                let label = self
                    .cell(class_id, day, period)
                    .map(|e| e.lesson_id.as_str())
                    .unwrap_or("-");
                let _ = write!(output, " {label:<width$}", width = width);
            }
            output.push('\n');
        }

        output
    }
}
