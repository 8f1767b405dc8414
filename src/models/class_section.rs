//! Class section and teaching assignment models.
//!
//! A class section attends one shift and carries the list of lessons it must
//! be taught each week. Each lesson is a [`TeachingAssignment`] with a weekly
//! hour quota and an optional teacher.

use serde::{Deserialize, Serialize};

use super::Shift;

/// A weekly lesson requirement for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachingAssignment {
    /// Lesson identifier (unique within its class).
    pub lesson_id: String,
    /// Human-readable lesson name.
    #[serde(default)]
    pub lesson_name: String,
    /// Assigned teacher. `None` = not yet staffed.
    #[serde(default)]
    pub teacher_id: Option<String>,
    /// Teacher name as shown on the timetable.
    #[serde(default)]
    pub teacher_name: String,
    /// Hours per week this lesson must be taught.
    pub weekly_hours: u32,
}

impl TeachingAssignment {
    /// Creates an unstaffed assignment.
    pub fn new(lesson_id: impl Into<String>, weekly_hours: u32) -> Self {
        Self {
            lesson_id: lesson_id.into(),
            lesson_name: String::new(),
            teacher_id: None,
            teacher_name: String::new(),
            weekly_hours,
        }
    }

    /// Sets the lesson name.
    pub fn with_lesson_name(mut self, name: impl Into<String>) -> Self {
        self.lesson_name = name.into();
        self
    }

    /// Assigns a teacher.
    pub fn with_teacher(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.teacher_id = Some(id.into());
        self.teacher_name = name.into();
        self
    }
}

/// A class (e.g. "9-A") and its weekly lesson requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSection {
    /// Unique class identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: String,
    /// Shift the class attends; determines its period range.
    pub shift: Shift,
    /// Lessons to schedule.
    #[serde(default)]
    pub assignments: Vec<TeachingAssignment>,
}

impl ClassSection {
    /// Creates a class with no assignments.
    pub fn new(id: impl Into<String>, shift: Shift) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            shift,
            assignments: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Adds an assignment.
    pub fn with_assignment(mut self, assignment: TeachingAssignment) -> Self {
        self.assignments.push(assignment);
        self
    }

    /// Total weekly hours across all assignments.
    pub fn total_weekly_hours(&self) -> u32 {
        self.assignments.iter().map(|a| a.weekly_hours).sum()
    }

    /// Finds an assignment by lesson ID.
    pub fn assignment(&self, lesson_id: &str) -> Option<&TeachingAssignment> {
        self.assignments.iter().find(|a| a.lesson_id == lesson_id)
    }
}
