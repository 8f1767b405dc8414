//! Scheduling error taxonomy.
//!
//! Every failure of a run is one of these variants, returned and never
//! thrown. Each variant names the entities a human needs to fix the input.

use thiserror::Error;

use crate::models::Violation;
use crate::validation::ValidationError;

/// Result alias for scheduling operations.
pub type Result<T> = std::result::Result<T, SchedulingError>;

/// Why a timetable run produced no timetable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    /// The roster failed structural validation.
    #[error("invalid roster: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// No class has any lesson with positive weekly hours.
    #[error("nothing to schedule: no class has a lesson with weekly hours > 0")]
    EmptyRoster,

    /// A single lesson needs more hours than its class's shift has in a week.
    #[error(
        "lesson '{lesson_id}' of class '{class_id}' needs {weekly_hours} weekly hours \
         but the shift only has {capacity} slots per week"
    )]
    InvalidHours {
        /// Class of the offending lesson.
        class_id: String,
        /// Offending lesson.
        lesson_id: String,
        /// Requested weekly hours.
        weekly_hours: u32,
        /// Periods per day x 5 for the class's shift.
        capacity: u32,
    },

    /// A chunk found no feasible slot, even after the retry pass.
    #[error(
        "could not place a {length}-period block of lesson '{lesson_id}' in class '{class_id}' \
         (teacher: {})",
        .teacher_id.as_deref().unwrap_or("unassigned")
    )]
    UnplaceableChunk {
        /// Class of the chunk.
        class_id: String,
        /// Lesson of the chunk.
        lesson_id: String,
        /// Teacher of the chunk, if staffed.
        teacher_id: Option<String>,
        /// Requested block length (1 or 2).
        length: u8,
    },

    /// The assembled timetable failed re-verification. Always a bug.
    #[error("internal error: timetable failed verification: {}", join_violations(.0))]
    IntegrityViolation(Vec<Violation>),
}

impl SchedulingError {
    /// Whether re-running with relaxed input may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SchedulingError::UnplaceableChunk { .. })
    }

    /// Whether this error signals a defect in the scheduler itself.
    pub fn is_internal(&self) -> bool {
        matches!(self, SchedulingError::IntegrityViolation(_))
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ViolationType;

    #[test]
    fn test_unplaceable_message_names_entities() {
        let err = SchedulingError::UnplaceableChunk {
            class_id: "9A".into(),
            lesson_id: "MAT".into(),
            teacher_id: Some("T1".into()),
            length: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("9A"));
        assert!(msg.contains("MAT"));
        assert!(msg.contains("T1"));
        assert!(msg.contains("2-period"));
        assert!(err.is_retryable());
        assert!(!err.is_internal());
    }

    #[test]
    fn test_unassigned_teacher_message() {
        let err = SchedulingError::UnplaceableChunk {
            class_id: "9A".into(),
            lesson_id: "BED".into(),
            teacher_id: None,
            length: 1,
        };
        assert!(err.to_string().contains("unassigned"));
    }

    #[test]
    fn test_integrity_violation_is_internal() {
        let err = SchedulingError::IntegrityViolation(vec![Violation::new(
            ViolationType::TeacherDoubleBooked,
            "T1",
            "teacher 'T1' double-booked at PZT/1",
        )]);
        assert!(err.is_internal());
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("double-booked"));
    }

    #[test]
    fn test_invalid_hours_message() {
        let err = SchedulingError::InvalidHours {
            class_id: "9A".into(),
            lesson_id: "MAT".into(),
            weekly_hours: 41,
            capacity: 40,
        };
        let msg = err.to_string();
        assert!(msg.contains("41") && msg.contains("40"));
    }
}
