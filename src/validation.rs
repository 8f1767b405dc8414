//! Structural validation of a scheduling request.
//!
//! Checks the integrity of the roster before any normalization. Detects:
//! - Duplicate class, teacher, and per-class lesson IDs
//! - Period counts beyond the supported maximum
//! - Teacher blocked slots with period 0 or beyond the supported maximum
//!
//! Blocked slots past every configured shift and assignments naming a
//! teacher missing from the list are not errors; see
//! [`normalize`](crate::scheduler::normalize).
//!
//! All problems are collected; nothing is reported one at a time.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{SchedulingRequest, MAX_PERIODS_PER_DAY};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A shift declares more periods per day than supported.
    TooManyPeriods,
    /// A blocked slot has period 0 or one past the supported maximum.
    InvalidSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the structure of a scheduling request.
///
/// Checks:
/// 1. Both shifts declare at most [`MAX_PERIODS_PER_DAY`] periods
/// 2. No duplicate teacher IDs
/// 3. Every blocked slot has a period in `1..=MAX_PERIODS_PER_DAY`
/// 4. No duplicate class IDs
/// 5. No duplicate lesson IDs within a class
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &SchedulingRequest) -> ValidationResult {
    let mut errors = Vec::new();
    let periods = request.periods_per_shift;

    // Shift period counts
    for (label, count) in [("MORNING", periods.morning), ("AFTERNOON", periods.afternoon)] {
        if count > MAX_PERIODS_PER_DAY {
            errors.push(ValidationError::new(
                ValidationErrorKind::TooManyPeriods,
                format!(
                    "Shift {label} declares {count} periods per day (max {MAX_PERIODS_PER_DAY})"
                ),
            ));
        }
    }

    // Teacher IDs and blocked slots
    let mut teacher_ids = HashSet::new();
    for teacher in &request.teachers {
        if !teacher_ids.insert(teacher.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", teacher.id),
            ));
        }

        for slot in &teacher.blocked_slots {
            if slot.period == 0 || slot.period > MAX_PERIODS_PER_DAY {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSlot,
                    format!(
                        "Teacher '{}' blocks slot {slot} outside period range 1..={MAX_PERIODS_PER_DAY}",
                        teacher.id
                    ),
                ));
            }
        }
    }

    // Class IDs and per-class lesson IDs
    let mut class_ids = HashSet::new();
    for class in &request.classes {
        if !class_ids.insert(class.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate class ID: {}", class.id),
            ));
        }

        let mut lesson_ids = HashSet::new();
        for assignment in &class.assignments {
            if !lesson_ids.insert(assignment.lesson_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!(
                        "Duplicate lesson ID '{}' in class '{}'",
                        assignment.lesson_id, class.id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClassSection, Day, PeriodsPerShift, Shift, Slot, Teacher, TeachingAssignment,
    };

    fn sample_request() -> SchedulingRequest {
        SchedulingRequest::new(
            vec![
                ClassSection::new("9A", Shift::Morning)
                    .with_assignment(TeachingAssignment::new("MAT", 4).with_teacher("T1", "Ayşe"))
                    .with_assignment(TeachingAssignment::new("BED", 2)),
                ClassSection::new("9B", Shift::Afternoon)
                    .with_assignment(TeachingAssignment::new("MAT", 4).with_teacher("T1", "Ayşe")),
            ],
            vec![Teacher::new("T1").with_blocked(Slot::new(Day::Cum, 6))],
        )
        .with_periods(PeriodsPerShift::new(6, 6))
    }

    #[test]
    fn test_valid_request() {
        assert!(validate_request(&sample_request()).is_ok());
    }

    #[test]
    fn test_duplicate_class_id() {
        let request = sample_request().with_class(ClassSection::new("9A", Shift::Morning));
        let errors = validate_request(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("class")));
    }

    #[test]
    fn test_duplicate_teacher_id() {
        let request = sample_request().with_teacher(Teacher::new("T1"));
        let errors = validate_request(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("teacher")));
    }

    #[test]
    fn test_duplicate_lesson_in_class() {
        let request = sample_request().with_class(
            ClassSection::new("10A", Shift::Morning)
                .with_assignment(TeachingAssignment::new("FIZ", 2))
                .with_assignment(TeachingAssignment::new("FIZ", 1)),
        );
        let errors = validate_request(&request).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("FIZ"));
    }

    #[test]
    fn test_same_lesson_id_in_different_classes_is_fine() {
        // 9A and 9B both teach MAT
        assert!(validate_request(&sample_request()).is_ok());
    }

    #[test]
    fn test_unlisted_teacher_is_not_an_error() {
        let request = sample_request().with_class(
            ClassSection::new("10A", Shift::Morning)
                .with_assignment(TeachingAssignment::new("KIM", 2).with_teacher("T404", "Deniz")),
        );
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_blocked_slot_past_shifts_is_not_an_error() {
        // periods are (6, 6); period 7 cannot affect placement
        let request =
            sample_request().with_teacher(Teacher::new("T2").with_blocked(Slot::new(Day::Pzt, 7)));
        assert!(validate_request(&request).is_ok());
    }

    #[test]
    fn test_blocked_slot_out_of_range() {
        let request = sample_request()
            .with_teacher(Teacher::new("T2").with_blocked(Slot::new(Day::Pzt, 0)))
            .with_teacher(Teacher::new("T3").with_blocked(Slot::new(Day::Pzt, 33)));
        let errors = validate_request(&request).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidSlot)
                .count(),
            2
        );
    }

    #[test]
    fn test_too_many_periods() {
        let request = sample_request().with_periods(PeriodsPerShift::new(33, 6));
        let errors = validate_request(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::TooManyPeriods));
    }

    #[test]
    fn test_multiple_errors() {
        let request = sample_request()
            .with_teacher(Teacher::new("T1"))
            .with_class(
                ClassSection::new("9A", Shift::Morning)
                    .with_assignment(TeachingAssignment::new("X", 1)),
            )
            .with_teacher(Teacher::new("T4").with_blocked(Slot::new(Day::Sal, 0)));
        let errors = validate_request(&request).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
