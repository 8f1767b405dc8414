//! Result assembly and independent verification.
//!
//! [`assemble`] flattens placements into one [`ScheduleEntry`] per occupied
//! cell. [`verify_entries`] then re-checks every hard constraint from the
//! entries alone, without looking at solver bookkeeping:
//! - no teacher twice at the same `(day, period)`
//! - no class twice at the same `(day, period)`
//! - every lesson's entry count equals its weekly hours
//! - every entry inside its class's shift and period range
//! - no entry on a teacher's blocked slot
//! - every entry references a known class, lesson, and matching teacher
//! - enough same-day consecutive pairs per lesson for its 2-period blocks

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{block_lengths, NormalizedRequest, Placement};
use crate::models::{Day, ScheduleEntry, Slot, Timetable, Violation, ViolationType};

/// Flattens placements into a timetable ordered by class, day, period.
pub fn assemble(request: &NormalizedRequest, placements: &[Placement]) -> Timetable {
    let mut cells: Vec<(usize, Day, u8, ScheduleEntry)> = Vec::new();

    for placement in placements {
        let class = &request.classes[placement.chunk.class_index];
        let assignment = &class.assignments[placement.chunk.assignment_index];

        for period in placement.periods() {
            cells.push((
                placement.chunk.class_index,
                placement.day,
                period,
                ScheduleEntry {
                    class_name: class.display_name.clone(),
                    day: placement.day,
                    period,
                    lesson_name: assignment.lesson_name.clone(),
                    teacher_name: assignment.teacher_name.clone(),
                    shift: class.shift,
                    class_id: class.id.clone(),
                    lesson_id: assignment.lesson_id.clone(),
                    teacher_id: assignment.teacher_id.clone(),
                },
            ));
        }
    }

    cells.sort_by_key(|(class_index, day, period, _)| (*class_index, *day, *period));
    Timetable::from_entries(cells.into_iter().map(|(_, _, _, entry)| entry).collect())
}

/// Re-verifies a timetable against the request it was built for.
///
/// Also usable on hand-edited timetables before they are stored.
///
/// # Returns
/// `Ok(())` if every constraint holds, `Err(violations)` with all problems.
pub fn verify_entries(
    request: &NormalizedRequest,
    entries: &[ScheduleEntry],
) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();
    let mut class_cells: HashSet<(&str, Day, u8)> = HashSet::new();
    let mut teacher_cells: HashSet<(&str, Day, u8)> = HashSet::new();
    let mut lesson_cells: HashMap<(usize, usize), Vec<(Day, u8)>> = HashMap::new();

    for entry in entries {
        let located = request.class_index(&entry.class_id).and_then(|ci| {
            request.classes[ci]
                .assignments
                .iter()
                .position(|a| a.lesson_id == entry.lesson_id)
                .map(|ai| (ci, ai))
        });
        let Some((class_index, assignment_index)) = located else {
            violations.push(Violation::new(
                ViolationType::UnknownLesson,
                format!("{}/{}", entry.class_id, entry.lesson_id),
                format!(
                    "entry at {} {} references unknown lesson '{}' of class '{}'",
                    entry.day, entry.period, entry.lesson_id, entry.class_id
                ),
            ));
            continue;
        };
        let class = &request.classes[class_index];
        let assignment = &class.assignments[assignment_index];

        if entry.teacher_id != assignment.teacher_id {
            violations.push(Violation::new(
                ViolationType::UnknownLesson,
                format!("{}/{}", entry.class_id, entry.lesson_id),
                format!(
                    "entry at {} {} names teacher {:?}, lesson '{}' of class '{}' is taught by {:?}",
                    entry.day,
                    entry.period,
                    entry.teacher_id,
                    entry.lesson_id,
                    entry.class_id,
                    assignment.teacher_id
                ),
            ));
        }

        if entry.shift != class.shift || entry.period == 0 || entry.period > class.periods {
            violations.push(Violation::new(
                ViolationType::OutOfShiftRange,
                &entry.class_id,
                format!(
                    "class '{}' has lesson '{}' at {} {} ({}) outside its {} range 1..={}",
                    entry.class_id,
                    entry.lesson_id,
                    entry.day,
                    entry.period,
                    entry.shift,
                    class.shift,
                    class.periods
                ),
            ));
        }

        if !class_cells.insert((entry.class_id.as_str(), entry.day, entry.period)) {
            violations.push(Violation::new(
                ViolationType::ClassSlotConflict,
                &entry.class_id,
                format!(
                    "class '{}' has two lessons at {} {}",
                    entry.class_id, entry.day, entry.period
                ),
            ));
        }

        if let Some(teacher_id) = entry.teacher_id.as_deref() {
            if !teacher_cells.insert((teacher_id, entry.day, entry.period)) {
                violations.push(Violation::new(
                    ViolationType::TeacherDoubleBooked,
                    teacher_id,
                    format!(
                        "teacher '{}' double-booked at {} {}",
                        teacher_id, entry.day, entry.period
                    ),
                ));
            }

            let blocked = request
                .teacher(teacher_id)
                .is_some_and(|t| t.blocked.contains(&Slot::new(entry.day, entry.period)));
            if blocked {
                violations.push(Violation::new(
                    ViolationType::TeacherUnavailable,
                    teacher_id,
                    format!(
                        "teacher '{}' is blocked at {} {} but teaches '{}' in class '{}'",
                        teacher_id, entry.day, entry.period, entry.lesson_id, entry.class_id
                    ),
                ));
            }
        }

        lesson_cells
            .entry((class_index, assignment_index))
            .or_default()
            .push((entry.day, entry.period));
    }

    for (class_index, class) in request.classes.iter().enumerate() {
        for (assignment_index, assignment) in class.assignments.iter().enumerate() {
            let cells = lesson_cells
                .get(&(class_index, assignment_index))
                .map(Vec::as_slice)
                .unwrap_or_default();
            let entity = format!("{}/{}", class.id, assignment.lesson_id);

            if cells.len() as u32 != assignment.weekly_hours {
                violations.push(Violation::new(
                    ViolationType::QuotaMismatch,
                    &entity,
                    format!(
                        "lesson '{}' of class '{}' has {} entries, expected {}",
                        assignment.lesson_id,
                        class.id,
                        cells.len(),
                        assignment.weekly_hours
                    ),
                ));
            }

            let required = block_lengths(assignment.weekly_hours)
                .into_iter()
                .filter(|&l| l == 2)
                .count();
            let available = consecutive_pairs(cells);
            if available < required {
                violations.push(Violation::new(
                    ViolationType::BlockNotContiguous,
                    &entity,
                    format!(
                        "lesson '{}' of class '{}' needs {} two-period blocks, found {}",
                        assignment.lesson_id, class.id, required, available
                    ),
                ));
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Maximum number of disjoint same-day consecutive period pairs.
///
/// Each maximal run of `r` consecutive periods on a day holds `r / 2` pairs.
fn consecutive_pairs(cells: &[(Day, u8)]) -> usize {
    let mut by_day: BTreeMap<Day, Vec<u8>> = BTreeMap::new();
    for &(day, period) in cells {
        by_day.entry(day).or_default().push(period);
    }

    let mut pairs = 0;
    for periods in by_day.values_mut() {
        periods.sort_unstable();
        periods.dedup();

        let mut run = 0usize;
        let mut previous: Option<u8> = None;
        for &period in periods.iter() {
            run = match previous {
                Some(p) if p + 1 == period => run + 1,
                _ => {
                    pairs += run / 2;
                    1
                }
            };
            previous = Some(period);
        }
        pairs += run / 2;
    }
    pairs
}
