//! Chunk ordering heuristic.
//!
//! Most-constrained-first, fully deterministic:
//! 1. Two-period chunks before single periods.
//! 2. Chunks of busier teachers first (more occupied slots on the grid the
//!    pass starts from). Unstaffed chunks count as zero.
//! 3. Class ID, then lesson ID, lexically.
//! 4. Sequence index within the lesson.

use std::cmp::Reverse;

use super::{Chunk, NormalizedRequest, OccupancyGrid};

/// Sorts chunks into placement order.
pub fn order_chunks(chunks: &mut [Chunk], request: &NormalizedRequest, teacher_grid: &OccupancyGrid) {
    chunks.sort_by_cached_key(|chunk| {
        let teacher_load = chunk
            .teacher_index
            .map(|t| teacher_grid.occupied_count(t))
            .unwrap_or(0);
        (
            Reverse(chunk.length),
            Reverse(teacher_load),
            chunk.class_id(request),
            chunk.lesson_id(request),
            chunk.sequence,
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClassSection, Day, SchedulingRequest, Shift, Slot, Teacher, TeachingAssignment,
    };
    use crate::scheduler::{decompose, normalize};

    fn labels(chunks: &[Chunk], request: &NormalizedRequest) -> Vec<String> {
        chunks
            .iter()
            .map(|c| format!("{}/{}/{}", c.class_id(request), c.lesson_id(request), c.length))
            .collect()
    }

    fn seeded_grid(request: &NormalizedRequest) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(request.teachers.len());
        for (i, t) in request.teachers.iter().enumerate() {
            for slot in &t.blocked {
                grid.block(i, *slot);
            }
        }
        grid
    }

    #[test]
    fn test_long_chunks_first() {
        let request = normalize(&SchedulingRequest::new(
            vec![ClassSection::new("9A", Shift::Morning)
                .with_assignment(TeachingAssignment::new("A", 1))
                .with_assignment(TeachingAssignment::new("B", 3))],
            vec![],
        ))
        .unwrap();
        let mut chunks = decompose(&request);
        order_chunks(&mut chunks, &request, &seeded_grid(&request));
        assert_eq!(labels(&chunks, &request), vec!["9A/B/2", "9A/A/1", "9A/B/1"]);
    }

    #[test]
    fn test_busier_teacher_first() {
        let request = normalize(&SchedulingRequest::new(
            vec![
                ClassSection::new("9A", Shift::Morning)
                    .with_assignment(TeachingAssignment::new("MAT", 2).with_teacher("T1", "")),
                ClassSection::new("9B", Shift::Morning)
                    .with_assignment(TeachingAssignment::new("FIZ", 2).with_teacher("T2", "")),
            ],
            vec![
                Teacher::new("T1"),
                Teacher::new("T2")
                    .with_blocked(Slot::new(Day::Pzt, 1))
                    .with_blocked(Slot::new(Day::Sal, 1)),
            ],
        ))
        .unwrap();
        let mut chunks = decompose(&request);
        order_chunks(&mut chunks, &request, &seeded_grid(&request));
        // T2 has two blocked slots, so 9B goes first despite lexical order
        assert_eq!(labels(&chunks, &request), vec!["9B/FIZ/2", "9A/MAT/2"]);
    }

    #[test]
    fn test_lexical_tie_break() {
        let request = normalize(&SchedulingRequest::new(
            vec![
                ClassSection::new("9B", Shift::Morning)
                    .with_assignment(TeachingAssignment::new("KIM", 2)),
                ClassSection::new("9A", Shift::Morning)
                    .with_assignment(TeachingAssignment::new("TAR", 2))
                    .with_assignment(TeachingAssignment::new("COG", 2)),
            ],
            vec![],
        ))
        .unwrap();
        let mut chunks = decompose(&request);
        order_chunks(&mut chunks, &request, &seeded_grid(&request));
        assert_eq!(
            labels(&chunks, &request),
            vec!["9A/COG/2", "9A/TAR/2", "9B/KIM/2"]
        );
    }

    #[test]
    fn test_ordering_is_input_order_independent() {
        let request = normalize(&SchedulingRequest::new(
            vec![ClassSection::new("9A", Shift::Morning)
                .with_assignment(TeachingAssignment::new("MAT", 5))
                .with_assignment(TeachingAssignment::new("BED", 3))],
            vec![],
        ))
        .unwrap();
        let grid = seeded_grid(&request);

        let mut forward = decompose(&request);
        let mut backward = forward.clone();
        backward.reverse();
        order_chunks(&mut forward, &request, &grid);
        order_chunks(&mut backward, &request, &grid);
        assert_eq!(forward, backward);
    }
}
