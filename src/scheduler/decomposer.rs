//! Block decomposition.
//!
//! Splits each lesson's weekly hours into placement chunks. Two-period
//! blocks are preferred; an odd hour count leaves one single period.
//!
//! | hours | chunks |
//! |-------|--------|
//! | 1 | `[1]` |
//! | 2 | `[2]` |
//! | 3 | `[2, 1]` |
//! | 4 | `[2, 2]` |
//! | n >= 5 | `[2] x n/2`, then `[1]` if odd |

use super::NormalizedRequest;

/// Longest contiguous block the policy produces.
pub const MAX_BLOCK_LEN: u8 = 2;

/// One contiguous run of a lesson to be placed on a single day.
///
/// Indices point into the [`NormalizedRequest`] the chunk was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
    /// Position of the class in `NormalizedRequest::classes`.
    pub class_index: usize,
    /// Position of the lesson in the class's assignments.
    pub assignment_index: usize,
    /// Teacher arena index, `None` for unstaffed lessons.
    pub teacher_index: Option<usize>,
    /// Block length in periods (1 or 2).
    pub length: u8,
    /// Position of this chunk within its lesson's decomposition.
    pub sequence: usize,
}

impl Chunk {
    /// Class ID of the chunk.
    pub fn class_id<'a>(&self, request: &'a NormalizedRequest) -> &'a str {
        &request.classes[self.class_index].id
    }

    /// Lesson ID of the chunk.
    pub fn lesson_id<'a>(&self, request: &'a NormalizedRequest) -> &'a str {
        &request.classes[self.class_index].assignments[self.assignment_index].lesson_id
    }

    /// Teacher ID of the chunk, if staffed.
    pub fn teacher_id<'a>(&self, request: &'a NormalizedRequest) -> Option<&'a str> {
        self.teacher_index.map(|t| request.teachers[t].id.as_str())
    }
}

/// Block lengths for a weekly hour count.
///
/// The lengths always sum to `weekly_hours` and never exceed
/// [`MAX_BLOCK_LEN`].
pub fn block_lengths(weekly_hours: u32) -> Vec<u8> {
    let mut lengths = vec![MAX_BLOCK_LEN; (weekly_hours / 2) as usize];
    if weekly_hours % 2 == 1 {
        lengths.push(1);
    }
    lengths
}

/// Decomposes every lesson of the request into chunks.
///
/// Output order is class, lesson, sequence; the solver reorders.
pub fn decompose(request: &NormalizedRequest) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for (class_index, class) in request.classes.iter().enumerate() {
        for (assignment_index, assignment) in class.assignments.iter().enumerate() {
            let teacher_index = assignment
                .teacher_id
                .as_deref()
                .and_then(|id| request.teacher_index(id));

            for (sequence, length) in block_lengths(assignment.weekly_hours)
                .into_iter()
                .enumerate()
            {
                chunks.push(Chunk {
                    class_index,
                    assignment_index,
                    teacher_index,
                    length,
                    sequence,
                });
            }
        }
    }

    chunks
}
