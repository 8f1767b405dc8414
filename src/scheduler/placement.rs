//! Placement engine.
//!
//! # Algorithm
//!
//! 1. Seed a teacher grid with every blocked slot and order the chunks
//!    (see [`order_chunks`]).
//! 2. For each chunk, scan days PZT..CUM and start periods
//!    `1..=N - length + 1`; commit the first candidate whose class cells and
//!    teacher cells are all free. Infeasible chunks are deferred.
//! 3. If anything was deferred, run exactly one retry pass on fresh grids:
//!    deferred chunks first, then the rest in their original order. The
//!    first chunk that fails in the retry pass fails the run.
//!
//! Occupancy only grows within a pass, so a chunk that failed cannot
//! succeed later in the same pass; the retry pass changes the order instead.
//!
//! # Complexity
//! O(c * d * p) per pass where c=chunks, d=5 days, p=periods per day.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::{order_chunks, Chunk, NormalizedRequest, OccupancyGrid, SchedulerConfig};
use crate::error::{Result, SchedulingError};
use crate::models::Day;

/// A chunk committed to a day and starting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// The placed chunk.
    pub chunk: Chunk,
    /// Day of the block.
    pub day: Day,
    /// First period of the block (1-based).
    pub start_period: u8,
}

impl Placement {
    /// Periods covered by this placement, in order.
    pub fn periods(&self) -> impl Iterator<Item = u8> {
        self.start_period..self.start_period + self.chunk.length
    }
}

/// Working state of one placement pass.
struct Pass<'a> {
    request: &'a NormalizedRequest,
    class_grid: OccupancyGrid,
    teacher_grid: OccupancyGrid,
    /// Per class, per lesson: bitmask of days already used by that lesson.
    lesson_days: Vec<Vec<u8>>,
    spread_lesson_days: bool,
    placements: Vec<Placement>,
}

impl<'a> Pass<'a> {
    fn new(request: &'a NormalizedRequest, spread_lesson_days: bool) -> Self {
        let mut teacher_grid = OccupancyGrid::new(request.teachers.len());
        for (row, teacher) in request.teachers.iter().enumerate() {
            for slot in &teacher.blocked {
                teacher_grid.block(row, *slot);
            }
        }

        Self {
            request,
            class_grid: OccupancyGrid::new(request.classes.len()),
            teacher_grid,
            lesson_days: request
                .classes
                .iter()
                .map(|c| vec![0; c.assignments.len()])
                .collect(),
            spread_lesson_days,
            placements: Vec::new(),
        }
    }

    /// Places a chunk at its first feasible candidate. Returns `false` if
    /// no candidate is feasible.
    fn try_place(&mut self, chunk: &Chunk) -> bool {
        let Some((day, start_period)) = self.find_slot(chunk) else {
            return false;
        };

        // Commit to both grids
        self.class_grid
            .occupy(chunk.class_index, day, start_period, chunk.length);
        if let Some(teacher) = chunk.teacher_index {
            self.teacher_grid
                .occupy(teacher, day, start_period, chunk.length);
        }
        self.lesson_days[chunk.class_index][chunk.assignment_index] |= 1 << day.index();

        debug!(
            class = chunk.class_id(self.request),
            lesson = chunk.lesson_id(self.request),
            day = %day,
            start_period,
            length = chunk.length,
            "placed chunk"
        );

        self.placements.push(Placement {
            chunk: *chunk,
            day,
            start_period,
        });
        true
    }

    fn find_slot(&self, chunk: &Chunk) -> Option<(Day, u8)> {
        // Days this lesson has not used yet
        if self.spread_lesson_days {
            let used = self.lesson_days[chunk.class_index][chunk.assignment_index];
            let fresh = Day::ALL
                .into_iter()
                .filter(|d| used & (1 << d.index()) == 0);
            if let Some(found) = self.scan(chunk, fresh) {
                return Some(found);
            }
        }
        self.scan(chunk, Day::ALL.into_iter())
    }

    fn scan(&self, chunk: &Chunk, days: impl Iterator<Item = Day>) -> Option<(Day, u8)> {
        let periods = self.request.classes[chunk.class_index].periods;
        if chunk.length == 0 || chunk.length > periods {
            return None;
        }
        let last_start = periods - chunk.length + 1;

        for day in days {
            for start in 1..=last_start {
                if self.is_feasible(chunk, day, start) {
                    return Some((day, start));
                }
            }
        }
        None
    }

    /// Both grids must be free over the whole run. The run never wraps past
    /// the day's last period because `start <= N - length + 1`.
    #[inline]
    fn is_feasible(&self, chunk: &Chunk, day: Day, start: u8) -> bool {
        self.class_grid
            .is_free(chunk.class_index, day, start, chunk.length)
            && chunk.teacher_index.map_or(true, |t| {
                self.teacher_grid.is_free(t, day, start, chunk.length)
            })
    }
}

fn unplaceable(chunk: &Chunk, request: &NormalizedRequest) -> SchedulingError {
    SchedulingError::UnplaceableChunk {
        class_id: chunk.class_id(request).to_string(),
        lesson_id: chunk.lesson_id(request).to_string(),
        teacher_id: chunk.teacher_id(request).map(str::to_string),
        length: chunk.length,
    }
}

/// Places every chunk or fails with the first chunk that cannot be placed.
///
/// Never returns a partial placement set.
pub fn place_chunks(
    request: &NormalizedRequest,
    mut chunks: Vec<Chunk>,
    config: &SchedulerConfig,
) -> Result<Vec<Placement>> {
    // Order against the grid seeded with blocked slots
    let mut pass = Pass::new(request, config.spread_lesson_days);
    order_chunks(&mut chunks, request, &pass.teacher_grid);
    debug!(
        chunks = chunks.len(),
        first = ?chunks.first().map(|c| (c.class_id(request), c.lesson_id(request), c.length)),
        "chunks ordered"
    );

    // First pass
    let mut deferred = Vec::new();
    for chunk in &chunks {
        if !pass.try_place(chunk) {
            warn!(
                class = chunk.class_id(request),
                lesson = chunk.lesson_id(request),
                teacher = ?chunk.teacher_id(request),
                length = chunk.length,
                "no feasible slot, deferring chunk to retry pass"
            );
            deferred.push(*chunk);
        }
    }

    if deferred.is_empty() {
        return Ok(pass.placements);
    }
    if !config.retry_pass {
        return Err(unplaceable(&deferred[0], request));
    }

    info!(
        deferred = deferred.len(),
        total = chunks.len(),
        "starting retry pass with deferred chunks first"
    );

    // Retry pass on fresh grids: deferred chunks first
    let promoted: HashSet<Chunk> = deferred.iter().copied().collect();
    let mut retry = Pass::new(request, config.spread_lesson_days);
    let sequence = deferred
        .iter()
        .chain(chunks.iter().filter(|c| !promoted.contains(c)));

    for chunk in sequence {
        if !retry.try_place(chunk) {
            return Err(unplaceable(chunk, request));
        }
    }

    debug_assert_eq!(retry.placements.len(), chunks.len());
    Ok(retry.placements)
}
