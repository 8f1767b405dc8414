//! Occupancy grids.
//!
//! One row per entity (class or teacher), one 32-bit mask per day in each
//! row. Bit `p - 1` is set when period `p` is taken. Collision checks for a
//! contiguous run are a single AND against a precomputed run mask.

use crate::models::{Day, Slot, DAYS_PER_WEEK};

/// Day x period occupancy for a set of entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: Vec<[u32; DAYS_PER_WEEK]>,
}

/// Bitmask covering `length` periods starting at `start` (1-based).
///
/// Period 0 and periods past 32 have no bit; a run touching them keeps
/// only its in-range periods.
#[inline(always)]
pub fn run_mask(start: u8, length: u8) -> u32 {
    if start == 0 {
        return 0;
    }
    let bits = 1u64
        .checked_shl(u32::from(length))
        .map_or(u64::MAX, |b| b - 1);
    let mask = bits.checked_shl(u32::from(start - 1)).unwrap_or(0);
    (mask & u64::from(u32::MAX)) as u32
}

impl OccupancyGrid {
    /// Creates an empty grid with `entities` rows.
    pub fn new(entities: usize) -> Self {
        Self {
            rows: vec![[0; DAYS_PER_WEEK]; entities],
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether every period of the run is free.
    #[inline]
    pub fn is_free(&self, row: usize, day: Day, start: u8, length: u8) -> bool {
        self.rows[row][day.index()] & run_mask(start, length) == 0
    }

    /// Marks every period of the run as taken.
    #[inline]
    pub fn occupy(&mut self, row: usize, day: Day, start: u8, length: u8) {
        self.rows[row][day.index()] |= run_mask(start, length);
    }

    /// Marks a single slot as taken.
    pub fn block(&mut self, row: usize, slot: Slot) {
        self.occupy(row, slot.day, slot.period, 1);
    }

    /// Whether a single slot is taken.
    pub fn is_occupied(&self, row: usize, slot: Slot) -> bool {
        !self.is_free(row, slot.day, slot.period, 1)
    }

    /// Number of taken slots in a row across the week.
    pub fn occupied_count(&self, row: usize) -> u32 {
        self.rows[row].iter().map(|mask| mask.count_ones()).sum()
    }
}
