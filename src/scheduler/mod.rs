//! Timetable construction pipeline and KPI evaluation.
//!
//! Data flows one way through four stages:
//!
//! ```text
//! SchedulingRequest
//!   -> normalize      (validation, zero-hour filtering, capacity checks)
//!   -> decompose      (weekly hours -> 1/2-period chunks)
//!   -> place_chunks   (ordered greedy first fit + one retry pass)
//!   -> assemble       (placements -> entries)
//!   -> verify_entries (independent re-check of every hard constraint)
//!   -> Timetable
//! ```
//!
//! # Algorithm
//!
//! `TimetableScheduler` is greedy and deterministic: identical input gives
//! byte-identical output. It is not complete; a roster a backtracking search
//! could solve may still fail with `UnplaceableChunk`.
//!
//! # KPI
//!
//! `TimetableKpi` computes teacher load, class fill rate and idle gaps.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"

mod assembler;
mod decomposer;
mod kpi;
mod normalizer;
mod occupancy;
mod ordering;
mod placement;
mod timetable_scheduler;

pub use assembler::{assemble, verify_entries};
pub use decomposer::{block_lengths, decompose, Chunk, MAX_BLOCK_LEN};
pub use kpi::TimetableKpi;
pub use normalizer::{normalize, NormalizedClass, NormalizedRequest, TeacherAvailability};
pub use occupancy::{run_mask, OccupancyGrid};
pub use ordering::order_chunks;
pub use placement::{place_chunks, Placement};
pub use timetable_scheduler::{build_schedule, SchedulerConfig, TimetableScheduler};
