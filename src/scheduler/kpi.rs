//! Timetable quality metrics (KPIs).
//!
//! Computes load and compactness indicators from a completed timetable and
//! the normalized request it was built from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Teacher Hours | Occupied periods per teacher across the week |
//! | Class Fill Rate | Occupied cells / (periods per day x 5) |
//! | Avg Fill Rate | Mean class fill rate |
//! | Idle Gaps | Free periods between a class's first and last lesson of a day, summed over the week |

use std::collections::BTreeMap;

use super::NormalizedRequest;
use crate::models::{Timetable, DAYS_PER_WEEK, MAX_PERIODS_PER_DAY};

/// Timetable performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableKpi {
    /// Total occupied cells.
    pub total_hours: u32,
    /// Weekly teaching hours per teacher ID. Every known teacher is listed.
    pub teacher_hours: BTreeMap<String, u32>,
    /// Fill rate per class ID (0.0..1.0).
    pub class_fill_rate: BTreeMap<String, f64>,
    /// Mean of `class_fill_rate` (0.0 when there are no classes).
    pub avg_fill_rate: f64,
    /// Idle gaps per class ID.
    pub idle_gaps: BTreeMap<String, u32>,
}

impl TimetableKpi {
    /// Computes KPIs from a timetable and its normalized request.
    ///
    /// Entries of classes the request does not know are counted in
    /// `total_hours` only.
    pub fn calculate(timetable: &Timetable, request: &NormalizedRequest) -> Self {
        let mut teacher_hours: BTreeMap<String, u32> = request
            .teachers
            .iter()
            .map(|t| (t.id.clone(), 0))
            .collect();
        let mut day_masks = vec![[0u32; DAYS_PER_WEEK]; request.classes.len()];
        let mut total_hours = 0u32;

        for entry in &timetable.entries {
            total_hours += 1;
            if let Some(teacher_id) = &entry.teacher_id {
                *teacher_hours.entry(teacher_id.clone()).or_insert(0) += 1;
            }
            if !(1..=MAX_PERIODS_PER_DAY).contains(&entry.period) {
                continue;
            }
            if let Some(class_index) = request.class_index(&entry.class_id) {
                day_masks[class_index][entry.day.index()] |= 1 << (entry.period - 1);
            }
        }

        let mut class_fill_rate = BTreeMap::new();
        let mut idle_gaps = BTreeMap::new();
        for (class, masks) in request.classes.iter().zip(&day_masks) {
            let occupied: u32 = masks.iter().map(|m| m.count_ones()).sum();
            let capacity = u32::from(class.periods) * DAYS_PER_WEEK as u32;
            let rate = if capacity == 0 {
                0.0
            } else {
                f64::from(occupied) / f64::from(capacity)
            };
            class_fill_rate.insert(class.id.clone(), rate);
            idle_gaps.insert(class.id.clone(), masks.iter().map(|&m| gaps_in_day(m)).sum());
        }

        let avg_fill_rate = if class_fill_rate.is_empty() {
            0.0
        } else {
            class_fill_rate.values().sum::<f64>() / class_fill_rate.len() as f64
        };

        Self {
            total_hours,
            teacher_hours,
            class_fill_rate,
            avg_fill_rate,
            idle_gaps,
        }
    }

    /// Total idle gaps across all classes.
    pub fn total_idle_gaps(&self) -> u32 {
        self.idle_gaps.values().sum()
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_idle_gaps: u32, min_fill_rate: f64) -> bool {
        self.total_idle_gaps() <= max_idle_gaps && self.avg_fill_rate >= min_fill_rate
    }
}

/// Unset bits between the lowest and highest set bit.
fn gaps_in_day(mask: u32) -> u32 {
    if mask == 0 {
        return 0;
    }
    let span = 32 - mask.leading_zeros() - mask.trailing_zeros();
    span - mask.count_ones()
}
