//! Compute free windows on a weekday from a set of constraints.
//!
//! Collects the constraints that recur on the requested day, merges their
//! overlapping time ranges into busy blocks, then returns the gaps between
//! those blocks within a given day window.

use serde::Serialize;

use crate::model::{Constraint, Weekday};
use crate::time::{TimeOfDay, TimeRange};

/// A merged busy period on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyBlock {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    /// Number of constraints that contributed to this block.
    pub constraint_count: usize,
}

/// A free time window on one day.
///
/// JSON form: `{"start": "08:00", "end": "10:00", "durationMinutes": 120}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub duration_minutes: u16,
}

impl FreeWindow {
    fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start,
            end,
            duration_minutes: TimeRange::new(start, end).duration_minutes(),
        }
    }
}

/// Merge the ranges of constraints that recur on `day`, clipped to `window`.
///
/// Overlapping or touching ranges merge into one block. Inverted or empty
/// ranges are ignored. Returns blocks sorted by start, non-overlapping.
pub fn busy_blocks(constraints: &[Constraint], day: Weekday, window: TimeRange) -> Vec<BusyBlock> {
    let mut ranges: Vec<TimeRange> = constraints
        .iter()
        .filter(|c| c.draft.applies_on(day))
        .map(Constraint::time_range)
        .filter(|r| !r.is_empty() && r.overlaps(&window))
        .map(|r| TimeRange::new(r.start.max(window.start), r.end.min(window.end)))
        .collect();

    if ranges.is_empty() {
        return Vec::new();
    }

    ranges.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<BusyBlock> = Vec::new();
    for range in ranges {
        if let Some(last) = merged.last_mut() {
            if range.start <= last.end {
                last.end = last.end.max(range.end);
                last.constraint_count += 1;
                continue;
            }
        }
        merged.push(BusyBlock {
            start: range.start,
            end: range.end,
            constraint_count: 1,
        });
    }

    tracing::trace!(%day, %window, blocks = merged.len(), "merged busy blocks");
    merged
}

/// Free windows on `day` within `window`, sorted by start.
///
/// A day with no applicable constraints yields the whole window.
pub fn find_free_windows(
    constraints: &[Constraint],
    day: Weekday,
    window: TimeRange,
) -> Vec<FreeWindow> {
    if window.is_empty() {
        return Vec::new();
    }

    let mut free = Vec::new();
    let mut cursor = window.start;

    for block in busy_blocks(constraints, day, window) {
        if cursor < block.start {
            free.push(FreeWindow::new(cursor, block.start));
        }
        cursor = cursor.max(block.end);
    }

    if cursor < window.end {
        free.push(FreeWindow::new(cursor, window.end));
    }

    free
}

/// First free window on `day` lasting at least `min_duration_minutes`.
pub fn find_first_free_window(
    constraints: &[Constraint],
    day: Weekday,
    window: TimeRange,
    min_duration_minutes: u16,
) -> Option<FreeWindow> {
    find_free_windows(constraints, day, window)
        .into_iter()
        .find(|w| w.duration_minutes >= min_duration_minutes)
}
