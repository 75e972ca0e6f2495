//! Detect a candidate constraint colliding with already-stored constraints.
//!
//! Two constraints collide when they share at least one weekday AND their
//! time-of-day ranges overlap. Ranges are half-open: a window ending at 12:00
//! does not collide with one starting at 12:00.
//!
//! The verdict is advisory. Overlapping constraints may still be saved; the
//! caller uses the verdict to warn the user, naming the constraint and days.

use serde::{Serialize, Serializer};

use crate::model::{Constraint, ConstraintDraft, ConstraintId, Weekday};

/// Outcome of checking one candidate against a list of existing constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictVerdict {
    NoConflict,
    Conflict {
        /// The first colliding constraint in input order.
        conflicting_constraint: Constraint,
        /// Shared days, in the candidate's day order.
        overlapping_days: Vec<Weekday>,
    },
}

impl ConflictVerdict {
    pub fn has_conflict(&self) -> bool {
        matches!(self, ConflictVerdict::Conflict { .. })
    }

    pub fn conflicting_constraint(&self) -> Option<&Constraint> {
        match self {
            ConflictVerdict::Conflict {
                conflicting_constraint,
                ..
            } => Some(conflicting_constraint),
            ConflictVerdict::NoConflict => None,
        }
    }

    pub fn overlapping_days(&self) -> Option<&[Weekday]> {
        match self {
            ConflictVerdict::Conflict {
                overlapping_days, ..
            } => Some(overlapping_days),
            ConflictVerdict::NoConflict => None,
        }
    }
}

/// JSON form consumed by the web client:
/// `{"hasConflict": true, "conflictingConstraint": {...}, "overlappingDays": [...]}`.
/// The last two keys are omitted when there is no conflict.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerdictRepr<'a> {
    has_conflict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    conflicting_constraint: Option<&'a Constraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    overlapping_days: Option<&'a [Weekday]>,
}

impl Serialize for ConflictVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        VerdictRepr {
            has_conflict: self.has_conflict(),
            conflicting_constraint: self.conflicting_constraint(),
            overlapping_days: self.overlapping_days(),
        }
        .serialize(serializer)
    }
}

/// One colliding constraint, as reported by [`find_all_conflicts`].
///
/// JSON form matches the verdict's casing:
/// `{"conflictingConstraint": {...}, "overlappingDays": [...], "overlapMinutes": 60}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    #[serde(rename = "conflictingConstraint")]
    pub constraint: Constraint,
    pub overlapping_days: Vec<Weekday>,
    /// Shared minutes on each overlapping day.
    pub overlap_minutes: u16,
}

impl Conflict {
    /// Shared minutes summed over the whole week.
    pub fn weekly_overlap_minutes(&self) -> u32 {
        u32::from(self.overlap_minutes) * self.overlapping_days.len() as u32
    }
}

/// Days present in both lists, in the order they appear in `candidate_days`.
pub fn overlapping_days(candidate_days: &[Weekday], other_days: &[Weekday]) -> Vec<Weekday> {
    candidate_days
        .iter()
        .filter(|day| other_days.contains(day))
        .copied()
        .collect()
}

/// Shared days between `candidate` and `entry` when they collide, else `None`.
fn collision(candidate: &ConstraintDraft, entry: &Constraint) -> Option<Vec<Weekday>> {
    let days = overlapping_days(&candidate.days, entry.days());
    if days.is_empty() {
        tracing::trace!(id = %entry.id, "no shared days");
        return None;
    }
    if !candidate.time_range().overlaps(&entry.time_range()) {
        tracing::trace!(
            id = %entry.id,
            candidate = %candidate.time_range(),
            existing = %entry.time_range(),
            "shared days but no time overlap"
        );
        return None;
    }
    Some(days)
}

fn is_excluded(entry: &Constraint, exclude_id: Option<&ConstraintId>) -> bool {
    exclude_id.is_some_and(|id| *id == entry.id)
}

/// Check `candidate` against `existing` and report the first collision.
///
/// `existing` is scanned in order and the scan stops at the first entry that
/// shares a day and overlaps in time; later collisions are not reported.
/// Pass the edited constraint's own id as `exclude_id` so an edit is not
/// compared against its previous version.
///
/// Never fails. An empty day list on either side simply shares no days.
pub fn detect_conflict(
    candidate: &ConstraintDraft,
    existing: &[Constraint],
    exclude_id: Option<&ConstraintId>,
) -> ConflictVerdict {
    for entry in existing {
        if is_excluded(entry, exclude_id) {
            tracing::trace!(id = %entry.id, "skipping excluded constraint");
            continue;
        }
        if let Some(days) = collision(candidate, entry) {
            tracing::debug!(
                candidate = %candidate.name,
                conflicting = %entry.id,
                days = ?days,
                "constraint conflict detected"
            );
            return ConflictVerdict::Conflict {
                conflicting_constraint: entry.clone(),
                overlapping_days: days,
            };
        }
    }

    tracing::debug!(
        candidate = %candidate.name,
        checked = existing.len(),
        "no constraint conflict"
    );
    ConflictVerdict::NoConflict
}

/// Every constraint in `existing` that collides with `candidate`, in input order.
///
/// Same matching rules as [`detect_conflict`] without stopping at the first hit.
pub fn find_all_conflicts(
    candidate: &ConstraintDraft,
    existing: &[Constraint],
    exclude_id: Option<&ConstraintId>,
) -> Vec<Conflict> {
    let candidate_range = candidate.time_range();

    let conflicts: Vec<Conflict> = existing
        .iter()
        .filter(|entry| !is_excluded(entry, exclude_id))
        .filter_map(|entry| {
            collision(candidate, entry).map(|days| Conflict {
                constraint: entry.clone(),
                overlapping_days: days,
                overlap_minutes: candidate_range.overlap_minutes(&entry.time_range()),
            })
        })
        .collect();

    tracing::debug!(
        candidate = %candidate.name,
        found = conflicts.len(),
        "collected constraint conflicts"
    );
    conflicts
}
