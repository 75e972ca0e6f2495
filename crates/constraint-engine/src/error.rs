//! Error types for constraint-engine operations.

use thiserror::Error;

use crate::model::Weekday;

/// Errors raised while parsing or validating constraints.
///
/// Conflict detection itself never fails; these come from the parse boundary
/// (`"HH:MM"` strings, JSON payloads) and from [`ConstraintDraft::validate`].
///
/// [`ConstraintDraft::validate`]: crate::model::ConstraintDraft::validate
#[derive(Error, Debug)]
pub enum ConstraintError {
    /// A time-of-day string was not a valid 24-hour `HH:MM` value.
    #[error("Invalid time '{0}': expected 24-hour HH:MM")]
    InvalidTime(String),

    /// The window does not end after it starts (overnight windows are unsupported).
    #[error("Invalid time range: start {start} must be before end {end}")]
    InvalidRange { start: String, end: String },

    /// The display name is empty or only whitespace.
    #[error("Constraint name must not be empty")]
    EmptyName,

    /// The day set is empty.
    #[error("Constraint must apply to at least one day")]
    NoDays,

    /// A weekday was listed more than once.
    #[error("Day '{0}' is listed more than once")]
    DuplicateDay(Weekday),

    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A JSON payload could not be parsed into constraints.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout constraint-engine.
pub type Result<T> = std::result::Result<T, ConstraintError>;
