//! # constraint-engine
//!
//! Weekly unavailability windows ("constraints") and the conflict detector
//! that runs when a parent creates or edits one.
//!
//! A constraint recurs on a set of weekdays over a `[start, end)` time-of-day
//! range. Before a new or edited constraint is saved, it is checked against the
//! stored ones: a conflict means at least one shared day AND overlapping times.
//! The check is advisory and never fails.
//!
//! ```rust
//! use constraint_engine::{detect_conflict, Category, ConstraintDraft, TimeOfDay, Weekday};
//!
//! let t = |s| TimeOfDay::parse(s).unwrap();
//! let school = ConstraintDraft::new("School", Category::School, [Weekday::Monday], t("10:00"), t("11:00"))
//!     .into_constraint("c1");
//! let work = ConstraintDraft::new(
//!     "Work",
//!     Category::Work,
//!     [Weekday::Monday, Weekday::Wednesday],
//!     t("09:00"),
//!     t("12:00"),
//! );
//!
//! let verdict = detect_conflict(&work, &[school], None);
//! assert!(verdict.has_conflict());
//! assert_eq!(verdict.overlapping_days(), Some(&[Weekday::Monday][..]));
//! ```
//!
//! ## Modules
//!
//! - [`model`]: `Constraint`, `ConstraintDraft`, `Weekday`, `Category`
//! - [`time`]: `HH:MM` times of day and half-open ranges
//! - [`conflict`]: First-match and all-match conflict detection
//! - [`freebusy`]: Busy blocks and free windows for a weekday
//! - [`error`]: Error types

pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod model;
pub mod time;

pub use conflict::{detect_conflict, find_all_conflicts, Conflict, ConflictVerdict};
pub use error::ConstraintError;
pub use freebusy::{find_first_free_window, find_free_windows, FreeWindow};
pub use model::{Category, Constraint, ConstraintDraft, ConstraintId, Weekday};
pub use time::{time_ranges_overlap, TimeOfDay, TimeRange};
