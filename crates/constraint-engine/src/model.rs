//! Constraint data model: weekdays, categories, drafts and stored constraints.
//!
//! A constraint is a named, recurring weekly unavailability window, e.g.
//! "School run, monday+wednesday, 08:00-09:00". The JSON shape matches the
//! storage layer: snake_case fields, lowercase enum identifiers, `"HH:MM"` times.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConstraintError, Result};
use crate::time::{TimeOfDay, TimeRange};

/// Day of the week, identified by its lowercase English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = ConstraintError;

    /// Exact, case-sensitive match on the lowercase identifier.
    fn from_str(s: &str) -> Result<Self> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| ConstraintError::UnknownWeekday(s.to_string()))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

/// What a constraint is about. Informational; conflict detection ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    School,
    Home,
    Sport,
    Social,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Work,
        Category::School,
        Category::Home,
        Category::Sport,
        Category::Social,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::School => "school",
            Category::Home => "home",
            Category::Sport => "sport",
            Category::Social => "social",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ConstraintError::UnknownCategory(s.to_string()))
    }
}

/// Identifier assigned by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintId(String);

impl ConstraintId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConstraintId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ConstraintId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A constraint payload without an identifier: the candidate being created or
/// edited, or the body of a stored [`Constraint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDraft {
    pub name: String,
    pub category: Category,
    /// Days the window recurs on. Order is kept as given.
    pub days: Vec<Weekday>,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_lunch_break: Option<bool>,
}

impl ConstraintDraft {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        days: impl IntoIterator<Item = Weekday>,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            days: days.into_iter().collect(),
            start_time,
            end_time,
            allow_lunch_break: None,
        }
    }

    pub fn with_lunch_break(mut self, allow: bool) -> Self {
        self.allow_lunch_break = Some(allow);
        self
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start_time, self.end_time)
    }

    pub fn applies_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// Check the rules a constraint form enforces before saving.
    ///
    /// Rejects a blank name, an empty or repeated day list, and a window that
    /// does not end after it starts. Conflict detection does not require this.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ConstraintError::EmptyName);
        }
        if self.days.is_empty() {
            return Err(ConstraintError::NoDays);
        }
        let mut seen = HashSet::new();
        for day in &self.days {
            if !seen.insert(*day) {
                return Err(ConstraintError::DuplicateDay(*day));
            }
        }
        if self.start_time >= self.end_time {
            return Err(ConstraintError::InvalidRange {
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
            });
        }
        Ok(())
    }

    /// Attach a storage identifier.
    pub fn into_constraint(self, id: impl Into<ConstraintId>) -> Constraint {
        Constraint {
            id: id.into(),
            draft: self,
        }
    }
}

/// A persisted constraint: a draft plus its identifier.
///
/// In JSON the draft fields sit next to `id` rather than under a nested key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub id: ConstraintId,
    #[serde(flatten)]
    pub draft: ConstraintDraft,
}

impl Constraint {
    pub fn name(&self) -> &str {
        &self.draft.name
    }

    pub fn days(&self) -> &[Weekday] {
        &self.draft.days
    }

    pub fn time_range(&self) -> TimeRange {
        self.draft.time_range()
    }
}

/// Parse a JSON array of stored constraints.
pub fn constraints_from_json(json: &str) -> Result<Vec<Constraint>> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a single JSON constraint draft (an `id` field, if present, is ignored).
pub fn draft_from_json(json: &str) -> Result<ConstraintDraft> {
    Ok(serde_json::from_str(json)?)
}
