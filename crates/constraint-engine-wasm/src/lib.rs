//! WASM bindings for constraint-engine.
//!
//! Exposes conflict detection, draft validation, and free-window computation
//! to the web client via `wasm-bindgen`. All complex values cross the boundary
//! as JSON strings in the storage layer's shape (snake_case constraint fields,
//! lowercase days, `"HH:MM"` times).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p constraint-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/constraint_engine_wasm.wasm
//! ```

use constraint_engine::error::Result;
use constraint_engine::model::{constraints_from_json, draft_from_json};
use constraint_engine::{ConstraintId, TimeOfDay, TimeRange, Weekday};
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

// ---------------------------------------------------------------------------
// JSON-in, JSON-out implementations (target independent, unit tested)
// ---------------------------------------------------------------------------

fn detect_conflict_json(
    candidate_json: &str,
    existing_json: &str,
    exclude_id: Option<&str>,
) -> Result<String> {
    let candidate = draft_from_json(candidate_json)?;
    let existing = constraints_from_json(existing_json)?;
    let exclude = exclude_id.map(ConstraintId::from);

    let verdict = constraint_engine::detect_conflict(&candidate, &existing, exclude.as_ref());
    Ok(serde_json::to_string(&verdict)?)
}

fn find_all_conflicts_json(
    candidate_json: &str,
    existing_json: &str,
    exclude_id: Option<&str>,
) -> Result<String> {
    let candidate = draft_from_json(candidate_json)?;
    let existing = constraints_from_json(existing_json)?;
    let exclude = exclude_id.map(ConstraintId::from);

    let conflicts = constraint_engine::find_all_conflicts(&candidate, &existing, exclude.as_ref());
    Ok(serde_json::to_string(&conflicts)?)
}

fn validate_constraint_json(draft_json: &str) -> Result<()> {
    draft_from_json(draft_json)?.validate()
}

fn find_free_windows_json(
    constraints_json: &str,
    day: &str,
    from: &str,
    to: &str,
) -> Result<String> {
    let constraints = constraints_from_json(constraints_json)?;
    let day: Weekday = day.parse()?;
    let window = TimeRange::new(TimeOfDay::parse(from)?, TimeOfDay::parse(to)?);

    let windows = constraint_engine::find_free_windows(&constraints, day, window);
    Ok(serde_json::to_string(&windows)?)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Check a draft constraint against the stored ones before saving it.
///
/// `candidate_json` is a single constraint object (an `id` is ignored);
/// `existing_json` is an array of stored constraints. Pass the edited
/// constraint's id as `exclude_id` when editing.
///
/// Returns `{"hasConflict": false}` or
/// `{"hasConflict": true, "conflictingConstraint": {...}, "overlappingDays": [...]}`.
/// Throws on malformed JSON or a malformed `HH:MM` time.
#[wasm_bindgen(js_name = "detectConflict")]
pub fn detect_conflict(
    candidate_json: &str,
    existing_json: &str,
    exclude_id: Option<String>,
) -> std::result::Result<String, JsValue> {
    detect_conflict_json(candidate_json, existing_json, exclude_id.as_deref()).map_err(to_js_error)
}

/// Like `detectConflict`, but lists every colliding constraint.
///
/// Returns an array of `{conflictingConstraint, overlappingDays, overlapMinutes}`.
#[wasm_bindgen(js_name = "findAllConflicts")]
pub fn find_all_conflicts(
    candidate_json: &str,
    existing_json: &str,
    exclude_id: Option<String>,
) -> std::result::Result<String, JsValue> {
    find_all_conflicts_json(candidate_json, existing_json, exclude_id.as_deref())
        .map_err(to_js_error)
}

/// Validate a draft constraint the way the constraint form does.
///
/// Throws with a human-readable message when the draft is invalid.
#[wasm_bindgen(js_name = "validateConstraint")]
pub fn validate_constraint(draft_json: &str) -> std::result::Result<(), JsValue> {
    validate_constraint_json(draft_json).map_err(to_js_error)
}

/// Free windows on `day` between `from` and `to` (`"HH:MM"`).
///
/// Returns an array of `{start, end, durationMinutes}`.
#[wasm_bindgen(js_name = "findFreeWindows")]
pub fn find_free_windows(
    constraints_json: &str,
    day: &str,
    from: &str,
    to: &str,
) -> std::result::Result<String, JsValue> {
    find_free_windows_json(constraints_json, day, from, to).map_err(to_js_error)
}
