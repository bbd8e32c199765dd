//! WASM bindings for availability-engine.
//!
//! Exposes availability scoring, end-date resolution, and schedule shifting to
//! JavaScript automation scripts via `wasm-bindgen`. Records cross the
//! boundary as JSON strings; dates are `YYYY-MM-DD`, timestamps RFC 3339.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/availability-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/availability_engine_wasm.wasm
//! ```

use availability_engine::planner::Candidate;
use availability_engine::{DateRange, Resource, ScheduleEntry, Session};
use chrono::NaiveDate;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Input shapes accepted from JavaScript
// ---------------------------------------------------------------------------

/// A resource with its sessions inlined, as handed over by the caller.
#[derive(Deserialize)]
struct CandidateInput {
    #[serde(flatten)]
    resource: Resource,
    #[serde(default)]
    sessions: Vec<Session>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn engine_error(e: availability_engine::EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_candidates_json(json: &str) -> Result<Vec<Candidate>, JsValue> {
    let inputs: Vec<CandidateInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid resources JSON: {}", e)))?;

    Ok(inputs
        .into_iter()
        .map(|input| Candidate {
            resource: input.resource,
            sessions: input.sessions,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Count the weekdays between two dates, both included.
#[wasm_bindgen(js_name = "countWeekdays")]
pub fn count_weekdays(start: &str, end: &str) -> Result<u32, JsValue> {
    availability_engine::count_weekdays(parse_date(start)?, parse_date(end)?).map_err(engine_error)
}

/// Score and rank candidate resources over a target range.
///
/// `resources_json` is a JSON array of resources, each with its committed
/// sessions inlined under `sessions`. Returns a JSON array of availability
/// results, most available first.
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability(
    target_start: &str,
    target_end: &str,
    target_weekday_length: u32,
    resources_json: &str,
) -> Result<String, JsValue> {
    let target =
        DateRange::new(parse_date(target_start)?, parse_date(target_end)?).map_err(engine_error)?;
    let candidates = parse_candidates_json(resources_json)?;

    let ranked =
        availability_engine::compute_availability(&target, target_weekday_length, &candidates)
            .map_err(engine_error)?;

    to_json(&ranked)
}

/// Resolve a session end date. Returns `YYYY-MM-DD`.
#[wasm_bindgen(js_name = "resolveSessionEndDate")]
pub fn resolve_session_end_date(start: &str, weekday_length: u32) -> Result<String, JsValue> {
    let end = availability_engine::resolve_session_end_date(parse_date(start)?, weekday_length)
        .map_err(engine_error)?;
    Ok(end.format("%Y-%m-%d").to_string())
}

/// Shift schedule entries so the earliest starts on `new_anchor_start`.
///
/// `entries_json` is a JSON array of schedule entries sorted by start. Returns
/// the shifted entries as JSON, in the same order.
#[wasm_bindgen(js_name = "shiftSchedule")]
pub fn shift_schedule(new_anchor_start: &str, entries_json: &str) -> Result<String, JsValue> {
    let entries: Vec<ScheduleEntry> = serde_json::from_str(entries_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid schedule JSON: {}", e)))?;

    let shifted = availability_engine::shift_schedule(parse_date(new_anchor_start)?, &entries)
        .map_err(engine_error)?;

    to_json(&shifted)
}
