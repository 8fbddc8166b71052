//! WASM bindings for the map front-end.
//!
//! The map calls [`open_state`] for every venue marker on every render, so
//! it takes the venue's `Hours` JSON and the local wall-clock time as plain
//! strings and never throws: anything unusable comes back as `"unknown"`.

use chrono::NaiveDateTime;
use wasm_bindgen::prelude::*;

use pawmap_hours::{OpenState, RawDayHours, Schedule};

/// `"open"`, `"closed"` or `"unknown"` for a venue's `Hours` at `local_time`
/// (`YYYY-MM-DDTHH:MM[:SS]`, local wall-clock).
#[wasm_bindgen(js_name = "openState")]
pub fn open_state(hours_json: &str, local_time: &str) -> String {
    evaluate(hours_json, local_time).to_string()
}

/// Badge text for the popup, or `undefined` when the state is unknown.
#[wasm_bindgen(js_name = "openBadge")]
pub fn open_badge(hours_json: &str, local_time: &str) -> Option<String> {
    evaluate(hours_json, local_time).badge().map(str::to_string)
}

/// Normalize a JSON array of `{day, hours}` entries into one season's hours
/// JSON. Throws with the parse error message on failure.
#[wasm_bindgen(js_name = "normalizeHours")]
pub fn normalize_hours(entries_json: &str) -> Result<String, JsError> {
    let entries: Vec<RawDayHours> = serde_json::from_str(entries_json)?;
    let hours = pawmap_hours::normalize(&entries)?;
    Ok(serde_json::to_string(&hours)?)
}

fn evaluate(hours_json: &str, local_time: &str) -> OpenState {
    let schedule = serde_json::from_str::<Schedule>(hours_json).ok();
    match parse_local_time(local_time) {
        Some(at) => pawmap_hours::open_state(schedule.as_ref(), &at),
        None => OpenState::Unknown,
    }
}

fn parse_local_time(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOURS: &str = r#"{"Summer":{"Mon-Sun":"09:00 - 17:00"},"Winter":{"Mon-Sun":"Closed"}}"#;

    #[test]
    fn test_open_state_strings() {
        assert_eq!(open_state(HOURS, "2026-07-01T12:00"), "open");
        assert_eq!(open_state(HOURS, "2026-07-01T18:00:00"), "closed");
        assert_eq!(open_state(HOURS, "2026-12-01T12:00"), "closed");
    }

    #[test]
    fn test_unusable_input_is_unknown() {
        assert_eq!(open_state("not json", "2026-07-01T12:00"), "unknown");
        assert_eq!(open_state("{}", "2026-07-01T12:00"), "unknown");
        assert_eq!(open_state(HOURS, "noon"), "unknown");
    }

    #[test]
    fn test_badge() {
        assert_eq!(open_badge(HOURS, "2026-07-01T12:00").as_deref(), Some("Open now"));
        assert_eq!(open_badge("{}", "2026-07-01T12:00"), None);
    }
}
