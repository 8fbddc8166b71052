//! Open-now evaluation against a [`Schedule`].
//!
//! The reference instant is always passed in; nothing here reads the
//! clock. Times are local wall-clock.
//!
//! Only the season's `"Mon-Sun"` slot is consulted, so the weekday of the
//! instant does not matter. Anything missing or malformed gives
//! [`OpenState::Unknown`], never a guess.

use std::fmt;

use chrono::{Datelike, Timelike};
use serde::Serialize;

use crate::range::MilitaryRange;
use crate::schedule::{HoursSlot, Schedule, Season};

/// Whether a venue is open at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenState {
    Open,
    Closed,
    /// No usable hours for this instant.
    Unknown,
}

impl OpenState {
    /// Badge text for the map popup. Unknown shows no badge.
    pub fn badge(self) -> Option<&'static str> {
        match self {
            Self::Open => Some("Open now"),
            Self::Closed => Some("Closed"),
            Self::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for OpenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        })
    }
}

/// Evaluate an optional schedule at `at`.
///
/// Open when the minute of `at` lies inside any window of the season's
/// `"Mon-Sun"` range, boundaries included. Windows with close before open
/// (past midnight) never match.
///
/// Two answers differ from the old single `" - "` split of the stored
/// string, which gave Unknown for both: a stored `"Closed"` now evaluates to
/// Closed, and a multi-window range is checked window by window.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pawmap_hours::{open_state, OpenState, Schedule};
///
/// let hours: Schedule = serde_json::from_str(r#"{"Summer":{"Mon-Sun":"09:00 - 17:00"}}"#).unwrap();
/// let noon = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(open_state(Some(&hours), &noon), OpenState::Open);
/// assert_eq!(open_state(None, &noon), OpenState::Unknown);
/// ```
pub fn open_state<T: Datelike + Timelike>(schedule: Option<&Schedule>, at: &T) -> OpenState {
    let Some(schedule) = schedule.filter(|s| !s.is_empty()) else {
        return OpenState::Unknown;
    };
    let Some(HoursSlot::Range(range)) = schedule
        .season(Season::of(at))
        .and_then(|hours| hours.week_slot())
    else {
        return OpenState::Unknown;
    };

    let now = at.hour() * 60 + at.minute();
    match range {
        MilitaryRange::Closed => OpenState::Closed,
        _ if range.windows().iter().any(|w| w.contains(now)) => OpenState::Open,
        _ => OpenState::Closed,
    }
}

impl Schedule {
    /// Shorthand for [`open_state`] on a present schedule.
    pub fn open_state<T: Datelike + Timelike>(&self, at: &T) -> OpenState {
        open_state(Some(self), at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use serde_json::json;

    fn at(month: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, month, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn schedule(value: serde_json::Value) -> Schedule {
        serde_json::from_value(value).unwrap()
    }

    fn nine_to_five() -> Schedule {
        schedule(json!({
            "Summer": { "Mon-Sun": "09:00 - 17:00" },
            "Winter": { "Mon-Sun": "10:00 - 16:00" }
        }))
    }

    #[test]
    fn test_absent_schedule_unknown() {
        assert_eq!(open_state(None, &at(7, 12, 0)), OpenState::Unknown);
    }

    #[test]
    fn test_empty_schedule_unknown() {
        assert_eq!(Schedule::default().open_state(&at(7, 12, 0)), OpenState::Unknown);
    }

    #[test]
    fn test_missing_current_season_unknown() {
        let s = schedule(json!({ "Summer": { "Mon-Sun": "09:00 - 17:00" } }));
        assert_eq!(s.open_state(&at(12, 12, 0)), OpenState::Unknown);
        assert_eq!(s.open_state(&at(7, 12, 0)), OpenState::Open);
    }

    #[test]
    fn test_no_fallback_to_other_season() {
        let s = schedule(json!({ "Winter": { "Mon-Sun": "00:00 - 23:59" } }));
        assert_eq!(s.open_state(&at(6, 12, 0)), OpenState::Unknown);
    }

    #[test]
    fn test_missing_fixed_key_unknown() {
        let s = schedule(json!({ "Summer": { "Mon-Fri": "09:00 - 17:00", "Sat-Sun": "Closed" } }));
        assert_eq!(s.open_state(&at(7, 12, 0)), OpenState::Unknown);
    }

    #[test]
    fn test_malformed_range_unknown() {
        for bad in ["9 to 5", "09:00-17:00", "ab:00 - 17:00", ""] {
            let s = schedule(json!({ "Summer": { "Mon-Sun": bad } }));
            assert_eq!(s.open_state(&at(7, 12, 0)), OpenState::Unknown, "{bad}");
        }
        let s = schedule(json!({ "Summer": { "Mon-Sun": 900 } }));
        assert_eq!(s.open_state(&at(7, 12, 0)), OpenState::Unknown);
    }

    #[test]
    fn test_oversized_stored_numbers_unknown() {
        for bad in ["99999999:00 - 17:00", "09:00 - 01:4294967295"] {
            let s = schedule(json!({ "Summer": { "Mon-Sun": bad } }));
            assert_eq!(s.open_state(&at(7, 12, 0)), OpenState::Unknown, "{bad}");
        }
    }

    #[test]
    fn test_bad_day_key_does_not_hide_week() {
        for key in ["Mon-", ""] {
            let s = schedule(json!({ "Summer": { "Mon-Sun": "09:00 - 17:00", key: "x" } }));
            assert_eq!(s.open_state(&at(7, 12, 0)), OpenState::Open, "{key:?}");
        }
    }

    #[test]
    fn test_open_inside_window_boundaries_inclusive() {
        let s = nine_to_five();
        assert_eq!(s.open_state(&at(7, 9, 0)), OpenState::Open);
        assert_eq!(s.open_state(&at(7, 12, 30)), OpenState::Open);
        assert_eq!(s.open_state(&at(7, 17, 0)), OpenState::Open);
    }

    #[test]
    fn test_closed_outside_window() {
        let s = nine_to_five();
        assert_eq!(s.open_state(&at(7, 8, 59)), OpenState::Closed);
        assert_eq!(s.open_state(&at(7, 17, 1)), OpenState::Closed);
        assert_eq!(s.open_state(&at(7, 0, 0)), OpenState::Closed);
    }

    #[test]
    fn test_season_chosen_by_month() {
        let s = nine_to_five();
        // 09:30 is inside summer hours, before winter opening
        assert_eq!(s.open_state(&at(4, 9, 30)), OpenState::Open);
        assert_eq!(s.open_state(&at(9, 9, 30)), OpenState::Open);
        assert_eq!(s.open_state(&at(3, 9, 30)), OpenState::Closed);
        assert_eq!(s.open_state(&at(10, 9, 30)), OpenState::Closed);
    }

    #[test]
    fn test_all_day_open_at_edges() {
        let s = schedule(json!({ "Winter": { "Mon-Sun": "00:00 - 23:59" } }));
        assert_eq!(s.open_state(&at(1, 0, 0)), OpenState::Open);
        assert_eq!(s.open_state(&at(1, 23, 59)), OpenState::Open);
    }

    // Behavior change: the stored "Closed" sentinel used to fail the
    // HH:MM split and show no badge. It is now a confirmed Closed.
    #[test]
    fn test_closed_sentinel_is_closed_not_unknown() {
        let s = schedule(json!({ "Winter": { "Mon-Sun": "Closed" } }));
        assert_eq!(s.open_state(&at(1, 12, 0)), OpenState::Closed);
    }

    // Behavior change: multi-window days used to be Unknown because the
    // joined string fails the single HH:MM split. Now any window counts.
    #[test]
    fn test_multi_window_day_checks_every_window() {
        let s = schedule(json!({ "Summer": { "Mon-Sun": "12:00 - 15:00, 17:00 - 21:00" } }));
        assert_eq!(s.open_state(&at(7, 13, 0)), OpenState::Open);
        assert_eq!(s.open_state(&at(7, 18, 0)), OpenState::Open);
        assert_eq!(s.open_state(&at(7, 16, 0)), OpenState::Closed);
    }

    // Known limitation kept as is: ranges past midnight are not wrapped.
    #[test]
    fn test_window_past_midnight_never_open() {
        let s = schedule(json!({ "Summer": { "Mon-Sun": "18:00 - 02:00" } }));
        assert_eq!(s.open_state(&at(7, 23, 0)), OpenState::Closed);
        assert_eq!(s.open_state(&at(7, 1, 0)), OpenState::Closed);
        assert_eq!(s.open_state(&at(7, 12, 0)), OpenState::Closed);
    }

    #[test]
    fn test_weekday_not_consulted() {
        let s = nine_to_five();
        for day in 13..=19 {
            let t = NaiveDate::from_ymd_opt(2026, 7, day)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap();
            assert_eq!(s.open_state(&t), OpenState::Open);
        }
    }

    #[test]
    fn test_badges() {
        assert_eq!(OpenState::Open.badge(), Some("Open now"));
        assert_eq!(OpenState::Closed.badge(), Some("Closed"));
        assert_eq!(OpenState::Unknown.badge(), None);
        assert!(!OpenState::Unknown.is_known());
    }
}
