//! Day-level hours ranges.
//!
//! A [`MilitaryRange`] is what one day (or run of days) stores: `"Closed"`,
//! the all-day range `"00:00 - 23:59"`, or one or more `"HH:MM - HH:MM"`
//! windows joined by `", "`.
//!
//! [`range_to_military`] turns free scraped text into that form.
//! [`MilitaryRange::from_str`] reads the stored form back, strictly.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HoursError, Result};
use crate::time::{meridiem_marker, to_military_time, MilitaryTime};

const CLOSED: &str = "Closed";

/// One opening window within a day, both edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    pub open: MilitaryTime,
    pub close: MilitaryTime,
}

impl TimeWindow {
    pub const ALL_DAY: Self = Self {
        open: MilitaryTime::START_OF_DAY,
        close: MilitaryTime::END_OF_DAY,
    };

    pub const fn new(open: MilitaryTime, close: MilitaryTime) -> Self {
        Self { open, close }
    }

    /// Whether `minutes` (since midnight) lies in `[open, close]`.
    ///
    /// The comparison does not wrap around midnight, so a window with
    /// `close < open` contains no minute at all.
    pub fn contains(&self, minutes: u32) -> bool {
        self.open.minutes() <= minutes && minutes <= self.close.minutes()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.open, self.close)
    }
}

impl FromStr for TimeWindow {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self> {
        let (open, close) = s
            .split_once(" - ")
            .ok_or_else(|| HoursError::InvalidRange(format!("'{s}'")))?;
        Ok(Self {
            open: open.parse()?,
            close: close.parse()?,
        })
    }
}

/// Normalized hours for a day or run of days.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MilitaryRange {
    Closed,
    /// Open around the clock, rendered `"00:00 - 23:59"`.
    AllDay,
    /// One or more service windows, in the order written.
    Windows(Vec<TimeWindow>),
}

impl MilitaryRange {
    pub fn windows(&self) -> Cow<'_, [TimeWindow]> {
        match self {
            Self::Closed => Cow::Borrowed(&[] as &[TimeWindow]),
            Self::AllDay => Cow::Owned(vec![TimeWindow::ALL_DAY]),
            Self::Windows(w) => Cow::Borrowed(w),
        }
    }
}

impl fmt::Display for MilitaryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str(CLOSED),
            Self::AllDay => write!(f, "{}", TimeWindow::ALL_DAY),
            Self::Windows(windows) => {
                for (i, w) in windows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{w}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for MilitaryRange {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == CLOSED {
            return Ok(Self::Closed);
        }
        let windows = s
            .split(", ")
            .map(str::parse)
            .collect::<Result<Vec<TimeWindow>>>()?;
        if windows == [TimeWindow::ALL_DAY] {
            return Ok(Self::AllDay);
        }
        Ok(Self::Windows(windows))
    }
}

impl TryFrom<String> for MilitaryRange {
    type Error = HoursError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MilitaryRange> for String {
    fn from(r: MilitaryRange) -> Self {
        r.to_string()
    }
}

/// Normalize one day's free-text hours.
///
/// - anything mentioning "closed" becomes [`MilitaryRange::Closed`]
/// - otherwise anything mentioning "open" (`"Open 24 hours"`) becomes
///   [`MilitaryRange::AllDay`]
/// - otherwise the text is split on commas into windows, each split on
///   `to` into start and end
///
/// When the start has no AM/PM marker and the end does, the end's marker is
/// applied to the start, so `"12 to 11 PM"` reads as noon to 11 PM.
///
/// # Errors
///
/// Returns [`HoursError::InvalidRange`] if a window has no `to`, or
/// [`HoursError::InvalidTime`] if either side is not a time expression.
///
/// # Examples
///
/// ```
/// use pawmap_hours::range_to_military;
///
/// let r = range_to_military("12:30 to 15:30, 17:00 to 21:00").unwrap();
/// assert_eq!(r.to_string(), "12:30 - 15:30, 17:00 - 21:00");
/// ```
pub fn range_to_military(text: &str) -> Result<MilitaryRange> {
    let lower = text.to_lowercase();
    if lower.contains("closed") {
        return Ok(MilitaryRange::Closed);
    }
    if lower.contains("open") {
        return Ok(MilitaryRange::AllDay);
    }

    text.split(',')
        .map(window_to_military)
        .collect::<Result<Vec<_>>>()
        .map(MilitaryRange::Windows)
}

fn window_to_military(range: &str) -> Result<TimeWindow> {
    let mut sides = range.split("to").map(str::trim);
    let start = sides.next().unwrap_or_default();
    let end = sides
        .next()
        .ok_or_else(|| HoursError::InvalidRange(format!("no 'to' in '{}'", range.trim())))?;

    let start = match (meridiem_marker(start), meridiem_marker(end)) {
        (None, Some(marker)) => Cow::Owned(format!("{start} {marker}")),
        _ => Cow::Borrowed(start),
    };

    Ok(TimeWindow {
        open: to_military_time(&start)?,
        close: to_military_time(end)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mil(s: &str) -> String {
        range_to_military(s).unwrap().to_string()
    }

    #[test]
    fn test_borrows_marker_from_end() {
        assert_eq!(mil("12 to 11 PM"), "12:00 - 23:00");
        assert_eq!(mil("9 to 11:30 am"), "09:00 - 11:30");
    }

    #[test]
    fn test_start_marker_not_overwritten() {
        assert_eq!(mil("11 AM to 2 PM"), "11:00 - 14:00");
    }

    #[test]
    fn test_closed_sentinel() {
        assert_eq!(mil("Closed"), "Closed");
        assert_eq!(mil("temporarily CLOSED"), "Closed");
        assert_eq!(range_to_military("Closed").unwrap(), MilitaryRange::Closed);
    }

    #[test]
    fn test_open_24_hours_is_all_day() {
        assert_eq!(mil("Open 24 hours"), "00:00 - 23:59");
        assert_eq!(
            range_to_military("open 24 hours").unwrap(),
            MilitaryRange::AllDay
        );
    }

    #[test]
    fn test_multiple_windows_joined() {
        assert_eq!(
            mil("12:30 to 15:30, 17:00 to 21:00"),
            "12:30 - 15:30, 17:00 - 21:00"
        );
    }

    #[test]
    fn test_twenty_four_hour_without_markers() {
        assert_eq!(mil("9 to 17"), "09:00 - 17:00");
    }

    #[test]
    fn test_missing_to_is_invalid_range() {
        let err = range_to_military("9 AM - 5 PM").unwrap_err();
        assert!(matches!(err, HoursError::InvalidRange(_)), "{err}");
    }

    #[test]
    fn test_empty_text_is_invalid_range() {
        assert!(matches!(
            range_to_military("").unwrap_err(),
            HoursError::InvalidRange(_)
        ));
    }

    #[test]
    fn test_unparseable_side_is_invalid_time() {
        let err = range_to_military("noon to 5 PM").unwrap_err();
        assert!(matches!(err, HoursError::InvalidTime(_)), "{err}");
        assert!(range_to_military("9 to 5 PM, 7 to").is_err());
    }

    #[test]
    fn test_stored_form_parses_back() {
        for s in [
            "Closed",
            "00:00 - 23:59",
            "09:00 - 17:00",
            "12:30 - 15:30, 17:00 - 21:00",
        ] {
            let r: MilitaryRange = s.parse().unwrap();
            assert_eq!(r.to_string(), s);
        }
        assert_eq!(
            "00:00 - 23:59".parse::<MilitaryRange>().unwrap(),
            MilitaryRange::AllDay
        );
    }

    #[test]
    fn test_stored_form_is_strict() {
        for bad in ["", "9 to 5", "09:00-17:00", "09:00 - ", "ab:cd - 17:00", "closed"] {
            assert!(bad.parse::<MilitaryRange>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let w: TimeWindow = "09:00 - 17:00".parse().unwrap();
        assert!(w.contains(9 * 60));
        assert!(w.contains(17 * 60));
        assert!(!w.contains(9 * 60 - 1));
        assert!(!w.contains(17 * 60 + 1));
    }

    #[test]
    fn test_window_crossing_midnight_never_wraps() {
        let w: TimeWindow = "18:00 - 02:00".parse().unwrap();
        assert!(!w.contains(23 * 60));
        assert!(!w.contains(60));
        assert!(!w.contains(18 * 60));
    }

    #[test]
    fn test_serde_uses_string_form() {
        let r = range_to_military("9 AM to 5 PM").unwrap();
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "\"09:00 - 17:00\"");
        let back: MilitaryRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
