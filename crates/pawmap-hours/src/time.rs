//! Single time-of-day expressions.
//!
//! Scraped hours text writes times in several shapes: `"9"`, `"9:30"`,
//! `"9 PM"`, `"9:30pm"`, `"21:30"`. [`to_military_time`] accepts exactly
//! `<1-2 digit hour>[:<2 digit minute>][ ][AM|PM]` and nothing else.
//!
//! The hour is not range-checked. A value like `"13 PM"` comes out as
//! `25:00`, the same as the scraper data has always been stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HoursError, Result};

/// A wall-clock time rendered as zero-padded `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MilitaryTime {
    pub hour: u32,
    pub minute: u32,
}

impl MilitaryTime {
    /// Midnight, the opening edge of an all-day range.
    pub const START_OF_DAY: Self = Self { hour: 0, minute: 0 };
    /// 23:59, the closing edge of an all-day range.
    pub const END_OF_DAY: Self = Self {
        hour: 23,
        minute: 59,
    };

    pub const fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Minutes since midnight, saturating at `u32::MAX`.
    pub const fn minutes(self) -> u32 {
        self.hour.saturating_mul(60).saturating_add(self.minute)
    }
}

impl fmt::Display for MilitaryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Strict `HH:MM` parsing for stored values: exactly two digits each side.
impl FromStr for MilitaryTime {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || HoursError::InvalidTime(format!("'{s}'"));
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        Ok(Self {
            hour: parse_digits(h).ok_or_else(invalid)?,
            minute: parse_digits(m).ok_or_else(invalid)?,
        })
    }
}

impl TryFrom<String> for MilitaryTime {
    type Error = HoursError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MilitaryTime> for String {
    fn from(t: MilitaryTime) -> Self {
        t.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("am") {
            Some(Self::Am)
        } else if s.eq_ignore_ascii_case("pm") {
            Some(Self::Pm)
        } else {
            None
        }
    }

    fn to_24h(self, hour: u32) -> u32 {
        match (self, hour) {
            (Self::Am, 12) => 0,
            (Self::Am, h) => h,
            (Self::Pm, 12) => 12,
            (Self::Pm, h) => h + 12,
        }
    }
}

/// Convert one time expression to a [`MilitaryTime`].
///
/// Minute defaults to `00`. `12 AM` is midnight, `12 PM` is noon, other PM
/// hours gain 12. Without a marker the hour is taken as written.
///
/// # Errors
///
/// Returns [`HoursError::InvalidTime`] if the text does not match the grammar.
///
/// # Examples
///
/// ```
/// use pawmap_hours::to_military_time;
///
/// assert_eq!(to_military_time("9:30 PM").unwrap().to_string(), "21:30");
/// assert_eq!(to_military_time("12 AM").unwrap().to_string(), "00:00");
/// ```
pub fn to_military_time(text: &str) -> Result<MilitaryTime> {
    let s = text.trim();
    let invalid = || HoursError::InvalidTime(format!("'{s}'"));

    let hour_end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (hour_str, rest) = s.split_at(hour_end);
    if hour_str.len() > 2 {
        return Err(invalid());
    }
    let hour = parse_digits(hour_str).ok_or_else(invalid)?;

    let (minute, rest) = match rest.strip_prefix(':') {
        Some(after) => {
            let minute_str = after.get(..2).ok_or_else(invalid)?;
            (parse_digits(minute_str).ok_or_else(invalid)?, &after[2..])
        }
        None => (0, rest),
    };

    let hour = match rest.trim_start() {
        "" => hour,
        marker => Meridiem::parse(marker).ok_or_else(invalid)?.to_24h(hour),
    };

    Ok(MilitaryTime { hour, minute })
}

/// The first `AM`/`PM` marker in `s`, in its original case.
pub(crate) fn meridiem_marker(s: &str) -> Option<&str> {
    let lower = s.to_ascii_lowercase();
    let at = match (lower.find("am"), lower.find("pm")) {
        (Some(a), Some(p)) => a.min(p),
        (Some(a), None) => a,
        (None, Some(p)) => p,
        (None, None) => return None,
    };
    s.get(at..at + 2)
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
