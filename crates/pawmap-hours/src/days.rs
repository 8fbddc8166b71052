//! Grouping of consecutive days that share identical hours text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HoursError, Result};

/// One scraped opening-hours entry: a day name and its free-text hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDayHours {
    pub day: String,
    pub hours: String,
}

impl RawDayHours {
    pub fn new(day: impl Into<String>, hours: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            hours: hours.into(),
        }
    }
}

/// Key for a run of days: `"Mon"` or `"Mon-Fri"`.
///
/// Both ends hold the first three characters of the day name as scraped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayRangeKey {
    pub first: String,
    pub last: Option<String>,
}

impl DayRangeKey {
    const WEEK_FIRST: &'static str = "Mon";
    const WEEK_LAST: &'static str = "Sun";

    pub fn single(day: &str) -> Self {
        Self {
            first: abbreviate(day),
            last: None,
        }
    }

    pub fn span(first: &str, last: &str) -> Self {
        Self {
            first: abbreviate(first),
            last: Some(abbreviate(last)),
        }
    }

    /// The `"Mon-Sun"` key.
    pub fn full_week() -> Self {
        Self::span(Self::WEEK_FIRST, Self::WEEK_LAST)
    }

    pub fn is_full_week(&self) -> bool {
        self.first == Self::WEEK_FIRST && self.last.as_deref() == Some(Self::WEEK_LAST)
    }
}

impl fmt::Display for DayRangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.last {
            Some(last) => write!(f, "{}-{}", self.first, last),
            None => f.write_str(&self.first),
        }
    }
}

impl FromStr for DayRangeKey {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (first, last) = match s.split_once('-') {
            Some((first, last)) => (first.trim(), Some(last.trim())),
            None => (s, None),
        };
        if first.is_empty() || last.is_some_and(str::is_empty) {
            return Err(HoursError::InvalidSchedule(format!("bad day range '{s}'")));
        }
        Ok(Self {
            first: first.to_string(),
            last: last.map(str::to_string),
        })
    }
}

/// A run of adjacent days whose hours text is byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    /// Day names as scraped, in input order. Never empty.
    pub days: Vec<String>,
    pub hours: String,
}

impl DayGroup {
    pub fn key(&self) -> DayRangeKey {
        match self.days.as_slice() {
            [] => DayRangeKey::single(""),
            [only] => DayRangeKey::single(only),
            [first, .., last] => DayRangeKey::span(first, last),
        }
    }
}

/// Collapse adjacent days with identical hours text into groups.
///
/// Entries are taken in the order given; nothing is sorted. Only adjacent
/// days merge, so Mon and Wed with the same text around a different Tue
/// stay separate. Empty input gives no groups.
///
/// # Examples
///
/// ```
/// use pawmap_hours::{group_consecutive_days, RawDayHours};
///
/// let groups = group_consecutive_days(&[
///     RawDayHours::new("Monday", "9-5"),
///     RawDayHours::new("Tuesday", "9-5"),
///     RawDayHours::new("Wednesday", "Closed"),
/// ]);
/// let keys: Vec<String> = groups.iter().map(|g| g.key().to_string()).collect();
/// assert_eq!(keys, ["Mon-Tue", "Wed"]);
/// ```
pub fn group_consecutive_days(entries: &[RawDayHours]) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    for entry in entries {
        match groups.last_mut() {
            Some(run) if run.hours == entry.hours => run.days.push(entry.day.clone()),
            _ => groups.push(DayGroup {
                days: vec![entry.day.clone()],
                hours: entry.hours.clone(),
            }),
        }
    }
    groups
}

fn abbreviate(day: &str) -> String {
    day.chars().take(3).collect()
}
