//! The persisted `Hours` shape attached to a venue.
//!
//! ```json
//! { "Summer": { "Mon-Sun": "09:00 - 17:00" }, "Winter": { "Mon-Sun": "Closed" } }
//! ```
//!
//! Reading this shape never fails on bad content. A range string that does
//! not parse is kept verbatim as [`HoursSlot::Unparsed`], an entry whose key
//! is not a day range is skipped, and a season whose value is not an object
//! is dropped. Evaluation then answers Unknown for what is missing.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::days::DayRangeKey;
use crate::error::{HoursError, Result};
use crate::range::MilitaryRange;

/// Time-of-year discriminator for a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// April through September.
    Summer,
    /// October through March.
    Winter,
}

impl Season {
    /// The season for a calendar month (1-12).
    pub fn for_month(month: u32) -> Self {
        if (4..=9).contains(&month) {
            Self::Summer
        } else {
            Self::Winter
        }
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        Self::for_month(date.month())
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Summer => "Summer",
            Self::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Season {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "summer" => Ok(Self::Summer),
            "winter" => Ok(Self::Winter),
            _ => Err(HoursError::InvalidSchedule(format!("unknown season '{s}'"))),
        }
    }
}

/// A stored hours value: a well-formed range, or whatever was there instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum HoursSlot {
    Range(MilitaryRange),
    Unparsed(Value),
}

impl HoursSlot {
    pub fn range(&self) -> Option<&MilitaryRange> {
        match self {
            Self::Range(r) => Some(r),
            Self::Unparsed(_) => None,
        }
    }
}

impl From<MilitaryRange> for HoursSlot {
    fn from(r: MilitaryRange) -> Self {
        Self::Range(r)
    }
}

impl From<Value> for HoursSlot {
    fn from(v: Value) -> Self {
        match v.as_str().map(str::parse::<MilitaryRange>) {
            Some(Ok(range)) => Self::Range(range),
            _ => Self::Unparsed(v),
        }
    }
}

impl From<HoursSlot> for Value {
    fn from(slot: HoursSlot) -> Self {
        match slot {
            HoursSlot::Range(r) => Value::String(r.to_string()),
            HoursSlot::Unparsed(v) => v,
        }
    }
}

/// One season's hours.
///
/// Only [`SeasonHours::Week`] is consulted when deciding open/closed today.
/// Per-day-range data is still carried through so it is not lost.
#[derive(Debug, Clone, PartialEq)]
pub enum SeasonHours {
    /// A single schedule for every day, stored under `"Mon-Sun"`.
    Week(HoursSlot),
    /// Separate hours per run of days, in calendar order.
    DayRanges(Vec<(DayRangeKey, HoursSlot)>),
}

impl SeasonHours {
    /// Build from normalized groups. A lone full-week group becomes
    /// [`SeasonHours::Week`].
    pub fn from_ranges(ranges: Vec<(DayRangeKey, MilitaryRange)>) -> Self {
        Self::collapse(
            ranges
                .into_iter()
                .map(|(key, range)| (key, range.into()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::DayRanges(slots) if slots.is_empty())
    }

    /// The slot stored under `"Mon-Sun"`, if any.
    pub fn week_slot(&self) -> Option<&HoursSlot> {
        match self {
            Self::Week(slot) => Some(slot),
            Self::DayRanges(slots) => slots
                .iter()
                .find(|(key, _)| key.is_full_week())
                .map(|(_, slot)| slot),
        }
    }

    fn from_map(map: Map<String, Value>) -> Self {
        let slots = map
            .into_iter()
            .filter_map(|(key, value)| match key.parse::<DayRangeKey>() {
                Ok(key) => Some((key, HoursSlot::from(value))),
                Err(err) => {
                    warn!(%err, "skipping stored hours entry");
                    None
                }
            })
            .collect();
        Self::collapse(slots)
    }

    fn collapse(mut slots: Vec<(DayRangeKey, HoursSlot)>) -> Self {
        if slots.len() == 1 && slots[0].0.is_full_week() {
            if let Some((_, slot)) = slots.pop() {
                return Self::Week(slot);
            }
        }
        Self::DayRanges(slots)
    }
}

impl Serialize for SeasonHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Week(slot) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(&DayRangeKey::full_week().to_string(), slot)?;
                map.end()
            }
            Self::DayRanges(slots) => {
                let mut map = serializer.serialize_map(Some(slots.len()))?;
                for (key, slot) in slots {
                    map.serialize_entry(&key.to_string(), slot)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for SeasonHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Self::from_map)
    }
}

/// A venue's hours per season. Either season may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(
        rename = "Summer",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_season"
    )]
    pub summer: Option<SeasonHours>,
    #[serde(
        rename = "Winter",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_season"
    )]
    pub winter: Option<SeasonHours>,
}

impl Schedule {
    /// True when no season carries any hours; this is the `{}` Hours object.
    pub fn is_empty(&self) -> bool {
        [&self.summer, &self.winter]
            .into_iter()
            .all(|s| s.as_ref().is_none_or(SeasonHours::is_empty))
    }

    pub fn season(&self, season: Season) -> Option<&SeasonHours> {
        match season {
            Season::Summer => self.summer.as_ref(),
            Season::Winter => self.winter.as_ref(),
        }
    }

    /// Replace one season's hours, leaving the other untouched.
    pub fn set_season(&mut self, season: Season, hours: SeasonHours) {
        match season {
            Season::Summer => self.summer = Some(hours),
            Season::Winter => self.winter = Some(hours),
        }
    }

    pub fn with_season(mut self, season: Season, hours: SeasonHours) -> Self {
        self.set_season(season, hours);
        self
    }
}

fn lenient_season<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<SeasonHours>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(Some(SeasonHours::from_map(map))),
        _ => Ok(None),
    }
}
