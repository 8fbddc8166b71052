//! # pawmap-hours
//!
//! Opening hours for the dog-friendly venue map.
//!
//! Scraped hours arrive as free text per day ("12:30 to 15:30, 17:00 to
//! 21:00", "12 to 11 PM", "Open 24 hours"). This crate compresses them into
//! the compact per-season schedule stored on each venue, and answers at
//! render time whether a venue is open, closed, or unknown.
//!
//! Everything here is pure: no I/O and no clock. Callers pass the
//! reference instant.
//!
//! ## Modules
//!
//! - [`time`] — single time expressions → `HH:MM`
//! - [`range`] — a day's hours text → `MilitaryRange`
//! - [`days`] — grouping of consecutive days with identical hours
//! - [`normalize`] — raw scrape → one season's hours, all or nothing
//! - [`schedule`] — the persisted per-season `Hours` shape
//! - [`evaluate`] — open / closed / unknown at an instant
//! - [`ingest`] — dog-friendliness classification and venue dataset merge
//! - [`error`] — Error types

pub mod days;
pub mod error;
pub mod evaluate;
pub mod ingest;
pub mod normalize;
pub mod range;
pub mod schedule;
pub mod time;

pub use days::{group_consecutive_days, DayGroup, DayRangeKey, RawDayHours};
pub use error::HoursError;
pub use evaluate::{open_state, OpenState};
pub use ingest::{classify, ingest, schedule_for, DogPolicy, ScrapedPlace, Venue};
pub use normalize::{normalize, normalize_ranges};
pub use range::{range_to_military, MilitaryRange, TimeWindow};
pub use schedule::{HoursSlot, Schedule, Season, SeasonHours};
pub use time::{to_military_time, MilitaryTime};
