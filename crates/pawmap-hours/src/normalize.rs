//! Raw scraped hours → one season's [`SeasonHours`].

use crate::days::{group_consecutive_days, DayRangeKey, RawDayHours};
use crate::error::Result;
use crate::range::{range_to_military, MilitaryRange};
use crate::schedule::SeasonHours;

/// Group adjacent days and normalize each group's hours text.
///
/// All or nothing: the first group whose text fails to parse fails the
/// whole call, so a venue never ends up with partial hours.
///
/// # Errors
///
/// Propagates the [`HoursError`](crate::HoursError) of the failing group.
pub fn normalize_ranges(entries: &[RawDayHours]) -> Result<Vec<(DayRangeKey, MilitaryRange)>> {
    group_consecutive_days(entries)
        .into_iter()
        .map(|group| Ok((group.key(), range_to_military(&group.hours)?)))
        .collect()
}

/// Normalize one season's scrape into [`SeasonHours`].
///
/// A week whose every day reads the same collapses to the `"Mon-Sun"` slot
/// the evaluator looks up. Empty input gives an empty value.
///
/// # Examples
///
/// ```
/// use pawmap_hours::{normalize, RawDayHours};
///
/// let week: Vec<_> = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
///     .into_iter()
///     .map(|d| RawDayHours::new(d, "12 to 11 PM"))
///     .collect();
/// let hours = normalize(&week).unwrap();
/// assert_eq!(serde_json::to_string(&hours).unwrap(), r#"{"Mon-Sun":"12:00 - 23:00"}"#);
/// ```
pub fn normalize(entries: &[RawDayHours]) -> Result<SeasonHours> {
    normalize_ranges(entries).map(SeasonHours::from_ranges)
}
