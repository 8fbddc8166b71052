//! Offline venue ingestion.
//!
//! Takes scraped search-engine places, keeps the dog-friendly ones, attaches
//! normalized hours under the scraped season, and merges in previously
//! known venues from zip codes the new scrape did not cover.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::days::RawDayHours;
use crate::normalize::normalize;
use crate::schedule::{Schedule, Season};

// ── Scraped input ───────────────────────────────────────────────────────────

/// One place as produced by the scraper.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapedPlace {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub category_name: Option<String>,
    pub state: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub total_score: Option<f64>,
    pub place_id: Option<String>,
    pub location: Option<Coordinates>,
    #[serde(deserialize_with = "null_as_default")]
    pub opening_hours: Vec<RawDayHours>,
    #[serde(deserialize_with = "null_as_default")]
    pub reviews_tags: Vec<ReviewTag>,
    pub additional_info: Option<AdditionalInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub questions_and_answers: Vec<Question>,
    pub updates_from_customers: Option<CustomerUpdate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewTag {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdditionalInfo {
    /// Flag objects such as `{"Dogs allowed": true}`.
    #[serde(rename = "Pets", default, deserialize_with = "null_as_default")]
    pub pets: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CustomerUpdate {
    #[serde(default)]
    pub text: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ── Dog policy ──────────────────────────────────────────────────────────────

/// What the scraped evidence says about dogs at a place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DogPolicy {
    pub dog_friendly: bool,
    pub inside: bool,
    pub outside: bool,
    pub outdoor_only: bool,
}

const OUTDOOR_WORDS: [&str; 4] = ["out", "garden", "outside", "terrace"];

/// Decide from keywords whether a place welcomes dogs, and where.
///
/// Evidence is read in a fixed order: pets flags, review tags, Q&A,
/// customer updates, description. An explicit "inside" flag clears
/// outdoor-only, but a later Q&A answer mentioning the garden sets it
/// again. Finally, outside without inside means outdoor-only.
pub fn classify(place: &ScrapedPlace) -> DogPolicy {
    let mut policy = DogPolicy::default();
    let mentions_dog = |s: &str| s.to_lowercase().contains("dog");

    for flags in place.additional_info.iter().flat_map(|i| &i.pets) {
        let set = |key: &str| flags.get(key) == Some(&Value::Bool(true));
        if set("Dogs allowed") {
            policy.dog_friendly = true;
        }
        if set("Dogs allowed inside") {
            policy.dog_friendly = true;
            policy.inside = true;
            policy.outdoor_only = false;
        }
        if set("Dogs allowed outside") {
            policy.dog_friendly = true;
            policy.outside = true;
        }
    }

    if let Some(tag) = place.reviews_tags.iter().find(|t| mentions_dog(t.title.as_str())) {
        debug!(place = %place.title, tag = %tag.title, "dog-friendly review tag");
        policy.dog_friendly = true;
    }

    for q in &place.questions_and_answers {
        let question = q.question.to_lowercase();
        if !(question.contains("dog") || question.contains("pet")) {
            continue;
        }
        for a in &q.answers {
            let answer = a.answer.to_lowercase();
            if answer.contains("yes") {
                policy.dog_friendly = true;
            }
            if OUTDOOR_WORDS.iter().any(|w| answer.contains(w)) {
                debug!(place = %place.title, %answer, "dog-friendly outdoor answer");
                policy.dog_friendly = true;
                policy.outdoor_only = true;
            }
        }
    }

    let update = place
        .updates_from_customers
        .as_ref()
        .and_then(|u| u.text.as_deref());
    if update.is_some_and(mentions_dog) {
        debug!(place = %place.title, "dog-friendly customer update");
        policy.dog_friendly = true;
    }

    if place.description.as_deref().is_some_and(mentions_dog) {
        debug!(place = %place.title, "dog-friendly description");
        policy.dog_friendly = true;
    }

    if policy.outside && !policy.inside {
        policy.outdoor_only = true;
    }
    policy
}

// ── Venue records ───────────────────────────────────────────────────────────

/// A venue as stored in the map's dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Venue {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "OutDoorOnly", default)]
    pub outdoor_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inside: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outside: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Older records carried the region here instead of in `State`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_place_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_schedule")]
    pub hours: Schedule,
    /// Fields this crate does not interpret, kept for round-tripping.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Hours that are not an object at all read as the empty schedule.
fn lenient_schedule<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Schedule, D::Error> {
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

impl Venue {
    pub fn from_place(place: &ScrapedPlace, policy: DogPolicy, hours: Schedule) -> Self {
        let info = place
            .reviews_tags
            .iter()
            .map(|t| t.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let location = place.location.unwrap_or_default();

        Self {
            name: place.title.clone(),
            address: place.address.clone(),
            zip_code: place.postal_code.clone(),
            kind: place.category_name.clone(),
            outdoor_only: policy.outdoor_only,
            inside: policy.inside.then_some(true),
            outside: policy.outside.then_some(true),
            info: (!info.is_empty()).then_some(info),
            link: place.website.clone(),
            state: place.state.clone(),
            location: None,
            latitude: location.lat,
            longitude: location.lng,
            phone: place.phone.clone(),
            rating: place.total_score,
            google_place_id: place.place_id.clone(),
            hours,
            extra: Map::new(),
        }
    }
}

// ── Ingestion ───────────────────────────────────────────────────────────────

/// Hours for a place scraped in `season`.
///
/// Starts from the prior record's schedule so the other season carries
/// forward. A normalization failure logs and yields the empty schedule:
/// a venue gets all of its hours or none.
pub fn schedule_for(place: &ScrapedPlace, prior: Option<&Venue>, season: Season) -> Schedule {
    match normalize(&place.opening_hours) {
        Ok(hours) => {
            let mut schedule = prior.map(|v| v.hours.clone()).unwrap_or_default();
            if !hours.is_empty() {
                schedule.set_season(season, hours);
            }
            schedule
        }
        Err(e) => {
            error!(venue = %place.title, error = %e, "failed to normalize opening hours");
            Schedule::default()
        }
    }
}

/// Build the venue dataset from one scrape plus the previous dataset.
///
/// Non-dog-friendly places are dropped. Previous venues are appended when
/// no venue already in the output shares their zip code; their legacy
/// `Location` moves into `State`.
pub fn ingest(places: &[ScrapedPlace], existing: &[Venue], season: Season) -> Vec<Venue> {
    let mut venues: Vec<Venue> = Vec::new();

    for place in places {
        info!(place = %place.title, "processing scraped place");
        let policy = classify(place);
        if !policy.dog_friendly {
            continue;
        }

        let prior = place.place_id.as_ref().and_then(|id| {
            existing
                .iter()
                .find(|v| v.google_place_id.as_ref() == Some(id))
        });
        let hours = schedule_for(place, prior, season);
        venues.push(Venue::from_place(place, policy, hours));
        info!(place = %place.title, "added dog-friendly venue");
    }

    for old in existing {
        if venues.iter().any(|v| v.zip_code == old.zip_code) {
            continue;
        }
        let mut kept = old.clone();
        if let Some(region) = kept.location.take() {
            kept.state = Some(region);
        }
        info!(venue = %kept.name, zip = ?kept.zip_code, "kept existing venue");
        venues.push(kept);
    }

    info!(count = venues.len(), "dog-friendly venues");
    venues
}
