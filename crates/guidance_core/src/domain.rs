//! crates/guidance_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveDate, Utc};

/// Where a dua entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuaSource {
    Predefined,
    Ai,
    User,
}

impl DuaSource {
    /// The string code stored in the database (`source` column).
    pub fn as_str(&self) -> &'static str {
        match self {
            DuaSource::Predefined => "predefined",
            DuaSource::Ai => "ai",
            DuaSource::User => "user",
        }
    }

    /// Parses a stored code; unknown codes fall back to `User`, matching
    /// the column default.
    pub fn from_code(code: &str) -> Self {
        match code {
            "predefined" => DuaSource::Predefined,
            "ai" => DuaSource::Ai,
            _ => DuaSource::User,
        }
    }
}

/// A supplication with its Arabic text, transliteration, translation and
/// trigger keywords. Immutable once created; AI-sourced entries are only
/// ever appended to storage.
#[derive(Debug, Clone)]
pub struct DuaEntry {
    pub title: String,
    pub category: String,
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    pub meaning: String,
    pub keywords: Vec<String>,
    pub source: DuaSource,
}

/// A dua entry that has been persisted, together with its row id.
#[derive(Debug, Clone)]
pub struct StoredDua {
    pub id: i64,
    pub entry: DuaEntry,
    pub created_at: DateTime<Utc>,
}

/// One of the five fixed Quranic excerpts checked before any dua matching.
#[derive(Debug, Clone)]
pub struct SurahExcerpt {
    pub name: String,
    pub number: u32,
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    pub meaning: String,
    pub keywords: Vec<String>,
}

/// The five daily prayer times as "HH:MM" strings, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTimings {
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl DailyTimings {
    /// The timings paired with their prayer names, in fixed daily order.
    pub fn ordered(&self) -> [(&'static str, &str); 5] {
        [
            ("Fajr", self.fajr.as_str()),
            ("Dhuhr", self.dhuhr.as_str()),
            ("Asr", self.asr.as_str()),
            ("Maghrib", self.maghrib.as_str()),
            ("Isha", self.isha.as_str()),
        ]
    }
}

/// Cached prayer times for one location and day.
/// Uniquely identified by (latitude, longitude, date); latest write wins.
#[derive(Debug, Clone)]
pub struct PrayerTimingSet {
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    pub timings: DailyTimings,
}

/// A recently used location; acts as an MRU/MFU log, not a foreign key
/// target.
#[derive(Debug, Clone)]
pub struct LocationRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub country_name: Option<String>,
    pub last_used: DateTime<Utc>,
    pub usage_count: i64,
}

/// A single step in a namaz guide.
#[derive(Debug, Clone)]
pub struct NamazStep {
    pub title: String,
    pub text: String,
}

/// The outcome of one pass through the dua-recommendation pipeline.
/// Each stage's exhaustion is a visible transition rather than a swallowed
/// error.
#[derive(Debug, Clone)]
pub enum Recommendation {
    /// Stage 1: the query named one of the fixed Quranic excerpts.
    Excerpt(DuaEntry),
    /// Stage 2: the external completion service returned a usable entry,
    /// persisted under `id` when storage accepted the write.
    Ai { entry: DuaEntry, id: Option<i64> },
    /// Stage 3: the completion stage failed and a curated entry matched.
    Local(DuaEntry),
    /// Stage 4a: nothing matched, but the completion service produced
    /// free text worth relaying.
    AiText(String),
    /// Stage 4b: nothing matched anywhere; the fixed default entry.
    Generic(DuaEntry),
}
