//! crates/guidance_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing
//! the core to be independent of specific external implementations like the
//! database, the completion service, or the timings provider.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    DailyTimings, DuaEntry, LocationRecord, PrayerTimingSet, StoredDua,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services
/// (database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Upstream service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait StorageService: Send + Sync {
    // --- Dua entries ---
    async fn insert_dua(&self, entry: &DuaEntry) -> PortResult<StoredDua>;

    /// All stored entries, most recent first.
    async fn list_duas(&self) -> PortResult<Vec<StoredDua>>;

    /// Case-insensitive substring filter across title, category, keyword
    /// blob and translation, most recent first.
    async fn search_duas(&self, term: &str) -> PortResult<Vec<StoredDua>>;

    // --- Request log (append-only) ---
    async fn log_dua_request(
        &self,
        query: &str,
        response_title: Option<&str>,
        response_category: Option<&str>,
        ai_generated: bool,
    ) -> PortResult<()>;

    // --- Prayer-time cache ---
    /// Atomic upsert keyed on (latitude, longitude, date); latest write wins.
    async fn upsert_prayer_times(&self, set: &PrayerTimingSet) -> PortResult<()>;

    async fn cached_prayer_times(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> PortResult<Option<DailyTimings>>;

    // --- Location usage log ---
    /// Atomic insert-or-increment keyed on (latitude, longitude); never a
    /// separate read-then-write.
    async fn record_location_use(
        &self,
        latitude: f64,
        longitude: f64,
        country_name: Option<&str>,
    ) -> PortResult<()>;

    async fn recent_locations(&self, limit: i64) -> PortResult<Vec<LocationRecord>>;

    // --- Favorites (append-only, duplicates allowed) ---
    async fn add_favorite(&self, dua_id: i64, user_identifier: &str) -> PortResult<()>;

    async fn favorites_for_user(&self, user_identifier: &str) -> PortResult<Vec<StoredDua>>;
}

/// The reply from the external completion service: either a fully parsed
/// entry or whatever free text it produced instead.
#[derive(Debug, Clone)]
pub enum CompletionReply {
    Structured(DuaEntry),
    Unstructured(String),
}

#[async_trait]
pub trait DuaCompletionService: Send + Sync {
    /// Asks the external generative service for a dua matching the free-text
    /// query.
    async fn complete_dua(&self, query: &str) -> PortResult<CompletionReply>;
}

#[async_trait]
pub trait PrayerTimingsProvider: Send + Sync {
    /// Fetches the five daily timings for a location and date from the
    /// external provider.
    async fn fetch_timings(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> PortResult<DailyTimings>;
}
