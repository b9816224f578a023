//! services/api/src/web/prayer_task.rs
//!
//! The read-through prayer-time cache: storage lookup keyed on
//! (latitude, longitude, date), with a pass-through fetch to the external
//! timings provider on miss.

use chrono::NaiveDate;
use guidance_core::domain::{DailyTimings, PrayerTimingSet};
use guidance_core::ports::{PortResult, PrayerTimingsProvider, StorageService};
use std::sync::Arc;
use tracing::warn;

/// Returns the timings for a location and day, and whether they came from
/// the cache.
///
/// On a hit the stored value is returned unchanged, with no external call.
/// On a miss the provider is invoked; a provider failure surfaces as an
/// error and nothing is written. A failed upsert after a successful fetch
/// is logged but does not block the answer.
pub async fn get_or_fetch_timings(
    storage: &Arc<dyn StorageService>,
    provider: &Arc<dyn PrayerTimingsProvider>,
    latitude: f64,
    longitude: f64,
    date: NaiveDate,
) -> PortResult<(DailyTimings, bool)> {
    if let Some(cached) = storage.cached_prayer_times(latitude, longitude, date).await? {
        return Ok((cached, true));
    }

    let timings = provider.fetch_timings(latitude, longitude, date).await?;

    let set = PrayerTimingSet {
        latitude,
        longitude,
        date,
        timings: timings.clone(),
    };
    if let Err(e) = storage.upsert_prayer_times(&set).await {
        warn!("failed to cache prayer times: {e}");
    }
    if let Err(e) = storage.record_location_use(latitude, longitude, None).await {
        warn!("failed to record location use: {e}");
    }

    Ok((timings, false))
}
