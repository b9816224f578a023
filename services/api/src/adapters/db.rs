//! services/api/src/adapters/db.rs
//!
//! The storage adapter: the concrete implementation of the `StorageService`
//! port over SQLite using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use guidance_core::domain::{
    DailyTimings, DuaEntry, DuaSource, LocationRecord, PrayerTimingSet, StoredDua,
};
use guidance_core::ports::{PortError, PortResult, StorageService};
use sqlx::{FromRow, SqlitePool};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `StorageService` port.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Creates a new `SqliteStorage`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Runs the embedded migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct DuaRecord {
    id: i64,
    title: String,
    category: String,
    arabic: String,
    transliteration: String,
    translation: String,
    meaning: String,
    keywords: String,
    source: String,
    created_at: DateTime<Utc>,
}

impl DuaRecord {
    fn to_domain(self) -> StoredDua {
        StoredDua {
            id: self.id,
            entry: DuaEntry {
                title: self.title,
                category: self.category,
                arabic: self.arabic,
                transliteration: self.transliteration,
                translation: self.translation,
                meaning: self.meaning,
                keywords: split_keywords(&self.keywords),
                source: DuaSource::from_code(&self.source),
            },
            created_at: self.created_at,
        }
    }
}

#[derive(FromRow)]
struct PrayerTimesRecord {
    fajr: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

impl PrayerTimesRecord {
    fn to_domain(self) -> DailyTimings {
        DailyTimings {
            fajr: self.fajr,
            dhuhr: self.dhuhr,
            asr: self.asr,
            maghrib: self.maghrib,
            isha: self.isha,
        }
    }
}

#[derive(FromRow)]
struct LocationRow {
    latitude: f64,
    longitude: f64,
    country_name: Option<String>,
    last_used: DateTime<Utc>,
    usage_count: i64,
}

impl LocationRow {
    fn to_domain(self) -> LocationRecord {
        LocationRecord {
            latitude: self.latitude,
            longitude: self.longitude,
            country_name: self.country_name,
            last_used: self.last_used,
            usage_count: self.usage_count,
        }
    }
}

/// Keywords are stored as a comma-joined blob, matching the searchable
/// column shape.
fn join_keywords(keywords: &[String]) -> String {
    keywords.join(",")
}

fn split_keywords(blob: &str) -> Vec<String> {
    blob.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

const SELECT_DUA: &str = "SELECT id, title, category, arabic, transliteration, translation, \
                          meaning, keywords, source, created_at FROM duas";

//=========================================================================================
// `StorageService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StorageService for SqliteStorage {
    async fn insert_dua(&self, entry: &DuaEntry) -> PortResult<StoredDua> {
        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO duas (title, category, arabic, transliteration, translation, meaning, keywords, source, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.title)
        .bind(&entry.category)
        .bind(&entry.arabic)
        .bind(&entry.transliteration)
        .bind(&entry.translation)
        .bind(&entry.meaning)
        .bind(join_keywords(&entry.keywords))
        .bind(entry.source.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(StoredDua {
            id: result.last_insert_rowid(),
            entry: entry.clone(),
            created_at,
        })
    }

    async fn list_duas(&self) -> PortResult<Vec<StoredDua>> {
        let records = sqlx::query_as::<_, DuaRecord>(&format!(
            "{SELECT_DUA} ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(DuaRecord::to_domain).collect())
    }

    async fn search_duas(&self, term: &str) -> PortResult<Vec<StoredDua>> {
        // SQLite LIKE is case-insensitive for ASCII.
        let pattern = format!("%{term}%");
        let records = sqlx::query_as::<_, DuaRecord>(&format!(
            "{SELECT_DUA} WHERE title LIKE ? OR category LIKE ? OR keywords LIKE ? OR translation LIKE ? \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(DuaRecord::to_domain).collect())
    }

    async fn log_dua_request(
        &self,
        query: &str,
        response_title: Option<&str>,
        response_category: Option<&str>,
        ai_generated: bool,
    ) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO dua_requests (query, response_title, response_category, is_ai_generated, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(query)
        .bind(response_title)
        .bind(response_category)
        .bind(ai_generated)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn upsert_prayer_times(&self, set: &PrayerTimingSet) -> PortResult<()> {
        // Single atomic statement; latest write for a key wins.
        sqlx::query(
            "INSERT INTO prayer_times (latitude, longitude, date, fajr, dhuhr, asr, maghrib, isha, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (latitude, longitude, date) DO UPDATE SET \
                 fajr = excluded.fajr, \
                 dhuhr = excluded.dhuhr, \
                 asr = excluded.asr, \
                 maghrib = excluded.maghrib, \
                 isha = excluded.isha, \
                 created_at = excluded.created_at",
        )
        .bind(set.latitude)
        .bind(set.longitude)
        .bind(set.date)
        .bind(&set.timings.fajr)
        .bind(&set.timings.dhuhr)
        .bind(&set.timings.asr)
        .bind(&set.timings.maghrib)
        .bind(&set.timings.isha)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn cached_prayer_times(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> PortResult<Option<DailyTimings>> {
        let record = sqlx::query_as::<_, PrayerTimesRecord>(
            "SELECT fajr, dhuhr, asr, maghrib, isha FROM prayer_times \
             WHERE latitude = ? AND longitude = ? AND date = ?",
        )
        .bind(latitude)
        .bind(longitude)
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(record.map(PrayerTimesRecord::to_domain))
    }

    async fn record_location_use(
        &self,
        latitude: f64,
        longitude: f64,
        country_name: Option<&str>,
    ) -> PortResult<()> {
        // Atomic insert-or-increment; never a separate existence check.
        sqlx::query(
            "INSERT INTO user_locations (latitude, longitude, country_name, last_used, usage_count) \
             VALUES (?, ?, ?, ?, 1) \
             ON CONFLICT (latitude, longitude) DO UPDATE SET \
                 last_used = excluded.last_used, \
                 usage_count = usage_count + 1, \
                 country_name = COALESCE(excluded.country_name, country_name)",
        )
        .bind(latitude)
        .bind(longitude)
        .bind(country_name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn recent_locations(&self, limit: i64) -> PortResult<Vec<LocationRecord>> {
        let rows = sqlx::query_as::<_, LocationRow>(
            "SELECT latitude, longitude, country_name, last_used, usage_count \
             FROM user_locations ORDER BY last_used DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(rows.into_iter().map(LocationRow::to_domain).collect())
    }

    async fn add_favorite(&self, dua_id: i64, user_identifier: &str) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO favorite_duas (dua_id, user_identifier, created_at) VALUES (?, ?, ?)",
        )
        .bind(dua_id)
        .bind(user_identifier)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn favorites_for_user(&self, user_identifier: &str) -> PortResult<Vec<StoredDua>> {
        let records = sqlx::query_as::<_, DuaRecord>(
            "SELECT d.id, d.title, d.category, d.arabic, d.transliteration, d.translation, \
                    d.meaning, d.keywords, d.source, d.created_at \
             FROM duas d \
             INNER JOIN favorite_duas f ON d.id = f.dua_id \
             WHERE f.user_identifier = ? \
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .bind(user_identifier)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(DuaRecord::to_domain).collect())
    }
}
