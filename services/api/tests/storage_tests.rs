//! Integration tests for the SQLite storage adapter, run against an
//! in-memory database with the real migrations applied.

use api_lib::adapters::SqliteStorage;
use chrono::NaiveDate;
use guidance_core::domain::{DailyTimings, DuaEntry, DuaSource, PrayerTimingSet};
use guidance_core::ports::StorageService;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

// A single connection keeps every query on the same in-memory database.
async fn setup() -> (SqliteStorage, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    let storage = SqliteStorage::new(pool.clone());
    storage.run_migrations().await.expect("migrations");
    (storage, pool)
}

fn entry(title: &str, keywords: &[&str]) -> DuaEntry {
    DuaEntry {
        title: title.to_string(),
        category: "Test".to_string(),
        arabic: "دعاء".to_string(),
        transliteration: "dua".to_string(),
        translation: "a supplication".to_string(),
        meaning: "for testing".to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        source: DuaSource::Ai,
    }
}

fn timings(fajr: &str) -> DailyTimings {
    DailyTimings {
        fajr: fajr.to_string(),
        dhuhr: "12:01".to_string(),
        asr: "15:20".to_string(),
        maghrib: "18:05".to_string(),
        isha: "19:30".to_string(),
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[tokio::test]
async fn insert_and_list_round_trips_including_keywords() {
    let (storage, _pool) = setup().await;

    let first = storage.insert_dua(&entry("First", &["calm", "peace"])).await.unwrap();
    let second = storage.insert_dua(&entry("Second", &[])).await.unwrap();
    assert!(second.id > first.id);

    let duas = storage.list_duas().await.unwrap();
    assert_eq!(duas.len(), 2);
    // Most recent first.
    assert_eq!(duas[0].entry.title, "Second");
    assert_eq!(duas[1].entry.title, "First");
    assert_eq!(duas[1].entry.keywords, vec!["calm", "peace"]);
    assert_eq!(duas[1].entry.source, DuaSource::Ai);
}

#[tokio::test]
async fn search_matches_case_insensitively_across_columns() {
    let (storage, _pool) = setup().await;
    storage
        .insert_dua(&entry("For Rain", &["rain", "drought"]))
        .await
        .unwrap();
    storage.insert_dua(&entry("For Travel", &["journey"])).await.unwrap();

    let by_title = storage.search_duas("RAIN").await.unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].entry.title, "For Rain");

    let by_keyword = storage.search_duas("journey").await.unwrap();
    assert_eq!(by_keyword.len(), 1);
    assert_eq!(by_keyword[0].entry.title, "For Travel");

    assert!(storage.search_duas("nonexistent").await.unwrap().is_empty());
}

#[tokio::test]
async fn prayer_times_upsert_keeps_one_row_per_key() {
    let (storage, pool) = setup().await;
    let set = PrayerTimingSet {
        latitude: 23.685,
        longitude: 90.3563,
        date: date(),
        timings: timings("05:12"),
    };
    storage.upsert_prayer_times(&set).await.unwrap();

    let replacement = PrayerTimingSet {
        timings: timings("05:14"),
        ..set.clone()
    };
    storage.upsert_prayer_times(&replacement).await.unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prayer_times")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let cached = storage
        .cached_prayer_times(23.685, 90.3563, date())
        .await
        .unwrap()
        .expect("cached row");
    assert_eq!(cached.fajr, "05:14");
}

#[tokio::test]
async fn cache_lookup_misses_on_a_different_date() {
    let (storage, _pool) = setup().await;
    let set = PrayerTimingSet {
        latitude: 1.0,
        longitude: 2.0,
        date: date(),
        timings: timings("05:12"),
    };
    storage.upsert_prayer_times(&set).await.unwrap();

    let next_day = date().succ_opt().unwrap();
    assert!(storage
        .cached_prayer_times(1.0, 2.0, next_day)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn repeat_location_use_increments_a_single_row() {
    let (storage, pool) = setup().await;
    storage
        .record_location_use(23.685, 90.3563, Some("Bangladesh"))
        .await
        .unwrap();
    storage.record_location_use(23.685, 90.3563, None).await.unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_locations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let recent = storage.recent_locations(10).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].usage_count, 2);
    // A later write with no country keeps the earlier name.
    assert_eq!(recent[0].country_name.as_deref(), Some("Bangladesh"));
}

#[tokio::test]
async fn recent_locations_honors_the_limit() {
    let (storage, _pool) = setup().await;
    for i in 0..4 {
        storage
            .record_location_use(10.0 + f64::from(i), 20.0, None)
            .await
            .unwrap();
    }
    assert_eq!(storage.recent_locations(2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn favorites_are_duplicate_tolerant() {
    let (storage, _pool) = setup().await;
    let stored = storage.insert_dua(&entry("For Rain", &[])).await.unwrap();

    storage.add_favorite(stored.id, "user-a").await.unwrap();
    storage.add_favorite(stored.id, "user-a").await.unwrap();
    storage.add_favorite(stored.id, "user-b").await.unwrap();

    let favorites = storage.favorites_for_user("user-a").await.unwrap();
    assert_eq!(favorites.len(), 2);
    assert!(favorites.iter().all(|d| d.entry.title == "For Rain"));

    assert_eq!(storage.favorites_for_user("user-b").await.unwrap().len(), 1);
    assert!(storage.favorites_for_user("user-c").await.unwrap().is_empty());
}

#[tokio::test]
async fn request_log_rows_are_appended() {
    let (storage, pool) = setup().await;
    storage
        .log_dua_request("i have a headache", Some("For Pain or Headache"), Some("Health"), false)
        .await
        .unwrap();
    storage
        .log_dua_request("dua for rain", None, None, true)
        .await
        .unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM dua_requests")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 2);

    let ai_flag: bool =
        sqlx::query_scalar("SELECT is_ai_generated FROM dua_requests WHERE query = 'dua for rain'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(ai_flag);
}
