//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{dua_task, prayer_task, state::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Local, Utc};
use guidance_core::domain::{
    DailyTimings, DuaEntry, LocationRecord, NamazStep, PrayerTimingSet, Recommendation,
    StoredDua,
};
use guidance_core::ports::{PortError, StorageService};
use guidance_core::{geo, namaz, prayer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{IntoParams, OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        recommend_dua_handler,
        list_duas_handler,
        search_duas_handler,
        save_prayer_times_handler,
        cached_prayer_times_handler,
        todays_timings_handler,
        recent_locations_handler,
        add_favorite_handler,
        list_favorites_handler,
        qibla_handler,
        namaz_guide_handler,
    ),
    components(
        schemas(
            DuaRequest,
            DuaResponse,
            DuaPayload,
            StoredDuaPayload,
            DuasResponse,
            TimingsPayload,
            SavePrayerTimesRequest,
            CachedTimingsResponse,
            SuccessResponse,
            LocationPayload,
            LocationsResponse,
            FavoriteRequest,
            QiblaResponse,
            NamazStepPayload,
            NamazGuideResponse,
        )
    ),
    tags(
        (name = "Islamic Guidance API", description = "Qibla direction, prayer times, namaz guides and dua recommendations.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// A dua as surfaced to clients.
#[derive(Serialize, ToSchema)]
pub struct DuaPayload {
    pub title: String,
    pub category: String,
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    pub meaning: String,
    pub keywords: Vec<String>,
    pub source: String,
}

impl From<&DuaEntry> for DuaPayload {
    fn from(entry: &DuaEntry) -> Self {
        Self {
            title: entry.title.clone(),
            category: entry.category.clone(),
            arabic: entry.arabic.clone(),
            transliteration: entry.transliteration.clone(),
            translation: entry.translation.clone(),
            meaning: entry.meaning.clone(),
            keywords: entry.keywords.clone(),
            source: entry.source.as_str().to_string(),
        }
    }
}

/// A persisted dua, with its row id and creation time.
#[derive(Serialize, ToSchema)]
pub struct StoredDuaPayload {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
    pub meaning: String,
    pub keywords: Vec<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl From<StoredDua> for StoredDuaPayload {
    fn from(stored: StoredDua) -> Self {
        Self {
            id: stored.id,
            title: stored.entry.title,
            category: stored.entry.category,
            arabic: stored.entry.arabic,
            transliteration: stored.entry.transliteration,
            translation: stored.entry.translation,
            meaning: stored.entry.meaning,
            keywords: stored.entry.keywords,
            source: stored.entry.source.as_str().to_string(),
            created_at: stored.created_at,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct DuaRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Serialize, ToSchema)]
pub struct DuaResponse {
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dua: Option<DuaPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct DuasResponse {
    pub duas: Vec<StoredDuaPayload>,
}

/// The five timings in the provider's JSON shape.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct TimingsPayload {
    pub fajr: String,
    pub dhuhr: String,
    pub asr: String,
    pub maghrib: String,
    pub isha: String,
}

impl From<DailyTimings> for TimingsPayload {
    fn from(t: DailyTimings) -> Self {
        Self {
            fajr: t.fajr,
            dhuhr: t.dhuhr,
            asr: t.asr,
            maghrib: t.maghrib,
            isha: t.isha,
        }
    }
}

impl From<TimingsPayload> for DailyTimings {
    fn from(t: TimingsPayload) -> Self {
        Self {
            fajr: t.fajr,
            dhuhr: t.dhuhr,
            asr: t.asr,
            maghrib: t.maghrib,
            isha: t.isha,
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct SavePrayerTimesRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timings: Option<TimingsPayload>,
}

#[derive(Serialize, ToSchema)]
pub struct CachedTimingsResponse {
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timings: Option<TimingsPayload>,
    /// Human-readable next-prayer summary, when a cached timing parses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Serialize, ToSchema)]
pub struct LocationPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub country_name: Option<String>,
    pub last_used: DateTime<Utc>,
    pub usage_count: i64,
}

impl From<LocationRecord> for LocationPayload {
    fn from(record: LocationRecord) -> Self {
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            country_name: record.country_name,
            last_used: record.last_used,
            usage_count: record.usage_count,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LocationsResponse {
    pub locations: Vec<LocationPayload>,
}

#[derive(Deserialize, ToSchema)]
pub struct FavoriteRequest {
    #[serde(rename = "duaId")]
    pub dua_id: Option<i64>,
    #[serde(rename = "userIdentifier")]
    pub user_identifier: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct QiblaResponse {
    /// Degrees clockwise from true north, in [0, 360).
    pub bearing: f64,
    pub distance_km: f64,
}

#[derive(Serialize, ToSchema)]
pub struct NamazStepPayload {
    pub title: String,
    pub text: String,
}

impl From<NamazStep> for NamazStepPayload {
    fn from(step: NamazStep) -> Self {
        Self {
            title: step.title,
            text: step.text,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct NamazGuideResponse {
    pub prayer: String,
    pub steps: Vec<NamazStepPayload>,
}

#[derive(Deserialize, IntoParams)]
pub struct CoordParams {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Deserialize, IntoParams)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct FavoriteParams {
    pub user: Option<String>,
}

//=========================================================================================
// Handler Helpers
//=========================================================================================

type HandlerError = (StatusCode, String);

/// Storage-backed endpoints are unavailable in degraded mode.
fn require_storage(state: &AppState) -> Result<Arc<dyn StorageService>, HandlerError> {
    state.storage.clone().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "Persistent storage is unavailable".to_string(),
    ))
}

fn require_coords(params: &CoordParams) -> Result<(f64, f64), HandlerError> {
    match (params.latitude, params.longitude) {
        (Some(lat), Some(lon)) => Ok((lat, lon)),
        _ => Err((
            StatusCode::BAD_REQUEST,
            "Latitude and longitude are required".to_string(),
        )),
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Recommend a dua for a free-text need.
#[utoipa::path(
    post,
    path = "/api/dua",
    request_body = DuaRequest,
    responses(
        (status = 200, description = "A recommendation was produced", body = DuaResponse),
        (status = 400, description = "Empty query"),
        (status = 500, description = "Completion service not configured")
    )
)]
pub async fn recommend_dua_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DuaRequest>,
) -> Result<Json<DuaResponse>, HandlerError> {
    let query = request.query.trim().to_string();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query is required".to_string()));
    }

    let completion = state.completion.clone().ok_or((
        StatusCode::INTERNAL_SERVER_ERROR,
        "Completion service is not configured".to_string(),
    ))?;

    let recommendation = dua_task::recommend_dua(
        &state.content,
        completion.as_ref(),
        state.storage.as_ref(),
        &query,
    )
    .await;

    let response = match recommendation {
        Recommendation::Excerpt(entry)
        | Recommendation::Local(entry)
        | Recommendation::Generic(entry) => DuaResponse {
            fallback: false,
            dua: Some(DuaPayload::from(&entry)),
            id: None,
            message: None,
        },
        Recommendation::Ai { entry, id } => DuaResponse {
            fallback: false,
            dua: Some(DuaPayload::from(&entry)),
            id,
            message: None,
        },
        Recommendation::AiText(message) => DuaResponse {
            fallback: true,
            dua: None,
            id: None,
            message: Some(message),
        },
    };
    Ok(Json(response))
}

/// List all stored duas, most recent first.
#[utoipa::path(
    get,
    path = "/api/duas",
    responses(
        (status = 200, description = "All stored duas", body = DuasResponse),
        (status = 503, description = "Storage unavailable")
    )
)]
pub async fn list_duas_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DuasResponse>, HandlerError> {
    let storage = require_storage(&state)?;
    let duas = storage.list_duas().await.map_err(|e| {
        error!("Failed to fetch duas: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch duas".to_string(),
        )
    })?;
    Ok(Json(DuasResponse {
        duas: duas.into_iter().map(StoredDuaPayload::from).collect(),
    }))
}

/// Search stored duas by a case-insensitive substring.
#[utoipa::path(
    get,
    path = "/api/duas/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching duas", body = DuasResponse),
        (status = 400, description = "Missing search keyword")
    )
)]
pub async fn search_duas_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<DuasResponse>, HandlerError> {
    let term = params.q.unwrap_or_default();
    if term.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Search keyword is required".to_string(),
        ));
    }
    let storage = require_storage(&state)?;
    let duas = storage.search_duas(&term).await.map_err(|e| {
        error!("Dua search failed: {e}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Search failed".to_string())
    })?;
    Ok(Json(DuasResponse {
        duas: duas.into_iter().map(StoredDuaPayload::from).collect(),
    }))
}

/// Persist client-fetched prayer times for today, recording location usage.
#[utoipa::path(
    post,
    path = "/api/prayer-times",
    request_body = SavePrayerTimesRequest,
    responses(
        (status = 200, description = "Saved", body = SuccessResponse),
        (status = 400, description = "Missing field")
    )
)]
pub async fn save_prayer_times_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SavePrayerTimesRequest>,
) -> Result<Json<SuccessResponse>, HandlerError> {
    let (Some(latitude), Some(longitude), Some(timings)) =
        (request.latitude, request.longitude, request.timings)
    else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Latitude, longitude, and timings are required".to_string(),
        ));
    };

    let storage = require_storage(&state)?;
    let set = PrayerTimingSet {
        latitude,
        longitude,
        date: Utc::now().date_naive(),
        timings: timings.into(),
    };
    storage.upsert_prayer_times(&set).await.map_err(|e| {
        error!("Failed to save prayer times: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to save prayer times".to_string(),
        )
    })?;

    // Usage recording is best-effort, like the request log.
    if let Err(e) = storage.record_location_use(latitude, longitude, None).await {
        error!("Failed to record location use: {e}");
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// Look up today's cached prayer times for a location.
#[utoipa::path(
    get,
    path = "/api/prayer-times",
    params(CoordParams),
    responses(
        (status = 200, description = "Cache lookup result", body = CachedTimingsResponse),
        (status = 400, description = "Missing coordinates")
    )
)]
pub async fn cached_prayer_times_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoordParams>,
) -> Result<Json<CachedTimingsResponse>, HandlerError> {
    let (latitude, longitude) = require_coords(&params)?;
    let storage = require_storage(&state)?;

    let cached = storage
        .cached_prayer_times(latitude, longitude, Utc::now().date_naive())
        .await
        .map_err(|e| {
            error!("Failed to get cached prayer times: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get cached prayer times".to_string(),
            )
        })?;

    let response = match cached {
        Some(timings) => {
            let next = prayer::next_prayer(&timings, Local::now().time()).describe();
            CachedTimingsResponse {
                cached: true,
                timings: Some(timings.into()),
                next: Some(next),
            }
        }
        None => CachedTimingsResponse {
            cached: false,
            timings: None,
            next: None,
        },
    };
    Ok(Json(response))
}

/// Today's timings with a read-through fetch from the external provider on
/// a cache miss.
#[utoipa::path(
    get,
    path = "/api/prayer-times/today",
    params(CoordParams),
    responses(
        (status = 200, description = "Timings for today", body = CachedTimingsResponse),
        (status = 400, description = "Missing coordinates"),
        (status = 502, description = "Timings provider unavailable")
    )
)]
pub async fn todays_timings_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoordParams>,
) -> Result<Json<CachedTimingsResponse>, HandlerError> {
    let (latitude, longitude) = require_coords(&params)?;
    let storage = require_storage(&state)?;

    let (timings, cached) = prayer_task::get_or_fetch_timings(
        &storage,
        &state.timings,
        latitude,
        longitude,
        Utc::now().date_naive(),
    )
    .await
    .map_err(|e| match e {
        PortError::Unavailable(reason) => {
            error!("Timings provider unavailable: {reason}");
            (
                StatusCode::BAD_GATEWAY,
                "Failed to fetch prayer times".to_string(),
            )
        }
        other => {
            error!("Failed to resolve prayer times: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to resolve prayer times".to_string(),
            )
        }
    })?;

    let next = prayer::next_prayer(&timings, Local::now().time()).describe();
    Ok(Json(CachedTimingsResponse {
        cached,
        timings: Some(timings.into()),
        next: Some(next),
    }))
}

/// The ten most recently used locations.
#[utoipa::path(
    get,
    path = "/api/locations/recent",
    responses(
        (status = 200, description = "Recent locations", body = LocationsResponse)
    )
)]
pub async fn recent_locations_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LocationsResponse>, HandlerError> {
    let storage = require_storage(&state)?;
    let locations = storage.recent_locations(10).await.map_err(|e| {
        error!("Failed to get recent locations: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to get recent locations".to_string(),
        )
    })?;
    Ok(Json(LocationsResponse {
        locations: locations.into_iter().map(LocationPayload::from).collect(),
    }))
}

/// Mark a dua as a favorite. Duplicate marks are allowed.
#[utoipa::path(
    post,
    path = "/api/duas/favorite",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Favorite recorded", body = SuccessResponse),
        (status = 400, description = "Missing dua id")
    )
)]
pub async fn add_favorite_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FavoriteRequest>,
) -> Result<Json<SuccessResponse>, HandlerError> {
    let Some(dua_id) = request.dua_id else {
        return Err((StatusCode::BAD_REQUEST, "Dua ID is required".to_string()));
    };
    let user = request
        .user_identifier
        .unwrap_or_else(|| "default".to_string());

    let storage = require_storage(&state)?;
    storage.add_favorite(dua_id, &user).await.map_err(|e| {
        error!("Failed to add favorite: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to add favorite".to_string(),
        )
    })?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Duas favorited by a user identifier.
#[utoipa::path(
    get,
    path = "/api/duas/favorite",
    params(FavoriteParams),
    responses(
        (status = 200, description = "Favorited duas", body = DuasResponse)
    )
)]
pub async fn list_favorites_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FavoriteParams>,
) -> Result<Json<DuasResponse>, HandlerError> {
    let user = params.user.unwrap_or_else(|| "default".to_string());
    let storage = require_storage(&state)?;
    let duas = storage.favorites_for_user(&user).await.map_err(|e| {
        error!("Failed to get favorite duas: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to get favorite duas".to_string(),
        )
    })?;
    Ok(Json(DuasResponse {
        duas: duas.into_iter().map(StoredDuaPayload::from).collect(),
    }))
}

/// Qibla bearing and distance to the Kaaba from a location.
#[utoipa::path(
    get,
    path = "/api/qibla",
    params(CoordParams),
    responses(
        (status = 200, description = "Bearing and distance", body = QiblaResponse),
        (status = 400, description = "Missing coordinates")
    )
)]
pub async fn qibla_handler(
    Query(params): Query<CoordParams>,
) -> Result<Json<QiblaResponse>, HandlerError> {
    let (latitude, longitude) = require_coords(&params)?;
    Ok(Json(QiblaResponse {
        bearing: geo::qibla_bearing(latitude, longitude),
        distance_km: geo::distance_to_kaaba_km(latitude, longitude),
    }))
}

/// The step-by-step guide for one daily prayer.
#[utoipa::path(
    get,
    path = "/api/namaz/{prayer}",
    params(
        ("prayer" = String, Path, description = "fajr, dhuhr, asr, maghrib or isha")
    ),
    responses(
        (status = 200, description = "Guide steps", body = NamazGuideResponse),
        (status = 404, description = "Unknown prayer")
    )
)]
pub async fn namaz_guide_handler(
    Path(prayer): Path<String>,
) -> Result<Json<NamazGuideResponse>, HandlerError> {
    let key = prayer.to_lowercase();
    let steps = namaz::namaz_guide(&key).ok_or((
        StatusCode::NOT_FOUND,
        format!("Unknown prayer '{prayer}'"),
    ))?;
    Ok(Json(NamazGuideResponse {
        prayer: key,
        steps: steps.into_iter().map(NamazStepPayload::from).collect(),
    }))
}
