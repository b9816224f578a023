pub mod dua_task;
pub mod prayer_task;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;

/// Builds the API router. Shared by the server binary and the endpoint
/// tests so both exercise the same routes.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/dua", post(rest::recommend_dua_handler))
        .route("/api/duas", get(rest::list_duas_handler))
        .route("/api/duas/search", get(rest::search_duas_handler))
        .route(
            "/api/duas/favorite",
            post(rest::add_favorite_handler).get(rest::list_favorites_handler),
        )
        .route(
            "/api/prayer-times",
            post(rest::save_prayer_times_handler).get(rest::cached_prayer_times_handler),
        )
        .route("/api/prayer-times/today", get(rest::todays_timings_handler))
        .route("/api/locations/recent", get(rest::recent_locations_handler))
        .route("/api/qibla", get(rest::qibla_handler))
        .route("/api/namaz/{prayer}", get(rest::namaz_guide_handler))
        .with_state(state)
}
