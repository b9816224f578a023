//! services/api/src/bin/api.rs
//!
//! The main server binary. Loads configuration, opens the SQLite store,
//! wires the adapters into the shared application state and serves the
//! REST API.

use api_lib::adapters::{AladhanClient, OpenAiDuaAdapter, SqliteStorage};
use api_lib::config::Config;
use api_lib::error::ApiError;
use api_lib::web::rest::ApiDoc;
use api_lib::web::state::AppState;
use async_openai::{config::OpenAIConfig, Client};
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::{extract::DefaultBodyLimit, Router};
use guidance_core::content::ContentTables;
use guidance_core::ports::{DuaCompletionService, PrayerTimingsProvider, StorageService};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Store & Run Migrations ---
    // A store that cannot be opened does not stop the server: it comes up
    // degraded, serving the computation-only endpoints.
    let storage: Option<Arc<dyn StorageService>> = match SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            let store = SqliteStorage::new(pool);
            match store.run_migrations().await {
                Ok(()) => {
                    info!("Database ready at {}", config.database_url);
                    Some(Arc::new(store))
                }
                Err(e) => {
                    warn!("Migrations failed, running degraded: {e}");
                    None
                }
            }
        }
        Err(e) => {
            warn!("Could not open the database, running degraded: {e}");
            None
        }
    };

    // --- 3. Construct the External-Service Adapters ---
    let completion: Option<Arc<dyn DuaCompletionService>> = match &config.openai_api_key {
        Some(key) => {
            let client = Client::with_config(OpenAIConfig::new().with_api_key(key.clone()));
            Some(Arc::new(OpenAiDuaAdapter::new(
                client,
                config.dua_model.clone(),
                config.upstream_timeout,
            )))
        }
        None => {
            warn!("No completion credential configured; dua recommendations are disabled");
            None
        }
    };

    let timings: Arc<dyn PrayerTimingsProvider> = Arc::new(
        AladhanClient::new(
            config.aladhan_base_url.clone(),
            config.calculation_method,
            config.upstream_timeout,
        )
        .map_err(|e| ApiError::Internal(format!("failed to build the timings client: {e}")))?,
    );

    // --- 4. Assemble the Application State ---
    let app_state = Arc::new(AppState {
        storage,
        completion,
        timings,
        content: Arc::new(ContentTables::load()),
        config: config.clone(),
    });

    // --- 5. Create the Web Router ---
    let allow_origin = match &config.cors_origin {
        Some(origin) => {
            let value = origin.parse::<HeaderValue>().map_err(|e| {
                ApiError::Internal(format!("invalid CORS origin '{origin}': {e}"))
            })?;
            AllowOrigin::exact(value)
        }
        None => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    let app = Router::new()
        .merge(
            api_lib::web::api_router(app_state)
                .layer(DefaultBodyLimit::max(1024 * 1024))
                .layer(cors),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
