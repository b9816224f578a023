//! services/api/src/web/state.rs
//!
//! Defines the application's shared state: the explicitly constructed
//! service context passed into every handler. There are no ambient
//! singletons; the storage handle, the external-service clients and the
//! loaded content tables all live here.

use crate::config::Config;
use guidance_core::content::ContentTables;
use guidance_core::ports::{DuaCompletionService, PrayerTimingsProvider, StorageService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all
/// handlers.
#[derive(Clone)]
pub struct AppState {
    /// `None` when the persistent store could not be opened at startup; the
    /// service then runs degraded and serves computation-only endpoints.
    pub storage: Option<Arc<dyn StorageService>>,
    /// `None` when no completion credential is configured.
    pub completion: Option<Arc<dyn DuaCompletionService>>,
    pub timings: Arc<dyn PrayerTimingsProvider>,
    pub content: Arc<ContentTables>,
    pub config: Arc<Config>,
}
