//! services/api/src/web/dua_task.rs
//!
//! The dua-recommendation pipeline: a single pass through strictly ordered
//! stages, short-circuiting on the first success.
//!
//! 1. exact excerpt lookup over the fixed surah table;
//! 2. one external completion call;
//! 3. local keyword match over the curated table when the completion stage
//!    failed or returned an unusable reply;
//! 4. the completion's free text, or the fixed generic entry.
//!
//! Every invocation records exactly one request-log row, best-effort: a
//! persistence failure is logged and never blocks the response.

use guidance_core::content::ContentTables;
use guidance_core::domain::{DuaEntry, DuaSource, Recommendation};
use guidance_core::matcher::best_match;
use guidance_core::ports::{CompletionReply, DuaCompletionService, StorageService};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the pipeline for a non-empty query. Input validation happens at the
/// handler; by the time we are here the query is trimmed and non-empty.
pub async fn recommend_dua(
    content: &ContentTables,
    completion: &dyn DuaCompletionService,
    storage: Option<&Arc<dyn StorageService>>,
    query: &str,
) -> Recommendation {
    // Stage 1: exact excerpt reference.
    if let Some(excerpt) = best_match(&content.excerpts, query) {
        let entry = DuaEntry {
            title: excerpt.name.clone(),
            category: "Surah Reference".to_string(),
            arabic: excerpt.arabic.clone(),
            transliteration: excerpt.transliteration.clone(),
            translation: excerpt.translation.clone(),
            meaning: excerpt.meaning.clone(),
            keywords: excerpt.keywords.clone(),
            source: DuaSource::Predefined,
        };
        log_request(storage, query, Some(&entry), false).await;
        return Recommendation::Excerpt(entry);
    }

    // Stage 2: external completion.
    let mut ai_message: Option<String> = None;
    match completion.complete_dua(query).await {
        Ok(CompletionReply::Structured(entry)) => {
            // Persistence only happens after a successful, fully parsed
            // reply, and its failure must not block the answer.
            let mut saved_id = None;
            if let Some(storage) = storage {
                match storage.insert_dua(&entry).await {
                    Ok(stored) => saved_id = Some(stored.id),
                    Err(e) => warn!("failed to persist AI dua: {e}"),
                }
            }
            log_request(storage, query, Some(&entry), true).await;
            return Recommendation::Ai {
                entry,
                id: saved_id,
            };
        }
        Ok(CompletionReply::Unstructured(text)) => {
            info!("completion reply was unstructured, falling back");
            if !text.trim().is_empty() {
                ai_message = Some(text.trim().to_string());
            }
        }
        Err(e) => {
            warn!("completion stage failed: {e}");
        }
    }

    // Stage 3: local keyword fallback over the curated table.
    if let Some(entry) = best_match(&content.duas, query) {
        log_request(storage, query, Some(entry), false).await;
        return Recommendation::Local(entry.clone());
    }

    // Stage 4: relay the completion's free text when there is any,
    // otherwise the fixed generic entry. Non-empty input always gets a
    // result.
    if let Some(message) = ai_message {
        log_request(storage, query, None, true).await;
        return Recommendation::AiText(message);
    }

    let generic = content.generic_fallback.clone();
    log_request(storage, query, Some(&generic), false).await;
    Recommendation::Generic(generic)
}

async fn log_request(
    storage: Option<&Arc<dyn StorageService>>,
    query: &str,
    resolved: Option<&DuaEntry>,
    ai_generated: bool,
) {
    let Some(storage) = storage else {
        return;
    };
    let title = resolved.map(|e| e.title.as_str());
    let category = resolved.map(|e| e.category.as_str());
    if let Err(e) = storage
        .log_dua_request(query, title, category, ai_generated)
        .await
    {
        warn!("failed to record dua request: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use guidance_core::domain::{DailyTimings, LocationRecord, PrayerTimingSet, StoredDua};
    use guidance_core::ports::{PortError, PortResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct LoggedRequest {
        title: Option<String>,
        ai_generated: bool,
    }

    #[derive(Default)]
    struct MemoryStorage {
        logged: Mutex<Vec<LoggedRequest>>,
        inserted: Mutex<Vec<DuaEntry>>,
    }

    #[async_trait]
    impl StorageService for MemoryStorage {
        async fn insert_dua(&self, entry: &DuaEntry) -> PortResult<StoredDua> {
            self.inserted.lock().unwrap().push(entry.clone());
            Ok(StoredDua {
                id: 7,
                entry: entry.clone(),
                created_at: Utc::now(),
            })
        }

        async fn list_duas(&self) -> PortResult<Vec<StoredDua>> {
            Ok(Vec::new())
        }

        async fn search_duas(&self, _term: &str) -> PortResult<Vec<StoredDua>> {
            Ok(Vec::new())
        }

        async fn log_dua_request(
            &self,
            _query: &str,
            response_title: Option<&str>,
            _response_category: Option<&str>,
            ai_generated: bool,
        ) -> PortResult<()> {
            self.logged.lock().unwrap().push(LoggedRequest {
                title: response_title.map(str::to_string),
                ai_generated,
            });
            Ok(())
        }

        async fn upsert_prayer_times(&self, _set: &PrayerTimingSet) -> PortResult<()> {
            Ok(())
        }

        async fn cached_prayer_times(
            &self,
            _latitude: f64,
            _longitude: f64,
            _date: NaiveDate,
        ) -> PortResult<Option<DailyTimings>> {
            Ok(None)
        }

        async fn record_location_use(
            &self,
            _latitude: f64,
            _longitude: f64,
            _country_name: Option<&str>,
        ) -> PortResult<()> {
            Ok(())
        }

        async fn recent_locations(&self, _limit: i64) -> PortResult<Vec<LocationRecord>> {
            Ok(Vec::new())
        }

        async fn add_favorite(&self, _dua_id: i64, _user_identifier: &str) -> PortResult<()> {
            Ok(())
        }

        async fn favorites_for_user(&self, _user_identifier: &str) -> PortResult<Vec<StoredDua>> {
            Ok(Vec::new())
        }
    }

    enum CompletionBehavior {
        Unreachable,
        Structured(DuaEntry),
        FreeText(String),
    }

    struct ScriptedCompletion {
        behavior: CompletionBehavior,
        calls: AtomicUsize,
    }

    impl ScriptedCompletion {
        fn new(behavior: CompletionBehavior) -> Self {
            Self {
                behavior,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DuaCompletionService for ScriptedCompletion {
        async fn complete_dua(&self, _query: &str) -> PortResult<CompletionReply> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                CompletionBehavior::Unreachable => {
                    Err(PortError::Unavailable("connection refused".to_string()))
                }
                CompletionBehavior::Structured(entry) => {
                    Ok(CompletionReply::Structured(entry.clone()))
                }
                CompletionBehavior::FreeText(text) => {
                    Ok(CompletionReply::Unstructured(text.clone()))
                }
            }
        }
    }

    fn ai_entry() -> DuaEntry {
        DuaEntry {
            title: "For Rain".to_string(),
            category: "Weather".to_string(),
            arabic: "اللهم اسقنا".to_string(),
            transliteration: "Allahumma asqina".to_string(),
            translation: "O Allah, give us rain.".to_string(),
            meaning: "Asking for rain.".to_string(),
            keywords: Vec::new(),
            source: DuaSource::Ai,
        }
    }

    #[tokio::test]
    async fn excerpt_lookup_short_circuits_the_completion_stage() {
        let content = ContentTables::load();
        let completion = ScriptedCompletion::new(CompletionBehavior::Structured(ai_entry()));
        let storage: Arc<dyn StorageService> = Arc::new(MemoryStorage::default());

        let result = recommend_dua(&content, &completion, Some(&storage), "ayat al kursi").await;

        match result {
            Recommendation::Excerpt(entry) => {
                assert_eq!(entry.title, "Al-Baqarah Ayah 255 (Ayat al-Kursi)");
                assert_eq!(entry.category, "Surah Reference");
            }
            other => panic!("expected excerpt, got {other:?}"),
        }
        assert_eq!(completion.call_count(), 0);
    }

    #[tokio::test]
    async fn unreachable_completion_falls_back_to_local_match() {
        let content = ContentTables::load();
        let completion = ScriptedCompletion::new(CompletionBehavior::Unreachable);
        let memory = Arc::new(MemoryStorage::default());
        let storage: Arc<dyn StorageService> = memory.clone();

        let result =
            recommend_dua(&content, &completion, Some(&storage), "i have a headache").await;

        match result {
            Recommendation::Local(entry) => assert_eq!(entry.title, "For Pain or Headache"),
            other => panic!("expected local match, got {other:?}"),
        }
        assert_eq!(completion.call_count(), 1);

        let logged = memory.logged.lock().unwrap();
        assert_eq!(logged.len(), 1);
        assert!(!logged[0].ai_generated);
        assert_eq!(logged[0].title.as_deref(), Some("For Pain or Headache"));
    }

    #[tokio::test]
    async fn structured_completion_is_persisted_and_logged() {
        let content = ContentTables::load();
        let completion = ScriptedCompletion::new(CompletionBehavior::Structured(ai_entry()));
        let memory = Arc::new(MemoryStorage::default());
        let storage: Arc<dyn StorageService> = memory.clone();

        let result = recommend_dua(&content, &completion, Some(&storage), "dua for rain").await;

        match result {
            Recommendation::Ai { entry, id } => {
                assert_eq!(entry.title, "For Rain");
                assert_eq!(id, Some(7));
            }
            other => panic!("expected AI match, got {other:?}"),
        }
        assert_eq!(memory.inserted.lock().unwrap().len(), 1);

        let logged = memory.logged.lock().unwrap();
        assert_eq!(logged.len(), 1);
        assert!(logged[0].ai_generated);
    }

    #[tokio::test]
    async fn unusable_reply_with_no_match_relays_the_free_text() {
        let content = ContentTables::load();
        let completion = ScriptedCompletion::new(CompletionBehavior::FreeText(
            "I am not sure about that request.".to_string(),
        ));
        let memory = Arc::new(MemoryStorage::default());
        let storage: Arc<dyn StorageService> = memory.clone();

        let result = recommend_dua(&content, &completion, Some(&storage), "xyzzy plugh").await;

        match result {
            Recommendation::AiText(message) => {
                assert_eq!(message, "I am not sure about that request.");
            }
            other => panic!("expected free text, got {other:?}"),
        }
        assert_eq!(memory.logged.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn nothing_anywhere_yields_the_generic_entry() {
        let content = ContentTables::load();
        let completion = ScriptedCompletion::new(CompletionBehavior::Unreachable);
        let memory = Arc::new(MemoryStorage::default());
        let storage: Arc<dyn StorageService> = memory.clone();

        let result = recommend_dua(&content, &completion, Some(&storage), "xyzzy plugh").await;

        match result {
            Recommendation::Generic(entry) => {
                assert_eq!(entry.title, content.generic_fallback.title);
            }
            other => panic!("expected generic fallback, got {other:?}"),
        }
        assert_eq!(memory.logged.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn pipeline_runs_without_storage() {
        let content = ContentTables::load();
        let completion = ScriptedCompletion::new(CompletionBehavior::Unreachable);

        let result = recommend_dua(&content, &completion, None, "i have a headache").await;
        assert!(matches!(result, Recommendation::Local(_)));
    }
}
