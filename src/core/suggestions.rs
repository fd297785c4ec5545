use crate::config::toml_config::DEFAULT_DEBOUNCE_MS;
use crate::domain::model::Entity;
use crate::domain::ports::{SearchService, MIN_SUGGESTION_CHARS};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Delays work until input has been quiet for `delay`.
///
/// A new call aborts the previous timer if it has not fired yet. Work that
/// already started runs to completion; nothing cancels an in-flight request,
/// so whichever fetch finishes last overwrites the state.
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn call<F>(&mut self, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // detached so that a later abort only ever hits the timer
            tokio::spawn(work);
        }));
    }

    /// Drops a scheduled call that has not fired yet.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionState {
    /// Query the current suggestions belong to.
    pub query: String,
    pub suggestions: Vec<Entity>,
    pub is_loading: bool,
    pub error: Option<String>,
}

pub struct SuggestionController {
    service: Arc<dyn SearchService>,
    state: Arc<Mutex<SuggestionState>>,
    debouncer: Debouncer,
    pub cursor: SuggestionCursor,
}

impl SuggestionController {
    pub fn new(service: Arc<dyn SearchService>) -> Self {
        Self::with_debounce(service, Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }

    pub fn with_debounce(service: Arc<dyn SearchService>, delay: Duration) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(SuggestionState::default())),
            debouncer: Debouncer::new(delay),
            cursor: SuggestionCursor::new(),
        }
    }

    /// Schedules a fetch for `query` once typing pauses.
    pub fn on_input(&mut self, query: &str) {
        self.cursor.reset();
        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        let query = query.to_string();
        self.debouncer
            .call(async move { fetch_suggestions(service, state, query).await });
    }

    /// Fetches immediately, bypassing the debounce.
    pub async fn fetch_now(&mut self, query: &str) {
        self.debouncer.cancel();
        self.cursor.reset();
        fetch_suggestions(
            Arc::clone(&self.service),
            Arc::clone(&self.state),
            query.to_string(),
        )
        .await;
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub async fn snapshot(&self) -> SuggestionState {
        self.state.lock().await.clone()
    }
}

async fn fetch_suggestions(
    service: Arc<dyn SearchService>,
    state: Arc<Mutex<SuggestionState>>,
    query: String,
) {
    if query.chars().count() < MIN_SUGGESTION_CHARS {
        let mut state = state.lock().await;
        state.query = query;
        state.suggestions.clear();
        return;
    }

    {
        let mut state = state.lock().await;
        state.is_loading = true;
        state.error = None;
    }

    tracing::debug!("Fetching suggestions for '{}'", query);
    let result = service.suggestions(&query).await;

    let mut state = state.lock().await;
    match result {
        Ok(suggestions) => {
            state.suggestions = suggestions;
        }
        Err(e) => {
            tracing::warn!("Suggestion fetch failed: {}", e);
            let message = e.user_friendly_message();
            state.error = Some(if message.is_empty() {
                "Failed to fetch suggestions".to_string()
            } else {
                message
            });
            state.suggestions.clear();
        }
    }
    state.query = query;
    state.is_loading = false;
}

/// Keyboard selection over a suggestion list; `None` means nothing is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionCursor {
    selected: Option<usize>,
}

impl SuggestionCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> Option<usize> {
        self.selected
    }

    /// Stops at the last item.
    pub fn down(&mut self, len: usize) {
        self.selected = match self.selected {
            None if len > 0 => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            other => other,
        };
    }

    /// Moving up from the first item clears the selection.
    pub fn up(&mut self) {
        self.selected = match self.selected {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }

    pub fn selected<'a>(&self, items: &'a [Entity]) -> Option<&'a Entity> {
        self.selected.and_then(|i| items.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EntityDetailResponse, EntityType, SearchParams, SearchResponse};
    use crate::services::MockSearchService;
    use crate::utils::error::{KgError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    /// Records every query that actually reaches the service.
    struct RecordingSearch {
        seen: StdMutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingSearch {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                seen: StdMutex::new(Vec::new()),
                fail,
            })
        }

        fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchService for RecordingSearch {
        async fn search(&self, _params: &SearchParams) -> Result<SearchResponse> {
            unreachable!("suggestions never run a full search")
        }

        async fn entity_by_id(&self, id: &str) -> Result<EntityDetailResponse> {
            Err(KgError::NotFound { what: id.to_string() })
        }

        async fn suggestions(&self, query: &str) -> Result<Vec<Entity>> {
            self.seen.lock().unwrap().push(query.to_string());
            if self.fail {
                return Err(KgError::service(""));
            }
            Ok(vec![Entity {
                id: format!("wd:{}", query),
                label: query.to_string(),
                iso3_code: None,
                entity_type: EntityType::Country,
            }])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_input_is_fetched() {
        let service = RecordingSearch::new(false);
        let mut controller = SuggestionController::new(service.clone());

        controller.on_input("in");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.on_input("ind");
        tokio::time::sleep(Duration::from_millis(100)).await;
        controller.on_input("indo");
        assert!(controller.is_pending());

        tokio::time::sleep(Duration::from_millis(350)).await;

        assert_eq!(service.seen(), vec!["indo".to_string()]);
        let state = controller.snapshot().await;
        assert_eq!(state.query, "indo");
        assert_eq!(state.suggestions.len(), 1);
        assert!(!state.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_fires_before_delay() {
        let service = RecordingSearch::new(false);
        let mut controller = SuggestionController::new(service.clone());

        controller.on_input("indo");
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(service.seen().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(service.seen(), vec!["indo".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_query_clears_without_request() {
        let service = RecordingSearch::new(false);
        let mut controller = SuggestionController::new(service.clone());

        controller.fetch_now("indo").await;
        assert_eq!(controller.snapshot().await.suggestions.len(), 1);

        controller.on_input("i");
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(service.seen(), vec!["indo".to_string()]);
        assert!(controller.snapshot().await.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_failure_uses_fallback_message() {
        let service = RecordingSearch::new(true);
        let mut controller = SuggestionController::new(service);

        controller.fetch_now("indo").await;
        let state = controller.snapshot().await;
        assert_eq!(state.error.as_deref(), Some("Failed to fetch suggestions"));
        assert!(state.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_now_against_mock() {
        let mut controller = SuggestionController::new(Arc::new(MockSearchService::new()));
        controller.fetch_now("ind").await;

        let labels: Vec<String> = controller
            .snapshot()
            .await
            .suggestions
            .into_iter()
            .map(|e| e.label)
            .collect();
        assert_eq!(labels, vec!["Indonesia".to_string(), "India".to_string()]);
    }

    #[tokio::test]
    async fn test_new_input_resets_cursor() {
        let mut controller = SuggestionController::new(Arc::new(MockSearchService::new()));
        controller.fetch_now("ind").await;
        let suggestions = controller.snapshot().await.suggestions;

        controller.cursor.down(suggestions.len());
        assert_eq!(controller.cursor.selected(&suggestions).unwrap().label, "Indonesia");

        controller.on_input("indi");
        assert_eq!(controller.cursor.index(), None);
    }

    #[test]
    fn test_cursor_movement() {
        let items = crate::services::fixtures::entities()[..3].to_vec();
        let mut cursor = SuggestionCursor::new();
        assert!(cursor.selected(&items).is_none());

        cursor.down(items.len());
        assert_eq!(cursor.index(), Some(0));
        cursor.down(items.len());
        cursor.down(items.len());
        cursor.down(items.len());
        assert_eq!(cursor.index(), Some(2));
        assert_eq!(cursor.selected(&items).unwrap().label, "Brazil");

        cursor.up();
        cursor.up();
        assert_eq!(cursor.index(), Some(0));
        cursor.up();
        assert_eq!(cursor.index(), None);

        cursor.down(0);
        assert_eq!(cursor.index(), None);
    }
}
