use crate::domain::model::{Entity, SearchParams};
use crate::domain::ports::SearchService;
use std::sync::Arc;

pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 10;

/// Paginated entity search state. Errors end up in `error`, never propagate.
pub struct SearchController {
    service: Arc<dyn SearchService>,
    page_size: u32,
    pub results: Vec<Entity>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub total: u32,
    pub page: u32,
    last_params: Option<SearchParams>,
}

impl SearchController {
    pub fn new(service: Arc<dyn SearchService>) -> Self {
        Self::with_page_size(service, DEFAULT_SEARCH_PAGE_SIZE)
    }

    pub fn with_page_size(service: Arc<dyn SearchService>, page_size: u32) -> Self {
        Self {
            service,
            page_size: page_size.max(1),
            results: Vec::new(),
            is_loading: false,
            error: None,
            total: 0,
            page: 1,
            last_params: None,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn last_params(&self) -> Option<&SearchParams> {
        self.last_params.as_ref()
    }

    pub async fn search(&mut self, params: SearchParams) {
        if params.query.trim().is_empty() {
            self.results.clear();
            self.total = 0;
            return;
        }

        self.is_loading = true;
        self.error = None;

        let params = SearchParams {
            page: Some(params.page.filter(|p| *p > 0).unwrap_or(1)),
            page_size: Some(params.page_size.filter(|s| *s > 0).unwrap_or(self.page_size)),
            ..params
        };

        tracing::debug!("Searching for '{}' (page {:?})", params.query, params.page);
        match self.service.search(&params).await {
            Ok(response) => {
                tracing::debug!("Search returned {} of {} results", response.results.len(), response.total);
                self.results = response.results;
                self.total = response.total;
                self.page = response.page;
                self.last_params = Some(params);
            }
            Err(e) => {
                tracing::warn!("Search failed: {}", e);
                let message = e.user_friendly_message();
                self.error = Some(if message.is_empty() {
                    "Failed to search entities".to_string()
                } else {
                    message
                });
                self.results.clear();
                self.total = 0;
            }
        }

        self.is_loading = false;
    }

    pub async fn next_page(&mut self) {
        if let Some(params) = self.last_params.clone() {
            let page = self.page + 1;
            self.search(SearchParams {
                page: Some(page),
                ..params
            })
            .await;
        }
    }

    pub async fn prev_page(&mut self) {
        if self.page <= 1 {
            return;
        }
        if let Some(params) = self.last_params.clone() {
            let page = self.page - 1;
            self.search(SearchParams {
                page: Some(page),
                ..params
            })
            .await;
        }
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.total = 0;
        self.page = 1;
        self.error = None;
        self.last_params = None;
    }

    pub fn total_pages(&self) -> u32 {
        let size = self
            .last_params
            .as_ref()
            .and_then(|p| p.page_size)
            .unwrap_or(self.page_size);
        self.total.div_ceil(size)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{EntityDetailResponse, SearchResponse};
    use crate::services::MockSearchService;
    use crate::utils::error::{KgError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingSearch {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchService for FailingSearch {
        async fn search(&self, _params: &SearchParams) -> Result<SearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(KgError::Api {
                status: 502,
                message: "upstream unavailable".to_string(),
            })
        }

        async fn entity_by_id(&self, id: &str) -> Result<EntityDetailResponse> {
            Err(KgError::NotFound { what: id.to_string() })
        }

        async fn suggestions(&self, _query: &str) -> Result<Vec<Entity>> {
            Ok(Vec::new())
        }
    }

    fn controller() -> SearchController {
        SearchController::new(Arc::new(MockSearchService::new()))
    }

    #[tokio::test]
    async fn test_search_populates_state() {
        let mut search = controller();
        search.search(SearchParams::new("india")).await;

        assert!(search.error.is_none());
        assert!(!search.is_loading);
        assert_eq!(search.total, 1);
        assert_eq!(search.page, 1);
        assert_eq!(search.results[0].label, "India");
        assert_eq!(search.last_params().unwrap().page_size, Some(10));
    }

    #[tokio::test]
    async fn test_blank_query_clears_without_request() {
        let service = Arc::new(FailingSearch {
            calls: AtomicUsize::new(0),
        });
        let mut search = SearchController::new(service.clone());
        search.search(SearchParams::new("   ")).await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert!(search.results.is_empty());
        assert_eq!(search.total, 0);
        assert!(search.error.is_none());
    }

    #[tokio::test]
    async fn test_failure_sets_error_message() {
        let mut search = SearchController::new(Arc::new(FailingSearch {
            calls: AtomicUsize::new(0),
        }));
        search.search(SearchParams::new("india")).await;

        assert_eq!(search.error.as_deref(), Some("upstream unavailable"));
        assert!(search.results.is_empty());
        assert_eq!(search.total, 0);
        assert!(!search.is_loading);
    }

    #[tokio::test]
    async fn test_paging_forward_and_back() {
        let mut search = SearchController::with_page_size(Arc::new(MockSearchService::new()), 5);
        search.search(SearchParams::new("a")).await;
        let total = search.total;
        assert_eq!(search.total_pages(), total.div_ceil(5));
        assert!(search.has_next());
        assert!(!search.has_prev());

        search.next_page().await;
        assert_eq!(search.page, 2);
        assert!(search.has_prev());

        search.prev_page().await;
        assert_eq!(search.page, 1);

        // no-op on the first page
        search.prev_page().await;
        assert_eq!(search.page, 1);
    }

    #[tokio::test]
    async fn test_next_page_without_search_is_noop() {
        let mut search = controller();
        search.next_page().await;
        assert_eq!(search.page, 1);
        assert!(search.results.is_empty());
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let mut search = controller();
        search.search(SearchParams::new("south")).await;
        search.clear();

        assert!(search.results.is_empty());
        assert_eq!(search.total, 0);
        assert_eq!(search.page, 1);
        assert!(search.last_params().is_none());
        assert_eq!(search.total_pages(), 0);
    }
}
