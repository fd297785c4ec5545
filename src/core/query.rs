use crate::config::toml_config::DEFAULT_RESULTS_PAGE_SIZE;
use crate::domain::model::{Binding, SparqlQueryRequest, SparqlQueryResponse, SparqlValue};
use crate::domain::ports::SparqlService;
use crate::services::fixtures;
use std::sync::Arc;
use std::time::Instant;

/// SPARQL console state: last results, timing and error message.
pub struct QueryConsole {
    service: Arc<dyn SparqlService>,
    pub results: Option<SparqlQueryResponse>,
    pub is_executing: bool,
    pub error: Option<String>,
    pub execution_time_ms: Option<u64>,
}

impl QueryConsole {
    pub fn new(service: Arc<dyn SparqlService>) -> Self {
        Self {
            service,
            results: None,
            is_executing: false,
            error: None,
            execution_time_ms: None,
        }
    }

    pub async fn execute(&mut self, request: SparqlQueryRequest) {
        if request.query.trim().is_empty() {
            return;
        }

        self.is_executing = true;
        self.error = None;
        let started = Instant::now();

        match self.service.execute_query(&request).await {
            Ok(data) => {
                let duration = started.elapsed().as_secs_f64() * 1000.0;
                let duration = duration.round() as u64;
                let count = data.len();
                tracing::info!("Query returned {} rows in {}ms", count, duration);

                self.results = Some(data);
                self.execution_time_ms = Some(duration);

                if let Err(e) = self
                    .service
                    .save_query_to_history(&request.query, Some(duration), Some(count))
                    .await
                {
                    tracing::warn!("Could not save query to history: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Query failed: {}", e);
                let message = e.user_friendly_message();
                self.error = Some(if message.is_empty() {
                    "Failed to execute query".to_string()
                } else {
                    message
                });
                self.results = None;
                self.execution_time_ms = None;
            }
        }

        self.is_executing = false;
    }

    pub fn clear(&mut self) {
        self.results = None;
        self.error = None;
        self.execution_time_ms = None;
    }
}

/// One visible row of the results table.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRow<'a> {
    /// 1-based position in the full result set.
    pub number: usize,
    pub binding: &'a Binding,
}

/// Client-side pagination over a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPager {
    total: usize,
    page_size: usize,
    page: usize,
}

impl ResultsPager {
    pub fn new(total: usize) -> Self {
        Self::with_page_size(total, DEFAULT_RESULTS_PAGE_SIZE)
    }

    pub fn with_page_size(total: usize, page_size: usize) -> Self {
        Self {
            total,
            page_size: page_size.max(1),
            page: 1,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Clamped into `1..=max(total_pages, 1)`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn start(&self) -> usize {
        (self.page - 1) * self.page_size
    }

    pub fn end(&self) -> usize {
        (self.start() + self.page_size).min(self.total)
    }

    pub fn rows<'a>(&self, bindings: &'a [Binding]) -> Vec<PageRow<'a>> {
        let start = self.start().min(bindings.len());
        let end = self.end().min(bindings.len());
        bindings[start..end]
            .iter()
            .enumerate()
            .map(|(i, binding)| PageRow {
                number: start + i + 1,
                binding,
            })
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} ({}-{} of {})",
            self.page,
            self.total_pages(),
            self.start() + 1,
            self.end(),
            self.total
        )
    }
}

/// Last path segment of a URI, else its fragment, else the URI itself.
pub fn short_uri(uri: &str) -> &str {
    if let Some(last) = uri.rsplit('/').next().filter(|s| !s.is_empty()) {
        return last;
    }
    if let Some(fragment) = uri.rsplit('#').next().filter(|s| !s.is_empty()) {
        return fragment;
    }
    uri
}

pub fn format_cell(value: Option<&SparqlValue>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v.is_uri() => short_uri(&v.value).to_string(),
        Some(v) => v.value.clone(),
    }
}

pub fn line_count(query: &str) -> usize {
    query.split('\n').count()
}

pub fn char_count(query: &str) -> usize {
    query.chars().count()
}

/// First line of a sample query, shown in the picker.
pub fn sample_title(query: &str) -> &str {
    query.split('\n').next().unwrap_or_default()
}

pub struct SampleQueries {
    service: Arc<dyn SparqlService>,
    pub samples: Vec<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SampleQueries {
    pub fn new(service: Arc<dyn SparqlService>) -> Self {
        Self {
            service,
            samples: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.is_loading = true;
        self.error = None;

        match self.service.sample_queries().await {
            Ok(samples) => {
                self.samples = samples.into_iter().map(|s| s.into_query()).collect();
            }
            Err(e) => {
                tracing::warn!("Could not load sample queries, using built-in set: {}", e);
                let message = e.user_friendly_message();
                self.error = Some(if message.is_empty() {
                    "Failed to load sample queries".to_string()
                } else {
                    message
                });
                self.samples = fixtures::fallback_sample_queries();
            }
        }

        self.is_loading = false;
    }

    pub async fn refetch(&mut self) {
        self.load().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{QueryHistory, SampleQuery, ValidationResult};
    use crate::services::MockSparqlService;
    use crate::utils::error::{KgError, Result};
    use async_trait::async_trait;

    /// Executes fine but cannot persist history or list samples.
    struct FlakySparql {
        fail_execute: bool,
    }

    #[async_trait]
    impl SparqlService for FlakySparql {
        async fn execute_query(&self, _r: &SparqlQueryRequest) -> Result<SparqlQueryResponse> {
            if self.fail_execute {
                return Err(KgError::Api {
                    status: 400,
                    message: "Parse error on line 1".to_string(),
                });
            }
            Ok(fixtures::query_results())
        }
        async fn validate_query(&self, _q: &str) -> Result<ValidationResult> {
            Ok(ValidationResult {
                valid: true,
                error: None,
            })
        }
        async fn sample_queries(&self) -> Result<Vec<SampleQuery>> {
            Err(KgError::Api {
                status: 404,
                message: "Not Found".to_string(),
            })
        }
        async fn query_history(&self) -> Result<Vec<QueryHistory>> {
            Ok(Vec::new())
        }
        async fn save_query_to_history(
            &self,
            _q: &str,
            _t: Option<u64>,
            _c: Option<usize>,
        ) -> Result<()> {
            Err(KgError::service("history store offline"))
        }
    }

    fn bindings(n: usize) -> Vec<Binding> {
        (0..n)
            .map(|i| {
                let mut b = Binding::new();
                b.insert("n".to_string(), SparqlValue::literal(i.to_string()));
                b
            })
            .collect()
    }

    #[test]
    fn test_pager_bounds() {
        let pager = ResultsPager::new(120);
        assert_eq!(pager.total_pages(), 3);
        assert_eq!((pager.start(), pager.end()), (0, 50));

        let mut pager = pager;
        pager.set_page(3);
        assert_eq!((pager.start(), pager.end()), (100, 120));
        assert_eq!(pager.summary(), "Page 3 of 3 (101-120 of 120)");
        assert!(!pager.has_next());

        pager.next();
        assert_eq!(pager.page(), 3);
    }

    #[test]
    fn test_pager_clamps_page() {
        let mut pager = ResultsPager::new(10);
        pager.set_page(0);
        assert_eq!(pager.page(), 1);
        pager.set_page(7);
        assert_eq!(pager.page(), 1);

        let mut empty = ResultsPager::new(0);
        assert_eq!(empty.total_pages(), 0);
        empty.set_page(4);
        assert_eq!(empty.page(), 1);
        assert_eq!(empty.end(), 0);
        assert!(!empty.has_next());
    }

    #[test]
    fn test_pager_exact_multiple() {
        let mut pager = ResultsPager::new(100);
        assert_eq!(pager.total_pages(), 2);
        pager.next();
        assert_eq!(pager.summary(), "Page 2 of 2 (51-100 of 100)");
        pager.prev();
        pager.prev();
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn test_rows_are_numbered_from_page_start() {
        let data = bindings(60);
        let mut pager = ResultsPager::new(data.len());
        pager.next();

        let rows = pager.rows(&data);
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].number, 51);
        assert_eq!(rows[0].binding["n"].value, "50");
        assert_eq!(rows[9].number, 60);
    }

    #[test]
    fn test_short_uri() {
        assert_eq!(short_uri("http://www.wikidata.org/entity/Q252"), "Q252");
        assert_eq!(short_uri("http://example.org/onto#Country/"), "Country/");
        assert_eq!(short_uri("http://example.org/onto/"), "http://example.org/onto/");
        assert_eq!(short_uri("urn:isbn:123"), "urn:isbn:123");
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(None), "-");
        let uri = SparqlValue::uri("http://www.wikidata.org/entity/Q668");
        assert_eq!(format_cell(Some(&uri)), "Q668");
        let literal = SparqlValue::literal("a/b");
        assert_eq!(format_cell(Some(&literal)), "a/b");
    }

    #[test]
    fn test_editor_helpers() {
        let query = "# Count\nSELECT (COUNT(?s) AS ?n)\nWHERE { ?s ?p ?o }";
        assert_eq!(line_count(query), 3);
        assert_eq!(line_count(""), 1);
        assert_eq!(char_count("é?"), 2);
        assert_eq!(sample_title(query), "# Count");
    }

    #[tokio::test]
    async fn test_execute_stores_results_and_history() {
        let service = Arc::new(MockSparqlService::new());
        let mut console = QueryConsole::new(service.clone());
        console
            .execute(SparqlQueryRequest::new("SELECT ?country WHERE {}"))
            .await;

        assert!(console.error.is_none());
        assert_eq!(console.results.as_ref().unwrap().len(), 5);
        assert!(console.execution_time_ms.is_some());
        assert!(!console.is_executing);

        // mock records the execution itself, the console records it again with timing
        let history = service.query_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].result_count, Some(5));
    }

    #[tokio::test]
    async fn test_blank_query_is_ignored() {
        let mut console = QueryConsole::new(Arc::new(FlakySparql { fail_execute: true }));
        console.execute(SparqlQueryRequest::new("  \n ")).await;
        assert!(console.error.is_none());
        assert!(console.results.is_none());
    }

    #[tokio::test]
    async fn test_failure_clears_previous_results() {
        let mut console = QueryConsole::new(Arc::new(FlakySparql { fail_execute: false }));
        console.execute(SparqlQueryRequest::new("SELECT * WHERE {}")).await;
        // history failure does not discard the results
        assert!(console.results.is_some());
        assert!(console.error.is_none());

        let mut failing = QueryConsole::new(Arc::new(FlakySparql { fail_execute: true }));
        failing.results = console.results.take();
        failing.execution_time_ms = Some(3);
        failing.execute(SparqlQueryRequest::new("SELEC")).await;
        assert_eq!(failing.error.as_deref(), Some("Parse error on line 1"));
        assert!(failing.results.is_none());
        assert!(failing.execution_time_ms.is_none());

        failing.clear();
        assert!(failing.error.is_none());
    }

    #[tokio::test]
    async fn test_samples_reduce_to_query_strings() {
        let mut samples = SampleQueries::new(Arc::new(MockSparqlService::new()));
        samples.load().await;
        assert_eq!(samples.samples.len(), 2);
        assert!(samples.samples[0].starts_with("PREFIX wd:"));
        assert!(samples.error.is_none());
    }

    #[tokio::test]
    async fn test_samples_fall_back_on_error() {
        let mut samples = SampleQueries::new(Arc::new(FlakySparql { fail_execute: false }));
        samples.load().await;
        assert_eq!(samples.error.as_deref(), Some("Not Found"));
        assert_eq!(samples.samples.len(), 3);
        assert_eq!(sample_title(&samples.samples[2]), "# Count total health records");
    }
}
