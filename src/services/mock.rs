//! In-memory services for development without a backend.

use crate::domain::model::{
    CountryCoordinates, Entity, EntityDetailResponse, EntityInfo, QueryHistory, SampleQuery,
    SearchParams, SearchResponse, SparqlQueryRequest, SparqlQueryResponse, ValidationResult,
};
use crate::domain::ports::{InfoBoxService, MapService, SearchService, SparqlService};
use crate::services::fixtures;
use crate::utils::error::{KgError, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tokio::sync::Mutex;

const SUGGESTION_LIMIT: usize = 5;
const DEFAULT_PAGE_SIZE: u32 = 10;

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

pub struct MockSearchService {
    entities: Vec<Entity>,
    latency: Duration,
}

impl MockSearchService {
    pub fn new() -> Self {
        Self {
            entities: fixtures::entities(),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn matching<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Entity> + 'a {
        let needle = query.to_lowercase();
        self.entities
            .iter()
            .filter(move |e| e.label.to_lowercase().contains(&needle))
    }
}

impl Default for MockSearchService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchService for MockSearchService {
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        simulate_latency(self.latency).await;

        let page = params.page.unwrap_or(1).max(1);
        let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        let filtered: Vec<&Entity> = self
            .matching(&params.query)
            .filter(|e| params.entity_type.map_or(true, |t| e.entity_type == t))
            .collect();

        let total = filtered.len() as u32;
        // out-of-range pages are simply empty
        let start = (page as usize - 1).saturating_mul(page_size as usize);
        let results = filtered
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(SearchResponse {
            results,
            total,
            page,
            page_size,
        })
    }

    async fn entity_by_id(&self, id: &str) -> Result<EntityDetailResponse> {
        simulate_latency(self.latency).await;

        let entity = self
            .entities
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| KgError::NotFound {
                what: format!("entity {}", id),
            })?;

        Ok(EntityDetailResponse {
            entity,
            health_records: Vec::new(),
            related_entities: None,
        })
    }

    async fn suggestions(&self, query: &str) -> Result<Vec<Entity>> {
        simulate_latency(self.latency).await;

        if query.chars().count() < crate::domain::ports::MIN_SUGGESTION_CHARS {
            return Ok(Vec::new());
        }
        Ok(self.matching(query).take(SUGGESTION_LIMIT).cloned().collect())
    }
}

/// Unknown ids and labels resolve to the first entry (Indonesia).
pub struct MockInfoBoxService {
    entries: Vec<EntityInfo>,
    latency: Duration,
}

impl MockInfoBoxService {
    pub fn new() -> Self {
        Self {
            entries: fixtures::entity_infos(),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn by_key(&self, key: &str) -> Option<&EntityInfo> {
        self.entries.iter().find(|e| e.label == key || e.id == key)
    }

    fn lookup(&self, key: &str) -> Result<EntityInfo> {
        self.by_key(key)
            .or_else(|| self.entries.first())
            .cloned()
            .ok_or_else(|| KgError::NotFound {
                what: format!("entity {}", key),
            })
    }
}

impl Default for MockInfoBoxService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InfoBoxService for MockInfoBoxService {
    async fn entity_info(&self, entity_id: &str) -> Result<EntityInfo> {
        simulate_latency(self.latency).await;
        self.lookup(entity_id)
    }

    async fn entity_by_label(&self, label: &str) -> Result<EntityInfo> {
        simulate_latency(self.latency).await;
        self.lookup(label)
    }

    async fn related_entities(&self, entity_id: &str, limit: usize) -> Result<Vec<EntityInfo>> {
        simulate_latency(self.latency).await;

        let entity = self.lookup(entity_id)?;
        Ok(entity
            .related_entities
            .iter()
            .take(limit)
            .map(|rel| {
                self.by_key(&rel.label).cloned().unwrap_or_else(|| EntityInfo {
                    id: rel.id.clone(),
                    label: rel.label.clone(),
                    entity_type: rel.entity_type,
                    description: rel.description.clone(),
                    image: None,
                    attributes: Vec::new(),
                    health_metrics: None,
                    related_entities: Vec::new(),
                    sources: Vec::new(),
                })
            })
            .collect())
    }
}

pub struct MockMapService {
    countries: Vec<CountryCoordinates>,
    entities: Vec<Entity>,
    latency: Duration,
}

impl MockMapService {
    pub fn new() -> Self {
        Self {
            countries: fixtures::country_coordinates(),
            entities: fixtures::entities(),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for MockMapService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MapService for MockMapService {
    async fn country_coordinates(&self) -> Result<Vec<CountryCoordinates>> {
        simulate_latency(self.latency).await;
        Ok(self.countries.clone())
    }

    async fn country_info(&self, iso3_code: &str) -> Result<Entity> {
        simulate_latency(self.latency).await;
        self.entities
            .iter()
            .find(|e| {
                e.iso3_code
                    .as_deref()
                    .is_some_and(|code| code.eq_ignore_ascii_case(iso3_code))
            })
            .cloned()
            .ok_or_else(|| KgError::NotFound {
                what: format!("country {}", iso3_code),
            })
    }
}

/// Fixed result set; every execution is recorded in history, newest first.
pub struct MockSparqlService {
    history: Mutex<Vec<QueryHistory>>,
    latency: Duration,
}

impl MockSparqlService {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn record(&self, query: &str, execution_time: Option<u64>, result_count: Option<usize>) {
        let now = Utc::now();
        let item = QueryHistory {
            id: now.timestamp_millis().to_string(),
            query: query.to_string(),
            timestamp: now,
            execution_time,
            result_count,
        };
        self.history.lock().await.insert(0, item);
    }
}

impl Default for MockSparqlService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SparqlService for MockSparqlService {
    async fn execute_query(&self, request: &SparqlQueryRequest) -> Result<SparqlQueryResponse> {
        simulate_latency(self.latency).await;

        let results = fixtures::query_results();
        self.record(
            &request.query,
            Some(self.latency.as_millis() as u64),
            Some(results.len()),
        )
        .await;
        Ok(results)
    }

    async fn validate_query(&self, query: &str) -> Result<ValidationResult> {
        simulate_latency(self.latency).await;

        if !query.trim().to_uppercase().contains("SELECT") {
            return Ok(ValidationResult {
                valid: false,
                error: Some("Query must contain SELECT statement".to_string()),
            });
        }
        Ok(ValidationResult {
            valid: true,
            error: None,
        })
    }

    async fn sample_queries(&self) -> Result<Vec<SampleQuery>> {
        simulate_latency(self.latency).await;
        Ok(fixtures::sample_queries())
    }

    async fn query_history(&self) -> Result<Vec<QueryHistory>> {
        simulate_latency(self.latency).await;
        Ok(self.history.lock().await.clone())
    }

    async fn save_query_to_history(
        &self,
        query: &str,
        execution_time: Option<u64>,
        result_count: Option<usize>,
    ) -> Result<()> {
        simulate_latency(self.latency).await;
        self.record(query, execution_time, result_count).await;
        Ok(())
    }
}
