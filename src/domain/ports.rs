use crate::domain::model::{
    CountryCoordinates, Entity, EntityDetailResponse, EntityInfo, QueryHistory, SampleQuery,
    SearchParams, SearchResponse, SparqlQueryRequest, SparqlQueryResponse, ValidationResult,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse>;
    async fn entity_by_id(&self, id: &str) -> Result<EntityDetailResponse>;
    /// Autocomplete; queries under two characters yield nothing.
    async fn suggestions(&self, query: &str) -> Result<Vec<Entity>>;
}

#[async_trait]
pub trait InfoBoxService: Send + Sync {
    async fn entity_info(&self, entity_id: &str) -> Result<EntityInfo>;
    async fn entity_by_label(&self, label: &str) -> Result<EntityInfo>;
    async fn related_entities(&self, entity_id: &str, limit: usize) -> Result<Vec<EntityInfo>>;
}

#[async_trait]
pub trait MapService: Send + Sync {
    async fn country_coordinates(&self) -> Result<Vec<CountryCoordinates>>;
    async fn country_info(&self, iso3_code: &str) -> Result<Entity>;
}

#[async_trait]
pub trait SparqlService: Send + Sync {
    async fn execute_query(&self, request: &SparqlQueryRequest) -> Result<SparqlQueryResponse>;
    async fn validate_query(&self, query: &str) -> Result<ValidationResult>;
    async fn sample_queries(&self) -> Result<Vec<SampleQuery>>;
    async fn query_history(&self) -> Result<Vec<QueryHistory>>;
    async fn save_query_to_history(
        &self,
        query: &str,
        execution_time: Option<u64>,
        result_count: Option<usize>,
    ) -> Result<()>;
}

pub const MIN_SUGGESTION_CHARS: usize = 2;
