use crate::adapters::ApiClient;
use crate::domain::model::{Entity, EntityDetailResponse, SearchParams, SearchResponse};
use crate::domain::ports::{SearchService, MIN_SUGGESTION_CHARS};
use crate::utils::error::Result;
use async_trait::async_trait;

pub struct HttpSearchService {
    client: ApiClient,
}

impl HttpSearchService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchService for HttpSearchService {
    /// GET /search?query=&type=&page=&pageSize=
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        self.client
            .get_json(&["search"], &params.to_query_pairs())
            .await
    }

    /// GET /entities/{id}
    async fn entity_by_id(&self, id: &str) -> Result<EntityDetailResponse> {
        self.client.get_json(&["entities", id], &[]).await
    }

    /// GET /search/suggestions?query=
    async fn suggestions(&self, query: &str) -> Result<Vec<Entity>> {
        if query.chars().count() < MIN_SUGGESTION_CHARS {
            return Ok(Vec::new());
        }
        self.client
            .get_json(&["search", "suggestions"], &[("query", query.to_string())])
            .await
    }
}
