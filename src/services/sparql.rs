use crate::adapters::ApiClient;
use crate::domain::model::{
    HistoryEntryRequest, HistoryResponse, QueryHistory, SampleQuery, SamplesResponse,
    SparqlQueryRequest, SparqlQueryResponse, ValidationResult,
};
use crate::domain::ports::SparqlService;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

pub struct HttpSparqlService {
    client: ApiClient,
}

impl HttpSparqlService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SparqlService for HttpSparqlService {
    async fn execute_query(&self, request: &SparqlQueryRequest) -> Result<SparqlQueryResponse> {
        let body = SparqlQueryRequest {
            query: request.query.clone(),
            format: Some(request.format.clone().unwrap_or_else(|| "json".to_string())),
            limit: request.limit,
        };
        self.client.post_json(&["sparql", "query"], &body).await
    }

    async fn validate_query(&self, query: &str) -> Result<ValidationResult> {
        self.client
            .post_json(&["sparql", "validate"], &json!({ "query": query }))
            .await
    }

    async fn sample_queries(&self) -> Result<Vec<SampleQuery>> {
        let response: SamplesResponse = self.client.get_json(&["sparql", "samples"], &[]).await?;
        Ok(response.queries)
    }

    async fn query_history(&self) -> Result<Vec<QueryHistory>> {
        let response: HistoryResponse = self.client.get_json(&["sparql", "history"], &[]).await?;
        Ok(response.history)
    }

    async fn save_query_to_history(
        &self,
        query: &str,
        execution_time: Option<u64>,
        result_count: Option<usize>,
    ) -> Result<()> {
        let entry = HistoryEntryRequest {
            query: query.to_string(),
            execution_time,
            result_count,
            timestamp: Utc::now().to_rfc3339(),
        };
        self.client.post_discard(&["sparql", "history"], &entry).await
    }
}
