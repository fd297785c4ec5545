use crate::adapters::ApiClient;
use crate::domain::model::{EntityInfo, InfoBoxResponse, RelatedEntitiesResponse};
use crate::domain::ports::InfoBoxService;
use crate::utils::error::{KgError, Result};
use async_trait::async_trait;

pub const DEFAULT_RELATED_LIMIT: usize = 10;

/// Entity detail lookups for the info panel. Backend failures are logged
/// and collapsed into a fixed message per operation.
pub struct HttpInfoBoxService {
    client: ApiClient,
}

impl HttpInfoBoxService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InfoBoxService for HttpInfoBoxService {
    async fn entity_info(&self, entity_id: &str) -> Result<EntityInfo> {
        match self
            .client
            .get_json::<InfoBoxResponse>(&["entity", entity_id], &[])
            .await
        {
            Ok(response) => Ok(response.entity),
            Err(e) => {
                tracing::error!("Failed to fetch entity info for {}: {}", entity_id, e);
                Err(KgError::service("Failed to fetch entity information"))
            }
        }
    }

    async fn entity_by_label(&self, label: &str) -> Result<EntityInfo> {
        match self
            .client
            .get_json::<InfoBoxResponse>(&["entity", "by-label"], &[("label", label.to_string())])
            .await
        {
            Ok(response) => Ok(response.entity),
            Err(e) => {
                tracing::error!("Failed to fetch entity by label {}: {}", label, e);
                Err(KgError::service("Failed to fetch entity by label"))
            }
        }
    }

    async fn related_entities(&self, entity_id: &str, limit: usize) -> Result<Vec<EntityInfo>> {
        let params = [
            ("entityId", entity_id.to_string()),
            ("limit", limit.to_string()),
        ];
        match self
            .client
            .get_json::<RelatedEntitiesResponse>(&["entity", "related"], &params)
            .await
        {
            Ok(response) => Ok(response.entities),
            Err(e) => {
                tracing::error!("Failed to fetch related entities for {}: {}", entity_id, e);
                Err(KgError::service("Failed to fetch related entities"))
            }
        }
    }
}
