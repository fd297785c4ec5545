pub mod fixtures;
pub mod infobox;
pub mod map;
pub mod mock;
pub mod search;
pub mod sparql;

use crate::adapters::ApiClient;
use crate::config::AppConfig;
use crate::domain::ports::{InfoBoxService, MapService, SearchService, SparqlService};
use crate::utils::error::Result;
use std::sync::Arc;

pub use infobox::HttpInfoBoxService;
pub use map::HttpMapService;
pub use mock::{MockInfoBoxService, MockMapService, MockSearchService, MockSparqlService};
pub use search::HttpSearchService;
pub use sparql::HttpSparqlService;

/// One implementation per port, chosen once at startup.
#[derive(Clone)]
pub struct Services {
    pub search: Arc<dyn SearchService>,
    pub infobox: Arc<dyn InfoBoxService>,
    pub map: Arc<dyn MapService>,
    pub sparql: Arc<dyn SparqlService>,
}

impl Services {
    pub fn http(client: ApiClient) -> Self {
        Self {
            search: Arc::new(HttpSearchService::new(client.clone())),
            infobox: Arc::new(HttpInfoBoxService::new(client.clone())),
            map: Arc::new(HttpMapService::new(client.clone())),
            sparql: Arc::new(HttpSparqlService::new(client)),
        }
    }

    pub fn mock() -> Self {
        Self {
            search: Arc::new(MockSearchService::new()),
            infobox: Arc::new(MockInfoBoxService::new()),
            map: Arc::new(MockMapService::new()),
            sparql: Arc::new(MockSparqlService::new()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        if config.api.use_mock {
            tracing::info!("Using mock services");
            return Ok(Self::mock());
        }
        tracing::debug!("Using API at {}", config.api.base_url);
        Ok(Self::http(ApiClient::new(&config.api)?))
    }
}
