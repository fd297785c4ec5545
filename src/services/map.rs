use crate::adapters::ApiClient;
use crate::domain::model::{CountryCoordinates, Entity};
use crate::domain::ports::MapService;
use crate::utils::error::Result;
use async_trait::async_trait;

pub struct HttpMapService {
    client: ApiClient,
}

impl HttpMapService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MapService for HttpMapService {
    /// GET /map/countries
    async fn country_coordinates(&self) -> Result<Vec<CountryCoordinates>> {
        self.client.get_json(&["map", "countries"], &[]).await
    }

    /// GET /map/countries/{iso3Code}
    async fn country_info(&self, iso3_code: &str) -> Result<Entity> {
        self.client
            .get_json(&["map", "countries", iso3_code], &[])
            .await
    }
}
