use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Country,
    Region,
    Organization,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Country => "country",
            EntityType::Region => "region",
            EntityType::Organization => "organization",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "country" => Ok(EntityType::Country),
            "region" => Ok(EntityType::Region),
            "organization" => Ok(EntityType::Organization),
            other => Err(format!(
                "unknown entity type '{}', expected country, region or organization",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    pub label: String,
    /// ISO 3166-1 alpha-3 (Wikidata P298)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3_code: Option<String>,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub id: String,
    /// Entity id of the country or region.
    pub location: String,
    pub year: i32,
    pub hiv_cases: Option<f64>,
    pub malaria_cases: Option<f64>,
    pub rabies_cases: Option<f64>,
    pub tuberculosis_cases: Option<f64>,
    pub cholera_cases: Option<f64>,
    pub guineaworm: Option<f64>,
    pub polio_cases: Option<f64>,
    pub smallpox_cases: Option<f64>,
    pub bcg: Option<f64>,
    pub dtp3: Option<f64>,
    pub hepb3: Option<f64>,
    pub hib3: Option<f64>,
    pub measles1: Option<f64>,
    pub polio3: Option<f64>,
    pub rotavirus: Option<f64>,
    pub rubella1: Option<f64>,
    pub population_age0: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Query-string pairs; unset params are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("query", self.query.clone())];
        if let Some(t) = self.entity_type {
            pairs.push(("type", t.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("pageSize", size.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<Entity>,
    pub total: u32,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDetailResponse {
    pub entity: Entity,
    #[serde(default)]
    pub health_records: Vec<HealthRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_entities: Option<Vec<Entity>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCoordinates {
    pub iso3_code: String,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeValueType {
    String,
    Number,
    Date,
    Entity,
    Url,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAttribute {
    pub property: String,
    pub property_label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_label: Option<String>,
    pub value_type: AttributeValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricCategory {
    Disease,
    Vaccination,
    Population,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetric {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub category: MetricCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    #[serde(default)]
    pub disease_cases: Vec<HealthMetric>,
    #[serde(default)]
    pub vaccination_coverage: Vec<HealthMetric>,
    #[serde(default)]
    pub population: Vec<HealthMetric>,
    /// Most recent first.
    #[serde(default)]
    pub available_years: Vec<i32>,
}

impl HealthMetrics {
    pub fn for_year(&self, year: i32) -> HealthMetrics {
        let pick = |metrics: &[HealthMetric]| -> Vec<HealthMetric> {
            metrics.iter().filter(|m| m.year == year).cloned().collect()
        };
        HealthMetrics {
            disease_cases: pick(&self.disease_cases),
            vaccination_coverage: pick(&self.vaccination_coverage),
            population: pick(&self.population),
            available_years: self.available_years.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.disease_cases.is_empty()
            && self.vaccination_coverage.is_empty()
            && self.population.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedEntity {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub relationship_type: String,
    pub relationship_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfo {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub attributes: Vec<EntityAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_metrics: Option<HealthMetrics>,
    #[serde(default)]
    pub related_entities: Vec<RelatedEntity>,
    #[serde(default)]
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoBoxResponse {
    pub entity: EntityInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedEntitiesResponse {
    pub entities: Vec<EntityInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparqlQueryRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SparqlQueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            format: Some("json".to_string()),
            limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparqlValue {
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl SparqlValue {
    pub fn uri(value: impl Into<String>) -> Self {
        Self {
            value_type: "uri".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            value_type: "literal".to_string(),
            value: value.into(),
            datatype: None,
            lang: None,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            datatype: Some(datatype.into()),
            ..Self::literal(value)
        }
    }

    pub fn is_uri(&self) -> bool {
        self.value_type == "uri"
    }
}

pub type Binding = HashMap<String, SparqlValue>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparqlHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparqlQueryResponse {
    pub head: SparqlHead,
    pub results: SparqlResults,
}

impl SparqlQueryResponse {
    pub fn vars(&self) -> &[String] {
        &self.head.vars
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.results.bindings
    }

    pub fn len(&self) -> usize {
        self.results.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.bindings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, alias = "message", skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryHistory {
    pub id: String,
    pub query: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_count: Option<usize>,
    pub timestamp: String,
}

/// Sample entries arrive either as bare strings or as titled objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleQuery {
    Text(String),
    Titled {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        title: Option<String>,
        query: String,
    },
}

impl SampleQuery {
    pub fn query(&self) -> &str {
        match self {
            SampleQuery::Text(q) => q,
            SampleQuery::Titled { query, .. } => query,
        }
    }

    pub fn into_query(self) -> String {
        match self {
            SampleQuery::Text(q) => q,
            SampleQuery::Titled { query, .. } => query,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplesResponse {
    pub queries: Vec<SampleQuery>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<QueryHistory>,
}

/// Error envelope returned by the backend on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_wire_format() {
        let json = serde_json::json!({
            "id": "wd:Q252",
            "label": "Indonesia",
            "iso3Code": "IDN",
            "type": "country"
        });
        let entity: Entity = serde_json::from_value(json).unwrap();
        assert_eq!(entity.iso3_code.as_deref(), Some("IDN"));
        assert_eq!(entity.entity_type, EntityType::Country);
    }

    #[test]
    fn test_search_params_omit_unset_fields() {
        let mut params = SearchParams::new("indo");
        assert_eq!(params.to_query_pairs(), vec![("query", "indo".to_string())]);

        params.entity_type = Some(EntityType::Region);
        params.page = Some(2);
        params.page_size = Some(10);
        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("query", "indo".to_string()),
                ("type", "region".to_string()),
                ("page", "2".to_string()),
                ("pageSize", "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_sample_query_accepts_both_shapes() {
        let json = serde_json::json!({
            "queries": [
                "SELECT ?s WHERE { ?s ?p ?o }",
                {"id": "1", "title": "List all countries", "query": "SELECT ?country WHERE {}"}
            ]
        });
        let samples: SamplesResponse = serde_json::from_value(json).unwrap();
        let queries: Vec<&str> = samples.queries.iter().map(|s| s.query()).collect();
        assert_eq!(
            queries,
            vec!["SELECT ?s WHERE { ?s ?p ?o }", "SELECT ?country WHERE {}"]
        );
    }

    #[test]
    fn test_sparql_response_parses_lang_and_datatype() {
        let json = serde_json::json!({
            "head": {"vars": ["label", "population"]},
            "results": {"bindings": [{
                "label": {"type": "literal", "value": "Indonesia", "xml:lang": "en"},
                "population": {
                    "type": "literal",
                    "value": "273523615",
                    "datatype": "http://www.w3.org/2001/XMLSchema#integer"
                }
            }]}
        });
        let response: SparqlQueryResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.len(), 1);
        let row = &response.bindings()[0];
        assert_eq!(row["label"].lang.as_deref(), Some("en"));
        assert!(row["population"].datatype.is_some());
    }

    #[test]
    fn test_metrics_for_year() {
        let metric = |year| HealthMetric {
            id: "hivCases".to_string(),
            label: "HIV/AIDS Cases".to_string(),
            value: 1.0,
            year,
            unit: None,
            category: MetricCategory::Disease,
        };
        let metrics = HealthMetrics {
            disease_cases: vec![metric(2020), metric(2019)],
            available_years: vec![2020, 2019],
            ..Default::default()
        };
        let filtered = metrics.for_year(2019);
        assert_eq!(filtered.disease_cases.len(), 1);
        assert_eq!(filtered.disease_cases[0].year, 2019);
        assert!(metrics.for_year(1999).is_empty());
    }
}
