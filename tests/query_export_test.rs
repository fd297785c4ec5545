use httpmock::prelude::*;
use kg_explorer::adapters::ApiClient;
use kg_explorer::config::ApiConfig;
use kg_explorer::core::{QueryConsole, ResultsPager};
use kg_explorer::domain::model::SparqlQueryRequest;
use kg_explorer::export::export_results;
use kg_explorer::services::HttpSparqlService;
use kg_explorer::LocalStorage;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

const QUERY: &str = "SELECT ?country ?label WHERE { ?country rdfs:label ?label }";

fn sparql_service(server: &MockServer) -> Arc<HttpSparqlService> {
    let client = ApiClient::new(&ApiConfig {
        base_url: server.url("/api"),
        ..Default::default()
    })
    .unwrap();
    Arc::new(HttpSparqlService::new(client))
}

fn sparql_json() -> serde_json::Value {
    json!({
        "head": {"vars": ["country", "label"]},
        "results": {"bindings": [
            {
                "country": {"type": "uri", "value": "http://www.wikidata.org/entity/Q252"},
                "label": {"type": "literal", "value": "Indonesia", "xml:lang": "en"}
            },
            {
                "country": {"type": "uri", "value": "http://www.wikidata.org/entity/Q1008"},
                "label": {"type": "literal", "value": "Côte d'Ivoire \"CIV\""}
            },
            {
                "label": {"type": "literal", "value": "No IRI"}
            }
        ]}
    })
}

#[tokio::test]
async fn test_execute_records_history_and_exports_csv() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().to_string_lossy().into_owned();

    let server = MockServer::start();
    let query_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/sparql/query")
            .json_body(json!({"query": QUERY, "format": "json", "limit": 100}));
        then.status(200)
            .header("Content-Type", "application/sparql-results+json")
            .json_body(sparql_json());
    });
    let history_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/sparql/history")
            .json_body_partial(r#"{"resultCount": 3}"#);
        then.status(201);
    });

    let mut console = QueryConsole::new(sparql_service(&server));
    let mut request = SparqlQueryRequest::new(QUERY);
    request.limit = Some(100);
    console.execute(request).await;

    query_mock.assert();
    history_mock.assert();
    assert!(console.error.is_none());
    let results = console.results.as_ref().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results.bindings()[0]["label"].lang.as_deref(), Some("en"));

    let pager = ResultsPager::new(results.len());
    assert_eq!(pager.summary(), "Page 1 of 1 (1-3 of 3)");

    let storage = LocalStorage::new(output_dir.clone());
    let path = export_results(&storage, results).await.unwrap();

    let file_name = std::path::Path::new(&path)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    assert!(file_name.starts_with("query-results-"));
    assert!(file_name.ends_with(".csv"));

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.split('\n').collect();
    assert_eq!(
        lines,
        vec![
            "country,label",
            r#""http://www.wikidata.org/entity/Q252","Indonesia""#,
            r#""http://www.wikidata.org/entity/Q1008","Côte d'Ivoire ""CIV""""#,
            r#","No IRI""#,
        ]
    );
}

#[tokio::test]
async fn test_history_failure_keeps_results() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/sparql/query");
        then.status(200).json_body(sparql_json());
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/sparql/history");
        then.status(500);
    });

    let mut console = QueryConsole::new(sparql_service(&server));
    console.execute(SparqlQueryRequest::new(QUERY)).await;

    assert!(console.error.is_none());
    assert_eq!(console.results.as_ref().map(|r| r.len()), Some(3));
}

#[tokio::test]
async fn test_query_error_message_from_backend() {
    let server = MockServer::start();
    let history_mock = server.mock(|when, then| {
        when.method(POST).path("/api/sparql/history");
        then.status(201);
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/sparql/query");
        then.status(400)
            .json_body(json!({"message": "Lexical error at line 1, column 6"}));
    });

    let mut console = QueryConsole::new(sparql_service(&server));
    console.execute(SparqlQueryRequest::new("SELEC")).await;

    assert_eq!(
        console.error.as_deref(),
        Some("Lexical error at line 1, column 6")
    );
    assert!(console.results.is_none());
    assert_eq!(history_mock.hits(), 0);
}
