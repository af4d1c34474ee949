//! Unit tests for the deals HTTP client

use super::*;
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn endpoint_for(server: &MockServer) -> DealsEndpoint {
    DealsEndpoint::new(
        format!("{}/api/1.0/deals", server.uri()),
        StoreId::new(1),
        UpperPrice::new(15.0),
    )
}

#[test]
fn test_endpoint_url_has_query_parameters() {
    let endpoint = DealsEndpoint::default();
    let url = endpoint.url().unwrap();
    assert_eq!(
        url.as_str(),
        "https://www.cheapshark.com/api/1.0/deals?storeID=1&upperPrice=15"
    );
}

#[test]
fn test_endpoint_url_invalid() {
    let endpoint = DealsEndpoint::new("not a url", StoreId::default(), UpperPrice::default());
    match endpoint.url() {
        Err(DealsError::InvalidEndpoint { url }) => assert_eq!(url, "not a url"),
        other => panic!("Expected InvalidEndpoint, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_deals_success() {
    let mock_server = MockServer::start().await;

    let body = json!([
        {"dealID": "d1", "title": "Portal", "salePrice": "1.99"},
        {"dealID": "d2", "title": "Braid", "salePrice": "2.99"}
    ]);

    Mock::given(method("GET"))
        .and(path("/api/1.0/deals"))
        .and(query_param("storeID", "1"))
        .and(query_param("upperPrice", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&mock_server)
        .await;

    let client = build_client().unwrap();
    let deals = fetch_deals(&client, &endpoint_for(&mock_server))
        .await
        .unwrap();

    assert_eq!(deals.len(), 2);
    assert_eq!(deals[0].deal_id(), Some("d1"));
    assert_eq!(deals[1].get("title"), Some(&json!("Braid")));
}

#[tokio::test]
async fn test_fetch_deals_empty_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = build_client().unwrap();
    let deals = fetch_deals(&client, &endpoint_for(&mock_server))
        .await
        .unwrap();
    assert!(deals.is_empty());
}

#[tokio::test]
async fn test_fetch_deals_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = build_client().unwrap();
    let result = fetch_deals(&client, &endpoint_for(&mock_server)).await;

    match result {
        Err(err @ DealsError::Http(_)) => assert!(err.is_fetch_failure()),
        other => panic!("Expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_deals_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .mount(&mock_server)
        .await;

    let client = build_client().unwrap();
    let result = fetch_deals(&client, &endpoint_for(&mock_server)).await;

    match result {
        Err(err @ DealsError::MalformedPayload(_)) => assert!(err.is_fetch_failure()),
        other => panic!("Expected MalformedPayload error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_deals_object_instead_of_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "bad store"})))
        .mount(&mock_server)
        .await;

    let client = build_client().unwrap();
    let result = fetch_deals(&client, &endpoint_for(&mock_server)).await;
    assert!(matches!(result, Err(DealsError::MalformedPayload(_))));
}

#[tokio::test]
async fn test_fetch_deals_not_found() {
    // Nothing is mounted, so the server answers 404
    let mock_server = MockServer::start().await;

    let client = build_client().unwrap();
    let result = fetch_deals(&client, &endpoint_for(&mock_server)).await;
    assert!(matches!(result, Err(DealsError::Http(_))));
}
