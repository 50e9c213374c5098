use httpmock::prelude::*;
use serde_json::json;
use ticket_router::config::ServiceConfig;
use ticket_router::domain::ports::InventoryApi;
use ticket_router::{InventoryClient, RouterError};

fn client_for(server: &MockServer) -> InventoryClient {
    InventoryClient::new(&ServiceConfig {
        api_url: server.url("/items"),
        api_key: "ns-token".to_string(),
    })
}

#[tokio::test]
async fn test_lookup_reads_in_stock_flag() {
    let server = MockServer::start_async().await;

    let lookup_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/items")
            .query_param("q", "012345678905")
            .header("authorization", "Bearer ns-token");
        then.status(200)
            .json_body(json!({"in_stock": true, "item_id": "FR-100", "quantity": 4}));
    });

    let item = client_for(&server).lookup_item("012345678905").await.unwrap();

    lookup_mock.assert();
    assert!(item.in_stock);
    assert_eq!(item.upc, "012345678905");
    assert_eq!(item.raw["item_id"], "FR-100");
}

#[tokio::test]
async fn test_missing_flag_means_out_of_stock() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/items");
        then.status(200).json_body(json!({"item_id": "FR-200"}));
    });

    let item = client_for(&server).lookup_item("999").await.unwrap();
    assert!(!item.in_stock);
}

#[tokio::test]
async fn test_empty_object_is_failed_lookup() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/items");
        then.status(200).json_body(json!({}));
    });

    let result = client_for(&server).lookup_item("999").await;
    assert!(matches!(
        result,
        Err(RouterError::EmptyResponse {
            service: "inventory",
            ..
        })
    ));
}

#[tokio::test]
async fn test_server_error_is_failed_lookup() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/items");
        then.status(503).body("maintenance");
    });

    let result = client_for(&server).lookup_item("999").await;
    assert!(matches!(result, Err(RouterError::Status { status: 503, .. })));
}

#[tokio::test]
async fn test_non_json_body_is_failed_lookup() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/items");
        then.status(200).body("<html>login</html>");
    });

    let result = client_for(&server).lookup_item("999").await;
    assert!(matches!(result, Err(RouterError::Serialization(_))));
}

#[tokio::test]
async fn test_numeric_flag_counts_as_in_stock() {
    let server = MockServer::start_async().await;

    server.mock(|when, then| {
        when.method(GET).path("/items").query_param("q", "111");
        then.status(200).json_body(json!({"in_stock": 1}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/items").query_param("q", "222");
        then.status(200).json_body(json!({"in_stock": "F"}));
    });

    let client = client_for(&server);
    assert!(client.lookup_item("111").await.unwrap().in_stock);
    assert!(!client.lookup_item("222").await.unwrap().in_stock);
}
