//! End-to-end tests for the users and products resources.

use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;
use common::{client, TestServer};

#[tokio::test]
async fn test_list_users_and_products() {
    let server = TestServer::start().await;
    let client = client();

    let users = client.get(server.url("/users")).send().await.unwrap();
    assert_eq!(users.status(), StatusCode::OK);
    assert_eq!(users.json::<Value>().await.unwrap(), json!([{ "id": 1, "name": "John Doe" }]));

    let products = client.get(server.url("/products")).send().await.unwrap();
    assert_eq!(products.status(), StatusCode::OK);
    assert_eq!(products.json::<Value>().await.unwrap(), json!([{ "id": 1, "name": "Lapsi" }]));
}

#[tokio::test]
async fn test_create_returns_created() {
    let server = TestServer::start().await;
    let client = client();

    let response = client
        .post(server.url("/products"))
        .json(&json!({ "name": "Lapsi" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({ "id": 2, "name": "Lapsi" }));

    let response = client
        .post(server.url("/users"))
        .json(&json!({ "name": "Ana" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>().await.unwrap(), json!({ "id": 2, "name": "Ana" }));
}

#[tokio::test]
async fn test_update_echoes_path_id() {
    let server = TestServer::start().await;
    let client = client();

    for (path, id) in [("/users/7", "7"), ("/products/12", "12")] {
        let response = client
            .put(server.url(path))
            .json(&json!({ "name": "Ri" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path}");
        assert_eq!(response.json::<Value>().await.unwrap(), json!({ "id": id, "name": "Ri" }));
    }
}

#[tokio::test]
async fn test_delete_message() {
    let server = TestServer::start().await;
    let client = client();

    let response = client.delete(server.url("/users/42")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "message": "Përdoruesi me id 42 u fshi." })
    );

    let response = client.delete(server.url("/products/5")).send().await.unwrap();
    assert_eq!(
        response.json::<Value>().await.unwrap(),
        json!({ "message": "Produkti me id 5 u fshi." })
    );
}

#[tokio::test]
async fn test_unknown_routes_are_not_found() {
    let server = TestServer::start().await;
    let client = client();

    let cases = [
        client.get(server.url("/unknown")),
        client.get(server.url("/users/1")),
        client.delete(server.url("/users")),
        client.patch(server.url("/users/1")),
        client.head(server.url("/unknown")),
    ];
    for request in cases {
        let response = request.send().await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_other_methods_on_docs_paths_are_not_found() {
    let server = TestServer::start().await;
    let client = client();

    let response = client.post(server.url("/api-docs")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("/api-docs"));

    let response = client.delete(server.url("/api-docs/openapi.json")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_head_answers_like_get() {
    let server = TestServer::start().await;
    let client = client();

    let response = client.head(server.url("/users")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert!(response.bytes().await.unwrap().is_empty());

    let response = client.head(server.url("/users/1")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_trailing_slash_is_ignored() {
    let server = TestServer::start().await;
    let response = client().get(server.url("/users/")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_bad_requests() {
    let server = TestServer::start().await;
    let client = client();

    let missing_body = client.post(server.url("/users")).send().await.unwrap();
    assert_eq!(missing_body.status(), StatusCode::BAD_REQUEST);

    let malformed = client
        .post(server.url("/users"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);

    let wrong_type = client
        .put(server.url("/products/1"))
        .json(&json!({ "name": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_type.status(), StatusCode::BAD_REQUEST);
    assert!(wrong_type.text().await.unwrap().contains("name"));

    let bad_id = client.delete(server.url("/users/abc")).send().await.unwrap();
    assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_request_id_header() {
    let server = TestServer::start().await;
    let client = client();

    let response = client.get(server.url("/users")).send().await.unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);

    let response = client
        .get(server.url("/users"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let mut config = crud_docs::ServiceConfig::default();
    config.limits.max_body_bytes = 64;
    let server = TestServer::start_with(config).await;

    let response = client()
        .post(server.url("/users"))
        .json(&json!({ "name": "x".repeat(1024) }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
