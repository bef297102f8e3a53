// --- File: crates/banklink_plaid/tests/api_tests.rs ---
//! Route-level tests of the Plaid endpoints against a stub Plaid server.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use banklink_config::{AppConfig, PlaidConfig, ServerConfig};
use banklink_plaid::{routes_with_client, PlaidClient};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_json, body_partial_json, header as mock_header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8086,
        },
        use_plaid: true,
        use_finicity: false,
        use_mx: false,
        use_flinks: false,
        use_visa: false,
        dwolla: None,
        plaid: Some(PlaidConfig {
            environment: "sandbox".to_string(),
            redirect_uri: Some("http://localhost:3000".to_string()),
        }),
        finicity: None,
        mx: None,
        flinks: None,
    })
}

fn app(base_url: &str) -> Router {
    let client = PlaidClient::with_credentials(
        base_url,
        "test-client-id",
        "test-secret",
        "http://localhost:3000",
    );
    routes_with_client(test_config(), Arc::new(client))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_value(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn create_link_token_returns_the_token_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/link/token/create"))
        .and(mock_header("PLAID-CLIENT-ID", "test-client-id"))
        .and(mock_header("PLAID-SECRET", "test-secret"))
        .and(mock_header("Plaid-Version", "2020-09-14"))
        .and(body_partial_json(json!({
            "client_name": "Banklink",
            "country_codes": ["US"],
            "language": "en",
            "products": ["auth"],
            "redirect_uri": "http://localhost:3000"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "link_token": "link-sandbox-7a9f8c2e",
            "expiration": "2024-06-01T12:30:00Z",
            "request_id": "req-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json("/plaid/create-link-token", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({
            "linkToken": "link-sandbox-7a9f8c2e",
            "expiration": "2024-06-01T12:30:00Z",
            "requestId": "req-1"
        })
    );
}

#[tokio::test]
async fn exchange_chains_public_token_to_processor_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/item/public_token/exchange"))
        .and(body_json(json!({ "public_token": "pub-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-1",
            "item_id": "item-1",
            "request_id": "req-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/processor/token/create"))
        .and(body_json(json!({
            "access_token": "access-1",
            "account_id": "acc-1",
            "processor": "dwolla"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "processor_token": "processor-sandbox-1",
            "request_id": "req-3"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/plaid/exchange-public-token",
            json!({ "accountId": "acc-1", "publicToken": "pub-1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({ "processorToken": "processor-sandbox-1" })
    );
}

#[tokio::test]
async fn failed_public_token_exchange_skips_processor_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/item/public_token/exchange"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_type": "INVALID_INPUT",
            "error_code": "INVALID_PUBLIC_TOKEN",
            "error_message": "provided public token is expired",
            "request_id": "req-4"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/processor/token/create"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/plaid/exchange-public-token",
            json!({ "accountId": "acc-1", "publicToken": "pub-stale" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_value(response).await,
        json!({
            "error": "Plaid API returned an error: provided public token is expired (Status: 400)"
        })
    );
}

#[tokio::test]
async fn exchange_requires_account_and_public_token() {
    let response = app("http://127.0.0.1:1")
        .oneshot(post_json(
            "/plaid/exchange-public-token",
            json!({ "accountId": "acc-1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_value(response).await,
        json!({ "error": "The following JSON properties are missing: publicToken" })
    );
}

#[tokio::test]
async fn rejected_method_names_the_method() {
    let request = Request::builder()
        .method("GET")
        .uri("/plaid/create-link-token")
        .body(Body::empty())
        .unwrap();
    let response = app("http://127.0.0.1:1").oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_text(response).await, "Method GET Not Allowed");
}
