// --- File: crates/banklink_finicity/tests/api_tests.rs ---
//! Route-level tests of the Finicity endpoints against a stub Finicity server.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use banklink_config::{AppConfig, FinicityConfig, ServerConfig};
use banklink_finicity::{routes_with_client, FinicityClient};
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
        use_plaid: false,
        use_finicity: true,
        use_mx: false,
        use_flinks: false,
        use_visa: false,
        dwolla: None,
        plaid: None,
        finicity: Some(FinicityConfig {
            partner_id: "fin-partner".to_string(),
        }),
        mx: None,
        flinks: None,
    })
}

fn app(base_url: &str) -> Router {
    let client =
        FinicityClient::with_credentials(base_url, "fin-partner", "fin-secret", "fin-app-key");
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

async fn mount_authentication(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/aggregation/v2/partners/authentication"))
        .and(mock_header("Finicity-App-Key", "fin-app-key"))
        .and(body_json(json!({
            "partnerId": "fin-partner",
            "partnerSecret": "fin-secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fin-token" })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn create_customer_returns_201_with_the_id() {
    let server = MockServer::start().await;
    mount_authentication(&server).await;

    Mock::given(method("POST"))
        .and(path("/aggregation/v2/customers/testing"))
        .and(mock_header("Finicity-App-Token", "fin-token"))
        .and(body_json(json!({ "username": "jane.merchant" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "7025626737",
            "username": "jane.merchant",
            "createdDate": "1718021400"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/finicity/customers",
            json!({ "username": "jane.merchant" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_value(response).await, json!({ "id": "7025626737" }));
}

#[tokio::test]
async fn app_token_is_requested_once_and_reused() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/aggregation/v2/partners/authentication"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fin-token" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/connect/v2/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "link": "https://connect2.finicity.com?customerId=1" })),
        )
        .expect(2)
        .mount(&server)
        .await;

    let app = app(&server.uri());
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/finicity/connect-url",
                json!({ "customerId": "7025626737" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn connect_url_sends_customer_and_partner() {
    let server = MockServer::start().await;
    mount_authentication(&server).await;

    Mock::given(method("POST"))
        .and(path("/connect/v2/generate"))
        .and(body_json(json!({
            "customerId": "7025626737",
            "partnerId": "fin-partner"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "link": "https://connect2.finicity.com?customerId=7025626737&origin=url"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/finicity/connect-url",
            json!({ "customerId": "7025626737" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({ "link": "https://connect2.finicity.com?customerId=7025626737&origin=url" })
    );
}

#[tokio::test]
async fn accounts_respond_as_a_bare_array() {
    let server = MockServer::start().await;
    mount_authentication(&server).await;

    Mock::given(method("GET"))
        .and(path("/aggregation/v1/customers/7025626737/accounts"))
        .and(mock_header("Finicity-App-Token", "fin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [
                { "id": "acct-1", "name": "Checking", "type": "checking" },
                { "id": "acct-2", "name": "Savings", "type": "savings" }
            ]
        })))
        .mount(&server)
        .await;

    let request = Request::builder()
        .method("GET")
        .uri("/finicity/accounts/7025626737")
        .body(Body::empty())
        .unwrap();
    let response = app(&server.uri()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!([
            { "id": "acct-1", "name": "Checking", "type": "checking" },
            { "id": "acct-2", "name": "Savings", "type": "savings" }
        ])
    );
}

#[tokio::test]
async fn consent_responds_with_the_receipt_itself() {
    let server = MockServer::start().await;
    mount_authentication(&server).await;

    let receipt = json!({
        "receiptId": "rcp-1",
        "customerId": "7025626737",
        "partnerId": "fin-partner",
        "products": [{ "product": "moneyTransferDetails", "accountId": "acct-1" }]
    });
    Mock::given(method("POST"))
        .and(path("/aggregation/v1/partners/accessKey"))
        .and(body_partial_json(json!({
            "customerId": "7025626737",
            "partnerId": "fin-partner",
            "thirdPartyPartnerId": "2445583946651",
            "products": [
                {
                    "product": "moneyTransferDetails",
                    "payorId": "fin-partner",
                    "accountId": "acct-1",
                    "maxCalls": 10
                }
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [{ "receipt": receipt.clone() }] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/finicity/consent",
            json!({ "customerId": "7025626737", "accountId": "acct-1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_value(response).await, receipt);
}

#[tokio::test]
async fn consent_without_receipt_collapses_to_opaque_500() {
    let server = MockServer::start().await;
    mount_authentication(&server).await;

    Mock::given(method("POST"))
        .and(path("/aggregation/v1/partners/accessKey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/finicity/consent",
            json!({ "customerId": "7025626737", "accountId": "acct-1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_value(response).await,
        json!({ "error": "Internal Server Error: Check server logs for more information." })
    );
}

#[tokio::test]
async fn consent_requires_account_and_customer() {
    let response = app("http://127.0.0.1:1")
        .oneshot(post_json("/finicity/consent", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_value(response).await,
        json!({ "error": "The following JSON properties are missing: accountId,customerId" })
    );
}

#[tokio::test]
async fn rejected_method_names_the_method() {
    let request = Request::builder()
        .method("GET")
        .uri("/finicity/customers")
        .body(Body::empty())
        .unwrap();
    let response = app("http://127.0.0.1:1").oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_text(response).await, "Method GET Not Allowed");
}
