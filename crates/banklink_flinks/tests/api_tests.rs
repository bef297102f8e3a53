// --- File: crates/banklink_flinks/tests/api_tests.rs ---
//! Route-level tests of the Flinks endpoints against a stub Flinks server.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use banklink_config::{AppConfig, FlinksConfig, ServerConfig};
use banklink_flinks::{routes_with_client, FlinksClient};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_json, header as mock_header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUTH_SECRET: &str = "0b48ec6f-cd41-4e6a-894a-0dcf0b4b0a66";
const ACCESS_TOKEN: &str = "49af4a83-b810-4171-a056-17e6a5e14b7a";

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8086,
        },
        use_plaid: false,
        use_finicity: false,
        use_mx: false,
        use_flinks: true,
        use_visa: false,
        dwolla: None,
        plaid: None,
        finicity: None,
        mx: None,
        flinks: Some(FlinksConfig {
            instance: "toolbox".to_string(),
            customer_id: "43387ca6-0391-4c82-b166-0d8a873841e7".to_string(),
        }),
    })
}

fn app(base_url: &str) -> Router {
    let client = FlinksClient::with_credentials(base_url, "toolbox", "fl-secret", true);
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
async fn connect_widget_reports_url_and_demo_mode() {
    let request = Request::builder()
        .method("GET")
        .uri("/flinks/connect-widget")
        .body(Body::empty())
        .unwrap();
    let response = app("http://127.0.0.1:1").oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({
            "url": "https://toolbox-iframe.private.fin.ag/v2/?demo=true",
            "isDemo": true
        })
    );
}

#[tokio::test]
async fn auth_secret_passes_the_partner_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partnerdata/authsecret/Dwolla"))
        .and(mock_header("Authorization", "Bearer fl-secret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "AuthSecret": AUTH_SECRET })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/flinks/auth-secret",
            json!({ "nameOfPartner": "Dwolla" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({ "authSecret": AUTH_SECRET })
    );
}

#[tokio::test]
async fn request_id_authorizes_against_the_cached_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/BankingServices/Authorize"))
        .and(body_json(json!({
            "LoginId": "login-1",
            "MostRecentCached": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "RequestId": "req-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/flinks/request-id",
            json!({ "loginId": "login-1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_value(response).await, json!({ "requestId": "req-1" }));
}

#[tokio::test]
async fn accounts_summary_normalizes_a_single_object() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/BankingServices/GetAccountsSummary"))
        .and(body_json(json!({ "RequestId": "req-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Accounts": { "Id": "acc-1", "Title": "Chequing" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/flinks/accounts-summary",
            json!({ "requestId": "req-1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({ "accounts": [{ "Id": "acc-1", "Title": "Chequing" }] })
    );
}

#[tokio::test]
async fn access_token_reads_partner_data_for_the_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partnerdata/login-1/acc-1"))
        .and(mock_header("Authorization", "Bearer fl-secret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "AccessToken": ACCESS_TOKEN })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/flinks/access-token",
            json!({ "loginId": "login-1", "accountId": "acc-1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({ "accessToken": ACCESS_TOKEN })
    );
}

#[tokio::test]
async fn connect_mount_fetches_the_auth_secret() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partnerdata/authsecret/Dwolla"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "AuthSecret": AUTH_SECRET })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/flinks/connect",
            json!({
                "state": { "phase": "idle" },
                "event": { "step": "APP_MOUNTED" }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({
            "state": { "phase": "awaitingRedirect", "authSecret": AUTH_SECRET }
        })
    );
}

#[tokio::test]
async fn connect_redirect_runs_the_token_exchange_to_done() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/BankingServices/Authorize"))
        .and(body_json(json!({
            "LoginId": "login-1",
            "MostRecentCached": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "RequestId": "req-1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/BankingServices/GetAccountsSummary"))
        .and(body_json(json!({ "RequestId": "req-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Accounts": [{ "Id": "acc-7" }, { "Id": "acc-8" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/partnerdata/login-1/acc-7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "AccessToken": ACCESS_TOKEN })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/flinks/connect",
            json!({
                "state": { "phase": "awaitingRedirect", "authSecret": AUTH_SECRET },
                "event": { "step": "REDIRECT", "loginId": "login-1" }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({
            "state": {
                "phase": "done",
                "authSecret": AUTH_SECRET,
                "accessToken": ACCESS_TOKEN
            }
        })
    );
}

#[tokio::test]
async fn connect_ignores_widget_chatter() {
    let response = app("http://127.0.0.1:1")
        .oneshot(post_json(
            "/flinks/connect",
            json!({
                "state": { "phase": "awaitingRedirect", "authSecret": AUTH_SECRET },
                "event": { "step": "INSTITUTION_SELECTED" }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({
            "state": { "phase": "awaitingRedirect", "authSecret": AUTH_SECRET }
        })
    );
}

#[tokio::test]
async fn connect_redirect_without_login_id_fails_the_machine() {
    let response = app("http://127.0.0.1:1")
        .oneshot(post_json(
            "/flinks/connect",
            json!({
                "state": { "phase": "awaitingRedirect", "authSecret": AUTH_SECRET },
                "event": { "step": "REDIRECT" }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({
            "state": {
                "phase": "failed",
                "reason": "the widget redirect carried no login id"
            }
        })
    );
}

#[tokio::test]
async fn connect_vendor_failure_lands_in_the_failed_phase() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/partnerdata/authsecret/Dwolla"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/flinks/connect",
            json!({
                "state": { "phase": "idle" },
                "event": { "step": "APP_MOUNTED" }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({
            "state": {
                "phase": "failed",
                "reason": "could not obtain an auth secret from Flinks"
            }
        })
    );
}

#[tokio::test]
async fn connect_exchange_with_no_accounts_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/BankingServices/Authorize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "RequestId": "req-1" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/BankingServices/GetAccountsSummary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Accounts": [] })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/partnerdata/login-1/acc-7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/flinks/connect",
            json!({
                "state": { "phase": "awaitingRedirect", "authSecret": AUTH_SECRET },
                "event": { "step": "REDIRECT", "loginId": "login-1" }
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_value(response).await,
        json!({
            "state": {
                "phase": "failed",
                "reason": "the Flinks token exchange failed"
            }
        })
    );
}

#[tokio::test]
async fn access_token_requires_login_and_account() {
    let response = app("http://127.0.0.1:1")
        .oneshot(post_json("/flinks/access-token", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_value(response).await,
        json!({ "error": "The following JSON properties are missing: loginId,accountId" })
    );
}

#[tokio::test]
async fn vendor_client_error_passes_through_with_its_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/BankingServices/Authorize"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid LoginId" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = app(&server.uri())
        .oneshot(post_json(
            "/flinks/request-id",
            json!({ "loginId": "nope" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_value(response).await,
        json!({ "error": "Flinks API returned an error: Invalid LoginId (Status: 400)" })
    );
}

#[tokio::test]
async fn rejected_method_names_the_method() {
    let response = app("http://127.0.0.1:1")
        .oneshot(post_json("/flinks/connect-widget", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_text(response).await, "Method POST Not Allowed");
}
