// --- File: crates/banklink_flinks/src/doc.rs ---
#![allow(dead_code)] // Allow unused code for documentation purposes
#![cfg(feature = "openapi")]

use crate::client::FlinksAccount;
use crate::handlers::{
    AccessTokenRequest, AccessTokenResponse, AccountsSummaryRequest, AccountsSummaryResponse,
    AuthSecretRequest, AuthSecretResponse, ConnectRequest, ConnectResponse, ConnectWidgetResponse,
    RequestIdRequest, RequestIdResponse,
};
use utoipa::OpenApi;

#[utoipa::path(
    get,
    path = "/flinks/connect-widget",
    responses(
        (status = 200, description = "Iframe URL and demo flag for the Connect widget", body = ConnectWidgetResponse)
    ),
    tag = "Flinks"
)]
fn doc_connect_widget() {}

#[utoipa::path(
    post,
    path = "/flinks/auth-secret",
    request_body = AuthSecretRequest,
    responses(
        (status = 200, description = "Auth secret issued to the partner", body = AuthSecretResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Flinks"
)]
fn doc_auth_secret() {}

#[utoipa::path(
    post,
    path = "/flinks/request-id",
    request_body = RequestIdRequest,
    responses(
        (status = 200, description = "Request id for the connected login, valid 30 minutes", body = RequestIdResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Flinks"
)]
fn doc_request_id() {}

#[utoipa::path(
    post,
    path = "/flinks/accounts-summary",
    request_body = AccountsSummaryRequest,
    responses(
        (status = 200, description = "Accounts behind the request id", body = AccountsSummaryResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Flinks"
)]
fn doc_accounts_summary() {}

#[utoipa::path(
    post,
    path = "/flinks/access-token",
    request_body = AccessTokenRequest,
    responses(
        (status = 200, description = "Access token for one account of the login", body = AccessTokenResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Flinks"
)]
fn doc_access_token() {}

#[utoipa::path(
    post,
    path = "/flinks/connect",
    request_body = ConnectRequest,
    responses(
        (status = 200, description = "Machine state after applying the widget message", body = ConnectResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Flinks"
)]
fn doc_connect() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_connect_widget,
        doc_auth_secret,
        doc_request_id,
        doc_accounts_summary,
        doc_access_token,
        doc_connect,
    ),
    components(schemas(
        ConnectWidgetResponse,
        AuthSecretRequest,
        AuthSecretResponse,
        RequestIdRequest,
        RequestIdResponse,
        AccountsSummaryRequest,
        AccountsSummaryResponse,
        AccessTokenRequest,
        AccessTokenResponse,
        ConnectRequest,
        ConnectResponse,
        FlinksAccount,
    )),
    tags(
        (name = "Flinks", description = "Flinks Connect widget and partner-data endpoints")
    )
)]
pub struct FlinksApiDoc;
