// --- File: crates/banklink_mx/src/doc.rs ---
#![allow(dead_code)] // Allow unused code for documentation purposes
#![cfg(feature = "openapi")]

use crate::client::AuthorizationCode;
use crate::handlers::{
    AuthorizationCodeRequest, AuthorizationCodeResponse, CreateUserRequest, UserResponse,
    VerifiedAccountsResponse, WidgetUrlResponse,
};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/mx/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "MX user created", body = UserResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "MX"
)]
fn doc_create_user() {}

#[utoipa::path(
    get,
    path = "/mx/widget-url",
    params(
        ("userGuid" = String, Query, description = "GUID of the MX user")
    ),
    responses(
        (status = 200, description = "Connect widget URL in verification mode", body = WidgetUrlResponse),
        (status = 400, description = "Required query parameters missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "MX"
)]
fn doc_widget_url() {}

#[utoipa::path(
    get,
    path = "/mx/accounts",
    params(
        ("memberGuid" = String, Query, description = "GUID of the connected member"),
        ("userGuid" = String, Query, description = "GUID of the MX user")
    ),
    responses(
        (status = 200, description = "Verified account numbers for the member", body = VerifiedAccountsResponse),
        (status = 400, description = "Required query parameters missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "MX"
)]
fn doc_verified_accounts() {}

#[utoipa::path(
    post,
    path = "/mx/processor_token",
    request_body = AuthorizationCodeRequest,
    responses(
        (status = 200, description = "Authorization code scoped to the account", body = AuthorizationCodeResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "MX"
)]
fn doc_authorization_code() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_user,
        doc_widget_url,
        doc_verified_accounts,
        doc_authorization_code,
    ),
    components(schemas(
        CreateUserRequest,
        UserResponse,
        WidgetUrlResponse,
        VerifiedAccountsResponse,
        AuthorizationCodeRequest,
        AuthorizationCodeResponse,
        AuthorizationCode,
    )),
    tags(
        (name = "MX", description = "MX user, Connect widget and authorization-code endpoints")
    )
)]
pub struct MxApiDoc;
