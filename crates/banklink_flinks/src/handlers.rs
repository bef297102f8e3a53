// --- File: crates/banklink_flinks/src/handlers.rs ---
use axum::extract::State;
use axum::Json;
use banklink_common::{require_keys, vendor_failure, ApiError};
use banklink_config::AppConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::client::{FlinksAccount, FlinksClient};
use crate::connect::{ConnectEvent, ConnectState};
use crate::logic::drive;

// --- State for Flinks Handlers ---
#[derive(Clone)]
pub struct FlinksState {
    pub config: Arc<AppConfig>,
    pub client: Arc<FlinksClient>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectWidgetResponse {
    /// Iframe source for the Connect widget.
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://toolbox-iframe.private.fin.ag/v2/?demo=true")
    )]
    pub url: String,
    pub is_demo: bool,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSecretRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Dwolla"))]
    pub name_of_partner: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSecretResponse {
    pub auth_secret: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestIdRequest {
    pub login_id: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestIdResponse {
    /// Valid for 30 minutes.
    pub request_id: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsSummaryRequest {
    pub request_id: String,
    pub with_balance: Option<bool>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsSummaryResponse {
    pub accounts: Vec<FlinksAccount>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenRequest {
    pub login_id: String,
    pub account_id: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
pub struct ConnectRequest {
    /// State blob from the previous `/flinks/connect` response, `{"phase":
    /// "idle"}` on the first call.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub state: ConnectState,
    /// Raw widget postMessage payload, forwarded verbatim.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub event: Value,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct ConnectResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub state: ConnectState,
}

/// Axum handler reporting the Connect widget embed parameters.
#[axum::debug_handler]
pub async fn connect_widget_handler(
    State(state): State<Arc<FlinksState>>,
) -> Json<ConnectWidgetResponse> {
    let widget = state.client.connect_widget();
    Json(ConnectWidgetResponse {
        url: widget.url,
        is_demo: widget.demo,
    })
}

/// Axum handler fetching the auth secret issued to a partner.
#[axum::debug_handler]
pub async fn auth_secret_handler(
    State(state): State<Arc<FlinksState>>,
    Json(payload): Json<Value>,
) -> Result<Json<AuthSecretResponse>, ApiError> {
    let request: AuthSecretRequest = require_keys(payload, &["nameOfPartner"])?;
    let auth_secret = state
        .client
        .request_auth_secret(&request.name_of_partner)
        .await
        .map_err(|err| vendor_failure("Fetching Flinks auth secret", err))?;
    Ok(Json(AuthSecretResponse { auth_secret }))
}

/// Axum handler generating a request id for a connected login.
#[axum::debug_handler]
pub async fn request_id_handler(
    State(state): State<Arc<FlinksState>>,
    Json(payload): Json<Value>,
) -> Result<Json<RequestIdResponse>, ApiError> {
    let request: RequestIdRequest = require_keys(payload, &["loginId"])?;
    let request_id = state
        .client
        .generate_request_id(&request.login_id)
        .await
        .map_err(|err| vendor_failure("Generating Flinks request id", err))?;
    Ok(Json(RequestIdResponse { request_id }))
}

/// Axum handler listing the accounts behind a request id.
#[axum::debug_handler]
pub async fn accounts_summary_handler(
    State(state): State<Arc<FlinksState>>,
    Json(payload): Json<Value>,
) -> Result<Json<AccountsSummaryResponse>, ApiError> {
    let request: AccountsSummaryRequest = require_keys(payload, &["requestId"])?;
    let accounts = state
        .client
        .get_accounts_summary(&request.request_id, request.with_balance)
        .await
        .map_err(|err| vendor_failure("Fetching Flinks accounts summary", err))?;
    Ok(Json(AccountsSummaryResponse { accounts }))
}

/// Axum handler fetching the access token for one account of a login.
#[axum::debug_handler]
pub async fn access_token_handler(
    State(state): State<Arc<FlinksState>>,
    Json(payload): Json<Value>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let request: AccessTokenRequest = require_keys(payload, &["loginId", "accountId"])?;
    let access_token = state
        .client
        .request_access_token(&request.login_id, &request.account_id)
        .await
        .map_err(|err| vendor_failure("Fetching Flinks access token", err))?;
    Ok(Json(AccessTokenResponse { access_token }))
}

/// Axum handler advancing the Connect machine with one widget message.
///
/// Non-connect messages return the state unchanged. Vendor failures while
/// performing machine actions surface as the `failed` phase, not as an
/// error response.
#[axum::debug_handler]
pub async fn connect_handler(
    State(state): State<Arc<FlinksState>>,
    Json(payload): Json<Value>,
) -> Result<Json<ConnectResponse>, ApiError> {
    let request: ConnectRequest = require_keys(payload, &["state", "event"])?;
    let machine = match ConnectEvent::from_widget_message(&request.event) {
        Some(event) => drive(&state.client, request.state, event).await,
        None => request.state,
    };
    Ok(Json(ConnectResponse { state: machine }))
}
