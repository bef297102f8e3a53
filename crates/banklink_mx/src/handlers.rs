// --- File: crates/banklink_mx/src/handlers.rs ---
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use banklink_common::{require_keys, vendor_failure, ApiError};
use banklink_config::AppConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::client::{AuthorizationCode, MxClient};

// --- State for MX Handlers ---
#[derive(Clone)]
pub struct MxState {
    pub config: Arc<AppConfig>,
    pub client: Arc<MxClient>,
}

/// Applies the missing-properties contract to query parameters, so GET
/// routes validate their inputs the same way POST bodies are validated.
fn require_query<T: DeserializeOwned>(
    params: HashMap<String, String>,
    keys: &[&str],
) -> Result<T, ApiError> {
    let object = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    require_keys(Value::Object(object), keys)
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[cfg_attr(feature = "openapi", schema(example = "jane@example.com"))]
    pub email: String,
}

/// MX user as returned by the platform, `guid` included.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct UserResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub user: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetUrlQuery {
    pub user_guid: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct WidgetUrlResponse {
    /// One-time URL for mounting the Connect widget in verification mode.
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://int-widgets.moneydesktop.com/md/connect/abc")
    )]
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedAccountsQuery {
    pub member_guid: String,
    pub user_guid: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct VerifiedAccountsResponse {
    /// Account numbers records for the member, as returned by MX.
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Object>))]
    pub accounts: Vec<Value>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationCodeRequest {
    pub account_guid: String,
    pub member_guid: String,
    pub user_guid: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct AuthorizationCodeResponse {
    pub token: AuthorizationCode,
}

/// Axum handler creating an MX user.
#[axum::debug_handler]
pub async fn create_user_handler(
    State(state): State<Arc<MxState>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let request: CreateUserRequest = require_keys(payload, &["email"])?;
    let user = state
        .client
        .create_user(&request.email)
        .await
        .map_err(|err| vendor_failure("Creating MX user", err))?;
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// Axum handler producing a Connect widget URL for an existing user.
#[axum::debug_handler]
pub async fn widget_url_handler(
    State(state): State<Arc<MxState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<WidgetUrlResponse>, ApiError> {
    let query: WidgetUrlQuery = require_query(params, &["userGuid"])?;
    let url = state
        .client
        .connect_widget_url(&query.user_guid)
        .await
        .map_err(|err| vendor_failure("Generating MX widget URL", err))?;
    Ok(Json(WidgetUrlResponse { url }))
}

/// Axum handler listing the verified account numbers of a member.
#[axum::debug_handler]
pub async fn verified_accounts_handler(
    State(state): State<Arc<MxState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<VerifiedAccountsResponse>, ApiError> {
    let query: VerifiedAccountsQuery = require_query(params, &["memberGuid", "userGuid"])?;
    let accounts = state
        .client
        .list_verified_accounts(&query.member_guid, &query.user_guid)
        .await
        .map_err(|err| vendor_failure("Listing MX verified accounts", err))?;
    Ok(Json(VerifiedAccountsResponse { accounts }))
}

/// Axum handler requesting an authorization code for one verified account.
#[axum::debug_handler]
pub async fn authorization_code_handler(
    State(state): State<Arc<MxState>>,
    Json(payload): Json<Value>,
) -> Result<Json<AuthorizationCodeResponse>, ApiError> {
    let request: AuthorizationCodeRequest =
        require_keys(payload, &["accountGuid", "memberGuid", "userGuid"])?;
    let token = state
        .client
        .request_authorization_code(
            &request.account_guid,
            &request.member_guid,
            &request.user_guid,
        )
        .await
        .map_err(|err| vendor_failure("Requesting MX authorization code", err))?;
    Ok(Json(AuthorizationCodeResponse { token }))
}
