// --- File: crates/banklink_plaid/src/handlers.rs ---
use axum::{extract::State, Json};
use banklink_common::{require_keys, vendor_failure, ApiError};
use banklink_config::AppConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::logic::PlaidClient;

// --- State for Plaid Handlers ---
#[derive(Clone)]
pub struct PlaidState {
    pub config: Arc<AppConfig>,
    pub client: Arc<PlaidClient>,
}

/// A Link token for mounting the hosted modal.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTokenResponse {
    #[cfg_attr(feature = "openapi", schema(example = "link-sandbox-7a9f8c2e"))]
    pub link_token: String,
    /// Expiry of the token, RFC 3339.
    pub expiration: String,
    pub request_id: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePublicTokenRequest {
    /// Account selected in the Link modal.
    pub account_id: String,
    pub public_token: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePublicTokenResponse {
    pub processor_token: String,
}

/// Axum handler creating a Link token for the hosted modal.
#[axum::debug_handler]
pub async fn create_link_token_handler(
    State(state): State<Arc<PlaidState>>,
) -> Result<Json<LinkTokenResponse>, ApiError> {
    let data = state
        .client
        .create_link_token()
        .await
        .map_err(|err| vendor_failure("Creating Link token", err))?;
    Ok(Json(LinkTokenResponse {
        link_token: data.link_token,
        expiration: data.expiration,
        request_id: data.request_id,
    }))
}

/// Axum handler exchanging a public token for a processor token.
#[axum::debug_handler]
pub async fn exchange_public_token_handler(
    State(state): State<Arc<PlaidState>>,
    Json(payload): Json<Value>,
) -> Result<Json<ExchangePublicTokenResponse>, ApiError> {
    let request: ExchangePublicTokenRequest =
        require_keys(payload, &["accountId", "publicToken"])?;
    let processor_token = state
        .client
        .exchange_public_token(&request.account_id, &request.public_token)
        .await
        .map_err(|err| vendor_failure("Exchanging public token", err))?;
    Ok(Json(ExchangePublicTokenResponse { processor_token }))
}
