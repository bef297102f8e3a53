// --- File: crates/banklink_finicity/src/handlers.rs ---
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use banklink_common::{require_keys, vendor_failure, ApiError};
use banklink_config::AppConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::client::FinicityClient;

// --- State for Finicity Handlers ---
#[derive(Clone)]
pub struct FinicityState {
    pub config: Arc<AppConfig>,
    pub client: Arc<FinicityClient>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    #[cfg_attr(feature = "openapi", schema(example = "jane.merchant"))]
    pub username: String,
}

/// Id of the created Finicity customer.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct CreateCustomerResponse {
    pub id: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectUrlRequest {
    pub customer_id: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct ConnectUrlResponse {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://connect2.finicity.com?customerId=7025626737&origin=url")
    )]
    pub link: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequest {
    pub customer_id: String,
    /// Bank account chosen from the customer's linked accounts.
    pub account_id: String,
}

/// Axum handler creating a testing customer.
#[axum::debug_handler]
pub async fn create_customer_handler(
    State(state): State<Arc<FinicityState>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<CreateCustomerResponse>), ApiError> {
    let request: CreateCustomerRequest = require_keys(payload, &["username"])?;
    let id = state
        .client
        .create_testing_customer(&request.username)
        .await
        .map_err(|err| vendor_failure("Creating Finicity customer", err))?;
    Ok((StatusCode::CREATED, Json(CreateCustomerResponse { id })))
}

/// Axum handler generating the hosted Connect URL for a customer.
#[axum::debug_handler]
pub async fn connect_url_handler(
    State(state): State<Arc<FinicityState>>,
    Json(payload): Json<Value>,
) -> Result<Json<ConnectUrlResponse>, ApiError> {
    let request: ConnectUrlRequest = require_keys(payload, &["customerId"])?;
    let link = state
        .client
        .generate_connect_url(&request.customer_id)
        .await
        .map_err(|err| vendor_failure("Generating Connect URL", err))?;
    Ok(Json(ConnectUrlResponse { link }))
}

/// Axum handler listing the accounts a customer linked through Connect.
/// Responds with the bare account array.
#[axum::debug_handler]
pub async fn customer_accounts_handler(
    State(state): State<Arc<FinicityState>>,
    Path(customer_id): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let accounts = state
        .client
        .get_customer_accounts(&customer_id)
        .await
        .map_err(|err| vendor_failure("Listing customer accounts", err))?;
    Ok(Json(accounts))
}

/// Axum handler fetching the partner consent receipt for one account.
/// Responds with the receipt object itself.
#[axum::debug_handler]
pub async fn consent_handler(
    State(state): State<Arc<FinicityState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let request: ConsentRequest = require_keys(payload, &["accountId", "customerId"])?;
    let receipt = state
        .client
        .fetch_partner_consent(&request.customer_id, &request.account_id)
        .await
        .map_err(|err| vendor_failure("Fetching partner consent", err))?;
    Ok(Json(receipt))
}
