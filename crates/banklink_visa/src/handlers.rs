// --- File: crates/banklink_visa/src/handlers.rs ---
use axum::extract::{Path, State};
use axum::Json;
use banklink_common::{require_keys, vendor_failure, ApiError};
use banklink_config::AppConfig;
use banklink_dwolla::{DwollaClient, PartyRef};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::sessions::{session_url, start_session};

// --- State for Visa Handlers ---
#[derive(Clone)]
pub struct VisaState {
    pub config: Arc<AppConfig>,
    pub client: Arc<DwollaClient>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub external_party_id: Option<String>,
}

/// Location of the created exchange session.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://api-sandbox.dwolla.com/exchange-sessions/fcd15e5f")
    )]
    pub location: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUrlResponse {
    /// Hosted Visa URL the user completes the linking in.
    pub session_url: String,
}

/// Party scope from the request fields, treating empty strings as absent.
/// The open-banking flows usually operate on external parties, but classic
/// customers own sessions too.
fn resolve_party(
    customer_id: Option<String>,
    external_party_id: Option<String>,
) -> Result<PartyRef, ApiError> {
    let customer_id = customer_id.filter(|id| !id.is_empty());
    let external_party_id = external_party_id.filter(|id| !id.is_empty());
    match (customer_id, external_party_id) {
        (Some(id), _) => Ok(PartyRef::Customer(id)),
        (None, Some(id)) => Ok(PartyRef::ExternalParty(id)),
        (None, None) => Err(ApiError::missing_properties(&["customerId"])),
    }
}

/// Axum handler starting a hosted exchange session.
#[axum::debug_handler]
pub async fn create_session_handler(
    State(state): State<Arc<VisaState>>,
    Json(payload): Json<Value>,
) -> Result<Json<SessionResponse>, ApiError> {
    let request: CreateSessionRequest = require_keys(payload, &[])?;
    let party = resolve_party(request.customer_id, request.external_party_id)?;
    let location = start_session(&state.client, &party)
        .await
        .map_err(|err| vendor_failure("Creating exchange session", err))?;
    Ok(Json(SessionResponse {
        location: location.into_href(),
    }))
}

/// Axum handler fetching the hosted URL of an open session.
#[axum::debug_handler]
pub async fn session_url_handler(
    State(state): State<Arc<VisaState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionUrlResponse>, ApiError> {
    let url = session_url(&state.client, &session_id)
        .await
        .map_err(|err| vendor_failure("Fetching exchange session", err))?;
    Ok(Json(SessionUrlResponse { session_url: url }))
}
