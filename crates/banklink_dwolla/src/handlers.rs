// --- File: crates/banklink_dwolla/src/handlers.rs ---
use axum::{extract::State, Json};
use banklink_common::{require_keys, vendor_failure, ApiError};
use banklink_config::AppConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::client::DwollaClient;
use crate::flow::{link_funding_source, LinkFundingSourceOptions};
use crate::models::{
    BankAccountType, CreatePartyOptions, ExchangeReference, LinkArtifact, PartyRef,
};

// --- State for Dwolla Handlers ---
#[derive(Clone)]
pub struct DwollaState {
    pub config: Arc<AppConfig>,
    pub client: Arc<DwollaClient>,
}

/// Location of the created resource.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://api-sandbox.dwolla.com/funding-sources/6a4d32a2")
    )]
    pub location: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct PartnersResponse {
    pub partners: Vec<PartnerSummary>,
}

/// An exchange partner with both reference forms callers use.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct PartnerSummary {
    #[cfg_attr(feature = "openapi", schema(example = "Plaid"))]
    pub name: String,
    pub href: String,
    pub id: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Serialize)]
pub struct OnDemandAuthorizationResponse {
    /// The authorization resource body; its _links are presented to the
    /// customer for acceptance.
    pub body: Value,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExchangeRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub external_party_id: Option<String>,
    /// Partner href resolved by the caller; resolved by artifact vendor name
    /// when absent.
    #[serde(default)]
    pub exchange_partner_href: Option<String>,
    /// Alternative to exchangePartnerHref for callers that only carry the id.
    #[serde(default)]
    pub exchange_partner_id: Option<String>,
    pub artifact: LinkArtifact,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFundingSourceRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub external_party_id: Option<String>,
    #[serde(default)]
    pub exchange_url: Option<String>,
    /// Alternative to exchangeUrl for session-driven flows that only learn
    /// the exchange id from the redirect.
    #[serde(default)]
    pub exchange_id: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Jane's Checking"))]
    pub name: String,
    #[serde(rename = "type")]
    pub bank_account_type: BankAccountType,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkFundingSourceRequest {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub external_party_id: Option<String>,
    #[serde(default)]
    pub exchange_partner_href: Option<String>,
    #[serde(default)]
    pub exchange_partner_id: Option<String>,
    pub artifact: LinkArtifact,
    pub name: String,
    #[serde(rename = "type")]
    pub bank_account_type: BankAccountType,
}

/// Partner reference from the request fields, when the caller supplied one.
/// An href wins over a bare id; a bare id gets its canonical URL synthesized.
fn explicit_partner(
    client: &DwollaClient,
    href: Option<String>,
    id: Option<String>,
) -> Option<ExchangeReference> {
    let href = href.filter(|href| !href.is_empty());
    let id = id.filter(|id| !id.is_empty());
    match (href, id) {
        (Some(href), _) => Some(ExchangeReference::from_href(href)),
        (None, Some(id)) => Some(ExchangeReference::from_href(client.exchange_partner_url(&id))),
        (None, None) => None,
    }
}

/// Builds the party scope from the id fields, treating empty strings as
/// absent. The classic customer flows dominate, so the 400 names customerId.
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

/// Axum handler to create an unverified customer.
#[axum::debug_handler]
pub async fn create_customer_handler(
    State(state): State<Arc<DwollaState>>,
    Json(payload): Json<Value>,
) -> Result<Json<LocationResponse>, ApiError> {
    let options: CreatePartyOptions =
        require_keys(payload, &["firstName", "lastName", "email"])?;
    let location = state
        .client
        .create_unverified_customer(&options)
        .await
        .map_err(|err| vendor_failure("Creating customer", err))?;
    Ok(Json(LocationResponse {
        location: location.into_href(),
    }))
}

/// Axum handler to create an external party.
#[axum::debug_handler]
pub async fn create_external_party_handler(
    State(state): State<Arc<DwollaState>>,
    Json(payload): Json<Value>,
) -> Result<Json<LocationResponse>, ApiError> {
    let options: CreatePartyOptions =
        require_keys(payload, &["firstName", "lastName", "email"])?;
    let location = state
        .client
        .create_external_party(&options)
        .await
        .map_err(|err| vendor_failure("Creating external party", err))?;
    Ok(Json(LocationResponse {
        location: location.into_href(),
    }))
}

/// Axum handler listing the registered exchange partners.
#[axum::debug_handler]
pub async fn list_exchange_partners_handler(
    State(state): State<Arc<DwollaState>>,
) -> Result<Json<PartnersResponse>, ApiError> {
    let partners = state
        .client
        .list_exchange_partners()
        .await
        .map_err(|err| vendor_failure("Listing exchange partners", err))?;

    let partners = partners
        .into_iter()
        .filter_map(|partner| {
            let reference = partner.reference()?;
            Some(PartnerSummary {
                name: partner.name,
                href: reference.href,
                id: reference.id,
            })
        })
        .collect();
    Ok(Json(PartnersResponse { partners }))
}

/// Axum handler to create an exchange from a vendor link artifact.
#[axum::debug_handler]
pub async fn create_exchange_handler(
    State(state): State<Arc<DwollaState>>,
    Json(payload): Json<Value>,
) -> Result<Json<LocationResponse>, ApiError> {
    let request: CreateExchangeRequest = require_keys(payload, &["artifact"])?;
    let party = resolve_party(request.customer_id, request.external_party_id)?;

    let partner = match explicit_partner(
        &state.client,
        request.exchange_partner_href,
        request.exchange_partner_id,
    ) {
        Some(partner) => partner,
        None => state
            .client
            .resolve_exchange_partner(request.artifact.partner_name())
            .await
            .map_err(|err| vendor_failure("Resolving exchange partner", err))?,
    };

    let location = state
        .client
        .create_exchange(&party, &partner, &request.artifact)
        .await
        .map_err(|err| vendor_failure("Creating exchange", err))?;
    Ok(Json(LocationResponse {
        location: location.into_href(),
    }))
}

/// Axum handler to create a funding source from an existing exchange.
#[axum::debug_handler]
pub async fn create_funding_source_handler(
    State(state): State<Arc<DwollaState>>,
    Json(payload): Json<Value>,
) -> Result<Json<LocationResponse>, ApiError> {
    let request: CreateFundingSourceRequest = require_keys(payload, &["name", "type"])?;
    let party = resolve_party(request.customer_id, request.external_party_id)?;

    let exchange_url = match (
        request.exchange_url.filter(|url| !url.is_empty()),
        request.exchange_id.filter(|id| !id.is_empty()),
    ) {
        (Some(url), _) => url,
        (None, Some(id)) => state.client.exchange_url(&id),
        (None, None) => return Err(ApiError::missing_properties(&["exchangeUrl"])),
    };

    let location = state
        .client
        .create_funding_source(&party, &exchange_url, &request.name, request.bank_account_type)
        .await
        .map_err(|err| vendor_failure("Creating funding source", err))?;
    Ok(Json(LocationResponse {
        location: location.into_href(),
    }))
}

/// Axum handler running the whole artifact-to-funding-source flow.
#[axum::debug_handler]
pub async fn link_funding_source_handler(
    State(state): State<Arc<DwollaState>>,
    Json(payload): Json<Value>,
) -> Result<Json<LocationResponse>, ApiError> {
    let request: LinkFundingSourceRequest = require_keys(payload, &["artifact", "name", "type"])?;
    let party = resolve_party(request.customer_id, request.external_party_id)?;
    let partner = explicit_partner(
        &state.client,
        request.exchange_partner_href,
        request.exchange_partner_id,
    );

    let location = link_funding_source(
        &state.client,
        LinkFundingSourceOptions {
            party,
            artifact: request.artifact,
            partner,
            name: request.name,
            bank_account_type: request.bank_account_type,
        },
    )
    .await
    .map_err(|err| vendor_failure("Linking funding source", err))?;
    Ok(Json(LocationResponse {
        location: location.into_href(),
    }))
}

/// Axum handler creating an on-demand transfer authorization.
#[axum::debug_handler]
pub async fn create_on_demand_authorization_handler(
    State(state): State<Arc<DwollaState>>,
) -> Result<Json<OnDemandAuthorizationResponse>, ApiError> {
    let body = state
        .client
        .create_on_demand_authorization()
        .await
        .map_err(|err| vendor_failure("Creating on-demand authorization", err))?;
    Ok(Json(OnDemandAuthorizationResponse { body }))
}
