// --- File: crates/banklink_dwolla/src/doc.rs ---
#![allow(dead_code)] // Allow unused code for documentation purposes
#![cfg(feature = "openapi")]

use crate::handlers::{
    CreateExchangeRequest, CreateFundingSourceRequest, LinkFundingSourceRequest,
    LocationResponse, OnDemandAuthorizationResponse, PartnerSummary, PartnersResponse,
};
use crate::models::{BankAccountType, CreatePartyOptions, LinkArtifact, MxArtifact};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/dwolla/customers",
    request_body = CreatePartyOptions,
    responses(
        (status = 200, description = "Unverified customer created, location of the new record", body = LocationResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dwolla"
)]
fn doc_create_customer() {}

#[utoipa::path(
    post,
    path = "/dwolla/external-parties",
    request_body = CreatePartyOptions,
    responses(
        (status = 200, description = "External party created, location of the new record", body = LocationResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dwolla"
)]
fn doc_create_external_party() {}

#[utoipa::path(
    get,
    path = "/dwolla/exchange-partners",
    responses(
        (status = 200, description = "List of available exchange partners", body = PartnersResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dwolla"
)]
fn doc_list_exchange_partners() {}

#[utoipa::path(
    post,
    path = "/dwolla/exchanges",
    request_body = CreateExchangeRequest,
    responses(
        (status = 200, description = "Exchange created, location of the new record", body = LocationResponse),
        (status = 400, description = "Required JSON properties missing or artifact unsupported"),
        (status = 404, description = "Exchange partner not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dwolla"
)]
fn doc_create_exchange() {}

#[utoipa::path(
    post,
    path = "/dwolla/funding-sources",
    request_body = CreateFundingSourceRequest,
    responses(
        (status = 200, description = "Funding source created, location of the new record", body = LocationResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dwolla"
)]
fn doc_create_funding_source() {}

#[utoipa::path(
    post,
    path = "/dwolla/link-funding-source",
    request_body = LinkFundingSourceRequest,
    responses(
        (status = 200, description = "Exchange and funding source created, location of the funding source", body = LocationResponse),
        (status = 400, description = "Required JSON properties missing or artifact unsupported"),
        (status = 404, description = "Exchange partner not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dwolla"
)]
fn doc_link_funding_source() {}

#[utoipa::path(
    post,
    path = "/dwolla/on-demand-authorizations",
    responses(
        (status = 200, description = "On-demand authorization created", body = OnDemandAuthorizationResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dwolla"
)]
fn doc_create_on_demand_authorization() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_customer,
        doc_create_external_party,
        doc_list_exchange_partners,
        doc_create_exchange,
        doc_create_funding_source,
        doc_link_funding_source,
        doc_create_on_demand_authorization,
    ),
    components(schemas(
        CreatePartyOptions,
        BankAccountType,
        LinkArtifact,
        MxArtifact,
        LocationResponse,
        PartnersResponse,
        PartnerSummary,
        OnDemandAuthorizationResponse,
        CreateExchangeRequest,
        CreateFundingSourceRequest,
        LinkFundingSourceRequest,
    )),
    tags(
        (name = "Dwolla", description = "Dwolla account, exchange and funding source endpoints")
    )
)]
pub struct DwollaApiDoc;
