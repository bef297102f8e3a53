// --- File: crates/banklink_plaid/src/doc.rs ---
#![allow(dead_code)] // Allow unused code for documentation purposes
#![cfg(feature = "openapi")]

use crate::handlers::{ExchangePublicTokenRequest, ExchangePublicTokenResponse, LinkTokenResponse};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/plaid/create-link-token",
    responses(
        (status = 200, description = "Link token for mounting the hosted modal", body = LinkTokenResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Plaid"
)]
fn doc_create_link_token() {}

#[utoipa::path(
    post,
    path = "/plaid/exchange-public-token",
    request_body = ExchangePublicTokenRequest,
    responses(
        (status = 200, description = "Processor token for the selected account", body = ExchangePublicTokenResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Plaid"
)]
fn doc_exchange_public_token() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_create_link_token, doc_exchange_public_token),
    components(schemas(
        LinkTokenResponse,
        ExchangePublicTokenRequest,
        ExchangePublicTokenResponse,
    )),
    tags(
        (name = "Plaid", description = "Plaid Link and processor-token endpoints")
    )
)]
pub struct PlaidApiDoc;
