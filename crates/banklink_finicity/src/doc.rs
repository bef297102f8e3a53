// --- File: crates/banklink_finicity/src/doc.rs ---
#![allow(dead_code)] // Allow unused code for documentation purposes
#![cfg(feature = "openapi")]

use crate::handlers::{
    ConnectUrlRequest, ConnectUrlResponse, ConsentRequest, CreateCustomerRequest,
    CreateCustomerResponse,
};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/finicity/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Testing customer created", body = CreateCustomerResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Finicity"
)]
fn doc_create_customer() {}

#[utoipa::path(
    post,
    path = "/finicity/connect-url",
    request_body = ConnectUrlRequest,
    responses(
        (status = 200, description = "Hosted Connect URL for the customer", body = ConnectUrlResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Finicity"
)]
fn doc_connect_url() {}

#[utoipa::path(
    get,
    path = "/finicity/accounts/{customer_id}",
    params(
        ("customer_id" = String, Path, description = "Finicity customer id")
    ),
    responses(
        (status = 200, description = "Accounts the customer linked through Connect"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Finicity"
)]
fn doc_customer_accounts() {}

#[utoipa::path(
    post,
    path = "/finicity/consent",
    request_body = ConsentRequest,
    responses(
        (status = 200, description = "Partner consent receipt for the account"),
        (status = 400, description = "Required JSON properties missing"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Finicity"
)]
fn doc_consent() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_create_customer, doc_connect_url, doc_customer_accounts, doc_consent),
    components(schemas(
        CreateCustomerRequest,
        CreateCustomerResponse,
        ConnectUrlRequest,
        ConnectUrlResponse,
        ConsentRequest,
    )),
    tags(
        (name = "Finicity", description = "Finicity customer, Connect and consent endpoints")
    )
)]
pub struct FinicityApiDoc;
