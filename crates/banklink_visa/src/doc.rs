// --- File: crates/banklink_visa/src/doc.rs ---
#![allow(dead_code)] // Allow unused code for documentation purposes
#![cfg(feature = "openapi")]

use crate::handlers::{CreateSessionRequest, SessionResponse, SessionUrlResponse};
use utoipa::OpenApi;

#[utoipa::path(
    post,
    path = "/visa/exchange-sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Location of the created exchange session", body = SessionResponse),
        (status = 400, description = "Required JSON properties missing"),
        (status = 404, description = "Visa is not registered as an exchange partner"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Visa"
)]
fn doc_create_session() {}

#[utoipa::path(
    get,
    path = "/visa/exchange-sessions/{session_id}",
    params(
        ("session_id" = String, Path, description = "Id of the exchange session")
    ),
    responses(
        (status = 200, description = "Hosted Visa URL for the session", body = SessionUrlResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Visa"
)]
fn doc_session_url() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_create_session, doc_session_url),
    components(schemas(CreateSessionRequest, SessionResponse, SessionUrlResponse)),
    tags(
        (name = "Visa", description = "Visa hosted exchange-session endpoints")
    )
)]
pub struct VisaApiDoc;
