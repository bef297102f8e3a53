// --- File: crates/banklink_common/src/api.rs ---
//! The HTTP response contract shared by every Banklink route: how missing
//! request properties, unsupported methods and vendor failures are reported.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::error::HttpStatusCode;
use crate::validation::missing_keys;

/// Body sent for any failure the API does not map to a more specific status.
/// Deliberately opaque; the actual cause goes to the logs.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Internal Server Error: Check server logs for more information.";

/// An error ready to be rendered as an HTTP response.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with the comma-joined list of missing request properties.
    MissingProperties(Vec<String>),
    /// 405 with a plain-text body naming the rejected method.
    MethodNotAllowed(Method),
    /// 4xx passed through from a vendor/platform error.
    Status(StatusCode, String),
    /// 500 with the opaque message; details are logged, not returned.
    Internal,
}

impl ApiError {
    pub fn missing_properties(keys: &[&str]) -> Self {
        ApiError::MissingProperties(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingProperties(keys) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": format!(
                        "The following JSON properties are missing: {}",
                        keys.join(",")
                    )
                })),
            )
                .into_response(),
            ApiError::MethodNotAllowed(method) => (
                StatusCode::METHOD_NOT_ALLOWED,
                format!("Method {method} Not Allowed"),
            )
                .into_response(),
            ApiError::Status(status, message) => {
                (status, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
            )
                .into_response(),
        }
    }
}

/// Validates that `keys` are all present and non-empty in `value` (see
/// [`missing_keys`] for what counts as empty), then deserializes the body
/// into the handler's request type.
pub fn require_keys<T: DeserializeOwned>(value: Value, keys: &[&str]) -> Result<T, ApiError> {
    let empty = Map::new();
    let body = value.as_object().unwrap_or(&empty);
    let missing = missing_keys(body, keys);
    if !missing.is_empty() {
        return Err(ApiError::missing_properties(&missing));
    }
    serde_json::from_value(value).map_err(|err| {
        tracing::error!("Failed to deserialize validated request body: {err}");
        ApiError::Internal
    })
}

/// Fallback handler producing the `Method {m} Not Allowed` contract.
/// Attach to each method router: `post(handler).fallback(method_not_allowed)`.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method)
}

/// Maps a vendor/platform failure onto the response contract.
///
/// Client errors (4xx per the error's [`HttpStatusCode`]) pass through with
/// their message; everything else collapses to the opaque 500. The underlying
/// error is always logged here with the failing operation.
pub fn vendor_failure<E>(operation: &str, err: E) -> ApiError
where
    E: HttpStatusCode + std::fmt::Display,
{
    tracing::error!("{operation} failed: {err}");
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_client_error() {
        ApiError::Status(status, err.to_string())
    } else {
        ApiError::Internal
    }
}
