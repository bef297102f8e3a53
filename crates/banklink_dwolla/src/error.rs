// --- File: crates/banklink_dwolla/src/error.rs ---
use banklink_common::{external_service_error, BanklinkError, HttpStatusCode};
use thiserror::Error;

/// Dwolla-specific error types.
#[derive(Error, Debug)]
pub enum DwollaError {
    /// Error occurred during a Dwolla API request
    #[error("Dwolla API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Dwolla API
    #[error("Dwolla API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing a Dwolla API response
    #[error("Failed to parse Dwolla API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Platform credentials were rejected or the token endpoint failed
    #[error("Dwolla authentication failed: {0}")]
    AuthError(String),

    /// Missing or incomplete Dwolla configuration
    #[error("Dwolla configuration missing or incomplete: {0}")]
    ConfigError(String),

    /// No exchange partner with the requested name is registered
    #[error("Unknown exchange partner: {0}")]
    UnknownPartner(String),

    /// A created-resource response carried no Location header
    #[error("Dwolla response carried no Location header for the created resource")]
    MissingLocation,

    /// The artifact does not translate into an exchange request
    #[error("A {0} artifact carries no exchange request; the exchange already exists")]
    UnsupportedArtifact(String),
}

/// Convert DwollaError to BanklinkError
impl From<DwollaError> for BanklinkError {
    fn from(err: DwollaError) -> Self {
        match err {
            DwollaError::RequestError(e) => {
                BanklinkError::HttpError(format!("Dwolla request error: {e}"))
            }
            DwollaError::ApiError {
                status_code,
                message,
            } => external_service_error(
                "Dwolla API",
                format!("Status: {status_code}, Message: {message}"),
            ),
            DwollaError::ParseError(e) => {
                BanklinkError::ParseError(format!("Dwolla response parse error: {e}"))
            }
            DwollaError::AuthError(msg) => BanklinkError::AuthError(msg),
            DwollaError::ConfigError(msg) => BanklinkError::ConfigError(msg),
            DwollaError::UnknownPartner(name) => {
                BanklinkError::NotFoundError(format!("Unknown exchange partner: {name}"))
            }
            DwollaError::MissingLocation => external_service_error(
                "Dwolla API",
                "created-resource response carried no Location header",
            ),
            DwollaError::UnsupportedArtifact(vendor) => BanklinkError::ValidationError(format!(
                "A {vendor} artifact carries no exchange request"
            )),
        }
    }
}

impl HttpStatusCode for DwollaError {
    fn status_code(&self) -> u16 {
        match self {
            DwollaError::RequestError(_) => 500,
            DwollaError::ApiError { status_code, .. } => *status_code,
            DwollaError::ParseError(_) => 502,
            DwollaError::AuthError(_) => 500,
            DwollaError::ConfigError(_) => 500,
            DwollaError::UnknownPartner(_) => 404,
            DwollaError::MissingLocation => 502,
            DwollaError::UnsupportedArtifact(_) => 400,
        }
    }
}
