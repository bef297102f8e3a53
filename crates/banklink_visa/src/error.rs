// --- File: crates/banklink_visa/src/error.rs ---

use banklink_common::error::{BanklinkError, HttpStatusCode};
use banklink_dwolla::DwollaError;
use thiserror::Error;

/// Errors specific to the Visa open-banking integration.
///
/// The hosted session flow runs entirely against the payments platform, so
/// most failures are platform failures.
#[derive(Error, Debug)]
pub enum VisaError {
    #[error(transparent)]
    Platform(#[from] DwollaError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<VisaError> for BanklinkError {
    fn from(err: VisaError) -> Self {
        match err {
            VisaError::Platform(e) => e.into(),
            VisaError::ConfigError(msg) => BanklinkError::ConfigError(msg),
        }
    }
}

impl HttpStatusCode for VisaError {
    fn status_code(&self) -> u16 {
        match self {
            VisaError::Platform(e) => e.status_code(),
            VisaError::ConfigError(_) => 500,
        }
    }
}
