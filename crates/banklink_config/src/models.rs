// --- File: crates/banklink_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Deployment environment of the payments platform.
///
/// Parsed case-insensitively ("Sandbox" and "sandbox" are both accepted) but
/// strictly: any value other than sandbox/production is a configuration error,
/// not a silent fallback.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub enum DwollaEnvironment {
    Sandbox,
    Production,
}

impl DwollaEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            DwollaEnvironment::Sandbox => "sandbox",
            DwollaEnvironment::Production => "production",
        }
    }

    pub fn is_sandbox(&self) -> bool {
        matches!(self, DwollaEnvironment::Sandbox)
    }
}

impl TryFrom<String> for DwollaEnvironment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "sandbox" => Ok(DwollaEnvironment::Sandbox),
            "production" => Ok(DwollaEnvironment::Production),
            other => Err(format!(
                "unknown dwolla environment '{other}', expected 'sandbox' or 'production'"
            )),
        }
    }
}

impl From<DwollaEnvironment> for String {
    fn from(value: DwollaEnvironment) -> Self {
        value.as_str().to_string()
    }
}

// --- Dwolla Platform Config ---
// Holds non-secret platform config. API credentials loaded directly from
// env vars: DWOLLA_KEY, DWOLLA_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DwollaConfig {
    pub environment: DwollaEnvironment,
}

// --- Plaid Config ---
// Secrets loaded directly from env vars: PLAID_CLIENT_ID, PLAID_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlaidConfig {
    /// Plaid environment name: sandbox, development or production.
    #[serde(default = "default_plaid_environment")]
    pub environment: String,
    /// OAuth redirect registered with Plaid for the Link flow.
    pub redirect_uri: Option<String>,
}

fn default_plaid_environment() -> String {
    "sandbox".to_string()
}

// --- Finicity (Mastercard) Config ---
// Secrets loaded directly from env vars: FINICITY_APP_KEY, FINICITY_PARTNER_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FinicityConfig {
    pub partner_id: String,
}

// --- MX Config ---
// API key loaded directly from env var: MX_API_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MxConfig {
    /// MX Platform API base, e.g. https://int-api.mx.com
    pub base_path: String,
    pub client_id: String,
}

// --- Flinks Config ---
// Partner secret loaded directly from env var: FLINKS_API_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FlinksConfig {
    /// Flinks instance name, forms the API and iframe hostnames.
    pub instance: String,
    pub customer_id: String,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_plaid: bool,
    #[serde(default)]
    pub use_finicity: bool,
    #[serde(default)]
    pub use_mx: bool,
    #[serde(default)]
    pub use_flinks: bool,
    #[serde(default)]
    pub use_visa: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub dwolla: Option<DwollaConfig>,
    #[serde(default)]
    pub plaid: Option<PlaidConfig>,
    #[serde(default)]
    pub finicity: Option<FinicityConfig>,
    #[serde(default)]
    pub mx: Option<MxConfig>,
    #[serde(default)]
    pub flinks: Option<FlinksConfig>,
}
