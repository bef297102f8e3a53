// --- File: crates/banklink_plaid/src/logic.rs ---
//! Plaid Link lifecycle: create a Link token for the hosted modal, then turn
//! the resulting public token into a processor token scoped to the payments
//! platform.

use crate::error::PlaidError;
use banklink_common::HTTP_CLIENT;
use banklink_config::PlaidConfig;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use tracing::info;
use uuid::Uuid;

/// API version pinned on every request.
const PLAID_VERSION: &str = "2020-09-14";

/// Name the hosted Link modal displays for this application.
const CLIENT_NAME: &str = "Banklink";

/// Redirect registered with Plaid when the config does not override it.
const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000";

/// API host for a Plaid environment name (sandbox, development, production).
pub(crate) fn plaid_base_url(environment: &str) -> String {
    format!("https://{environment}.plaid.com")
}

// --- Structures for the Plaid API ---

#[derive(Debug, Serialize)]
struct LinkTokenUser {
    client_user_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LinkTokenRequest {
    client_name: &'static str,
    country_codes: &'static [&'static str],
    language: &'static str,
    products: &'static [&'static str],
    user: LinkTokenUser,
    redirect_uri: String,
}

impl LinkTokenRequest {
    pub(crate) fn new(redirect_uri: String) -> Self {
        LinkTokenRequest {
            client_name: CLIENT_NAME,
            country_codes: &["US"],
            language: "en",
            products: &["auth"],
            // One Link session per token; a stable user id would come from a
            // user store, which this service does not have.
            user: LinkTokenUser {
                client_user_id: Uuid::new_v4().to_string(),
            },
            redirect_uri,
        }
    }
}

/// A created Link token as returned by Plaid.
#[derive(Debug, Deserialize)]
pub struct LinkTokenData {
    pub link_token: String,
    pub expiration: String,
    pub request_id: String,
}

#[derive(Debug, Deserialize)]
struct PublicTokenExchangeData {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ProcessorTokenData {
    processor_token: String,
}

// --- Client ---

/// Client for the Plaid API. Holds the per-request auth headers and the
/// environment host.
pub struct PlaidClient {
    client: Client,
    base_url: String,
    client_id: String,
    secret: String,
    redirect_uri: String,
}

impl PlaidClient {
    /// Builds a client for the configured environment. Credentials come from
    /// the PLAID_CLIENT_ID and PLAID_SECRET environment variables.
    pub fn new(config: &PlaidConfig) -> Result<Self, PlaidError> {
        let client_id = env::var("PLAID_CLIENT_ID")
            .map_err(|_| PlaidError::ConfigError("PLAID_CLIENT_ID not set".to_string()))?;
        let secret = env::var("PLAID_SECRET")
            .map_err(|_| PlaidError::ConfigError("PLAID_SECRET not set".to_string()))?;
        let redirect_uri = config
            .redirect_uri
            .clone()
            .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
        Ok(Self::with_credentials(
            plaid_base_url(&config.environment),
            client_id,
            secret,
            redirect_uri,
        ))
    }

    /// Builds a client against an explicit base URL with explicit credentials.
    /// Tests use this to point at a local stub server.
    pub fn with_credentials(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: HTTP_CLIENT.clone(),
            base_url,
            client_id: client_id.into(),
            secret: secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PlaidError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("PLAID-CLIENT-ID", &self.client_id)
            .header("PLAID-SECRET", &self.secret)
            .header("Plaid-Version", PLAID_VERSION)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status, body_text));
        }
        Ok(serde_json::from_str(&body_text)?)
    }

    /// Creates a Link token for the hosted account-linking modal.
    pub async fn create_link_token(&self) -> Result<LinkTokenData, PlaidError> {
        let request = LinkTokenRequest::new(self.redirect_uri.clone());
        let data: LinkTokenData = self.post_json("/link/token/create", &request).await?;
        info!(request_id = %data.request_id, "Link token created");
        Ok(data)
    }

    /// Exchanges a public token from a completed Link session for a processor
    /// token the payments platform accepts.
    ///
    /// Two sequential calls: the public token becomes an access token, the
    /// access token plus the selected account becomes the processor token.
    /// The second call never runs when the first fails.
    pub async fn exchange_public_token(
        &self,
        account_id: &str,
        public_token: &str,
    ) -> Result<String, PlaidError> {
        let exchange: PublicTokenExchangeData = self
            .post_json(
                "/item/public_token/exchange",
                &json!({ "public_token": public_token }),
            )
            .await?;

        let processor: ProcessorTokenData = self
            .post_json(
                "/processor/token/create",
                &json!({
                    "access_token": exchange.access_token,
                    "account_id": account_id,
                    "processor": "dwolla",
                }),
            )
            .await?;
        info!("Public token exchanged for a processor token");
        Ok(processor.processor_token)
    }
}

/// Builds an ApiError from a non-success Plaid response, preferring the
/// error_message field of Plaid's error bodies.
fn api_error(status: StatusCode, body: String) -> PlaidError {
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("error_message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(body);
    PlaidError::ApiError {
        status_code: status.as_u16(),
        message,
    }
}
