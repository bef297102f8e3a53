// --- File: crates/banklink_dwolla/src/client.rs ---
//! Client for the Dwolla platform API.
//!
//! Handles the client-credentials token lifecycle, the HAL media type and the
//! Location-header result convention shared by every created resource.

use crate::error::DwollaError;
use crate::models::{
    BankAccountType, CreatePartyOptions, ExchangePartner, ExchangeReference, LinkArtifact,
    PartyRef, ResourceLocation,
};
use banklink_common::{eq_ignore_case, TokenCache, HTTP_CLIENT};
use banklink_config::{DwollaConfig, DwollaEnvironment};
use chrono::{DateTime, Duration, Utc};
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use tracing::info;

const PRODUCTION_BASE_URL: &str = "https://api.dwolla.com";
const SANDBOX_BASE_URL: &str = "https://api-sandbox.dwolla.com";

/// Media type for all platform requests and responses.
const DWOLLA_MEDIA_TYPE: &str = "application/vnd.dwolla.v1.hal+json";

/// Tokens are treated as expired this long before the platform says they are,
/// so an almost-stale token is never sent.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct PartnerList {
    #[serde(rename = "_embedded")]
    embedded: EmbeddedPartners,
}

#[derive(Debug, Deserialize)]
struct EmbeddedPartners {
    #[serde(rename = "exchange-partners")]
    partners: Vec<ExchangePartner>,
}

#[derive(Debug, Deserialize)]
struct ExchangeSession {
    #[serde(rename = "_links")]
    links: ExchangeSessionLinks,
}

#[derive(Debug, Deserialize)]
struct ExchangeSessionLinks {
    #[serde(rename = "external-provider-session")]
    external_provider_session: crate::models::Link,
}

/// Client for the Dwolla platform API.
///
/// Holds the API credentials and a cache for the short-lived bearer token;
/// build one per process (or per test server) and share it.
pub struct DwollaClient {
    client: Client,
    base_url: String,
    key: String,
    secret: String,
    token_cache: TokenCache,
}

impl DwollaClient {
    /// Builds a client for the configured environment. Credentials come from
    /// the DWOLLA_KEY and DWOLLA_SECRET environment variables.
    pub fn new(config: &DwollaConfig) -> Result<Self, DwollaError> {
        let base_url = match config.environment {
            DwollaEnvironment::Production => PRODUCTION_BASE_URL,
            DwollaEnvironment::Sandbox => SANDBOX_BASE_URL,
        };
        let key = env::var("DWOLLA_KEY")
            .map_err(|_| DwollaError::ConfigError("DWOLLA_KEY not set".to_string()))?;
        let secret = env::var("DWOLLA_SECRET")
            .map_err(|_| DwollaError::ConfigError("DWOLLA_SECRET not set".to_string()))?;
        Ok(Self::with_credentials(base_url, key, secret))
    }

    /// Builds a client against an explicit base URL with explicit credentials.
    /// Tests use this to point at a local stub server.
    pub fn with_credentials(
        base_url: impl Into<String>,
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: HTTP_CLIENT.clone(),
            base_url,
            key: key.into(),
            secret: secret.into(),
            token_cache: TokenCache::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The canonical URL of an exchange resource. Session-driven flows only
    /// learn the exchange id and synthesize the URL from it.
    pub fn exchange_url(&self, exchange_id: &str) -> String {
        format!("{}/exchanges/{}", self.base_url, exchange_id)
    }

    /// The canonical URL of an exchange-partner resource.
    pub fn exchange_partner_url(&self, partner_id: &str) -> String {
        format!("{}/exchange-partners/{}", self.base_url, partner_id)
    }

    // --- Token handling ---

    async fn bearer_token(&self) -> Result<String, DwollaError> {
        self.token_cache
            .ensure_fresh(|| self.request_token())
            .await
    }

    /// Requests a client-credentials token from the platform.
    async fn request_token(&self) -> Result<(String, DateTime<Utc>), DwollaError> {
        let response = self
            .client
            .post(format!("{}/token", self.base_url))
            .basic_auth(&self.key, Some(&self.secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            return Err(DwollaError::AuthError(format!(
                "token endpoint returned {status}: {body_text}"
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body_text)?;
        let lifetime = token.expires_in.saturating_sub(TOKEN_EXPIRY_MARGIN_SECS);
        Ok((token.access_token, Utc::now() + Duration::seconds(lifetime)))
    }

    // --- Request helpers ---

    /// POST expecting a created resource; the result is the Location header.
    async fn post_for_location(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ResourceLocation, DwollaError> {
        let token = self.bearer_token().await?;
        let mut request = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .bearer_auth(token)
            .header(header::ACCEPT, DWOLLA_MEDIA_TYPE);
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, DWOLLA_MEDIA_TYPE)
                .json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(api_error(status, body_text));
        }

        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ResourceLocation::new)
            .ok_or(DwollaError::MissingLocation)
    }

    async fn get_json(&self, path: &str) -> Result<Value, DwollaError> {
        let token = self.bearer_token().await?;
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .bearer_auth(token)
            .header(header::ACCEPT, DWOLLA_MEDIA_TYPE)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status, body_text));
        }
        Ok(serde_json::from_str(&body_text)?)
    }

    // --- Operations ---

    /// Creates an unverified customer record.
    pub async fn create_unverified_customer(
        &self,
        options: &CreatePartyOptions,
    ) -> Result<ResourceLocation, DwollaError> {
        let location = self
            .post_for_location("customers", Some(&serde_json::to_value(options)?))
            .await?;
        info!(location = %location.href(), "Customer created");
        Ok(location)
    }

    /// Creates an external party record.
    pub async fn create_external_party(
        &self,
        options: &CreatePartyOptions,
    ) -> Result<ResourceLocation, DwollaError> {
        let location = self
            .post_for_location("external-parties", Some(&serde_json::to_value(options)?))
            .await?;
        info!(location = %location.href(), "External party created");
        Ok(location)
    }

    /// Lists all exchange partners registered on the platform.
    pub async fn list_exchange_partners(&self) -> Result<Vec<ExchangePartner>, DwollaError> {
        let body = self.get_json("exchange-partners").await?;
        let list: PartnerList = serde_json::from_value(body)?;
        Ok(list.embedded.partners)
    }

    /// Looks up an exchange partner by its registered name.
    ///
    /// Matching ignores case but nothing else, so "mx" resolves the MX partner
    /// while "MX2" never does.
    pub async fn resolve_exchange_partner(
        &self,
        name: &str,
    ) -> Result<ExchangeReference, DwollaError> {
        let partners = self.list_exchange_partners().await?;
        partners
            .iter()
            .find(|partner| eq_ignore_case(&partner.name, name))
            .and_then(|partner| partner.reference())
            .ok_or_else(|| DwollaError::UnknownPartner(name.to_string()))
    }

    /// Creates an exchange for a party from a vendor link artifact.
    ///
    /// The Visa variant is rejected here: its exchange was already created by
    /// the hosted session and only the funding-source step remains.
    pub async fn create_exchange(
        &self,
        party: &PartyRef,
        partner: &ExchangeReference,
        artifact: &LinkArtifact,
    ) -> Result<ResourceLocation, DwollaError> {
        let body = artifact
            .exchange_body(partner)
            .ok_or_else(|| DwollaError::UnsupportedArtifact(artifact.partner_name().to_string()))?;

        let path = format!("{}/{}/exchanges", party.path_prefix(), party.id());
        let location = self.post_for_location(&path, Some(&body)).await?;
        info!(
            vendor = artifact.partner_name(),
            location = %location.href(),
            "Exchange created"
        );
        Ok(location)
    }

    /// Creates an exchange session, the entry point of a hosted link flow.
    pub async fn create_exchange_session(
        &self,
        party: &PartyRef,
        partner: &ExchangeReference,
    ) -> Result<ResourceLocation, DwollaError> {
        let body = json!({
            "_links": {
                "exchange-partner": {
                    "href": partner.href,
                }
            }
        });
        let path = format!("{}/{}/exchange-sessions", party.path_prefix(), party.id());
        let location = self.post_for_location(&path, Some(&body)).await?;
        info!(location = %location.href(), "Exchange session created");
        Ok(location)
    }

    /// Fetches the hosted external-provider URL for an exchange session.
    pub async fn get_exchange_session(&self, session_id: &str) -> Result<String, DwollaError> {
        let body = self
            .get_json(&format!("exchange-sessions/{session_id}"))
            .await?;
        let session: ExchangeSession = serde_json::from_value(body)?;
        Ok(session.links.external_provider_session.href)
    }

    /// Creates a funding source for a party from an exchange URL.
    ///
    /// Not idempotent: submitting the same exchange and name twice creates two
    /// distinct funding sources.
    pub async fn create_funding_source(
        &self,
        party: &PartyRef,
        exchange_url: &str,
        name: &str,
        bank_account_type: BankAccountType,
    ) -> Result<ResourceLocation, DwollaError> {
        let body = json!({
            "_links": {
                "exchange": {
                    "href": exchange_url,
                }
            },
            "bankAccountType": bank_account_type,
            "name": name,
        });
        let path = format!("{}/{}/funding-sources", party.path_prefix(), party.id());
        let location = self.post_for_location(&path, Some(&body)).await?;
        info!(location = %location.href(), "Funding source created");
        Ok(location)
    }

    /// Creates an on-demand transfer authorization and returns the resource
    /// body, whose _links the customer-facing UI presents for acceptance.
    pub async fn create_on_demand_authorization(&self) -> Result<Value, DwollaError> {
        let token = self.bearer_token().await?;
        let response = self
            .client
            .post(format!("{}/on-demand-authorizations", self.base_url))
            .bearer_auth(token)
            .header(header::ACCEPT, DWOLLA_MEDIA_TYPE)
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status, body_text));
        }
        Ok(serde_json::from_str(&body_text)?)
    }
}

/// Builds an ApiError from a non-success platform response, preferring the
/// message field the platform embeds in its error bodies.
fn api_error(status: StatusCode, body: String) -> DwollaError {
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(body);
    DwollaError::ApiError {
        status_code: status.as_u16(),
        message,
    }
}
