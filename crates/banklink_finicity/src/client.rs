// --- File: crates/banklink_finicity/src/client.rs ---
//! Client for the Finicity API.
//!
//! Handles the partner-authentication token lifecycle and the customer,
//! Connect and consent operations the linking flow needs.

use crate::error::FinicityError;
use banklink_common::{TokenCache, HTTP_CLIENT};
use banklink_config::FinicityConfig;
use chrono::{DateTime, Duration, Months, SecondsFormat, Utc};
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;
use tracing::info;

const FINICITY_BASE_URL: &str = "https://api.finicity.com";

/// App tokens live 90 minutes from issuance. The authentication response does
/// not carry an expiry, the interval is fixed.
const TOKEN_LIFETIME_MINUTES: i64 = 90;

/// The payments platform's own partner id at Finicity, the third party every
/// consent receipt is issued to.
const PLATFORM_THIRD_PARTY_ID: &str = "2445583946651";

const CONSENT_PRODUCT: &str = "moneyTransferDetails";

/// Calls the receipt holder may make before the consent is exhausted.
const CONSENT_MAX_CALLS: u32 = 10;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct CreatedCustomer {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ConnectUrl {
    link: String,
}

#[derive(Debug, Deserialize)]
struct CustomerAccounts {
    accounts: Vec<Value>,
}

/// The consent request for one account, windowed from `now` to one month out.
pub(crate) fn consent_request_body(
    partner_id: &str,
    customer_id: &str,
    account_id: &str,
    now: DateTime<Utc>,
) -> Value {
    let start_time = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let end_time = (now + Months::new(1)).to_rfc3339_opts(SecondsFormat::Millis, true);
    json!({
        "customerId": customer_id,
        "partnerId": partner_id,
        "thirdPartyPartnerId": PLATFORM_THIRD_PARTY_ID,
        "products": [
            {
                "product": CONSENT_PRODUCT,
                "payorId": partner_id,
                "accountId": account_id,
                "maxCalls": CONSENT_MAX_CALLS,
                "accessPeriod": {
                    "type": "timeframe",
                    "startTime": start_time,
                    "endTime": end_time,
                }
            }
        ]
    })
}

/// Client for the Finicity API.
///
/// Holds the partner credentials and a cache for the 90-minute app token;
/// build one per process (or per test server) and share it.
pub struct FinicityClient {
    client: Client,
    base_url: String,
    partner_id: String,
    partner_secret: String,
    app_key: String,
    token_cache: TokenCache,
}

impl FinicityClient {
    /// Builds a client from the config section. The app key and partner
    /// secret come from the FINICITY_APP_KEY and FINICITY_PARTNER_SECRET
    /// environment variables.
    pub fn new(config: &FinicityConfig) -> Result<Self, FinicityError> {
        let app_key = env::var("FINICITY_APP_KEY")
            .map_err(|_| FinicityError::ConfigError("FINICITY_APP_KEY not set".to_string()))?;
        let partner_secret = env::var("FINICITY_PARTNER_SECRET").map_err(|_| {
            FinicityError::ConfigError("FINICITY_PARTNER_SECRET not set".to_string())
        })?;
        Ok(Self::with_credentials(
            FINICITY_BASE_URL,
            config.partner_id.clone(),
            partner_secret,
            app_key,
        ))
    }

    /// Builds a client against an explicit base URL with explicit credentials.
    /// Tests use this to point at a local stub server.
    pub fn with_credentials(
        base_url: impl Into<String>,
        partner_id: impl Into<String>,
        partner_secret: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: HTTP_CLIENT.clone(),
            base_url,
            partner_id: partner_id.into(),
            partner_secret: partner_secret.into(),
            app_key: app_key.into(),
            token_cache: TokenCache::new(),
        }
    }

    // --- Token handling ---

    async fn app_token(&self) -> Result<String, FinicityError> {
        self.token_cache
            .ensure_fresh(|| self.request_token())
            .await
    }

    /// Authenticates the partner and returns a fresh app token.
    async fn request_token(&self) -> Result<(String, DateTime<Utc>), FinicityError> {
        let response = self
            .client
            .post(format!(
                "{}/aggregation/v2/partners/authentication",
                self.base_url
            ))
            .header("Finicity-App-Key", &self.app_key)
            .header(header::ACCEPT, "application/json")
            .json(&json!({
                "partnerId": self.partner_id,
                "partnerSecret": self.partner_secret,
            }))
            .send()
            .await?;

        let status = response.status();
        let body_text = response.text().await?;
        if !status.is_success() {
            return Err(FinicityError::AuthError(format!(
                "authentication endpoint returned {status}: {body_text}"
            )));
        }

        let token: TokenResponse = serde_json::from_str(&body_text)?;
        let expires_at = Utc::now() + Duration::minutes(TOKEN_LIFETIME_MINUTES);
        Ok((token.token, expires_at))
    }

    // --- Request helpers ---

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<T, FinicityError> {
        let token = self.app_token().await?;
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("Finicity-App-Key", &self.app_key)
            .header("Finicity-App-Token", token)
            .header(header::ACCEPT, "application/json")
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

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FinicityError> {
        let token = self.app_token().await?;
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("Finicity-App-Key", &self.app_key)
            .header("Finicity-App-Token", token)
            .header(header::ACCEPT, "application/json")
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

    /// Creates a testing customer; every other call is scoped to one.
    pub async fn create_testing_customer(&self, username: &str) -> Result<String, FinicityError> {
        let customer: CreatedCustomer = self
            .post_json(
                "/aggregation/v2/customers/testing",
                &json!({ "username": username }),
            )
            .await?;
        info!(customer_id = %customer.id, "Testing customer created");
        Ok(customer.id)
    }

    /// Generates the hosted Connect URL for a customer.
    pub async fn generate_connect_url(&self, customer_id: &str) -> Result<String, FinicityError> {
        let url: ConnectUrl = self
            .post_json(
                "/connect/v2/generate",
                &json!({
                    "customerId": customer_id,
                    "partnerId": self.partner_id,
                }),
            )
            .await?;
        Ok(url.link)
    }

    /// Lists the accounts a customer linked through Connect.
    pub async fn get_customer_accounts(
        &self,
        customer_id: &str,
    ) -> Result<Vec<Value>, FinicityError> {
        let accounts: CustomerAccounts = self
            .get_json(&format!(
                "/aggregation/v1/customers/{customer_id}/accounts"
            ))
            .await?;
        Ok(accounts.accounts)
    }

    /// Fetches the partner consent receipt for one account. The receipt is
    /// the artifact the platform's exchange is created from.
    pub async fn fetch_partner_consent(
        &self,
        customer_id: &str,
        account_id: &str,
    ) -> Result<Value, FinicityError> {
        let body = consent_request_body(&self.partner_id, customer_id, account_id, Utc::now());
        let response: Value = self
            .post_json("/aggregation/v1/partners/accessKey", &body)
            .await?;

        let receipt = response
            .get("data")
            .and_then(|data| data.get(0))
            .and_then(|entry| entry.get("receipt"))
            .cloned()
            .ok_or(FinicityError::MissingReceipt)?;
        info!(customer_id, account_id, "Partner consent receipt issued");
        Ok(receipt)
    }
}

/// Builds an ApiError from a non-success Finicity response, preferring the
/// message field of Finicity's error bodies.
fn api_error(status: StatusCode, body: String) -> FinicityError {
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(body);
    FinicityError::ApiError {
        status_code: status.as_u16(),
        message,
    }
}
