// --- File: crates/banklink_flinks/src/client.rs ---

use crate::error::FlinksError;
use banklink_common::http::client::HTTP_CLIENT;
use banklink_config::FlinksConfig;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub(crate) fn api_base_url(instance: &str, customer_id: &str) -> String {
    format!("https://{instance}-api.private.fin.ag/v3/{customer_id}")
}

pub(crate) fn widget_url(instance: &str, demo: bool) -> String {
    format!("https://{instance}-iframe.private.fin.ag/v2/?demo={demo}")
}

/// Embed parameters for the Flinks Connect iframe.
#[derive(Debug, Clone)]
pub struct ConnectWidget {
    pub url: String,
    pub demo: bool,
}

/// A bank account from a Flinks accounts summary. Keeps the vendor's fields
/// as returned, next to the `Id` the token exchange needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FlinksAccount {
    #[serde(rename = "Id")]
    #[cfg_attr(feature = "openapi", schema(example = "49af4a83-b810-4171-a056-17e6a5e14b7a"))]
    pub id: String,
    #[serde(flatten)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub extra: Map<String, Value>,
}

/// Flinks returns `Accounts` as a single object when one account matched and
/// as an array otherwise. Both shapes decode to the same list here.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

#[derive(Serialize)]
struct AuthorizeBody<'a> {
    #[serde(rename = "LoginId")]
    login_id: &'a str,
    #[serde(rename = "MostRecentCached")]
    most_recent_cached: bool,
}

#[derive(Serialize)]
struct AccountsSummaryBody<'a> {
    #[serde(rename = "RequestId")]
    request_id: &'a str,
    #[serde(rename = "WithBalance", skip_serializing_if = "Option::is_none")]
    with_balance: Option<bool>,
}

#[derive(Deserialize)]
struct AuthSecretEnvelope {
    #[serde(rename = "AuthSecret")]
    auth_secret: String,
}

#[derive(Deserialize)]
struct AuthorizeEnvelope {
    #[serde(rename = "RequestId")]
    request_id: String,
}

#[derive(Deserialize)]
struct AccountsSummaryEnvelope {
    #[serde(rename = "Accounts")]
    accounts: OneOrMany<FlinksAccount>,
}

#[derive(Deserialize)]
struct AccessTokenEnvelope {
    #[serde(rename = "AccessToken")]
    access_token: String,
}

/// Client for the Flinks API.
///
/// Banking-services calls are authorized by the widget session's login id;
/// partner-data calls carry the API secret as a bearer token.
#[derive(Debug, Clone)]
pub struct FlinksClient {
    client: Client,
    base_url: String,
    instance: String,
    api_secret: String,
    demo: bool,
}

impl FlinksClient {
    /// Creates a client from the Flinks section of the application config
    /// plus the `FLINKS_API_SECRET` environment variable. `demo` puts the
    /// Connect widget in demo mode and follows the platform environment.
    pub fn new(config: &FlinksConfig, demo: bool) -> Result<Self, FlinksError> {
        let api_secret = std::env::var("FLINKS_API_SECRET").map_err(|_| {
            FlinksError::ConfigError("FLINKS_API_SECRET not set in environment".to_string())
        })?;
        Ok(Self {
            client: HTTP_CLIENT.clone(),
            base_url: api_base_url(&config.instance, &config.customer_id),
            instance: config.instance.clone(),
            api_secret,
            demo,
        })
    }

    /// Creates a client with an explicit base URL and secret. Used by tests
    /// to point at a mock server.
    pub fn with_credentials(base_url: &str, instance: &str, api_secret: &str, demo: bool) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            instance: instance.to_string(),
            api_secret: api_secret.to_string(),
            demo,
        }
    }

    /// Embed parameters for the Connect widget iframe.
    pub fn connect_widget(&self) -> ConnectWidget {
        ConnectWidget {
            url: widget_url(&self.instance, self.demo),
            demo: self.demo,
        }
    }

    async fn post_banking<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, FlinksError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn get_partner_data(&self, path: &str) -> Result<Value, FlinksError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.api_secret)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Fetches the auth secret issued to the named partner. Flinks issues one
    /// secret per partner and it does not change between calls.
    pub async fn request_auth_secret(&self, name_of_partner: &str) -> Result<String, FlinksError> {
        let path = format!("/partnerdata/authsecret/{name_of_partner}");
        let response = self.get_partner_data(&path).await?;
        let envelope: AuthSecretEnvelope = serde_json::from_value(response)?;
        Ok(envelope.auth_secret)
    }

    /// Authorizes against the most recent cached session for the login and
    /// returns a request id. The id stays valid for 30 minutes.
    pub async fn generate_request_id(&self, login_id: &str) -> Result<String, FlinksError> {
        let body = AuthorizeBody {
            login_id,
            most_recent_cached: true,
        };
        let response = self
            .post_banking("/BankingServices/Authorize", &body)
            .await?;
        let envelope: AuthorizeEnvelope = serde_json::from_value(response)?;
        Ok(envelope.request_id)
    }

    /// Lists the accounts behind a request id.
    pub async fn get_accounts_summary(
        &self,
        request_id: &str,
        with_balance: Option<bool>,
    ) -> Result<Vec<FlinksAccount>, FlinksError> {
        let body = AccountsSummaryBody {
            request_id,
            with_balance,
        };
        let response = self
            .post_banking("/BankingServices/GetAccountsSummary", &body)
            .await?;
        let envelope: AccountsSummaryEnvelope = serde_json::from_value(response)?;
        Ok(envelope.accounts.into_vec())
    }

    /// Fetches the access token for one account of a login.
    pub async fn request_access_token(
        &self,
        login_id: &str,
        account_id: &str,
    ) -> Result<String, FlinksError> {
        let path = format!("/partnerdata/{login_id}/{account_id}");
        let response = self.get_partner_data(&path).await?;
        let envelope: AccessTokenEnvelope = serde_json::from_value(response)?;
        Ok(envelope.access_token)
    }
}

async fn api_error(response: reqwest::Response) -> FlinksError {
    let status_code = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| {
            body.get("message")
                .or_else(|| body.get("Message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(text);
    FlinksError::ApiError {
        status_code,
        message,
    }
}
