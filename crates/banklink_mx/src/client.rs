// --- File: crates/banklink_mx/src/client.rs ---

use crate::error::MxError;
use banklink_common::http::client::HTTP_CLIENT;
use banklink_config::MxConfig;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

/// Versioned media type every MX Platform API call must accept.
const MX_MEDIA_TYPE: &str = "application/vnd.mx.api.v1+json";

/// Scope string for an MX authorization code restricted to reading one
/// verified account.
pub(crate) fn verification_scope(account_guid: &str, member_guid: &str, user_guid: &str) -> String {
    format!("account-guid:{account_guid} member-guid:{member_guid} user-guid:{user_guid} read-protected")
}

/// Body for creating an MX user. MX requires a caller-chosen `id`; without a
/// user store there is nothing stable to send, so each user gets a fresh UUID.
pub(crate) fn new_user_body(email: &str) -> Value {
    json!({
        "user": {
            "id": Uuid::new_v4().to_string(),
            "email": email,
        }
    })
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: Value,
}

#[derive(Deserialize)]
struct WidgetEnvelope {
    user: WidgetUser,
}

#[derive(Deserialize)]
struct WidgetUser {
    connect_widget_url: String,
}

#[derive(Deserialize)]
struct AccountNumbersEnvelope {
    account_numbers: Vec<Value>,
}

/// Authorization code issued by MX for processor-token style handoff.
#[derive(Debug, Clone, serde::Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthorizationCode {
    /// The one-time code. MX omits it when issuance is still pending.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "AUT-abc123"))]
    pub code: Option<String>,
}

#[derive(Deserialize)]
struct AuthorizationCodeEnvelope {
    authorization_code: AuthorizationCode,
}

/// Client for the MX Platform API.
///
/// Every call authenticates with HTTP basic auth (client id / API key) and
/// requests the versioned MX media type.
#[derive(Debug, Clone)]
pub struct MxClient {
    client: Client,
    base_url: String,
    client_id: String,
    api_key: String,
}

impl MxClient {
    /// Creates a client from the MX section of the application config plus
    /// the `MX_API_KEY` environment variable.
    pub fn new(config: &MxConfig) -> Result<Self, MxError> {
        let api_key = std::env::var("MX_API_KEY")
            .map_err(|_| MxError::ConfigError("MX_API_KEY not set in environment".to_string()))?;
        Ok(Self::with_credentials(
            &config.base_path,
            &config.client_id,
            &api_key,
        ))
    }

    /// Creates a client with explicit credentials. Used by tests to point at
    /// a mock server.
    pub fn with_credentials(base_url: &str, client_id: &str, api_key: &str) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            api_key: api_key.to_string(),
        }
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, MxError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.api_key))
            .header(ACCEPT, MX_MEDIA_TYPE)
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn get_json(&self, path: &str) -> Result<Value, MxError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.client_id, Some(&self.api_key))
            .header(ACCEPT, MX_MEDIA_TYPE)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Creates an MX user and returns the user object, `guid` included.
    pub async fn create_user(&self, email: &str) -> Result<Value, MxError> {
        let body = new_user_body(email);
        let response = self.post_json("/users", &body).await?;
        let envelope: UserEnvelope = serde_json::from_value(response)?;
        Ok(envelope.user)
    }

    /// Requests a Connect widget URL for the user, in verification mode so
    /// the widget collects account and routing numbers.
    pub async fn connect_widget_url(&self, user_guid: &str) -> Result<String, MxError> {
        let body = json!({
            "config": {
                "mode": "verification",
                "ui_message_version": 4,
            }
        });
        let path = format!("/users/{user_guid}/connect_widget_url");
        let response = self.post_json(&path, &body).await?;
        let envelope: WidgetEnvelope = serde_json::from_value(response)?;
        Ok(envelope.user.connect_widget_url)
    }

    /// Lists the verified account numbers a member exposed through the
    /// Connect widget.
    pub async fn list_verified_accounts(
        &self,
        member_guid: &str,
        user_guid: &str,
    ) -> Result<Vec<Value>, MxError> {
        let path = format!("/users/{user_guid}/members/{member_guid}/account_numbers");
        let response = self.get_json(&path).await?;
        let envelope: AccountNumbersEnvelope = serde_json::from_value(response)?;
        Ok(envelope.account_numbers)
    }

    /// Requests an authorization code scoped to a single verified account.
    pub async fn request_authorization_code(
        &self,
        account_guid: &str,
        member_guid: &str,
        user_guid: &str,
    ) -> Result<AuthorizationCode, MxError> {
        let body = json!({
            "authorization_code": {
                "scope": verification_scope(account_guid, member_guid, user_guid),
            }
        });
        let response = self.post_json("/authorization_code", &body).await?;
        let envelope: AuthorizationCodeEnvelope = serde_json::from_value(response)?;
        Ok(envelope.authorization_code)
    }
}

async fn api_error(response: reqwest::Response) -> MxError {
    let status_code = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| {
            body.pointer("/error/message")
                .or_else(|| body.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or(text);
    MxError::ApiError {
        status_code,
        message,
    }
}
