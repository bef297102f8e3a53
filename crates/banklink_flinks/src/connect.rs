// --- File: crates/banklink_flinks/src/connect.rs ---
//! The Connect widget choreography as an explicit state machine.
//!
//! The widget posts messages into the embedding page. The page forwards each
//! message together with an opaque state blob, so every sequencing decision
//! lives in [`ConnectState::apply`] instead of in browser message handlers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Where a Connect session currently stands. Serialized into the response of
/// `/flinks/connect` and round-tripped by the client on the next message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ConnectState {
    #[default]
    Idle,
    WidgetMounted,
    AwaitingRedirect {
        auth_secret: String,
    },
    ExchangingToken {
        auth_secret: String,
        login_id: String,
    },
    Done {
        auth_secret: String,
        access_token: String,
    },
    Failed {
        reason: String,
    },
}

/// A connect-relevant occurrence: a widget message, or the result of an
/// action the driver performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectEvent {
    AppMounted,
    Redirect { login_id: Option<String> },
    AuthSecretReady { auth_secret: String },
    AccessTokenReady { access_token: String },
    Failure { reason: String },
}

impl ConnectEvent {
    /// Parses a raw widget postMessage payload. Messages without a connect
    /// `step`, and steps the machine does not care about, yield `None` and
    /// leave the state untouched.
    pub fn from_widget_message(message: &Value) -> Option<Self> {
        let step = message.get("step")?.as_str()?;
        match step {
            "APP_MOUNTED" => Some(ConnectEvent::AppMounted),
            "REDIRECT" => Some(ConnectEvent::Redirect {
                login_id: message
                    .get("loginId")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            }),
            _ => None,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            ConnectEvent::AppMounted => "mount",
            ConnectEvent::Redirect { .. } => "redirect",
            ConnectEvent::AuthSecretReady { .. } => "auth secret",
            ConnectEvent::AccessTokenReady { .. } => "access token",
            ConnectEvent::Failure { .. } => "failure",
        }
    }
}

/// Work the driver must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectAction {
    /// Fetch the partner auth secret from Flinks.
    FetchAuthSecret,
    /// Run the request-id, accounts-summary, access-token chain.
    ExchangeToken { login_id: String },
    None,
}

impl ConnectState {
    /// Advances the machine by one event.
    ///
    /// `Done` and `Failed` absorb every further event. An event arriving in
    /// a phase that does not expect it fails the machine rather than being
    /// silently dropped; only non-connect widget chatter is dropped, and
    /// that never becomes an event in the first place.
    pub fn apply(self, event: ConnectEvent) -> (ConnectState, ConnectAction) {
        match (self, event) {
            (state @ (ConnectState::Done { .. } | ConnectState::Failed { .. }), _) => {
                (state, ConnectAction::None)
            }
            (_, ConnectEvent::Failure { reason }) => {
                (ConnectState::Failed { reason }, ConnectAction::None)
            }
            (ConnectState::Idle, ConnectEvent::AppMounted) => {
                (ConnectState::WidgetMounted, ConnectAction::FetchAuthSecret)
            }
            (ConnectState::WidgetMounted, ConnectEvent::AuthSecretReady { auth_secret }) => (
                ConnectState::AwaitingRedirect { auth_secret },
                ConnectAction::None,
            ),
            (
                ConnectState::AwaitingRedirect { auth_secret },
                ConnectEvent::Redirect {
                    login_id: Some(login_id),
                },
            ) => (
                ConnectState::ExchangingToken {
                    auth_secret,
                    login_id: login_id.clone(),
                },
                ConnectAction::ExchangeToken { login_id },
            ),
            (ConnectState::AwaitingRedirect { .. }, ConnectEvent::Redirect { login_id: None }) => (
                ConnectState::Failed {
                    reason: "the widget redirect carried no login id".to_string(),
                },
                ConnectAction::None,
            ),
            (
                ConnectState::ExchangingToken { auth_secret, .. },
                ConnectEvent::AccessTokenReady { access_token },
            ) => {
                // Both credentials must be UUIDs before the pair is handed
                // to the exchange; anything else is a broken session.
                if Uuid::parse_str(&auth_secret).is_ok() && Uuid::parse_str(&access_token).is_ok() {
                    (
                        ConnectState::Done {
                            auth_secret,
                            access_token,
                        },
                        ConnectAction::None,
                    )
                } else {
                    (
                        ConnectState::Failed {
                            reason: "Flinks credentials are not valid UUIDs".to_string(),
                        },
                        ConnectAction::None,
                    )
                }
            }
            (state, event) => (
                ConnectState::Failed {
                    reason: format!(
                        "unexpected {} event in the {} phase",
                        event.describe(),
                        state.phase()
                    ),
                },
                ConnectAction::None,
            ),
        }
    }

    fn phase(&self) -> &'static str {
        match self {
            ConnectState::Idle => "idle",
            ConnectState::WidgetMounted => "widgetMounted",
            ConnectState::AwaitingRedirect { .. } => "awaitingRedirect",
            ConnectState::ExchangingToken { .. } => "exchangingToken",
            ConnectState::Done { .. } => "done",
            ConnectState::Failed { .. } => "failed",
        }
    }
}
