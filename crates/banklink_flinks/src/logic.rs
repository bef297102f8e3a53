// --- File: crates/banklink_flinks/src/logic.rs ---
//! Server-side driver for the Connect machine.

use crate::client::FlinksClient;
use crate::connect::{ConnectAction, ConnectEvent, ConnectState};
use crate::error::FlinksError;

/// Partner name the payments platform is registered under at Flinks. Auth
/// secrets are issued per partner name.
pub const DWOLLA_PARTNER_NAME: &str = "Dwolla";

/// Runs the token-exchange chain for a connected login: authorize for a
/// request id, pick the first account in the summary, fetch that account's
/// access token.
///
/// Picking the first account keeps parity with the hosted widget flow; a
/// production integration would let the user choose.
pub async fn run_token_exchange(
    client: &FlinksClient,
    login_id: &str,
) -> Result<String, FlinksError> {
    let request_id = client.generate_request_id(login_id).await?;
    let accounts = client.get_accounts_summary(&request_id, None).await?;
    let account = accounts.first().ok_or(FlinksError::NoAccounts)?;
    client.request_access_token(login_id, &account.id).await
}

/// Advances the machine by one external event, performing emitted actions
/// and feeding their results back in until the machine settles.
///
/// Action failures become `Failure` events, so a vendor outage lands the
/// machine in `Failed` instead of erroring the request.
pub async fn drive(client: &FlinksClient, state: ConnectState, event: ConnectEvent) -> ConnectState {
    let (mut state, mut action) = state.apply(event);
    while let Some(event) = perform(client, &action).await {
        (state, action) = state.apply(event);
    }
    state
}

async fn perform(client: &FlinksClient, action: &ConnectAction) -> Option<ConnectEvent> {
    match action {
        ConnectAction::None => None,
        ConnectAction::FetchAuthSecret => {
            Some(match client.request_auth_secret(DWOLLA_PARTNER_NAME).await {
                Ok(auth_secret) => ConnectEvent::AuthSecretReady { auth_secret },
                Err(err) => {
                    tracing::error!("Fetching Flinks auth secret failed: {err}");
                    ConnectEvent::Failure {
                        reason: "could not obtain an auth secret from Flinks".to_string(),
                    }
                }
            })
        }
        ConnectAction::ExchangeToken { login_id } => {
            Some(match run_token_exchange(client, login_id).await {
                Ok(access_token) => ConnectEvent::AccessTokenReady { access_token },
                Err(err) => {
                    tracing::error!("Flinks token exchange failed: {err}");
                    ConnectEvent::Failure {
                        reason: "the Flinks token exchange failed".to_string(),
                    }
                }
            })
        }
    }
}
