// --- File: crates/banklink_common/src/token.rs ---
//! Cache for short-lived bearer tokens (platform OAuth tokens, vendor app
//! tokens) with an explicit expiry instant per token.

use chrono::{DateTime, Utc};
use std::future::Future;
use tokio::sync::RwLock;

/// A token together with the instant it stops being usable.
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Holds at most one token. Owned by the client that needs it; there is no
/// process-global token state.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token if it has not expired.
    pub async fn current(&self) -> Option<String> {
        self.current_at(Utc::now()).await
    }

    /// Like [`current`](Self::current) with an explicit clock reading.
    pub async fn current_at(&self, now: DateTime<Utc>) -> Option<String> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|cached| cached.expires_at > now)
            .map(|cached| cached.token.clone())
    }

    pub async fn store(&self, token: String, expires_at: DateTime<Utc>) {
        *self.slot.write().await = Some(CachedToken { token, expires_at });
    }

    /// Returns the cached token, refreshing first when absent or expired.
    ///
    /// The refresh future runs without the lock held, so two callers racing on
    /// an expired token may both refresh; the later write wins. That wastes a
    /// round trip but never serves a stale token.
    pub async fn ensure_fresh<F, Fut, E>(&self, refresh: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(String, DateTime<Utc>), E>>,
    {
        self.ensure_fresh_at(Utc::now(), refresh).await
    }

    /// Like [`ensure_fresh`](Self::ensure_fresh) with an explicit clock reading.
    pub async fn ensure_fresh_at<F, Fut, E>(
        &self,
        now: DateTime<Utc>,
        refresh: F,
    ) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(String, DateTime<Utc>), E>>,
    {
        if let Some(token) = self.current_at(now).await {
            return Ok(token);
        }
        let (token, expires_at) = refresh().await?;
        self.store(token.clone(), expires_at).await;
        Ok(token)
    }
}
