//! Session-scoped key/value store holding the recovered handshake tokens.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::core::YfError;

/// The parameters the handshake recovers and later reuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Browser-session identifier, read from the consent redirect's query.
    SessionId,
    /// Anti-forgery token echoed back to the consent service.
    CsrfToken,
    /// Brand identifier echoed back to the consent service.
    BrandBid,
    /// Anti-forgery token required on every data request.
    Crumb,
}

impl SessionKey {
    /// The wire name of the parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            SessionKey::SessionId => "sessionId",
            SessionKey::CsrfToken => "csrfToken",
            SessionKey::BrandBid => "brandBid",
            SessionKey::Crumb => "crumb",
        }
    }
}

impl AsRef<str> for SessionKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable parameter store shared by every [`Fetcher`](crate::Fetcher) of one
/// logical browsing session.
///
/// Cloning is cheap and yields a handle to the same store. Each `get`/`set` is
/// atomic on its own, but nothing serializes a whole handshake: two fetchers
/// that both observe an empty `crumb` will each fetch one, and the last write
/// wins. That redundant request is the only cost.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    params: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionState {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with the present fields of `snapshot`.
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let params = SessionSnapshot::KEYS
            .into_iter()
            .filter_map(|k| snapshot.get(k).map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();
        Self {
            params: Arc::new(RwLock::new(params)),
        }
    }

    /// Returns the value stored under `name`, if any.
    pub async fn get(&self, name: impl AsRef<str>) -> Option<String> {
        self.params.read().await.get(name.as_ref()).cloned()
    }

    /// Stores `value` under `name`, replacing any previous value.
    pub async fn set(&self, name: impl AsRef<str>, value: impl Into<String>) {
        self.params
            .write()
            .await
            .insert(name.as_ref().to_string(), value.into());
    }

    /// True when `name` holds a non-empty value.
    pub async fn has(&self, name: impl AsRef<str>) -> bool {
        self.params
            .read()
            .await
            .get(name.as_ref())
            .is_some_and(|v| !v.is_empty())
    }

    /// Copies the handshake parameters out of the store.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let guard = self.params.read().await;
        let take = |k: SessionKey| guard.get(k.as_str()).cloned();
        SessionSnapshot {
            session_id: take(SessionKey::SessionId),
            csrf_token: take(SessionKey::CsrfToken),
            brand_bid: take(SessionKey::BrandBid),
            crumb: take(SessionKey::Crumb),
        }
    }

    /// Writes every present field of `snapshot` into the store.
    pub async fn restore(&self, snapshot: &SessionSnapshot) {
        let mut guard = self.params.write().await;
        for key in SessionSnapshot::KEYS {
            if let Some(v) = snapshot.get(key) {
                guard.insert(key.as_str().to_string(), v.to_string());
            }
        }
    }
}

/// Point-in-time copy of the handshake parameters.
///
/// Request construction works from a snapshot so that it stays a pure function
/// and never holds the store's lock across I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// `sessionId`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// `csrfToken`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    /// `brandBid`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_bid: Option<String>,
    /// `crumb`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crumb: Option<String>,
}

impl SessionSnapshot {
    const KEYS: [SessionKey; 4] = [
        SessionKey::SessionId,
        SessionKey::CsrfToken,
        SessionKey::BrandBid,
        SessionKey::Crumb,
    ];

    /// The value held for `key`, if any.
    pub fn get(&self, key: SessionKey) -> Option<&str> {
        match key {
            SessionKey::SessionId => self.session_id.as_deref(),
            SessionKey::CsrfToken => self.csrf_token.as_deref(),
            SessionKey::BrandBid => self.brand_bid.as_deref(),
            SessionKey::Crumb => self.crumb.as_deref(),
        }
    }

    /// The stored value, or `""` when absent.
    pub fn value(&self, key: SessionKey) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// True when `key` holds a non-empty value.
    pub fn has(&self, key: SessionKey) -> bool {
        !self.value(key).is_empty()
    }

    /// Serializes the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns `YfError::Data` if serialization fails.
    pub fn to_json(&self) -> Result<String, YfError> {
        serde_json::to_string(self).map_err(|e| YfError::Data(format!("json encode error: {e}")))
    }

    /// Parses a snapshot previously produced by [`SessionSnapshot::to_json`].
    ///
    /// # Errors
    ///
    /// Returns `YfError::Data` if `s` is not a valid snapshot.
    pub fn from_json(s: &str) -> Result<Self, YfError> {
        serde_json::from_str(s).map_err(|e| YfError::Data(format!("json parse error: {e}")))
    }
}
