//! Session token codec
//!
//! A token is the standard base64 encoding of
//! `{"username": "...", "id": 1, "expireAt": <epoch millis>}`.
//! It is not signed; it only carries identity and expiry for the mock login.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decoded contents of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub username: String,
    pub id: u64,
    /// Absolute expiry, milliseconds since the unix epoch
    #[serde(rename = "expireAt")]
    pub expire_at: i64,
}

impl TokenPayload {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.expire_at)
    }

    /// Strictly after `now`; a token expiring exactly now is already dead
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at > now.timestamp_millis()
    }
}

/// Mint a token that expires `ttl` from now
pub fn encode(username: &str, user_id: u64, ttl: Duration) -> String {
    encode_at(username, user_id, ttl, Utc::now())
}

/// Mint a token that expires `ttl` after `now`
pub fn encode_at(username: &str, user_id: u64, ttl: Duration, now: DateTime<Utc>) -> String {
    let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    let payload = TokenPayload {
        username: username.to_string(),
        id: user_id,
        expire_at: now.timestamp_millis().saturating_add(ttl_ms),
    };
    encode_payload(&payload)
}

/// Encode an explicit payload
pub fn encode_payload(payload: &TokenPayload) -> String {
    // Serializing a struct of strings and integers cannot fail
    let json = serde_json::to_vec(payload).unwrap_or_default();
    STANDARD.encode(json)
}

/// Decode a token, `None` for anything malformed
///
/// Expiry is not checked here; see [`is_valid`].
pub fn decode(token: &str) -> Option<TokenPayload> {
    let bytes = STANDARD.decode(token.trim()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// A token is valid iff it decodes and has not expired
pub fn is_valid(token: &str) -> bool {
    is_valid_at(token, Utc::now())
}

pub fn is_valid_at(token: &str, now: DateTime<Utc>) -> bool {
    decode(token).is_some_and(|payload| payload.is_live_at(now))
}
