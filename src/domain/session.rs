//! Session Entities
//!
//! The persisted session record is the JSON form of [`TokenClaims`]; a
//! [`Session`] is the in-memory view of one. Record encoding lives here so
//! the watcher and the auth service agree on the fail-safe parse behavior:
//! a record that does not parse is treated the same as an expired one.

use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult};

/// Session lifetime: 120 minutes from login
pub const SESSION_TTL_MS: i64 = 2 * 60 * 60 * 1000;

/// The persisted payload identifying who is logged in and until when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user_id: u32,
    pub email: String,
    /// Expiry timestamp, unix milliseconds
    pub expires_at: i64,
}

impl TokenClaims {
    /// Claims for a session starting now
    pub fn new(user_id: u32, email: String, now_ms: i64) -> Self {
        Self {
            user_id,
            email,
            expires_at: now_ms + SESSION_TTL_MS,
        }
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at
    }

    /// Serialize to the persisted record form
    pub fn to_record(&self) -> DomainResult<String> {
        serde_json::to_string(self).map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Parse a persisted record. Returns None on any malformed input.
    pub fn from_record(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub claims: TokenClaims,
    pub active: bool,
}

impl Session {
    pub fn new(claims: TokenClaims) -> Self {
        Self { claims, active: true }
    }
}
