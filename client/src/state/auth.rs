//! Auth-session state for the signed-in operator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards, the token refresher and every hosted-service call
//! that needs a bearer token.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::{Deserialize, Serialize};

/// Refresh the id token once it is this close to expiry.
pub const REFRESH_SKEW_MS: i64 = 5 * 60 * 1_000;

/// Tokens returned by the hosted auth provider, persisted across reloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id_token: String,
    pub refresh_token: String,
    pub uid: String,
    pub email: String,
    /// Absolute expiry of `id_token` in epoch milliseconds.
    pub expires_at_ms: i64,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at_ms
    }

    #[must_use]
    pub fn needs_refresh(&self, now_ms: i64) -> bool {
        now_ms + REFRESH_SKEW_MS >= self.expires_at_ms
    }
}

/// Authentication state tracking the current session and loading status.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub session: Option<Session>,
    /// True until the stored session has been read at startup.
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { session: None, loading: true }
    }
}

impl AuthState {
    /// Bearer token of the current session, if any.
    #[must_use]
    pub fn id_token(&self) -> Option<String> {
        self.session.as_ref().map(|s| s.id_token.clone())
    }

    /// Bearer token only while it has not expired. Streams opened with an
    /// expired token are revoked by the server straight away.
    #[must_use]
    pub fn usable_token(&self, now_ms: i64) -> Option<String> {
        self.session.as_ref().filter(|s| !s.is_expired(now_ms)).map(|s| s.id_token.clone())
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.email.as_str())
    }
}
