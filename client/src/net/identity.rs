//! Hosted auth provider adapter (password sign-in and token refresh).
//!
//! SYSTEM CONTEXT
//! ==============
//! Operators sign in with email + password. The provider returns a short-lived
//! id token (used as the bearer for document and presence requests) and a
//! refresh token exchanged for a new id token before expiry.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use serde::Deserialize;

use super::error::BackendError;
use crate::state::auth::Session;

#[must_use]
pub fn sign_in_url(api_key: &str) -> String {
    format!("https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key={api_key}")
}

#[must_use]
pub fn refresh_url(api_key: &str) -> String {
    format!("https://securetoken.googleapis.com/v1/token?key={api_key}")
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub id_token: String,
    pub refresh_token: String,
    /// Lifetime in seconds, as a decimal string.
    pub expires_in: String,
    pub local_id: String,
    #[serde(default)]
    pub email: String,
}

/// Token endpoint response; this endpoint uses snake_case keys.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
    pub user_id: String,
}

fn expires_at(now_ms: i64, expires_in: &str) -> Result<i64, BackendError> {
    let secs: i64 = expires_in
        .trim()
        .parse()
        .map_err(|_| BackendError::Decode(format!("expiresIn `{expires_in}`")))?;
    Ok(now_ms.saturating_add(secs.saturating_mul(1_000)))
}

/// Build a session from a successful sign-in.
///
/// # Errors
///
/// Returns [`BackendError::Decode`] if the lifetime is not a number.
pub fn session_from_sign_in(resp: SignInResponse, now_ms: i64) -> Result<Session, BackendError> {
    Ok(Session {
        expires_at_ms: expires_at(now_ms, &resp.expires_in)?,
        id_token: resp.id_token,
        refresh_token: resp.refresh_token,
        uid: resp.local_id,
        email: resp.email,
    })
}

/// Replace the tokens of `previous` with a refreshed pair.
///
/// # Errors
///
/// Returns [`BackendError::Decode`] if the lifetime is not a number.
pub fn session_from_refresh(previous: &Session, resp: RefreshResponse, now_ms: i64) -> Result<Session, BackendError> {
    Ok(Session {
        expires_at_ms: expires_at(now_ms, &resp.expires_in)?,
        id_token: resp.id_token,
        refresh_token: resp.refresh_token,
        uid: resp.user_id,
        email: previous.email.clone(),
    })
}

/// Readable text for a provider error code.
///
/// Codes may carry a suffix (`TOO_MANY_ATTEMPTS_TRY_LATER : Access to ...`);
/// only the leading token is matched.
#[must_use]
pub fn friendly_message(code: &str) -> String {
    let head = code.split([' ', ':']).next().unwrap_or(code);
    match head {
        "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" | "INVALID_LOGIN_CREDENTIALS" => {
            "Incorrect email or password.".to_owned()
        }
        "INVALID_EMAIL" => "Enter a valid email address.".to_owned(),
        "USER_DISABLED" => "This account has been disabled.".to_owned(),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => "Too many attempts. Try again later.".to_owned(),
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" => "Your session has expired. Sign in again.".to_owned(),
        "" => "Sign-in failed.".to_owned(),
        other => format!("Sign-in failed ({other})."),
    }
}

/// Sign in with email and password.
///
/// # Errors
///
/// Returns [`BackendError::Http`] carrying a readable message on rejection.
pub async fn sign_in(api_key: &str, email: &str, password: &str, now_ms: i64) -> Result<Session, BackendError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "email": email, "password": password, "returnSecureToken": true });
        let text = post_json(&sign_in_url(api_key), &payload).await?;
        let resp: SignInResponse = serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))?;
        session_from_sign_in(resp, now_ms)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (api_key, email, password, now_ms);
        Err(BackendError::Transport("not available on server".to_owned()))
    }
}

/// Exchange the refresh token of `session` for a new id token.
///
/// # Errors
///
/// Returns a [`BackendError`] if the provider rejects the refresh token.
pub async fn refresh(api_key: &str, session: &Session, now_ms: i64) -> Result<Session, BackendError> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "grant_type": "refresh_token", "refresh_token": session.refresh_token });
        let text = post_json(&refresh_url(api_key), &payload).await?;
        let resp: RefreshResponse = serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))?;
        session_from_refresh(session, resp, now_ms)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (api_key, session, now_ms);
        Err(BackendError::Transport("not available on server".to_owned()))
    }
}

#[cfg(feature = "hydrate")]
async fn post_json(url: &str, payload: &serde_json::Value) -> Result<String, BackendError> {
    let resp = gloo_net::http::Request::post(url)
        .json(payload)
        .map_err(|e| BackendError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| BackendError::Transport(e.to_string()))?;
    let status = resp.status();
    let text = resp.text().await.map_err(|e| BackendError::Decode(e.to_string()))?;
    if !resp.ok() {
        let code = super::error::error_message(&text).unwrap_or_default();
        return Err(BackendError::Http { status, message: friendly_message(&code) });
    }
    Ok(text)
}
