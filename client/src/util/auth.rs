//! Shared auth helpers: route gating, session persistence and token refresh.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior,
//! and every hosted-service call reads the bearer token kept fresh here.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::error::BackendError;
use crate::state::auth::{AuthState, Session};
use crate::util::ui_persistence;

/// `localStorage` key of the persisted session.
pub const SESSION_KEY: &str = "triage.session";

/// Interval of the background token check.
pub const REFRESH_CHECK_MS: u32 = 60_000;

/// True when auth has loaded and nobody is signed in.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.session.is_none()
}

/// Redirect to `/login` whenever auth has loaded and no session is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate("/login", NavigateOptions::default());
        }
    });
}

/// Read the stored session at startup. Expired sessions are kept so the
/// refresher can still exchange their refresh token.
pub fn restore_session(auth: RwSignal<AuthState>) {
    let session = ui_persistence::load_json::<Session>(SESSION_KEY);
    auth.update(|a| {
        a.session = session;
        a.loading = false;
    });
}

/// Persist and activate a new session. A failed write only costs the
/// session on the next reload.
pub fn store_session(auth: RwSignal<AuthState>, session: Session) {
    if let Err(e) = ui_persistence::save_json(SESSION_KEY, &session) {
        leptos::logging::warn!("session not persisted: {e}");
    }
    auth.update(|a| {
        a.session = Some(session);
        a.loading = false;
    });
}

/// Forget the session locally and in storage.
///
/// # Errors
///
/// Returns [`BackendError::Storage`] when the stored copy cannot be removed;
/// the in-memory session is cleared regardless.
pub fn clear_session(auth: RwSignal<AuthState>) -> Result<(), BackendError> {
    auth.update(|a| a.session = None);
    ui_persistence::remove_key(SESSION_KEY).map_err(BackendError::Storage)
}

/// Refresh the id token whenever it nears expiry, checking every
/// [`REFRESH_CHECK_MS`]. A rejected refresh signs the operator out.
#[cfg(feature = "hydrate")]
pub fn spawn_token_refresher(auth: RwSignal<AuthState>, config: RwSignal<crate::state::config::ConfigState>) {
    leptos::task::spawn_local(async move {
        loop {
            refresh_if_needed(auth, config).await;
            gloo_timers::future::TimeoutFuture::new(REFRESH_CHECK_MS).await;
        }
    });
}

#[cfg(feature = "hydrate")]
async fn refresh_if_needed(auth: RwSignal<AuthState>, config: RwSignal<crate::state::config::ConfigState>) {
    let Some(session) = auth.get_untracked().session else {
        return;
    };
    let now = crate::util::time::now_ms();
    if !session.needs_refresh(now) {
        return;
    }
    let Some(api_key) = config.get_untracked().config.map(|c| c.backend.api_key) else {
        return;
    };
    match crate::net::identity::refresh(&api_key, &session, now).await {
        Ok(next) => store_session(auth, next),
        Err(BackendError::Transport(e)) => leptos::logging::warn!("token refresh deferred: {e}"),
        Err(e) => {
            leptos::logging::warn!("token refresh rejected: {e}");
            if let Err(e) = clear_session(auth) {
                leptos::logging::error!("clearing session failed: {e}");
            }
        }
    }
}
