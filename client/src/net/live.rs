//! Live record subscription emulated by polling the document store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The document store's REST surface has no push listener. The dashboard
//! re-runs the record query every `poll_interval_ms` and forwards a snapshot
//! only when the result set changed, so downstream work (sound, presence
//! diffing, re-render) runs once per real change.
//!
//! TRADE-OFFS
//! ==========
//! Changes surface up to one interval late, and every tick costs one query
//! even when nothing changed.

#[cfg(test)]
#[path = "live_test.rs"]
mod live_test;

use crate::net::error::BackendError;

/// Decides which query results become snapshots.
#[derive(Clone, Debug, Default)]
pub struct SnapshotGate {
    last: Option<u64>,
}

impl SnapshotGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True for the first result and whenever `fingerprint` differs from the
    /// last admitted one.
    pub fn admit(&mut self, fingerprint: u64) -> bool {
        if self.last == Some(fingerprint) {
            return false;
        }
        self.last = Some(fingerprint);
        true
    }

    /// True until a result has been admitted.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.last.is_none()
    }

    /// Forget the last result so the next one is always admitted.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Note a failed tick. Returns whether `err` should be reported.
    ///
    /// Missing configuration or session before the first result is the
    /// normal startup race and stays quiet. Any reported failure resets the
    /// gate, so the first success afterwards is forwarded even when the
    /// result set did not change, which clears the failure on screen.
    pub fn fail(&mut self, err: &BackendError) -> bool {
        if self.is_fresh() && matches!(err, BackendError::NotConfigured | BackendError::Unauthenticated) {
            return false;
        }
        self.reset();
        true
    }
}

#[cfg(feature = "hydrate")]
pub use browser::spawn_record_poll;

#[cfg(feature = "hydrate")]
mod browser {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use leptos::prelude::*;
    use records::Notification;

    use super::SnapshotGate;
    use crate::net::error::BackendError;
    use crate::net::firestore;
    use crate::state::auth::AuthState;
    use crate::state::config::ConfigState;

    /// Start polling the record collection.
    ///
    /// `on_snapshot` receives each changed result set, newest first.
    /// `on_error` receives every failed tick. The loop stops after the
    /// returned flag is cleared.
    pub fn spawn_record_poll<S, E>(
        config: RwSignal<ConfigState>,
        auth: RwSignal<AuthState>,
        on_snapshot: S,
        on_error: E,
    ) -> Arc<AtomicBool>
    where
        S: Fn(Vec<Notification>) + 'static,
        E: Fn(BackendError) + 'static,
    {
        let alive = Arc::new(AtomicBool::new(true));
        let alive_task = alive.clone();
        leptos::task::spawn_local(async move {
            let mut gate = SnapshotGate::new();
            loop {
                if !alive_task.load(Ordering::Relaxed) {
                    break;
                }
                let interval = config
                    .get_untracked()
                    .config
                    .as_ref()
                    .map_or(records::config::DEFAULT_POLL_INTERVAL_MS, |c| c.poll_interval_ms);

                match tick(config, auth, &mut gate).await {
                    Ok(Some(snapshot)) if alive_task.load(Ordering::Relaxed) => on_snapshot(snapshot),
                    Ok(_) => {}
                    Err(e) => {
                        if gate.fail(&e) {
                            on_error(e);
                        }
                    }
                }
                gloo_timers::future::sleep(Duration::from_millis(interval)).await;
            }
        });
        alive
    }

    async fn tick(
        config: RwSignal<ConfigState>,
        auth: RwSignal<AuthState>,
        gate: &mut SnapshotGate,
    ) -> Result<Option<Vec<Notification>>, BackendError> {
        let config = config.get_untracked().config.ok_or(BackendError::NotConfigured)?;
        let token = auth.get_untracked().id_token().ok_or(BackendError::Unauthenticated)?;
        let docs = firestore::send_query(&config, &token).await?;
        if !gate.admit(firestore::fingerprint(&docs)) {
            return Ok(None);
        }
        Ok(Some(firestore::to_records(&docs, &config.schema)))
    }
}
