//! Operator actions on records: hide, hide all, approve/reject, violation edit.
//!
//! Every action follows the same lifecycle:
//!
//! 1. **Resolve**: read the loaded configuration and the bearer token.
//! 2. **Apply**: update the local view model first where the action is
//!    optimistic (hide one, violation edit). This happens even when step 1
//!    failed; the error toast follows.
//! 3. **Write**: send the change to the document store and toast the outcome.
//!    Optimistic changes are not rolled back on failure; the next snapshot
//!    reconciles them.

#[cfg(test)]
#[path = "record_actions_test.rs"]
mod record_actions_test;

use leptos::prelude::*;
use records::{DashboardConfig, Status};

use crate::net::error::BackendError;
use crate::state::auth::AuthState;
use crate::state::config::ConfigState;
use crate::state::notifications::NotificationsState;
use crate::state::toast::{self, Operation, ToastKind, ToastContent, ToastState};

/// Signals the actions read and write, bundled for context.
#[derive(Clone, Copy)]
pub struct RecordActions {
    pub config: RwSignal<ConfigState>,
    pub auth: RwSignal<AuthState>,
    pub records: RwSignal<NotificationsState>,
    pub toasts: RwSignal<ToastState>,
}

/// Configuration and bearer token needed for a write.
///
/// # Errors
///
/// Returns [`BackendError::NotConfigured`] or [`BackendError::Unauthenticated`].
pub fn resolve_target(config: &ConfigState, auth: &AuthState) -> Result<(DashboardConfig, String), BackendError> {
    let cfg = config.config.clone().ok_or(BackendError::NotConfigured)?;
    let token = auth.id_token().ok_or(BackendError::Unauthenticated)?;
    Ok((cfg, token))
}

#[must_use]
pub fn hidden_toast() -> ToastContent {
    ToastContent::new(ToastKind::Success, "Hidden", "The record was removed from the list.")
}

#[must_use]
pub fn all_hidden_toast(count: usize) -> ToastContent {
    let noun = if count == 1 { "record" } else { "records" };
    ToastContent::new(ToastKind::Success, "All hidden", format!("{count} {noun} removed from the list."))
}

#[must_use]
pub fn violation_saved_toast() -> ToastContent {
    ToastContent::new(ToastKind::Success, "Saved", "Violation value updated.")
}

impl RecordActions {
    fn target(&self) -> Result<(DashboardConfig, String), BackendError> {
        resolve_target(&self.config.get_untracked(), &self.auth.get_untracked())
    }

    fn fail(&self, op: Operation, err: &BackendError) {
        leptos::logging::warn!("{op:?} failed: {err}");
        toast::show(self.toasts, toast::failure(op, err));
    }

    /// Hide one record: drop it locally, then mark it hidden in the store.
    pub fn hide(self, id: String) {
        let target = self.target();
        self.records.update(|s| {
            s.remove(&id);
        });
        let (config, token) = match target {
            Ok(t) => t,
            Err(e) => return self.fail(Operation::Write, &e),
        };
        leptos::task::spawn_local(async move {
            let path = config.schema.hidden_path().to_owned();
            let result =
                crate::net::firestore::send_patch(&config, &token, &id, &path, &serde_json::Value::Bool(true)).await;
            match result {
                Ok(()) => toast::show(self.toasts, hidden_toast()),
                Err(e) => self.fail(Operation::Write, &e),
            }
        });
    }

    /// Hide every loaded record, clearing the list once the store accepted it.
    pub fn hide_all(self) {
        let (config, token) = match self.target() {
            Ok(t) => t,
            Err(e) => return self.fail(Operation::Write, &e),
        };
        let ids = self.records.get_untracked().ids();
        if ids.is_empty() {
            return;
        }
        leptos::task::spawn_local(async move {
            match crate::net::firestore::send_hide_all(&config, &token, &ids).await {
                Ok(()) => {
                    self.records.update(NotificationsState::clear);
                    toast::show(self.toasts, all_hidden_toast(ids.len()));
                }
                Err(e) => self.fail(Operation::Write, &e),
            }
        });
    }

    /// Store a new status, updating the local copy once the store accepted it.
    pub fn set_status(self, id: String, status: Status) {
        let (config, token) = match self.target() {
            Ok(t) => t,
            Err(e) => return self.fail(Operation::Write, &e),
        };
        leptos::task::spawn_local(async move {
            let path = config.schema.status_path().to_owned();
            let value = serde_json::Value::String(status.as_str().to_owned());
            match crate::net::firestore::send_patch(&config, &token, &id, &path, &value).await {
                Ok(()) => {
                    self.records.update(|s| {
                        s.set_status(&id, status);
                    });
                    if let Some(content) = toast::status_feedback(status) {
                        toast::show(self.toasts, content);
                    }
                }
                Err(e) => self.fail(Operation::Write, &e),
            }
        });
    }

    /// Save the current violation draft of `id`.
    pub fn save_violation(self, id: String) {
        let value = self.records.get_untracked().violation_draft(&id).trim().to_owned();
        let target = self.target();
        self.records.update(|s| s.set_violation_value(&id, &value));
        let (config, token) = match target {
            Ok(t) => t,
            Err(e) => return self.fail(Operation::Write, &e),
        };
        leptos::task::spawn_local(async move {
            let path = config.schema.violation_path().to_owned();
            let result =
                crate::net::firestore::send_patch(&config, &token, &id, &path, &serde_json::Value::String(value)).await;
            match result {
                Ok(()) => toast::show(self.toasts, violation_saved_toast()),
                Err(e) => self.fail(Operation::Write, &e),
            }
        });
    }
}
