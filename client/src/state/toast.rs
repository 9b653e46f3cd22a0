//! Transient toast notifications.
//!
//! DESIGN
//! ======
//! Toasts are plain data in a bounded stack. The helpers below choose the
//! kind and wording for each outcome so pages only report what happened.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use records::Status;

use crate::net::error::BackendError;

/// Most toasts kept on screen; older ones are dropped first.
pub const MAX_TOASTS: usize = 5;

/// Auto-dismiss delay in the browser.
pub const TOAST_TIMEOUT_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
    Info,
}

impl ToastKind {
    #[must_use]
    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Success => "toast--success",
            Self::Warning => "toast--warning",
            Self::Error => "toast--error",
            Self::Info => "toast--info",
        }
    }
}

/// What to show, before an id is assigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastContent {
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

impl ToastContent {
    #[must_use]
    pub fn new(kind: ToastKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { kind, title: title.into(), description: description.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: String,
    pub content: ToastContent,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

impl ToastState {
    /// Push a toast and return its id.
    pub fn push(&mut self, content: ToastContent) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.toasts.push(Toast { id: id.clone(), content });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: &str) {
        self.toasts.retain(|t| t.id != id);
    }
}

/// Which user-visible operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Subscribe,
    Write,
    SignOut,
    SignIn,
}

/// Error toast for a failed operation.
#[must_use]
pub fn failure(op: Operation, err: &BackendError) -> ToastContent {
    let title = match op {
        Operation::Subscribe => "Could not load records",
        Operation::Write => "Update failed",
        Operation::SignOut => "Sign-out failed",
        Operation::SignIn => "Sign-in failed",
    };
    ToastContent::new(ToastKind::Error, title, err.reason())
}

/// Feedback after a status change was stored.
///
/// Approval and rejection are styled differently so an operator can tell
/// them apart at a glance. Moving a record back to pending is silent.
#[must_use]
pub fn status_feedback(status: Status) -> Option<ToastContent> {
    match status {
        Status::Approved => Some(ToastContent::new(ToastKind::Success, "Approved", "The record was approved.")),
        Status::Rejected => Some(ToastContent::new(ToastKind::Warning, "Rejected", "The record was rejected.")),
        Status::Pending => None,
    }
}

/// Confirmation once the session was cleared.
#[must_use]
pub fn signed_out() -> ToastContent {
    ToastContent::new(ToastKind::Info, "Signed out", "Live updates stopped for this browser.")
}

/// Push `content` and schedule its auto-dismiss.
pub fn show(toasts: leptos::prelude::RwSignal<ToastState>, content: ToastContent) {
    use leptos::prelude::Update;

    let mut id = String::new();
    toasts.update(|t| id = t.push(content));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(TOAST_TIMEOUT_MS).await;
        toasts.try_update(|t| t.dismiss(&id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}
