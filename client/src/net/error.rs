//! Failure type shared by the hosted-service adapters.
//!
//! ERROR HANDLING
//! ==============
//! Adapters never panic on remote failures. Every call returns
//! `Result<_, BackendError>` and the view layer turns the error into a toast,
//! so a failed request degrades one action instead of the whole page.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Transport(String),
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("not signed in")]
    Unauthenticated,
    #[error("dashboard configuration not loaded")]
    NotConfigured,
    #[error("browser storage unavailable: {0}")]
    Storage(String),
}

impl BackendError {
    /// Classify a non-success response from a hosted REST endpoint.
    ///
    /// Hosted endpoints report `{"error": {"message": "..."}}`; the raw body is
    /// used when it has another shape.
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthenticated;
        }
        Self::Http { status, message: error_message(body).unwrap_or_else(|| body.trim().to_owned()) }
    }

    /// Short reason suitable for a toast description.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Http { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Extract `error.message` from a hosted error body.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}
