//! REST helpers for the host server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since the endpoint is only
//! fetched in the browser.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use records::DashboardConfig;

use super::error::BackendError;

pub const CONFIG_ENDPOINT: &str = "/api/config";

#[cfg(any(test, feature = "hydrate"))]
fn config_request_failed_message(status: u16) -> String {
    format!("config request failed: {status}")
}

/// Fetch and validate the dashboard variant served at [`CONFIG_ENDPOINT`].
///
/// # Errors
///
/// Returns a [`BackendError`] when the request fails or the payload is invalid.
pub async fn fetch_config() -> Result<DashboardConfig, BackendError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(CONFIG_ENDPOINT)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(BackendError::Http {
                status: resp.status(),
                message: config_request_failed_message(resp.status()),
            });
        }
        let config: DashboardConfig = resp.json().await.map_err(|e| BackendError::Decode(e.to_string()))?;
        config.validate().map_err(|e| BackendError::Decode(e.to_string()))?;
        Ok(config)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(BackendError::NotConfigured)
    }
}
