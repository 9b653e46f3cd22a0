//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! only carries the validated variant, which never changes after startup.

use std::sync::Arc;

use records::config::DashboardConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}
