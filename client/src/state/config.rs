//! Dashboard configuration as loaded from the host server.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use records::DashboardConfig;

/// Load state of the `/api/config` payload.
#[derive(Clone, Debug)]
pub struct ConfigState {
    pub config: Option<DashboardConfig>,
    pub error: Option<String>,
    pub loading: bool,
}

impl Default for ConfigState {
    fn default() -> Self {
        Self { config: None, error: None, loading: true }
    }
}

impl ConfigState {
    pub fn loaded(&mut self, config: DashboardConfig) {
        self.config = Some(config);
        self.error = None;
        self.loading = false;
    }

    pub fn failed(&mut self, message: String) {
        self.error = Some(message);
        self.loading = false;
    }

    /// Variant name for the header, empty until loaded.
    #[must_use]
    pub fn variant(&self) -> &str {
        self.config.as_ref().map_or("", |c| c.variant.as_str())
    }
}
