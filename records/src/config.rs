//! Versioned dashboard configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each deployment ("variant") differs only in which hosted project it points
//! at and how its documents name fields. The server loads one variant from a
//! YAML file and hands it to the browser at `/api/config`; the client builds a
//! single view model from it.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::chime::SoundPolicy;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5_000;
pub const MIN_POLL_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_SOUND_ASSET: &str = "/sounds/notify.mp3";

/// Error returned by [`DashboardConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    #[error("database_url must be an https URL, got `{0}`")]
    InvalidDatabaseUrl(String),
    #[error("poll_interval_ms must be at least {MIN_POLL_INTERVAL_MS}, got {0}")]
    PollIntervalTooShort(u64),
    #[error("schema field `{0}` has no candidate paths")]
    EmptySchemaField(&'static str),
}

/// Public identifiers of the hosted project backing a variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Browser API key of the hosted project (public by design of the provider).
    pub api_key: String,
    pub project_id: String,
    /// Realtime database root, e.g. `https://example-default-rtdb.firebaseio.com`.
    pub database_url: String,
    /// Document collection holding the records.
    pub collection: String,
}

/// Candidate field paths per logical record field.
///
/// Paths are dotted (`cardDetails.number`). The first candidate of a writable
/// field (`hidden`, `status`, `violation_value`) is its write path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSchema {
    pub created_date: Vec<String>,
    pub status: Vec<String>,
    pub hidden: Vec<String>,
    pub country: Vec<String>,
    pub current_page: Vec<String>,
    pub violation_value: Vec<String>,
    pub card_number: Vec<String>,
    pub card_holder: Vec<String>,
    pub card_expiry: Vec<String>,
    pub card_expiry_month: Vec<String>,
    pub card_expiry_year: Vec<String>,
    pub card_prefix: Vec<String>,
    pub bank: Vec<String>,
    pub network: Vec<String>,
    pub identity: Vec<String>,
    pub full_name: Vec<String>,
    pub phone: Vec<String>,
    pub email: Vec<String>,
    pub plate_type: Vec<String>,
}

fn paths(candidates: &[&str]) -> Vec<String> {
    candidates.iter().map(|p| (*p).to_owned()).collect()
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            created_date: paths(&["createdDate"]),
            status: paths(&["status"]),
            hidden: paths(&["isHidden"]),
            country: paths(&["country"]),
            current_page: paths(&["currentPage", "page"]),
            violation_value: paths(&["violationValue", "personalInfo.violationValue"]),
            card_number: paths(&["cardNumber", "cardDetails.number", "cardInfo.cardNumber"]),
            card_holder: paths(&["cardHolder", "cardDetails.name"]),
            card_expiry: paths(&["cardExpiry", "expiryDate", "cardDetails.expiry", "cardInfo.expirationDate"]),
            card_expiry_month: paths(&["month"]),
            card_expiry_year: paths(&["year"]),
            card_prefix: paths(&["prefix"]),
            bank: paths(&["bank"]),
            network: paths(&["network"]),
            identity: paths(&["personalInfo.id", "idNumber"]),
            full_name: paths(&["personalInfo.fullName", "name"]),
            phone: paths(&["mobile", "phone", "personalInfo.phone"]),
            email: paths(&["email", "personalInfo.email"]),
            plate_type: paths(&["plateType"]),
        }
    }
}

impl RecordSchema {
    /// Field path written when hiding a record.
    #[must_use]
    pub fn hidden_path(&self) -> &str {
        self.hidden.first().map_or("isHidden", String::as_str)
    }

    /// Field path written when approving or rejecting a record.
    #[must_use]
    pub fn status_path(&self) -> &str {
        self.status.first().map_or("status", String::as_str)
    }

    /// Field path written when editing the violation value.
    #[must_use]
    pub fn violation_path(&self) -> &str {
        self.violation_value.first().map_or("violationValue", String::as_str)
    }

    /// Field the hosted query orders by (descending).
    #[must_use]
    pub fn order_path(&self) -> &str {
        self.created_date.first().map_or("createdDate", String::as_str)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required: [(&'static str, &Vec<String>); 5] = [
            ("created_date", &self.created_date),
            ("status", &self.status),
            ("hidden", &self.hidden),
            ("violation_value", &self.violation_value),
            ("card_number", &self.card_number),
        ];
        for (name, candidates) in required {
            if candidates.iter().all(|c| c.trim().is_empty()) {
                return Err(ConfigError::EmptySchemaField(name));
            }
        }
        Ok(())
    }
}

/// Notification sound settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    pub policy: SoundPolicy,
    /// URL of the audio asset served alongside the app.
    pub asset: String,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self { policy: SoundPolicy::default(), asset: DEFAULT_SOUND_ASSET.to_owned() }
    }
}

/// One deployment variant of the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Variant name, shown in the header.
    pub variant: String,
    pub backend: BackendConfig,
    #[serde(default)]
    pub schema: RecordSchema,
    #[serde(default)]
    pub sound: SoundSettings,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl DashboardConfig {
    /// Check that every setting the dashboard needs is present and sane.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.variant.trim().is_empty() {
            return Err(ConfigError::Missing("variant"));
        }
        if self.backend.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("backend.api_key"));
        }
        if self.backend.project_id.trim().is_empty() {
            return Err(ConfigError::Missing("backend.project_id"));
        }
        if self.backend.collection.trim().is_empty() {
            return Err(ConfigError::Missing("backend.collection"));
        }
        if !self.backend.database_url.starts_with("https://") {
            return Err(ConfigError::InvalidDatabaseUrl(self.backend.database_url.clone()));
        }
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(ConfigError::PollIntervalTooShort(self.poll_interval_ms));
        }
        self.schema.validate()
    }

    /// Realtime database root without a trailing slash.
    #[must_use]
    pub fn database_root(&self) -> &str {
        self.backend.database_url.trim_end_matches('/')
    }
}
