//! Server configuration parsed from environment variables and variant files.
//!
//! SYSTEM CONTEXT
//! ==============
//! A deployment picks one variant YAML from `variants/` and may override the
//! hosted-project settings through the environment, so the same file can be
//! pointed at a staging project without editing it. The result is validated
//! once at startup and shared read-only with every request.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is a [`LoadError`]; `main` logs it and exits. Nothing here
//! falls back to a partially loaded variant.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::{Path, PathBuf};

use records::chime::SoundPolicy;
use records::config::{ConfigError, DashboardConfig};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_VARIANT: &str = "default";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid variant name `{0}`")]
    BadVariantName(String),
    #[error("reading {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("parsing {}: {source}", path.display())]
    Yaml { path: PathBuf, source: serde_yaml::Error },
    #[error("invalid override {var}={value}")]
    BadOverride { var: &'static str, value: String },
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub variants_dir: PathBuf,
    pub variant: String,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DASHBOARD_VARIANTS_DIR`: default `<workspace>/variants`
    /// - `DASHBOARD_VARIANT`: default `default`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT").and_then(|v| v.trim().parse().ok()).unwrap_or(DEFAULT_PORT);
        let variants_dir = lookup("DASHBOARD_VARIANTS_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(default_variants_dir, PathBuf::from);
        let variant = lookup("DASHBOARD_VARIANT")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VARIANT.to_owned());
        Self { port, variants_dir, variant }
    }

    /// Path of the selected variant file.
    ///
    /// # Errors
    ///
    /// Rejects names that would escape the variants directory.
    pub fn variant_path(&self) -> Result<PathBuf, LoadError> {
        let name = self.variant.as_str();
        let valid = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(LoadError::BadVariantName(name.to_owned()));
        }
        Ok(self.variants_dir.join(format!("{name}.yaml")))
    }
}

fn default_variants_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../variants")
}

/// Read, override and validate the selected variant.
///
/// # Errors
///
/// Returns a [`LoadError`] when the file is missing or malformed, an override
/// does not parse, or the merged configuration fails validation.
pub fn load_variant<F>(server: &ServerConfig, lookup: F) -> Result<DashboardConfig, LoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = server.variant_path()?;
    let raw = std::fs::read_to_string(&path).map_err(|source| LoadError::Io { path: path.clone(), source })?;
    let config = parse_variant(&raw, &path)?;
    let config = apply_overrides(config, lookup)?;
    config.validate()?;
    Ok(config)
}

/// Parse a variant document.
///
/// # Errors
///
/// Returns [`LoadError::Yaml`] tagged with `path`.
pub fn parse_variant(raw: &str, path: &Path) -> Result<DashboardConfig, LoadError> {
    serde_yaml::from_str(raw).map_err(|source| LoadError::Yaml { path: path.to_path_buf(), source })
}

/// Apply environment overrides on top of a parsed variant. Blank values are
/// ignored.
///
/// # Errors
///
/// Returns [`LoadError::BadOverride`] for a non-numeric `POLL_INTERVAL_MS` or
/// an unknown `SOUND_POLICY`.
pub fn apply_overrides<F>(mut config: DashboardConfig, lookup: F) -> Result<DashboardConfig, LoadError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

    if let Some(v) = get("FIREBASE_API_KEY") {
        config.backend.api_key = v;
    }
    if let Some(v) = get("FIREBASE_PROJECT_ID") {
        config.backend.project_id = v;
    }
    if let Some(v) = get("FIREBASE_DATABASE_URL") {
        config.backend.database_url = v;
    }
    if let Some(v) = get("RECORDS_COLLECTION") {
        config.backend.collection = v;
    }
    if let Some(v) = get("POLL_INTERVAL_MS") {
        config.poll_interval_ms =
            v.parse().map_err(|_| LoadError::BadOverride { var: "POLL_INTERVAL_MS", value: v })?;
    }
    if let Some(v) = get("SOUND_POLICY") {
        config.sound.policy =
            SoundPolicy::parse(&v).ok_or_else(|| LoadError::BadOverride { var: "SOUND_POLICY", value: v })?;
    }
    Ok(config)
}
