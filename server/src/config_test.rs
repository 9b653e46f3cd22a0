use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

fn shipped(variant: &str) -> ServerConfig {
    ServerConfig { port: DEFAULT_PORT, variants_dir: default_variants_dir(), variant: variant.to_owned() }
}

const MINIMAL: &str = "
variant: test
backend:
  api_key: key
  project_id: proj
  database_url: https://proj-default-rtdb.firebaseio.com
  collection: pays
";

fn minimal() -> DashboardConfig {
    parse_variant(MINIMAL, Path::new("test.yaml")).unwrap()
}

// =============================================================
// ServerConfig
// =============================================================

#[test]
fn from_lookup_uses_defaults() {
    let cfg = ServerConfig::from_lookup(env(&[]));
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.variant, DEFAULT_VARIANT);
    assert_eq!(cfg.variants_dir, default_variants_dir());
}

#[test]
fn from_lookup_reads_overrides() {
    let cfg = ServerConfig::from_lookup(env(&[
        ("PORT", "8080"),
        ("DASHBOARD_VARIANTS_DIR", "/etc/triage"),
        ("DASHBOARD_VARIANT", " staging "),
    ]));
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.variants_dir, PathBuf::from("/etc/triage"));
    assert_eq!(cfg.variant, "staging");
}

#[test]
fn from_lookup_ignores_unparseable_port() {
    let cfg = ServerConfig::from_lookup(env(&[("PORT", "eighty")]));
    assert_eq!(cfg.port, DEFAULT_PORT);
}

#[test]
fn variant_path_rejects_traversal() {
    let mut cfg = shipped("../secrets");
    assert!(matches!(cfg.variant_path(), Err(LoadError::BadVariantName(_))));
    cfg.variant = "legacy-card-details".to_owned();
    assert!(cfg.variant_path().unwrap().ends_with("legacy-card-details.yaml"));
}

// =============================================================
// Variant files
// =============================================================

#[test]
fn shipped_variants_load_and_validate() {
    let default = load_variant(&shipped("default"), env(&[])).unwrap();
    assert_eq!(default.variant, "default");
    assert_eq!(default.sound.policy, SoundPolicy::NewArrivals);

    let legacy = load_variant(&shipped("legacy-card-details"), env(&[])).unwrap();
    assert_eq!(legacy.sound.policy, SoundPolicy::EverySnapshot);
    assert_eq!(legacy.poll_interval_ms, 3000);
    assert_eq!(legacy.schema.card_number.first().map(String::as_str), Some("cardDetails.number"));
}

#[test]
fn missing_variant_is_io_error() {
    let err = load_variant(&shipped("does-not-exist"), env(&[])).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn malformed_yaml_is_yaml_error() {
    let err = parse_variant("variant: [unterminated", Path::new("bad.yaml")).unwrap_err();
    assert!(matches!(err, LoadError::Yaml { .. }));
    assert!(err.to_string().contains("bad.yaml"));
}

#[test]
fn minimal_variant_gets_defaults() {
    let cfg = minimal();
    assert_eq!(cfg.poll_interval_ms, records::config::DEFAULT_POLL_INTERVAL_MS);
    assert_eq!(cfg.schema, records::config::RecordSchema::default());
    assert!(cfg.validate().is_ok());
}

// =============================================================
// Overrides
// =============================================================

#[test]
fn overrides_replace_backend_settings() {
    let cfg = apply_overrides(
        minimal(),
        env(&[
            ("FIREBASE_API_KEY", "other-key"),
            ("FIREBASE_PROJECT_ID", "other"),
            ("FIREBASE_DATABASE_URL", "https://other-default-rtdb.firebaseio.com"),
            ("RECORDS_COLLECTION", "notifications"),
            ("POLL_INTERVAL_MS", "2500"),
            ("SOUND_POLICY", "off"),
        ]),
    )
    .unwrap();
    assert_eq!(cfg.backend.api_key, "other-key");
    assert_eq!(cfg.backend.project_id, "other");
    assert_eq!(cfg.backend.database_url, "https://other-default-rtdb.firebaseio.com");
    assert_eq!(cfg.backend.collection, "notifications");
    assert_eq!(cfg.poll_interval_ms, 2500);
    assert_eq!(cfg.sound.policy, SoundPolicy::Off);
}

#[test]
fn blank_overrides_are_ignored() {
    let cfg = apply_overrides(minimal(), env(&[("FIREBASE_API_KEY", "  "), ("SOUND_POLICY", "")])).unwrap();
    assert_eq!(cfg, minimal());
}

#[test]
fn bad_poll_interval_override_is_rejected() {
    let err = apply_overrides(minimal(), env(&[("POLL_INTERVAL_MS", "soon")])).unwrap_err();
    assert!(matches!(err, LoadError::BadOverride { var: "POLL_INTERVAL_MS", .. }));
}

#[test]
fn bad_sound_policy_override_is_rejected() {
    let err = apply_overrides(minimal(), env(&[("SOUND_POLICY", "loud")])).unwrap_err();
    assert!(matches!(err, LoadError::BadOverride { var: "SOUND_POLICY", .. }));
}

#[test]
fn override_that_breaks_validation_fails_load() {
    let dir = std::env::temp_dir().join(format!("triage-config-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("local.yaml"), MINIMAL).unwrap();
    let server = ServerConfig { port: DEFAULT_PORT, variants_dir: dir.clone(), variant: "local".to_owned() };

    let err = load_variant(&server, env(&[("FIREBASE_DATABASE_URL", "http://insecure")])).unwrap_err();
    assert!(matches!(err, LoadError::Invalid(ConfigError::InvalidDatabaseUrl(_))));

    let _ = std::fs::remove_dir_all(dir);
}
