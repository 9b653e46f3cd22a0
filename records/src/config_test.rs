use super::*;

fn valid() -> DashboardConfig {
    DashboardConfig {
        variant: "default".to_owned(),
        backend: BackendConfig {
            api_key: "key".to_owned(),
            project_id: "project".to_owned(),
            database_url: "https://project-default-rtdb.example.com/".to_owned(),
            collection: "pays".to_owned(),
        },
        schema: RecordSchema::default(),
        sound: SoundSettings::default(),
        poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
    }
}

#[test]
fn valid_config_passes() {
    assert_eq!(valid().validate(), Ok(()));
}

#[test]
fn missing_api_key_is_reported() {
    let mut cfg = valid();
    cfg.backend.api_key = "  ".to_owned();
    assert_eq!(cfg.validate(), Err(ConfigError::Missing("backend.api_key")));
}

#[test]
fn missing_collection_is_reported() {
    let mut cfg = valid();
    cfg.backend.collection.clear();
    assert_eq!(cfg.validate(), Err(ConfigError::Missing("backend.collection")));
}

#[test]
fn plain_http_database_url_is_rejected() {
    let mut cfg = valid();
    cfg.backend.database_url = "http://insecure.example.com".to_owned();
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidDatabaseUrl(_))));
}

#[test]
fn short_poll_interval_is_rejected() {
    let mut cfg = valid();
    cfg.poll_interval_ms = 10;
    assert_eq!(cfg.validate(), Err(ConfigError::PollIntervalTooShort(10)));
}

#[test]
fn empty_writable_schema_field_is_rejected() {
    let mut cfg = valid();
    cfg.schema.hidden = vec![String::new()];
    assert_eq!(cfg.validate(), Err(ConfigError::EmptySchemaField("hidden")));
}

#[test]
fn database_root_strips_trailing_slash() {
    assert_eq!(valid().database_root(), "https://project-default-rtdb.example.com");
}

#[test]
fn write_paths_use_first_candidate() {
    let mut schema = RecordSchema::default();
    assert_eq!(schema.hidden_path(), "isHidden");
    assert_eq!(schema.status_path(), "status");
    assert_eq!(schema.violation_path(), "violationValue");
    assert_eq!(schema.order_path(), "createdDate");

    schema.status = vec!["review.state".to_owned(), "status".to_owned()];
    assert_eq!(schema.status_path(), "review.state");
}

#[test]
fn yaml_variant_fills_schema_defaults() {
    let raw = r#"
variant: legacy
backend:
  api_key: key
  project_id: legacy-project
  database_url: https://legacy.example.com
  collection: notifications
schema:
  card_number: ["cardInfo.cardNumber"]
sound:
  policy: every_snapshot
"#;
    let cfg: DashboardConfig = serde_yaml::from_str(raw).unwrap();
    assert_eq!(cfg.variant, "legacy");
    assert_eq!(cfg.schema.card_number, vec!["cardInfo.cardNumber".to_owned()]);
    assert_eq!(cfg.schema.created_date, RecordSchema::default().created_date);
    assert_eq!(cfg.sound.policy, SoundPolicy::EverySnapshot);
    assert_eq!(cfg.sound.asset, DEFAULT_SOUND_ASSET);
    assert_eq!(cfg.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    assert_eq!(cfg.validate(), Ok(()));
}

#[test]
fn config_error_messages_name_the_setting() {
    assert_eq!(
        ConfigError::Missing("backend.project_id").to_string(),
        "missing required setting `backend.project_id`"
    );
}
