use super::*;
use serde_json::json;

#[test]
fn stream_url_joins_root_path_and_token() {
    assert_eq!(
        stream_url("https://demo-rtdb.example.com/", "/status/abc", "tok"),
        "https://demo-rtdb.example.com/status/abc.json?auth=tok"
    );
}

#[test]
fn parse_put_event() {
    let event = parse_event("put", r#"{"path":"/","data":{"state":"online"}}"#).unwrap();
    assert_eq!(event, StreamEvent::Put { path: "/".to_owned(), data: json!({ "state": "online" }) });
}

#[test]
fn parse_put_null_deletes() {
    let event = parse_event("put", r#"{"path":"/state","data":null}"#).unwrap();
    assert_eq!(event, StreamEvent::Put { path: "/state".to_owned(), data: Value::Null });
}

#[test]
fn parse_patch_event() {
    let event = parse_event("patch", r#"{"path":"/","data":{"state":"offline"}}"#).unwrap();
    let StreamEvent::Patch { path, data } = event else {
        panic!("expected patch");
    };
    assert_eq!(path, "/");
    assert_eq!(data.get("state"), Some(&json!("offline")));
}

#[test]
fn parse_patch_rejects_scalar_data() {
    assert!(matches!(parse_event("patch", r#"{"path":"/","data":3}"#), Err(BackendError::Decode(_))));
}

#[test]
fn parse_control_events() {
    assert_eq!(parse_event("keep-alive", "null").unwrap(), StreamEvent::KeepAlive);
    assert_eq!(parse_event("auth_revoked", "credential is no longer valid").unwrap(), StreamEvent::AuthRevoked);
    assert_eq!(
        parse_event("cancel", r#""permission denied""#).unwrap(),
        StreamEvent::Cancel("permission denied".to_owned())
    );
}

#[test]
fn parse_rejects_unknown_or_malformed() {
    assert!(parse_event("hello", "{}").is_err());
    assert!(parse_event("put", "not json").is_err());
}
