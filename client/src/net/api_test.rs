use super::*;

#[test]
fn config_request_failed_message_formats_status() {
    assert_eq!(config_request_failed_message(503), "config request failed: 503");
}

#[test]
fn config_endpoint_is_api_scoped() {
    assert_eq!(CONFIG_ENDPOINT, "/api/config");
}
