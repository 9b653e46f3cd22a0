use super::*;

#[test]
fn urls_carry_api_key() {
    assert_eq!(
        sign_in_url("k1"),
        "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword?key=k1"
    );
    assert_eq!(refresh_url("k1"), "https://securetoken.googleapis.com/v1/token?key=k1");
}

#[test]
fn session_from_sign_in_computes_expiry() {
    let resp: SignInResponse = serde_json::from_str(
        r#"{"idToken":"id","refreshToken":"rt","expiresIn":"3600","localId":"u1","email":"ops@example.com","registered":true}"#,
    )
    .unwrap();
    let session = session_from_sign_in(resp, 1_000).unwrap();
    assert_eq!(session.id_token, "id");
    assert_eq!(session.refresh_token, "rt");
    assert_eq!(session.uid, "u1");
    assert_eq!(session.email, "ops@example.com");
    assert_eq!(session.expires_at_ms, 3_601_000);
}

#[test]
fn session_from_sign_in_rejects_bad_lifetime() {
    let resp = SignInResponse {
        id_token: "id".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_in: "soon".to_owned(),
        local_id: "u1".to_owned(),
        email: String::new(),
    };
    assert!(matches!(session_from_sign_in(resp, 0), Err(BackendError::Decode(_))));
}

#[test]
fn session_from_refresh_keeps_email() {
    let previous = Session {
        id_token: "old".to_owned(),
        refresh_token: "rt0".to_owned(),
        uid: "u1".to_owned(),
        email: "ops@example.com".to_owned(),
        expires_at_ms: 10,
    };
    let resp: RefreshResponse = serde_json::from_str(
        r#"{"id_token":"new","refresh_token":"rt1","expires_in":"60","user_id":"u1","token_type":"Bearer"}"#,
    )
    .unwrap();
    let session = session_from_refresh(&previous, resp, 5_000).unwrap();
    assert_eq!(session.id_token, "new");
    assert_eq!(session.refresh_token, "rt1");
    assert_eq!(session.email, "ops@example.com");
    assert_eq!(session.expires_at_ms, 65_000);
}

#[test]
fn friendly_message_maps_known_codes() {
    assert_eq!(friendly_message("INVALID_PASSWORD"), "Incorrect email or password.");
    assert_eq!(friendly_message("INVALID_LOGIN_CREDENTIALS"), "Incorrect email or password.");
    assert_eq!(friendly_message("USER_DISABLED"), "This account has been disabled.");
    assert_eq!(
        friendly_message("TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been temporarily disabled"),
        "Too many attempts. Try again later."
    );
}

#[test]
fn friendly_message_unknown_codes_keep_code() {
    assert_eq!(friendly_message("OPERATION_NOT_ALLOWED"), "Sign-in failed (OPERATION_NOT_ALLOWED).");
    assert_eq!(friendly_message(""), "Sign-in failed.");
}
