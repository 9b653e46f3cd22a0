use super::*;

#[test]
fn validate_credentials_trims_email_and_requires_both_fields() {
    assert_eq!(
        validate_credentials("  ops@example.com  ", "secret"),
        Ok(("ops@example.com".to_owned(), "secret".to_owned()))
    );
    assert_eq!(validate_credentials("   ", "secret"), Err("Enter both email and password."));
    assert_eq!(validate_credentials("ops@example.com", ""), Err("Enter both email and password."));
}

#[test]
fn validate_credentials_requires_at_sign() {
    assert_eq!(validate_credentials("ops.example.com", "secret"), Err("Enter a valid email address."));
}

#[test]
fn validate_credentials_keeps_password_whitespace() {
    assert_eq!(validate_credentials("a@b.c", " pw "), Ok(("a@b.c".to_owned(), " pw ".to_owned())));
}
