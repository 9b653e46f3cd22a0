use super::*;
use records::PersonalInfo;

#[test]
fn display_name_prefers_full_name() {
    let record = Notification {
        personal: Some(PersonalInfo {
            identity: Some("2900".to_owned()),
            full_name: Some("C. Person".to_owned()),
            ..PersonalInfo::default()
        }),
        ..Notification::default()
    };
    assert_eq!(display_name(&record), "C. Person");
}

#[test]
fn display_name_falls_back_to_identity_then_dash() {
    let with_id = Notification {
        personal: Some(PersonalInfo { identity: Some("2900".to_owned()), ..PersonalInfo::default() }),
        ..Notification::default()
    };
    assert_eq!(display_name(&with_id), "2900");
    assert_eq!(display_name(&Notification::default()), "-");
}

#[test]
fn status_classes_are_distinct() {
    assert_ne!(status_class(Status::Approved), status_class(Status::Rejected));
    assert_ne!(status_class(Status::Pending), status_class(Status::Approved));
}
