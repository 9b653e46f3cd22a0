use super::*;
use records::{CardInfo, PersonalInfo};

fn record() -> Notification {
    Notification {
        id: "a".to_owned(),
        country: Some("KW".to_owned()),
        card: Some(CardInfo {
            number: "4111 1111 1111 1234".to_owned(),
            holder: Some("A. Person".to_owned()),
            bank: Some("First Bank".to_owned()),
            ..CardInfo::default()
        }),
        personal: Some(PersonalInfo { full_name: Some("A. Person".to_owned()), ..PersonalInfo::default() }),
        ..Notification::default()
    }
}

fn value<'a>(rows: &'a [(&'static str, String)], label: &str) -> &'a str {
    rows.iter().find(|(l, _)| *l == label).map_or("", |(_, v)| v.as_str())
}

#[test]
fn card_rows_mask_number() {
    let rows = detail_rows(DialogKind::Card, &record());
    assert_eq!(value(&rows, "Card number"), "•••• 1234");
    assert_eq!(value(&rows, "Bank"), "First Bank");
    assert_eq!(value(&rows, "Expiry"), MISSING);
    assert!(rows.iter().all(|(_, v)| !v.contains("4111")));
}

#[test]
fn personal_rows_fill_missing_values() {
    let rows = detail_rows(DialogKind::Personal, &record());
    assert_eq!(value(&rows, "Full name"), "A. Person");
    assert_eq!(value(&rows, "Country"), "KW");
    assert_eq!(value(&rows, "Phone"), MISSING);
}

#[test]
fn card_rows_without_card_are_all_missing() {
    let rows = detail_rows(DialogKind::Card, &Notification::default());
    assert!(rows.iter().all(|(_, v)| v == MISSING));
}
