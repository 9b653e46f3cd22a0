use super::*;
use crate::record::CardInfo;

#[test]
fn stats_count_total_and_card_records() {
    let records = vec![
        Notification { id: "a".to_owned(), ..Notification::default() },
        Notification {
            id: "b".to_owned(),
            card: Some(CardInfo { number: "4111".to_owned(), ..CardInfo::default() }),
            ..Notification::default()
        },
        Notification {
            id: "c".to_owned(),
            card: Some(CardInfo { number: " ".to_owned(), ..CardInfo::default() }),
            ..Notification::default()
        },
    ];
    assert_eq!(Stats::from_records(&records), Stats { total: 3, with_card: 1 });
}

#[test]
fn stats_of_empty_list_are_zero() {
    assert_eq!(Stats::from_records(&[]), Stats::default());
}
