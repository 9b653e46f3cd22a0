use super::*;
use crate::record::CardInfo;

fn record(id: &str, card: Option<&str>) -> Notification {
    Notification {
        id: id.to_owned(),
        card: card.map(|n| CardInfo { number: n.to_owned(), ..CardInfo::default() }),
        ..Notification::default()
    }
}

fn sample() -> Vec<Notification> {
    vec![
        record("online-card", Some("4111")),
        record("online-plain", None),
        record("offline-card", Some("5500")),
        record("unknown-plain", None),
        record("blank-card", Some("  ")),
    ]
}

fn presence(id: &str) -> PresenceStatus {
    match id {
        "online-card" | "online-plain" => PresenceStatus::Online,
        "offline-card" => PresenceStatus::Offline,
        _ => PresenceStatus::Unknown,
    }
}

fn ids(filtered: &[&Notification]) -> Vec<String> {
    filtered.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn all_tab_without_toggles_keeps_everything() {
    let list = sample();
    let out = apply(&list, &FilterState::default(), presence);
    assert_eq!(out.len(), list.len());
}

#[test]
fn online_tab_keeps_only_online_records() {
    let list = sample();
    let filter = FilterState { tab: Tab::Online, ..FilterState::default() };
    assert_eq!(ids(&apply(&list, &filter, presence)), vec!["online-card", "online-plain"]);
}

#[test]
fn cards_tab_requires_non_blank_card_number() {
    let list = sample();
    let filter = FilterState { tab: Tab::Cards, ..FilterState::default() };
    assert_eq!(ids(&apply(&list, &filter, presence)), vec!["online-card", "offline-card"]);
}

#[test]
fn toggles_intersect_with_tab() {
    let list = sample();
    let filter = FilterState { tab: Tab::Cards, online_only: true, card_only: false };
    assert_eq!(ids(&apply(&list, &filter, presence)), vec!["online-card"]);

    let filter = FilterState { tab: Tab::Online, online_only: false, card_only: true };
    assert_eq!(ids(&apply(&list, &filter, presence)), vec!["online-card"]);
}

#[test]
fn cards_tab_with_card_toggle_still_only_keeps_cards() {
    let list = sample();
    let filter = FilterState { tab: Tab::Cards, online_only: false, card_only: true };
    let out = apply(&list, &filter, presence);
    assert!(out.iter().all(|r| r.has_card_number()));
    assert_eq!(out.len(), 2);
}

#[test]
fn output_is_an_ordered_subset_honoring_every_predicate() {
    let list = sample();
    for tab in Tab::ALL {
        for online_only in [false, true] {
            for card_only in [false, true] {
                let filter = FilterState { tab, online_only, card_only };
                let out = apply(&list, &filter, presence);
                let mut cursor = 0;
                for kept in &out {
                    let pos = list[cursor..].iter().position(|r| r.id == kept.id).map(|p| p + cursor);
                    assert!(pos.is_some(), "{} not found in order", kept.id);
                    cursor = pos.unwrap_or(cursor) + 1;

                    let online = presence(&kept.id) == PresenceStatus::Online;
                    if tab == Tab::Online || online_only {
                        assert!(online);
                    }
                    if tab == Tab::Cards || card_only {
                        assert!(kept.has_card_number());
                    }
                }
            }
        }
    }
}

#[test]
fn unknown_presence_is_not_online() {
    let list = vec![record("unknown-plain", None)];
    let filter = FilterState { online_only: true, ..FilterState::default() };
    assert!(apply(&list, &filter, presence).is_empty());
}

#[test]
fn active_toggles_counts_switched_on_toggles() {
    assert_eq!(FilterState::default().active_toggles(), 0);
    assert_eq!(FilterState { online_only: true, ..FilterState::default() }.active_toggles(), 1);
    assert_eq!(FilterState { online_only: true, card_only: true, tab: Tab::All }.active_toggles(), 2);
}

#[test]
fn is_narrowing_reflects_tab_and_toggles() {
    assert!(!FilterState::default().is_narrowing());
    assert!(FilterState { tab: Tab::Cards, ..FilterState::default() }.is_narrowing());
    assert!(FilterState { card_only: true, ..FilterState::default() }.is_narrowing());
}
