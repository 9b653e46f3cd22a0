use super::*;
use crate::record::CardInfo;

fn plain(id: &str) -> Notification {
    Notification { id: id.to_owned(), ..Notification::default() }
}

fn with_card(id: &str) -> Notification {
    Notification {
        id: id.to_owned(),
        card: Some(CardInfo { number: "4111111111111111".to_owned(), ..CardInfo::default() }),
        ..Notification::default()
    }
}

#[test]
fn sound_policy_parse() {
    assert_eq!(SoundPolicy::parse("every_snapshot"), Some(SoundPolicy::EverySnapshot));
    assert_eq!(SoundPolicy::parse("NEW_ARRIVALS"), Some(SoundPolicy::NewArrivals));
    assert_eq!(SoundPolicy::parse("off"), Some(SoundPolicy::Off));
    assert_eq!(SoundPolicy::parse("loud"), None);
}

#[test]
fn default_policy_is_new_arrivals() {
    assert_eq!(SoundPolicy::default(), SoundPolicy::NewArrivals);
}

#[test]
fn new_arrivals_first_snapshot_only_primes() {
    let mut tracker = ArrivalTracker::new();
    assert!(!tracker.observe(SoundPolicy::NewArrivals, &[with_card("a")]));
}

#[test]
fn new_arrivals_chimes_for_new_notable_record() {
    let mut tracker = ArrivalTracker::new();
    tracker.observe(SoundPolicy::NewArrivals, &[with_card("a")]);
    assert!(tracker.observe(SoundPolicy::NewArrivals, &[with_card("b"), with_card("a")]));
}

#[test]
fn new_arrivals_silent_when_snapshot_repeats() {
    let mut tracker = ArrivalTracker::new();
    tracker.observe(SoundPolicy::NewArrivals, &[with_card("a")]);
    assert!(!tracker.observe(SoundPolicy::NewArrivals, &[with_card("a")]));
}

#[test]
fn new_arrivals_chimes_when_existing_record_gains_card() {
    let mut tracker = ArrivalTracker::new();
    tracker.observe(SoundPolicy::NewArrivals, &[plain("a")]);
    assert!(tracker.observe(SoundPolicy::NewArrivals, &[with_card("a")]));
}

#[test]
fn new_arrivals_ignores_plain_records() {
    let mut tracker = ArrivalTracker::new();
    tracker.observe(SoundPolicy::NewArrivals, &[]);
    assert!(!tracker.observe(SoundPolicy::NewArrivals, &[plain("x")]));
}

#[test]
fn every_snapshot_chimes_on_any_notable_record() {
    let mut tracker = ArrivalTracker::new();
    assert!(tracker.observe(SoundPolicy::EverySnapshot, &[with_card("a")]));
    assert!(tracker.observe(SoundPolicy::EverySnapshot, &[with_card("a")]));
    assert!(!tracker.observe(SoundPolicy::EverySnapshot, &[plain("b")]));
}

#[test]
fn off_never_chimes() {
    let mut tracker = ArrivalTracker::new();
    tracker.observe(SoundPolicy::Off, &[]);
    assert!(!tracker.observe(SoundPolicy::Off, &[with_card("a")]));
}

#[test]
fn reset_requires_priming_again() {
    let mut tracker = ArrivalTracker::new();
    tracker.observe(SoundPolicy::NewArrivals, &[with_card("a")]);
    tracker.reset();
    assert!(!tracker.observe(SoundPolicy::NewArrivals, &[with_card("b")]));
}

#[test]
fn tracker_keeps_only_latest_notable_ids() {
    let mut tracker = ArrivalTracker::new();
    let backlog: Vec<Notification> = (0..50).map(|i| with_card(&format!("r{i}"))).collect();
    tracker.observe(SoundPolicy::NewArrivals, &backlog);
    tracker.observe(SoundPolicy::NewArrivals, &[with_card("r0"), plain("r1")]);
    assert_eq!(tracker.notable, HashSet::from(["r0".to_owned()]));
}

#[test]
fn record_returning_to_view_chimes_again() {
    let mut tracker = ArrivalTracker::new();
    tracker.observe(SoundPolicy::NewArrivals, &[with_card("a")]);
    assert!(!tracker.observe(SoundPolicy::NewArrivals, &[]));
    assert!(tracker.observe(SoundPolicy::NewArrivals, &[with_card("a")]));
}
