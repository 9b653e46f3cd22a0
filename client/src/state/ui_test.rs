use super::*;

#[test]
fn ui_state_default_is_closed() {
    let state = UiState::default();
    assert!(!state.show_filters);
    assert!(state.dialog.is_none());
}

#[test]
fn toggle_filters_flips() {
    let mut state = UiState::default();
    state.toggle_filters();
    assert!(state.show_filters);
    state.toggle_filters();
    assert!(!state.show_filters);
}

#[test]
fn open_dialog_copies_record_and_close_clears() {
    let mut state = UiState::default();
    let mut record = Notification { id: "a".to_owned(), ..Notification::default() };
    state.open_dialog(DialogKind::Card, &record);
    record.id = "changed".to_owned();

    let dialog = state.dialog.clone().unwrap();
    assert_eq!(dialog.kind, DialogKind::Card);
    assert_eq!(dialog.record.id, "a");

    state.close_dialog();
    assert!(state.dialog.is_none());
}
