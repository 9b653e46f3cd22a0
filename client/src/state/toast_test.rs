use super::*;

fn info(title: &str) -> ToastContent {
    ToastContent::new(ToastKind::Info, title, "")
}

#[test]
fn push_assigns_unique_ids() {
    let mut state = ToastState::default();
    let a = state.push(info("a"));
    let b = state.push(info("b"));
    assert_ne!(a, b);
    assert_eq!(state.toasts.len(), 2);
}

#[test]
fn push_drops_oldest_beyond_limit() {
    let mut state = ToastState::default();
    for i in 0..(MAX_TOASTS + 2) {
        state.push(info(&format!("t{i}")));
    }
    assert_eq!(state.toasts.len(), MAX_TOASTS);
    assert_eq!(state.toasts[0].content.title, "t2");
}

#[test]
fn dismiss_removes_only_matching_toast() {
    let mut state = ToastState::default();
    let a = state.push(info("a"));
    state.push(info("b"));
    state.dismiss(&a);
    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].content.title, "b");
    state.dismiss("missing");
    assert_eq!(state.toasts.len(), 1);
}

#[test]
fn approve_and_reject_feedback_differ() {
    let approve = status_feedback(Status::Approved).unwrap();
    let reject = status_feedback(Status::Rejected).unwrap();
    assert_eq!(approve.kind, ToastKind::Success);
    assert_eq!(reject.kind, ToastKind::Warning);
    assert_ne!(approve.title, reject.title);
    assert_ne!(approve.kind.css_modifier(), reject.kind.css_modifier());
}

#[test]
fn pending_status_has_no_feedback() {
    assert_eq!(status_feedback(Status::Pending), None);
}

#[test]
fn sign_out_confirmation_is_informational() {
    let content = signed_out();
    assert_eq!(content.kind, ToastKind::Info);
    assert_eq!(content.kind.css_modifier(), "toast--info");
    assert_eq!(content.title, "Signed out");
}

#[test]
fn failure_toast_names_operation_and_reason() {
    let err = BackendError::Http { status: 403, message: "PERMISSION_DENIED".to_owned() };
    let content = failure(Operation::Write, &err);
    assert_eq!(content.kind, ToastKind::Error);
    assert_eq!(content.title, "Update failed");
    assert_eq!(content.description, "PERMISSION_DENIED");

    assert_eq!(failure(Operation::SignOut, &BackendError::Storage("denied".to_owned())).title, "Sign-out failed");
    assert_eq!(failure(Operation::Subscribe, &BackendError::Unauthenticated).title, "Could not load records");
}

#[test]
fn sign_in_failure_carries_server_reason() {
    let err = BackendError::Http { status: 400, message: "INVALID_LOGIN_CREDENTIALS".to_owned() };
    let content = failure(Operation::SignIn, &err);
    assert_eq!(content.kind, ToastKind::Error);
    assert_eq!(content.title, "Sign-in failed");
    assert_eq!(content.description, "INVALID_LOGIN_CREDENTIALS");
}
