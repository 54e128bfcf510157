use crate::components::{BackButton, BackButtonOperation, ListenerHandle};
use crate::error::sdk::SdkError;
use crate::tests::recording_bridge;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

const SETUP: &str = "web_app_setup_back_button";

/// **VALUE**: Verifies the repeat-command rule: always send, only emit on change.
///
/// **WHY THIS MATTERS**: The mirror may be wrong (the host can reset its UI
/// behind our back). Re-sending on every call is how the host is kept right;
/// emitting only on change is how local listeners are kept quiet.
///
/// **BUG THIS CATCHES**: Would catch a component that skips the send when the
/// mirror already matches, or emits `visibleChanged` without a change.
#[test]
fn given_hidden_button_when_hidden_twice_then_two_sends_and_no_events() {
    // GIVEN: A fresh (hidden) button with a change listener
    let (channel, bridge) = recording_bridge(6, 1);
    let mut button = BackButton::new(bridge);
    let events = Arc::new(AtomicUsize::new(0));
    let counter = events.clone();
    button.on_visible_changed(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // WHEN: Hiding twice
    button.hide().unwrap();
    button.hide().unwrap();

    // THEN: Two commands, no change events
    assert_eq!(channel.count_of(SETUP), 2);
    assert_eq!(events.load(Ordering::SeqCst), 0);
    assert!(!button.is_visible());
}

/// **VALUE**: Verifies a real change sends once and emits once.
#[test]
fn given_hidden_button_when_shown_then_one_send_and_one_event() {
    let (channel, bridge) = recording_bridge(6, 1);
    let mut button = BackButton::new(bridge);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    button.on_visible_changed(move |visible| sink.lock().unwrap().push(visible));

    button.show().unwrap();

    assert_eq!(channel.count_of(SETUP), 1);
    assert_eq!(channel.posted_json()[0]["eventData"]["is_visible"], true);
    assert_eq!(*seen.lock().unwrap(), vec![true]);
    assert!(button.is_visible());
}

/// **VALUE**: Verifies a refused command leaves the mirror untouched.
///
/// **BUG THIS CATCHES**: Would catch a component that updates its state
/// before the send and reports a visible button the host never showed.
#[test]
fn given_version_6_0_when_shown_then_method_unsupported_and_state_unchanged() {
    let (channel, bridge) = recording_bridge(6, 0);
    let mut button = BackButton::new(bridge);

    let result = button.show();

    assert!(matches!(result, Err(SdkError::MethodUnsupported { .. })));
    assert!(!button.is_visible());
    assert!(channel.posted().is_empty());
    assert!(!button.supports(BackButtonOperation::Show));
}

/// **VALUE**: Verifies press listeners are host subscriptions and are removable.
#[test]
fn given_click_listener_when_pressed_and_removed_then_routes_through_bridge() {
    let (_, bridge) = recording_bridge(6, 1);
    let raw = bridge.bridge().clone();
    let button = BackButton::new(bridge);
    let clicks = Arc::new(AtomicUsize::new(0));
    let counter = clicks.clone();

    let handle = button.on_click(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert!(matches!(handle, ListenerHandle::Host(_)));

    raw.dispatch("back_button_pressed", &Value::Null);
    assert!(button.off(handle));
    raw.dispatch("back_button_pressed", &Value::Null);

    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

/// **VALUE**: Verifies local listeners are removable through the same `off`.
#[test]
fn given_visibility_listener_removed_when_shown_then_not_called() {
    let (_, bridge) = recording_bridge(6, 1);
    let mut button = BackButton::new(bridge);
    let handle = button.on_visible_changed(|_| panic!("removed listener ran"));
    assert!(matches!(handle, ListenerHandle::Local(_)));

    assert!(button.off(handle));
    button.show().unwrap();
}
