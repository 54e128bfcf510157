use crate::components::{ClosingBehavior, ClosingBehaviorOperation};
use crate::tests::recording_bridge;

use std::sync::{Arc, Mutex};

/// **VALUE**: Verifies the always-send, emit-on-change rule for confirmation.
#[test]
fn given_confirmation_enabled_twice_when_disabled_then_three_sends_two_events() {
    let (channel, bridge) = recording_bridge(6, 0);
    let mut closing = ClosingBehavior::new(bridge);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    closing.on_confirmation_needed_changed(move |needed| sink.lock().unwrap().push(needed));

    closing.enable_confirmation().unwrap();
    closing.enable_confirmation().unwrap();
    closing.disable_confirmation().unwrap();

    assert_eq!(channel.count_of("web_app_setup_closing_behavior"), 3);
    assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    assert!(!closing.is_confirmation_needed());
}

#[test]
fn given_version_6_0_when_supports_checked_then_confirmation_available() {
    let (_, bridge) = recording_bridge(6, 0);
    let closing = ClosingBehavior::new(bridge);

    assert!(closing.supports(ClosingBehaviorOperation::EnableConfirmation));
    assert!(closing.supports(ClosingBehaviorOperation::DisableConfirmation));
}
