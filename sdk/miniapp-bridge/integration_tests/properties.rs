use miniapp_bridge::capability::{catalogued_methods, is_supported};
use miniapp_bridge::channel::MemoryChannel;
use miniapp_bridge::components::BackButton;
use miniapp_bridge::error::SdkError;
use miniapp_bridge::protocol::{OutgoingCommand, ScanQrPopupParams};
use miniapp_bridge::{Bridge, BridgeScoped};

use common::{Version, VersionError};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

fn scoped(channel: &Arc<MemoryChannel>, version: &str) -> BridgeScoped {
    let bridge = Arc::new(Bridge::new(channel.clone()));
    BridgeScoped::new(bridge, Version::parse(version).expect("valid version"))
}

// ============================================================================
// Protocol-level properties exercised through the public API
// ============================================================================

/// **VALUE**: Capability is monotonic in the version for every catalogued command.
#[test]
fn given_catalogued_commands_when_versions_increase_then_support_never_regresses() {
    let versions: Vec<Version> = ["5.0", "6.0", "6.1", "6.2", "6.3", "6.4", "6.10", "7.0"]
        .into_iter()
        .map(|v| Version::parse(v).expect("valid version"))
        .collect();

    for (method, _) in catalogued_methods() {
        for pair in versions.windows(2) {
            assert!(
                !is_supported(method, pair[0]) || is_supported(method, pair[1]),
                "{method} regressed between {} and {}",
                pair[0],
                pair[1]
            );
        }
    }
}

/// **VALUE**: `hide()` twice on a hidden button sends twice and emits nothing.
#[test]
fn given_hidden_back_button_when_hide_twice_then_two_sends_zero_events() {
    let channel = Arc::new(MemoryChannel::new());
    let mut button = BackButton::new(scoped(&channel, "6.1"));
    let events = Arc::new(AtomicUsize::new(0));
    let counter = events.clone();
    button.on_visible_changed(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    button.hide().expect("hide");
    button.hide().expect("hide");

    assert_eq!(channel.count_of("web_app_setup_back_button"), 2);
    assert_eq!(events.load(Ordering::SeqCst), 0);
}

/// **VALUE**: `show()` on a hidden button sends once and emits `visibleChanged(true)` once.
#[test]
fn given_hidden_back_button_when_show_then_one_send_one_event() {
    let channel = Arc::new(MemoryChannel::new());
    let mut button = BackButton::new(scoped(&channel, "6.1"));
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    button.on_visible_changed(move |visible| sink.lock().expect("lock").push(visible));

    button.show().expect("show");

    assert_eq!(channel.count_of("web_app_setup_back_button"), 1);
    assert_eq!(*seen.lock().expect("lock"), vec![true]);
}

/// **VALUE**: 6.0 refuses the QR scanner without touching the transport; 6.4 forwards it.
#[test]
fn given_scan_qr_command_when_sent_on_6_0_and_6_4_then_refused_then_forwarded() {
    let command = OutgoingCommand::WebAppOpenScanQrPopup(ScanQrPopupParams::default());

    let old = Arc::new(MemoryChannel::new());
    let result = scoped(&old, "6.0").send(&command);
    assert!(matches!(result, Err(SdkError::MethodUnsupported { .. })));
    assert!(old.posted().is_empty());

    let new = Arc::new(MemoryChannel::new());
    scoped(&new, "6.4").send(&command).expect("supported");
    let posted: Vec<Value> = new.posted_json();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0], serde_json::to_value(&command).expect("serializable"));
}

/// **VALUE**: Two listeners run in order; unsubscribing the first leaves only the second.
#[test]
fn given_two_listeners_when_first_unsubscribed_then_only_second_runs() {
    let channel = Arc::new(MemoryChannel::new());
    let bridge = Bridge::new(channel);
    let calls = Arc::new(Mutex::new(Vec::new()));

    let first_calls = calls.clone();
    let first = bridge.subscribe("main_button_pressed", move |_| {
        first_calls.lock().expect("lock").push(1)
    });
    let second_calls = calls.clone();
    bridge.subscribe("main_button_pressed", move |_| {
        second_calls.lock().expect("lock").push(2)
    });

    bridge.dispatch("main_button_pressed", &Value::Null);
    assert_eq!(*calls.lock().expect("lock"), vec![1, 2]);

    bridge.unsubscribe(first);
    bridge.dispatch("main_button_pressed", &Value::Null);
    assert_eq!(*calls.lock().expect("lock"), vec![1, 2, 2]);
}

/// **VALUE**: Version text round-trips and malformed text fails to parse.
#[test]
fn given_version_text_when_parsed_then_round_trips_or_fails() {
    assert_eq!(Version::parse("6.4").expect("valid").to_string(), "6.4");
    assert!(matches!(Version::parse("6.4.1"), Err(VersionError::Parse { .. })));
    assert!(matches!(Version::parse("abc"), Err(VersionError::Parse { .. })));
}
