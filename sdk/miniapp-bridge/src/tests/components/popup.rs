use crate::components::{Popup, PopupEvent, PopupEventKind, PopupOperation};
use crate::error::sdk::SdkError;
use crate::protocol::popup::{PopupButton, PopupButtonKind, PopupParams};
use crate::tests::{answering_bridge, recording_bridge, within_deadline};

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

fn ok_button(id: &str) -> PopupButton {
    PopupButton::new(id, PopupButtonKind::Ok)
}

/// **VALUE**: Verifies the whole popup cycle: open, host answer, receiver resolved.
///
/// **WHY THIS MATTERS**: The pressed button id is the only result a popup has.
#[test]
fn given_open_popup_when_host_reports_button_then_receiver_yields_id() {
    // GIVEN: An opened popup
    let (channel, bridge) = recording_bridge(6, 2);
    let raw = bridge.bridge().clone();
    let popup = Popup::new(bridge);
    let mut receiver = popup
        .open(PopupParams::new("Proceed?").with_button(ok_button("ok")))
        .unwrap();
    assert!(popup.is_opened());
    assert_eq!(channel.count_of("web_app_open_popup"), 1);

    // WHEN: The host reports the press
    raw.dispatch("popup_closed", &json!({"button_id": "ok"}));

    // THEN: Closed, and the id is delivered
    assert!(!popup.is_opened());
    assert_eq!(receiver.try_recv().unwrap(), Some(String::from("ok")));
}

/// **VALUE**: Verifies that a second popup cannot be opened over the first.
#[test]
fn given_open_popup_when_opened_again_then_already_opened_and_nothing_posted() {
    let (channel, bridge) = recording_bridge(6, 2);
    let popup = Popup::new(bridge);
    let _first = popup.open(PopupParams::new("One")).unwrap();

    let second = popup.open(PopupParams::new("Two"));

    assert!(matches!(second, Err(SdkError::AlreadyOpened { .. })));
    assert_eq!(channel.count_of("web_app_open_popup"), 1);
}

/// **VALUE**: Verifies the default close button is added when none is given.
#[test]
fn given_no_buttons_when_opened_then_single_close_button_posted() {
    let (channel, bridge) = recording_bridge(6, 2);
    let popup = Popup::new(bridge);

    let _receiver = popup.open(PopupParams::new("  Saved  ")).unwrap();

    assert_eq!(
        channel.posted_json()[0]["eventData"],
        json!({"message": "Saved", "buttons": [{"type": "close"}]})
    );
}

/// **VALUE**: Verifies the popup limits.
///
/// **BUG THIS CATCHES**: Would catch posting a popup the host refuses to show,
/// leaving `is_opened` stuck at true with no `popup_closed` ever coming.
#[test]
fn given_invalid_params_when_opened_then_validation_error() {
    let (channel, bridge) = recording_bridge(6, 2);
    let popup = Popup::new(bridge);

    let too_many = PopupParams::new("Pick")
        .with_button(ok_button("a"))
        .with_button(ok_button("b"))
        .with_button(ok_button("c"))
        .with_button(ok_button("d"));
    let empty_text = PopupParams::new("Pick").with_button(PopupButton::new(
        "a",
        PopupButtonKind::Default { text: String::from(" ") },
    ));

    for params in [
        PopupParams::new("   "),
        PopupParams::new("m".repeat(257)),
        PopupParams::new("Hi").with_title("t".repeat(65)),
        too_many,
        empty_text,
    ] {
        assert!(matches!(popup.open(params), Err(SdkError::Validation { .. })));
    }
    assert!(channel.posted().is_empty());
    assert!(!popup.is_opened());
}

/// **VALUE**: Verifies that a malformed answer still closes the popup.
#[test]
fn given_open_popup_when_host_sends_malformed_payload_then_treated_as_dismissal() {
    let (_, bridge) = recording_bridge(6, 2);
    let raw = bridge.bridge().clone();
    let popup = Popup::new(bridge);
    let mut receiver = popup.open(PopupParams::new("Hi")).unwrap();

    raw.dispatch("popup_closed", &json!({"button_id": 42}));

    assert!(!popup.is_opened());
    assert_eq!(receiver.try_recv().unwrap(), None);
}

/// **VALUE**: Verifies the open/close events and their order.
#[test]
fn given_listeners_when_popup_cycles_then_events_in_order() {
    let (_, bridge) = recording_bridge(6, 2);
    let raw = bridge.bridge().clone();
    let popup = Popup::new(bridge);
    let seen = Arc::new(Mutex::new(Vec::new()));
    for kind in [PopupEventKind::OpenChanged, PopupEventKind::Closed] {
        let sink = seen.clone();
        popup.on(kind, move |event| sink.lock().unwrap().push(event.clone()));
    }

    let _receiver = popup.open(PopupParams::new("Hi")).unwrap();
    raw.dispatch("popup_closed", &Value::Null);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            PopupEvent::OpenChanged(true),
            PopupEvent::OpenChanged(false),
            PopupEvent::Closed(None),
        ]
    );
}

/// **VALUE**: Verifies version gating and listener release on drop.
#[test]
fn given_popup_on_6_1_when_opened_then_unsupported_and_drop_releases_listener() {
    let (_, bridge) = recording_bridge(6, 1);
    let raw = bridge.bridge().clone();
    let popup = Popup::new(bridge);
    assert!(!popup.supports(PopupOperation::Open));
    assert!(matches!(
        popup.open(PopupParams::new("Hi")),
        Err(SdkError::MethodUnsupported { .. })
    ));
    assert_eq!(raw.listener_count("popup_closed"), 1);

    drop(popup);

    assert_eq!(raw.listener_count("popup_closed"), 0);
}

/// **VALUE**: Verifies a host answering from inside `post` resolves the popup.
///
/// **WHY THIS MATTERS**: In-page hosts may deliver `popup_closed` before the
/// open call has returned. Holding the state lock across the send made that
/// reply block forever on the same mutex.
///
/// **BUG THIS CATCHES**: Would catch `open` posting while the popup state is
/// locked, or marking the popup opened after the reply was already handled.
#[test]
fn given_host_answering_synchronously_when_opened_then_returns_closed_with_result() {
    let (opened, mut receiver) = within_deadline(|| {
        // GIVEN: A host that answers the open command before post returns
        let bridge = answering_bridge(
            6,
            2,
            &[("web_app_open_popup", "popup_closed", json!({"button_id": "ok"}))],
        );
        let popup = Popup::new(bridge);

        // WHEN: Opening
        let receiver = popup
            .open(PopupParams::new("Proceed?").with_button(ok_button("ok")))
            .expect("open returns");
        (popup.is_opened(), receiver)
    });

    // THEN: Already closed, with the answer waiting
    assert!(!opened);
    assert_eq!(receiver.try_recv().unwrap(), Some(String::from("ok")));
}

/// **VALUE**: Verifies a failed send leaves the popup closed and silent.
#[test]
fn given_disconnected_channel_when_opened_then_state_rolled_back() {
    let (channel, bridge) = recording_bridge(6, 2);
    let popup = Popup::new(bridge);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    popup.on(PopupEventKind::OpenChanged, move |event| {
        sink.lock().unwrap().push(event.clone());
    });
    channel.disconnect();

    let result = popup.open(PopupParams::new("Hi"));

    assert!(matches!(result, Err(SdkError::Bridge(_))));
    assert!(!popup.is_opened());
    assert!(seen.lock().unwrap().is_empty());
}
