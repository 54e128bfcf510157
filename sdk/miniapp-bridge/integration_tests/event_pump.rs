use miniapp_bridge::bridge::run_event_pump;
use miniapp_bridge::channel::host_link;
use miniapp_bridge::components::{BackButton, Popup};
use miniapp_bridge::error::BridgeError;
use miniapp_bridge::protocol::{OutgoingCommand, PopupParams};
use miniapp_bridge::{Bridge, BridgeScoped};

use common::Version;

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

// ============================================================================
// run_event_pump() + host_link() - async delivery
// ============================================================================

/// **VALUE**: Verifies the full round trip over the in-process link.
///
/// **WHY THIS MATTERS**: This is how the simulator and any embedder wire a
/// real host: commands out on one channel, events back through the pump.
///
/// **BUG THIS CATCHES**: Would catch the pump not feeding the bridge, or the
/// popup never resolving because events arrive on a different bridge.
#[tokio::test]
async fn given_linked_host_when_popup_answered_then_receiver_resolves() {
    // GIVEN: A bridge connected to a host end, with the pump running
    let (client, mut host) = host_link();
    let bridge = Arc::new(Bridge::new(Arc::new(client.channel)));
    let pump = tokio::spawn(run_event_pump(bridge.clone(), client.events));
    let popup = Popup::new(BridgeScoped::new(bridge.clone(), Version::new(6, 2)));

    // WHEN: The page opens a popup and the host answers it
    let receiver = popup.open(PopupParams::new("Continue?")).expect("open popup");
    let command = timeout(WAIT, host.commands.recv())
        .await
        .expect("command in time")
        .expect("command");
    let envelope: Value = serde_json::from_str(&command).expect("json envelope");
    assert_eq!(envelope["eventType"], "web_app_open_popup");

    host.events
        .send(json!({"eventType": "popup_closed", "eventData": {"button_id": "ok"}}).to_string())
        .expect("page end alive");

    // THEN: The page sees the pressed button
    let pressed = timeout(WAIT, receiver).await.expect("answer in time").expect("sender kept");
    assert_eq!(pressed.as_deref(), Some("ok"));
    assert!(!popup.is_opened());

    drop(host);
    timeout(WAIT, pump).await.expect("pump stops").expect("pump task");
}

/// **VALUE**: Verifies one malformed host message does not stop the pump.
#[tokio::test]
async fn given_malformed_message_when_pumped_then_later_messages_still_delivered() {
    let (client, host) = host_link();
    let bridge = Arc::new(Bridge::new(Arc::new(client.channel)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    bridge.subscribe("back_button_pressed", move |_| {
        let _ = tx.send(());
    });
    let pump = tokio::spawn(run_event_pump(bridge.clone(), client.events));

    host.events.send(String::from("garbage")).expect("send");
    host.events
        .send(String::from(r#"{"eventType":"back_button_pressed"}"#))
        .expect("send");

    timeout(WAIT, rx.recv()).await.expect("event in time").expect("listener fired");

    drop(host);
    timeout(WAIT, pump).await.expect("pump stops").expect("pump task");
}

/// **VALUE**: Verifies a closed host end surfaces as `ChannelUnavailable`.
#[tokio::test]
async fn given_host_commands_dropped_when_sending_then_channel_unavailable() {
    let (client, host) = host_link();
    let bridge = Bridge::new(Arc::new(client.channel));
    drop(host);

    let result = bridge.send(&OutgoingCommand::WebAppReady);

    assert!(matches!(result, Err(BridgeError::ChannelUnavailable { .. })));
}

/// **VALUE**: Verifies press events flow from the host to a component listener.
#[tokio::test]
async fn given_visible_back_button_when_host_presses_then_click_listener_runs() {
    let (client, mut host) = host_link();
    let bridge = Arc::new(Bridge::new(Arc::new(client.channel)));
    let pump = tokio::spawn(run_event_pump(bridge.clone(), client.events));
    let mut button = BackButton::new(BridgeScoped::new(bridge, Version::new(6, 1)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    button.on_click(move || {
        let _ = tx.send(());
    });

    button.show().expect("show");
    let command = timeout(WAIT, host.commands.recv()).await.expect("in time").expect("command");
    assert!(command.contains("web_app_setup_back_button"));
    host.events
        .send(String::from(r#"{"eventType":"back_button_pressed","eventData":null}"#))
        .expect("send");

    timeout(WAIT, rx.recv()).await.expect("click in time").expect("listener fired");

    drop(host);
    timeout(WAIT, pump).await.expect("pump stops").expect("pump task");
}
