use crate::channel::MemoryChannel;
use crate::components::{
    MainButton, MainButtonEvent, MainButtonEventKind, MainButtonOperation, MainButtonUpdate,
};
use crate::error::sdk::SdkError;
use crate::tests::recording_bridge;

use common::to_rgb;

use std::sync::{Arc, Mutex};

use serde_json::json;

fn button() -> (Arc<MemoryChannel>, MainButton) {
    let (channel, bridge) = recording_bridge(6, 0);
    let button = MainButton::new(
        bridge,
        to_rgb("#2481cc").unwrap(),
        to_rgb("#ffffff").unwrap(),
    );
    (channel, button)
}

/// **VALUE**: Verifies every update posts the complete button record.
///
/// **WHY THIS MATTERS**: The host replaces its whole record with what it gets.
/// Posting only the changed field would reset text and colours to defaults.
#[test]
fn given_text_set_when_shown_then_full_state_is_posted() {
    // GIVEN: A button with text
    let (channel, mut button) = button();
    button.set_text("  Pay  ").unwrap();

    // WHEN: Showing it
    button.show().unwrap();

    // THEN: The second envelope still carries text and colours
    let posted = channel.posted_json();
    assert_eq!(posted.len(), 2);
    assert_eq!(
        posted[1]["eventData"],
        json!({
            "is_visible": true,
            "is_active": true,
            "is_progress_visible": false,
            "text": "Pay",
            "color": "#2481cc",
            "text_color": "#ffffff"
        })
    );
}

/// **VALUE**: Verifies one event per changed field and none for unchanged ones.
#[test]
fn given_batch_update_when_set_params_then_emits_diff_events() {
    let (_, mut button) = button();
    let seen = Arc::new(Mutex::new(Vec::new()));
    for kind in [
        MainButtonEventKind::VisibleChanged,
        MainButtonEventKind::ActiveChanged,
        MainButtonEventKind::TextChanged,
        MainButtonEventKind::ColorChanged,
    ] {
        let sink = seen.clone();
        button.on(kind, move |event| sink.lock().unwrap().push(event.clone()));
    }

    button
        .set_params(MainButtonUpdate {
            is_visible: Some(true),
            is_active: Some(true),
            text: Some(String::from("Go")),
            color: Some(String::from("rgb(255, 0, 0)")),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            MainButtonEvent::VisibleChanged(true),
            MainButtonEvent::TextChanged(String::from("Go")),
            MainButtonEvent::ColorChanged(to_rgb("#ff0000").unwrap()),
        ]
    );
    assert_eq!(button.color().as_str(), "#ff0000");
}

/// **VALUE**: Verifies that invalid input is rejected before anything is posted.
///
/// **BUG THIS CATCHES**: Would catch a button that posts empty text or an
/// unparseable colour, which the host renders as a blank bar.
#[test]
fn given_invalid_text_or_color_when_set_then_validation_error_and_nothing_posted() {
    let (channel, mut button) = button();

    assert!(matches!(button.set_text("   "), Err(SdkError::Validation { .. })));
    assert!(matches!(button.set_text(&"x".repeat(65)), Err(SdkError::Validation { .. })));
    assert!(matches!(button.set_color("blue"), Err(SdkError::Color(_))));

    assert!(channel.posted().is_empty());
    assert_eq!(button.text(), "");
}

/// **VALUE**: Verifies the progress flags toggle independently of visibility.
#[test]
fn given_visible_button_when_progress_shown_and_disabled_then_state_mirrors_commands() {
    let (_, mut button) = button();

    button.show().unwrap();
    button.show_progress().unwrap();
    button.disable().unwrap();

    assert!(button.is_visible());
    assert!(button.is_progress_visible());
    assert!(!button.is_active());

    button.hide_progress().unwrap();
    button.enable().unwrap();
    button.hide().unwrap();

    assert!(!button.is_visible());
    assert!(!button.is_progress_visible());
    assert!(button.is_active());
}

/// **VALUE**: Verifies a command the host never received leaves no trace.
///
/// **BUG THIS CATCHES**: Would catch the mirror being updated (or change
/// events emitted) before the send result is known, which leaves the page
/// believing in a button the user cannot see.
#[test]
fn given_disconnected_channel_when_shown_then_state_unchanged_and_no_events() {
    // GIVEN: A button whose host link is gone, with a listener on every kind
    let (channel, mut button) = button();
    let before = button.state().clone();
    let seen = Arc::new(Mutex::new(Vec::new()));
    for kind in [
        MainButtonEventKind::VisibleChanged,
        MainButtonEventKind::TextChanged,
        MainButtonEventKind::ProgressVisibleChanged,
    ] {
        let sink = seen.clone();
        button.on(kind, move |event| sink.lock().unwrap().push(event.clone()));
    }
    channel.disconnect();

    // WHEN: Showing it, renaming it and showing progress
    let shown = button.show();
    let renamed = button.set_text("Pay");
    let progress = button.show_progress();

    // THEN: Every call fails and nothing changed locally
    assert!(matches!(shown, Err(SdkError::Bridge(_))));
    assert!(matches!(renamed, Err(SdkError::Bridge(_))));
    assert!(matches!(progress, Err(SdkError::Bridge(_))));
    assert_eq!(button.state(), &before);
    assert!(seen.lock().unwrap().is_empty());
    assert!(channel.posted().is_empty());
}

#[test]
fn given_any_version_when_supports_checked_then_every_operation_available() {
    let (_, button) = button();

    for operation in [
        MainButtonOperation::Show,
        MainButtonOperation::Hide,
        MainButtonOperation::Enable,
        MainButtonOperation::Disable,
        MainButtonOperation::ShowProgress,
        MainButtonOperation::HideProgress,
        MainButtonOperation::SetParams,
    ] {
        assert!(button.supports(operation), "{operation:?}");
    }
}
