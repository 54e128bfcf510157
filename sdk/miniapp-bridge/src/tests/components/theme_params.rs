use crate::components::{ThemeParams, ThemeParamsOperation};
use crate::protocol::incoming::ThemeParamsData;
use crate::tests::recording_bridge;

use std::sync::{Arc, Mutex};

use serde_json::json;

/// **VALUE**: Verifies a `theme_changed` report replaces the whole mirror.
///
/// **WHY THIS MATTERS**: Hosts send the full theme each time; a key missing
/// from the new report is no longer part of the theme.
#[test]
fn given_seeded_theme_when_theme_changed_then_replaced_and_emitted() {
    // GIVEN: A theme seeded from launch params
    let (_, bridge) = recording_bridge(6, 0);
    let raw = bridge.bridge().clone();
    let theme = ThemeParams::new(
        bridge,
        ThemeParamsData {
            bg_color: Some(String::from("#ffffff")),
            text_color: Some(String::from("#000000")),
            ..Default::default()
        },
    );
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    theme.on_changed(move |params| sink.lock().unwrap().push(params.clone()));

    // WHEN: The host switches to a dark theme
    raw.dispatch(
        "theme_changed",
        &json!({"theme_params": {"bg_color": "#212121", "button_color": "#8774E1"}}),
    );

    // THEN: Replaced, not merged
    assert_eq!(theme.bg_color().map(|c| c.to_string()).as_deref(), Some("#212121"));
    assert_eq!(theme.text_color(), None);
    assert_eq!(theme.button_color().map(|c| c.to_string()).as_deref(), Some("#8774e1"));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

/// **VALUE**: Verifies an identical report does not emit.
#[test]
fn given_same_theme_when_reported_again_then_no_event() {
    let (_, bridge) = recording_bridge(6, 0);
    let raw = bridge.bridge().clone();
    let theme = ThemeParams::new(bridge, ThemeParamsData::default());
    let seen = Arc::new(Mutex::new(0));
    let sink = seen.clone();
    theme.on_changed(move |_| *sink.lock().unwrap() += 1);

    let report = json!({"theme_params": {"hint_color": "#999999"}});
    raw.dispatch("theme_changed", &report);
    raw.dispatch("theme_changed", &report);

    assert_eq!(*seen.lock().unwrap(), 1);
}

/// **VALUE**: Verifies unparseable colours read as unset instead of failing.
#[test]
fn given_unparseable_color_when_read_then_none() {
    let (_, bridge) = recording_bridge(6, 0);
    let theme = ThemeParams::new(
        bridge,
        ThemeParamsData {
            link_color: Some(String::from("bluish")),
            ..Default::default()
        },
    );

    assert_eq!(theme.link_color(), None);
    assert_eq!(theme.params().link_color.as_deref(), Some("bluish"));
}

#[test]
fn given_theme_when_request_then_posts_request_theme() {
    let (channel, bridge) = recording_bridge(6, 0);
    let theme = ThemeParams::new(bridge, ThemeParamsData::default());

    theme.request().unwrap();

    assert_eq!(channel.count_of("web_app_request_theme"), 1);
}

#[test]
fn given_version_6_0_when_supports_checked_then_request_available() {
    let (_, bridge) = recording_bridge(6, 0);
    let theme = ThemeParams::new(bridge, ThemeParamsData::default());

    assert!(theme.supports(ThemeParamsOperation::Request));
}
