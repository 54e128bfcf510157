use crate::components::{
    Viewport, ViewportEvent, ViewportEventKind, ViewportOperation, ViewportState,
};
use crate::tests::recording_bridge;

use std::sync::{Arc, Mutex};

use serde_json::json;

/// **VALUE**: Verifies the mirror follows host reports, stable height only when settled.
///
/// **WHY THIS MATTERS**: Layouts pin content to the stable height; updating it
/// mid-animation makes the page jump.
#[test]
fn given_unstable_then_stable_reports_when_received_then_stable_height_follows_settled() {
    // GIVEN: A viewport with a known starting size
    let (_, bridge) = recording_bridge(6, 0);
    let raw = bridge.bridge().clone();
    let viewport = Viewport::new(
        bridge,
        ViewportState { height: 400.0, width: 360.0, stable_height: 400.0, is_expanded: false },
    );

    // WHEN: An animating report arrives
    raw.dispatch(
        "viewport_changed",
        &json!({"height": 500.0, "is_expanded": true, "is_state_stable": false}),
    );

    // THEN: Height moves, stable height and width do not
    assert_eq!(viewport.height(), 500.0);
    assert_eq!(viewport.stable_height(), 400.0);
    assert_eq!(viewport.width(), 360.0);
    assert!(viewport.is_expanded());

    // WHEN: The settled report arrives
    raw.dispatch(
        "viewport_changed",
        &json!({"height": 640.0, "width": 390.0, "is_expanded": true, "is_state_stable": true}),
    );

    // THEN: Stable height catches up
    assert_eq!(viewport.stable_height(), 640.0);
    assert_eq!(viewport.width(), 390.0);
}

/// **VALUE**: Verifies last-write-wins between a local command and a host report.
///
/// **BUG THIS CATCHES**: Would catch a mirror that ignores host reports after a
/// local `expand()`, or one that ignores the local command.
#[test]
fn given_expand_then_collapsed_report_when_received_then_later_arrival_wins() {
    let (channel, bridge) = recording_bridge(6, 0);
    let raw = bridge.bridge().clone();
    let viewport = Viewport::new(bridge, ViewportState::default());

    viewport.expand().unwrap();
    assert!(viewport.is_expanded());
    assert_eq!(channel.count_of("web_app_expand"), 1);

    raw.dispatch(
        "viewport_changed",
        &json!({"height": 300.0, "is_expanded": false, "is_state_stable": true}),
    );
    assert!(!viewport.is_expanded());
}

/// **VALUE**: Verifies one event per changed field and none for an identical report.
#[test]
fn given_listeners_when_reports_arrive_then_only_changes_emit() {
    let (_, bridge) = recording_bridge(6, 0);
    let raw = bridge.bridge().clone();
    let viewport = Viewport::new(bridge, ViewportState::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    for kind in [
        ViewportEventKind::HeightChanged,
        ViewportEventKind::StableHeightChanged,
        ViewportEventKind::ExpansionChanged,
    ] {
        let sink = seen.clone();
        viewport.on(kind, move |event| sink.lock().unwrap().push(*event));
    }

    let report = json!({"height": 700.0, "is_expanded": true, "is_state_stable": true});
    raw.dispatch("viewport_changed", &report);
    raw.dispatch("viewport_changed", &report);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ViewportEvent::HeightChanged(700.0),
            ViewportEvent::StableHeightChanged(700.0),
            ViewportEvent::ExpansionChanged(true),
        ]
    );
}

#[test]
fn given_malformed_report_when_received_then_state_unchanged() {
    let (_, bridge) = recording_bridge(6, 0);
    let raw = bridge.bridge().clone();
    let viewport = Viewport::new(bridge, ViewportState::default());

    raw.dispatch("viewport_changed", &json!({"height": "tall"}));

    assert_eq!(viewport.state(), ViewportState::default());
}

#[test]
fn given_viewport_when_request_then_posts_request_viewport() {
    let (channel, bridge) = recording_bridge(6, 0);
    let viewport = Viewport::new(bridge, ViewportState::default());

    viewport.request().unwrap();

    assert_eq!(channel.count_of("web_app_request_viewport"), 1);
}

#[test]
fn given_version_6_0_when_supports_checked_then_expand_and_request_available() {
    let (_, bridge) = recording_bridge(6, 0);
    let viewport = Viewport::new(bridge, ViewportState::default());

    assert!(viewport.supports(ViewportOperation::Expand));
    assert!(viewport.supports(ViewportOperation::Request));
}
