use crate::components::{Layout, LayoutEvent, LayoutEventKind, LayoutOperation};
use crate::error::sdk::SdkError;
use crate::protocol::outgoing::HeaderColorKey;
use crate::tests::recording_bridge;

use common::to_rgb;

use std::sync::{Arc, Mutex};

use serde_json::json;

/// **VALUE**: Verifies colours are normalized before they reach the host.
///
/// **BUG THIS CATCHES**: Would catch forwarding `rgb(...)` or short hex, which
/// some hosts ignore.
#[test]
fn given_short_hex_when_background_set_then_posts_long_hex_and_emits() {
    let (channel, bridge) = recording_bridge(6, 1);
    let mut layout = Layout::new(bridge, to_rgb("#ffffff").unwrap());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    layout.on(LayoutEventKind::BackgroundColorChanged, move |event| {
        sink.lock().unwrap().push(event.clone())
    });

    layout.set_background_color("#0F0").unwrap();
    layout.set_background_color("rgb(0,255,0)").unwrap();

    assert_eq!(
        channel.posted_json()[0]["eventData"],
        json!({"color": "#00ff00"})
    );
    assert_eq!(channel.count_of("web_app_set_background_color"), 2);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![LayoutEvent::BackgroundColorChanged(to_rgb("#00ff00").unwrap())]
    );
}

#[test]
fn given_header_key_when_set_then_posts_token_and_mirrors() {
    let (channel, bridge) = recording_bridge(6, 1);
    let mut layout = Layout::new(bridge, to_rgb("#ffffff").unwrap());

    layout.set_header_color(HeaderColorKey::SecondaryBgColor).unwrap();

    assert_eq!(layout.header_color(), HeaderColorKey::SecondaryBgColor);
    assert_eq!(
        channel.posted_json()[0]["eventData"],
        json!({"color_key": "secondary_bg_color"})
    );
}

#[test]
fn given_version_6_0_when_colors_set_then_unsupported_and_unchanged() {
    let (_, bridge) = recording_bridge(6, 0);
    let mut layout = Layout::new(bridge, to_rgb("#ffffff").unwrap());

    assert!(!layout.supports(LayoutOperation::SetBackgroundColor));
    assert!(matches!(
        layout.set_background_color("#000000"),
        Err(SdkError::MethodUnsupported { .. })
    ));
    assert_eq!(layout.background_color().as_str(), "#ffffff");
}
