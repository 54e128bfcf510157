use miniapp_bridge::channel::MemoryChannel;
use miniapp_bridge::components::Platform;
use miniapp_bridge::{CoreError, LaunchParams, Sdk, SdkConfig};

use std::sync::Arc;

fn launch(encoded: &str) -> LaunchParams {
    LaunchParams::parse(encoded).expect("valid launch params")
}

fn event_types(channel: &MemoryChannel) -> Vec<String> {
    channel
        .posted_json()
        .iter()
        .map(|envelope| envelope["eventType"].as_str().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Sdk::init() - bootstrap sequence
// ============================================================================

/// **VALUE**: Verifies the bootstrap commands for a web client.
///
/// **WHY THIS MATTERS**: Web clients keep the page hidden until `iframe_ready`
/// arrives; forgetting it leaves the user on a blank frame.
///
/// **BUG THIS CATCHES**: Would catch a missing `iframe_ready`, or the initial
/// state requests going out before it.
#[test]
fn given_web_platform_when_init_then_iframe_ready_then_state_requests() {
    // GIVEN: A web client on 6.4 with default config
    let channel = Arc::new(MemoryChannel::new());
    let params = launch("tgWebAppVersion=6.4&tgWebAppPlatform=weba");

    // WHEN: Initializing
    let sdk = Sdk::init(params, &SdkConfig::default(), channel.clone()).expect("init");

    // THEN: iframe_ready first, then theme and viewport requests
    assert_eq!(
        event_types(&channel),
        vec!["iframe_ready", "web_app_request_theme", "web_app_request_viewport"]
    );
    assert_eq!(sdk.web_app.platform(), &Platform::Weba);
}

/// **VALUE**: Verifies native clients skip `iframe_ready` and config can skip requests.
#[test]
fn given_native_platform_without_initial_requests_when_init_then_nothing_posted() {
    let channel = Arc::new(MemoryChannel::new());
    let config = SdkConfig {
        request_initial_state: false,
        ..SdkConfig::default()
    };

    let sdk = Sdk::init(launch("tgWebAppVersion=6.1&tgWebAppPlatform=ios"), &config, channel.clone())
        .expect("init");

    assert!(channel.posted().is_empty());
    assert_eq!(sdk.version().to_string(), "6.1");
}

/// **VALUE**: Verifies theme colours from the launch params seed the components.
#[test]
fn given_theme_in_launch_params_when_init_then_main_button_and_layout_use_it() {
    let channel = Arc::new(MemoryChannel::new());
    let params = launch(
        "tgWebAppVersion=6.4&tgWebAppPlatform=android&tgWebAppThemeParams=\
         %7B%22bg_color%22%3A%22%23101010%22%2C%22button_color%22%3A%22%23FF8800%22%7D",
    );

    let sdk = Sdk::init(params, &SdkConfig::default(), channel).expect("init");

    assert_eq!(sdk.main_button.color().as_str(), "#ff8800");
    // Not in the theme: fallback
    assert_eq!(sdk.main_button.text_color().as_str(), "#ffffff");
    assert_eq!(sdk.layout.background_color().as_str(), "#101010");
    assert_eq!(sdk.theme_params.bg_color().map(|c| c.to_string()).as_deref(), Some("#101010"));
}

/// **VALUE**: Verifies an unreachable host fails initialization on a web client.
#[test]
fn given_disconnected_channel_when_init_on_web_then_channel_error() {
    let channel = Arc::new(MemoryChannel::new());
    channel.disconnect();

    let result = Sdk::init(
        launch("tgWebAppVersion=6.4&tgWebAppPlatform=web"),
        &SdkConfig::default(),
        channel,
    );

    assert!(matches!(result, Err(CoreError::Sdk(_))));
}

/// **VALUE**: Verifies components share one bridge and host events reach them.
///
/// **WHY THIS MATTERS**: Each component subscribes on the shared bridge; a
/// second bridge would swallow events meant for the others.
#[test]
fn given_initialized_sdk_when_host_events_received_then_components_update() {
    let channel = Arc::new(MemoryChannel::new());
    let sdk = Sdk::init(
        launch("tgWebAppVersion=6.4&tgWebAppPlatform=tdesktop"),
        &SdkConfig::default(),
        channel,
    )
    .expect("init");

    sdk.bridge()
        .receive(r#"{"eventType":"viewport_changed","eventData":{"height":720,"is_expanded":true,"is_state_stable":true}}"#)
        .expect("valid envelope");
    sdk.bridge()
        .receive(r##"{"eventType":"theme_changed","eventData":{"theme_params":{"text_color":"#eeeeee"}}}"##)
        .expect("valid envelope");

    assert_eq!(sdk.viewport.stable_height(), 720.0);
    assert!(sdk.viewport.is_expanded());
    assert_eq!(
        sdk.theme_params.params().text_color.as_deref(),
        Some("#eeeeee")
    );
    assert_eq!(sdk.theme_params.params().bg_color, None::<String>);
    assert_eq!(sdk.launch_params().theme_params.text_color, None::<String>);
}
