use host_simulator::error::SimulatorError;
use host_simulator::host::{FakeHost, HostProfile};
use host_simulator::session::{POPUP_CONFIRM_ID, SessionReport, run_session};

use miniapp_bridge::bridge::run_event_pump;
use miniapp_bridge::channel::host_link;
use miniapp_bridge::{LaunchParams, Sdk, SdkConfig};

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(10);

async fn simulate(
    encoded: &str,
    profile: HostProfile,
) -> (Result<SessionReport, SimulatorError>, FakeHost) {
    let launch = LaunchParams::parse(encoded).expect("valid launch params");
    let (client, host_end) = host_link();
    let host = tokio::spawn(FakeHost::new(profile).run(host_end));

    let mut sdk =
        Sdk::init(launch, &SdkConfig::default(), Arc::new(client.channel)).expect("init");
    let pump = tokio::spawn(run_event_pump(Arc::clone(sdk.bridge()), client.events));

    let report = timeout(WAIT, run_session(&mut sdk))
        .await
        .expect("session in time");
    drop(sdk);

    let host = timeout(WAIT, host)
        .await
        .expect("host stops")
        .expect("host task");
    timeout(WAIT, pump)
        .await
        .expect("pump stops")
        .expect("pump task");

    (report, host)
}

// ============================================================================
// run_session() - full scripted session over the in-process link
// ============================================================================

/// **VALUE**: Verifies a 6.4 session exercises every component end to end.
///
/// **WHY THIS MATTERS**: This is the path the binary runs; each answer crosses
/// the link, the pump and the bridge before a component resolves it.
///
/// **BUG THIS CATCHES**: Would catch any answer that never reaches its
/// component, which would show up as a timeout or a `None` field.
#[tokio::test]
async fn given_version_6_4_when_session_runs_then_every_answer_collected() {
    // GIVEN: A desktop client on 6.4 and the default host profile
    let profile = HostProfile::default();

    // WHEN: Running the scripted session
    let (report, host) = simulate("tgWebAppVersion=6.4&tgWebAppPlatform=tdesktop", profile.clone()).await;
    let report = report.expect("session succeeds");

    // THEN: Every host answer landed in the report
    assert_eq!(report.version, "6.4");
    assert_eq!(report.platform, "tdesktop");
    assert!(report.back_button_pressed);
    assert_eq!(report.popup_button.as_deref(), Some(POPUP_CONFIRM_ID));
    assert_eq!(report.qr_text, profile.qr_text);
    assert_eq!(report.clipboard_text, profile.clipboard_text);
    assert!(report.is_expanded);
    assert_eq!(report.viewport_height, profile.expanded_height);
    assert_eq!(report.bg_color.as_deref(), Some("#17212b"));
    assert!(report.skipped.is_empty());

    // AND: The host saw the close and stopped on it
    assert!(host.is_closed());
}

/// **VALUE**: Verifies a 6.0 session skips everything newer instead of failing.
///
/// **BUG THIS CATCHES**: Would catch the script calling an unsupported
/// operation, which the scoped transport rejects with MethodUnsupported.
#[tokio::test]
async fn given_version_6_0_when_session_runs_then_newer_components_skipped() {
    let (report, host) = simulate(
        "tgWebAppVersion=6.0&tgWebAppPlatform=android",
        HostProfile::default(),
    )
    .await;
    let report = report.expect("session succeeds");

    assert_eq!(
        report.skipped,
        vec!["back_button", "haptic_feedback", "popup", "qr_scanner", "clipboard"]
    );
    assert!(!report.back_button_pressed);
    assert_eq!(report.popup_button, None);
    assert!(host.is_closed());
}

/// **VALUE**: Verifies a 6.2 web session gets the popup but not the 6.4 features.
#[tokio::test]
async fn given_web_client_on_6_2_when_session_runs_then_popup_only() {
    let (report, host) = simulate(
        "tgWebAppVersion=6.2&tgWebAppPlatform=weba",
        HostProfile::default(),
    )
    .await;
    let report = report.expect("session succeeds");

    assert!(report.back_button_pressed);
    assert_eq!(report.popup_button.as_deref(), Some(POPUP_CONFIRM_ID));
    assert_eq!(report.skipped, vec!["qr_scanner", "clipboard"]);
    // iframe_ready was posted and accepted without an answer
    assert!(host.handled() > 0);
}

/// **VALUE**: Verifies empty host answers come back as `None`, not errors.
#[tokio::test]
async fn given_host_with_empty_clipboard_and_no_qr_when_session_runs_then_none() {
    let profile = HostProfile {
        qr_text: None,
        clipboard_text: None,
        ..HostProfile::default()
    };

    let (report, _host) = simulate("tgWebAppVersion=6.4&tgWebAppPlatform=ios", profile).await;
    let report = report.expect("session succeeds");

    assert_eq!(report.qr_text, None);
    assert_eq!(report.clipboard_text, None);
}
