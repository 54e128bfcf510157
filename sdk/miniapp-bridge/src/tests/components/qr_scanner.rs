use crate::components::{QrScanner, QrScannerEvent, QrScannerEventKind, QrScannerOperation};
use crate::error::sdk::SdkError;
use crate::tests::{answering_bridge, recording_bridge, within_deadline};

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

/// **VALUE**: Verifies a scan resolves the receiver and closes the scanner.
///
/// **WHY THIS MATTERS**: The host keeps scanning until told to stop; the
/// component must close it after the first result.
#[test]
fn given_open_scanner_when_text_received_then_resolves_and_posts_close() {
    // GIVEN: An open scanner on 6.4
    let (channel, bridge) = recording_bridge(6, 4);
    let raw = bridge.bridge().clone();
    let scanner = QrScanner::new(bridge);
    let mut receiver = scanner.open(Some("Scan the code")).unwrap();

    // WHEN: The host reports a scan
    raw.dispatch("qr_text_received", &json!({"data": "https://t.me/x"}));

    // THEN: Resolved, closed on both sides
    assert_eq!(receiver.try_recv().unwrap(), Some(String::from("https://t.me/x")));
    assert!(!scanner.is_opened());
    assert_eq!(channel.count_of("web_app_close_scan_qr_popup"), 1);
}

/// **VALUE**: Verifies a user dismissal resolves to `None`.
#[test]
fn given_open_scanner_when_host_reports_closed_then_resolves_none() {
    let (channel, bridge) = recording_bridge(6, 4);
    let raw = bridge.bridge().clone();
    let scanner = QrScanner::new(bridge);
    let mut receiver = scanner.open(None).unwrap();

    raw.dispatch("scan_qr_popup_closed", &Value::Null);

    assert_eq!(receiver.try_recv().unwrap(), None);
    assert!(!scanner.is_opened());
    assert_eq!(channel.count_of("web_app_close_scan_qr_popup"), 0);
}

/// **VALUE**: Verifies the 6.4 gate on the scanner.
#[test]
fn given_version_6_0_when_opened_then_unsupported_and_not_opened() {
    let (channel, bridge) = recording_bridge(6, 0);
    let scanner = QrScanner::new(bridge);

    assert!(!scanner.supports(QrScannerOperation::Open));
    assert!(matches!(scanner.open(None), Err(SdkError::MethodUnsupported { .. })));
    assert!(!scanner.is_opened());
    assert!(channel.posted().is_empty());
}

/// **VALUE**: Verifies explicit close and the events emitted along the way.
#[test]
fn given_open_scanner_when_closed_then_open_changed_events_and_none_result() {
    let (channel, bridge) = recording_bridge(6, 4);
    let scanner = QrScanner::new(bridge);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    scanner.on(QrScannerEventKind::OpenChanged, move |event| {
        sink.lock().unwrap().push(event.clone())
    });

    let mut receiver = scanner.open(None).unwrap();
    assert!(matches!(scanner.open(None), Err(SdkError::AlreadyOpened { .. })));
    scanner.close().unwrap();

    assert_eq!(receiver.try_recv().unwrap(), None);
    assert_eq!(channel.count_of("web_app_open_scan_qr_popup"), 1);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![QrScannerEvent::OpenChanged(true), QrScannerEvent::OpenChanged(false)]
    );
}

/// **VALUE**: Verifies stray scans while closed are ignored.
#[test]
fn given_closed_scanner_when_text_received_then_nothing_posted() {
    let (channel, bridge) = recording_bridge(6, 4);
    let raw = bridge.bridge().clone();
    let scanner = QrScanner::new(bridge);
    let seen = Arc::new(Mutex::new(0));
    let sink = seen.clone();
    scanner.on(QrScannerEventKind::Scanned, move |_| *sink.lock().unwrap() += 1);

    raw.dispatch("qr_text_received", &json!({"data": "late"}));

    assert!(channel.posted().is_empty());
    assert_eq!(*seen.lock().unwrap(), 0);
}

/// **VALUE**: Verifies a scan reported from inside `post` resolves the scanner.
///
/// **BUG THIS CATCHES**: Would catch `open` holding the scanner state across
/// the send, which blocks the reply on the same mutex.
#[test]
fn given_host_scanning_synchronously_when_opened_then_returns_closed_with_text() {
    let (opened, mut receiver) = within_deadline(|| {
        // GIVEN: A host that reports a scan before post returns
        let bridge = answering_bridge(
            6,
            4,
            &[("web_app_open_scan_qr_popup", "qr_text_received", json!({"data": "code"}))],
        );
        let scanner = QrScanner::new(bridge);

        // WHEN: Opening
        let receiver = scanner.open(None).expect("open returns");
        (scanner.is_opened(), receiver)
    });

    // THEN: Closed again, with the scanned text delivered
    assert!(!opened);
    assert_eq!(receiver.try_recv().unwrap(), Some(String::from("code")));
}

/// **VALUE**: Verifies a failed send does not leave the scanner marked open.
#[test]
fn given_disconnected_channel_when_opened_then_scanner_stays_closed() {
    let (channel, bridge) = recording_bridge(6, 4);
    let scanner = QrScanner::new(bridge);
    channel.disconnect();

    assert!(matches!(scanner.open(None), Err(SdkError::Bridge(_))));
    assert!(!scanner.is_opened());
    // A later open is not refused as AlreadyOpened
    assert!(matches!(scanner.open(None), Err(SdkError::Bridge(_))));
}
