use crate::components::{Clipboard, ClipboardOperation};
use crate::error::sdk::SdkError;
use crate::tests::recording_bridge;

use serde_json::json;

/// **VALUE**: Verifies replies are matched to requests by id.
///
/// **WHY THIS MATTERS**: Two reads can be in flight; delivering the first
/// reply to the wrong caller would leak clipboard text across features.
#[test]
fn given_two_reads_when_replies_arrive_out_of_order_then_each_gets_its_own() {
    // GIVEN: Two pending reads
    let (channel, bridge) = recording_bridge(6, 4);
    let raw = bridge.bridge().clone();
    let clipboard = Clipboard::new(bridge);
    let mut first = clipboard.read_text().unwrap();
    let mut second = clipboard.read_text().unwrap();

    let posted = channel.posted_json();
    let first_id = posted[0]["eventData"]["req_id"].as_str().unwrap().to_string();
    let second_id = posted[1]["eventData"]["req_id"].as_str().unwrap().to_string();
    assert_ne!(first_id, second_id);

    // WHEN: The host answers the second one first
    raw.dispatch("clipboard_text_received", &json!({"req_id": second_id, "data": "two"}));
    raw.dispatch("clipboard_text_received", &json!({"req_id": first_id}));

    // THEN: Each receiver got its own answer
    assert_eq!(second.try_recv().unwrap(), Some(String::from("two")));
    assert_eq!(first.try_recv().unwrap(), None);
    assert_eq!(clipboard.pending_count(), 0);
}

/// **VALUE**: Verifies replies for unknown ids are ignored.
#[test]
fn given_pending_read_when_reply_for_other_id_arrives_then_still_pending() {
    let (_, bridge) = recording_bridge(6, 4);
    let raw = bridge.bridge().clone();
    let clipboard = Clipboard::new(bridge);
    let mut receiver = clipboard.read_text().unwrap();

    raw.dispatch("clipboard_text_received", &json!({"req_id": "someone-else", "data": "x"}));

    assert!(receiver.try_recv().is_err());
    assert_eq!(clipboard.pending_count(), 1);
}

/// **VALUE**: Verifies that a refused read leaves no pending entry behind.
#[test]
fn given_version_6_2_when_read_then_unsupported_and_nothing_pending() {
    let (channel, bridge) = recording_bridge(6, 2);
    let clipboard = Clipboard::new(bridge);

    assert!(!clipboard.supports(ClipboardOperation::ReadText));
    assert!(matches!(clipboard.read_text(), Err(SdkError::MethodUnsupported { .. })));
    assert_eq!(clipboard.pending_count(), 0);
    assert!(channel.posted().is_empty());
}

/// **VALUE**: Verifies reads the caller gave up on do not pile up.
///
/// **BUG THIS CATCHES**: Would catch abandoned reads being kept until the
/// host answers them, which never happens for a host that ignores the command.
#[test]
fn given_abandoned_read_when_next_read_requested_then_abandoned_one_pruned() {
    // GIVEN: A read whose receiver was dropped before the host answered
    let (_, bridge) = recording_bridge(6, 4);
    let clipboard = Clipboard::new(bridge);
    drop(clipboard.read_text().unwrap());
    assert_eq!(clipboard.pending_count(), 1);

    // WHEN: Another read is requested
    let mut live = clipboard.read_text().unwrap();

    // THEN: Only the live read is still waiting
    assert_eq!(clipboard.pending_count(), 1);
    assert!(live.try_recv().is_err());
}
