use crate::components::{HapticFeedbackOperation, Haptics};
use crate::error::sdk::SdkError;
use crate::protocol::haptic::{ImpactStyle, NotificationType};
use crate::tests::recording_bridge;

use serde_json::json;

#[test]
fn given_version_6_1_when_feedback_triggered_then_posts_each_shape() {
    let (channel, bridge) = recording_bridge(6, 1);
    let haptics = Haptics::new(bridge);

    haptics.impact_occurred(ImpactStyle::Light).unwrap();
    haptics.notification_occurred(NotificationType::Success).unwrap();
    haptics.selection_changed().unwrap();

    let data: Vec<_> = channel
        .posted_json()
        .into_iter()
        .map(|envelope| envelope["eventData"].clone())
        .collect();
    assert_eq!(
        data,
        vec![
            json!({"type": "impact", "impact_style": "light"}),
            json!({"type": "notification", "notification_type": "success"}),
            json!({"type": "selection_change"}),
        ]
    );
}

/// **VALUE**: Verifies haptics are refused on hosts older than 6.1.
#[test]
fn given_version_6_0_when_feedback_triggered_then_method_unsupported() {
    let (channel, bridge) = recording_bridge(6, 0);
    let haptics = Haptics::new(bridge);

    assert!(!haptics.supports(HapticFeedbackOperation::SelectionChanged));
    assert!(matches!(haptics.selection_changed(), Err(SdkError::MethodUnsupported { .. })));
    assert!(channel.posted().is_empty());
}
