use crate::components::supports::Operation;
use crate::error::sdk::SdkError;
use crate::protocol::haptic::{HapticFeedback, ImpactStyle, NotificationType};
use crate::protocol::outgoing::{OutgoingCommand, WEB_APP_TRIGGER_HAPTIC_FEEDBACK};
use crate::scoped::BridgeScoped;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticFeedbackOperation {
    ImpactOccurred,
    NotificationOccurred,
    SelectionChanged,
}

impl Operation for HapticFeedbackOperation {
    fn methods(self) -> &'static [&'static str] {
        &[WEB_APP_TRIGGER_HAPTIC_FEEDBACK]
    }
}

/// Stateless trigger for the device's haptic engine.
#[derive(Clone)]
pub struct Haptics {
    bridge: BridgeScoped,
}

impl Haptics {
    pub fn new(bridge: BridgeScoped) -> Self {
        Self { bridge }
    }

    #[track_caller]
    pub fn impact_occurred(&self, impact_style: ImpactStyle) -> Result<(), SdkError> {
        self.trigger(HapticFeedback::Impact { impact_style })
    }

    #[track_caller]
    pub fn notification_occurred(
        &self,
        notification_type: NotificationType,
    ) -> Result<(), SdkError> {
        self.trigger(HapticFeedback::Notification { notification_type })
    }

    #[track_caller]
    pub fn selection_changed(&self) -> Result<(), SdkError> {
        self.trigger(HapticFeedback::SelectionChange)
    }

    #[track_caller]
    fn trigger(&self, feedback: HapticFeedback) -> Result<(), SdkError> {
        self.bridge
            .send(&OutgoingCommand::WebAppTriggerHapticFeedback(feedback))
    }

    pub fn supports(&self, operation: HapticFeedbackOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}
