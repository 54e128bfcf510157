use serde::{Deserialize, Serialize};

/// Payload of `web_app_trigger_haptic_feedback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HapticFeedback {
    /// A collision between UI elements.
    Impact { impact_style: ImpactStyle },
    /// An action succeeded, failed or produced a warning.
    Notification { notification_type: NotificationType },
    /// The user changed a selection.
    SelectionChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
    Rigid,
    Soft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Error,
    Success,
    Warning,
}
