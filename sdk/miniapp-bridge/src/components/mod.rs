//! UI-proxy components.
//!
//! Every stateful component follows one pattern:
//!
//! - It owns a local mirror of host-owned state. The mirror is the *last
//!   commanded state*: it is updated after a command was posted, or when a
//!   host event carries new state. When both happen, the later arrival wins.
//! - Mutators always post the command, even when the mirror already matches,
//!   and emit a local change event only when the mirror actually changes.
//! - Listener registration is routed by category: host interactions (button
//!   presses) subscribe straight on the bridge, local state changes on the
//!   component's own [`EventEmitter`](crate::emitter::EventEmitter). The
//!   returned [`ListenerHandle`] remembers which.

mod back_button;
mod clipboard;
mod closing_behavior;
mod haptic_feedback;
mod layout;
mod main_button;
mod popup;
mod qr_scanner;
mod supports;
mod theme_params;
mod validation;
mod viewport;
mod web_app;

pub use back_button::{BackButton, BackButtonEvent, BackButtonEventKind, BackButtonOperation};
pub use clipboard::{Clipboard, ClipboardOperation};
pub use closing_behavior::{
    ClosingBehavior, ClosingBehaviorEvent, ClosingBehaviorEventKind, ClosingBehaviorOperation,
};
pub use haptic_feedback::{HapticFeedbackOperation, Haptics};
pub use layout::{Layout, LayoutEvent, LayoutEventKind, LayoutOperation};
pub use main_button::{
    MainButton, MainButtonEvent, MainButtonEventKind, MainButtonOperation, MainButtonState,
    MainButtonUpdate,
};
pub use popup::{Popup, PopupEvent, PopupEventKind, PopupOperation};
pub use qr_scanner::{QrScanner, QrScannerEvent, QrScannerEventKind, QrScannerOperation};
pub use supports::Operation;
pub use theme_params::{
    ThemeParams, ThemeParamsEvent, ThemeParamsEventKind, ThemeParamsOperation,
};
pub use viewport::{
    Viewport, ViewportEvent, ViewportEventKind, ViewportOperation, ViewportState,
};
pub use web_app::{Platform, WebApp, WebAppOperation};

use crate::bridge::SubscriptionId;
use crate::emitter::ListenerId;

/// Listener registered through a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerHandle {
    /// Subscribed on the bridge for a host event.
    Host(SubscriptionId),
    /// Registered on the component's own emitter.
    Local(ListenerId),
}
