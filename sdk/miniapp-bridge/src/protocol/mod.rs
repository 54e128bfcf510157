//! Typed wire protocol between the page and its host.
//!
//! Each direction is a closed tagged union keyed by the wire name:
//! [`OutgoingCommand`] for page → host, [`IncomingEvent`] for host → page.
//! The raw envelope for both is `{"eventType": <name>, "eventData": <payload>}`.

pub mod haptic;
pub mod incoming;
pub mod outgoing;
pub mod popup;

pub use haptic::{HapticFeedback, ImpactStyle, NotificationType};
pub use incoming::{
    ClipboardTextReceived, IncomingEvent, InvoiceClosed, InvoiceStatus, PopupClosed,
    QrTextReceived, RawEvent, ThemeChanged, ThemeParamsData, ViewportChanged,
};
pub use outgoing::{
    BackButtonParams, BackgroundColorParams, ClipboardReadParams, ClosingBehaviorParams,
    DataSendParams, HeaderColorKey, HeaderColorParams, MainButtonParams, OpenInvoiceParams,
    OpenLinkParams, OpenTgLinkParams, OutgoingCommand, ScanQrPopupParams,
};
pub use popup::{PopupButton, PopupButtonKind, PopupParams};

/// Field names of the host envelope.
pub const ENVELOPE_TYPE_FIELD: &str = "eventType";
pub const ENVELOPE_DATA_FIELD: &str = "eventData";
