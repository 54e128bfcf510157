//! Host → page events.
//!
//! The transport delivers payloads as opaque JSON. Listeners that care about a
//! known event decode it with [`IncomingEvent::decode`]; unknown names are not
//! an error, the host may be newer than this library.

use crate::error::bridge::BridgeError;

use common::ErrorLocation;

use std::panic::Location;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const BACK_BUTTON_PRESSED: &str = "back_button_pressed";
pub const MAIN_BUTTON_PRESSED: &str = "main_button_pressed";
pub const SETTINGS_BUTTON_PRESSED: &str = "settings_button_pressed";
pub const POPUP_CLOSED: &str = "popup_closed";
pub const VIEWPORT_CHANGED: &str = "viewport_changed";
pub const THEME_CHANGED: &str = "theme_changed";
pub const INVOICE_CLOSED: &str = "invoice_closed";
pub const QR_TEXT_RECEIVED: &str = "qr_text_received";
pub const SCAN_QR_POPUP_CLOSED: &str = "scan_qr_popup_closed";
pub const CLIPBOARD_TEXT_RECEIVED: &str = "clipboard_text_received";

/// Raw host message before any interpretation of the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "eventType")]
    pub event_type: String,

    #[serde(rename = "eventData", default)]
    pub event_data: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IncomingEvent {
    BackButtonPressed,
    MainButtonPressed,
    SettingsButtonPressed,
    PopupClosed(PopupClosed),
    ViewportChanged(ViewportChanged),
    ThemeChanged(ThemeChanged),
    InvoiceClosed(InvoiceClosed),
    QrTextReceived(QrTextReceived),
    ScanQrPopupClosed,
    ClipboardTextReceived(ClipboardTextReceived),
}

impl IncomingEvent {
    /// Decode a known event by name.
    ///
    /// Returns `Ok(None)` for names this library does not know.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::EventPayload`] when a known event carries a
    /// payload of the wrong shape.
    #[track_caller]
    pub fn decode(name: &str, data: &Value) -> Result<Option<Self>, BridgeError> {
        let event = match name {
            BACK_BUTTON_PRESSED => IncomingEvent::BackButtonPressed,
            MAIN_BUTTON_PRESSED => IncomingEvent::MainButtonPressed,
            SETTINGS_BUTTON_PRESSED => IncomingEvent::SettingsButtonPressed,
            SCAN_QR_POPUP_CLOSED => IncomingEvent::ScanQrPopupClosed,
            POPUP_CLOSED => IncomingEvent::PopupClosed(decode_payload(name, data)?),
            VIEWPORT_CHANGED => IncomingEvent::ViewportChanged(decode_payload(name, data)?),
            THEME_CHANGED => IncomingEvent::ThemeChanged(decode_payload(name, data)?),
            INVOICE_CLOSED => IncomingEvent::InvoiceClosed(decode_payload(name, data)?),
            QR_TEXT_RECEIVED => IncomingEvent::QrTextReceived(decode_payload(name, data)?),
            CLIPBOARD_TEXT_RECEIVED => {
                IncomingEvent::ClipboardTextReceived(decode_payload(name, data)?)
            }
            _ => return Ok(None),
        };

        Ok(Some(event))
    }

    pub fn name(&self) -> &'static str {
        match self {
            IncomingEvent::BackButtonPressed => BACK_BUTTON_PRESSED,
            IncomingEvent::MainButtonPressed => MAIN_BUTTON_PRESSED,
            IncomingEvent::SettingsButtonPressed => SETTINGS_BUTTON_PRESSED,
            IncomingEvent::PopupClosed(_) => POPUP_CLOSED,
            IncomingEvent::ViewportChanged(_) => VIEWPORT_CHANGED,
            IncomingEvent::ThemeChanged(_) => THEME_CHANGED,
            IncomingEvent::InvoiceClosed(_) => INVOICE_CLOSED,
            IncomingEvent::QrTextReceived(_) => QR_TEXT_RECEIVED,
            IncomingEvent::ScanQrPopupClosed => SCAN_QR_POPUP_CLOSED,
            IncomingEvent::ClipboardTextReceived(_) => CLIPBOARD_TEXT_RECEIVED,
        }
    }
}

// Hosts send `null` or omit `eventData` for events whose fields are all optional.
#[track_caller]
fn decode_payload<T: DeserializeOwned>(name: &str, data: &Value) -> Result<T, BridgeError> {
    let data = match data {
        Value::Null => Value::Object(Map::new()),
        other => other.clone(),
    };

    let location = ErrorLocation::from(Location::caller());
    serde_json::from_value(data).map_err(|e| BridgeError::EventPayload {
        event: name.to_string(),
        message: e.to_string(),
        location,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupClosed {
    /// Absent when the popup was dismissed without pressing a button.
    #[serde(default)]
    pub button_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportChanged {
    pub height: f64,

    #[serde(default)]
    pub width: Option<f64>,

    pub is_expanded: bool,

    /// False while the viewport is still animating.
    pub is_state_stable: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChanged {
    pub theme_params: ThemeParamsData,
}

/// Theme colours reported by the host. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeParamsData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_bg_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceClosed {
    pub slug: String,
    pub status: InvoiceStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    Failed,
    Pending,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrTextReceived {
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardTextReceived {
    pub req_id: String,

    /// `None` when the clipboard was empty or access was denied.
    #[serde(default)]
    pub data: Option<String>,
}
