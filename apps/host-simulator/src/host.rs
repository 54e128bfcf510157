//! In-process fake host.
//!
//! Reads the envelopes the page posts and answers the commands a real client
//! would answer. Everything else is logged and acknowledged with silence.

use crate::error::SimulatorError;

use miniapp_bridge::channel::HostEnd;
use miniapp_bridge::protocol::incoming::{
    BACK_BUTTON_PRESSED, CLIPBOARD_TEXT_RECEIVED, INVOICE_CLOSED, POPUP_CLOSED, QR_TEXT_RECEIVED,
    THEME_CHANGED, VIEWPORT_CHANGED,
};
use miniapp_bridge::protocol::outgoing::{
    WEB_APP_CLOSE, WEB_APP_EXPAND, WEB_APP_OPEN_INVOICE, WEB_APP_OPEN_POPUP,
    WEB_APP_OPEN_SCAN_QR_POPUP, WEB_APP_READ_TEXT_FROM_CLIPBOARD, WEB_APP_REQUEST_THEME,
    WEB_APP_REQUEST_VIEWPORT, WEB_APP_SETUP_BACK_BUTTON,
};
use miniapp_bridge::protocol::{
    BackButtonParams, ClipboardReadParams, InvoiceStatus, OpenInvoiceParams, PopupParams,
    RawEvent, ThemeParamsData,
};

use common::ErrorLocation;

use std::panic::Location;

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// What the fake host answers with.
#[derive(Debug, Clone, PartialEq)]
pub struct HostProfile {
    pub theme: ThemeParamsData,
    pub viewport_height: f64,
    pub viewport_width: f64,
    /// Expanded height, reported after `web_app_expand`.
    pub expanded_height: f64,
    /// `None` simulates the user closing the scanner without a result.
    pub qr_text: Option<String>,
    /// `None` simulates an empty clipboard or denied access.
    pub clipboard_text: Option<String>,
    pub invoice_status: InvoiceStatus,
}

impl Default for HostProfile {
    fn default() -> Self {
        Self {
            theme: ThemeParamsData {
                bg_color: Some(String::from("#17212b")),
                secondary_bg_color: Some(String::from("#232e3c")),
                text_color: Some(String::from("#f5f5f5")),
                hint_color: Some(String::from("#708499")),
                link_color: Some(String::from("#6ab3f3")),
                button_color: Some(String::from("#5288c1")),
                button_text_color: Some(String::from("#ffffff")),
            },
            viewport_height: 540.0,
            viewport_width: 390.0,
            expanded_height: 780.0,
            qr_text: Some(String::from("https://t.me/simulator")),
            clipboard_text: Some(String::from("copied by the simulator")),
            invoice_status: InvoiceStatus::Paid,
        }
    }
}

pub struct FakeHost {
    profile: HostProfile,
    is_expanded: bool,
    back_button_visible: bool,
    closed: bool,
    handled: usize,
}

impl FakeHost {
    pub fn new(profile: HostProfile) -> Self {
        Self {
            profile,
            is_expanded: false,
            back_button_visible: false,
            closed: false,
            handled: 0,
        }
    }

    /// True once the page asked to be closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of envelopes accepted so far.
    pub fn handled(&self) -> usize {
        self.handled
    }

    /// Answer one posted envelope with zero or more raw host messages.
    ///
    /// # Errors
    ///
    /// Returns [`SimulatorError::Host`] if the envelope or its payload cannot
    /// be decoded.
    #[track_caller]
    pub fn respond(&mut self, envelope: &str) -> Result<Vec<String>, SimulatorError> {
        let location = ErrorLocation::from(Location::caller());
        let raw: RawEvent = serde_json::from_str(envelope).map_err(|e| SimulatorError::Host {
            message: format!("Malformed envelope {envelope:?}: {e}"),
            location,
        })?;
        self.handled += 1;
        debug!("Host received {}", raw.event_type);

        let replies = match raw.event_type.as_str() {
            WEB_APP_REQUEST_THEME => {
                vec![event(THEME_CHANGED, json!({ "theme_params": self.profile.theme }))]
            }
            WEB_APP_REQUEST_VIEWPORT => vec![self.viewport_event()],
            WEB_APP_EXPAND => {
                self.is_expanded = true;
                vec![self.viewport_event()]
            }
            WEB_APP_SETUP_BACK_BUTTON => {
                let params: BackButtonParams = payload(&raw, location)?;
                let became_visible = params.is_visible && !self.back_button_visible;
                self.back_button_visible = params.is_visible;
                if became_visible {
                    info!("Host: back button shown, pressing it");
                    vec![event(BACK_BUTTON_PRESSED, Value::Null)]
                } else {
                    Vec::new()
                }
            }
            WEB_APP_OPEN_POPUP => {
                let params: PopupParams = payload(&raw, location)?;
                let button_id = params.buttons.first().and_then(|button| button.id.clone());
                info!("Host: popup {:?} answered with {:?}", params.message, button_id);
                vec![event(POPUP_CLOSED, json!({ "button_id": button_id }))]
            }
            WEB_APP_OPEN_SCAN_QR_POPUP => {
                vec![event(QR_TEXT_RECEIVED, json!({ "data": self.profile.qr_text }))]
            }
            WEB_APP_READ_TEXT_FROM_CLIPBOARD => {
                let params: ClipboardReadParams = payload(&raw, location)?;
                vec![event(
                    CLIPBOARD_TEXT_RECEIVED,
                    json!({ "req_id": params.req_id, "data": self.profile.clipboard_text }),
                )]
            }
            WEB_APP_OPEN_INVOICE => {
                let params: OpenInvoiceParams = payload(&raw, location)?;
                vec![event(
                    INVOICE_CLOSED,
                    json!({ "slug": params.slug, "status": self.profile.invoice_status }),
                )]
            }
            WEB_APP_CLOSE => {
                info!("Host: page asked to close");
                self.closed = true;
                Vec::new()
            }
            other => {
                debug!("Host: no answer for {}", other);
                Vec::new()
            }
        };

        Ok(replies)
    }

    /// Serve `end` until the page closes itself or drops its side of the link.
    ///
    /// Returns the host so the caller can inspect what it handled.
    pub async fn run(mut self, mut end: HostEnd) -> Self {
        info!("Fake host started");

        while let Some(envelope) = end.commands.recv().await {
            let replies = match self.respond(&envelope) {
                Ok(replies) => replies,
                Err(e) => {
                    warn!("Host dropping command: {}", e);
                    continue;
                }
            };

            for reply in replies {
                if end.events.send(reply).is_err() {
                    info!("Fake host stopped: page end dropped");
                    return self;
                }
            }

            if self.closed {
                break;
            }
        }

        info!("Fake host stopped after {} commands", self.handled);
        self
    }

    fn viewport_event(&self) -> String {
        let height = if self.is_expanded {
            self.profile.expanded_height
        } else {
            self.profile.viewport_height
        };

        event(
            VIEWPORT_CHANGED,
            json!({
                "height": height,
                "width": self.profile.viewport_width,
                "is_expanded": self.is_expanded,
                "is_state_stable": true,
            }),
        )
    }
}

fn event(name: &str, data: Value) -> String {
    json!({ "eventType": name, "eventData": data }).to_string()
}

fn payload<T: DeserializeOwned>(raw: &RawEvent, location: ErrorLocation) -> Result<T, SimulatorError> {
    serde_json::from_value(raw.event_data.clone()).map_err(|e| SimulatorError::Host {
        message: format!("Malformed {} payload: {e}", raw.event_type),
        location,
    })
}
