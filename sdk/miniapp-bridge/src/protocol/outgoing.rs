//! Page → host commands.
//!
//! The wire name of each command fixes its payload shape, so the set is a
//! closed enum rather than a name plus free-form map. Serializing a command
//! yields the full host envelope; payload-less commands carry no `eventData`.

use crate::protocol::haptic::HapticFeedback;
use crate::protocol::popup::PopupParams;

use serde::{Deserialize, Serialize};

pub const IFRAME_READY: &str = "iframe_ready";
pub const WEB_APP_CLOSE: &str = "web_app_close";
pub const WEB_APP_DATA_SEND: &str = "web_app_data_send";
pub const WEB_APP_EXPAND: &str = "web_app_expand";
pub const WEB_APP_OPEN_LINK: &str = "web_app_open_link";
pub const WEB_APP_OPEN_TG_LINK: &str = "web_app_open_tg_link";
pub const WEB_APP_OPEN_POPUP: &str = "web_app_open_popup";
pub const WEB_APP_OPEN_INVOICE: &str = "web_app_open_invoice";
pub const WEB_APP_READY: &str = "web_app_ready";
pub const WEB_APP_REQUEST_THEME: &str = "web_app_request_theme";
pub const WEB_APP_REQUEST_VIEWPORT: &str = "web_app_request_viewport";
pub const WEB_APP_SETUP_BACK_BUTTON: &str = "web_app_setup_back_button";
pub const WEB_APP_SETUP_MAIN_BUTTON: &str = "web_app_setup_main_button";
pub const WEB_APP_SETUP_CLOSING_BEHAVIOR: &str = "web_app_setup_closing_behavior";
pub const WEB_APP_SET_BACKGROUND_COLOR: &str = "web_app_set_background_color";
pub const WEB_APP_SET_HEADER_COLOR: &str = "web_app_set_header_color";
pub const WEB_APP_TRIGGER_HAPTIC_FEEDBACK: &str = "web_app_trigger_haptic_feedback";
pub const WEB_APP_OPEN_SCAN_QR_POPUP: &str = "web_app_open_scan_qr_popup";
pub const WEB_APP_CLOSE_SCAN_QR_POPUP: &str = "web_app_close_scan_qr_popup";
pub const WEB_APP_READ_TEXT_FROM_CLIPBOARD: &str = "web_app_read_text_from_clipboard";

/// Parameter of `web_app_open_link` gated separately from the command.
pub const TRY_INSTANT_VIEW_PARAM: &str = "try_instant_view";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "eventType", content = "eventData", rename_all = "snake_case")]
pub enum OutgoingCommand {
    /// The page inside a web client's iframe is ready to receive events.
    IframeReady,
    WebAppClose,
    WebAppDataSend(DataSendParams),
    WebAppExpand,
    WebAppOpenLink(OpenLinkParams),
    WebAppOpenTgLink(OpenTgLinkParams),
    WebAppOpenPopup(PopupParams),
    WebAppOpenInvoice(OpenInvoiceParams),
    /// The page is ready to be shown.
    WebAppReady,
    WebAppRequestTheme,
    WebAppRequestViewport,
    WebAppSetupBackButton(BackButtonParams),
    WebAppSetupMainButton(MainButtonParams),
    WebAppSetupClosingBehavior(ClosingBehaviorParams),
    WebAppSetBackgroundColor(BackgroundColorParams),
    WebAppSetHeaderColor(HeaderColorParams),
    WebAppTriggerHapticFeedback(HapticFeedback),
    WebAppOpenScanQrPopup(ScanQrPopupParams),
    WebAppCloseScanQrPopup,
    WebAppReadTextFromClipboard(ClipboardReadParams),
}

impl OutgoingCommand {
    /// Wire name of the command. This is the key of the capability matrix.
    pub fn name(&self) -> &'static str {
        match self {
            OutgoingCommand::IframeReady => IFRAME_READY,
            OutgoingCommand::WebAppClose => WEB_APP_CLOSE,
            OutgoingCommand::WebAppDataSend(_) => WEB_APP_DATA_SEND,
            OutgoingCommand::WebAppExpand => WEB_APP_EXPAND,
            OutgoingCommand::WebAppOpenLink(_) => WEB_APP_OPEN_LINK,
            OutgoingCommand::WebAppOpenTgLink(_) => WEB_APP_OPEN_TG_LINK,
            OutgoingCommand::WebAppOpenPopup(_) => WEB_APP_OPEN_POPUP,
            OutgoingCommand::WebAppOpenInvoice(_) => WEB_APP_OPEN_INVOICE,
            OutgoingCommand::WebAppReady => WEB_APP_READY,
            OutgoingCommand::WebAppRequestTheme => WEB_APP_REQUEST_THEME,
            OutgoingCommand::WebAppRequestViewport => WEB_APP_REQUEST_VIEWPORT,
            OutgoingCommand::WebAppSetupBackButton(_) => WEB_APP_SETUP_BACK_BUTTON,
            OutgoingCommand::WebAppSetupMainButton(_) => WEB_APP_SETUP_MAIN_BUTTON,
            OutgoingCommand::WebAppSetupClosingBehavior(_) => WEB_APP_SETUP_CLOSING_BEHAVIOR,
            OutgoingCommand::WebAppSetBackgroundColor(_) => WEB_APP_SET_BACKGROUND_COLOR,
            OutgoingCommand::WebAppSetHeaderColor(_) => WEB_APP_SET_HEADER_COLOR,
            OutgoingCommand::WebAppTriggerHapticFeedback(_) => WEB_APP_TRIGGER_HAPTIC_FEEDBACK,
            OutgoingCommand::WebAppOpenScanQrPopup(_) => WEB_APP_OPEN_SCAN_QR_POPUP,
            OutgoingCommand::WebAppCloseScanQrPopup => WEB_APP_CLOSE_SCAN_QR_POPUP,
            OutgoingCommand::WebAppReadTextFromClipboard(_) => WEB_APP_READ_TEXT_FROM_CLIPBOARD,
        }
    }

    /// Parameters present in this command that have their own minimum version.
    pub fn gated_params(&self) -> Vec<&'static str> {
        match self {
            OutgoingCommand::WebAppOpenLink(OpenLinkParams {
                try_instant_view: Some(_),
                ..
            }) => vec![TRY_INSTANT_VIEW_PARAM],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSendParams {
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenLinkParams {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub try_instant_view: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenTgLinkParams {
    /// Path and query of a `https://t.me/...` link.
    pub path_full: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenInvoiceParams {
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackButtonParams {
    pub is_visible: bool,
}

/// Payload of `web_app_setup_main_button`.
///
/// Every field is optional on the wire, but the host replaces its whole
/// record with what it receives, so [`MainButton`](crate::components::MainButton)
/// always fills all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainButtonParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_progress_visible: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingBehaviorParams {
    pub need_confirmation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundColorParams {
    pub color: String,
}

/// Theme colour the header may be painted with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderColorKey {
    #[default]
    BgColor,
    SecondaryBgColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderColorParams {
    pub color_key: HeaderColorKey,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanQrPopupParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardReadParams {
    pub req_id: String,
}
