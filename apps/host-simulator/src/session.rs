//! Scripted page session.
//!
//! Drives every component the way a small Mini App would on startup and
//! collects what the host answered. Operations the negotiated version does
//! not support are skipped and listed in the report.

use crate::error::SimulatorError;

use miniapp_bridge::Sdk;
use miniapp_bridge::components::{
    BackButtonOperation, ClipboardOperation, HapticFeedbackOperation, PopupOperation,
    QrScannerOperation,
};
use miniapp_bridge::protocol::{ImpactStyle, PopupButton, PopupButtonKind, PopupParams};

use common::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use log::{debug, info, warn};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// How long to wait for any single host answer.
pub const ANSWER_TIMEOUT: Duration = Duration::from_secs(5);

pub const POPUP_CONFIRM_ID: &str = "confirm";
pub const POPUP_CANCEL_ID: &str = "cancel";

const MAIN_BUTTON_TEXT: &str = "Continue";
const QR_PROMPT: &str = "Point the camera at a code";

/// Outcome of one scripted session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionReport {
    pub version: String,
    pub platform: String,
    pub back_button_pressed: bool,
    pub popup_button: Option<String>,
    pub qr_text: Option<String>,
    pub clipboard_text: Option<String>,
    pub viewport_height: f64,
    pub is_expanded: bool,
    pub bg_color: Option<String>,
    /// Operations skipped because the host version does not support them.
    pub skipped: Vec<&'static str>,
}

/// Run the script against an initialized session and close it.
///
/// The host must already be answering: every awaited step times out after
/// [`ANSWER_TIMEOUT`].
///
/// # Errors
///
/// Returns [`SimulatorError::Core`] when a component rejects a call, and
/// [`SimulatorError::Timeout`] when the host does not answer.
pub async fn run_session(sdk: &mut Sdk) -> Result<SessionReport, SimulatorError> {
    let mut report = SessionReport {
        version: sdk.version().to_string(),
        platform: sdk.web_app.platform().to_string(),
        ..SessionReport::default()
    };
    info!("Session started: {} on {}", report.version, report.platform);

    sdk.web_app.ready()?;
    sdk.viewport.expand()?;

    // Back button
    if sdk.back_button.supports(BackButtonOperation::Show) {
        let (pressed_tx, mut pressed_rx) = mpsc::unbounded_channel();
        let handle = sdk.back_button.on_click(move || forward_press(&pressed_tx));
        sdk.back_button.show()?;
        report.back_button_pressed = answer("back button press", pressed_rx.recv())
            .await?
            .is_some();
        sdk.back_button.off(handle);
        sdk.back_button.hide()?;
    } else {
        skip(&mut report, "back_button");
    }

    sdk.main_button.set_text(MAIN_BUTTON_TEXT)?;
    sdk.main_button.show()?;

    if sdk.haptics.supports(HapticFeedbackOperation::ImpactOccurred) {
        sdk.haptics.impact_occurred(ImpactStyle::Light)?;
    } else {
        skip(&mut report, "haptic_feedback");
    }

    // Popup
    if sdk.popup.supports(PopupOperation::Open) {
        let params = PopupParams::new("Share your clipboard with the simulator?")
            .with_title("Simulator")
            .with_button(PopupButton::new(
                POPUP_CONFIRM_ID,
                PopupButtonKind::Default {
                    text: String::from("Share"),
                },
            ))
            .with_button(PopupButton::new(POPUP_CANCEL_ID, PopupButtonKind::Cancel));
        let receiver = sdk.popup.open(params)?;
        report.popup_button = answer("popup", receiver).await??;
    } else {
        skip(&mut report, "popup");
    }

    // QR scanner
    if sdk.qr_scanner.supports(QrScannerOperation::Open) {
        let receiver = sdk.qr_scanner.open(Some(QR_PROMPT))?;
        report.qr_text = answer("qr scanner", receiver).await??;
    } else {
        skip(&mut report, "qr_scanner");
    }

    // Clipboard
    if sdk.clipboard.supports(ClipboardOperation::ReadText) {
        let receiver = sdk.clipboard.read_text()?;
        report.clipboard_text = answer("clipboard", receiver).await??;
    } else {
        skip(&mut report, "clipboard");
    }

    sdk.main_button.hide()?;

    report.viewport_height = sdk.viewport.height();
    report.is_expanded = sdk.viewport.is_expanded();
    report.bg_color = sdk.theme_params.bg_color().map(|color| color.to_string());

    sdk.web_app.close()?;
    info!("Session finished");

    Ok(report)
}

/// Hand a back button press to the waiting session step.
pub(crate) fn forward_press(pressed_tx: &mpsc::UnboundedSender<()>) {
    if pressed_tx.send(()).is_err() {
        debug!("Back button pressed after the session stopped waiting");
    }
}

fn skip(report: &mut SessionReport, component: &'static str) {
    warn!(
        "Skipping {}: not supported in version {}",
        component, report.version
    );
    report.skipped.push(component);
}

async fn answer<F: Future>(what: &str, pending: F) -> Result<F::Output, SimulatorError> {
    timeout(ANSWER_TIMEOUT, pending)
        .await
        .map_err(|_| SimulatorError::Timeout {
            message: format!("No {what} answer within {ANSWER_TIMEOUT:?}"),
            location: ErrorLocation::from(Location::caller()),
        })
}
