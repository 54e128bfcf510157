//! Host QR scanner.
//!
//! The first scanned value resolves the pending [`QrScanner::open`] receiver
//! and closes the scanner. If the user dismisses the scanner instead, the
//! receiver resolves to `None`.

use crate::bridge::{Bridge, SubscriptionId};
use crate::components::ListenerHandle;
use crate::components::supports::Operation;
use crate::emitter::{EmitterEvent, EventEmitter};
use crate::error::sdk::SdkError;
use crate::protocol::incoming::{
    IncomingEvent, QR_TEXT_RECEIVED, QrTextReceived, SCAN_QR_POPUP_CLOSED,
};
use crate::protocol::outgoing::{
    OutgoingCommand, ScanQrPopupParams, WEB_APP_CLOSE_SCAN_QR_POPUP, WEB_APP_OPEN_SCAN_QR_POPUP,
};
use crate::scoped::BridgeScoped;

use common::ErrorLocation;

use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use serde_json::Value;
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrScannerEvent {
    OpenChanged(bool),
    /// Text of a scanned code, emitted before the scanner closes.
    Scanned(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrScannerEventKind {
    OpenChanged,
    Scanned,
}

impl EmitterEvent for QrScannerEvent {
    type Kind = QrScannerEventKind;

    fn kind(&self) -> Self::Kind {
        match self {
            QrScannerEvent::OpenChanged(_) => QrScannerEventKind::OpenChanged,
            QrScannerEvent::Scanned(_) => QrScannerEventKind::Scanned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrScannerOperation {
    Open,
    Close,
}

impl Operation for QrScannerOperation {
    fn methods(self) -> &'static [&'static str] {
        match self {
            QrScannerOperation::Open => &[WEB_APP_OPEN_SCAN_QR_POPUP],
            QrScannerOperation::Close => &[WEB_APP_CLOSE_SCAN_QR_POPUP],
        }
    }
}

#[derive(Default)]
struct ScannerState {
    is_opened: bool,
    pending: Option<oneshot::Sender<Option<String>>>,
}

struct ScannerShared {
    bridge: Arc<Bridge>,
    state: Mutex<ScannerState>,
    emitter: EventEmitter<QrScannerEvent>,
}

impl ScannerShared {
    fn state(&self) -> MutexGuard<'_, ScannerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Undo an open whose command was never posted.
    fn abort(&self) {
        let mut state = self.state();
        state.is_opened = false;
        state.pending = None;
    }

    /// Mark closed and resolve any pending receiver with `result`.
    fn finish(&self, result: Option<String>) {
        let (was_opened, pending) = {
            let mut state = self.state();
            let was_opened = state.is_opened;
            state.is_opened = false;
            (was_opened, state.pending.take())
        };

        if let Some(pending) = pending
            && pending.send(result).is_err()
        {
            debug!("QR scanner result receiver was dropped");
        }

        if was_opened {
            self.emitter.emit(&QrScannerEvent::OpenChanged(false));
        }
    }

    fn handle_text(&self, data: &Value) {
        let text = match IncomingEvent::decode(QR_TEXT_RECEIVED, data) {
            Ok(Some(IncomingEvent::QrTextReceived(QrTextReceived { data }))) => data,
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring malformed qr_text_received: {}", e);
                return;
            }
        };

        if !self.state().is_opened {
            debug!("QR text received while scanner is closed");
            return;
        }

        if let Some(text) = &text {
            self.emitter.emit(&QrScannerEvent::Scanned(text.clone()));
        }

        // The capability check already passed when the scanner was opened.
        if let Err(e) = self.bridge.send(&OutgoingCommand::WebAppCloseScanQrPopup) {
            warn!("Failed to close QR scanner after scan: {}", e);
        }
        self.finish(text);
    }
}

pub struct QrScanner {
    bridge: BridgeScoped,
    shared: Arc<ScannerShared>,
    subscriptions: [SubscriptionId; 2],
}

impl QrScanner {
    pub fn new(bridge: BridgeScoped) -> Self {
        let shared = Arc::new(ScannerShared {
            bridge: Arc::clone(bridge.bridge()),
            state: Mutex::new(ScannerState::default()),
            emitter: EventEmitter::new(),
        });

        let on_text = Arc::clone(&shared);
        let on_closed = Arc::clone(&shared);
        let subscriptions = [
            bridge.subscribe(QR_TEXT_RECEIVED, move |data| on_text.handle_text(data)),
            bridge.subscribe(SCAN_QR_POPUP_CLOSED, move |_| on_closed.finish(None)),
        ];

        Self {
            bridge,
            shared,
            subscriptions,
        }
    }

    pub fn is_opened(&self) -> bool {
        self.shared.state().is_opened
    }

    /// Open the scanner with an optional hint text.
    ///
    /// # Errors
    ///
    /// - [`SdkError::AlreadyOpened`] if the scanner is already shown
    /// - [`SdkError::MethodUnsupported`] below version 6.4
    #[track_caller]
    pub fn open(&self, text: Option<&str>) -> Result<oneshot::Receiver<Option<String>>, SdkError> {
        let (sender, receiver) = oneshot::channel();
        {
            let mut state = self.shared.state();
            if state.is_opened {
                return Err(SdkError::AlreadyOpened {
                    component: "QrScanner",
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            state.is_opened = true;
            state.pending = Some(sender);
        }

        // Unlocked: a scan may be reported while the command is being posted.
        let command = OutgoingCommand::WebAppOpenScanQrPopup(ScanQrPopupParams {
            text: text.map(str::to_string),
        });
        if let Err(e) = self.bridge.send(&command) {
            self.shared.abort();
            return Err(e);
        }

        if self.shared.state().is_opened {
            self.shared.emitter.emit(&QrScannerEvent::OpenChanged(true));
        }
        Ok(receiver)
    }

    /// Close the scanner. A pending receiver resolves to `None`.
    #[track_caller]
    pub fn close(&self) -> Result<(), SdkError> {
        self.bridge.send(&OutgoingCommand::WebAppCloseScanQrPopup)?;
        self.shared.finish(None);
        Ok(())
    }

    pub fn on<F>(&self, kind: QrScannerEventKind, listener: F) -> ListenerHandle
    where
        F: Fn(&QrScannerEvent) + Send + Sync + 'static,
    {
        ListenerHandle::Local(self.shared.emitter.on(kind, listener))
    }

    pub fn off(&self, handle: ListenerHandle) -> bool {
        match handle {
            ListenerHandle::Host(id) => self.bridge.unsubscribe(id),
            ListenerHandle::Local(id) => self.shared.emitter.off(id),
        }
    }

    pub fn supports(&self, operation: QrScannerOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}

impl Drop for QrScanner {
    fn drop(&mut self) {
        for id in self.subscriptions {
            self.bridge.unsubscribe(id);
        }
    }
}
