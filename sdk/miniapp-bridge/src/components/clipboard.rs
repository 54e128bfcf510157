//! Clipboard reads.
//!
//! Each read is tagged with a fresh request id; the host echoes it back in
//! `clipboard_text_received`, so several reads may be in flight at once.

use crate::bridge::SubscriptionId;
use crate::components::supports::Operation;
use crate::error::sdk::SdkError;
use crate::protocol::incoming::{CLIPBOARD_TEXT_RECEIVED, IncomingEvent};
use crate::protocol::outgoing::{
    ClipboardReadParams, OutgoingCommand, WEB_APP_READ_TEXT_FROM_CLIPBOARD,
};
use crate::scoped::BridgeScoped;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use serde_json::Value;
use tokio::sync::oneshot;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOperation {
    ReadText,
}

impl Operation for ClipboardOperation {
    fn methods(self) -> &'static [&'static str] {
        &[WEB_APP_READ_TEXT_FROM_CLIPBOARD]
    }
}

type Pending = Mutex<HashMap<String, oneshot::Sender<Option<String>>>>;

fn pending(requests: &Pending) -> MutexGuard<'_, HashMap<String, oneshot::Sender<Option<String>>>> {
    requests.lock().unwrap_or_else(PoisonError::into_inner)
}

fn handle_received(requests: &Pending, data: &Value) {
    let received = match IncomingEvent::decode(CLIPBOARD_TEXT_RECEIVED, data) {
        Ok(Some(IncomingEvent::ClipboardTextReceived(received))) => received,
        Ok(_) => return,
        Err(e) => {
            warn!("Ignoring malformed clipboard_text_received: {}", e);
            return;
        }
    };

    let Some(sender) = pending(requests).remove(&received.req_id) else {
        debug!("No clipboard read waiting for {}", received.req_id);
        return;
    };

    if sender.send(received.data).is_err() {
        debug!("Clipboard receiver for {} was dropped", received.req_id);
    }
}

pub struct Clipboard {
    bridge: BridgeScoped,
    requests: Arc<Pending>,
    subscription: SubscriptionId,
}

impl Clipboard {
    pub fn new(bridge: BridgeScoped) -> Self {
        let requests: Arc<Pending> = Arc::default();
        let handler = Arc::clone(&requests);
        let subscription = bridge.subscribe(CLIPBOARD_TEXT_RECEIVED, move |data| {
            handle_received(&handler, data)
        });

        Self {
            bridge,
            requests,
            subscription,
        }
    }

    /// Ask the host for the clipboard text.
    ///
    /// The receiver yields `None` when the clipboard is empty or the host
    /// denied access.
    #[track_caller]
    pub fn read_text(&self) -> Result<oneshot::Receiver<Option<String>>, SdkError> {
        let req_id = Uuid::new_v4().to_string();
        let (sender, receiver) = oneshot::channel();

        // Registered first so an immediate reply cannot miss it.
        {
            let mut requests = pending(&self.requests);
            requests.retain(|_, waiting| !waiting.is_closed());
            requests.insert(req_id.clone(), sender);
        }

        let command = OutgoingCommand::WebAppReadTextFromClipboard(ClipboardReadParams {
            req_id: req_id.clone(),
        });
        if let Err(e) = self.bridge.send(&command) {
            pending(&self.requests).remove(&req_id);
            return Err(e);
        }

        debug!("Clipboard read {} requested", req_id);
        Ok(receiver)
    }

    /// Reads still waiting for the host.
    ///
    /// A read whose receiver was dropped stays counted until the host answers
    /// it or the next [`read_text`](Self::read_text) prunes it.
    pub fn pending_count(&self) -> usize {
        pending(&self.requests).len()
    }

    pub fn supports(&self, operation: ClipboardOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}

impl Drop for Clipboard {
    fn drop(&mut self) {
        self.bridge.unsubscribe(self.subscription);
    }
}
