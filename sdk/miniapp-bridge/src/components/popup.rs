//! Native popup with up to three buttons.
//!
//! The host answers an opened popup with `popup_closed`, carrying the id of
//! the pressed button. [`Popup::open`] hands back a receiver for that answer.
//! A host that never answers leaves the receiver pending forever.

use crate::bridge::SubscriptionId;
use crate::components::ListenerHandle;
use crate::components::supports::Operation;
use crate::components::validation::check_length;
use crate::emitter::{EmitterEvent, EventEmitter};
use crate::error::sdk::SdkError;
use crate::protocol::incoming::{IncomingEvent, POPUP_CLOSED};
use crate::protocol::outgoing::{OutgoingCommand, WEB_APP_OPEN_POPUP};
use crate::protocol::popup::{PopupButton, PopupButtonKind, PopupParams};
use crate::scoped::BridgeScoped;

use common::ErrorLocation;

use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use serde_json::Value;
use tokio::sync::oneshot;

const MAX_BUTTONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEvent {
    OpenChanged(bool),
    /// The host closed the popup; carries the pressed button id, if any.
    Closed(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEventKind {
    OpenChanged,
    Closed,
}

impl EmitterEvent for PopupEvent {
    type Kind = PopupEventKind;

    fn kind(&self) -> Self::Kind {
        match self {
            PopupEvent::OpenChanged(_) => PopupEventKind::OpenChanged,
            PopupEvent::Closed(_) => PopupEventKind::Closed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupOperation {
    Open,
}

impl Operation for PopupOperation {
    fn methods(self) -> &'static [&'static str] {
        &[WEB_APP_OPEN_POPUP]
    }
}

#[derive(Default)]
struct PopupState {
    is_opened: bool,
    pending: Option<oneshot::Sender<Option<String>>>,
}

#[derive(Default)]
struct PopupShared {
    state: Mutex<PopupState>,
    emitter: EventEmitter<PopupEvent>,
}

impl PopupShared {
    fn state(&self) -> MutexGuard<'_, PopupState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Undo an open whose command was never posted.
    fn abort(&self) {
        let mut state = self.state();
        state.is_opened = false;
        state.pending = None;
    }

    fn handle_closed(&self, data: &Value) {
        let button_id = match IncomingEvent::decode(POPUP_CLOSED, data) {
            Ok(Some(IncomingEvent::PopupClosed(closed))) => closed.button_id,
            Ok(_) => None,
            Err(e) => {
                warn!("Treating malformed popup_closed as dismissal: {}", e);
                None
            }
        };

        let (was_opened, pending) = {
            let mut state = self.state();
            let was_opened = state.is_opened;
            state.is_opened = false;
            (was_opened, state.pending.take())
        };

        debug!("Popup closed with button {:?}", button_id);
        if let Some(pending) = pending
            && pending.send(button_id.clone()).is_err()
        {
            debug!("Popup result receiver was dropped");
        }

        if was_opened {
            self.emitter.emit(&PopupEvent::OpenChanged(false));
        }
        self.emitter.emit(&PopupEvent::Closed(button_id));
    }
}

pub struct Popup {
    bridge: BridgeScoped,
    shared: Arc<PopupShared>,
    subscription: SubscriptionId,
}

impl Popup {
    pub fn new(bridge: BridgeScoped) -> Self {
        let shared = Arc::new(PopupShared::default());
        let handler = Arc::clone(&shared);
        let subscription = bridge.subscribe(POPUP_CLOSED, move |data| handler.handle_closed(data));

        Self {
            bridge,
            shared,
            subscription,
        }
    }

    pub fn is_opened(&self) -> bool {
        self.shared.state().is_opened
    }

    /// Validate `params`, open the popup and return a receiver for the pressed button id.
    ///
    /// Without buttons the popup gets a single `close` button.
    ///
    /// # Errors
    ///
    /// - [`SdkError::AlreadyOpened`] if a popup is already shown
    /// - [`SdkError::Validation`] if a length or count limit is violated
    /// - [`SdkError::MethodUnsupported`] below version 6.2
    #[track_caller]
    pub fn open(&self, params: PopupParams) -> Result<oneshot::Receiver<Option<String>>, SdkError> {
        let params = prepare(params)?;

        let (sender, receiver) = oneshot::channel();
        {
            let mut state = self.shared.state();
            if state.is_opened {
                return Err(SdkError::AlreadyOpened {
                    component: "Popup",
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            state.is_opened = true;
            state.pending = Some(sender);
        }

        // Unlocked: the host may answer while the command is being posted.
        if let Err(e) = self.bridge.send(&OutgoingCommand::WebAppOpenPopup(params)) {
            self.shared.abort();
            return Err(e);
        }

        if self.shared.state().is_opened {
            self.shared.emitter.emit(&PopupEvent::OpenChanged(true));
        }
        Ok(receiver)
    }

    pub fn on<F>(&self, kind: PopupEventKind, listener: F) -> ListenerHandle
    where
        F: Fn(&PopupEvent) + Send + Sync + 'static,
    {
        ListenerHandle::Local(self.shared.emitter.on(kind, listener))
    }

    pub fn off(&self, handle: ListenerHandle) -> bool {
        match handle {
            ListenerHandle::Host(id) => self.bridge.unsubscribe(id),
            ListenerHandle::Local(id) => self.shared.emitter.off(id),
        }
    }

    pub fn supports(&self, operation: PopupOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}

impl Drop for Popup {
    fn drop(&mut self) {
        self.bridge.unsubscribe(self.subscription);
    }
}

#[track_caller]
fn prepare(mut params: PopupParams) -> Result<PopupParams, SdkError> {
    params.message = params.message.trim().to_string();
    check_length("Popup message", &params.message, 1..=256)?;

    if let Some(title) = &params.title {
        check_length("Popup title", title, 0..=64)?;
    }

    if params.buttons.is_empty() {
        params.buttons.push(PopupButton {
            id: None,
            kind: PopupButtonKind::Close,
        });
    }

    if params.buttons.len() > MAX_BUTTONS {
        return Err(SdkError::Validation {
            message: format!(
                "Popup must have 1-{MAX_BUTTONS} buttons, got {}",
                params.buttons.len()
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    for button in &params.buttons {
        if let Some(id) = &button.id {
            check_length("Popup button id", id, 0..=64)?;
        }
        if let Some(text) = button.kind.text() {
            check_length("Popup button text", text.trim(), 1..=64)?;
        }
    }

    Ok(params)
}
