//! Back button shown in the host's header.
//!
//! Typically used to step back through in-app navigation.

use crate::components::ListenerHandle;
use crate::components::supports::Operation;
use crate::emitter::{EmitterEvent, EventEmitter};
use crate::error::sdk::SdkError;
use crate::protocol::incoming::BACK_BUTTON_PRESSED;
use crate::protocol::outgoing::{BackButtonParams, OutgoingCommand, WEB_APP_SETUP_BACK_BUTTON};
use crate::scoped::BridgeScoped;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackButtonEvent {
    VisibleChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackButtonEventKind {
    VisibleChanged,
}

impl EmitterEvent for BackButtonEvent {
    type Kind = BackButtonEventKind;

    fn kind(&self) -> Self::Kind {
        match self {
            BackButtonEvent::VisibleChanged(_) => BackButtonEventKind::VisibleChanged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackButtonOperation {
    Show,
    Hide,
}

impl Operation for BackButtonOperation {
    fn methods(self) -> &'static [&'static str] {
        match self {
            BackButtonOperation::Show | BackButtonOperation::Hide => &[WEB_APP_SETUP_BACK_BUTTON],
        }
    }
}

pub struct BackButton {
    bridge: BridgeScoped,
    emitter: EventEmitter<BackButtonEvent>,
    is_visible: bool,
}

impl BackButton {
    /// Create a hidden back button.
    pub fn new(bridge: BridgeScoped) -> Self {
        Self {
            bridge,
            emitter: EventEmitter::new(),
            is_visible: false,
        }
    }

    /// Last commanded visibility.
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    #[track_caller]
    pub fn show(&mut self) -> Result<(), SdkError> {
        self.set_visible(true)
    }

    #[track_caller]
    pub fn hide(&mut self) -> Result<(), SdkError> {
        self.set_visible(false)
    }

    #[track_caller]
    fn set_visible(&mut self, visible: bool) -> Result<(), SdkError> {
        self.bridge
            .send(&OutgoingCommand::WebAppSetupBackButton(BackButtonParams {
                is_visible: visible,
            }))?;

        if self.is_visible == visible {
            return Ok(());
        }

        debug!("Back button visibility: {}", visible);
        self.is_visible = visible;
        self.emitter.emit(&BackButtonEvent::VisibleChanged(visible));
        Ok(())
    }

    /// Called every time the user presses the button.
    pub fn on_click<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        ListenerHandle::Host(self.bridge.subscribe(BACK_BUTTON_PRESSED, move |_| listener()))
    }

    pub fn on_visible_changed<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        ListenerHandle::Local(self.emitter.on(
            BackButtonEventKind::VisibleChanged,
            move |event| match event {
                BackButtonEvent::VisibleChanged(visible) => listener(*visible),
            },
        ))
    }

    pub fn off(&self, handle: ListenerHandle) -> bool {
        match handle {
            ListenerHandle::Host(id) => self.bridge.unsubscribe(id),
            ListenerHandle::Local(id) => self.emitter.off(id),
        }
    }

    pub fn supports(&self, operation: BackButtonOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}
