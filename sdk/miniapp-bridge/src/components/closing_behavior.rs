//! Whether the host asks the user to confirm before closing the app.

use crate::components::ListenerHandle;
use crate::components::supports::Operation;
use crate::emitter::{EmitterEvent, EventEmitter};
use crate::error::sdk::SdkError;
use crate::protocol::outgoing::{
    ClosingBehaviorParams, OutgoingCommand, WEB_APP_SETUP_CLOSING_BEHAVIOR,
};
use crate::scoped::BridgeScoped;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosingBehaviorEvent {
    ConfirmationNeededChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosingBehaviorEventKind {
    ConfirmationNeededChanged,
}

impl EmitterEvent for ClosingBehaviorEvent {
    type Kind = ClosingBehaviorEventKind;

    fn kind(&self) -> Self::Kind {
        match self {
            ClosingBehaviorEvent::ConfirmationNeededChanged(_) => {
                ClosingBehaviorEventKind::ConfirmationNeededChanged
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosingBehaviorOperation {
    EnableConfirmation,
    DisableConfirmation,
}

impl Operation for ClosingBehaviorOperation {
    fn methods(self) -> &'static [&'static str] {
        &[WEB_APP_SETUP_CLOSING_BEHAVIOR]
    }
}

pub struct ClosingBehavior {
    bridge: BridgeScoped,
    emitter: EventEmitter<ClosingBehaviorEvent>,
    is_confirmation_needed: bool,
}

impl ClosingBehavior {
    pub fn new(bridge: BridgeScoped) -> Self {
        Self {
            bridge,
            emitter: EventEmitter::new(),
            is_confirmation_needed: false,
        }
    }

    pub fn is_confirmation_needed(&self) -> bool {
        self.is_confirmation_needed
    }

    #[track_caller]
    pub fn enable_confirmation(&mut self) -> Result<(), SdkError> {
        self.set_confirmation_needed(true)
    }

    #[track_caller]
    pub fn disable_confirmation(&mut self) -> Result<(), SdkError> {
        self.set_confirmation_needed(false)
    }

    #[track_caller]
    fn set_confirmation_needed(&mut self, need_confirmation: bool) -> Result<(), SdkError> {
        self.bridge
            .send(&OutgoingCommand::WebAppSetupClosingBehavior(
                ClosingBehaviorParams { need_confirmation },
            ))?;

        if self.is_confirmation_needed != need_confirmation {
            self.is_confirmation_needed = need_confirmation;
            self.emitter
                .emit(&ClosingBehaviorEvent::ConfirmationNeededChanged(
                    need_confirmation,
                ));
        }
        Ok(())
    }

    pub fn on_confirmation_needed_changed<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        ListenerHandle::Local(self.emitter.on(
            ClosingBehaviorEventKind::ConfirmationNeededChanged,
            move |event| match event {
                ClosingBehaviorEvent::ConfirmationNeededChanged(needed) => listener(*needed),
            },
        ))
    }

    pub fn off(&self, handle: ListenerHandle) -> bool {
        match handle {
            ListenerHandle::Host(id) => self.bridge.unsubscribe(id),
            ListenerHandle::Local(id) => self.emitter.off(id),
        }
    }

    pub fn supports(&self, operation: ClosingBehaviorOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}
