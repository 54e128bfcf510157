//! Main action button shown at the bottom of the host's view.
//!
//! `web_app_setup_main_button` replaces the host's whole button record, it
//! does not patch it. Every mutator therefore merges its change into the last
//! known full state and posts all fields, so a field the caller did not touch
//! is never reset on the host.

use crate::components::ListenerHandle;
use crate::components::supports::Operation;
use crate::components::validation::check_length;
use crate::emitter::{EmitterEvent, EventEmitter};
use crate::error::sdk::SdkError;
use crate::protocol::incoming::MAIN_BUTTON_PRESSED;
use crate::protocol::outgoing::{MainButtonParams, OutgoingCommand, WEB_APP_SETUP_MAIN_BUTTON};
use crate::scoped::BridgeScoped;

use common::{RgbColor, to_rgb};

use log::debug;

const TEXT_LENGTH: std::ops::RangeInclusive<usize> = 1..=64;

/// Full mirrored state of the button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainButtonState {
    pub is_visible: bool,
    pub is_active: bool,
    pub is_progress_visible: bool,
    pub text: String,
    pub color: RgbColor,
    pub text_color: RgbColor,
}

impl MainButtonState {
    fn to_params(&self) -> MainButtonParams {
        MainButtonParams {
            is_visible: Some(self.is_visible),
            is_active: Some(self.is_active),
            is_progress_visible: Some(self.is_progress_visible),
            text: Some(self.text.clone()),
            color: Some(self.color.to_string()),
            text_color: Some(self.text_color.to_string()),
        }
    }
}

/// Partial change applied by [`MainButton::set_params`]. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainButtonUpdate {
    pub is_visible: Option<bool>,
    pub is_active: Option<bool>,
    pub is_progress_visible: Option<bool>,
    pub text: Option<String>,
    pub color: Option<String>,
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainButtonEvent {
    VisibleChanged(bool),
    ActiveChanged(bool),
    ProgressVisibleChanged(bool),
    TextChanged(String),
    ColorChanged(RgbColor),
    TextColorChanged(RgbColor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainButtonEventKind {
    VisibleChanged,
    ActiveChanged,
    ProgressVisibleChanged,
    TextChanged,
    ColorChanged,
    TextColorChanged,
}

impl EmitterEvent for MainButtonEvent {
    type Kind = MainButtonEventKind;

    fn kind(&self) -> Self::Kind {
        match self {
            MainButtonEvent::VisibleChanged(_) => MainButtonEventKind::VisibleChanged,
            MainButtonEvent::ActiveChanged(_) => MainButtonEventKind::ActiveChanged,
            MainButtonEvent::ProgressVisibleChanged(_) => {
                MainButtonEventKind::ProgressVisibleChanged
            }
            MainButtonEvent::TextChanged(_) => MainButtonEventKind::TextChanged,
            MainButtonEvent::ColorChanged(_) => MainButtonEventKind::ColorChanged,
            MainButtonEvent::TextColorChanged(_) => MainButtonEventKind::TextColorChanged,
        }
    }
}

/// Every mutator posts the same full-state command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainButtonOperation {
    Show,
    Hide,
    Enable,
    Disable,
    ShowProgress,
    HideProgress,
    SetParams,
}

impl Operation for MainButtonOperation {
    fn methods(self) -> &'static [&'static str] {
        &[WEB_APP_SETUP_MAIN_BUTTON]
    }
}

pub struct MainButton {
    bridge: BridgeScoped,
    emitter: EventEmitter<MainButtonEvent>,
    state: MainButtonState,
}

impl MainButton {
    /// Create a hidden, active button with empty text.
    pub fn new(bridge: BridgeScoped, color: RgbColor, text_color: RgbColor) -> Self {
        Self {
            bridge,
            emitter: EventEmitter::new(),
            state: MainButtonState {
                is_visible: false,
                is_active: true,
                is_progress_visible: false,
                text: String::new(),
                color,
                text_color,
            },
        }
    }

    pub fn state(&self) -> &MainButtonState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.is_visible
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn is_progress_visible(&self) -> bool {
        self.state.is_progress_visible
    }

    pub fn text(&self) -> &str {
        &self.state.text
    }

    pub fn color(&self) -> &RgbColor {
        &self.state.color
    }

    pub fn text_color(&self) -> &RgbColor {
        &self.state.text_color
    }

    #[track_caller]
    pub fn show(&mut self) -> Result<(), SdkError> {
        self.set_params(MainButtonUpdate {
            is_visible: Some(true),
            ..Default::default()
        })
    }

    #[track_caller]
    pub fn hide(&mut self) -> Result<(), SdkError> {
        self.set_params(MainButtonUpdate {
            is_visible: Some(false),
            ..Default::default()
        })
    }

    #[track_caller]
    pub fn enable(&mut self) -> Result<(), SdkError> {
        self.set_params(MainButtonUpdate {
            is_active: Some(true),
            ..Default::default()
        })
    }

    #[track_caller]
    pub fn disable(&mut self) -> Result<(), SdkError> {
        self.set_params(MainButtonUpdate {
            is_active: Some(false),
            ..Default::default()
        })
    }

    #[track_caller]
    pub fn show_progress(&mut self) -> Result<(), SdkError> {
        self.set_params(MainButtonUpdate {
            is_progress_visible: Some(true),
            ..Default::default()
        })
    }

    #[track_caller]
    pub fn hide_progress(&mut self) -> Result<(), SdkError> {
        self.set_params(MainButtonUpdate {
            is_progress_visible: Some(false),
            ..Default::default()
        })
    }

    /// Set the label. Surrounding whitespace is trimmed; 1-64 characters remain.
    #[track_caller]
    pub fn set_text(&mut self, text: &str) -> Result<(), SdkError> {
        self.set_params(MainButtonUpdate {
            text: Some(text.to_string()),
            ..Default::default()
        })
    }

    /// Set the background colour from any format accepted by [`to_rgb`].
    #[track_caller]
    pub fn set_color(&mut self, color: &str) -> Result<(), SdkError> {
        self.set_params(MainButtonUpdate {
            color: Some(color.to_string()),
            ..Default::default()
        })
    }

    #[track_caller]
    pub fn set_text_color(&mut self, color: &str) -> Result<(), SdkError> {
        self.set_params(MainButtonUpdate {
            text_color: Some(color.to_string()),
            ..Default::default()
        })
    }

    /// Merge `update` into the current state and push the full state.
    ///
    /// Validation happens before anything is posted; on any error the mirror
    /// is left untouched.
    #[track_caller]
    pub fn set_params(&mut self, update: MainButtonUpdate) -> Result<(), SdkError> {
        let next = self.merge(update)?;

        self.bridge
            .send(&OutgoingCommand::WebAppSetupMainButton(next.to_params()))?;

        let previous = std::mem::replace(&mut self.state, next);
        for event in diff(&previous, &self.state) {
            debug!("Main button changed: {:?}", event);
            self.emitter.emit(&event);
        }
        Ok(())
    }

    #[track_caller]
    fn merge(&self, update: MainButtonUpdate) -> Result<MainButtonState, SdkError> {
        let mut next = self.state.clone();

        if let Some(is_visible) = update.is_visible {
            next.is_visible = is_visible;
        }
        if let Some(is_active) = update.is_active {
            next.is_active = is_active;
        }
        if let Some(is_progress_visible) = update.is_progress_visible {
            next.is_progress_visible = is_progress_visible;
        }
        if let Some(text) = update.text {
            let text = text.trim();
            check_length("Main button text", text, TEXT_LENGTH)?;
            next.text = text.to_string();
        }
        if let Some(color) = update.color {
            next.color = to_rgb(&color)?;
        }
        if let Some(text_color) = update.text_color {
            next.text_color = to_rgb(&text_color)?;
        }

        Ok(next)
    }

    pub fn on_click<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        ListenerHandle::Host(self.bridge.subscribe(MAIN_BUTTON_PRESSED, move |_| listener()))
    }

    /// Register for one kind of local state change.
    pub fn on<F>(&self, kind: MainButtonEventKind, listener: F) -> ListenerHandle
    where
        F: Fn(&MainButtonEvent) + Send + Sync + 'static,
    {
        ListenerHandle::Local(self.emitter.on(kind, listener))
    }

    pub fn off(&self, handle: ListenerHandle) -> bool {
        match handle {
            ListenerHandle::Host(id) => self.bridge.unsubscribe(id),
            ListenerHandle::Local(id) => self.emitter.off(id),
        }
    }

    pub fn supports(&self, operation: MainButtonOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}

fn diff(previous: &MainButtonState, next: &MainButtonState) -> Vec<MainButtonEvent> {
    let mut events = Vec::new();

    if previous.is_visible != next.is_visible {
        events.push(MainButtonEvent::VisibleChanged(next.is_visible));
    }
    if previous.is_active != next.is_active {
        events.push(MainButtonEvent::ActiveChanged(next.is_active));
    }
    if previous.is_progress_visible != next.is_progress_visible {
        events.push(MainButtonEvent::ProgressVisibleChanged(
            next.is_progress_visible,
        ));
    }
    if previous.text != next.text {
        events.push(MainButtonEvent::TextChanged(next.text.clone()));
    }
    if previous.color != next.color {
        events.push(MainButtonEvent::ColorChanged(next.color.clone()));
    }
    if previous.text_color != next.text_color {
        events.push(MainButtonEvent::TextColorChanged(next.text_color.clone()));
    }

    events
}
