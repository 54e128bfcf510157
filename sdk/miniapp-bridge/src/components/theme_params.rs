//! Host theme colours.

use crate::bridge::SubscriptionId;
use crate::components::ListenerHandle;
use crate::components::supports::Operation;
use crate::emitter::{EmitterEvent, EventEmitter};
use crate::error::sdk::SdkError;
use crate::protocol::incoming::{IncomingEvent, THEME_CHANGED, ThemeParamsData};
use crate::protocol::outgoing::{OutgoingCommand, WEB_APP_REQUEST_THEME};
use crate::scoped::BridgeScoped;

use common::{RgbColor, to_rgb};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeParamsEvent {
    Changed(ThemeParamsData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeParamsEventKind {
    Changed,
}

impl EmitterEvent for ThemeParamsEvent {
    type Kind = ThemeParamsEventKind;

    fn kind(&self) -> Self::Kind {
        match self {
            ThemeParamsEvent::Changed(_) => ThemeParamsEventKind::Changed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeParamsOperation {
    Request,
}

impl Operation for ThemeParamsOperation {
    fn methods(self) -> &'static [&'static str] {
        &[WEB_APP_REQUEST_THEME]
    }
}

#[derive(Default)]
struct ThemeShared {
    params: Mutex<ThemeParamsData>,
    emitter: EventEmitter<ThemeParamsEvent>,
}

impl ThemeShared {
    fn params(&self) -> MutexGuard<'_, ThemeParamsData> {
        self.params.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle_changed(&self, data: &Value) {
        let theme = match IncomingEvent::decode(THEME_CHANGED, data) {
            Ok(Some(IncomingEvent::ThemeChanged(changed))) => changed.theme_params,
            Ok(_) => return,
            Err(e) => {
                warn!("Ignoring malformed theme_changed: {}", e);
                return;
            }
        };

        let previous = std::mem::replace(&mut *self.params(), theme.clone());
        if previous != theme {
            debug!("Theme changed");
            self.emitter.emit(&ThemeParamsEvent::Changed(theme));
        }
    }
}

pub struct ThemeParams {
    bridge: BridgeScoped,
    shared: Arc<ThemeShared>,
    subscription: SubscriptionId,
}

impl ThemeParams {
    pub fn new(bridge: BridgeScoped, initial: ThemeParamsData) -> Self {
        let shared = Arc::new(ThemeShared {
            params: Mutex::new(initial),
            emitter: EventEmitter::new(),
        });
        let handler = Arc::clone(&shared);
        let subscription = bridge.subscribe(THEME_CHANGED, move |data| handler.handle_changed(data));

        Self {
            bridge,
            shared,
            subscription,
        }
    }

    /// Snapshot of the colours last reported by the host.
    pub fn params(&self) -> ThemeParamsData {
        self.shared.params().clone()
    }

    pub fn bg_color(&self) -> Option<RgbColor> {
        normalized(self.shared.params().bg_color.as_deref())
    }

    pub fn secondary_bg_color(&self) -> Option<RgbColor> {
        normalized(self.shared.params().secondary_bg_color.as_deref())
    }

    pub fn text_color(&self) -> Option<RgbColor> {
        normalized(self.shared.params().text_color.as_deref())
    }

    pub fn hint_color(&self) -> Option<RgbColor> {
        normalized(self.shared.params().hint_color.as_deref())
    }

    pub fn link_color(&self) -> Option<RgbColor> {
        normalized(self.shared.params().link_color.as_deref())
    }

    pub fn button_color(&self) -> Option<RgbColor> {
        normalized(self.shared.params().button_color.as_deref())
    }

    pub fn button_text_color(&self) -> Option<RgbColor> {
        normalized(self.shared.params().button_text_color.as_deref())
    }

    /// Ask the host to send `theme_changed` with its current theme.
    #[track_caller]
    pub fn request(&self) -> Result<(), SdkError> {
        self.bridge.send(&OutgoingCommand::WebAppRequestTheme)
    }

    pub fn on_changed<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn(&ThemeParamsData) + Send + Sync + 'static,
    {
        ListenerHandle::Local(self.shared.emitter.on(
            ThemeParamsEventKind::Changed,
            move |event| match event {
                ThemeParamsEvent::Changed(theme) => listener(theme),
            },
        ))
    }

    pub fn off(&self, handle: ListenerHandle) -> bool {
        match handle {
            ListenerHandle::Host(id) => self.bridge.unsubscribe(id),
            ListenerHandle::Local(id) => self.shared.emitter.off(id),
        }
    }

    pub fn supports(&self, operation: ThemeParamsOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}

impl Drop for ThemeParams {
    fn drop(&mut self) {
        self.bridge.unsubscribe(self.subscription);
    }
}

// Hosts have sent colours in several notations; unparseable ones read as unset.
fn normalized(value: Option<&str>) -> Option<RgbColor> {
    let value = value?;
    match to_rgb(value) {
        Ok(color) => Some(color),
        Err(e) => {
            debug!("Ignoring theme colour {:?}: {}", value, e);
            None
        }
    }
}
