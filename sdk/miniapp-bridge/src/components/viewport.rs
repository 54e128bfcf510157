//! Visible area of the page inside the host.
//!
//! The host owns the viewport. The mirror follows `viewport_changed` and
//! whatever this side last commanded, whichever arrived later.

use crate::bridge::SubscriptionId;
use crate::components::ListenerHandle;
use crate::components::supports::Operation;
use crate::emitter::{EmitterEvent, EventEmitter};
use crate::error::sdk::SdkError;
use crate::protocol::incoming::{IncomingEvent, VIEWPORT_CHANGED, ViewportChanged};
use crate::protocol::outgoing::{OutgoingCommand, WEB_APP_EXPAND, WEB_APP_REQUEST_VIEWPORT};
use crate::scoped::BridgeScoped;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportState {
    pub height: f64,
    pub width: f64,
    /// Height of the last settled viewport; does not follow animations.
    pub stable_height: f64,
    pub is_expanded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    HeightChanged(f64),
    WidthChanged(f64),
    StableHeightChanged(f64),
    ExpansionChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEventKind {
    HeightChanged,
    WidthChanged,
    StableHeightChanged,
    ExpansionChanged,
}

impl EmitterEvent for ViewportEvent {
    type Kind = ViewportEventKind;

    fn kind(&self) -> Self::Kind {
        match self {
            ViewportEvent::HeightChanged(_) => ViewportEventKind::HeightChanged,
            ViewportEvent::WidthChanged(_) => ViewportEventKind::WidthChanged,
            ViewportEvent::StableHeightChanged(_) => ViewportEventKind::StableHeightChanged,
            ViewportEvent::ExpansionChanged(_) => ViewportEventKind::ExpansionChanged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportOperation {
    Expand,
    Request,
}

impl Operation for ViewportOperation {
    fn methods(self) -> &'static [&'static str] {
        match self {
            ViewportOperation::Expand => &[WEB_APP_EXPAND],
            ViewportOperation::Request => &[WEB_APP_REQUEST_VIEWPORT],
        }
    }
}

#[derive(Default)]
struct ViewportShared {
    state: Mutex<ViewportState>,
    emitter: EventEmitter<ViewportEvent>,
}

impl ViewportShared {
    fn state(&self) -> MutexGuard<'_, ViewportState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Swap in `next` and emit one event per changed field.
    fn apply(&self, next: ViewportState) {
        let previous = std::mem::replace(&mut *self.state(), next);

        let mut events = Vec::new();
        if previous.height != next.height {
            events.push(ViewportEvent::HeightChanged(next.height));
        }
        if previous.width != next.width {
            events.push(ViewportEvent::WidthChanged(next.width));
        }
        if previous.stable_height != next.stable_height {
            events.push(ViewportEvent::StableHeightChanged(next.stable_height));
        }
        if previous.is_expanded != next.is_expanded {
            events.push(ViewportEvent::ExpansionChanged(next.is_expanded));
        }

        for event in &events {
            self.emitter.emit(event);
        }
    }

    fn handle_changed(&self, data: &Value) {
        let changed: ViewportChanged = match IncomingEvent::decode(VIEWPORT_CHANGED, data) {
            Ok(Some(IncomingEvent::ViewportChanged(changed))) => changed,
            Ok(_) => return,
            Err(e) => {
                warn!("Ignoring malformed viewport_changed: {}", e);
                return;
            }
        };

        debug!("Viewport changed: {:?}", changed);
        let mut next = *self.state();
        next.height = changed.height;
        if let Some(width) = changed.width {
            next.width = width;
        }
        next.is_expanded = changed.is_expanded;
        if changed.is_state_stable {
            next.stable_height = changed.height;
        }
        self.apply(next);
    }
}

pub struct Viewport {
    bridge: BridgeScoped,
    shared: Arc<ViewportShared>,
    subscription: SubscriptionId,
}

impl Viewport {
    pub fn new(bridge: BridgeScoped, initial: ViewportState) -> Self {
        let shared = Arc::new(ViewportShared {
            state: Mutex::new(initial),
            emitter: EventEmitter::new(),
        });
        let handler = Arc::clone(&shared);
        let subscription =
            bridge.subscribe(VIEWPORT_CHANGED, move |data| handler.handle_changed(data));

        Self {
            bridge,
            shared,
            subscription,
        }
    }

    pub fn state(&self) -> ViewportState {
        *self.shared.state()
    }

    pub fn height(&self) -> f64 {
        self.shared.state().height
    }

    pub fn width(&self) -> f64 {
        self.shared.state().width
    }

    pub fn stable_height(&self) -> f64 {
        self.shared.state().stable_height
    }

    pub fn is_expanded(&self) -> bool {
        self.shared.state().is_expanded
    }

    /// Ask the host to expand to its maximum height.
    ///
    /// The mirror is marked expanded right away; a later `viewport_changed`
    /// overrides it.
    #[track_caller]
    pub fn expand(&self) -> Result<(), SdkError> {
        self.bridge.send(&OutgoingCommand::WebAppExpand)?;

        let mut next = *self.shared.state();
        next.is_expanded = true;
        self.shared.apply(next);
        Ok(())
    }

    /// Ask the host to report its current viewport.
    #[track_caller]
    pub fn request(&self) -> Result<(), SdkError> {
        self.bridge.send(&OutgoingCommand::WebAppRequestViewport)
    }

    pub fn on<F>(&self, kind: ViewportEventKind, listener: F) -> ListenerHandle
    where
        F: Fn(&ViewportEvent) + Send + Sync + 'static,
    {
        ListenerHandle::Local(self.shared.emitter.on(kind, listener))
    }

    pub fn off(&self, handle: ListenerHandle) -> bool {
        match handle {
            ListenerHandle::Host(id) => self.bridge.unsubscribe(id),
            ListenerHandle::Local(id) => self.shared.emitter.off(id),
        }
    }

    pub fn supports(&self, operation: ViewportOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}

impl Drop for Viewport {
    fn drop(&mut self) {
        self.bridge.unsubscribe(self.subscription);
    }
}
