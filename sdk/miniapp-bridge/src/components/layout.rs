//! Colours of the host chrome around the page.

use crate::components::ListenerHandle;
use crate::components::supports::Operation;
use crate::emitter::{EmitterEvent, EventEmitter};
use crate::error::sdk::SdkError;
use crate::protocol::outgoing::{
    BackgroundColorParams, HeaderColorKey, HeaderColorParams, OutgoingCommand,
    WEB_APP_SET_BACKGROUND_COLOR, WEB_APP_SET_HEADER_COLOR,
};
use crate::scoped::BridgeScoped;

use common::{RgbColor, to_rgb};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    BackgroundColorChanged(RgbColor),
    HeaderColorChanged(HeaderColorKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutEventKind {
    BackgroundColorChanged,
    HeaderColorChanged,
}

impl EmitterEvent for LayoutEvent {
    type Kind = LayoutEventKind;

    fn kind(&self) -> Self::Kind {
        match self {
            LayoutEvent::BackgroundColorChanged(_) => LayoutEventKind::BackgroundColorChanged,
            LayoutEvent::HeaderColorChanged(_) => LayoutEventKind::HeaderColorChanged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOperation {
    SetBackgroundColor,
    SetHeaderColor,
}

impl Operation for LayoutOperation {
    fn methods(self) -> &'static [&'static str] {
        match self {
            LayoutOperation::SetBackgroundColor => &[WEB_APP_SET_BACKGROUND_COLOR],
            LayoutOperation::SetHeaderColor => &[WEB_APP_SET_HEADER_COLOR],
        }
    }
}

pub struct Layout {
    bridge: BridgeScoped,
    emitter: EventEmitter<LayoutEvent>,
    background_color: RgbColor,
    header_color: HeaderColorKey,
}

impl Layout {
    pub fn new(bridge: BridgeScoped, background_color: RgbColor) -> Self {
        Self {
            bridge,
            emitter: EventEmitter::new(),
            background_color,
            header_color: HeaderColorKey::default(),
        }
    }

    pub fn background_color(&self) -> &RgbColor {
        &self.background_color
    }

    pub fn header_color(&self) -> HeaderColorKey {
        self.header_color
    }

    /// Accepts any format understood by [`to_rgb`]; the host receives `#rrggbb`.
    #[track_caller]
    pub fn set_background_color(&mut self, color: &str) -> Result<(), SdkError> {
        let color = to_rgb(color)?;
        self.bridge
            .send(&OutgoingCommand::WebAppSetBackgroundColor(
                BackgroundColorParams {
                    color: color.to_string(),
                },
            ))?;

        if self.background_color != color {
            self.background_color = color.clone();
            self.emitter.emit(&LayoutEvent::BackgroundColorChanged(color));
        }
        Ok(())
    }

    #[track_caller]
    pub fn set_header_color(&mut self, color_key: HeaderColorKey) -> Result<(), SdkError> {
        self.bridge
            .send(&OutgoingCommand::WebAppSetHeaderColor(HeaderColorParams {
                color_key,
            }))?;

        if self.header_color != color_key {
            self.header_color = color_key;
            self.emitter.emit(&LayoutEvent::HeaderColorChanged(color_key));
        }
        Ok(())
    }

    pub fn on<F>(&self, kind: LayoutEventKind, listener: F) -> ListenerHandle
    where
        F: Fn(&LayoutEvent) + Send + Sync + 'static,
    {
        ListenerHandle::Local(self.emitter.on(kind, listener))
    }

    pub fn off(&self, handle: ListenerHandle) -> bool {
        match handle {
            ListenerHandle::Host(id) => self.bridge.unsubscribe(id),
            ListenerHandle::Local(id) => self.emitter.off(id),
        }
    }

    pub fn supports(&self, operation: LayoutOperation) -> bool {
        operation.is_supported(self.bridge.version())
    }
}
