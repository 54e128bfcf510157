//! Raw transport between the page and its host.
//!
//! [`Bridge`] serializes typed commands into host envelopes and hands them to a
//! [`HostChannel`], and dispatches host messages to listeners registered by
//! event name. It is shared by every component for the page's lifetime.
//!
//! # Delivery
//!
//! - `send` returns as soon as the channel accepted the envelope. There is no
//!   acknowledgment and no timeout.
//! - Listeners for one event run in registration order.
//! - The listener table is not locked while a listener runs, so listeners may
//!   subscribe and unsubscribe freely. A listener removed earlier in the same
//!   delivery pass is skipped.

mod listeners;
mod pump;

pub use listeners::SubscriptionId;
pub use pump::run_event_pump;

use crate::channel::HostChannel;
use crate::error::bridge::BridgeError;
use crate::protocol::RawEvent;
use crate::protocol::outgoing::OutgoingCommand;
use listeners::ListenerTable;

use common::ErrorLocation;

use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{Level, debug, log};
use serde_json::Value;

pub struct Bridge {
    channel: Arc<dyn HostChannel>,
    listeners: Mutex<ListenerTable>,
    debug: bool,
}

impl Bridge {
    pub fn new(channel: Arc<dyn HostChannel>) -> Self {
        Self {
            channel,
            listeners: Mutex::new(ListenerTable::default()),
            debug: false,
        }
    }

    /// Log every envelope at `info` instead of `debug`.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Serialize `command` into the host envelope and post it.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Serialization`] if the envelope cannot be built
    /// - [`BridgeError::ChannelUnavailable`] if the host end is unreachable
    #[track_caller]
    pub fn send(&self, command: &OutgoingCommand) -> Result<(), BridgeError> {
        let envelope = serde_json::to_string(command)?;
        log!(self.level(), "Posting {}: {}", command.name(), envelope);
        self.channel.post(&envelope)
    }

    /// Register `listener` for every host event named `event`.
    pub fn subscribe<F>(&self, event: &str, listener: F) -> SubscriptionId
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        let id = self.table().insert(event, Arc::new(listener));
        debug!("Subscribed {:?} to {}", id, event);
        id
    }

    /// Remove a listener. Removing twice is a no-op returning false.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.table().remove(id);
        if removed {
            debug!("Unsubscribed {:?}", id);
        }
        removed
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.table().count(event)
    }

    /// Release every listener. The bridge has no other teardown.
    pub fn clear_listeners(&self) {
        self.table().clear();
    }

    /// Parse a raw host message and dispatch it.
    ///
    /// Returns the number of listeners invoked.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MalformedEnvelope`] if `raw` is not an envelope.
    #[track_caller]
    pub fn receive(&self, raw: &str) -> Result<usize, BridgeError> {
        let event: RawEvent =
            serde_json::from_str(raw).map_err(|e| BridgeError::MalformedEnvelope {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(self.dispatch(&event.event_type, &event.event_data))
    }

    /// Invoke every listener registered for `event` with `data`.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &str, data: &Value) -> usize {
        log!(self.level(), "Received {}: {}", event, data);

        let listeners = self.table().snapshot(event);
        let mut invoked = 0;
        for (id, listener) in listeners {
            if !self.table().contains(event, id) {
                continue;
            }
            listener(data);
            invoked += 1;
        }
        invoked
    }

    fn table(&self) -> MutexGuard<'_, ListenerTable> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn level(&self) -> Level {
        if self.debug { Level::Info } else { Level::Debug }
    }
}
