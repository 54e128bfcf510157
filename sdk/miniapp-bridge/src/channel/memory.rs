use crate::channel::HostChannel;
use crate::error::bridge::BridgeError;

use common::ErrorLocation;

use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

/// Host channel that records every envelope it is given.
///
/// Intended for tests and for headless runs where nothing consumes commands.
#[derive(Debug, Default)]
pub struct MemoryChannel {
    posted: Mutex<Vec<String>>,
    disconnected: AtomicBool,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Envelopes posted so far, oldest first.
    pub fn posted(&self) -> Vec<String> {
        self.posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Posted envelopes parsed back into JSON. Unparseable entries are skipped.
    pub fn posted_json(&self) -> Vec<Value> {
        self.posted()
            .iter()
            .filter_map(|envelope| serde_json::from_str(envelope).ok())
            .collect()
    }

    /// Number of envelopes posted with the given `eventType`.
    pub fn count_of(&self, method: &str) -> usize {
        self.posted_json()
            .iter()
            .filter(|envelope| envelope["eventType"] == method)
            .count()
    }

    pub fn clear(&self) {
        self.posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Make every later `post` fail as if the host were unreachable.
    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }
}

impl HostChannel for MemoryChannel {
    #[track_caller]
    fn post(&self, envelope: &str) -> Result<(), BridgeError> {
        if self.disconnected.load(Ordering::SeqCst) {
            return Err(BridgeError::ChannelUnavailable {
                message: String::from("memory channel is disconnected"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.posted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(envelope.to_string());
        Ok(())
    }
}
