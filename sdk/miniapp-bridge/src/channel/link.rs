//! In-process page ↔ host link over unbounded tokio channels.
//!
//! Unbounded senders never block and never wait on the receiver, which is the
//! fire-and-forget contract the bridge expects. A dropped receiver is the
//! in-process equivalent of "no host channel reachable".

use crate::channel::HostChannel;
use crate::error::bridge::BridgeError;

use common::ErrorLocation;

use std::panic::Location;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Page side of the link.
#[derive(Debug)]
pub struct ClientEnd {
    /// Channel to hand to [`Bridge::new`](crate::bridge::Bridge::new).
    pub channel: LinkChannel,

    /// Raw host messages, to be fed to
    /// [`run_event_pump`](crate::bridge::run_event_pump).
    pub events: UnboundedReceiver<String>,
}

/// Host side of the link.
#[derive(Debug)]
pub struct HostEnd {
    /// Envelopes posted by the page.
    pub commands: UnboundedReceiver<String>,

    /// Raw messages to deliver to the page.
    pub events: UnboundedSender<String>,
}

/// [`HostChannel`] writing into the host's command receiver.
#[derive(Debug, Clone)]
pub struct LinkChannel {
    commands: UnboundedSender<String>,
}

impl HostChannel for LinkChannel {
    #[track_caller]
    fn post(&self, envelope: &str) -> Result<(), BridgeError> {
        self.commands
            .send(envelope.to_string())
            .map_err(|_| BridgeError::ChannelUnavailable {
                message: String::from("host end of the link has been dropped"),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// Create a connected pair of page and host ends.
pub fn host_link() -> (ClientEnd, HostEnd) {
    let (command_tx, command_rx) = unbounded_channel();
    let (event_tx, event_rx) = unbounded_channel();

    (
        ClientEnd {
            channel: LinkChannel {
                commands: command_tx,
            },
            events: event_rx,
        },
        HostEnd {
            commands: command_rx,
            events: event_tx,
        },
    )
}
