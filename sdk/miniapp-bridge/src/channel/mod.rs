//! Raw host channels.
//!
//! A channel moves already-serialized envelopes from the page to the host. It
//! never waits for a reply; there is none. The only failure it may report is
//! a local one: the host end is not reachable from this execution context.

mod link;
mod memory;

pub use link::{ClientEnd, HostEnd, LinkChannel, host_link};
pub use memory::MemoryChannel;

use crate::error::bridge::BridgeError;

/// Page → host half of the message channel.
pub trait HostChannel: Send + Sync {
    /// Hand one envelope to the host.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ChannelUnavailable`] when the host end is gone.
    fn post(&self, envelope: &str) -> Result<(), BridgeError>;
}
