use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Local failures of the raw transport.
///
/// None of these mean "the host did not understand": that outcome is invisible
/// to the sender.
#[derive(Debug, ThisError)]
pub enum BridgeError {
    /// No host channel is reachable from this execution context.
    #[error("Channel Unavailable Error: {message} {location}")]
    ChannelUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },

    /// A raw host message is not a `{eventType, eventData}` envelope.
    #[error("Malformed Envelope Error: {message} {location}")]
    MalformedEnvelope {
        message: String,
        location: ErrorLocation,
    },

    /// A known event arrived with a payload of the wrong shape.
    #[error("Event Payload Error: {event}: {message} {location}")]
    EventPayload {
        event: String,
        message: String,
        location: ErrorLocation,
    },
}

impl From<serde_json::Error> for BridgeError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        BridgeError::Serialization {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
