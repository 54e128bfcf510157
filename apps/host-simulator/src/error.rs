use miniapp_bridge::CoreError;
use miniapp_bridge::error::SdkError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;

/// Errors raised while running a simulated session.
///
/// Library errors are flattened into a message; the conversions record the
/// location of the `?` that observed them.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// Error from this App
    #[error("Simulator Error: {message} {location}")]
    Simulator {
        message: String,
        location: ErrorLocation,
    },

    /// Error from the bridge library (init, unsupported calls, validation)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// The fake host received something it could not interpret
    #[error("Host Error: {message} {location}")]
    Host {
        message: String,
        location: ErrorLocation,
    },

    /// The host did not answer in time
    #[error("Timeout Error: {message} {location}")]
    Timeout {
        message: String,
        location: ErrorLocation,
    },
}

impl From<SdkError> for SimulatorError {
    #[track_caller]
    fn from(e: SdkError) -> Self {
        SimulatorError::Core {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for SimulatorError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        SimulatorError::Core {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<RecvError> for SimulatorError {
    #[track_caller]
    fn from(e: RecvError) -> Self {
        SimulatorError::Simulator {
            message: format!("Result sender dropped: {e}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
