use crate::error::bridge::BridgeError;

use common::{ColorError, ErrorLocation, Version};

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SdkError {
    /// The command is not accepted by the host at the negotiated version.
    /// Nothing was sent.
    #[error("Method Unsupported Error: {method} is not supported in version {version} {location}")]
    MethodUnsupported {
        method: &'static str,
        version: Version,
        location: ErrorLocation,
    },

    /// The command exists but one of the supplied parameters does not.
    /// Nothing was sent.
    #[error(
        "Parameter Unsupported Error: {method}.{param} is not supported in version {version} {location}"
    )]
    ParameterUnsupported {
        method: &'static str,
        param: &'static str,
        version: Version,
        location: ErrorLocation,
    },

    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Already Opened Error: {component} is already opened {location}")]
    AlreadyOpened {
        component: &'static str,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Color(#[from] ColorError),
}
