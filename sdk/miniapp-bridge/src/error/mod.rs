pub mod bridge;
pub mod config;
pub mod sdk;

pub use bridge::BridgeError;
pub use config::ConfigError;
pub use sdk::SdkError;

use common::{ColorError, VersionError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Color(#[from] ColorError),
}
