pub mod bridge;
pub mod capability;
pub mod channel;
pub mod components;
pub mod config;
pub mod emitter;
pub mod error;
pub mod protocol;
pub mod scoped;

mod sdk;
#[cfg(test)]
mod tests;

pub use bridge::Bridge;
pub use config::{LaunchParams, SdkConfig};
pub use error::CoreError;
pub use scoped::BridgeScoped;
pub use sdk::Sdk;
