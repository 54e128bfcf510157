//! Version-scoped transport.
//!
//! [`BridgeScoped`] pairs the shared [`Bridge`] with the session's negotiated
//! [`Version`] and refuses, before anything is posted, every command the
//! capability matrix knows the host cannot accept. Incoming events are never
//! gated: the host sends what it sends regardless of our version.

use crate::bridge::{Bridge, SubscriptionId};
use crate::capability;
use crate::error::sdk::SdkError;
use crate::protocol::outgoing::OutgoingCommand;

use common::{ErrorLocation, Version};

use std::panic::Location;
use std::sync::Arc;

use log::warn;
use serde_json::Value;

#[derive(Clone)]
pub struct BridgeScoped {
    bridge: Arc<Bridge>,
    version: Version,
    check_compat: bool,
}

impl BridgeScoped {
    pub fn new(bridge: Arc<Bridge>, version: Version) -> Self {
        Self {
            bridge,
            version,
            check_compat: true,
        }
    }

    /// Disable the capability check and leave rejection to the host.
    pub fn with_compat_check(mut self, check_compat: bool) -> Self {
        self.check_compat = check_compat;
        self
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn bridge(&self) -> &Arc<Bridge> {
        &self.bridge
    }

    /// True when the capability matrix allows `method` at this version.
    ///
    /// Answers from the matrix even when the check is disabled for sending.
    pub fn supports(&self, method: &str) -> bool {
        capability::is_supported(method, self.version)
    }

    /// Check `command` against the capability matrix and post it.
    ///
    /// # Errors
    ///
    /// - [`SdkError::MethodUnsupported`] if the command needs a newer version
    /// - [`SdkError::ParameterUnsupported`] if a supplied parameter does
    /// - [`SdkError::Bridge`] for local transport failures
    ///
    /// Nothing is posted when a capability error is returned.
    #[track_caller]
    pub fn send(&self, command: &OutgoingCommand) -> Result<(), SdkError> {
        let method = command.name();

        if self.check_compat {
            if !capability::is_supported(method, self.version) {
                warn!("Refusing {} on version {}", method, self.version);
                return Err(SdkError::MethodUnsupported {
                    method,
                    version: self.version,
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            if let Some(param) = command
                .gated_params()
                .into_iter()
                .find(|param| !capability::is_param_supported(method, param, self.version))
            {
                warn!("Refusing {}.{} on version {}", method, param, self.version);
                return Err(SdkError::ParameterUnsupported {
                    method,
                    param,
                    version: self.version,
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        Ok(self.bridge.send(command)?)
    }

    pub fn subscribe<F>(&self, event: &str, listener: F) -> SubscriptionId
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.bridge.subscribe(event, listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bridge.unsubscribe(id)
    }
}
