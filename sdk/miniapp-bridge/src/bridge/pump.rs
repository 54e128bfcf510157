use crate::bridge::Bridge;

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc::UnboundedReceiver;

/// Feed raw host messages into `bridge` until the host closes its sender.
///
/// Malformed messages are logged and skipped; one bad message must not stop
/// delivery of the ones after it.
pub async fn run_event_pump(bridge: Arc<Bridge>, mut events: UnboundedReceiver<String>) {
    info!("Host event pump started");

    while let Some(raw) = events.recv().await {
        if let Err(e) = bridge.receive(&raw) {
            warn!("Dropping host message: {}", e);
        }
    }

    info!("Host event pump stopped: host closed its channel");
}
