
use crate::bridge::Bridge;
use crate::channel::{HostChannel, MemoryChannel};
use crate::error::bridge::BridgeError;
use crate::scoped::BridgeScoped;

use common::Version;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak, mpsc};
use std::thread;
use std::time::Duration;

use serde_json::{Value, json};

/// Scoped transport over a recording channel.
pub(crate) fn recording_bridge(major: u32, minor: u32) -> (Arc<MemoryChannel>, BridgeScoped) {
    let channel = Arc::new(MemoryChannel::new());
    let bridge = Arc::new(Bridge::new(channel.clone()));
    (channel, BridgeScoped::new(bridge, Version::new(major, minor)))
}

/// Host channel that answers selected commands synchronously, from inside
/// `post`, the way an in-page host may.
pub(crate) struct AnsweringChannel {
    bridge: Mutex<Weak<Bridge>>,
    replies: HashMap<&'static str, String>,
}

impl HostChannel for AnsweringChannel {
    fn post(&self, envelope: &str) -> Result<(), BridgeError> {
        let posted: Value = serde_json::from_str(envelope)?;
        let reply = posted["eventType"]
            .as_str()
            .and_then(|method| self.replies.get(method));
        let bridge = self.bridge.lock().unwrap().upgrade();

        if let (Some(reply), Some(bridge)) = (reply, bridge) {
            bridge.receive(reply)?;
        }
        Ok(())
    }
}

/// Scoped transport whose host answers each `(command, event, data)` before `post` returns.
pub(crate) fn answering_bridge(
    major: u32,
    minor: u32,
    replies: &[(&'static str, &str, Value)],
) -> BridgeScoped {
    let channel = Arc::new(AnsweringChannel {
        bridge: Mutex::new(Weak::new()),
        replies: replies
            .iter()
            .map(|(command, event, data)| {
                (*command, json!({"eventType": event, "eventData": data}).to_string())
            })
            .collect(),
    });
    let bridge = Arc::new(Bridge::new(channel.clone()));
    *channel.bridge.lock().unwrap() = Arc::downgrade(&bridge);
    BridgeScoped::new(bridge, Version::new(major, minor))
}

/// Run `f` on its own thread and fail the test if it has not returned within a few seconds.
pub(crate) fn within_deadline<T, F>(f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx.recv_timeout(Duration::from_secs(3))
        .expect("call did not return: lock held while posting?")
}
