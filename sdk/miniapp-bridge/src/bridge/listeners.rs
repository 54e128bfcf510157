//! Listener arena shared by every component on the page.
//!
//! Listeners are indexed by a handle issued at subscribe time. Removing by
//! handle stays unambiguous when one closure is registered for several events.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

pub(crate) type Listener = Arc<dyn Fn(&Value) + Send + Sync>;

/// Handle returned by [`Bridge::subscribe`](crate::bridge::Bridge::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct ListenerTable {
    next_id: u64,
    by_event: HashMap<String, Vec<(SubscriptionId, Listener)>>,
}

impl ListenerTable {
    pub(crate) fn insert(&mut self, event: &str, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.by_event
            .entry(event.to_string())
            .or_default()
            .push((id, listener));
        id
    }

    /// Remove a listener. Returns false when the handle is unknown or already removed.
    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let mut emptied = None;
        let mut removed = false;

        for (event, listeners) in self.by_event.iter_mut() {
            if let Some(index) = listeners.iter().position(|(entry, _)| *entry == id) {
                listeners.remove(index);
                removed = true;
                if listeners.is_empty() {
                    emptied = Some(event.clone());
                }
                break;
            }
        }

        if let Some(event) = emptied {
            self.by_event.remove(&event);
        }
        removed
    }

    pub(crate) fn contains(&self, event: &str, id: SubscriptionId) -> bool {
        self.by_event
            .get(event)
            .is_some_and(|listeners| listeners.iter().any(|(entry, _)| *entry == id))
    }

    /// Listeners for `event` in registration order.
    pub(crate) fn snapshot(&self, event: &str) -> Vec<(SubscriptionId, Listener)> {
        self.by_event.get(event).cloned().unwrap_or_default()
    }

    pub(crate) fn count(&self, event: &str) -> usize {
        self.by_event.get(event).map_or(0, Vec::len)
    }

    pub(crate) fn clear(&mut self) {
        self.by_event.clear();
    }
}
