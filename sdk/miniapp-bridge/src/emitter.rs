//! Typed publish/subscribe for component-local events.
//!
//! Each stateful component owns one [`EventEmitter`] over its own event enum.
//! Listeners register for a *kind* of event and receive the full value.

use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Event enums usable with [`EventEmitter`].
pub trait EmitterEvent: Send + Sync + 'static {
    /// Discriminant listeners register for.
    type Kind: Copy + Eq + Debug + Send + Sync + 'static;

    fn kind(&self) -> Self::Kind;
}

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Handle returned by [`EventEmitter::on`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry<E: EmitterEvent> {
    id: ListenerId,
    kind: E::Kind,
    handler: Handler<E>,
}

impl<E: EmitterEvent> Clone for Entry<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            kind: self.kind,
            handler: Arc::clone(&self.handler),
        }
    }
}

struct Table<E: EmitterEvent> {
    next_id: u64,
    entries: Vec<Entry<E>>,
}

pub struct EventEmitter<E: EmitterEvent> {
    table: Mutex<Table<E>>,
}

impl<E: EmitterEvent> EventEmitter<E> {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(Table {
                next_id: 0,
                entries: Vec::new(),
            }),
        }
    }

    pub fn on<F>(&self, kind: E::Kind, handler: F) -> ListenerId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let mut table = self.table();
        let id = ListenerId(table.next_id);
        table.next_id += 1;
        table.entries.push(Entry {
            id,
            kind,
            handler: Arc::new(handler),
        });
        id
    }

    /// Returns false if `id` was never registered or is already removed.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut table = self.table();
        let before = table.entries.len();
        table.entries.retain(|entry| entry.id != id);
        table.entries.len() != before
    }

    /// Call every listener of `event.kind()` in registration order.
    ///
    /// The table is unlocked while handlers run. A handler removed by an
    /// earlier handler in the same pass is skipped.
    pub fn emit(&self, event: &E) -> usize {
        let kind = event.kind();
        let matching: Vec<Entry<E>> = self
            .table()
            .entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .cloned()
            .collect();

        let mut invoked = 0;
        for entry in matching {
            if !self.table().entries.iter().any(|e| e.id == entry.id) {
                continue;
            }
            (entry.handler)(event);
            invoked += 1;
        }
        invoked
    }

    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.table()
            .entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .count()
    }

    fn table(&self) -> MutexGuard<'_, Table<E>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: EmitterEvent> Default for EventEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}
