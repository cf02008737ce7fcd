//! Event sinks.
//!
//! The ledger calls its sink synchronously, once per successful mutation,
//! after the store write has gone through. Sinks must not block; there is no
//! buffering or delivery guarantee beyond what the sink itself provides.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;

use genevault_core::LedgerEvent;

/// Receives ledger events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &LedgerEvent);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, event: &LedgerEvent) {
        (**self).emit(event)
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &LedgerEvent) {}
}

/// Records events in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LedgerEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all recorded events.
    pub fn take(&self) -> Vec<LedgerEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: &LedgerEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Fans events out to async subscribers over a tokio broadcast channel.
///
/// Slow subscribers lag and lose the oldest events; the ledger never waits.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<LedgerEvent>,
}

impl BroadcastSink {
    /// Create a sink whose channel holds up to `capacity` undelivered events.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to events emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, event: &LedgerEvent) {
        if self.tx.send(event.clone()).is_err() {
            tracing::trace!(event = event.name(), "no event subscribers");
        }
    }
}

/// Logs each event through `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &LedgerEvent) {
        match event {
            LedgerEvent::ReferenceUpdated { owner, reference } => {
                tracing::info!(%owner, %reference, "reference updated");
            }
            LedgerEvent::AccessGranted {
                caller,
                owner,
                reader,
            } => {
                tracing::info!(%caller, %owner, %reader, "access granted");
            }
            LedgerEvent::AccessRevoked {
                caller,
                owner,
                reader,
            } => {
                tracing::info!(%caller, %owner, %reader, "access revoked");
            }
        }
    }
}
