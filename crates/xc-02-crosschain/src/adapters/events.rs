//! Event Publisher Adapters

use crate::events::CrossChainEvent;
use crate::ports::outbound::EventPublisher;
use parking_lot::Mutex;
use tracing::debug;

/// Keeps every published event in memory.
#[derive(Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<CrossChainEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CrossChainEvent> {
        self.events.lock().clone()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<CrossChainEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventPublisher for RecordingEventPublisher {
    fn publish(&self, event: CrossChainEvent) {
        self.events.lock().push(event);
    }
}

/// Writes events to the `tracing` log. Default sink of the service.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventPublisher;

impl EventPublisher for TracingEventPublisher {
    fn publish(&self, event: CrossChainEvent) {
        debug!("[xc-02] event {:?}", event);
    }
}
