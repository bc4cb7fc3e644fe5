//! Fan-out of run events to subscribers.

use std::sync::mpsc;
use std::sync::Mutex;

use crate::domain::RunEvent;

/// Delivers each emitted event to every live subscriber.
///
/// Subscribers receive over plain std channels; a dropped receiver silently
/// unsubscribes on the next emit. Emission order is the engine's execution
/// order, and the engine is single-threaded, so every subscriber observes the
/// same sequence.
#[derive(Debug, Default)]
pub struct EventBus {
    senders: Mutex<Vec<mpsc::Sender<RunEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber and return its receiving end.
    pub fn subscribe(&self) -> mpsc::Receiver<RunEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(tx);
        rx
    }

    /// Deliver an event to all subscribers, dropping the dead ones.
    pub fn emit(&self, event: RunEvent) {
        let mut senders = self
            .senders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of live subscribers at the last emit.
    pub fn subscriber_count(&self) -> usize {
        self.senders
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_see_events_in_order() {
        let bus = EventBus::new();
        let rx = bus.subscribe();

        bus.emit(RunEvent::Method { name: "one".into() });
        bus.emit(RunEvent::Method { name: "two".into() });

        let names: Vec<RunEvent> = rx.try_iter().collect();
        assert_eq!(
            names,
            vec![
                RunEvent::Method { name: "one".into() },
                RunEvent::Method { name: "two".into() },
            ]
        );
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let bus = EventBus::new();
        let rx = bus.subscribe();
        drop(rx);

        bus.emit(RunEvent::Method { name: "x".into() });
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn emit_without_subscribers_is_a_no_op() {
        let bus = EventBus::new();
        bus.emit(RunEvent::Error { cause: "x".into() });
    }
}
