//! Fan-out of wizard events
//!
//! Every subscriber gets its own unbounded channel. A subscriber leaves by
//! dropping its receiver; the next publish prunes the dead sender.

use crossbeam_channel::{unbounded, Receiver, Sender, TrySendError};
use parking_lot::RwLock;
use std::sync::Arc;

use super::events::WizardEvent;

/// Cloneable handle; clones share one subscriber list
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Sender<WizardEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event published from now on
    pub fn subscribe(&self) -> Receiver<WizardEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.write().push(tx);
        rx
    }

    /// Deliver `event` to every live subscriber
    pub fn publish(&self, event: WizardEvent) {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();

        subscribers.retain(|tx| {
            !matches!(
                tx.try_send(event.clone()),
                Err(TrySendError::Disconnected(_))
            )
        });

        let pruned = before - subscribers.len();
        if pruned > 0 {
            tracing::trace!(pruned, "Dropped disconnected event subscribers");
        }
    }

    /// Subscribers still attached as of the last publish
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}
