//! Change propagation between views sharing one durable medium.
//!
//! The signal only says "something changed"; receivers re-read the whole
//! collection instead of applying partial updates.

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::models::meeting::MeetingId;
use crate::services::database::DurableMedium;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
    /// Writes held back by a failed save reached the medium.
    Flushed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub kind: ChangeKind,
    /// `None` for `Flushed`, which may cover several meetings.
    pub id: Option<MeetingId>,
}

impl StoreChange {
    pub fn added(id: MeetingId) -> Self {
        Self { kind: ChangeKind::Added, id: Some(id) }
    }

    pub fn updated(id: MeetingId) -> Self {
        Self { kind: ChangeKind::Updated, id: Some(id) }
    }

    pub fn deleted(id: MeetingId) -> Self {
        Self { kind: ChangeKind::Deleted, id: Some(id) }
    }

    pub fn flushed() -> Self {
        Self { kind: ChangeKind::Flushed, id: None }
    }
}

/// Best-effort broadcast of store mutations.
#[derive(Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<StoreChange>,
}

impl ChangeBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, change: StoreChange) {
        // No receivers just means no other view is open.
        if self.sender.send(change).is_err() {
            log::trace!("No subscribers for store change");
        }
    }

    pub fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

/// One observer's end of the change bus.
pub struct ChangeSubscription {
    receiver: broadcast::Receiver<StoreChange>,
}

impl ChangeSubscription {
    /// Consume every pending signal; true when at least one arrived.
    ///
    /// A lagged receiver has missed signals, which still means the store changed.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(_) => changed = true,
                Err(TryRecvError::Lagged(skipped)) => {
                    log::debug!("Change subscriber lagged by {} signals", skipped);
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        changed
    }

    /// Wait for the next signal. `None` once every sender is gone.
    pub async fn changed(&mut self) -> Option<StoreChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::debug!("Change subscriber lagged by {} signals", skipped);
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

/// A durable medium together with the bus every store on it publishes to.
///
/// Cloning shares both, so every store and view opened from clones of one
/// `SharedMedium` observes the others' writes.
#[derive(Clone)]
pub struct SharedMedium {
    medium: Arc<dyn DurableMedium>,
    bus: ChangeBus,
}

impl SharedMedium {
    pub fn new(medium: Arc<dyn DurableMedium>) -> Self {
        Self {
            medium,
            bus: ChangeBus::new(),
        }
    }

    pub fn medium(&self) -> &dyn DurableMedium {
        self.medium.as_ref()
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_reports_pending_signals_once() {
        let bus = ChangeBus::new();
        let mut sub = bus.subscribe();

        assert!(!sub.drain());
        bus.publish(StoreChange::added(MeetingId::new("a")));
        bus.publish(StoreChange::deleted(MeetingId::new("a")));

        assert!(sub.drain());
        assert!(!sub.drain());
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let bus = ChangeBus::new();
        bus.publish(StoreChange::updated(MeetingId::new("a")));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn lagged_subscriber_still_sees_a_change() {
        let bus = ChangeBus::new();
        let mut sub = bus.subscribe();
        for i in 0..(CHANNEL_CAPACITY + 10) {
            bus.publish(StoreChange::added(MeetingId::new(format!("m{}", i))));
        }
        assert!(sub.drain());
    }

    #[tokio::test]
    async fn changed_waits_for_next_signal() {
        let bus = ChangeBus::new();
        let mut sub = bus.subscribe();
        bus.publish(StoreChange::updated(MeetingId::new("x")));

        let change = sub.changed().await.unwrap();
        assert_eq!(change.kind, ChangeKind::Updated);
        assert_eq!(change.id, Some(MeetingId::new("x")));
    }
}
