//! Playback event fan-out
//!
//! Every subscriber owns its own channel and receives each event published
//! after it subscribed. Channels whose receiver has been dropped are pruned
//! on the next publish, and with no subscribers an event is simply dropped.

use crate::types::PlaybackEvent;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
pub(crate) struct EventBus {
    subscribers: Arc<Mutex<Vec<Sender<PlaybackEvent>>>>,
}

impl EventBus {
    pub fn subscribe(&self) -> Receiver<PlaybackEvent> {
        let (tx, rx) = unbounded();
        self.lock().push(tx);
        rx
    }

    pub fn publish(&self, event: PlaybackEvent) {
        self.lock().retain(|tx| tx.send(event.clone()).is_ok());
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sender<PlaybackEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlaybackState;

    fn playing() -> PlaybackEvent {
        PlaybackEvent::StateChanged {
            state: PlaybackState::Playing,
        }
    }

    #[test]
    fn every_subscriber_sees_every_event() {
        let bus = EventBus::default();
        let a = bus.subscribe();
        let b = bus.subscribe();

        bus.publish(playing());

        assert_eq!(a.try_recv().unwrap(), playing());
        assert_eq!(b.try_recv().unwrap(), playing());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let bus = EventBus::default();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(playing());

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn nothing_is_queued_without_subscribers() {
        let bus = EventBus::default();
        for _ in 0..1000 {
            bus.publish(playing());
        }

        let late = bus.subscribe();
        assert!(late.is_empty());
    }
}
