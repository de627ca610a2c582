//! The per-frame pool of posted events.
//!
//! Events are never handled at the moment they are posted. They wait in the
//! [`EventPool`] until [`process_events`](crate::systems::events::process_events)
//! runs their handlers, and are removed by the next tick once handled. Events
//! without a handler stay in the pool so the game can look for them itself:
//!
//! ```ignore
//! if world.resource::<EventPool>().contains::<GameExitEvent>() {
//!     return;
//! }
//! ```
//!
//! Threads other than the game loop post through an [`EventSender`]; their
//! events join the pool the next time it drains its channel.
use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::trace;

use crate::events::GameEvent;

/// One event in the pool, with its bookkeeping.
#[derive(Debug, Clone)]
pub struct PooledEvent {
    id: u64,
    event: Arc<dyn GameEvent>,
    handled: bool,
    age: u32,
}

impl PooledEvent {
    /// Sequence number, unique within the pool and increasing in posting order.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn event(&self) -> &dyn GameEvent {
        self.event.as_ref()
    }

    /// Whether at least one handler has processed this event.
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Number of ticks this event has survived unhandled.
    pub fn age(&self) -> u32 {
        self.age
    }
}

/// Thread-safe handle for posting events into an [`EventPool`].
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<Arc<dyn GameEvent>>,
}

impl EventSender {
    /// Queue an event. Returns `false` if the pool no longer exists.
    pub fn post<E: GameEvent>(&self, event: E) -> bool {
        self.tx.send(Arc::new(event)).is_ok()
    }
}

/// Resource holding the events to be processed in the current game loop.
///
/// Read access is through [`events`](Self::events) and friends; entries can
/// only be marked handled by dispatch and removed by housekeeping.
#[derive(Resource, Debug)]
pub struct EventPool {
    entries: Vec<PooledEvent>,
    next_id: u64,
    tx: Sender<Arc<dyn GameEvent>>,
    rx: Receiver<Arc<dyn GameEvent>>,
}

impl Default for EventPool {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPool {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            entries: Vec::new(),
            next_id: 0,
            tx,
            rx,
        }
    }

    /// Add an event to the pool and return its sequence number.
    pub fn post_event<E: GameEvent>(&mut self, event: E) -> u64 {
        self.post_shared(Arc::new(event))
    }

    /// Add an already type-erased event to the pool.
    pub fn post_shared(&mut self, event: Arc<dyn GameEvent>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        trace!("Posting {} as #{}", event.event_name(), id);
        self.entries.push(PooledEvent {
            id,
            event,
            handled: false,
            age: 0,
        });
        id
    }

    /// A handle other threads can use to post into this pool.
    pub fn sender(&self) -> EventSender {
        EventSender {
            tx: self.tx.clone(),
        }
    }

    /// Move events posted through [`EventSender`]s into the pool.
    pub fn drain_incoming(&mut self) -> usize {
        let incoming: Vec<_> = self.rx.try_iter().collect();
        let count = incoming.len();
        for event in incoming {
            self.post_shared(event);
        }
        count
    }

    /// All pooled events, in posting order.
    pub fn events(&self) -> impl Iterator<Item = &dyn GameEvent> {
        self.entries.iter().map(|e| e.event())
    }

    /// All pooled entries, in posting order.
    pub fn iter(&self) -> impl Iterator<Item = &PooledEvent> {
        self.entries.iter()
    }

    /// Pooled events of the concrete type `E`.
    pub fn of_type<E: GameEvent>(&self) -> impl Iterator<Item = &E> {
        self.entries.iter().filter_map(|e| e.event().downcast_ref::<E>())
    }

    pub fn contains<E: GameEvent>(&self) -> bool {
        self.entries.iter().any(|e| e.event().is::<E>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&PooledEvent> {
        self.entries
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Unhandled events, in posting order, as shared handles.
    pub(crate) fn unhandled(&self) -> Vec<(u64, Arc<dyn GameEvent>)> {
        self.entries
            .iter()
            .filter(|e| !e.handled)
            .map(|e| (e.id, e.event.clone()))
            .collect()
    }

    /// Mark the event with this id handled, so the next tick removes it.
    ///
    /// Use it for events the game processes itself instead of through a
    /// handler. Returns `false` if no such event is pooled.
    pub fn mark_handled(&mut self, id: u64) -> bool {
        match self.entries.binary_search_by_key(&id, |e| e.id) {
            Ok(idx) => {
                self.entries[idx].handled = true;
                true
            }
            Err(_) => false,
        }
    }

    /// Mark every unhandled `E` handled and return their ids, in posting order.
    pub fn consume<E: GameEvent>(&mut self) -> Vec<u64> {
        self.entries
            .iter_mut()
            .filter(|e| !e.handled && e.event().is::<E>())
            .map(|e| {
                e.handled = true;
                e.id
            })
            .collect()
    }

    /// Unhandled events of the concrete type `E`, with their ids.
    pub fn unhandled_of<E: GameEvent>(&self) -> impl Iterator<Item = (u64, &E)> {
        self.entries
            .iter()
            .filter(|e| !e.handled)
            .filter_map(|e| e.event().downcast_ref::<E>().map(|ev| (e.id, ev)))
    }

    /// Remove every handled event. Returns how many were removed.
    pub fn clear_handled(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.handled);
        before - self.entries.len()
    }

    /// Age unhandled events by one tick and drop those older than
    /// `max_ticks`. A limit of 0 keeps unhandled events forever.
    pub fn age_unhandled(&mut self, max_ticks: u32) -> usize {
        for entry in self.entries.iter_mut().filter(|e| !e.handled) {
            entry.age = entry.age.saturating_add(1);
        }
        if max_ticks == 0 {
            return 0;
        }
        let before = self.entries.len();
        self.entries.retain(|e| e.handled || e.age <= max_ticks);
        before - self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Jump;
    impl GameEvent for Jump {}

    #[derive(Debug)]
    struct Land(i32);
    impl GameEvent for Land {}

    #[test]
    fn test_post_keeps_order_and_ids() {
        let mut pool = EventPool::new();
        let a = pool.post_event(Jump);
        let b = pool.post_event(Land(3));
        assert!(a < b);
        assert_eq!(pool.len(), 2);
        let names: Vec<_> = pool.events().map(|e| e.event_name()).collect();
        assert_eq!(names, vec!["Jump", "Land"]);
        assert!(pool.contains::<Land>());
        assert_eq!(pool.of_type::<Land>().map(|l| l.0).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_clear_handled_only_removes_handled() {
        let mut pool = EventPool::new();
        let a = pool.post_event(Jump);
        pool.post_event(Jump);
        assert!(pool.mark_handled(a));
        assert!(!pool.mark_handled(99));
        assert_eq!(pool.clear_handled(), 1);
        assert_eq!(pool.len(), 1);
        assert!(!pool.iter().next().unwrap().is_handled());
    }

    #[test]
    fn test_consume_marks_only_unhandled_of_type() {
        let mut pool = EventPool::new();
        let a = pool.post_event(Land(1));
        pool.post_event(Jump);
        let c = pool.post_event(Land(2));
        assert_eq!(pool.unhandled_of::<Land>().map(|(id, _)| id).collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(pool.consume::<Land>(), vec![a, c]);
        assert!(pool.consume::<Land>().is_empty());
        assert_eq!(pool.unhandled_of::<Land>().count(), 0);
        assert_eq!(pool.clear_handled(), 2);
        assert_eq!(pool.len(), 1);
        assert!(pool.contains::<Jump>());
    }

    #[test]
    fn test_age_unhandled_drops_stale() {
        let mut pool = EventPool::new();
        pool.post_event(Jump);
        assert_eq!(pool.age_unhandled(2), 0);
        assert_eq!(pool.age_unhandled(2), 0);
        assert_eq!(pool.iter().next().unwrap().age(), 2);
        assert_eq!(pool.age_unhandled(2), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_zero_limit_keeps_unhandled() {
        let mut pool = EventPool::new();
        pool.post_event(Jump);
        for _ in 0..10 {
            assert_eq!(pool.age_unhandled(0), 0);
        }
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_sender_posts_after_drain() {
        let mut pool = EventPool::new();
        let sender = pool.sender();
        let handle = std::thread::spawn(move || {
            assert!(sender.post(Land(1)));
            assert!(sender.post(Land(2)));
        });
        handle.join().unwrap();
        assert!(pool.is_empty());
        assert_eq!(pool.drain_incoming(), 2);
        assert_eq!(pool.of_type::<Land>().count(), 2);
    }
}
