//! Registry of event handlers.
//!
//! Maps each concrete [`EventType`] to the handlers bound to it. Two tables
//! are kept:
//! - static handlers, read from the markers in [`Subscription`]s;
//! - dynamic handlers, closures added and removed at runtime.
//!
//! Registration validates before it mutates, so a rejected call leaves the
//! registry exactly as it was.
use bevy_ecs::prelude::Resource;
use log::{debug, info};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::GameError;
use crate::events::EventType;
use crate::events::annotation::{EventSubscriber, HandlerCall, Subscription, subscriptions_of};
use crate::events::handler::{Applicator, DynamicEventHandler, HandlerId};

/// Handler calls collected for one event, cheap to clone out of the registry.
pub type HandlerList = SmallVec<[HandlerCall; 4]>;

/// Resource holding every registered event handler.
#[derive(Resource, Default)]
pub struct EventRegistry {
    static_handlers: FxHashMap<EventType, SmallVec<[Subscription; 4]>>,
    dynamic_handlers: FxHashMap<EventType, SmallVec<[(HandlerId, Applicator); 4]>>,
    next_handler_id: u64,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the marked functions of one or more subscribers.
    ///
    /// Contract
    /// - A marker naming the raw base type fails with
    ///   [`GameError::InvalidUseOfLibrary`].
    /// - A function whose parameter differs from its marker value fails with
    ///   [`GameError::TerminalInvalidEventHandler`].
    /// - On failure nothing is registered.
    /// - A function already registered for the same event (same owner and
    ///   path) is not added twice.
    ///
    /// Returns the number of handlers added.
    pub fn register_static_event_handlers(
        &mut self,
        subscriptions: impl IntoIterator<Item = Subscription>,
    ) -> Result<usize, GameError> {
        let subscriptions: Vec<Subscription> = subscriptions.into_iter().collect();

        if let Some(raw) = subscriptions.iter().find(|s| s.event().is_base()) {
            return Err(GameError::InvalidUseOfLibrary(format!(
                "Cannot create an event handler using a raw GameEvent ({} on {}). Try changing the handler to take a specific event",
                raw.marker().marker_name(),
                raw.full_name()
            )));
        }

        if let Some(bad) = subscriptions
            .iter()
            .find(|s| s.handler().param() != s.event())
        {
            return Err(GameError::TerminalInvalidEventHandler(format!(
                "Event handler must be a function that takes exactly 1 argument of the type named by its {} marker. {} is required to take the type {} as the only argument, but it takes {}",
                bad.marker().marker_name(),
                bad.full_name(),
                bad.event(),
                bad.handler().param()
            )));
        }

        let mut added = 0;
        for subscription in subscriptions {
            let list = self.static_handlers.entry(subscription.event()).or_default();
            let duplicate = list.iter().any(|s| s.same_handler(&subscription));
            if duplicate {
                debug!(
                    "Skipping duplicate handler {} for {}",
                    subscription.full_name(),
                    subscription.event()
                );
                continue;
            }
            debug!(
                "Registered {} for {}",
                subscription.full_name(),
                subscription.event()
            );
            list.push(subscription);
            added += 1;
        }
        info!("Registered {} static event handler(s)", added);
        Ok(added)
    }

    /// Register the marked functions of a single subscriber type.
    pub fn register_subscriber<S: EventSubscriber>(&mut self) -> Result<usize, GameError> {
        self.register_static_event_handlers(subscriptions_of::<S>())
    }

    /// Register a handler at runtime.
    ///
    /// Fails with [`GameError::InvalidEventHandler`] if the handler is bound to
    /// the raw base type; the registry is left unchanged and the game may go on.
    pub fn register_event_handler(
        &mut self,
        handler: DynamicEventHandler,
    ) -> Result<HandlerId, GameError> {
        if handler.event().is_base() {
            return Err(GameError::InvalidEventHandler(
                "Event handler must not take raw GameEvent object, try passing in a more specific event, or create one yourself and pass that.".to_string(),
            ));
        }
        let id = HandlerId(self.next_handler_id);
        self.next_handler_id += 1;
        debug!("Registered dynamic handler {:?} for {}", id, handler.event());
        self.dynamic_handlers
            .entry(handler.event())
            .or_default()
            .push((id, handler.handler().clone()));
        Ok(id)
    }

    /// Remove a dynamic handler. Returns `false` if it was not registered.
    pub fn unregister_event_handler(&mut self, id: HandlerId) -> bool {
        let mut removed = false;
        for list in self.dynamic_handlers.values_mut() {
            if let Some(pos) = list.iter().position(|(h, _)| *h == id) {
                list.remove(pos);
                removed = true;
                break;
            }
        }
        self.dynamic_handlers.retain(|_, list| !list.is_empty());
        removed
    }

    pub fn static_handler_count(&self, event: EventType) -> usize {
        self.static_handlers.get(&event).map_or(0, |l| l.len())
    }

    pub fn dynamic_handler_count(&self, event: EventType) -> usize {
        self.dynamic_handlers.get(&event).map_or(0, |l| l.len())
    }

    pub fn has_handlers(&self, event: EventType) -> bool {
        self.static_handler_count(event) > 0 || self.dynamic_handler_count(event) > 0
    }

    /// The static subscriptions for an event, in registration order.
    pub fn static_subscriptions(&self, event: EventType) -> &[Subscription] {
        self.static_handlers
            .get(&event)
            .map(|l| l.as_slice())
            .unwrap_or(&[])
    }

    /// Static handler calls for an event, in registration order.
    pub fn static_handlers_for(&self, event: EventType) -> HandlerList {
        self.static_subscriptions(event)
            .iter()
            .map(|s| s.handler().call().clone())
            .collect()
    }

    /// Dynamic handler calls for an event, in registration order.
    pub fn dynamic_handlers_for(&self, event: EventType) -> HandlerList {
        self.dynamic_handlers
            .get(&event)
            .map(|l| l.iter().map(|(_, h)| h.clone()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::GameEvent;
    use crate::events::annotation::{EventHandler, HandlerFn, SubscribeEvent};
    use bevy_ecs::prelude::World;

    #[derive(Debug)]
    struct Tap;
    impl GameEvent for Tap {}

    #[derive(Debug)]
    struct Hold;
    impl GameEvent for Hold {}

    fn on_tap(_e: &Tap, _w: &mut World) {}
    fn on_hold(_e: &Hold, _w: &mut World) {}

    #[test]
    fn test_static_registration_groups_by_event() {
        let mut registry = EventRegistry::new();
        let added = registry
            .register_static_event_handlers(vec![
                Subscription::new(SubscribeEvent::of::<Tap>(), HandlerFn::new::<Tap>("on_tap", on_tap))
                    .owned_by("A"),
                Subscription::new(EventHandler::of::<Tap>(), HandlerFn::new::<Tap>("on_tap", on_tap))
                    .owned_by("B"),
                Subscription::new(EventHandler::of::<Hold>(), HandlerFn::new::<Hold>("on_hold", on_hold)),
            ])
            .unwrap();
        assert_eq!(added, 3);
        assert_eq!(registry.static_handler_count(EventType::of::<Tap>()), 2);
        assert_eq!(registry.static_handler_count(EventType::of::<Hold>()), 1);
        assert_eq!(registry.static_subscriptions(EventType::of::<Tap>())[0].owner(), "A");
    }

    #[test]
    fn test_duplicate_static_handler_not_added() {
        let mut registry = EventRegistry::new();
        let sub = Subscription::new(SubscribeEvent::of::<Tap>(), HandlerFn::new::<Tap>("on_tap", on_tap))
            .owned_by("A");
        assert_eq!(registry.register_static_event_handlers(vec![sub.clone()]), Ok(1));
        assert_eq!(registry.register_static_event_handlers(vec![sub]), Ok(0));
        assert_eq!(registry.static_handler_count(EventType::of::<Tap>()), 1);
    }

    #[test]
    fn test_mismatched_static_handler_is_terminal_and_atomic() {
        let mut registry = EventRegistry::new();
        let err = registry
            .register_static_event_handlers(vec![
                Subscription::new(SubscribeEvent::of::<Hold>(), HandlerFn::new::<Hold>("on_hold", on_hold)),
                Subscription::new(SubscribeEvent::of::<Tap>(), HandlerFn::new::<Hold>("on_hold", on_hold))
                    .owned_by("Bad"),
            ])
            .unwrap_err();
        assert!(matches!(err, GameError::TerminalInvalidEventHandler(_)));
        assert!(err.is_terminal());
        assert!(err.to_string().contains("Bad::on_hold"));
        assert!(!registry.has_handlers(EventType::of::<Hold>()));
    }

    #[test]
    fn test_raw_static_marker_is_invalid_use() {
        let mut registry = EventRegistry::new();
        let err = registry
            .register_static_event_handlers(vec![Subscription::new(
                SubscribeEvent::raw(),
                HandlerFn::untyped("anything", |_e, _w| {}),
            )])
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidUseOfLibrary(_)));
    }

    #[test]
    fn test_dynamic_register_and_unregister() {
        let mut registry = EventRegistry::new();
        let a = registry
            .register_event_handler(DynamicEventHandler::new(|_e: &Tap, _w: &mut World| {}))
            .unwrap();
        let b = registry
            .register_event_handler(DynamicEventHandler::new(|_e: &Tap, _w: &mut World| {}))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.dynamic_handler_count(EventType::of::<Tap>()), 2);
        assert!(registry.unregister_event_handler(a));
        assert!(!registry.unregister_event_handler(a));
        assert_eq!(registry.dynamic_handlers_for(EventType::of::<Tap>()).len(), 1);
        assert!(registry.unregister_event_handler(b));
        assert!(!registry.has_handlers(EventType::of::<Tap>()));
    }

    #[test]
    fn test_raw_dynamic_handler_rejected() {
        let mut registry = EventRegistry::new();
        let err = registry
            .register_event_handler(DynamicEventHandler::raw(|_e, _w| {}))
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidEventHandler(_)));
        assert!(!err.is_terminal());
    }
}
