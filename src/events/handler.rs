//! Runtime event handlers.
//!
//! Static handlers are declared up front through markers; a
//! [`DynamicEventHandler`] is a closure bound to an event type while the game
//! is running, e.g. a level that listens for input only while it is loaded.
use std::sync::Arc;

use bevy_ecs::prelude::World;

use crate::events::annotation::HandlerCall;
use crate::events::{EventType, GameEvent};

/// Closure invoked for each matching event.
pub type Applicator = HandlerCall;

/// Identifies a registered dynamic handler, for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(pub(crate) u64);

/// A closure paired with the event type it handles.
#[derive(Clone)]
pub struct DynamicEventHandler {
    event: EventType,
    handler: Applicator,
}

impl DynamicEventHandler {
    /// Bind a closure to the concrete event `E`.
    pub fn new<E, F>(f: F) -> Self
    where
        E: GameEvent,
        F: Fn(&E, &mut World) + Send + Sync + 'static,
    {
        let handler: Applicator = Arc::new(move |event: &dyn GameEvent, world: &mut World| {
            if let Some(event) = event.downcast_ref::<E>() {
                f(event, world);
            }
        });
        Self {
            event: EventType::of::<E>(),
            handler,
        }
    }

    /// Bind a closure to the raw base type. The registry refuses these.
    pub fn raw<F>(f: F) -> Self
    where
        F: Fn(&dyn GameEvent, &mut World) + Send + Sync + 'static,
    {
        Self {
            event: EventType::base(),
            handler: Arc::new(f),
        }
    }

    pub fn event(&self) -> EventType {
        self.event
    }

    pub fn handler(&self) -> &Applicator {
        &self.handler
    }
}

impl std::fmt::Debug for DynamicEventHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicEventHandler")
            .field("event", &self.event)
            .finish()
    }
}
