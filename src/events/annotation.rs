//! Handler markers and subscription tables.
//!
//! A static event handler is a plain function tagged with a marker naming the
//! event it handles. Two parallel markers exist, [`SubscribeEvent`] and
//! [`EventHandler`]; both carry a single `value`, the [`EventType`] of a
//! concrete [`GameEvent`]. The registry treats them the same way.
//!
//! Markers never float on their own: a [`Subscription`] pairs one marker with
//! the [`HandlerFn`] it tags, and keeps both available at runtime so the
//! [`EventRegistry`](crate::resources::eventregistry::EventRegistry) can read
//! and validate them.
//!
//! A type groups its handlers by implementing [`EventSubscriber`]:
//!
//! ```ignore
//! struct Hud;
//!
//! impl Hud {
//!     fn on_exit(event: &GameExitEvent, _world: &mut World) {
//!         log::info!("closing {}", event.window);
//!     }
//! }
//!
//! impl EventSubscriber for Hud {
//!     fn subscriptions() -> Vec<Subscription> {
//!         vec![subscribe_event!(GameExitEvent => Hud::on_exit)]
//!     }
//! }
//! ```
use std::sync::Arc;

use bevy_ecs::prelude::World;
use log::warn;

use crate::events::{EventType, GameEvent, short_type_name};

/// Type-erased handler invocation shared by static and dynamic handlers.
pub type HandlerCall = Arc<dyn Fn(&dyn GameEvent, &mut World) + Send + Sync>;

/// Marks a function as a static handler for the event named by `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscribeEvent {
    pub value: EventType,
}

impl SubscribeEvent {
    pub fn of<E: GameEvent>() -> Self {
        Self {
            value: EventType::of::<E>(),
        }
    }

    /// A marker naming the raw base type. Registering it is refused.
    pub fn raw() -> Self {
        Self {
            value: EventType::base(),
        }
    }
}

/// Marks a function as a static handler for the event named by `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventHandler {
    pub value: EventType,
}

impl EventHandler {
    pub fn of<E: GameEvent>() -> Self {
        Self {
            value: EventType::of::<E>(),
        }
    }

    /// A marker naming the raw base type. Registering it is refused.
    pub fn raw() -> Self {
        Self {
            value: EventType::base(),
        }
    }
}

/// Either of the two handler markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    SubscribeEvent(SubscribeEvent),
    EventHandler(EventHandler),
}

impl Marker {
    /// The event type the marker binds its function to.
    pub fn value(&self) -> EventType {
        match self {
            Marker::SubscribeEvent(m) => m.value,
            Marker::EventHandler(m) => m.value,
        }
    }

    pub fn marker_name(&self) -> &'static str {
        match self {
            Marker::SubscribeEvent(_) => "SubscribeEvent",
            Marker::EventHandler(_) => "EventHandler",
        }
    }
}

impl From<SubscribeEvent> for Marker {
    fn from(m: SubscribeEvent) -> Self {
        Marker::SubscribeEvent(m)
    }
}

impl From<EventHandler> for Marker {
    fn from(m: EventHandler) -> Self {
        Marker::EventHandler(m)
    }
}

/// A function that can carry a marker.
///
/// Records the function's path as written, its name and the single parameter
/// type it accepts, so the registry can check it against the marker value.
#[derive(Clone)]
pub struct HandlerFn {
    path: &'static str,
    name: &'static str,
    param: EventType,
    call: HandlerCall,
}

impl HandlerFn {
    /// Wrap a function taking a concrete event.
    pub fn new<E: GameEvent>(name: &'static str, f: fn(&E, &mut World)) -> Self {
        let call: HandlerCall = Arc::new(move |event: &dyn GameEvent, world: &mut World| {
            match event.downcast_ref::<E>() {
                Some(event) => f(event, world),
                None => warn!(
                    "Handler expected {} but was given {}",
                    EventType::of::<E>(),
                    event.event_name()
                ),
            }
        });
        Self {
            path: name.trim(),
            name: short_type_name(name.trim()),
            param: EventType::of::<E>(),
            call,
        }
    }

    /// Wrap a function taking any event. Its parameter type is the raw base
    /// type, which never matches a marker value.
    pub fn untyped(name: &'static str, f: fn(&dyn GameEvent, &mut World)) -> Self {
        Self {
            path: name.trim(),
            name: short_type_name(name.trim()),
            param: EventType::base(),
            call: Arc::new(f),
        }
    }

    /// Last segment of the function path.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The function path as given, e.g. `audio::Mixer::on_exit`.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// The type of the function's only parameter.
    pub fn param(&self) -> EventType {
        self.param
    }

    pub(crate) fn call(&self) -> &HandlerCall {
        &self.call
    }

    pub fn invoke(&self, event: &dyn GameEvent, world: &mut World) {
        (self.call)(event, world);
    }
}

impl std::fmt::Debug for HandlerFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerFn")
            .field("name", &self.name)
            .field("param", &self.param)
            .finish()
    }
}

/// A marker attached to the function it tags.
#[derive(Debug, Clone)]
pub struct Subscription {
    owner: &'static str,
    marker: Marker,
    handler: HandlerFn,
}

impl Subscription {
    pub fn new(marker: impl Into<Marker>, handler: HandlerFn) -> Self {
        Self {
            owner: "",
            marker: marker.into(),
            handler,
        }
    }

    /// Record the subscriber that declares this handler.
    pub fn owned_by(mut self, owner: &'static str) -> Self {
        self.owner = owner;
        self
    }

    pub fn marker(&self) -> Marker {
        self.marker
    }

    pub fn handler(&self) -> &HandlerFn {
        &self.handler
    }

    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// The event this subscription listens to, as declared by its marker.
    pub fn event(&self) -> EventType {
        self.marker.value()
    }

    /// `Owner::function`, or just `function` when no owner was recorded.
    pub fn qualified_name(&self) -> String {
        if self.owner.is_empty() {
            self.handler.name.to_string()
        } else {
            format!("{}::{}", self.owner, self.handler.name)
        }
    }

    /// The handler's full path, prefixed with the owner when the path is a
    /// bare function name. Used in diagnostics.
    pub fn full_name(&self) -> String {
        if self.owner.is_empty() || self.handler.path.contains("::") {
            self.handler.path.to_string()
        } else {
            format!("{}::{}", self.owner, self.handler.path)
        }
    }

    /// Whether both subscriptions tag the same function.
    pub fn same_handler(&self, other: &Subscription) -> bool {
        self.owner == other.owner && self.handler.path == other.handler.path
    }
}

/// A type that declares static event handlers.
pub trait EventSubscriber {
    /// The handlers this type declares, each tagged with its marker.
    fn subscriptions() -> Vec<Subscription>;

    fn subscriber_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

/// Collect a subscriber's table, stamping each entry with the subscriber name.
pub fn subscriptions_of<S: EventSubscriber>() -> Vec<Subscription> {
    S::subscriptions()
        .into_iter()
        .map(|s| s.owned_by(S::subscriber_name()))
        .collect()
}

/// Tag a function with [`SubscribeEvent`] for the given event.
///
/// `subscribe_event!(GameExitEvent => Hud::on_exit)` expands to a
/// [`Subscription`] whose marker value and handler parameter agree.
#[macro_export]
macro_rules! subscribe_event {
    ($event:ty => $handler:path) => {
        $crate::events::annotation::Subscription::new(
            $crate::events::annotation::SubscribeEvent::of::<$event>(),
            $crate::events::annotation::HandlerFn::new::<$event>(stringify!($handler), $handler),
        )
    };
}

/// Tag a function with [`EventHandler`] for the given event.
#[macro_export]
macro_rules! event_handler {
    ($event:ty => $handler:path) => {
        $crate::events::annotation::Subscription::new(
            $crate::events::annotation::EventHandler::of::<$event>(),
            $crate::events::annotation::HandlerFn::new::<$event>(stringify!($handler), $handler),
        )
    };
}
