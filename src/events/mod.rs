//! Event types and the markers used to bind handlers to them.
//!
//! Every event posted to the [`EventPool`](crate::resources::eventpool::EventPool)
//! implements [`GameEvent`]. Handlers are bound to one concrete event type,
//! identified at runtime by an [`EventType`]. Dispatch matches the exact type:
//! a handler for [`MouseClickEvent`](mouse::MouseClickEvent) never sees a
//! [`MousePressedEvent`](mouse::MousePressedEvent).
//!
//! Submodules:
//! - [`annotation`] – `SubscribeEvent` / `EventHandler` markers and subscription tables
//! - [`handler`] – runtime (closure) handlers
//! - [`keyboard`] – key down/release/type events
//! - [`mouse`] – mouse button, motion and wheel events
//! - [`window`] – window lifecycle events
pub mod annotation;
pub mod handler;
pub mod keyboard;
pub mod mouse;
pub mod window;

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Access to `Any` for sized implementors, used to downcast trait objects.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Base trait for a game event.
///
/// Implement it on a concrete struct to make the struct postable:
///
/// ```ignore
/// #[derive(Debug)]
/// struct LevelCleared { level: u32 }
/// impl GameEvent for LevelCleared {}
/// ```
///
/// The trait itself is never a valid subscription target; handlers must name a
/// concrete event.
pub trait GameEvent: AsAny + Send + Sync + fmt::Debug + 'static {
    /// Human-readable event name, used in logs and error messages.
    fn event_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }
}

impl dyn GameEvent {
    /// Runtime identity of the concrete event behind this trait object.
    pub fn event_type(&self) -> EventType {
        EventType {
            id: Any::type_id(self.as_any()),
            name: self.event_name(),
        }
    }

    /// Whether the concrete event is an `E`.
    pub fn is<E: GameEvent>(&self) -> bool {
        self.as_any().is::<E>()
    }

    /// Borrow the concrete event if it is an `E`.
    pub fn downcast_ref<E: GameEvent>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }
}

/// Runtime identity of an event type.
///
/// Equality and hashing only consider the underlying [`TypeId`]; the name is
/// carried for diagnostics.
#[derive(Clone, Copy)]
pub struct EventType {
    id: TypeId,
    name: &'static str,
}

impl EventType {
    /// The identity of the concrete event type `E`.
    pub fn of<E: GameEvent>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: short_type_name(std::any::type_name::<E>()),
        }
    }

    /// The identity of the raw [`GameEvent`] base type.
    ///
    /// Only useful to describe a handler that takes any event; such handlers
    /// are refused by the registry.
    pub fn base() -> Self {
        Self {
            id: TypeId::of::<dyn GameEvent>(),
            name: "GameEvent",
        }
    }

    pub fn is_base(&self) -> bool {
        self.id == TypeId::of::<dyn GameEvent>()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventType {}

impl Hash for EventType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventType({})", self.name)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Strip the module path from a type name, leaving generic names untouched.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    if full.contains('<') {
        return full;
    }
    full.rsplit("::").next().unwrap_or(full).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Ping;
    impl GameEvent for Ping {}

    #[derive(Debug)]
    struct Pong(u32);
    impl GameEvent for Pong {
        fn event_name(&self) -> &'static str {
            "pong!"
        }
    }

    #[test]
    fn test_event_type_equality_by_type() {
        assert_eq!(EventType::of::<Ping>(), EventType::of::<Ping>());
        assert_ne!(EventType::of::<Ping>(), EventType::of::<Pong>());
        assert_eq!(EventType::of::<Ping>().name(), "Ping");
    }

    #[test]
    fn test_base_type_is_distinct() {
        assert!(EventType::base().is_base());
        assert!(!EventType::of::<Ping>().is_base());
        assert_ne!(EventType::base(), EventType::of::<Ping>());
    }

    #[test]
    fn test_trait_object_identity_and_downcast() {
        let boxed: Box<dyn GameEvent> = Box::new(Pong(7));
        assert_eq!(boxed.event_type(), EventType::of::<Pong>());
        assert_eq!(boxed.event_name(), "pong!");
        assert!(boxed.is::<Pong>());
        assert!(!boxed.is::<Ping>());
        assert_eq!(boxed.downcast_ref::<Pong>().map(|p| p.0), Some(7));
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::Thing"), "Thing");
        assert_eq!(short_type_name("Thing"), "Thing");
        assert_eq!(short_type_name("a::Wrap<b::C>"), "a::Wrap<b::C>");
    }
}
