//! Registry integration tests: static subscriptions from several subscribers,
//! malformed handlers, and dynamic registration.

use bevy_ecs::prelude::*;

use ploiu::error::GameError;
use ploiu::events::annotation::{
    EventHandler, EventSubscriber, HandlerFn, SubscribeEvent, Subscription, subscriptions_of,
};
use ploiu::events::handler::DynamicEventHandler;
use ploiu::events::{EventType, GameEvent};
use ploiu::game::Game;
use ploiu::resources::eventregistry::EventRegistry;
use ploiu::{event_handler, subscribe_event};

#[derive(Debug)]
struct TestEvent;
impl GameEvent for TestEvent {}

#[derive(Debug)]
struct OtherEvent;
impl GameEvent for OtherEvent {}

struct FirstSubscriber;

impl FirstSubscriber {
    fn test(_event: &TestEvent, _world: &mut World) {}
}

impl EventSubscriber for FirstSubscriber {
    fn subscriptions() -> Vec<Subscription> {
        vec![subscribe_event!(TestEvent => FirstSubscriber::test)]
    }
}

struct SecondSubscriber;

impl SecondSubscriber {
    fn test(_event: &TestEvent, _world: &mut World) {}
}

impl EventSubscriber for SecondSubscriber {
    fn subscriptions() -> Vec<Subscription> {
        vec![event_handler!(TestEvent => SecondSubscriber::test)]
    }
}

struct BadHandler;

impl BadHandler {
    fn handle_test(_event: &OtherEvent, _world: &mut World) {}
}

impl EventSubscriber for BadHandler {
    fn subscriptions() -> Vec<Subscription> {
        // Marker names TestEvent, the function takes OtherEvent.
        vec![Subscription::new(
            EventHandler::of::<TestEvent>(),
            HandlerFn::new::<OtherEvent>("handle_test", BadHandler::handle_test),
        )]
    }
}

fn noop(_event: &TestEvent, _world: &mut World) {}

mod audio {
    use super::*;

    pub fn handle(_event: &TestEvent, _world: &mut World) {}
}

mod score {
    use super::*;

    pub fn handle(_event: &TestEvent, _world: &mut World) {}

    pub struct Board;

    impl Board {
        pub fn on_test(_event: &OtherEvent, _world: &mut World) {}
    }
}

#[test]
fn registers_handlers_from_both_subscribers() {
    let mut registry = EventRegistry::new();
    let mut subs = subscriptions_of::<FirstSubscriber>();
    subs.extend(subscriptions_of::<SecondSubscriber>());

    let added = registry.register_static_event_handlers(subs).unwrap();
    assert_eq!(added, 2);
    assert_eq!(registry.static_handler_count(EventType::of::<TestEvent>()), 2);

    let owners: Vec<_> = registry
        .static_subscriptions(EventType::of::<TestEvent>())
        .iter()
        .map(|s| s.qualified_name())
        .collect();
    assert_eq!(owners, vec!["FirstSubscriber::test", "SecondSubscriber::test"]);
}

#[test]
fn registering_same_subscriber_twice_keeps_one_handler() {
    let mut registry = EventRegistry::new();
    registry.register_subscriber::<FirstSubscriber>().unwrap();
    let added = registry.register_subscriber::<FirstSubscriber>().unwrap();
    assert_eq!(added, 0);
    assert_eq!(registry.static_handler_count(EventType::of::<TestEvent>()), 1);
}

#[test]
fn mismatched_parameter_is_terminal() {
    let mut registry = EventRegistry::new();
    let err = registry.register_subscriber::<BadHandler>().unwrap_err();
    assert!(matches!(err, GameError::TerminalInvalidEventHandler(_)));
    assert!(err.is_terminal());
    let msg = err.to_string();
    assert!(msg.contains("BadHandler::handle_test"), "{msg}");
    assert!(msg.contains("TestEvent"), "{msg}");
    assert!(msg.contains("OtherEvent"), "{msg}");
    assert_eq!(registry.static_handler_count(EventType::of::<TestEvent>()), 0);
}

#[test]
fn failed_batch_registers_nothing() {
    let mut registry = EventRegistry::new();
    let mut subs = subscriptions_of::<FirstSubscriber>();
    subs.extend(subscriptions_of::<BadHandler>());
    assert!(registry.register_static_event_handlers(subs).is_err());
    assert!(!registry.has_handlers(EventType::of::<TestEvent>()));
}

#[test]
fn raw_event_marker_is_invalid_use() {
    let mut registry = EventRegistry::new();
    let sub = Subscription::new(
        SubscribeEvent::raw(),
        HandlerFn::new::<TestEvent>("noop", noop),
    );
    let err = registry.register_static_event_handlers([sub]).unwrap_err();
    assert!(matches!(err, GameError::InvalidUseOfLibrary(_)));
}

#[test]
fn dynamic_register_event_handler() {
    let mut registry = EventRegistry::new();
    registry
        .register_event_handler(DynamicEventHandler::new(
            |_event: &TestEvent, _world: &mut World| {},
        ))
        .unwrap();
    assert_eq!(registry.dynamic_handler_count(EventType::of::<TestEvent>()), 1);
    assert_eq!(registry.static_handler_count(EventType::of::<TestEvent>()), 0);
}

#[test]
fn dynamic_raw_handler_is_rejected() {
    let mut registry = EventRegistry::new();
    let err = registry
        .register_event_handler(DynamicEventHandler::raw(|_event, _world| {}))
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidEventHandler(_)));
    assert!(!err.is_terminal());
}

#[test]
fn dynamic_handler_can_be_removed() {
    let mut game = Game::new();
    let id = game
        .register_event_handler(DynamicEventHandler::new(
            |_event: &OtherEvent, _world: &mut World| {},
        ))
        .unwrap();
    assert!(game.registry().has_handlers(EventType::of::<OtherEvent>()));
    assert!(game.unregister_event_handler(id));
    assert!(!game.unregister_event_handler(id));
    assert!(!game.registry().has_handlers(EventType::of::<OtherEvent>()));
}

#[test]
fn handlers_sharing_a_name_in_different_modules_both_register() {
    let mut registry = EventRegistry::new();
    let added = registry
        .register_static_event_handlers(vec![
            subscribe_event!(TestEvent => audio::handle),
            subscribe_event!(TestEvent => score::handle),
        ])
        .unwrap();
    assert_eq!(added, 2);
    assert_eq!(registry.static_handler_count(EventType::of::<TestEvent>()), 2);

    let paths: Vec<_> = registry
        .static_subscriptions(EventType::of::<TestEvent>())
        .iter()
        .map(|s| s.handler().path())
        .collect();
    assert_eq!(paths, vec!["audio::handle", "score::handle"]);
}

#[test]
fn mismatch_message_names_full_handler_path() {
    let mut registry = EventRegistry::new();
    let bad = Subscription::new(
        SubscribeEvent::of::<TestEvent>(),
        HandlerFn::new::<OtherEvent>("score::Board::on_test", score::Board::on_test),
    );
    let err = registry.register_static_event_handlers([bad]).unwrap_err();
    assert!(err.to_string().contains("score::Board::on_test"), "{err}");
}
