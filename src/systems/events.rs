//! Event dispatch and housekeeping.
//!
//! # Frame Flow
//!
//! 1. [`process_events`] runs the handlers of every pending event:
//!    all static handlers first, then all dynamic handlers.
//! 2. The game inspects the pool for events nobody handled.
//! 3. [`tick`] removes handled events, ages the rest, advances time and waits.
//!
//! Handlers receive the world mutably. They may post new events (picked up by
//! the next `process_events`) and register or remove handlers; changes to the
//! registry apply from the next call as well.
use std::sync::Arc;
use std::time::Duration;

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::events::GameEvent;
use crate::resources::eventpool::EventPool;
use crate::resources::eventregistry::{EventRegistry, HandlerList};
use crate::resources::gameconfig::GameConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::time::update_world_time;

struct Pending {
    id: u64,
    event: Arc<dyn GameEvent>,
    static_handlers: HandlerList,
    dynamic_handlers: HandlerList,
}

/// Execute all handlers for all pending events and mark each handled.
///
/// Contract
/// - Drains events posted from other threads into the pool first.
/// - Only unhandled events whose exact type has a handler are selected, in
///   posting order. Events posted by handlers wait for the next call.
/// - Static phase: every selected event goes through its static handlers in
///   registration order and is marked handled.
/// - Dynamic phase: same, with dynamic handlers.
/// - Events without handlers are left untouched.
pub fn process_events(world: &mut World) {
    let unhandled = {
        let Some(mut pool) = world.get_resource_mut::<EventPool>() else {
            warn!("process_events called without an EventPool resource");
            return;
        };
        pool.drain_incoming();
        pool.unhandled()
    };

    let batch: Vec<Pending> = {
        let Some(registry) = world.get_resource::<EventRegistry>() else {
            warn!("process_events called without an EventRegistry resource");
            return;
        };
        unhandled
            .into_iter()
            .filter_map(|(id, event)| {
                let event_type = event.event_type();
                if !registry.has_handlers(event_type) {
                    return None;
                }
                Some(Pending {
                    id,
                    static_handlers: registry.static_handlers_for(event_type),
                    dynamic_handlers: registry.dynamic_handlers_for(event_type),
                    event,
                })
            })
            .collect()
    };

    if batch.is_empty() {
        return;
    }
    debug!("Dispatching {} event(s)", batch.len());

    for pending in &batch {
        for handler in &pending.static_handlers {
            handler(&*pending.event, world);
        }
        mark_handled(world, pending.id);
    }
    for pending in &batch {
        for handler in &pending.dynamic_handlers {
            handler(&*pending.event, world);
        }
        mark_handled(world, pending.id);
    }
}

fn mark_handled(world: &mut World, id: u64) {
    if let Some(mut pool) = world.get_resource_mut::<EventPool>() {
        pool.mark_handled(id);
    }
}

/// Housekeeping done between game loop iterations.
///
/// Removes handled events and drops unhandled ones that outlived
/// `GameConfig::max_unhandled_ticks` (kept forever without a config).
pub fn event_housekeeping(world: &mut World) {
    let max_unhandled = world
        .get_resource::<GameConfig>()
        .map_or(0, |c| c.max_unhandled_ticks);
    let Some(mut pool) = world.get_resource_mut::<EventPool>() else {
        return;
    };
    let handled = pool.clear_handled();
    let stale = pool.age_unhandled(max_unhandled);
    if stale > 0 {
        debug!("Dropped {} stale unhandled event(s)", stale);
    }
    if handled > 0 {
        debug!("Cleared {} handled event(s)", handled);
    }
}

/// Finish a game loop iteration and wait `time` before the next one.
pub fn tick(world: &mut World, time: Duration) {
    event_housekeeping(world);
    if world.contains_resource::<WorldTime>() {
        update_world_time(world, time.as_secs_f32());
    }
    if !time.is_zero() {
        std::thread::sleep(time);
    }
}
