//! High-level game facade.
//!
//! [`Game`] owns the ECS [`World`] holding the event pool, the handler
//! registry and the other resources, plus the update schedule for sprite
//! systems. A typical loop:
//!
//! ```ignore
//! let mut game = Game::with_config(config);
//! game.init_game_window("My Game", (500, 500), WindowFlags::CLOSE_KILLS_PROCESS);
//! while game.is_running() {
//!     game.frame();
//!     // Events without handlers are left for the game; mark them handled
//!     // once dealt with so the next tick removes them.
//!     if !game.consume::<GameExitEvent>().is_empty() {
//!         break;
//!     }
//!     game.tick(game.config().tick_duration());
//! }
//! ```
use std::time::Duration;

use bevy_ecs::prelude::*;

use crate::error::GameError;
use crate::events::GameEvent;
use crate::events::annotation::{EventSubscriber, Subscription};
use crate::events::handler::{DynamicEventHandler, HandlerId};
use crate::resources::canvas::Canvas;
use crate::resources::eventpool::{EventPool, EventSender};
use crate::resources::eventregistry::EventRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputTracker;
use crate::resources::runstate::RunState;
use crate::resources::worldtime::WorldTime;
use crate::systems::events::{process_events, tick};
use crate::systems::sprite::{despawn_dead_sprites, update_image_sprites};

#[cfg(feature = "window")]
use crate::resources::{gamewindow::GameWindow, texturestore::TextureStore, windowflags::WindowFlags};

pub struct Game {
    world: World,
    update: Schedule,
}

impl Default for Game {
    fn default() -> Self {
        Self::with_config(GameConfig::default())
    }
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a game world with all library resources inserted.
    pub fn with_config(config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(EventPool::new());
        world.insert_resource(EventRegistry::new());
        world.insert_resource(WorldTime::default().with_time_scale(1.0));
        world.insert_resource(InputTracker::default());
        world.insert_resource(RunState::default());
        world.insert_resource(Canvas::default());
        world.insert_resource(config);

        let mut update = Schedule::default();
        update.add_systems(update_image_sprites);
        update.add_systems(despawn_dead_sprites.after(update_image_sprites));

        Self { world, update }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn pool(&self) -> &EventPool {
        self.world.resource::<EventPool>()
    }

    pub fn registry(&self) -> &EventRegistry {
        self.world.resource::<EventRegistry>()
    }

    /// Add an event to the pool. It is handled by the next [`Game::process_events`].
    pub fn post_event<E: GameEvent>(&mut self, event: E) -> u64 {
        self.world.resource_mut::<EventPool>().post_event(event)
    }

    /// Handle for posting events from other threads.
    pub fn event_sender(&self) -> EventSender {
        self.pool().sender()
    }

    /// Events currently in the pool, in posting order.
    pub fn events(&self) -> impl Iterator<Item = &dyn GameEvent> {
        self.pool().events()
    }

    /// Mark an event the game processed itself handled; the next tick removes it.
    pub fn mark_handled(&mut self, id: u64) -> bool {
        self.world.resource_mut::<EventPool>().mark_handled(id)
    }

    /// Mark every unhandled `E` handled and return their ids.
    pub fn consume<E: GameEvent>(&mut self) -> Vec<u64> {
        self.world.resource_mut::<EventPool>().consume::<E>()
    }

    pub fn process_events(&mut self) {
        process_events(&mut self.world);
    }

    pub fn tick(&mut self, time: Duration) {
        tick(&mut self.world, time);
    }

    pub fn register_static_event_handlers(
        &mut self,
        subscriptions: impl IntoIterator<Item = Subscription>,
    ) -> Result<usize, GameError> {
        self.world
            .resource_mut::<EventRegistry>()
            .register_static_event_handlers(subscriptions)
    }

    pub fn register_subscriber<S: EventSubscriber>(&mut self) -> Result<usize, GameError> {
        self.world
            .resource_mut::<EventRegistry>()
            .register_subscriber::<S>()
    }

    pub fn register_event_handler(
        &mut self,
        handler: DynamicEventHandler,
    ) -> Result<HandlerId, GameError> {
        self.world
            .resource_mut::<EventRegistry>()
            .register_event_handler(handler)
    }

    pub fn unregister_event_handler(&mut self, id: HandlerId) -> bool {
        self.world
            .resource_mut::<EventRegistry>()
            .unregister_event_handler(id)
    }

    /// Run the sprite systems once.
    pub fn update(&mut self) {
        self.update.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// One frame: poll window input, dispatch events, update sprites, draw.
    pub fn frame(&mut self) {
        #[cfg(feature = "window")]
        crate::systems::input::poll_window_input(&mut self.world);
        self.process_events();
        self.update();
        #[cfg(feature = "window")]
        crate::systems::render::render_frame(&mut self.world);
    }

    pub fn is_running(&self) -> bool {
        self.world
            .get_resource::<RunState>()
            .is_none_or(|r| r.is_running())
    }

    pub fn request_quit(&mut self) {
        self.world.resource_mut::<RunState>().request_quit();
    }

    /// Open the game window. Replaces any window opened before.
    #[cfg(feature = "window")]
    pub fn init_game_window(&mut self, title: &str, size: (i32, i32), flags: WindowFlags) {
        let target_fps = self.config().target_fps;
        let window = GameWindow::open(title, size.0, size.1, flags, target_fps);
        log::info!("Game window '{}' ready", title);
        self.world.insert_non_send_resource(window);
        if !self.world.contains_resource::<TextureStore>() {
            self.world.insert_resource(TextureStore::new());
        }
    }

    /// Open the window described by the configuration.
    #[cfg(feature = "window")]
    pub fn init_game_window_from_config(&mut self) {
        let config = self.config();
        let title = config.window_title.clone();
        let (w, h) = config.window_size();
        let flags = config.flags();
        self.init_game_window(&title, (w as i32, h as i32), flags);
    }

    #[cfg(feature = "window")]
    pub fn game_window(&self) -> Option<&GameWindow> {
        self.world.get_non_send_resource::<GameWindow>()
    }

    /// Load a texture so image sprites can refer to it by `key`.
    #[cfg(feature = "window")]
    pub fn load_texture(&mut self, key: &str, path: &str) -> Result<(), GameError> {
        let Some(mut window) = self.world.remove_non_send_resource::<GameWindow>() else {
            return Err(GameError::InvalidUseOfLibrary(
                "Textures can only be loaded after the game window is open".to_string(),
            ));
        };
        let result = self
            .world
            .get_resource_or_insert_with(TextureStore::new)
            .load(&mut window, key, path);
        self.world.insert_non_send_resource(window);
        result
    }
}
