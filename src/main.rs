//! Ploiu demo.
//!
//! Opens a window painted red and shows both kinds of event handlers:
//!
//! - a static handler ([`ExitLogger`]) tagged with `subscribe_event!`;
//! - dynamic handlers registered as closures: ESC posts a [`GameExitEvent`],
//!   a primary click paints a white square under the cursor.
//!
//! The loop stops when the window is closed (the demo opens it with
//! `CLOSE_KILLS_PROCESS`) or when a `GameExitEvent` is left in the pool.
//!
//! ```sh
//! cargo run --release -- --config ./config.ini
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::World;
use clap::Parser;
use log::{error, info};

use ploiu::events::annotation::{EventSubscriber, Subscription};
use ploiu::events::handler::DynamicEventHandler;
use ploiu::events::keyboard::{KeyCode, KeyboardDownEvent};
use ploiu::events::mouse::MouseClickEvent;
use ploiu::events::window::GameExitEvent;
use ploiu::game::Game;
use ploiu::resources::canvas::{Canvas, Rgba};
use ploiu::resources::eventpool::EventPool;
use ploiu::resources::gameconfig::GameConfig;
use ploiu::resources::windowflags::WindowFlags;
use ploiu::subscribe_event;

/// Ploiu event-driven game demo
#[derive(Parser)]
#[command(version, about = "A small window driven by game events.")]
struct Cli {
    /// Configuration file (INI). Defaults are used when it is missing.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Window title, overriding the configuration.
    #[arg(long)]
    title: Option<String>,
}

struct ExitLogger;

impl ExitLogger {
    fn on_exit(event: &GameExitEvent, _world: &mut World) {
        info!("Window '{}' asked to close", event.window);
    }
}

impl EventSubscriber for ExitLogger {
    fn subscriptions() -> Vec<Subscription> {
        vec![subscribe_event!(GameExitEvent => ExitLogger::on_exit)]
    }
}

const SQUARE: i32 = 20;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        info!("{}; using defaults", e);
    }
    if let Some(title) = cli.title {
        config.window_title = title;
    }
    let title = config.window_title.clone();
    let (width, height) = config.window_size();
    let tick_time = config.tick_duration();
    let flags = config.flags() | WindowFlags::CLOSE_KILLS_PROCESS;

    let mut game = Game::with_config(config);
    game.init_game_window(
        &title,
        (width as i32, height as i32),
        flags,
    );

    {
        let mut canvas = game.world_mut().resource_mut::<Canvas>();
        canvas.set_color(Rgba::RED);
        canvas.fill_rect(0, 0, width as i32, height as i32);
    }

    if let Err(e) = game.register_subscriber::<ExitLogger>() {
        error!("{}", e);
        std::process::exit(1);
    }

    let window_title = title.clone();
    let handlers = [
        DynamicEventHandler::new(move |event: &KeyboardDownEvent, world: &mut World| {
            if event.key_event.key == KeyCode::ESCAPE {
                world.resource_mut::<EventPool>().post_event(GameExitEvent {
                    window: window_title.clone(),
                });
            }
        }),
        DynamicEventHandler::new(|event: &MouseClickEvent, world: &mut World| {
            if event.is_primary() {
                let mut canvas = world.resource_mut::<Canvas>();
                canvas.set_color(Rgba::WHITE);
                canvas.fill_rect(
                    event.event.x as i32 - SQUARE / 2,
                    event.event.y as i32 - SQUARE / 2,
                    SQUARE,
                    SQUARE,
                );
            }
        }),
    ];
    for handler in handlers {
        if let Err(e) = game.register_event_handler(handler) {
            error!("{}", e);
        }
    }

    // --------------- Main loop ---------------
    while game.is_running() {
        game.frame();
        if game.pool().contains::<GameExitEvent>() {
            info!("Exit event received");
            break;
        }
        game.tick(tick_time);
    }
    info!("Goodbye");
}
