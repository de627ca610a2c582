//! Input integration tests: snapshots turn into pooled events that reach
//! handlers, and closing the window stops the loop when asked to.

use bevy_ecs::prelude::*;

use ploiu::events::handler::DynamicEventHandler;
use ploiu::events::keyboard::{KeyCode, KeyboardDownEvent, KeyboardTypeEvent};
use ploiu::events::mouse::{MouseButton, MouseClickEvent};
use ploiu::events::window::GameExitEvent;
use ploiu::game::Game;
use ploiu::resources::canvas::{Canvas, DrawCommand, Rgba};
use ploiu::resources::input::InputSnapshot;
use ploiu::resources::windowflags::WindowFlags;
use ploiu::systems::input::apply_input_snapshot;

#[derive(Resource, Default)]
struct Typed(String);

#[test]
fn typed_characters_reach_handlers_in_order() {
    let mut game = Game::new();
    game.world_mut().insert_resource(Typed::default());
    game.register_event_handler(DynamicEventHandler::new(
        |e: &KeyboardTypeEvent, world: &mut World| {
            if let Some(ch) = e.key_event.ch {
                world.resource_mut::<Typed>().0.push(ch);
            }
        },
    ))
    .unwrap();

    let mut frame = InputSnapshot::default();
    for ch in "hey".chars() {
        frame.push_typed(ch);
    }
    apply_input_snapshot(game.world_mut(), frame, "w", WindowFlags::NONE);
    game.process_events();

    assert_eq!(game.world().resource::<Typed>().0, "hey");
}

#[test]
fn click_paints_canvas() {
    let mut game = Game::new();
    game.register_event_handler(DynamicEventHandler::new(
        |e: &MouseClickEvent, world: &mut World| {
            let mut canvas = world.resource_mut::<Canvas>();
            canvas.set_color(Rgba::BLUE);
            canvas.fill_rect(e.event.x as i32, e.event.y as i32, 4, 4);
        },
    ))
    .unwrap();

    let mut down = InputSnapshot {
        cursor_inside: true,
        mouse_x: 30.0,
        mouse_y: 40.0,
        ..Default::default()
    };
    down.press_button(MouseButton::Primary);
    let up = InputSnapshot {
        cursor_inside: true,
        mouse_x: 30.0,
        mouse_y: 40.0,
        ..Default::default()
    };
    apply_input_snapshot(game.world_mut(), down, "w", WindowFlags::NONE);
    apply_input_snapshot(game.world_mut(), up, "w", WindowFlags::NONE);
    game.process_events();

    assert_eq!(
        game.world().resource::<Canvas>().commands(),
        &[DrawCommand::FillRect {
            x: 30,
            y: 40,
            width: 4,
            height: 4,
            color: Rgba::BLUE,
        }]
    );
}

#[test]
fn key_down_without_handler_stays_in_pool() {
    let mut game = Game::new();
    let mut frame = InputSnapshot::default();
    frame.press_key(KeyCode::ESCAPE);
    apply_input_snapshot(game.world_mut(), frame, "w", WindowFlags::NONE);
    game.process_events();

    let keys: Vec<KeyCode> = game
        .pool()
        .of_type::<KeyboardDownEvent>()
        .map(|e| e.key_event.key)
        .collect();
    assert_eq!(keys, vec![KeyCode::ESCAPE]);
}

#[test]
fn close_request_with_close_kills_process() {
    let mut game = Game::new();
    let frame = InputSnapshot {
        close_requested: true,
        ..Default::default()
    };
    let flags = WindowFlags::CLOSE_KILLS_PROCESS | WindowFlags::DOUBLE_BUFFERED;
    apply_input_snapshot(game.world_mut(), frame, "Main", flags);

    assert!(!game.is_running());
    let exits: Vec<&GameExitEvent> = game.pool().of_type::<GameExitEvent>().collect();
    assert_eq!(exits.len(), 1);
    assert_eq!(exits[0].window, "Main");
}
