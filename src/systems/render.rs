//! Frame rendering.
//!
//! Replays the [`Canvas`] commands, then draws every live image sprite on top
//! at its sprite position. Sprites whose texture is not loaded are skipped.
use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::*;

use crate::components::sprite::{ImageSprite, Sprite};
use crate::resources::canvas::{Canvas, DrawCommand, Rgba};
use crate::resources::gamewindow::GameWindow;
use crate::resources::texturestore::TextureStore;

fn color(c: Rgba) -> Color {
    Color::new(c.r, c.g, c.b, c.a)
}

/// Draw one frame into the open window. No-op without a window.
pub fn render_frame(world: &mut World) {
    // The window leaves the world while drawing so the world can be queried.
    let Some(mut window) = world.remove_non_send_resource::<GameWindow>() else {
        return;
    };

    let commands: Vec<DrawCommand> = world
        .get_resource::<Canvas>()
        .map(|c| c.commands().to_vec())
        .unwrap_or_default();
    let sprites: Vec<(String, i32, i32)> = {
        let mut q = world.query::<(&ImageSprite, &Sprite)>();
        q.iter(world)
            .filter(|(_, s)| !s.is_dead())
            .filter_map(|(image, s)| Some((image.current_frame()?.to_string(), s.x, s.y)))
            .collect()
    };

    {
        let (rl, thread) = window.parts_mut();
        let mut d = rl.begin_drawing(thread);
        d.clear_background(Color::BLACK);
        for command in &commands {
            match *command {
                DrawCommand::Clear(c) => d.clear_background(color(c)),
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color: c,
                } => d.draw_rectangle(x, y, width, height, color(c)),
            }
        }
        if let Some(textures) = world.get_resource::<TextureStore>() {
            for (key, x, y) in &sprites {
                match textures.get(key) {
                    Some(texture) => d.draw_texture(texture, *x, *y, Color::WHITE),
                    None => debug!("Texture '{}' is not loaded", key),
                }
            }
        }
    }

    world.insert_non_send_resource(window);
}
