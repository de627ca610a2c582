//! Retained drawing surface.
//!
//! Drawing on the [`Canvas`] records commands instead of touching the window.
//! The render system replays them every frame, so whatever was drawn stays on
//! screen across frames and window resizes until it is cleared.
//!
//! ```ignore
//! let mut canvas = world.resource_mut::<Canvas>();
//! canvas.set_color(Rgba::RED);
//! canvas.fill_rect(0, 0, 500, 500);
//! ```
use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 255, 0);
    pub const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear(Rgba),
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgba,
    },
}

#[derive(Resource, Debug, Clone)]
pub struct Canvas {
    color: Rgba,
    commands: Vec<DrawCommand>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            color: Rgba::WHITE,
            commands: Vec::new(),
        }
    }
}

impl Canvas {
    /// Color used by the following fill calls.
    pub fn set_color(&mut self, color: Rgba) {
        self.color = color;
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color: self.color,
        });
    }

    /// Paint everything with `color`. Earlier commands are dropped since they
    /// would be hidden anyway.
    pub fn clear(&mut self, color: Rgba) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}
