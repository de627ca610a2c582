//! Sprite components.
//!
//! Sprites are optional: a simple starting point for a game entity, with the
//! properties most games track (position, size, health, speed). Behaviour is
//! added with ordinary systems querying these components.
use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Ticks an [`ImageSprite`] shows each frame unless told otherwise.
pub const DEFAULT_TICKS_BETWEEN_FRAMES: u32 = 100;

#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub health: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    dead: bool,
}

impl Sprite {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            health: 0.0,
            speed_x: 0.0,
            speed_y: 0.0,
            dead: false,
        }
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    pub fn with_speed(mut self, speed_x: f32, speed_y: f32) -> Self {
        self.speed_x = speed_x;
        self.speed_y = speed_y;
        self
    }

    /// Mark the sprite dead. Its entity is despawned on the next update.
    pub fn set_dead(&mut self) {
        self.dead = true;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }
}

/// A sprite drawn from a cycle of images.
///
/// Shows each frame for `ticks_between_frames` updates, then moves to the
/// next one, wrapping back to the first. Deserialized sprites go through the
/// same checks as [`ImageSprite::new`].
#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ImageSpriteData")]
pub struct ImageSprite {
    frames: Vec<String>,
    ticks_since_last_frame: u32,
    ticks_between_frames: u32,
    frame_index: usize,
}

/// Unchecked serialized form of an [`ImageSprite`].
#[derive(Deserialize)]
struct ImageSpriteData {
    frames: Vec<String>,
    #[serde(default)]
    ticks_since_last_frame: u32,
    #[serde(default = "default_ticks_between_frames")]
    ticks_between_frames: u32,
    #[serde(default)]
    frame_index: usize,
}

fn default_ticks_between_frames() -> u32 {
    DEFAULT_TICKS_BETWEEN_FRAMES
}

impl TryFrom<ImageSpriteData> for ImageSprite {
    type Error = GameError;

    fn try_from(data: ImageSpriteData) -> Result<Self, Self::Error> {
        let mut sprite = ImageSprite::new(data.frames)?
            .with_ticks_between_frames(data.ticks_between_frames);
        if data.frame_index >= sprite.frames.len() {
            return Err(GameError::InvalidUseOfLibrary(format!(
                "Image sprite frame {} is out of range for {} images",
                data.frame_index,
                sprite.frames.len()
            )));
        }
        sprite.frame_index = data.frame_index;
        sprite.ticks_since_last_frame = data.ticks_since_last_frame;
        Ok(sprite)
    }
}

impl ImageSprite {
    /// `frames` are texture keys; at least one is required.
    pub fn new(frames: Vec<String>) -> Result<Self, GameError> {
        if frames.is_empty() {
            return Err(GameError::InvalidUseOfLibrary(
                "An image sprite needs at least one image".to_string(),
            ));
        }
        Ok(Self {
            frames,
            ticks_since_last_frame: 0,
            ticks_between_frames: DEFAULT_TICKS_BETWEEN_FRAMES,
            frame_index: 0,
        })
    }

    pub fn with_ticks_between_frames(mut self, ticks: u32) -> Self {
        self.ticks_between_frames = ticks.max(1);
        self
    }

    /// Count one tick, switching image when the frame has been shown long enough.
    pub fn advance(&mut self) {
        self.ticks_since_last_frame += 1;
        if self.ticks_since_last_frame >= self.ticks_between_frames {
            self.ticks_since_last_frame = 0;
            self.frame_index += 1;
            if self.frame_index >= self.frames.len() {
                self.frame_index = 0;
            }
        }
    }

    /// Texture key of the image shown now.
    pub fn current_frame(&self) -> Option<&str> {
        self.frames.get(self.frame_index).map(String::as_str)
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn ticks_between_frames(&self) -> u32 {
        self.ticks_between_frames
    }
}
