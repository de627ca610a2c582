//! Loaded textures keyed by string IDs, used to draw image sprites.
use bevy_ecs::prelude::Resource;
use raylib::prelude::Texture2D;
use rustc_hash::FxHashMap;

use crate::error::GameError;
use crate::resources::gamewindow::GameWindow;

#[derive(Resource, Default)]
pub struct TextureStore {
    pub map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an image file into a GPU texture under `key`.
    pub fn load(
        &mut self,
        window: &mut GameWindow,
        key: impl Into<String>,
        path: &str,
    ) -> Result<(), GameError> {
        let (rl, thread) = window.parts_mut();
        let texture = rl
            .load_texture(thread, path)
            .map_err(|e| GameError::Asset(format!("Failed to load texture {}: {}", path, e)))?;
        self.map.insert(key.into(), texture);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }

    /// Pixel size of a loaded texture.
    pub fn size_of(&self, key: &str) -> Option<(i32, i32)> {
        self.map.get(key).map(|t| (t.width, t.height))
    }
}
