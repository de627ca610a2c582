//! Sprite systems.
//!
//! - [`update_image_sprites`] advances every image sprite by one tick.
//! - [`despawn_dead_sprites`] removes entities whose [`Sprite`] was marked dead.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::sprite::{ImageSprite, Sprite};

/// Advance image cycling on all live image sprites.
pub fn update_image_sprites(mut query: Query<(&mut ImageSprite, Option<&Sprite>)>) {
    for (mut image, sprite) in query.iter_mut() {
        if sprite.is_some_and(|s| s.is_dead()) {
            continue;
        }
        image.advance();
    }
}

/// Despawn every entity whose sprite is dead.
pub fn despawn_dead_sprites(query: Query<(Entity, &Sprite)>, mut commands: Commands) {
    for (entity, sprite) in query.iter() {
        if sprite.is_dead() {
            debug!("Despawning dead sprite {:?}", entity);
            commands.entity(entity).try_despawn();
        }
    }
}
