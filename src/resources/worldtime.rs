//! Game clock resource.
//!
//! Advanced once per tick by [`update_world_time`](crate::systems::time::update_world_time).
use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    /// Scaled seconds since the game started.
    pub elapsed: f32,
    /// Scaled seconds covered by the last tick.
    pub delta: f32,
    pub time_scale: f32,
    /// Number of ticks so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }
}
