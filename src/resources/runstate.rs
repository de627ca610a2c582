//! Whether the game loop should keep going.
use bevy_ecs::prelude::Resource;
use log::info;

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct RunState {
    quit_requested: bool,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        !self.quit_requested
    }

    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            info!("Quit requested");
        }
        self.quit_requested = true;
    }
}
