//! Window lifecycle events.
use crate::events::GameEvent;

/// The player asked the game window to close.
///
/// The window stays open; the game decides whether to exit. With
/// [`WindowFlags::CLOSE_KILLS_PROCESS`](crate::resources::windowflags::WindowFlags::CLOSE_KILLS_PROCESS)
/// the game loop stops on its own after this event is posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameExitEvent {
    /// Title of the window being closed.
    pub window: String,
}

impl GameEvent for GameExitEvent {}
