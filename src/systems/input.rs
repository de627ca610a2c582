//! Input systems.
//!
//! - [`apply_input_snapshot`] turns a frame of input into pooled events using
//!   the [`InputTracker`] resource.
//! - [`poll_window_input`] reads that frame from the [`GameWindow`] when one
//!   is open.
//!
//! [`GameWindow`]: crate::resources::gamewindow::GameWindow
use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::resources::eventpool::EventPool;
use crate::resources::input::{InputSnapshot, InputTracker};
use crate::resources::runstate::RunState;
use crate::resources::windowflags::WindowFlags;

/// Post the events produced by `snapshot` and return how many there were.
///
/// A close request on a window with [`WindowFlags::CLOSE_KILLS_PROCESS`] also
/// asks the game loop to stop through [`RunState`].
pub fn apply_input_snapshot(
    world: &mut World,
    snapshot: InputSnapshot,
    window_title: &str,
    flags: WindowFlags,
) -> usize {
    let close_requested = snapshot.close_requested;
    let events = world
        .get_resource_or_insert_with(InputTracker::default)
        .diff(snapshot, window_title);

    let posted = events.len();
    match world.get_resource_mut::<EventPool>() {
        Some(mut pool) => {
            for event in events {
                pool.post_shared(event);
            }
        }
        None if posted > 0 => {
            warn!("Dropping {} input event(s): no EventPool resource", posted);
        }
        None => {}
    }

    if close_requested && flags.contains(WindowFlags::CLOSE_KILLS_PROCESS) {
        if let Some(mut run_state) = world.get_resource_mut::<RunState>() {
            if run_state.is_running() {
                debug!("Window '{}' closed; stopping the game", window_title);
            }
            run_state.request_quit();
        }
    }
    posted
}

/// Read the open window's input and post the resulting events.
#[cfg(feature = "window")]
pub fn poll_window_input(world: &mut World) -> usize {
    use crate::resources::gamewindow::GameWindow;

    let (snapshot, title, flags) = {
        let Some(mut window) = world.get_non_send_resource_mut::<GameWindow>() else {
            return 0;
        };
        (window.snapshot_input(), window.title().to_string(), window.flags())
    };
    apply_input_snapshot(world, snapshot, &title, flags)
}
