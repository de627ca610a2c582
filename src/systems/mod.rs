//! Engine systems.
//!
//! Submodules overview
//! - [`events`] – dispatch pooled events to their handlers, tick housekeeping
//! - [`input`] – turn input snapshots into pooled events
//! - [`render`] – draw the canvas and image sprites (`window` feature)
//! - [`sprite`] – advance image sprites, despawn dead sprites
//! - [`time`] – update simulation time and delta

pub mod events;
pub mod input;
#[cfg(feature = "window")]
pub mod render;
pub mod sprite;
pub mod time;
