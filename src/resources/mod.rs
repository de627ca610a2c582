//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems and event handlers: the event pool and handler
//! registry, input tracking, timing, drawing and window handles.
//!
//! Overview
//! - `canvas` – retained draw commands replayed every frame
//! - `eventpool` – events waiting for dispatch, plus a cross-thread sender
//! - `eventregistry` – static and dynamic handlers keyed by event type
//! - `gameconfig` – INI-backed configuration
//! - `gamewindow` – the raylib window (non-send, `window` feature)
//! - `input` – input snapshots and their translation into events
//! - `runstate` – whether the game loop keeps going
//! - `texturestore` – loaded textures keyed by string IDs (`window` feature)
//! - `windowflags` – bit flags describing window behaviour
//! - `worldtime` – simulation time and delta
pub mod canvas;
pub mod eventpool;
pub mod eventregistry;
pub mod gameconfig;
#[cfg(feature = "window")]
pub mod gamewindow;
pub mod input;
pub mod runstate;
#[cfg(feature = "window")]
pub mod texturestore;
pub mod windowflags;
pub mod worldtime;
