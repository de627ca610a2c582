//! Ploiu: a small event-driven 2D game library.
//!
//! Games post events into a pool held by an ECS world; handlers bound to
//! concrete event types run when the pool is processed. Handlers are either
//! static (plain functions tagged with a [`SubscribeEvent`] or
//! [`EventHandler`] marker) or dynamic (closures registered at runtime).
//!
//! - [`components`] – ECS components (sprites)
//! - [`error`] – library error type
//! - [`events`] – the event trait, markers, handlers and built-in events
//! - [`game`] – the [`Game`](game::Game) facade owning the world
//! - [`resources`] – event pool, handler registry, config, input, window
//! - [`systems`] – dispatch, input, sprite, time and render systems
//!
//! [`SubscribeEvent`]: events::annotation::SubscribeEvent
//! [`EventHandler`]: events::annotation::EventHandler

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
