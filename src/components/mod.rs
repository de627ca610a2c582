//! ECS components for entities.
//!
//! Submodules overview:
//! - [`sprite`] – optional game entity base: position, size, health, speed,
//!   and image cycling

pub mod sprite;
