//! Keyboard events.
//!
//! Posted by the input tracker when the window backend reports key
//! transitions. Key codes are backend values wrapped in [`KeyCode`]; with the
//! raylib backend they are raylib's `KeyboardKey` values.
use serde::{Deserialize, Serialize};

use crate::events::GameEvent;

/// A physical key, as numbered by the window backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const ESCAPE: KeyCode = KeyCode(256);
    pub const ENTER: KeyCode = KeyCode(257);
    pub const SPACE: KeyCode = KeyCode(32);
    pub const UP: KeyCode = KeyCode(265);
    pub const DOWN: KeyCode = KeyCode(264);
    pub const LEFT: KeyCode = KeyCode(263);
    pub const RIGHT: KeyCode = KeyCode(262);
}

/// Key data carried by every keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: KeyCode,
    /// The character produced, for typed events.
    pub ch: Option<char>,
}

impl KeyInput {
    pub fn key(key: KeyCode) -> Self {
        Self { key, ch: None }
    }

    pub fn typed(ch: char) -> Self {
        Self {
            key: KeyCode(ch as i32),
            ch: Some(ch),
        }
    }
}

/// The player pressed and released a key that produces a character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardTypeEvent {
    pub key_event: KeyInput,
}

impl GameEvent for KeyboardTypeEvent {}

/// The player is holding a key down and has not released it yet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardDownEvent {
    pub key_event: KeyInput,
}

impl GameEvent for KeyboardDownEvent {}

/// The player released a key they were holding down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyboardReleaseEvent {
    pub key_event: KeyInput,
}

impl GameEvent for KeyboardReleaseEvent {}
