//! Per-frame input state and its translation into game events.
//!
//! The window backend fills an [`InputSnapshot`] once per frame. The
//! [`InputTracker`] resource remembers the previous snapshot and turns the
//! difference between the two into keyboard, mouse and window events:
//!
//! | change between frames                  | event posted             |
//! |----------------------------------------|--------------------------|
//! | key not held → held                    | `KeyboardDownEvent`      |
//! | character produced                     | `KeyboardTypeEvent`      |
//! | key held → not held                    | `KeyboardReleaseEvent`   |
//! | cursor outside → inside                | `MouseEnteredEvent`      |
//! | button up → down                       | `MousePressedEvent`      |
//! | button down → up                       | `MouseReleaseEvent`      |
//! | ...and the press started inside        | `MouseClickEvent`        |
//! | wheel moved                            | `MouseScrolledEvent`     |
//! | cursor inside → outside                | `MouseExitEvent`         |
//! | close requested (edge)                 | `GameExitEvent`          |
//!
//! Events are produced in the order of this table.
use std::sync::Arc;

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;
use log::trace;
use smallvec::SmallVec;

use crate::events::GameEvent;
use crate::events::keyboard::{
    KeyCode, KeyInput, KeyboardDownEvent, KeyboardReleaseEvent, KeyboardTypeEvent,
};
use crate::events::mouse::{
    MouseButton, MouseClickEvent, MouseEnteredEvent, MouseExitEvent, MouseInput,
    MousePressedEvent, MouseReleaseEvent, MouseScrolledEvent,
};
use crate::events::window::GameExitEvent;

/// Characters kept per frame; extra typed characters are dropped.
pub const MAX_TYPED_PER_FRAME: usize = 32;

/// Frozen input state for a single frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub keys_down: SmallVec<[KeyCode; 8]>,
    pub typed: ArrayVec<char, MAX_TYPED_PER_FRAME>,
    pub buttons_down: SmallVec<[MouseButton; 3]>,
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub wheel: f32,
    pub cursor_inside: bool,
    pub close_requested: bool,
}

impl InputSnapshot {
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn press_key(&mut self, key: KeyCode) {
        if !self.is_key_down(key) {
            self.keys_down.push(key);
        }
    }

    pub fn press_button(&mut self, button: MouseButton) {
        if !self.is_button_down(button) {
            self.buttons_down.push(button);
        }
    }

    /// Record a typed character. Returns `false` if the frame buffer is full.
    pub fn push_typed(&mut self, ch: char) -> bool {
        self.typed.try_push(ch).is_ok()
    }

    fn mouse(&self) -> MouseInput {
        MouseInput {
            button: None,
            x: self.mouse_x,
            y: self.mouse_y,
            wheel: self.wheel,
        }
    }
}

/// Keys or buttons held across frames, built from press edges.
///
/// A press seen this frame stays held for the whole frame even if the
/// backend already reports it up, so a tap shorter than a frame is still
/// reported as a press followed by a release.
#[derive(Debug, Clone)]
pub struct HeldSet<T> {
    held: SmallVec<[T; 8]>,
}

impl<T> Default for HeldSet<T> {
    fn default() -> Self {
        Self {
            held: SmallVec::new(),
        }
    }
}

impl<T: Copy + PartialEq> HeldSet<T> {
    /// Drop entries no longer down, then add the ones pressed since last frame.
    pub fn update(
        &mut self,
        is_down: impl Fn(T) -> bool,
        pressed: impl IntoIterator<Item = T>,
    ) -> &[T] {
        self.held.retain(|item| is_down(*item));
        for item in pressed {
            if !self.held.contains(&item) {
                self.held.push(item);
            }
        }
        &self.held
    }

    pub fn held(&self) -> &[T] {
        &self.held
    }
}

/// Resource turning consecutive snapshots into game events.
#[derive(Resource, Debug, Default)]
pub struct InputTracker {
    previous: InputSnapshot,
    pressed_inside: SmallVec<[MouseButton; 3]>,
}

impl InputTracker {
    pub fn previous(&self) -> &InputSnapshot {
        &self.previous
    }

    /// Compare `current` with the previous snapshot, remember it, and return
    /// the resulting events in posting order.
    pub fn diff(&mut self, current: InputSnapshot, window_title: &str) -> Vec<Arc<dyn GameEvent>> {
        let mut events: Vec<Arc<dyn GameEvent>> = Vec::new();
        let prev = &self.previous;

        for key in current.keys_down.iter().filter(|k| !prev.is_key_down(**k)) {
            events.push(Arc::new(KeyboardDownEvent {
                key_event: KeyInput::key(*key),
            }));
        }
        for ch in current.typed.iter() {
            events.push(Arc::new(KeyboardTypeEvent {
                key_event: KeyInput::typed(*ch),
            }));
        }
        for key in prev.keys_down.iter().filter(|k| !current.is_key_down(**k)) {
            events.push(Arc::new(KeyboardReleaseEvent {
                key_event: KeyInput::key(*key),
            }));
        }

        let mouse = current.mouse();
        if current.cursor_inside && !prev.cursor_inside {
            events.push(Arc::new(MouseEnteredEvent { event: mouse }));
        }
        for button in current
            .buttons_down
            .iter()
            .filter(|b| !prev.is_button_down(**b))
        {
            events.push(Arc::new(MousePressedEvent {
                event: mouse.with_button(*button),
            }));
            if current.cursor_inside && !self.pressed_inside.contains(button) {
                self.pressed_inside.push(*button);
            }
        }
        for button in prev
            .buttons_down
            .iter()
            .filter(|b| !current.is_button_down(**b))
        {
            events.push(Arc::new(MouseReleaseEvent {
                event: mouse.with_button(*button),
            }));
            if let Some(pos) = self.pressed_inside.iter().position(|b| b == button) {
                self.pressed_inside.remove(pos);
                if current.cursor_inside {
                    events.push(Arc::new(MouseClickEvent {
                        event: mouse.with_button(*button),
                    }));
                }
            }
        }
        if current.wheel != 0.0 {
            events.push(Arc::new(MouseScrolledEvent { event: mouse }));
        }
        if !current.cursor_inside && prev.cursor_inside {
            events.push(Arc::new(MouseExitEvent { event: mouse }));
        }

        if current.close_requested && !prev.close_requested {
            events.push(Arc::new(GameExitEvent {
                window: window_title.to_string(),
            }));
        }

        if !events.is_empty() {
            trace!("Input produced {} event(s)", events.len());
        }
        self.previous = current;
        events
    }
}
