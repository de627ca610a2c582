//! The window everything in the game is displayed in.
//!
//! [`GameWindow`] owns the raylib handle and thread token. It lives in the ECS
//! world as a non-send resource, inserted by
//! [`Game::init_game_window`](crate::game::Game::init_game_window).
use log::info;
use raylib::consts::MouseButton as RlMouseButton;
use raylib::prelude::*;

use crate::events::keyboard::KeyCode;
use crate::events::mouse::MouseButton;
use crate::resources::input::{HeldSet, InputSnapshot};
use crate::resources::windowflags::WindowFlags;

fn mouse_button(raw: RlMouseButton) -> MouseButton {
    match raw {
        RlMouseButton::MOUSE_BUTTON_RIGHT => MouseButton::Secondary,
        RlMouseButton::MOUSE_BUTTON_MIDDLE => MouseButton::Middle,
        _ => MouseButton::Primary,
    }
}

pub struct GameWindow {
    rl: RaylibHandle,
    thread: RaylibThread,
    title: String,
    flags: WindowFlags,
    held_keys: HeldSet<KeyboardKey>,
    held_buttons: HeldSet<RlMouseButton>,
}

impl GameWindow {
    /// Open a window. `target_fps` of 0 leaves the frame rate unlimited.
    pub fn open(title: &str, width: i32, height: i32, flags: WindowFlags, target_fps: u32) -> Self {
        let mut builder = raylib::init();
        builder.size(width, height).title(title).resizable();
        if flags.contains(WindowFlags::DOUBLE_BUFFERED) {
            builder.vsync();
        }
        if flags.contains(WindowFlags::FULL_SCREEN) {
            builder.fullscreen().undecorated();
        }
        let (mut rl, thread) = builder.build();
        rl.set_target_fps(target_fps);
        // Closing is reported as an event; ESC must not close on its own.
        rl.set_exit_key(None);
        info!(
            "Opened window '{}' {}x{} with {:?}",
            title, width, height, flags
        );
        Self {
            rl,
            thread,
            title: title.to_string(),
            flags,
            held_keys: HeldSet::default(),
            held_buttons: HeldSet::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    /// Current size in pixels; follows user resizes.
    pub fn size(&self) -> (i32, i32) {
        (self.rl.get_screen_width(), self.rl.get_screen_height())
    }

    pub fn set_full_screen(&mut self) {
        if !self.rl.is_window_fullscreen() {
            self.rl.toggle_fullscreen();
        }
        self.flags |= WindowFlags::FULL_SCREEN;
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut RaylibHandle, &RaylibThread) {
        (&mut self.rl, &self.thread)
    }

    /// Read this frame's keyboard, mouse and window state.
    pub fn snapshot_input(&mut self) -> InputSnapshot {
        let mut snapshot = InputSnapshot::default();

        let rl = &mut self.rl;
        let mut pressed_keys = Vec::new();
        while let Some(key) = rl.get_key_pressed() {
            pressed_keys.push(key);
        }
        for key in self.held_keys.update(|k| rl.is_key_down(k), pressed_keys) {
            snapshot.press_key(KeyCode(*key as i32));
        }
        while let Some(ch) = rl.get_char_pressed() {
            snapshot.push_typed(ch);
        }

        let buttons = [
            RlMouseButton::MOUSE_BUTTON_LEFT,
            RlMouseButton::MOUSE_BUTTON_MIDDLE,
            RlMouseButton::MOUSE_BUTTON_RIGHT,
        ];
        let pressed_buttons = buttons
            .into_iter()
            .filter(|b| rl.is_mouse_button_pressed(*b));
        for raw in self
            .held_buttons
            .update(|b| rl.is_mouse_button_down(b), pressed_buttons)
        {
            snapshot.press_button(mouse_button(*raw));
        }
        let pos = self.rl.get_mouse_position();
        snapshot.mouse_x = pos.x;
        snapshot.mouse_y = pos.y;
        snapshot.wheel = self.rl.get_mouse_wheel_move();
        snapshot.cursor_inside = self.rl.is_cursor_on_screen();
        snapshot.close_requested = self.rl.window_should_close();
        snapshot
    }
}
