//! Mouse events.
//!
//! All mouse events share a [`MouseInput`] payload. Button numbering follows
//! the usual desktop convention: 1 primary, 2 middle, 3 secondary.
use serde::{Deserialize, Serialize};

use crate::events::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Primary,
    Middle,
    Secondary,
    /// Extra buttons (side, forward, back...), numbered from 4.
    Other(u8),
}

impl MouseButton {
    pub fn number(&self) -> u8 {
        match self {
            MouseButton::Primary => 1,
            MouseButton::Middle => 2,
            MouseButton::Secondary => 3,
            MouseButton::Other(n) => *n,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            0 => None,
            1 => Some(MouseButton::Primary),
            2 => Some(MouseButton::Middle),
            3 => Some(MouseButton::Secondary),
            n => Some(MouseButton::Other(n)),
        }
    }
}

/// Mouse state attached to a mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MouseInput {
    /// The button involved, if any (none for enter/exit/scroll).
    pub button: Option<MouseButton>,
    /// Cursor position in window pixels.
    pub x: f32,
    pub y: f32,
    /// Wheel movement; positive away from the user.
    pub wheel: f32,
}

impl MouseInput {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == Some(MouseButton::Primary)
    }

    pub fn is_secondary(&self) -> bool {
        self.button == Some(MouseButton::Secondary)
    }

    pub fn is_middle(&self) -> bool {
        self.button == Some(MouseButton::Middle)
    }
}

macro_rules! mouse_event {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            pub event: MouseInput,
        }

        impl $name {
            pub fn is_primary(&self) -> bool {
                self.event.is_primary()
            }

            pub fn is_secondary(&self) -> bool {
                self.event.is_secondary()
            }

            pub fn is_middle(&self) -> bool {
                self.event.is_middle()
            }
        }

        impl GameEvent for $name {}
    };
}

mouse_event!(
    /// A mouse button was pressed and released inside the window.
    MouseClickEvent
);
mouse_event!(
    /// A mouse button went down.
    MousePressedEvent
);
mouse_event!(
    /// A mouse button was released.
    MouseReleaseEvent
);
mouse_event!(
    /// The cursor entered the game window.
    MouseEnteredEvent
);
mouse_event!(
    /// The cursor left the game window.
    MouseExitEvent
);
mouse_event!(
    /// The scroll wheel moved.
    MouseScrolledEvent
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_predicates() {
        let click = MouseClickEvent {
            event: MouseInput::at(1.0, 2.0).with_button(MouseButton::Primary),
        };
        assert!(click.is_primary());
        assert!(!click.is_secondary());
        assert!(!click.is_middle());

        let scroll = MouseScrolledEvent {
            event: MouseInput::at(0.0, 0.0),
        };
        assert!(!scroll.is_primary());
    }

    #[test]
    fn test_button_numbering() {
        assert_eq!(MouseButton::from_number(1), Some(MouseButton::Primary));
        assert_eq!(MouseButton::from_number(2), Some(MouseButton::Middle));
        assert_eq!(MouseButton::from_number(3), Some(MouseButton::Secondary));
        assert_eq!(MouseButton::from_number(5), Some(MouseButton::Other(5)));
        assert_eq!(MouseButton::from_number(0), None);
        assert_eq!(MouseButton::Secondary.number(), 3);
    }
}
