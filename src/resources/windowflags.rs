//! Options applied when the game window is created.
//!
//! Flags are combined with `|` and passed as a single value, keeping
//! [`Game::init_game_window`](crate::game::Game) free of a long parameter list.
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowFlags(u8);

impl WindowFlags {
    pub const NONE: WindowFlags = WindowFlags(0);
    /// Cover the whole screen, without decorations.
    pub const FULL_SCREEN: WindowFlags = WindowFlags(0b0000_0001);
    /// Present frames in sync with the display.
    pub const DOUBLE_BUFFERED: WindowFlags = WindowFlags(0b0000_0010);
    /// Stop the game loop as soon as the window is asked to close.
    pub const CLOSE_KILLS_PROCESS: WindowFlags = WindowFlags(0b0000_0100);

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn from_bits(bits: u8) -> Self {
        WindowFlags(bits & 0b0000_0111)
    }

    pub fn contains(&self, other: WindowFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitOr for WindowFlags {
    type Output = WindowFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        WindowFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for WindowFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for WindowFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(WindowFlags::FULL_SCREEN) {
            names.push("FULL_SCREEN");
        }
        if self.contains(WindowFlags::DOUBLE_BUFFERED) {
            names.push("DOUBLE_BUFFERED");
        }
        if self.contains(WindowFlags::CLOSE_KILLS_PROCESS) {
            names.push("CLOSE_KILLS_PROCESS");
        }
        write!(f, "WindowFlags({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_combine() {
        let flags = WindowFlags::DOUBLE_BUFFERED | WindowFlags::CLOSE_KILLS_PROCESS;
        assert!(flags.contains(WindowFlags::DOUBLE_BUFFERED));
        assert!(flags.contains(WindowFlags::CLOSE_KILLS_PROCESS));
        assert!(!flags.contains(WindowFlags::FULL_SCREEN));
        assert_eq!(flags.bits(), 0b110);
    }

    #[test]
    fn test_from_bits_ignores_unknown() {
        assert_eq!(WindowFlags::from_bits(0xff).bits(), 0b111);
        assert!(WindowFlags::from_bits(0).is_empty());
        assert!(WindowFlags::NONE.contains(WindowFlags::NONE));
    }

    #[test]
    fn test_debug_lists_names() {
        let flags = WindowFlags::FULL_SCREEN | WindowFlags::DOUBLE_BUFFERED;
        assert_eq!(format!("{:?}", flags), "WindowFlags(FULL_SCREEN | DOUBLE_BUFFERED)");
    }
}
