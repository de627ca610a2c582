//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! title = Ploiu
//! width = 500
//! height = 500
//! fullscreen = false
//! double_buffered = true
//! close_kills_process = true
//! target_fps = 0
//!
//! [events]
//! max_unhandled_ticks = 120
//!
//! [loop]
//! tick_millis = 20
//! ```

use std::path::PathBuf;
use std::time::Duration;

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;

use crate::error::GameError;
use crate::resources::windowflags::WindowFlags;

/// Default safe values for startup
const DEFAULT_WINDOW_TITLE: &str = "Ploiu";
const DEFAULT_WINDOW_WIDTH: u32 = 500;
const DEFAULT_WINDOW_HEIGHT: u32 = 500;
const DEFAULT_TARGET_FPS: u32 = 0;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_DOUBLE_BUFFERED: bool = false;
const DEFAULT_CLOSE_KILLS_PROCESS: bool = false;
const DEFAULT_MAX_UNHANDLED_TICKS: u32 = 120;
const DEFAULT_TICK_MILLIS: u64 = 20;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
///
/// Stores window settings, event housekeeping limits and the loop pace.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window_title: String,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second; 0 leaves the frame rate unlimited.
    pub target_fps: u32,
    pub fullscreen: bool,
    pub double_buffered: bool,
    pub close_kills_process: bool,
    /// Ticks an unhandled event may stay pooled; 0 keeps it forever.
    pub max_unhandled_ticks: u32,
    /// Pause between game loop iterations, in milliseconds.
    pub tick_millis: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            fullscreen: DEFAULT_FULLSCREEN,
            double_buffered: DEFAULT_DOUBLE_BUFFERED,
            close_kills_process: DEFAULT_CLOSE_KILLS_PROCESS,
            max_unhandled_ticks: DEFAULT_MAX_UNHANDLED_TICKS,
            tick_millis: DEFAULT_TICK_MILLIS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), GameError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| GameError::Config(format!("Failed to load config file: {}", e)))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: '{}' {}x{} window, fps={}, flags={:?}, max_unhandled_ticks={}, tick={}ms",
            self.window_title,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.flags(),
            self.max_unhandled_ticks,
            self.tick_millis
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), GameError> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| GameError::Config(format!("Failed to parse config: {}", e)))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(title) = config.get("window", "title") {
            self.window_title = title;
        }
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }
        if let Some(double_buffered) = config.getbool("window", "double_buffered").ok().flatten() {
            self.double_buffered = double_buffered;
        }
        if let Some(kills) = config
            .getbool("window", "close_kills_process")
            .ok()
            .flatten()
        {
            self.close_kills_process = kills;
        }

        // [events] section
        if let Some(max) = config
            .getuint("events", "max_unhandled_ticks")
            .ok()
            .flatten()
        {
            self.max_unhandled_ticks = max as u32;
        }

        // [loop] section
        if let Some(millis) = config.getuint("loop", "tick_millis").ok().flatten() {
            self.tick_millis = millis;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), GameError> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "title", Some(self.window_title.clone()));
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));
        config.set(
            "window",
            "double_buffered",
            Some(self.double_buffered.to_string()),
        );
        config.set(
            "window",
            "close_kills_process",
            Some(self.close_kills_process.to_string()),
        );

        // [events] section
        config.set(
            "events",
            "max_unhandled_ticks",
            Some(self.max_unhandled_ticks.to_string()),
        );

        // [loop] section
        config.set("loop", "tick_millis", Some(self.tick_millis.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| GameError::Config(format!("Failed to save config file: {}", e)))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Window flags equivalent to the boolean settings.
    pub fn flags(&self) -> WindowFlags {
        let mut flags = WindowFlags::NONE;
        if self.fullscreen {
            flags |= WindowFlags::FULL_SCREEN;
        }
        if self.double_buffered {
            flags |= WindowFlags::DOUBLE_BUFFERED;
        }
        if self.close_kills_process {
            flags |= WindowFlags::CLOSE_KILLS_PROCESS;
        }
        flags
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (500, 500));
        assert!(config.flags().is_empty());
        assert_eq!(config.tick_duration(), Duration::from_millis(20));
        assert_eq!(config.max_unhandled_ticks, 120);
    }

    #[test]
    fn test_load_from_str_overrides_present_keys() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[window]\ntitle = Demo\nwidth = 800\ndouble_buffered = true\nclose_kills_process = true\n\n[events]\nmax_unhandled_ticks = 0\n",
            )
            .unwrap();
        assert_eq!(config.window_title, "Demo");
        assert_eq!(config.window_size(), (800, 500));
        assert_eq!(
            config.flags(),
            WindowFlags::DOUBLE_BUFFERED | WindowFlags::CLOSE_KILLS_PROCESS
        );
        assert_eq!(config.max_unhandled_ticks, 0);
        assert_eq!(config.tick_millis, 20);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let mut config = GameConfig::with_path("./definitely/not/here.ini");
        let err = config.load_from_file().unwrap_err();
        assert!(matches!(err, GameError::Config(_)));
        assert_eq!(config.window_width, 500);
    }
}
