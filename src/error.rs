//! Library error types.
//!
//! Registration problems come in two flavours: recoverable ones (a dynamic
//! handler was refused, the game can carry on) and terminal ones (a static
//! subscription table is malformed, the game must not start). Use
//! [`GameError::is_terminal`] to tell them apart.

use thiserror::Error;

/// Errors raised by the game library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A library type was used in a way it does not support.
    #[error("You're using a library class incorrectly: {0}")]
    InvalidUseOfLibrary(String),

    /// A dynamic event handler was rejected. The game may continue.
    #[error("Invalid event handler: {0}")]
    InvalidEventHandler(String),

    /// A static event handler is malformed. Must not be ignored.
    #[error("Invalid event handler: {0}")]
    TerminalInvalidEventHandler(String),

    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An asset (texture, image...) could not be loaded.
    #[error("Asset error: {0}")]
    Asset(String),
}

impl GameError {
    /// Whether the error leaves the game in a state it cannot run from.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GameError::InvalidUseOfLibrary(_) | GameError::TerminalInvalidEventHandler(_)
        )
    }
}
