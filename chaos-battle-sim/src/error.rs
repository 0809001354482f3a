//! Error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::game::keys::KeyBindingError;

/// Top-level error for building and running a match.
#[derive(Debug, Error)]
pub enum Error {
    /// Key layout could not be generated.
    #[error("key binding error: {0}")]
    KeyBinding(#[from] KeyBindingError),

    /// Tuning configuration was unreadable or invalid.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
