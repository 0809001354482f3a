//! # Chaos Keyboard Battle
//!
//! Two-player local duel on one keyboard. Each match deals every player four
//! random letter keys; players run, jump and shoot until one of them drops.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CHAOS BATTLE SIM                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  └── rect.rs     - Axis-aligned boxes, overlap test          │
//! │                                                              │
//! │  game/           - Game logic                                │
//! │  ├── keys.rs     - Random key layout per match               │
//! │  ├── input.rs    - Key capture and normalization             │
//! │  ├── state.rs    - Match, player and projectile state        │
//! │  ├── tick.rs     - One simulation step                       │
//! │  ├── collision.rs- Projectile hit tests                      │
//! │  └── events.rs   - Events emitted by a tick                  │
//! │                                                              │
//! │  render.rs       - Surface trait, frame drawing              │
//! │  driver.rs       - Frame loop and game-over halting          │
//! │  config.rs       - Tuning file and launch options            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Given the same seed, the same key events and the same frame timestamps, a
//! match plays out identically. The only randomness is the key layout, drawn
//! from a `StdRng` seeded by the caller; the clock is passed in too.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod game;
pub mod render;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig, LaunchOptions};
pub use core::rect::Rect;
pub use driver::{FrameStatus, MatchDriver};
pub use error::{Error, Result};
pub use game::input::{normalize_key, InputFrame, KeyEvent, KeyTransition};
pub use game::keys::{KeyBindingError, KeyBindings};
pub use game::state::{MatchState, PlayerColor, PlayerId};
pub use render::{draw_match, RecordingSurface, Surface};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nominal display refresh rate (Hz) used by the headless runner
pub const FRAME_RATE: u32 = 60;
