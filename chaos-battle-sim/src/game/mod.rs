//! Game Logic Module
//!
//! Everything that decides what happens in a match. No drawing, no clocks,
//! no scheduling; time comes in as a plain millisecond value.
//!
//! ## Module Structure
//!
//! - `keys`: Per-match random key layout
//! - `input`: Key capture, normalization, per-tick input frames
//! - `state`: Match, player and projectile state
//! - `tick`: One simulation step
//! - `collision`: Projectile hit tests
//! - `events`: Game events emitted by a tick

pub mod collision;
pub mod events;
pub mod input;
pub mod keys;
pub mod state;
pub mod tick;

// Re-export key types
pub use events::{GameEvent, GameEventData};
pub use input::{InputFrame, InputState, KeyEvent, KeyTransition};
pub use keys::{Action, KeyBindingError, KeyBindings};
pub use state::{Facing, MatchPhase, MatchState, PlayerColor, PlayerId, PlayerState, ProjectileState};
pub use tick::{tick, TickResult};
