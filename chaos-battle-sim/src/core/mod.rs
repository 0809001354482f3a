//! Core primitives.
//!
//! Geometry shared by the game modules. Nothing here knows
//! about players or projectiles.

pub mod rect;

// Re-export core types
pub use rect::Rect;
