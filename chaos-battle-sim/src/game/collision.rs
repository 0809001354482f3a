//! Collision Detection
//!
//! Projectile-versus-player hit tests. Attribution goes through the
//! projectile's owner id: a projectile can only hit its owner's opponent.

use crate::game::state::{MatchState, PlayerState, ProjectileState};

/// Does `projectile` overlap a living `target`?
///
/// Pure predicate; the caller decides what a hit does.
#[inline]
pub fn projectile_hits(projectile: &ProjectileState, target: &PlayerState) -> bool {
    projectile.has_hit(target)
}

/// Result of a projectile-vs-player collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    /// Index into `MatchState::projectiles`
    pub index: usize,
}

/// Find the first projectile (oldest first) that hits its owner's opponent.
pub fn first_projectile_hit(state: &MatchState) -> Option<ProjectileHit> {
    state
        .projectiles
        .iter()
        .position(|p| projectile_hits(p, state.player(p.owner.opponent())))
        .map(|index| ProjectileHit { index })
}
