//! Game Events
//!
//! What happened during a tick, in the order it happened. The driver logs
//! them and frontends may react to them (sounds, flashes, status text).

use serde::{Serialize, Deserialize};
use crate::game::state::PlayerId;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// Player fired a projectile
    ShotFired {
        player_id: PlayerId,
        projectile_id: u32,
    },

    /// Projectile struck the opponent, who survived
    PlayerHit {
        victim_id: PlayerId,
        attacker_id: PlayerId,
        projectile_id: u32,
        health: u32,
    },

    /// Player reached zero health; the match is over
    PlayerDefeated {
        victim_id: PlayerId,
        attacker_id: PlayerId,
    },

    /// Projectile left the playfield without hitting anything
    ProjectileExpired {
        owner_id: PlayerId,
        projectile_id: u32,
    },
}

/// A game event with timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when event occurred
    pub tick: u32,

    /// Player the event is about
    pub player_id: PlayerId,

    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        let player_id = match &data {
            GameEventData::ShotFired { player_id, .. } => *player_id,
            GameEventData::PlayerHit { victim_id, .. } => *victim_id,
            GameEventData::PlayerDefeated { victim_id, .. } => *victim_id,
            GameEventData::ProjectileExpired { owner_id, .. } => *owner_id,
        };

        Self { tick, player_id, data }
    }

    /// Create shot fired event.
    pub fn shot_fired(tick: u32, player_id: PlayerId, projectile_id: u32) -> Self {
        Self::new(tick, GameEventData::ShotFired { player_id, projectile_id })
    }

    /// Create player hit event.
    pub fn player_hit(
        tick: u32,
        victim_id: PlayerId,
        attacker_id: PlayerId,
        projectile_id: u32,
        health: u32,
    ) -> Self {
        Self::new(
            tick,
            GameEventData::PlayerHit {
                victim_id,
                attacker_id,
                projectile_id,
                health,
            },
        )
    }

    /// Create player defeated event.
    pub fn player_defeated(tick: u32, victim_id: PlayerId, attacker_id: PlayerId) -> Self {
        Self::new(tick, GameEventData::PlayerDefeated { victim_id, attacker_id })
    }

    /// Create projectile expired event.
    pub fn projectile_expired(tick: u32, owner_id: PlayerId, projectile_id: u32) -> Self {
        Self::new(tick, GameEventData::ProjectileExpired { owner_id, projectile_id })
    }

    /// Did this event end the match?
    pub fn is_defeat(&self) -> bool {
        matches!(self.data, GameEventData::PlayerDefeated { .. })
    }
}
