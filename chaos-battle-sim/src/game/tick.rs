//! Simulation Tick
//!
//! One step of the duel. Fixed order: movement, shooting, vertical motion,
//! projectiles and hits. Drawing and scheduling belong to the loop driver.

use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::game::collision::first_projectile_hit;
use crate::game::events::GameEvent;
use crate::game::input::InputFrame;
use crate::game::state::{DamageOutcome, MatchState, PlayerId};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the match ended this tick
    pub match_ended: bool,
    /// Winner (if the match ended with one; `None` on a draw)
    pub winner: Option<PlayerId>,
}

/// Run one simulation tick.
///
/// # Arguments
///
/// * `state` - The match state (will be mutated)
/// * `inputs` - Per-player input for this tick; a missing entry means idle
/// * `now_ms` - Wall-clock time used for the shot cooldown
/// * `config` - Tuning
///
/// Once either player is dead the state is frozen and this returns an empty
/// result.
pub fn tick(
    state: &mut MatchState,
    inputs: &BTreeMap<PlayerId, InputFrame>,
    now_ms: u64,
    config: &GameConfig,
) -> TickResult {
    let mut result = TickResult::default();

    // 0. Frozen once somebody is down
    if state.is_over() {
        return result;
    }

    state.tick += 1;

    // 1. Movement and jumps
    apply_movement(state, inputs, config);

    // 2. Shooting
    apply_shooting(state, inputs, now_ms, config);

    // 3. Vertical motion
    for player in state.players.iter_mut() {
        player.update_position(config.playfield.gravity, config.playfield.ground_y);
    }

    // 4. Projectiles: advance, expire, resolve hits
    update_projectiles(state, config);

    result.events = state.take_events();
    result.match_ended = state.is_over();
    result.winner = state.winner();

    result
}

fn input_for(inputs: &BTreeMap<PlayerId, InputFrame>, id: PlayerId) -> InputFrame {
    inputs.get(&id).copied().unwrap_or_default()
}

/// Apply left/right/jump for each player. All three may apply in one tick.
fn apply_movement(state: &mut MatchState, inputs: &BTreeMap<PlayerId, InputFrame>, config: &GameConfig) {
    let max_x = config.max_player_x();

    for id in PlayerId::ALL {
        let input = input_for(inputs, id);
        let player = state.player_mut(id);

        if input.left() {
            player.move_left();
        }
        if input.right() {
            player.move_right(max_x);
        }
        if input.jump() {
            player.jump(config.player.jump_velocity);
        }
    }
}

/// Fire for every player holding shoot whose cooldown has elapsed.
fn apply_shooting(
    state: &mut MatchState,
    inputs: &BTreeMap<PlayerId, InputFrame>,
    now_ms: u64,
    config: &GameConfig,
) {
    for id in PlayerId::ALL {
        if !input_for(inputs, id).shoot() {
            continue;
        }
        if !state.player_mut(id).try_shoot(now_ms, config.combat.shot_cooldown_ms) {
            continue;
        }

        let projectile_id = state.spawn_projectile(id, config);
        debug!(player = %id, projectile_id, "shot fired");
        let event = GameEvent::shot_fired(state.tick, id, projectile_id);
        state.push_event(event);
    }
}

/// Advance projectiles, drop the ones that left the field, then resolve hits
/// oldest first. Every projectile touching a living opponent lands, so both
/// players can go down in the same tick.
fn update_projectiles(state: &mut MatchState, config: &GameConfig) {
    for projectile in state.projectiles.iter_mut() {
        projectile.advance();
    }

    let width = config.playfield.width;
    let mut expired = Vec::new();
    state.projectiles.retain(|p| {
        let off = p.is_off_screen(width);
        if off {
            expired.push((p.owner, p.id));
        }
        !off
    });
    for (owner, projectile_id) in expired {
        let event = GameEvent::projectile_expired(state.tick, owner, projectile_id);
        state.push_event(event);
    }

    while let Some(hit) = first_projectile_hit(state) {
        let projectile = state.projectiles.remove(hit.index);
        let attacker = projectile.owner;
        let victim = attacker.opponent();

        match state.apply_hit(victim, attacker, config.combat.damage_per_hit) {
            DamageOutcome::Wounded { health } => {
                debug!(victim = %victim, attacker = %attacker, health, "player hit");
                let event = GameEvent::player_hit(state.tick, victim, attacker, projectile.id, health);
                state.push_event(event);
            }
            DamageOutcome::Defeated => {
                info!(victim = %victim, attacker = %attacker, tick = state.tick, "player defeated");
            }
            DamageOutcome::Ignored => {}
        }
    }
}
