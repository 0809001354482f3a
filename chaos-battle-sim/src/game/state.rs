//! Game State Definitions
//!
//! Players, projectiles, and the match context that owns them.
//! Nothing here is global: the loop driver owns a [`MatchState`] and hands
//! it to the tick function.

use std::fmt;
use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::core::rect::Rect;
use crate::game::events::GameEvent;

// =============================================================================
// PLAYER ID
// =============================================================================

/// Stable player identifier.
///
/// Implements Ord so per-player work runs in a fixed order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Left-side player
    pub const ONE: Self = Self(0);
    /// Right-side player
    pub const TWO: Self = Self(1);
    /// Both players in id order
    pub const ALL: [Self; 2] = [Self::ONE, Self::TWO];

    /// Index into per-player arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[inline]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

// =============================================================================
// PLAYER COLOR / FACING
// =============================================================================

/// Color identity of a player and everything it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    /// Player one
    Blue,
    /// Player two
    Red,
}

impl PlayerColor {
    /// Default color for a player slot.
    pub const fn for_player(id: PlayerId) -> Self {
        match id.index() {
            0 => PlayerColor::Blue,
            _ => PlayerColor::Red,
        }
    }

    /// Lower-case color name.
    pub const fn name(self) -> &'static str {
        match self {
            PlayerColor::Blue => "blue",
            PlayerColor::Red => "red",
        }
    }
}

/// Horizontal facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Toward x = 0
    Left,
    /// Toward x = width
    Right,
}

impl Facing {
    /// -1 for left, +1 for right.
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Default facing for a player slot (toward the opponent).
    pub const fn for_player(id: PlayerId) -> Self {
        match id.index() {
            0 => Facing::Right,
            _ => Facing::Left,
        }
    }
}

// =============================================================================
// PLAYER STATE
// =============================================================================

/// Result of applying one hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed
    Ignored,
    /// Target survived with the given health
    Wounded {
        /// Health left
        health: u32,
    },
    /// This hit took the target from alive to dead
    Defeated,
}

/// State of a single player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Stable identifier
    pub id: PlayerId,
    /// Color identity
    pub color: PlayerColor,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Body width
    pub width: f32,
    /// Body height
    pub height: f32,
    /// Horizontal step per tick
    pub speed: f32,
    /// Current health (0..=max)
    pub health: u32,
    /// Vertical velocity (negative is up)
    pub vel_y: f32,
    /// Mid-jump?
    pub airborne: bool,
    /// Last horizontal movement direction
    pub facing: Facing,
    /// Reached zero health
    pub dead: bool,
    /// Time of the last successful shot
    pub last_shot_ms: Option<u64>,
}

impl PlayerState {
    /// Create a grounded player at full health.
    pub fn new(id: PlayerId, x: f32, config: &GameConfig) -> Self {
        let tuning = &config.player;
        Self {
            id,
            color: PlayerColor::for_player(id),
            x,
            y: config.playfield.ground_y,
            width: tuning.width,
            height: tuning.height,
            speed: tuning.speed,
            health: tuning.max_health,
            vel_y: 0.0,
            airborne: false,
            facing: Facing::for_player(id),
            dead: false,
            last_shot_ms: None,
        }
    }

    /// Step left, clamped at x = 0.
    pub fn move_left(&mut self) {
        if self.dead {
            return;
        }
        self.x = (self.x - self.speed).max(0.0);
        self.facing = Facing::Left;
    }

    /// Step right, clamped at `max_x`.
    pub fn move_right(&mut self, max_x: f32) {
        if self.dead {
            return;
        }
        self.x = (self.x + self.speed).min(max_x);
        self.facing = Facing::Right;
    }

    /// Start a jump if grounded.
    pub fn jump(&mut self, jump_velocity: f32) {
        if self.dead || self.airborne {
            return;
        }
        self.vel_y = jump_velocity;
        self.airborne = true;
    }

    /// Integrate one tick of vertical motion.
    ///
    /// Position first, then velocity (explicit Euler). Landing snaps to the
    /// ground line and clears the velocity.
    pub fn update_position(&mut self, gravity: f32, ground_y: f32) {
        if self.dead {
            return;
        }
        self.y += self.vel_y;
        self.vel_y += gravity;
        if self.y >= ground_y {
            self.y = ground_y;
            self.vel_y = 0.0;
            self.airborne = false;
        }
    }

    /// Apply one hit of `amount` damage.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.dead = true;
            DamageOutcome::Defeated
        } else {
            DamageOutcome::Wounded { health: self.health }
        }
    }

    /// Rate-limited trigger pull.
    ///
    /// Returns true (and records the time) if the player may fire now: alive,
    /// and either no previous shot or more than `cooldown_ms` since it.
    pub fn try_shoot(&mut self, now_ms: u64, cooldown_ms: u64) -> bool {
        if self.dead {
            return false;
        }
        let ready = match self.last_shot_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > cooldown_ms,
        };
        if ready {
            self.last_shot_ms = Some(now_ms);
        }
        ready
    }

    /// Bounding box.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Still in the fight?
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }
}

// =============================================================================
// PROJECTILE STATE
// =============================================================================

/// A projectile in flight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    /// Monotonic id
    pub id: u32,
    /// Who fired it (attribution only)
    pub owner: PlayerId,
    /// Inherited from the shooter
    pub color: PlayerColor,
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Signed horizontal speed per tick
    pub velocity_x: f32,
}

impl ProjectileState {
    /// Spawn at the shooter's muzzle, flying the way the shooter faces.
    pub fn fired_by(id: u32, shooter: &PlayerState, config: &GameConfig) -> Self {
        let tuning = &config.projectile;
        let x = match shooter.facing {
            Facing::Right => shooter.x + shooter.width,
            Facing::Left => shooter.x - tuning.width,
        };
        Self {
            id,
            owner: shooter.id,
            color: shooter.color,
            x,
            y: shooter.y + tuning.muzzle_offset_y,
            width: tuning.width,
            height: tuning.height,
            velocity_x: tuning.speed * shooter.facing.sign(),
        }
    }

    /// Advance one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.x += self.velocity_x;
    }

    /// Past either side edge of a playfield `width` wide.
    #[inline]
    pub fn is_off_screen(&self, width: f32) -> bool {
        self.x < 0.0 || self.x > width
    }

    /// Bounding box.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Strict overlap with a living `target`.
    #[inline]
    pub fn has_hit(&self, target: &PlayerState) -> bool {
        target.is_alive() && self.bounds().overlaps(&target.bounds())
    }
}

// =============================================================================
// MATCH PHASE
// =============================================================================

/// Current phase of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum MatchPhase {
    /// Both players alive
    #[default]
    Playing,
    /// One player reached zero health
    Ended {
        /// Player who landed the final hit
        winner: PlayerId,
    },
    /// Both players went down in the same tick
    Draw,
}

// =============================================================================
// MATCH STATE
// =============================================================================

/// Complete state of a match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchState {
    /// Ticks simulated so far
    pub tick: u32,

    /// Current match phase
    pub phase: MatchPhase,

    /// Both players, indexed by `PlayerId::index`
    pub players: [PlayerState; 2],

    /// Projectiles in flight, oldest first
    pub projectiles: Vec<ProjectileState>,

    /// Next projectile id (monotonic counter)
    pub next_projectile_id: u32,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl MatchState {
    /// Fresh match: both players grounded at their spawn points.
    pub fn new(config: &GameConfig) -> Self {
        let spawn = config.player.spawn_x;
        Self {
            tick: 0,
            phase: MatchPhase::Playing,
            players: [
                PlayerState::new(PlayerId::ONE, spawn[0], config),
                PlayerState::new(PlayerId::TWO, spawn[1], config),
            ],
            projectiles: Vec::new(),
            next_projectile_id: 0,
            pending_events: Vec::new(),
        }
    }

    /// Get a player by ID.
    #[inline]
    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    /// Get a player mutably by ID.
    #[inline]
    pub fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id.index()]
    }

    /// Either player dead?
    pub fn is_over(&self) -> bool {
        self.players.iter().any(|p| p.dead)
    }

    /// Winner, once the match has ended.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            MatchPhase::Ended { winner } => Some(winner),
            MatchPhase::Playing | MatchPhase::Draw => None,
        }
    }

    /// End-of-game text, e.g. `RED Player WINS!`, or `DRAW!` after a double
    /// knockout.
    pub fn winner_announcement(&self) -> Option<String> {
        match self.phase {
            MatchPhase::Playing => None,
            MatchPhase::Draw => Some("DRAW!".to_string()),
            MatchPhase::Ended { winner } => {
                let color = self.player(winner).color.name().to_uppercase();
                Some(format!("{} Player WINS!", color))
            }
        }
    }

    /// Put a new projectile in flight from `owner`'s muzzle.
    pub fn spawn_projectile(&mut self, owner: PlayerId, config: &GameConfig) -> u32 {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        let projectile = ProjectileState::fired_by(id, self.player(owner), config);
        self.projectiles.push(projectile);
        id
    }

    /// Apply one hit on `victim` credited to `attacker`.
    ///
    /// The alive→dead transition ends the match with `attacker` as winner,
    /// unless the attacker is already down too, which makes it a draw. Each
    /// player can be defeated once because dead players ignore damage.
    pub fn apply_hit(&mut self, victim: PlayerId, attacker: PlayerId, amount: u32) -> DamageOutcome {
        let outcome = self.player_mut(victim).take_damage(amount);
        if outcome == DamageOutcome::Defeated {
            self.phase = match self.phase {
                MatchPhase::Playing => MatchPhase::Ended { winner: attacker },
                MatchPhase::Ended { .. } | MatchPhase::Draw => MatchPhase::Draw,
            };
            self.push_event(GameEvent::player_defeated(self.tick, victim, attacker));
        }
        outcome
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player(id: PlayerId) -> PlayerState {
        let config = GameConfig::default();
        PlayerState::new(id, config.player.spawn_x[id.index()], &config)
    }

    #[test]
    fn test_player_id_ordering() {
        assert!(PlayerId::ONE < PlayerId::TWO);
        assert_eq!(PlayerId::ONE.opponent(), PlayerId::TWO);
        assert_eq!(PlayerId::TWO.opponent(), PlayerId::ONE);
        assert_eq!(PlayerId::TWO.to_string(), "P2");
    }

    #[test]
    fn test_spawn_layout() {
        let state = MatchState::new(&GameConfig::default());
        let (p1, p2) = (state.player(PlayerId::ONE), state.player(PlayerId::TWO));

        assert_eq!((p1.x, p1.y, p1.facing, p1.color), (100.0, 300.0, Facing::Right, PlayerColor::Blue));
        assert_eq!((p2.x, p2.y, p2.facing, p2.color), (600.0, 300.0, Facing::Left, PlayerColor::Red));
        assert_eq!(p1.health, 100);
        assert!(!state.is_over());
    }

    #[test]
    fn test_move_clamps_and_faces() {
        let mut p = player(PlayerId::ONE);
        p.x = 2.0;
        p.move_left();
        assert_eq!(p.x, 0.0);
        assert_eq!(p.facing, Facing::Left);

        p.x = 758.0;
        p.move_right(760.0);
        assert_eq!(p.x, 760.0);
        assert_eq!(p.facing, Facing::Right);
    }

    #[test]
    fn test_jump_arc_lands() {
        let mut p = player(PlayerId::ONE);
        p.jump(-10.0);
        assert!(p.airborne);
        assert_eq!(p.vel_y, -10.0);

        // Second jump mid-air is ignored
        p.update_position(0.5, 300.0);
        p.jump(-10.0);
        assert_eq!(p.vel_y, -9.5);
        assert_eq!(p.y, 290.0);

        let mut ticks = 1;
        while p.airborne {
            p.update_position(0.5, 300.0);
            assert!(p.y <= 300.0);
            ticks += 1;
            assert!(ticks < 100, "jump never landed");
        }
        assert_eq!(p.y, 300.0);
        assert_eq!(p.vel_y, 0.0);
        // -10 + 0.5t sums back to zero after 41 ticks
        assert_eq!(ticks, 41);
    }

    #[test]
    fn test_take_damage_steps() {
        let mut p = player(PlayerId::ONE);
        for expected in [80, 60, 40, 20] {
            assert_eq!(p.take_damage(20), DamageOutcome::Wounded { health: expected });
        }
        assert_eq!(p.take_damage(20), DamageOutcome::Defeated);
        assert_eq!(p.health, 0);
        assert!(p.dead);
        assert_eq!(p.take_damage(20), DamageOutcome::Ignored);
        assert_eq!(p.health, 0);
    }

    #[test]
    fn test_shot_cooldown() {
        let mut p = player(PlayerId::ONE);
        assert!(p.try_shoot(1_000, 500));
        assert!(!p.try_shoot(1_100, 500));
        assert!(!p.try_shoot(1_500, 500));
        assert!(p.try_shoot(1_600, 500));
        assert_eq!(p.last_shot_ms, Some(1_600));
    }

    #[test]
    fn test_first_shot_at_time_zero() {
        let mut p = player(PlayerId::ONE);
        assert!(p.try_shoot(0, 500));
        assert!(!p.try_shoot(400, 500));
    }

    #[test]
    fn test_dead_player_is_frozen() {
        let mut p = player(PlayerId::TWO);
        p.health = 20;
        assert_eq!(p.take_damage(20), DamageOutcome::Defeated);
        let before = p.clone();

        p.move_left();
        p.move_right(760.0);
        p.jump(-10.0);
        p.update_position(0.5, 300.0);
        assert!(!p.try_shoot(10_000, 500));
        assert_eq!(p.take_damage(20), DamageOutcome::Ignored);

        assert_eq!(p, before);
    }

    #[test]
    fn test_projectile_muzzle() {
        let config = GameConfig::default();
        let p1 = player(PlayerId::ONE);
        let right = ProjectileState::fired_by(0, &p1, &config);
        assert_eq!((right.x, right.y, right.velocity_x), (140.0, 315.0, 8.0));
        assert_eq!(right.owner, PlayerId::ONE);
        assert_eq!(right.color, PlayerColor::Blue);

        let p2 = player(PlayerId::TWO);
        let left = ProjectileState::fired_by(1, &p2, &config);
        assert_eq!((left.x, left.velocity_x), (590.0, -8.0));
    }

    #[test]
    fn test_apply_hit_ends_match_once() {
        let config = GameConfig::default();
        let mut state = MatchState::new(&config);
        state.player_mut(PlayerId::ONE).health = 20;

        assert_eq!(state.apply_hit(PlayerId::ONE, PlayerId::TWO, 20), DamageOutcome::Defeated);
        assert_eq!(state.winner(), Some(PlayerId::TWO));
        assert_eq!(state.winner_announcement().as_deref(), Some("RED Player WINS!"));

        assert_eq!(state.apply_hit(PlayerId::ONE, PlayerId::TWO, 20), DamageOutcome::Ignored);
        assert_eq!(state.take_events().len(), 1);
    }

    #[test]
    fn test_second_defeat_is_a_draw() {
        let config = GameConfig::default();
        let mut state = MatchState::new(&config);
        state.player_mut(PlayerId::ONE).health = 20;
        state.player_mut(PlayerId::TWO).health = 20;

        state.apply_hit(PlayerId::TWO, PlayerId::ONE, 20);
        assert_eq!(state.winner(), Some(PlayerId::ONE));

        assert_eq!(state.apply_hit(PlayerId::ONE, PlayerId::TWO, 20), DamageOutcome::Defeated);
        assert_eq!(state.phase, MatchPhase::Draw);
        assert_eq!(state.winner(), None);
        assert_eq!(state.winner_announcement().as_deref(), Some("DRAW!"));
        assert_eq!(state.take_events().iter().filter(|e| e.is_defeat()).count(), 2);
    }

    proptest! {
        #[test]
        fn prop_x_stays_on_field(start in 0.0f32..=760.0, moves in prop::collection::vec(any::<bool>(), 0..400)) {
            let mut p = player(PlayerId::ONE);
            p.x = start;
            for right in moves {
                if right { p.move_right(760.0) } else { p.move_left() }
                prop_assert!(p.x >= 0.0 && p.x <= 760.0);
            }
        }

        #[test]
        fn prop_health_steps_of_twenty(hits in 0usize..20) {
            let mut p = player(PlayerId::ONE);
            let mut last = p.health;
            for _ in 0..hits {
                p.take_damage(20);
                prop_assert!(p.health <= 100);
                prop_assert!(last - p.health == 20 || (p.dead && last == p.health));
                prop_assert_eq!(p.health % 20, 0);
                last = p.health;
            }
            prop_assert_eq!(p.dead, hits >= 5);
        }
    }
}
