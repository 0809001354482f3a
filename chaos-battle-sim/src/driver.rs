//! Loop Driver
//!
//! [`MatchDriver`] owns everything one match needs: tuning, key layout, held
//! keys and the match context. The frontend calls [`MatchDriver::frame`] once
//! per display refresh; the driver alone decides whether a frame steps and
//! draws, or halts because the match is over.
//!
//! Restarting means dropping the driver and building a new one.

use std::collections::BTreeMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::error::Result;
use crate::game::events::GameEvent;
use crate::game::input::{InputFrame, InputState, KeyEvent};
use crate::game::keys::{generate_pair, KeyBindings};
use crate::game::state::{MatchState, PlayerId};
use crate::game::tick::tick;
use crate::render::{draw_match, Surface};

/// What a call to [`MatchDriver::frame`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// Stepped and drew; keep scheduling frames
    Running,
    /// Stepped and drew the frame in which a player died
    Finished {
        /// Player still standing; `None` when both went down together
        winner: Option<PlayerId>,
    },
    /// Match already over; nothing stepped, nothing drawn
    Halted,
}

/// Owner of a single match from first frame to final frame.
#[derive(Debug)]
pub struct MatchDriver {
    config: GameConfig,
    seed: u64,
    bindings: [KeyBindings; 2],
    input: InputState,
    state: MatchState,
    last_events: Vec<GameEvent>,
}

impl MatchDriver {
    /// Build a fresh match. `seed` picks the key layout.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let bindings = generate_pair(&mut rng)?;
        let state = MatchState::new(&config);

        info!(seed, p1 = %bindings[0], p2 = %bindings[1], "match ready");

        Ok(Self {
            config,
            seed,
            bindings,
            input: InputState::new(),
            state,
            last_events: Vec::new(),
        })
    }

    /// Tuning in use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed the key layout was drawn from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Key layout for `player`.
    pub fn bindings(&self, player: PlayerId) -> &KeyBindings {
        &self.bindings[player.index()]
    }

    /// Current match context.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Events from the most recent step.
    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    /// Key went down. Touches input only.
    pub fn key_down(&mut self, key: char) {
        self.input.press(key);
    }

    /// Key came up. Touches input only.
    pub fn key_up(&mut self, key: char) {
        self.input.release(key);
    }

    /// Apply a normalized key event. Touches input only.
    pub fn handle_key(&mut self, event: KeyEvent) {
        self.input.apply(event);
    }

    /// Drop every held key.
    pub fn release_all(&mut self) {
        self.input.clear();
    }

    /// Either player dead?
    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    /// Run one frame: step the simulation and draw it, unless the match is
    /// already over. The frame in which a player dies is drawn exactly once.
    pub fn frame<S: Surface + ?Sized>(&mut self, now_ms: u64, surface: &mut S) -> FrameStatus {
        if self.is_game_over() {
            return FrameStatus::Halted;
        }

        let inputs = self.current_inputs();
        let result = tick(&mut self.state, &inputs, now_ms, &self.config);
        for event in &result.events {
            debug!(tick = event.tick, player = %event.player_id, data = ?event.data, "event");
        }
        self.last_events = result.events;

        draw_match(&self.state, surface);

        if !result.match_ended {
            return FrameStatus::Running;
        }
        match result.winner {
            Some(winner) => info!(winner = %winner, tick = self.state.tick, "match finished"),
            None => info!(tick = self.state.tick, "match finished in a draw"),
        }
        FrameStatus::Finished { winner: result.winner }
    }

    /// Drive up to `frames` frames with whatever keys are held, reading the
    /// time for frame `n` from `clock(n)`. Stops early once halted.
    pub fn run_for<S, C>(&mut self, frames: u32, mut clock: C, surface: &mut S) -> FrameStatus
    where
        S: Surface + ?Sized,
        C: FnMut(u32) -> u64,
    {
        let mut status = if self.is_game_over() {
            FrameStatus::Halted
        } else {
            FrameStatus::Running
        };
        for n in 0..frames {
            match self.frame(clock(n), surface) {
                FrameStatus::Halted => break,
                other => status = other,
            }
        }
        status
    }

    fn current_inputs(&self) -> BTreeMap<PlayerId, InputFrame> {
        PlayerId::ALL
            .into_iter()
            .map(|id| (id, self.input.frame_for(self.bindings(id))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    fn driver() -> MatchDriver {
        MatchDriver::new(GameConfig::default(), 2024).unwrap()
    }

    #[test]
    fn test_new_driver_layout() {
        let driver = driver();
        let p1 = driver.bindings(PlayerId::ONE).keys();
        let p2 = driver.bindings(PlayerId::TWO).keys();
        assert!(p1.iter().all(|k| !p2.contains(k)));
        assert!(!driver.is_game_over());
        assert_eq!(driver.state().tick, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.combat.damage_per_hit = 0;
        assert!(MatchDriver::new(config, 1).is_err());
    }

    #[test]
    fn test_held_key_moves_player() {
        let mut driver = driver();
        let right = driver.bindings(PlayerId::ONE).right;
        let mut surface = RecordingSurface::default();

        driver.key_down(right);
        for n in 0..3 {
            assert_eq!(driver.frame(n * 16, &mut surface), FrameStatus::Running);
        }
        assert_eq!(driver.state().player(PlayerId::ONE).x, 115.0);

        driver.key_up(right);
        driver.frame(48, &mut surface);
        assert_eq!(driver.state().player(PlayerId::ONE).x, 115.0);
        assert_eq!(surface.frames, 4);
    }

    #[test]
    fn test_other_players_keys_do_not_leak() {
        let mut driver = driver();
        let p2_left = driver.bindings(PlayerId::TWO).left;
        let mut surface = RecordingSurface::default();

        driver.key_down(p2_left);
        driver.frame(0, &mut surface);

        assert_eq!(driver.state().player(PlayerId::ONE).x, 100.0);
        assert_eq!(driver.state().player(PlayerId::TWO).x, 595.0);
    }

    #[test]
    fn test_death_frame_drawn_once_then_halts() {
        let mut driver = driver();
        let shoot = driver.bindings(PlayerId::TWO).shoot;
        let mut surface = RecordingSurface::default();

        driver.key_down(shoot);
        let status = driver.run_for(5_000, |n| n as u64 * 16, &mut surface);

        assert_eq!(status, FrameStatus::Finished { winner: Some(PlayerId::TWO) });
        assert!(driver.is_game_over());
        assert_eq!(surface.winner(), Some("RED Player WINS!"));
        assert_eq!(surface.health_bar(PlayerId::ONE), Some(0.0));

        let drawn = surface.frames;
        let tick = driver.state().tick;
        assert_eq!(driver.frame(1_000_000, &mut surface), FrameStatus::Halted);
        assert_eq!(surface.frames, drawn);
        assert_eq!(driver.state().tick, tick);
        assert_eq!(drawn, tick);
    }

    #[test]
    fn test_run_for_on_finished_match_is_halted() {
        let mut driver = driver();
        let shoot = driver.bindings(PlayerId::ONE).shoot;
        let mut surface = RecordingSurface::default();

        driver.key_down(shoot);
        driver.run_for(5_000, |n| n as u64 * 16, &mut surface);
        assert_eq!(driver.run_for(10, |_| 0, &mut surface), FrameStatus::Halted);
    }

    #[test]
    fn test_release_all() {
        let mut driver = driver();
        let left = driver.bindings(PlayerId::ONE).left;
        let mut surface = RecordingSurface::default();

        driver.key_down(left);
        driver.release_all();
        driver.frame(0, &mut surface);
        assert_eq!(driver.state().player(PlayerId::ONE).x, 100.0);
    }
}
