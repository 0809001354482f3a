//! Renderer Contract
//!
//! [`draw_match`] redraws a whole frame from the match state into any
//! [`Surface`]. It keeps no state of its own; the surface is the only thing
//! that remembers anything between frames.

use crate::core::rect::Rect;
use crate::game::state::{MatchState, PlayerColor, PlayerId};

/// Health bar pixels per point of health.
pub const HEALTH_BAR_PX_PER_POINT: f32 = 2.0;

/// Something a frame can be drawn onto.
pub trait Surface {
    /// Wipe the playfield.
    fn clear(&mut self);

    /// Fill a playfield rectangle (top-left origin, y down).
    fn fill_rect(&mut self, rect: Rect, color: PlayerColor);

    /// Resize a player's health bar.
    fn set_health_bar(&mut self, player: PlayerId, width_px: f32);

    /// Show the end-of-game announcement.
    fn show_winner(&mut self, text: &str);
}

/// Bar width for a health value.
#[inline]
pub fn health_bar_width(health: u32) -> f32 {
    health as f32 * HEALTH_BAR_PX_PER_POINT
}

/// Draw the current state: living players, projectiles, health bars, and the
/// winner text once there is one.
pub fn draw_match<S: Surface + ?Sized>(state: &MatchState, surface: &mut S) {
    surface.clear();

    for player in state.players.iter().filter(|p| p.is_alive()) {
        surface.fill_rect(player.bounds(), player.color);
    }

    for projectile in &state.projectiles {
        surface.fill_rect(projectile.bounds(), projectile.color);
    }

    for player in &state.players {
        surface.set_health_bar(player.id, health_bar_width(player.health));
    }

    if let Some(text) = state.winner_announcement() {
        surface.show_winner(&text);
    }
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// `Surface::clear`
    Clear,
    /// `Surface::fill_rect`
    FillRect(Rect, PlayerColor),
    /// `Surface::set_health_bar`
    HealthBar(PlayerId, f32),
    /// `Surface::show_winner`
    Winner(String),
}

/// Surface that remembers the calls of the most recent frame.
///
/// Used by the headless runner and in tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    /// Calls since the last clear, plus the clear itself
    pub commands: Vec<DrawCommand>,
    /// Frames drawn so far
    pub frames: u32,
}

impl RecordingSurface {
    /// Rectangles of the current frame.
    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &PlayerColor)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect(rect, color) => Some((rect, color)),
            _ => None,
        })
    }

    /// Winner text of the current frame, if shown.
    pub fn winner(&self) -> Option<&str> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Winner(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Health bar width for `player` in the current frame.
    pub fn health_bar(&self, player: PlayerId) -> Option<f32> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::HealthBar(id, width) if *id == player => Some(*width),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.frames += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: PlayerColor) {
        self.commands.push(DrawCommand::FillRect(rect, color));
    }

    fn set_health_bar(&mut self, player: PlayerId, width_px: f32) {
        self.commands.push(DrawCommand::HealthBar(player, width_px));
    }

    fn show_winner(&mut self, text: &str) {
        self.commands.push(DrawCommand::Winner(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_fresh_match_frame() {
        let config = GameConfig::default();
        let state = MatchState::new(&config);
        let mut surface = RecordingSurface::default();

        draw_match(&state, &mut surface);

        assert_eq!(surface.commands[0], DrawCommand::Clear);
        let rects: Vec<_> = surface.rects().collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(*rects[0].0, Rect::new(100.0, 300.0, 40.0, 40.0));
        assert_eq!(*rects[0].1, PlayerColor::Blue);
        assert_eq!(surface.health_bar(PlayerId::ONE), Some(200.0));
        assert_eq!(surface.health_bar(PlayerId::TWO), Some(200.0));
        assert_eq!(surface.winner(), None);
    }

    #[test]
    fn test_projectiles_take_shooter_color() {
        let config = GameConfig::default();
        let mut state = MatchState::new(&config);
        state.spawn_projectile(PlayerId::TWO, &config);
        let mut surface = RecordingSurface::default();

        draw_match(&state, &mut surface);

        let rects: Vec<_> = surface.rects().collect();
        assert_eq!(rects.len(), 3);
        assert_eq!(*rects[2].0, Rect::new(590.0, 315.0, 10.0, 5.0));
        assert_eq!(*rects[2].1, PlayerColor::Red);
    }

    #[test]
    fn test_dead_player_not_drawn_and_winner_shown() {
        let config = GameConfig::default();
        let mut state = MatchState::new(&config);
        state.player_mut(PlayerId::TWO).health = 20;
        state.apply_hit(PlayerId::TWO, PlayerId::ONE, 20);
        let mut surface = RecordingSurface::default();

        draw_match(&state, &mut surface);

        let rects: Vec<_> = surface.rects().collect();
        assert_eq!(rects.len(), 1);
        assert_eq!(*rects[0].1, PlayerColor::Blue);
        assert_eq!(surface.health_bar(PlayerId::TWO), Some(0.0));
        assert_eq!(surface.winner(), Some("BLUE Player WINS!"));
    }

    #[test]
    fn test_redraw_replaces_previous_frame() {
        let config = GameConfig::default();
        let state = MatchState::new(&config);
        let mut surface = RecordingSurface::default();

        draw_match(&state, &mut surface);
        draw_match(&state, &mut surface);

        assert_eq!(surface.frames, 2);
        assert_eq!(surface.rects().count(), 2);
    }
}
