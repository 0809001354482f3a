//! Components and resources shared by the match and HUD systems

use bevy::prelude::*;
use chaos_battle::{GameConfig, LaunchOptions, MatchDriver, PlayerColor, PlayerId};

// ============================================================================
// MARKERS
// ============================================================================

/// Anything that belongs to the current match; despawned on restart
#[derive(Component)]
pub struct MatchEntity;

/// Sprite drawn for the current frame only
#[derive(Component)]
pub struct FrameSprite;

// ============================================================================
// RESOURCES
// ============================================================================

/// Tuning and seed picked at launch, reused for every restart
#[derive(Resource, Clone, Debug)]
pub struct LaunchSettings {
    pub config: GameConfig,
    pub seed: Option<u64>,
    /// Why the tuning file was ignored, reported once logging is up
    pub config_error: Option<String>,
}

impl LaunchSettings {
    /// Read env overrides; a bad tuning file falls back to defaults
    pub fn from_env() -> Self {
        let options = LaunchOptions::from_env();
        match options.game_config() {
            Ok(config) => Self { config, seed: options.seed, config_error: None },
            Err(e) => Self {
                config: GameConfig::default(),
                seed: options.seed,
                config_error: Some(e.to_string()),
            },
        }
    }
}

/// The match being played
#[derive(Resource)]
pub struct ActiveMatch {
    pub driver: MatchDriver,
}

/// Status values the HUD mirrors each frame
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct HudState {
    pub health_px: [f32; 2],
    pub winner: Option<String>,
}

impl HudState {
    pub fn health_px(&self, player: PlayerId) -> f32 {
        self.health_px[player.index()]
    }
}

// ============================================================================
// COLORS
// ============================================================================

/// Canvas background
pub const BACKGROUND: Color = Color::srgb(0.94, 0.94, 0.94);

/// Bevy color for a player's identity color
pub fn player_color(color: PlayerColor) -> Color {
    match color {
        PlayerColor::Blue => Color::srgb(0.0, 0.0, 1.0),
        PlayerColor::Red => Color::srgb(1.0, 0.0, 0.0),
    }
}
