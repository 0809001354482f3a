//! Tuning Configuration
//!
//! Every gameplay constant lives here. Defaults reproduce the classic
//! 800x400 arena; a JSON file may override any subset of fields.

use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Environment variable naming an optional JSON tuning file.
pub const CONFIG_PATH_ENV: &str = "CHAOS_BATTLE_CONFIG";

/// Environment variable holding a fixed RNG seed for the key layout.
pub const SEED_ENV: &str = "CHAOS_BATTLE_SEED";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`GameConfig`].
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values parsed but break a gameplay invariant.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Playfield dimensions and world physics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    /// Surface width in pixels
    pub width: f32,
    /// Surface height in pixels
    pub height: f32,
    /// Y coordinate of a grounded player's top edge
    pub ground_y: f32,
    /// Downward acceleration added to vertical velocity each tick
    pub gravity: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            ground_y: 300.0,
            gravity: 0.5,
        }
    }
}

/// Player body and movement tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Body width in pixels
    pub width: f32,
    /// Body height in pixels
    pub height: f32,
    /// Horizontal step per tick
    pub speed: f32,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_velocity: f32,
    /// Starting health
    pub max_health: u32,
    /// Spawn x for player one and player two
    pub spawn_x: [f32; 2],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            speed: 5.0,
            jump_velocity: -10.0,
            max_health: 100,
            spawn_x: [100.0, 600.0],
        }
    }
}

/// Projectile tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Unsigned horizontal speed per tick
    pub speed: f32,
    /// Offset from the shooter's top edge to the projectile's top edge
    pub muzzle_offset_y: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 5.0,
            speed: 8.0,
            muzzle_offset_y: 15.0,
        }
    }
}

/// Damage and rate limiting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Health removed per projectile hit
    pub damage_per_hit: u32,
    /// Minimum time between two shots of the same player
    pub shot_cooldown_ms: u64,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            damage_per_hit: 20,
            shot_cooldown_ms: 500,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield and physics
    pub playfield: PlayfieldConfig,
    /// Player tuning
    pub player: PlayerTuning,
    /// Projectile tuning
    pub projectile: ProjectileTuning,
    /// Combat tuning
    pub combat: CombatTuning,
}

impl GameConfig {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.playfield;
        let player = &self.player;

        if player.width <= 0.0 || player.height <= 0.0 {
            return Err(ConfigError::Invalid("player size must be positive".into()));
        }
        if player.width >= field.width {
            return Err(ConfigError::Invalid(format!(
                "player width {} does not fit playfield width {}",
                player.width, field.width
            )));
        }
        if field.ground_y < 0.0 || field.ground_y + player.height > field.height {
            return Err(ConfigError::Invalid(format!(
                "ground line {} leaves no room for a {}px player",
                field.ground_y, player.height
            )));
        }
        for x in player.spawn_x {
            if x < 0.0 || x > self.max_player_x() {
                return Err(ConfigError::Invalid(format!("spawn x {} is off the playfield", x)));
            }
        }
        if player.max_health == 0 {
            return Err(ConfigError::Invalid("max_health must be positive".into()));
        }
        if self.combat.damage_per_hit == 0 {
            return Err(ConfigError::Invalid("damage_per_hit must be positive".into()));
        }
        if player.max_health % self.combat.damage_per_hit != 0 {
            return Err(ConfigError::Invalid(format!(
                "max_health {} is not a multiple of damage_per_hit {}",
                player.max_health, self.combat.damage_per_hit
            )));
        }
        if self.combat.shot_cooldown_ms == 0 {
            return Err(ConfigError::Invalid("shot_cooldown_ms must be positive".into()));
        }
        if self.projectile.speed <= 0.0 {
            return Err(ConfigError::Invalid("projectile speed must be positive".into()));
        }
        Ok(())
    }

    /// Largest x a player may occupy.
    #[inline]
    pub fn max_player_x(&self) -> f32 {
        self.playfield.width - self.player.width
    }
}

/// Launch options read from the environment.
#[derive(Clone, Debug, Default)]
pub struct LaunchOptions {
    /// Optional tuning file
    pub config_path: Option<PathBuf>,
    /// Optional fixed seed for the key layout
    pub seed: Option<u64>,
}

impl LaunchOptions {
    /// Read `CHAOS_BATTLE_CONFIG` and `CHAOS_BATTLE_SEED`.
    pub fn from_env() -> Self {
        Self {
            config_path: std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from),
            seed: std::env::var(SEED_ENV).ok().and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Resolve the game config: the file if one is named, defaults otherwise.
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        match &self.config_path {
            Some(path) => GameConfig::load(path),
            None => Ok(GameConfig::default()),
        }
    }
}
