//! Game module - drives one Chaos Battle match per app state cycle
//!
//! Flow:
//! - `Setup`: throw away the old match, build a fresh driver, go to `Playing`
//! - `Playing`: forward keys, step and draw once per rendered frame
//! - `GameOver`: nothing steps; the last frame stays on screen

use bevy::prelude::*;
use chaos_battle::render::health_bar_width;
use chaos_battle::{FrameStatus, MatchDriver};
use crate::AppState;

pub mod components;
pub mod input;
pub mod surface;

pub use components::*;
pub use surface::SpriteSurface;

// ============================================================================
// GAME PLUGIN
// ============================================================================

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Resources
            .init_resource::<HudState>()

            // Fresh match on every entry into Setup
            .add_systems(OnEnter(AppState::Setup), (
                cleanup_match,
                setup_match,
            ).chain())

            // Input lands before the step reads it
            .add_systems(Update, (
                input::release_on_focus_loss,
                input::forward_keys,
                step_match,
            ).chain().run_if(in_state(AppState::Playing)))

            .add_systems(OnEnter(AppState::GameOver), announce_game_over);
    }
}

// ============================================================================
// SETUP / CLEANUP
// ============================================================================

fn cleanup_match(
    mut commands: Commands,
    entities: Query<Entity, With<MatchEntity>>,
) {
    for entity in entities.iter() {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<ActiveMatch>();
}

fn setup_match(
    mut commands: Commands,
    settings: Res<LaunchSettings>,
    mut hud: ResMut<HudState>,
    mut next_state: ResMut<NextState<AppState>>,
    mut exit: EventWriter<AppExit>,
) {
    let seed = settings.seed.unwrap_or_else(rand::random);

    let driver = match MatchDriver::new(settings.config.clone(), seed) {
        Ok(driver) => driver,
        Err(e) => {
            error!("Could not start match: {}", e);
            exit.send(AppExit::error());
            return;
        }
    };

    info!("New match (seed {})", seed);

    let full = health_bar_width(settings.config.player.max_health);
    *hud = HudState { health_px: [full; 2], winner: None };
    commands.insert_resource(ActiveMatch { driver });
    next_state.set(AppState::Playing);
}

// ============================================================================
// FRAME STEP
// ============================================================================

/// One simulation step and one redraw per rendered frame
fn step_match(
    mut commands: Commands,
    time: Res<Time>,
    mut active: ResMut<ActiveMatch>,
    mut hud: ResMut<HudState>,
    sprites: Query<Entity, With<FrameSprite>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let now_ms = time.elapsed().as_millis() as u64;
    let (width, height) = {
        let field = &active.driver.config().playfield;
        (field.width, field.height)
    };
    let stale = sprites.iter().collect();

    let mut surface = SpriteSurface::new(&mut commands, stale, &mut hud, width, height);

    match active.driver.frame(now_ms, &mut surface) {
        FrameStatus::Running => {}
        FrameStatus::Finished { winner } => {
            match winner {
                Some(winner) => info!("{} wins", winner),
                None => info!("Double knockout"),
            }
            next_state.set(AppState::GameOver);
        }
        FrameStatus::Halted => next_state.set(AppState::GameOver),
    }
}

fn announce_game_over(hud: Res<HudState>) {
    if let Some(text) = &hud.winner {
        info!("Game over: {}", text);
    }
}
