//! Chaos Keyboard Battle - two players, one keyboard, random keys
//!
//! Each match deals both players four random letter keys. Run, jump and
//! shoot until somebody's health runs out.

mod game;
mod ui;

use bevy::prelude::*;
use bevy::window::WindowMode;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::render::camera::ScalingMode;

use game::{GamePlugin, LaunchSettings, BACKGROUND};
use ui::UiPlugin;

/// Game states
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Setup,
    Playing,
    GameOver,
}

fn main() {
    // Needed by OnEnter(Setup), which runs before any startup system
    let settings = LaunchSettings::from_env();
    let field = settings.config.playfield.clone();

    App::new()
        // Bevy defaults with a window the size of the playfield
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Chaos Keyboard Battle".into(),
                resolution: (field.width, field.height).into(),
                mode: WindowMode::Windowed,
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(settings)
        // Game state
        .init_state::<AppState>()
        // Our plugins
        .add_plugins((
            GamePlugin,
            UiPlugin,
        ))
        // Startup
        .add_systems(Startup, (report_launch_settings, setup_2d_camera))
        .run();
}

fn report_launch_settings(settings: Res<LaunchSettings>) {
    if let Some(e) = &settings.config_error {
        warn!("Ignoring tuning file: {}", e);
    }
}

/// Flat 2D camera pinned to the playfield
fn setup_2d_camera(mut commands: Commands, settings: Res<LaunchSettings>) {
    let field = &settings.config.playfield;

    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(BACKGROUND),
            ..default()
        },
        OrthographicProjection {
            scaling_mode: ScalingMode::Fixed { width: field.width, height: field.height },
            near: -1000.0,
            far: 1000.0,
            ..OrthographicProjection::default_2d()
        },
        Tonemapping::None,
    ));

    info!("Chaos Keyboard Battle initialized!");
}
