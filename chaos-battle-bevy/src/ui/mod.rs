//! UI module - key legend, health bars, winner banner, restart control

use bevy::prelude::*;
use chaos_battle::{PlayerColor, PlayerId};
use crate::AppState;
use crate::game::{player_color, ActiveMatch, HudState, MatchEntity};

/// Width of a full health bar's frame
const BAR_FRAME_PX: f32 = 200.0;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(OnEnter(AppState::Playing), setup_hud)
            .add_systems(Update, (
                update_hud.run_if(not(in_state(AppState::Setup))),
                handle_restart.run_if(not(in_state(AppState::Setup))),
                restart_button_colors,
            ));
    }
}

/// Marker for HUD UI
#[derive(Component)]
struct HudUI;

/// Fill node of a player's health bar
#[derive(Component)]
struct HealthBar(PlayerId);

/// Marker for winner text
#[derive(Component)]
struct WinnerText;

/// Marker for the restart button
#[derive(Component)]
struct RestartButton;

/// Setup in-game HUD for the current match
fn setup_hud(mut commands: Commands, active: Res<ActiveMatch>) {
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            padding: UiRect::all(Val::Px(10.0)),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::SpaceBetween,
            ..default()
        },
        HudUI,
        MatchEntity,
    )).with_children(|parent| {
        // Player panels (top)
        parent.spawn(Node {
            width: Val::Percent(100.0),
            flex_direction: FlexDirection::Row,
            justify_content: JustifyContent::SpaceBetween,
            ..default()
        }).with_children(|row| {
            for id in PlayerId::ALL {
                let legend = active.driver.bindings(id).to_string();
                spawn_player_panel(row, id, legend);
            }
        });

        // Winner banner (center)
        parent.spawn((
            Text::new(""),
            TextFont {
                font_size: 40.0,
                ..default()
            },
            TextColor(Color::BLACK),
            TextLayout::new_with_justify(JustifyText::Center),
            Node {
                align_self: AlignSelf::Center,
                ..default()
            },
            WinnerText,
        ));

        // Restart (bottom)
        parent.spawn((
            Button,
            Node {
                width: Val::Px(120.0),
                height: Val::Px(36.0),
                align_self: AlignSelf::Center,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor(Color::srgb(0.3, 0.3, 0.3)),
            BackgroundColor(Color::srgb(0.85, 0.85, 0.85)),
            RestartButton,
        )).with_children(|button| {
            button.spawn((
                Text::new("Restart"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::BLACK),
            ));
        });
    });
}

/// Key legend and health bar for one player
fn spawn_player_panel(parent: &mut ChildBuilder, id: PlayerId, legend: String) {
    let color = player_color(PlayerColor::for_player(id));
    let align = if id == PlayerId::ONE { AlignItems::FlexStart } else { AlignItems::FlexEnd };

    parent.spawn(Node {
        flex_direction: FlexDirection::Column,
        align_items: align,
        row_gap: Val::Px(4.0),
        ..default()
    }).with_children(|panel| {
        panel.spawn((
            Text::new(legend),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(color),
        ));

        // Bar frame with the fill inside
        panel.spawn((
            Node {
                width: Val::Px(BAR_FRAME_PX),
                height: Val::Px(12.0),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BorderColor(Color::BLACK),
        )).with_children(|frame| {
            frame.spawn((
                Node {
                    width: Val::Px(BAR_FRAME_PX),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(color),
                HealthBar(id),
            ));
        });
    });
}

/// Mirror HUD values onto the UI nodes
fn update_hud(
    hud: Res<HudState>,
    mut bars: Query<(&HealthBar, &mut Node)>,
    mut winner_text: Query<&mut Text, With<WinnerText>>,
) {
    if !hud.is_changed() {
        return;
    }

    for (bar, mut node) in bars.iter_mut() {
        node.width = Val::Px(hud.health_px(bar.0));
    }

    if let Ok(mut text) = winner_text.get_single_mut() {
        **text = hud.winner.clone().unwrap_or_default();
    }
}

/// F5 or the Restart button rebuilds the match from scratch
fn handle_restart(
    keyboard: Res<ButtonInput<KeyCode>>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<RestartButton>)>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let clicked = buttons.iter().any(|i| *i == Interaction::Pressed);
    if keyboard.just_pressed(KeyCode::F5) || clicked {
        info!("Restart requested");
        next_state.set(AppState::Setup);
    }
}

fn restart_button_colors(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor, &mut BorderColor),
        (Changed<Interaction>, With<RestartButton>),
    >,
) {
    for (interaction, mut bg_color, mut border_color) in buttons.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                *bg_color = BackgroundColor(Color::srgb(0.65, 0.65, 0.65));
            }
            Interaction::Hovered => {
                *bg_color = BackgroundColor(Color::srgb(0.92, 0.92, 0.92));
                *border_color = BorderColor(Color::BLACK);
            }
            Interaction::None => {
                *bg_color = BackgroundColor(Color::srgb(0.85, 0.85, 0.85));
                *border_color = BorderColor(Color::srgb(0.3, 0.3, 0.3));
            }
        }
    }
}
