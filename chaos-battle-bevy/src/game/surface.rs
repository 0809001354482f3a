//! Sprite renderer
//!
//! Implements the simulation's drawing contract on top of Bevy: every frame
//! throws away the previous frame's sprites and spawns fresh ones. Health and
//! winner text go into [`HudState`] for the UI systems to pick up.

use bevy::prelude::*;
use chaos_battle::{PlayerColor, PlayerId, Rect, Surface};

use super::components::{player_color, FrameSprite, HudState, MatchEntity};

/// Playfield rectangle (top-left origin, y down) to the world-space center of
/// the same rectangle, for a camera centered on the playfield.
pub fn playfield_to_world(rect: &Rect, field_width: f32, field_height: f32) -> Vec2 {
    let (cx, cy) = rect.center();
    Vec2::new(cx - field_width / 2.0, field_height / 2.0 - cy)
}

pub struct SpriteSurface<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub stale: Vec<Entity>,
    pub hud: &'a mut HudState,
    pub field_width: f32,
    pub field_height: f32,
    layer: f32,
}

impl<'a, 'w, 's> SpriteSurface<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        stale: Vec<Entity>,
        hud: &'a mut HudState,
        field_width: f32,
        field_height: f32,
    ) -> Self {
        Self { commands, stale, hud, field_width, field_height, layer: 0.0 }
    }
}

impl Surface for SpriteSurface<'_, '_, '_> {
    fn clear(&mut self) {
        for entity in self.stale.drain(..) {
            self.commands.entity(entity).despawn_recursive();
        }
        self.hud.winner = None;
        self.layer = 0.0;
    }

    fn fill_rect(&mut self, rect: Rect, color: PlayerColor) {
        // Later rects draw on top, like a canvas
        self.layer += 0.01;
        let center = playfield_to_world(&rect, self.field_width, self.field_height);

        self.commands.spawn((
            Sprite {
                color: player_color(color),
                custom_size: Some(Vec2::new(rect.width, rect.height)),
                ..default()
            },
            Transform::from_translation(center.extend(self.layer)),
            FrameSprite,
            MatchEntity,
        ));
    }

    fn set_health_bar(&mut self, player: PlayerId, width_px: f32) {
        self.hud.health_px[player.index()] = width_px;
    }

    fn show_winner(&mut self, text: &str) {
        self.hud.winner = Some(text.to_string());
    }
}
