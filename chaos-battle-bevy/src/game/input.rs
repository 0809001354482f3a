//! Keyboard forwarding
//!
//! Raw window key events go into the driver's held-key map and nowhere else;
//! the step system reads them on the next frame.

use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::WindowFocused;
use chaos_battle::{KeyEvent, KeyTransition};

use super::components::ActiveMatch;

/// Map a Bevy key event onto a normalized one. Named keys map to nothing.
pub fn key_event(logical_key: &Key, state: ButtonState) -> Option<KeyEvent> {
    let Key::Character(text) = logical_key else {
        return None;
    };
    let transition = match state {
        ButtonState::Pressed => KeyTransition::Pressed,
        ButtonState::Released => KeyTransition::Released,
    };
    KeyEvent::from_raw(text.as_str(), transition)
}

/// Feed this frame's key events into the driver
pub fn forward_keys(
    mut key_events: EventReader<KeyboardInput>,
    mut active: ResMut<ActiveMatch>,
) {
    for event in key_events.read() {
        if let Some(key) = key_event(&event.logical_key, event.state) {
            active.driver.handle_key(key);
        }
    }
}

/// Drop held keys when the window loses focus; the release would never arrive
pub fn release_on_focus_loss(
    mut focus_events: EventReader<WindowFocused>,
    mut active: ResMut<ActiveMatch>,
) {
    for event in focus_events.read() {
        if !event.focused {
            debug!("Window lost focus, releasing held keys");
            active.driver.release_all();
        }
    }
}
