//! Input Capture and Normalization
//!
//! Raw key events land in [`InputState`], a held/released map keyed by
//! upper-case character. Once per tick the driver folds that map through each
//! player's [`KeyBindings`] into a packed [`InputFrame`].

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::game::keys::{Action, KeyBindings};

/// Normalize a key identifier to a single upper-case character.
///
/// Returns `None` for named keys ("Shift", "ArrowLeft", ...), empty input,
/// and characters whose upper case is more than one character ("ß").
pub fn normalize_key(key: &str) -> Option<char> {
    let mut chars = key.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let mut upper = first.to_uppercase();
    let single = upper.next()?;
    match upper.next() {
        Some(_) => None,
        None => Some(single),
    }
}

/// Direction of a raw key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyTransition {
    /// Key went down
    Pressed,
    /// Key came up
    Released,
}

/// A raw key event after normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Upper-case key character
    pub key: char,
    /// Press or release
    pub transition: KeyTransition,
}

impl KeyEvent {
    /// Build from a raw key identifier; `None` if it is not a single character.
    pub fn from_raw(key: &str, transition: KeyTransition) -> Option<Self> {
        normalize_key(key).map(|key| Self { key, transition })
    }
}

// =============================================================================
// INPUT STATE
// =============================================================================

/// Which keys are currently held.
///
/// Written from the event context, read once per tick.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputState {
    held: BTreeMap<char, bool>,
}

impl InputState {
    /// Empty map: nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press.
    pub fn press(&mut self, key: char) {
        self.held.insert(key, true);
    }

    /// Record a key release.
    pub fn release(&mut self, key: char) {
        self.held.insert(key, false);
    }

    /// Apply a normalized event.
    pub fn apply(&mut self, event: KeyEvent) {
        match event.transition {
            KeyTransition::Pressed => self.press(event.key),
            KeyTransition::Released => self.release(event.key),
        }
    }

    /// Is `key` held right now?
    #[inline]
    pub fn is_held(&self, key: char) -> bool {
        self.held.get(&key).copied().unwrap_or(false)
    }

    /// Fold the held keys through one player's bindings.
    pub fn frame_for(&self, bindings: &KeyBindings) -> InputFrame {
        let mut frame = InputFrame::new();
        for (&key, _) in self.held.iter().filter(|(_, &down)| down) {
            if let Some(action) = bindings.action_for(key) {
                frame.set_action(action, true);
            }
        }
        frame
    }

    /// Release everything (e.g. when the window loses focus).
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

// =============================================================================
// INPUT FRAME
// =============================================================================

/// One player's actions for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Action flags (packed bits):
    /// - Bit 0: Left held
    /// - Bit 1: Right held
    /// - Bit 2: Jump held
    /// - Bit 3: Shoot held
    pub flags: u8,
}

impl InputFrame {
    /// Left flag bit
    pub const FLAG_LEFT: u8 = 0x01;

    /// Right flag bit
    pub const FLAG_RIGHT: u8 = 0x02;

    /// Jump flag bit
    pub const FLAG_JUMP: u8 = 0x04;

    /// Shoot flag bit
    pub const FLAG_SHOOT: u8 = 0x08;

    /// Create a new empty input frame.
    pub const fn new() -> Self {
        Self { flags: 0 }
    }

    /// Create a frame from raw flag bits.
    pub const fn from_flags(flags: u8) -> Self {
        Self { flags }
    }

    /// Left held this tick.
    #[inline]
    pub fn left(&self) -> bool {
        self.flags & Self::FLAG_LEFT != 0
    }

    /// Right held this tick.
    #[inline]
    pub fn right(&self) -> bool {
        self.flags & Self::FLAG_RIGHT != 0
    }

    /// Jump held this tick.
    #[inline]
    pub fn jump(&self) -> bool {
        self.flags & Self::FLAG_JUMP != 0
    }

    /// Shoot held this tick.
    #[inline]
    pub fn shoot(&self) -> bool {
        self.flags & Self::FLAG_SHOOT != 0
    }

    /// Nothing held.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.flags == 0
    }

    #[inline]
    fn set(&mut self, bit: u8, pressed: bool) {
        if pressed {
            self.flags |= bit;
        } else {
            self.flags &= !bit;
        }
    }

    /// Set the flag for `action`.
    pub fn set_action(&mut self, action: Action, pressed: bool) {
        let bit = match action {
            Action::Left => Self::FLAG_LEFT,
            Action::Right => Self::FLAG_RIGHT,
            Action::Jump => Self::FLAG_JUMP,
            Action::Shoot => Self::FLAG_SHOOT,
        };
        self.set(bit, pressed);
    }

    /// Set left flag.
    pub fn set_left(&mut self, pressed: bool) {
        self.set(Self::FLAG_LEFT, pressed);
    }

    /// Set right flag.
    pub fn set_right(&mut self, pressed: bool) {
        self.set(Self::FLAG_RIGHT, pressed);
    }

    /// Set jump flag.
    pub fn set_jump(&mut self, pressed: bool) {
        self.set(Self::FLAG_JUMP, pressed);
    }

    /// Set shoot flag.
    pub fn set_shoot(&mut self, pressed: bool) {
        self.set(Self::FLAG_SHOOT, pressed);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings() -> KeyBindings {
        KeyBindings { left: 'A', right: 'D', jump: 'W', shoot: 'S' }
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("a"), Some('A'));
        assert_eq!(normalize_key("Q"), Some('Q'));
        assert_eq!(normalize_key("Shift"), None);
        assert_eq!(normalize_key(""), None);
    }

    #[test]
    fn test_multi_char_upper_case_is_rejected() {
        // Upper case of 'ß' is "SS"
        assert_eq!(normalize_key("ß"), None);
        assert!(KeyEvent::from_raw("ß", KeyTransition::Pressed).is_none());
        assert_eq!(normalize_key("é"), Some('É'));
    }

    #[test]
    fn test_key_event_from_raw() {
        let event = KeyEvent::from_raw("k", KeyTransition::Pressed).unwrap();
        assert_eq!(event.key, 'K');
        assert!(KeyEvent::from_raw("ArrowLeft", KeyTransition::Pressed).is_none());
    }

    #[test]
    fn test_press_release() {
        let mut input = InputState::new();
        assert!(!input.is_held('A'));

        input.press('A');
        assert!(input.is_held('A'));

        input.release('A');
        assert!(!input.is_held('A'));
    }

    #[test]
    fn test_frame_for_bindings() {
        let mut input = InputState::new();
        input.apply(KeyEvent { key: 'D', transition: KeyTransition::Pressed });
        input.apply(KeyEvent { key: 'W', transition: KeyTransition::Pressed });
        input.press('Z'); // unbound

        let frame = input.frame_for(&bindings());
        assert!(!frame.left());
        assert!(frame.right());
        assert!(frame.jump());
        assert!(!frame.shoot());
    }

    #[test]
    fn test_released_key_drops_its_action() {
        let mut input = InputState::new();
        input.press('A');
        input.press('S');
        input.release('A');

        let frame = input.frame_for(&bindings());
        assert_eq!(frame, InputFrame::from_flags(InputFrame::FLAG_SHOOT));
    }

    #[test]
    fn test_set_action() {
        let mut frame = InputFrame::new();
        frame.set_action(Action::Jump, true);
        frame.set_action(Action::Right, true);
        assert!(frame.jump() && frame.right());
        frame.set_action(Action::Jump, false);
        assert_eq!(frame, InputFrame::from_flags(InputFrame::FLAG_RIGHT));
    }

    #[test]
    fn test_input_frame_flags() {
        let mut frame = InputFrame::new();
        assert!(frame.is_idle());

        frame.set_left(true);
        frame.set_shoot(true);
        assert!(frame.left());
        assert!(frame.shoot());
        assert!(!frame.jump());

        frame.set_left(false);
        assert!(!frame.left());
        assert!(frame.shoot());
        assert_eq!(frame, InputFrame::from_flags(InputFrame::FLAG_SHOOT));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = InputState::new();
        input.press('A');
        input.press('S');
        input.clear();
        assert!(input.frame_for(&bindings()).is_idle());
    }
}
