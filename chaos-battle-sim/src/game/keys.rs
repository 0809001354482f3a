//! Random Key Bindings
//!
//! Each player gets four letters (left, right, jump, shoot) drawn without
//! replacement from A-Z. The second player's letters exclude the first's, so
//! all eight keys are distinct.

use std::collections::BTreeSet;
use std::fmt;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Letters eligible for binding.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of actions each player binds.
pub const KEYS_PER_PLAYER: usize = 4;

/// Key binding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyBindingError {
    /// Not enough unused letters left.
    #[error("need {needed} free keys but only {available} remain")]
    Exhausted {
        /// Keys requested
        needed: usize,
        /// Keys still unused
        available: usize,
    },
}

/// Player action a key can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Step left
    Left,
    /// Step right
    Right,
    /// Start a jump
    Jump,
    /// Fire a projectile
    Shoot,
}

/// One player's key layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Move left
    pub left: char,
    /// Move right
    pub right: char,
    /// Jump
    pub jump: char,
    /// Shoot
    pub shoot: char,
}

impl KeyBindings {
    /// All four keys in action order.
    pub fn keys(&self) -> [char; KEYS_PER_PLAYER] {
        [self.left, self.right, self.jump, self.shoot]
    }

    /// Action bound to `key`, if any.
    pub fn action_for(&self, key: char) -> Option<Action> {
        match key {
            k if k == self.left => Some(Action::Left),
            k if k == self.right => Some(Action::Right),
            k if k == self.jump => Some(Action::Jump),
            k if k == self.shoot => Some(Action::Shoot),
            _ => None,
        }
    }
}

impl fmt::Display for KeyBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Left: {}, Right: {}, Jump: {}, Shoot: {}",
            self.left, self.right, self.jump, self.shoot
        )
    }
}

/// Draw a key layout from the letters not in `used`.
///
/// Every unused letter is equally likely for every slot.
pub fn generate_bindings<R: Rng + ?Sized>(
    used: &BTreeSet<char>,
    rng: &mut R,
) -> Result<KeyBindings, KeyBindingError> {
    let mut pool: Vec<char> = ALPHABET.chars().filter(|c| !used.contains(c)).collect();
    if pool.len() < KEYS_PER_PLAYER {
        return Err(KeyBindingError::Exhausted {
            needed: KEYS_PER_PLAYER,
            available: pool.len(),
        });
    }

    let (picked, _) = pool.partial_shuffle(rng, KEYS_PER_PLAYER);

    Ok(KeyBindings {
        left: picked[0],
        right: picked[1],
        jump: picked[2],
        shoot: picked[3],
    })
}

/// Generate layouts for both players with no key shared between them.
pub fn generate_pair<R: Rng + ?Sized>(rng: &mut R) -> Result<[KeyBindings; 2], KeyBindingError> {
    let first = generate_bindings(&BTreeSet::new(), rng)?;
    let used: BTreeSet<char> = first.keys().into_iter().collect();
    let second = generate_bindings(&used, rng)?;
    Ok([first, second])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_display_format() {
        let bindings = KeyBindings { left: 'A', right: 'D', jump: 'W', shoot: 'S' };
        assert_eq!(bindings.to_string(), "Left: A, Right: D, Jump: W, Shoot: S");
    }

    #[test]
    fn test_action_for() {
        let bindings = KeyBindings { left: 'A', right: 'D', jump: 'W', shoot: 'S' };
        assert_eq!(bindings.action_for('A'), Some(Action::Left));
        assert_eq!(bindings.action_for('D'), Some(Action::Right));
        assert_eq!(bindings.action_for('W'), Some(Action::Jump));
        assert_eq!(bindings.action_for('S'), Some(Action::Shoot));
        assert_eq!(bindings.action_for('Q'), None);
    }

    #[test]
    fn test_respects_used_keys() {
        let mut rng = seeded(7);
        let used: BTreeSet<char> = "ABCDEFGHIJKLMNOPQRSTUV".chars().collect();
        let bindings = generate_bindings(&used, &mut rng).unwrap();

        let mut keys = bindings.keys().to_vec();
        keys.sort();
        assert_eq!(keys, vec!['W', 'X', 'Y', 'Z']);
    }

    #[test]
    fn test_exhausted() {
        let mut rng = seeded(7);
        let used: BTreeSet<char> = "ABCDEFGHIJKLMNOPQRSTUVW".chars().collect();
        let result = generate_bindings(&used, &mut rng);
        assert_eq!(result, Err(KeyBindingError::Exhausted { needed: 4, available: 3 }));
    }

    #[test]
    fn test_every_letter_can_land_in_every_slot() {
        let mut rng = seeded(3);
        let mut seen = [BTreeSet::new(), BTreeSet::new(), BTreeSet::new(), BTreeSet::new()];
        for _ in 0..2_000 {
            let keys = generate_bindings(&BTreeSet::new(), &mut rng).unwrap().keys();
            for (slot, key) in keys.into_iter().enumerate() {
                seen[slot].insert(key);
            }
        }
        assert!(seen.iter().all(|slot| slot.len() == 26));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = generate_pair(&mut seeded(99)).unwrap();
        let b = generate_pair(&mut seeded(99)).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_eight_distinct_letters(seed in any::<u64>()) {
            let pair = generate_pair(&mut seeded(seed)).unwrap();
            let keys: BTreeSet<char> = pair.iter().flat_map(|b| b.keys()).collect();

            prop_assert_eq!(keys.len(), 8);
            prop_assert!(keys.iter().all(|k| k.is_ascii_uppercase()));
        }
    }
}
