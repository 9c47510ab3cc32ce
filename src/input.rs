//! Keyboard state tracking
//!
//! Raw key identifiers (as reported by `KeyboardEvent.key`) are mapped to a
//! small logical vocabulary and kept in a held-key set. Held state depends
//! only on down/up transitions, so key-repeat events are harmless.

use std::collections::HashSet;

/// Logical keys the demo understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Thrust
    Up,
    Enter,
    Space,
    /// Any other identifier. Stored but never consulted. All unknown
    /// identifiers share this one bucket, so releasing any of them clears it.
    Unknown,
}

impl Key {
    /// Map a raw key identifier to a logical key
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "ArrowUp" | "Up" => Key::Up,
            "Enter" => Key::Enter,
            " " | "Space" | "Spacebar" => Key::Space,
            _ => Key::Unknown,
        }
    }
}

/// Set of keys currently held down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    held: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Pressing an already-held key changes nothing.
    pub fn key_down(&mut self, raw: &str) -> Key {
        let key = Key::from_raw(raw);
        self.press(key);
        key
    }

    /// Record a key release. Releasing a key that is not held is a no-op.
    pub fn key_up(&mut self, raw: &str) -> Key {
        let key = Key::from_raw(raw);
        self.release(key);
        key
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Drop every held key (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Directional controls sampled for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
}

impl Controls {
    /// Sample the held directional keys
    pub fn from_keys(keys: &KeyboardState) -> Self {
        Self {
            left: keys.is_held(Key::Left),
            right: keys.is_held(Key::Right),
            thrust: keys.is_held(Key::Up),
        }
    }

    /// Turn direction: -1 for left, +1 for right, 0 otherwise.
    /// Left wins when both are held.
    pub fn turn(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}
