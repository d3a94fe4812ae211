//! Keyboard state tracking

use winit::keyboard::KeyCode;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Space,
}

/// Map a physical key to a game key
pub fn map_key(key_code: KeyCode) -> Option<Key> {
    match key_code {
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        KeyCode::Space => Some(Key::Space),
        _ => None,
    }
}

/// Held arrows plus a latched SPACE press
///
/// Arrows are level-triggered: they move the player every tick while held.
/// SPACE is edge-triggered: one press yields exactly one `start` tick, and
/// auto-repeat is ignored.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    start: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release
    pub fn key_event(&mut self, key: Key, pressed: bool, repeat: bool) {
        match key {
            Key::Left => self.left = pressed,
            Key::Right => self.right = pressed,
            Key::Space => {
                if pressed && !repeat {
                    self.start = true;
                }
            }
        }
    }

    /// Forget held keys (window lost focus, so releases won't arrive)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }

    /// Input for the next tick; clears one-shot inputs
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            start: self.start,
        };
        self.start = false;
        input
    }
}
