//! Held-key table fed by winit keyboard events.
//!
//! Every physical key that has ever been seen keeps an entry: key-down writes
//! `true`, key-up writes `false`. Nothing else removes entries, so a key whose
//! release was never delivered (focus loss, for example) stays held.

use std::collections::{HashMap, HashSet};

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event, independent of winit's event plumbing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: KeyCode,
    /// Whether the key went down or up.
    pub state: ElementState,
    /// Whether the OS generated this as an auto-repeat.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// A non-repeat key-down.
    pub fn down(key: KeyCode) -> Self {
        Self {
            key,
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    /// A key-up.
    pub fn up(key: KeyCode) -> Self {
        Self {
            key,
            state: ElementState::Released,
            repeat: false,
        }
    }
}

/// Held state per physical key plus the keys that went down this frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashMap<KeyCode, bool>,
    just_pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a winit [`KeyEvent`]. Unidentified keys are dropped.
    pub fn process_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key) = event.physical_key {
            self.process_raw(RawKeyEvent {
                key,
                state: event.state,
                repeat: event.repeat,
            });
        }
    }

    /// Feed a [`RawKeyEvent`]. Repeats do not change held state but also do
    /// not count as a fresh press.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        match event.state {
            ElementState::Pressed => {
                let was_held = self.is_held(event.key);
                self.held.insert(event.key, true);
                if !event.repeat && !was_held {
                    self.just_pressed.insert(event.key);
                }
            }
            ElementState::Released => {
                self.held.insert(event.key, false);
            }
        }
    }

    /// Whether the key is currently held. Unknown keys read as released.
    #[must_use]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.get(&key).copied().unwrap_or(false)
    }

    /// Whether the key went down since the last [`clear_transients`](Self::clear_transients).
    #[must_use]
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Number of keys with an entry in the held table, released or not.
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.held.len()
    }

    /// Forget per-frame press edges. Held state is untouched.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
    }
}
