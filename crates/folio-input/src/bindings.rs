//! Movement actions and the keys bound to them.

use std::collections::HashMap;

use tracing::{debug, warn};
use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;

/// Actions the keyboard can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAction {
    Forward,
    Backward,
    Left,
    Right,
    /// Flip the camera-follow flag.
    ToggleFollow,
}

impl MoveAction {
    /// All actions, in declaration order.
    pub const ALL: [MoveAction; 5] = [
        MoveAction::Forward,
        MoveAction::Backward,
        MoveAction::Left,
        MoveAction::Right,
        MoveAction::ToggleFollow,
    ];

    /// Parse the name used in config files (`"Forward"`, `"ToggleFollow"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Name used in config files.
    pub fn name(self) -> &'static str {
        match self {
            MoveAction::Forward => "Forward",
            MoveAction::Backward => "Backward",
            MoveAction::Left => "Left",
            MoveAction::Right => "Right",
            MoveAction::ToggleFollow => "ToggleFollow",
        }
    }
}

/// Which of the four movement directions are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    /// True when no direction is held.
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.backward || self.left || self.right)
    }
}

/// Action to key table. An action is held while any of its keys is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: HashMap<MoveAction, Vec<KeyCode>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(MoveAction::Forward, vec![KeyCode::KeyW, KeyCode::ArrowUp]);
        bindings.insert(MoveAction::Backward, vec![KeyCode::KeyS, KeyCode::ArrowDown]);
        bindings.insert(MoveAction::Left, vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
        bindings.insert(MoveAction::Right, vec![KeyCode::KeyD, KeyCode::ArrowRight]);
        bindings.insert(MoveAction::ToggleFollow, vec![KeyCode::KeyC]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Defaults with config overrides applied on top.
    pub fn from_overrides(overrides: &HashMap<String, Vec<String>>) -> Self {
        let mut bindings = Self::default();
        bindings.apply_overrides(overrides);
        bindings
    }

    /// Replace the key list of every named action. Unknown action or key names
    /// are logged and skipped; an override with no usable keys is ignored.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, Vec<String>>) {
        for (action_name, key_names) in overrides {
            let Some(action) = MoveAction::from_name(action_name) else {
                warn!("Ignoring binding for unknown action '{action_name}'");
                continue;
            };
            let keys: Vec<KeyCode> = key_names
                .iter()
                .filter_map(|name| {
                    let key = parse_key_code(name);
                    if key.is_none() {
                        warn!("Ignoring unknown key '{name}' bound to {action_name}");
                    }
                    key
                })
                .collect();
            if keys.is_empty() {
                continue;
            }
            debug!("{action_name} bound to {keys:?}");
            self.set(action, keys);
        }
    }

    /// Replace the keys bound to `action`.
    pub fn set(&mut self, action: MoveAction, keys: Vec<KeyCode>) {
        self.bindings.insert(action, keys);
    }

    /// Keys bound to `action`.
    pub fn keys(&self, action: MoveAction) -> &[KeyCode] {
        self.bindings.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any key bound to `action` is held.
    pub fn is_held(&self, keyboard: &KeyboardState, action: MoveAction) -> bool {
        self.keys(action).iter().any(|key| keyboard.is_held(*key))
    }

    /// Whether any key bound to `action` went down this frame.
    pub fn just_pressed(&self, keyboard: &KeyboardState, action: MoveAction) -> bool {
        self.keys(action).iter().any(|key| keyboard.just_pressed(*key))
    }

    /// Snapshot of the four movement directions.
    pub fn held_directions(&self, keyboard: &KeyboardState) -> HeldDirections {
        HeldDirections {
            forward: self.is_held(keyboard, MoveAction::Forward),
            backward: self.is_held(keyboard, MoveAction::Backward),
            left: self.is_held(keyboard, MoveAction::Left),
            right: self.is_held(keyboard, MoveAction::Right),
        }
    }
}

/// Parse a winit key code name such as `"KeyW"`, `"ArrowUp"` or `"Digit3"`.
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    if let Some(letter) = name.strip_prefix("Key") {
        let mut chars = letter.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        return letter_key(c);
    }
    if let Some(digit) = name.strip_prefix("Digit") {
        return digit.parse::<u8>().ok().and_then(digit_key);
    }
    Some(match name {
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "AltLeft" => KeyCode::AltLeft,
        "AltRight" => KeyCode::AltRight,
        _ => return None,
    })
}

fn letter_key(c: char) -> Option<KeyCode> {
    Some(match c {
        'A' => KeyCode::KeyA,
        'B' => KeyCode::KeyB,
        'C' => KeyCode::KeyC,
        'D' => KeyCode::KeyD,
        'E' => KeyCode::KeyE,
        'F' => KeyCode::KeyF,
        'G' => KeyCode::KeyG,
        'H' => KeyCode::KeyH,
        'I' => KeyCode::KeyI,
        'J' => KeyCode::KeyJ,
        'K' => KeyCode::KeyK,
        'L' => KeyCode::KeyL,
        'M' => KeyCode::KeyM,
        'N' => KeyCode::KeyN,
        'O' => KeyCode::KeyO,
        'P' => KeyCode::KeyP,
        'Q' => KeyCode::KeyQ,
        'R' => KeyCode::KeyR,
        'S' => KeyCode::KeyS,
        'T' => KeyCode::KeyT,
        'U' => KeyCode::KeyU,
        'V' => KeyCode::KeyV,
        'W' => KeyCode::KeyW,
        'X' => KeyCode::KeyX,
        'Y' => KeyCode::KeyY,
        'Z' => KeyCode::KeyZ,
        _ => return None,
    })
}

fn digit_key(d: u8) -> Option<KeyCode> {
    Some(match d {
        0 => KeyCode::Digit0,
        1 => KeyCode::Digit1,
        2 => KeyCode::Digit2,
        3 => KeyCode::Digit3,
        4 => KeyCode::Digit4,
        5 => KeyCode::Digit5,
        6 => KeyCode::Digit6,
        7 => KeyCode::Digit7,
        8 => KeyCode::Digit8,
        9 => KeyCode::Digit9,
        _ => return None,
    })
}
