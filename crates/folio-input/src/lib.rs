//! Keyboard and pointer state plus the key bindings that drive avatar movement.

pub mod bindings;
pub mod keyboard;
pub mod pointer;

pub use bindings::{HeldDirections, KeyBindings, MoveAction, parse_key_code};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use pointer::PointerState;
