//! Pointer state used by the orbit camera and planet picking.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Cursor position, primary-button drag and wheel accumulated over a frame.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Vec2,
    drag: Vec2,
    wheel: f32,
    primary_down: bool,
    /// Cursor offset from where the primary button went down. Survives frame resets.
    press_travel: Vec2,
    /// Set once `press_travel` has left the click slop during this press.
    dragged_since_press: bool,
    click: Option<Vec2>,
}

/// Drag distance in pixels below which a press/release pair counts as a click.
const CLICK_SLOP: f32 = 4.0;

impl PointerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event. Movement while the primary button is
    /// down accumulates into the drag delta and the travel since the press.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if self.primary_down {
            let step = new_pos - self.position;
            self.drag += step;
            self.press_travel += step;
            if self.press_travel.length() > CLICK_SLOP {
                self.dragged_since_press = true;
            }
        }
        self.position = new_pos;
    }

    /// Process a `MouseInput` event. Releasing the left button without the
    /// cursor ever leaving `CLICK_SLOP` pixels of the press point records a
    /// click at the cursor.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => {
                self.primary_down = true;
                self.press_travel = Vec2::ZERO;
                self.dragged_since_press = false;
            }
            ElementState::Released => {
                if self.primary_down && !self.dragged_since_press {
                    self.click = Some(self.position);
                }
                self.primary_down = false;
            }
        }
    }

    /// Process a `MouseWheel` event. Positive values scroll away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => self.wheel += y,
            // ~40 pixels per line
            MouseScrollDelta::PixelDelta(pos) => self.wheel += (pos.y / 40.0) as f32,
        }
    }

    /// Current cursor position in window pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Drag accumulated this frame while the primary button was held.
    pub fn drag_delta(&self) -> Vec2 {
        self.drag
    }

    /// Wheel lines accumulated this frame.
    pub fn wheel(&self) -> f32 {
        self.wheel
    }

    /// Cursor position of a click completed this frame, if any.
    pub fn click(&self) -> Option<Vec2> {
        self.click
    }

    pub fn is_primary_down(&self) -> bool {
        self.primary_down
    }

    /// Reset per-frame drag, wheel and click. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.drag = Vec2::ZERO;
        self.wheel = 0.0;
        self.click = None;
    }
}
