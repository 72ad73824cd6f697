//! Frame-coherent pointer state for the orbit camera.
//!
//! [`PointerState`] accumulates winit cursor, button, and wheel events during
//! a frame. The orbit camera only cares about two aggregates: how far the
//! cursor moved while the left button was held, and the net scroll. Both are
//! drained once per frame with [`clear_transients`](PointerState::clear_transients).

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Tracks cursor position, left-button drag, and scroll for one frame.
#[derive(Debug, Clone)]
pub struct PointerState {
    position: Vec2,
    drag_delta: Vec2,
    scroll: f32,
    left_held: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            drag_delta: Vec2::ZERO,
            scroll: 0.0,
            left_held: false,
        }
    }

    /// Process a `CursorMoved` event. Movement only accumulates into the drag
    /// delta while the left button is held.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if self.left_held {
            self.drag_delta += new_pos - self.position;
        }
        self.position = new_pos;
    }

    /// Process a `MouseInput` event. Only the left button drives the drag.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.left_held = state == ElementState::Pressed;
        }
    }

    /// Process a `MouseWheel` event.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => {
                self.scroll += y;
            }
            MouseScrollDelta::PixelDelta(pos) => {
                // Normalize pixel delta: ~40 pixels per line
                self.scroll += (pos.y / 40.0) as f32;
            }
        }
    }

    /// Cursor position in window-logical coordinates.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Drag movement accumulated this frame while the left button was held.
    #[must_use]
    pub fn drag_delta(&self) -> Vec2 {
        self.drag_delta
    }

    /// Net scroll accumulated this frame (positive = wheel up).
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Whether the left button is currently held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.left_held
    }

    /// Clears per-frame transients. Call at end of frame.
    pub fn clear_transients(&mut self) {
        self.drag_delta = Vec2::ZERO;
        self.scroll = 0.0;
    }
}
