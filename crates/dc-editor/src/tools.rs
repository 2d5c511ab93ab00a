//! Tool system for canvas interactions.
//!
//! A tool turns a press/move/release sequence into a `Gesture` that the
//! session hands to the resolver.

use crate::input::InputEvent;
use dc_core::Point;
use dc_core::vector::inside_circle;
use dc_render::Located;

/// A completed press/release pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// Where the pointer went down, snapped to the atom it landed on.
    pub down: Option<Point>,
    pub up: Point,
    /// The pointer left the press circle before release.
    pub drag_move: bool,
}

// ─── Attach Tool ─────────────────────────────────────────────────────────

pub struct AttachTool {
    hit_radius: f64,
    down: Option<Point>,
    dragging: bool,
}

impl AttachTool {
    pub fn new(hit_radius: f64) -> Self {
        Self {
            hit_radius,
            down: None,
            dragging: false,
        }
    }

    /// Whether a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.down.is_some()
    }

    /// Feed one event. `hit` is the atom under the pointer, if any.
    /// Returns a gesture on release.
    pub fn handle(&mut self, event: &InputEvent, hit: Option<Located>) -> Option<Gesture> {
        let point = event.position();
        match event {
            InputEvent::PointerDown { .. } => {
                self.down = Some(hit.map_or(point, |h| h.position));
                self.dragging = false;
                None
            }
            InputEvent::PointerMove { .. } => {
                if let Some(down) = self.down
                    && !inside_circle(down, point, self.hit_radius)
                {
                    self.dragging = true;
                }
                None
            }
            InputEvent::PointerUp { .. } => {
                let gesture = Gesture {
                    down: self.down.take(),
                    up: point,
                    drag_move: self.dragging,
                };
                self.dragging = false;
                Some(gesture)
            }
        }
    }
}
