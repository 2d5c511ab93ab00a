//! Input abstraction layer.
//!
//! Mouse, touch and stylus events arrive from the host already
//! normalized into canvas coordinates.

use dc_core::Point;

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved, pressed or not.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn position(&self) -> Point {
        match *self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Point::new(x, y)
            }
        }
    }
}
