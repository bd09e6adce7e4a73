//! Pointer input events.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event for unified mouse/touch handling.
///
/// Positions are relative to the surface origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    Leave { position: Point },
}

impl PointerEvent {
    /// The position carried by the event.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position }
            | PointerEvent::Leave { position } => position,
        }
    }
}
