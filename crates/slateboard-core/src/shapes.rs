//! Shape gestures: rectangle, ellipse and line drawn between two points.

use crate::color::Rgba;
use crate::style::StrokeStyle;
use crate::surface::Surface;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Fill alpha for the translucent preview of a pending shape.
const PREVIEW_FILL_ALPHA: u8 = 0x22;
/// Fill alpha for a committed shape.
const COMMIT_FILL_ALPHA: u8 = 0x33;
/// Stroke opacity for the translucent preview.
const PREVIEW_STROKE_OPACITY: f64 = 0.5;

/// Available shape tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Line,
}

impl ShapeKind {
    /// Display name for the UI.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Ellipse => "Ellipse",
            ShapeKind::Line => "Line",
        }
    }

    /// All available shape kinds.
    pub fn all() -> &'static [ShapeKind] {
        &[ShapeKind::Rectangle, ShapeKind::Ellipse, ShapeKind::Line]
    }
}

/// An in-progress shape gesture between two corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingShape {
    pub kind: ShapeKind,
    pub start: Point,
    pub end: Point,
    pub style: StrokeStyle,
}

impl PendingShape {
    /// Normalized bounding rectangle of the gesture.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    /// Draw the shape onto a surface. A preview draws translucent; a
    /// commit draws at full stroke opacity.
    pub fn draw(&self, surface: &mut dyn Surface, preview: bool) {
        let stroke = if preview {
            self.style.color.scale_alpha(PREVIEW_STROKE_OPACITY)
        } else {
            self.style.color
        };
        let fill_alpha = if preview {
            PREVIEW_FILL_ALPHA
        } else {
            COMMIT_FILL_ALPHA
        };
        let fill = self.style.color.with_alpha(fill_alpha);

        match self.kind {
            ShapeKind::Rectangle => {
                surface.fill_rect(self.rect(), fill);
                surface.stroke_rect(self.rect(), self.style.width, stroke);
            }
            ShapeKind::Ellipse => {
                surface.fill_ellipse(self.rect(), fill);
                surface.stroke_ellipse(self.rect(), self.style.width, stroke);
            }
            ShapeKind::Line => {
                surface.stroke_polyline(&[self.start, self.end], self.style.width, stroke);
            }
        }
    }
}
