//! Text annotations kept as vector data next to the raster snapshot.

use crate::color::Rgba;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A committed piece of text on the board.
///
/// Created when the inline text editor loses focus with non-empty input.
/// Never mutated afterwards; restores replace the whole list from a
/// snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnnotation {
    /// The text content.
    pub content: String,
    /// Top-left corner of the rendered text.
    pub position: Point,
    /// Font size in pixels.
    pub font_size: f64,
    /// Text color.
    pub color: Rgba,
}

impl TextAnnotation {
    /// Create a new annotation.
    pub fn new(content: impl Into<String>, position: Point, font_size: f64, color: Rgba) -> Self {
        Self {
            content: content.into(),
            position,
            font_size,
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_creation() {
        let t = TextAnnotation::new("hello", Point::new(10.0, 20.0), 16.0, Rgba::black());
        assert_eq!(t.content, "hello");
        assert!((t.font_size - 16.0).abs() < f64::EPSILON);
    }
}
