//! Stroke styling.

use crate::color::Rgba;
use serde::{Deserialize, Serialize};

/// Color and width of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgba,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Rgba::black(),
            width: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let s = StrokeStyle::default();
        assert_eq!(s.color, Rgba::black());
        assert!((s.width - 5.0).abs() < f64::EPSILON);
    }
}
