//! Serializable RGBA8 color with `peniko::Color` interop.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Same color with the alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Same color with the alpha channel scaled by `factor` (clamped to 0..=1).
    pub fn scale_alpha(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let a = (self.a as f64 * factor).round() as u8;
        Self { a, ..self }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_scaling() {
        let c = Rgba::new(10, 20, 30, 200);
        assert_eq!(c.scale_alpha(0.5).a, 100);
        assert_eq!(c.scale_alpha(2.0).a, 200);
        assert_eq!(c.scale_alpha(0.0).a, 0);
        // Color channels untouched
        assert_eq!(c.scale_alpha(0.5).r, 10);
    }

    #[test]
    fn test_peniko_round_trip() {
        let c = Rgba::new(1, 2, 3, 4);
        let p: Color = c.into();
        assert_eq!(Rgba::from(p), c);
    }
}
