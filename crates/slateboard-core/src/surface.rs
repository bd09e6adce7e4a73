//! The drawing surface seam between the board logic and a render backend.

use crate::color::Rgba;
use crate::snapshot::EncodedImage;
use kurbo::{Point, Rect, Size};
use thiserror::Error;

/// Surface errors.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("image decode failed: {0}")]
    Decode(String),
    #[error("image encode failed: {0}")]
    Encode(String),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// A 2D drawing surface.
///
/// Implementations rasterize into their own pixel store. All coordinates
/// are surface-relative with the origin at the top-left corner.
pub trait Surface {
    /// Current surface size in pixels.
    fn size(&self) -> Size;

    /// Resize the surface, preserving overlapping content. Newly exposed
    /// pixels are filled with `fill`.
    fn resize(&mut self, width: u32, height: u32, fill: Rgba);

    /// Fill the whole surface with a color.
    fn clear(&mut self, color: Rgba);

    /// Stroke a polyline with round caps and joins.
    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Stroke the outline of the ellipse inscribed in `rect`.
    fn stroke_ellipse(&mut self, rect: Rect, width: f64, color: Rgba);

    /// Fill the ellipse inscribed in `rect`.
    fn fill_ellipse(&mut self, rect: Rect, color: Rgba);

    /// Draw text with its top-left corner at `position`.
    fn fill_text(&mut self, text: &str, position: Point, font_size: f64, color: Rgba);

    /// Decode an encoded image and draw it over the whole surface,
    /// scaling when the dimensions differ.
    ///
    /// On decode failure the surface pixels must be left untouched.
    fn draw_image(&mut self, image: &EncodedImage) -> SurfaceResult<()>;

    /// Encode the current surface pixels as a transportable image (PNG).
    fn encode(&self) -> SurfaceResult<EncodedImage>;
}
