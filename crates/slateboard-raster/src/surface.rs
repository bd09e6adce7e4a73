//! RGBA8 software surface.

use crate::font::{self, FONT_HEIGHT, FONT_WIDTH};
use kurbo::{Point, Rect, Size, Vec2};
use slateboard_core::{EncodedImage, Rgba, Surface, SurfaceError, SurfaceResult};
use std::io::Cursor;

/// Line height multiplier for multi-line text.
const LINE_SPACING: f64 = 1.25;
/// Segment count used to approximate ellipse outlines.
const ELLIPSE_SEGMENTS: usize = 64;

/// A CPU raster surface: straight (unpremultiplied) RGBA8 pixels,
/// row-major, top-left origin.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Create a surface filled with a color.
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        let mut surface = Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize) * 4],
        };
        surface.clear(fill);
        surface
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Rgba::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        )
    }

    /// Source-over blend `color` into the pixel at (x, y) with extra
    /// coverage in 0..=1. Out-of-bounds writes are dropped.
    fn blend(&mut self, x: i64, y: i64, color: Rgba, coverage: f64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let alpha = (color.a as f64 / 255.0) * coverage;
        if alpha <= 0.0 {
            return;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = &mut self.pixels[i..i + 4];
        let inv = 1.0 - alpha;
        px[0] = (color.r as f64 * alpha + px[0] as f64 * inv).round() as u8;
        px[1] = (color.g as f64 * alpha + px[1] as f64 * inv).round() as u8;
        px[2] = (color.b as f64 * alpha + px[2] as f64 * inv).round() as u8;
        px[3] = (255.0 * alpha + px[3] as f64 * inv).round() as u8;
    }

    /// Stamp a stroked path given as segments, blending each covered
    /// pixel once (minimum distance over all segments) so overlapping
    /// joints of a translucent stroke do not darken.
    fn stamp_segments(&mut self, points: &[Point], width: f64, color: Rgba) {
        if points.is_empty() {
            return;
        }
        let half = (width / 2.0).max(0.5);

        let mut x0 = f64::INFINITY;
        let mut y0 = f64::INFINITY;
        let mut x1 = f64::NEG_INFINITY;
        let mut y1 = f64::NEG_INFINITY;
        for p in points {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        let pad = half + 1.0;
        let min_x = ((x0 - pad).floor() as i64).max(0);
        let min_y = ((y0 - pad).floor() as i64).max(0);
        let max_x = ((x1 + pad).ceil() as i64).min(self.width as i64 - 1);
        let max_y = ((y1 + pad).ceil() as i64).min(self.height as i64 - 1);

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let center = Point::new(px as f64 + 0.5, py as f64 + 0.5);
                let d = if points.len() == 1 {
                    (center - points[0]).hypot()
                } else {
                    points
                        .windows(2)
                        .map(|w| point_to_segment_dist(center, w[0], w[1]))
                        .fold(f64::INFINITY, f64::min)
                };
                // 1px edge smoothing.
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage);
                }
            }
        }
    }
}

/// Distance from a point to a line segment (a to b).
fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Corner points of a rect as a closed polyline.
fn rect_outline(rect: Rect) -> [Point; 5] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x0, rect.y0),
    ]
}

impl Surface for RasterSurface {
    fn size(&self) -> Size {
        Size::new(self.width as f64, self.height as f64)
    }

    fn resize(&mut self, width: u32, height: u32, fill: Rgba) {
        if width == self.width && height == self.height {
            return;
        }
        let mut next = vec![0; (width as usize) * (height as usize) * 4];
        for chunk in next.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[fill.r, fill.g, fill.b, fill.a]);
        }
        // Keep the overlapping content, anchored top-left.
        let copy_w = (self.width.min(width) as usize) * 4;
        for row in 0..self.height.min(height) as usize {
            let src = row * (self.width as usize) * 4;
            let dst = row * (width as usize) * 4;
            next[dst..dst + copy_w].copy_from_slice(&self.pixels[src..src + copy_w]);
        }
        self.width = width;
        self.height = height;
        self.pixels = next;
    }

    fn clear(&mut self, color: Rgba) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba) {
        self.stamp_segments(points, width, color);
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba) {
        self.stamp_segments(&rect_outline(rect), width, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let min_x = (rect.x0.floor() as i64).max(0);
        let min_y = (rect.y0.floor() as i64).max(0);
        let max_x = (rect.x1.ceil() as i64).min(self.width as i64 - 1);
        let max_y = (rect.y1.ceil() as i64).min(self.height as i64 - 1);
        for py in min_y..=max_y {
            for px in min_x..=max_x {
                // Coverage = overlap of the pixel square with the rect.
                let ox = (rect.x1.min(px as f64 + 1.0) - rect.x0.max(px as f64)).clamp(0.0, 1.0);
                let oy = (rect.y1.min(py as f64 + 1.0) - rect.y0.max(py as f64)).clamp(0.0, 1.0);
                let coverage = ox * oy;
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage);
                }
            }
        }
    }

    fn stroke_ellipse(&mut self, rect: Rect, width: f64, color: Rgba) {
        let cx = rect.center().x;
        let cy = rect.center().y;
        let rx = rect.width() / 2.0;
        let ry = rect.height() / 2.0;
        let mut points = Vec::with_capacity(ELLIPSE_SEGMENTS + 1);
        for i in 0..=ELLIPSE_SEGMENTS {
            let angle = (i as f64 / ELLIPSE_SEGMENTS as f64) * std::f64::consts::TAU;
            points.push(Point::new(cx + rx * angle.cos(), cy + ry * angle.sin()));
        }
        self.stamp_segments(&points, width, color);
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Rgba) {
        let rx = rect.width() / 2.0;
        let ry = rect.height() / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let cx = rect.center().x;
        let cy = rect.center().y;
        let min_x = (rect.x0.floor() as i64).max(0);
        let min_y = (rect.y0.floor() as i64).max(0);
        let max_x = (rect.x1.ceil() as i64).min(self.width as i64 - 1);
        let max_y = (rect.y1.ceil() as i64).min(self.height as i64 - 1);
        let edge = rx.min(ry);
        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = (px as f64 + 0.5 - cx) / rx;
                let dy = (py as f64 + 0.5 - cy) / ry;
                let r = (dx * dx + dy * dy).sqrt();
                // Approximate signed distance to the boundary for edge
                // smoothing.
                let coverage = ((1.0 - r) * edge + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, position: Point, font_size: f64, color: Rgba) {
        let cell = font_size.max(1.0);
        let scale = cell / FONT_HEIGHT as f64;
        let mut pen_x = position.x;
        let mut pen_y = position.y;
        for c in text.chars() {
            if c == '\n' {
                pen_x = position.x;
                pen_y += cell * LINE_SPACING;
                continue;
            }
            let bitmap = font::glyph(c);
            let min_x = (pen_x.floor() as i64).max(0);
            let min_y = (pen_y.floor() as i64).max(0);
            let max_x = ((pen_x + cell).ceil() as i64).min(self.width as i64);
            let max_y = ((pen_y + cell).ceil() as i64).min(self.height as i64);
            for py in min_y..max_y {
                for px in min_x..max_x {
                    // Nearest-neighbor sample of the glyph bitmap.
                    let col = ((px as f64 + 0.5 - pen_x) / scale).floor();
                    let row = ((py as f64 + 0.5 - pen_y) / scale).floor();
                    if !(0.0..FONT_WIDTH as f64).contains(&col)
                        || !(0.0..FONT_HEIGHT as f64).contains(&row)
                    {
                        continue;
                    }
                    let bit = 1u8 << (FONT_WIDTH - 1 - col as usize);
                    if bitmap[row as usize] & bit != 0 {
                        self.blend(px, py, color, 1.0);
                    }
                }
            }
            pen_x += cell;
        }
    }

    fn draw_image(&mut self, image: &EncodedImage) -> SurfaceResult<()> {
        // Decode fully before touching the buffer so a malformed image
        // leaves the surface in its pre-decode state.
        let decoded = image::load_from_memory(image.bytes())
            .map_err(|e| SurfaceError::Decode(e.to_string()))?
            .to_rgba8();
        let (iw, ih) = decoded.dimensions();
        if iw == 0 || ih == 0 {
            return Err(SurfaceError::Decode("zero-sized image".to_string()));
        }

        if (iw, ih) == (self.width, self.height) {
            self.pixels.copy_from_slice(decoded.as_raw());
            return Ok(());
        }

        log::debug!(
            "scaling decoded image {}x{} onto {}x{} surface",
            iw,
            ih,
            self.width,
            self.height
        );
        let src = decoded.as_raw();
        for y in 0..self.height as usize {
            let sy = y * ih as usize / self.height as usize;
            for x in 0..self.width as usize {
                let sx = x * iw as usize / self.width as usize;
                let si = (sy * iw as usize + sx) * 4;
                let di = (y * self.width as usize + x) * 4;
                self.pixels[di..di + 4].copy_from_slice(&src[si..si + 4]);
            }
        }
        Ok(())
    }

    fn encode(&self) -> SurfaceResult<EncodedImage> {
        let img =
            image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
                .ok_or_else(|| SurfaceError::Encode("pixel buffer size mismatch".to_string()))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        Ok(EncodedImage::from_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_surface() -> RasterSurface {
        RasterSurface::new(32, 32, Rgba::white())
    }

    #[test]
    fn test_new_is_filled() {
        let s = RasterSurface::new(4, 4, Rgba::new(1, 2, 3, 255));
        assert_eq!(s.pixel(0, 0), Rgba::new(1, 2, 3, 255));
        assert_eq!(s.pixel(3, 3), Rgba::new(1, 2, 3, 255));
    }

    #[test]
    fn test_stroke_changes_pixels() {
        let mut s = white_surface();
        s.stroke_polyline(
            &[Point::new(4.0, 16.0), Point::new(28.0, 16.0)],
            4.0,
            Rgba::black(),
        );
        assert_eq!(s.pixel(16, 16), Rgba::black());
        assert_eq!(s.pixel(16, 2), Rgba::white());
    }

    #[test]
    fn test_single_point_draws_dot() {
        let mut s = white_surface();
        s.stroke_polyline(&[Point::new(16.0, 16.0)], 6.0, Rgba::black());
        assert_eq!(s.pixel(16, 16), Rgba::black());
    }

    #[test]
    fn test_translucent_stroke_blends_once_at_joints() {
        let mut s = white_surface();
        let half_red = Rgba::new(255, 0, 0, 128);
        s.stroke_polyline(
            &[
                Point::new(4.0, 16.0),
                Point::new(16.0, 16.0),
                Point::new(28.0, 16.0),
            ],
            4.0,
            half_red,
        );
        // The joint pixel matches a mid-segment pixel exactly.
        assert_eq!(s.pixel(16, 16), s.pixel(10, 16));
    }

    #[test]
    fn test_fill_rect() {
        let mut s = white_surface();
        s.fill_rect(Rect::new(8.0, 8.0, 24.0, 24.0), Rgba::black());
        assert_eq!(s.pixel(16, 16), Rgba::black());
        assert_eq!(s.pixel(2, 2), Rgba::white());
    }

    #[test]
    fn test_fill_ellipse_center_and_corner() {
        let mut s = white_surface();
        s.fill_ellipse(Rect::new(4.0, 4.0, 28.0, 28.0), Rgba::black());
        assert_eq!(s.pixel(16, 16), Rgba::black());
        // Rect corner is outside the inscribed ellipse.
        assert_eq!(s.pixel(5, 5), Rgba::white());
    }

    #[test]
    fn test_text_draws_pixels() {
        let mut s = white_surface();
        s.fill_text("H", Point::new(4.0, 4.0), 16.0, Rgba::black());
        let inked = s
            .pixels()
            .chunks_exact(4)
            .filter(|p| p[0] == 0 && p[3] == 255)
            .count();
        assert!(inked > 0);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let mut s = white_surface();
        s.fill_rect(Rect::new(0.0, 0.0, 16.0, 16.0), Rgba::new(10, 200, 30, 255));
        let encoded = s.encode().unwrap();

        let mut other = RasterSurface::new(32, 32, Rgba::black());
        other.draw_image(&encoded).unwrap();
        assert_eq!(other.pixels(), s.pixels());
    }

    #[test]
    fn test_decode_failure_leaves_pixels() {
        let mut s = white_surface();
        let before = s.pixels().to_vec();
        let err = s.draw_image(&EncodedImage::from_bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]));
        assert!(matches!(err, Err(SurfaceError::Decode(_))));
        assert_eq!(s.pixels(), &before[..]);
    }

    #[test]
    fn test_draw_image_scales_to_surface() {
        let small = RasterSurface::new(8, 8, Rgba::new(50, 60, 70, 255));
        let encoded = small.encode().unwrap();

        let mut big = RasterSurface::new(16, 16, Rgba::black());
        big.draw_image(&encoded).unwrap();
        assert_eq!(big.pixel(0, 0), Rgba::new(50, 60, 70, 255));
        assert_eq!(big.pixel(15, 15), Rgba::new(50, 60, 70, 255));
    }

    #[test]
    fn test_resize_preserves_overlap() {
        let mut s = RasterSurface::new(8, 8, Rgba::black());
        s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Rgba::new(9, 9, 9, 255));
        s.resize(12, 12, Rgba::white());
        assert_eq!(s.pixel(4, 4), Rgba::new(9, 9, 9, 255));
        assert_eq!(s.pixel(10, 10), Rgba::white());

        s.resize(4, 4, Rgba::white());
        assert_eq!(s.pixel(3, 3), Rgba::new(9, 9, 9, 255));
    }
}
