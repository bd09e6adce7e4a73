//! Software raster backend for Slateboard.
//!
//! Implements the core [`Surface`](slateboard_core::Surface) trait over an
//! RGBA8 pixel buffer, with PNG encode/decode and an embedded bitmap font.

pub mod font;
mod surface;

pub use surface::RasterSurface;
