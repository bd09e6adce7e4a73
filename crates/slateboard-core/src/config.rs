//! Board configuration.

use crate::color::Rgba;
use serde::{Deserialize, Serialize};

/// Maximum number of snapshots to keep by default.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Tunable board parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Maximum number of retained snapshots; oldest evicted first.
    pub max_history: usize,
    /// Surface background color; also what the eraser paints with.
    pub background: Rgba,
    /// Initial stroke color.
    pub default_color: Rgba,
    /// Initial stroke width in pixels.
    pub default_stroke_width: f64,
    /// Opacity applied to highlighter strokes.
    pub highlighter_opacity: f64,
    /// Width multiplier for highlighter strokes.
    pub highlighter_width_factor: f64,
    /// Extra width added to eraser strokes.
    pub eraser_width_offset: f64,
    /// Text font size as a multiple of the current stroke width.
    pub text_size_factor: f64,
    /// File name offered when exporting the board as a PNG.
    pub export_file_name: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            background: Rgba::new(240, 240, 245, 255),
            default_color: Rgba::black(),
            default_stroke_width: 5.0,
            highlighter_opacity: 0.4,
            highlighter_width_factor: 3.0,
            eraser_width_offset: 10.0,
            text_size_factor: 2.0,
            export_file_name: "slateboard.png".to_string(),
        }
    }
}
