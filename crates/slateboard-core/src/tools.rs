//! Tool system for the whiteboard.

use crate::config::BoardConfig;
use crate::shapes::{PendingShape, ShapeKind};
use crate::style::StrokeStyle;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Pen,
    Highlighter,
    Eraser,
    Shape,
    Text,
}

impl ToolKind {
    /// Display name for the UI.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Highlighter => "Highlighter",
            ToolKind::Eraser => "Eraser",
            ToolKind::Shape => "Shape",
            ToolKind::Text => "Text",
        }
    }

    /// All available tools.
    pub fn all() -> &'static [ToolKind] {
        &[
            ToolKind::Pen,
            ToolKind::Highlighter,
            ToolKind::Eraser,
            ToolKind::Shape,
            ToolKind::Text,
        ]
    }

    /// Whether this tool draws freehand strokes.
    pub fn is_stroking(self) -> bool {
        matches!(
            self,
            ToolKind::Pen | ToolKind::Highlighter | ToolKind::Eraser
        )
    }
}

/// State of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Waiting for interaction.
    #[default]
    Idle,
    /// Freehand stroke in progress; segments commit eagerly to the
    /// surface.
    Stroking {
        /// Last point the stroke reached.
        last: Point,
    },
    /// Shape gesture in progress; rendered as a preview only.
    Shaping { start: Point, current: Point },
    /// Inline text editor open at the anchor point.
    TextEditing { anchor: Point },
}

/// Manages the current tool, shape selection, style and gesture state.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Shape drawn by the shape tool.
    pub shape_kind: ShapeKind,
    /// Style applied to new strokes, shapes and text.
    pub style: StrokeStyle,
    /// Current gesture state.
    pub state: ToolState,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch tools, abandoning any in-progress gesture.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Select a shape and switch to the shape tool.
    pub fn set_shape(&mut self, kind: ShapeKind) {
        self.shape_kind = kind;
        self.set_tool(ToolKind::Shape);
    }

    /// Whether a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// The stroke style the current tool actually paints with.
    ///
    /// The highlighter widens and becomes translucent; the eraser paints
    /// the background color with a widened stroke.
    pub fn effective_style(&self, config: &BoardConfig) -> StrokeStyle {
        match self.current_tool {
            ToolKind::Highlighter => StrokeStyle::new(
                self.style.color.scale_alpha(config.highlighter_opacity),
                self.style.width * config.highlighter_width_factor,
            ),
            ToolKind::Eraser => StrokeStyle::new(
                config.background,
                self.style.width + config.eraser_width_offset,
            ),
            _ => self.style,
        }
    }

    /// The pending shape for an in-progress shape gesture.
    pub fn pending_shape(&self) -> Option<PendingShape> {
        if let ToolState::Shaping { start, current } = self.state {
            Some(PendingShape {
                kind: self.shape_kind,
                start,
                end: current,
                style: self.style,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    #[test]
    fn test_tool_selection_resets_state() {
        let mut tm = ToolManager::new();
        tm.state = ToolState::Stroking {
            last: Point::new(1.0, 1.0),
        };
        tm.set_tool(ToolKind::Text);
        assert_eq!(tm.current_tool, ToolKind::Text);
        assert!(!tm.is_active());
    }

    #[test]
    fn test_shape_selection_switches_tool() {
        let mut tm = ToolManager::new();
        tm.set_shape(ShapeKind::Ellipse);
        assert_eq!(tm.current_tool, ToolKind::Shape);
        assert_eq!(tm.shape_kind, ShapeKind::Ellipse);
    }

    #[test]
    fn test_effective_style_highlighter() {
        let config = BoardConfig::default();
        let mut tm = ToolManager::new();
        tm.style = StrokeStyle::new(Rgba::new(255, 0, 0, 255), 4.0);
        tm.set_tool(ToolKind::Highlighter);

        let s = tm.effective_style(&config);
        assert!((s.width - 12.0).abs() < f64::EPSILON);
        assert_eq!(s.color.a, 102); // 255 * 0.4
    }

    #[test]
    fn test_effective_style_eraser_uses_background() {
        let config = BoardConfig::default();
        let mut tm = ToolManager::new();
        tm.style = StrokeStyle::new(Rgba::black(), 5.0);
        tm.set_tool(ToolKind::Eraser);

        let s = tm.effective_style(&config);
        assert_eq!(s.color, config.background);
        assert!((s.width - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pending_shape_only_while_shaping() {
        let mut tm = ToolManager::new();
        assert!(tm.pending_shape().is_none());

        tm.state = ToolState::Shaping {
            start: Point::new(0.0, 0.0),
            current: Point::new(10.0, 10.0),
        };
        let shape = tm.pending_shape().unwrap();
        assert_eq!(shape.kind, ShapeKind::Rectangle);
    }
}
