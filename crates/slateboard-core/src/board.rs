//! The board: one owned state object coordinating pointer events, the
//! drawing surface and the snapshot history.

use crate::annotation::TextAnnotation;
use crate::color::Rgba;
use crate::config::BoardConfig;
use crate::history::History;
use crate::input::PointerEvent;
use crate::present::Presenter;
use crate::shapes::ShapeKind;
use crate::snapshot::{EncodedImage, Snapshot};
use crate::style::StrokeStyle;
use crate::surface::{Surface, SurfaceResult};
use crate::tools::{ToolKind, ToolManager, ToolState};
use kurbo::Point;

/// Whiteboard state: config, history, live annotations and the tool state
/// machine. Every handler takes the surface explicitly; the board holds no
/// reference to it.
#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    history: History,
    /// Annotations currently on the board. Replaced wholesale on restore.
    texts: Vec<TextAnnotation>,
    tools: ToolManager,
    presenter: Presenter,
}

impl Board {
    /// Create a board. Call [`Board::init`] once a surface exists to
    /// record the initial blank snapshot.
    pub fn new(config: BoardConfig) -> Self {
        let mut tools = ToolManager::new();
        tools.style = StrokeStyle::new(config.default_color, config.default_stroke_width);
        Self {
            history: History::new(config.max_history),
            texts: Vec::new(),
            tools,
            presenter: Presenter::new(),
            config,
        }
    }

    /// Clear the surface to the background color and record the initial
    /// blank snapshot.
    pub fn init(&mut self, surface: &mut dyn Surface) -> SurfaceResult<()> {
        surface.clear(self.config.background);
        self.record(surface)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn shape(&self) -> ShapeKind {
        self.tools.shape_kind
    }

    pub fn style(&self) -> StrokeStyle {
        self.tools.style
    }

    pub fn state(&self) -> ToolState {
        self.tools.state
    }

    /// Annotations currently on the board.
    pub fn texts(&self) -> &[TextAnnotation] {
        &self.texts
    }

    /// The snapshot history (for affordances and inspection).
    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    pub fn set_shape(&mut self, kind: ShapeKind) {
        self.tools.set_shape(kind);
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.tools.style.color = color;
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.tools.style.width = width.max(1.0);
    }

    /// Dispatch a pointer event to the matching handler.
    pub fn handle_pointer(
        &mut self,
        surface: &mut dyn Surface,
        event: PointerEvent,
    ) -> SurfaceResult<()> {
        match event {
            PointerEvent::Down { position } => self.pointer_down(surface, position),
            PointerEvent::Move { position } => self.pointer_move(surface, position),
            PointerEvent::Up { position } => self.pointer_up(surface, position),
            PointerEvent::Leave { position } => self.pointer_leave(surface, position),
        }
    }

    /// Begin a gesture for the current tool.
    pub fn pointer_down(
        &mut self,
        _surface: &mut dyn Surface,
        position: Point,
    ) -> SurfaceResult<()> {
        if self.tools.is_active() {
            return Ok(());
        }
        self.tools.state = match self.tools.current_tool {
            ToolKind::Pen | ToolKind::Highlighter | ToolKind::Eraser => {
                ToolState::Stroking { last: position }
            }
            ToolKind::Shape => ToolState::Shaping {
                start: position,
                current: position,
            },
            ToolKind::Text => ToolState::TextEditing { anchor: position },
        };
        Ok(())
    }

    /// Advance a gesture: strokes commit a segment eagerly, shapes
    /// re-render their preview over the committed snapshot.
    pub fn pointer_move(
        &mut self,
        surface: &mut dyn Surface,
        position: Point,
    ) -> SurfaceResult<()> {
        match self.tools.state {
            ToolState::Stroking { last } => {
                let style = self.tools.effective_style(&self.config);
                surface.stroke_polyline(&[last, position], style.width, style.color);
                self.tools.state = ToolState::Stroking { last: position };
            }
            ToolState::Shaping { start, .. } => {
                self.tools.state = ToolState::Shaping {
                    start,
                    current: position,
                };
                // The committed snapshot stays untouched; redraw it as the
                // base and overlay the translucent preview.
                if self.present_current(surface) {
                    if let Some(shape) = self.tools.pending_shape() {
                        shape.draw(surface, true);
                    }
                }
            }
            ToolState::Idle | ToolState::TextEditing { .. } => {}
        }
        Ok(())
    }

    /// End a gesture and commit a snapshot.
    pub fn pointer_up(&mut self, surface: &mut dyn Surface, position: Point) -> SurfaceResult<()> {
        match self.tools.state {
            ToolState::Stroking { last } => {
                // Commit the final segment so taps leave a dot.
                let style = self.tools.effective_style(&self.config);
                surface.stroke_polyline(&[last, position], style.width, style.color);
                self.tools.state = ToolState::Idle;
                self.record(surface)?;
            }
            ToolState::Shaping { start, .. } => {
                self.tools.state = ToolState::Shaping {
                    start,
                    current: position,
                };
                if self.present_current(surface) {
                    if let Some(shape) = self.tools.pending_shape() {
                        shape.draw(surface, false);
                    }
                }
                self.tools.state = ToolState::Idle;
                self.record(surface)?;
            }
            // Text editing ends on editor focus loss, not pointer-up.
            ToolState::Idle | ToolState::TextEditing { .. } => {}
        }
        Ok(())
    }

    /// A pointer leaving the surface ends strokes and shapes like
    /// pointer-up.
    pub fn pointer_leave(
        &mut self,
        surface: &mut dyn Surface,
        position: Point,
    ) -> SurfaceResult<()> {
        match self.tools.state {
            ToolState::Stroking { .. } | ToolState::Shaping { .. } => {
                self.pointer_up(surface, position)
            }
            _ => Ok(()),
        }
    }

    /// Commit the inline text editor's content.
    ///
    /// Non-empty input becomes a [`TextAnnotation`] and a new snapshot;
    /// empty input is discarded. Either way the board returns to idle.
    pub fn commit_text(&mut self, surface: &mut dyn Surface, input: &str) -> SurfaceResult<()> {
        let ToolState::TextEditing { anchor } = self.tools.state else {
            return Ok(());
        };
        self.tools.state = ToolState::Idle;
        if input.is_empty() {
            return Ok(());
        }

        let style = self.tools.style;
        let annotation = TextAnnotation::new(
            input,
            anchor,
            style.width * self.config.text_size_factor,
            style.color,
        );
        surface.fill_text(
            &annotation.content,
            annotation.position,
            annotation.font_size,
            annotation.color,
        );
        self.texts.push(annotation);
        self.record(surface)
    }

    /// Step back one snapshot and present it. Returns whether a step was
    /// taken. Ignored while a gesture is in progress.
    pub fn undo(&mut self, surface: &mut dyn Surface) -> SurfaceResult<bool> {
        if self.tools.is_active() {
            return Ok(false);
        }
        let Some(snapshot) = self.history.undo().cloned() else {
            return Ok(false);
        };
        self.restore(surface, snapshot);
        Ok(true)
    }

    /// Step forward one snapshot and present it. Returns whether a step
    /// was taken. Ignored while a gesture is in progress.
    pub fn redo(&mut self, surface: &mut dyn Surface) -> SurfaceResult<bool> {
        if self.tools.is_active() {
            return Ok(false);
        }
        let Some(snapshot) = self.history.redo().cloned() else {
            return Ok(false);
        };
        self.restore(surface, snapshot);
        Ok(true)
    }

    /// Clear the board: drop all annotations, blank the surface and record
    /// a snapshot of the blank state.
    pub fn clear(&mut self, surface: &mut dyn Surface) -> SurfaceResult<()> {
        self.tools.state = ToolState::Idle;
        self.texts.clear();
        surface.clear(self.config.background);
        self.record(surface)
    }

    /// Encode the current surface for export.
    pub fn export(&self, surface: &dyn Surface) -> SurfaceResult<EncodedImage> {
        surface.encode()
    }

    /// Propagate a host resize to the surface and redraw the current
    /// snapshot at the new size.
    pub fn surface_resized(
        &mut self,
        surface: &mut dyn Surface,
        width: u32,
        height: u32,
    ) -> SurfaceResult<()> {
        surface.resize(width, height, self.config.background);
        self.present_current(surface);
        Ok(())
    }

    /// Restore texts and pixels from a snapshot.
    fn restore(&mut self, surface: &mut dyn Surface, snapshot: Snapshot) {
        self.texts = snapshot.texts.clone();
        let token = self.presenter.begin();
        if let Err(err) = self.presenter.complete(token, surface, &snapshot) {
            // Malformed raster: keep the surface as it was. The history
            // index has still moved.
            log::warn!("snapshot restore failed, surface left unchanged: {err}");
        }
    }

    /// Present the current snapshot as the base image. Returns whether it
    /// was applied.
    fn present_current(&mut self, surface: &mut dyn Surface) -> bool {
        let Some(snapshot) = self.history.current().cloned() else {
            return false;
        };
        let token = self.presenter.begin();
        match self.presenter.complete(token, surface, &snapshot) {
            Ok(applied) => applied,
            Err(err) => {
                log::warn!("base snapshot redraw failed: {err}");
                false
            }
        }
    }

    /// Capture the surface and annotations into a new history entry.
    fn record(&mut self, surface: &mut dyn Surface) -> SurfaceResult<()> {
        let raster = surface.encode()?;
        self.history.record(Snapshot::capture(raster, &self.texts));
        log::debug!(
            "recorded snapshot {}/{}",
            self.history.index() + 1,
            self.history.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Rect, Size};

    /// Surface double that records drawing commands.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        commands: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Size {
            Size::new(100.0, 100.0)
        }

        fn resize(&mut self, width: u32, height: u32, _fill: Rgba) {
            self.commands.push(format!("resize {width}x{height}"));
        }

        fn clear(&mut self, _color: Rgba) {
            self.commands.push("clear".into());
        }

        fn stroke_polyline(&mut self, points: &[Point], _width: f64, _color: Rgba) {
            self.commands.push(format!("polyline {}", points.len()));
        }

        fn stroke_rect(&mut self, _rect: Rect, _width: f64, _color: Rgba) {
            self.commands.push("stroke_rect".into());
        }

        fn fill_rect(&mut self, _rect: Rect, _color: Rgba) {
            self.commands.push("fill_rect".into());
        }

        fn stroke_ellipse(&mut self, _rect: Rect, _width: f64, _color: Rgba) {
            self.commands.push("stroke_ellipse".into());
        }

        fn fill_ellipse(&mut self, _rect: Rect, _color: Rgba) {
            self.commands.push("fill_ellipse".into());
        }

        fn fill_text(&mut self, text: &str, _position: Point, _font_size: f64, _color: Rgba) {
            self.commands.push(format!("text {text}"));
        }

        fn draw_image(&mut self, _image: &EncodedImage) -> SurfaceResult<()> {
            self.commands.push("draw_image".into());
            Ok(())
        }

        fn encode(&self) -> SurfaceResult<EncodedImage> {
            Ok(EncodedImage::from_bytes(vec![self.commands.len() as u8]))
        }
    }

    fn board_and_surface() -> (Board, RecordingSurface) {
        let mut board = Board::new(BoardConfig::default());
        let mut surface = RecordingSurface::default();
        board.init(&mut surface).unwrap();
        (board, surface)
    }

    #[test]
    fn test_init_records_blank_snapshot() {
        let (board, surface) = board_and_surface();
        assert_eq!(board.history().len(), 1);
        assert!(!board.can_undo());
        assert!(!board.can_redo());
        assert_eq!(surface.commands[0], "clear");
    }

    #[test]
    fn test_stroke_lifecycle() {
        let (mut board, mut surface) = board_and_surface();

        board.pointer_down(&mut surface, Point::new(0.0, 0.0)).unwrap();
        assert!(matches!(board.state(), ToolState::Stroking { .. }));

        board.pointer_move(&mut surface, Point::new(5.0, 5.0)).unwrap();
        board.pointer_up(&mut surface, Point::new(10.0, 10.0)).unwrap();

        assert_eq!(board.state(), ToolState::Idle);
        assert_eq!(board.history().len(), 2);
        assert!(board.can_undo());
        // Two eagerly committed segments: move and final up.
        let strokes = surface
            .commands
            .iter()
            .filter(|c| c.starts_with("polyline"))
            .count();
        assert_eq!(strokes, 2);
    }

    #[test]
    fn test_shape_preview_restores_base_first() {
        let (mut board, mut surface) = board_and_surface();
        board.set_shape(ShapeKind::Rectangle);

        board.pointer_down(&mut surface, Point::new(0.0, 0.0)).unwrap();
        surface.commands.clear();
        board.pointer_move(&mut surface, Point::new(20.0, 20.0)).unwrap();

        // Base image first, then the translucent preview fill+stroke.
        assert_eq!(
            surface.commands,
            vec!["draw_image", "fill_rect", "stroke_rect"]
        );
        // Preview did not commit anything.
        assert_eq!(board.history().len(), 1);
    }

    #[test]
    fn test_shape_commit_records_snapshot() {
        let (mut board, mut surface) = board_and_surface();
        board.set_shape(ShapeKind::Line);

        board.pointer_down(&mut surface, Point::new(0.0, 0.0)).unwrap();
        board.pointer_up(&mut surface, Point::new(30.0, 30.0)).unwrap();

        assert_eq!(board.state(), ToolState::Idle);
        assert_eq!(board.history().len(), 2);
    }

    #[test]
    fn test_text_commit_and_discard() {
        let (mut board, mut surface) = board_and_surface();
        board.set_tool(ToolKind::Text);

        board.pointer_down(&mut surface, Point::new(40.0, 40.0)).unwrap();
        assert!(matches!(board.state(), ToolState::TextEditing { .. }));
        board.commit_text(&mut surface, "note").unwrap();

        assert_eq!(board.state(), ToolState::Idle);
        assert_eq!(board.texts().len(), 1);
        assert_eq!(board.texts()[0].content, "note");
        assert_eq!(board.history().len(), 2);

        // Empty input discards without recording.
        board.pointer_down(&mut surface, Point::new(50.0, 50.0)).unwrap();
        board.commit_text(&mut surface, "").unwrap();
        assert_eq!(board.texts().len(), 1);
        assert_eq!(board.history().len(), 2);
    }

    #[test]
    fn test_text_size_and_color_follow_style() {
        let (mut board, mut surface) = board_and_surface();
        board.set_tool(ToolKind::Text);
        board.set_color(Rgba::new(200, 0, 0, 255));
        board.set_stroke_width(7.0);

        board.pointer_down(&mut surface, Point::new(0.0, 0.0)).unwrap();
        board.commit_text(&mut surface, "x").unwrap();

        let t = &board.texts()[0];
        assert!((t.font_size - 14.0).abs() < f64::EPSILON);
        assert_eq!(t.color, Rgba::new(200, 0, 0, 255));
    }

    #[test]
    fn test_undo_redo_restore_texts() {
        let (mut board, mut surface) = board_and_surface();
        board.set_tool(ToolKind::Text);
        board.pointer_down(&mut surface, Point::new(0.0, 0.0)).unwrap();
        board.commit_text(&mut surface, "hello").unwrap();

        assert!(board.undo(&mut surface).unwrap());
        assert!(board.texts().is_empty());

        assert!(board.redo(&mut surface).unwrap());
        assert_eq!(board.texts().len(), 1);
    }

    #[test]
    fn test_undo_ignored_mid_gesture() {
        let (mut board, mut surface) = board_and_surface();
        board.pointer_down(&mut surface, Point::new(0.0, 0.0)).unwrap();
        board.pointer_up(&mut surface, Point::new(1.0, 1.0)).unwrap();

        board.pointer_down(&mut surface, Point::new(2.0, 2.0)).unwrap();
        assert!(!board.undo(&mut surface).unwrap());
        board.pointer_up(&mut surface, Point::new(3.0, 3.0)).unwrap();
        assert!(board.undo(&mut surface).unwrap());
    }

    #[test]
    fn test_pointer_leave_commits_like_up() {
        let (mut board, mut surface) = board_and_surface();
        board.pointer_down(&mut surface, Point::new(0.0, 0.0)).unwrap();
        board.pointer_leave(&mut surface, Point::new(5.0, 5.0)).unwrap();

        assert_eq!(board.state(), ToolState::Idle);
        assert_eq!(board.history().len(), 2);
    }

    #[test]
    fn test_clear_resets_annotations() {
        let (mut board, mut surface) = board_and_surface();
        board.set_tool(ToolKind::Text);
        board.pointer_down(&mut surface, Point::new(0.0, 0.0)).unwrap();
        board.commit_text(&mut surface, "gone").unwrap();

        board.clear(&mut surface).unwrap();
        assert!(board.texts().is_empty());
        assert_eq!(board.history().len(), 3);
        // A clear is undoable like any other action.
        assert!(board.undo(&mut surface).unwrap());
        assert_eq!(board.texts().len(), 1);
    }

    #[test]
    fn test_pointer_dispatch() {
        let (mut board, mut surface) = board_and_surface();
        board
            .handle_pointer(
                &mut surface,
                PointerEvent::Down {
                    position: Point::new(0.0, 0.0),
                },
            )
            .unwrap();
        assert!(matches!(board.state(), ToolState::Stroking { .. }));
        board
            .handle_pointer(
                &mut surface,
                PointerEvent::Up {
                    position: Point::new(1.0, 1.0),
                },
            )
            .unwrap();
        assert_eq!(board.state(), ToolState::Idle);
    }
}
