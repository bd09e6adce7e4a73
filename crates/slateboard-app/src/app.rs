//! Application shell: owns the board and the raster surface, mirrors the
//! surface into an egui texture and translates egui input into pointer
//! events.

use egui::{Color32, ColorImage, Key, Pos2, Rect, TextureHandle, TextureOptions};
use kurbo::Point;
use slateboard_core::{Board, BoardConfig, PointerEvent, SurfaceError, ToolState};
use slateboard_raster::RasterSurface;

use crate::ui::{toolbar, UiAction};

mod file_ops {
    /// Save PNG bytes through a native save dialog.
    pub fn export_png(png_data: &[u8], file_name: &str) {
        let dialog = rfd::FileDialog::new()
            .set_title("Export PNG")
            .set_file_name(file_name)
            .add_filter("PNG Image", &["png"]);

        if let Some(path) = dialog.save_file() {
            if let Err(e) = std::fs::write(&path, png_data) {
                log::error!("Failed to write PNG: {e}");
            } else {
                log::info!("Exported PNG to: {path:?}");
            }
        }
    }
}

pub struct SlateboardApp {
    board: Board,
    surface: RasterSurface,
    /// GPU copy of the surface, re-uploaded every frame.
    texture: Option<TextureHandle>,
    /// Contents of the inline text editor.
    text_entry: String,
    /// Focus the text editor on its first frame.
    text_focus_pending: bool,
}

impl SlateboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, SurfaceError> {
        let config = BoardConfig::default();
        let mut surface = RasterSurface::new(1024, 640, config.background);
        let mut board = Board::new(config);
        board.init(&mut surface)?;
        Ok(Self {
            board,
            surface,
            texture: None,
            text_entry: String::new(),
            text_focus_pending: false,
        })
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::SetTool(tool) => self.board.set_tool(tool),
            UiAction::SetShape(kind) => self.board.set_shape(kind),
            UiAction::SetColor(color) => self.board.set_color(color),
            UiAction::SetWidth(width) => self.board.set_stroke_width(width),
            UiAction::Undo => {
                if let Err(e) = self.board.undo(&mut self.surface) {
                    log::error!("undo failed: {e}");
                }
            }
            UiAction::Redo => {
                if let Err(e) = self.board.redo(&mut self.surface) {
                    log::error!("redo failed: {e}");
                }
            }
            UiAction::Clear => {
                if let Err(e) = self.board.clear(&mut self.surface) {
                    log::error!("clear failed: {e}");
                }
            }
            UiAction::ExportPng => match self.board.export(&self.surface) {
                Ok(png) => {
                    file_ops::export_png(png.bytes(), &self.board.config().export_file_name);
                }
                Err(e) => log::error!("export failed: {e}"),
            },
        }
    }

    fn forward(&mut self, event: PointerEvent) {
        let was_editing = matches!(self.board.state(), ToolState::TextEditing { .. });
        if let Err(e) = self.board.handle_pointer(&mut self.surface, event) {
            log::error!("pointer event failed: {e}");
        }
        if !was_editing && matches!(self.board.state(), ToolState::TextEditing { .. }) {
            self.text_entry.clear();
            self.text_focus_pending = true;
        }
    }

    fn handle_canvas_input(&mut self, rect: Rect, response: &egui::Response) {
        let to_board =
            |pos: Pos2| Point::new(f64::from(pos.x - rect.min.x), f64::from(pos.y - rect.min.y));

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let p = to_board(pos);
                self.forward(PointerEvent::Down { position: p });
                self.forward(PointerEvent::Up { position: p });
            }
        }

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.forward(PointerEvent::Down {
                    position: to_board(pos),
                });
            }
        } else if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                if rect.contains(pos) {
                    self.forward(PointerEvent::Move {
                        position: to_board(pos),
                    });
                } else {
                    // Dragging off the canvas ends the gesture, like the
                    // pointer leaving a window.
                    self.forward(PointerEvent::Leave {
                        position: to_board(pos.clamp(rect.min, rect.max)),
                    });
                }
            }
        }

        if response.drag_stopped() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.forward(PointerEvent::Up {
                    position: to_board(pos.clamp(rect.min, rect.max)),
                });
            }
        }
    }

    fn show_text_editor(&mut self, ctx: &egui::Context, rect: Rect, anchor: Point) {
        let pos = rect.min + egui::vec2(anchor.x as f32, anchor.y as f32);
        egui::Area::new(egui::Id::new("text-entry"))
            .fixed_pos(pos)
            .show(ctx, |ui| {
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut self.text_entry)
                        .hint_text("Type, Enter to place"),
                );
                if self.text_focus_pending {
                    edit.request_focus();
                    self.text_focus_pending = false;
                }

                if ui.input(|i| i.key_pressed(Key::Escape)) {
                    self.text_entry.clear();
                }
                // Enter also drops focus, so this covers both.
                if edit.lost_focus() {
                    let text = std::mem::take(&mut self.text_entry);
                    if let Err(e) = self.board.commit_text(&mut self.surface, &text) {
                        log::error!("text commit failed: {e}");
                    }
                }
            });
    }

    fn upload_texture(&mut self, ctx: &egui::Context) {
        let size = [self.surface.width() as usize, self.surface.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, self.surface.pixels());
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture("slateboard", image, TextureOptions::NEAREST)),
        }
    }
}

impl eframe::App for SlateboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            for action in toolbar(ui, &self.board) {
                self.apply(action);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let desired = ui.available_size();
            let (rect, response) =
                ui.allocate_exact_size(desired, egui::Sense::click_and_drag());

            let width = (rect.width().round() as u32).max(1);
            let height = (rect.height().round() as u32).max(1);
            if (width, height) != (self.surface.width(), self.surface.height()) {
                if let Err(e) = self.board.surface_resized(&mut self.surface, width, height) {
                    log::error!("resize failed: {e}");
                }
            }

            self.handle_canvas_input(rect, &response);

            self.upload_texture(ctx);
            if let Some(texture) = &self.texture {
                ui.painter().image(
                    texture.id(),
                    rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }

            if let ToolState::TextEditing { anchor } = self.board.state() {
                self.show_text_editor(ctx, rect, anchor);
            }
        });
    }
}
