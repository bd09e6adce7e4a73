//! Toolbar UI.
//!
//! The toolbar never mutates the board directly; it emits [`UiAction`]s the
//! app applies after the frame is laid out.

use egui::{Color32, Ui};
use slateboard_core::{Board, Rgba, ShapeKind, ToolKind};

/// An action requested from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    /// Change the current tool.
    SetTool(ToolKind),
    /// Change the shape drawn by the shape tool.
    SetShape(ShapeKind),
    /// Change stroke color.
    SetColor(Rgba),
    /// Change stroke width.
    SetWidth(f64),
    /// Step the history back.
    Undo,
    /// Step the history forward.
    Redo,
    /// Wipe the board.
    Clear,
    /// Export the board as a PNG file.
    ExportPng,
}

pub(crate) fn to_color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

pub(crate) fn from_color32(c: Color32) -> Rgba {
    let [r, g, b, a] = c.to_srgba_unmultiplied();
    Rgba::new(r, g, b, a)
}

/// Lay out the toolbar and collect the actions the user requested.
pub fn toolbar(ui: &mut Ui, board: &Board) -> Vec<UiAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        for &tool in ToolKind::all() {
            let selected = board.tool() == tool;
            if ui.selectable_label(selected, tool.name()).clicked() && !selected {
                actions.push(UiAction::SetTool(tool));
            }
        }

        if board.tool() == ToolKind::Shape {
            egui::ComboBox::from_id_salt("shape-kind")
                .selected_text(board.shape().name())
                .show_ui(ui, |ui| {
                    for &kind in ShapeKind::all() {
                        if ui
                            .selectable_label(board.shape() == kind, kind.name())
                            .clicked()
                        {
                            actions.push(UiAction::SetShape(kind));
                        }
                    }
                });
        }

        ui.separator();

        let mut color = to_color32(board.style().color);
        if ui.color_edit_button_srgba(&mut color).changed() {
            actions.push(UiAction::SetColor(from_color32(color)));
        }

        let mut width = board.style().width;
        if ui
            .add(egui::Slider::new(&mut width, 1.0..=40.0).text("Width"))
            .changed()
        {
            actions.push(UiAction::SetWidth(width));
        }

        ui.separator();

        if ui
            .add_enabled(board.can_undo(), egui::Button::new("Undo"))
            .clicked()
        {
            actions.push(UiAction::Undo);
        }
        if ui
            .add_enabled(board.can_redo(), egui::Button::new("Redo"))
            .clicked()
        {
            actions.push(UiAction::Redo);
        }

        ui.separator();

        if ui.button("Clear").clicked() {
            actions.push(UiAction::Clear);
        }
        if ui.button("Save PNG").clicked() {
            actions.push(UiAction::ExportPng);
        }
    });

    actions
}
