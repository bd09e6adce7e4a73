//! Slateboard desktop application.
//!
//! Hosts the board in an egui window: a toolbar, a canvas that mirrors the
//! raster surface as a texture, and an inline editor for text annotations.

mod app;
mod ui;

pub use app::SlateboardApp;
pub use ui::{toolbar, UiAction};
