//! Main application entry point (native).

use slateboard_app::SlateboardApp;

fn main() -> eframe::Result {
    env_logger::init();
    log::info!("Starting Slateboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Slateboard")
            .with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Slateboard",
        options,
        Box::new(|cc| Ok(Box::new(SlateboardApp::new(cc)?))),
    )
}
