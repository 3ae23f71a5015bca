use catbox_uploader::gui::UploaderApp;
use catbox_uploader::settings::Settings;
use catbox_uploader::uploader::CatboxUploader;

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let settings = Settings::default();
    catbox_uploader::logging::init(settings.debug_logging, None);

    let uploader = CatboxUploader::new(&settings)?;
    let (w, h) = settings.window_size;
    let (x, y) = settings.window_pos;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Catbox Uploader")
            .with_inner_size([w, h])
            .with_position([x, y])
            .with_resizable(false),
        ..Default::default()
    };

    tracing::info!(history = %settings.history_file.display(), "starting uploader");
    eframe::run_native(
        "Catbox Uploader",
        native_options,
        Box::new(move |_cc| Box::new(UploaderApp::new(settings, Box::new(uploader)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run GUI: {e}"))
}
