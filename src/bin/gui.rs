use rich_text_editor::gui::{theme, GuiApp};
use rich_text_editor::logging::{self, LogOutput};
use rich_text_editor::EditorConfig;
use tracing::{info, warn};

fn main() -> eframe::Result<()> {
    let _guard = logging::init(LogOutput::FileAndStdout);

    let config = EditorConfig::from_args(std::env::args()).unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        EditorConfig::default()
    });
    info!(
        extensions = config.extensions.len(),
        depth = ?config.history.depth,
        "Starting GUI editor"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_title("Rich-Text Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "Rich-Text Editor",
        options,
        Box::new(move |cc| {
            theme::setup_theme(&cc.egui_ctx);
            Ok(Box::new(GuiApp::new(cc, &config)))
        }),
    )
}
