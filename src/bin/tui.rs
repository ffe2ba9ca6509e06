use rich_text_editor::logging::{self, LogOutput};
use rich_text_editor::ui::{init, render, restore, App, Tui};
use rich_text_editor::EditorConfig;
use std::io;
use tracing::{info, warn};

fn main() -> io::Result<()> {
    // The terminal owns stdout, so logs only go to the file
    let _guard = logging::init(LogOutput::File);

    let config = EditorConfig::from_args(std::env::args()).unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        EditorConfig::default()
    });
    info!(
        extensions = config.extensions.len(),
        depth = ?config.history.depth,
        "Starting terminal editor"
    );

    // Initialize terminal
    let mut terminal = init()?;

    let mut app = App::with_config(&config);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    restore()?;

    info!("Terminal editor closed");
    result
}

fn run_app(terminal: &mut Tui, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(app, frame))?;

        app.handle_input()?;

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
