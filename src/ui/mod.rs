pub mod app;
pub mod renderer;
pub mod terminal;

pub use app::{App, Mode, Prompt, PromptKind, ToolbarSlot};
pub use renderer::render;
pub use terminal::{init, restore, Tui};
