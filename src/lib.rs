pub mod config;
pub mod document;
pub mod editor;
pub mod engine;
pub mod gui;
pub mod history;
pub mod logging;
pub mod toolbar;
pub mod ui;

// Re-export commonly used types
pub use config::{ConfigError, EditorConfig, HistoryConfig};
pub use document::{Alignment, Block, BlockKind, Document, Mark, MarkKind, Position, Selection};
pub use editor::Editor;
pub use engine::{Command, DocumentEngine, EngineError, Extension, ExtensionSet, RichTextEngine};
pub use gui::GuiApp;
pub use history::{History, HistoryController, RedoCapture, Snapshot};
pub use toolbar::{HeadingChoice, ToolbarAction, ToolbarItem, ToolbarState};
pub use ui::{render, App};
