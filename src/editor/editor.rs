use crate::config::EditorConfig;
use crate::document::{Alignment, Document, MarkKind, Position, Selection};
use crate::engine::{BlockQuery, Command, Extension, ExtensionSet, RichTextEngine};
use crate::history::{History, HistoryController};
use tracing::warn;

/// Editing session: engine + history
pub struct Editor {
    controller: HistoryController<RichTextEngine>,
}

impl Editor {
    /// Editor with the default configuration
    pub fn new() -> Self {
        Self::from_config(&EditorConfig::default())
    }

    /// Create editor from plain text, every extension enabled
    pub fn from_text(text: &str) -> Self {
        let config = EditorConfig {
            initial_content: text.to_string(),
            ..EditorConfig::default()
        };
        Self::from_config(&config)
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        let document = Document::from_text(&config.initial_content);
        let engine = RichTextEngine::with_document(document, config.extensions.clone());

        Self {
            controller: HistoryController::with_engine(engine, &config.history),
        }
    }

    fn engine(&self) -> Option<&RichTextEngine> {
        self.controller.engine()
    }

    /// Run a command and record the result in history.
    /// Returns whether the document changed.
    pub fn execute(&mut self, command: Command) -> bool {
        let Some(engine) = self.controller.engine_mut() else {
            return false;
        };

        match engine.execute(&command) {
            Ok(true) => {
                self.controller.notify_change();
                true
            }
            Ok(false) => false,
            Err(err) => {
                warn!(command = command.name(), error = %err, "command rejected");
                false
            }
        }
    }

    pub fn can_execute(&self, command: &Command) -> bool {
        self.engine()
            .is_some_and(|engine| engine.can_execute(command))
    }

    /// Insert text at cursor
    pub fn insert(&mut self, text: &str) -> bool {
        self.execute(Command::InsertText(text.to_string()))
    }

    /// Delete backwards (backspace)
    pub fn backspace(&mut self) -> bool {
        self.execute(Command::Backspace)
    }

    /// Delete forwards (delete key)
    pub fn delete(&mut self) -> bool {
        self.execute(Command::DeleteForward)
    }

    /// Undo last change
    pub fn undo(&mut self) -> bool {
        self.controller.undo()
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> bool {
        self.controller.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.controller.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.controller.can_redo()
    }

    pub fn history(&self) -> &History {
        self.controller.history()
    }

    /// Current document, if the session is open
    pub fn document(&self) -> Option<&Document> {
        self.engine().map(RichTextEngine::document)
    }

    /// Get text content
    pub fn text(&self) -> String {
        self.document()
            .map(Document::plain_text)
            .unwrap_or_default()
    }

    pub fn block_count(&self) -> usize {
        self.document().map(Document::block_count).unwrap_or(0)
    }

    pub fn selection(&self) -> Selection {
        self.engine()
            .map(RichTextEngine::selection)
            .unwrap_or_default()
    }

    /// Get cursor position
    pub fn cursor(&self) -> Position {
        self.selection().end
    }

    pub fn extensions(&self) -> ExtensionSet {
        self.engine()
            .map(|engine| engine.extensions().clone())
            .unwrap_or_else(ExtensionSet::none)
    }

    pub fn has_extension(&self, extension: Extension) -> bool {
        self.engine()
            .is_some_and(|engine| engine.extensions().contains(extension))
    }

    pub fn is_mark_active(&self, kind: MarkKind) -> bool {
        self.engine()
            .is_some_and(|engine| engine.is_mark_active(kind))
    }

    pub fn is_block_active(&self, query: BlockQuery) -> bool {
        self.engine()
            .is_some_and(|engine| engine.is_block_active(query))
    }

    pub fn is_align_active(&self, align: Alignment) -> bool {
        self.engine()
            .is_some_and(|engine| engine.is_align_active(align))
    }

    pub fn link_href(&self) -> Option<String> {
        self.engine()?.link_href()
    }

    /// Move cursor left, extending the selection when `extend` is set
    pub fn move_left(&mut self, extend: bool) {
        if let Some(engine) = self.controller.engine_mut() {
            engine.move_left(extend);
        }
    }

    pub fn move_right(&mut self, extend: bool) {
        if let Some(engine) = self.controller.engine_mut() {
            engine.move_right(extend);
        }
    }

    pub fn move_up(&mut self, extend: bool) {
        if let Some(engine) = self.controller.engine_mut() {
            engine.move_up(extend);
        }
    }

    pub fn move_down(&mut self, extend: bool) {
        if let Some(engine) = self.controller.engine_mut() {
            engine.move_down(extend);
        }
    }

    pub fn move_to_line_start(&mut self, extend: bool) {
        if let Some(engine) = self.controller.engine_mut() {
            engine.move_to_line_start(extend);
        }
    }

    pub fn move_to_line_end(&mut self, extend: bool) {
        if let Some(engine) = self.controller.engine_mut() {
            engine.move_to_line_end(extend);
        }
    }

    pub fn select_all(&mut self) {
        if let Some(engine) = self.controller.engine_mut() {
            engine.select_all();
        }
    }

    pub fn set_selection(&mut self, selection: Selection) {
        if let Some(engine) = self.controller.engine_mut() {
            engine.set_selection(selection);
        }
    }

    /// Set cursor position
    pub fn set_cursor(&mut self, position: Position) {
        self.set_selection(Selection::cursor(position));
    }

    /// End the session. Every later call is a no-op.
    pub fn close(&mut self) {
        self.controller.detach();
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_ready()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
