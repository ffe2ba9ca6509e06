use crate::editor::Editor;
use crate::engine::Command;
use crate::toolbar::{
    resolve_image_prompt, resolve_link_prompt, HeadingChoice, ToolbarAction, ToolbarItem,
};
use crate::{EditorConfig, MarkKind};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;

const HELP: &str = "Ctrl+Q quit | Ctrl+Z undo | Ctrl+Y redo | Ctrl+T toolbar | Ctrl+K link";

/// Controls reachable in toolbar mode: the toolbar items, then undo/redo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarSlot {
    Item(ToolbarItem),
    Undo,
    Redo,
}

impl ToolbarSlot {
    pub fn all() -> Vec<ToolbarSlot> {
        ToolbarItem::ALL
            .into_iter()
            .map(ToolbarSlot::Item)
            .chain([ToolbarSlot::Undo, ToolbarSlot::Redo])
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Link,
    Image,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::Link => "URL",
            PromptKind::Image => "Image URL",
        }
    }
}

/// Single-line input shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Editing,
    Toolbar { selected: usize },
    Prompt(Prompt),
}

/// Application state
pub struct App {
    pub editor: Editor,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: String,
}

impl App {
    /// Create app with the default configuration
    pub fn new() -> Self {
        Self::with_config(&EditorConfig::default())
    }

    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            editor: Editor::from_config(config),
            mode: Mode::Editing,
            should_quit: false,
            status_message: HELP.to_string(),
        }
    }

    /// Create app with text
    pub fn with_text(text: &str) -> Self {
        Self {
            editor: Editor::from_text(text),
            mode: Mode::Editing,
            should_quit: false,
            status_message: HELP.to_string(),
        }
    }

    /// Poll and handle keyboard input
    pub fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Ctrl+Q quits from any mode
        if ctrl && key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        match self.mode.clone() {
            Mode::Editing => self.handle_editing_key(key),
            Mode::Toolbar { selected } => self.handle_toolbar_key(key, selected),
            Mode::Prompt(prompt) => self.handle_prompt_key(key, prompt),
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if ctrl {
            match key.code {
                KeyCode::Char('z') => self.undo(),
                KeyCode::Char('y') => self.redo(),
                KeyCode::Char('b') => self.run(Command::ToggleMark(MarkKind::Bold)),
                KeyCode::Char('u') => self.run(Command::ToggleMark(MarkKind::Underline)),
                KeyCode::Char('a') => self.editor.select_all(),
                KeyCode::Char('k') => self.activate(ToolbarItem::Link),
                KeyCode::Char('t') => {
                    self.mode = Mode::Toolbar { selected: 0 };
                    self.status_message =
                        "Toolbar: ←/→ choose | Enter apply | Esc back".to_string();
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char(c) => {
                self.editor.insert(&c.to_string());
                self.status_message.clear();
            }
            KeyCode::Enter => {
                self.editor.insert("\n");
                self.status_message.clear();
            }
            KeyCode::Backspace => {
                self.editor.backspace();
                self.status_message.clear();
            }
            KeyCode::Delete => {
                self.editor.delete();
                self.status_message.clear();
            }
            KeyCode::Left => self.editor.move_left(shift),
            KeyCode::Right => self.editor.move_right(shift),
            KeyCode::Up => self.editor.move_up(shift),
            KeyCode::Down => self.editor.move_down(shift),
            KeyCode::Home => self.editor.move_to_line_start(shift),
            KeyCode::End => self.editor.move_to_line_end(shift),
            _ => {}
        }
    }

    fn handle_toolbar_key(&mut self, key: KeyEvent, selected: usize) {
        let slots = ToolbarSlot::all();

        match key.code {
            KeyCode::Left => {
                let selected = selected.checked_sub(1).unwrap_or(slots.len() - 1);
                self.mode = Mode::Toolbar { selected };
            }
            KeyCode::Right => {
                self.mode = Mode::Toolbar {
                    selected: (selected + 1) % slots.len(),
                };
            }
            KeyCode::Enter | KeyCode::Char(' ') => match slots.get(selected) {
                Some(ToolbarSlot::Item(item)) => self.activate(*item),
                Some(ToolbarSlot::Undo) => self.undo(),
                Some(ToolbarSlot::Redo) => self.redo(),
                None => {}
            },
            KeyCode::Esc => {
                self.mode = Mode::Editing;
                self.status_message = HELP.to_string();
            }
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.mode = Mode::Editing;
                self.status_message = HELP.to_string();
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent, mut prompt: Prompt) {
        match key.code {
            KeyCode::Enter => self.submit_prompt(prompt.kind, Some(&prompt.input)),
            KeyCode::Esc => self.submit_prompt(prompt.kind, None),
            KeyCode::Backspace => {
                prompt.input.pop();
                self.mode = Mode::Prompt(prompt);
            }
            KeyCode::Char(c) => {
                prompt.input.push(c);
                self.mode = Mode::Prompt(prompt);
            }
            _ => {}
        }
    }

    /// Press a toolbar item
    pub fn activate(&mut self, item: ToolbarItem) {
        if item == ToolbarItem::Heading {
            let next = HeadingChoice::current(&self.editor).next();
            self.run(next.command());
            return;
        }

        match item.action(&self.editor) {
            Some(ToolbarAction::Run(command)) => self.run(command),
            Some(ToolbarAction::PromptLink { previous }) => {
                self.open_prompt(PromptKind::Link, previous.unwrap_or_default())
            }
            Some(ToolbarAction::PromptImage) => self.open_prompt(PromptKind::Image, String::new()),
            None => {}
        }
    }

    fn open_prompt(&mut self, kind: PromptKind, input: String) {
        if !self.editor.has_extension(ToolbarItem::from(kind).extension()) {
            self.status_message = format!("{} is not enabled", kind.title());
            return;
        }
        self.mode = Mode::Prompt(Prompt { kind, input });
    }

    /// Resolve a prompt answer. `None` means cancelled.
    pub fn submit_prompt(&mut self, kind: PromptKind, answer: Option<&str>) {
        let command = match kind {
            PromptKind::Link => resolve_link_prompt(answer),
            PromptKind::Image => resolve_image_prompt(answer),
        };
        self.mode = Mode::Editing;
        self.status_message.clear();

        if let Some(command) = command {
            self.run(command);
        }
    }

    fn run(&mut self, command: Command) {
        if !self.editor.can_execute(&command) {
            self.status_message = format!("{} is not available", command.name());
            return;
        }
        self.editor.execute(command);
    }

    fn undo(&mut self) {
        if self.editor.undo() {
            self.status_message = "Undo".to_string();
        } else {
            self.status_message = "Nothing to undo".to_string();
        }
    }

    fn redo(&mut self) {
        if self.editor.redo() {
            self.status_message = "Redo".to_string();
        } else {
            self.status_message = "Nothing to redo".to_string();
        }
    }

    /// Selected slot in toolbar mode
    pub fn toolbar_selection(&self) -> Option<usize> {
        match self.mode {
            Mode::Toolbar { selected } => Some(selected),
            _ => None,
        }
    }
}

impl From<PromptKind> for ToolbarItem {
    fn from(kind: PromptKind) -> Self {
        match kind {
            PromptKind::Link => ToolbarItem::Link,
            PromptKind::Image => ToolbarItem::Image,
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
