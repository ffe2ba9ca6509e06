use crate::engine::Command;
use crate::toolbar::{
    resolve_image_prompt, resolve_link_prompt, HeadingChoice, ToolbarAction, ToolbarItem,
    ToolbarState,
};
use crate::ui::PromptKind;
use crate::{Editor, EditorConfig, MarkKind};
use std::time::Instant;

use super::document_view;

/// URL entry window for links and images
struct UrlPrompt {
    kind: PromptKind,
    input: String,
}

pub struct GuiApp {
    editor: Editor,
    cursor_blink: bool,
    last_blink: Instant,
    status_message: String,
    auto_scroll: bool,
    prompt: Option<UrlPrompt>,
}

impl GuiApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: &EditorConfig) -> Self {
        Self {
            editor: Editor::from_config(config),
            cursor_blink: true,
            last_blink: Instant::now(),
            status_message: String::new(),
            auto_scroll: true,
            prompt: None,
        }
    }

    fn handle_text_input(&mut self, text: &str) {
        // One undo level per typed character
        for ch in text.chars() {
            self.editor.insert(&ch.to_string());
        }
        self.status_message.clear();
        self.auto_scroll = true;
    }

    fn handle_key(&mut self, key: egui::Key, modifiers: egui::Modifiers) {
        let shift = modifiers.shift;

        match key {
            egui::Key::ArrowLeft => self.editor.move_left(shift),
            egui::Key::ArrowRight => self.editor.move_right(shift),
            egui::Key::ArrowUp => self.editor.move_up(shift),
            egui::Key::ArrowDown => self.editor.move_down(shift),
            egui::Key::Home => self.editor.move_to_line_start(shift),
            egui::Key::End => self.editor.move_to_line_end(shift),
            egui::Key::Backspace => {
                self.editor.backspace();
                self.status_message.clear();
            }
            egui::Key::Delete => {
                self.editor.delete();
                self.status_message.clear();
            }
            egui::Key::Enter => {
                self.editor.insert("\n");
                self.status_message.clear();
            }
            egui::Key::Z if modifiers.command && shift => self.redo(),
            egui::Key::Z if modifiers.command => self.undo(),
            egui::Key::Y if modifiers.command => self.redo(),
            egui::Key::B if modifiers.command => self.run(Command::ToggleMark(MarkKind::Bold)),
            egui::Key::I if modifiers.command => self.run(Command::ToggleMark(MarkKind::Italic)),
            egui::Key::U if modifiers.command => {
                self.run(Command::ToggleMark(MarkKind::Underline))
            }
            egui::Key::K if modifiers.command => self.activate(ToolbarItem::Link),
            egui::Key::A if modifiers.command => self.editor.select_all(),
            _ => return,
        }
        self.auto_scroll = true;
    }

    fn activate(&mut self, item: ToolbarItem) {
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
        self.prompt = Some(UrlPrompt { kind, input });
    }

    fn submit_prompt(&mut self, kind: PromptKind, answer: Option<&str>) {
        let command = match kind {
            PromptKind::Link => resolve_link_prompt(answer),
            PromptKind::Image => resolve_image_prompt(answer),
        };
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
        self.status_message.clear();
        self.auto_scroll = true;
    }

    fn undo(&mut self) {
        self.status_message = if self.editor.undo() {
            "Undo".to_string()
        } else {
            "Nothing to undo".to_string()
        };
        self.auto_scroll = true;
    }

    fn redo(&mut self) {
        self.status_message = if self.editor.redo() {
            "Redo".to_string()
        } else {
            "Nothing to redo".to_string()
        };
        self.auto_scroll = true;
    }

    fn show_toolbar(&mut self, ui: &mut egui::Ui) {
        let state = ToolbarState::capture(&self.editor);

        ui.horizontal_wrapped(|ui| {
            for item_state in &state.items {
                let item = item_state.item;

                if item == ToolbarItem::Heading {
                    let mut choice = state.heading;
                    ui.add_enabled_ui(item_state.enabled, |ui| {
                        egui::ComboBox::from_id_salt("heading")
                            .selected_text(choice.label())
                            .show_ui(ui, |ui| {
                                for option in HeadingChoice::ALL {
                                    ui.selectable_value(&mut choice, option, option.label());
                                }
                            });
                    });
                    if choice != state.heading {
                        self.run(choice.command());
                    }
                    continue;
                }

                let button = egui::SelectableLabel::new(item_state.active, item.label());
                if ui
                    .add_enabled(item_state.enabled, button)
                    .on_hover_text(item.tooltip())
                    .clicked()
                {
                    self.activate(item);
                }
            }

            ui.separator();
            if ui
                .add_enabled(state.can_undo, egui::Button::new("↶ Undo"))
                .clicked()
            {
                self.undo();
            }
            if ui
                .add_enabled(state.can_redo, egui::Button::new("↷ Redo"))
                .clicked()
            {
                self.redo();
            }
        });
    }

    fn show_prompt(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };

        // Outer None keeps the window open, inner None cancels
        let mut answer: Option<Option<String>> = None;

        egui::Window::new(prompt.kind.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                let response = ui.text_edit_singleline(&mut prompt.input);
                response.request_focus();

                let (enter, escape) = ui.input(|i| {
                    (
                        i.key_pressed(egui::Key::Enter),
                        i.key_pressed(egui::Key::Escape),
                    )
                });

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || enter {
                        answer = Some(Some(prompt.input.clone()));
                    }
                    if ui.button("Cancel").clicked() || escape {
                        answer = Some(None);
                    }
                });
            });

        if let Some(answer) = answer {
            let kind = prompt.kind;
            self.prompt = None;
            self.submit_prompt(kind, answer.as_deref());
        }
    }

    fn status_text(&self) -> String {
        if !self.status_message.is_empty() {
            return self.status_message.clone();
        }

        let cursor = self.editor.cursor();
        let history = self.editor.history();
        format!(
            "Block {}, Col {} | {} blocks | undo {} | redo {}",
            cursor.block + 1,
            cursor.offset + 1,
            self.editor.block_count(),
            history.undo_len().saturating_sub(1),
            history.redo_len(),
        )
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Cursor blink
        if self.last_blink.elapsed().as_millis() > 500 {
            self.cursor_blink = !self.cursor_blink;
            self.last_blink = Instant::now();
        }
        ctx.request_repaint();

        // Keystrokes belong to the prompt window while it is open
        if self.prompt.is_none() {
            let events = ctx.input(|i| i.events.clone());
            for event in &events {
                match event {
                    egui::Event::Text(text) => self.handle_text_input(text),
                    egui::Event::Paste(text) => {
                        self.editor.insert(text);
                        self.auto_scroll = true;
                    }
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => self.handle_key(*key, *modifiers),
                    _ => {}
                }
            }
        }

        // Menu bar
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(self.editor.can_undo(), egui::Button::new("↶ Undo (Ctrl+Z)"))
                        .clicked()
                    {
                        self.undo();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(self.editor.can_redo(), egui::Button::new("↷ Redo (Ctrl+Y)"))
                        .clicked()
                    {
                        self.redo();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Select All (Ctrl+A)").clicked() {
                        self.editor.select_all();
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.show_toolbar(ui);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status_text());
        });

        // Editor
        egui::CentralPanel::default().show(ctx, |ui| {
            let cursor_visible = self.cursor_blink && self.prompt.is_none();
            document_view::show(ui, &self.editor, cursor_visible, self.auto_scroll);
            self.auto_scroll = false;
        });

        self.show_prompt(ctx);
    }
}
