use crate::document::{Alignment as TextAlign, Atom, BlockKind, Mark, Position};
use crate::toolbar::{ToolbarItem, ToolbarState};
use crate::ui::app::{App, Mode, ToolbarSlot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(3), // Toolbar
            Constraint::Min(0),    // Document
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, chunks[0]);
    render_toolbar(app, frame, chunks[1]);
    render_document(app, frame, chunks[2]);
    render_status_bar(app, frame, chunks[3]);
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Rich",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("-"),
        Span::styled(
            "Text",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Editor "),
    ]);

    let title_bar = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(title_bar, area);
}

fn render_toolbar(app: &App, frame: &mut Frame, area: Rect) {
    let state = ToolbarState::capture(&app.editor);
    let selected = app.toolbar_selection();

    let mut spans = Vec::new();
    for (index, slot) in ToolbarSlot::all().into_iter().enumerate() {
        let (label, active, enabled) = match slot {
            ToolbarSlot::Item(item) => {
                let label = if item == ToolbarItem::Heading {
                    state.heading.label()
                } else {
                    item.label()
                };
                let item_state = state.get(item);
                (
                    label,
                    item_state.is_some_and(|s| s.active),
                    item_state.is_some_and(|s| s.enabled),
                )
            }
            ToolbarSlot::Undo => ("Undo", false, state.can_undo),
            ToolbarSlot::Redo => ("Redo", false, state.can_redo),
        };

        let mut style = if !enabled {
            Style::default().fg(Color::DarkGray)
        } else if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        if selected == Some(index) {
            style = style.add_modifier(Modifier::REVERSED | Modifier::UNDERLINED);
        }

        if matches!(slot, ToolbarSlot::Undo) {
            spans.push(Span::raw(" │ "));
        }
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }

    let toolbar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Toolbar"));

    frame.render_widget(toolbar, area);
}

fn block_prefix(kind: BlockKind, ordinal: usize) -> String {
    match kind {
        BlockKind::Paragraph => String::new(),
        BlockKind::Heading { level } => format!("{} ", "#".repeat(level as usize)),
        BlockKind::BulletItem => "• ".to_string(),
        BlockKind::OrderedItem => format!("{}. ", ordinal),
        BlockKind::TaskItem { checked: true } => "[x] ".to_string(),
        BlockKind::TaskItem { checked: false } => "[ ] ".to_string(),
        BlockKind::CodeBlock => "│ ".to_string(),
    }
}

fn block_style(kind: BlockKind) -> Style {
    match kind {
        BlockKind::Heading { .. } => Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        BlockKind::CodeBlock => Style::default().fg(Color::Yellow),
        BlockKind::TaskItem { checked: true } => Style::default().fg(Color::DarkGray),
        _ => Style::default(),
    }
}

fn mark_style(mut style: Style, marks: &[Mark]) -> Style {
    for mark in marks {
        style = match mark {
            Mark::Bold => style.add_modifier(Modifier::BOLD),
            Mark::Italic => style.add_modifier(Modifier::ITALIC),
            Mark::Underline => style.add_modifier(Modifier::UNDERLINED),
            Mark::Strike => style.add_modifier(Modifier::CROSSED_OUT),
            Mark::Link { .. } => style.fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        };
    }
    style
}

fn line_alignment(align: TextAlign) -> Alignment {
    match align {
        TextAlign::Left | TextAlign::Justify => Alignment::Left,
        TextAlign::Center => Alignment::Center,
        TextAlign::Right => Alignment::Right,
    }
}

fn cursor_style() -> Style {
    Style::default()
        .bg(Color::White)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD)
}

fn render_document(app: &App, frame: &mut Frame, area: Rect) {
    let selection = app.editor.selection();
    let cursor = selection.end;
    let show_cursor = app.mode == Mode::Editing;

    let mut lines: Vec<Line> = Vec::new();

    if let Some(document) = app.editor.document() {
        let mut ordinal = 0;

        for (index, block) in document.blocks().iter().enumerate() {
            ordinal = if block.kind == BlockKind::OrderedItem {
                ordinal + 1
            } else {
                0
            };

            let prefix = block_prefix(block.kind, ordinal);
            let base = block_style(block.kind);
            let alignment = line_alignment(block.align);

            let mut spans = vec![Span::styled(
                prefix.clone(),
                Style::default().fg(Color::DarkGray),
            )];
            let atoms = block.atoms();

            for (offset, atom) in atoms.iter().enumerate() {
                let position = Position::new(index, offset);
                let at_cursor = show_cursor && position == cursor;

                let mut style = mark_style(base, atom.marks());
                if selection.contains(position) {
                    style = style.bg(Color::Blue);
                }
                if at_cursor {
                    style = cursor_style();
                }

                match atom {
                    // Line break inside a code block
                    Atom::Char { ch: '\n', .. } => {
                        if at_cursor {
                            spans.push(Span::styled(" ", style));
                        }
                        lines.push(Line::from(std::mem::take(&mut spans)).alignment(alignment));
                        spans.push(Span::styled(
                            " ".repeat(prefix.chars().count()),
                            Style::default(),
                        ));
                    }
                    Atom::Char { ch, .. } => spans.push(Span::styled(ch.to_string(), style)),
                    Atom::Image { src } => {
                        let style = if at_cursor {
                            style
                        } else {
                            style.fg(Color::Magenta)
                        };
                        spans.push(Span::styled(format!("[image: {}]", src), style));
                    }
                }
            }

            // Cursor at end of block - show space
            if show_cursor && cursor == Position::new(index, atoms.len()) {
                spans.push(Span::styled(" ", cursor_style()));
            }

            lines.push(Line::from(spans).alignment(alignment));
        }
    }

    let document_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Document"))
        .wrap(Wrap { trim: false });

    frame.render_widget(document_widget, area);
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status_text = match &app.mode {
        Mode::Prompt(prompt) => format!(
            " {}: {}_  (Enter: apply | Esc: cancel)",
            prompt.kind.title(),
            prompt.input
        ),
        _ if !app.status_message.is_empty() => app.status_message.clone(),
        _ => {
            let cursor = app.editor.cursor();
            let history = app.editor.history();
            format!(
                " Block {}, Col {} | {} blocks | undo {} | redo {} | Ctrl+Z: Undo | Ctrl+Y: Redo | Ctrl+T: Toolbar | Ctrl+Q: Quit",
                cursor.block + 1,
                cursor.offset + 1,
                app.editor.block_count(),
                history.undo_len().saturating_sub(1),
                history.redo_len(),
            )
        }
    };

    let status_bar =
        Paragraph::new(status_text).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}
