use super::theme;
use crate::document::{Alignment, Atom, Block, BlockKind, Mark, Position, Selection};
use crate::editor::Editor;
use egui::text::LayoutJob;
use egui::{Align, Color32, FontId, Stroke, TextFormat};

/// Draw every block of the editor's document inside a vertical scroll area
pub fn show(ui: &mut egui::Ui, editor: &Editor, cursor_visible: bool, scroll_to_cursor: bool) {
    let Some(document) = editor.document() else {
        ui.colored_label(theme::MUTED_COLOR, "Session closed");
        return;
    };
    let selection = editor.selection();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let mut ordinal = 0;

            for (index, block) in document.blocks().iter().enumerate() {
                ordinal = if block.kind == BlockKind::OrderedItem {
                    ordinal + 1
                } else {
                    0
                };

                let job = block_layout(block, index, ordinal, selection, cursor_visible);
                let layout = egui::Layout::top_down(horizontal_align(block.align));
                let response = ui.with_layout(layout, |ui| ui.label(job)).inner;

                if scroll_to_cursor && selection.end.block == index {
                    response.scroll_to_me(Some(Align::Center));
                }
            }
        });
}

fn horizontal_align(align: Alignment) -> Align {
    match align {
        Alignment::Left | Alignment::Justify => Align::Min,
        Alignment::Center => Align::Center,
        Alignment::Right => Align::Max,
    }
}

fn prefix(kind: BlockKind, ordinal: usize) -> String {
    match kind {
        BlockKind::Paragraph | BlockKind::Heading { .. } | BlockKind::CodeBlock => String::new(),
        BlockKind::BulletItem => "•  ".to_string(),
        BlockKind::OrderedItem => format!("{}.  ", ordinal),
        BlockKind::TaskItem { checked: true } => "☑  ".to_string(),
        BlockKind::TaskItem { checked: false } => "☐  ".to_string(),
    }
}

/// Text format for an atom in a block of `kind`
pub fn atom_format(kind: BlockKind, marks: &[Mark], selected: bool) -> TextFormat {
    let (font_id, mut color) = match kind {
        BlockKind::Heading { level } => (
            FontId::proportional(theme::heading_size(level)),
            theme::HEADING_COLOR,
        ),
        BlockKind::CodeBlock => (
            FontId::monospace(theme::BODY_SIZE - 2.0),
            theme::CODE_COLOR,
        ),
        BlockKind::TaskItem { checked: true } => {
            (FontId::proportional(theme::BODY_SIZE), theme::MUTED_COLOR)
        }
        _ => (FontId::proportional(theme::BODY_SIZE), theme::TEXT_COLOR),
    };

    let mut format = TextFormat {
        font_id,
        ..Default::default()
    };
    if kind == BlockKind::CodeBlock {
        format.background = theme::CODE_BG;
    }

    for mark in marks {
        match mark {
            Mark::Bold => color = theme::STRONG_TEXT_COLOR,
            Mark::Link { .. } => color = theme::LINK_COLOR,
            Mark::Italic => format.italics = true,
            Mark::Underline | Mark::Strike => {}
        }
    }
    format.color = color;

    for mark in marks {
        match mark {
            Mark::Underline | Mark::Link { .. } => format.underline = Stroke::new(1.0, color),
            Mark::Strike => format.strikethrough = Stroke::new(1.0, color),
            _ => {}
        }
    }

    if selected {
        format.background = theme::SELECTION_COLOR;
    }

    format
}

fn cursor_format(kind: BlockKind) -> TextFormat {
    let mut format = atom_format(kind, &[], false);
    format.color = theme::CURSOR_COLOR;
    format.background = Color32::TRANSPARENT;
    format
}

/// Lay out one block, with the cursor drawn as a bar when visible
pub fn block_layout(
    block: &Block,
    index: usize,
    ordinal: usize,
    selection: Selection,
    cursor_visible: bool,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    let cursor = selection.end;

    let prefix = prefix(block.kind, ordinal);
    if !prefix.is_empty() {
        let mut format = atom_format(block.kind, &[], false);
        format.color = theme::MUTED_COLOR;
        job.append(&prefix, 0.0, format);
    }

    let atoms = block.atoms();
    for (offset, atom) in atoms.iter().enumerate() {
        let position = Position::new(index, offset);
        if cursor_visible && position == cursor {
            job.append("|", 0.0, cursor_format(block.kind));
        }

        let format = atom_format(block.kind, atom.marks(), selection.contains(position));
        match atom {
            Atom::Char { ch, .. } => job.append(&ch.to_string(), 0.0, format),
            Atom::Image { src } => {
                let mut format = format;
                format.color = theme::IMAGE_COLOR;
                job.append(&format!("[🖼 {}]", src), 0.0, format);
            }
        }
    }

    if cursor_visible && cursor == Position::new(index, atoms.len()) {
        job.append("|", 0.0, cursor_format(block.kind));
    }

    // Keep empty blocks one line tall
    if job.is_empty() {
        job.append(" ", 0.0, atom_format(block.kind, &[], false));
    }

    job
}
