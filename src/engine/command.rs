use super::extension::Extension;
use crate::document::{Alignment, MarkKind};

/// A mutating engine command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert text at the cursor, replacing the selection. `\n` splits blocks.
    InsertText(String),
    Backspace,
    DeleteForward,
    ToggleMark(MarkKind),
    SetParagraph,
    ToggleHeading(u8),
    ToggleBulletList,
    ToggleOrderedList,
    ToggleTaskList,
    ToggleTaskChecked,
    ToggleCodeBlock,
    SetTextAlign(Alignment),
    /// Apply a link to the selection, or to the link around the cursor
    SetLink(String),
    UnsetLink,
    InsertImage(String),
}

impl Command {
    /// Extension that must be enabled for this command to run
    pub fn required_extension(&self) -> Option<Extension> {
        match self {
            Command::InsertText(_) | Command::Backspace | Command::DeleteForward => None,
            Command::SetParagraph => None,
            Command::ToggleMark(kind) => Some(match kind {
                MarkKind::Bold => Extension::Bold,
                MarkKind::Italic => Extension::Italic,
                MarkKind::Underline => Extension::Underline,
                MarkKind::Strike => Extension::Strike,
                MarkKind::Link => Extension::Link,
            }),
            Command::ToggleHeading(_) => Some(Extension::Heading),
            Command::ToggleBulletList => Some(Extension::BulletList),
            Command::ToggleOrderedList => Some(Extension::OrderedList),
            Command::ToggleTaskList | Command::ToggleTaskChecked => Some(Extension::TaskList),
            Command::ToggleCodeBlock => Some(Extension::CodeBlock),
            Command::SetTextAlign(_) => Some(Extension::TextAlign),
            Command::SetLink(_) | Command::UnsetLink => Some(Extension::Link),
            Command::InsertImage(_) => Some(Extension::Image),
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::InsertText(_) => "insert_text",
            Command::Backspace => "backspace",
            Command::DeleteForward => "delete_forward",
            Command::ToggleMark(_) => "toggle_mark",
            Command::SetParagraph => "set_paragraph",
            Command::ToggleHeading(_) => "toggle_heading",
            Command::ToggleBulletList => "toggle_bullet_list",
            Command::ToggleOrderedList => "toggle_ordered_list",
            Command::ToggleTaskList => "toggle_task_list",
            Command::ToggleTaskChecked => "toggle_task_checked",
            Command::ToggleCodeBlock => "toggle_code_block",
            Command::SetTextAlign(_) => "set_text_align",
            Command::SetLink(_) => "set_link",
            Command::UnsetLink => "unset_link",
            Command::InsertImage(_) => "insert_image",
        }
    }
}
