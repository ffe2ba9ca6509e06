use crate::document::{Alignment, MarkKind};
use crate::editor::Editor;
use crate::engine::{BlockQuery, Command, Extension};

/// Fixed set of toolbar controls, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarItem {
    Bold,
    Italic,
    Underline,
    Strike,
    Heading,
    BulletList,
    OrderedList,
    TaskList,
    AlignLeft,
    AlignCenter,
    AlignRight,
    AlignJustify,
    Link,
    Image,
    CodeBlock,
}

/// What activating a toolbar item does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    Run(Command),
    /// Ask for a link URL, pre-filled with the current one
    PromptLink { previous: Option<String> },
    /// Ask for an image URL
    PromptImage,
}

impl ToolbarItem {
    pub const ALL: [ToolbarItem; 15] = [
        ToolbarItem::Bold,
        ToolbarItem::Italic,
        ToolbarItem::Underline,
        ToolbarItem::Strike,
        ToolbarItem::Heading,
        ToolbarItem::BulletList,
        ToolbarItem::OrderedList,
        ToolbarItem::TaskList,
        ToolbarItem::AlignLeft,
        ToolbarItem::AlignCenter,
        ToolbarItem::AlignRight,
        ToolbarItem::AlignJustify,
        ToolbarItem::Link,
        ToolbarItem::Image,
        ToolbarItem::CodeBlock,
    ];

    /// Short button label
    pub fn label(self) -> &'static str {
        match self {
            ToolbarItem::Bold => "B",
            ToolbarItem::Italic => "I",
            ToolbarItem::Underline => "U",
            ToolbarItem::Strike => "S",
            ToolbarItem::Heading => "H",
            ToolbarItem::BulletList => "•",
            ToolbarItem::OrderedList => "1.",
            ToolbarItem::TaskList => "☐",
            ToolbarItem::AlignLeft => "⇤",
            ToolbarItem::AlignCenter => "↔",
            ToolbarItem::AlignRight => "⇥",
            ToolbarItem::AlignJustify => "☰",
            ToolbarItem::Link => "🔗",
            ToolbarItem::Image => "🖼",
            ToolbarItem::CodeBlock => "</>",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            ToolbarItem::Bold => "Bold",
            ToolbarItem::Italic => "Italic",
            ToolbarItem::Underline => "Underline",
            ToolbarItem::Strike => "Strikethrough",
            ToolbarItem::Heading => "Block type",
            ToolbarItem::BulletList => "Bullet list",
            ToolbarItem::OrderedList => "Ordered list",
            ToolbarItem::TaskList => "Task list",
            ToolbarItem::AlignLeft => "Align left",
            ToolbarItem::AlignCenter => "Align center",
            ToolbarItem::AlignRight => "Align right",
            ToolbarItem::AlignJustify => "Justify",
            ToolbarItem::Link => "Link",
            ToolbarItem::Image => "Image",
            ToolbarItem::CodeBlock => "Code block",
        }
    }

    /// Extension the item depends on
    pub fn extension(self) -> Extension {
        match self {
            ToolbarItem::Bold => Extension::Bold,
            ToolbarItem::Italic => Extension::Italic,
            ToolbarItem::Underline => Extension::Underline,
            ToolbarItem::Strike => Extension::Strike,
            ToolbarItem::Heading => Extension::Heading,
            ToolbarItem::BulletList => Extension::BulletList,
            ToolbarItem::OrderedList => Extension::OrderedList,
            ToolbarItem::TaskList => Extension::TaskList,
            ToolbarItem::AlignLeft
            | ToolbarItem::AlignCenter
            | ToolbarItem::AlignRight
            | ToolbarItem::AlignJustify => Extension::TextAlign,
            ToolbarItem::Link => Extension::Link,
            ToolbarItem::Image => Extension::Image,
            ToolbarItem::CodeBlock => Extension::CodeBlock,
        }
    }

    /// Action for a button press. The heading selector has no single
    /// action; see `HeadingChoice::command`.
    pub fn action(self, editor: &Editor) -> Option<ToolbarAction> {
        let command = match self {
            ToolbarItem::Bold => Command::ToggleMark(MarkKind::Bold),
            ToolbarItem::Italic => Command::ToggleMark(MarkKind::Italic),
            ToolbarItem::Underline => Command::ToggleMark(MarkKind::Underline),
            ToolbarItem::Strike => Command::ToggleMark(MarkKind::Strike),
            ToolbarItem::Heading => return None,
            ToolbarItem::BulletList => Command::ToggleBulletList,
            ToolbarItem::OrderedList => Command::ToggleOrderedList,
            ToolbarItem::TaskList => Command::ToggleTaskList,
            ToolbarItem::AlignLeft => Command::SetTextAlign(Alignment::Left),
            ToolbarItem::AlignCenter => Command::SetTextAlign(Alignment::Center),
            ToolbarItem::AlignRight => Command::SetTextAlign(Alignment::Right),
            ToolbarItem::AlignJustify => Command::SetTextAlign(Alignment::Justify),
            ToolbarItem::Link => {
                return Some(ToolbarAction::PromptLink {
                    previous: editor.link_href(),
                })
            }
            ToolbarItem::Image => return Some(ToolbarAction::PromptImage),
            ToolbarItem::CodeBlock => Command::ToggleCodeBlock,
        };
        Some(ToolbarAction::Run(command))
    }

    /// Whether the item reflects the formatting at the selection
    pub fn is_active(self, editor: &Editor) -> bool {
        match self {
            ToolbarItem::Bold => editor.is_mark_active(MarkKind::Bold),
            ToolbarItem::Italic => editor.is_mark_active(MarkKind::Italic),
            ToolbarItem::Underline => editor.is_mark_active(MarkKind::Underline),
            ToolbarItem::Strike => editor.is_mark_active(MarkKind::Strike),
            ToolbarItem::Heading => HeadingChoice::current(editor) != HeadingChoice::Paragraph,
            ToolbarItem::BulletList => editor.is_block_active(BlockQuery::BulletList),
            ToolbarItem::OrderedList => editor.is_block_active(BlockQuery::OrderedList),
            ToolbarItem::TaskList => editor.is_block_active(BlockQuery::TaskList),
            ToolbarItem::AlignLeft => editor.is_align_active(Alignment::Left),
            ToolbarItem::AlignCenter => editor.is_align_active(Alignment::Center),
            ToolbarItem::AlignRight => editor.is_align_active(Alignment::Right),
            ToolbarItem::AlignJustify => editor.is_align_active(Alignment::Justify),
            ToolbarItem::Link => editor.is_mark_active(MarkKind::Link),
            ToolbarItem::Image => false,
            ToolbarItem::CodeBlock => editor.is_block_active(BlockQuery::CodeBlock),
        }
    }
}

/// Values of the block-type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingChoice {
    Paragraph,
    H1,
    H2,
    H3,
}

impl HeadingChoice {
    pub const ALL: [HeadingChoice; 4] = [
        HeadingChoice::Paragraph,
        HeadingChoice::H1,
        HeadingChoice::H2,
        HeadingChoice::H3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HeadingChoice::Paragraph => "Paragraph",
            HeadingChoice::H1 => "H1",
            HeadingChoice::H2 => "H2",
            HeadingChoice::H3 => "H3",
        }
    }

    pub fn level(self) -> Option<u8> {
        match self {
            HeadingChoice::Paragraph => None,
            HeadingChoice::H1 => Some(1),
            HeadingChoice::H2 => Some(2),
            HeadingChoice::H3 => Some(3),
        }
    }

    /// Command run when this value is picked
    pub fn command(self) -> Command {
        match self.level() {
            Some(level) => Command::ToggleHeading(level),
            None => Command::SetParagraph,
        }
    }

    /// Value shown for the current block. Anything that is not an H1-H3
    /// heading shows as paragraph.
    pub fn current(editor: &Editor) -> Self {
        Self::ALL
            .into_iter()
            .skip(1)
            .find(|choice| {
                choice
                    .level()
                    .is_some_and(|level| editor.is_block_active(BlockQuery::Heading(level)))
            })
            .unwrap_or(HeadingChoice::Paragraph)
    }

    /// Next value, wrapping around (keyboard cycling)
    pub fn next(self) -> Self {
        match self {
            HeadingChoice::Paragraph => HeadingChoice::H1,
            HeadingChoice::H1 => HeadingChoice::H2,
            HeadingChoice::H2 => HeadingChoice::H3,
            HeadingChoice::H3 => HeadingChoice::Paragraph,
        }
    }
}

/// Command for the answer to a link prompt.
/// Cancelled: nothing. Empty: remove the link. Otherwise: set it.
pub fn resolve_link_prompt(answer: Option<&str>) -> Option<Command> {
    match answer? {
        "" => Some(Command::UnsetLink),
        url => Some(Command::SetLink(url.to_string())),
    }
}

/// Command for the answer to an image prompt. Only a non-empty URL inserts.
pub fn resolve_image_prompt(answer: Option<&str>) -> Option<Command> {
    answer
        .filter(|url| !url.is_empty())
        .map(|url| Command::InsertImage(url.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemState {
    pub item: ToolbarItem,
    pub active: bool,
    pub enabled: bool,
}

/// Toolbar rendering state captured from the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarState {
    pub items: Vec<ItemState>,
    pub heading: HeadingChoice,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl ToolbarState {
    pub fn capture(editor: &Editor) -> Self {
        let items = ToolbarItem::ALL
            .into_iter()
            .map(|item| ItemState {
                item,
                active: item.is_active(editor),
                enabled: editor.is_open() && editor.has_extension(item.extension()),
            })
            .collect();

        Self {
            items,
            heading: HeadingChoice::current(editor),
            can_undo: editor.can_undo(),
            can_redo: editor.can_redo(),
        }
    }

    pub fn get(&self, item: ToolbarItem) -> Option<ItemState> {
        self.items.iter().copied().find(|state| state.item == item)
    }
}
