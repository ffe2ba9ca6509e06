use super::command::Command;
use super::engine::DocumentEngine;
use super::error::{EngineError, EngineResult};
use super::extension::ExtensionSet;
use crate::document::{Alignment, Atom, BlockKind, Document, Mark, MarkKind, Position, Selection};
use crate::history::Snapshot;
use std::ops::RangeInclusive;
use tracing::debug;

/// Block types the toolbar asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockQuery {
    Paragraph,
    Heading(u8),
    BulletList,
    OrderedList,
    TaskList,
    CodeBlock,
}

impl BlockQuery {
    pub fn matches(self, kind: BlockKind) -> bool {
        match (self, kind) {
            (BlockQuery::Paragraph, BlockKind::Paragraph) => true,
            (BlockQuery::Heading(want), BlockKind::Heading { level }) => want == level,
            (BlockQuery::BulletList, BlockKind::BulletItem) => true,
            (BlockQuery::OrderedList, BlockKind::OrderedItem) => true,
            (BlockQuery::TaskList, BlockKind::TaskItem { .. }) => true,
            (BlockQuery::CodeBlock, BlockKind::CodeBlock) => true,
            _ => false,
        }
    }
}

/// Same kind, ignoring a task item's checked state
fn same_kind(a: BlockKind, b: BlockKind) -> bool {
    match (a, b) {
        (BlockKind::TaskItem { .. }, BlockKind::TaskItem { .. }) => true,
        _ => a == b,
    }
}

fn strip_marks(atom: &mut Atom) {
    if let Atom::Char { marks, .. } = atom {
        marks.clear();
    }
}

/// In-memory rich-text engine: document, selection and stored marks
#[derive(Debug, Clone)]
pub struct RichTextEngine {
    document: Document,
    selection: Selection,
    /// Marks for the next typed text, set by toggling with an empty selection
    stored_marks: Option<Vec<Mark>>,
    extensions: ExtensionSet,
}

impl RichTextEngine {
    pub fn new(extensions: ExtensionSet) -> Self {
        Self::with_document(Document::new(), extensions)
    }

    pub fn with_document(document: Document, extensions: ExtensionSet) -> Self {
        Self {
            document,
            selection: Selection::default(),
            stored_marks: None,
            extensions,
        }
    }

    /// Engine over plain text with every extension enabled
    pub fn from_text(text: &str) -> Self {
        Self::with_document(Document::from_text(text), ExtensionSet::all())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn cursor(&self) -> Position {
        self.selection.end
    }

    pub fn extensions(&self) -> &ExtensionSet {
        &self.extensions
    }

    pub fn stored_marks(&self) -> Option<&[Mark]> {
        self.stored_marks.as_deref()
    }

    /// Whether `command` is available with the enabled extensions
    pub fn can_execute(&self, command: &Command) -> bool {
        command
            .required_extension()
            .map_or(true, |extension| self.extensions.contains(extension))
    }

    /// Run a command. Returns whether the document changed.
    pub fn execute(&mut self, command: &Command) -> EngineResult<bool> {
        if let Some(extension) = command.required_extension() {
            if !self.extensions.contains(extension) {
                return Err(EngineError::Unsupported(extension));
            }
        }

        let before = self.document.clone();

        match command {
            Command::InsertText(text) => self.insert_text(text),
            Command::Backspace => self.backspace(),
            Command::DeleteForward => self.delete_forward(),
            Command::ToggleMark(kind) => self.toggle_mark(*kind),
            Command::SetParagraph => {
                let blocks = self.selected_blocks();
                self.set_kind(blocks, BlockKind::Paragraph);
            }
            Command::ToggleHeading(level) => {
                if !(1..=6).contains(level) {
                    return Err(EngineError::InvalidHeadingLevel(*level));
                }
                self.toggle_kind(BlockKind::Heading { level: *level });
            }
            Command::ToggleBulletList => self.toggle_kind(BlockKind::BulletItem),
            Command::ToggleOrderedList => self.toggle_kind(BlockKind::OrderedItem),
            Command::ToggleTaskList => self.toggle_kind(BlockKind::TaskItem { checked: false }),
            Command::ToggleTaskChecked => self.toggle_task_checked(),
            Command::ToggleCodeBlock => self.toggle_code_block(),
            Command::SetTextAlign(align) => self.set_text_align(*align),
            Command::SetLink(href) => self.set_link(href),
            Command::UnsetLink => self.unset_link(),
            Command::InsertImage(src) => self.insert_image(src),
        }

        let changed = self.document != before;
        debug!(command = command.name(), changed, "executed command");
        Ok(changed)
    }

    // ---- text editing ----

    fn insert_text(&mut self, text: &str) {
        let mut cursor = self.delete_selection();
        let marks = self
            .stored_marks
            .take()
            .unwrap_or_else(|| self.inherited_marks(cursor));

        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                cursor = self.document.split_block(cursor);
            }

            let in_code = self
                .document
                .block(cursor.block)
                .is_some_and(|b| b.kind == BlockKind::CodeBlock);
            let atoms: Vec<Atom> = line
                .chars()
                .map(|ch| Atom::Char {
                    ch,
                    marks: if in_code { Vec::new() } else { marks.clone() },
                })
                .collect();
            cursor = self.document.insert_atoms(cursor, &atoms);
        }

        self.selection = Selection::cursor(cursor);
    }

    /// Marks typed text picks up from its surroundings. Links only extend
    /// when the cursor sits strictly inside one.
    fn inherited_marks(&self, cursor: Position) -> Vec<Mark> {
        let mut marks = self.document.marks_at(cursor);

        let before = self.document.atom_before(cursor);
        let after = self.document.atom_after(cursor);
        let inside_link = match (before.as_ref().and_then(Atom::link), after.as_ref().and_then(Atom::link)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
        if !inside_link {
            marks.retain(|m| m.kind() != MarkKind::Link);
        }

        marks
    }

    fn delete_selection(&mut self) -> Position {
        if self.selection.is_empty() {
            return self.cursor();
        }

        let (from, to) = self.selection.range();
        let cursor = self.document.delete_range(from, to);
        self.selection = Selection::cursor(cursor);
        cursor
    }

    fn backspace(&mut self) {
        if !self.selection.is_empty() {
            self.delete_selection();
            return;
        }

        let cursor = self.cursor();
        let cursor = if cursor.offset > 0 {
            self.document
                .delete_range(Position::new(cursor.block, cursor.offset - 1), cursor)
        } else if self
            .document
            .block(cursor.block)
            .is_some_and(|b| b.kind != BlockKind::Paragraph)
        {
            // Start of a heading, list item or code block: lift to paragraph
            let blocks = cursor.block..=cursor.block;
            self.set_kind(blocks, BlockKind::Paragraph);
            cursor
        } else {
            self.document
                .merge_with_previous(cursor.block)
                .unwrap_or(cursor)
        };

        self.selection = Selection::cursor(cursor);
    }

    fn delete_forward(&mut self) {
        if !self.selection.is_empty() {
            self.delete_selection();
            return;
        }

        let cursor = self.cursor();
        if cursor.offset < self.document.block_len(cursor.block) {
            self.document
                .delete_range(cursor, Position::new(cursor.block, cursor.offset + 1));
        } else if cursor.block + 1 < self.document.block_count() {
            self.document.merge_with_previous(cursor.block + 1);
        }

        self.selection = Selection::cursor(cursor);
    }

    fn insert_image(&mut self, src: &str) {
        let cursor = self.delete_selection();
        let cursor = self.document.insert_atoms(
            cursor,
            &[Atom::Image {
                src: src.to_string(),
            }],
        );
        self.selection = Selection::cursor(cursor);
    }

    // ---- marks ----

    fn toggle_mark(&mut self, kind: MarkKind) {
        let Some(mark) = kind.to_mark() else {
            return;
        };

        if self.selection.is_empty() {
            let cursor = self.cursor();
            let mut marks = self
                .stored_marks
                .take()
                .unwrap_or_else(|| self.inherited_marks(cursor));
            if let Some(index) = marks.iter().position(|m| *m == mark) {
                marks.remove(index);
            } else {
                marks.push(mark);
            }
            self.stored_marks = Some(marks);
            return;
        }

        let (from, to) = self.selection.range();
        if self.is_mark_active(kind) {
            self.document.update_atoms_in_range(from, to, |_, atom| {
                if let Atom::Char { marks, .. } = atom {
                    marks.retain(|m| m.kind() != kind);
                }
            });
        } else {
            self.document.update_atoms_in_range(from, to, |block, atom| {
                if let Atom::Char { marks, .. } = atom {
                    if block != BlockKind::CodeBlock {
                        marks.push(mark.clone());
                    }
                }
            });
        }
    }

    /// Range a link command acts on: the selection, or the link run
    /// around the cursor when nothing is selected.
    fn link_range(&self) -> (Position, Position) {
        if !self.selection.is_empty() {
            return self.selection.range();
        }

        let cursor = self.cursor();
        let Some(block) = self.document.block(cursor.block) else {
            return (cursor, cursor);
        };
        let atoms = block.atoms();

        let link = cursor
            .offset
            .checked_sub(1)
            .and_then(|i| atoms.get(i))
            .and_then(Atom::link)
            .or_else(|| atoms.get(cursor.offset).and_then(Atom::link));
        let Some(link) = link else {
            return (cursor, cursor);
        };

        let mut start = cursor.offset;
        while start > 0 && atoms[start - 1].link() == Some(link) {
            start -= 1;
        }
        let mut end = cursor.offset;
        while end < atoms.len() && atoms[end].link() == Some(link) {
            end += 1;
        }

        (
            Position::new(cursor.block, start),
            Position::new(cursor.block, end),
        )
    }

    fn set_link(&mut self, href: &str) {
        let link = Mark::Link {
            href: href.to_string(),
        };
        let (from, to) = self.link_range();

        if from == to {
            let mut marks = self
                .stored_marks
                .take()
                .unwrap_or_else(|| self.inherited_marks(from));
            marks.retain(|m| m.kind() != MarkKind::Link);
            marks.push(link);
            self.stored_marks = Some(marks);
            return;
        }

        self.document.update_atoms_in_range(from, to, |block, atom| {
            if let Atom::Char { marks, .. } = atom {
                if block != BlockKind::CodeBlock {
                    marks.retain(|m| m.kind() != MarkKind::Link);
                    marks.push(link.clone());
                }
            }
        });
        self.selection = Selection::new(from, to);
    }

    fn unset_link(&mut self) {
        let (from, to) = self.link_range();

        if from == to {
            if let Some(marks) = self.stored_marks.as_mut() {
                marks.retain(|m| m.kind() != MarkKind::Link);
            }
            return;
        }

        self.document.update_atoms_in_range(from, to, |_, atom| {
            if let Atom::Char { marks, .. } = atom {
                marks.retain(|m| m.kind() != MarkKind::Link);
            }
        });
        self.selection = Selection::new(from, to);
    }

    // ---- blocks ----

    fn selected_blocks(&self) -> RangeInclusive<usize> {
        let (from, to) = self.selection.range();
        self.document.blocks_in_range(from, to)
    }

    fn all_blocks_are(&self, kind: BlockKind) -> bool {
        self.selected_blocks().all(|index| {
            self.document
                .block(index)
                .is_some_and(|block| same_kind(block.kind, kind))
        })
    }

    fn set_kind(&mut self, blocks: RangeInclusive<usize>, kind: BlockKind) {
        for index in blocks {
            if let Some(block) = self.document.block_mut(index) {
                if !same_kind(block.kind, kind) {
                    block.kind = kind;
                }
            }
        }
    }

    fn toggle_kind(&mut self, kind: BlockKind) {
        let target = if self.all_blocks_are(kind) {
            BlockKind::Paragraph
        } else {
            kind
        };
        let blocks = self.selected_blocks();
        self.set_kind(blocks, target);
    }

    fn toggle_code_block(&mut self) {
        if self.all_blocks_are(BlockKind::CodeBlock) {
            let blocks = self.selected_blocks();
            self.set_kind(blocks, BlockKind::Paragraph);
            return;
        }

        for index in self.selected_blocks() {
            if let Some(block) = self.document.block_mut(index) {
                block.kind = BlockKind::CodeBlock;
                let mut atoms = block.atoms();
                atoms.iter_mut().for_each(strip_marks);
                block.set_atoms(atoms);
            }
        }
    }

    fn toggle_task_checked(&mut self) {
        for index in self.selected_blocks() {
            if let Some(block) = self.document.block_mut(index) {
                if let BlockKind::TaskItem { checked } = block.kind {
                    block.kind = BlockKind::TaskItem { checked: !checked };
                }
            }
        }
    }

    fn set_text_align(&mut self, align: Alignment) {
        for index in self.selected_blocks() {
            if let Some(block) = self.document.block_mut(index) {
                block.align = align;
            }
        }
    }

    // ---- queries ----

    /// Whether typing here, or the whole selection, carries `kind`
    pub fn is_mark_active(&self, kind: MarkKind) -> bool {
        if self.selection.is_empty() {
            return match &self.stored_marks {
                Some(marks) => marks.iter().any(|m| m.kind() == kind),
                None => self
                    .document
                    .marks_at(self.cursor())
                    .iter()
                    .any(|m| m.kind() == kind),
            };
        }

        let (from, to) = self.selection.range();
        let atoms = self.document.atoms_in_range(from, to);
        let mut chars = atoms
            .iter()
            .filter(|atom| matches!(atom, Atom::Char { .. }))
            .peekable();
        chars.peek().is_some() && chars.all(|atom| atom.has_mark(kind))
    }

    /// Whether the first selected block matches `query`
    pub fn is_block_active(&self, query: BlockQuery) -> bool {
        let (from, _) = self.selection.range();
        self.document
            .block(from.block)
            .is_some_and(|block| query.matches(block.kind))
    }

    pub fn is_align_active(&self, align: Alignment) -> bool {
        let (from, _) = self.selection.range();
        self.document
            .block(from.block)
            .is_some_and(|block| block.align == align)
    }

    /// Href of the link at the cursor, or the first link in the selection
    pub fn link_href(&self) -> Option<String> {
        let (from, to) = self.link_range();
        if from == to {
            return self
                .stored_marks
                .as_ref()?
                .iter()
                .find_map(|m| m.href().map(str::to_string));
        }

        self.document
            .atoms_in_range(from, to)
            .iter()
            .find_map(|atom| atom.link().and_then(Mark::href).map(str::to_string))
    }

    // ---- selection movement ----

    pub fn move_left(&mut self, extend: bool) {
        let head = self.selection.end;
        let target = if !extend && !self.selection.is_empty() {
            self.selection.range().0
        } else if head.offset > 0 {
            Position::new(head.block, head.offset - 1)
        } else if head.block > 0 {
            Position::new(head.block - 1, self.document.block_len(head.block - 1))
        } else {
            head
        };
        self.move_to(target, extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        let head = self.selection.end;
        let target = if !extend && !self.selection.is_empty() {
            self.selection.range().1
        } else if head.offset < self.document.block_len(head.block) {
            Position::new(head.block, head.offset + 1)
        } else if head.block + 1 < self.document.block_count() {
            Position::new(head.block + 1, 0)
        } else {
            head
        };
        self.move_to(target, extend);
    }

    pub fn move_up(&mut self, extend: bool) {
        let head = self.selection.end;
        let target = if head.block > 0 {
            self.document
                .clamp(Position::new(head.block - 1, head.offset))
        } else {
            Position::zero()
        };
        self.move_to(target, extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        let head = self.selection.end;
        let target = if head.block + 1 < self.document.block_count() {
            self.document
                .clamp(Position::new(head.block + 1, head.offset))
        } else {
            self.document.end()
        };
        self.move_to(target, extend);
    }

    pub fn move_to_line_start(&mut self, extend: bool) {
        let head = self.selection.end;
        self.move_to(Position::new(head.block, 0), extend);
    }

    pub fn move_to_line_end(&mut self, extend: bool) {
        let head = self.selection.end;
        let end = self.document.block_len(head.block);
        self.move_to(Position::new(head.block, end), extend);
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(Position::zero(), self.document.end());
        self.stored_marks = None;
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Selection::new(
            self.document.clamp(selection.start),
            self.document.clamp(selection.end),
        );
        self.stored_marks = None;
    }

    fn move_to(&mut self, target: Position, extend: bool) {
        self.selection = if extend {
            Selection::new(self.selection.start, target)
        } else {
            Selection::cursor(target)
        };
        self.stored_marks = None;
    }
}

impl Default for RichTextEngine {
    fn default() -> Self {
        Self::new(ExtensionSet::all())
    }
}

impl DocumentEngine for RichTextEngine {
    fn snapshot(&self) -> EngineResult<Snapshot> {
        Ok(Snapshot::from(self.document.to_json()?))
    }

    fn load_snapshot(&mut self, snapshot: &Snapshot) -> EngineResult<()> {
        let Some(document) = Document::parse_json(snapshot.as_str())? else {
            return Err(EngineError::EmptyDocument);
        };

        self.document = document;
        self.selection = Selection::new(
            self.document.clamp(self.selection.start),
            self.document.clamp(self.selection.end),
        );
        self.stored_marks = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Extension;

    fn typed(text: &str) -> RichTextEngine {
        let mut engine = RichTextEngine::default();
        engine.execute(&Command::InsertText(text.into())).unwrap();
        engine
    }

    #[test]
    fn test_snapshot_roundtrip_restores_document() {
        let mut engine = typed("Hello");
        let saved = engine.snapshot().unwrap();

        engine.execute(&Command::InsertText(" World".into())).unwrap();
        assert_eq!(engine.document().plain_text(), "Hello World");

        engine.load_snapshot(&saved).unwrap();
        assert_eq!(engine.document().plain_text(), "Hello");
        assert_eq!(engine.cursor(), Position::new(0, 5));
    }

    #[test]
    fn test_snapshot_is_stable_across_load() {
        let mut engine = typed("Stable");
        engine.select_all();
        engine.execute(&Command::ToggleMark(MarkKind::Bold)).unwrap();
        let saved = engine.snapshot().unwrap();

        engine.load_snapshot(&saved).unwrap();
        assert_eq!(engine.snapshot().unwrap(), saved);
    }

    #[test]
    fn test_bad_snapshot_leaves_document_untouched() {
        let mut engine = typed("Keep me");

        assert!(matches!(
            engine.load_snapshot(&Snapshot::from("not json")),
            Err(EngineError::Json(_))
        ));
        assert!(matches!(
            engine.load_snapshot(&Snapshot::from(r#"{"type":"doc","content":[]}"#)),
            Err(EngineError::EmptyDocument)
        ));
        assert_eq!(engine.document().plain_text(), "Keep me");
    }

    #[test]
    fn test_unsupported_command_is_rejected() {
        let mut engine = RichTextEngine::new(ExtensionSet::starter_kit());
        let command = Command::ToggleMark(MarkKind::Underline);

        assert!(!engine.can_execute(&command));
        assert!(matches!(
            engine.execute(&command),
            Err(EngineError::Unsupported(Extension::Underline))
        ));
        assert!(engine.can_execute(&Command::ToggleMark(MarkKind::Bold)));
    }

    #[test]
    fn test_invalid_heading_level() {
        let mut engine = typed("Title");
        assert!(matches!(
            engine.execute(&Command::ToggleHeading(7)),
            Err(EngineError::InvalidHeadingLevel(7))
        ));
    }

    #[test]
    fn test_stored_mark_does_not_change_document() {
        let mut engine = typed("plain ");
        let changed = engine
            .execute(&Command::ToggleMark(MarkKind::Bold))
            .unwrap();
        assert!(!changed);
        assert!(engine.is_mark_active(MarkKind::Bold));

        engine.execute(&Command::InsertText("bold".into())).unwrap();
        let atoms = engine.document().blocks()[0].atoms();
        assert!(!atoms[0].has_mark(MarkKind::Bold));
        assert!(atoms[6].has_mark(MarkKind::Bold));
        assert!(atoms[9].has_mark(MarkKind::Bold));
    }

    #[test]
    fn test_typing_after_link_does_not_extend_it() {
        let mut engine = typed("site");
        engine.select_all();
        engine
            .execute(&Command::SetLink("https://example.com".into()))
            .unwrap();
        engine.move_to_line_end(false);
        engine.execute(&Command::InsertText("!".into())).unwrap();

        let atoms = engine.document().blocks()[0].atoms();
        assert!(atoms[3].has_mark(MarkKind::Link));
        assert!(!atoms[4].has_mark(MarkKind::Link));
    }

    #[test]
    fn test_movement_clears_stored_marks() {
        let mut engine = typed("ab");
        engine
            .execute(&Command::ToggleMark(MarkKind::Italic))
            .unwrap();
        assert!(engine.stored_marks().is_some());

        engine.move_left(false);
        assert!(engine.stored_marks().is_none());
        assert!(!engine.is_mark_active(MarkKind::Italic));
    }
}
