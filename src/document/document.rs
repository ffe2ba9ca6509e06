use super::node::{Atom, Block, BlockKind, Mark};
use super::position::Position;
use serde::{Deserialize, Serialize};

/// Rich-text document: a non-empty sequence of blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "doc")]
pub struct Document {
    content: Vec<Block>,
}

impl Document {
    /// Document holding a single empty paragraph
    pub fn new() -> Self {
        Self {
            content: vec![Block::new(BlockKind::Paragraph)],
        }
    }

    /// One paragraph per line
    pub fn from_text(text: &str) -> Self {
        Self {
            content: text.split('\n').map(Block::paragraph).collect(),
        }
    }

    /// Build from blocks. An empty list yields an empty paragraph.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            return Self::new();
        }
        let mut document = Self { content: blocks };
        document.normalize();
        document
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a serialized document. One with no blocks becomes a single
    /// empty paragraph.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::parse_json(json)?.unwrap_or_default())
    }

    /// Parse a serialized document, `None` when it has no blocks
    pub fn parse_json(json: &str) -> serde_json::Result<Option<Self>> {
        let mut document: Document = serde_json::from_str(json)?;
        if document.content.is_empty() {
            return Ok(None);
        }
        document.normalize();
        Ok(Some(document))
    }

    fn normalize(&mut self) {
        for block in &mut self.content {
            block.normalize();
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.content
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.content.get(index)
    }

    pub fn block_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.content.get_mut(index)
    }

    pub fn block_count(&self) -> usize {
        self.content.len()
    }

    /// Atom count of a block, 0 when out of range
    pub fn block_len(&self, index: usize) -> usize {
        self.content.get(index).map(Block::len).unwrap_or(0)
    }

    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Position after the last atom
    pub fn end(&self) -> Position {
        let last = self.content.len().saturating_sub(1);
        Position::new(last, self.block_len(last))
    }

    /// Nearest valid position
    pub fn clamp(&self, position: Position) -> Position {
        let block = position.block.min(self.content.len().saturating_sub(1));
        Position::new(block, position.offset.min(self.block_len(block)))
    }

    /// Atom immediately before `position` within its block
    pub fn atom_before(&self, position: Position) -> Option<Atom> {
        if position.offset == 0 {
            return None;
        }
        self.content
            .get(position.block)?
            .atoms()
            .into_iter()
            .nth(position.offset - 1)
    }

    /// Atom immediately after `position` within its block
    pub fn atom_after(&self, position: Position) -> Option<Atom> {
        self.content
            .get(position.block)?
            .atoms()
            .into_iter()
            .nth(position.offset)
    }

    /// Marks that text typed at `position` would inherit
    pub fn marks_at(&self, position: Position) -> Vec<Mark> {
        self.atom_before(position)
            .or_else(|| self.atom_after(position))
            .map(|atom| atom.marks().to_vec())
            .unwrap_or_default()
    }

    /// Insert atoms at `position`, returning the position after them
    pub fn insert_atoms(&mut self, position: Position, inserted: &[Atom]) -> Position {
        let position = self.clamp(position);
        let Some(block) = self.content.get_mut(position.block) else {
            return position;
        };

        let mut atoms = block.atoms();
        let tail = atoms.split_off(position.offset);
        atoms.extend_from_slice(inserted);
        atoms.extend(tail);
        block.set_atoms(atoms);

        Position::new(position.block, position.offset + inserted.len())
    }

    /// Split the block at `position` (Enter). Returns the new cursor.
    ///
    /// Code blocks take a newline instead of splitting. An empty list item
    /// turns back into a paragraph.
    pub fn split_block(&mut self, position: Position) -> Position {
        let position = self.clamp(position);
        let Some(block) = self.content.get_mut(position.block) else {
            return position;
        };

        if block.kind == BlockKind::CodeBlock {
            return self.insert_atoms(position, &[Atom::plain('\n')]);
        }

        if block.kind.is_list_item() && block.is_empty() {
            block.kind = BlockKind::Paragraph;
            return position;
        }

        let mut atoms = block.atoms();
        let tail = atoms.split_off(position.offset);
        block.set_atoms(atoms);

        let kind = match block.kind {
            BlockKind::BulletItem => BlockKind::BulletItem,
            BlockKind::OrderedItem => BlockKind::OrderedItem,
            BlockKind::TaskItem { .. } => BlockKind::TaskItem { checked: false },
            _ => BlockKind::Paragraph,
        };
        let mut next = Block::new(kind);
        next.align = block.align;
        next.set_atoms(tail);

        self.content.insert(position.block + 1, next);
        Position::new(position.block + 1, 0)
    }

    /// Delete everything between two positions, joining blocks when the
    /// range spans several. Returns the collapsed cursor.
    pub fn delete_range(&mut self, from: Position, to: Position) -> Position {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let from = self.clamp(from);
        let to = self.clamp(to);

        if from.block == to.block {
            if let Some(block) = self.content.get_mut(from.block) {
                let mut atoms = block.atoms();
                atoms.drain(from.offset..to.offset);
                block.set_atoms(atoms);
            }
            return from;
        }

        let tail = self.content[to.block].atoms().split_off(to.offset);
        self.content.drain(from.block + 1..=to.block);

        let block = &mut self.content[from.block];
        let mut atoms = block.atoms();
        atoms.truncate(from.offset);
        atoms.extend(tail);
        block.set_atoms(atoms);

        from
    }

    /// Join block `index` onto the end of the previous block
    pub fn merge_with_previous(&mut self, index: usize) -> Option<Position> {
        if index == 0 || index >= self.content.len() {
            return None;
        }

        let removed = self.content.remove(index);
        let previous = &mut self.content[index - 1];
        let join_at = previous.len();

        let mut atoms = previous.atoms();
        atoms.extend(removed.atoms());
        previous.set_atoms(atoms);

        Some(Position::new(index - 1, join_at))
    }

    /// Atoms between two positions, in document order
    pub fn atoms_in_range(&self, from: Position, to: Position) -> Vec<Atom> {
        let mut collected = Vec::new();
        self.visit_range(from, to, |atoms, start, end| {
            collected.extend_from_slice(&atoms[start..end]);
        });
        collected
    }

    /// Rewrite every atom between two positions. The closure also receives
    /// the kind of the block holding the atom.
    pub fn update_atoms_in_range<F>(&mut self, from: Position, to: Position, mut update: F)
    where
        F: FnMut(BlockKind, &mut Atom),
    {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let from = self.clamp(from);
        let to = self.clamp(to);

        for index in from.block..=to.block {
            let block = &mut self.content[index];
            let mut atoms = block.atoms();
            let start = if index == from.block { from.offset } else { 0 };
            let end = if index == to.block {
                to.offset
            } else {
                atoms.len()
            };
            for atom in &mut atoms[start..end] {
                update(block.kind, atom);
            }
            block.set_atoms(atoms);
        }
    }

    fn visit_range<F>(&self, from: Position, to: Position, mut visit: F)
    where
        F: FnMut(&[Atom], usize, usize),
    {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let from = self.clamp(from);
        let to = self.clamp(to);

        for index in from.block..=to.block {
            let atoms = self.content[index].atoms();
            let start = if index == from.block { from.offset } else { 0 };
            let end = if index == to.block {
                to.offset
            } else {
                atoms.len()
            };
            visit(&atoms, start, end);
        }
    }

    /// Indices of the blocks touched by a range
    pub fn blocks_in_range(&self, from: Position, to: Position) -> std::ops::RangeInclusive<usize> {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let from = self.clamp(from);
        let to = self.clamp(to);
        from.block..=to.block
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.plain_text())
    }
}
