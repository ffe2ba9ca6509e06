use serde::{Deserialize, Serialize};

/// Inline formatting carried by a run of text
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strike,
    Link { href: String },
}

impl Mark {
    pub fn kind(&self) -> MarkKind {
        match self {
            Mark::Bold => MarkKind::Bold,
            Mark::Italic => MarkKind::Italic,
            Mark::Underline => MarkKind::Underline,
            Mark::Strike => MarkKind::Strike,
            Mark::Link { .. } => MarkKind::Link,
        }
    }

    /// Href of a link mark
    pub fn href(&self) -> Option<&str> {
        match self {
            Mark::Link { href } => Some(href),
            _ => None,
        }
    }
}

/// Mark discriminant, used for toggling and queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Link,
}

impl MarkKind {
    /// The attribute-free mark for this kind. Links need an href, so `None`.
    pub fn to_mark(self) -> Option<Mark> {
        match self {
            MarkKind::Bold => Some(Mark::Bold),
            MarkKind::Italic => Some(Mark::Italic),
            MarkKind::Underline => Some(Mark::Underline),
            MarkKind::Strike => Some(Mark::Strike),
            MarkKind::Link => None,
        }
    }
}

/// Inline content of a block as it appears in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inline {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    Image {
        src: String,
    },
}

/// Smallest editable unit: one character or one inline image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Char { ch: char, marks: Vec<Mark> },
    Image { src: String },
}

impl Atom {
    pub fn plain(ch: char) -> Self {
        Atom::Char {
            ch,
            marks: Vec::new(),
        }
    }

    pub fn marks(&self) -> &[Mark] {
        match self {
            Atom::Char { marks, .. } => marks,
            Atom::Image { .. } => &[],
        }
    }

    pub fn has_mark(&self, kind: MarkKind) -> bool {
        self.marks().iter().any(|m| m.kind() == kind)
    }

    /// Link mark on this atom, if any
    pub fn link(&self) -> Option<&Mark> {
        self.marks().iter().find(|m| m.kind() == MarkKind::Link)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub const ALL: [Alignment; 4] = [
        Alignment::Left,
        Alignment::Center,
        Alignment::Right,
        Alignment::Justify,
    ];

    fn is_default(&self) -> bool {
        *self == Alignment::Left
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BlockKind {
    Paragraph,
    Heading { level: u8 },
    BulletItem,
    OrderedItem,
    TaskItem { checked: bool },
    CodeBlock,
}

impl BlockKind {
    pub fn is_list_item(&self) -> bool {
        matches!(
            self,
            BlockKind::BulletItem | BlockKind::OrderedItem | BlockKind::TaskItem { .. }
        )
    }
}

/// A top-level block: paragraph, heading, list item or code block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Alignment::is_default")]
    pub align: Alignment,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    content: Vec<Inline>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            align: Alignment::default(),
            content: Vec::new(),
        }
    }

    /// Unformatted paragraph
    pub fn paragraph(text: &str) -> Self {
        let mut block = Self::new(BlockKind::Paragraph);
        block.set_atoms(text.chars().map(Atom::plain).collect());
        block
    }

    pub fn content(&self) -> &[Inline] {
        &self.content
    }

    /// Expand the content into atoms
    pub fn atoms(&self) -> Vec<Atom> {
        let mut atoms = Vec::new();
        for inline in &self.content {
            match inline {
                Inline::Text { text, marks } => {
                    atoms.extend(text.chars().map(|ch| Atom::Char {
                        ch,
                        marks: marks.clone(),
                    }));
                }
                Inline::Image { src } => atoms.push(Atom::Image { src: src.clone() }),
            }
        }
        atoms
    }

    /// Replace the content with `atoms`, merging runs that share marks
    pub fn set_atoms(&mut self, atoms: Vec<Atom>) {
        let mut content: Vec<Inline> = Vec::new();

        for atom in atoms {
            match atom {
                Atom::Char { ch, marks } => {
                    let marks = canonical_marks(marks);
                    if let Some(Inline::Text {
                        text,
                        marks: run_marks,
                    }) = content.last_mut()
                    {
                        if *run_marks == marks {
                            text.push(ch);
                            continue;
                        }
                    }
                    content.push(Inline::Text {
                        text: ch.to_string(),
                        marks,
                    });
                }
                Atom::Image { src } => content.push(Inline::Image { src }),
            }
        }

        self.content = content;
    }

    /// Re-merge runs after deserialization
    pub(crate) fn normalize(&mut self) {
        let atoms = self.atoms();
        self.set_atoms(atoms);
    }

    /// Number of atoms
    pub fn len(&self) -> usize {
        self.content
            .iter()
            .map(|inline| match inline {
                Inline::Text { text, .. } => text.chars().count(),
                Inline::Image { .. } => 1,
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plain text. Images become U+FFFC.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for inline in &self.content {
            match inline {
                Inline::Text { text: run, .. } => text.push_str(run),
                Inline::Image { .. } => text.push('\u{FFFC}'),
            }
        }
        text
    }
}

/// Sorted, deduplicated, at most one link
fn canonical_marks(mut marks: Vec<Mark>) -> Vec<Mark> {
    marks.sort();
    marks.dedup();
    let mut seen_link = false;
    marks.retain(|m| {
        if m.kind() == MarkKind::Link {
            if seen_link {
                return false;
            }
            seen_link = true;
        }
        true
    });
    marks
}
