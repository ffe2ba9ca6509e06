use rich_text_editor::document::Atom;
use rich_text_editor::{Alignment, Block, BlockKind, Document, Mark, MarkKind, Position};

fn bold(text: &str) -> Vec<Atom> {
    text.chars()
        .map(|ch| Atom::Char {
            ch,
            marks: vec![Mark::Bold],
        })
        .collect()
}

#[test]
fn test_from_text_one_paragraph_per_line() {
    let doc = Document::from_text("one\ntwo\n");
    assert_eq!(doc.block_count(), 3);
    assert_eq!(doc.plain_text(), "one\ntwo\n");
    assert!(doc.blocks().iter().all(|b| b.kind == BlockKind::Paragraph));
    assert_eq!(doc.end(), Position::new(2, 0));
}

#[test]
fn test_from_blocks_never_empty() {
    let doc = Document::from_blocks(Vec::new());
    assert_eq!(doc.block_count(), 1);
    assert_eq!(doc.end(), Position::zero());
}

#[test]
fn test_json_shape() {
    let doc = Document::from_text("Hi");
    assert_eq!(
        doc.to_json().unwrap(),
        r#"{"type":"doc","content":[{"kind":{"type":"paragraph"},"content":[{"type":"text","text":"Hi"}]}]}"#
    );
}

#[test]
fn test_json_keeps_formatting() {
    let mut heading = Block::new(BlockKind::Heading { level: 2 });
    heading.align = Alignment::Center;
    let mut atoms = bold("Big");
    atoms.push(Atom::Image {
        src: "logo.png".into(),
    });
    heading.set_atoms(atoms);

    let doc = Document::from_blocks(vec![heading, Block::paragraph("body")]);
    let parsed = Document::from_json(&doc.to_json().unwrap()).unwrap();

    assert_eq!(parsed, doc);
    assert_eq!(parsed.blocks()[0].align, Alignment::Center);
    assert_eq!(parsed.block_len(0), 4);
}

#[test]
fn test_from_json_rejects_garbage() {
    assert!(Document::from_json("not a document").is_err());
    assert!(Document::parse_json("not a document").is_err());
}

#[test]
fn test_json_without_blocks_becomes_empty_paragraph() {
    let json = r#"{"type":"doc","content":[]}"#;
    assert_eq!(Document::parse_json(json).unwrap(), None);

    let mut doc = Document::from_json(json).unwrap();
    assert_eq!(doc, Document::new());
    assert_eq!(doc.block_count(), 1);

    // Range operations stay in bounds
    assert!(doc.atoms_in_range(Position::zero(), Position::new(3, 3)).is_empty());
    doc.update_atoms_in_range(Position::zero(), doc.end(), |_, _| {});
    assert_eq!(doc.plain_text(), "");
}

#[test]
fn test_runs_merge_when_marks_match() {
    let mut block = Block::paragraph("");
    let mut atoms = bold("ab");
    atoms.extend(bold("cd"));
    atoms.push(Atom::plain('e'));
    block.set_atoms(atoms);

    assert_eq!(block.content().len(), 2);
    assert_eq!(block.text(), "abcde");
}

#[test]
fn test_clamp() {
    let doc = Document::from_text("abc\nde");
    assert_eq!(doc.clamp(Position::new(0, 10)), Position::new(0, 3));
    assert_eq!(doc.clamp(Position::new(9, 9)), Position::new(1, 2));
}

#[test]
fn test_split_and_merge() {
    let mut doc = Document::from_text("HelloWorld");

    let cursor = doc.split_block(Position::new(0, 5));
    assert_eq!(cursor, Position::new(1, 0));
    assert_eq!(doc.plain_text(), "Hello\nWorld");

    let joined = doc.merge_with_previous(1);
    assert_eq!(joined, Some(Position::new(0, 5)));
    assert_eq!(doc.plain_text(), "HelloWorld");
    assert_eq!(doc.merge_with_previous(0), None);
}

#[test]
fn test_split_keeps_alignment() {
    let mut doc = Document::from_text("ab");
    if let Some(block) = doc.block_mut(0) {
        block.align = Alignment::Right;
    }

    doc.split_block(Position::new(0, 1));
    assert_eq!(doc.blocks()[1].align, Alignment::Right);
}

#[test]
fn test_delete_range_across_blocks() {
    let mut doc = Document::from_text("one\ntwo\nthree");

    let cursor = doc.delete_range(Position::new(2, 2), Position::new(0, 1));
    assert_eq!(cursor, Position::new(0, 1));
    assert_eq!(doc.plain_text(), "oree");
    assert_eq!(doc.block_count(), 1);
}

#[test]
fn test_marks_at_prefers_previous_atom() {
    let mut block = Block::paragraph("");
    let mut atoms = bold("b");
    atoms.push(Atom::plain('p'));
    block.set_atoms(atoms);
    let doc = Document::from_blocks(vec![block]);

    assert_eq!(doc.marks_at(Position::new(0, 1)), vec![Mark::Bold]);
    assert!(doc.marks_at(Position::new(0, 2)).is_empty());
    // Start of block falls back to the following atom
    assert_eq!(doc.marks_at(Position::zero()), vec![Mark::Bold]);
}

#[test]
fn test_update_atoms_in_range() {
    let mut doc = Document::from_text("abc\ndef");
    doc.update_atoms_in_range(Position::new(0, 1), Position::new(1, 2), |_, atom| {
        if let Atom::Char { marks, .. } = atom {
            marks.push(Mark::Italic);
        }
    });

    let italic: Vec<bool> = doc
        .atoms_in_range(Position::zero(), doc.end())
        .iter()
        .map(|atom| atom.has_mark(MarkKind::Italic))
        .collect();
    assert_eq!(italic, vec![false, true, true, true, true, false]);
}

#[test]
fn test_single_link_per_run() {
    let mut block = Block::paragraph("");
    block.set_atoms(vec![Atom::Char {
        ch: 'x',
        marks: vec![
            Mark::Link { href: "a".into() },
            Mark::Link { href: "b".into() },
        ],
    }]);

    let atoms = block.atoms();
    assert_eq!(atoms[0].marks().len(), 1);
}
