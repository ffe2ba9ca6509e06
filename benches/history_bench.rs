use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rich_text_editor::{Command, Editor, MarkKind};

fn typed_editor(paragraphs: usize) -> Editor {
    let text = vec!["The quick brown fox jumps over the lazy dog."; paragraphs].join("\n");
    Editor::from_text(&text)
}

fn bench_keystrokes(c: &mut Criterion) {
    c.bench_function("type 100 chars into 50 paragraphs", |b| {
        b.iter_with_setup(
            || typed_editor(50),
            |mut editor| {
                for ch in "Lorem ipsum dolor sit amet ".chars().cycle().take(100) {
                    editor.insert(&ch.to_string());
                }
                black_box(editor.history().undo_len())
            },
        )
    });
}

fn bench_undo_redo(c: &mut Criterion) {
    c.bench_function("undo+redo 100 levels", |b| {
        b.iter_with_setup(
            || {
                let mut editor = typed_editor(50);
                editor.select_all();
                for _ in 0..100 {
                    editor.execute(Command::ToggleMark(MarkKind::Bold));
                }
                editor
            },
            |mut editor| {
                while editor.undo() {}
                while editor.redo() {}
                black_box(editor.can_undo())
            },
        )
    });
}

criterion_group!(benches, bench_keystrokes, bench_undo_redo);
criterion_main!(benches);
