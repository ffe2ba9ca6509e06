use rich_text_editor::logging::{self, LogOutput};
use rich_text_editor::{Command, Editor, MarkKind};

fn main() {
    let _guard = logging::init(LogOutput::File);

    println!("📝 Rich-Text Editor - Snapshot Undo/Redo\n");

    let mut editor = Editor::from_text("");

    // Type some text, one undo level per keystroke
    println!("⌨️  Typing...");
    for ch in "Hello".chars() {
        editor.insert(&ch.to_string());
    }
    println!("   Text: {:?}", editor.text());

    // Bold the word
    println!("\n🅱️  Bold...");
    editor.select_all();
    editor.execute(Command::ToggleMark(MarkKind::Bold));
    println!("   Bold active: {}", editor.is_mark_active(MarkKind::Bold));

    // Turn the paragraph into a heading
    println!("\n🔠 Heading 1...");
    editor.execute(Command::ToggleHeading(1));
    println!("   Document: {}", editor.document().and_then(|d| d.to_json().ok()).unwrap_or_default());

    // Undo
    println!("\n⏪ Undo...");
    editor.undo();
    println!("   Bold active: {}", editor.is_mark_active(MarkKind::Bold));
    editor.undo();
    println!("   Bold active: {}", editor.is_mark_active(MarkKind::Bold));
    editor.undo();
    println!("   Text: {:?}", editor.text());

    // Redo
    println!("\n⏩ Redo...");
    editor.redo();
    println!("   Text: {:?}", editor.text());
    editor.redo();
    println!("   Bold active: {}", editor.is_mark_active(MarkKind::Bold));

    println!(
        "\n   can_undo: {} | can_redo: {} | undo entries: {}",
        editor.can_undo(),
        editor.can_redo(),
        editor.history().undo_len()
    );
}
