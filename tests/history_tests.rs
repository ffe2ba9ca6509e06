use rich_text_editor::engine::EngineResult;
use rich_text_editor::{
    DocumentEngine, EngineError, HistoryConfig, HistoryController, RedoCapture, Snapshot,
};

/// Engine whose whole document is a string
struct MemoryEngine {
    text: String,
    loads: usize,
    fail_loads: bool,
    /// Loading rewrites the text, so re-reading differs from what was loaded
    uppercase_on_load: bool,
}

impl MemoryEngine {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            loads: 0,
            fail_loads: false,
            uppercase_on_load: false,
        }
    }
}

impl DocumentEngine for MemoryEngine {
    fn snapshot(&self) -> EngineResult<Snapshot> {
        Ok(Snapshot::from(self.text.as_str()))
    }

    fn load_snapshot(&mut self, snapshot: &Snapshot) -> EngineResult<()> {
        if self.fail_loads {
            return Err(EngineError::EmptyDocument);
        }
        self.text = if self.uppercase_on_load {
            snapshot.as_str().to_uppercase()
        } else {
            snapshot.as_str().to_string()
        };
        self.loads += 1;
        Ok(())
    }
}

fn controller(text: &str) -> HistoryController<MemoryEngine> {
    HistoryController::with_engine(MemoryEngine::new(text), &HistoryConfig::default())
}

fn edit(controller: &mut HistoryController<MemoryEngine>, text: &str) -> bool {
    if let Some(engine) = controller.engine_mut() {
        engine.text = text.to_string();
    }
    controller.notify_change()
}

fn text(controller: &HistoryController<MemoryEngine>) -> &str {
    controller.engine().map(|e| e.text.as_str()).unwrap_or("")
}

fn stack(snapshots: &[Snapshot]) -> Vec<&str> {
    snapshots.iter().map(Snapshot::as_str).collect()
}

#[test]
fn test_attach_seeds_history() {
    let controller = controller("S0");
    assert_eq!(stack(controller.history().undo_stack()), vec!["S0"]);
    assert!(controller.history().redo_stack().is_empty());
    assert!(!controller.can_undo());
    assert!(!controller.can_redo());
}

#[test]
fn test_single_edit_undo_redo() {
    let mut controller = controller("S0");
    edit(&mut controller, "S1");
    assert_eq!(stack(controller.history().undo_stack()), vec!["S0", "S1"]);

    assert!(controller.undo());
    assert_eq!(text(&controller), "S0");
    assert_eq!(stack(controller.history().undo_stack()), vec!["S0"]);
    assert_eq!(stack(controller.history().redo_stack()), vec!["S1"]);

    assert!(controller.redo());
    assert_eq!(text(&controller), "S1");
    assert_eq!(stack(controller.history().undo_stack()), vec!["S0", "S1"]);
    assert!(controller.history().redo_stack().is_empty());
}

#[test]
fn test_n_edits_then_n_undos_returns_to_start() {
    let mut controller = controller("start");
    let edits = ["a", "ab", "abc", "abcd", "abcde"];
    for state in edits {
        assert!(edit(&mut controller, state));
    }
    assert_eq!(controller.history().undo_len(), edits.len() + 1);

    for _ in 0..edits.len() {
        assert!(controller.undo());
    }
    assert_eq!(text(&controller), "start");
    assert!(!controller.undo());
    assert_eq!(controller.history().redo_len(), edits.len());
}

#[test]
fn test_long_edit_sequence_is_fully_undoable() {
    let mut controller = controller("start");
    let edits = 300;
    for n in 1..=edits {
        assert!(edit(&mut controller, &format!("state {}", n)));
    }
    assert_eq!(controller.history().undo_len(), edits + 1);

    let mut undos = 0;
    while controller.undo() {
        undos += 1;
    }
    assert_eq!(undos, edits);
    assert_eq!(text(&controller), "start");
}

#[test]
fn test_duplicate_state_is_not_recorded() {
    let mut controller = controller("same");
    assert!(!controller.notify_change());
    assert!(!controller.record_change(Snapshot::from("same")));
    assert_eq!(controller.history().undo_len(), 1);

    edit(&mut controller, "next");
    assert!(!controller.record_change(Snapshot::from("next")));
    assert_eq!(controller.history().undo_len(), 2);
}

#[test]
fn test_adjacent_entries_never_equal() {
    let mut controller = controller("x");
    for state in ["y", "y", "x", "x", "y"] {
        edit(&mut controller, state);
    }
    controller.undo();
    controller.redo();

    let undo = controller.history().undo_stack();
    assert!(undo.windows(2).all(|pair| pair[0] != pair[1]));
    assert_eq!(stack(undo), vec!["x", "y", "x", "y"]);
}

#[test]
fn test_new_change_clears_redo() {
    let mut controller = controller("S0");
    edit(&mut controller, "S1");
    edit(&mut controller, "S2");
    controller.undo();
    controller.undo();
    assert_eq!(controller.history().redo_len(), 2);

    edit(&mut controller, "branch");
    assert!(!controller.can_redo());
    assert_eq!(stack(controller.history().undo_stack()), vec!["S0", "branch"]);
}

#[test]
fn test_undo_then_redo_keeps_stack_length() {
    let mut controller = controller("S0");
    edit(&mut controller, "S1");
    edit(&mut controller, "S2");
    let before = controller.history().undo_len();

    controller.undo();
    controller.redo();
    assert_eq!(controller.history().undo_len(), before);
    assert_eq!(
        controller.history().current().map(Snapshot::as_str),
        Some("S2")
    );
}

#[test]
fn test_boundaries_do_not_touch_engine() {
    let mut controller = controller("only");

    assert!(!controller.undo());
    assert!(!controller.redo());
    assert_eq!(controller.engine().map(|e| e.loads), Some(0));
    assert_eq!(controller.history().undo_len(), 1);
}

#[test]
fn test_no_engine_is_noop() {
    let mut controller: HistoryController<MemoryEngine> =
        HistoryController::new(&HistoryConfig::default());

    assert!(!controller.is_ready());
    assert!(!controller.record_change(Snapshot::from("ignored")));
    assert!(!controller.notify_change());
    assert!(!controller.undo());
    assert!(!controller.redo());
    controller.initialize(Snapshot::from("ignored"));
    assert!(!controller.history().is_initialized());
}

#[test]
fn test_failed_load_leaves_history_unchanged() {
    let mut controller = controller("S0");
    edit(&mut controller, "S1");
    if let Some(engine) = controller.engine_mut() {
        engine.fail_loads = true;
    }

    assert!(!controller.undo());
    assert_eq!(text(&controller), "S1");
    assert_eq!(controller.history().undo_len(), 2);
    assert_eq!(controller.history().redo_len(), 0);
}

#[test]
fn test_depth_limit_drops_oldest() {
    let config = HistoryConfig {
        depth: Some(3),
        ..HistoryConfig::default()
    };
    let mut controller = HistoryController::with_engine(MemoryEngine::new("0"), &config);
    for state in ["1", "2", "3", "4"] {
        edit(&mut controller, state);
    }

    assert_eq!(stack(controller.history().undo_stack()), vec!["2", "3", "4"]);
    assert!(controller.undo());
    assert!(controller.undo());
    assert!(!controller.undo());
    assert_eq!(text(&controller), "2");
}

#[test]
fn test_redo_pushes_popped_snapshot_by_default() {
    let mut controller = controller("a");
    edit(&mut controller, "b");
    if let Some(engine) = controller.engine_mut() {
        engine.uppercase_on_load = true;
    }

    controller.undo();
    controller.redo();
    assert_eq!(text(&controller), "B");
    assert_eq!(stack(controller.history().undo_stack()), vec!["a", "b"]);
}

#[test]
fn test_redo_reloaded_pushes_engine_state() {
    let config = HistoryConfig {
        redo_capture: RedoCapture::Reloaded,
        ..HistoryConfig::default()
    };
    let mut controller = HistoryController::with_engine(MemoryEngine::new("a"), &config);
    edit(&mut controller, "b");
    if let Some(engine) = controller.engine_mut() {
        engine.uppercase_on_load = true;
    }

    controller.undo();
    controller.redo();
    assert_eq!(stack(controller.history().undo_stack()), vec!["a", "B"]);
    assert!(!controller.can_redo());
}

#[test]
fn test_initialize_resets_history() {
    let mut controller = controller("S0");
    edit(&mut controller, "S1");
    controller.undo();

    controller.initialize(Snapshot::from("fresh"));
    assert_eq!(stack(controller.history().undo_stack()), vec!["fresh"]);
    assert!(!controller.can_redo());
}

#[test]
fn test_attach_replaces_engine_and_history() {
    let mut controller = controller("first");
    edit(&mut controller, "first edited");

    let previous = controller.attach(MemoryEngine::new("second"));
    assert_eq!(previous.map(|e| e.text), Some("first edited".to_string()));
    assert_eq!(stack(controller.history().undo_stack()), vec!["second"]);
}

#[test]
fn test_detach_ends_session() {
    let mut controller = controller("S0");
    edit(&mut controller, "S1");

    let engine = controller.detach();
    assert_eq!(engine.map(|e| e.text), Some("S1".to_string()));
    assert!(!controller.can_undo());
    assert!(!controller.undo());
    assert!(!controller.history().is_initialized());
}
