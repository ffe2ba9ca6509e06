use super::history::History;
use super::snapshot::Snapshot;
use crate::config::HistoryConfig;
use crate::engine::DocumentEngine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What redo pushes back onto the undo stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RedoCapture {
    /// The exact snapshot removed from the redo stack
    #[default]
    Popped,
    /// The engine's snapshot read back after loading, for engines whose
    /// serialization is not stable across a load
    Reloaded,
}

/// Mediates between undo/redo requests and a document engine.
///
/// The engine is optional: until one is attached every operation is a
/// no-op. Undo and redo only commit their stack change once the engine has
/// accepted the snapshot, so a failed load leaves history untouched.
pub struct HistoryController<E> {
    engine: Option<E>,
    history: History,
    redo_capture: RedoCapture,
}

impl<E: DocumentEngine> HistoryController<E> {
    /// Controller with no engine attached yet
    pub fn new(config: &HistoryConfig) -> Self {
        Self {
            engine: None,
            history: History::with_limit(config.depth),
            redo_capture: config.redo_capture,
        }
    }

    pub fn with_engine(engine: E, config: &HistoryConfig) -> Self {
        let mut controller = Self::new(config);
        controller.attach(engine);
        controller
    }

    /// Hand over a ready engine and seed history with its current state.
    /// Returns the previously attached engine, if any.
    pub fn attach(&mut self, engine: E) -> Option<E> {
        let previous = self.engine.replace(engine);
        self.history.clear();

        if let Some(snapshot) = self.capture() {
            self.history.initialize(snapshot);
        }

        previous
    }

    /// End the session: drop history and give the engine back
    pub fn detach(&mut self) -> Option<E> {
        self.history.clear();
        self.engine.take()
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    /// Mutable engine access. Callers that change the document must follow
    /// up with `notify_change`.
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Reset history to `snapshot`. Normally done once by `attach`.
    pub fn initialize(&mut self, snapshot: Snapshot) {
        if self.engine.is_none() {
            return;
        }
        if self.history.is_initialized() {
            warn!(
                discarded_undo = self.history.undo_len(),
                discarded_redo = self.history.redo_len(),
                "history re-initialized"
            );
        }
        self.history.initialize(snapshot);
    }

    /// Record a document state produced by the engine
    pub fn record_change(&mut self, snapshot: Snapshot) -> bool {
        if self.engine.is_none() {
            return false;
        }

        let recorded = self.history.record_change(snapshot);
        if recorded {
            debug!(undo = self.history.undo_len(), "recorded change");
        }
        recorded
    }

    /// Change hook: capture the engine's current state and record it
    pub fn notify_change(&mut self) -> bool {
        match self.capture() {
            Some(snapshot) => self.record_change(snapshot),
            None => false,
        }
    }

    pub fn undo(&mut self) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        let Some(target) = self.history.undo_target() else {
            return false;
        };

        if let Err(err) = engine.load_snapshot(target) {
            warn!(error = %err, "undo failed to restore snapshot");
            return false;
        }

        self.history.undo();
        debug!(
            undo = self.history.undo_len(),
            redo = self.history.redo_len(),
            "undo"
        );
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        let Some(target) = self.history.redo_target() else {
            return false;
        };

        if let Err(err) = engine.load_snapshot(target) {
            warn!(error = %err, "redo failed to restore snapshot");
            return false;
        }

        match self.redo_capture {
            RedoCapture::Popped => {
                self.history.redo();
            }
            RedoCapture::Reloaded => match engine.snapshot() {
                Ok(captured) => {
                    self.history.redo_captured(captured);
                }
                Err(err) => {
                    warn!(error = %err, "could not re-read snapshot after redo");
                    self.history.redo();
                }
            },
        }

        debug!(
            undo = self.history.undo_len(),
            redo = self.history.redo_len(),
            "redo"
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        self.engine.is_some() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.engine.is_some() && self.history.can_redo()
    }

    fn capture(&self) -> Option<Snapshot> {
        let engine = self.engine.as_ref()?;
        match engine.snapshot() {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(error = %err, "could not capture snapshot");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, EngineResult};

    /// Engine whose document is a plain string
    #[derive(Default)]
    struct StubEngine {
        text: String,
        loads: usize,
        fail_loads: bool,
    }

    impl DocumentEngine for StubEngine {
        fn snapshot(&self) -> EngineResult<Snapshot> {
            Ok(Snapshot::from(self.text.as_str()))
        }

        fn load_snapshot(&mut self, snapshot: &Snapshot) -> EngineResult<()> {
            if self.fail_loads {
                return Err(EngineError::EmptyDocument);
            }
            self.loads += 1;
            self.text = snapshot.to_string();
            Ok(())
        }
    }

    fn controller(text: &str) -> HistoryController<StubEngine> {
        let engine = StubEngine {
            text: text.to_string(),
            ..Default::default()
        };
        HistoryController::with_engine(engine, &HistoryConfig::default())
    }

    fn edit(controller: &mut HistoryController<StubEngine>, text: &str) {
        if let Some(engine) = controller.engine_mut() {
            engine.text = text.to_string();
        }
        controller.notify_change();
    }

    #[test]
    fn test_without_engine_everything_is_noop() {
        let mut controller: HistoryController<StubEngine> =
            HistoryController::new(&HistoryConfig::default());

        controller.initialize(Snapshot::from("s0"));
        assert!(!controller.record_change(Snapshot::from("s1")));
        assert!(!controller.notify_change());
        assert!(!controller.undo());
        assert!(!controller.redo());
        assert!(!controller.can_undo());
        assert!(!controller.history().is_initialized());
    }

    #[test]
    fn test_attach_seeds_history() {
        let controller = controller("s0");
        assert!(controller.is_ready());
        assert_eq!(controller.history().undo_stack(), &[Snapshot::from("s0")]);
    }

    #[test]
    fn test_failed_load_leaves_stacks_untouched() {
        let mut controller = controller("s0");
        edit(&mut controller, "s1");

        if let Some(engine) = controller.engine_mut() {
            engine.fail_loads = true;
        }
        assert!(!controller.undo());
        assert_eq!(controller.history().undo_len(), 2);
        assert_eq!(controller.history().redo_len(), 0);
        assert_eq!(controller.engine().map(|e| e.text.as_str()), Some("s1"));
    }

    #[test]
    fn test_boundary_undo_does_not_touch_engine() {
        let mut controller = controller("s0");
        assert!(!controller.undo());
        assert!(!controller.redo());
        assert_eq!(controller.engine().map(|e| e.loads), Some(0));
    }

    #[test]
    fn test_detach_discards_history() {
        let mut controller = controller("s0");
        edit(&mut controller, "s1");

        let engine = controller.detach();
        assert_eq!(engine.map(|e| e.text), Some("s1".to_string()));
        assert!(!controller.history().is_initialized());
        assert!(!controller.undo());
    }
}
