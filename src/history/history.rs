use super::snapshot::Snapshot;

/// Undo/redo stacks of document snapshots.
///
/// The last entry of the undo stack is always the current document state,
/// so once initialized the undo stack never becomes empty and undo is only
/// possible while it holds more than one entry. Adjacent entries are never
/// equal.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// Undo stack limit. `None` keeps every entry.
    depth: Option<usize>,
}

impl History {
    /// Unbounded history
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /// History keeping at most `depth` entries on the undo stack (minimum 1)
    pub fn with_depth(depth: usize) -> Self {
        Self::with_limit(Some(depth))
    }

    pub fn with_limit(depth: Option<usize>) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            depth: depth.map(|depth| depth.max(1)),
        }
    }

    /// Reset to a single entry. Any existing history is discarded.
    pub fn initialize(&mut self, snapshot: Snapshot) {
        self.undo_stack.clear();
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    pub fn is_initialized(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Snapshot of the current document state
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.last()
    }

    /// Record a new document state. Returns false when `snapshot` equals the
    /// current state, in which case nothing changes.
    pub fn record_change(&mut self, snapshot: Snapshot) -> bool {
        if self.current() == Some(&snapshot) {
            return false;
        }

        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
        self.trim();
        true
    }

    /// Snapshot that `undo` would restore
    pub fn undo_target(&self) -> Option<&Snapshot> {
        match self.undo_stack.len() {
            0 | 1 => None,
            len => self.undo_stack.get(len - 2),
        }
    }

    /// Move the current state onto the redo stack. Returns the state that is
    /// now current, or `None` if there was nothing to undo.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.undo_stack.len() <= 1 {
            return None;
        }

        let current = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        self.current().cloned()
    }

    /// Snapshot that `redo` would restore
    pub fn redo_target(&self) -> Option<&Snapshot> {
        self.redo_stack.last()
    }

    /// Move the most recently undone state back onto the undo stack.
    /// Returns that state, or `None` if there was nothing to redo.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.push_distinct(next.clone());
        Some(next)
    }

    /// Like `redo`, but records `captured` (the state read back from the
    /// engine after restoring) instead of the popped value.
    pub fn redo_captured(&mut self, captured: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.push_distinct(captured);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_stack(&self) -> &[Snapshot] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo_stack
    }

    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    /// Drop both stacks (session end)
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_distinct(&mut self, snapshot: Snapshot) {
        if self.current() != Some(&snapshot) {
            self.undo_stack.push(snapshot);
            self.trim();
        }
    }

    fn trim(&mut self) {
        let Some(depth) = self.depth else {
            return;
        };
        if self.undo_stack.len() > depth {
            let excess = self.undo_stack.len() - depth;
            self.undo_stack.drain(..excess);
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(s: &str) -> Snapshot {
        Snapshot::from(s)
    }

    #[test]
    fn test_new_history_is_uninitialized() {
        let history = History::new();
        assert!(!history.is_initialized());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current(), None);
    }

    #[test]
    fn test_initialize_seeds_single_entry() {
        let mut history = History::new();
        history.initialize(snap("s0"));
        assert_eq!(history.undo_stack(), &[snap("s0")]);
        assert!(history.redo_stack().is_empty());
        assert!(!history.can_undo());
    }

    #[test]
    fn test_initialize_twice_discards_history() {
        let mut history = History::new();
        history.initialize(snap("s0"));
        history.record_change(snap("s1"));
        history.undo();
        history.initialize(snap("fresh"));
        assert_eq!(history.undo_stack(), &[snap("fresh")]);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_duplicate_record_is_ignored() {
        let mut history = History::new();
        history.initialize(snap("s0"));
        assert!(history.record_change(snap("s1")));
        assert!(!history.record_change(snap("s1")));
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn test_undo_returns_previous_state() {
        let mut history = History::new();
        history.initialize(snap("s0"));
        history.record_change(snap("s1"));

        assert_eq!(history.undo_target(), Some(&snap("s0")));
        assert_eq!(history.undo(), Some(snap("s0")));
        assert_eq!(history.redo_stack(), &[snap("s1")]);
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_redo_reinstates_popped_value() {
        let mut history = History::new();
        history.initialize(snap("s0"));
        history.record_change(snap("s1"));
        history.undo();

        assert_eq!(history.redo(), Some(snap("s1")));
        assert_eq!(history.undo_stack(), &[snap("s0"), snap("s1")]);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_redo_captured_skips_duplicate_of_top() {
        let mut history = History::new();
        history.initialize(snap("s0"));
        history.record_change(snap("s1"));
        history.undo();

        assert_eq!(history.redo_captured(snap("s1-normalized")), Some(snap("s1")));
        assert_eq!(history.undo_stack(), &[snap("s0"), snap("s1-normalized")]);

        history.undo();
        history.redo_captured(snap("s0"));
        assert_eq!(history.undo_stack(), &[snap("s0")]);
    }

    #[test]
    fn test_record_clears_redo() {
        let mut history = History::new();
        history.initialize(snap("s0"));
        history.record_change(snap("s1"));
        history.undo();
        assert!(history.can_redo());

        history.record_change(snap("s2"));
        assert!(!history.can_redo());
        assert_eq!(history.undo_stack(), &[snap("s0"), snap("s2")]);
    }

    #[test]
    fn test_unbounded_by_default() {
        let mut history = History::new();
        history.initialize(snap("0"));
        for n in 1..=500 {
            assert!(history.record_change(snap(&n.to_string())));
        }
        assert_eq!(history.depth(), None);
        assert_eq!(history.undo_len(), 501);
        assert_eq!(history.undo_stack()[0], snap("0"));
    }

    #[test]
    fn test_depth_drops_oldest_entries() {
        let mut history = History::with_depth(3);
        history.initialize(snap("s0"));
        for s in ["s1", "s2", "s3", "s4"] {
            history.record_change(snap(s));
        }
        assert_eq!(history.undo_stack(), &[snap("s2"), snap("s3"), snap("s4")]);
    }

    #[test]
    fn test_depth_zero_keeps_current_state() {
        let mut history = History::with_depth(0);
        history.initialize(snap("s0"));
        history.record_change(snap("s1"));
        assert_eq!(history.undo_stack(), &[snap("s1")]);
        assert!(!history.can_undo());
    }
}
