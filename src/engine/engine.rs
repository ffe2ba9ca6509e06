use super::error::EngineResult;
use crate::history::Snapshot;

/// What the history controller needs from a document engine.
///
/// The engine owns the live document. It hands out serialized snapshots of
/// the whole document and can replace its content with one.
pub trait DocumentEngine {
    /// Serialize the complete current document
    fn snapshot(&self) -> EngineResult<Snapshot>;

    /// Replace the entire document with `snapshot`. On error the document
    /// must be left as it was.
    fn load_snapshot(&mut self, snapshot: &Snapshot) -> EngineResult<()>;
}
