pub mod controller;
pub mod history;
pub mod snapshot;

pub use controller::{HistoryController, RedoCapture};
pub use history::History;
pub use snapshot::Snapshot;
