pub mod editor;

pub use crate::document::Selection;
pub use editor::Editor;
