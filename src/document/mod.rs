pub mod document;
pub mod node;
pub mod position;
pub mod selection;

pub use document::Document;
pub use node::{Alignment, Atom, Block, BlockKind, Inline, Mark, MarkKind};
pub use position::Position;
pub use selection::Selection;
