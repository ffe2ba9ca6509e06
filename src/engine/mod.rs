pub mod command;
pub mod engine;
pub mod error;
pub mod extension;
pub mod rich_text;

pub use command::Command;
pub use engine::DocumentEngine;
pub use error::{EngineError, EngineResult};
pub use extension::{Extension, ExtensionSet};
pub use rich_text::{BlockQuery, RichTextEngine};
