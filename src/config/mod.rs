pub mod config;

pub use config::{ConfigError, EditorConfig, HistoryConfig};
