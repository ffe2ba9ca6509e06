use crate::engine::ExtensionSet;
use crate::history::RedoCapture;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Text of the first paragraph when a session starts
    pub initial_content: String,

    /// Enabled editing extensions, fixed for the whole session
    pub extensions: ExtensionSet,

    pub history: HistoryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Maximum number of entries on the undo stack. Unset keeps every
    /// entry, so any number of edits can be undone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,

    /// What redo records on the undo stack
    pub redo_capture: RedoCapture,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            initial_content: "Start typing...".to_string(),
            extensions: ExtensionSet::all(),
            history: HistoryConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            depth: None,
            redo_capture: RedoCapture::default(),
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file. Missing fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Config named by `--config <path>`, or the defaults
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--config" {
                if let Some(path) = args.next() {
                    return Self::load(path);
                }
            }
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Extension;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.history.depth, None);
        assert_eq!(config.history.redo_capture, RedoCapture::Popped);
    }

    #[test]
    fn test_partial_config() {
        let config = EditorConfig::from_json(
            r#"{
                "initialContent": "",
                "extensions": ["bold", "italic", "codeBlock"],
                "history": { "redoCapture": "reloaded" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.initial_content, "");
        assert!(config.extensions.contains(Extension::CodeBlock));
        assert!(!config.extensions.contains(Extension::Link));
        assert_eq!(config.extensions.len(), 3);
        assert_eq!(config.history.depth, None);
        assert_eq!(config.history.redo_capture, RedoCapture::Reloaded);
    }

    #[test]
    fn test_depth_limit_is_opt_in() {
        let config = EditorConfig::from_json(r#"{ "history": { "depth": 50 } }"#).unwrap();
        assert_eq!(config.history.depth, Some(50));
        assert_eq!(config.history.redo_capture, RedoCapture::Popped);
    }

    #[test]
    fn test_unknown_extension_is_an_error() {
        let result = EditorConfig::from_json(r#"{ "extensions": ["tables"] }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EditorConfig::load("/definitely/not/here/editor.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_from_args_without_flag_uses_defaults() {
        let args = vec!["tui".to_string()];
        assert_eq!(EditorConfig::from_args(args).unwrap(), EditorConfig::default());
    }
}
