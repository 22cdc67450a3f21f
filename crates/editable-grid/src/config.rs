//! Grid configuration.
//!
//! A [`GridConfig`] can be built in code or read from a TOML or JSON file:
//!
//! ```toml
//! container_id = "tablecontent"
//! edit_trigger = "double_click"
//! table_class = "editablegrid"
//! confirm_keys = ["enter", "tab"]
//! cancel_keys = ["escape"]
//! active_edit_policy = "commit_previous"
//! ```
//!
//! Every field is optional; missing fields take their default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::host::{Key, PointerKind};

/// What happens to an in-progress edit when another cell is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveEditPolicy {
    /// Commit the active edit, then start the new one.
    #[default]
    CommitPrevious,
    /// Discard the active edit, then start the new one.
    CancelPrevious,
    /// Keep the active edit and ignore the activation.
    Refuse,
}

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Errors raised while reading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported configuration format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Settings for one grid instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Id of the host element the table is appended to.
    pub container_id: String,
    /// Pointer activation that starts an edit.
    pub edit_trigger: PointerKind,
    /// Class assigned to the rendered table.
    pub table_class: String,
    /// Keys that commit an edit.
    pub confirm_keys: Vec<Key>,
    /// Keys that cancel an edit.
    pub cancel_keys: Vec<Key>,
    pub active_edit_policy: ActiveEditPolicy,
}

impl GridConfig {
    /// Class given to the table when none is configured.
    pub const DEFAULT_TABLE_CLASS: &'static str = "editablegrid";

    /// Default configuration bound to `container_id`.
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            ..Self::default()
        }
    }

    pub fn with_edit_trigger(mut self, trigger: PointerKind) -> Self {
        self.edit_trigger = trigger;
        self
    }

    /// Shorthand for a double-click edit trigger.
    pub fn with_double_click(self, double_click: bool) -> Self {
        self.with_edit_trigger(if double_click {
            PointerKind::DoubleClick
        } else {
            PointerKind::Click
        })
    }

    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = class.into();
        self
    }

    pub fn with_confirm_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.confirm_keys = keys.into_iter().collect();
        self
    }

    pub fn with_cancel_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.cancel_keys = keys.into_iter().collect();
        self
    }

    pub fn with_active_edit_policy(mut self, policy: ActiveEditPolicy) -> Self {
        self.active_edit_policy = policy;
        self
    }

    pub fn is_confirm_key(&self, key: Key) -> bool {
        self.confirm_keys.contains(&key)
    }

    pub fn is_cancel_key(&self, key: Key) -> bool {
        self.cancel_keys.contains(&key)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a configuration file, choosing the format by extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match format {
            ConfigFormat::Json => Self::from_json_str(&text),
            ConfigFormat::Toml => Self::from_toml_str(&text),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            container_id: String::new(),
            edit_trigger: PointerKind::Click,
            table_class: Self::DEFAULT_TABLE_CLASS.to_string(),
            confirm_keys: vec![Key::Enter, Key::Tab],
            cancel_keys: vec![Key::Escape],
            active_edit_policy: ActiveEditPolicy::CommitPrevious,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::new("tablecontent");
        assert_eq!(config.container_id, "tablecontent");
        assert_eq!(config.edit_trigger, PointerKind::Click);
        assert_eq!(config.table_class, "editablegrid");
        assert!(config.is_confirm_key(Key::Enter));
        assert!(config.is_confirm_key(Key::Tab));
        assert!(config.is_cancel_key(Key::Escape));
        assert!(!config.is_confirm_key(Key::Char('a')));
    }

    #[test]
    fn test_toml_and_json_agree() {
        let from_toml = GridConfig::from_toml_str(
            r#"
            container_id = "grid"
            edit_trigger = "double_click"
            active_edit_policy = "refuse"
            confirm_keys = ["enter"]
            "#,
        )
        .unwrap();
        let from_json = GridConfig::from_json_str(
            r#"{"container_id": "grid", "edit_trigger": "double_click",
                "active_edit_policy": "refuse", "confirm_keys": ["enter"]}"#,
        )
        .unwrap();

        assert_eq!(from_toml, from_json);
        assert_eq!(from_toml.edit_trigger, PointerKind::DoubleClick);
        assert_eq!(from_toml.active_edit_policy, ActiveEditPolicy::Refuse);
        assert_eq!(from_toml.cancel_keys, vec![Key::Escape]);
        assert_eq!(from_toml.table_class, "editablegrid");
    }

    #[test]
    fn test_round_trip() {
        let config = GridConfig::new("grid")
            .with_double_click(true)
            .with_table_class("compact")
            .with_cancel_keys([Key::Escape, Key::Other]);

        let toml_text = toml::to_string(&config).unwrap();
        assert_eq!(GridConfig::from_toml_str(&toml_text).unwrap(), config);

        let json_text = serde_json::to_string(&config).unwrap();
        assert_eq!(GridConfig::from_json_str(&json_text).unwrap(), config);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.toml");
        std::fs::write(&path, "container_id = \"files\"\n").unwrap();
        assert_eq!(GridConfig::from_path(&path).unwrap().container_id, "files");

        let err = GridConfig::from_path(dir.path().join("grid.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));

        let err = GridConfig::from_path(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
