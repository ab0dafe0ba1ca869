//! Configuration schema.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::query::SearchScope;
use crate::storage::default_data_dir;

/// Application settings read from `config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the `prompt-folders` and `active-folder` slots live.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Directory exports are written to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Scope `list` uses when `--all` is not given.
    pub default_scope: SearchScope,

    /// Output verbosity.
    pub output: OutputMode,
}

impl AppConfig {
    /// Data directory, falling back to the platform data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Export directory, falling back to the current directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    #[default]
    Normal,
    Quiet,
}
