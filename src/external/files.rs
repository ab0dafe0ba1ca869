//! File saving and reading collaborators for export and import.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::error::Result;

/// Saves a named document somewhere the user can find it.
pub trait FileSaver {
    /// Save `contents` under `suggested_name`, returning where it went.
    fn save(&self, suggested_name: &str, contents: &str) -> Result<PathBuf>;
}

/// Reads a document chosen by the user.
pub trait FileReader {
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Saves files into a fixed directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FileSaver for DirectorySaver {
    fn save(&self, suggested_name: &str, contents: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.dir.join(suggested_name);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("Saved {} bytes to {}", contents.len(), path.display());
        Ok(path)
    }
}

/// Reads files straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(text)
    }
}
