//! File-backed slot storage (one JSON file per key).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use super::SlotStore;

/// Stores each slot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSlotStore {
    dir: PathBuf,
}

impl FileSlotStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the file path for a slot.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            bail!("Invalid slot key {:?}", key);
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SlotStore for FileSlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
        Ok(Some(content))
    }

    /// Atomic write: temp file, then rename over the slot file.
    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory {:?}", self.dir))?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {:?}", temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {:?}", path))?;

        Ok(())
    }
}
