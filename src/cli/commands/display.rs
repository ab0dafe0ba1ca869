//! Shared lookup and display helpers.
//!
//! Used by every command that takes a `<FOLDER>` or prompt id argument, or
//! prints prompts in a table.

use console::truncate_str;

use crate::config::AppConfig;
use crate::error::{PromptfoldError, Result};
use crate::model::{Folder, Prompt};
use crate::storage::FileSlotStore;
use crate::store::Snapshot;
use crate::workspace::Workspace;

/// Widest prompt preview shown in tables, in display columns.
pub const PREVIEW_WIDTH: usize = 60;

/// Open the workspace stored in the configured data directory.
pub fn open_workspace(config: &AppConfig) -> Workspace<FileSlotStore> {
    let dir = config.data_dir();
    tracing::debug!("Opening workspace in {}", dir.display());
    Workspace::open(FileSlotStore::new(dir))
}

/// Resolve a `<FOLDER>` argument: exact id first, then case-insensitive name.
pub fn resolve_folder<'a>(snapshot: &'a Snapshot, query: &str) -> Result<&'a Folder> {
    if let Some(folder) = snapshot.folder(query) {
        return Ok(folder);
    }

    let wanted = query.trim().to_lowercase();
    snapshot
        .folders()
        .iter()
        .find(|f| f.name.to_lowercase() == wanted)
        .ok_or_else(|| PromptfoldError::FolderNotFound {
            folder: query.to_string(),
        })
}

/// Look up a prompt by id, or fail with `PromptNotFound`.
pub fn require_prompt(snapshot: &Snapshot, id: i64) -> Result<(&Folder, &Prompt)> {
    snapshot
        .find_prompt(id)
        .ok_or(PromptfoldError::PromptNotFound { id })
}

/// First line of a prompt, shortened to fit a table cell.
pub fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let shortened = truncate_str(first_line, PREVIEW_WIDTH, "…");
    if text.lines().nth(1).is_some() && shortened.len() == first_line.len() {
        format!("{} …", first_line)
    } else {
        shortened.into_owned()
    }
}

/// Singular or plural noun for a count.
pub fn plural(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{} {}", count, one)
    } else {
        format!("{} {}", count, many)
    }
}
