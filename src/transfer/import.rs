//! Import parsing for current and legacy documents, and applying them to a store.

use serde_json::Value;

use crate::error::{PromptfoldError, Result};
use crate::model::{Folder, Prompt, DEFAULT_FOLDER_ID, EXPORT_VERSION};
use crate::store::{PromptStore, RepairReport, Snapshot};

use super::ImportTicket;

/// A successfully parsed import document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedData {
    /// A `2.0` export: the full folder list.
    Current(Vec<Folder>),
    /// A pre-folder export: a bare array of prompts.
    Legacy(Vec<Prompt>),
}

/// Which document shape an import used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Current,
    Legacy,
}

/// Result of applying an import to the store.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub kind: ImportKind,
    pub snapshot: Snapshot,
    pub repair: RepairReport,
}

/// Parse import text without touching any state.
///
/// Malformed JSON is [`PromptfoldError::ImportParse`]; well-formed JSON of
/// the wrong shape is [`PromptfoldError::ImportFormat`].
pub fn parse_import(text: &str) -> Result<ImportedData> {
    let value: Value = serde_json::from_str(text).map_err(|e| PromptfoldError::ImportParse {
        message: e.to_string(),
    })?;

    if is_current_document(&value) {
        let folders = value
            .get("folders")
            .cloned()
            .unwrap_or(Value::Null);
        let folders: Vec<Folder> =
            serde_json::from_value(folders).map_err(|e| PromptfoldError::ImportFormat {
                message: format!("folders: {}", e),
            })?;
        tracing::debug!("Parsed {} folders from export document", folders.len());
        return Ok(ImportedData::Current(folders));
    }

    if value.is_array() {
        let prompts: Vec<Prompt> =
            serde_json::from_value(value).map_err(|e| PromptfoldError::ImportFormat {
                message: format!("prompts: {}", e),
            })?;
        tracing::debug!("Parsed {} prompts from legacy array", prompts.len());
        return Ok(ImportedData::Legacy(prompts));
    }

    Err(PromptfoldError::ImportFormat {
        message: format!(
            "expected a version {} export or an array of prompts",
            EXPORT_VERSION
        ),
    })
}

fn is_current_document(value: &Value) -> bool {
    let version_matches = value.get("version").and_then(Value::as_str) == Some(EXPORT_VERSION);
    let has_folders = value
        .get("folders")
        .is_some_and(|folders| !folders.is_null());
    value.is_object() && version_matches && has_folders
}

/// Replace the store's contents with parsed import data.
///
/// A current document replaces every folder and activates the first one. A
/// legacy array becomes the default folder's prompts and activates it. The
/// repair pass runs in both cases.
pub fn apply_import(
    store: &mut PromptStore,
    data: ImportedData,
    _ticket: &ImportTicket,
) -> ImportOutcome {
    let (kind, folders, active) = match data {
        ImportedData::Current(folders) => (ImportKind::Current, folders, None),
        ImportedData::Legacy(prompts) => (
            ImportKind::Legacy,
            vec![Folder::uncategorized_with(prompts)],
            Some(DEFAULT_FOLDER_ID.to_string()),
        ),
    };

    let (snapshot, repair) = store.replace_folders(folders, active);
    tracing::debug!(
        "Imported {} folders, {} prompts",
        snapshot.folder_count(),
        snapshot.total_prompt_count()
    );
    ImportOutcome {
        kind,
        snapshot,
        repair,
    }
}
