//! Immutable views of the store.

use std::sync::Arc;

use crate::model::{Folder, Prompt, DEFAULT_FOLDER_ID};

/// A point-in-time view of every folder plus the active folder id.
///
/// Cloning is cheap: the folder list is shared. The store copies the list
/// before mutating it whenever a snapshot still holds a reference, so a
/// snapshot never changes after it is handed out.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub(super) folders: Arc<Vec<Folder>>,
    pub(super) active_folder_id: String,
    pub(super) revision: u64,
}

impl Snapshot {
    /// Folders in display order.
    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    /// The folder list as stored, for serialization.
    pub fn folder_list(&self) -> &Vec<Folder> {
        &self.folders
    }

    /// Id of the active folder. Always resolves to an existing folder.
    pub fn active_folder_id(&self) -> &str {
        &self.active_folder_id
    }

    /// Counter that advances on every effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The active folder.
    pub fn active_folder(&self) -> Option<&Folder> {
        self.folder(&self.active_folder_id)
    }

    /// The default folder.
    pub fn default_folder(&self) -> Option<&Folder> {
        self.folder(DEFAULT_FOLDER_ID)
    }

    /// Look up a folder by id.
    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    /// Look up a prompt anywhere in the store, with its owning folder.
    pub fn find_prompt(&self, id: i64) -> Option<(&Folder, &Prompt)> {
        self.folders
            .iter()
            .find_map(|folder| folder.prompts.iter().find(|p| p.id == id).map(|p| (folder, p)))
    }

    /// Number of folders.
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Number of prompts across all folders.
    pub fn total_prompt_count(&self) -> usize {
        self.folders.iter().map(|f| f.prompts.len()).sum()
    }

    /// Check whether two snapshots share the same folder list allocation.
    pub fn shares_folders_with(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.folders, &other.folders)
    }
}
