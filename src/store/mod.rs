//! The folder/prompt store.
//!
//! [`PromptStore`] owns the canonical folder list and the active folder id
//! behind a single mutation interface. Every operation returns a
//! [`Snapshot`]; invalid input (blank text, unknown ids) is a silent no-op
//! that returns the unchanged snapshot with the same revision.
//!
//! # Invariants
//!
//! After every operation:
//! 1. every prompt belongs to exactly one folder;
//! 2. exactly one folder is the default (`uncategorized`) and it is never removed;
//! 3. folder ids are unique and prompt ids are unique store-wide;
//! 4. the active folder id resolves, falling back to the default folder.
//!
//! # Example
//!
//! ```
//! use promptfold::store::PromptStore;
//!
//! let mut store = PromptStore::new();
//! let snapshot = store.create_folder("Work");
//! let work = snapshot.folders().last().unwrap().id.clone();
//!
//! let snapshot = store.add_prompt(&work, "  hello  ", None);
//! assert_eq!(snapshot.folder(&work).unwrap().prompts[0].text, "hello");
//!
//! let snapshot = store.delete_folder(&work);
//! assert_eq!(snapshot.folder_count(), 1);
//! assert_eq!(snapshot.default_folder().unwrap().prompts[0].text, "hello");
//! ```

mod repair;
mod snapshot;

pub use repair::{repair, RepairReport};
pub use snapshot::Snapshot;

use std::sync::Arc;

use crate::model::{
    normalize_label, normalize_text, Folder, IdGenerator, Prompt, DEFAULT_FOLDER_ID,
};

/// Owner of all folders and prompts.
#[derive(Debug, Clone)]
pub struct PromptStore {
    folders: Arc<Vec<Folder>>,
    active_folder_id: String,
    revision: u64,
    ids: IdGenerator,
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptStore {
    /// Create a store holding only the empty default folder.
    pub fn new() -> Self {
        Self {
            folders: Arc::new(vec![Folder::uncategorized()]),
            active_folder_id: DEFAULT_FOLDER_ID.to_string(),
            revision: 0,
            ids: IdGenerator::new(),
        }
    }

    /// Rebuild a store from previously persisted state, repairing invariants.
    pub fn rehydrate(folders: Vec<Folder>, active_folder_id: String) -> (Self, RepairReport) {
        let mut store = Self::new();
        let report = store.install(folders, Some(active_folder_id));
        store.revision = 0;
        (store, report)
    }

    // --- Reads ---

    /// Current snapshot. The active folder id is resolved against the folder list.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            folders: Arc::clone(&self.folders),
            active_folder_id: self.active_folder_id().to_string(),
            revision: self.revision,
        }
    }

    /// Folders in display order.
    pub fn folders(&self) -> &[Folder] {
        &self.folders
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

    /// Active folder id; a dangling id reads as the default folder.
    pub fn active_folder_id(&self) -> &str {
        if self.folder(&self.active_folder_id).is_some() {
            &self.active_folder_id
        } else {
            DEFAULT_FOLDER_ID
        }
    }

    /// The active folder.
    pub fn active_folder(&self) -> Option<&Folder> {
        self.folder(self.active_folder_id())
    }

    /// Number of prompts across all folders.
    pub fn total_prompt_count(&self) -> usize {
        self.folders.iter().map(|f| f.prompts.len()).sum()
    }

    /// Counter that advances on every effective mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    // --- Active folder ---

    /// Point the active folder at `folder_id`.
    ///
    /// The id may not exist (yet); reads resolve it to the default folder and
    /// the next mutation resets it.
    pub fn set_active_folder(&mut self, folder_id: &str) {
        self.active_folder_id = folder_id.to_string();
    }

    // --- Prompt operations ---

    /// Prepend a new prompt to `folder_id`.
    ///
    /// No-op when `text` trims to empty or the folder does not exist.
    pub fn add_prompt(&mut self, folder_id: &str, text: &str, file_name: Option<&str>) -> Snapshot {
        let Some(text) = normalize_text(text) else {
            tracing::debug!("add_prompt ignored: empty text");
            return self.snapshot();
        };
        let Some(index) = self.folder_index(folder_id) else {
            tracing::debug!("add_prompt ignored: unknown folder {:?}", folder_id);
            return self.snapshot();
        };

        let folders = Arc::clone(&self.folders);
        let id = self
            .ids
            .next_prompt_id(|candidate| folders.iter().any(|f| f.position_of(candidate).is_some()));
        drop(folders);

        let prompt = Prompt::new(id, text, normalize_label(file_name));
        tracing::debug!("Adding prompt {} to folder {:?}", prompt.id, folder_id);
        self.folders_mut()[index].prompts.insert(0, prompt);
        self.commit()
    }

    /// Replace a prompt's text and file name. The creation timestamp is kept.
    ///
    /// No-op when `text` trims to empty or the prompt does not exist.
    pub fn edit_prompt(&mut self, prompt_id: i64, text: &str, file_name: Option<&str>) -> Snapshot {
        let Some(text) = normalize_text(text) else {
            tracing::debug!("edit_prompt ignored: empty text");
            return self.snapshot();
        };
        let Some((folder_index, prompt_index)) = self.locate_prompt(prompt_id) else {
            tracing::debug!("edit_prompt ignored: unknown prompt {}", prompt_id);
            return self.snapshot();
        };

        let prompt = &mut self.folders_mut()[folder_index].prompts[prompt_index];
        prompt.text = text;
        prompt.file_name = normalize_label(file_name);
        self.commit()
    }

    /// Remove a prompt from whichever folder holds it.
    pub fn delete_prompt(&mut self, prompt_id: i64) -> Snapshot {
        let Some((folder_index, prompt_index)) = self.locate_prompt(prompt_id) else {
            tracing::debug!("delete_prompt ignored: unknown prompt {}", prompt_id);
            return self.snapshot();
        };

        self.folders_mut()[folder_index].prompts.remove(prompt_index);
        self.commit()
    }

    /// Move a prompt to the front of `target_folder_id`, fields untouched.
    ///
    /// No-op when either the prompt or the target folder does not exist.
    pub fn move_prompt(&mut self, prompt_id: i64, target_folder_id: &str) -> Snapshot {
        let Some(target_index) = self.folder_index(target_folder_id) else {
            tracing::debug!("move_prompt ignored: unknown folder {:?}", target_folder_id);
            return self.snapshot();
        };
        let Some((source_index, prompt_index)) = self.locate_prompt(prompt_id) else {
            tracing::debug!("move_prompt ignored: unknown prompt {}", prompt_id);
            return self.snapshot();
        };

        let folders = self.folders_mut();
        let prompt = folders[source_index].prompts.remove(prompt_index);
        folders[target_index].prompts.insert(0, prompt);
        self.commit()
    }

    // --- Folder operations ---

    /// Append a new empty folder.
    ///
    /// No-op when `name` trims to empty. On success the new folder is the
    /// last one in the returned snapshot.
    pub fn create_folder(&mut self, name: &str) -> Snapshot {
        let Some(name) = normalize_text(name) else {
            tracing::debug!("create_folder ignored: empty name");
            return self.snapshot();
        };

        let folders = Arc::clone(&self.folders);
        let id = self
            .ids
            .next_folder_id(|candidate| folders.iter().any(|f| f.id == candidate));
        drop(folders);

        tracing::debug!("Creating folder {:?} ({})", name, id);
        self.folders_mut().push(Folder::new(id, name));
        self.commit()
    }

    /// Rename a folder. Only the name changes.
    pub fn rename_folder(&mut self, folder_id: &str, new_name: &str) -> Snapshot {
        let Some(name) = normalize_text(new_name) else {
            tracing::debug!("rename_folder ignored: empty name");
            return self.snapshot();
        };
        let Some(index) = self.folder_index(folder_id) else {
            tracing::debug!("rename_folder ignored: unknown folder {:?}", folder_id);
            return self.snapshot();
        };
        if self.folders[index].name == name {
            return self.snapshot();
        }

        self.folders_mut()[index].name = name;
        self.commit()
    }

    /// Delete a folder, moving its prompts to the front of the default folder.
    ///
    /// The default folder can never be deleted. Moved prompts keep their
    /// relative order.
    pub fn delete_folder(&mut self, folder_id: &str) -> Snapshot {
        let Some(index) = self.folder_index(folder_id) else {
            tracing::debug!("delete_folder ignored: unknown folder {:?}", folder_id);
            return self.snapshot();
        };
        if folder_id == DEFAULT_FOLDER_ID || self.folders[index].is_default {
            tracing::debug!("delete_folder ignored: default folder is protected");
            return self.snapshot();
        }

        let folders = self.folders_mut();
        let removed = folders.remove(index);
        let Some(default) = folders.iter_mut().find(|f| f.id == DEFAULT_FOLDER_ID) else {
            // Unreachable while invariant 2 holds; keep the data rather than lose it.
            folders.insert(index, removed);
            return self.snapshot();
        };

        tracing::debug!(
            "Deleting folder {:?}, moving {} prompts to default",
            folder_id,
            removed.prompts.len()
        );
        let mut prompts = removed.prompts;
        prompts.append(&mut default.prompts);
        default.prompts = prompts;

        if self.active_folder_id == folder_id {
            self.active_folder_id = DEFAULT_FOLDER_ID.to_string();
        }
        self.commit()
    }

    // --- Bulk replacement ---

    /// Replace every folder (import or restore), then repair invariants.
    ///
    /// The active folder becomes `active_folder_id` if given, else the first
    /// folder, else the default.
    pub fn replace_folders(
        &mut self,
        folders: Vec<Folder>,
        active_folder_id: Option<String>,
    ) -> (Snapshot, RepairReport) {
        let report = self.install(folders, active_folder_id);
        (self.commit(), report)
    }

    fn install(&mut self, mut folders: Vec<Folder>, active: Option<String>) -> RepairReport {
        let first = folders.first().map(|f| f.id.clone());
        let report = repair(&mut folders, &mut self.ids);
        self.folders = Arc::new(folders);
        self.active_folder_id = active
            .or(first)
            .unwrap_or_else(|| DEFAULT_FOLDER_ID.to_string());
        report
    }

    // --- Internals ---

    fn folders_mut(&mut self) -> &mut Vec<Folder> {
        Arc::make_mut(&mut self.folders)
    }

    fn folder_index(&self, folder_id: &str) -> Option<usize> {
        self.folders.iter().position(|f| f.id == folder_id)
    }

    fn locate_prompt(&self, prompt_id: i64) -> Option<(usize, usize)> {
        self.folders
            .iter()
            .enumerate()
            .find_map(|(fi, folder)| folder.position_of(prompt_id).map(|pi| (fi, pi)))
    }

    fn commit(&mut self) -> Snapshot {
        self.revision += 1;
        if self.folder(&self.active_folder_id).is_none() {
            tracing::debug!(
                "Active folder {:?} no longer exists, resetting to default",
                self.active_folder_id
            );
            self.active_folder_id = DEFAULT_FOLDER_ID.to_string();
        }
        self.snapshot()
    }
}
