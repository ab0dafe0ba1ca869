//! A prompt store bound to persistent storage.
//!
//! [`Workspace`] rehydrates the store from two slots at startup and writes
//! both slots back after every mutation that changed something. Storage
//! failures never reach the caller; see [`crate::storage::Slot`].

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::Result;
use crate::external::{FileReader, FileSaver};
use crate::model::{Folder, DEFAULT_FOLDER_ID};
use crate::storage::{Slot, SlotStore};
use crate::store::{PromptStore, RepairReport, Snapshot};
use crate::transfer::{
    apply_import, export_document, export_file_name, parse_import, render_export, ImportGate,
    ImportOutcome, ImportTicket, ImportedData,
};

/// Slot holding the JSON array of folders.
pub const FOLDERS_KEY: &str = "prompt-folders";

/// Slot holding the active folder id as a JSON string.
pub const ACTIVE_FOLDER_KEY: &str = "active-folder";

/// The store plus its persistence and import plumbing.
pub struct Workspace<S: SlotStore> {
    storage: S,
    store: PromptStore,
    folders_slot: Slot<Vec<Folder>>,
    active_slot: Slot<String>,
    gate: ImportGate,
    startup_repair: RepairReport,
}

impl<S: SlotStore> Workspace<S> {
    /// Load persisted state, repairing it if needed.
    ///
    /// Missing or unreadable slots fall back to a store with just the
    /// default folder. If the repair pass changed anything, the repaired
    /// state is written back immediately.
    pub fn open(storage: S) -> Self {
        let folders_slot = Slot::new(FOLDERS_KEY);
        let active_slot = Slot::new(ACTIVE_FOLDER_KEY);

        let folders = folders_slot.load_or(&storage, vec![Folder::uncategorized()]);
        let active = active_slot.load_or(&storage, DEFAULT_FOLDER_ID.to_string());
        let (store, report) = PromptStore::rehydrate(folders, active);

        let workspace = Self {
            storage,
            store,
            folders_slot,
            active_slot,
            gate: ImportGate::new(),
            startup_repair: report,
        };
        if !workspace.startup_repair.is_clean() {
            workspace.persist();
        }
        workspace
    }

    /// The underlying store, for reads.
    pub fn store(&self) -> &PromptStore {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// What had to be fixed when the persisted state was loaded.
    pub fn startup_repair(&self) -> &RepairReport {
        &self.startup_repair
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Run a store mutation, persisting if it changed anything.
    pub fn update<F>(&mut self, mutate: F) -> Snapshot
    where
        F: FnOnce(&mut PromptStore) -> Snapshot,
    {
        let before = self.store.revision();
        let snapshot = mutate(&mut self.store);
        if snapshot.revision() != before {
            self.persist();
        }
        snapshot
    }

    /// Change the active folder and persist the choice.
    pub fn set_active_folder(&mut self, folder_id: &str) -> Snapshot {
        self.store.set_active_folder(folder_id);
        self.active_slot
            .save(&self.storage, &self.store.active_folder_id().to_string());
        self.store.snapshot()
    }

    /// Claim the import gate.
    pub fn begin_import(&self) -> Result<ImportTicket> {
        self.gate.try_begin()
    }

    /// Apply parsed data under a held ticket, then persist.
    pub fn finish_import(&mut self, ticket: ImportTicket, data: ImportedData) -> ImportOutcome {
        let outcome = apply_import(&mut self.store, data, &ticket);
        self.persist();
        drop(ticket);
        outcome
    }

    /// Parse and apply import text. Nothing changes if parsing fails.
    pub fn import_text(&mut self, text: &str) -> Result<ImportOutcome> {
        let ticket = self.begin_import()?;
        let data = parse_import(text)?;
        Ok(self.finish_import(ticket, data))
    }

    /// Read, parse and apply an import file.
    pub fn import_from(&mut self, reader: &dyn FileReader, path: &Path) -> Result<ImportOutcome> {
        let ticket = self.begin_import()?;
        let text = reader.read_to_string(path)?;
        let data = parse_import(&text)?;
        Ok(self.finish_import(ticket, data))
    }

    /// Render the current state as an export document.
    pub fn export_text(&self) -> Result<String> {
        Ok(render_export(&export_document(&self.store.snapshot()))?)
    }

    /// Export through `saver` under the dated default file name.
    pub fn export_to(&self, saver: &dyn FileSaver, date: NaiveDate) -> Result<PathBuf> {
        let text = self.export_text()?;
        saver.save(&export_file_name(date), &text)
    }

    fn persist(&self) {
        let snapshot = self.store.snapshot();
        self.folders_slot.save(&self.storage, snapshot.folder_list());
        self.active_slot
            .save(&self.storage, &snapshot.active_folder_id().to_string());
    }
}
