//! Invariant repair for externally supplied folder lists.
//!
//! Rehydrated and imported data is accepted as-is and then repaired in place:
//! exactly one default folder carrying the well-known id, unique folder ids,
//! and unique prompt ids across the whole list. Nothing is ever dropped;
//! duplicates get fresh ids instead.

use std::collections::HashSet;

use crate::model::{Folder, IdGenerator, DEFAULT_FOLDER_ID};

/// What a repair pass had to change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// A fresh default folder was inserted at the front.
    pub inserted_default: bool,
    /// Former id of a folder flagged as default that was re-identified.
    pub promoted_default: Option<String>,
    /// Folders whose stray `isDefault` flag was cleared.
    pub cleared_defaults: usize,
    /// Folders that received a fresh id because theirs was already taken.
    pub reassigned_folder_ids: usize,
    /// Prompts that received a fresh id because theirs was already taken.
    pub reassigned_prompt_ids: usize,
}

impl RepairReport {
    /// True when the input already satisfied every invariant.
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Repair `folders` in place and report what changed.
///
/// Every prompt id in the list is registered with `ids` first, so ids
/// generated afterwards can never collide with existing ones.
pub fn repair(folders: &mut Vec<Folder>, ids: &mut IdGenerator) -> RepairReport {
    let mut report = RepairReport::default();

    for prompt in folders.iter().flat_map(|f| f.prompts.iter()) {
        ids.observe(prompt.id);
    }

    ensure_default_folder(folders, &mut report);
    dedupe_folder_ids(folders, ids, &mut report);

    for folder in folders.iter_mut() {
        let should_be_default = folder.id == DEFAULT_FOLDER_ID;
        if folder.is_default != should_be_default {
            if folder.is_default {
                report.cleared_defaults += 1;
            }
            folder.is_default = should_be_default;
        }
    }

    dedupe_prompt_ids(folders, ids, &mut report);

    if !report.is_clean() {
        tracing::warn!("Repaired folder data: {:?}", report);
    }

    report
}

fn ensure_default_folder(folders: &mut Vec<Folder>, report: &mut RepairReport) {
    if folders.iter().any(|f| f.id == DEFAULT_FOLDER_ID) {
        return;
    }

    if let Some(flagged) = folders.iter_mut().find(|f| f.is_default) {
        let previous = std::mem::replace(&mut flagged.id, DEFAULT_FOLDER_ID.to_string());
        report.promoted_default = Some(previous);
    } else {
        folders.insert(0, Folder::uncategorized());
        report.inserted_default = true;
    }
}

fn dedupe_folder_ids(folders: &mut [Folder], ids: &mut IdGenerator, report: &mut RepairReport) {
    let mut taken: HashSet<String> = folders.iter().map(|f| f.id.clone()).collect();
    let mut seen = HashSet::new();

    for folder in folders.iter_mut() {
        if seen.insert(folder.id.clone()) {
            continue;
        }
        let fresh = ids.next_folder_id(|candidate| taken.contains(candidate));
        tracing::debug!("Folder id {:?} duplicated, reassigned to {:?}", folder.id, fresh);
        taken.insert(fresh.clone());
        seen.insert(fresh.clone());
        folder.id = fresh;
        report.reassigned_folder_ids += 1;
    }
}

fn dedupe_prompt_ids(folders: &mut [Folder], ids: &mut IdGenerator, report: &mut RepairReport) {
    let mut taken: HashSet<i64> = folders
        .iter()
        .flat_map(|f| f.prompts.iter().map(|p| p.id))
        .collect();
    let mut seen = HashSet::new();

    for prompt in folders.iter_mut().flat_map(|f| f.prompts.iter_mut()) {
        if seen.insert(prompt.id) {
            continue;
        }
        let fresh = ids.next_prompt_id(|candidate| taken.contains(&candidate));
        tracing::debug!("Prompt id {} duplicated, reassigned to {}", prompt.id, fresh);
        taken.insert(fresh);
        seen.insert(fresh);
        prompt.id = fresh;
        report.reassigned_prompt_ids += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Prompt;

    fn prompt(id: i64) -> Prompt {
        Prompt::new(id, format!("p{}", id), None)
    }

    #[test]
    fn clean_input_is_untouched() {
        let mut folders = vec![Folder::uncategorized(), Folder::new("folder-1", "Work")];
        let before = folders.clone();
        let report = repair(&mut folders, &mut IdGenerator::new());

        assert!(report.is_clean());
        assert_eq!(folders, before);
    }

    #[test]
    fn empty_list_gets_default_folder() {
        let mut folders = Vec::new();
        let report = repair(&mut folders, &mut IdGenerator::new());

        assert!(report.inserted_default);
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].id, DEFAULT_FOLDER_ID);
        assert!(folders[0].is_default);
    }

    #[test]
    fn missing_default_is_inserted_first() {
        let mut folders = vec![Folder::new("folder-1", "Work")];
        repair(&mut folders, &mut IdGenerator::new());

        assert_eq!(folders[0].id, DEFAULT_FOLDER_ID);
        assert_eq!(folders[1].id, "folder-1");
    }

    #[test]
    fn flagged_folder_is_promoted() {
        let mut other = Folder::new("legacy-default", "Inbox");
        other.is_default = true;
        other.prompts.push(prompt(1));
        let mut folders = vec![Folder::new("folder-1", "Work"), other];

        let report = repair(&mut folders, &mut IdGenerator::new());

        assert_eq!(report.promoted_default.as_deref(), Some("legacy-default"));
        assert_eq!(folders.len(), 2);
        assert_eq!(folders[1].id, DEFAULT_FOLDER_ID);
        assert_eq!(folders[1].prompts.len(), 1);
    }

    #[test]
    fn extra_default_flags_are_cleared() {
        let mut rogue = Folder::new("folder-1", "Work");
        rogue.is_default = true;
        let mut folders = vec![Folder::uncategorized(), rogue];

        let report = repair(&mut folders, &mut IdGenerator::new());

        assert_eq!(report.cleared_defaults, 1);
        assert_eq!(folders.iter().filter(|f| f.is_default).count(), 1);
        assert!(folders[0].is_default);
    }

    #[test]
    fn duplicate_default_ids_keep_first() {
        let mut second = Folder::uncategorized();
        second.prompts.push(prompt(5));
        let mut folders = vec![Folder::uncategorized(), second];

        let report = repair(&mut folders, &mut IdGenerator::new());

        assert_eq!(report.reassigned_folder_ids, 1);
        assert_eq!(folders[0].id, DEFAULT_FOLDER_ID);
        assert_ne!(folders[1].id, DEFAULT_FOLDER_ID);
        assert!(!folders[1].is_default);
        assert_eq!(folders[1].prompts[0].id, 5);
    }

    #[test]
    fn duplicate_folder_ids_are_reassigned() {
        let mut folders = vec![
            Folder::uncategorized(),
            Folder::new("folder-1", "A"),
            Folder::new("folder-1", "B"),
        ];

        let report = repair(&mut folders, &mut IdGenerator::new());

        assert_eq!(report.reassigned_folder_ids, 1);
        assert_eq!(folders[1].id, "folder-1");
        assert_ne!(folders[2].id, "folder-1");
        assert_eq!(folders[2].name, "B");
    }

    #[test]
    fn duplicate_prompt_ids_are_reassigned_store_wide() {
        let mut work = Folder::new("folder-1", "Work");
        work.prompts.push(prompt(1));
        let mut folders = vec![Folder::uncategorized_with(vec![prompt(1), prompt(2)]), work];
        let mut ids = IdGenerator::new();

        let report = repair(&mut folders, &mut ids);

        assert_eq!(report.reassigned_prompt_ids, 1);
        let all: Vec<i64> = folders
            .iter()
            .flat_map(|f| f.prompts.iter().map(|p| p.id))
            .collect();
        let unique: HashSet<i64> = all.iter().copied().collect();
        assert_eq!(all.len(), 3);
        assert_eq!(unique.len(), 3);
        assert_eq!(folders[0].prompts[0].id, 1);
    }

    #[test]
    fn duplicate_max_ids_get_distinct_fresh_ids() {
        let mut folders = vec![Folder::uncategorized_with(vec![prompt(i64::MAX), prompt(i64::MAX)])];
        let mut ids = IdGenerator::new();

        let report = repair(&mut folders, &mut ids);

        assert_eq!(report.reassigned_prompt_ids, 1);
        let prompts = &folders[0].prompts;
        assert_eq!(prompts[0].id, i64::MAX);
        assert_ne!(prompts[1].id, i64::MAX);
    }

    #[test]
    fn store_stays_unique_after_max_id_import_and_add() {
        use crate::store::PromptStore;

        let mut store = PromptStore::new();
        let imported = vec![Folder::uncategorized_with(vec![prompt(i64::MAX), prompt(i64::MAX)])];
        store.replace_folders(imported, None);
        let snapshot = store.add_prompt(DEFAULT_FOLDER_ID, "after import", None);

        let all: Vec<i64> = snapshot
            .folders()
            .iter()
            .flat_map(|f| f.prompts.iter().map(|p| p.id))
            .collect();
        let unique: HashSet<i64> = all.iter().copied().collect();
        assert_eq!(all.len(), 3);
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn existing_ids_are_observed() {
        let far = chrono::Utc::now().timestamp_millis() + 10_000_000;
        let mut folders = vec![Folder::uncategorized_with(vec![prompt(far)])];
        let mut ids = IdGenerator::new();

        repair(&mut folders, &mut ids);

        assert!(ids.next_prompt_id(|_| false) > far);
    }
}
