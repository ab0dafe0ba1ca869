//! Prompt filtering and cross-folder search.
//!
//! The query engine is a pure function over a [`Snapshot`]: it never
//! mutates and never ranks. Results keep folder order, then in-folder order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Prompt;
use crate::store::Snapshot;

/// Which folders a search covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    /// Only the active folder.
    #[default]
    Current,
    /// Every folder, with each hit tagged by its folder.
    All,
}

impl FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current" => Ok(SearchScope::Current),
            "all" => Ok(SearchScope::All),
            _ => Err(format!("Unknown search scope: {}", s)),
        }
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchScope::Current => write!(f, "current"),
            SearchScope::All => write!(f, "all"),
        }
    }
}

/// Folder a cross-folder hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FolderRef<'a> {
    #[serde(rename = "folderId")]
    pub id: &'a str,
    #[serde(rename = "folderName")]
    pub name: &'a str,
}

/// A prompt matched by a query.
///
/// Serializes as the prompt's own fields, plus `folderId` and `folderName`
/// for cross-folder hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromptHit<'a> {
    #[serde(flatten)]
    pub prompt: &'a Prompt,
    #[serde(flatten)]
    pub folder: Option<FolderRef<'a>>,
}

/// Filter prompts by a case-insensitive substring of text or file name.
///
/// With [`SearchScope::Current`] only `active_folder_id` is searched and an
/// unknown id yields nothing. With [`SearchScope::All`] every folder is
/// searched. The query is not trimmed; an empty query matches everything.
pub fn filter_prompts<'a>(
    snapshot: &'a Snapshot,
    active_folder_id: &str,
    query: &str,
    scope: SearchScope,
) -> Vec<PromptHit<'a>> {
    let lowered = query.to_lowercase();
    let needle = lowered.as_str();

    match scope {
        SearchScope::Current => snapshot
            .folder(active_folder_id)
            .map(|folder| {
                folder
                    .prompts
                    .iter()
                    .filter(|p| p.matches(needle))
                    .map(|prompt| PromptHit {
                        prompt,
                        folder: None,
                    })
                    .collect()
            })
            .unwrap_or_default(),
        SearchScope::All => snapshot
            .folders()
            .iter()
            .flat_map(move |folder| {
                let tag = FolderRef {
                    id: &folder.id,
                    name: &folder.name,
                };
                folder
                    .prompts
                    .iter()
                    .filter(move |p| p.matches(needle))
                    .map(move |prompt| PromptHit {
                        prompt,
                        folder: Some(tag),
                    })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_FOLDER_ID;
    use crate::store::PromptStore;

    fn sample() -> (Snapshot, String) {
        let mut store = PromptStore::new();
        let work = store.create_folder("Work").folders()[1].id.clone();
        store.add_prompt(DEFAULT_FOLDER_ID, "Buy milk", None);
        store.add_prompt(DEFAULT_FOLDER_ID, "Summarize this", Some("Notes.md"));
        store.add_prompt(&work, "Write a summary of the meeting", None);
        store.add_prompt(&work, "Draft email", Some("reply.txt"));
        (store.snapshot(), work)
    }

    fn texts(hits: &[PromptHit<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.prompt.text.clone()).collect()
    }

    #[test]
    fn empty_query_returns_active_folder_in_order() {
        let (snapshot, _) = sample();
        let hits = filter_prompts(&snapshot, DEFAULT_FOLDER_ID, "", SearchScope::Current);
        assert_eq!(texts(&hits), vec!["Summarize this", "Buy milk"]);
        assert!(hits.iter().all(|h| h.folder.is_none()));
    }

    #[test]
    fn current_scope_ignores_other_folders() {
        let (snapshot, work) = sample();
        let hits = filter_prompts(&snapshot, &work, "milk", SearchScope::Current);
        assert!(hits.is_empty());
    }

    #[test]
    fn match_is_case_insensitive_on_text() {
        let (snapshot, _) = sample();
        let hits = filter_prompts(&snapshot, DEFAULT_FOLDER_ID, "MILK", SearchScope::Current);
        assert_eq!(texts(&hits), vec!["Buy milk"]);
    }

    #[test]
    fn match_checks_file_name() {
        let (snapshot, _) = sample();
        let hits = filter_prompts(&snapshot, DEFAULT_FOLDER_ID, "notes", SearchScope::Current);
        assert_eq!(texts(&hits), vec!["Summarize this"]);
    }

    #[test]
    fn query_is_not_trimmed() {
        let (snapshot, _) = sample();
        let hits = filter_prompts(&snapshot, DEFAULT_FOLDER_ID, " milk ", SearchScope::Current);
        assert!(hits.is_empty());
    }

    #[test]
    fn unknown_active_folder_yields_nothing() {
        let (snapshot, _) = sample();
        let hits = filter_prompts(&snapshot, "ghost", "", SearchScope::Current);
        assert!(hits.is_empty());
    }

    #[test]
    fn all_scope_tags_hits_with_folder() {
        let (snapshot, work) = sample();
        let hits = filter_prompts(&snapshot, DEFAULT_FOLDER_ID, "summar", SearchScope::All);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].prompt.text, "Summarize this");
        assert_eq!(hits[0].folder.unwrap().id, DEFAULT_FOLDER_ID);
        assert_eq!(hits[0].folder.unwrap().name, "Uncategorized");
        assert_eq!(hits[1].folder.unwrap().id, work);
        assert_eq!(hits[1].folder.unwrap().name, "Work");
    }

    #[test]
    fn all_scope_empty_query_flattens_everything() {
        let (snapshot, _) = sample();
        let hits = filter_prompts(&snapshot, DEFAULT_FOLDER_ID, "", SearchScope::All);
        assert_eq!(hits.len(), snapshot.total_prompt_count());
    }

    #[test]
    fn hit_serializes_with_folder_fields() {
        let (snapshot, _) = sample();
        let hits = filter_prompts(&snapshot, DEFAULT_FOLDER_ID, "milk", SearchScope::All);
        let json = serde_json::to_value(hits[0]).unwrap();

        assert_eq!(json["text"], "Buy milk");
        assert_eq!(json["fileName"], serde_json::Value::Null);
        assert_eq!(json["folderId"], DEFAULT_FOLDER_ID);
        assert_eq!(json["folderName"], "Uncategorized");
    }

    #[test]
    fn current_hit_serializes_without_folder_fields() {
        let (snapshot, _) = sample();
        let hits = filter_prompts(&snapshot, DEFAULT_FOLDER_ID, "milk", SearchScope::Current);
        let json = serde_json::to_value(hits[0]).unwrap();
        assert!(json.get("folderId").is_none());
    }

    #[test]
    fn scope_parses_case_insensitively() {
        assert_eq!("all".parse::<SearchScope>().unwrap(), SearchScope::All);
        assert_eq!("Current".parse::<SearchScope>().unwrap(), SearchScope::Current);
        assert!("everywhere".parse::<SearchScope>().is_err());
    }

    #[test]
    fn scope_displays_lowercase() {
        assert_eq!(SearchScope::All.to_string(), "all");
        assert_eq!(SearchScope::default().to_string(), "current");
    }
}
