//! Folder type.

use serde::{Deserialize, Serialize};

use super::{now_iso, Prompt};

/// Well-known id of the default folder.
pub const DEFAULT_FOLDER_ID: &str = "uncategorized";

/// Display name of the default folder.
pub const DEFAULT_FOLDER_NAME: &str = "Uncategorized";

/// A named, ordered collection of prompts (newest first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Only serialized when set.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Folder {
    /// Create an empty, non-default folder.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_default: false,
            created_at: now_iso(),
            prompts: Vec::new(),
        }
    }

    /// Create the default "Uncategorized" folder.
    pub fn uncategorized() -> Self {
        Self {
            is_default: true,
            ..Self::new(DEFAULT_FOLDER_ID, DEFAULT_FOLDER_NAME)
        }
    }

    /// Create the default folder holding the given prompts.
    pub fn uncategorized_with(prompts: Vec<Prompt>) -> Self {
        Self {
            prompts,
            ..Self::uncategorized()
        }
    }

    /// Index of a prompt within this folder.
    pub fn position_of(&self, prompt_id: i64) -> Option<usize> {
        self.prompts.iter().position(|p| p.id == prompt_id)
    }
}
