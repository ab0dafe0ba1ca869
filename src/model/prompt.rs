//! Prompt type.

use serde::{Deserialize, Serialize};

use super::now_iso;

/// A stored text snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    /// Unique across the whole store, not just the owning folder.
    pub id: i64,
    /// Trimmed, never empty.
    pub text: String,
    /// Optional label; serialized as `null` when absent.
    #[serde(default)]
    pub file_name: Option<String>,
    /// Creation time. Edits leave it alone.
    #[serde(default)]
    pub timestamp: String,
}

impl Prompt {
    /// Create a prompt stamped with the current time.
    ///
    /// Callers pass already-normalized text; see [`super::normalize_text`].
    pub fn new(id: i64, text: impl Into<String>, file_name: Option<String>) -> Self {
        Self {
            id,
            text: text.into(),
            file_name,
            timestamp: now_iso(),
        }
    }

    /// Case-insensitive substring match on text or file name.
    ///
    /// `needle` must already be lowercased. An empty needle matches everything.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.text.to_lowercase().contains(needle)
            || self
                .file_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(needle))
    }
}
