//! Folder and prompt data model.
//!
//! Field names serialize in camelCase (`fileName`, `isDefault`, `createdAt`,
//! `exportDate`) so documents exported by earlier versions of the tool load
//! unchanged.

mod folder;
mod ids;
mod prompt;

pub use folder::{Folder, DEFAULT_FOLDER_ID, DEFAULT_FOLDER_NAME};
pub use ids::IdGenerator;
pub use prompt::Prompt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Version tag written into every export document.
pub const EXPORT_VERSION: &str = "2.0";

/// Serialization envelope for a full export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub version: String,
    pub folders: Vec<Folder>,
    pub export_date: String,
}

impl ExportData {
    /// Wrap a folder sequence in a fresh envelope stamped with the current time.
    pub fn new(folders: Vec<Folder>) -> Self {
        Self {
            version: EXPORT_VERSION.to_string(),
            folders,
            export_date: now_iso(),
        }
    }
}

/// Current time as an ISO-8601 string with millisecond precision (`2024-05-01T12:00:00.000Z`).
pub fn now_iso() -> String {
    format_iso(Utc::now())
}

/// Format a timestamp the way prompts and folders store it.
pub fn format_iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Trim prompt text or a folder name; `None` when nothing is left.
pub fn normalize_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Trim an optional label, collapsing blank labels to `None`.
pub fn normalize_label(label: Option<&str>) -> Option<String> {
    label.and_then(normalize_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_iso_uses_millis_and_z() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(format_iso(at), "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn normalize_text_trims() {
        assert_eq!(normalize_text("  hello \n"), Some("hello".to_string()));
        assert_eq!(normalize_text(" \t\n"), None);
        assert_eq!(normalize_text(""), None);
    }

    #[test]
    fn normalize_label_collapses_blank() {
        assert_eq!(normalize_label(None), None);
        assert_eq!(normalize_label(Some("   ")), None);
        assert_eq!(normalize_label(Some(" notes.md ")), Some("notes.md".to_string()));
    }

    #[test]
    fn export_data_serializes_camel_case() {
        let data = ExportData::new(vec![Folder::uncategorized()]);
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["version"], "2.0");
        assert!(json.get("exportDate").is_some());
        assert!(json["folders"].is_array());
    }
}
